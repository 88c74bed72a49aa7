//! Client facade over the executor

use gsoc2_config::ExecConfig;
use gsoc2_errors::Error;
use gsoc2_events::EventSender;
use gsoc2_exec::{ExecOutput, ExecutionRequest, Executor};
use gsoc2_platform::PlatformResolver;
use gsoc2_types::ExecMode;
use std::path::{Path, PathBuf};

use crate::releases::Releases;

/// Entry point for driving `gsoc2-cli`
///
/// Holds the configuration applied to every invocation. `silent` only
/// affects live runs.
#[derive(Debug, Clone)]
pub struct Gsoc2Cli {
    executor: Executor,
    config_file: Option<PathBuf>,
    config: ExecConfig,
    silent: bool,
}

impl Default for Gsoc2Cli {
    fn default() -> Self {
        Self::new(None, ExecConfig::default())
    }
}

impl Gsoc2Cli {
    #[must_use]
    pub fn new(config_file: Option<PathBuf>, config: ExecConfig) -> Self {
        Self {
            executor: Executor::default(),
            config_file,
            config,
            silent: false,
        }
    }

    #[must_use]
    pub fn with_resolver(mut self, resolver: PlatformResolver) -> Self {
        *self.executor.resolver_mut() = resolver;
        self
    }

    /// Replace the executor, runner and resolver included
    #[must_use]
    pub fn with_executor(mut self, executor: Executor) -> Self {
        self.executor = executor;
        self
    }

    #[must_use]
    pub fn with_event_sender(mut self, sender: EventSender) -> Self {
        self.executor = self.executor.with_event_sender(sender);
        self
    }

    /// Discard output of live runs instead of inheriting the terminal
    #[must_use]
    pub fn silent(mut self, silent: bool) -> Self {
        self.silent = silent;
        self
    }

    #[must_use]
    pub fn config(&self) -> &ExecConfig {
        &self.config
    }

    #[must_use]
    pub fn config_file(&self) -> Option<&Path> {
        self.config_file.as_deref()
    }

    /// Run the binary with `args`
    ///
    /// # Errors
    ///
    /// Returns an error if the binary cannot be resolved or spawned, or if a
    /// buffered run exits unsuccessfully.
    pub async fn execute<I, S>(&self, args: I, live: bool) -> Result<ExecOutput, Error>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let request = ExecutionRequest::new(args, ExecMode::from_flags(live, self.silent));
        self.executor
            .execute(&request, self.config_file.as_deref(), &self.config)
            .await
    }

    /// Buffered run returning the captured stdout
    pub(crate) async fn capture<I, S>(&self, args: I) -> Result<String, Error>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Ok(self
            .execute(args, false)
            .await?
            .into_captured()
            .unwrap_or_default())
    }

    /// Version reported by the binary, without the program name
    ///
    /// # Errors
    ///
    /// Returns an error if `--version` cannot be run.
    pub async fn version(&self) -> Result<String, Error> {
        let output = self.capture(["--version"]).await?;
        Ok(strip_program_name(output.trim()).to_string())
    }

    /// Path of the binary that would be run
    ///
    /// # Errors
    ///
    /// Returns an error if no binary can be resolved.
    pub async fn binary_path(&self) -> Result<PathBuf, Error> {
        self.executor.resolver().resolve_path().await
    }

    #[must_use]
    pub fn releases(&self) -> Releases<'_> {
        Releases::new(self)
    }
}

fn strip_program_name(version: &str) -> &str {
    const PREFIX: &str = "gsoc2-cli";
    match version.get(..PREFIX.len()) {
        Some(head) if head.eq_ignore_ascii_case(PREFIX) => {
            let rest = &version[PREFIX.len()..];
            if rest.starts_with(char::is_whitespace) {
                rest.trim_start()
            } else {
                version
            }
        }
        _ => version,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_program_name() {
        assert_eq!(strip_program_name("gsoc2-cli 2.21.2"), "2.21.2");
        assert_eq!(strip_program_name("GSOC2-CLI   1.0.0"), "1.0.0");
        assert_eq!(strip_program_name("2.21.2"), "2.21.2");
        assert_eq!(strip_program_name("gsoc2-cli2"), "gsoc2-cli2");
    }
}
