//! Child process abstraction

use async_trait::async_trait;
use gsoc2_errors::ProcessError;
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

/// Fully resolved invocation: binary, argv and the complete child environment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedCommand {
    program: PathBuf,
    args: Vec<String>,
    env: Vec<(OsString, OsString)>,
}

impl PreparedCommand {
    /// Copy the current process environment and apply `overlay` on top
    pub fn new<I, K, V>(program: impl Into<PathBuf>, args: Vec<String>, overlay: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<OsString>,
        V: Into<OsString>,
    {
        let mut env: Vec<(OsString, OsString)> = std::env::vars_os().collect();
        for (key, value) in overlay {
            let key = key.into();
            let value = value.into();
            if let Some(slot) = env.iter_mut().find(|(k, _)| *k == key) {
                slot.1 = value;
            } else {
                env.push((key, value));
            }
        }

        Self {
            program: program.into(),
            args,
            env,
        }
    }

    #[must_use]
    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Program path as shown in logs and errors
    #[must_use]
    pub fn program_name(&self) -> String {
        self.program.display().to_string()
    }

    #[must_use]
    pub fn args(&self) -> &[String] {
        &self.args
    }

    #[must_use]
    pub fn env(&self) -> &[(OsString, OsString)] {
        &self.env
    }

    /// Value the child will see for `name`
    #[must_use]
    pub fn env_var(&self, name: impl AsRef<OsStr>) -> Option<&OsStr> {
        let name = name.as_ref();
        self.env
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_os_str())
    }
}

/// Output of a buffered run
#[derive(Debug, Clone, Default)]
pub struct CommandOutput {
    /// `None` when the child was killed by a signal
    pub exit_code: Option<i32>,
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
}

impl CommandOutput {
    #[must_use]
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// Spawns child processes
///
/// Runners report what happened; deciding whether an exit status is a
/// failure is left to the caller.
#[async_trait]
pub trait ProcessRunner: Send + Sync {
    /// Run to completion with stdin closed, capturing stdout and stderr
    async fn run_buffered(&self, cmd: &PreparedCommand) -> Result<CommandOutput, ProcessError>;

    /// Run to completion with stdin closed and output inherited, or
    /// discarded when `silent`. Returns the exit code if there is one.
    async fn run_live(
        &self,
        cmd: &PreparedCommand,
        silent: bool,
    ) -> Result<Option<i32>, ProcessError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlay_replaces_and_appends() {
        let inherited = std::env::vars_os().next();
        let mut overlay = vec![("GSOC2_TEST_ONLY_OVERLAY".to_string(), "1".to_string())];
        if let Some((key, _)) = &inherited {
            overlay.push((key.to_string_lossy().into_owned(), "replaced".to_string()));
        }

        let cmd = PreparedCommand::new("/bin/true", Vec::new(), overlay);
        assert_eq!(
            cmd.env_var("GSOC2_TEST_ONLY_OVERLAY"),
            Some(OsStr::new("1"))
        );
        if let Some((key, _)) = inherited {
            assert_eq!(cmd.env_var(&key), Some(OsStr::new("replaced")));
            assert_eq!(cmd.env().iter().filter(|(k, _)| *k == key).count(), 1);
        }
    }
}
