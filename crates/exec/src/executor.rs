//! Buffered and live invocation of the resolved binary

use gsoc2_config::ExecConfig;
use gsoc2_errors::{Error, ProcessError};
use gsoc2_events::{AppEvent, EventEmitter, EventSender, FailureContext, ProcessEvent};
use gsoc2_platform::PlatformResolver;
use gsoc2_types::ExecMode;
use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

use crate::implementations::tokio_runner::TokioProcessRunner;
use crate::process::{PreparedCommand, ProcessRunner};

/// Positional arguments plus the mode to run them in
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecutionRequest {
    pub args: Vec<String>,
    pub mode: ExecMode,
}

impl ExecutionRequest {
    pub fn new<I, S>(args: I, mode: ExecMode) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            args: args.into_iter().map(Into::into).collect(),
            mode,
        }
    }

    pub fn buffered<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(args, ExecMode::Buffered)
    }

    pub fn live<I, S>(args: I, silent: bool) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(args, ExecMode::Live { silent })
    }
}

/// What a successful invocation hands back
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecOutput {
    /// Standard output of a buffered run, untrimmed
    ///
    /// Decoded as UTF-8; invalid sequences become U+FFFD.
    Captured(String),
    /// Live run finished; output went to the terminal or was discarded
    Streamed,
}

impl ExecOutput {
    #[must_use]
    pub fn captured(&self) -> Option<&str> {
        match self {
            Self::Captured(stdout) => Some(stdout),
            Self::Streamed => None,
        }
    }

    #[must_use]
    pub fn into_captured(self) -> Option<String> {
        match self {
            Self::Captured(stdout) => Some(stdout),
            Self::Streamed => None,
        }
    }
}

/// Runs the native binary, one child process per call
#[derive(Clone)]
pub struct Executor {
    resolver: PlatformResolver,
    runner: Arc<dyn ProcessRunner>,
    event_sender: Option<EventSender>,
}

impl std::fmt::Debug for Executor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Executor")
            .field("resolver", &self.resolver)
            .finish_non_exhaustive()
    }
}

impl Default for Executor {
    fn default() -> Self {
        Self::new(PlatformResolver::new())
    }
}

impl EventEmitter for Executor {
    fn event_sender(&self) -> Option<&EventSender> {
        self.event_sender.as_ref()
    }
}

fn duration_to_millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

impl Executor {
    #[must_use]
    pub fn new(resolver: PlatformResolver) -> Self {
        Self {
            resolver,
            runner: Arc::new(TokioProcessRunner::new()),
            event_sender: None,
        }
    }

    #[must_use]
    pub fn with_runner(mut self, runner: Arc<dyn ProcessRunner>) -> Self {
        self.runner = runner;
        self
    }

    #[must_use]
    pub fn with_event_sender(mut self, sender: EventSender) -> Self {
        self.event_sender = Some(sender);
        self
    }

    #[must_use]
    pub fn resolver(&self) -> &PlatformResolver {
        &self.resolver
    }

    pub fn resolver_mut(&mut self) -> &mut PlatformResolver {
        &mut self.resolver
    }

    /// Resolve the binary and build the argv and environment for `args`
    ///
    /// Header arguments from `config` are placed ahead of `args`.
    ///
    /// # Errors
    ///
    /// Returns an error if the binary path cannot be resolved.
    pub async fn prepare(
        &self,
        args: &[String],
        config_file: Option<&Path>,
        config: &ExecConfig,
    ) -> Result<PreparedCommand, Error> {
        let program = self.resolver.resolve_path().await?;
        let mut argv = config.header_args();
        argv.extend(args.iter().cloned());
        Ok(PreparedCommand::new(
            program,
            argv,
            config.env_overlay(config_file),
        ))
    }

    /// Resolve, prepare and run a request
    ///
    /// Buffered runs return the captured stdout and fail on a nonzero exit.
    /// Live runs return [`ExecOutput::Streamed`] once the child exits,
    /// whatever its status.
    ///
    /// # Errors
    ///
    /// Returns an error if resolution fails, the process cannot be spawned,
    /// or a buffered run exits unsuccessfully.
    pub async fn execute(
        &self,
        request: &ExecutionRequest,
        config_file: Option<&Path>,
        config: &ExecConfig,
    ) -> Result<ExecOutput, Error> {
        let cmd = self.prepare(&request.args, config_file, config).await?;
        self.run(&cmd, request.mode).await
    }

    /// Run an already prepared command
    ///
    /// # Errors
    ///
    /// See [`Executor::execute`].
    pub async fn run(&self, cmd: &PreparedCommand, mode: ExecMode) -> Result<ExecOutput, Error> {
        let program = cmd.program_name();
        debug!(program = %program, args = ?cmd.args(), mode = %mode, "spawning gsoc2-cli");
        self.emit(AppEvent::Process(ProcessEvent::Started {
            program: program.clone(),
            args: cmd.args().to_vec(),
            mode: mode.to_string(),
        }));

        let start = Instant::now();
        let result = match mode {
            ExecMode::Buffered => self.run_buffered(cmd, &program, start).await,
            ExecMode::Live { silent } => self.run_live(cmd, silent, &program, start).await,
        };

        if let Err(err) = &result {
            self.emit(AppEvent::Process(ProcessEvent::Failed {
                program,
                failure: FailureContext::from_error(err),
                duration_ms: duration_to_millis(start.elapsed()),
            }));
        }
        result.map_err(Error::from)
    }

    async fn run_buffered(
        &self,
        cmd: &PreparedCommand,
        program: &str,
        start: Instant,
    ) -> Result<ExecOutput, ProcessError> {
        let output = self.runner.run_buffered(cmd).await?;
        let duration_ms = duration_to_millis(start.elapsed());

        match output.exit_code {
            Some(0) => {
                self.emit(AppEvent::Process(ProcessEvent::Completed {
                    program: program.to_string(),
                    exit_code: Some(0),
                    duration_ms,
                    stdout_bytes: u64::try_from(output.stdout.len()).ok(),
                }));
                Ok(ExecOutput::Captured(
                    String::from_utf8_lossy(&output.stdout).into_owned(),
                ))
            }
            Some(code) => Err(ProcessError::NonZeroExit {
                program: program.to_string(),
                code,
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            }),
            None => Err(ProcessError::Terminated {
                program: program.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            }),
        }
    }

    async fn run_live(
        &self,
        cmd: &PreparedCommand,
        silent: bool,
        program: &str,
        start: Instant,
    ) -> Result<ExecOutput, ProcessError> {
        let exit_code = self.runner.run_live(cmd, silent).await?;

        if exit_code != Some(0) {
            // Live runs resolve regardless of status; the caller is not told.
            warn!(
                program = %program,
                exit_code = ?exit_code,
                "gsoc2-cli exited unsuccessfully in live mode"
            );
        }
        self.emit(AppEvent::Process(ProcessEvent::Completed {
            program: program.to_string(),
            exit_code,
            duration_ms: duration_to_millis(start.elapsed()),
            stdout_bytes: None,
        }));
        Ok(ExecOutput::Streamed)
    }
}
