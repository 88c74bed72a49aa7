//! `tokio::process` backed runner

use async_trait::async_trait;
use gsoc2_errors::ProcessError;
use std::process::Stdio;
use tokio::process::Command;

use crate::process::{CommandOutput, PreparedCommand, ProcessRunner};

/// Spawns the binary with `tokio::process::Command`
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioProcessRunner;

impl TokioProcessRunner {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

fn base_command(cmd: &PreparedCommand) -> Command {
    let mut command = Command::new(cmd.program());
    command
        .args(cmd.args())
        .env_clear()
        .envs(cmd.env().iter().map(|(k, v)| (k, v)))
        .stdin(Stdio::null());
    command
}

#[async_trait]
impl ProcessRunner for TokioProcessRunner {
    async fn run_buffered(&self, cmd: &PreparedCommand) -> Result<CommandOutput, ProcessError> {
        let output = base_command(cmd)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|e| ProcessError::spawn(cmd.program_name(), &e))?;

        Ok(CommandOutput {
            exit_code: output.status.code(),
            stdout: output.stdout,
            stderr: output.stderr,
        })
    }

    async fn run_live(
        &self,
        cmd: &PreparedCommand,
        silent: bool,
    ) -> Result<Option<i32>, ProcessError> {
        let (stdout, stderr) = if silent {
            (Stdio::null(), Stdio::null())
        } else {
            (Stdio::inherit(), Stdio::inherit())
        };

        let status = base_command(cmd)
            .stdout(stdout)
            .stderr(stderr)
            .status()
            .await
            .map_err(|e| ProcessError::spawn(cmd.program_name(), &e))?;

        Ok(status.code())
    }
}
