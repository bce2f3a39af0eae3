//! External command execution for the HTTP bridge.
//!
//! Programs are always started from an argument vector. Nothing is ever
//! interpolated into a shell command line.

use async_trait::async_trait;
use serde::Serialize;
use std::path::PathBuf;
use std::process::Stdio;
use tokio::process::Command;
use tokio::time::{timeout, Duration};
use tracing::{debug, instrument};

use crate::error::AppError;

const COMMAND_TIMEOUT: Duration = Duration::from_secs(30);

/// Captured output of a finished process.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
}

/// Defines the interface for running an external program.
#[async_trait]
pub trait CommandRunner: Send + Sync + 'static {
    /// Runs `program` with `args` and returns its output. A non-zero exit
    /// status is an [`AppError::Command`] carrying stderr.
    async fn run(&self, program: &str, args: &[String]) -> Result<CommandOutput, AppError>;
}

/// Runs programs as child processes.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessRunner;

#[async_trait]
impl CommandRunner for ProcessRunner {
    #[instrument(skip(self))]
    async fn run(&self, program: &str, args: &[String]) -> Result<CommandOutput, AppError> {
        let child = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .output();

        let output = timeout(COMMAND_TIMEOUT, child)
            .await?
            .map_err(|e| AppError::Command(format!("Failed to start {}: {}", program, e)))?;

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

        if !output.status.success() {
            return Err(AppError::Command(format!(
                "{} exited with {}: {}",
                program,
                output.status,
                stderr.trim()
            )));
        }

        debug!("{} finished", program);
        Ok(CommandOutput { stdout, stderr })
    }
}

/// Locations of the helper scripts on the device.
#[derive(Debug, Clone)]
pub struct Scripts {
    dir: PathBuf,
}

impl Scripts {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// `bash <dir>/phone-controls.sh <action> [value]`
    pub fn phone_control(&self, action: &str, value: Option<&str>) -> Vec<String> {
        let mut argv = vec![self.script("phone-controls.sh"), action.to_string()];
        if let Some(value) = value {
            argv.push(value.to_string());
        }
        argv
    }

    /// `bash <dir>/app-launcher.sh <app>`
    pub fn launch_app(&self, app: &str) -> Vec<String> {
        vec![self.script("app-launcher.sh"), app.to_string()]
    }

    fn script(&self, name: &str) -> String {
        self.dir.join(name).to_string_lossy().into_owned()
    }
}
