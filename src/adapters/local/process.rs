use crate::ports::process::{ProcessOutput, ProcessRunner};
use async_trait::async_trait;
use std::io;
use tokio::process::Command;

/// Spawns engines on the host through tokio. No timeout is applied.
#[derive(Clone, Copy, Debug, Default)]
pub struct TokioProcessRunner;

impl TokioProcessRunner {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ProcessRunner for TokioProcessRunner {
    async fn run(&self, program: &str, args: &[String]) -> io::Result<ProcessOutput> {
        tracing::debug!(program, ?args, "spawning");

        let output = Command::new(program)
            .args(args)
            .kill_on_drop(true)
            .output()
            .await?;

        Ok(ProcessOutput {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}
