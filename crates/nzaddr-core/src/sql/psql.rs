// crates/nzaddr-core/src/sql/psql.rs
use super::SqlExecutor;
use crate::error::{EtlError, Result};
use std::io::Write;
use std::process::{Command, Stdio};
use std::thread;
use tracing::debug;

/// Runs scripts through an external `psql`, by default the one inside the
/// database container (`docker exec -i <container> psql ...`).
///
/// The script is fed on stdin. `ON_ERROR_STOP` makes psql exit non-zero on
/// the first failing statement, which is the only failure signal we get.
#[derive(Debug, Clone)]
pub struct PsqlCommand {
    program: String,
    args: Vec<String>,
}

impl PsqlCommand {
    pub fn docker(container: &str, user: &str, database: &str) -> Self {
        let args = [
            "exec",
            "-i",
            container,
            "psql",
            "-U",
            user,
            "-d",
            database,
            "-v",
            "ON_ERROR_STOP=1",
        ];
        Self::new("docker", args)
    }

    /// Any program that reads SQL on stdin, e.g. a local `psql`.
    pub fn new<I, S>(program: &str, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.to_string(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    pub fn command_line(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl SqlExecutor for PsqlCommand {
    fn run_script(&mut self, script: &str) -> Result<String> {
        debug!(command = %self.command_line(), bytes = script.len(), "running psql script");

        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| EtlError::Process(format!("failed to spawn {}: {e}", self.program)))?;

        // Feed stdin from a separate thread; psql echoes a line per
        // statement and would block on a full stdout pipe otherwise.
        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| EtlError::Process("psql stdin unavailable".into()))?;
        let input = script.to_owned();
        let writer = thread::spawn(move || stdin.write_all(input.as_bytes()));

        let output = child.wait_with_output()?;
        let written = writer
            .join()
            .map_err(|_| EtlError::Process("stdin writer panicked".into()))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(EtlError::Process(format!("{} ({stderr})", output.status)));
        }
        written?;

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
