//! Session trigger
//!
//! Writes the request descriptor to its well-known path and hands it to the
//! configuration-apply command. Nothing is executed if the file cannot be
//! written.

use crate::descriptor::SessionDescriptor;
use crate::errors::{FlowDumpError, Result};
use crate::{log_op_end, log_op_error, log_op_start};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::Instant;

/// What a finished external command reported
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutcome {
    pub success: bool,
    /// Human-readable exit status, e.g. `exit status: 1`
    pub status: String,
    pub stderr: String,
}

/// Runs external programs
pub trait CommandRunner {
    fn run(&self, program: &str, args: &[String]) -> std::io::Result<CommandOutcome>;
}

/// Runs programs as child processes and waits for them
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessRunner;

impl CommandRunner for ProcessRunner {
    fn run(&self, program: &str, args: &[String]) -> std::io::Result<CommandOutcome> {
        let output = Command::new(program).args(args).output()?;
        Ok(CommandOutcome {
            success: output.status.success(),
            status: output.status.to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        })
    }
}

/// Atomically write bytes to a file, creating the parent directory
///
/// Uses temp file + rename so the consumer never sees a partial document.
pub fn atomic_write(target_path: &Path, content: &[u8]) -> Result<()> {
    if let Some(parent) = target_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| FlowDumpError::CreateDir {
            path: parent.display().to_string(),
            message: e.to_string(),
        })?;
    }

    let write_err = |e: std::io::Error| FlowDumpError::WriteFile {
        path: target_path.display().to_string(),
        message: e.to_string(),
    };
    let temp_path = target_path.with_extension("tmp");
    fs::write(&temp_path, content).map_err(write_err)?;
    fs::rename(&temp_path, target_path).map_err(write_err)?;

    Ok(())
}

pub struct SessionTrigger<R: CommandRunner> {
    request_path: PathBuf,
    request_table: String,
    apply_command: Vec<String>,
    runner: R,
}

impl<R: CommandRunner> SessionTrigger<R> {
    pub fn new(
        request_path: impl Into<PathBuf>,
        request_table: impl Into<String>,
        apply_command: Vec<String>,
        runner: R,
    ) -> Self {
        Self {
            request_path: request_path.into(),
            request_table: request_table.into(),
            apply_command,
            runner,
        }
    }

    /// Write the descriptor and run the apply command against it
    pub fn trigger(&self, descriptor: &SessionDescriptor) -> Result<()> {
        let start = Instant::now();
        log_op_start!("trigger_session", session = %descriptor.session);

        let result = self.write_and_apply(descriptor);

        let duration_ms = start.elapsed().as_millis() as u64;
        match &result {
            Ok(()) => {
                log_op_end!("trigger_session", duration_ms = duration_ms, session = %descriptor.session);
            }
            Err(e) => {
                log_op_error!("trigger_session", e.clone(), duration_ms = duration_ms, session = %descriptor.session);
            }
        }
        result
    }

    fn write_and_apply(&self, descriptor: &SessionDescriptor) -> Result<()> {
        let bytes = descriptor.to_bytes(&self.request_table)?;
        atomic_write(&self.request_path, &bytes)?;
        tracing::debug!(path = %self.request_path.display(), "request descriptor written");

        let (program, leading) = self
            .apply_command
            .split_first()
            .ok_or_else(|| FlowDumpError::Config {
                message: "apply_command must name a program".to_string(),
            })?;
        let mut args = leading.to_vec();
        args.push(self.request_path.display().to_string());

        let outcome = self
            .runner
            .run(program, &args)
            .map_err(|e| FlowDumpError::CommandSpawn {
                program: program.clone(),
                message: e.to_string(),
            })?;

        if !outcome.success {
            if !outcome.stderr.is_empty() {
                tracing::warn!(program = %program, stderr = %outcome.stderr, "apply command failed");
            }
            return Err(FlowDumpError::CommandFailed {
                program: program.clone(),
                status: outcome.status,
            });
        }
        Ok(())
    }
}
