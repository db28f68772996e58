//! Detached process launching.

use std::process::{Command, Stdio};

use tracing::debug;

use crate::error::{Result, StoreError};

/// Starts external programs without waiting for them.
pub trait Launcher {
    /// Spawn `program` with `args`. Returns once the process has started.
    fn launch(&self, program: &str, args: &[&str]) -> Result<()>;
}

/// A [`Launcher`] that spawns real processes with null stdio.
///
/// The child handle is dropped immediately, so the process is never waited on
/// and its exit status is not observed.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessLauncher;

impl Launcher for ProcessLauncher {
    fn launch(&self, program: &str, args: &[&str]) -> Result<()> {
        debug!(program, ?args, "launching detached process");
        Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map(drop)
            .map_err(|source| StoreError::Launch {
                program: program.to_string(),
                source,
            })
    }
}
