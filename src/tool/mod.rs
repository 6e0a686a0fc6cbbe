//! External documentation tool
//!
//! The tool is consumed through its command line only:
//!
//! ```text
//! <program> docs generate --project-dir <dir> --profiles-dir <dir>
//! <program> docs serve    --project-dir <dir> --profiles-dir <dir>
//! ```
//!
//! Invocations go through [`DocsRunner`] so the pipeline can be exercised
//! without the tool installed. A non-zero exit is fatal and stops the
//! sequence.

use std::ffi::OsString;
use std::path::Path;
use std::process::{Command, Stdio};
use tracing::{debug, error, info};

use crate::constants::{logging, tool};
use crate::types::{DepDocsError, Result};

/// One command line for the documentation tool
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolInvocation {
    pub program: String,
    pub args: Vec<OsString>,
}

impl ToolInvocation {
    /// `<program> <subcommand...> --project-dir <dir> --profiles-dir <dir>`
    pub fn new(program: impl Into<String>, subcommand: &[&str], project_dir: &Path) -> Self {
        let dir = project_dir.as_os_str();
        let mut args: Vec<OsString> = subcommand.iter().map(|s| OsString::from(*s)).collect();
        args.extend([
            OsString::from(tool::PROJECT_DIR_FLAG),
            dir.to_os_string(),
            OsString::from(tool::PROFILES_DIR_FLAG),
            dir.to_os_string(),
        ]);
        Self {
            program: program.into(),
            args,
        }
    }

    pub fn docs_generate(program: impl Into<String>, project_dir: &Path) -> Self {
        Self::new(program, &tool::GENERATE, project_dir)
    }

    pub fn docs_serve(program: impl Into<String>, project_dir: &Path) -> Self {
        Self::new(program, &tool::SERVE, project_dir)
    }

    /// Space-joined command line for messages; not valid for re-execution
    /// when an argument is not UTF-8.
    pub fn command_line(&self) -> String {
        std::iter::once(self.program.clone())
            .chain(self.args.iter().map(|a| a.to_string_lossy().into_owned()))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Exit status of a finished invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToolExit {
    /// `None` when the process was terminated by a signal
    pub code: Option<i32>,
}

impl ToolExit {
    pub fn success() -> Self {
        Self { code: Some(0) }
    }

    pub fn is_success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Runs tool invocations to completion
pub trait DocsRunner {
    fn run(&mut self, invocation: &ToolInvocation) -> Result<ToolExit>;
}

/// Runs the tool as a child process with inherited stdio and working directory
#[derive(Debug, Default)]
pub struct ProcessRunner;

impl DocsRunner for ProcessRunner {
    fn run(&mut self, invocation: &ToolInvocation) -> Result<ToolExit> {
        debug!("Spawning {}", invocation.command_line());

        let status = Command::new(&invocation.program)
            .args(&invocation.args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status().map_err(|source| DepDocsError::ToolSpawn {
            program: invocation.program.clone(),
            source,
        })?;
        Ok(ToolExit {
            code: status.code(),
        })
    }
}

/// Run one invocation, turning a non-zero exit into an error
pub fn run_checked(runner: &mut dyn DocsRunner, invocation: &ToolInvocation) -> Result<()> {
    info!("Running {}", invocation.command_line());
    let exit = runner.run(invocation)?;
    if exit.is_success() {
        return Ok(());
    }
    error!(
        target: logging::FILE_ONLY_TARGET,
        "{} exited with {:?}",
        invocation.command_line(),
        exit.code
    );
    Err(DepDocsError::ToolFailed {
        command: invocation.command_line(),
        code: exit.code,
    })
}

/// `docs generate`, then (when `serve` is set) `docs serve` in the foreground
pub fn generate_docs(
    runner: &mut dyn DocsRunner,
    program: &str,
    project_dir: &Path,
    serve: bool,
) -> Result<()> {
    run_checked(runner, &ToolInvocation::docs_generate(program, project_dir))?;
    if serve {
        run_checked(runner, &ToolInvocation::docs_serve(program, project_dir))?;
    }
    Ok(())
}
