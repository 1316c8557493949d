//! Print Surfaces
//!
//! Where a rendered label goes once it leaves the renderer.

use std::{
    io,
    path::{Path, PathBuf},
    process::{ExitStatus, Stdio},
};

use async_trait::async_trait;
use mockall::automock;
use thiserror::Error;
use tokio::{fs, io::AsyncWriteExt, process::Command};
use tracing::{debug, info};

#[derive(Debug, Error)]
pub enum PrintError {
    #[error("failed to write label to {path}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("print command is empty")]
    EmptyCommand,

    #[error("failed to run print command `{command}`")]
    Spawn {
        command: String,
        #[source]
        source: io::Error,
    },

    #[error("print command `{command}` exited with {status}")]
    CommandFailed { command: String, status: ExitStatus },
}

/// Writes the label PDF to a file.
#[derive(Debug, Clone)]
pub struct FileSurface {
    path: PathBuf,
}

impl FileSurface {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl PrintSurface for FileSurface {
    async fn print(&self, pdf: Vec<u8>) -> Result<(), PrintError> {
        fs::write(&self.path, &pdf)
            .await
            .map_err(|source| PrintError::Write {
                path: self.path.clone(),
                source,
            })?;

        info!(path = %self.path.display(), len = pdf.len(), "label written");

        Ok(())
    }
}

/// Pipes the label PDF to a print command such as `lp -d labels`.
#[derive(Debug, Clone)]
pub struct CommandSurface {
    program: String,
    args: Vec<String>,
}

impl CommandSurface {
    /// Split a command line on whitespace.
    ///
    /// # Errors
    ///
    /// Returns [`PrintError::EmptyCommand`] if `command` is blank.
    pub fn parse(command: &str) -> Result<Self, PrintError> {
        let mut words = command.split_whitespace().map(str::to_string);
        let program = words.next().ok_or(PrintError::EmptyCommand)?;

        Ok(Self {
            program,
            args: words.collect(),
        })
    }

    fn command_line(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// The child is killed if piping fails before it is waited on.
    async fn run(&self, pdf: &[u8]) -> io::Result<ExitStatus> {
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .kill_on_drop(true)
            .spawn()?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(pdf).await?;
            stdin.shutdown().await?;
        }

        child.wait().await
    }
}

#[async_trait]
impl PrintSurface for CommandSurface {
    async fn print(&self, pdf: Vec<u8>) -> Result<(), PrintError> {
        let command = self.command_line();

        debug!(%command, len = pdf.len(), "sending label to printer");

        let status = self
            .run(&pdf)
            .await
            .map_err(|source| PrintError::Spawn {
                command: command.clone(),
                source,
            })?;

        if !status.success() {
            return Err(PrintError::CommandFailed { command, status });
        }

        info!(%command, "label sent to printer");

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait PrintSurface: Send + Sync {
    /// Hand a rendered label over for printing.
    async fn print(&self, pdf: Vec<u8>) -> Result<(), PrintError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[tokio::test]
    async fn file_surface_writes_the_pdf() -> TestResult {
        let dir = tempfile::tempdir()?;
        let surface = FileSurface::new(dir.path().join("label.pdf"));

        surface.print(b"%PDF-1.5".to_vec()).await?;

        assert_eq!(fs::read(surface.path()).await?, b"%PDF-1.5");

        Ok(())
    }

    #[tokio::test]
    async fn file_surface_reports_the_path_on_failure() {
        let surface = FileSurface::new("/nonexistent-dir/label.pdf");

        let result = surface.print(Vec::new()).await;

        assert!(
            matches!(&result, Err(PrintError::Write { path, .. }) if path.ends_with("label.pdf")),
            "got {result:?}"
        );
    }

    #[test]
    fn blank_commands_are_rejected() {
        assert!(matches!(
            CommandSurface::parse("   "),
            Err(PrintError::EmptyCommand)
        ));
    }

    #[test]
    fn commands_split_on_whitespace() -> TestResult {
        let surface = CommandSurface::parse("lp  -d labels")?;

        assert_eq!(surface.command_line(), "lp -d labels");

        Ok(())
    }

    #[tokio::test]
    async fn command_surface_pipes_to_stdin() -> TestResult {
        CommandSurface::parse("cat")?
            .print(b"%PDF-1.5".to_vec())
            .await?;

        Ok(())
    }

    #[tokio::test]
    async fn failing_commands_are_reported() -> TestResult {
        let result = CommandSurface::parse("false")?.print(Vec::new()).await;

        assert!(
            matches!(&result, Err(PrintError::CommandFailed { command, .. }) if command == "false"),
            "got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn commands_that_close_stdin_early_are_reported() -> TestResult {
        let result = CommandSurface::parse("true")?
            .print(vec![0; 1 << 20])
            .await;

        assert!(
            matches!(&result, Err(PrintError::Spawn { command, .. }) if command == "true"),
            "got {result:?}"
        );

        Ok(())
    }
}
