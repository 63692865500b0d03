//! Project dependency installation
//!
//! Runs the package manager for the generated site in the target
//! directory, streaming its output with a timeout. The command is shown
//! before it runs so a failed install can be retried by hand.

use crate::error::{Error, Result};
use colored::Colorize;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Command;
use tokio::time::timeout;

/// Timeout for the whole install (10 minutes)
const INSTALL_TIMEOUT: Duration = Duration::from_secs(600);

/// Dependency installer for the generated site
pub struct Installer {
    program: &'static str,
    target: PathBuf,
    args: Vec<String>,
}

impl Installer {
    /// Installer running `program install <extra args>` in `target`
    pub fn new(program: &'static str, target: &Path, extra_args: &[String]) -> Self {
        let mut args = vec!["install".to_string()];
        args.extend(extra_args.iter().cloned());
        Self {
            program,
            target: target.to_path_buf(),
            args,
        }
    }

    /// The full command line, for display and manual retries
    pub fn command_line(&self) -> String {
        format!("{} {}", self.program, self.args.join(" "))
    }

    /// Run the installer, streaming its output line by line
    pub async fn install(&self) -> Result<()> {
        let cmd = self.command_line();
        println!();
        println!("{} {}", "Running:".dimmed(), cmd.yellow());
        println!();

        let mut child = Command::new(self.program)
            .args(&self.args)
            .current_dir(&self.target)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|err| Error::Install(format!("could not start \"{}\": {}", cmd, err)))?;

        let stdout = child.stdout.take().expect("Failed to capture stdout");
        let stderr = child.stderr.take().expect("Failed to capture stderr");

        let mut stdout_reader = BufReader::new(stdout).lines();
        let mut stderr_reader = BufReader::new(stderr).lines();

        let output_task = async {
            loop {
                tokio::select! {
                    line = stdout_reader.next_line() => {
                        match line {
                            Ok(Some(line)) => println!("  {}", line),
                            Ok(None) => break,
                            Err(err) => {
                                eprintln!("{} {}", "Error reading stdout:".red(), err);
                                break;
                            }
                        }
                    }
                    line = stderr_reader.next_line() => {
                        match line {
                            Ok(Some(line)) => eprintln!("  {}", line.yellow()),
                            Ok(None) => {}
                            Err(err) => {
                                eprintln!("{} {}", "Error reading stderr:".red(), err);
                            }
                        }
                    }
                }
            }
        };

        if timeout(INSTALL_TIMEOUT, output_task).await.is_err() {
            let _ = child.kill().await;
            return Err(Error::Install(format!(
                "install timed out after {} seconds; try running it manually: {}",
                INSTALL_TIMEOUT.as_secs(),
                cmd
            )));
        }

        match timeout(Duration::from_secs(5), child.wait()).await {
            Ok(Ok(status)) if status.success() => Ok(()),
            Ok(Ok(status)) => Err(Error::Install(format!(
                "install failed with exit code {}; try running it manually: {}",
                status.code().unwrap_or(-1),
                cmd
            ))),
            Ok(Err(err)) => Err(Error::Install(format!(
                "failed to wait for installer: {}",
                err
            ))),
            Err(_) => {
                let _ = child.kill().await;
                Err(Error::Install(format!(
                    "install process hung; try running it manually: {}",
                    cmd
                )))
            }
        }
    }
}
