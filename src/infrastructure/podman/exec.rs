// Copyright 2025 JiangLong.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::shared::error::{Result, ServicesError};
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::debug;

/// Captured result of one podman invocation.
#[derive(Debug, Clone, Default)]
pub struct CommandOutput {
    pub code: Option<i32>,
    pub stdout: Vec<u8>,
    pub stderr: String,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

#[async_trait::async_trait]
pub trait PodmanExec: Send + Sync {
    /// Program name used in error messages.
    fn program(&self) -> &str;

    /// Run with captured output. A non-zero exit is reported in the
    /// output, not as an error.
    async fn output(&self, args: &[String], stdin: Option<Vec<u8>>) -> Result<CommandOutput>;

    /// Run with stdout/stderr attached to the terminal.
    async fn stream(&self, args: &[String]) -> Result<()>;
}

pub struct PodmanCli {
    binary: String,
}

impl PodmanCli {
    pub fn new(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    fn spawn_error(&self, e: std::io::Error) -> ServicesError {
        ServicesError::Command {
            program: self.binary.clone(),
            code: None,
            stderr: format!("failed to start: {}", e),
        }
    }
}

#[async_trait::async_trait]
impl PodmanExec for PodmanCli {
    fn program(&self) -> &str {
        &self.binary
    }

    async fn output(&self, args: &[String], stdin: Option<Vec<u8>>) -> Result<CommandOutput> {
        debug!("Running {} {}", self.binary, args.join(" "));

        let mut child = Command::new(&self.binary)
            .args(args)
            .stdin(if stdin.is_some() {
                Stdio::piped()
            } else {
                Stdio::null()
            })
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| self.spawn_error(e))?;

        // Feed stdin while draining stdout/stderr so the child is always reaped.
        let pipe = child.stdin.take();
        let feed = async move {
            if let (Some(input), Some(mut pipe)) = (stdin, pipe) {
                pipe.write_all(&input).await?;
            }
            Ok::<(), std::io::Error>(())
        };

        let (fed, output) = tokio::join!(feed, child.wait_with_output());
        let output = output?;
        if let Err(e) = fed {
            // The child may exit without reading all of its input.
            if e.kind() != std::io::ErrorKind::BrokenPipe {
                return Err(e.into());
            }
            debug!("{} closed stdin early: {}", self.binary, e);
        }
        Ok(CommandOutput {
            code: output.status.code(),
            stdout: output.stdout,
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        })
    }

    async fn stream(&self, args: &[String]) -> Result<()> {
        debug!("Streaming {} {}", self.binary, args.join(" "));

        let status = Command::new(&self.binary)
            .args(args)
            .stdin(Stdio::null())
            .status()
            .await
            .map_err(|e| self.spawn_error(e))?;

        if status.success() {
            Ok(())
        } else {
            Err(ServicesError::Command {
                program: self.binary.clone(),
                code: status.code(),
                stderr: format!("{} {} failed", self.binary, args.join(" ")),
            })
        }
    }
}
