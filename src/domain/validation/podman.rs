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

//! Local engine checks

use super::rule::{Rule, ValidationLevel};
use crate::infrastructure::podman::{PodmanCli, PodmanExec};
use crate::shared::error::{Result, ServicesError};
use std::path::PathBuf;

pub struct PodmanRule {
    exec: Box<dyn PodmanExec>,
}

impl PodmanRule {
    pub fn new(binary: impl Into<String>) -> Self {
        Self::with_exec(Box::new(PodmanCli::new(binary)))
    }

    pub fn with_exec(exec: Box<dyn PodmanExec>) -> Self {
        Self { exec }
    }
}

#[async_trait::async_trait]
impl Rule for PodmanRule {
    fn name(&self) -> &str {
        "podman"
    }

    fn description(&self) -> &str {
        "Validates that podman is installed and responding"
    }

    async fn verify(&self) -> Result<()> {
        let output = self
            .exec
            .output(&["version".to_string()], None)
            .await
            .map_err(|e| ServicesError::Validation(format!("podman is not available: {}", e)))?;

        if !output.success() {
            return Err(ServicesError::Validation(format!(
                "{} version failed: {}",
                self.exec.program(),
                output.stderr.trim()
            )));
        }
        Ok(())
    }

    fn message(&self) -> &str {
        "Podman is available"
    }

    fn level(&self) -> ValidationLevel {
        ValidationLevel::Error
    }

    fn hint(&self) -> &str {
        "Install podman and make sure it is on PATH, or set podman_binary in the configuration file."
    }
}

/// Models are pulled into the model directory on demand, so a missing
/// directory only warns.
pub struct ModelDirectoryRule {
    directory: PathBuf,
}

impl ModelDirectoryRule {
    pub fn new(directory: PathBuf) -> Self {
        Self { directory }
    }
}

#[async_trait::async_trait]
impl Rule for ModelDirectoryRule {
    fn name(&self) -> &str {
        "model-directory"
    }

    fn description(&self) -> &str {
        "Validates that the model directory exists"
    }

    async fn verify(&self) -> Result<()> {
        let metadata = tokio::fs::metadata(&self.directory).await.map_err(|e| {
            ServicesError::Validation(format!(
                "model directory {} is not accessible: {}",
                self.directory.display(),
                e
            ))
        })?;

        if !metadata.is_dir() {
            return Err(ServicesError::Validation(format!(
                "model directory {} is not a directory",
                self.directory.display()
            )));
        }
        Ok(())
    }

    fn message(&self) -> &str {
        "Model directory found"
    }

    fn level(&self) -> ValidationLevel {
        ValidationLevel::Warning
    }

    fn hint(&self) -> &str {
        "Create the model directory or point model_directory at an existing one."
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::podman::CommandOutput;

    struct Version {
        code: i32,
    }

    #[async_trait::async_trait]
    impl PodmanExec for Version {
        fn program(&self) -> &str {
            "podman"
        }

        async fn output(&self, args: &[String], _stdin: Option<Vec<u8>>) -> Result<CommandOutput> {
            assert_eq!(args, ["version".to_string()]);
            Ok(CommandOutput {
                code: Some(self.code),
                stdout: b"Version: 5.2.0".to_vec(),
                stderr: if self.code == 0 {
                    String::new()
                } else {
                    "cannot connect to podman socket\n".to_string()
                },
            })
        }

        async fn stream(&self, _args: &[String]) -> Result<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_podman_rule() {
        PodmanRule::with_exec(Box::new(Version { code: 0 }))
            .verify()
            .await
            .unwrap();

        let err = PodmanRule::with_exec(Box::new(Version { code: 125 }))
            .verify()
            .await
            .unwrap_err();
        assert!(err.to_string().contains("cannot connect to podman socket"));
    }

    #[tokio::test]
    async fn test_podman_rule_missing_binary() {
        let rule = PodmanRule::new("/nonexistent/podman-binary");
        let err = rule.verify().await.unwrap_err();
        assert!(matches!(err, ServicesError::Validation(_)));
    }

    #[tokio::test]
    async fn test_model_directory_rule() {
        let dir = tempfile::tempdir().unwrap();
        let rule = ModelDirectoryRule::new(dir.path().to_path_buf());
        assert_eq!(rule.level(), ValidationLevel::Warning);
        rule.verify().await.unwrap();

        let missing = ModelDirectoryRule::new(dir.path().join("missing"));
        assert!(missing.verify().await.is_err());

        let file = dir.path().join("file");
        std::fs::write(&file, b"x").unwrap();
        assert!(ModelDirectoryRule::new(file).verify().await.is_err());
    }
}
