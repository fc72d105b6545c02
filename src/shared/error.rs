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

use thiserror::Error;
pub type Result<T> = std::result::Result<T, ServicesError>;

#[derive(Error, Debug)]
pub enum ServicesError {
    #[error("Kubernetes API error: {0}")]
    Kube(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Resource not found: {resource_type} '{name}' in namespace '{namespace}'")]
    NotFound {
        resource_type: String,
        name: String,
        namespace: String,
    },

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Command '{program}' exited with code {code:?}: {stderr}")]
    Command {
        program: String,
        code: Option<i32>,
        stderr: String,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("Invalid pattern: {0}")]
    Regex(#[from] regex::Error),
}

impl From<kube::Error> for ServicesError {
    fn from(err: kube::Error) -> Self {
        ServicesError::Kube(err.to_string())
    }
}

impl ServicesError {
    pub fn config_error(context: impl Into<String>) -> Self {
        Self::Config(context.into())
    }

    pub fn not_found(
        resource_type: impl Into<String>,
        name: impl Into<String>,
        namespace: impl Into<String>,
    ) -> Self {
        Self::NotFound {
            resource_type: resource_type.into(),
            name: name.into(),
            namespace: namespace.into(),
        }
    }

    /// Whether this error means the requested object does not exist.
    ///
    /// Structured `NotFound` is authoritative. Errors that only carry text
    /// (API failures flattened to strings, CLI stderr) fall back to a
    /// case-insensitive "not found" / "no such" match.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::NotFound { .. } => true,
            Self::Kube(msg) => contains_not_found(msg),
            Self::Command { stderr, .. } => contains_not_found(stderr),
            _ => false,
        }
    }
}

fn contains_not_found(text: &str) -> bool {
    let lower = text.to_lowercase();
    lower.contains("not found") || lower.contains("no such")
}
