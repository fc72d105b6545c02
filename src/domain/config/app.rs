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

//! Process-wide configuration: loaded once, then frozen into `Settings`

use crate::domain::runtime::RuntimeType;
use crate::infrastructure::constants::{
    CONFIG_FILE_ENV, DEFAULT_MODEL_DIRECTORY, DEFAULT_NAMESPACE, DEFAULT_PODMAN_BINARY,
    DEFAULT_SPYRE_CARD_ANNOTATION_PATTERN, DEFAULT_TEMPLATES_DIRECTORY, DEFAULT_TOOL_IMAGE,
};
use crate::shared::error::{Result, ServicesError};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::read_to_string;
use std::path::PathBuf;

/// On-disk (TOML) form. Every field has a default.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub runtime: String,
    pub namespace: String,
    pub kubeconfig: Option<String>,
    pub context: Option<String>,
    pub podman_binary: String,
    pub templates_directory: String,
    pub model_directory: String,
    pub tool_image: String,
    pub spyre_card_annotation_pattern: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            runtime: RuntimeType::Podman.as_str().to_string(),
            namespace: DEFAULT_NAMESPACE.to_string(),
            kubeconfig: None,
            context: None,
            podman_binary: DEFAULT_PODMAN_BINARY.to_string(),
            templates_directory: DEFAULT_TEMPLATES_DIRECTORY.to_string(),
            model_directory: DEFAULT_MODEL_DIRECTORY.to_string(),
            tool_image: DEFAULT_TOOL_IMAGE.to_string(),
            spyre_card_annotation_pattern: DEFAULT_SPYRE_CARD_ANNOTATION_PATTERN.to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from TOML file
    pub fn from<T: AsRef<str>>(path: T) -> Result<Self> {
        let content = read_to_string(path.as_ref()).map_err(|e| {
            ServicesError::Config(format!(
                "Failed to read config file {}: {}",
                path.as_ref(),
                e
            ))
        })?;

        Ok(toml::from_str(&content)?)
    }

    /// `--config` path, else `AI_SERVICES_CONFIG`, else built-in defaults.
    pub fn load(explicit: Option<&str>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::from(path);
        }

        match std::env::var(CONFIG_FILE_ENV) {
            Ok(path) if !path.is_empty() => Self::from(path),
            _ => Ok(Self::default()),
        }
    }

    /// Validate and freeze.
    pub fn into_settings(self) -> Result<Settings> {
        let runtime = self.runtime.parse::<RuntimeType>()?;

        if self.namespace.is_empty() {
            return Err(ServicesError::config_error("namespace must not be empty"));
        }

        let spyre_card_annotation = Regex::new(&self.spyre_card_annotation_pattern)?;
        if spyre_card_annotation.captures_len() < 2 {
            return Err(ServicesError::Config(format!(
                "spyre_card_annotation_pattern must capture the container name: {}",
                self.spyre_card_annotation_pattern
            )));
        }

        Ok(Settings {
            runtime,
            namespace: self.namespace,
            kubeconfig: self.kubeconfig.filter(|p| !p.is_empty()).map(PathBuf::from),
            context: self.context.filter(|c| !c.is_empty()),
            podman_binary: self.podman_binary,
            templates_directory: PathBuf::from(self.templates_directory),
            model_directory: PathBuf::from(self.model_directory),
            tool_image: self.tool_image,
            spyre_card_annotation,
        })
    }
}

/// Immutable settings handed by reference to the components that need them.
#[derive(Debug, Clone)]
pub struct Settings {
    pub runtime: RuntimeType,
    pub namespace: String,
    pub kubeconfig: Option<PathBuf>,
    pub context: Option<String>,
    pub podman_binary: String,
    pub templates_directory: PathBuf,
    pub model_directory: PathBuf,
    pub tool_image: String,
    pub spyre_card_annotation: Regex,
}

impl Settings {
    /// Container name from a `ai-services.io/<container>--sypre-cards` key.
    pub fn spyre_card_container<'a>(&self, annotation_key: &'a str) -> Option<&'a str> {
        self.spyre_card_annotation
            .captures(annotation_key)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
    }

    /// Container name -> requested card count, from pod annotations.
    pub fn spyre_cards(&self, annotations: &BTreeMap<String, String>) -> BTreeMap<String, String> {
        annotations
            .iter()
            .filter_map(|(key, value)| {
                self.spyre_card_container(key)
                    .map(|container| (container.to_string(), value.clone()))
            })
            .collect()
    }

    pub fn model_path(&self, model: &str) -> PathBuf {
        self.model_directory.join(model)
    }
}
