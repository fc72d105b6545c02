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

//! Application templates shipped on disk

use crate::infrastructure::constants::TEMPLATE_METADATA_FILE;
use crate::shared::error::{Result, ServicesError};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::debug;

/// Contents of `<templates_directory>/<name>/metadata.yaml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TemplateMetadata {
    pub name: String,
    pub description: String,
    pub version: String,
    pub models: Vec<String>,
    pub images: Vec<String>,
}

pub struct TemplateCatalog {
    root: PathBuf,
}

impl TemplateCatalog {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Sorted names of the sub-directories that carry a metadata file.
    pub fn list(&self) -> Result<Vec<String>> {
        let entries = std::fs::read_dir(&self.root).map_err(|e| {
            ServicesError::Config(format!(
                "Failed to read templates directory {}: {}",
                self.root.display(),
                e
            ))
        })?;

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry?;
            let path = entry.path();
            if path.is_dir() && path.join(TEMPLATE_METADATA_FILE).is_file() {
                names.push(entry.file_name().to_string_lossy().to_string());
            }
        }
        names.sort();
        Ok(names)
    }

    pub fn load(&self, name: &str) -> Result<TemplateMetadata> {
        if name.is_empty() || name.contains(['/', '\\']) || name == "." || name == ".." {
            return Err(ServicesError::Validation(format!(
                "invalid template name: '{}'",
                name
            )));
        }

        let path = self.root.join(name).join(TEMPLATE_METADATA_FILE);
        if !path.is_file() {
            return Err(ServicesError::not_found(
                "Template",
                name,
                self.root.display().to_string(),
            ));
        }
        debug!("Loading template metadata from {}", path.display());

        let content = std::fs::read_to_string(&path)?;
        let mut metadata: TemplateMetadata = serde_yaml::from_str(&content)?;
        if metadata.name.is_empty() {
            metadata.name = name.to_string();
        }
        Ok(metadata)
    }

    pub fn load_all(&self) -> Result<Vec<TemplateMetadata>> {
        self.list()?.iter().map(|name| self.load(name)).collect()
    }

    pub fn models(&self, name: &str) -> Result<Vec<String>> {
        Ok(self.load(name)?.models)
    }

    /// Images the template runs, followed by the tool image, without duplicates.
    pub fn images(&self, name: &str, tool_image: &str) -> Result<Vec<String>> {
        let mut images = self.load(name)?.images;
        images.push(tool_image.to_string());

        let mut seen = std::collections::HashSet::new();
        images.retain(|image| seen.insert(image.clone()));
        Ok(images)
    }
}
