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

//! Runtime-neutral records produced by every backend

use crate::shared::error::ServicesError;
use chrono::{DateTime, Utc};
use std::collections::{BTreeMap, HashMap};

/// Filters for list operations, e.g. `{"label": ["app=rag", "tier=llm"]}`.
pub type Filters = HashMap<String, Vec<String>>;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Pod {
    pub id: String,
    pub name: String,
    pub status: String,
    pub labels: BTreeMap<String, String>,
    pub annotations: BTreeMap<String, String>,
    pub containers: Vec<Container>,
    pub created: Option<DateTime<Utc>>,
    /// Container name -> exposed container ports
    pub ports: BTreeMap<String, Vec<String>>,
}

impl Pod {
    pub fn label(&self, key: &str) -> Option<&str> {
        self.labels.get(key).map(String::as_str)
    }
}

/// Only `name` is guaranteed; the cluster backend fills nothing else.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Container {
    pub name: String,
    pub id: Option<String>,
    pub image: Option<String>,
    pub status: Option<String>,
}

impl Container {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Image {
    pub id: String,
    /// Repository tags, e.g. `quay.io/org/vllm:0.6`
    pub names: Vec<String>,
    pub size: u64,
}

impl Image {
    pub fn has_name(&self, reference: &str) -> bool {
        self.names.iter().any(|n| n == reference)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuntimeType {
    Podman,
    OpenShift,
}

impl RuntimeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RuntimeType::Podman => "podman",
            RuntimeType::OpenShift => "openshift",
        }
    }
}

impl std::fmt::Display for RuntimeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for RuntimeType {
    type Err = ServicesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "podman" => Ok(RuntimeType::Podman),
            "openshift" => Ok(RuntimeType::OpenShift),
            _ => Err(ServicesError::Config(format!(
                "Invalid runtime: {} (expected podman or openshift)",
                s
            ))),
        }
    }
}
