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

//! `podman ... --format json` payloads and their mapping to runtime records

use crate::domain::runtime::{Container, Image, Pod};
use chrono::{DateTime, TimeZone, Utc};
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};

/// `podman pod inspect` prints an object on 4.x and a one-element array on 5.x.
///
/// `Many` comes first: the inspect structs are `#[serde(default)]` and would
/// otherwise accept `[]` as an all-default record.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

impl<T> OneOrMany<T> {
    pub fn into_vec(self) -> Vec<T> {
        match self {
            OneOrMany::One(item) => vec![item],
            OneOrMany::Many(items) => items,
        }
    }
}

/// One entry of `podman pod ps --format json`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct PodSummary {
    pub id: String,
    pub name: String,
    pub status: String,
    pub created: Option<String>,
    pub labels: Option<BTreeMap<String, String>>,
    pub containers: Option<Vec<PodSummaryContainer>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct PodSummaryContainer {
    pub id: String,
    pub names: String,
    pub status: String,
}

/// `podman pod inspect <pod>`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct PodInspect {
    pub id: String,
    pub name: String,
    pub state: String,
    pub created: Option<String>,
    pub labels: Option<BTreeMap<String, String>>,
    pub infra_config: Option<InfraConfig>,
    pub containers: Option<Vec<PodInspectContainer>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct InfraConfig {
    /// `"8000/tcp" -> [{HostIp, HostPort}]`
    pub port_bindings: Option<HashMap<String, serde_json::Value>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct PodInspectContainer {
    pub id: String,
    pub name: String,
    pub state: String,
}

/// One entry of `podman ps -a --format json`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ContainerSummary {
    pub id: String,
    pub names: Option<Vec<String>>,
    pub image: String,
    pub state: String,
}

/// `podman container inspect <container>`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ContainerInspect {
    pub id: String,
    pub name: String,
    pub image_name: String,
    pub state: Option<ContainerState>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ContainerState {
    pub status: String,
}

/// One entry of `podman images --format json`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ImageSummary {
    pub id: String,
    pub names: Option<Vec<String>>,
    pub size: u64,
}

impl From<PodSummary> for Pod {
    fn from(value: PodSummary) -> Self {
        Pod {
            id: value.id,
            name: value.name,
            status: value.status,
            labels: value.labels.unwrap_or_default(),
            annotations: BTreeMap::new(),
            containers: value
                .containers
                .unwrap_or_default()
                .into_iter()
                .map(|c| Container {
                    name: c.names,
                    id: Some(c.id),
                    image: None,
                    status: Some(c.status),
                })
                .collect(),
            created: value.created.as_deref().and_then(parse_timestamp),
            ports: BTreeMap::new(),
        }
    }
}

impl From<PodInspect> for Pod {
    fn from(value: PodInspect) -> Self {
        let mut ports = BTreeMap::new();
        let published = published_ports(value.infra_config.as_ref());
        if !published.is_empty() {
            // Published ports belong to the pod's shared network namespace.
            ports.insert(value.name.clone(), published);
        }

        Pod {
            id: value.id,
            name: value.name,
            status: value.state,
            labels: value.labels.unwrap_or_default(),
            annotations: BTreeMap::new(),
            containers: value
                .containers
                .unwrap_or_default()
                .into_iter()
                .map(|c| Container {
                    name: c.name,
                    id: Some(c.id),
                    image: None,
                    status: Some(c.state),
                })
                .collect(),
            created: value.created.as_deref().and_then(parse_timestamp),
            ports,
        }
    }
}

impl From<ContainerSummary> for Container {
    fn from(value: ContainerSummary) -> Self {
        Container {
            name: value
                .names
                .and_then(|names| names.into_iter().next())
                .unwrap_or_default(),
            id: Some(value.id),
            image: Some(value.image),
            status: Some(value.state),
        }
    }
}

impl From<ContainerInspect> for Container {
    fn from(value: ContainerInspect) -> Self {
        Container {
            name: value.name,
            id: Some(value.id),
            image: Some(value.image_name),
            status: value.state.map(|s| s.status),
        }
    }
}

impl From<ImageSummary> for Image {
    fn from(value: ImageSummary) -> Self {
        Image {
            id: value.id,
            names: value.names.unwrap_or_default(),
            size: value.size,
        }
    }
}

/// Container ports from `InfraConfig.PortBindings`, protocol stripped, sorted.
fn published_ports(infra: Option<&InfraConfig>) -> Vec<String> {
    let mut ports: Vec<String> = infra
        .and_then(|i| i.port_bindings.as_ref())
        .map(|bindings| {
            bindings
                .keys()
                .map(|key| key.split('/').next().unwrap_or(key).to_string())
                .collect()
        })
        .unwrap_or_default();
    ports.sort_by_key(|p| p.parse::<u32>().unwrap_or(u32::MAX));
    ports.dedup();
    ports
}

/// Podman prints RFC 3339 with nanoseconds, or unix seconds in some fields.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    raw.parse::<i64>()
        .ok()
        .and_then(|secs| Utc.timestamp_opt(secs, 0).single())
}

/// Pod IDs from the `Pod:` section of `podman kube play` output.
pub fn parse_play_pod_ids(output: &str) -> Vec<String> {
    let mut ids = Vec::new();
    let mut in_pod_section = false;

    for line in output.lines().map(str::trim).filter(|l| !l.is_empty()) {
        if line.ends_with(':') && !line.contains(' ') {
            in_pod_section = line == "Pod:";
        } else if in_pod_section {
            ids.push(line.to_string());
        }
    }

    ids
}
