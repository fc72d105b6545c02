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

//! Kubernetes pod objects -> runtime records

use crate::domain::runtime::{Container, Pod};
use crate::infrastructure::constants::STATUS_UNKNOWN;
use k8s_openapi::api::core::v1 as corev1;
use std::collections::BTreeMap;

pub fn to_pod_list(pods: &[corev1::Pod]) -> Vec<Pod> {
    pods.iter().map(to_pod).collect()
}

pub fn to_pod(pod: &corev1::Pod) -> Pod {
    let metadata = &pod.metadata;
    let containers: &[corev1::Container] = pod
        .spec
        .as_ref()
        .map(|spec| spec.containers.as_slice())
        .unwrap_or_default();

    Pod {
        id: metadata.uid.clone().unwrap_or_default(),
        name: metadata.name.clone().unwrap_or_default(),
        status: pod_phase(pod),
        labels: metadata.labels.clone().unwrap_or_default(),
        annotations: metadata.annotations.clone().unwrap_or_default(),
        containers: to_container_list(containers),
        created: metadata.creation_timestamp.as_ref().map(|t| t.0),
        ports: extract_pod_ports(containers),
    }
}

/// Known phases pass through unchanged; a pod without one is "Unknown".
pub fn pod_phase(pod: &corev1::Pod) -> String {
    pod.status
        .as_ref()
        .and_then(|status| status.phase.clone())
        .filter(|phase| !phase.is_empty())
        .unwrap_or_else(|| STATUS_UNKNOWN.to_string())
}

pub fn to_container_list(containers: &[corev1::Container]) -> Vec<Container> {
    containers
        .iter()
        .map(|c| Container::named(c.name.clone()))
        .collect()
}

/// Group declared container ports by container name.
pub fn extract_pod_ports(containers: &[corev1::Container]) -> BTreeMap<String, Vec<String>> {
    let mut ports: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for container in containers {
        for port in container.ports.iter().flatten() {
            ports
                .entry(container.name.clone())
                .or_default()
                .push(port.container_port.to_string());
        }
    }
    ports
}
