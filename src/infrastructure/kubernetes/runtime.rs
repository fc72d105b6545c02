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

use super::client::{ClusterClient, ClusterClientImpl};
use super::mapper::to_pod_list;
use crate::domain::runtime::{Container, Filters, Image, Manifest, Pod, Runtime, RuntimeType};
use crate::infrastructure::constants::FILTER_LABEL;
use crate::shared::error::Result;
use std::path::PathBuf;
use tracing::warn;

/// Runtime backed by an OpenShift/Kubernetes namespace.
///
/// Only pod listing and existence checks reach the API. Image handling is
/// the kubelet's job and the remaining pod/container operations have no
/// cluster implementation yet; they warn and return empty values.
pub struct OpenShiftRuntime {
    client: Box<dyn ClusterClient>,
}

impl OpenShiftRuntime {
    pub async fn new(
        namespace: String,
        kubeconfig_path: Option<PathBuf>,
        context: Option<String>,
    ) -> Result<Self> {
        let client = ClusterClientImpl::new(namespace, kubeconfig_path, context).await?;
        Ok(Self::with_client(Box::new(client)))
    }

    pub fn with_client(client: Box<dyn ClusterClient>) -> Self {
        Self { client }
    }

    pub fn namespace(&self) -> &str {
        self.client.namespace()
    }
}

/// Join the `"label"` filter values into one selector; no key means no filter.
pub fn label_selector(filters: &Filters) -> String {
    filters
        .get(FILTER_LABEL)
        .filter(|values| !values.is_empty())
        .map(|values| values.join(","))
        .unwrap_or_default()
}

#[async_trait::async_trait]
impl Runtime for OpenShiftRuntime {
    async fn list_images(&self) -> Result<Vec<Image>> {
        warn!("ListImages is not implemented for OpenShift. Returning empty list.");
        Ok(Vec::new())
    }

    async fn pull_image(&self, _image: &str) -> Result<()> {
        warn!("PullImage is not implemented for OpenShift as image pulling is managed by kubelet.");
        Ok(())
    }

    async fn list_pods(&self, filters: &Filters) -> Result<Vec<Pod>> {
        let selector = label_selector(filters);
        let pods = self.client.list_pods(&selector).await?;
        Ok(to_pod_list(&pods))
    }

    async fn create_pod(&self, _manifest: Manifest) -> Result<Vec<Pod>> {
        warn!("CreatePod is not implemented for OpenShift");
        Ok(Vec::new())
    }

    async fn delete_pod(&self, _id: &str, _force: Option<bool>) -> Result<()> {
        warn!("DeletePod is not implemented for OpenShift");
        Ok(())
    }

    async fn inspect_pod(&self, _name_or_id: &str) -> Result<Option<Pod>> {
        warn!("InspectPod is not implemented for OpenShift");
        Ok(None)
    }

    async fn pod_exists(&self, name_or_id: &str) -> Result<bool> {
        match self.client.get_pod(name_or_id).await {
            Ok(_) => Ok(true),
            Err(e) if e.is_not_found() => Ok(false),
            Err(e) => Err(e),
        }
    }

    async fn stop_pod(&self, _id: &str) -> Result<()> {
        warn!("StopPod is not implemented for OpenShift");
        Ok(())
    }

    async fn start_pod(&self, _id: &str) -> Result<()> {
        warn!("StartPod is not implemented for OpenShift");
        Ok(())
    }

    async fn pod_logs(&self, _name_or_id: &str) -> Result<()> {
        warn!("PodLogs is not implemented for OpenShift yet");
        Ok(())
    }

    async fn list_containers(&self, _filters: &Filters) -> Result<Vec<Container>> {
        warn!("ListContainers is not implemented for OpenShift");
        Ok(Vec::new())
    }

    async fn inspect_container(&self, _name_or_id: &str) -> Result<Option<Container>> {
        warn!("InspectContainer is not implemented for OpenShift");
        Ok(None)
    }

    // No container resource on the cluster: scan every pod's container specs.
    async fn container_exists(&self, name_or_id: &str) -> Result<bool> {
        let pods = self.client.list_pods("").await?;
        let found = pods.iter().any(|pod| {
            pod.spec
                .as_ref()
                .map(|spec| spec.containers.iter().any(|c| c.name == name_or_id))
                .unwrap_or(false)
        });
        Ok(found)
    }

    async fn container_logs(&self, _name_or_id: &str) -> Result<()> {
        warn!("ContainerLogs is not implemented for OpenShift yet");
        Ok(())
    }

    fn runtime_type(&self) -> RuntimeType {
        RuntimeType::OpenShift
    }
}
