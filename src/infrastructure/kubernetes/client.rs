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

use crate::infrastructure::constants::{KUBECONFIG_DIR, KUBECONFIG_ENV, KUBECONFIG_FILE};
use crate::shared::error::{Result, ServicesError};
use k8s_openapi::api::core::v1::{Namespace, Pod};
use kube::api::ListParams;
use kube::config::{KubeConfigOptions, Kubeconfig};
use kube::{Api, Client};
use std::path::{Path, PathBuf};
use tracing::debug;

/// The handful of cluster calls the OpenShift runtime and the kubeconfig
/// rule need.
#[async_trait::async_trait]
pub trait ClusterClient: Send + Sync {
    fn namespace(&self) -> &str;

    async fn list_pods(&self, label_selector: &str) -> Result<Vec<Pod>>;

    /// Fails with `ServicesError::NotFound` when the pod does not exist.
    async fn get_pod(&self, name: &str) -> Result<Pod>;

    async fn list_namespaces(&self) -> Result<Vec<String>>;
}

pub struct ClusterClientImpl {
    client: Client,
    namespace: String,
}

impl ClusterClientImpl {
    /// Resolves credentials once. A failure here is fatal for the caller.
    pub async fn new(
        namespace: String,
        kubeconfig_path: Option<PathBuf>,
        context: Option<String>,
    ) -> Result<Self> {
        let config = load_kube_config(kubeconfig_path.as_deref(), context).await?;

        let client = Client::try_from(config).map_err(|e| {
            ServicesError::Kube(format!("Failed to create openshift client: {}", e))
        })?;

        Ok(Self { client, namespace })
    }
}

#[async_trait::async_trait]
impl ClusterClient for ClusterClientImpl {
    fn namespace(&self) -> &str {
        &self.namespace
    }

    async fn list_pods(&self, label_selector: &str) -> Result<Vec<Pod>> {
        let api: Api<Pod> = Api::namespaced(self.client.clone(), &self.namespace);
        let mut lp = ListParams::default();
        if !label_selector.is_empty() {
            lp = lp.labels(label_selector);
        }

        let pods = api
            .list(&lp)
            .await
            .map_err(|e| ServicesError::Kube(format!("failed to list pods: {}", e)))?;
        Ok(pods.items)
    }

    async fn get_pod(&self, name: &str) -> Result<Pod> {
        let api: Api<Pod> = Api::namespaced(self.client.clone(), &self.namespace);
        api.get(name).await.map_err(|e| {
            if let kube::Error::Api(ae) = e {
                if ae.code == 404 {
                    ServicesError::not_found("Pod", name, &self.namespace)
                } else {
                    ServicesError::Kube(ae.message)
                }
            } else {
                ServicesError::Kube(e.to_string())
            }
        })
    }

    async fn list_namespaces(&self) -> Result<Vec<String>> {
        let api: Api<Namespace> = Api::all(self.client.clone());
        let namespaces = api.list(&ListParams::default()).await?;
        Ok(namespaces
            .items
            .into_iter()
            .filter_map(|ns| ns.metadata.name)
            .collect())
    }
}

/// Build a client config.
///
/// An explicit kubeconfig path always wins. Otherwise the in-cluster service
/// account is tried first, then `KUBECONFIG`, then `~/.kube/config`.
pub async fn load_kube_config(
    kubeconfig_path: Option<&Path>,
    context: Option<String>,
) -> Result<kube::Config> {
    if kubeconfig_path.is_none() {
        match kube::Config::incluster() {
            Ok(config) => {
                debug!("Using in-cluster service account configuration");
                return Ok(config);
            }
            Err(e) => debug!("In-cluster configuration unavailable: {}", e),
        }
    }

    let path = resolve_kubeconfig_path(
        kubeconfig_path,
        std::env::var(KUBECONFIG_ENV).ok(),
        home::home_dir(),
    )
    .ok_or_else(|| {
        ServicesError::config_error(
            "failed to get openshift config: no kubeconfig found (set KUBECONFIG or --kubeconfig)",
        )
    })?;
    debug!("Loading kubeconfig from {}", path.display());

    let kubeconfig = Kubeconfig::read_from(&path).map_err(|e| {
        ServicesError::Config(format!(
            "failed to build config from kubeconfig {}: {}",
            path.display(),
            e
        ))
    })?;

    let options = KubeConfigOptions {
        context,
        cluster: None,
        user: None,
    };

    kube::Config::from_custom_kubeconfig(kubeconfig, &options)
        .await
        .map_err(|e| ServicesError::Config(format!("failed to get openshift config: {}", e)))
}

/// Pick the kubeconfig file: explicit path, else the first entry of
/// `KUBECONFIG`, else `<home>/.kube/config`.
pub fn resolve_kubeconfig_path(
    explicit: Option<&Path>,
    env_value: Option<String>,
    home: Option<PathBuf>,
) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }

    if let Some(value) = env_value.filter(|v| !v.is_empty()) {
        if let Some(first) = std::env::split_paths(&value).find(|p| !p.as_os_str().is_empty()) {
            return Some(first);
        }
    }

    home.map(|h| h.join(KUBECONFIG_DIR).join(KUBECONFIG_FILE))
}
