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

use super::rule::{Rule, ValidationLevel};
use crate::domain::runtime::RuntimeOptions;
use crate::infrastructure::kubernetes::{ClusterClient, ClusterClientImpl};
use crate::shared::error::{Result, ServicesError};
use tracing::debug;

/// Checks that the resolved credentials can reach the cluster.
pub struct KubeconfigRule {
    options: RuntimeOptions,
}

impl KubeconfigRule {
    pub fn new(options: RuntimeOptions) -> Self {
        Self { options }
    }
}

/// One namespace listing; any failure is reported the same way.
pub async fn check_cluster_access(client: &dyn ClusterClient) -> Result<()> {
    let namespaces = client
        .list_namespaces()
        .await
        .map_err(|e| ServicesError::Validation(format!("failed to connect to cluster: {}", e)))?;
    debug!("Cluster access verified ({} namespaces visible)", namespaces.len());
    Ok(())
}

#[async_trait::async_trait]
impl Rule for KubeconfigRule {
    fn name(&self) -> &str {
        "kubeconfig"
    }

    fn description(&self) -> &str {
        "Validates that kubeconfig can access the OpenShift cluster"
    }

    async fn verify(&self) -> Result<()> {
        let client = ClusterClientImpl::new(
            self.options.namespace.clone(),
            self.options.kubeconfig.clone(),
            self.options.context.clone(),
        )
        .await
        .map_err(|e| {
            ServicesError::Validation(format!("failed to create openshift client: {}", e))
        })?;

        check_cluster_access(&client).await
    }

    fn message(&self) -> &str {
        "Cluster authentication successful"
    }

    fn level(&self) -> ValidationLevel {
        ValidationLevel::Error
    }

    fn hint(&self) -> &str {
        "Make sure your kubeconfig is correctly configured and that you have the necessary permissions to access the OpenShift cluster."
    }
}
