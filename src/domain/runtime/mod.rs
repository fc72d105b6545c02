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

//! Runtime abstraction and backend selection

pub mod traits;
pub mod types;

pub use self::traits::{Manifest, Runtime};
pub use self::types::{Container, Filters, Image, Pod, RuntimeType};

use crate::domain::config::Settings;
use crate::infrastructure::kubernetes::OpenShiftRuntime;
use crate::infrastructure::podman::PodmanRuntime;
use crate::shared::error::Result;
use std::path::PathBuf;
use tracing::debug;

/// Everything a backend needs at construction time.
#[derive(Debug, Clone)]
pub struct RuntimeOptions {
    pub runtime_type: RuntimeType,
    pub namespace: String,
    pub kubeconfig: Option<PathBuf>,
    pub context: Option<String>,
    pub podman_binary: String,
}

impl RuntimeOptions {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            runtime_type: settings.runtime,
            namespace: settings.namespace.clone(),
            kubeconfig: settings.kubeconfig.clone(),
            context: settings.context.clone(),
            podman_binary: settings.podman_binary.clone(),
        }
    }
}

/// Build the backend selected by `options.runtime_type`.
///
/// Credential resolution for the cluster backend happens here, once.
pub async fn new_runtime(options: &RuntimeOptions) -> Result<Box<dyn Runtime>> {
    debug!("Creating {} runtime", options.runtime_type);
    match options.runtime_type {
        RuntimeType::Podman => Ok(Box::new(PodmanRuntime::new(options.podman_binary.clone()))),
        RuntimeType::OpenShift => {
            let runtime = OpenShiftRuntime::new(
                options.namespace.clone(),
                options.kubeconfig.clone(),
                options.context.clone(),
            )
            .await?;
            Ok(Box::new(runtime))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::error::ServicesError;

    fn options(runtime_type: RuntimeType, kubeconfig: Option<PathBuf>) -> RuntimeOptions {
        RuntimeOptions {
            runtime_type,
            namespace: "default".to_string(),
            kubeconfig,
            context: None,
            podman_binary: "podman".to_string(),
        }
    }

    #[tokio::test]
    async fn test_podman_runtime_selected() {
        let runtime = new_runtime(&options(RuntimeType::Podman, None)).await.unwrap();
        assert_eq!(runtime.runtime_type(), RuntimeType::Podman);
    }

    #[tokio::test]
    async fn test_openshift_construction_fails_without_credentials() {
        let dir = tempfile::tempdir().unwrap();
        let result = new_runtime(&options(
            RuntimeType::OpenShift,
            Some(dir.path().join("missing")),
        ))
        .await;
        assert!(matches!(result, Err(ServicesError::Config(_))));
    }
}
