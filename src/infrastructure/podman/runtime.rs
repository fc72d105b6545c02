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

use super::exec::{CommandOutput, PodmanCli, PodmanExec};
use super::models::{
    parse_play_pod_ids, ContainerInspect, ContainerSummary, ImageSummary, OneOrMany, PodInspect,
    PodSummary,
};
use crate::domain::runtime::{Container, Filters, Image, Manifest, Pod, Runtime, RuntimeType};
use crate::infrastructure::constants::FILTER_LABEL;
use crate::shared::error::{Result, ServicesError};
use serde::de::DeserializeOwned;
use tokio::io::AsyncReadExt;
use tracing::{debug, info};

/// Runtime backed by the local Podman engine.
pub struct PodmanRuntime {
    exec: Box<dyn PodmanExec>,
}

impl PodmanRuntime {
    pub fn new(binary: impl Into<String>) -> Self {
        Self::with_exec(Box::new(PodmanCli::new(binary)))
    }

    pub fn with_exec(exec: Box<dyn PodmanExec>) -> Self {
        Self { exec }
    }

    async fn run(&self, args: Vec<String>, stdin: Option<Vec<u8>>) -> Result<CommandOutput> {
        let output = self.exec.output(&args, stdin).await?;
        if output.success() {
            Ok(output)
        } else {
            Err(ServicesError::Command {
                program: self.exec.program().to_string(),
                code: output.code,
                stderr: output.stderr,
            })
        }
    }

    async fn run_json<T: DeserializeOwned>(&self, args: Vec<String>) -> Result<T> {
        let output = self.run(args, None).await?;
        Ok(serde_json::from_slice(&output.stdout)?)
    }

    /// `podman <kind> exists <name>`: exit 0 exists, exit 1 absent.
    async fn exists(&self, kind: &str, name: &str) -> Result<bool> {
        let output = self
            .exec
            .output(&args([kind, "exists", name]), None)
            .await?;
        match output.code {
            Some(0) => Ok(true),
            Some(1) => Ok(false),
            code => Err(ServicesError::Command {
                program: self.exec.program().to_string(),
                code,
                stderr: output.stderr,
            }),
        }
    }
}

fn args<const N: usize>(items: [&str; N]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// `--filter key=value` for every value of every key, in key order.
fn filter_args(filters: &Filters) -> Vec<String> {
    let mut keys: Vec<&String> = filters.keys().collect();
    keys.sort();

    let mut out = Vec::new();
    for key in keys {
        for value in &filters[key] {
            out.push("--filter".to_string());
            out.push(format!("{}={}", key, value));
        }
    }
    out
}

#[async_trait::async_trait]
impl Runtime for PodmanRuntime {
    async fn list_images(&self) -> Result<Vec<Image>> {
        let images: Vec<ImageSummary> = self.run_json(args(["images", "--format", "json"])).await?;
        Ok(images.into_iter().map(Image::from).collect())
    }

    async fn pull_image(&self, image: &str) -> Result<()> {
        info!("Pulling image {}", image);
        self.run(args(["pull", image]), None).await?;
        Ok(())
    }

    async fn list_pods(&self, filters: &Filters) -> Result<Vec<Pod>> {
        let mut cmd = args(["pod", "ps", "--format", "json"]);
        if let Some(labels) = filters.get(FILTER_LABEL) {
            for label in labels {
                cmd.push("--filter".to_string());
                cmd.push(format!("label={}", label));
            }
        }

        let pods: Vec<PodSummary> = self.run_json(cmd).await?;
        Ok(pods.into_iter().map(Pod::from).collect())
    }

    async fn create_pod(&self, mut manifest: Manifest) -> Result<Vec<Pod>> {
        let mut body = Vec::new();
        manifest.read_to_end(&mut body).await?;

        let output = self.run(args(["kube", "play", "-"]), Some(body)).await?;
        let stdout = String::from_utf8_lossy(&output.stdout);

        let mut pods = Vec::new();
        for id in parse_play_pod_ids(&stdout) {
            debug!("kube play created pod {}", id);
            if let Some(pod) = self.inspect_pod(&id).await? {
                pods.push(pod);
            }
        }
        Ok(pods)
    }

    async fn delete_pod(&self, id: &str, force: Option<bool>) -> Result<()> {
        let mut cmd = args(["pod", "rm"]);
        if force.unwrap_or(false) {
            cmd.push("--force".to_string());
        }
        cmd.push(id.to_string());
        self.run(cmd, None).await?;
        Ok(())
    }

    async fn inspect_pod(&self, name_or_id: &str) -> Result<Option<Pod>> {
        match self
            .run_json::<OneOrMany<PodInspect>>(args(["pod", "inspect", name_or_id]))
            .await
        {
            Ok(inspected) => Ok(inspected.into_vec().into_iter().next().map(Pod::from)),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e),
        }
    }

    async fn pod_exists(&self, name_or_id: &str) -> Result<bool> {
        self.exists("pod", name_or_id).await
    }

    async fn stop_pod(&self, id: &str) -> Result<()> {
        self.run(args(["pod", "stop", id]), None).await?;
        Ok(())
    }

    async fn start_pod(&self, id: &str) -> Result<()> {
        self.run(args(["pod", "start", id]), None).await?;
        Ok(())
    }

    async fn pod_logs(&self, name_or_id: &str) -> Result<()> {
        self.exec.stream(&args(["pod", "logs", name_or_id])).await
    }

    async fn list_containers(&self, filters: &Filters) -> Result<Vec<Container>> {
        let mut cmd = args(["ps", "-a", "--format", "json"]);
        cmd.extend(filter_args(filters));

        let containers: Vec<ContainerSummary> = self.run_json(cmd).await?;
        Ok(containers.into_iter().map(Container::from).collect())
    }

    async fn inspect_container(&self, name_or_id: &str) -> Result<Option<Container>> {
        match self
            .run_json::<OneOrMany<ContainerInspect>>(args(["container", "inspect", name_or_id]))
            .await
        {
            Ok(inspected) => Ok(inspected.into_vec().into_iter().next().map(Container::from)),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e),
        }
    }

    async fn container_exists(&self, name_or_id: &str) -> Result<bool> {
        self.exists("container", name_or_id).await
    }

    async fn container_logs(&self, name_or_id: &str) -> Result<()> {
        self.exec.stream(&args(["logs", name_or_id])).await
    }

    fn runtime_type(&self) -> RuntimeType {
        RuntimeType::Podman
    }
}
