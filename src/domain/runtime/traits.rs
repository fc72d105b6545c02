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

use super::types::{Container, Filters, Image, Pod, RuntimeType};
use crate::shared::error::Result;
use tokio::io::AsyncRead;

/// Pod manifest handed to `Runtime::create_pod`.
pub type Manifest = Box<dyn AsyncRead + Send + Unpin>;

/// Uniform operations over a container backend.
///
/// A backend without a natural equivalent for an operation may leave it
/// unimplemented: it logs a warning and returns an empty value with `Ok`.
/// Callers must tolerate those empty results.
#[async_trait::async_trait]
pub trait Runtime: Send + Sync {
    async fn list_images(&self) -> Result<Vec<Image>>;

    async fn pull_image(&self, image: &str) -> Result<()>;

    /// The `"label"` filter values are joined with `,` into one selector.
    async fn list_pods(&self, filters: &Filters) -> Result<Vec<Pod>>;

    async fn create_pod(&self, manifest: Manifest) -> Result<Vec<Pod>>;

    async fn delete_pod(&self, id: &str, force: Option<bool>) -> Result<()>;

    async fn inspect_pod(&self, name_or_id: &str) -> Result<Option<Pod>>;

    /// `Ok(false)` when the pod is absent; `Err` only for real failures.
    async fn pod_exists(&self, name_or_id: &str) -> Result<bool>;

    async fn stop_pod(&self, id: &str) -> Result<()>;

    async fn start_pod(&self, id: &str) -> Result<()>;

    async fn pod_logs(&self, name_or_id: &str) -> Result<()>;

    async fn list_containers(&self, filters: &Filters) -> Result<Vec<Container>>;

    async fn inspect_container(&self, name_or_id: &str) -> Result<Option<Container>>;

    async fn container_exists(&self, name_or_id: &str) -> Result<bool>;

    async fn container_logs(&self, name_or_id: &str) -> Result<()>;

    fn runtime_type(&self) -> RuntimeType;
}
