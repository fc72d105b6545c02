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

use super::types::{
    ApplicationInfo, DeleteOptions, ListOptions, LogsOptions, StartOptions, StopOptions,
};
use crate::shared::error::Result;

/// Lifecycle operations over deployed applications.
#[async_trait::async_trait]
pub trait Application: Send + Sync {
    async fn list(&self, opts: ListOptions) -> Result<Vec<ApplicationInfo>>;

    async fn stop(&self, opts: StopOptions) -> Result<()>;

    async fn start(&self, opts: StartOptions) -> Result<()>;

    async fn logs(&self, opts: LogsOptions) -> Result<()>;

    async fn delete(&self, opts: DeleteOptions) -> Result<()>;
}
