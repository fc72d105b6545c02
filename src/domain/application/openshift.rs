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

use super::traits::Application;
use super::types::{
    ApplicationInfo, DeleteOptions, ListOptions, LogsOptions, StartOptions, StopOptions,
};
use crate::shared::error::Result;
use tracing::warn;

/// Application lifecycle on a cluster is not implemented; every call warns.
#[derive(Debug, Default)]
pub struct OpenShiftApplication;

impl OpenShiftApplication {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait::async_trait]
impl Application for OpenShiftApplication {
    async fn list(&self, _opts: ListOptions) -> Result<Vec<ApplicationInfo>> {
        warn!("not implemented");
        Ok(Vec::new())
    }

    async fn stop(&self, _opts: StopOptions) -> Result<()> {
        warn!("not implemented");
        Ok(())
    }

    async fn start(&self, _opts: StartOptions) -> Result<()> {
        warn!("not implemented");
        Ok(())
    }

    async fn logs(&self, _opts: LogsOptions) -> Result<()> {
        warn!("not implemented");
        Ok(())
    }

    async fn delete(&self, _opts: DeleteOptions) -> Result<()> {
        warn!("not implemented");
        Ok(())
    }
}
