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

use crate::domain::runtime::Pod;

#[derive(Debug, Clone, Default)]
pub struct ListOptions {
    /// Restrict the listing to one application.
    pub application_name: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct StopOptions {
    pub name: String,
    /// Subset of the application's pods; empty means all of them.
    pub pod_names: Vec<String>,
}

#[derive(Debug, Clone, Default)]
pub struct StartOptions {
    pub name: String,
    pub pod_names: Vec<String>,
}

#[derive(Debug, Clone, Default)]
pub struct LogsOptions {
    pub name: String,
    pub pod_name: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct DeleteOptions {
    pub name: String,
    pub force: bool,
}

/// One deployed application and the pods that make it up.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ApplicationInfo {
    pub name: String,
    pub template: Option<String>,
    pub pods: Vec<Pod>,
}

impl ApplicationInfo {
    /// Pods whose status is "Running", compared case-insensitively.
    pub fn running_pods(&self) -> usize {
        self.pods
            .iter()
            .filter(|p| p.status.eq_ignore_ascii_case("running"))
            .count()
    }
}
