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

//! Application lifecycle on top of a runtime

pub mod openshift;
pub mod podman;
pub mod template;
pub mod traits;
pub mod types;

pub use self::openshift::OpenShiftApplication;
pub use self::podman::PodmanApplication;
pub use self::template::{TemplateCatalog, TemplateMetadata};
pub use self::traits::Application;
pub use self::types::{
    ApplicationInfo, DeleteOptions, ListOptions, LogsOptions, StartOptions, StopOptions,
};

use crate::domain::runtime::{Runtime, RuntimeType};

/// Pick the application implementation matching the runtime backend.
pub fn new_application(runtime: Box<dyn Runtime>) -> Box<dyn Application> {
    match runtime.runtime_type() {
        RuntimeType::Podman => Box::new(PodmanApplication::new(runtime)),
        RuntimeType::OpenShift => Box::new(OpenShiftApplication::new()),
    }
}
