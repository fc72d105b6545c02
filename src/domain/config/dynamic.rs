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

use super::app::AppConfig;
use std::collections::HashMap;
use tracing::warn;

/// Apply `-D key=value` overrides on top of the file configuration.
pub fn apply_to_app_config(configs: &HashMap<String, String>, conf: &mut AppConfig) {
    for (key, value) in configs {
        match key.as_str() {
            "runtime" => conf.runtime = value.clone(),
            "kubernetes.namespace" => conf.namespace = value.clone(),
            "kubernetes.config.file" => conf.kubeconfig = Some(value.clone()),
            "kubernetes.context" => conf.context = Some(value.clone()),
            "podman.binary" => conf.podman_binary = value.clone(),
            "templates.directory" => conf.templates_directory = value.clone(),
            "model.directory" => conf.model_directory = value.clone(),
            "tool.image" => conf.tool_image = value.clone(),
            "spyre.annotation-pattern" => conf.spyre_card_annotation_pattern = value.clone(),
            _ => warn!("Ignoring unknown configuration key: {}", key),
        }
    }
}
