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

/// Default paths
pub const DEFAULT_TEMPLATES_DIRECTORY: &str = "/usr/share/ai-services/applications";
pub const DEFAULT_MODEL_DIRECTORY: &str = "/var/lib/ai-services/models";
pub const TEMPLATE_METADATA_FILE: &str = "metadata.yaml";

/// Images
pub const DEFAULT_TOOL_IMAGE: &str = "icr.io/ai-services-private/tools:latest";

/// Spyre card annotation, capture group 1 is the container name
pub const DEFAULT_SPYRE_CARD_ANNOTATION_PATTERN: &str =
    r"^ai-services\.io/([A-Za-z0-9][-A-Za-z0-9_.]*)--sypre-cards$";

/// Kubernetes
pub const DEFAULT_NAMESPACE: &str = "default";
pub const KUBECONFIG_ENV: &str = "KUBECONFIG";
pub const KUBECONFIG_DIR: &str = ".kube";
pub const KUBECONFIG_FILE: &str = "config";

/// Podman
pub const DEFAULT_PODMAN_BINARY: &str = "podman";

/// Configuration file
pub const CONFIG_FILE_ENV: &str = "AI_SERVICES_CONFIG";

/// Resource labels
pub const LABEL_APPLICATION: &str = "ai-services.io/application";
pub const LABEL_TEMPLATE: &str = "ai-services.io/template";

/// Filter keys accepted by `Runtime::list_pods` / `list_containers`
pub const FILTER_LABEL: &str = "label";

/// Status reported when a pod has no phase
pub const STATUS_UNKNOWN: &str = "Unknown";
