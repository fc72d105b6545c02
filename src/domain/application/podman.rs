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
use crate::domain::runtime::{Filters, Pod, Runtime};
use crate::infrastructure::constants::{FILTER_LABEL, LABEL_APPLICATION, LABEL_TEMPLATE};
use crate::shared::error::{Result, ServicesError};
use std::collections::BTreeMap;
use tracing::info;

/// Applications are sets of pods sharing the `ai-services.io/application` label.
pub struct PodmanApplication {
    runtime: Box<dyn Runtime>,
}

impl PodmanApplication {
    pub fn new(runtime: Box<dyn Runtime>) -> Self {
        Self { runtime }
    }

    async fn application_pods(&self, name: &str) -> Result<Vec<Pod>> {
        let pods: Vec<Pod> = self
            .runtime
            .list_pods(&application_filter(Some(name)))
            .await?
            .into_iter()
            .filter(|p| p.label(LABEL_APPLICATION) == Some(name))
            .collect();

        if pods.is_empty() {
            return Err(ServicesError::not_found(
                "Application",
                name,
                self.runtime.runtime_type().as_str(),
            ));
        }
        Ok(pods)
    }

    /// All pods of the application, or the requested subset. Every
    /// requested pod must belong to the application.
    async fn select_pods(&self, name: &str, pod_names: &[String]) -> Result<Vec<Pod>> {
        let pods = self.application_pods(name).await?;
        if pod_names.is_empty() {
            return Ok(pods);
        }

        if let Some(missing) = pod_names
            .iter()
            .find(|requested| !pods.iter().any(|p| &&p.name == requested))
        {
            return Err(ServicesError::not_found("Pod", missing.as_str(), name));
        }

        Ok(pods
            .into_iter()
            .filter(|p| pod_names.contains(&p.name))
            .collect())
    }
}

/// `label=<key>` matches any application; `label=<key>=<name>` one of them.
pub fn application_filter(name: Option<&str>) -> Filters {
    let selector = match name {
        Some(name) => format!("{}={}", LABEL_APPLICATION, name),
        None => LABEL_APPLICATION.to_string(),
    };
    let mut filters = Filters::new();
    filters.insert(FILTER_LABEL.to_string(), vec![selector]);
    filters
}

/// Group labelled pods by application name; unlabelled pods are skipped.
pub fn group_by_application(pods: Vec<Pod>) -> Vec<ApplicationInfo> {
    let mut apps: BTreeMap<String, ApplicationInfo> = BTreeMap::new();
    for pod in pods {
        let Some(name) = pod.label(LABEL_APPLICATION).map(str::to_string) else {
            continue;
        };
        let app = apps.entry(name.clone()).or_insert_with(|| ApplicationInfo {
            name,
            ..Default::default()
        });
        if app.template.is_none() {
            app.template = pod.label(LABEL_TEMPLATE).map(str::to_string);
        }
        app.pods.push(pod);
    }

    apps.into_values()
        .map(|mut app| {
            app.pods.sort_by(|a, b| a.name.cmp(&b.name));
            app
        })
        .collect()
}

#[async_trait::async_trait]
impl Application for PodmanApplication {
    async fn list(&self, opts: ListOptions) -> Result<Vec<ApplicationInfo>> {
        let filters = application_filter(opts.application_name.as_deref());
        let pods = self.runtime.list_pods(&filters).await?;

        let mut apps = group_by_application(pods);
        if let Some(name) = opts.application_name.as_deref() {
            apps.retain(|app| app.name == name);
        }
        Ok(apps)
    }

    async fn stop(&self, opts: StopOptions) -> Result<()> {
        for pod in self.select_pods(&opts.name, &opts.pod_names).await? {
            info!("Stopping pod {}", pod.name);
            self.runtime.stop_pod(&pod.name).await?;
        }
        Ok(())
    }

    async fn start(&self, opts: StartOptions) -> Result<()> {
        for pod in self.select_pods(&opts.name, &opts.pod_names).await? {
            info!("Starting pod {}", pod.name);
            self.runtime.start_pod(&pod.name).await?;
        }
        Ok(())
    }

    async fn logs(&self, opts: LogsOptions) -> Result<()> {
        let selected: Vec<String> = opts.pod_name.into_iter().collect();
        for pod in self.select_pods(&opts.name, &selected).await? {
            info!("Logs for pod {}", pod.name);
            self.runtime.pod_logs(&pod.name).await?;
        }
        Ok(())
    }

    async fn delete(&self, opts: DeleteOptions) -> Result<()> {
        for pod in self.application_pods(&opts.name).await? {
            info!("Deleting pod {}", pod.name);
            self.runtime.delete_pod(&pod.name, Some(opts.force)).await?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::runtime::{Container, Image, Manifest, RuntimeType};
    use std::sync::{Arc, Mutex};

    /// In-memory runtime that records every pod operation.
    struct RecordingRuntime {
        pods: Vec<Pod>,
        calls: Arc<Mutex<Vec<String>>>,
    }

    impl RecordingRuntime {
        fn record(&self, call: String) {
            self.calls.lock().unwrap().push(call);
        }
    }

    #[async_trait::async_trait]
    impl Runtime for RecordingRuntime {
        async fn list_images(&self) -> Result<Vec<Image>> {
            Ok(Vec::new())
        }

        async fn pull_image(&self, _image: &str) -> Result<()> {
            Ok(())
        }

        async fn list_pods(&self, filters: &Filters) -> Result<Vec<Pod>> {
            self.record(format!("list {}", filters[FILTER_LABEL].join(",")));
            Ok(self.pods.clone())
        }

        async fn create_pod(&self, _manifest: Manifest) -> Result<Vec<Pod>> {
            Ok(Vec::new())
        }

        async fn delete_pod(&self, id: &str, force: Option<bool>) -> Result<()> {
            self.record(format!("delete {} {:?}", id, force));
            Ok(())
        }

        async fn inspect_pod(&self, _name_or_id: &str) -> Result<Option<Pod>> {
            Ok(None)
        }

        async fn pod_exists(&self, _name_or_id: &str) -> Result<bool> {
            Ok(false)
        }

        async fn stop_pod(&self, id: &str) -> Result<()> {
            self.record(format!("stop {}", id));
            Ok(())
        }

        async fn start_pod(&self, id: &str) -> Result<()> {
            self.record(format!("start {}", id));
            Ok(())
        }

        async fn pod_logs(&self, name_or_id: &str) -> Result<()> {
            self.record(format!("logs {}", name_or_id));
            Ok(())
        }

        async fn list_containers(&self, _filters: &Filters) -> Result<Vec<Container>> {
            Ok(Vec::new())
        }

        async fn inspect_container(&self, _name_or_id: &str) -> Result<Option<Container>> {
            Ok(None)
        }

        async fn container_exists(&self, _name_or_id: &str) -> Result<bool> {
            Ok(false)
        }

        async fn container_logs(&self, _name_or_id: &str) -> Result<()> {
            Ok(())
        }

        fn runtime_type(&self) -> RuntimeType {
            RuntimeType::Podman
        }
    }

    fn pod(name: &str, app: Option<&str>, template: Option<&str>) -> Pod {
        let mut labels = BTreeMap::new();
        if let Some(app) = app {
            labels.insert(LABEL_APPLICATION.to_string(), app.to_string());
        }
        if let Some(template) = template {
            labels.insert(LABEL_TEMPLATE.to_string(), template.to_string());
        }
        Pod {
            id: format!("id-{}", name),
            name: name.to_string(),
            status: "Running".to_string(),
            labels,
            ..Default::default()
        }
    }

    fn application(pods: Vec<Pod>) -> (PodmanApplication, Arc<Mutex<Vec<String>>>) {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let runtime = RecordingRuntime {
            pods,
            calls: calls.clone(),
        };
        (PodmanApplication::new(Box::new(runtime)), calls)
    }

    fn fixture() -> Vec<Pod> {
        vec![
            pod("rag--vllm", Some("rag"), Some("rag")),
            pod("rag--db", Some("rag"), None),
            pod("chat--ui", Some("chat"), Some("chatbot")),
            pod("stray", None, None),
        ]
    }

    #[test]
    fn test_group_by_application() {
        let apps = group_by_application(fixture());
        assert_eq!(apps.len(), 2);
        assert_eq!(apps[0].name, "chat");
        assert_eq!(apps[0].template.as_deref(), Some("chatbot"));
        assert_eq!(apps[1].name, "rag");
        assert_eq!(apps[1].template.as_deref(), Some("rag"));
        let names: Vec<&str> = apps[1].pods.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["rag--db", "rag--vllm"]);
    }

    #[test]
    fn test_application_filter() {
        assert_eq!(
            application_filter(None)[FILTER_LABEL],
            vec!["ai-services.io/application".to_string()]
        );
        assert_eq!(
            application_filter(Some("rag"))[FILTER_LABEL],
            vec!["ai-services.io/application=rag".to_string()]
        );
    }

    #[tokio::test]
    async fn test_list() {
        let (app, calls) = application(fixture());
        assert_eq!(app.list(ListOptions::default()).await.unwrap().len(), 2);

        let only = app
            .list(ListOptions {
                application_name: Some("chat".to_string()),
            })
            .await
            .unwrap();
        assert_eq!(only.len(), 1);
        assert_eq!(only[0].pods.len(), 1);

        assert_eq!(
            *calls.lock().unwrap(),
            vec![
                "list ai-services.io/application",
                "list ai-services.io/application=chat"
            ]
        );
    }

    #[tokio::test]
    async fn test_stop_all_pods_in_order() {
        let (app, calls) = application(fixture());
        app.stop(StopOptions {
            name: "rag".to_string(),
            pod_names: Vec::new(),
        })
        .await
        .unwrap();

        let calls = calls.lock().unwrap();
        assert_eq!(calls[1..], ["stop rag--vllm", "stop rag--db"]);
    }

    #[tokio::test]
    async fn test_start_subset() {
        let (app, calls) = application(fixture());
        app.start(StartOptions {
            name: "rag".to_string(),
            pod_names: vec!["rag--db".to_string()],
        })
        .await
        .unwrap();
        assert_eq!(calls.lock().unwrap()[1..], ["start rag--db"]);
    }

    #[tokio::test]
    async fn test_pod_outside_application_rejected() {
        let (app, calls) = application(fixture());
        let err = app
            .stop(StopOptions {
                name: "rag".to_string(),
                pod_names: vec!["chat--ui".to_string()],
            })
            .await
            .unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(calls.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_unknown_application() {
        let (app, _) = application(fixture());
        let err = app
            .delete(DeleteOptions {
                name: "missing".to_string(),
                force: false,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ServicesError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_delete_and_logs() {
        let (app, calls) = application(fixture());
        app.delete(DeleteOptions {
            name: "chat".to_string(),
            force: true,
        })
        .await
        .unwrap();
        app.logs(LogsOptions {
            name: "rag".to_string(),
            pod_name: None,
        })
        .await
        .unwrap();
        app.logs(LogsOptions {
            name: "rag".to_string(),
            pod_name: Some("rag--db".to_string()),
        })
        .await
        .unwrap();

        let calls = calls.lock().unwrap();
        assert_eq!(calls[1], "delete chat--ui Some(true)");
        assert_eq!(calls[3..5], ["logs rag--vllm", "logs rag--db"]);
        assert_eq!(calls[6], "logs rag--db");
    }
}
