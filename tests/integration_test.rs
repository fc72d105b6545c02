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

#[cfg(test)]
mod tests {
    use ai_services::cli::application::format_model_list;
    use ai_services::domain::application::{
        new_application, DeleteOptions, ListOptions, StopOptions,
    };
    use ai_services::domain::config::apply_to_app_config;
    use ai_services::infrastructure::podman::{CommandOutput, PodmanExec};
    use ai_services::*;
    use k8s_openapi::api::core::v1 as corev1;
    use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
    use std::collections::{BTreeMap, HashMap};
    use std::sync::{Arc, Mutex};

    const POD_PS: &str = r#"[
  {
    "Id": "a1",
    "Name": "rag--vllm",
    "Status": "Running",
    "Created": "2025-03-01T12:00:00.123456789Z",
    "Labels": {"ai-services.io/application": "rag", "ai-services.io/template": "rag"},
    "Containers": [{"Id": "c1", "Names": "rag--vllm-server", "Status": "running"}]
  },
  {
    "Id": "a2",
    "Name": "rag--ui",
    "Status": "Exited",
    "Labels": {"ai-services.io/application": "rag"},
    "Containers": []
  }
]"#;

    /// Answers `pod ps` with a fixed listing and succeeds on everything else.
    struct ScriptedPodman {
        calls: Arc<Mutex<Vec<Vec<String>>>>,
    }

    #[async_trait::async_trait]
    impl PodmanExec for ScriptedPodman {
        fn program(&self) -> &str {
            "podman"
        }

        async fn output(
            &self,
            args: &[String],
            _stdin: Option<Vec<u8>>,
        ) -> ai_services::Result<CommandOutput> {
            self.calls.lock().unwrap().push(args.to_vec());
            let stdout = if args.starts_with(&["pod".to_string(), "ps".to_string()]) {
                POD_PS.as_bytes().to_vec()
            } else {
                Vec::new()
            };
            Ok(CommandOutput {
                code: Some(0),
                stdout,
                stderr: String::new(),
            })
        }

        async fn stream(&self, args: &[String]) -> ai_services::Result<()> {
            self.calls.lock().unwrap().push(args.to_vec());
            Ok(())
        }
    }

    fn podman() -> (Box<dyn Runtime>, Arc<Mutex<Vec<Vec<String>>>>) {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let exec = ScriptedPodman {
            calls: calls.clone(),
        };
        (Box::new(PodmanRuntime::with_exec(Box::new(exec))), calls)
    }

    #[tokio::test]
    async fn test_podman_applications_end_to_end() {
        let (runtime, calls) = podman();
        let app = new_application(runtime);

        let apps = app.list(ListOptions::default()).await.unwrap();
        assert_eq!(apps.len(), 1);
        assert_eq!(apps[0].name, "rag");
        assert_eq!(apps[0].template.as_deref(), Some("rag"));
        assert_eq!(apps[0].pods.len(), 2);
        assert_eq!(apps[0].running_pods(), 1);

        app.stop(StopOptions {
            name: "rag".to_string(),
            pod_names: vec!["rag--vllm".to_string()],
        })
        .await
        .unwrap();

        app.delete(DeleteOptions {
            name: "rag".to_string(),
            force: true,
        })
        .await
        .unwrap();

        let calls = calls.lock().unwrap();
        assert_eq!(
            calls[0],
            vec![
                "pod",
                "ps",
                "--format",
                "json",
                "--filter",
                "label=ai-services.io/application"
            ]
        );
        assert_eq!(calls[2], vec!["pod", "stop", "rag--vllm"]);
        let removed: Vec<&Vec<String>> = calls.iter().filter(|c| c[1] == "rm").collect();
        assert_eq!(removed.len(), 2);
        assert_eq!(removed[0], &vec!["pod", "rm", "--force", "rag--vllm"]);
    }

    struct StaticCluster {
        pods: Vec<corev1::Pod>,
    }

    #[async_trait::async_trait]
    impl ClusterClient for StaticCluster {
        fn namespace(&self) -> &str {
            "ai"
        }

        async fn list_pods(&self, _label_selector: &str) -> ai_services::Result<Vec<corev1::Pod>> {
            Ok(self.pods.clone())
        }

        async fn get_pod(&self, name: &str) -> ai_services::Result<corev1::Pod> {
            Err(ServicesError::not_found("Pod", name, "ai"))
        }

        async fn list_namespaces(&self) -> ai_services::Result<Vec<String>> {
            Ok(vec!["ai".to_string()])
        }
    }

    #[tokio::test]
    async fn test_openshift_runtime_and_application() {
        let pod = corev1::Pod {
            metadata: ObjectMeta {
                name: Some("rag--vllm".to_string()),
                uid: Some("uid-1".to_string()),
                ..Default::default()
            },
            spec: Some(corev1::PodSpec {
                containers: vec![corev1::Container {
                    name: "vllm".to_string(),
                    ports: Some(vec![corev1::ContainerPort {
                        container_port: 8000,
                        ..Default::default()
                    }]),
                    ..Default::default()
                }],
                ..Default::default()
            }),
            status: None,
        };
        let runtime = OpenShiftRuntime::with_client(Box::new(StaticCluster { pods: vec![pod] }));

        let pods = runtime.list_pods(&Filters::new()).await.unwrap();
        assert_eq!(pods[0].status, "Unknown");
        assert_eq!(pods[0].ports["vllm"], vec!["8000".to_string()]);
        assert!(!runtime.pod_exists("rag--vllm").await.unwrap());
        assert!(runtime.container_exists("vllm").await.unwrap());

        let app = new_application(Box::new(runtime));
        assert!(app.list(ListOptions::default()).await.unwrap().is_empty());
    }

    #[test]
    fn test_settings_from_file_and_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ai-services.toml");
        std::fs::write(
            &path,
            "runtime = \"podman\"\ntool_image = \"quay.io/tools:1\"\n",
        )
        .unwrap();

        let mut conf = AppConfig::load(Some(path.to_str().unwrap())).unwrap();
        let mut overrides = HashMap::new();
        overrides.insert("runtime".to_string(), "openshift".to_string());
        overrides.insert("kubernetes.namespace".to_string(), "ai".to_string());
        apply_to_app_config(&overrides, &mut conf);

        let settings = conf.into_settings().unwrap();
        assert_eq!(settings.runtime, RuntimeType::OpenShift);
        assert_eq!(settings.namespace, "ai");
        assert_eq!(settings.tool_image, "quay.io/tools:1");

        let mut annotations = BTreeMap::new();
        annotations.insert(
            "ai-services.io/vllm-server--sypre-cards".to_string(),
            "8".to_string(),
        );
        assert_eq!(settings.spyre_cards(&annotations)["vllm-server"], "8");
    }

    #[test]
    fn test_template_models_listing() {
        let templates = tempfile::tempdir().unwrap();
        let models = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(templates.path().join("rag")).unwrap();
        std::fs::write(
            templates.path().join("rag").join("metadata.yaml"),
            "name: rag\nmodels:\n  - granite-8b\n  - granite-embedding\n",
        )
        .unwrap();
        std::fs::create_dir_all(models.path().join("granite-8b")).unwrap();

        let catalog = TemplateCatalog::new(templates.path());
        assert_eq!(catalog.list().unwrap(), vec!["rag"]);

        let listed = catalog.models("rag").unwrap();
        let settings = AppConfig {
            model_directory: models.path().to_string_lossy().to_string(),
            ..Default::default()
        }
        .into_settings()
        .unwrap();
        let output = format_model_list("rag", &listed, &settings);
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(
            lines,
            vec![
                "Models in application template rag:",
                "- granite-8b (downloaded)",
                "- granite-embedding",
            ]
        );

        assert!(catalog.models("missing").unwrap_err().is_not_found());
    }
}
