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

//! `application` subcommands

use super::display::{ImageStatus, TableRenderer};
use super::spinner::Spinner;
use crate::domain::application::{
    new_application, Application, DeleteOptions, ListOptions, LogsOptions, StartOptions,
    StopOptions, TemplateCatalog,
};
use crate::domain::config::Settings;
use crate::domain::runtime::{new_runtime, Image, Runtime, RuntimeOptions};
use clap::Parser;

#[derive(clap::Subcommand, Debug)]
pub enum ApplicationCommands {
    /// Inspect the models used by application templates
    #[command(subcommand)]
    Model(ModelCommands),

    /// List available application templates
    Templates(TemplatesCommand),

    /// List deployed applications and their pods
    Ps(PsCommand),

    /// Stop an application (all pods, or the given ones)
    Stop(StopCommand),

    /// Start a stopped application
    Start(StartCommand),

    /// Delete an application and its pods
    Delete(DeleteCommand),

    /// Show logs of an application's pods
    Logs(LogsCommand),

    /// List or pull the images an application template needs
    #[command(subcommand)]
    Image(ImageCommands),
}

impl ApplicationCommands {
    pub async fn execute(&self, settings: &Settings) -> anyhow::Result<()> {
        match self {
            ApplicationCommands::Model(ModelCommands::List(cmd)) => cmd.execute(settings),
            ApplicationCommands::Templates(cmd) => cmd.execute(settings),
            ApplicationCommands::Ps(cmd) => cmd.execute(settings).await,
            ApplicationCommands::Stop(cmd) => cmd.execute(settings).await,
            ApplicationCommands::Start(cmd) => cmd.execute(settings).await,
            ApplicationCommands::Delete(cmd) => cmd.execute(settings).await,
            ApplicationCommands::Logs(cmd) => cmd.execute(settings).await,
            ApplicationCommands::Image(ImageCommands::List(cmd)) => cmd.execute(settings).await,
            ApplicationCommands::Image(ImageCommands::Pull(cmd)) => cmd.execute(settings).await,
        }
    }
}

#[derive(clap::Subcommand, Debug)]
pub enum ModelCommands {
    /// List models for a given application template
    List(ModelListCommand),
}

#[derive(clap::Subcommand, Debug)]
pub enum ImageCommands {
    /// Show the images a template needs and whether they are present
    List(ImageListCommand),

    /// Pull the images a template needs
    Pull(ImagePullCommand),
}

#[derive(Parser, Debug, Clone)]
pub struct ModelListCommand {
    /// Application template name
    #[arg(long, short = 't')]
    pub template: String,
}

#[derive(Parser, Debug, Clone)]
pub struct TemplatesCommand {}

#[derive(Parser, Debug, Clone)]
pub struct PsCommand {
    /// Only show this application
    #[arg(long)]
    pub name: Option<String>,

    /// Also show ports and Spyre card requests
    #[arg(long)]
    pub wide: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct StopCommand {
    /// Application name
    pub name: String,

    /// Pods to stop (repeatable); all pods when omitted
    #[arg(long = "pod", value_name = "POD")]
    pub pods: Vec<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct StartCommand {
    /// Application name
    pub name: String,

    /// Pods to start (repeatable); all pods when omitted
    #[arg(long = "pod", value_name = "POD")]
    pub pods: Vec<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct DeleteCommand {
    /// Application name
    pub name: String,

    /// Remove running pods without stopping them first
    #[arg(long)]
    pub force: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct LogsCommand {
    /// Application name
    pub name: String,

    /// Only show logs of this pod
    #[arg(long)]
    pub pod: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct ImageListCommand {
    /// Application template name
    #[arg(long, short = 't')]
    pub template: String,
}

#[derive(Parser, Debug, Clone)]
pub struct ImagePullCommand {
    /// Application template name
    #[arg(long, short = 't')]
    pub template: String,
}

async fn runtime(settings: &Settings) -> anyhow::Result<Box<dyn Runtime>> {
    new_runtime(&RuntimeOptions::from_settings(settings))
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create {} runtime: {}", settings.runtime, e))
}

async fn application(settings: &Settings) -> anyhow::Result<Box<dyn Application>> {
    Ok(new_application(runtime(settings).await?))
}

/// `Models in application template <name>:` followed by one `- <model>` line
/// per model; models already under the model directory are marked.
pub fn format_model_list(template: &str, models: &[String], settings: &Settings) -> String {
    let mut output = format!("Models in application template {}:\n", template);
    for model in models {
        if settings.model_path(model).exists() {
            output.push_str(&format!("- {} (downloaded)\n", model));
        } else {
            output.push_str(&format!("- {}\n", model));
        }
    }
    output
}

/// Pair each required image with whether the runtime already has it.
pub fn image_statuses(required: &[String], available: &[Image]) -> Vec<ImageStatus> {
    required
        .iter()
        .map(|reference| ImageStatus {
            reference: reference.clone(),
            present: available.iter().any(|image| image.has_name(reference)),
        })
        .collect()
}

impl ModelListCommand {
    pub fn execute(&self, settings: &Settings) -> anyhow::Result<()> {
        let catalog = TemplateCatalog::new(&settings.templates_directory);
        let models = catalog
            .models(&self.template)
            .map_err(|e| anyhow::anyhow!("failed to list the models, err: {}", e))?;

        print!(
            "{}",
            format_model_list(&self.template, &models, settings)
        );
        Ok(())
    }
}

impl TemplatesCommand {
    pub fn execute(&self, settings: &Settings) -> anyhow::Result<()> {
        let catalog = TemplateCatalog::new(&settings.templates_directory);
        let templates = catalog
            .load_all()
            .map_err(|e| anyhow::anyhow!("Failed to read application templates: {}", e))?;

        println!("{}", TableRenderer::new().render_templates(&templates));
        Ok(())
    }
}

impl PsCommand {
    pub async fn execute(&self, settings: &Settings) -> anyhow::Result<()> {
        let apps = application(settings)
            .await?
            .list(ListOptions {
                application_name: self.name.clone(),
            })
            .await
            .map_err(|e| anyhow::anyhow!("Failed to list applications: {}", e))?;

        println!(
            "{}",
            TableRenderer::new().render_applications(&apps, settings, self.wide)
        );
        Ok(())
    }
}

impl StopCommand {
    pub async fn execute(&self, settings: &Settings) -> anyhow::Result<()> {
        application(settings)
            .await?
            .stop(StopOptions {
                name: self.name.clone(),
                pod_names: self.pods.clone(),
            })
            .await
            .map_err(|e| anyhow::anyhow!("Failed to stop application {}: {}", self.name, e))?;

        println!("Application {} stopped", self.name);
        Ok(())
    }
}

impl StartCommand {
    pub async fn execute(&self, settings: &Settings) -> anyhow::Result<()> {
        application(settings)
            .await?
            .start(StartOptions {
                name: self.name.clone(),
                pod_names: self.pods.clone(),
            })
            .await
            .map_err(|e| anyhow::anyhow!("Failed to start application {}: {}", self.name, e))?;

        println!("Application {} started", self.name);
        Ok(())
    }
}

impl DeleteCommand {
    pub async fn execute(&self, settings: &Settings) -> anyhow::Result<()> {
        application(settings)
            .await?
            .delete(DeleteOptions {
                name: self.name.clone(),
                force: self.force,
            })
            .await
            .map_err(|e| anyhow::anyhow!("Failed to delete application {}: {}", self.name, e))?;

        println!("Application {} deleted successfully!", self.name);
        Ok(())
    }
}

impl LogsCommand {
    pub async fn execute(&self, settings: &Settings) -> anyhow::Result<()> {
        application(settings)
            .await?
            .logs(LogsOptions {
                name: self.name.clone(),
                pod_name: self.pod.clone(),
            })
            .await
            .map_err(|e| anyhow::anyhow!("Failed to get logs of {}: {}", self.name, e))
    }
}

impl ImageListCommand {
    pub async fn execute(&self, settings: &Settings) -> anyhow::Result<()> {
        let required = TemplateCatalog::new(&settings.templates_directory)
            .images(&self.template, &settings.tool_image)
            .map_err(|e| anyhow::anyhow!("Failed to read template {}: {}", self.template, e))?;

        let available = runtime(settings)
            .await?
            .list_images()
            .await
            .map_err(|e| anyhow::anyhow!("Failed to list images: {}", e))?;

        println!(
            "{}",
            TableRenderer::new().render_images(&image_statuses(&required, &available))
        );
        Ok(())
    }
}

impl ImagePullCommand {
    pub async fn execute(&self, settings: &Settings) -> anyhow::Result<()> {
        let required = TemplateCatalog::new(&settings.templates_directory)
            .images(&self.template, &settings.tool_image)
            .map_err(|e| anyhow::anyhow!("Failed to read template {}: {}", self.template, e))?;
        let runtime = runtime(settings).await?;

        let spinner = Spinner::new(format!("Pulling images for template {}", self.template));
        spinner.start();
        for (i, image) in required.iter().enumerate() {
            spinner.update_message(format!(
                "Pulling image {} ({}/{})",
                image,
                i + 1,
                required.len()
            ));
            if let Err(e) = runtime.pull_image(image).await {
                spinner.fail(&format!("Failed to pull image {}", image));
                anyhow::bail!("Failed to pull image {}: {}", image, e);
            }
        }
        spinner.stop(&format!(
            "Pulled {} images for template {}",
            required.len(),
            self.template
        ));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::config::AppConfig;
    use std::path::Path;

    fn settings_with_models(model_directory: &Path) -> Settings {
        AppConfig {
            model_directory: model_directory.to_string_lossy().to_string(),
            ..Default::default()
        }
        .into_settings()
        .unwrap()
    }

    #[test]
    fn test_format_model_list() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("ibm-granite/granite-3.3-8b-instruct")).unwrap();

        let models = vec![
            "ibm-granite/granite-3.3-8b-instruct".to_string(),
            "ibm-granite/granite-embedding".to_string(),
        ];
        let output = format_model_list("rag", &models, &settings_with_models(dir.path()));
        assert_eq!(
            output,
            "Models in application template rag:\n- ibm-granite/granite-3.3-8b-instruct (downloaded)\n- ibm-granite/granite-embedding\n"
        );
    }

    #[test]
    fn test_format_empty_model_list() {
        let settings = settings_with_models(Path::new("/nonexistent"));
        let output = format_model_list("chat", &[], &settings);
        assert_eq!(output, "Models in application template chat:\n");
    }

    #[test]
    fn test_image_statuses() {
        let available = vec![Image {
            id: "1".to_string(),
            names: vec!["icr.io/ai-services/vllm:latest".to_string()],
            size: 0,
        }];
        let required = vec![
            "icr.io/ai-services/vllm:latest".to_string(),
            "icr.io/ai-services-private/tools:latest".to_string(),
        ];

        let statuses = image_statuses(&required, &available);
        assert!(statuses[0].present);
        assert!(!statuses[1].present);
    }
}
