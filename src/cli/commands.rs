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

// CLI command definitions

use super::application::ApplicationCommands;
use super::validate::ValidateCommand;
use crate::domain::config::{apply_to_app_config, AppConfig, Settings};
use crate::shared::utils::parse_key_value_items;
use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "ai-services",
    version,
    about = "Deploy and manage AI service applications",
    long_about = "A CLI tool for running AI application templates on a local Podman engine or an OpenShift cluster"
)]
pub struct CliArgs {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(clap::Args, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// Runtime backend (podman or openshift)
    #[arg(long, global = true)]
    pub runtime: Option<String>,

    /// Namespace used by the openshift runtime
    #[arg(long, short = 'n', global = true)]
    pub namespace: Option<String>,

    /// Path to kubeconfig file
    /// If not specified, uses in-cluster credentials, then KUBECONFIG, then ~/.kube/config
    #[arg(long, global = true)]
    pub kubeconfig: Option<String>,

    /// Kubernetes context to use
    #[arg(long, global = true)]
    pub context: Option<String>,

    /// Path to the configuration file (TOML)
    /// If not specified, reads AI_SERVICES_CONFIG, otherwise built-in defaults are used
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<String>,

    /// Configuration overrides (-D key=value)
    ///
    /// Keys: runtime, kubernetes.namespace, kubernetes.config.file, kubernetes.context,
    /// podman.binary, templates.directory, model.directory, tool.image, spyre.annotation-pattern
    ///
    /// Example: -Dmodel.directory=/data/models -Dpodman.binary=/usr/local/bin/podman
    #[arg(short = 'D', global = true, value_name = "KEY=VALUE")]
    pub properties: Vec<String>,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,
}

impl GlobalArgs {
    /// Resolve settings: flags, then -D overrides, then the config file, then defaults.
    pub fn settings(&self) -> anyhow::Result<Settings> {
        let mut conf = AppConfig::load(self.config.as_deref())
            .map_err(|e| anyhow::anyhow!("Failed to load configuration: {}", e))?;

        if !self.properties.is_empty() {
            let overrides = parse_key_value_items(&self.properties)
                .map_err(|e| anyhow::anyhow!("Failed to parse dynamic configs: {}", e))?;
            apply_to_app_config(&overrides, &mut conf);
        }

        if let Some(ref runtime) = self.runtime {
            conf.runtime = runtime.clone();
        }
        if let Some(ref namespace) = self.namespace {
            conf.namespace = namespace.clone();
        }
        if let Some(ref kubeconfig) = self.kubeconfig {
            conf.kubeconfig = Some(kubeconfig.clone());
        }
        if let Some(ref context) = self.context {
            conf.context = Some(context.clone());
        }

        conf.into_settings()
            .map_err(|e| anyhow::anyhow!("Invalid configuration: {}", e))
    }
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Manage AI applications, their templates, models and images
    #[command(subcommand)]
    Application(ApplicationCommands),

    /// Validate the environment for the configured runtime
    Validate(ValidateCommand),
}
