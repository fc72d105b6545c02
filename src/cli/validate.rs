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

use super::display::TableRenderer;
use super::spinner::Spinner;
use crate::domain::config::Settings;
use crate::domain::validation::{Rule, ValidationReporter, Validator};
use crate::shared::error::ServicesError;
use clap::Parser;

#[derive(Parser, Debug, Clone)]
pub struct ValidateCommand {
    /// Print the summary table after the checks
    #[arg(long)]
    pub summary: bool,
}

/// One spinner per rule.
#[derive(Default)]
struct SpinnerReporter {
    current: Option<Spinner>,
}

impl ValidationReporter for SpinnerReporter {
    fn started(&mut self, rule: &dyn Rule) {
        let spinner = Spinner::new(rule.description());
        spinner.start();
        self.current = Some(spinner);
    }

    fn passed(&mut self, rule: &dyn Rule) {
        if let Some(spinner) = self.current.take() {
            spinner.stop(rule.message());
        }
    }

    fn failed(&mut self, rule: &dyn Rule, error: &ServicesError) {
        if let Some(spinner) = self.current.take() {
            spinner.stop_with_hint(&format!("{}: {}", rule.name(), error), rule.hint());
        }
    }
}

impl ValidateCommand {
    pub async fn execute(&self, settings: &Settings) -> anyhow::Result<()> {
        let validator = Validator::for_settings(settings);
        let mut reporter = SpinnerReporter::default();
        let report = validator.run(&mut reporter).await;

        if self.summary {
            println!("{}", TableRenderer::new().render_validation(&report));
        }

        let errors = report.errors();
        if !errors.is_empty() {
            let names: Vec<&str> = errors.iter().map(|o| o.name.as_str()).collect();
            anyhow::bail!("validation failed: {}", names.join(", "));
        }

        println!("Environment validated for runtime {}", settings.runtime);
        Ok(())
    }
}
