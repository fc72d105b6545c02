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

use super::kubeconfig::KubeconfigRule;
use super::podman::{ModelDirectoryRule, PodmanRule};
use super::rule::{Rule, ValidationLevel};
use crate::domain::config::Settings;
use crate::domain::runtime::{RuntimeOptions, RuntimeType};
use crate::shared::error::ServicesError;
use tracing::debug;

/// Progress callbacks, one pair per rule.
pub trait ValidationReporter {
    fn started(&mut self, rule: &dyn Rule);

    fn passed(&mut self, rule: &dyn Rule);

    fn failed(&mut self, rule: &dyn Rule, error: &ServicesError);
}

#[derive(Debug, Clone, PartialEq)]
pub struct RuleOutcome {
    pub name: String,
    pub level: ValidationLevel,
    pub passed: bool,
    /// Success message or error text.
    pub detail: String,
}

#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    pub outcomes: Vec<RuleOutcome>,
}

impl ValidationReport {
    /// Failed rules at `Error` level.
    pub fn errors(&self) -> Vec<&RuleOutcome> {
        self.outcomes
            .iter()
            .filter(|o| !o.passed && o.level == ValidationLevel::Error)
            .collect()
    }

    pub fn has_errors(&self) -> bool {
        !self.errors().is_empty()
    }
}

pub struct Validator {
    rules: Vec<Box<dyn Rule>>,
}

impl Validator {
    pub fn new(rules: Vec<Box<dyn Rule>>) -> Self {
        Self { rules }
    }

    /// Rules that apply to the configured runtime.
    pub fn for_settings(settings: &Settings) -> Self {
        let rules: Vec<Box<dyn Rule>> = match settings.runtime {
            RuntimeType::Podman => vec![
                Box::new(PodmanRule::new(settings.podman_binary.clone())),
                Box::new(ModelDirectoryRule::new(settings.model_directory.clone())),
            ],
            RuntimeType::OpenShift => vec![Box::new(KubeconfigRule::new(
                RuntimeOptions::from_settings(settings),
            ))],
        };
        Self::new(rules)
    }

    pub fn rule_names(&self) -> Vec<&str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    /// Runs every rule in order; a failure never stops the remaining rules.
    pub async fn run<R: ValidationReporter>(&self, reporter: &mut R) -> ValidationReport {
        let mut report = ValidationReport::default();

        for rule in &self.rules {
            debug!("Running validation rule {}", rule.name());
            reporter.started(rule.as_ref());

            let outcome = match rule.verify().await {
                Ok(()) => {
                    reporter.passed(rule.as_ref());
                    RuleOutcome {
                        name: rule.name().to_string(),
                        level: rule.level(),
                        passed: true,
                        detail: rule.message().to_string(),
                    }
                }
                Err(e) => {
                    reporter.failed(rule.as_ref(), &e);
                    RuleOutcome {
                        name: rule.name().to_string(),
                        level: rule.level(),
                        passed: false,
                        detail: e.to_string(),
                    }
                }
            };
            report.outcomes.push(outcome);
        }

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::config::AppConfig;
    use crate::shared::error::Result;

    struct Fixed {
        name: &'static str,
        level: ValidationLevel,
        ok: bool,
    }

    #[async_trait::async_trait]
    impl Rule for Fixed {
        fn name(&self) -> &str {
            self.name
        }

        fn description(&self) -> &str {
            "fixed"
        }

        async fn verify(&self) -> Result<()> {
            if self.ok {
                Ok(())
            } else {
                Err(ServicesError::Validation(format!("{} broken", self.name)))
            }
        }

        fn message(&self) -> &str {
            "fine"
        }

        fn level(&self) -> ValidationLevel {
            self.level
        }

        fn hint(&self) -> &str {
            "fix it"
        }
    }

    #[derive(Default)]
    struct Recorder {
        events: Vec<String>,
    }

    impl ValidationReporter for Recorder {
        fn started(&mut self, rule: &dyn Rule) {
            self.events.push(format!("start {}", rule.name()));
        }

        fn passed(&mut self, rule: &dyn Rule) {
            self.events.push(format!("pass {}", rule.name()));
        }

        fn failed(&mut self, rule: &dyn Rule, _error: &ServicesError) {
            self.events.push(format!("fail {}", rule.name()));
        }
    }

    fn rule(name: &'static str, level: ValidationLevel, ok: bool) -> Box<dyn Rule> {
        Box::new(Fixed { name, level, ok })
    }

    #[tokio::test]
    async fn test_all_rules_run_in_order() {
        let validator = Validator::new(vec![
            rule("a", ValidationLevel::Error, false),
            rule("b", ValidationLevel::Warning, true),
        ]);
        let mut recorder = Recorder::default();
        let report = validator.run(&mut recorder).await;

        assert_eq!(
            recorder.events,
            vec!["start a", "fail a", "start b", "pass b"]
        );
        assert!(report.has_errors());
        assert_eq!(report.errors()[0].detail, "Validation error: a broken");
        assert_eq!(report.outcomes[1].detail, "fine");
    }

    #[tokio::test]
    async fn test_warning_failures_are_tolerated() {
        let validator = Validator::new(vec![
            rule("a", ValidationLevel::Warning, false),
            rule("b", ValidationLevel::Error, true),
        ]);
        let report = validator.run(&mut Recorder::default()).await;
        assert!(!report.has_errors());
        assert!(!report.outcomes[0].passed);
    }

    #[test]
    fn test_rules_follow_runtime() {
        let podman = AppConfig::default().into_settings().unwrap();
        assert_eq!(
            Validator::for_settings(&podman).rule_names(),
            vec!["podman", "model-directory"]
        );

        let openshift = AppConfig {
            runtime: "openshift".to_string(),
            ..Default::default()
        }
        .into_settings()
        .unwrap();
        assert_eq!(
            Validator::for_settings(&openshift).rule_names(),
            vec!["kubeconfig"]
        );
    }
}
