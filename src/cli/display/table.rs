//! Table rendering for CLI output

use super::{ColorTheme, StatusIcon};
use crate::domain::application::{ApplicationInfo, TemplateMetadata};
use crate::domain::config::Settings;
use crate::domain::runtime::Pod;
use crate::domain::validation::{ValidationLevel, ValidationReport};
use crate::shared::utils::{capitalize_and_format, flatten};
use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Cell, CellAlignment, Color, ContentArrangement, Table};

/// Image required by a template and whether the runtime already has it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageStatus {
    pub reference: String,
    pub present: bool,
}

/// Table renderer for formatted output
pub struct TableRenderer {
    theme: ColorTheme,
}

impl Default for TableRenderer {
    fn default() -> Self {
        Self::new()
    }
}

fn new_table(header: Vec<Cell>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header);
    table
}

fn header(name: &str) -> Cell {
    Cell::new(name).set_alignment(CellAlignment::Left)
}

/// `container:port` pairs, one per line
fn format_ports(pod: &Pod) -> String {
    let pairs: Vec<Vec<String>> = pod
        .ports
        .iter()
        .map(|(container, ports)| {
            ports
                .iter()
                .map(|port| format!("{}:{}", container, port))
                .collect()
        })
        .collect();
    let pairs = flatten(pairs);
    if pairs.is_empty() {
        "-".to_string()
    } else {
        pairs.join("\n")
    }
}

fn format_cards(pod: &Pod, settings: &Settings) -> String {
    let cards = settings.spyre_cards(&pod.annotations);
    if cards.is_empty() {
        "-".to_string()
    } else {
        cards
            .iter()
            .map(|(container, count)| format!("{}: {}", container, count))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl TableRenderer {
    /// Create a new table renderer with default theme
    pub fn new() -> Self {
        Self {
            theme: ColorTheme::default(),
        }
    }

    /// One row per pod, grouped by application
    pub fn render_applications(
        &self,
        apps: &[ApplicationInfo],
        settings: &Settings,
        wide: bool,
    ) -> String {
        if apps.is_empty() {
            return "No applications found".to_string();
        }

        let mut columns = vec![
            header("APPLICATION"),
            header("TEMPLATE"),
            header("POD"),
            header("STATUS"),
            header("CREATED"),
        ];
        if wide {
            columns.push(header("PORTS"));
            columns.push(header("SPYRE CARDS"));
        }
        let mut table = new_table(columns);

        for app in apps {
            let ready = app.running_pods();
            let total = app.pods.len();
            let app_color = self.theme.get_ready_color(ready, total);

            for (i, pod) in app.pods.iter().enumerate() {
                let (name, template) = if i == 0 {
                    (
                        Cell::new(format!("{} {}/{}", app.name, ready, total)).fg(app_color),
                        Cell::new(app.template.as_deref().unwrap_or("-")),
                    )
                } else {
                    (Cell::new(""), Cell::new(""))
                };

                let created = pod
                    .created
                    .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
                    .unwrap_or_else(|| "-".to_string());

                let mut row = vec![
                    name,
                    template,
                    Cell::new(&pod.name),
                    Cell::new(format!(
                        "{} {}",
                        StatusIcon::get_status_icon(&pod.status),
                        pod.status
                    ))
                    .fg(self.theme.get_status_color(&pod.status)),
                    Cell::new(created).fg(self.theme.muted),
                ];
                if wide {
                    row.push(Cell::new(format_ports(pod)));
                    row.push(Cell::new(format_cards(pod, settings)).fg(self.theme.info));
                }
                table.add_row(row);
            }
        }

        let mut output = String::new();
        output.push_str(&format!(
            "╭─ Applications {} ─╮\n",
            format!("[{} applications]", apps.len())
                .bright_black()
                .to_string()
        ));
        output.push_str(&table.to_string());
        output.push('\n');
        output
    }

    pub fn render_templates(&self, templates: &[TemplateMetadata]) -> String {
        if templates.is_empty() {
            return "No application templates found".to_string();
        }

        let mut table = new_table(vec![
            header("TEMPLATE"),
            header("TITLE"),
            header("VERSION"),
            header("MODELS"),
            header("DESCRIPTION"),
        ]);
        for template in templates {
            table.add_row(vec![
                Cell::new(&template.name),
                Cell::new(capitalize_and_format(&template.name)),
                Cell::new(&template.version).set_alignment(CellAlignment::Center),
                Cell::new(template.models.len()).set_alignment(CellAlignment::Center),
                Cell::new(&template.description),
            ]);
        }
        table.to_string()
    }

    pub fn render_images(&self, images: &[ImageStatus]) -> String {
        let mut table = new_table(vec![header("IMAGE"), header("STATUS")]);
        for image in images {
            let (text, color) = if image.present {
                (format!("{} Present", StatusIcon::SUCCESS), self.theme.success)
            } else {
                (format!("{} Missing", StatusIcon::ERROR), self.theme.error)
            };
            table.add_row(vec![Cell::new(&image.reference), Cell::new(text).fg(color)]);
        }
        table.to_string()
    }

    pub fn render_validation(&self, report: &ValidationReport) -> String {
        let mut table = new_table(vec![
            header("CHECK"),
            header("LEVEL"),
            header("RESULT"),
            header("DETAIL"),
        ]);
        for outcome in &report.outcomes {
            let (text, color) = match (outcome.passed, outcome.level) {
                (true, _) => (format!("{} Passed", StatusIcon::SUCCESS), self.theme.success),
                (false, ValidationLevel::Warning) => {
                    (format!("{} Warning", StatusIcon::WARNING), self.theme.warning)
                }
                (false, ValidationLevel::Error) => {
                    (format!("{} Failed", StatusIcon::ERROR), Color::Red)
                }
            };
            table.add_row(vec![
                Cell::new(capitalize_and_format(&outcome.name)),
                Cell::new(outcome.level.to_string()),
                Cell::new(text).fg(color),
                Cell::new(&outcome.detail),
            ]);
        }
        table.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::config::AppConfig;
    use crate::domain::validation::RuleOutcome;
    use std::collections::BTreeMap;

    fn settings() -> Settings {
        AppConfig::default().into_settings().unwrap()
    }

    fn rag() -> ApplicationInfo {
        let mut ports = BTreeMap::new();
        ports.insert("vllm".to_string(), vec!["8000".to_string()]);
        let mut annotations = BTreeMap::new();
        annotations.insert(
            "ai-services.io/vllm--sypre-cards".to_string(),
            "4".to_string(),
        );

        ApplicationInfo {
            name: "rag".to_string(),
            template: Some("rag-template".to_string()),
            pods: vec![Pod {
                name: "rag--vllm".to_string(),
                status: "Running".to_string(),
                ports,
                annotations,
                ..Default::default()
            }],
        }
    }

    #[test]
    fn test_render_empty_applications() {
        let output = TableRenderer::new().render_applications(&[], &settings(), false);
        assert!(output.contains("No applications found"));
    }

    #[test]
    fn test_render_applications() {
        let renderer = TableRenderer::new();
        let output = renderer.render_applications(&[rag()], &settings(), false);
        assert!(output.contains("rag 1/1"));
        assert!(output.contains("rag-template"));
        assert!(output.contains("rag--vllm"));
        assert!(!output.contains("SPYRE CARDS"));

        let wide = renderer.render_applications(&[rag()], &settings(), true);
        assert!(wide.contains("vllm:8000"));
        assert!(wide.contains("vllm: 4"));
    }

    #[test]
    fn test_render_templates() {
        let output = TableRenderer::new().render_templates(&[TemplateMetadata {
            name: "rag_chat-bot".to_string(),
            description: "Chat".to_string(),
            version: "1.0".to_string(),
            models: vec!["granite".to_string()],
            images: Vec::new(),
        }]);
        assert!(output.contains("Rag Chat Bot"));
        assert!(output.contains("1.0"));
    }

    #[test]
    fn test_render_images_and_validation() {
        let renderer = TableRenderer::new();
        let images = renderer.render_images(&[ImageStatus {
            reference: "quay.io/org/vllm:0.6".to_string(),
            present: false,
        }]);
        assert!(images.contains("Missing"));

        let report = ValidationReport {
            outcomes: vec![RuleOutcome {
                name: "model-directory".to_string(),
                level: ValidationLevel::Warning,
                passed: false,
                detail: "missing".to_string(),
            }],
        };
        let output = renderer.render_validation(&report);
        assert!(output.contains("Model Directory"));
        assert!(output.contains("Warning"));
    }
}
