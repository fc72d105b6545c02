//! Color theme for CLI output

use comfy_table::Color as TableColor;

/// Color theme for terminal output
#[derive(Debug, Clone)]
pub struct ColorTheme {
    pub success: TableColor,
    pub warning: TableColor,
    pub error: TableColor,
    pub info: TableColor,
    pub muted: TableColor,
}

impl Default for ColorTheme {
    fn default() -> Self {
        Self {
            success: TableColor::Green,
            warning: TableColor::Yellow,
            error: TableColor::Red,
            info: TableColor::Cyan,
            muted: TableColor::DarkGrey,
        }
    }
}

impl ColorTheme {
    /// Color for a pod or container status string
    pub fn get_status_color(&self, status: &str) -> TableColor {
        match status.to_lowercase().as_str() {
            "running" | "succeeded" => self.success,
            "pending" | "created" | "degraded" | "paused" | "stopped" => self.warning,
            "failed" | "exited" | "error" | "dead" => self.error,
            _ => self.muted,
        }
    }

    /// Color for an application given its running/total pod count
    pub fn get_ready_color(&self, ready: usize, total: usize) -> TableColor {
        if total == 0 {
            self.muted
        } else if ready == total {
            self.success
        } else if ready > 0 {
            self.warning
        } else {
            self.error
        }
    }
}
