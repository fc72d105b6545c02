//! Status icons for CLI output

/// Status icons for different states
pub struct StatusIcon;

impl StatusIcon {
    pub const SUCCESS: &'static str = "✓";

    pub const WARNING: &'static str = "⚠";

    pub const ERROR: &'static str = "✗";

    pub const PENDING: &'static str = "⏳";

    pub const UNKNOWN: &'static str = "?";

    /// Icon for a pod or container status string
    pub fn get_status_icon(status: &str) -> &'static str {
        match status.to_lowercase().as_str() {
            "running" | "succeeded" => Self::SUCCESS,
            "pending" | "created" => Self::PENDING,
            "degraded" | "paused" | "stopped" => Self::WARNING,
            "failed" | "exited" | "error" | "dead" => Self::ERROR,
            _ => Self::UNKNOWN,
        }
    }

    /// Summary text for an application from its running/total pod count
    pub fn get_status_text(ready: usize, total: usize) -> &'static str {
        if total == 0 {
            "Unknown"
        } else if ready == total {
            "Running"
        } else if ready > 0 {
            "Degraded"
        } else {
            "Stopped"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_status_icon() {
        assert_eq!(StatusIcon::get_status_icon("Running"), StatusIcon::SUCCESS);
        assert_eq!(StatusIcon::get_status_icon("Pending"), StatusIcon::PENDING);
        assert_eq!(StatusIcon::get_status_icon("Exited"), StatusIcon::ERROR);
        assert_eq!(StatusIcon::get_status_icon("Unknown"), StatusIcon::UNKNOWN);
    }

    #[test]
    fn test_get_status_text() {
        assert_eq!(StatusIcon::get_status_text(3, 3), "Running");
        assert_eq!(StatusIcon::get_status_text(2, 3), "Degraded");
        assert_eq!(StatusIcon::get_status_text(0, 3), "Stopped");
        assert_eq!(StatusIcon::get_status_text(0, 0), "Unknown");
    }
}
