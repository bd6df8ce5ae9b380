//! Daily agent schedule and run notifications.

use serde::{Deserialize, Serialize};

fn default_cron() -> String {
    String::from("0 0 2 * * *")
}

const fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ScheduleConfig {
    /// Cron expression for the daily run. Five-field expressions are
    /// accepted and run at second zero.
    #[serde(default = "default_cron")]
    pub cron: String,

    /// Run once immediately when `nara schedule` starts.
    #[serde(default)]
    pub run_on_start: bool,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            cron: default_cron(),
            run_on_start: false,
        }
    }
}

fn default_email() -> String {
    String::from("library@nara.ac.lk")
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NotificationConfig {
    #[serde(default = "default_email")]
    pub email: String,

    #[serde(default = "default_true")]
    pub on_success: bool,

    #[serde(default = "default_true")]
    pub on_error: bool,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            email: default_email(),
            on_success: true,
            on_error: true,
        }
    }
}
