//! Run notifications.
//!
//! Mail delivery is not wired up. The shipped notifier renders the message
//! and writes it to the log.

use std::fmt::Write as _;

use nara_config::NotificationConfig;
use nara_core::responses::RunSummary;

/// Subject and body for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub recipient: String,
    pub subject: String,
    pub body: String,
}

/// Outcome being reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    Success,
    Error,
}

pub trait Notifier: Send + Sync {
    fn send(&self, notification: &Notification);
}

/// Writes notifications to the log at `info`.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn send(&self, notification: &Notification) {
        tracing::info!(
            recipient = %notification.recipient,
            subject = %notification.subject,
            "notification"
        );
        tracing::debug!(body = %notification.body, "notification body");
    }
}

/// Build the notification for a finished daily run, or `None` when the
/// config turns this status off.
#[must_use]
pub fn render(
    config: &NotificationConfig,
    status: RunStatus,
    processed: u32,
    summaries: &[RunSummary],
    error: Option<&str>,
) -> Option<Notification> {
    let enabled = match status {
        RunStatus::Success => config.on_success,
        RunStatus::Error => config.on_error,
    };
    if !enabled {
        return None;
    }

    let subject = match status {
        RunStatus::Success => format!("Daily Ebook Agent - Success ({processed} items processed)"),
        RunStatus::Error => String::from("Daily Ebook Agent - Failed"),
    };

    let mut body = String::new();
    for summary in summaries {
        let _ = writeln!(
            body,
            "{}: {} succeeded, {} failed, {} skipped of {} in {:.2}s",
            summary.job,
            summary.success,
            summary.failed,
            summary.skipped,
            summary.total,
            summary.duration_secs
        );
    }
    if let Some(error) = error {
        let _ = writeln!(body, "error: {error}");
    }

    Some(Notification {
        recipient: config.email.clone(),
        subject,
        body,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_subject_counts_items() {
        let config = NotificationConfig::default();
        let summary = RunSummary {
            job: "scan_core".into(),
            success: 3,
            total: 3,
            ..RunSummary::default()
        };
        let note = render(&config, RunStatus::Success, 3, &[summary], None).unwrap();
        assert_eq!(note.recipient, "library@nara.ac.lk");
        assert_eq!(note.subject, "Daily Ebook Agent - Success (3 items processed)");
        assert!(note.body.starts_with("scan_core: 3 succeeded"));
    }

    #[test]
    fn disabled_status_renders_nothing() {
        let config = NotificationConfig {
            on_success: false,
            ..NotificationConfig::default()
        };
        assert!(render(&config, RunStatus::Success, 0, &[], None).is_none());
        let failed = render(&config, RunStatus::Error, 0, &[], Some("catalogue missing")).unwrap();
        assert_eq!(failed.subject, "Daily Ebook Agent - Failed");
        assert!(failed.body.contains("catalogue missing"));
    }
}
