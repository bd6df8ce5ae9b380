use std::sync::Mutex;

use indicatif::{ProgressBar, ProgressStyle};
use nara_core::responses::RunSummary;
use nara_pipeline::RunObserver;

use crate::ui;

pub struct Progress {
    bar: Option<ProgressBar>,
}

fn terminal_columns() -> Option<usize> {
    std::env::var("COLUMNS")
        .ok()
        .and_then(|v| v.parse::<usize>().ok())
}

fn bar_template() -> &'static str {
    match terminal_columns() {
        Some(cols) if cols >= 110 => "{prefix} {bar:40.cyan/blue} {pos}/{len} {msg}",
        Some(cols) if cols >= 80 => "{prefix} {wide_bar:.cyan/blue} {pos}/{len} {msg}",
        _ => "{prefix} {wide_bar:.cyan/blue} {percent}% {msg}",
    }
}

impl Progress {
    #[must_use]
    pub fn spinner(message: &str) -> Self {
        if !ui::prefs().progress {
            return Self { bar: None };
        }

        let bar = ProgressBar::new_spinner();
        bar.enable_steady_tick(std::time::Duration::from_millis(100));
        bar.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        bar.set_message(message.to_string());
        Self { bar: Some(bar) }
    }

    #[must_use]
    pub fn bar(total: u64, prefix: &str) -> Self {
        if !ui::prefs().progress {
            return Self { bar: None };
        }

        let bar = ProgressBar::new(total);
        bar.set_style(
            ProgressStyle::with_template(bar_template())
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );
        bar.set_prefix(prefix.to_string());
        Self { bar: Some(bar) }
    }

    pub fn set_message(&self, message: &str) {
        if let Some(bar) = &self.bar {
            bar.set_message(message.to_string());
        }
    }

    pub fn set_position(&self, position: u64) {
        if let Some(bar) = &self.bar {
            bar.set_position(position);
        }
    }

    pub fn finish_ok(&self, message: &str) {
        if let Some(bar) = &self.bar {
            bar.finish_with_message(message.to_string());
        }
    }

    pub fn finish_err(&self, message: &str) {
        if let Some(bar) = &self.bar {
            bar.abandon_with_message(message.to_string());
        }
    }
}

/// Draws one bar per batch run.
#[derive(Default)]
pub struct ProgressObserver {
    current: Mutex<Option<Progress>>,
}

impl RunObserver for ProgressObserver {
    fn started(&self, job: &str, selected: usize) {
        if let Ok(mut current) = self.current.lock() {
            *current = Some(Progress::bar(selected as u64, job));
        }
    }

    fn item(&self, position: usize, label: &str) {
        let Ok(current) = self.current.lock() else {
            return;
        };
        if let Some(progress) = current.as_ref() {
            progress.set_position(position.saturating_sub(1) as u64);
            progress.set_message(label);
        }
    }

    fn finished(&self, summary: &RunSummary) {
        let Ok(mut current) = self.current.lock() else {
            return;
        };
        if let Some(progress) = current.take() {
            progress.set_position(u64::from(summary.total));
            let message = format!("{} ok, {} failed", summary.success, summary.failed);
            if summary.has_failures() {
                progress.finish_err(&message);
            } else {
                progress.finish_ok(&message);
            }
        }
    }
}
