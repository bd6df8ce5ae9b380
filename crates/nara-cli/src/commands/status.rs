use nara_config::NaraConfig;
use nara_core::responses::{CatalogueStatus, RunRecord};
use nara_store::{CatalogueFile, QueueFile, RunHistory, catalogue_status};
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::StatusArgs;
use crate::output::output;

#[derive(Debug, Serialize)]
struct StatusReport {
    #[serde(flatten)]
    status: CatalogueStatus,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    recent_runs: Vec<RunRecord>,
}

/// Handle `nara status`.
pub fn handle(args: &StatusArgs, config: &NaraConfig, flags: &GlobalFlags) -> anyhow::Result<i32> {
    let catalogue = CatalogueFile::new(config.library.catalogue_path());
    if !catalogue.exists() {
        tracing::warn!(path = %catalogue.path().display(), "catalogue file not found");
    }
    let items = catalogue.load_or_default()?;
    let queue = QueueFile::new(config.library.queue_path()).load_or_default()?;

    let recent_runs = if args.history > 0 {
        RunHistory::new(config.library.history_path()).tail(args.history)?
    } else {
        Vec::new()
    };

    output(
        &StatusReport {
            status: catalogue_status(&items, &queue),
            recent_runs,
        },
        flags.format,
    )?;
    Ok(0)
}
