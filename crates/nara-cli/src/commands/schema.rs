use anyhow::bail;
use nara_core::entities::{
    Alert, CatalogueItem, MaritimeService, Port, QueueItem, TranslationOutcome, Vessel,
};
use nara_core::responses::{CatalogueStatus, RunRecord, RunSummary};
use schemars::schema_for;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::SchemaArgs;
use crate::output::output;

pub const TYPE_NAMES: &[&str] = &[
    "catalogue_item",
    "translation_outcome",
    "queue_item",
    "run_summary",
    "run_record",
    "catalogue_status",
    "vessel",
    "port",
    "maritime_service",
    "alert",
];

fn schema_value(type_name: &str) -> anyhow::Result<Option<serde_json::Value>> {
    let schema = match type_name {
        "catalogue_item" => schema_for!(CatalogueItem),
        "translation_outcome" => schema_for!(TranslationOutcome),
        "queue_item" => schema_for!(QueueItem),
        "run_summary" => schema_for!(RunSummary),
        "run_record" => schema_for!(RunRecord),
        "catalogue_status" => schema_for!(CatalogueStatus),
        "vessel" => schema_for!(Vessel),
        "port" => schema_for!(Port),
        "maritime_service" => schema_for!(MaritimeService),
        "alert" => schema_for!(Alert),
        _ => return Ok(None),
    };
    Ok(Some(serde_json::to_value(schema)?))
}

/// Handle `nara schema`.
pub fn handle(args: &SchemaArgs, flags: &GlobalFlags) -> anyhow::Result<i32> {
    let Some(type_name) = args.type_name.as_deref() else {
        output(&TYPE_NAMES, flags.format)?;
        return Ok(0);
    };
    let Some(schema) = schema_value(&type_name.replace('-', "_"))? else {
        bail!(
            "unknown schema type '{type_name}' (expected one of: {})",
            TYPE_NAMES.join(", ")
        );
    };
    output(&schema, flags.format)?;
    Ok(0)
}
