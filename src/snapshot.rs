use anyhow::Context;
use core_types::Dataset;
use std::fs;
use std::path::Path;

/// Reads a scorecard snapshot exported as a single JSON object.
pub fn load_snapshot(path: &Path) -> anyhow::Result<Dataset> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read snapshot {}", path.display()))?;
    let dataset = parse_snapshot(&raw)
        .with_context(|| format!("Failed to parse snapshot {}", path.display()))?;

    tracing::info!(
        path = %path.display(),
        perspectives = dataset.perspectives.len(),
        kpis = dataset.kpis.len(),
        records = dataset.historical_records.len(),
        "Snapshot loaded"
    );
    Ok(dataset)
}

pub fn parse_snapshot(raw: &str) -> anyhow::Result<Dataset> {
    Ok(serde_json::from_str(raw)?)
}
