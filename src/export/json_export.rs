//! JSON export of a complete run.

use std::path::{Path, PathBuf};

use anyhow::Result;
use chrono::Local;
use serde::{Deserialize, Serialize};

use crate::analysis::TraceSummary;
use crate::biophysics::Stimulus;
use crate::config::{Parameters, SimulationParameters};
use crate::simulation::TimeSeries;

/// Export format version
pub const EXPORT_VERSION: &str = "1.0.0";

/// Full run export structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeriesExport {
    /// Export timestamp
    pub exported_at: String,
    /// Export version for compatibility
    pub version: String,
    /// Configuration that produced the samples
    pub parameters: Parameters,
    pub summary: Option<TraceSummary>,
    pub samples: TimeSeries,
}

impl SeriesExport {
    pub fn new(params: &SimulationParameters, stimuli: &[Stimulus], series: &TimeSeries) -> Self {
        Self {
            exported_at: Local::now().to_rfc3339(),
            version: EXPORT_VERSION.to_string(),
            parameters: Parameters {
                simulation: params.clone(),
                stimuli: stimuli.to_vec(),
            },
            summary: TraceSummary::from_series(series, params.membrane.mV_init),
            samples: series.clone(),
        }
    }
}

/// Export a run to JSON
///
/// Creates the exports directory if it doesn't exist.
/// Filename is auto-generated with timestamp: `run_YYYYMMDD_HHMMSS.json`
///
/// Returns the path to the saved JSON file.
pub fn export_series_json(
    params: &SimulationParameters,
    stimuli: &[Stimulus],
    series: &TimeSeries,
) -> Result<PathBuf> {
    let dir = PathBuf::from("exports");
    std::fs::create_dir_all(&dir)?;

    let filename = format!("run_{}.json", Local::now().format("%Y%m%d_%H%M%S"));
    let path = dir.join(filename);

    export_series_json_to(params, stimuli, series, &path)?;
    Ok(path)
}

/// Export a run to a specific file
pub fn export_series_json_to(
    params: &SimulationParameters,
    stimuli: &[Stimulus],
    series: &TimeSeries,
    path: &Path,
) -> Result<()> {
    let export = SeriesExport::new(params, stimuli, series);

    let file = std::fs::File::create(path)?;
    serde_json::to_writer_pretty(file, &export)?;

    log::info!("JSON run exported: {}", path.display());
    Ok(())
}

/// Read back a previously exported run
pub fn load_series_json(path: &Path) -> Result<SeriesExport> {
    let contents = std::fs::read_to_string(path)?;
    let export: SeriesExport = serde_json::from_str(&contents)?;
    if export.version != EXPORT_VERSION {
        log::warn!(
            "Export {} has version {}, expected {}",
            path.display(),
            export.version,
            EXPORT_VERSION
        );
    }
    Ok(export)
}
