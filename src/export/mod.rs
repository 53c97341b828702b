//! Export functionality for simulation data.
//!
//! Provides CSV time-series export and JSON export of whole runs.

mod csv_export;
mod json_export;

pub use csv_export::{write_series_csv, CsvExporter, TraceRecord};
pub use json_export::{
    export_series_json, export_series_json_to, load_series_json, SeriesExport, EXPORT_VERSION,
};
