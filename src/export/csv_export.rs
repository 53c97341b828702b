//! CSV time-series export of simulation samples.

use std::fs::File;
use std::path::{Path, PathBuf};

use chrono::Local;
use serde::Serialize;

use crate::error::Result;
use crate::simulation::{Sample, SampleSink, TimeSeries};

/// Record for CSV time-series export
#[derive(Debug, Clone, Serialize)]
pub struct TraceRecord {
    /// Simulation time (ms)
    pub time_ms: f64,
    /// Membrane potential (mV)
    pub mV: f64,
    /// K+ conductance (mS/cm²)
    pub gK_mS: f64,
    /// Na+ conductance (mS/cm²)
    pub gNa_mS: f64,
    pub n: f64,
    pub m: f64,
    pub h: f64,
    /// Na+ current (μA/cm²)
    pub iNa_uA: f64,
    /// K+ current (μA/cm²)
    pub iK_uA: f64,
    /// Leak current (μA/cm²)
    pub iL_uA: f64,
    /// Total ionic current before stimulus (μA/cm²)
    pub iT_uA: f64,
    /// Injected stimulus (μA/cm²)
    pub stimulus_uA: f64,
}

impl From<&Sample> for TraceRecord {
    fn from(s: &Sample) -> Self {
        Self {
            time_ms: s.t_ms,
            mV: s.mV,
            gK_mS: s.gK,
            gNa_mS: s.gNa,
            n: s.n,
            m: s.m,
            h: s.h,
            iNa_uA: s.iNa,
            iK_uA: s.iK,
            iL_uA: s.iL,
            iT_uA: s.iT,
            stimulus_uA: s.stimulus_uA,
        }
    }
}

/// CSV exporter for time-series data
pub struct CsvExporter {
    writer: csv::Writer<File>,
    /// Sample interval in ms (0 records every sample)
    sample_interval_ms: f64,
    /// Last sample time
    last_sample_time: f64,
    /// Path to output file
    path: PathBuf,
}

impl CsvExporter {
    /// Create a new CSV exporter with the given sample interval
    ///
    /// Creates the exports directory if it doesn't exist.
    /// Filename is auto-generated with timestamp.
    pub fn new(sample_interval_ms: f64) -> Result<Self> {
        let dir = PathBuf::from("exports");
        std::fs::create_dir_all(&dir)?;

        let timestamp = Local::now().format("%Y%m%d_%H%M%S");
        let path = dir.join(format!("trace_{}.csv", timestamp));

        Self::create(path, sample_interval_ms)
    }

    /// Create an exporter writing to a specific file
    pub fn create<P: AsRef<Path>>(path: P, sample_interval_ms: f64) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = File::create(&path)?;
        let writer = csv::Writer::from_writer(file);

        log::info!("CSV export started: {}", path.display());

        Ok(Self {
            writer,
            sample_interval_ms,
            last_sample_time: f64::NEG_INFINITY, // Ensure first sample is recorded
            path,
        })
    }

    /// Record a sample if the interval has elapsed
    pub fn maybe_record(&mut self, sample: &Sample) -> Result<bool> {
        if sample.t_ms - self.last_sample_time >= self.sample_interval_ms {
            self.record(sample)?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// Force record a sample regardless of interval
    pub fn record(&mut self, sample: &Sample) -> Result<()> {
        self.writer.serialize(TraceRecord::from(sample))?;
        self.last_sample_time = sample.t_ms;
        Ok(())
    }

    /// Finish writing and return the output path
    pub fn finish(mut self) -> Result<PathBuf> {
        self.writer.flush()?;
        log::info!("CSV export completed: {}", self.path.display());
        Ok(self.path)
    }

    /// Get the output path
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SampleSink for CsvExporter {
    fn accept(&mut self, sample: &Sample) -> Result<()> {
        self.maybe_record(sample).map(|_| ())
    }
}

/// Write a whole series to `path`, one row per sample
pub fn write_series_csv<P: AsRef<Path>>(series: &TimeSeries, path: P) -> Result<PathBuf> {
    let mut exporter = CsvExporter::create(path, 0.0)?;
    for sample in series {
        exporter.record(sample)?;
    }
    exporter.finish()
}
