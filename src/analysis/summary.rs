//! Diagnostics over a recorded voltage trace.

use serde::{Deserialize, Serialize};

use crate::simulation::TimeSeries;

/// Spike detection threshold (mV)
pub const SPIKE_THRESHOLD_MV: f64 = 0.0;

/// Tolerance for the iT = iL + iK + iNa check (μA/cm²)
const CURRENT_SUM_TOLERANCE: f64 = 1e-9;

/// Summary statistics of one run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraceSummary {
    pub sample_count: usize,
    /// Time of the last sample (ms)
    pub duration_ms: f64,
    /// Reference resting potential (mV)
    pub mV_rest: f64,
    pub mV_peak: f64,
    pub t_peak_ms: f64,
    pub mV_min: f64,
    pub mV_final: f64,
    /// Times of voltage peaks above threshold (ms)
    pub spike_times_ms: Vec<f64>,
    /// Largest |mV − mV_rest| over the trace
    pub max_abs_deviation_mV: f64,
    pub max_stimulus_uA: f64,
}

impl TraceSummary {
    /// Summarize `series`; `None` when it holds no samples
    pub fn from_series(series: &TimeSeries, mV_rest: f64) -> Option<Self> {
        let first = series.first()?;
        let last = series.last()?;

        let mut mV_peak = first.mV;
        let mut t_peak_ms = first.t_ms;
        let mut mV_min = first.mV;
        let mut max_abs_deviation_mV = 0.0f64;
        let mut max_stimulus_uA = 0.0f64;

        for s in series {
            if s.mV > mV_peak {
                mV_peak = s.mV;
                t_peak_ms = s.t_ms;
            }
            mV_min = mV_min.min(s.mV);
            max_abs_deviation_mV = max_abs_deviation_mV.max((s.mV - mV_rest).abs());
            max_stimulus_uA = max_stimulus_uA.max(s.stimulus_uA.abs());
        }

        Some(Self {
            sample_count: series.len(),
            duration_ms: last.t_ms,
            mV_rest,
            mV_peak,
            t_peak_ms,
            mV_min,
            mV_final: last.mV,
            spike_times_ms: detect_spikes(series, SPIKE_THRESHOLD_MV),
            max_abs_deviation_mV,
            max_stimulus_uA,
        })
    }

    pub fn spike_count(&self) -> usize {
        self.spike_times_ms.len()
    }

    /// Print a formatted summary
    pub fn print_summary(&self) {
        println!("=== Membrane Trace ===");
        println!("Samples:        {}", self.sample_count);
        println!("Duration:       {:.2} ms", self.duration_ms);
        println!();
        println!("Voltage:");
        println!("  Rest:         {:.2} mV", self.mV_rest);
        println!("  Peak:         {:.2} mV at {:.2} ms", self.mV_peak, self.t_peak_ms);
        println!("  Minimum:      {:.2} mV", self.mV_min);
        println!("  Final:        {:.2} mV", self.mV_final);
        println!("  Max |ΔV|:     {:.2} mV", self.max_abs_deviation_mV);
        println!();
        println!("Spikes:         {}", self.spike_count());
        for t in &self.spike_times_ms {
            println!("  peak at {:.2} ms", t);
        }
        println!("Max stimulus:   {:.1} μA/cm²", self.max_stimulus_uA);
    }
}

/// Times of local voltage maxima above `threshold_mV`
pub fn detect_spikes(series: &TimeSeries, threshold_mV: f64) -> Vec<f64> {
    let samples = series.as_slice();
    let mut spikes = Vec::new();
    let mut was_increasing = false;

    for pair in samples.windows(2) {
        let (prev, cur) = (&pair[0], &pair[1]);
        let increasing_now = cur.mV > prev.mV;
        if prev.mV > threshold_mV && was_increasing && !increasing_now {
            spikes.push(prev.t_ms);
        }
        was_increasing = increasing_now;
    }

    spikes
}

/// Check a trace against the model invariants
///
/// Returns one warning per violated invariant, empty when the trace is sound.
pub fn validate_trace(series: &TimeSeries) -> Vec<String> {
    let mut warnings = Vec::new();

    if let Some(s) = series
        .iter()
        .find(|s| ![s.n, s.m, s.h].iter().all(|x| (0.0..=1.0).contains(x)))
    {
        warnings.push(format!(
            "Gate out of [0, 1] at t={:.3} ms: n={} m={} h={}",
            s.t_ms, s.n, s.m, s.h
        ));
    }

    if let Some(pair) = series
        .as_slice()
        .windows(2)
        .find(|pair| pair[1].t_ms < pair[0].t_ms)
    {
        warnings.push(format!(
            "Time decreases: {} ms followed by {} ms",
            pair[0].t_ms, pair[1].t_ms
        ));
    }

    if let Some(s) = series
        .iter()
        .find(|s| (s.iT - (s.iL + s.iK + s.iNa)).abs() > CURRENT_SUM_TOLERANCE)
    {
        warnings.push(format!(
            "Current sum mismatch at t={:.3} ms: iT={} vs {}",
            s.t_ms,
            s.iT,
            s.iL + s.iK + s.iNa
        ));
    }

    if let Some(s) = series.iter().find(|s| !s.mV.is_finite()) {
        warnings.push(format!("Non-finite voltage at t={:.3} ms", s.t_ms));
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::Sample;

    fn trace(voltages: &[f64]) -> TimeSeries {
        let mut series = TimeSeries::new();
        for (i, &mV) in voltages.iter().enumerate() {
            series.push(Sample {
                t_ms: i as f64,
                mV,
                ..Default::default()
            });
        }
        series
    }

    #[test]
    fn test_single_peak_detected() {
        let series = trace(&[-60.0, -30.0, 10.0, 40.0, 20.0, -50.0, -65.0]);
        assert_eq!(detect_spikes(&series, 0.0), vec![3.0]);
    }

    #[test]
    fn test_subthreshold_bump_ignored() {
        let series = trace(&[-60.0, -55.0, -50.0, -55.0, -60.0]);
        assert!(detect_spikes(&series, 0.0).is_empty());
    }

    #[test]
    fn test_summary_statistics() {
        let series = trace(&[-60.0, -20.0, 30.0, -70.0, -62.0]);
        let summary = TraceSummary::from_series(&series, -60.0).unwrap();
        assert_eq!(summary.sample_count, 5);
        assert_eq!(summary.mV_peak, 30.0);
        assert_eq!(summary.t_peak_ms, 2.0);
        assert_eq!(summary.mV_min, -70.0);
        assert_eq!(summary.mV_final, -62.0);
        assert_eq!(summary.max_abs_deviation_mV, 90.0);
        assert_eq!(summary.spike_count(), 1);
    }

    #[test]
    fn test_empty_series_has_no_summary() {
        assert!(TraceSummary::from_series(&TimeSeries::new(), -60.0).is_none());
    }

    #[test]
    fn test_validate_flags_bad_gate() {
        let mut series = TimeSeries::new();
        series.push(Sample {
            n: 1.2,
            ..Default::default()
        });
        let warnings = validate_trace(&series);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("Gate"));
    }

    #[test]
    fn test_validate_flags_current_mismatch() {
        let mut series = TimeSeries::new();
        series.push(Sample {
            iK: 1.0,
            iNa: 1.0,
            iL: 1.0,
            iT: 4.0,
            ..Default::default()
        });
        let warnings = validate_trace(&series);
        assert!(warnings.iter().any(|w| w.contains("Current sum")));
    }
}
