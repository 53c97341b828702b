//! Recorded output of a run and the sink capability that receives it.

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// One recorded row per integration step
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    /// Step start time (ms)
    pub t_ms: f64,
    /// Membrane potential after the step (mV)
    pub mV: f64,
    /// K+ conductance (mS/cm²)
    pub gK: f64,
    /// Na+ conductance (mS/cm²)
    pub gNa: f64,
    pub n: f64,
    pub m: f64,
    pub h: f64,
    /// Currents (μA/cm²)
    pub iNa: f64,
    pub iK: f64,
    pub iL: f64,
    pub iC: f64,
    /// iL + iK + iNa, before stimulus subtraction
    pub iT: f64,
    /// Sum of active stimulus amplitudes (μA/cm²)
    pub stimulus_uA: f64,
}

impl Sample {
    /// Net current that drove the voltage update
    pub fn net_current(&self) -> f64 {
        self.iT - self.stimulus_uA
    }
}

/// Receives samples in time order, one per completed step
pub trait SampleSink {
    fn accept(&mut self, sample: &Sample) -> Result<()>;
}

impl SampleSink for Vec<Sample> {
    fn accept(&mut self, sample: &Sample) -> Result<()> {
        self.push(*sample);
        Ok(())
    }
}

/// Adapts a closure into a [`SampleSink`]
pub struct FnSink<F>(pub F);

impl<F: FnMut(&Sample)> SampleSink for FnSink<F> {
    fn accept(&mut self, sample: &Sample) -> Result<()> {
        (self.0)(sample);
        Ok(())
    }
}

/// Samples of one run in non-decreasing time order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TimeSeries {
    samples: Vec<Sample>,
}

impl TimeSeries {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            samples: Vec::with_capacity(capacity),
        }
    }

    /// Append a sample; the caller keeps time order
    pub fn push(&mut self, sample: Sample) {
        debug_assert!(
            self.samples.last().map_or(true, |last| last.t_ms <= sample.t_ms),
            "samples must arrive in time order"
        );
        self.samples.push(sample);
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn as_slice(&self) -> &[Sample] {
        &self.samples
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Sample> {
        self.samples.iter()
    }

    pub fn first(&self) -> Option<&Sample> {
        self.samples.first()
    }

    pub fn last(&self) -> Option<&Sample> {
        self.samples.last()
    }

    /// Time axis (ms)
    pub fn times(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.t_ms).collect()
    }

    /// Voltage trace (mV)
    pub fn voltages(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.mV).collect()
    }

    /// Samples with `start <= t < end`
    pub fn window(&self, start_ms: f64, end_ms: f64) -> impl Iterator<Item = &Sample> {
        self.samples
            .iter()
            .filter(move |s| s.t_ms >= start_ms && s.t_ms < end_ms)
    }

    pub fn into_inner(self) -> Vec<Sample> {
        self.samples
    }
}

impl SampleSink for TimeSeries {
    fn accept(&mut self, sample: &Sample) -> Result<()> {
        self.push(*sample);
        Ok(())
    }
}

impl<'a> IntoIterator for &'a TimeSeries {
    type Item = &'a Sample;
    type IntoIter = std::slice::Iter<'a, Sample>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_at(t_ms: f64, mV: f64) -> Sample {
        Sample {
            t_ms,
            mV,
            ..Default::default()
        }
    }

    #[test]
    fn test_series_keeps_insertion_order() {
        let mut series = TimeSeries::new();
        for i in 0..5 {
            series.accept(&sample_at(i as f64 * 0.1, -60.0 + i as f64)).unwrap();
        }
        assert_eq!(series.len(), 5);
        assert_eq!(series.first().map(|s| s.t_ms), Some(0.0));
        assert_eq!(series.voltages(), vec![-60.0, -59.0, -58.0, -57.0, -56.0]);
    }

    #[test]
    fn test_window_is_half_open() {
        let mut series = TimeSeries::new();
        for i in 0..10 {
            series.push(sample_at(i as f64, 0.0));
        }
        let times: Vec<f64> = series.window(2.0, 5.0).map(|s| s.t_ms).collect();
        assert_eq!(times, vec![2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_fn_sink_forwards_samples() {
        let mut seen = 0;
        {
            let mut sink = FnSink(|_: &Sample| seen += 1);
            sink.accept(&Sample::default()).unwrap();
            sink.accept(&Sample::default()).unwrap();
        }
        assert_eq!(seen, 2);
    }

    #[test]
    fn test_net_current_subtracts_stimulus() {
        let s = Sample {
            iT: 3.0,
            stimulus_uA: 100.0,
            ..Default::default()
        };
        assert_eq!(s.net_current(), -97.0);
    }
}
