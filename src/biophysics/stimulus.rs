//! Rectangular current pulses injected into the membrane.

use serde::{Deserialize, Serialize};

/// Fraction of dt used to offset pulse edges away from sample times
pub const EDGE_OFFSET_FRACTION: f64 = 1e-3;

/// One injected current pulse
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Stimulus {
    /// Injected current (μA/cm²)
    pub amplitude_uA: f64,
    /// Onset (ms)
    pub start_ms: f64,
    /// Width (ms)
    pub duration_ms: f64,
}

impl Default for Stimulus {
    fn default() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }
}

impl Stimulus {
    pub const fn new(amplitude_uA: f64, start_ms: f64, duration_ms: f64) -> Self {
        Self {
            amplitude_uA,
            start_ms,
            duration_ms,
        }
    }

    pub fn end_ms(&self) -> f64 {
        self.start_ms + self.duration_ms
    }

    /// Whether the pulse drives the membrane at time `t`
    ///
    /// Active on `[start + ddt, start + duration + ddt)`.
    pub fn is_active(&self, t: f64, ddt: f64) -> bool {
        t >= self.start_ms + ddt && t < self.end_ms() + ddt
    }

    /// Display-form amplitude, inclusive on both edges
    pub fn amplitude_at(&self, t: f64) -> f64 {
        if t >= self.start_ms && t <= self.end_ms() {
            self.amplitude_uA
        } else {
            0.0
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if !(self.amplitude_uA.is_finite() && self.start_ms.is_finite() && self.duration_ms.is_finite()) {
            return Err(format!("non-finite field in {:?}", self));
        }
        if self.duration_ms < 0.0 {
            return Err(format!("negative duration {} ms", self.duration_ms));
        }
        Ok(())
    }
}

/// Sums the pulses active at a given time
#[derive(Debug, Clone, Default)]
pub struct StimulusInjector {
    stimuli: Vec<Stimulus>,
    ddt: f64,
}

impl StimulusInjector {
    /// Build an injector for a run with step `dt`
    pub fn new(stimuli: Vec<Stimulus>, dt: f64) -> Self {
        Self {
            stimuli,
            ddt: dt * EDGE_OFFSET_FRACTION,
        }
    }

    pub fn stimuli(&self) -> &[Stimulus] {
        &self.stimuli
    }

    /// Edge offset (ms)
    pub fn ddt(&self) -> f64 {
        self.ddt
    }

    /// Combined amplitude of every pulse active at `t`
    pub fn total_at(&self, t: f64) -> f64 {
        self.stimuli
            .iter()
            .filter(|s| s.is_active(t, self.ddt))
            .fold(0.0, |total, s| total + s.amplitude_uA)
    }

    /// Combined display-form amplitude at `t`
    pub fn plot_total(&self, t: f64) -> f64 {
        self.stimuli
            .iter()
            .fold(0.0, |total, s| total + s.amplitude_at(t))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_is_offset_by_ddt() {
        let s = Stimulus::new(100.0, 2.5, 0.1);
        let ddt = 1e-5;
        assert!(!s.is_active(2.5, ddt));
        assert!(s.is_active(2.5 + ddt, ddt));
        assert!(s.is_active(2.55, ddt));
        assert!(s.is_active(2.6, ddt));
        assert!(!s.is_active(2.6 + ddt, ddt));
    }

    #[test]
    fn test_overlapping_pulses_add() {
        let injector = StimulusInjector::new(
            vec![Stimulus::new(10.0, 1.0, 2.0), Stimulus::new(5.0, 2.0, 2.0)],
            0.01,
        );
        assert_eq!(injector.total_at(0.5), 0.0);
        assert_eq!(injector.total_at(1.5), 10.0);
        assert_eq!(injector.total_at(2.5), 15.0);
        assert_eq!(injector.total_at(3.5), 5.0);
    }

    #[test]
    fn test_plot_form_includes_edges() {
        let s = Stimulus::new(7.0, 1.0, 1.0);
        assert_eq!(s.amplitude_at(1.0), 7.0);
        assert_eq!(s.amplitude_at(2.0), 7.0);
        assert_eq!(s.amplitude_at(2.01), 0.0);
    }

    #[test]
    fn test_zero_duration_never_active() {
        let injector = StimulusInjector::new(vec![Stimulus::new(50.0, 1.0, 0.0)], 0.01);
        assert_eq!(injector.total_at(1.0), 0.0);
        assert_eq!(injector.total_at(1.0 + injector.ddt()), 0.0);
    }

    #[test]
    fn test_validation() {
        assert!(Stimulus::new(1.0, 0.0, 1.0).validate().is_ok());
        assert!(Stimulus::new(1.0, 0.0, -1.0).validate().is_err());
        assert!(Stimulus::new(f64::NAN, 0.0, 1.0).validate().is_err());
    }
}
