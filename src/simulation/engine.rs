//! Simulation driver.
//!
//! Lifecycle: `Uninitialized → Running → Completed`, or `Failed` when a step
//! diverges or the sink rejects a sample. `run()` always starts from a fresh `initialize()`, so nothing is
//! carried over between runs.

use crate::biophysics::{LeakState, Stimulus, StimulusInjector};
use crate::config::{Parameters, SimulationParameters};
use crate::error::{Result, SimulationError};

use super::sample::{Sample, SampleSink, TimeSeries};
use super::state::SimulationState;
use super::step::StepModel;

/// Upper bound on the samples `run_to_series` reserves up front
const MAX_PREALLOCATED_SAMPLES: usize = 1 << 16;

/// Engine lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineStatus {
    Uninitialized,
    Running,
    Completed,
    /// A step produced a non-finite value; re-initialize to run again
    Failed,
}

/// Owns the configuration and the mutable state of one run
pub struct SimulationEngine {
    params: SimulationParameters,
    injector: StimulusInjector,
    state: Option<SimulationState>,
    status: EngineStatus,
}

impl SimulationEngine {
    /// Create an engine, rejecting invalid configuration up front
    pub fn new(params: SimulationParameters, stimuli: Vec<Stimulus>) -> Result<Self> {
        Parameters {
            simulation: params,
            stimuli,
        }
        .try_into()
    }

    pub fn parameters(&self) -> &SimulationParameters {
        &self.params
    }

    pub fn stimuli(&self) -> &[Stimulus] {
        self.injector.stimuli()
    }

    pub fn status(&self) -> EngineStatus {
        self.status
    }

    /// State after the most recent step, if initialized
    pub fn state(&self) -> Option<&SimulationState> {
        self.state.as_ref()
    }

    /// Reset to t = 0 with closed gates and freshly computed leak terms
    pub fn initialize(&mut self) {
        let state = SimulationState::initial(&self.params);
        log::debug!(
            "Initialized: dt={} ms, vK={:.3} mV, vNa={:.3} mV, vLeak={:.3} mV",
            state.dt,
            state.leak.vK,
            state.leak.vNa,
            state.leak.vLeak
        );
        self.state = Some(state);
        self.status = EngineStatus::Running;
    }

    /// Change concentration ratios mid-run and recompute the leak terms
    ///
    /// Applies to the current run only; the next `initialize()` restores the
    /// configured ratios.
    pub fn set_concentration_ratios(&mut self, K_ratio: f64, Na_ratio: f64) -> Result<()> {
        for (name, value) in [("K_ratio", K_ratio), ("Na_ratio", Na_ratio)] {
            if !(value.is_finite() && value > 0.0) {
                return Err(SimulationError::InvalidConfiguration(format!(
                    "{} must be positive, got {}",
                    name, value
                )));
            }
        }

        let state = self.state.as_mut().ok_or(SimulationError::NotInitialized)?;
        state.leak = LeakState::calc_with_ratios(&self.params, K_ratio, Na_ratio);
        log::info!(
            "Concentration ratios set to K={} Na={} at t={:.3} ms (vK={:.3}, vNa={:.3})",
            K_ratio,
            Na_ratio,
            state.t,
            state.leak.vK,
            state.leak.vNa
        );
        Ok(())
    }

    /// Whether the configured run length has been reached
    pub fn is_finished(&self) -> bool {
        self.state
            .as_ref()
            .map_or(false, |s| s.t >= self.params.total_time_ms)
    }

    /// Advance one step
    ///
    /// Returns `Ok(None)` once the run is over.
    pub fn step(&mut self) -> Result<Option<Sample>> {
        match self.status {
            EngineStatus::Uninitialized => return Err(SimulationError::NotInitialized),
            EngineStatus::Completed | EngineStatus::Failed => return Ok(None),
            EngineStatus::Running => {}
        }

        let state = self.state.ok_or(SimulationError::NotInitialized)?;
        if state.t >= self.params.total_time_ms {
            self.status = EngineStatus::Completed;
            return Ok(None);
        }

        let model = StepModel::new(&self.params, &self.injector);
        match model.advance(&state) {
            Ok((next, sample)) => {
                self.state = Some(next);
                Ok(Some(sample))
            }
            Err(e) => {
                self.status = EngineStatus::Failed;
                Err(e)
            }
        }
    }

    /// Run from t = 0 to the configured length, emitting every sample
    ///
    /// Returns the number of samples emitted.
    pub fn run<S: SampleSink + ?Sized>(&mut self, sink: &mut S) -> Result<u64> {
        self.initialize();
        log::info!(
            "Run started: {} ms at dt={} ms, {} stimuli",
            self.params.total_time_ms,
            self.params.dt_ms,
            self.injector.stimuli().len()
        );

        let mut emitted = 0u64;
        while let Some(sample) = self.step()? {
            if let Err(e) = sink.accept(&sample) {
                log::error!("Sink rejected sample at t={} ms: {}", sample.t_ms, e);
                self.status = EngineStatus::Failed;
                return Err(e);
            }
            emitted += 1;
        }

        if let Some(state) = &self.state {
            log::info!("Run completed: {} steps, final mV={:.3}", emitted, state.mV);
        }
        Ok(emitted)
    }

    /// Run and collect the samples in time order
    pub fn run_to_series(&mut self) -> Result<TimeSeries> {
        let mut series = TimeSeries::with_capacity(self.capacity_hint());
        self.run(&mut series)?;
        Ok(series)
    }

    /// Samples to preallocate for a full run, capped for very long runs
    fn capacity_hint(&self) -> usize {
        let expected = (self.params.total_time_ms / self.params.dt_ms).ceil();
        if expected < MAX_PREALLOCATED_SAMPLES as f64 {
            expected as usize
        } else {
            MAX_PREALLOCATED_SAMPLES
        }
    }
}

impl TryFrom<Parameters> for SimulationEngine {
    type Error = SimulationError;

    fn try_from(params: Parameters) -> Result<Self> {
        params.validate()?;
        let injector = StimulusInjector::new(params.stimuli, params.simulation.dt_ms);
        Ok(Self {
            params: params.simulation,
            injector,
            state: None,
            status: EngineStatus::Uninitialized,
        })
    }
}
