//! Mutable state of one run.

use serde::{Deserialize, Serialize};

use crate::biophysics::{Currents, GateRates, GatingState, LeakState};
use crate::config::SimulationParameters;

/// Everything that changes from one step to the next
///
/// Owned by a single engine; created by `initialize()` and discarded at the
/// start of the next run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulationState {
    /// Completed steps
    pub step: u64,
    /// Current time (ms)
    pub t: f64,
    /// Integration step (ms)
    pub dt: f64,
    pub gates: GatingState,
    /// Rates from the most recent step
    pub rates: GateRates,
    /// Set once the gates have been placed at steady state
    pub gates_bootstrapped: bool,
    /// Membrane potential (mV)
    pub mV: f64,
    /// Membrane potential before the most recent voltage update (mV)
    pub mV_prev: f64,
    pub leak: LeakState,
    pub currents: Currents,
    /// Stimulus total applied in the most recent step (μA/cm²)
    pub stimulus_uA: f64,
}

impl SimulationState {
    /// Fresh state at t = 0: gates closed, leak computed, mV at rest
    pub fn initial(params: &SimulationParameters) -> Self {
        let mV = params.membrane.mV_init;
        Self {
            step: 0,
            t: 0.0,
            dt: params.dt_ms,
            gates: GatingState::CLOSED,
            rates: GateRates::default(),
            gates_bootstrapped: false,
            mV,
            mV_prev: mV,
            leak: LeakState::calc_leak(params),
            currents: Currents::default(),
            stimulus_uA: 0.0,
        }
    }

    /// Time at the start of step `step`
    #[inline]
    pub fn time_of_step(step: u64, dt: f64) -> f64 {
        step as f64 * dt
    }
}
