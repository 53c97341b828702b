//! One fixed explicit step of the free-running membrane.
//!
//! Per step:
//! 1. rates at the current voltage
//! 2. gates placed at steady state (first step only), then integrated
//! 3. conductances and currents
//! 4. active stimuli subtracted from the total current
//! 5. mV ← mV − (iT − stimulus)·dt
//!
//! The step is a pure function of the previous state.

use crate::biophysics::{CurrentModel, GateRates, GatingState, StimulusInjector};
use crate::config::SimulationParameters;
use crate::error::{Result, SimulationError};

use super::sample::Sample;
use super::state::SimulationState;

/// Read-only inputs shared by every step of a run
#[derive(Debug, Clone)]
pub struct StepModel<'a> {
    pub params: &'a SimulationParameters,
    pub currents: CurrentModel,
    pub injector: &'a StimulusInjector,
}

impl<'a> StepModel<'a> {
    pub fn new(params: &'a SimulationParameters, injector: &'a StimulusInjector) -> Self {
        Self {
            params,
            currents: CurrentModel::new(params),
            injector,
        }
    }

    /// Advance `state` by one step, returning the new state and its sample
    pub fn advance(&self, state: &SimulationState) -> Result<(SimulationState, Sample)> {
        let dt = state.dt;
        let t = state.t;

        let rates = GateRates::evaluate(state.mV, self.params.rate_convention, &self.params.gates);

        let start = if state.gates_bootstrapped {
            state.gates
        } else {
            GatingState::steady_state(&rates)
        };
        let gates = start.integrate(&rates, dt);

        let currents = self
            .currents
            .compute(&gates, &state.leak, state.mV, state.mV_prev, dt);

        let stimulus_uA = self.injector.total_at(t);
        let net = currents.iT - stimulus_uA;

        let mV = state.mV + -net * dt;

        if let Some((variable, value)) = gates.first_non_finite() {
            return Err(diverged(state.step, variable, value));
        }
        if !mV.is_finite() {
            return Err(diverged(state.step, "mV", mV));
        }

        let step = state.step + 1;
        let next = SimulationState {
            step,
            t: SimulationState::time_of_step(step, dt),
            dt,
            gates,
            rates,
            gates_bootstrapped: true,
            mV,
            mV_prev: state.mV,
            leak: state.leak,
            currents,
            stimulus_uA,
        };

        let sample = Sample {
            t_ms: t,
            mV,
            gK: currents.gK,
            gNa: currents.gNa,
            n: gates.n,
            m: gates.m,
            h: gates.h,
            iNa: currents.iNa,
            iK: currents.iK,
            iL: currents.iL,
            iC: currents.iC,
            iT: currents.iT,
            stimulus_uA,
        };

        Ok((next, sample))
    }
}

fn diverged(step: u64, variable: &'static str, value: f64) -> SimulationError {
    log::error!("{} became {} at step {}", variable, value, step);
    SimulationError::NumericDivergence {
        step,
        variable,
        value,
    }
}
