//! HH Simulator - Hodgkin-Huxley membrane excitability engine
//!
//! This library integrates the 1952 conductance-based model of a single
//! isopotential compartment with a fixed explicit step, producing a time
//! series of membrane voltage, gating state and currents.

// Allow non-snake-case for unit suffixes in field names (mV, gK, Cm, etc.)
// This follows the project convention of including units in names.
#![allow(non_snake_case)]

pub mod analysis;
pub mod biophysics;
pub mod config;
pub mod error;
pub mod export;
pub mod simulation;

pub use analysis::{validate_trace, TraceSummary};
pub use biophysics::{
    nernst_potential, CurrentModel, Currents, GateRates, GatingState, IonSpecies, IonTable,
    LeakState, Stimulus, StimulusInjector,
};
pub use config::{Parameters, RateConvention, SimulationMode, SimulationParameters};
pub use error::{Result, SimulationError};
pub use simulation::{
    EngineStatus, FnSink, Sample, SampleSink, SimulationEngine, SimulationState, StepModel,
    TimeSeries,
};
