//! Fixed-step simulation of the free-running membrane.
//!
//! `SimulationEngine` drives a pure per-step function over an explicit
//! `SimulationState` and forwards one `Sample` per step to a `SampleSink`.

mod engine;
mod sample;
mod state;
mod step;

pub use engine::{EngineStatus, SimulationEngine};
pub use sample::{FnSink, Sample, SampleSink, TimeSeries};
pub use state::SimulationState;
pub use step::StepModel;
