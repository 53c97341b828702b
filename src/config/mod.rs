//! Configuration module for loading simulation parameters.
//!
//! Membrane parameters carry the 1952 reference values as defaults.

mod parameters;

pub use parameters::{
    ConcentrationParameters, ConductanceParameters, GateParameters, MembraneParameters,
    Parameters, RateConvention, ReversalParameters, SimulationMode, SimulationParameters,
    DEFAULT_PARAMETERS_PATH,
};
