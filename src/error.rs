//! Error types for the simulation engine.

use thiserror::Error;

use crate::config::SimulationMode;

/// Simulation error type
#[derive(Debug, Error)]
pub enum SimulationError {
    /// Parameter set rejected before the run starts
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Selected operating mode has no implementation
    #[error("Unsupported mode: {0:?} is not implemented")]
    UnsupportedMode(SimulationMode),

    /// A state variable became NaN or infinite
    #[error("Numeric divergence at step {step}: {variable} = {value}")]
    NumericDivergence {
        step: u64,
        variable: &'static str,
        value: f64,
    },

    /// Step requested before `initialize()`
    #[error("Engine not initialized")]
    NotInitialized,

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV serialization error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SimulationError>;
