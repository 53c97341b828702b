//! Membrane biophysics for a single isopotential compartment.
//!
//! This module implements the conductance-based model of Hodgkin & Huxley:
//! - α/β rate kinetics for the n, m and h gates
//! - Nernst reversal potentials and the K+/Na+ leak split
//! - Gate state integration with clamping to [0, 1]
//! - Ionic, leak and capacitive currents
//! - Rectangular stimulus pulses
//!
//! Units: mV, ms, mS/cm², μA/cm², μF/cm².
//!
//! References:
//! - Hodgkin AL, Huxley AF. J Physiol. 1952;117:500-544

pub mod constants;
pub mod currents;
pub mod gating;
pub mod leak;
pub mod rates;
pub mod stimulus;

pub use constants::{nernst_potential, IonSpecies, IonTable, FARADAY, KELVIN, RGAS};
pub use currents::{CurrentModel, Currents};
pub use gating::GatingState;
pub use leak::LeakState;
pub use rates::{GateRates, SINGULARITY_EPSILON};
pub use stimulus::{Stimulus, StimulusInjector};
