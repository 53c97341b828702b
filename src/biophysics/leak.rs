//! Reversal potentials and the K+/Na+ split of the leak conductance.
//!
//! ```text
//! vK    = EK  + RT/zF · ln(K_ratio)
//! vNa   = ENa + RT/zF · ln(Na_ratio)
//! vLeak = f·vK + (1 − f)·vNa        f = gK_leak_fraction
//! ```
//!
//! `vLeak` is informational: the current model uses the two split leak
//! conductances against their own reversal potentials.

use serde::{Deserialize, Serialize};

use crate::config::SimulationParameters;

/// Leak-derived quantities, fixed for as long as concentrations are
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LeakState {
    /// K+ reversal potential (mV)
    pub vK: f64,
    /// Na+ reversal potential (mV)
    pub vNa: f64,
    /// Conductance-weighted leak reversal (mV)
    pub vLeak: f64,
    /// K+ share of the leak conductance (mS/cm²)
    pub gK_leak: f64,
    /// Na+ share of the leak conductance (mS/cm²)
    pub gNa_leak: f64,
}

impl LeakState {
    /// Compute leak terms from the parameter set
    pub fn calc_leak(params: &SimulationParameters) -> Self {
        Self::calc_with_ratios(
            params,
            params.concentrations.K_ratio,
            params.concentrations.Na_ratio,
        )
    }

    /// Compute leak terms with concentration ratios overriding the parameters
    pub fn calc_with_ratios(params: &SimulationParameters, K_ratio: f64, Na_ratio: f64) -> Self {
        let rtzf = params.rtzf();
        let vK = params.reversal.EK_mV + rtzf * K_ratio.ln();
        let vNa = params.reversal.ENa_mV + rtzf * Na_ratio.ln();

        let gK_leak_f = params.conductances.gK_leak_fraction;
        let gNa_leak_f = 1.0 - gK_leak_f;
        let g_leak = params.conductances.g_leak_mS;

        Self {
            vK,
            vNa,
            vLeak: gK_leak_f * vK + gNa_leak_f * vNa,
            gK_leak: gK_leak_f * g_leak,
            gNa_leak: gNa_leak_f * g_leak,
        }
    }
}
