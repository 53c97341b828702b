//! Gate kinetics (Hodgkin & Huxley, 1952).
//!
//! Opening (α) and closing (β) rates in 1/ms as functions of a voltage-like
//! input `v` in mV:
//!
//! ```text
//! α_n = 0.01·(v+10) / (e^((v+10)/10) − 1)    β_n = 0.125·e^(v/80)     (Eqns. 12-13)
//! α_m = 0.1·(v+25)  / (e^((v+25)/10) − 1)    β_m = 4·e^(v/18)         (Eqns. 20-21)
//! α_h = 0.07·e^(v/20)                        β_h = 1 / (e^((v+30)/10) + 1)  (Eqns. 23-24)
//! ```
//!
//! α_n and α_m have removable singularities at v = −10 and v = −25. The pure
//! functions return the limit value there; the engine additionally nudges an
//! input that lands exactly on a singular point by [`SINGULARITY_EPSILON`].

use serde::{Deserialize, Serialize};

use crate::config::{GateParameters, RateConvention};

/// Offset applied to an input that lands exactly on a singular point (mV)
pub const SINGULARITY_EPSILON: f64 = 1e-5;

const N_SINGULAR_V: f64 = -10.0;
const M_SINGULAR_V: f64 = -25.0;

/// K+ activation opening rate
pub fn alpha_n(v: f64) -> f64 {
    let x = v - N_SINGULAR_V;
    if x == 0.0 {
        // lim x→0 of 0.01·x / (e^(x/10) − 1)
        return 0.1;
    }
    0.01 * x / (x / 10.0).exp_m1()
}

/// K+ activation closing rate
pub fn beta_n(v: f64) -> f64 {
    0.125 * (v / 80.0).exp()
}

/// Na+ activation opening rate
pub fn alpha_m(v: f64) -> f64 {
    let x = v - M_SINGULAR_V;
    if x == 0.0 {
        return 1.0;
    }
    0.1 * x / (x / 10.0).exp_m1()
}

/// Na+ activation closing rate
pub fn beta_m(v: f64) -> f64 {
    4.0 * (v / 18.0).exp()
}

/// Na+ inactivation opening rate
pub fn alpha_h(v: f64) -> f64 {
    0.07 * (v / 20.0).exp()
}

/// Na+ inactivation closing rate
pub fn beta_h(v: f64) -> f64 {
    1.0 / (((v + 30.0) / 10.0).exp() + 1.0)
}

/// Move an input sitting exactly on a singular point just below it
pub fn avoid_singularity(v: f64) -> f64 {
    if v == M_SINGULAR_V || v == N_SINGULAR_V {
        v - SINGULARITY_EPSILON
    } else {
        v
    }
}

/// Classic rate input relative to a -60 mV rest
#[inline]
pub fn classic_input(mV: f64) -> f64 {
    avoid_singularity(-mV - 60.0)
}

/// α and β rates of all three gates at one voltage
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct GateRates {
    pub an: f64,
    pub bn: f64,
    pub am: f64,
    pub bm: f64,
    pub ah: f64,
    pub bh: f64,
}

impl GateRates {
    /// Rates for the configured convention at membrane voltage `mV`
    pub fn evaluate(mV: f64, convention: RateConvention, gates: &GateParameters) -> Self {
        match convention {
            RateConvention::Classic => Self::classic(mV),
            RateConvention::ThresholdReferenced => Self::threshold_referenced(mV, gates),
        }
    }

    /// All rates evaluated at `v = -(mV + 60)`
    pub fn classic(mV: f64) -> Self {
        let v = classic_input(mV);
        Self {
            an: alpha_n(v),
            bn: beta_n(v),
            am: alpha_m(v),
            bm: beta_m(v),
            ah: alpha_h(v),
            bh: beta_h(v),
        }
    }

    /// Each α at `mV − open`, each β at `mV − close`, per gate
    pub fn threshold_referenced(mV: f64, gates: &GateParameters) -> Self {
        let at = |reference: f64| avoid_singularity(mV - reference);
        Self {
            an: alpha_n(at(gates.n_open_mV)),
            bn: beta_n(at(gates.n_close_mV)),
            am: alpha_m(at(gates.m_open_mV)),
            bm: beta_m(at(gates.m_close_mV)),
            ah: alpha_h(at(gates.h_open_mV)),
            bh: beta_h(at(gates.h_close_mV)),
        }
    }

    /// Steady-state open fraction of n: α/(α+β)
    pub fn n_inf(&self) -> f64 {
        steady_state(self.an, self.bn)
    }

    pub fn m_inf(&self) -> f64 {
        steady_state(self.am, self.bm)
    }

    pub fn h_inf(&self) -> f64 {
        steady_state(self.ah, self.bh)
    }
}

/// α/(α+β), or 0 when both rates vanish
pub fn steady_state(alpha: f64, beta: f64) -> f64 {
    let total = alpha + beta;
    if total > 0.0 {
        alpha / total
    } else {
        0.0
    }
}
