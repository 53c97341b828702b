//! Ionic, leak and capacitive membrane currents (Eqns. 3-6, 14).
//!
//! ```text
//! hNet = h·hFrac + (1 − hFrac)
//! gK   = gK_max  · n^nExp
//! gNa  = gNa_max · m^mExp · hNet^hExp
//! iNa  = gNa·(mV − vNa)      iK = gK·(mV − vK)
//! iL   = gK_leak·(mV − vK) + gNa_leak·(mV − vNa)
//! iT   = iL + iK + iNa
//! ```
//!
//! Currents are in μA/cm² with Cm folded in, so the voltage update is
//! `mV ← mV − iT·dt`.

use serde::{Deserialize, Serialize};

use super::gating::GatingState;
use super::leak::LeakState;
use crate::config::SimulationParameters;

/// Instantaneous conductances and currents
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Currents {
    /// K+ open probability
    pub pK: f64,
    /// Na+ open probability
    pub pNa: f64,
    /// K+ conductance (mS/cm²)
    pub gK: f64,
    /// Na+ conductance (mS/cm²)
    pub gNa: f64,
    pub iNa: f64,
    pub iK: f64,
    pub iL: f64,
    /// Capacitive current, reported only
    pub iC: f64,
    /// Total ionic current before stimulus subtraction
    pub iT: f64,
}

/// Conductance model for one parameter set
#[derive(Debug, Clone, Copy)]
pub struct CurrentModel {
    gK_max: f64,
    gNa_max: f64,
    n_exp: i32,
    m_exp: i32,
    h_exp: i32,
    h_frac: f64,
    Cm: f64,
}

impl CurrentModel {
    pub fn new(params: &SimulationParameters) -> Self {
        Self {
            gK_max: params.conductances.gK_max_mS,
            gNa_max: params.conductances.gNa_max_mS,
            n_exp: params.gates.n_exp,
            m_exp: params.gates.m_exp,
            h_exp: params.gates.h_exp,
            h_frac: params.gates.h_frac,
            Cm: params.membrane.Cm_uF,
        }
    }

    /// Effective inactivation with a fraction `1 − hFrac` of channels blocked open
    #[inline]
    pub fn h_net(&self, h: f64) -> f64 {
        h * self.h_frac + (1.0 - self.h_frac)
    }

    /// Currents at voltage `mV`, with `mV_prev` the voltage one step earlier
    pub fn compute(
        &self,
        gates: &GatingState,
        leak: &LeakState,
        mV: f64,
        mV_prev: f64,
        dt: f64,
    ) -> Currents {
        let pK = gates.n.powi(self.n_exp);
        let pNa = gates.m.powi(self.m_exp) * self.h_net(gates.h).powi(self.h_exp);

        let gK = self.gK_max * pK;
        let gNa = self.gNa_max * pNa;

        let iNa = gNa * (mV - leak.vNa);
        let iK = gK * (mV - leak.vK);
        let iL = leak.gK_leak * (mV - leak.vK) + leak.gNa_leak * (mV - leak.vNa);
        let iC = -self.Cm * (mV_prev - mV) / dt;

        Currents {
            pK,
            pNa,
            gK,
            gNa,
            iNa,
            iK,
            iL,
            iC,
            iT: iL + iK + iNa,
        }
    }
}
