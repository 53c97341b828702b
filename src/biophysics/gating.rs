//! Gating variables n, m, h.
//!
//! Each gate follows first-order kinetics (Eqns. 7, 15, 16):
//!
//! ```text
//! dx/dt = α_x·(1 − x) − β_x·x
//! ```
//!
//! integrated with forward Euler and clamped to [0, 1] after every update.
//! At large dt the unclamped update can overshoot; the clamp pulls it back.

use serde::{Deserialize, Serialize};

use super::rates::GateRates;

/// Open fractions of the three HH gates
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct GatingState {
    /// K+ activation
    pub n: f64,
    /// Na+ activation
    pub m: f64,
    /// Na+ inactivation
    pub h: f64,
}

impl GatingState {
    /// All gates closed
    pub const CLOSED: Self = Self {
        n: 0.0,
        m: 0.0,
        h: 0.0,
    };

    /// Steady state x = α/(α+β) for every gate
    pub fn steady_state(rates: &GateRates) -> Self {
        Self {
            n: rates.n_inf(),
            m: rates.m_inf(),
            h: rates.h_inf(),
        }
    }

    /// Time derivatives (1/ms) at the given rates
    pub fn derivatives(&self, rates: &GateRates) -> (f64, f64, f64) {
        (
            rates.an * (1.0 - self.n) - rates.bn * self.n,
            rates.am * (1.0 - self.m) - rates.bm * self.m,
            rates.ah * (1.0 - self.h) - rates.bh * self.h,
        )
    }

    /// Advance one explicit Euler step of `dt` ms
    pub fn integrate(&self, rates: &GateRates, dt: f64) -> Self {
        let (dn, dm, dh) = self.derivatives(rates);
        Self {
            n: (self.n + dn * dt).clamp(0.0, 1.0),
            m: (self.m + dm * dt).clamp(0.0, 1.0),
            h: (self.h + dh * dt).clamp(0.0, 1.0),
        }
    }

    /// First gate holding a NaN or infinite value
    pub fn first_non_finite(&self) -> Option<(&'static str, f64)> {
        [("n", self.n), ("m", self.m), ("h", self.h)]
            .into_iter()
            .find(|(_, value)| !value.is_finite())
    }

    pub fn is_within_bounds(&self) -> bool {
        [self.n, self.m, self.h]
            .iter()
            .all(|x| (0.0..=1.0).contains(x))
    }
}
