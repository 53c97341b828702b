//! Physico-chemical constants and reference ion concentrations.
//!
//! Units are chosen so that RT/zF comes out directly in mV.

use serde::{Deserialize, Serialize};

/// Faraday constant (C/mmol)
pub const FARADAY: f64 = 96.487;
/// Gas constant (J/(K·mol))
pub const RGAS: f64 = 8.3143;
/// 0 °C in kelvin
pub const KELVIN: f64 = 273.15;

/// Concentrations and charge of one ion species
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IonSpecies {
    /// Intracellular concentration (mM)
    pub inside_mM: f64,
    /// Extracellular concentration (mM)
    pub outside_mM: f64,
    /// Charge number
    pub valence: i32,
}

impl IonSpecies {
    pub const fn new(inside_mM: f64, outside_mM: f64, valence: i32) -> Self {
        Self {
            inside_mM,
            outside_mM,
            valence,
        }
    }
}

/// Reference ion table for the squid axon
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IonTable {
    pub potassium: IonSpecies,
    pub sodium: IonSpecies,
}

impl IonTable {
    /// Look up a species by its chemical symbol
    pub fn get(&self, symbol: &str) -> Option<&IonSpecies> {
        match symbol {
            "K" => Some(&self.potassium),
            "Na" => Some(&self.sodium),
            _ => None,
        }
    }
}

impl Default for IonTable {
    fn default() -> Self {
        Self {
            potassium: IonSpecies::new(140.0, 5.0, 1),
            sodium: IonSpecies::new(15.0, 145.0, 1),
        }
    }
}

/// Nernst potential (mV) of a species
///
/// E = (RT/F) · ln(out/in) / z, with `rtzf` the monovalent factor RT/F in mV.
pub fn nernst_potential(ion: &IonSpecies, rtzf: f64) -> f64 {
    rtzf * (ion.outside_mM / ion.inside_mM).ln() / ion.valence as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    const RTZF_20C: f64 = RGAS * (20.0 + KELVIN) / FARADAY;

    #[test]
    fn test_potassium_reversal_is_negative() {
        let table = IonTable::default();
        let e_k = nernst_potential(&table.potassium, RTZF_20C);
        // 25.26 · ln(5/140) ≈ -84.2 mV
        assert!((e_k + 84.17).abs() < 0.1, "E_K = {}", e_k);
    }

    #[test]
    fn test_sodium_reversal_is_positive() {
        let table = IonTable::default();
        let e_na = nernst_potential(&table.sodium, RTZF_20C);
        assert!(e_na > 50.0 && e_na < 60.0, "E_Na = {}", e_na);
    }

    #[test]
    fn test_valence_scales_potential() {
        let mono = IonSpecies::new(0.1, 1.0, 1);
        let di = IonSpecies::new(0.1, 1.0, 2);
        let ratio = nernst_potential(&mono, RTZF_20C) / nernst_potential(&di, RTZF_20C);
        assert!((ratio - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_equal_concentrations_give_zero() {
        let ion = IonSpecies::new(10.0, 10.0, 1);
        assert_eq!(nernst_potential(&ion, RTZF_20C), 0.0);
    }

    #[test]
    fn test_lookup_by_symbol() {
        let table = IonTable::default();
        assert_eq!(table.get("K").map(|i| i.inside_mM), Some(140.0));
        assert_eq!(table.get("Na").map(|i| i.outside_mM), Some(145.0));
        assert!(table.get("Ca").is_none());
    }
}
