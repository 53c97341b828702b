//! Parameter structures for the Hodgkin-Huxley membrane.
//!
//! Defaults reproduce the squid giant axon values used by Hodgkin & Huxley,
//! expressed relative to a -60 mV resting potential.
//! Reference: Hodgkin AL, Huxley AF. J Physiol. 1952;117:500-544

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::biophysics::constants::{FARADAY, KELVIN, RGAS};
use crate::biophysics::Stimulus;
use crate::error::{Result, SimulationError};

/// Default parameter file location, relative to the working directory
pub const DEFAULT_PARAMETERS_PATH: &str = "data/parameters/simulation.json";

/// Operating mode of the engine
///
/// Only `FreeRunning` is implemented. The other variants are accepted by the
/// parser so that configuration files naming them fail with a clear error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SimulationMode {
    /// Membrane voltage evolves freely under the injected stimuli
    #[default]
    FreeRunning,
    /// Command potential drives the gates
    VoltageClamp,
    /// Markov-chain channel gating
    Markov,
}

/// Voltage input used to evaluate the α/β kinetics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RateConvention {
    /// `v = -(mV + 60)`, the 1952 equations
    #[default]
    Classic,
    /// Each α evaluated at `mV - open`, each β at `mV - close`
    ThresholdReferenced,
}

/// Top-level parameters container
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Parameters {
    /// Membrane and integration parameters
    pub simulation: SimulationParameters,
    /// Injected current pulses
    pub stimuli: Vec<Stimulus>,
}

impl Parameters {
    /// Classic configuration: default membrane plus one suprathreshold pulse
    pub fn classic() -> Self {
        Self {
            simulation: SimulationParameters::default(),
            stimuli: vec![Stimulus::new(100.0, 2.5, 0.1)],
        }
    }

    /// Load parameters from the default JSON file, or use the classic set
    pub fn load_or_default() -> Self {
        Self::load_or_default_from(DEFAULT_PARAMETERS_PATH)
    }

    /// Load from a JSON file, falling back to the classic set on any failure
    pub fn load_or_default_from<P: AsRef<Path>>(path: P) -> Self {
        match std::fs::read_to_string(path.as_ref()) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(params) => {
                    log::info!("Loaded simulation parameters from {:?}", path.as_ref());
                    params
                }
                Err(e) => {
                    log::warn!("Failed to parse simulation parameters: {}, using defaults", e);
                    Self::classic()
                }
            },
            Err(_) => {
                log::info!("Simulation parameters file not found, using defaults");
                Self::classic()
            }
        }
    }

    /// Load from a JSON file, propagating read and parse errors
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        let params: Self = serde_json::from_str(&contents)?;
        log::info!("Loaded simulation parameters from {:?}", path.as_ref());
        Ok(params)
    }

    /// Validate membrane parameters and every stimulus
    pub fn validate(&self) -> Result<()> {
        self.simulation.validate()?;
        for (i, stimulus) in self.stimuli.iter().enumerate() {
            stimulus
                .validate()
                .map_err(|e| SimulationError::InvalidConfiguration(format!("stimulus {}: {}", i, e)))?;
        }
        Ok(())
    }
}

/// Membrane electrical parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MembraneParameters {
    /// Initial (resting) membrane potential (mV)
    pub mV_init: f64,
    /// Upper display bound (mV)
    pub mV_max: f64,
    /// Lower display bound (mV)
    pub mV_min: f64,
    /// Membrane capacitance (μF/cm²)
    /// Reference: Hodgkin & Huxley 1952, ~1 μF/cm²
    pub Cm_uF: f64,
}

impl Default for MembraneParameters {
    fn default() -> Self {
        Self {
            mV_init: -60.0,
            mV_max: 60.0,
            mV_min: -90.0,
            Cm_uF: 1.0,
        }
    }
}

/// Maximal and leak conductances (mS/cm²)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConductanceParameters {
    /// Maximum K+ conductance
    /// Reference: Hodgkin & Huxley 1952, Table 3
    pub gK_max_mS: f64,
    /// Maximum Na+ conductance
    /// Reference: Hodgkin & Huxley 1952, Table 3
    pub gNa_max_mS: f64,
    /// Total leak conductance
    pub g_leak_mS: f64,
    /// Fraction of the leak carried by K+ (0-1)
    pub gK_leak_fraction: f64,
}

impl Default for ConductanceParameters {
    fn default() -> Self {
        Self {
            gK_max_mS: 36.0,
            gNa_max_mS: 120.0,
            g_leak_mS: 0.3,
            // Places the leak reversal so the membrane rests at -60 mV
            gK_leak_fraction: 0.8220557404,
        }
    }
}

/// Concentration ratios relative to the reference solution
///
/// A ratio of 1 leaves the reversal potential at its nominal value.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConcentrationParameters {
    /// External K+ change factor
    pub K_ratio: f64,
    /// External Na+ change factor
    pub Na_ratio: f64,
}

impl Default for ConcentrationParameters {
    fn default() -> Self {
        Self {
            K_ratio: 1.0,
            Na_ratio: 1.0,
        }
    }
}

/// Gate exponents and reference voltages
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GateParameters {
    /// gK = gK_max · n^n_exp (Eqn. 6)
    pub n_exp: i32,
    /// gNa = gNa_max · m^m_exp · h^h_exp (Eqn. 14)
    pub m_exp: i32,
    pub h_exp: i32,
    /// Fraction of Na+ inactivation that is functional (1 = intact)
    pub h_frac: f64,
    /// Gate opening/closing reference voltages (mV)
    pub n_open_mV: f64,
    pub n_close_mV: f64,
    pub m_open_mV: f64,
    pub m_close_mV: f64,
    pub h_open_mV: f64,
    pub h_close_mV: f64,
}

impl Default for GateParameters {
    fn default() -> Self {
        Self {
            n_exp: 4,
            m_exp: 3,
            h_exp: 1,
            h_frac: 1.0,
            n_open_mV: -50.0,
            n_close_mV: -60.0,
            m_open_mV: -35.0,
            m_close_mV: -60.0,
            h_open_mV: -60.0,
            h_close_mV: -30.0,
        }
    }
}

/// Nominal ionic equilibrium potentials (mV)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReversalParameters {
    pub EK_mV: f64,
    pub ENa_mV: f64,
}

impl Default for ReversalParameters {
    fn default() -> Self {
        Self {
            EK_mV: -72.0,
            ENa_mV: 55.0,
        }
    }
}

/// Complete parameter set for one run
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationParameters {
    pub membrane: MembraneParameters,
    pub conductances: ConductanceParameters,
    pub concentrations: ConcentrationParameters,
    pub gates: GateParameters,
    pub reversal: ReversalParameters,
    /// Temperature (°C)
    pub celsius: f64,
    /// Run length (ms)
    pub total_time_ms: f64,
    /// Integration step (ms)
    pub dt_ms: f64,
    pub mode: SimulationMode,
    pub rate_convention: RateConvention,
}

impl Default for SimulationParameters {
    fn default() -> Self {
        Self {
            membrane: MembraneParameters::default(),
            conductances: ConductanceParameters::default(),
            concentrations: ConcentrationParameters::default(),
            gates: GateParameters::default(),
            reversal: ReversalParameters::default(),
            celsius: 20.0,
            total_time_ms: 10.0,
            dt_ms: 0.01,
            mode: SimulationMode::FreeRunning,
            rate_convention: RateConvention::Classic,
        }
    }
}

impl SimulationParameters {
    /// Absolute temperature (K)
    pub fn temperature_K(&self) -> f64 {
        self.celsius + KELVIN
    }

    /// Nernst factor RT/zF (mV) for a monovalent ion
    pub fn rtzf(&self) -> f64 {
        RGAS * self.temperature_K() / FARADAY
    }

    /// Reject parameter sets that cannot drive a meaningful run
    pub fn validate(&self) -> Result<()> {
        if self.mode != SimulationMode::FreeRunning {
            return Err(SimulationError::UnsupportedMode(self.mode));
        }

        require(self.dt_ms.is_finite() && self.dt_ms > 0.0, || {
            format!("dt must be positive, got {} ms", self.dt_ms)
        })?;
        require(self.total_time_ms.is_finite() && self.total_time_ms > 0.0, || {
            format!("total time must be positive, got {} ms", self.total_time_ms)
        })?;
        require(self.membrane.Cm_uF.is_finite() && self.membrane.Cm_uF > 0.0, || {
            format!("Cm must be positive, got {} μF/cm²", self.membrane.Cm_uF)
        })?;
        require(self.membrane.mV_init.is_finite(), || {
            format!("initial voltage must be finite, got {}", self.membrane.mV_init)
        })?;
        require(self.temperature_K() > 0.0, || {
            format!("temperature below absolute zero: {} °C", self.celsius)
        })?;

        let c = &self.conductances;
        for (name, value) in [
            ("gK_max", c.gK_max_mS),
            ("gNa_max", c.gNa_max_mS),
            ("g_leak", c.g_leak_mS),
        ] {
            require(value.is_finite() && value >= 0.0, || {
                format!("{} must be non-negative, got {} mS/cm²", name, value)
            })?;
        }
        require((0.0..=1.0).contains(&c.gK_leak_fraction), || {
            format!("K leak fraction must lie in [0, 1], got {}", c.gK_leak_fraction)
        })?;

        let r = &self.concentrations;
        for (name, value) in [("K_ratio", r.K_ratio), ("Na_ratio", r.Na_ratio)] {
            require(value.is_finite() && value > 0.0, || {
                format!("{} must be positive, got {}", name, value)
            })?;
        }

        let g = &self.gates;
        for (name, value) in [("n_exp", g.n_exp), ("m_exp", g.m_exp), ("h_exp", g.h_exp)] {
            require(value >= 0, || {
                format!("{} must be non-negative, got {}", name, value)
            })?;
        }

        require((0.0..=1.0).contains(&self.gates.h_frac), || {
            format!("h_frac must lie in [0, 1], got {}", self.gates.h_frac)
        })?;

        Ok(())
    }
}

fn require<F: FnOnce() -> String>(condition: bool, message: F) -> Result<()> {
    if condition {
        Ok(())
    } else {
        Err(SimulationError::InvalidConfiguration(message()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_parameters() {
        let params = SimulationParameters::default();
        assert!((params.conductances.gK_max_mS - 36.0).abs() < 1e-12);
        assert!((params.conductances.gNa_max_mS - 120.0).abs() < 1e-12);
        assert!((params.membrane.mV_init + 60.0).abs() < 1e-12);
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_rtzf_at_20_celsius() {
        let params = SimulationParameters::default();
        // 8.3143 * 293.15 / 96.487 ≈ 25.26 mV
        assert!((params.rtzf() - 25.261).abs() < 0.01);
    }

    #[test]
    fn test_rejects_non_positive_dt() {
        let mut params = SimulationParameters::default();
        params.dt_ms = 0.0;
        assert!(matches!(
            params.validate(),
            Err(SimulationError::InvalidConfiguration(_))
        ));

        params.dt_ms = -0.01;
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_rejects_non_positive_total_time() {
        let mut params = SimulationParameters::default();
        params.total_time_ms = 0.0;
        assert!(matches!(
            params.validate(),
            Err(SimulationError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_rejects_unimplemented_modes() {
        for mode in [SimulationMode::VoltageClamp, SimulationMode::Markov] {
            let params = SimulationParameters {
                mode,
                ..Default::default()
            };
            match params.validate() {
                Err(SimulationError::UnsupportedMode(m)) => assert_eq!(m, mode),
                other => panic!("expected unsupported mode, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_rejects_bad_fractions() {
        let mut params = SimulationParameters::default();
        params.gates.h_frac = 1.5;
        assert!(params.validate().is_err());

        let mut params = SimulationParameters::default();
        params.conductances.gK_leak_fraction = -0.1;
        assert!(params.validate().is_err());

        let mut params = SimulationParameters::default();
        params.gates.n_exp = -4;
        assert!(matches!(
            params.validate(),
            Err(SimulationError::InvalidConfiguration(_))
        ));

        let mut params = SimulationParameters::default();
        params.gates.h_exp = 0;
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_serialization() {
        let params = Parameters::classic();
        let json = serde_json::to_string_pretty(&params).unwrap();
        let parsed: Parameters = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.stimuli.len(), 1);
        assert!((parsed.simulation.dt_ms - params.simulation.dt_ms).abs() < 1e-15);
        assert_eq!(parsed.simulation.rate_convention, RateConvention::Classic);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let json = r#"{ "simulation": { "total_time_ms": 25.0, "mode": "free_running" } }"#;
        let parsed: Parameters = serde_json::from_str(json).unwrap();
        assert!((parsed.simulation.total_time_ms - 25.0).abs() < 1e-12);
        assert!((parsed.simulation.dt_ms - 0.01).abs() < 1e-15);
        assert!(parsed.stimuli.is_empty());
    }

    #[test]
    fn test_missing_file_falls_back_to_classic() {
        let params = Parameters::load_or_default_from("does/not/exist.json");
        assert_eq!(params.stimuli.len(), 1);
    }
}
