//! Integration tests for rate kinetics, leak and reversal potentials
//!
//! Tests validate:
//! - Published resting values of the α/β rates
//! - Finite rates across the physiological voltage range, singular points included
//! - Nernst potentials from the reference ion table
//! - Leak split and conductance-weighted reversal

use hh_simulator::{
    biophysics::rates::{alpha_h, alpha_m, alpha_n, beta_h, beta_m, beta_n, classic_input},
    nernst_potential, GateRates, IonTable, LeakState, RateConvention, SimulationParameters,
};

#[test]
fn test_resting_steady_state_matches_reference() {
    // Steady state at -60 mV rest (Hodgkin & Huxley 1952, Table 2 at V = 0)
    let rates = GateRates::classic(-60.0);
    assert!((rates.n_inf() - 0.3177).abs() < 1e-3, "n∞ = {}", rates.n_inf());
    assert!((rates.m_inf() - 0.0529).abs() < 1e-3, "m∞ = {}", rates.m_inf());
    assert!((rates.h_inf() - 0.5961).abs() < 1e-3, "h∞ = {}", rates.h_inf());
}

#[test]
fn test_rates_finite_over_voltage_sweep() {
    let mut mV = -120.0;
    while mV <= 80.0 {
        let r = GateRates::classic(mV);
        for (name, rate) in [
            ("an", r.an),
            ("bn", r.bn),
            ("am", r.am),
            ("bm", r.bm),
            ("ah", r.ah),
            ("bh", r.bh),
        ] {
            assert!(
                rate.is_finite() && rate >= 0.0,
                "{} = {} at {} mV",
                name, rate, mV
            );
        }
        mV += 0.5;
    }
}

#[test]
fn test_singular_points_of_classic_input() {
    // -50 mV maps onto the α_n singularity, -35 mV onto α_m's
    let v_n = classic_input(-50.0);
    let v_m = classic_input(-35.0);
    assert!(v_n != -10.0 && (v_n + 10.0).abs() < 1e-4);
    assert!(v_m != -25.0 && (v_m + 25.0).abs() < 1e-4);
    assert!((alpha_n(v_n) - 0.1).abs() < 1e-6);
    assert!((alpha_m(v_m) - 1.0).abs() < 1e-6);
}

#[test]
fn test_rate_monotonicity() {
    // Larger v is hyperpolarization in the classic convention
    assert!(alpha_n(-20.0) > alpha_n(0.0));
    assert!(alpha_m(-40.0) > alpha_m(0.0));
    assert!(beta_n(10.0) > beta_n(0.0));
    assert!(beta_m(10.0) > beta_m(0.0));
    assert!(alpha_h(10.0) > alpha_h(0.0));
    assert!(beta_h(-40.0) > beta_h(0.0));
}

#[test]
fn test_conventions_are_selected_explicitly() {
    let params = SimulationParameters::default();
    let classic = GateRates::evaluate(-60.0, RateConvention::Classic, &params.gates);
    assert_eq!(classic, GateRates::classic(-60.0));

    let referenced = GateRates::evaluate(-60.0, RateConvention::ThresholdReferenced, &params.gates);
    assert_eq!(referenced, GateRates::threshold_referenced(-60.0, &params.gates));
    assert_ne!(classic, referenced);
}

#[test]
fn test_nernst_potentials_of_reference_table() {
    let params = SimulationParameters::default();
    let table = IonTable::default();

    let e_k = nernst_potential(&table.potassium, params.rtzf());
    let e_na = nernst_potential(&table.sodium, params.rtzf());

    assert!(e_k < -80.0 && e_k > -90.0, "E_K = {} mV", e_k);
    assert!(e_na > 50.0 && e_na < 60.0, "E_Na = {} mV", e_na);
}

#[test]
fn test_warmer_membrane_has_larger_nernst_factor() {
    let cold = SimulationParameters::default();
    let warm = SimulationParameters {
        celsius: 37.0,
        ..Default::default()
    };
    assert!(warm.rtzf() > cold.rtzf());

    let table = IonTable::default();
    assert!(nernst_potential(&table.potassium, warm.rtzf()) < nernst_potential(&table.potassium, cold.rtzf()));
}

#[test]
fn test_leak_reversal_near_rest() {
    let params = SimulationParameters::default();
    let leak = LeakState::calc_leak(&params);

    // Weighted reversal sits between vK and vNa, depolarized from rest
    assert!((leak.vLeak + 49.4).abs() < 0.1, "vLeak = {} mV", leak.vLeak);
    assert!((leak.gK_leak + leak.gNa_leak - params.conductances.g_leak_mS).abs() < 1e-12);
}

#[test]
fn test_sodium_ratio_shifts_only_vna() {
    let mut params = SimulationParameters::default();
    params.concentrations.Na_ratio = 0.5;
    let leak = LeakState::calc_leak(&params);
    assert_eq!(leak.vK, -72.0);
    assert!(leak.vNa < 55.0);
}
