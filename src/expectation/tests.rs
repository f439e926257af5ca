use assert_approx_eq::assert_approx_eq;
use rand::rngs::StdRng;
use rand::SeedableRng;

use super::quadrature::{linspace, simpson};
use super::{ExpectationTable, SampledCurve, TableError};
use crate::intensity::{Constant, IntensityModel};
use crate::time::Instant;
use rand::RngCore;

#[test]
fn simpson_is_exact_for_low_order_polynomials() {
    let xs = linspace(10.0, 11);
    let constant: Vec<f64> = xs.iter().map(|_| 3.0).collect();
    assert_approx_eq!(simpson(&xs, &constant), 30.0, 1e-12);

    let linear: Vec<f64> = xs.iter().map(|&x| 2.0 * x).collect();
    assert_approx_eq!(simpson(&xs, &linear), 100.0, 1e-12);

    let cubic: Vec<f64> = xs.iter().map(|&x| x * x * x).collect();
    assert_approx_eq!(simpson(&xs, &cubic), 2500.0, 1e-9);
}

#[test]
fn simpson_handles_an_odd_interval_count() {
    // 3 intervals: Simpson over the first two, trapezoid on the last
    let xs = linspace(3.0, 4);
    let ys: Vec<f64> = xs.iter().map(|&x| x).collect();
    assert_approx_eq!(simpson(&xs, &ys), 4.5, 1e-12);
}

#[test]
fn simpson_approximates_a_smooth_integrand() {
    let xs = linspace(std::f64::consts::PI, 101);
    let ys: Vec<f64> = xs.iter().map(|&x| x.sin()).collect();
    assert_approx_eq!(simpson(&xs, &ys), 2.0, 1e-6);
}

#[test]
fn curve_interpolates_and_clamps() {
    let curve = SampledCurve::new(vec![0.0, 1.0, 2.0], vec![0.0, 10.0, 40.0]);
    assert_eq!(curve.eval(0.5), 5.0);
    assert_eq!(curve.eval(1.5), 25.0);
    assert_eq!(curve.eval(1.0), 10.0);
    // outside the sampled domain the boundary value holds
    assert_eq!(curve.eval(-1.0), 0.0);
    assert_eq!(curve.eval(5.0), 40.0);
}

#[test]
fn curve_tolerates_plateaus() {
    // repeated x support, as a flat μ segment produces when inverted
    let curve = SampledCurve::new(vec![0.0, 1.0, 1.0, 2.0], vec![0.0, 5.0, 6.0, 7.0]);
    let v = curve.eval(1.0);
    assert!((5.0..=6.0).contains(&v));
    assert_eq!(curve.eval(1.5), 6.5);
}

struct Ramp;

impl IntensityModel for Ramp {
    fn rate(&self, t: Instant, _rng: &mut dyn RngCore) -> f64 {
        0.002 * t
    }
}

#[test]
fn table_of_a_constant_rate_is_linear() {
    let mut rng = StdRng::seed_from_u64(11);
    let table = ExpectationTable::build(&Constant { rate: 0.01 }, 1000.0, 101, &mut rng).unwrap();

    assert_eq!(table.expected_events(0.0), 0.0);
    assert_approx_eq!(table.total_expected(), 10.0, 1e-9);
    assert_approx_eq!(table.expected_events(500.0), 5.0, 1e-6);
    assert_approx_eq!(table.arrival_time(5.0), 500.0, 1e-3);
    assert_approx_eq!(table.rate_at(123.0), 0.01, 1e-12);
    assert_eq!(table.window_length(), 1000.0);
}

#[test]
fn cumulative_table_is_monotone() {
    let mut rng = StdRng::seed_from_u64(12);
    let table = ExpectationTable::build(&Ramp, 1000.0, 101, &mut rng).unwrap();
    let mut previous = -1.0;
    for i in 0..=100 {
        let mu = table.expected_events(i as f64 * 10.0);
        assert!(mu >= previous);
        previous = mu;
    }
    // ∫ 0.002 t dt over [0, 1000] = 1000
    assert_approx_eq!(table.total_expected(), 1000.0, 1e-6);
}

#[test]
fn inverse_round_trips_within_grid_resolution() {
    let mut rng = StdRng::seed_from_u64(13);
    let table = ExpectationTable::build(&Ramp, 1000.0, 101, &mut rng).unwrap();
    for i in 1..100 {
        let t = i as f64 * 10.0;
        let round_trip = table.arrival_time(table.expected_events(t));
        assert!(
            (round_trip - t).abs() <= 10.0,
            "τ(μ({})) came back as {}",
            t,
            round_trip
        );
    }
}

#[test]
fn non_positive_window_is_rejected() {
    let mut rng = StdRng::seed_from_u64(14);
    let zero = ExpectationTable::build(&Ramp, 0.0, 101, &mut rng);
    assert_eq!(zero.unwrap_err(), TableError::InvalidWindowLength(0.0));
    let negative = ExpectationTable::build(&Ramp, -5.0, 101, &mut rng);
    assert_eq!(negative.unwrap_err(), TableError::InvalidWindowLength(-5.0));
    let non_finite = ExpectationTable::build(&Ramp, f64::NAN, 101, &mut rng);
    assert!(matches!(
        non_finite.unwrap_err(),
        TableError::InvalidWindowLength(_)
    ));
}

#[test]
fn too_few_samples_are_rejected() {
    let mut rng = StdRng::seed_from_u64(15);
    let err = ExpectationTable::build(&Ramp, 1000.0, 1, &mut rng).unwrap_err();
    assert_eq!(err, TableError::InsufficientSamples(1));
}

#[test]
fn non_finite_intensity_is_a_degenerate_table() {
    struct Blowup;
    impl IntensityModel for Blowup {
        fn rate(&self, _t: Instant, _rng: &mut dyn RngCore) -> f64 {
            f64::INFINITY
        }
    }
    let mut rng = StdRng::seed_from_u64(16);
    let err = ExpectationTable::build(&Blowup, 1000.0, 11, &mut rng).unwrap_err();
    assert!(matches!(err, TableError::DegenerateExpectation(_)));
}

#[test]
fn zero_rate_builds_an_empty_budget() {
    let mut rng = StdRng::seed_from_u64(17);
    let table = ExpectationTable::build(&Constant { rate: 0.0 }, 1000.0, 11, &mut rng).unwrap();
    assert_eq!(table.total_expected(), 0.0);
    assert_eq!(table.expected_events(1000.0), 0.0);
}
