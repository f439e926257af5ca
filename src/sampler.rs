/*! Drawing arrival instants from a window's expectation table.

A unit-rate Poisson process on `[0, μ(L)]` is generated by summing
exponential interarrival increments; mapping each point of it through
τ = μ⁻¹ yields an inhomogeneous Poisson process on `[0, L]` whose mean
measure is μ. The method needs no thinning and no density bound; its
only approximation error is the interpolation in the table itself.
*/

use rand::{Rng, RngCore};

use crate::expectation::ExpectationTable;
use crate::time::Instant;

/// Lower bound of the uniform draw. Excluding 0 at the draw site keeps
/// the exponential increment finite; there is no draw that needs to be
/// caught after the fact.
pub const MIN_UNIFORM: f64 = 1e-10;

/// Draw one window's worth of arrival offsets.
///
/// The returned offsets are non-decreasing and lie within
/// `[0, window_length]`; their count is itself random with expected
/// value [ExpectationTable::total_expected]. An empty result is a
/// legitimate outcome of a window whose expected count is small (or
/// zero), not an error.
pub fn draw_arrivals(table: &ExpectationTable, rng: &mut dyn RngCore) -> Vec<Instant> {
    let budget = table.total_expected();
    let mut unit_clock = 0.0;
    let mut arrivals = Vec::new();

    loop {
        let u = rng.random_range(MIN_UNIFORM..1.0);
        let increment = -(1.0 - u).ln();
        if unit_clock + increment > budget {
            return arrivals;
        }
        unit_clock += increment;
        arrivals.push(table.arrival_time(unit_clock));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expectation::ExpectationTable;
    use crate::intensity::Constant;
    use assert_approx_eq::assert_approx_eq;
    use itertools::Itertools;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn constant_table(rate: f64, length: f64, samples: usize) -> ExpectationTable {
        let mut rng = StdRng::seed_from_u64(7);
        ExpectationTable::build(&Constant { rate }, length, samples, &mut rng).unwrap()
    }

    #[test]
    fn arrivals_are_increasing_and_bounded() {
        let table = constant_table(0.02, 1000.0, 64);
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..100 {
            let arrivals = draw_arrivals(&table, &mut rng);
            assert!(arrivals.iter().tuple_windows().all(|(a, b)| a < b));
            assert!(arrivals.iter().all(|&t| (0.0..=1000.0).contains(&t)));
        }
    }

    #[test]
    fn zero_intensity_yields_no_arrivals() {
        let table = constant_table(0.0, 1000.0, 64);
        let mut rng = StdRng::seed_from_u64(1);
        assert!(draw_arrivals(&table, &mut rng).is_empty());
    }

    #[test]
    fn sample_mean_matches_expected_count() {
        // constant rate chosen so the window expects exactly 5 events
        let table = constant_table(0.005, 1000.0, 64);
        assert_approx_eq!(table.total_expected(), 5.0, 1e-9);

        let mut rng = StdRng::seed_from_u64(1234);
        let trials = 10_000;
        let total: usize = (0..trials)
            .map(|_| draw_arrivals(&table, &mut rng).len())
            .sum();
        let mean = total as f64 / trials as f64;
        assert!((mean - 5.0).abs() < 0.2, "sample mean {} too far off", mean);
    }
}
