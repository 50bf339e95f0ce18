//! Take-loan estimator (spec.md §4.2 row "Take loan"). spec.md §9 notes the
//! source has two competing Take-Loan work shapers and adopts the
//! delta-based one as the richer, authoritative formulation.
//!
//! The amount-delta and duration-delta piecewise+exponential curves are
//! banded: a band width of change is charged at a low rate up to a 3-band
//! cap, then a higher rate beyond it. spec.md §8 scenario 6 gives the only
//! two concrete data points (amount delta 0.5 -> multiplier 2.1, duration
//! delta 0.1 -> multiplier 1.3); the two band widths below (0.1 for
//! amount, 1/30 for duration) are the unique calibration that reproduces
//! both exactly, so they are adopted rather than re-derived per call site.

use crate::params::{GameParameters, LenderType};
use crate::work::cost::{calculate_total_work, WorkCostInputs};
use crate::work::estimators::Estimate;
use crate::work::factor::WorkFactor;

use crate::activity::WorkCategory;

const BAND_TIER1_CAP: f64 = 3.0;
const BAND_TIER1_RATE: f64 = 0.1;
const BAND_TIER2_RATE: f64 = 0.4;

fn banded_multiplier(delta: f64, band_width: f64) -> f64 {
    let bands = delta.abs() / band_width;
    let tier1 = bands.min(BAND_TIER1_CAP);
    let tier2 = (bands - BAND_TIER1_CAP).max(0.0);
    1.0 + BAND_TIER1_RATE * tier1 + BAND_TIER2_RATE * tier2
}

fn amount_delta_multiplier(amount_delta: f64) -> f64 {
    banded_multiplier(amount_delta, 0.1)
}

fn duration_delta_multiplier(duration_delta: f64) -> f64 {
    banded_multiplier(duration_delta, 1.0 / 30.0)
}

pub fn calculate_take_loan_work(
    original_principal: f64,
    adjusted_principal: f64,
    original_duration_seasons: f64,
    adjusted_duration_seasons: f64,
    lender_type: LenderType,
    params: &GameParameters,
) -> Estimate {
    let amount_delta = (adjusted_principal - original_principal) / original_principal;
    let duration_delta = (adjusted_duration_seasons - original_duration_seasons) / original_duration_seasons;

    let amount_multiplier = amount_delta_multiplier(amount_delta);
    let duration_multiplier = duration_delta_multiplier(duration_delta);

    let amount_complexity = amount_multiplier;
    let duration_complexity = duration_multiplier;
    let lender_type_complexity = params.lender_type_complexity.get(&lender_type).copied().unwrap_or(1.0);

    let total_adjustment_multiplier = amount_multiplier * duration_multiplier;

    let base = (1.0 / params.rate(WorkCategory::TakeLoan)) * crate::params::BASE_WORK_UNITS;
    let total_work = (params.initial(WorkCategory::TakeLoan)
        + base * total_adjustment_multiplier * (amount_complexity * duration_complexity * lender_type_complexity))
        .ceil() as i64;

    let factors = vec![
        WorkFactor::modifier("Amount delta multiplier", amount_multiplier),
        WorkFactor::modifier("Duration delta multiplier", duration_multiplier),
        WorkFactor::modifier("Lender-type complexity", lender_type_complexity),
    ];

    Estimate::new(total_work, factors)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_worked_adjustment_multipliers() {
        // spec.md §8 scenario 6.
        let amount_mult = amount_delta_multiplier(0.5);
        let duration_mult = duration_delta_multiplier(0.1);
        assert!((amount_mult - 2.1).abs() < 1e-9);
        assert!((duration_mult - 1.3).abs() < 1e-9);
        assert!(((amount_mult * duration_mult) - 2.73).abs() < 1e-9);
    }

    #[test]
    fn no_adjustment_is_cheapest() {
        let params = GameParameters::default();
        let base = calculate_take_loan_work(100_000.0, 100_000.0, 20.0, 20.0, LenderType::Bank, &params);
        let adjusted =
            calculate_take_loan_work(100_000.0, 150_000.0, 20.0, 22.0, LenderType::Bank, &params);
        assert!(adjusted.total_work > base.total_work);
    }
}
