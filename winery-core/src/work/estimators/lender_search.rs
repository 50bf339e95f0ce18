//! Lender search estimator (spec.md §4.2 row "Lender search").
//!
//! Exception (spec.md §4.6 step 5): a QuickLoan-only search is free;
//! exclusive-QuickLoan selection short-circuits the whole estimate to 0.

use crate::entities::SearchOptions;
use crate::params::{GameParameters, LenderType};
use crate::work::cost::{calculate_total_work, WorkCostInputs};
use crate::work::estimators::Estimate;
use crate::work::factor::WorkFactor;
use crate::work::search::{piecewise_exponential_intensity, Constraint};

use crate::activity::WorkCategory;

pub fn calculate_lender_search_work(
    options: &SearchOptions,
    selected_lender_types: &[LenderType],
    params: &GameParameters,
) -> Estimate {
    let exclusive_quick_loan =
        options.quick_loan_only || (selected_lender_types == [LenderType::QuickLoan]);
    if exclusive_quick_loan {
        return Estimate::new(0, vec![WorkFactor::modifier("QuickLoan-only (free)", 0.0)]);
    }

    let offers = options.number_of_offers.unwrap_or(3) as f64;
    let offers_intensity = piecewise_exponential_intensity((offers - 3.0) / 3.0);

    let selectivity = selected_lender_types
        .iter()
        .map(|lt| params.lender_type_selectivity.get(lt).copied().unwrap_or(1.0))
        .fold(0.0, f64::max);

    let constraints = vec![
        Constraint::new(1.2, offers_intensity),
        Constraint::new(selectivity.clamp(1.1, 1.8), 1.0),
    ];
    let multiplier = crate::work::search::combine_constraints(&constraints);
    let modifier = multiplier - 1.0;

    let inputs = WorkCostInputs {
        amount: 1.0,
        rate: params.rate(WorkCategory::LenderSearch),
        initial_work: params.initial(WorkCategory::LenderSearch),
        modifiers: vec![modifier],
        ..Default::default()
    };

    let total_work = calculate_total_work(&inputs);

    let factors = vec![
        WorkFactor::primary("Offers requested", offers, "offers"),
        WorkFactor::modifier("Lender-type selectivity", selectivity),
        WorkFactor::modifier("Combined", modifier),
    ];

    Estimate::new(total_work, factors)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quick_loan_only_is_free() {
        let params = GameParameters::default();
        let mut options = SearchOptions::default();
        options.quick_loan_only = true;
        let estimate = calculate_lender_search_work(&options, &[LenderType::QuickLoan], &params);
        assert_eq!(estimate.total_work, 0);
    }

    #[test]
    fn non_quick_loan_search_costs_work() {
        let params = GameParameters::default();
        let options = SearchOptions::default();
        let estimate = calculate_lender_search_work(&options, &[LenderType::Bank], &params);
        assert!(estimate.total_work > 0);
    }
}
