//! Land search estimator (spec.md §4.2 row "Land search"). Uses the
//! average-then-power constraint combination from spec.md §4.6.

use crate::params::GameParameters;
use crate::work::cost::{calculate_total_work, WorkCostInputs};
use crate::work::estimators::Estimate;
use crate::work::factor::WorkFactor;
use crate::work::search::{combine_constraints, Constraint};

use crate::activity::WorkCategory;

pub fn calculate_land_search_work(constraints: &[Constraint], params: &GameParameters) -> Estimate {
    let multiplier = combine_constraints(constraints);
    let modifier = multiplier - 1.0;

    let inputs = WorkCostInputs {
        amount: 1.0,
        rate: params.rate(WorkCategory::LandSearch),
        initial_work: params.initial(WorkCategory::LandSearch),
        modifiers: vec![modifier],
        ..Default::default()
    };

    let total_work = calculate_total_work(&inputs);

    let factors = vec![WorkFactor::modifier(
        format!("{} active constraints", constraints.len()),
        modifier,
    )];

    Estimate::new(total_work, factors)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_constraints_is_cheapest() {
        let params = GameParameters::default();
        let none = calculate_land_search_work(&[], &params);
        let some = calculate_land_search_work(&[Constraint::new(1.5, 2.0)], &params);
        assert!(some.total_work >= none.total_work);
    }
}
