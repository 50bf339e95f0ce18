//! Fermentation setup estimator (spec.md §4.2 row "Fermentation setup").

use crate::params::GameParameters;
use crate::work::cost::{calculate_total_work, WorkCostInputs};
use crate::work::estimators::Estimate;
use crate::work::factor::WorkFactor;

use crate::activity::WorkCategory;

pub fn calculate_fermentation_work(
    batch_tons: f64,
    method_work_multiplier: f64,
    params: &GameParameters,
) -> Estimate {
    let method_modifier = method_work_multiplier - 1.0;

    let inputs = WorkCostInputs {
        amount: batch_tons,
        rate: params.rate(WorkCategory::Fermentation),
        initial_work: params.initial(WorkCategory::Fermentation),
        modifiers: vec![method_modifier],
        ..Default::default()
    };

    let total_work = calculate_total_work(&inputs);

    let factors = vec![
        WorkFactor::primary("Batch quantity", batch_tons, "t"),
        WorkFactor::modifier("Method", method_modifier),
    ];

    Estimate::new(total_work, factors)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn harsher_method_costs_more_work() {
        let params = GameParameters::default();
        let gentle = calculate_fermentation_work(3.0, 1.0, &params);
        let intense = calculate_fermentation_work(3.0, 1.4, &params);
        assert!(intense.total_work > gentle.total_work);
    }
}
