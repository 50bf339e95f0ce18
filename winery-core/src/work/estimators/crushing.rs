//! Crushing estimator (spec.md §4.2 row "Crushing").

use crate::params::GameParameters;
use crate::work::cost::{calculate_total_work, WorkCostInputs};
use crate::work::estimators::Estimate;
use crate::work::factor::WorkFactor;

use crate::activity::WorkCategory;

pub fn calculate_crushing_work(
    batch_tons: f64,
    method_work_multiplier: f64,
    destemming: bool,
    cold_soak: bool,
    params: &GameParameters,
) -> Estimate {
    let method_modifier = method_work_multiplier - 1.0;
    let mut modifiers = vec![method_modifier];
    if destemming {
        modifiers.push(0.20);
    }
    if cold_soak {
        modifiers.push(0.15);
    }

    let inputs = WorkCostInputs {
        amount: batch_tons,
        rate: params.rate(WorkCategory::Crushing),
        initial_work: params.initial(WorkCategory::Crushing),
        modifiers: modifiers.clone(),
        ..Default::default()
    };

    let total_work = calculate_total_work(&inputs);

    let factors = vec![
        WorkFactor::primary("Batch quantity", batch_tons, "t"),
        WorkFactor::modifier("Method", method_modifier),
        WorkFactor::modifier("Destemming", if destemming { 0.20 } else { 0.0 }),
        WorkFactor::modifier("Cold soak", if cold_soak { 0.15 } else { 0.0 }),
    ];

    Estimate::new(total_work, factors)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crushing_modifiers_match_worked_example() {
        // spec.md §8 scenario 2: 2000kg = 2.0t, hand press (multiplier 1.0
        // -> modifier 0), destemming + cold soak on.
        let params = GameParameters::default();
        let estimate = calculate_crushing_work(2.0, 1.0, true, true, &params);
        assert_eq!(estimate.total_work, 66);
    }

    #[test]
    fn no_options_is_cheaper() {
        let params = GameParameters::default();
        let plain = calculate_crushing_work(2.0, 1.0, false, false, &params);
        let with_options = calculate_crushing_work(2.0, 1.0, true, true, &params);
        assert!(with_options.total_work > plain.total_work);
    }
}
