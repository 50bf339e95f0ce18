//! Hiring estimator (spec.md §4.2 row "Hiring").

use crate::params::GameParameters;
use crate::work::cost::{calculate_total_work, WorkCostInputs};
use crate::work::estimators::Estimate;
use crate::work::factor::WorkFactor;

use crate::activity::WorkCategory;

pub fn calculate_hiring_work(
    candidate_skill: f64,
    specialization_count: u32,
    wage: f64,
    params: &GameParameters,
) -> Estimate {
    let skill_modifier = candidate_skill.powi(2);
    let specialization_modifier = 1.5_f64.powi(specialization_count as i32) - 1.0;
    let wage_modifier = (wage / 1000.0).powi(2) - 1.0;

    let inputs = WorkCostInputs {
        amount: 1.0,
        rate: params.rate(WorkCategory::Hiring),
        initial_work: params.initial(WorkCategory::Hiring),
        modifiers: vec![skill_modifier, specialization_modifier, wage_modifier],
        ..Default::default()
    };

    let total_work = calculate_total_work(&inputs);

    let factors = vec![
        WorkFactor::modifier("Candidate skill²", skill_modifier),
        WorkFactor::modifier("Specialization", specialization_modifier),
        WorkFactor::modifier("Wage", wage_modifier),
    ];

    Estimate::new(total_work, factors)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn higher_wage_increases_work_above_1000() {
        let params = GameParameters::default();
        let cheap = calculate_hiring_work(0.5, 0, 500.0, &params);
        let expensive = calculate_hiring_work(0.5, 0, 2000.0, &params);
        assert!(expensive.total_work > cheap.total_work);
    }
}
