//! Staff search estimator (spec.md §4.2 row "Staff search"). The
//! non-deterministic candidate generation itself happens in the completion
//! handler via the injectable RNG; this estimator only prices the search.

use crate::params::GameParameters;
use crate::work::cost::{calculate_total_work, WorkCostInputs};
use crate::work::estimators::Estimate;
use crate::work::factor::WorkFactor;

use crate::activity::WorkCategory;

pub fn calculate_staff_search_work(
    candidate_count: u32,
    desired_skill_level: f64,
    specialization_count: u32,
    params: &GameParameters,
) -> Estimate {
    let skill_bonus = if desired_skill_level > 0.5 {
        (desired_skill_level - 0.5) * 0.4
    } else {
        0.0
    };
    let specialization_modifier = 1.3_f64.powi(specialization_count as i32) - 1.0;

    let inputs = WorkCostInputs {
        amount: candidate_count as f64,
        rate: params.rate(WorkCategory::StaffSearch),
        initial_work: params.initial(WorkCategory::StaffSearch),
        modifiers: vec![skill_bonus, specialization_modifier],
        ..Default::default()
    };

    let total_work = calculate_total_work(&inputs);

    let factors = vec![
        WorkFactor::primary("Candidates requested", candidate_count as f64, "candidates"),
        WorkFactor::modifier("Skill-level bonus", skill_bonus),
        WorkFactor::modifier("Specialization requirement", specialization_modifier),
    ];

    Estimate::new(total_work, factors)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn low_skill_requirement_has_no_bonus() {
        let params = GameParameters::default();
        let estimate = calculate_staff_search_work(5, 0.3, 0, &params);
        assert!(estimate.factors[1].modifier.unwrap() == 0.0);
    }

    #[test]
    fn high_skill_requirement_adds_bonus_work() {
        let params = GameParameters::default();
        let low = calculate_staff_search_work(5, 0.3, 0, &params);
        let high = calculate_staff_search_work(5, 0.9, 0, &params);
        assert!(high.total_work > low.total_work);
    }
}
