//! Research estimator (spec.md §4.2 row "Research").

use crate::entities::ResearchProject;
use crate::params::GameParameters;
use crate::work::cost::{calculate_total_work, WorkCostInputs};
use crate::work::estimators::Estimate;
use crate::work::factor::WorkFactor;

use crate::activity::WorkCategory;

pub fn calculate_research_work(project: &ResearchProject, params: &GameParameters) -> Estimate {
    let complexity_modifier = (project.complexity - 1.0) * 0.15;
    let category_adjustment = project.category_adjustment.clamp(-0.15, 0.15);

    let inputs = WorkCostInputs {
        amount: project.base_work_amount,
        rate: params.rate(WorkCategory::Research),
        initial_work: params.initial(WorkCategory::Research),
        modifiers: vec![complexity_modifier, category_adjustment],
        ..Default::default()
    };

    let total_work = calculate_total_work(&inputs);

    let factors = vec![
        WorkFactor::primary("Base work amount", project.base_work_amount, "units"),
        WorkFactor::modifier("Complexity", complexity_modifier),
        WorkFactor::modifier("Category adjustment", category_adjustment),
    ];

    Estimate::new(total_work, factors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::ResearchId;
    use slotmap::SlotMap;

    #[test]
    fn higher_complexity_increases_work() {
        let mut sm: SlotMap<ResearchId, ()> = SlotMap::with_key();
        let id = sm.insert(());
        let params = GameParameters::default();
        let easy = ResearchProject {
            id,
            base_work_amount: 100.0,
            complexity: 1.0,
            category_adjustment: 0.0,
            monetary_reward: 0.0,
            prestige_reward: 0.0,
        };
        let hard = ResearchProject {
            complexity: 3.0,
            ..easy.clone()
        };
        assert!(calculate_research_work(&hard, &params).total_work > calculate_research_work(&easy, &params).total_work);
    }

    #[test]
    fn category_adjustment_is_clamped() {
        let mut sm: SlotMap<ResearchId, ()> = SlotMap::with_key();
        let id = sm.insert(());
        let params = GameParameters::default();
        let project = ResearchProject {
            id,
            base_work_amount: 100.0,
            complexity: 1.0,
            category_adjustment: 5.0,
            monetary_reward: 0.0,
            prestige_reward: 0.0,
        };
        let estimate = calculate_research_work(&project, &params);
        assert_eq!(estimate.factors[2].modifier, Some(0.15));
    }
}
