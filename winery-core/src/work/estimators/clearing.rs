//! Clearing estimator (spec.md §4.2 row "Clearing"). Unlike the other
//! categories, clearing activities bundle multiple independent tasks
//! (vegetation, debris, uproot, replant); each task runs through the work
//! cost calculator with its own rate and modifier set, and the results are
//! summed. The "more than one task selected" coordination bonus is
//! informational only (spec.md: "included as factor only") and never
//! scales the summed total.

use crate::clock::Season;
use crate::entities::Vineyard;
use crate::params::GameParameters;
use crate::work::cost::{calculate_total_work, WorkCostInputs};
use crate::work::estimators::Estimate;
use crate::work::factor::WorkFactor;
use crate::work::modifiers::{
    clearing_vegetation_debris_seasonal_modifier, overgrowth_modifier_default, soil_average,
    vine_age_modifier,
};

use crate::activity::WorkCategory;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClearingTask {
    Vegetation,
    Debris,
    Uproot,
    Replant,
}

impl ClearingTask {
    fn category(self) -> WorkCategory {
        match self {
            ClearingTask::Vegetation => WorkCategory::ClearingVegetation,
            ClearingTask::Debris => WorkCategory::ClearingDebris,
            ClearingTask::Uproot => WorkCategory::ClearingUproot,
            ClearingTask::Replant => WorkCategory::ClearingReplant,
        }
    }

    fn is_vegetation_or_debris(self) -> bool {
        matches!(self, ClearingTask::Vegetation | ClearingTask::Debris)
    }

    fn is_uproot_or_replant(self) -> bool {
        matches!(self, ClearingTask::Uproot | ClearingTask::Replant)
    }

    fn overgrowth_years(self, vineyard: &Vineyard) -> f64 {
        match self {
            ClearingTask::Vegetation => vineyard.overgrowth.vegetation,
            ClearingTask::Debris => vineyard.overgrowth.debris,
            ClearingTask::Uproot => vineyard.overgrowth.uproot,
            ClearingTask::Replant => vineyard.overgrowth.replant,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ClearingTaskSelection {
    pub task: ClearingTask,
    pub hectares: f64,
    /// Only meaningful for uproot/replant, used for density adjustment.
    pub target_density: Option<f64>,
}

pub fn calculate_clearing_work(
    vineyard: &Vineyard,
    tasks: &[ClearingTaskSelection],
    season: Season,
    params: &GameParameters,
) -> Estimate {
    let altitude = params.altitude_rating(&vineyard.country, &vineyard.region, vineyard.altitude) * 1.5;
    let soil = soil_average(params, &vineyard.soils);

    let mut total_work: i64 = 0;
    let mut factors = Vec::new();

    for selection in tasks {
        let task = selection.task;
        let overgrowth = overgrowth_modifier_default(task.overgrowth_years(vineyard));
        let seasonal = if task.is_vegetation_or_debris() {
            clearing_vegetation_debris_seasonal_modifier(season)
        } else {
            0.0
        };
        let age_modifier = if task.is_uproot_or_replant() {
            vine_age_modifier(vineyard.vine_age_years)
        } else {
            0.0
        };

        let mut modifiers = vec![soil, altitude, overgrowth, seasonal];
        if task.is_uproot_or_replant() {
            modifiers.push(age_modifier);
        }

        let inputs = WorkCostInputs {
            amount: selection.hectares,
            rate: params.rate(task.category()),
            initial_work: params.initial(task.category()),
            density: selection.target_density,
            use_density_adjustment: task.is_uproot_or_replant(),
            reference_density: crate::params::DEFAULT_VINE_DENSITY,
            modifiers,
        };

        total_work += calculate_total_work(&inputs);
        factors.push(WorkFactor::primary(
            format!("{:?} hectares", task),
            selection.hectares,
            "ha",
        ));
    }

    if tasks.len() > 1 {
        factors.push(WorkFactor::modifier("Coordination bonus (informational)", -0.10));
    }

    Estimate::new(total_work, factors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::VineyardId;
    use slotmap::SlotMap;

    fn vineyard() -> Vineyard {
        let mut sm: SlotMap<VineyardId, ()> = SlotMap::with_key();
        let id = sm.insert(());
        Vineyard::new(id, 2.0)
    }

    #[test]
    fn single_task_sums_to_its_own_work() {
        let vineyard = vineyard();
        let params = GameParameters::default();
        let tasks = vec![ClearingTaskSelection {
            task: ClearingTask::Vegetation,
            hectares: 1.0,
            target_density: None,
        }];
        let estimate = calculate_clearing_work(&vineyard, &tasks, Season::Spring, &params);
        assert!(estimate.total_work > 0);
    }

    #[test]
    fn multiple_tasks_sum_and_record_coordination_factor() {
        let vineyard = vineyard();
        let params = GameParameters::default();
        let tasks = vec![
            ClearingTaskSelection {
                task: ClearingTask::Vegetation,
                hectares: 1.0,
                target_density: None,
            },
            ClearingTaskSelection {
                task: ClearingTask::Debris,
                hectares: 1.0,
                target_density: None,
            },
        ];
        let estimate = calculate_clearing_work(&vineyard, &tasks, Season::Spring, &params);
        let single = calculate_clearing_work(
            &vineyard,
            &tasks[..1],
            Season::Spring,
            &params,
        );
        assert!(estimate.total_work > single.total_work);
        assert!(estimate
            .factors
            .iter()
            .any(|f| f.label.contains("Coordination")));
    }

    #[test]
    fn uproot_uses_density_adjustment_and_age_modifier() {
        let mut vineyard = vineyard();
        vineyard.vine_age_years = 80.0;
        let params = GameParameters::default();
        let tasks = vec![ClearingTaskSelection {
            task: ClearingTask::Uproot,
            hectares: 1.0,
            target_density: Some(5000.0),
        }];
        let estimate = calculate_clearing_work(&vineyard, &tasks, Season::Spring, &params);
        assert!(estimate.total_work > 0);
    }
}
