//! Worker contribution calculator (spec.md §4.3). Used both for ETA
//! (`getActivityProgress`) and actual per-tick advancement
//! (`progressActivities`).

use std::collections::HashMap;

use crate::activity::WorkCategory;
use crate::entities::Worker;
use crate::ids::WorkerId;
use crate::params::GameParameters;

/// `taskCount[worker.id]`; default 1 if a worker is not present in the map
/// (i.e. assigned to exactly one activity this tick).
pub type TaskCountMap = HashMap<WorkerId, u32>;

/// Sum of each assigned worker's divided contribution for one activity.
pub fn worker_contribution(
    assigned_workers: &[&Worker],
    category: WorkCategory,
    task_count: &TaskCountMap,
    params: &GameParameters,
) -> f64 {
    let skill_key = params
        .category_skill_mapping
        .get(&category)
        .expect("CATEGORY_SKILL_MAPPING must cover every WorkCategory");

    assigned_workers
        .iter()
        .map(|worker| {
            let base_skill = worker.skill_level(skill_key);
            let specialized = worker.is_specialized_in(skill_key);
            let effective = base_skill * if specialized { 1.2 } else { 1.0 };
            let contribution = worker.workforce * effective;
            let divisor = task_count.get(&worker.id).copied().unwrap_or(1).max(1) as f64;
            contribution / divisor
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotmap::SlotMap;

    fn worker_id() -> WorkerId {
        let mut sm: SlotMap<WorkerId, ()> = SlotMap::with_key();
        sm.insert(())
    }

    #[test]
    fn single_worker_no_specialization() {
        let params = GameParameters::default();
        let id = worker_id();
        let worker = Worker::new(id, 50.0, 10.0).with_skill("field", 0.5);
        let task_count = TaskCountMap::new();

        let contribution = worker_contribution(&[&worker], WorkCategory::Planting, &task_count, &params);
        assert_eq!(contribution, 25.0);
    }

    #[test]
    fn multi_tasking_penalty_matches_worked_example() {
        // spec.md §8 scenario 5: workforce=50, field=0.8, specialised,
        // assigned to two planting activities -> effective skill 0.96,
        // contribution per assignment 24, summed 48.
        let params = GameParameters::default();
        let id = worker_id();
        let worker = Worker::new(id, 50.0, 10.0)
            .with_skill("field", 0.8)
            .with_specialization("field");

        let mut task_count = TaskCountMap::new();
        task_count.insert(id, 2);

        let per_assignment = worker_contribution(&[&worker], WorkCategory::Planting, &task_count, &params);
        assert_eq!(per_assignment, 24.0);
        assert_eq!(per_assignment * 2.0, 48.0);
    }

    #[test]
    fn specialization_multiplies_by_1_2() {
        let params = GameParameters::default();
        let id = worker_id();
        let plain = Worker::new(id, 100.0, 10.0).with_skill("field", 0.5);
        let specialized = Worker::new(id, 100.0, 10.0)
            .with_skill("field", 0.5)
            .with_specialization("field");
        let task_count = TaskCountMap::new();

        let c1 = worker_contribution(&[&plain], WorkCategory::Planting, &task_count, &params);
        let c2 = worker_contribution(&[&specialized], WorkCategory::Planting, &task_count, &params);
        assert!((c2 - c1 * 1.2).abs() < 1e-9);
    }
}
