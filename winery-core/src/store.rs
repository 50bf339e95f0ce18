//! Activity store and lifecycle (spec.md §4.4, §4.7).
//!
//! Owns every `Activity` exclusively; completion handlers only borrow one
//! at a time through [`handlers::dispatch`]. Conflict detection and
//! per-tick progression both live here rather than split across a
//! clearing-manager/activity-manager pair, per spec.md §9's redesign flag
//! against cyclic manager references in the source.

use std::collections::HashMap;

use crate::activity::{Activity, ActivityStatus, CreateActivityOptions, WorkCategory};
use crate::error::{HandlerError, ValidationError};
use crate::events::EngineEvent;
use crate::external::{GameUpdateBus, Ledger, NotificationSink, Prestige, Store};
use crate::handlers::{self, HandlerContext};
use crate::ids::{worker_id_from_string, ActivityId, TargetId, WorkerId};
use crate::params::GameParameters;
use crate::rng::EngineRng;
use crate::work::contribution::{worker_contribution, TaskCountMap};

pub struct ActivityStore;

impl ActivityStore {
    /// `create(options) -> id | null` (spec.md §4.4). Rejects when
    /// `targetId` is set and an active, category-exclusive activity
    /// already occupies that target.
    pub async fn create(
        store: &dyn Store,
        bus: &dyn GameUpdateBus,
        clock: crate::clock::GameClock,
        mut options: CreateActivityOptions,
    ) -> Result<ActivityId, ValidationError> {
        if let Some(target_id) = options.target_id {
            if options.category.is_target_exclusive() {
                let active = store
                    .has_active_activity(target_id, options.category)
                    .await
                    .map_err(|e| ValidationError::InvalidOption { reason: e.to_string() })?;
                if active {
                    return Err(ValidationError::DuplicateActive {
                        category: options.category,
                        target_id: format!("{target_id:?}"),
                    });
                }
            }
        }

        if options.assigned_staff_ids.is_empty() {
            let workers = store
                .load_workers()
                .await
                .map_err(|e| ValidationError::InvalidOption { reason: e.to_string() })?;
            options.assigned_staff_ids = workers
                .into_iter()
                .map(|w| crate::ids::worker_id_to_string(w.id))
                .collect();
        }

        let id = store
            .alloc_activity_id()
            .await
            .map_err(|e| ValidationError::InvalidOption { reason: e.to_string() })?;
        let activity = Activity {
            id,
            category: options.category,
            title: options.title,
            total_work: options.total_work,
            completed_work: 0,
            target_id: options.target_id,
            params: options.params,
            status: ActivityStatus::Active,
            created_at: clock,
            is_cancellable: options.is_cancellable,
            assigned_staff_ids: options.assigned_staff_ids,
        };
        activity.check_invariants().unwrap_or_else(|e| e.check());

        store
            .save_activity(&activity)
            .await
            .map_err(|e| ValidationError::InvalidOption { reason: e.to_string() })?;

        #[cfg(feature = "instrument")]
        tracing::info!(activity_id = ?id, category = ?activity.category, "activity created");

        bus.trigger_game_update().await;
        Ok(id)
    }

    /// `cancel(id) -> bool`: only if active and `isCancellable`. Never
    /// invokes the completion handler.
    pub async fn cancel(store: &dyn Store, bus: &dyn GameUpdateBus, id: ActivityId) -> Result<bool, crate::error::StoreError> {
        let activities = store.load_activities().await?;
        let Some(activity) = activities.into_iter().find(|a| a.id == id) else {
            return Ok(false);
        };
        if activity.status != ActivityStatus::Active || !activity.is_cancellable {
            return Ok(false);
        }

        store
            .update_activity(
                id,
                crate::external::ActivityPatch {
                    status: Some(ActivityStatus::Cancelled),
                    ..Default::default()
                },
            )
            .await?;

        bus.trigger_game_update().await;
        Ok(true)
    }

    pub async fn list_active(store: &dyn Store) -> Result<Vec<Activity>, crate::error::StoreError> {
        Ok(store
            .load_activities()
            .await?
            .into_iter()
            .filter(|a| a.status == ActivityStatus::Active)
            .collect())
    }

    pub async fn get(store: &dyn Store, id: ActivityId) -> Result<Option<Activity>, crate::error::StoreError> {
        Ok(store.load_activities().await?.into_iter().find(|a| a.id == id))
    }

    /// ETA snapshot for the UI: current `worker_contribution` applied to
    /// this activity, without mutating anything.
    pub async fn progress_snapshot(
        store: &dyn Store,
        params: &GameParameters,
        id: ActivityId,
    ) -> Result<Option<(Activity, f64)>, crate::error::StoreError> {
        let Some(activity) = Self::get(store, id).await? else {
            return Ok(None);
        };
        let workers = store.load_workers().await?;
        let assigned: Vec<_> = workers
            .iter()
            .filter(|w| activity.assigned_staff_ids.contains(&crate::ids::worker_id_to_string(w.id)))
            .collect();
        let task_count = build_task_count(&store.load_activities().await?);
        let rate = worker_contribution(&assigned, activity.category, &task_count, params);
        Ok(Some((activity, rate)))
    }

    /// `progressAll()` (spec.md §4.7): snapshot workers/taskCount once,
    /// advance every active activity against that fixed snapshot, dispatch
    /// completions in iteration order, then rebuild the active set.
    #[allow(clippy::too_many_arguments)]
    pub async fn progress_all(
        store: &dyn Store,
        ledger: &dyn Ledger,
        prestige: &dyn Prestige,
        notifications: &dyn NotificationSink,
        bus: &dyn GameUpdateBus,
        params: &GameParameters,
        rng: &mut EngineRng,
    ) -> Result<Vec<EngineEvent>, crate::error::StoreError> {
        let mut events = Vec::new();
        let all_activities = store.load_activities().await?;
        let active: Vec<Activity> = all_activities.iter().filter(|a| a.status == ActivityStatus::Active).cloned().collect();
        let workers = store.load_workers().await?;
        let task_count = build_task_count(&all_activities);

        let mut completed = Vec::new();

        for mut activity in active {
            let assigned: Vec<_> = workers
                .iter()
                .filter(|w| activity.assigned_staff_ids.contains(&crate::ids::worker_id_to_string(w.id)))
                .collect();
            let work = worker_contribution(&assigned, activity.category, &task_count, params);
            let new_completed = (activity.completed_work as f64 + work).min(activity.total_work as f64) as i64;
            let progress_fraction = if activity.total_work > 0 {
                (new_completed - activity.completed_work) as f64 / activity.total_work as f64
            } else {
                0.0
            };
            activity.completed_work = new_completed;
            activity.check_invariants().unwrap_or_else(|e| e.check());

            apply_partial_progress_hook(store, &activity, progress_fraction).await?;

            store
                .update_activity(
                    activity.id,
                    crate::external::ActivityPatch {
                        completed_work: Some(activity.completed_work),
                        ..Default::default()
                    },
                )
                .await?;

            if activity.is_complete() {
                completed.push(activity);
            }
        }

        for activity in completed {
            let mut ctx = HandlerContext {
                store,
                ledger,
                prestige,
                notifications,
                params,
                rng: &mut *rng,
            };
            match handlers::dispatch(&activity, &mut ctx).await {
                Ok(()) => {
                    store
                        .update_activity(
                            activity.id,
                            crate::external::ActivityPatch {
                                status: Some(ActivityStatus::Complete),
                                ..Default::default()
                            },
                        )
                        .await?;
                    events.push(EngineEvent::ActivityCompleted {
                        activity_id: activity.id,
                        category: activity.category,
                    });
                }
                Err(err) => {
                    handle_failure(notifications, &activity, err).await;
                    events.push(EngineEvent::HandlerFailed {
                        activity_id: activity.id,
                        category: activity.category,
                        reason: "completion handler failed".to_string(),
                    });
                }
            }
            // Failure semantics (spec.md §4.4): the activity is still
            // removed to avoid tight retry loops, regardless of outcome.
            store.remove_activity(activity.id).await?;
        }

        bus.trigger_game_update().await;
        Ok(events)
    }
}

/// Partial-progress hooks (spec.md §4.7 step 3): Planting nudges density
/// up proportionally to progress made this tick (only once at least one
/// vine/ha is gained, to avoid float-noise writes); Harvesting computes
/// current total yield from ripeness and spins off a batch once the
/// untaken remainder reaches 5 kg.
async fn apply_partial_progress_hook(
    store: &dyn Store,
    activity: &Activity,
    progress_fraction: f64,
) -> Result<(), crate::error::StoreError> {
    if progress_fraction <= 0.0 {
        return Ok(());
    }
    let Some(TargetId::Vineyard(vineyard_id)) = activity.target_id else {
        return Ok(());
    };

    match activity.category {
        WorkCategory::Planting => {
            let mut vineyards = store.load_vineyards().await?;
            if let Some(vineyard) = vineyards.iter_mut().find(|v| v.id == vineyard_id) {
                if let Some(target_density) = vineyard.target_density {
                    let gain = (target_density - vineyard.density) * progress_fraction;
                    if gain >= 1.0 {
                        vineyard.density += gain;
                        store.save_vineyard(vineyard).await?;
                    }
                }
            }
        }
        WorkCategory::Harvesting => {
            let mut vineyards = store.load_vineyards().await?;
            if let Some(vineyard) = vineyards.iter_mut().find(|v| v.id == vineyard_id) {
                let total_yield_kg = vineyard.ripeness * vineyard.hectares * vineyard.density;
                let remainder = total_yield_kg - vineyard.harvested_so_far;
                if remainder >= 5.0 {
                    let batch_id = store.alloc_batch_id().await?;
                    store
                        .insert_batch(crate::entities::WineBatch {
                            id: batch_id,
                            state: crate::entities::BatchState::Grapes,
                            quantity_kg: remainder,
                            source_vineyard: vineyard_id,
                            method: None,
                            destemmed: false,
                            cold_soak: false,
                            fermentation_temperature: None,
                            age_weeks: 0,
                        })
                        .await?;
                    vineyard.harvested_so_far = total_yield_kg;
                    store.save_vineyard(vineyard).await?;
                }
            }
        }
        _ => {}
    }
    Ok(())
}

async fn handle_failure(notifications: &dyn NotificationSink, activity: &Activity, err: HandlerError) {
    #[cfg(feature = "instrument")]
    tracing::error!(activity_id = ?activity.id, category = ?activity.category, error = %err, "completion handler failed");
    #[cfg(not(feature = "instrument"))]
    let _ = &err;
    notifications
        .add_message(
            &format!("{:?} failed: {err}", activity.category),
            "activity",
            "Activity failed",
            "error",
        )
        .await;
}

fn build_task_count(activities: &[Activity]) -> TaskCountMap {
    let mut task_count: HashMap<WorkerId, u32> = HashMap::new();
    for activity in activities.iter().filter(|a| a.status == ActivityStatus::Active) {
        for staff_id in &activity.assigned_staff_ids {
            if let Some(worker_id) = worker_id_from_string(staff_id) {
                *task_count.entry(worker_id).or_insert(0) += 1;
            }
        }
    }
    task_count
}
