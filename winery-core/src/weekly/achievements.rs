//! Throttled achievement check (spec.md §4.8 step 6): evaluated at most
//! every `achievement_check_interval_weeks` absolute weeks, fire-and-forget
//! from the caller's perspective (its own errors never fail the tick, so
//! this returns nothing for the orchestrator to await failure on).

use crate::external::{NotificationSink, Prestige, Store};
use crate::params::GameParameters;

pub fn is_due(absolute_week: u64, last_checked_week: Option<u64>, params: &GameParameters) -> bool {
    match last_checked_week {
        None => true,
        Some(last) => absolute_week.saturating_sub(last) >= params.achievement_check_interval_weeks,
    }
}

pub async fn run(store: &dyn Store, prestige: &dyn Prestige, notifications: &dyn NotificationSink) {
    let Ok(batches) = store.load_batches().await else {
        return;
    };
    let Ok(current) = prestige.get_current_prestige().await else {
        return;
    };

    if batches.len() >= 10 && current >= 50.0 {
        notifications
            .add_message(
                "Achievement unlocked: Established Vintner",
                "achievements",
                "Achievement",
                "achievements",
            )
            .await;
    }
}
