//! Staff search completion (spec.md §4.4): generate `n` candidate records
//! and buffer them in the pending-results channel for the UI to drain
//! (spec.md §9 redesign flag: typed per-category result channel rather
//! than a shared "pending-*" slot).

use serde_json::json;

use crate::error::HandlerError;

use super::HandlerContext;
use crate::activity::Activity;

pub async fn handle(activity: &Activity, ctx: &mut HandlerContext<'_>) -> Result<(), HandlerError> {
    let n = activity.params.get("candidate_count").and_then(|v| v.as_u64()).unwrap_or(3) as usize;

    for _ in 0..n {
        let candidate_id = ctx.store.alloc_staff_candidate_id().await.map_err(|e| super::handler_error(activity, e))?;
        let workforce = ctx.rng.gen_range_f64(20.0, 80.0);
        let skill = ctx.rng.gen_range_f64(0.2, 0.9);
        let wage = ctx.rng.gen_range_f64(8.0, 25.0);
        let candidate = json!({
            "id": crate::ids::staff_candidate_id_to_string(candidate_id),
            "workforce": workforce,
            "skill": skill,
            "wage": wage,
        });
        ctx.store
            .push_pending_search_result("staff_search", candidate)
            .await
            .map_err(|e| super::handler_error(activity, e))?;
    }

    ctx.notifications
        .add_message(
            &format!("{n} staff candidates found"),
            "staff_search",
            "Staff search complete",
            "staffing",
        )
        .await;

    Ok(())
}
