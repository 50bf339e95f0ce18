//! Lender search completion (spec.md §4.4): sample lenders matching a
//! credit/availability filter, generate offers, buffer them pending.

use serde_json::json;

use crate::error::HandlerError;

use super::HandlerContext;
use crate::activity::Activity;

pub async fn handle(activity: &Activity, ctx: &mut HandlerContext<'_>) -> Result<(), HandlerError> {
    let min_credit = activity.params.get("min_credit").and_then(|v| v.as_f64()).unwrap_or(0.0);
    let lenders = ctx.store.load_lenders().await.map_err(|e| super::handler_error(activity, e))?;

    let eligible: Vec<_> = lenders.into_iter().filter(|l| l.credit_available >= min_credit).collect();
    let offer_count = activity.params.get("offer_count").and_then(|v| v.as_u64()).unwrap_or(3) as usize;
    let picks = ctx.rng.choose_indices(eligible.len(), offer_count.min(eligible.len()));

    for idx in &picks {
        let lender = &eligible[*idx];
        let principal = ctx.rng.gen_range_f64(10_000.0, lender.credit_available.max(10_001.0));
        let duration_seasons = ctx.rng.gen_range_u32(4, 20);
        let offer = json!({
            "lender_id": format!("{:?}", lender.id),
            "lender_type": format!("{:?}", lender.lender_type),
            "principal": principal,
            "duration_seasons": duration_seasons,
        });
        ctx.store
            .push_pending_search_result("lender_search", offer)
            .await
            .map_err(|e| super::handler_error(activity, e))?;
    }

    ctx.notifications
        .add_message(
            &format!("{} lender offers found", picks.len()),
            "lender_search",
            "Lender search complete",
            "finance",
        )
        .await;

    Ok(())
}
