//! Land search completion (spec.md §4.4): region-weighted vineyard
//! sampler, pending purchase options buffered for the UI.

use serde_json::json;

use crate::error::HandlerError;

use super::HandlerContext;
use crate::activity::Activity;

pub async fn handle(activity: &Activity, ctx: &mut HandlerContext<'_>) -> Result<(), HandlerError> {
    let regions: Vec<String> = activity
        .params
        .get("preferred_regions")
        .and_then(|v| v.as_array())
        .map(|arr| arr.iter().filter_map(|r| r.as_str().map(str::to_string)).collect())
        .unwrap_or_default();

    let offers = activity.params.get("offer_count").and_then(|v| v.as_u64()).unwrap_or(3) as usize;

    for _ in 0..offers {
        let region = if regions.is_empty() {
            "unspecified".to_string()
        } else {
            let idx = ctx.rng.choose_indices(regions.len(), 1);
            regions[idx[0]].clone()
        };
        let hectares = ctx.rng.gen_range_f64(0.5, 10.0);
        let price_per_hectare = ctx.rng.gen_range_f64(5_000.0, 50_000.0);
        let option = json!({
            "region": region,
            "hectares": hectares,
            "price": hectares * price_per_hectare,
        });
        ctx.store
            .push_pending_search_result("land_search", option)
            .await
            .map_err(|e| super::handler_error(activity, e))?;
    }

    ctx.notifications
        .add_message(
            &format!("{offers} land listings found"),
            "land_search",
            "Land search complete",
            "land",
        )
        .await;

    Ok(())
}
