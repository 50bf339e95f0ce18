//! Bookkeeping completion (spec.md §4.4): purely a notification; the
//! ledger was already mutated by the transactions it summarised.

use crate::error::HandlerError;

use super::HandlerContext;
use crate::activity::Activity;

pub async fn handle(activity: &Activity, ctx: &mut HandlerContext<'_>) -> Result<(), HandlerError> {
    let season = activity.params.get("season").and_then(|v| v.as_str()).unwrap_or("?");
    let year = activity.params.get("year").and_then(|v| v.as_u64()).unwrap_or(0);
    let count = activity
        .params
        .get("transaction_count")
        .and_then(|v| v.as_u64())
        .unwrap_or(0);

    let text = format!("Bookkeeping for {season} {year} completed, processed {count} transactions");
    ctx.notifications.add_message(&text, "bookkeeping", "Bookkeeping complete", "finance").await;

    #[cfg(feature = "instrument")]
    tracing::info!(activity_id = ?activity.id, count, "bookkeeping complete");

    Ok(())
}
