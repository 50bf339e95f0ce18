//! Crushing completion (spec.md §4.4): batch state `grapes -> must_ready`,
//! method/option modifiers folded into the batch record, ledger debit for
//! the processing cost.

use crate::entities::BatchState;
use crate::error::HandlerError;
use crate::events::EngineEvent;

use super::{batch_target, HandlerContext};
use crate::activity::Activity;

pub async fn handle(activity: &Activity, ctx: &mut HandlerContext<'_>) -> Result<(), HandlerError> {
    let batch_id = batch_target(activity)?;
    let mut batches = ctx.store.load_batches().await.map_err(|e| super::handler_error(activity, e))?;
    let batch = batches
        .iter_mut()
        .find(|b| b.id == batch_id)
        .ok_or_else(|| super::handler_error(activity, "batch not found"))?;

    batch.state = BatchState::MustReady;
    if let Some(method) = activity.params.get("method").and_then(|v| v.as_str()) {
        batch.method = Some(method.to_string());
    }
    batch.destemmed = activity.params.get("destemmed").and_then(|v| v.as_bool()).unwrap_or(false);
    batch.cold_soak = activity.params.get("cold_soak").and_then(|v| v.as_bool()).unwrap_or(false);

    let cost = activity.params.get("cost").and_then(|v| v.as_f64()).unwrap_or(0.0);
    if cost > 0.0 {
        ctx.ledger
            .add_transaction(-cost, "Crushing costs", "crushing", true)
            .await
            .map_err(|e| super::handler_error(activity, e))?;
    }

    ctx.store
        .bulk_update_batches(std::slice::from_ref(batch))
        .await
        .map_err(|e| super::handler_error(activity, e))?;

    #[cfg(feature = "instrument")]
    tracing::info!(batch_id = ?batch_id, "crushing complete");

    let event = EngineEvent::ActivityCompleted {
        activity_id: activity.id,
        category: activity.category,
    };
    let (text, source_key, title, category) = event.as_notification();
    ctx.notifications.add_message(&text, source_key, title, category).await;

    Ok(())
}
