//! Fermentation setup completion (spec.md §4.4): `must_ready ->
//! must_fermenting`, chosen method/temperature persisted.

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

    batch.state = BatchState::MustFermenting;
    if let Some(method) = activity.params.get("method").and_then(|v| v.as_str()) {
        batch.method = Some(method.to_string());
    }
    if let Some(temp) = activity.params.get("temperature").and_then(|v| v.as_f64()) {
        batch.fermentation_temperature = Some(temp);
    }

    ctx.store
        .bulk_update_batches(std::slice::from_ref(batch))
        .await
        .map_err(|e| super::handler_error(activity, e))?;

    #[cfg(feature = "instrument")]
    tracing::info!(batch_id = ?batch_id, "fermentation setup complete");

    let event = EngineEvent::ActivityCompleted {
        activity_id: activity.id,
        category: activity.category,
    };
    let (text, source_key, title, category) = event.as_notification();
    ctx.notifications.add_message(&text, source_key, title, category).await;

    Ok(())
}
