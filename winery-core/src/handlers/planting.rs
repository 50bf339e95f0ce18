//! Planting completion (spec.md §4.4): density reaches target, status
//! advances Planted -> Growing, grape variety is set.

use crate::entities::VineyardStatus;
use crate::error::HandlerError;
use crate::events::EngineEvent;

use super::{vineyard_target, HandlerContext};
use crate::activity::Activity;

pub async fn handle(activity: &Activity, ctx: &mut HandlerContext<'_>) -> Result<(), HandlerError> {
    let vineyard_id = vineyard_target(activity)?;
    let mut vineyards = ctx
        .store
        .load_vineyards()
        .await
        .map_err(|e| super::handler_error(activity, e))?;
    let vineyard = vineyards
        .iter_mut()
        .find(|v| v.id == vineyard_id)
        .ok_or_else(|| super::handler_error(activity, "vineyard not found"))?;

    if let Some(target_density) = vineyard.target_density {
        vineyard.density = target_density;
    }
    if let Some(grape) = activity.params.get("grape").and_then(|v| v.as_str()) {
        vineyard.grape = Some(grape.to_string());
    }
    vineyard.status = VineyardStatus::Growing;

    ctx.store
        .save_vineyard(vineyard)
        .await
        .map_err(|e| super::handler_error(activity, e))?;
    #[cfg(feature = "instrument")]
    tracing::info!(vineyard_id = ?vineyard_id, "planting complete");

    let event = EngineEvent::ActivityCompleted {
        activity_id: activity.id,
        category: activity.category,
    };
    let (text, source_key, title, category) = event.as_notification();
    ctx.notifications.add_message(&text, source_key, title, category).await;

    Ok(())
}
