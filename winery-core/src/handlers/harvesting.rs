//! Harvesting completion (spec.md §4.4): final yield at completion time,
//! batch creation for any leftover grapes, status goes Dormant in Winter
//! else Harvested, ripeness resets.

use crate::clock::Season;
use crate::entities::{BatchState, VineyardStatus, WineBatch};
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

    let total_yield_kg = vineyard.ripeness * vineyard.hectares * vineyard.density;
    let remainder_kg = (total_yield_kg - vineyard.harvested_so_far).max(0.0);

    if remainder_kg >= 1.0 {
        let batch_id = ctx
            .store
            .alloc_batch_id()
            .await
            .map_err(|e| super::handler_error(activity, e))?;
        ctx.store
            .insert_batch(WineBatch {
                id: batch_id,
                state: BatchState::Grapes,
                quantity_kg: remainder_kg,
                source_vineyard: vineyard_id,
                method: None,
                destemmed: false,
                cold_soak: false,
                fermentation_temperature: None,
                age_weeks: 0,
            })
            .await
            .map_err(|e| super::handler_error(activity, e))?;
        vineyard.harvested_so_far = total_yield_kg;
    }

    let season = activity.params.get("season").and_then(|v| v.as_str()).map(|s| match s {
        "Spring" => Season::Spring,
        "Summer" => Season::Summer,
        "Fall" => Season::Fall,
        _ => Season::Winter,
    });
    vineyard.status = if matches!(season, Some(Season::Winter)) {
        VineyardStatus::Dormant
    } else {
        VineyardStatus::Harvested
    };
    vineyard.ripeness = 0.0;

    ctx.store
        .save_vineyard(vineyard)
        .await
        .map_err(|e| super::handler_error(activity, e))?;

    let event = EngineEvent::ActivityCompleted {
        activity_id: activity.id,
        category: activity.category,
    };
    let (text, source_key, title, category) = event.as_notification();
    ctx.notifications.add_message(&text, source_key, title, category).await;

    Ok(())
}
