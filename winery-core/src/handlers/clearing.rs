//! Clearing completion (spec.md §4.4): resets the overgrowth counter for
//! the specific task kind, improves vineyard health, and on uproot/replant
//! resets grape/density/age or grants a planting health bonus.

use crate::activity::WorkCategory;
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

    match activity.category {
        WorkCategory::ClearingVegetation => {
            vineyard.overgrowth.vegetation = 0.0;
            vineyard.health = (vineyard.health + 0.05).min(1.0);
        }
        WorkCategory::ClearingDebris => {
            vineyard.overgrowth.debris = 0.0;
            vineyard.health = (vineyard.health + 0.05).min(1.0);
        }
        WorkCategory::ClearingUproot => {
            vineyard.overgrowth.uproot = 0.0;
            vineyard.grape = None;
            vineyard.density = 0.0;
            vineyard.vine_age_years = 0.0;
            vineyard.health = (vineyard.health + 0.1).min(1.0);
        }
        WorkCategory::ClearingReplant => {
            vineyard.overgrowth.replant = 0.0;
            vineyard.health = (vineyard.health + 0.15).min(1.0);
        }
        _ => return Err(super::handler_error(activity, "not a clearing category")),
    }

    if matches!(activity.category, WorkCategory::ClearingVegetation | WorkCategory::ClearingDebris) {
        vineyard.years_since_last_clearing = 0.0;
    }

    ctx.store
        .save_vineyard(vineyard)
        .await
        .map_err(|e| super::handler_error(activity, e))?;

    #[cfg(feature = "instrument")]
    tracing::info!(vineyard_id = ?vineyard_id, category = ?activity.category, "clearing complete");

    let event = EngineEvent::ActivityCompleted {
        activity_id: activity.id,
        category: activity.category,
    };
    let (text, source_key, title, category) = event.as_notification();
    ctx.notifications.add_message(&text, source_key, title, category).await;

    Ok(())
}
