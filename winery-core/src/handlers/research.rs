//! Research completion (spec.md §4.4): grants the monetary and prestige
//! rewards, persists the unlock.

use crate::error::HandlerError;
use crate::events::EngineEvent;
use crate::external::PrestigeEvent;

use super::HandlerContext;
use crate::activity::Activity;

pub async fn handle(activity: &Activity, ctx: &mut HandlerContext<'_>) -> Result<(), HandlerError> {
    let unlocks = ctx.store.load_research_unlocks().await.map_err(|e| super::handler_error(activity, e))?;
    let project_id = activity
        .params
        .get("research_id")
        .and_then(|v| v.as_str())
        .ok_or_else(|| super::handler_error(activity, "missing research_id"))?;

    let already_unlocked = unlocks.iter().any(|p| format!("{:?}", p.id) == project_id);
    if already_unlocked {
        return Ok(());
    }

    let monetary_reward = activity.params.get("monetary_reward").and_then(|v| v.as_f64()).unwrap_or(0.0);
    let prestige_reward = activity.params.get("prestige_reward").and_then(|v| v.as_f64()).unwrap_or(0.0);

    if monetary_reward > 0.0 {
        ctx.ledger
            .add_transaction(monetary_reward, "Research reward", "research", true)
            .await
            .map_err(|e| super::handler_error(activity, e))?;
    }
    if prestige_reward > 0.0 {
        ctx.prestige
            .insert_prestige_event(PrestigeEvent {
                id: format!("research-{project_id}"),
                event_type: "research".to_string(),
                amount_base: prestige_reward,
                created_game_week: 0,
                decay_rate: 0.0,
                source_id: Some(project_id.to_string()),
                payload: None,
            })
            .await
            .map_err(|e| super::handler_error(activity, e))?;
    }

    let id = ctx.store.alloc_research_id().await.map_err(|e| super::handler_error(activity, e))?;
    ctx.store
        .save_research_unlock(crate::entities::ResearchProject {
            id,
            base_work_amount: 0.0,
            complexity: 1.0,
            category_adjustment: 0.0,
            monetary_reward,
            prestige_reward,
        })
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
