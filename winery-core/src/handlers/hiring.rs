//! Hiring completion (spec.md §4.4): add the chosen candidate to the
//! worker roster, deduct the first month's wage.

use crate::entities::Worker;
use crate::error::HandlerError;
use crate::events::EngineEvent;

use super::HandlerContext;
use crate::activity::Activity;

pub async fn handle(activity: &Activity, ctx: &mut HandlerContext<'_>) -> Result<(), HandlerError> {
    let workforce = activity.params.get("workforce").and_then(|v| v.as_f64()).unwrap_or(50.0);
    let wage = activity.params.get("wage").and_then(|v| v.as_f64()).unwrap_or(10.0);
    let skill_key = activity.params.get("skill_key").and_then(|v| v.as_str());
    let skill_level = activity.params.get("skill_level").and_then(|v| v.as_f64()).unwrap_or(0.5);

    let id = ctx.store.alloc_worker_id().await.map_err(|e| super::handler_error(activity, e))?;
    let mut worker = Worker::new(id, workforce, wage);
    if let Some(skill_key) = skill_key {
        worker = worker.with_skill(skill_key, skill_level);
    }

    ctx.store.save_worker(&worker).await.map_err(|e| super::handler_error(activity, e))?;

    let first_month_wage = wage * 4.0;
    ctx.ledger
        .add_transaction(-first_month_wage, "First month's wage", "staffing", true)
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
