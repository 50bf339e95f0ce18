//! Take-loan completion (spec.md §4.4): principal credited, ledger row
//! recorded, loan schedule activated.

use crate::entities::LoanStatus;
use crate::error::HandlerError;
use crate::events::EngineEvent;

use super::{loan_target, HandlerContext};
use crate::activity::Activity;

pub async fn handle(activity: &Activity, ctx: &mut HandlerContext<'_>) -> Result<(), HandlerError> {
    let loan_id = loan_target(activity)?;
    let mut loans = ctx.store.load_loans().await.map_err(|e| super::handler_error(activity, e))?;
    let loan = loans
        .iter_mut()
        .find(|l| l.id == loan_id)
        .ok_or_else(|| super::handler_error(activity, "loan not found"))?;

    loan.status = LoanStatus::Active;

    ctx.ledger
        .add_transaction(loan.principal, "Loan principal credited", "finance", true)
        .await
        .map_err(|e| super::handler_error(activity, e))?;

    ctx.store.save_loan(loan).await.map_err(|e| super::handler_error(activity, e))?;

    let event = EngineEvent::ActivityCompleted {
        activity_id: activity.id,
        category: activity.category,
    };
    let (text, source_key, title, category) = event.as_notification();
    ctx.notifications.add_message(&text, source_key, title, category).await;

    Ok(())
}
