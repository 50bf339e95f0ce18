//! Per-category completion handlers (spec.md §4.4), invoked by
//! `ActivityStore::progress_all` once an activity's `completed_work`
//! reaches `total_work`. A handler owns the mutation of its target entity
//! and never calls back into the store except through `create`/`cancel`/
//! `list_active` (spec.md §9 redesign flag).

mod bookkeeping;
mod clearing;
mod crushing;
mod fermentation;
mod harvesting;
mod hiring;
mod land_search;
mod lender_search;
mod planting;
mod research;
mod staff_search;
mod take_loan;

use crate::activity::{Activity, WorkCategory};
use crate::error::HandlerError;
use crate::external::{Ledger, NotificationSink, Prestige, Store};
use crate::ids::{BatchId, LoanId, TargetId, VineyardId};
use crate::params::GameParameters;
use crate::rng::EngineRng;

/// Shared collaborators a completion handler may need. Borrowed for the
/// duration of one handler invocation only; handlers never retain it.
pub struct HandlerContext<'a> {
    pub store: &'a dyn Store,
    pub ledger: &'a dyn Ledger,
    pub prestige: &'a dyn Prestige,
    pub notifications: &'a dyn NotificationSink,
    pub params: &'a GameParameters,
    pub rng: &'a mut EngineRng,
}

/// Dispatches to the category-specific handler. Errors are the caller's
/// signal to log-and-drop per spec.md §4.4/§7 failure semantics; this
/// function itself never panics on a handler's behalf.
pub async fn dispatch(activity: &Activity, ctx: &mut HandlerContext<'_>) -> Result<(), HandlerError> {
    match activity.category {
        WorkCategory::Planting => planting::handle(activity, ctx).await,
        WorkCategory::Harvesting => harvesting::handle(activity, ctx).await,
        WorkCategory::Crushing => crushing::handle(activity, ctx).await,
        WorkCategory::Fermentation => fermentation::handle(activity, ctx).await,
        WorkCategory::ClearingVegetation
        | WorkCategory::ClearingDebris
        | WorkCategory::ClearingUproot
        | WorkCategory::ClearingReplant => clearing::handle(activity, ctx).await,
        WorkCategory::Bookkeeping => bookkeeping::handle(activity, ctx).await,
        WorkCategory::StaffSearch => staff_search::handle(activity, ctx).await,
        WorkCategory::Hiring => hiring::handle(activity, ctx).await,
        WorkCategory::LandSearch => land_search::handle(activity, ctx).await,
        WorkCategory::LenderSearch => lender_search::handle(activity, ctx).await,
        WorkCategory::TakeLoan => take_loan::handle(activity, ctx).await,
        WorkCategory::Research => research::handle(activity, ctx).await,
    }
}

fn reason(activity: &Activity, err: impl std::fmt::Display) -> HandlerError {
    HandlerError::Failed {
        activity_id: activity.id,
        category: activity.category,
        reason: err.to_string(),
    }
}

pub(crate) use reason as handler_error;

pub(crate) fn vineyard_target(activity: &Activity) -> Result<VineyardId, HandlerError> {
    match activity.target_id {
        Some(TargetId::Vineyard(id)) => Ok(id),
        _ => Err(handler_error(activity, "activity has no vineyard target")),
    }
}

pub(crate) fn batch_target(activity: &Activity) -> Result<BatchId, HandlerError> {
    match activity.target_id {
        Some(TargetId::Batch(id)) => Ok(id),
        _ => Err(handler_error(activity, "activity has no batch target")),
    }
}

pub(crate) fn loan_target(activity: &Activity) -> Result<LoanId, HandlerError> {
    match activity.target_id {
        Some(TargetId::Loan(id)) => Ok(id),
        _ => Err(handler_error(activity, "activity has no loan target")),
    }
}
