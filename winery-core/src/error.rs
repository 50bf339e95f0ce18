//! Error taxonomy for the activity engine.
//!
//! Mirrors the five-way split the scheduler is specified against:
//! `ValidationError` is returned synchronously and never mutates state,
//! `StoreError`/`HandlerError` are logged and swallowed so the tick
//! completes, `ReentrancyError` is a silent no-op, and
//! `InvariantViolation` is fatal.

use thiserror::Error;

use crate::activity::WorkCategory;
use crate::ids::ActivityId;

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("duplicate active activity for category {category:?} on target {target_id:?}")]
    DuplicateActive {
        category: WorkCategory,
        target_id: String,
    },
    #[error("insufficient funds: need {required}, have {available}")]
    InsufficientFunds { required: f64, available: f64 },
    #[error("stage mismatch: {reason}")]
    StageMismatch { reason: String },
    #[error("yearly task limit reached for category {category:?}")]
    YearlyLimitHit { category: WorkCategory },
    #[error("invalid option: {reason}")]
    InvalidOption { reason: String },
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store operation '{op}' failed: {reason}")]
    OperationFailed { op: &'static str, reason: String },
}

#[derive(Debug, Error)]
pub enum HandlerError {
    #[error("completion handler for activity {activity_id:?} ({category:?}) failed: {reason}")]
    Failed {
        activity_id: ActivityId,
        category: WorkCategory,
        reason: String,
    },
}

/// Returned by `process_game_tick` when a tick is already in flight.
/// Per spec this is a silent no-op from the caller's perspective; the type
/// exists so callers can distinguish "ignored" from "ran".
#[derive(Debug, Error)]
#[error("tick already in progress, call ignored")]
pub struct ReentrancyError;

/// Fatal programmer-error conditions: negative `completedWork`, or
/// `totalWork == 0`. The engine panics rather than returning this as a
/// `Result`, matching the spec's "fatal, process aborts" semantics; the
/// type exists to give the panic message a stable shape.
#[derive(Debug, Error)]
pub enum InvariantViolation {
    #[error("activity {activity_id:?}: completedWork {completed} out of range [0, {total}]")]
    WorkOutOfRange {
        activity_id: ActivityId,
        completed: i64,
        total: i64,
    },
    #[error("activity {activity_id:?}: totalWork must be >= 1, got {total}")]
    ZeroTotalWork { activity_id: ActivityId, total: i64 },
}

impl InvariantViolation {
    pub fn check(self) -> ! {
        panic!("invariant violation: {self}");
    }
}

/// Top-level error returned from the engine's public `Result`-returning
/// operations. Weekly subsystems and handlers catch their own
/// `StoreError`/`HandlerError` internally and never let them surface here;
/// this type is for the handful of entry points that can genuinely fail
/// synchronously (activity creation).
#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Store(#[from] StoreError),
}
