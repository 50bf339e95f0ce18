//! The `Activity` entity and its category taxonomy.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::clock::GameClock;
use crate::ids::{ActivityId, TargetId};

/// Authoritative category set: the union of every category referenced by
/// any completion handler (spec.md §9 open question — `STAFF_HIRING` /
/// `LAND_SEARCH` / `LENDER_SEARCH` / `TAKE_LOAN` /
/// `ADMINISTRATION_AND_RESEARCH` only appeared in later code paths in the
/// source; here they are first-class from the start). Clearing is split
/// into its four task kinds because each carries an independent per-task
/// rate (spec.md §4.2's "per-task rate" column).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WorkCategory {
    Planting,
    Harvesting,
    Crushing,
    Fermentation,
    ClearingVegetation,
    ClearingDebris,
    ClearingUproot,
    ClearingReplant,
    Bookkeeping,
    StaffSearch,
    Hiring,
    LandSearch,
    LenderSearch,
    TakeLoan,
    Research,
}

impl WorkCategory {
    /// Whether at most one active activity of this category may exist per
    /// target (spec.md §4.4 conflict policy: vineyard/batch-bound
    /// categories are exclusive, searches and bookkeeping are not).
    pub fn is_target_exclusive(self) -> bool {
        !matches!(
            self,
            WorkCategory::Bookkeeping
                | WorkCategory::StaffSearch
                | WorkCategory::LandSearch
                | WorkCategory::LenderSearch
        )
    }

    pub fn is_clearing(self) -> bool {
        matches!(
            self,
            WorkCategory::ClearingVegetation
                | WorkCategory::ClearingDebris
                | WorkCategory::ClearingUproot
                | WorkCategory::ClearingReplant
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActivityStatus {
    Active,
    Cancelled,
    Complete,
}

/// Category-specific payload. Kept as a loosely typed JSON value (matching
/// the store's persisted `params(json)` column in spec.md §6) rather than
/// an enum per category, since the store must round-trip it opaquely
/// without depending on every handler's concrete type.
pub type ActivityParams = serde_json::Value;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Activity {
    pub id: ActivityId,
    pub category: WorkCategory,
    pub title: String,
    pub total_work: i64,
    pub completed_work: i64,
    pub target_id: Option<TargetId>,
    pub params: ActivityParams,
    pub status: ActivityStatus,
    pub created_at: GameClock,
    pub is_cancellable: bool,
    pub assigned_staff_ids: HashSet<String>,
}

impl Activity {
    /// `0 <= completedWork <= totalWork`, `totalWork >= 1`.
    pub fn check_invariants(&self) -> Result<(), crate::error::InvariantViolation> {
        if self.total_work < 1 {
            return Err(crate::error::InvariantViolation::ZeroTotalWork {
                activity_id: self.id,
                total: self.total_work,
            });
        }
        if self.completed_work < 0 || self.completed_work > self.total_work {
            return Err(crate::error::InvariantViolation::WorkOutOfRange {
                activity_id: self.id,
                completed: self.completed_work,
                total: self.total_work,
            });
        }
        Ok(())
    }

    pub fn is_complete(&self) -> bool {
        self.completed_work >= self.total_work
    }
}

/// Options accepted by `ActivityStore::create`.
#[derive(Debug, Clone)]
pub struct CreateActivityOptions {
    pub category: WorkCategory,
    pub title: String,
    pub total_work: i64,
    pub target_id: Option<TargetId>,
    pub params: ActivityParams,
    pub is_cancellable: bool,
    pub assigned_staff_ids: HashSet<String>,
}
