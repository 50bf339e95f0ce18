//! Generational entity identifiers.
//!
//! Keyed the way the teacher keys `SettlementId`/`FacilityId`: `slotmap`
//! generational keys rather than bare counters, so a stale handle into a
//! freed slot is detected instead of silently aliasing a new entity.

use serde::{Deserialize, Serialize};
use slotmap::{new_key_type, Key, KeyData};

new_key_type! {
    pub struct ActivityId;
    pub struct WorkerId;
    pub struct VineyardId;
    pub struct BatchId;
    pub struct LoanId;
    pub struct LenderId;
    pub struct ResearchId;
    pub struct StaffCandidateId;
}

/// `Activity::assigned_staff_ids` is a `HashSet<String>` (spec.md §6's
/// persisted `params(json)` boundary is untyped), so staff assignment
/// round-trips worker keys through their ffi representation rather than a
/// native `WorkerId`.
pub fn worker_id_to_string(id: WorkerId) -> String {
    id.data().as_ffi().to_string()
}

pub fn worker_id_from_string(s: &str) -> Option<WorkerId> {
    s.parse::<u64>().ok().map(|n| KeyData::from_ffi(n).into())
}

/// Staff-search candidates are buffered as opaque JSON (spec.md §9's typed
/// pending-result channel), so a candidate's id round-trips through its
/// ffi representation the same way a worker's does.
pub fn staff_candidate_id_to_string(id: StaffCandidateId) -> String {
    id.data().as_ffi().to_string()
}

/// Monetary amount. A plain alias rather than a newtype, matching the
/// teacher's `pub type Price = f64;` convention in `types.rs`.
pub type Money = f64;

/// Any of the entity kinds an `Activity` can bind to via `targetId`.
/// Serialized as a tagged enum so the store can persist a heterogeneous
/// `targetId` column without losing type information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TargetId {
    Vineyard(VineyardId),
    Batch(BatchId),
    Loan(LoanId),
}
