//! External interfaces (spec.md §6): the collaborators the core consumes
//! without owning. Expressed as `async_trait` traits — every operation in
//! spec.md §6 is specified as async — so the host process can supply its
//! own persistence/ledger/UI implementations while the engine stays
//! generic over them, the same way the teacher keeps `World` ignorant of
//! how its data eventually reaches disk.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::activity::{Activity, ActivityStatus, WorkCategory};
use crate::clock::Season;
use crate::entities::{Lender, Loan, ResearchProject, Vineyard, WineBatch, Worker};
use crate::error::StoreError;
use crate::ids::{ActivityId, BatchId, Money, TargetId, VineyardId};

/// Abstract persistence layer (spec.md §6 "Store").
#[async_trait]
pub trait Store: Send + Sync {
    async fn load_activities(&self) -> Result<Vec<Activity>, StoreError>;
    async fn save_activity(&self, activity: &Activity) -> Result<(), StoreError>;
    async fn update_activity(&self, id: ActivityId, patch: ActivityPatch) -> Result<(), StoreError>;
    async fn remove_activity(&self, id: ActivityId) -> Result<(), StoreError>;
    async fn has_active_activity(&self, target_id: TargetId, category: WorkCategory) -> Result<bool, StoreError>;
    async fn bulk_update_batches(&self, batches: &[WineBatch]) -> Result<(), StoreError>;
    async fn alloc_activity_id(&self) -> Result<ActivityId, StoreError>;
    async fn alloc_staff_candidate_id(&self) -> Result<crate::ids::StaffCandidateId, StoreError>;
    async fn alloc_batch_id(&self) -> Result<BatchId, StoreError>;
    async fn alloc_worker_id(&self) -> Result<crate::ids::WorkerId, StoreError>;
    async fn alloc_research_id(&self) -> Result<crate::ids::ResearchId, StoreError>;
    async fn save_vineyard(&self, vineyard: &Vineyard) -> Result<(), StoreError>;
    async fn insert_batch(&self, batch: WineBatch) -> Result<(), StoreError>;
    async fn save_loan(&self, loan: &Loan) -> Result<(), StoreError>;
    async fn save_worker(&self, worker: &Worker) -> Result<(), StoreError>;
    async fn push_pending_search_result(&self, key: &str, payload: serde_json::Value) -> Result<(), StoreError>;
    async fn load_batches(&self) -> Result<Vec<WineBatch>, StoreError>;
    async fn load_vineyards(&self) -> Result<Vec<Vineyard>, StoreError>;
    async fn load_workers(&self) -> Result<Vec<Worker>, StoreError>;
    async fn load_lenders(&self) -> Result<Vec<Lender>, StoreError>;
    async fn load_loans(&self) -> Result<Vec<Loan>, StoreError>;
    async fn load_research_unlocks(&self) -> Result<Vec<ResearchProject>, StoreError>;
    async fn save_research_unlock(&self, project: ResearchProject) -> Result<(), StoreError>;
}

#[derive(Debug, Clone, Default)]
pub struct ActivityPatch {
    pub completed_work: Option<i64>,
    pub status: Option<ActivityStatus>,
    pub params: Option<serde_json::Value>,
}

/// Ledger (spec.md §6 "Ledger").
#[async_trait]
pub trait Ledger: Send + Sync {
    async fn add_transaction(
        &self,
        amount: Money,
        description: &str,
        category: &str,
        within_tick: bool,
    ) -> Result<(), StoreError>;
    async fn get_transactions(&self, season_filter: Season) -> Result<Vec<Transaction>, StoreError>;
    async fn get_balance(&self) -> Result<Money, StoreError>;
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub amount: Money,
    pub description: String,
    pub category: String,
    pub season: Season,
}

/// Prestige (spec.md §6 "Prestige").
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrestigeEvent {
    pub id: String,
    pub event_type: String,
    pub amount_base: f64,
    pub created_game_week: u64,
    pub decay_rate: f64,
    pub source_id: Option<String>,
    pub payload: Option<serde_json::Value>,
}

#[async_trait]
pub trait Prestige: Send + Sync {
    async fn insert_prestige_event(&self, event: PrestigeEvent) -> Result<(), StoreError>;
    async fn get_current_prestige(&self) -> Result<f64, StoreError>;
}

/// Notification sink (spec.md §6). Best-effort, non-transactional: a
/// failure here must never fail the tick.
#[async_trait]
pub trait NotificationSink: Send + Sync {
    async fn add_message(&self, text: &str, source_key: &str, title: &str, category: &str);
}

/// Game-update bus (spec.md §6). Idempotent by contract.
#[async_trait]
pub trait GameUpdateBus: Send + Sync {
    async fn trigger_game_update(&self);
    async fn trigger_game_update_immediate(&self);
}

/// In-memory test doubles for the four traits above, grounded in the
/// teacher's pattern of constructing a bare `World::new()` in
/// `tests/invariants.rs` with no external services at all.
pub mod testing {
    use super::*;
    use std::collections::HashMap;
    use tokio::sync::Mutex;

    #[derive(Default)]
    pub struct InMemoryStore {
        pub activities: Mutex<HashMap<ActivityId, Activity>>,
        pub batches: Mutex<HashMap<BatchId, WineBatch>>,
        pub vineyards: Mutex<HashMap<VineyardId, Vineyard>>,
        pub loans: Mutex<HashMap<crate::ids::LoanId, Loan>>,
        pub workers: Mutex<HashMap<crate::ids::WorkerId, Worker>>,
        pub research_unlocks: Mutex<Vec<ResearchProject>>,
        pub pending_search_results: Mutex<HashMap<String, Vec<serde_json::Value>>>,
        pub activity_ids: Mutex<slotmap::SlotMap<ActivityId, ()>>,
        pub staff_candidate_ids: Mutex<slotmap::SlotMap<crate::ids::StaffCandidateId, ()>>,
        pub batch_ids: Mutex<slotmap::SlotMap<BatchId, ()>>,
        pub worker_ids: Mutex<slotmap::SlotMap<crate::ids::WorkerId, ()>>,
        pub research_ids: Mutex<slotmap::SlotMap<crate::ids::ResearchId, ()>>,
    }

    #[async_trait]
    impl Store for InMemoryStore {
        async fn load_activities(&self) -> Result<Vec<Activity>, StoreError> {
            Ok(self.activities.lock().await.values().cloned().collect())
        }

        async fn save_activity(&self, activity: &Activity) -> Result<(), StoreError> {
            self.activities.lock().await.insert(activity.id, activity.clone());
            Ok(())
        }

        async fn update_activity(&self, id: ActivityId, patch: ActivityPatch) -> Result<(), StoreError> {
            let mut activities = self.activities.lock().await;
            if let Some(activity) = activities.get_mut(&id) {
                if let Some(completed) = patch.completed_work {
                    activity.completed_work = completed;
                }
                if let Some(status) = patch.status {
                    activity.status = status;
                }
                if let Some(params) = patch.params {
                    activity.params = params;
                }
            }
            Ok(())
        }

        async fn remove_activity(&self, id: ActivityId) -> Result<(), StoreError> {
            self.activities.lock().await.remove(&id);
            Ok(())
        }

        async fn has_active_activity(&self, target_id: TargetId, category: WorkCategory) -> Result<bool, StoreError> {
            let activities = self.activities.lock().await;
            Ok(activities.values().any(|a| {
                a.status == ActivityStatus::Active && a.category == category && a.target_id == Some(target_id)
            }))
        }

        async fn bulk_update_batches(&self, batches: &[WineBatch]) -> Result<(), StoreError> {
            let mut store = self.batches.lock().await;
            for batch in batches {
                store.insert(batch.id, batch.clone());
            }
            Ok(())
        }

        async fn alloc_activity_id(&self) -> Result<ActivityId, StoreError> {
            Ok(self.activity_ids.lock().await.insert(()))
        }

        async fn alloc_staff_candidate_id(&self) -> Result<crate::ids::StaffCandidateId, StoreError> {
            Ok(self.staff_candidate_ids.lock().await.insert(()))
        }

        async fn alloc_batch_id(&self) -> Result<BatchId, StoreError> {
            Ok(self.batch_ids.lock().await.insert(()))
        }

        async fn alloc_worker_id(&self) -> Result<crate::ids::WorkerId, StoreError> {
            Ok(self.worker_ids.lock().await.insert(()))
        }

        async fn alloc_research_id(&self) -> Result<crate::ids::ResearchId, StoreError> {
            Ok(self.research_ids.lock().await.insert(()))
        }

        async fn save_vineyard(&self, vineyard: &Vineyard) -> Result<(), StoreError> {
            self.vineyards.lock().await.insert(vineyard.id, vineyard.clone());
            Ok(())
        }

        async fn insert_batch(&self, batch: WineBatch) -> Result<(), StoreError> {
            self.batches.lock().await.insert(batch.id, batch);
            Ok(())
        }

        async fn save_loan(&self, loan: &Loan) -> Result<(), StoreError> {
            self.loans.lock().await.insert(loan.id, loan.clone());
            Ok(())
        }

        async fn save_worker(&self, worker: &Worker) -> Result<(), StoreError> {
            self.workers.lock().await.insert(worker.id, worker.clone());
            Ok(())
        }

        async fn push_pending_search_result(&self, key: &str, payload: serde_json::Value) -> Result<(), StoreError> {
            self.pending_search_results
                .lock()
                .await
                .entry(key.to_string())
                .or_default()
                .push(payload);
            Ok(())
        }

        async fn load_batches(&self) -> Result<Vec<WineBatch>, StoreError> {
            Ok(self.batches.lock().await.values().cloned().collect())
        }

        async fn load_vineyards(&self) -> Result<Vec<Vineyard>, StoreError> {
            Ok(self.vineyards.lock().await.values().cloned().collect())
        }

        async fn load_workers(&self) -> Result<Vec<Worker>, StoreError> {
            Ok(self.workers.lock().await.values().cloned().collect())
        }

        async fn load_lenders(&self) -> Result<Vec<Lender>, StoreError> {
            Ok(Vec::new())
        }

        async fn load_loans(&self) -> Result<Vec<Loan>, StoreError> {
            Ok(self.loans.lock().await.values().cloned().collect())
        }

        async fn load_research_unlocks(&self) -> Result<Vec<ResearchProject>, StoreError> {
            Ok(self.research_unlocks.lock().await.clone())
        }

        async fn save_research_unlock(&self, project: ResearchProject) -> Result<(), StoreError> {
            self.research_unlocks.lock().await.push(project);
            Ok(())
        }
    }

    #[derive(Default)]
    pub struct InMemoryLedger {
        pub transactions: Mutex<Vec<Transaction>>,
    }

    #[async_trait]
    impl Ledger for InMemoryLedger {
        async fn add_transaction(
            &self,
            amount: Money,
            description: &str,
            category: &str,
            _within_tick: bool,
        ) -> Result<(), StoreError> {
            self.transactions.lock().await.push(Transaction {
                amount,
                description: description.to_string(),
                category: category.to_string(),
                season: Season::Spring,
            });
            Ok(())
        }

        async fn get_transactions(&self, season_filter: Season) -> Result<Vec<Transaction>, StoreError> {
            let transactions = self.transactions.lock().await;
            Ok(transactions
                .iter()
                .filter(|t| t.season == season_filter)
                .cloned()
                .collect())
        }

        async fn get_balance(&self) -> Result<Money, StoreError> {
            Ok(self.transactions.lock().await.iter().map(|t| t.amount).sum())
        }
    }

    #[derive(Default)]
    pub struct InMemoryPrestige {
        pub events: Mutex<Vec<PrestigeEvent>>,
        pub cached_total: Mutex<f64>,
    }

    #[async_trait]
    impl Prestige for InMemoryPrestige {
        async fn insert_prestige_event(&self, event: PrestigeEvent) -> Result<(), StoreError> {
            let mut cached = self.cached_total.lock().await;
            *cached += event.amount_base;
            self.events.lock().await.push(event);
            Ok(())
        }

        async fn get_current_prestige(&self) -> Result<f64, StoreError> {
            Ok(*self.cached_total.lock().await)
        }
    }

    #[derive(Default)]
    pub struct InMemoryNotificationSink {
        pub messages: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl NotificationSink for InMemoryNotificationSink {
        async fn add_message(&self, text: &str, _source_key: &str, _title: &str, _category: &str) {
            self.messages.lock().await.push(text.to_string());
        }
    }

    #[derive(Default)]
    pub struct InMemoryGameUpdateBus {
        pub triggered: Mutex<u32>,
    }

    #[async_trait]
    impl GameUpdateBus for InMemoryGameUpdateBus {
        async fn trigger_game_update(&self) {
            *self.triggered.lock().await += 1;
        }

        async fn trigger_game_update_immediate(&self) {
            *self.triggered.lock().await += 1;
        }
    }
}
