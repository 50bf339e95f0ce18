//! `WineryEngine`: the facade tying the activity store, game clock, tick
//! orchestrator, and external collaborators together (spec.md §6 "The
//! core exposes"). Construction takes ownership of every trait object the
//! host supplies; callers reach everything else through the methods here.

use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use tokio::sync::Mutex;

use crate::activity::{Activity, CreateActivityOptions};
use crate::clock::{GameClock, TimeConstants};
use crate::error::{EngineError, ReentrancyError};
use crate::external::{GameUpdateBus, Ledger, NotificationSink, Prestige, Store};
use crate::ids::ActivityId;
use crate::params::GameParameters;
use crate::rng::EngineRng;
use crate::store::ActivityStore;
use crate::tick::{self, TickReport};

pub struct WineryEngine {
    pub(crate) store: Arc<dyn Store>,
    pub(crate) ledger: Arc<dyn Ledger>,
    pub(crate) prestige: Arc<dyn Prestige>,
    pub(crate) notifications: Arc<dyn NotificationSink>,
    pub(crate) bus: Arc<dyn GameUpdateBus>,
    pub(crate) params: GameParameters,
    pub(crate) time: TimeConstants,
    pub(crate) clock: Mutex<GameClock>,
    pub(crate) rng: Mutex<EngineRng>,
    pub(crate) tick_in_progress: AtomicBool,
    pub(crate) last_achievement_check_week: Mutex<Option<u64>>,
}

impl WineryEngine {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        store: Arc<dyn Store>,
        ledger: Arc<dyn Ledger>,
        prestige: Arc<dyn Prestige>,
        notifications: Arc<dyn NotificationSink>,
        bus: Arc<dyn GameUpdateBus>,
        params: GameParameters,
        time: TimeConstants,
        initial_clock: GameClock,
        rng_seed: u64,
    ) -> Self {
        Self {
            store,
            ledger,
            prestige,
            notifications,
            bus,
            params,
            time,
            clock: Mutex::new(initial_clock),
            rng: Mutex::new(EngineRng::from_seed(rng_seed)),
            tick_in_progress: AtomicBool::new(false),
            last_achievement_check_week: Mutex::new(None),
        }
    }

    pub async fn create_activity(&self, options: CreateActivityOptions) -> Result<ActivityId, EngineError> {
        let clock = *self.clock.lock().await;
        ActivityStore::create(self.store.as_ref(), self.bus.as_ref(), clock, options)
            .await
            .map_err(EngineError::from)
    }

    pub async fn cancel_activity(&self, id: ActivityId) -> Result<bool, EngineError> {
        ActivityStore::cancel(self.store.as_ref(), self.bus.as_ref(), id)
            .await
            .map_err(EngineError::from)
    }

    pub async fn get_activity_progress(&self, id: ActivityId) -> Result<Option<(Activity, f64)>, EngineError> {
        ActivityStore::progress_snapshot(self.store.as_ref(), &self.params, id)
            .await
            .map_err(EngineError::from)
    }

    pub async fn get_all_activities(&self) -> Result<Vec<Activity>, EngineError> {
        self.store.load_activities().await.map_err(EngineError::from)
    }

    pub async fn process_game_tick(&self) -> Result<TickReport, ReentrancyError> {
        tick::process_game_tick(self).await
    }

    pub fn params(&self) -> &GameParameters {
        &self.params
    }

    pub async fn current_clock(&self) -> GameClock {
        *self.clock.lock().await
    }
}
