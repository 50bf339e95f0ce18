//! End-to-end scenarios driven through `WineryEngine`, reproducing the
//! worked examples and tick-boundary properties against the in-memory
//! test doubles.

use std::collections::HashSet;
use std::sync::Arc;

use slotmap::SlotMap;

use winery_core::entities::{BatchState, Vineyard, VineyardStatus, Worker, WineBatch};
use winery_core::external::testing::{InMemoryGameUpdateBus, InMemoryLedger, InMemoryNotificationSink, InMemoryPrestige, InMemoryStore};
use winery_core::external::{GameUpdateBus, Ledger, NotificationSink, Prestige, Store};
use winery_core::ids::worker_id_to_string;
use winery_core::{
    ActivityStatus, CreateActivityOptions, GameClock, GameParameters, Season, TargetId, TimeConstants, WineryEngine, WorkCategory,
};

fn vineyard_id() -> winery_core::VineyardId {
    let mut sm: SlotMap<winery_core::VineyardId, ()> = SlotMap::with_key();
    sm.insert(())
}

fn batch_id() -> winery_core::BatchId {
    let mut sm: SlotMap<winery_core::BatchId, ()> = SlotMap::with_key();
    sm.insert(())
}

struct Fixture {
    engine: WineryEngine,
    store: Arc<InMemoryStore>,
    ledger: Arc<InMemoryLedger>,
    prestige: Arc<InMemoryPrestige>,
}

fn fresh_engine(clock: GameClock, seed: u64) -> Fixture {
    let store = Arc::new(InMemoryStore::default());
    let ledger = Arc::new(InMemoryLedger::default());
    let prestige = Arc::new(InMemoryPrestige::default());
    let notifications = Arc::new(InMemoryNotificationSink::default());
    let bus = Arc::new(InMemoryGameUpdateBus::default());
    let engine = WineryEngine::new(
        store.clone() as Arc<dyn Store>,
        ledger.clone() as Arc<dyn Ledger>,
        prestige.clone() as Arc<dyn Prestige>,
        notifications as Arc<dyn NotificationSink>,
        bus as Arc<dyn GameUpdateBus>,
        GameParameters::default(),
        TimeConstants::default(),
        clock,
        seed,
    );
    Fixture { engine, store, ledger, prestige }
}

/// spec.md §8 scenario 1: a 1.0ha vineyard planted with one assigned
/// worker (workforce=50, field=0.5, unspecialized) has `totalWork = 189`,
/// completes at week 8 (`⌈189/25⌉`), and density lands exactly on target
/// with no per-tick rounding drift.
#[tokio::test]
async fn planting_happy_path_completes_at_week_eight_with_exact_density() {
    let fx = fresh_engine(GameClock::new(1, Season::Spring, 2025), 1);
    let v_id = vineyard_id();
    let mut vineyard = Vineyard::new(v_id, 1.0);
    vineyard.target_density = Some(5000.0);
    vineyard.status = VineyardStatus::Planted;
    fx.store.save_vineyard(&vineyard).await.unwrap();

    let worker_id = fx.store.alloc_worker_id().await.unwrap();
    let worker = Worker::new(worker_id, 50.0, 10.0).with_skill("field", 0.5);
    fx.store.save_worker(&worker).await.unwrap();

    let mut assigned = HashSet::new();
    assigned.insert(worker_id_to_string(worker_id));

    let options = CreateActivityOptions {
        category: WorkCategory::Planting,
        title: "Plant block A".to_string(),
        total_work: 189,
        target_id: Some(TargetId::Vineyard(v_id)),
        params: serde_json::json!({}),
        is_cancellable: true,
        assigned_staff_ids: assigned,
    };
    let activity_id = fx.engine.create_activity(options).await.unwrap();

    let mut last_week = 0;
    for _ in 0..8 {
        let report = fx.engine.process_game_tick().await.unwrap();
        last_week = fx.engine.current_clock().await.week;
        let _ = report;
        if fx.engine.get_all_activities().await.unwrap().iter().all(|a| a.id != activity_id || a.status != ActivityStatus::Active) {
            break;
        }
    }
    assert_eq!(last_week, 9, "25 work/week against 189 total completes after the 8th tick (week rolls to 9)");

    let vineyards = fx.store.load_vineyards().await.unwrap();
    let vineyard = vineyards.iter().find(|v| v.id == v_id).unwrap();
    assert_eq!(vineyard.density, 5000.0);
    assert_eq!(vineyard.status, VineyardStatus::Growing);

    let activities = fx.store.load_activities().await.unwrap();
    assert!(activities.iter().all(|a| a.id != activity_id), "completed activity is removed from the store");
}

/// spec.md §8 scenario 2: crushing a 2000kg batch with Hand Press (work
/// multiplier 1.0), destemming and cold soak on, transitions the batch
/// `grapes -> must_ready` on completion.
#[tokio::test]
async fn crushing_transitions_batch_state_on_completion() {
    let fx = fresh_engine(GameClock::new(1, Season::Spring, 2025), 2);
    let v_id = vineyard_id();
    let b_id = batch_id();
    fx.store
        .insert_batch(WineBatch {
            id: b_id,
            state: BatchState::Grapes,
            quantity_kg: 2000.0,
            source_vineyard: v_id,
            method: None,
            destemmed: false,
            cold_soak: false,
            fermentation_temperature: None,
            age_weeks: 0,
        })
        .await
        .unwrap();

    let worker_id = fx.store.alloc_worker_id().await.unwrap();
    let worker = Worker::new(worker_id, 200.0, 100.0).with_skill("winery", 1.0);
    fx.store.save_worker(&worker).await.unwrap();
    let mut assigned = HashSet::new();
    assigned.insert(worker_id_to_string(worker_id));

    let options = CreateActivityOptions {
        category: WorkCategory::Crushing,
        title: "Crush batch".to_string(),
        total_work: 66,
        target_id: Some(TargetId::Batch(b_id)),
        params: serde_json::json!({"method": "hand_press", "destemmed": true, "cold_soak": true}),
        is_cancellable: false,
        assigned_staff_ids: assigned,
    };
    fx.engine.create_activity(options).await.unwrap();

    for _ in 0..10 {
        fx.engine.process_game_tick().await.unwrap();
        let batches = fx.store.load_batches().await.unwrap();
        if batches.iter().any(|b| b.id == b_id && b.state == BatchState::MustReady) {
            break;
        }
    }

    let batches = fx.store.load_batches().await.unwrap();
    let batch = batches.iter().find(|b| b.id == b_id).unwrap();
    assert_eq!(batch.state, BatchState::MustReady);
    assert!(batch.destemmed);
    assert!(batch.cold_soak);
}

/// spec.md §8 scenario 4: a tick from `(12, Fall, 2025)` lands at
/// `(1, Winter, 2025)`; `onNewYear` does not fire, so vineyard state the
/// new-year hook would touch is untouched.
#[tokio::test]
async fn tick_advances_season_without_year_rollover() {
    let fx = fresh_engine(GameClock::new(12, Season::Fall, 2025), 3);
    let v_id = vineyard_id();
    let vineyard = Vineyard::new(v_id, 1.0);
    fx.store.save_vineyard(&vineyard).await.unwrap();

    fx.engine.process_game_tick().await.unwrap();

    let clock = fx.engine.current_clock().await;
    assert_eq!(clock, GameClock::new(1, Season::Winter, 2025));

    let vineyards = fx.store.load_vineyards().await.unwrap();
    let vineyard = vineyards.iter().find(|v| v.id == v_id).unwrap();
    assert_eq!(vineyard.vine_age_years, 0.0, "onNewYear must not fire on a season-only rollover");
}

/// spec.md §8 boundary: advancing from `(WEEKS_PER_SEASON, Winter, Y)`
/// lands at `(1, Spring, Y+1)` and does fire `onNewYear`.
#[tokio::test]
async fn tick_fires_on_new_year_at_winter_to_spring_boundary() {
    let fx = fresh_engine(GameClock::new(12, Season::Winter, 2025), 4);
    let v_id = vineyard_id();
    let vineyard = Vineyard::new(v_id, 1.0);
    fx.store.save_vineyard(&vineyard).await.unwrap();

    fx.engine.process_game_tick().await.unwrap();

    let clock = fx.engine.current_clock().await;
    assert_eq!(clock, GameClock::new(1, Season::Spring, 2026));

    let vineyards = fx.store.load_vineyards().await.unwrap();
    let vineyard = vineyards.iter().find(|v| v.id == v_id).unwrap();
    assert_eq!(vineyard.vine_age_years, 1.0, "onNewYear increments vine age by one");
}

/// spec.md §8: an activity with no assigned workers is unchanged by a
/// tick.
#[tokio::test]
async fn activity_with_no_workers_does_not_progress() {
    let fx = fresh_engine(GameClock::new(1, Season::Spring, 2025), 5);
    let v_id = vineyard_id();
    let vineyard = Vineyard::new(v_id, 1.0);
    fx.store.save_vineyard(&vineyard).await.unwrap();

    let options = CreateActivityOptions {
        category: WorkCategory::Planting,
        title: "Plant block B".to_string(),
        total_work: 189,
        target_id: Some(TargetId::Vineyard(v_id)),
        params: serde_json::json!({}),
        is_cancellable: true,
        assigned_staff_ids: HashSet::new(),
    };
    let activity_id = fx.engine.create_activity(options).await.unwrap();

    fx.engine.process_game_tick().await.unwrap();

    let activities = fx.store.load_activities().await.unwrap();
    let activity = activities.iter().find(|a| a.id == activity_id).unwrap();
    assert_eq!(activity.completed_work, 0);
}

/// spec.md §8 non-reentrancy: concurrent calls to `processGameTick` result
/// in exactly one clock advancement. The second call is dropped while the
/// first is still in flight.
#[tokio::test]
async fn concurrent_ticks_advance_clock_exactly_once() {
    let fx = fresh_engine(GameClock::new(1, Season::Spring, 2025), 6);
    let engine = Arc::new(fx.engine);

    let e1 = engine.clone();
    let e2 = engine.clone();
    let (r1, r2) = tokio::join!(e1.process_game_tick(), e2.process_game_tick());

    let results = [r1, r2];
    let ok_count = results.iter().filter(|r| r.is_ok()).count();
    assert_eq!(ok_count, 1, "exactly one of two concurrent ticks should run");

    let clock = engine.current_clock().await;
    assert_eq!(clock, GameClock::new(2, Season::Spring, 2025));
}

/// spec.md §8 round-trip: a tick with zero active activities and no weekly
/// events is a pure clock advancement plus the fixed week-1 bookkeeping
/// spawn -- no panics, no spurious mutation of unrelated state.
#[tokio::test]
async fn tick_with_no_activities_only_advances_clock() {
    let fx = fresh_engine(GameClock::new(5, Season::Summer, 2025), 7);
    let before = fx.ledger.get_balance().await.unwrap();

    fx.engine.process_game_tick().await.unwrap();

    let clock = fx.engine.current_clock().await;
    assert_eq!(clock, GameClock::new(6, Season::Summer, 2025));
    let after = fx.ledger.get_balance().await.unwrap();
    assert_eq!(before, after, "no ledger activity without a week-1 bookkeeping cycle or active activities");
}

/// spec.md §8 scenario 3: a bookkeeping activity half-completed at season
/// end spawns a successor with `(remaining * 1.1)` extra work folded in,
/// and the old row is removed. Inserted at week 1 so the tick's
/// week-1-only bookkeeping spawn step fires immediately.
#[tokio::test]
async fn bookkeeping_spillover_carries_into_new_season_activity() {
    let fx = fresh_engine(GameClock::new(12, Season::Fall, 2025), 8);
    fx.prestige
        .insert_prestige_event(winery_core::external::PrestigeEvent {
            id: "seed".to_string(),
            event_type: "seed".to_string(),
            amount_base: 100.0,
            created_game_week: 0,
            decay_rate: 1.0,
            source_id: None,
            payload: None,
        })
        .await
        .unwrap();

    let options = CreateActivityOptions {
        category: WorkCategory::Bookkeeping,
        title: "Bookkeeping for Fall 2025".to_string(),
        total_work: 200,
        target_id: None,
        params: serde_json::json!({}),
        is_cancellable: false,
        assigned_staff_ids: HashSet::new(),
    };
    let old_id = fx.engine.create_activity(options).await.unwrap();
    fx.store
        .update_activity(
            old_id,
            winery_core::external::ActivityPatch { completed_work: Some(100), ..Default::default() },
        )
        .await
        .unwrap();

    fx.engine.process_game_tick().await.unwrap();

    let activities = fx.store.load_activities().await.unwrap();
    assert!(activities.iter().all(|a| a.id != old_id), "spillover predecessor row is removed");
    assert!(
        activities.iter().any(|a| a.category == WorkCategory::Bookkeeping && a.status == ActivityStatus::Active),
        "a successor bookkeeping activity is spawned for the new season"
    );

    let prestige_after = fx.prestige.get_current_prestige().await.unwrap();
    assert!(prestige_after < 100.0, "a prestige-decaying penalty event is applied for the spillover");
}
