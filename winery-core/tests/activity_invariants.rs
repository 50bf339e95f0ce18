//! Property-style invariant checks independent of the full tick pipeline
//! (spec.md §8 quantified invariants and round-trip properties).

use std::collections::HashSet;
use std::sync::Arc;

use slotmap::SlotMap;

use winery_core::entities::{Vineyard, VineyardStatus};
use winery_core::external::testing::{InMemoryGameUpdateBus, InMemoryLedger, InMemoryNotificationSink, InMemoryPrestige, InMemoryStore};
use winery_core::external::{GameUpdateBus, Ledger, NotificationSink, Prestige, Store};
use winery_core::{ActivityStatus, CreateActivityOptions, GameClock, GameParameters, Season, TargetId, TimeConstants, WineryEngine, WorkCategory};

fn vineyard_id() -> winery_core::VineyardId {
    let mut sm: SlotMap<winery_core::VineyardId, ()> = SlotMap::with_key();
    sm.insert(())
}

async fn engine_with_vineyard(clock: GameClock, vineyard: &Vineyard) -> (WineryEngine, Arc<InMemoryStore>) {
    let store = Arc::new(InMemoryStore::default());
    let ledger = Arc::new(InMemoryLedger::default());
    let prestige = Arc::new(InMemoryPrestige::default());
    let notifications = Arc::new(InMemoryNotificationSink::default());
    let bus = Arc::new(InMemoryGameUpdateBus::default());
    store.save_vineyard(vineyard).await.unwrap();
    let engine = WineryEngine::new(
        store.clone() as Arc<dyn Store>,
        ledger as Arc<dyn Ledger>,
        prestige as Arc<dyn Prestige>,
        notifications as Arc<dyn NotificationSink>,
        bus as Arc<dyn GameUpdateBus>,
        GameParameters::default(),
        TimeConstants::default(),
        clock,
        42,
    );
    (engine, store)
}

/// spec.md §8: clearing vegetation and debris both reset their own
/// overgrowth counter AND `yearsSinceLastClearing`; uproot/replant reset
/// only their own counter.
#[tokio::test]
async fn clearing_vegetation_and_debris_reset_years_since_last_clearing() {
    let v_id = vineyard_id();
    let mut vineyard = Vineyard::new(v_id, 1.0);
    vineyard.overgrowth.vegetation = 3.0;
    vineyard.overgrowth.debris = 2.0;
    vineyard.years_since_last_clearing = 5.0;
    let (engine, store) = engine_with_vineyard(GameClock::new(1, Season::Spring, 2025), &vineyard).await;

    let options = CreateActivityOptions {
        category: WorkCategory::ClearingVegetation,
        title: "Clear vegetation".to_string(),
        total_work: 1,
        target_id: Some(TargetId::Vineyard(v_id)),
        params: serde_json::json!({}),
        is_cancellable: true,
        assigned_staff_ids: HashSet::new(),
    };
    let activity_id = engine.create_activity(options).await.unwrap();

    // Force completion without needing a worker: patch completed_work
    // directly, mirroring what `progressAll` would do once total_work is
    // reached.
    store
        .update_activity(
            activity_id,
            winery_core::external::ActivityPatch { completed_work: Some(1), ..Default::default() },
        )
        .await
        .unwrap();

    engine.process_game_tick().await.unwrap();

    let vineyards = store.load_vineyards().await.unwrap();
    let vineyard = vineyards.iter().find(|v| v.id == v_id).unwrap();
    assert_eq!(vineyard.overgrowth.vegetation, 0.0);
    assert_eq!(vineyard.years_since_last_clearing, 0.0);
}

/// spec.md §8: uproot clearing resets its own overgrowth counter and the
/// vineyard's planting state, but does not touch `yearsSinceLastClearing`.
#[tokio::test]
async fn clearing_uproot_resets_planting_state_not_clearing_years() {
    let v_id = vineyard_id();
    let mut vineyard = Vineyard::new(v_id, 1.0);
    vineyard.overgrowth.uproot = 4.0;
    vineyard.years_since_last_clearing = 7.0;
    vineyard.density = 5000.0;
    vineyard.grape = Some("Pinot Noir".to_string());
    let (engine, store) = engine_with_vineyard(GameClock::new(1, Season::Spring, 2025), &vineyard).await;

    let options = CreateActivityOptions {
        category: WorkCategory::ClearingUproot,
        title: "Uproot".to_string(),
        total_work: 1,
        target_id: Some(TargetId::Vineyard(v_id)),
        params: serde_json::json!({}),
        is_cancellable: true,
        assigned_staff_ids: HashSet::new(),
    };
    let activity_id = engine.create_activity(options).await.unwrap();
    store
        .update_activity(
            activity_id,
            winery_core::external::ActivityPatch { completed_work: Some(1), ..Default::default() },
        )
        .await
        .unwrap();

    engine.process_game_tick().await.unwrap();

    let vineyards = store.load_vineyards().await.unwrap();
    let vineyard = vineyards.iter().find(|v| v.id == v_id).unwrap();
    assert_eq!(vineyard.overgrowth.uproot, 0.0);
    assert_eq!(vineyard.density, 0.0);
    assert!(vineyard.grape.is_none());
    assert_eq!(vineyard.years_since_last_clearing, 7.0, "uproot does not reset yearsSinceLastClearing");
}

/// spec.md §8: serialising and deserialising an `Activity` via the store
/// yields an equal activity.
#[tokio::test]
async fn activity_round_trips_through_store() {
    let store = InMemoryStore::default();
    let v_id = vineyard_id();
    let options = CreateActivityOptions {
        category: WorkCategory::Planting,
        title: "Round trip".to_string(),
        total_work: 42,
        target_id: Some(TargetId::Vineyard(v_id)),
        params: serde_json::json!({"grape": "Merlot"}),
        is_cancellable: true,
        assigned_staff_ids: HashSet::new(),
    };
    let bus = InMemoryGameUpdateBus::default();
    let id = winery_core::ActivityStore::create(&store, &bus, GameClock::new(1, Season::Spring, 2025), options)
        .await
        .unwrap();

    let activity = winery_core::ActivityStore::get(&store, id).await.unwrap().unwrap();
    let json = serde_json::to_string(&activity).unwrap();
    let round_tripped: winery_core::Activity = serde_json::from_str(&json).unwrap();

    assert_eq!(activity.id, round_tripped.id);
    assert_eq!(activity.total_work, round_tripped.total_work);
    assert_eq!(activity.completed_work, round_tripped.completed_work);
    assert_eq!(activity.status, round_tripped.status);
    assert_eq!(activity.params, round_tripped.params);
}

/// spec.md §8: creating a duplicate target-exclusive activity on the same
/// vineyard is rejected.
#[tokio::test]
async fn duplicate_target_exclusive_activity_is_rejected() {
    let v_id = vineyard_id();
    let mut vineyard = Vineyard::new(v_id, 1.0);
    vineyard.status = VineyardStatus::Barren;
    let (engine, _store) = engine_with_vineyard(GameClock::new(1, Season::Spring, 2025), &vineyard).await;

    let make_options = || CreateActivityOptions {
        category: WorkCategory::Planting,
        title: "Plant".to_string(),
        total_work: 10,
        target_id: Some(TargetId::Vineyard(v_id)),
        params: serde_json::json!({}),
        is_cancellable: true,
        assigned_staff_ids: HashSet::new(),
    };

    engine.create_activity(make_options()).await.unwrap();
    let second = engine.create_activity(make_options()).await;
    assert!(second.is_err(), "a second active Planting activity on the same vineyard must be rejected");
}

/// spec.md §8: cancelling a non-cancellable activity is a no-op that
/// reports `false` and leaves it active.
#[tokio::test]
async fn cancel_refuses_non_cancellable_activity() {
    let v_id = vineyard_id();
    let vineyard = Vineyard::new(v_id, 1.0);
    let (engine, store) = engine_with_vineyard(GameClock::new(1, Season::Spring, 2025), &vineyard).await;

    let options = CreateActivityOptions {
        category: WorkCategory::Bookkeeping,
        title: "Bookkeeping".to_string(),
        total_work: 10,
        target_id: None,
        params: serde_json::json!({}),
        is_cancellable: false,
        assigned_staff_ids: HashSet::new(),
    };
    let id = engine.create_activity(options).await.unwrap();

    let cancelled = engine.cancel_activity(id).await.unwrap();
    assert!(!cancelled);

    let activities = store.load_activities().await.unwrap();
    let activity = activities.iter().find(|a| a.id == id).unwrap();
    assert_eq!(activity.status, ActivityStatus::Active);
}
