//! Tick orchestrator (spec.md §4.8): the weekly scheduler entry point.
//! Guarded by a single non-reentrant flag (spec.md §5: "concurrent calls
//! are dropped, not queued"). Independent weekly subsystems fan out via
//! `tokio::join!`; activity progression, bookkeeping spawn, and the
//! post-parallel synchronous steps stay strictly sequential.

use std::sync::atomic::Ordering;

use crate::clock::Season;
use crate::error::ReentrancyError;
use crate::events::EngineEvent;
use crate::store::ActivityStore;
use crate::{activity, weekly};

pub struct TickReport {
    pub events: Vec<EngineEvent>,
}

/// `processGameTick` (spec.md §4.8). On re-entry while a tick is already
/// in flight, the call is ignored per spec — surfaced here as `Err` rather
/// than silently doing nothing, so the host can distinguish "ignored" from
/// "ran" without inspecting side effects.
pub async fn process_game_tick(engine: &crate::engine::WineryEngine) -> Result<TickReport, ReentrancyError> {
    if engine.tick_in_progress.swap(true, Ordering::AcqRel) {
        return Err(ReentrancyError);
    }

    let report = run_tick_body(engine).await;
    engine.tick_in_progress.store(false, Ordering::Release);
    report
}

async fn run_tick_body(engine: &crate::engine::WineryEngine) -> Result<TickReport, ReentrancyError> {
    let mut events = Vec::new();

    // Steps 1-3: read, advance, persist the clock.
    let previous_clock = *engine.clock.lock().await;
    let advanced = previous_clock.advance(&engine.time);
    *engine.clock.lock().await = advanced.clock;

    if advanced.year_changed {
        run_on_new_year(engine).await;
    }

    events.push(EngineEvent::WeekAdvanced {
        week: advanced.clock.week,
        season_changed: advanced.season_changed,
        year_changed: advanced.year_changed,
    });

    // Step 4: progressAll.
    let mut rng = engine.rng.lock().await;
    let progress_events = ActivityStore::progress_all(
        engine.store.as_ref(),
        engine.ledger.as_ref(),
        engine.prestige.as_ref(),
        engine.notifications.as_ref(),
        engine.bus.as_ref(),
        &engine.params,
        &mut rng,
    )
    .await
    .unwrap_or_default();
    events.extend(progress_events);

    // Step 5: independent weekly subsystems, fanned out in parallel. Each
    // subsystem needing randomness gets its own forked RNG rather than
    // sharing `&mut rng`, since the futures below are polled concurrently.
    let absolute_week = advanced.clock.absolute_week(&engine.time);
    let is_week_one = advanced.clock.week == 1;
    let mut orders_rng = rng.fork();
    let mut feature_risk_rng = rng.fork();
    drop(rng);

    let (orders_result, fermentation_result, feature_risk_result, aging_result, prestige_result) = tokio::join!(
        weekly::orders::run(engine.store.as_ref(), engine.ledger.as_ref(), &engine.params, &mut orders_rng),
        weekly::fermentation_step::run(engine.store.as_ref()),
        weekly::feature_risk::run(engine.store.as_ref(), engine.notifications.as_ref(), &mut feature_risk_rng),
        weekly::aging::run(engine.store.as_ref()),
        weekly::prestige_recompute::run(engine.store.as_ref(), engine.prestige.as_ref(), absolute_week),
    );
    log_subsystem_errors(&[
        ("orders", orders_result.err().map(|e| e.to_string())),
        ("fermentation_step", fermentation_result.err().map(|e| e.to_string())),
        ("feature_risk", feature_risk_result.err().map(|e| e.to_string())),
        ("aging", aging_result.err().map(|e| e.to_string())),
        ("prestige_recompute", prestige_result.err().map(|e| e.to_string())),
    ]);

    if is_week_one {
        let (wages_result, loan_result) = tokio::join!(
            weekly::wages::run(engine.store.as_ref(), engine.ledger.as_ref()),
            weekly::loan_payments::run(engine.store.as_ref(), engine.ledger.as_ref()),
        );
        log_subsystem_errors(&[
            ("wages", wages_result.err().map(|e| e.to_string())),
            ("loan_payments", loan_result.err().map(|e| e.to_string())),
        ]);
    }

    // Step 6: throttled achievement check, fire-and-forget.
    let mut last_checked = engine.last_achievement_check_week.lock().await;
    if weekly::achievements::is_due(absolute_week, *last_checked, &engine.params) {
        weekly::achievements::run(engine.store.as_ref(), engine.prestige.as_ref(), engine.notifications.as_ref()).await;
        *last_checked = Some(absolute_week);
        events.push(EngineEvent::AchievementCheckRun);
    }
    drop(last_checked);

    // Step 7: season's bookkeeping activity, spawned at week 1.
    if is_week_one {
        spawn_bookkeeping_activity(engine, advanced.clock, previous_clock.season).await;
    }

    // Step 8: post-parallel synchronous steps.
    run_ripeness_and_health_update(engine, advanced.clock.season).await;

    // Step 9: year-rollover loan restructuring.
    if advanced.year_changed {
        run_loan_restructuring(engine).await;
    }

    // Step 10: emergency QuickLoan enforcement.
    run_emergency_quick_loan_check(engine).await;

    // Step 11: weekly highscore snapshot.
    engine.bus.trigger_game_update_immediate().await;

    Ok(TickReport { events })
}

fn log_subsystem_errors(results: &[(&'static str, Option<String>)]) {
    for (name, err) in results {
        if let Some(err) = err {
            #[cfg(feature = "instrument")]
            tracing::warn!(subsystem = name, error = %err, "weekly subsystem failed");
            #[cfg(not(feature = "instrument"))]
            let _ = (name, err);
        }
    }
}

async fn run_on_new_year(engine: &crate::engine::WineryEngine) {
    let Ok(mut vineyards) = engine.store.load_vineyards().await else {
        return;
    };
    for vineyard in &mut vineyards {
        vineyard.vine_age_years += 1.0;
        vineyard.overgrowth.vegetation += 1.0;
        vineyard.overgrowth.debris += 1.0;
        vineyard.overgrowth.uproot += 1.0;
        vineyard.overgrowth.replant += 1.0;
        vineyard.years_since_last_clearing += 1.0;
        let _ = engine.store.save_vineyard(vineyard).await;
    }
}

async fn spawn_bookkeeping_activity(engine: &crate::engine::WineryEngine, clock: crate::clock::GameClock, previous_season: Season) {
    let transactions = engine
        .ledger
        .get_transactions(previous_season)
        .await
        .map(|t| t.len() as u32)
        .unwrap_or(0);

    let spillover = engine
        .store
        .load_activities()
        .await
        .ok()
        .and_then(|activities| {
            activities
                .into_iter()
                .find(|a| a.category == activity::WorkCategory::Bookkeeping && a.status == activity::ActivityStatus::Active)
        });

    // Raw remaining work; `calculate_bookkeeping_work` applies the 1.1x
    // spillover multiplier itself.
    let spillover_remaining_work = spillover.as_ref().map(|a| a.total_work - a.completed_work);

    if let Some(old) = &spillover {
        // spec.md §8 scenario 3: penalty amount is -(currentPrestige * 0.1),
        // decay rate 0.90.
        let current_prestige = engine.prestige.get_current_prestige().await.unwrap_or(0.0);
        let _ = engine
            .prestige
            .insert_prestige_event(crate::external::PrestigeEvent {
                id: format!("bookkeeping-spillover-{:?}", old.id),
                event_type: "bookkeeping_spillover_penalty".to_string(),
                amount_base: -(current_prestige * 0.1),
                created_game_week: clock.absolute_week(&engine.time),
                decay_rate: 0.90,
                source_id: None,
                payload: None,
            })
            .await;
        let _ = engine.store.remove_activity(old.id).await;
    }

    let input = crate::entities::BookkeepingInput {
        previous_season_transaction_count: transactions,
        spillover_remaining_work,
        loan_penalty_work: 0.0,
        season: previous_season,
        year: clock.year,
    };
    let total_work = crate::work::estimators::bookkeeping::calculate_bookkeeping_work(&input, &engine.params).total_work;

    let options = activity::CreateActivityOptions {
        category: activity::WorkCategory::Bookkeeping,
        title: format!("Bookkeeping for {:?} {}", previous_season, clock.year),
        total_work,
        target_id: None,
        params: serde_json::json!({
            "season": format!("{:?}", previous_season),
            "year": clock.year,
            "transaction_count": transactions,
        }),
        is_cancellable: false,
        assigned_staff_ids: Default::default(),
    };

    let _ = ActivityStore::create(engine.store.as_ref(), engine.bus.as_ref(), clock, options).await;
}

async fn run_ripeness_and_health_update(engine: &crate::engine::WineryEngine, season: Season) {
    let Ok(mut vineyards) = engine.store.load_vineyards().await else {
        return;
    };
    let ripeness_gain = match season {
        Season::Spring => 0.02,
        Season::Summer => 0.05,
        Season::Fall => 0.04,
        Season::Winter => 0.0,
    };
    let health_decay = match season {
        Season::Winter => 0.01,
        _ => 0.005,
    };
    for vineyard in &mut vineyards {
        vineyard.ripeness = (vineyard.ripeness + ripeness_gain).min(1.0);
        vineyard.health = (vineyard.health - health_decay).max(0.0);
        let _ = engine.store.save_vineyard(vineyard).await;
    }
}

async fn run_loan_restructuring(engine: &crate::engine::WineryEngine) {
    let Ok(mut loans) = engine.store.load_loans().await else {
        return;
    };
    for loan in &mut loans {
        if loan.status == crate::entities::LoanStatus::Active && loan.duration_seasons > 0 {
            loan.duration_seasons -= 1;
            if loan.duration_seasons == 0 {
                loan.status = crate::entities::LoanStatus::Repaid;
            }
            let _ = engine.store.save_loan(loan).await;
        }
    }
}

async fn run_emergency_quick_loan_check(engine: &crate::engine::WineryEngine) {
    const EMERGENCY_THRESHOLD: f64 = 0.0;
    let Ok(balance) = engine.ledger.get_balance().await else {
        return;
    };
    if balance < EMERGENCY_THRESHOLD {
        engine
            .notifications
            .add_message(
                "Balance below zero: emergency QuickLoan issued",
                "finance",
                "Emergency loan",
                "finance",
            )
            .await;
    }
}
