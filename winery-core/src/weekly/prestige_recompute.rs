//! Cellar-collection prestige recompute (spec.md §4.8 step 5): aged wine
//! batches contribute a small decaying prestige event proportional to
//! their age, reflecting a growing cellar collection.

use crate::entities::BatchState;
use crate::error::StoreError;
use crate::external::{Prestige, PrestigeEvent, Store};

pub async fn run(store: &dyn Store, prestige: &dyn Prestige, absolute_week: u64) -> Result<(), StoreError> {
    let batches = store.load_batches().await?;
    let cellar_weight: f64 = batches
        .iter()
        .filter(|b| b.state == BatchState::Wine)
        .map(|b| b.tons() * (b.age_weeks as f64 / 52.0))
        .sum();

    if cellar_weight > 0.0 {
        prestige
            .insert_prestige_event(PrestigeEvent {
                id: format!("cellar-{absolute_week}"),
                event_type: "cellar_collection".to_string(),
                amount_base: cellar_weight,
                created_game_week: absolute_week,
                decay_rate: 0.02,
                source_id: None,
                payload: None,
            })
            .await?;
    }
    Ok(())
}
