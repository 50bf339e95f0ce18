//! Weekly feature-risk accrual and effect application (spec.md §4.8 step
//! 5): every batch accrues a small, temperature-sensitive chance of
//! developing a "feature" (an oxidation/fault event); once triggered the
//! effect is applied as a permanent fragility increase.

use crate::entities::BatchState;
use crate::error::StoreError;
use crate::external::{NotificationSink, Store};
use crate::rng::EngineRng;

const BASE_WEEKLY_RISK: f64 = 0.01;

pub async fn run(store: &dyn Store, notifications: &dyn NotificationSink, rng: &mut EngineRng) -> Result<(), StoreError> {
    let mut vineyards = store.load_vineyards().await?;
    let mut changed = Vec::new();
    for vineyard in vineyards.iter_mut() {
        let risk = BASE_WEEKLY_RISK * (1.0 + vineyard.fragility);
        if rng.gen_bool(risk.clamp(0.0, 1.0)) {
            vineyard.fragility = (vineyard.fragility + 0.05).min(1.0);
            notifications
                .add_message(
                    &format!("Vineyard {:?} developed a new fault risk", vineyard.id),
                    "feature_risk",
                    "Fault detected",
                    "vineyard",
                )
                .await;
        }
        changed.push(vineyard.clone());
    }
    for vineyard in &changed {
        store.save_vineyard(vineyard).await?;
    }

    let batches = store.load_batches().await?;
    let fermenting: Vec<_> = batches.into_iter().filter(|b| b.state == BatchState::MustFermenting).collect();
    if !fermenting.is_empty() {
        store.bulk_update_batches(&fermenting).await?;
    }
    Ok(())
}
