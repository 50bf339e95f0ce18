//! Customer/order generation (spec.md §4.8 step 5): samples demand for
//! completed wine batches and records a sale transaction.

use crate::entities::BatchState;
use crate::error::StoreError;
use crate::external::{Ledger, Store};
use crate::params::GameParameters;
use crate::rng::EngineRng;

pub async fn run(
    store: &dyn Store,
    ledger: &dyn Ledger,
    params: &GameParameters,
    rng: &mut EngineRng,
) -> Result<(), StoreError> {
    let batches = store.load_batches().await?;
    let wine_batches: Vec<_> = batches.iter().filter(|b| b.state == BatchState::Wine).collect();
    if wine_batches.is_empty() {
        return Ok(());
    }

    let multiplier = params
        .economy_sales_multipliers
        .get(&params.economy_phase)
        .copied()
        .unwrap_or(1.0);

    for batch in wine_batches {
        if !rng.gen_bool(0.3) {
            continue;
        }
        let price_per_ton = rng.gen_range_f64(800.0, 2_500.0);
        let revenue = batch.tons() * price_per_ton * multiplier;
        ledger.add_transaction(revenue, "Wine sale", "sales", true).await?;
    }
    Ok(())
}
