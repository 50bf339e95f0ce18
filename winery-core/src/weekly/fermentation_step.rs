//! Weekly fermentation step (spec.md §4.8 step 5): batches in
//! `must_fermenting` age one week and convert to `wine` once a
//! temperature-dependent duration has elapsed.

use crate::entities::BatchState;
use crate::error::StoreError;
use crate::external::Store;

const BASE_FERMENTATION_WEEKS: u32 = 6;

pub async fn run(store: &dyn Store) -> Result<(), StoreError> {
    let mut batches = store.load_batches().await?;
    let mut changed = Vec::new();
    for batch in batches.iter_mut().filter(|b| b.state == BatchState::MustFermenting) {
        batch.age_weeks += 1;
        let duration = fermentation_duration(batch.fermentation_temperature);
        if batch.age_weeks >= duration {
            batch.state = BatchState::Wine;
        }
        changed.push(batch.clone());
    }
    if !changed.is_empty() {
        store.bulk_update_batches(&changed).await?;
    }
    Ok(())
}

fn fermentation_duration(temperature: Option<f64>) -> u32 {
    match temperature {
        Some(t) if t < 15.0 => BASE_FERMENTATION_WEEKS + 2,
        Some(t) if t > 25.0 => BASE_FERMENTATION_WEEKS.saturating_sub(2),
        _ => BASE_FERMENTATION_WEEKS,
    }
}
