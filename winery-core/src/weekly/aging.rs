//! Bottled-wine aging increment (spec.md §4.8 step 5): `wine`-state
//! batches age one week regardless of fermentation progress.

use crate::entities::BatchState;
use crate::error::StoreError;
use crate::external::Store;

pub async fn run(store: &dyn Store) -> Result<(), StoreError> {
    let mut batches = store.load_batches().await?;
    let mut changed = Vec::new();
    for batch in batches.iter_mut().filter(|b| b.state == BatchState::Wine) {
        batch.age_weeks += 1;
        changed.push(batch.clone());
    }
    if !changed.is_empty() {
        store.bulk_update_batches(&changed).await?;
    }
    Ok(())
}
