//! Wage payment, run on week 1 of each season (spec.md §4.8 step 5:
//! "tasks that depend on week-1-of-season are added conditionally").

use crate::error::StoreError;
use crate::external::{Ledger, Store};

pub async fn run(store: &dyn Store, ledger: &dyn Ledger) -> Result<(), StoreError> {
    let workers = store.load_workers().await?;
    let total_wages: f64 = workers.iter().map(|w| w.wage * w.workforce / 50.0).sum();
    if total_wages > 0.0 {
        ledger.add_transaction(-total_wages, "Weekly wages", "staffing", true).await?;
    }
    Ok(())
}
