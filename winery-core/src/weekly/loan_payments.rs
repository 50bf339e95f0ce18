//! Scheduled loan installment debits, run on week 1 of each season
//! alongside wages (spec.md §4.8 step 5).

use crate::entities::LoanStatus;
use crate::error::StoreError;
use crate::external::{Ledger, Store};

pub async fn run(store: &dyn Store, ledger: &dyn Ledger) -> Result<(), StoreError> {
    let loans = store.load_loans().await?;
    for loan in loans.iter().filter(|l| l.status == LoanStatus::Active) {
        let installment = loan.principal / loan.duration_seasons.max(1) as f64;
        ledger
            .add_transaction(-installment, "Loan installment", "finance", true)
            .await?;
    }
    Ok(())
}
