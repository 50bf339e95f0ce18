//! Weekly subsystems fanned out independently inside the tick orchestrator
//! (spec.md §4.8 step 5): no mutual data dependency, so they run
//! concurrently via `tokio::join!` and each writes through its own ledger/
//! prestige/store call rather than sharing mutable state.

pub mod achievements;
pub mod aging;
pub mod feature_risk;
pub mod fermentation_step;
pub mod loan_payments;
pub mod orders;
pub mod prestige_recompute;
pub mod wages;
