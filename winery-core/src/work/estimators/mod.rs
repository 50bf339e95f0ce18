//! Per-activity work estimators (spec.md §4.2). Each is pure over
//! `(input entity, options, parameter tables, game clock)`: no I/O, no
//! random draws (the non-deterministic fee/range cases mentioned in the
//! spec — lender offer counts, candidate counts — are sampled by the
//! *handler* at completion time via the injectable RNG, not by the
//! estimator, which only produces the work/cost figure).

pub mod bookkeeping;
pub mod clearing;
pub mod crushing;
pub mod fermentation;
pub mod harvesting;
pub mod hiring;
pub mod land_search;
pub mod lender_search;
pub mod planting;
pub mod research;
pub mod staff_search;
pub mod take_loan;

use crate::work::factor::WorkFactor;

/// Common shape every estimator returns: `(totalWork, factors, cost?,
/// extra?)` from spec.md §4.2.
#[derive(Debug, Clone)]
pub struct Estimate {
    pub total_work: i64,
    pub factors: Vec<WorkFactor>,
    pub cost: Option<f64>,
}

impl Estimate {
    pub fn new(total_work: i64, factors: Vec<WorkFactor>) -> Self {
        Self {
            total_work,
            factors,
            cost: None,
        }
    }

    pub fn with_cost(mut self, cost: f64) -> Self {
        self.cost = Some(cost);
        self
    }
}
