//! Bookkeeping estimator (spec.md §4.2 row "Bookkeeping"). No multiplicative
//! modifiers; instead an additive `loanPenaltyWork` and a 1.1x spillover of
//! unfinished prior bookkeeping (spec.md §8 boundary: "Bookkeeping
//! spillover").

use crate::entities::BookkeepingInput;
use crate::params::GameParameters;
use crate::work::cost::{calculate_total_work, WorkCostInputs};
use crate::work::estimators::Estimate;
use crate::work::factor::WorkFactor;

use crate::activity::WorkCategory;

pub fn calculate_bookkeeping_work(input: &BookkeepingInput, params: &GameParameters) -> Estimate {
    let inputs = WorkCostInputs {
        amount: input.previous_season_transaction_count as f64,
        rate: params.rate(WorkCategory::Bookkeeping),
        initial_work: params.initial(WorkCategory::Bookkeeping),
        ..Default::default()
    };
    let base_work = calculate_total_work(&inputs);

    let spillover = input
        .spillover_remaining_work
        .map(|remaining| (remaining as f64 * 1.1).ceil() as i64)
        .unwrap_or(0);

    let loan_penalty = input.loan_penalty_work.ceil() as i64;

    let total_work = base_work + loan_penalty + spillover;

    let factors = vec![
        WorkFactor::primary(
            "Previous season transactions",
            input.previous_season_transaction_count as f64,
            "tx",
        ),
        WorkFactor::modifier("Loan penalty work", input.loan_penalty_work),
        WorkFactor::modifier("Spillover (x1.1)", spillover as f64),
    ];

    Estimate::new(total_work, factors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::Season;

    #[test]
    fn matches_worked_spillover_example() {
        // spec.md §8 scenario 3.
        let params = GameParameters::default();
        let input = BookkeepingInput {
            previous_season_transaction_count: 40,
            spillover_remaining_work: Some(100),
            loan_penalty_work: 20.0,
            season: Season::Spring,
            year: 2025,
        };
        let estimate = calculate_bookkeeping_work(&input, &params);
        assert_eq!(estimate.total_work, 159);
    }

    #[test]
    fn no_spillover_is_just_base_plus_penalty() {
        let params = GameParameters::default();
        let input = BookkeepingInput {
            previous_season_transaction_count: 40,
            spillover_remaining_work: None,
            loan_penalty_work: 0.0,
            season: Season::Spring,
            year: 2025,
        };
        let estimate = calculate_bookkeeping_work(&input, &params);
        assert_eq!(estimate.total_work, 29);
    }
}
