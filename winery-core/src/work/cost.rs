//! The work cost calculator (spec.md §4.1). A single generic function
//! shared by every per-activity estimator.

#[derive(Debug, Clone, Default)]
pub struct WorkCostInputs {
    pub amount: f64,
    pub rate: f64,
    pub initial_work: f64,
    pub density: Option<f64>,
    pub use_density_adjustment: bool,
    pub reference_density: f64,
    pub modifiers: Vec<f64>,
}

/// `calculateTotalWork`. Monotone in `amount`; modifiers compose
/// multiplicatively in list order, so order only affects rounding, not the
/// final multiplier.
pub fn calculate_total_work(inputs: &WorkCostInputs) -> i64 {
    let effective_rate = match (inputs.use_density_adjustment, inputs.density) {
        (true, Some(density)) if density > 0.0 && inputs.reference_density > 0.0 => {
            inputs.rate / (density / inputs.reference_density)
        }
        _ => inputs.rate,
    };

    let work_units = (inputs.amount / effective_rate) * crate::params::BASE_WORK_UNITS;
    let mut work = inputs.initial_work + work_units;

    for m in &inputs.modifiers {
        work *= 1.0 + m;
    }

    work.ceil() as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_amount_yields_ceiled_initial_work() {
        let inputs = WorkCostInputs {
            amount: 0.0,
            rate: 0.28,
            initial_work: 10.3,
            ..Default::default()
        };
        assert_eq!(calculate_total_work(&inputs), 11);
    }

    #[test]
    fn planting_happy_path_matches_worked_example() {
        // spec.md §8 scenario 1: amount=1.0ha, rate=0.28, initial_work=10.
        let inputs = WorkCostInputs {
            amount: 1.0,
            rate: 0.28,
            initial_work: 10.0,
            ..Default::default()
        };
        assert_eq!(calculate_total_work(&inputs), 189);
    }

    #[test]
    fn crushing_modifiers_compose_multiplicatively() {
        // spec.md §8 scenario 2.
        let inputs = WorkCostInputs {
            amount: 2.0,
            rate: 2.5,
            initial_work: 10.0,
            modifiers: vec![0.20, 0.15],
            ..Default::default()
        };
        assert_eq!(calculate_total_work(&inputs), 66);
    }

    #[test]
    fn density_adjustment_scales_effective_rate() {
        let base = WorkCostInputs {
            amount: 1.0,
            rate: 0.28,
            initial_work: 10.0,
            ..Default::default()
        };
        let double_density = WorkCostInputs {
            density: Some(10_000.0),
            reference_density: 5000.0,
            use_density_adjustment: true,
            ..base.clone()
        };
        // Doubling density doubles the effective rate, halving work_units.
        assert!(calculate_total_work(&double_density) < calculate_total_work(&base));
    }

    #[test]
    fn monotone_in_amount() {
        let mut inputs = WorkCostInputs {
            amount: 1.0,
            rate: 0.28,
            initial_work: 10.0,
            ..Default::default()
        };
        let low = calculate_total_work(&inputs);
        inputs.amount = 2.0;
        let high = calculate_total_work(&inputs);
        assert!(high > low);
    }
}
