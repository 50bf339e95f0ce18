//! Search cost/work shaping (spec.md §4.6), used by the land-search and
//! lender-search estimators. Take-loan uses its own delta-based multiplier
//! (see `work::estimators::take_loan`) per spec.md §9's resolution of the
//! two competing take-loan formulations in the source.

/// One active user constraint: a base modifier in [1.1, 1.8] scaled by how
/// restrictive the constraint is (its intensity, in [1, ~3.5]).
#[derive(Debug, Clone, Copy)]
pub struct Constraint {
    pub base_modifier: f64,
    pub intensity: f64,
}

impl Constraint {
    pub fn new(base_modifier: f64, intensity: f64) -> Self {
        Self {
            base_modifier: base_modifier.clamp(1.1, 1.8),
            intensity: intensity.clamp(1.0, 3.5),
        }
    }

    fn value(&self) -> f64 {
        self.base_modifier * self.intensity
    }
}

/// Intensity from an exclusion ratio: how much of the option space a
/// constraint removes, mapped onto [1, 3.5].
pub fn exclusion_ratio_intensity(excluded: f64, total: f64) -> f64 {
    if total <= 0.0 {
        return 1.0;
    }
    let ratio = (excluded / total).clamp(0.0, 1.0);
    1.0 + ratio * 2.5
}

/// Intensity for a scalar adjustment (piecewise near the reference value,
/// exponential beyond it), mapped onto [1, 3.5].
pub fn piecewise_exponential_intensity(delta_fraction: f64) -> f64 {
    let d = delta_fraction.abs();
    (1.0 + d + d.powf(1.5)).min(3.5)
}

/// Step 3: average-then-power combination of active constraints.
/// `multiplier = mean(constraint values)^count`.
pub fn combine_constraints(constraints: &[Constraint]) -> f64 {
    if constraints.is_empty() {
        return 1.0;
    }
    let mean = constraints.iter().map(Constraint::value).sum::<f64>() / constraints.len() as f64;
    mean.powi(constraints.len() as i32)
}

/// Step 4: final scalar for cost (or work, structurally analogous).
/// `n` is the number of options the search is drawing from (e.g. number of
/// offers requested); per spec.md §4.6 it appears as `(n - 2)`.
pub fn search_final_scalar(initial: f64, base: f64, multiplier: f64, n: f64) -> f64 {
    initial + base * multiplier * (n - 2.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_constraints_is_neutral() {
        assert_eq!(combine_constraints(&[]), 1.0);
    }

    #[test]
    fn more_constraints_raise_the_combined_multiplier() {
        let one = combine_constraints(&[Constraint::new(1.5, 2.0)]);
        let two = combine_constraints(&[Constraint::new(1.5, 2.0), Constraint::new(1.5, 2.0)]);
        assert!(two > one);
    }

    #[test]
    fn intensity_is_bounded() {
        assert!(piecewise_exponential_intensity(100.0) <= 3.5);
        assert!(exclusion_ratio_intensity(1.0, 1.0) <= 3.5);
    }
}
