//! Overgrowth and domain modifier curves (spec.md §4.5). Shared by
//! clearing, planting, and harvesting.

use serde::{Deserialize, Serialize};

use crate::clock::Season;
use crate::params::GameParameters;

/// Years-since-maintenance vector. Each field counts years since the
/// corresponding activity last ran on a vineyard.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct OvergrowthYears {
    pub vegetation: f64,
    pub debris: f64,
    pub uproot: f64,
    pub replant: f64,
}

#[derive(Debug, Clone, Copy)]
pub struct OvergrowthWeights {
    pub vegetation: f64,
    pub debris: f64,
    pub uproot: f64,
    pub replant: f64,
}

impl Default for OvergrowthWeights {
    fn default() -> Self {
        Self {
            vegetation: 1.0,
            debris: 0.5,
            uproot: 1.0,
            replant: 1.0,
        }
    }
}

/// Which overgrowth fields participate in a particular combination; `None`
/// means all four.
#[derive(Debug, Clone, Copy, Default)]
pub struct OvergrowthFields {
    pub vegetation: bool,
    pub debris: bool,
    pub uproot: bool,
    pub replant: bool,
}

impl OvergrowthFields {
    pub fn all() -> Self {
        Self {
            vegetation: true,
            debris: true,
            uproot: true,
            replant: true,
        }
    }
}

/// `overgrowthModifier(years, base, decay, cap)`. Diminishing-returns
/// curve: `min(cap, (base/decay) * (1 - (1-decay)^years))` for years > 0.
pub fn overgrowth_modifier(years: f64, base: f64, decay: f64, cap: f64) -> f64 {
    if years <= 0.0 {
        return 0.0;
    }
    let raw = (base / decay) * (1.0 - (1.0 - decay).powf(years));
    raw.min(cap)
}

pub fn overgrowth_modifier_default(years: f64) -> f64 {
    overgrowth_modifier(years, 0.10, 0.5, 2.0)
}

/// `combineOvergrowthYears`: weighted mean of the requested fields.
pub fn combine_overgrowth_years(
    o: &OvergrowthYears,
    fields: Option<OvergrowthFields>,
    weights: Option<OvergrowthWeights>,
) -> f64 {
    let fields = fields.unwrap_or_else(OvergrowthFields::all);
    let weights = weights.unwrap_or_default();

    let mut total_weight = 0.0;
    let mut total = 0.0;

    if fields.vegetation {
        total += o.vegetation * weights.vegetation;
        total_weight += weights.vegetation;
    }
    if fields.debris {
        total += o.debris * weights.debris;
        total_weight += weights.debris;
    }
    if fields.uproot {
        total += o.uproot * weights.uproot;
        total_weight += weights.uproot;
    }
    if fields.replant {
        total += o.replant * weights.replant;
        total_weight += weights.replant;
    }

    if total_weight <= 0.0 {
        0.0
    } else {
        total / total_weight
    }
}

/// Mean of per-soil modifiers for recognised soils; unknown soils are
/// skipped rather than treated as zero, so an unrecognised soil name does
/// not silently flatten the average.
pub fn soil_average(params: &GameParameters, soils: &[String]) -> f64 {
    let mut total = 0.0;
    let mut count = 0usize;
    for soil in soils {
        if let Some(modifier) = params.soil_difficulty_modifiers.get(soil) {
            total += modifier;
            count += 1;
        }
    }
    if count == 0 {
        0.0
    } else {
        total / count as f64
    }
}

/// `1.8 * (1 - e^{-3 * min(age/100, 1)})`.
pub fn vine_age_modifier(age_years: f64) -> f64 {
    let normalized = (age_years / 100.0).min(1.0);
    1.8 * (1.0 - (-3.0 * normalized).exp())
}

pub fn planting_seasonal_modifier(season: Season) -> f64 {
    match season {
        Season::Spring => 0.0,
        Season::Summer => 0.25,
        Season::Fall => 0.35,
        Season::Winter => 0.0,
    }
}

/// Clearing vegetation/debris seasonal modifier; other clearing tasks (and
/// all other categories) use 0.
pub fn clearing_vegetation_debris_seasonal_modifier(season: Season) -> f64 {
    match season {
        Season::Spring => 0.10,
        Season::Summer => 0.25,
        Season::Fall => 0.20,
        Season::Winter => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overgrowth_is_zero_at_zero_years() {
        assert_eq!(overgrowth_modifier_default(0.0), 0.0);
    }

    #[test]
    fn overgrowth_is_capped() {
        assert!(overgrowth_modifier(1000.0, 0.10, 0.5, 2.0) <= 2.0);
    }

    #[test]
    fn overgrowth_increases_with_years() {
        assert!(overgrowth_modifier_default(5.0) > overgrowth_modifier_default(1.0));
    }

    #[test]
    fn combine_overgrowth_default_weights() {
        let years = OvergrowthYears {
            vegetation: 4.0,
            debris: 2.0,
            uproot: 0.0,
            replant: 0.0,
        };
        // (4*1 + 2*0.5 + 0*1 + 0*1) / (1 + 0.5 + 1 + 1) = 5 / 3.5
        let combined = combine_overgrowth_years(&years, None, None);
        assert!((combined - (5.0 / 3.5)).abs() < 1e-9);
    }

    #[test]
    fn unrecognised_soil_is_ignored_not_zeroed() {
        let params = GameParameters::default();
        let soils = vec!["Clay".to_string(), "Unobtainium".to_string()];
        let avg = soil_average(&params, &soils);
        assert_eq!(avg, params.soil_difficulty_modifiers["Clay"]);
    }

    #[test]
    fn vine_age_modifier_saturates() {
        let old = vine_age_modifier(100.0);
        let older = vine_age_modifier(500.0);
        assert!((old - older).abs() < 1e-9);
        assert!(old < 1.8);
    }
}
