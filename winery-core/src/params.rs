//! Immutable parameter tables.
//!
//! Pure data, per spec.md §2 item 1 (~10% of the core): work rates,
//! initial work, modifier curves, lender/economy constants. Mirrors the
//! teacher's pattern of `const` blocks at the top of `tick.rs`
//! (`BUFFER_TICKS`, `PRICE_SWEEP_MIN`, ...), generalized into a struct so
//! the host can override individual tables for scenario tests the way
//! `Pop::with_currency` lets a test override one field at a time.
//!
//! Tables that belong to the valuation layer (credit rating penalties,
//! loan default terms, oxidation thresholds) are out of scope for this
//! core per spec.md §1 ("domain valuation math... parameter providers to
//! the scheduler") but are still carried here as opaque data so the
//! external-interface contract in spec.md §6 has somewhere to live; the
//! engine never branches on their contents.

use std::collections::HashMap;

use crate::activity::WorkCategory;

/// Work-units-per-real-week conversion factor. Source value 50.
pub const BASE_WORK_UNITS: f64 = 50.0;

/// Reference density used by the density-adjustment term in the work cost
/// calculator (vines/ha).
pub const DEFAULT_VINE_DENSITY: f64 = 5000.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LenderType {
    Bank,
    CreditUnion,
    PrivateLender,
    QuickLoan,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EconomyPhase {
    Boom,
    Stable,
    Recession,
}

#[derive(Debug, Clone)]
pub struct GameParameters {
    /// `amount` per standard week, keyed by work category.
    pub task_rates: HashMap<WorkCategory, f64>,
    /// Fixed work floor added before modifiers, keyed by work category.
    pub initial_work: HashMap<WorkCategory, f64>,
    /// Expected yield conversion for harvesting (kg per standard week).
    pub harvest_yield_rate: f64,
    /// Per-soil-type work modifier; unrecognised soils are ignored by the
    /// averaging step rather than erroring.
    pub soil_difficulty_modifiers: HashMap<String, f64>,
    /// Maximum altitude per (country, region), used to normalise the
    /// altitude rating into [0,1]; unknown regions fall back to
    /// `default_altitude_ceiling`.
    pub altitude_ceiling: HashMap<(String, String), f64>,
    pub default_altitude_ceiling: f64,
    pub lender_type_complexity: HashMap<LenderType, f64>,
    pub lender_type_selectivity: HashMap<LenderType, f64>,
    pub lender_type_distribution: HashMap<LenderType, f64>,
    pub economy_sales_multipliers: HashMap<EconomyPhase, f64>,
    pub economy_phase: EconomyPhase,
    pub achievement_check_interval_weeks: u64,
    /// `CATEGORY_SKILL_MAPPING`: required input from constants, not
    /// inferred (spec.md §9 open question resolution) — the authoritative
    /// category set is the union of every category any handler
    /// references, and every one of them must have an entry here.
    pub category_skill_mapping: HashMap<WorkCategory, String>,
    /// Opaque valuation-layer tables, carried but never interpreted here.
    pub credit_rating_penalties: HashMap<String, f64>,
    pub oxidation_state_multipliers: HashMap<String, f64>,
}

impl Default for GameParameters {
    fn default() -> Self {
        let mut task_rates = HashMap::new();
        task_rates.insert(WorkCategory::Planting, 0.28);
        task_rates.insert(WorkCategory::Harvesting, 400.0);
        task_rates.insert(WorkCategory::Crushing, 2.5);
        task_rates.insert(WorkCategory::Fermentation, 2.5);
        task_rates.insert(WorkCategory::ClearingVegetation, 1.0);
        task_rates.insert(WorkCategory::ClearingDebris, 1.0);
        task_rates.insert(WorkCategory::ClearingUproot, 0.5);
        task_rates.insert(WorkCategory::ClearingReplant, 0.5);
        task_rates.insert(WorkCategory::Bookkeeping, 500.0);
        task_rates.insert(WorkCategory::StaffSearch, 5.0);
        task_rates.insert(WorkCategory::Hiring, 1.0);
        task_rates.insert(WorkCategory::LandSearch, 1.0);
        task_rates.insert(WorkCategory::LenderSearch, 3.0);
        task_rates.insert(WorkCategory::TakeLoan, 2.0);
        task_rates.insert(WorkCategory::Research, 10.0);

        let mut initial_work = HashMap::new();
        initial_work.insert(WorkCategory::Planting, 10.0);
        initial_work.insert(WorkCategory::Harvesting, 15.0);
        initial_work.insert(WorkCategory::Crushing, 10.0);
        initial_work.insert(WorkCategory::Fermentation, 8.0);
        initial_work.insert(WorkCategory::ClearingVegetation, 3.0);
        initial_work.insert(WorkCategory::ClearingDebris, 3.0);
        initial_work.insert(WorkCategory::ClearingUproot, 6.0);
        initial_work.insert(WorkCategory::ClearingReplant, 6.0);
        initial_work.insert(WorkCategory::Bookkeeping, 25.0);
        initial_work.insert(WorkCategory::StaffSearch, 5.0);
        initial_work.insert(WorkCategory::Hiring, 2.0);
        initial_work.insert(WorkCategory::LandSearch, 5.0);
        initial_work.insert(WorkCategory::LenderSearch, 5.0);
        initial_work.insert(WorkCategory::TakeLoan, 15.0);
        initial_work.insert(WorkCategory::Research, 20.0);

        let mut soil_difficulty_modifiers = HashMap::new();
        soil_difficulty_modifiers.insert("Clay".to_string(), 0.10);
        soil_difficulty_modifiers.insert("Loam".to_string(), 0.0);
        soil_difficulty_modifiers.insert("Sand".to_string(), -0.05);
        soil_difficulty_modifiers.insert("Rocky".to_string(), 0.30);
        soil_difficulty_modifiers.insert("Silt".to_string(), 0.05);

        let mut lender_type_complexity = HashMap::new();
        lender_type_complexity.insert(LenderType::Bank, 1.0);
        lender_type_complexity.insert(LenderType::CreditUnion, 0.85);
        lender_type_complexity.insert(LenderType::PrivateLender, 1.2);
        lender_type_complexity.insert(LenderType::QuickLoan, 0.5);

        let mut lender_type_selectivity = HashMap::new();
        lender_type_selectivity.insert(LenderType::Bank, 1.4);
        lender_type_selectivity.insert(LenderType::CreditUnion, 1.2);
        lender_type_selectivity.insert(LenderType::PrivateLender, 1.6);
        lender_type_selectivity.insert(LenderType::QuickLoan, 1.0);

        let mut lender_type_distribution = HashMap::new();
        lender_type_distribution.insert(LenderType::Bank, 0.4);
        lender_type_distribution.insert(LenderType::CreditUnion, 0.25);
        lender_type_distribution.insert(LenderType::PrivateLender, 0.2);
        lender_type_distribution.insert(LenderType::QuickLoan, 0.15);

        let mut economy_sales_multipliers = HashMap::new();
        economy_sales_multipliers.insert(EconomyPhase::Boom, 1.2);
        economy_sales_multipliers.insert(EconomyPhase::Stable, 1.0);
        economy_sales_multipliers.insert(EconomyPhase::Recession, 0.8);

        Self {
            task_rates,
            initial_work,
            harvest_yield_rate: 400.0,
            soil_difficulty_modifiers,
            altitude_ceiling: HashMap::new(),
            default_altitude_ceiling: 1000.0,
            lender_type_complexity,
            lender_type_selectivity,
            lender_type_distribution,
            economy_sales_multipliers,
            economy_phase: EconomyPhase::Stable,
            achievement_check_interval_weeks: 4,
            category_skill_mapping: {
                let mut m = HashMap::new();
                m.insert(WorkCategory::Planting, "field".to_string());
                m.insert(WorkCategory::Harvesting, "field".to_string());
                m.insert(WorkCategory::Crushing, "winery".to_string());
                m.insert(WorkCategory::Fermentation, "winery".to_string());
                m.insert(WorkCategory::ClearingVegetation, "field".to_string());
                m.insert(WorkCategory::ClearingDebris, "field".to_string());
                m.insert(WorkCategory::ClearingUproot, "field".to_string());
                m.insert(WorkCategory::ClearingReplant, "field".to_string());
                m.insert(WorkCategory::Bookkeeping, "administration".to_string());
                m.insert(WorkCategory::StaffSearch, "administration".to_string());
                m.insert(WorkCategory::Hiring, "administration".to_string());
                m.insert(WorkCategory::LandSearch, "administration".to_string());
                m.insert(WorkCategory::LenderSearch, "administration".to_string());
                m.insert(WorkCategory::TakeLoan, "administration".to_string());
                m.insert(WorkCategory::Research, "administration".to_string());
                m
            },
            credit_rating_penalties: HashMap::new(),
            oxidation_state_multipliers: HashMap::new(),
        }
    }
}

impl GameParameters {
    pub fn rate(&self, category: WorkCategory) -> f64 {
        self.task_rates.get(&category).copied().unwrap_or(1.0)
    }

    pub fn initial(&self, category: WorkCategory) -> f64 {
        self.initial_work.get(&category).copied().unwrap_or(0.0)
    }

    pub fn altitude_rating(&self, country: &str, region: &str, altitude: f64) -> f64 {
        let ceiling = self
            .altitude_ceiling
            .get(&(country.to_string(), region.to_string()))
            .copied()
            .unwrap_or(self.default_altitude_ceiling);
        if ceiling <= 0.0 {
            return 0.0;
        }
        (altitude / ceiling).clamp(0.0, 1.0)
    }
}
