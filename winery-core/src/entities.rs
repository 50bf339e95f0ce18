//! External entities the scheduler reads and mutates a defined subset of
//! (spec.md §3). Vineyard/WineBatch/Loan/Lender/ResearchProject/
//! SearchOptions are treated as data the host stores; the fields here are
//! the ones the activity estimators and completion handlers actually
//! touch, not a full domain model (valuation math, pricing, and the rest
//! of the host's entity fields are out of scope per spec.md §1).

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::clock::Season;
use crate::ids::{BatchId, LenderId, LoanId, ResearchId, VineyardId, WorkerId};
use crate::params::LenderType;
use crate::work::modifiers::OvergrowthYears;

pub type SkillKey = String;

/// A worker may be assigned to multiple active activities; contribution
/// per assignment divides by how many activities it's currently on
/// (spec.md §3, §4.3).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Worker {
    pub id: WorkerId,
    pub workforce: f64,
    pub skills: HashMap<SkillKey, f64>,
    pub specializations: HashSet<SkillKey>,
    pub wage: f64,
}

impl Worker {
    pub fn new(id: WorkerId, workforce: f64, wage: f64) -> Self {
        Self {
            id,
            workforce,
            skills: HashMap::new(),
            specializations: HashSet::new(),
            wage,
        }
    }

    pub fn with_skill(mut self, skill: impl Into<SkillKey>, level: f64) -> Self {
        self.skills.insert(skill.into(), level.clamp(0.0, 1.0));
        self
    }

    pub fn with_specialization(mut self, skill: impl Into<SkillKey>) -> Self {
        self.specializations.insert(skill.into());
        self
    }

    pub fn skill_level(&self, skill: &str) -> f64 {
        self.skills.get(skill).copied().unwrap_or(0.0)
    }

    pub fn is_specialized_in(&self, skill: &str) -> bool {
        self.specializations.contains(skill)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VineyardStatus {
    Barren,
    Planted,
    Growing,
    Harvested,
    Dormant,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vineyard {
    pub id: VineyardId,
    pub hectares: f64,
    pub density: f64,
    pub target_density: Option<f64>,
    pub grape: Option<String>,
    pub status: VineyardStatus,
    pub country: String,
    pub region: String,
    pub altitude: f64,
    pub soils: Vec<String>,
    pub vine_age_years: f64,
    pub overgrowth: OvergrowthYears,
    pub years_since_last_clearing: f64,
    pub ripeness: f64,
    pub health: f64,
    pub harvested_so_far: f64,
    pub fragility: f64,
}

impl Vineyard {
    pub fn new(id: VineyardId, hectares: f64) -> Self {
        Self {
            id,
            hectares,
            density: 0.0,
            target_density: None,
            grape: None,
            status: VineyardStatus::Barren,
            country: String::new(),
            region: String::new(),
            altitude: 0.0,
            soils: Vec::new(),
            vine_age_years: 0.0,
            overgrowth: OvergrowthYears::default(),
            years_since_last_clearing: 0.0,
            ripeness: 0.0,
            health: 1.0,
            harvested_so_far: 0.0,
            fragility: 0.3,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BatchState {
    Grapes,
    MustReady,
    MustFermenting,
    Wine,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WineBatch {
    pub id: BatchId,
    pub state: BatchState,
    pub quantity_kg: f64,
    pub source_vineyard: VineyardId,
    pub method: Option<String>,
    pub destemmed: bool,
    pub cold_soak: bool,
    pub fermentation_temperature: Option<f64>,
    pub age_weeks: u32,
}

impl WineBatch {
    pub fn tons(&self) -> f64 {
        self.quantity_kg / 1000.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoanStatus {
    Offered,
    Active,
    Repaid,
    Defaulted,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Loan {
    pub id: LoanId,
    pub lender: LenderId,
    pub principal: f64,
    pub duration_seasons: u32,
    pub status: LoanStatus,
    pub penalty_work_accrued: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lender {
    pub id: LenderId,
    pub lender_type: LenderType,
    pub credit_available: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResearchProject {
    pub id: ResearchId,
    pub base_work_amount: f64,
    pub complexity: f64,
    pub category_adjustment: f64,
    pub monetary_reward: f64,
    pub prestige_reward: f64,
}

/// User-selected constraints for a land/lender/take-loan search. The
/// search-cost shaper (spec.md §4.6) turns each active constraint into an
/// intensity; which constraints are present varies by search kind, so this
/// is a flat bag the estimator interprets.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchOptions {
    pub max_price: Option<f64>,
    pub min_hectares: Option<f64>,
    pub preferred_regions: Vec<String>,
    pub quick_loan_only: bool,
    pub exclude_quick_loan: bool,
    pub number_of_offers: Option<u32>,
}

/// A (season, previous-season transaction count) snapshot consumed by the
/// bookkeeping estimator.
#[derive(Debug, Clone, Copy)]
pub struct BookkeepingInput {
    pub previous_season_transaction_count: u32,
    pub spillover_remaining_work: Option<i64>,
    pub loan_penalty_work: f64,
    pub season: Season,
    pub year: u32,
}
