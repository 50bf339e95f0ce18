//! Typed event bus (spec.md §9 design note): the source's single global
//! notification-dispatch function is split here into a closed set of typed
//! events so a subscriber can match on category instead of string-sniffing
//! a message body.

use serde::{Deserialize, Serialize};

use crate::activity::WorkCategory;
use crate::ids::{ActivityId, LoanId, VineyardId};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum EngineEvent {
    ActivityStarted {
        activity_id: ActivityId,
        category: WorkCategory,
    },
    ActivityCompleted {
        activity_id: ActivityId,
        category: WorkCategory,
    },
    ActivityCancelled {
        activity_id: ActivityId,
        category: WorkCategory,
    },
    HandlerFailed {
        activity_id: ActivityId,
        category: WorkCategory,
        reason: String,
    },
    WeekAdvanced {
        week: u32,
        season_changed: bool,
        year_changed: bool,
    },
    LoanRestructured {
        loan_id: LoanId,
    },
    EmergencyQuickLoanIssued {
        loan_id: LoanId,
    },
    VineyardOvergrown {
        vineyard_id: VineyardId,
        years: f64,
    },
    AchievementCheckRun,
}

impl EngineEvent {
    /// Maps the typed event onto the legacy `(text, sourceKey, title,
    /// category)` shape a `NotificationSink` still expects at the host
    /// boundary.
    pub fn as_notification(&self) -> (String, &'static str, &'static str, &'static str) {
        match self {
            EngineEvent::ActivityStarted { category, .. } => (
                format!("Started {category:?}"),
                "activity",
                "Activity started",
                "activity",
            ),
            EngineEvent::ActivityCompleted { category, .. } => (
                format!("Completed {category:?}"),
                "activity",
                "Activity completed",
                "activity",
            ),
            EngineEvent::ActivityCancelled { category, .. } => (
                format!("Cancelled {category:?}"),
                "activity",
                "Activity cancelled",
                "activity",
            ),
            EngineEvent::HandlerFailed { category, reason, .. } => (
                format!("{category:?} failed: {reason}"),
                "activity",
                "Activity failed",
                "error",
            ),
            EngineEvent::WeekAdvanced { week, .. } => {
                (format!("Week {week}"), "clock", "Week advanced", "clock")
            }
            EngineEvent::LoanRestructured { .. } => {
                ("Loan restructured".to_string(), "finance", "Loan restructured", "finance")
            }
            EngineEvent::EmergencyQuickLoanIssued { .. } => (
                "Emergency QuickLoan issued".to_string(),
                "finance",
                "Emergency loan",
                "finance",
            ),
            EngineEvent::VineyardOvergrown { years, .. } => (
                format!("{years:.1} years of overgrowth"),
                "vineyard",
                "Vineyard overgrown",
                "vineyard",
            ),
            EngineEvent::AchievementCheckRun => {
                ("Achievements checked".to_string(), "achievements", "Achievements", "achievements")
            }
        }
    }
}
