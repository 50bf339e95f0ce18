//! `WorkFactor`: explanatory metadata carried alongside a cost estimate.
//! Pure UI decoration — the scheduler never reads these back.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkFactor {
    pub label: String,
    pub value: f64,
    pub unit: Option<String>,
    pub modifier: Option<f64>,
    pub modifier_label: Option<String>,
    pub is_primary: bool,
}

impl WorkFactor {
    pub fn primary(label: impl Into<String>, value: f64, unit: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value,
            unit: Some(unit.into()),
            modifier: None,
            modifier_label: None,
            is_primary: true,
        }
    }

    pub fn modifier(label: impl Into<String>, modifier: f64) -> Self {
        Self {
            label: label.into(),
            value: modifier,
            unit: None,
            modifier: Some(modifier),
            modifier_label: None,
            is_primary: false,
        }
    }
}
