//! The work engine: cost calculator, per-category estimators, worker
//! contribution calculator, modifier curves, and search shaping
//! (spec.md §4.1–§4.3, §4.5–§4.6).

pub mod contribution;
pub mod cost;
pub mod estimators;
pub mod factor;
pub mod modifiers;
pub mod search;
