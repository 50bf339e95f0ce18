//! Winery activity and work engine.
//!
//! Implements the weekly tick orchestrator and activity lifecycle for a
//! winery-management simulation: workers progress `Activity` records
//! category by category until they complete, at which point a
//! per-category handler mutates the vineyard/batch/loan/worker roster it
//! targets. The engine owns none of its persistence, ledger, or
//! notification concerns directly — those are injected as `async_trait`
//! traits (`external::Store`/`Ledger`/`Prestige`/`NotificationSink`/
//! `GameUpdateBus`) so a host process can back them with whatever storage
//! it likes.
//!
//! ## Module structure
//!
//! - `ids`        Generational entity identifiers
//! - `clock`      Game clock (week/season/year)
//! - `params`     Immutable parameter tables
//! - `rng`        Injectable seeded RNG
//! - `activity`   `Activity` entity and category taxonomy
//! - `entities`   External entity fields the engine reads/mutates
//! - `work`       Work cost calculator, per-category estimators, modifiers
//! - `store`      Activity store and lifecycle (`progressAll`)
//! - `handlers`   Per-category completion handlers
//! - `weekly`     Independent weekly subsystems fanned out per tick
//! - `tick`       Tick orchestrator
//! - `engine`     `WineryEngine` facade
//! - `events`     Typed event bus
//! - `external`   Host-supplied collaborator traits
//! - `error`      Error taxonomy

pub mod activity;
pub mod clock;
pub mod engine;
pub mod entities;
pub mod error;
pub mod events;
pub mod external;
pub mod handlers;
pub mod ids;
#[cfg(feature = "instrument")]
pub use instrument;
pub mod params;
pub mod rng;
pub mod store;
pub mod tick;
pub mod weekly;
pub mod work;

pub use activity::{Activity, ActivityStatus, CreateActivityOptions, WorkCategory};
pub use clock::{GameClock, Season, TimeConstants};
pub use engine::WineryEngine;
pub use error::{EngineError, HandlerError, InvariantViolation, ReentrancyError, StoreError, ValidationError};
pub use ids::{ActivityId, BatchId, LenderId, LoanId, Money, ResearchId, TargetId, VineyardId, WorkerId};
pub use params::GameParameters;
pub use rng::EngineRng;
pub use store::ActivityStore;
pub use tick::TickReport;
