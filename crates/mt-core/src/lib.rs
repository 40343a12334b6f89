//! `mt-core` — foundational types for the `microtraffic` simulator.
//!
//! This crate is a dependency of every other `mt-*` crate.  It intentionally
//! has no `mt-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module       | Contents                                                |
//! |--------------|---------------------------------------------------------|
//! | [`ids`]      | `NodeId`, `EdgeId`, `VehicleId`                         |
//! | [`point`]    | `Point`, integer segment geometry                       |
//! | [`idm`]      | `IdmParams`, `LeaderInfo`, `idm_accel`                  |
//! | [`config`]   | `SimConfig`, `StrategyKind`                             |
//! | [`rng`]      | `SimRng` (deterministic, label-keyed streams)           |
//! | [`error`]    | `CoreError`, `CoreResult`                               |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public value types.    |

pub mod config;
pub mod error;
pub mod idm;
pub mod ids;
pub mod point;
pub mod rng;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{SimConfig, StrategyKind};
pub use error::{CoreError, CoreResult};
pub use idm::{idm_accel, IdmParams, LeaderInfo};
pub use ids::{EdgeId, NodeId, VehicleId};
pub use point::{orient, segments_cross, Point};
pub use rng::SimRng;
