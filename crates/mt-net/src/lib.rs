//! `mt-net` — road network graph and congestion model.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                |
//! |----------------|---------------------------------------------------------|
//! | [`graph`]      | `Intersection`, `Road`, `RoadGraph`, guarded insertion  |
//! | [`congestion`] | `EdgeKey`, `CongestionModel` (tiered halving rule)      |
//! | [`error`]      | `NetError`, `NetResult<T>`                              |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on public value types.     |

pub mod congestion;
pub mod error;
pub mod graph;


pub use congestion::{CongestionModel, EdgeKey};
pub use error::{NetError, NetResult};
pub use graph::{EdgeInsert, Intersection, Road, RoadGraph};
