//! `mt-sim` — the simulation engine: vehicles and the tick loop.
//!
//! # Tick anatomy
//!
//! ```text
//! update(dt):
//!   ① Scale    — step = dt * simulation_speed; advance virtual time.
//!   ② Lanes    — group vehicles by directed edge, sort by progress.
//!   ③ Leaders  — feed each vehicle its leader gap/speed (or open road)
//!                from the pre-step snapshot.
//!   ④ Advance  — integrate every vehicle (IDM, edge transitions,
//!                congestion-triggered re-routes), collecting events.
//!   ⑤ Apply    — fold reroute events into the telemetry counters.
//!   ⑥ Prune    — drop arrived vehicles.
//!   ⑦ Notify   — invoke the post-update callback.
//! ```
//!
//! Leader info is computed from the pre-step snapshot, so the vehicle
//! iteration order inside a tick cannot influence results: no vehicle
//! mutates another, and congestion writes happen only inside
//! `Vehicle::update` (edge transitions and route replacement), after all
//! leader reads.
//!
//! # Ownership
//!
//! The [`Simulation`] is the single owner of the graph, the congestion
//! model, and the vehicle collection.  Vehicles hold no back-references;
//! `Vehicle::update` borrows the world for the duration of one tick.

pub mod error;
pub mod metrics;
pub mod sim;
pub mod vehicle;


pub use error::{SimError, SimResult};
pub use metrics::{MetricsRecorder, MetricsSample};
pub use sim::{SimStats, Simulation, SnapshotItem};
pub use vehicle::{RerouteApplied, Vehicle, VehicleKind};
