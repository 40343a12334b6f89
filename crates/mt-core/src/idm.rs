//! Intelligent Driver Model (IDM) parameters and acceleration law.
//!
//! # Units
//!
//! The simulator uses one internal length unit throughout; speeds are
//! length-units per second, accelerations length-units per second squared.
//! No SI assumption is imposed; callers only need to stay consistent.
//!
//! Car and truck differ only in their parameter sets; there is no vehicle
//! type hierarchy.

/// Tunable IDM parameters, attached per vehicle.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IdmParams {
    /// Desired free-flow speed.  Clamped per edge by the congestion model.
    pub v0: f64,
    /// Maximum acceleration.
    pub a: f64,
    /// Comfortable braking deceleration (positive).
    pub b: f64,
    /// Desired time headway in seconds.
    pub t_headway: f64,
    /// Minimum jam distance at standstill.
    pub s0: f64,
    /// Acceleration exponent, typically 4.
    pub delta: f64,
}

impl IdmParams {
    /// Default passenger-car tuning.
    pub fn car() -> Self {
        Self {
            v0: 50.0,
            a: 35.0,
            b: 40.0,
            t_headway: 1.2,
            s0: 2.0,
            delta: 4.0,
        }
    }

    /// Default truck tuning: slower, heavier, longer headway.
    pub fn truck() -> Self {
        Self {
            v0: 25.0,
            a: 15.0,
            b: 20.0,
            t_headway: 1.8,
            s0: 3.0,
            delta: 4.0,
        }
    }
}

/// Information about the nearest vehicle ahead on the same edge, refreshed
/// once per tick by the simulation.  Distances are measured along the edge.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct LeaderInfo {
    /// Whether a leader exists on the same edge.
    pub present: bool,
    /// Free distance ahead: to the leader if present, else to the edge end.
    pub gap: f64,
    /// Leader speed (0 when absent).
    pub leader_speed: f64,
}

/// Desired dynamic gap s* for the IDM interaction term.
///
/// `dv` is the closing speed `v - v_leader`, non-negative when approaching.
fn desired_gap(v: f64, dv: f64, p: &IdmParams) -> f64 {
    let denom = 2.0 * (p.a * p.b).max(1e-9).sqrt();
    p.s0 + (v * p.t_headway + (v * dv) / denom).max(0.0)
}

/// IDM longitudinal acceleration.
///
/// * `v` — follower speed
/// * `v0` — desired speed in the current context (already congestion-capped)
/// * `gap` — free distance ahead
/// * `dv` — closing speed `v - v_leader`
pub fn idm_accel(v: f64, v0: f64, gap: f64, dv: f64, p: &IdmParams) -> f64 {
    let vv = v.max(0.0);
    let v0c = v0.max(1e-3);
    let term_free = (vv / v0c).powf(p.delta);
    let s_star = desired_gap(vv, dv, p);
    let s_ratio = s_star / gap.max(1e-3);
    p.a * (1.0 - term_free - s_ratio * s_ratio)
}
