//! In-memory telemetry sampling for stats panels and headless reporting.
//!
//! The recorder pulls aggregate numbers from a [`Simulation`] on demand and
//! keeps a bounded history, oldest samples evicted first.  Nothing is
//! persisted; presentation layers read the ring and render it however they
//! like.

use std::collections::VecDeque;

use crate::sim::Simulation;

/// One aggregate reading of the simulation.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MetricsSample {
    /// Virtual time the sample was taken at, seconds.
    pub sim_time: f64,
    /// Vehicles currently tracked.
    pub vehicles: usize,
    /// Mean speed over drivable vehicles.
    pub average_speed: f64,
    /// Re-routes applied since simulation start.
    pub reroute_count: usize,
    /// Cumulative estimated seconds saved by re-routing.
    pub reroute_saved_time: f64,
}

/// Bounded ring of [`MetricsSample`]s.
pub struct MetricsRecorder {
    samples: VecDeque<MetricsSample>,
    capacity: usize,
    /// Minimum virtual seconds between retained samples; 0 keeps every call.
    min_interval: f64,
}

impl MetricsRecorder {
    /// Keep at most `capacity` samples (oldest evicted first).
    pub fn new(capacity: usize) -> Self {
        Self::with_min_interval(capacity, 0.0)
    }

    /// Additionally drop samples taken less than `min_interval` virtual
    /// seconds after the previous retained one.
    pub fn with_min_interval(capacity: usize, min_interval: f64) -> Self {
        Self {
            samples: VecDeque::with_capacity(capacity.min(1_024)),
            capacity: capacity.max(1),
            min_interval: min_interval.max(0.0),
        }
    }

    /// Take a reading.  Returns the sample if it was retained.
    pub fn sample(&mut self, sim: &Simulation) -> Option<MetricsSample> {
        let now = sim.sim_time();
        if let Some(last) = self.samples.back() {
            if self.min_interval > 0.0 && now - last.sim_time < self.min_interval {
                return None;
            }
        }

        let sample = MetricsSample {
            sim_time: now,
            vehicles: sim.stats().vehicles,
            average_speed: sim.average_speed(),
            reroute_count: sim.reroute_count(),
            reroute_saved_time: sim.reroute_saved_time(),
        };
        if self.samples.len() == self.capacity {
            self.samples.pop_front();
        }
        self.samples.push_back(sample);
        Some(sample)
    }

    /// Most recent retained sample.
    pub fn latest(&self) -> Option<&MetricsSample> {
        self.samples.back()
    }

    /// All retained samples, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &MetricsSample> {
        self.samples.iter()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}
