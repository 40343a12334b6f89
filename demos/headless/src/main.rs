//! headless — drive the full stack without a renderer.
//!
//! Generates a random planar road network, seeds a mixed fleet, and runs
//! the tick loop at a fixed step, printing aggregate stats at intervals.
//! The seed makes every run reproducible.

use anyhow::Result;

use mt_core::{SimConfig, SimRng, StrategyKind};
use mt_gen::{collect_node_ids, make_random_network, FleetManager, NetworkParams};
use mt_sim::{MetricsRecorder, Simulation};

// ── Run parameters ────────────────────────────────────────────────────────────

const SEED: u64 = 42;
const DT_SECS: f64 = 0.05;
const SIM_SECONDS: f64 = 120.0;
const REPORT_EVERY_SECS: f64 = 10.0;
const TARGET_CARS: usize = 20;
const TARGET_TRUCKS: usize = 5;

fn main() -> Result<()> {
    let mut rng = SimRng::new(SEED);
    let params = NetworkParams::default();
    let graph = make_random_network(&params, &mut rng);
    println!(
        "network: {} intersections, {} directed roads",
        graph.node_count(),
        graph.edge_count()
    );

    let node_ids = collect_node_ids(&graph);
    let mut sim = Simulation::with_config(graph, SimConfig::default())?;
    let mut fleet = FleetManager::new(
        node_ids,
        TARGET_CARS,
        TARGET_TRUCKS,
        StrategyKind::AStar,
        StrategyKind::Dijkstra,
        rng.stream("fleet"),
    );

    fleet.seed_initial(&mut sim);
    sim.start();

    let mut recorder = MetricsRecorder::new(1_024);
    let ticks = (SIM_SECONDS / DT_SECS) as usize;
    let report_interval = (REPORT_EVERY_SECS / DT_SECS) as usize;

    for tick in 1..=ticks {
        sim.update(DT_SECS);
        fleet.top_up(&mut sim);

        if tick % report_interval == 0 {
            if let Some(s) = recorder.sample(&sim) {
                println!(
                    "t={:6.1}s  vehicles={:3}  avg speed={:6.2}  reroutes={:3}  saved={:7.1}s",
                    s.sim_time, s.vehicles, s.average_speed, s.reroute_count, s.reroute_saved_time
                );
            }
        }
    }

    println!(
        "done: {:.0}s simulated, {} reroutes, {:.1}s estimated time saved",
        sim.sim_time(),
        sim.reroute_count(),
        sim.reroute_saved_time()
    );
    Ok(())
}
