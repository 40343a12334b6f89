//! `mt-gen` — procedural road networks and fleet management.
//!
//! The generators build a layered map on a scattered set of intersections:
//! one motorway corridor across the widest span, a minimum-spanning-tree
//! highway backbone, and k-nearest-neighbor local streets.  Every insertion
//! goes through the graph's guarded API, so the result stays planar and
//! duplicate-free by construction.
//!
//! # Crate layout
//!
//! | Module       | Contents                                              |
//! |--------------|-------------------------------------------------------|
//! | [`network`]  | `NetworkParams`, node scattering, `make_random_network` |
//! | [`motorway`] | Corridor generator (band collect + RDP simplify)      |
//! | [`highway`]  | Kruskal MST backbone under the planar guard           |
//! | [`streets`]  | k-nearest-neighbor streets                            |
//! | [`fleet`]    | `FleetManager` population top-up                      |

pub mod fleet;
pub mod highway;
pub mod motorway;
pub mod network;
pub mod streets;


pub use fleet::FleetManager;
pub use highway::HighwayGenerator;
pub use motorway::MotorwayGenerator;
pub use network::{collect_node_ids, make_random_network, scatter_nodes, NetworkParams};
pub use streets::StreetGenerator;

use mt_net::RoadGraph;

/// A procedural pass that adds roads to an existing set of intersections.
pub trait RoadGenerator {
    fn generate(&self, graph: &mut RoadGraph);
}
