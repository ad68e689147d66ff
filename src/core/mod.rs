//! Core routing modules for riskroute
//!
//! The graph builder and route calculator are pure and synchronous; the
//! network module only loads static configuration.

pub mod error;
pub mod graph;
pub mod network;
pub mod risk;
pub mod route;
pub mod suggest;

pub use error::{EdgeDefect, Error, Result};
pub use graph::{build_graph, EdgeRecord, RiskGraph, RoadSegment};
pub use network::{City, FuelConfig, NetworkConfig};
pub use risk::RiskFactors;
pub use route::{calculate_route, round2, RouteLeg, RouteResult};
