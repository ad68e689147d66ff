//! # riskroute
//!
//! Risk-aware shortest-path routing over a directed road network.
//!
//! Each road carries a distance and four independent risk probabilities
//! (theft, accident, rain, flood). Routes minimize `distance * (1 + risk)`,
//! while the reported distance and risk are summed from the raw per-road
//! values.
//!
//! ## Quick Start
//!
//! ```
//! use riskroute::{build_graph, calculate_route, EdgeRecord, RiskFactors};
//!
//! let graph = build_graph(vec![
//!     EdgeRecord::new("A", "B", 100.0, RiskFactors::new(0.2, 0.3, 0.1, 0.1)),
//!     EdgeRecord::new("A", "C", 90.0, RiskFactors::new(0.3, 0.4, 0.2, 0.1)),
//! ])?;
//!
//! let route = calculate_route(&graph, "A", "B", 6.0 / 8.0)?.rounded();
//! assert_eq!(route.path, vec!["A", "B"]);
//! assert_eq!(route.total_distance, 100.0);
//! assert_eq!(route.total_risk, 0.34);
//! assert_eq!(route.fuel_cost, 75.0);
//! # Ok::<(), riskroute::Error>(())
//! ```

pub mod core;
pub mod planner;
pub mod server;

pub use crate::core::{
    build_graph, calculate_route, City, EdgeDefect, EdgeRecord, Error, FuelConfig, NetworkConfig,
    Result, RiskFactors, RiskGraph, RoadSegment, RouteLeg, RouteResult,
};
pub use planner::{RoutePlanner, RouteReport};
