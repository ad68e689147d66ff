//! Query front-end shared by the CLI and the HTTP server
//!
//! Holds the network, the graph built from it, and the cost-per-km, then
//! turns a pair of user-typed city names into a rounded [`RouteReport`].

use crate::core::{calculate_route, Error, NetworkConfig, Result, RiskGraph, RouteLeg};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Rounded route with coordinates for each path node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteReport {
    pub path: Vec<String>,
    /// `[lat, lon]` per path node
    pub coordinates: Vec<[f64; 2]>,
    pub total_distance_km: f64,
    pub total_risk: f64,
    pub fuel_cost: f64,
    pub legs: Vec<RouteLeg>,
}

#[derive(Debug)]
pub struct RoutePlanner {
    network: NetworkConfig,
    graph: RiskGraph,
    cost_per_km: f64,
}

impl RoutePlanner {
    pub fn new(network: NetworkConfig) -> Result<Self> {
        let cost_per_km = network.fuel.cost_per_km()?;
        let graph = network.build_graph()?;
        Ok(Self {
            network,
            graph,
            cost_per_km,
        })
    }

    pub fn network(&self) -> &NetworkConfig {
        &self.network
    }

    pub fn graph(&self) -> &RiskGraph {
        &self.graph
    }

    pub fn cost_per_km(&self) -> f64 {
        self.cost_per_km
    }

    /// Canonical city name, or `NodeNotFound` carrying the input as typed
    pub fn resolve(&self, input: &str) -> Result<&str> {
        self.network
            .resolve_city(input)
            .ok_or_else(|| Error::NodeNotFound(input.to_string()))
    }

    pub fn suggest(&self, input: &str) -> Option<String> {
        self.network.suggest_city(input)
    }

    /// Route between two distinct cities, rounded for reporting
    pub fn plan(&self, from: &str, to: &str) -> Result<RouteReport> {
        let origin = self.resolve(from)?;
        let destination = self.resolve(to)?;
        if origin == destination {
            return Err(Error::SameEndpoints(origin.to_string()));
        }

        let result = calculate_route(&self.graph, origin, destination, self.cost_per_km)
            .inspect_err(|err| warn!(origin, destination, %err, "route query rejected"))?
            .rounded();

        let coordinates = self.coordinates(&result.path)?;

        Ok(RouteReport {
            path: result.path,
            coordinates,
            total_distance_km: result.total_distance,
            total_risk: result.total_risk,
            fuel_cost: result.fuel_cost,
            legs: result.legs,
        })
    }

    /// `[lat, lon]` for each path node; a node without a city entry means the
    /// graph and the network disagree
    fn coordinates(&self, path: &[String]) -> Result<Vec<[f64; 2]>> {
        path.iter()
            .map(|name| {
                self.network
                    .city(name)
                    .map(|city| [city.lat, city.lon])
                    .ok_or_else(|| Error::Config(format!("route node '{name}' has no city entry")))
            })
            .collect()
    }
}
