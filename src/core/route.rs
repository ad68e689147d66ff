//! Minimum-weight route search and route aggregates
//!
//! Paths are selected on the scalarized `weight`, then re-walked to sum the
//! raw distance and raw composite risk. Values are returned unrounded;
//! [`RouteResult::rounded`] gives the 2-decimal copy used for reporting.
//!
//! # Tie-break
//!
//! Dijkstra pops the smallest tentative weight first and, on equal weights,
//! the node with the smaller index (first-appearance order in the graph).
//! Out-edges are relaxed in insertion order, and a node's predecessor is only
//! replaced on a strictly smaller weight, so among equal-weight paths the
//! first one to reach a node keeps it.

use crate::core::error::{Error, Result};
use crate::core::graph::RiskGraph;
use petgraph::graph::{EdgeIndex, NodeIndex};
use petgraph::visit::EdgeRef;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::time::Instant;
use tracing::debug;

/// One traversed road of a route
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteLeg {
    pub from: String,
    pub to: String,
    pub distance_km: f64,
    pub total_risk: f64,
    pub weight: f64,
}

/// Path from origin to destination with its aggregates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteResult {
    pub path: Vec<String>,
    /// Sum of raw road distances, in km
    pub total_distance: f64,
    /// Sum of raw composite risks
    pub total_risk: f64,
    /// `total_distance * cost_per_km`
    pub fuel_cost: f64,
    /// Sum of scalarized weights, the quantity the search minimized
    pub weight: f64,
    pub legs: Vec<RouteLeg>,
}

impl RouteResult {
    fn stationary(node: &str) -> Self {
        Self {
            path: vec![node.to_string()],
            total_distance: 0.0,
            total_risk: 0.0,
            fuel_cost: 0.0,
            weight: 0.0,
            legs: Vec::new(),
        }
    }

    /// Copy with every aggregate rounded to 2 decimal places
    pub fn rounded(&self) -> Self {
        Self {
            path: self.path.clone(),
            total_distance: round2(self.total_distance),
            total_risk: round2(self.total_risk),
            fuel_cost: round2(self.fuel_cost),
            weight: round2(self.weight),
            legs: self
                .legs
                .iter()
                .map(|leg| RouteLeg {
                    from: leg.from.clone(),
                    to: leg.to.clone(),
                    distance_km: round2(leg.distance_km),
                    total_risk: round2(leg.total_risk),
                    weight: round2(leg.weight),
                })
                .collect(),
        }
    }
}

/// Round to 2 decimal places, sending exact ties to the even digit
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}

// Heap entry; ordering is reversed so BinaryHeap behaves as a min-heap
#[derive(Debug, Clone, Copy)]
struct QueueEntry {
    cost: f64,
    node: NodeIndex,
}

impl PartialEq for QueueEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for QueueEntry {}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .cost
            .total_cmp(&self.cost)
            .then_with(|| other.node.cmp(&self.node))
    }
}

#[derive(Debug, Default)]
struct SearchStats {
    settled: usize,
    relaxed: usize,
}

/// Edges of the minimum-weight path, or `None` if `target` is unreachable
fn shortest_path(graph: &RiskGraph, source: NodeIndex, target: NodeIndex) -> Option<Vec<EdgeIndex>> {
    let started = Instant::now();
    let mut stats = SearchStats::default();

    let n = graph.node_count();
    let mut best = vec![f64::INFINITY; n];
    let mut settled = vec![false; n];
    let mut came_from: Vec<Option<EdgeIndex>> = vec![None; n];
    let mut open_set = BinaryHeap::new();

    best[source.index()] = 0.0;
    open_set.push(QueueEntry {
        cost: 0.0,
        node: source,
    });

    while let Some(QueueEntry { cost, node }) = open_set.pop() {
        if settled[node.index()] {
            continue; // stale
        }
        settled[node.index()] = true;
        stats.settled += 1;

        if node == target {
            break;
        }

        for edge in graph.out_edges(node) {
            let next = edge.target();
            if settled[next.index()] {
                continue;
            }

            let tentative = cost + edge.weight().weight;
            if tentative < best[next.index()] {
                stats.relaxed += 1;
                best[next.index()] = tentative;
                came_from[next.index()] = Some(edge.id());
                open_set.push(QueueEntry {
                    cost: tentative,
                    node: next,
                });
            }
        }
    }

    debug!(
        settled = stats.settled,
        relaxed = stats.relaxed,
        elapsed_us = started.elapsed().as_micros() as u64,
        "route search finished"
    );

    if !settled[target.index()] {
        return None;
    }

    let mut edges = Vec::new();
    let mut current = target;
    while let Some(edge) = came_from[current.index()] {
        edges.push(edge);
        current = graph.edge_source(edge)?;
    }
    edges.reverse();
    Some(edges)
}

/// Find the minimum-weight route and its raw aggregates
///
/// `cost_per_km` converts the summed distance into a fuel estimate and must
/// be finite and non-negative. Equal endpoints yield the single-node path
/// with zero aggregates.
pub fn calculate_route(
    graph: &RiskGraph,
    origin: &str,
    destination: &str,
    cost_per_km: f64,
) -> Result<RouteResult> {
    if !(cost_per_km.is_finite() && cost_per_km >= 0.0) {
        return Err(Error::InvalidInput(format!(
            "cost per km must be a finite, non-negative number (got {cost_per_km})"
        )));
    }

    let source = graph
        .index_of(origin)
        .ok_or_else(|| Error::NodeNotFound(origin.to_string()))?;
    let target = graph
        .index_of(destination)
        .ok_or_else(|| Error::NodeNotFound(destination.to_string()))?;

    if source == target {
        return Ok(RouteResult::stationary(origin));
    }

    let edges = shortest_path(graph, source, target).ok_or_else(|| Error::NoPathExists {
        origin: origin.to_string(),
        destination: destination.to_string(),
    })?;

    let mut result = RouteResult::stationary(origin);
    for edge in edges {
        let segment = graph.segment(edge);
        result.path.push(segment.to.clone());
        result.total_distance += segment.distance_km;
        result.total_risk += segment.total_risk;
        result.weight += segment.weight;
        result.legs.push(RouteLeg {
            from: segment.from.clone(),
            to: segment.to.clone(),
            distance_km: segment.distance_km,
            total_risk: segment.total_risk,
            weight: segment.weight,
        });
    }
    result.fuel_cost = result.total_distance * cost_per_km;

    debug!(
        origin,
        destination,
        hops = result.legs.len(),
        distance_km = result.total_distance,
        "route calculated"
    );

    Ok(result)
}

impl RiskGraph {
    /// Shorthand for [`calculate_route`] on this graph
    pub fn route(&self, origin: &str, destination: &str, cost_per_km: f64) -> Result<RouteResult> {
        calculate_route(self, origin, destination, cost_per_km)
    }
}
