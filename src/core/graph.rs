//! Directed road graph with risk-weighted edges
//!
//! Roads are one-way: a record `A -> B` says nothing about `B -> A`. Nodes get
//! dense indices in first-appearance order (explicit cities first, then road
//! endpoints in record order), which the route search relies on for its
//! tie-break.

use crate::core::error::{EdgeDefect, Error, Result};
use crate::core::risk::{scalarized_weight, RiskFactors};
use petgraph::graph::{DiGraph, EdgeIndex, EdgeReference, NodeIndex};
use petgraph::visit::EdgeRef;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

/// One row of the static road table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeRecord {
    pub from: String,
    pub to: String,
    #[serde(rename = "distance_km")]
    pub distance: f64,
    #[serde(flatten)]
    pub risk: RiskFactors,
}

impl EdgeRecord {
    pub fn new(from: impl Into<String>, to: impl Into<String>, distance: f64, risk: RiskFactors) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            distance,
            risk,
        }
    }

    fn defect(&self) -> Option<EdgeDefect> {
        if self.from.trim().is_empty() || self.to.trim().is_empty() {
            return Some(EdgeDefect::EmptyName);
        }
        if self.from == self.to {
            return Some(EdgeDefect::SelfLoop);
        }
        if !(self.distance.is_finite() && self.distance > 0.0) {
            return Some(EdgeDefect::NonPositiveDistance(self.distance));
        }
        self.risk
            .out_of_range()
            .map(|(factor, value)| EdgeDefect::ProbabilityOutOfRange { factor, value })
    }
}

/// A validated road with its derived scores
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoadSegment {
    pub from: String,
    pub to: String,
    pub distance_km: f64,
    pub risk: RiskFactors,
    /// Composite risk, reported separately from `weight`
    pub total_risk: f64,
    /// Path-selection cost: `distance_km * (1 + total_risk)`
    pub weight: f64,
}

impl RoadSegment {
    fn from_record(record: EdgeRecord) -> Self {
        let total_risk = record.risk.composite();
        Self {
            weight: scalarized_weight(record.distance, total_risk),
            total_risk,
            distance_km: record.distance,
            risk: record.risk,
            from: record.from,
            to: record.to,
        }
    }
}

/// Immutable risk-weighted road graph
#[derive(Debug, Clone)]
pub struct RiskGraph {
    graph: DiGraph<String, RoadSegment>,
    node_map: HashMap<String, NodeIndex>,
}

impl RiskGraph {
    /// Build a graph whose nodes are exactly the road endpoints
    pub fn build<I>(edges: I) -> Result<Self>
    where
        I: IntoIterator<Item = EdgeRecord>,
    {
        Self::with_nodes(std::iter::empty::<String>(), edges)
    }

    /// Build a graph that also contains `nodes`, even those without roads
    ///
    /// Fails on the first invalid record; no partial graph is returned.
    pub fn with_nodes<N, S, I>(nodes: N, edges: I) -> Result<Self>
    where
        N: IntoIterator<Item = S>,
        S: Into<String>,
        I: IntoIterator<Item = EdgeRecord>,
    {
        let mut graph = DiGraph::new();
        let mut node_map = HashMap::new();

        for name in nodes {
            let name = name.into();
            if name.trim().is_empty() {
                return Err(Error::InvalidInput("city name is empty".to_string()));
            }
            intern(&mut graph, &mut node_map, name);
        }

        for record in edges {
            if let Some(defect) = record.defect() {
                return Err(Error::invalid_edge(&record.from, &record.to, defect));
            }

            let from = intern(&mut graph, &mut node_map, record.from.clone());
            let to = intern(&mut graph, &mut node_map, record.to.clone());
            if graph.find_edge(from, to).is_some() {
                return Err(Error::invalid_edge(&record.from, &record.to, EdgeDefect::DuplicateEdge));
            }

            graph.add_edge(from, to, RoadSegment::from_record(record));
        }

        debug!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            "built risk graph"
        );

        Ok(Self { graph, node_map })
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.node_map.contains_key(name)
    }

    /// Node names in index order
    pub fn nodes(&self) -> impl Iterator<Item = &str> {
        self.graph.node_weights().map(String::as_str)
    }

    /// All roads in insertion order
    pub fn edges(&self) -> impl Iterator<Item = &RoadSegment> {
        self.graph.edge_weights()
    }

    /// The road `from -> to`, if one exists
    pub fn edge(&self, from: &str, to: &str) -> Option<&RoadSegment> {
        let a = self.index_of(from)?;
        let b = self.index_of(to)?;
        self.graph.find_edge(a, b).map(|e| &self.graph[e])
    }

    /// Roads leaving `name`, in insertion order
    pub fn outgoing(&self, name: &str) -> Vec<&RoadSegment> {
        match self.index_of(name) {
            Some(idx) => self.out_edges(idx).into_iter().map(|e| e.weight()).collect(),
            None => Vec::new(),
        }
    }

    pub(crate) fn index_of(&self, name: &str) -> Option<NodeIndex> {
        self.node_map.get(name).copied()
    }

    pub(crate) fn segment(&self, edge: EdgeIndex) -> &RoadSegment {
        &self.graph[edge]
    }

    pub(crate) fn edge_source(&self, edge: EdgeIndex) -> Option<NodeIndex> {
        self.graph.edge_endpoints(edge).map(|(source, _)| source)
    }

    /// Outgoing edges sorted by insertion order. petgraph walks its adjacency
    /// list newest-first, so the order is pinned here instead.
    pub(crate) fn out_edges(&self, node: NodeIndex) -> Vec<EdgeReference<'_, RoadSegment>> {
        let mut out: Vec<_> = self.graph.edges(node).collect();
        out.sort_by_key(|e| e.id());
        out
    }
}

fn intern(
    graph: &mut DiGraph<String, RoadSegment>,
    node_map: &mut HashMap<String, NodeIndex>,
    name: String,
) -> NodeIndex {
    if let Some(&idx) = node_map.get(&name) {
        return idx;
    }
    let idx = graph.add_node(name.clone());
    node_map.insert(name, idx);
    idx
}

/// Build a [`RiskGraph`] from a road table
pub fn build_graph<I>(edges: I) -> Result<RiskGraph>
where
    I: IntoIterator<Item = EdgeRecord>,
{
    RiskGraph::build(edges)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn road(from: &str, to: &str, distance: f64) -> EdgeRecord {
        EdgeRecord::new(from, to, distance, RiskFactors::new(0.2, 0.3, 0.1, 0.1))
    }

    #[test]
    fn test_build_computes_risk_and_weight() {
        let graph = build_graph(vec![road("A", "B", 100.0)]).unwrap();
        let edge = graph.edge("A", "B").unwrap();

        assert_eq!(edge.distance_km, 100.0);
        assert!((edge.total_risk - 0.34).abs() < 1e-9);
        assert!((edge.weight - 134.0).abs() < 1e-9);
    }

    #[test]
    fn test_graph_is_directed() {
        let graph = build_graph(vec![road("A", "B", 10.0)]).unwrap();
        assert!(graph.edge("A", "B").is_some());
        assert!(graph.edge("B", "A").is_none());
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn test_nodes_follow_first_appearance() {
        let graph = RiskGraph::with_nodes(
            ["Z", "A"],
            vec![road("C", "A", 1.0), road("B", "C", 1.0)],
        )
        .unwrap();
        let nodes: Vec<&str> = graph.nodes().collect();
        assert_eq!(nodes, vec!["Z", "A", "C", "B"]);
        assert!(graph.contains("Z"));
        assert!(graph.outgoing("Z").is_empty());
    }

    #[test]
    fn test_outgoing_keeps_insertion_order() {
        let graph = build_graph(vec![
            road("A", "B", 1.0),
            road("A", "C", 1.0),
            road("A", "D", 1.0),
        ])
        .unwrap();
        let targets: Vec<&str> = graph.outgoing("A").iter().map(|e| e.to.as_str()).collect();
        assert_eq!(targets, vec!["B", "C", "D"]);
        assert!(graph.outgoing("missing").is_empty());
    }

    #[test]
    fn test_rejects_non_positive_distance() {
        for distance in [0.0, -5.0, f64::NAN, f64::INFINITY] {
            let err = build_graph(vec![road("A", "B", distance)]).unwrap_err();
            assert!(matches!(
                err,
                Error::InvalidEdgeData {
                    reason: EdgeDefect::NonPositiveDistance(_),
                    ..
                }
            ));
        }
    }

    #[test]
    fn test_rejects_probability_outside_unit_interval() {
        let bad = EdgeRecord::new("A", "B", 10.0, RiskFactors::new(0.1, 0.1, 0.1, 1.01));
        let err = build_graph(vec![road("X", "Y", 5.0), bad]).unwrap_err();
        match err {
            Error::InvalidEdgeData { from, to, reason } => {
                assert_eq!((from.as_str(), to.as_str()), ("A", "B"));
                assert_eq!(
                    reason,
                    EdgeDefect::ProbabilityOutOfRange {
                        factor: "flood",
                        value: 1.01
                    }
                );
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_rejects_self_loops_and_duplicates() {
        let err = build_graph(vec![road("A", "A", 1.0)]).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidEdgeData {
                reason: EdgeDefect::SelfLoop,
                ..
            }
        ));

        let err = build_graph(vec![road("A", "B", 1.0), road("A", "B", 2.0)]).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidEdgeData {
                reason: EdgeDefect::DuplicateEdge,
                ..
            }
        ));

        // The reverse direction is a different ordered pair.
        assert!(build_graph(vec![road("A", "B", 1.0), road("B", "A", 2.0)]).is_ok());
    }

    #[test]
    fn test_rejects_empty_names() {
        let err = build_graph(vec![road(" ", "B", 1.0)]).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidEdgeData {
                reason: EdgeDefect::EmptyName,
                ..
            }
        ));

        let err = RiskGraph::with_nodes([""], Vec::<EdgeRecord>::new()).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[test]
    fn test_edge_record_json_shape() {
        let json = r#"{"from":"A","to":"B","distance_km":12.5,"theft":0.1,"accident":0.2,"rain":0.3,"flood":0.4}"#;
        let record: EdgeRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.distance, 12.5);
        assert_eq!(record.risk, RiskFactors::new(0.1, 0.2, 0.3, 0.4));
    }
}
