//! Road network configuration
//!
//! A network is a static JSON document: fuel settings, the known cities with
//! their coordinates, and the one-way road table. It is loaded once and
//! passed explicitly to whatever builds the graph.
//!
//! ```json
//! {
//!   "fuel": { "price_per_liter": 6.0, "km_per_liter": 8.0 },
//!   "cities": [{ "name": "Campinas", "lat": -22.9056, "lon": -47.0608 }],
//!   "roads": [{ "from": "Campinas", "to": "Sorocaba", "distance_km": 90,
//!               "theft": 0.3, "accident": 0.4, "rain": 0.2, "flood": 0.1 }]
//! }
//! ```

use crate::core::error::{Error, Result};
use crate::core::graph::{EdgeRecord, RiskGraph};
use crate::core::suggest::{fold_name, match_folded, suggest_name};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::path::Path;
use tracing::debug;

const BUILTIN_NETWORK: &str = include_str!("../../data/southeast-brazil.json");

/// Fuel price and vehicle efficiency
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FuelConfig {
    pub price_per_liter: f64,
    pub km_per_liter: f64,
}

impl Default for FuelConfig {
    fn default() -> Self {
        Self {
            price_per_liter: 6.0,
            km_per_liter: 8.0,
        }
    }
}

impl FuelConfig {
    pub fn validate(&self) -> Result<()> {
        if !(self.price_per_liter.is_finite() && self.price_per_liter >= 0.0) {
            return Err(Error::InvalidInput(format!(
                "fuel price must be a finite, non-negative number (got {})",
                self.price_per_liter
            )));
        }
        if !(self.km_per_liter.is_finite() && self.km_per_liter > 0.0) {
            return Err(Error::InvalidInput(format!(
                "fuel efficiency must be a positive number of km per liter (got {})",
                self.km_per_liter
            )));
        }
        Ok(())
    }

    /// Fuel price divided by efficiency
    pub fn cost_per_km(&self) -> Result<f64> {
        self.validate()?;
        Ok(self.price_per_liter / self.km_per_liter)
    }
}

/// A routable city and its position, used only for presentation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct City {
    pub name: String,
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkConfig {
    #[serde(default)]
    pub fuel: FuelConfig,
    pub cities: Vec<City>,
    pub roads: Vec<EdgeRecord>,
}

impl NetworkConfig {
    /// The bundled six-city southeast Brazil network
    pub fn builtin() -> Result<Self> {
        Self::from_json(BUILTIN_NETWORK)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_json(&text)?;
        debug!(
            path = %path.display(),
            cities = config.cities.len(),
            roads = config.roads.len(),
            "loaded network"
        );
        Ok(config)
    }

    /// Check fuel settings, city table, and that every road joins known cities
    ///
    /// Road values (distance, probabilities) are checked by the graph builder.
    pub fn validate(&self) -> Result<()> {
        self.fuel.validate()?;

        let mut names = HashSet::new();
        let mut folded: HashMap<String, &str> = HashMap::new();
        for city in &self.cities {
            if city.name.trim().is_empty() {
                return Err(Error::Config("city with an empty name".to_string()));
            }
            if !names.insert(city.name.as_str()) {
                return Err(Error::Config(format!("city '{}' is listed twice", city.name)));
            }
            // resolve_city matches folded names, so those must be unique too
            if let Some(first) = folded.insert(fold_name(&city.name), city.name.as_str()) {
                return Err(Error::Config(format!(
                    "city '{}' is indistinguishable from '{}' when case and accents are ignored",
                    city.name, first
                )));
            }
            if !(-90.0..=90.0).contains(&city.lat) || !(-180.0..=180.0).contains(&city.lon) {
                return Err(Error::Config(format!(
                    "city '{}' has invalid coordinates ({}, {})",
                    city.name, city.lat, city.lon
                )));
            }
        }

        for road in &self.roads {
            for endpoint in [&road.from, &road.to] {
                if !names.contains(endpoint.as_str()) {
                    return Err(Error::Config(format!(
                        "road '{}' -> '{}' uses undeclared city '{}'",
                        road.from, road.to, endpoint
                    )));
                }
            }
        }

        Ok(())
    }

    /// Build the routing graph; every declared city becomes a node
    pub fn build_graph(&self) -> Result<RiskGraph> {
        RiskGraph::with_nodes(
            self.cities.iter().map(|c| c.name.clone()),
            self.roads.iter().cloned(),
        )
    }

    pub fn city(&self, name: &str) -> Option<&City> {
        self.cities.iter().find(|c| c.name == name)
    }

    fn city_names(&self) -> impl Iterator<Item = &str> {
        self.cities.iter().map(|c| c.name.as_str())
    }

    /// Canonical name for `input`: exact first, then case/accent-insensitive
    pub fn resolve_city(&self, input: &str) -> Option<&str> {
        self.city(input)
            .map(|c| c.name.as_str())
            .or_else(|| match_folded(input, self.city_names()))
    }

    /// Closest known city for an unrecognized name
    pub fn suggest_city(&self, input: &str) -> Option<String> {
        suggest_name(input, self.city_names())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_network_is_valid() {
        let network = NetworkConfig::builtin().unwrap();
        assert_eq!(network.cities.len(), 6);
        assert_eq!(network.roads.len(), 8);
        assert_eq!(network.fuel, FuelConfig::default());

        let graph = network.build_graph().unwrap();
        assert_eq!(graph.node_count(), 6);
        assert_eq!(graph.edge_count(), 8);
    }

    #[test]
    fn test_cost_per_km() {
        assert_eq!(FuelConfig::default().cost_per_km().unwrap(), 0.75);

        let no_efficiency = FuelConfig {
            price_per_liter: 6.0,
            km_per_liter: 0.0,
        };
        assert!(matches!(no_efficiency.cost_per_km(), Err(Error::InvalidInput(_))));

        let negative_price = FuelConfig {
            price_per_liter: -1.0,
            km_per_liter: 8.0,
        };
        assert!(negative_price.validate().is_err());
    }

    #[test]
    fn test_fuel_defaults_when_omitted() {
        let network = NetworkConfig::from_json(
            r#"{"cities":[{"name":"A","lat":0,"lon":0},{"name":"B","lat":1,"lon":1}],
                "roads":[{"from":"A","to":"B","distance_km":5,"theft":0,"accident":0,"rain":0,"flood":0}]}"#,
        )
        .unwrap();
        assert_eq!(network.fuel, FuelConfig::default());
    }

    #[test]
    fn test_rejects_undeclared_city() {
        let err = NetworkConfig::from_json(
            r#"{"cities":[{"name":"A","lat":0,"lon":0}],
                "roads":[{"from":"A","to":"B","distance_km":5,"theft":0,"accident":0,"rain":0,"flood":0}]}"#,
        )
        .unwrap_err();
        assert!(matches!(err, Error::Config(msg) if msg.contains("'B'")));
    }

    #[test]
    fn test_rejects_duplicate_city_and_bad_coordinates() {
        let dup = r#"{"cities":[{"name":"A","lat":0,"lon":0},{"name":"A","lat":1,"lon":1}],"roads":[]}"#;
        assert!(matches!(NetworkConfig::from_json(dup), Err(Error::Config(_))));

        let bad = r#"{"cities":[{"name":"A","lat":95,"lon":0}],"roads":[]}"#;
        assert!(matches!(NetworkConfig::from_json(bad), Err(Error::Config(_))));
    }

    #[test]
    fn test_rejects_names_equal_after_folding() {
        let json = r#"{"cities":[{"name":"São Paulo","lat":0,"lon":0},{"name":"sao paulo","lat":1,"lon":1}],"roads":[]}"#;
        match NetworkConfig::from_json(json).unwrap_err() {
            Error::Config(msg) => {
                assert!(msg.contains("'sao paulo'"));
                assert!(msg.contains("'São Paulo'"));
            }
            other => panic!("unexpected error: {other:?}"),
        }

        let distinct = r#"{"cities":[{"name":"São Paulo","lat":0,"lon":0},{"name":"São Carlos","lat":1,"lon":1}],"roads":[]}"#;
        assert!(NetworkConfig::from_json(distinct).is_ok());
    }

    #[test]
    fn test_malformed_json_is_config_error() {
        assert!(matches!(
            NetworkConfig::from_json("{\"cities\": ["),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_isolated_city_is_a_node() {
        let network = NetworkConfig::from_json(
            r#"{"cities":[{"name":"A","lat":0,"lon":0},{"name":"B","lat":1,"lon":1},{"name":"C","lat":2,"lon":2}],
                "roads":[{"from":"A","to":"B","distance_km":5,"theft":0,"accident":0,"rain":0,"flood":0}]}"#,
        )
        .unwrap();
        let graph = network.build_graph().unwrap();
        assert!(graph.contains("C"));
        assert!(matches!(
            graph.route("A", "C", 1.0),
            Err(Error::NoPathExists { .. })
        ));
    }

    #[test]
    fn test_resolve_and_suggest_city() {
        let network = NetworkConfig::builtin().unwrap();
        assert_eq!(network.resolve_city("Campinas"), Some("Campinas"));
        assert_eq!(network.resolve_city("sao jose dos campos"), Some("São José dos Campos"));
        assert_eq!(network.resolve_city("Campnas"), None);
        assert_eq!(network.suggest_city("Campnas"), Some("Campinas".to_string()));
    }
}
