//! Error types for the riskroute library
//!
//! Every failure the engine can report is a distinct variant so callers can
//! translate it into their own user-facing message.

use thiserror::Error;

/// Why a road record was rejected while building the graph
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EdgeDefect {
    #[error("distance must be a positive, finite number of kilometers (got {0})")]
    NonPositiveDistance(f64),

    #[error("{factor} probability must lie within [0, 1] (got {value})")]
    ProbabilityOutOfRange { factor: &'static str, value: f64 },

    #[error("road starts and ends at the same city")]
    SelfLoop,

    #[error("a road for this ordered city pair already exists")]
    DuplicateEdge,

    #[error("city name is empty")]
    EmptyName,
}

/// Main error type for riskroute operations
#[derive(Debug, Error)]
pub enum Error {
    /// A road record failed validation; the graph was not built
    #[error("invalid road '{from}' -> '{to}': {reason}")]
    InvalidEdgeData {
        from: String,
        to: String,
        reason: EdgeDefect,
    },

    /// Origin or destination is not a node of the graph
    #[error("city '{0}' is not part of the road network")]
    NodeNotFound(String),

    /// The destination cannot be reached from the origin along directed roads
    #[error("no road path leads from '{origin}' to '{destination}'")]
    NoPathExists { origin: String, destination: String },

    /// Origin and destination name the same city
    #[error("origin and destination are both '{0}'; choose different cities")]
    SameEndpoints(String),

    /// Invalid parameter, such as a fuel setting or cost-per-km
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Network description that cannot be parsed or is inconsistent
    #[error("invalid network configuration: {0}")]
    Config(String),

    /// Network file could not be read
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl Error {
    pub(crate) fn invalid_edge(from: &str, to: &str, reason: EdgeDefect) -> Self {
        Error::InvalidEdgeData {
            from: from.to_string(),
            to: to.to_string(),
            reason,
        }
    }
}

/// Convenience result type for riskroute operations
pub type Result<T> = std::result::Result<T, Error>;
