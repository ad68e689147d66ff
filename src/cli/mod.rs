//! CLI-specific utilities for riskroute
//!
//! Logging setup and plain-text rendering, kept out of the library.

pub mod logging;
pub mod report;

pub use logging::init_logging;
pub use report::{render_cities, render_route};
