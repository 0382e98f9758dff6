//! Command-line front-end for the lifeplan simulation engine
//!
//! Loads a scenario from JSON, validates it, runs either a single
//! deterministic projection or a Monte Carlo batch, and renders the
//! per-year rows as CSV or JSON. All simulation logic lives in
//! `lifeplan_core`; this crate only handles I/O.

pub mod logging;
pub mod output;
pub mod scenario;

pub use logging::init_logging;
pub use output::{OutputFormat, write_json, write_csv};
pub use scenario::load_scenario;
