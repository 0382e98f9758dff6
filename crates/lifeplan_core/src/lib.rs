//! Household lifetime financial simulation library
//!
//! This crate projects a household's finances year by year from a starting
//! age to age 100, driven by a timeline of events. It supports:
//! - Salaries with age-banded private pension contributions, RSUs, rentals,
//!   defined-benefit pensions, and tax-free income
//! - Irish income tax, PRSI, USC, and CGT (data-driven bands, so other
//!   jurisdictions are a config swap)
//! - Exit-tax index funds with deemed disposal, CGT shares, and a private
//!   pension with a retirement lump sum and age-banded drawdown
//! - Properties with amortizing mortgages
//! - Priority-ordered liquidation when expenses outrun income
//! - Monte Carlo aggregation when any asset's growth has volatility
//!
//! # Builder
//!
//! Use the fluent builder for ergonomic scenario setup:
//!
//! ```
//! use lifeplan_core::config::ScenarioBuilder;
//! use lifeplan_core::simulation::simulate;
//!
//! let scenario = ScenarioBuilder::new(30, 90, 65)
//!     .with_parameters(|p| {
//!         p.initial_savings = 20_000.0;
//!         p.pension_percentage = 1.0;
//!         p.personal_tax_credit = 2_000.0;
//!     })
//!     .salary(55_000.0, 30, 64)
//!     .expense(30_000.0, 30, 100)
//!     .build()
//!     .unwrap();
//!
//! let result = simulate(&scenario, 42);
//! assert_eq!(result.rows[0].age, 30);
//! ```

#![warn(clippy::all)]

// ============================================================================
// Core modules
// ============================================================================

pub mod apply;
pub mod error;
pub mod indexation;
pub mod liquidation;
pub mod simulation;
pub mod simulation_state;
pub mod taxes;

// ============================================================================
// Type definition modules
// ============================================================================

pub mod config;
pub mod model;

// ============================================================================
// Test modules
// ============================================================================

#[cfg(test)]
mod tests;

// ============================================================================
// Public re-exports for convenience
// ============================================================================

pub use config::{Scenario, ScenarioBuilder};
pub use error::ScenarioError;
pub use model::{MonteCarloResult, SimulationResult, YearRow};
pub use simulation::{monte_carlo_simulate, needs_monte_carlo, simulate};
