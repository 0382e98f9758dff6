//! Integration tests for the lifeplan simulation engine
//!
//! Tests are organized by topic:
//! - `lifecycle` - Full working-life-to-retirement projections
//! - `taxes_pipeline` - Tax arithmetic as seen through whole runs
//! - `withdrawals` - Liquidation order and shortfall handling
//! - `property` - Real estate purchases, mortgages, and sales
//! - `monte_carlo` - Aggregation, seeding, and reproducibility

mod lifecycle;
mod withdrawals;
