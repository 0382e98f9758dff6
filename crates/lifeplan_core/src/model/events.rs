//! Scenario events - the timeline that drives each simulated year.
//!
//! Every event is active over an inclusive `[from_age, to_age]` window and
//! carries a base amount in year-zero money. The interpreter indexes the
//! amount forward by the event's own rate (or scenario inflation when the
//! rate is absent) before acting on it.

use serde::{Deserialize, Serialize};

/// The closed set of event kinds.
///
/// The serde tags are the scenario-file spellings. An unrecognized tag is a
/// deserialization error, so malformed scenarios fail at the loader instead
/// of silently doing nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventKind {
    /// No operation; kept so rows in a scenario can be parked without deletion
    #[serde(rename = "NOP")]
    NoOp,
    /// Rental income (taxed as other income)
    #[serde(rename = "RI")]
    RentalIncome,
    /// Salary with age-banded private pension contributions
    #[serde(rename = "SI")]
    Salary,
    /// Salary with no pension contribution
    #[serde(rename = "SInp")]
    SalaryNoPension,
    /// RSU/irregular share income (non-domestic shares)
    #[serde(rename = "UI")]
    RsuIncome,
    /// Defined-benefit pension income (taxed like salary, no contributions)
    #[serde(rename = "DBI")]
    DefinedBenefitIncome,
    /// Income outside the tax net
    #[serde(rename = "FI")]
    TaxFreeIncome,
    /// Annual expense
    #[serde(rename = "E")]
    Expense,
    /// Amortizing mortgage attached to a property id
    #[serde(rename = "M")]
    Mortgage,
    /// Property purchase at `from_age`, sale at `to_age`
    #[serde(rename = "R")]
    Property,
    /// Stock-market growth override (crash or bubble) spread over the window
    #[serde(rename = "SM")]
    MarketOverride,
}

/// One row of the scenario timeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub kind: EventKind,
    /// Links mortgages to properties; unused by the other kinds
    #[serde(default)]
    pub id: String,
    pub amount: f64,
    pub from_age: u32,
    pub to_age: u32,
    /// Indexation rate for the amount, mortgage interest for `M`, property
    /// appreciation for `R`; scenario inflation when absent
    #[serde(default)]
    pub rate: Option<f64>,
    /// Employer pension match as a fraction of salary (`SI` only)
    #[serde(default)]
    pub employer_match: f64,
}

impl Event {
    /// Whether the event window covers `age` (inclusive on both ends).
    pub fn covers(&self, age: u32) -> bool {
        age >= self.from_age && age <= self.to_age
    }
}
