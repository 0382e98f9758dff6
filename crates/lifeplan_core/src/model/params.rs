//! Scenario parameters - the immutable inputs of a run.

use serde::{Deserialize, Serialize};

/// Annual growth model for an asset account.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GrowthProfile {
    /// Expected annual growth rate
    pub mean: f64,
    /// Volatility; any non-zero value makes the whole run Monte Carlo
    #[serde(default)]
    pub std_dev: f64,
}

impl GrowthProfile {
    pub fn fixed(mean: f64) -> Self {
        GrowthProfile { mean, std_dev: 0.0 }
    }
}

/// Per-account withdrawal ranks: 0 = never use, 1..=4 = fill order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WithdrawalPriorities {
    pub cash: u8,
    pub pension: u8,
    pub funds: u8,
    pub shares: u8,
}

impl WithdrawalPriorities {
    /// Accumulation-phase order: cash, then funds, then shares; the pension
    /// stays untouched.
    pub const GROWTH: Self = WithdrawalPriorities {
        cash: 1,
        pension: 0,
        funds: 2,
        shares: 3,
    };

    /// Order while living off the lump sum: as in growth, with the pension
    /// as the last resort.
    pub const LUMP_SUM: Self = WithdrawalPriorities {
        cash: 1,
        pension: 4,
        funds: 2,
        shares: 3,
    };

    /// The ranks as an array in tie-break order (cash first).
    pub fn ranks(&self) -> [u8; 4] {
        [self.cash, self.pension, self.funds, self.shares]
    }
}

/// Everything about the household and its plan that is fixed for a run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioParameters {
    pub starting_age: u32,
    /// Age the plan must survive to for the run to count as a success
    pub target_age: u32,
    pub retirement_age: u32,

    pub initial_savings: f64,
    #[serde(default)]
    pub initial_pension: f64,
    #[serde(default)]
    pub initial_funds: f64,
    #[serde(default)]
    pub initial_shares: f64,

    pub pension_growth: GrowthProfile,
    pub funds_growth: GrowthProfile,
    pub shares_growth: GrowthProfile,

    pub inflation: f64,

    /// Scales the age-banded pension contribution schedule (1.0 = full rate)
    #[serde(default)]
    pub pension_percentage: f64,
    /// Cap the contribution base at the tax-relief earnings limit
    #[serde(default)]
    pub pension_capped: bool,
    #[serde(default)]
    pub state_pension_weekly: f64,

    /// Fractions of surplus cash invested each year
    #[serde(default)]
    pub funds_allocation: f64,
    #[serde(default)]
    pub shares_allocation: f64,
    /// Emergency cash target, in year-zero money
    #[serde(default)]
    pub emergency_stash: f64,

    /// Withdrawal order once retired; earlier phases use fixed orders
    pub priorities: WithdrawalPriorities,

    pub personal_tax_credit: f64,
    #[serde(default)]
    pub marriage_year: Option<i32>,
    #[serde(default)]
    pub oldest_child_born: Option<i32>,
    #[serde(default)]
    pub youngest_child_born: Option<i32>,

    /// Calendar year of the first simulated year
    pub start_year: i32,
    /// Trial count when any growth profile has volatility
    #[serde(default = "default_monte_carlo_runs")]
    pub monte_carlo_runs: u32,
}

fn default_monte_carlo_runs() -> u32 {
    1000
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_priority_presets() {
        assert_eq!(WithdrawalPriorities::GROWTH.ranks(), [1, 0, 2, 3]);
        assert_eq!(WithdrawalPriorities::LUMP_SUM.ranks(), [1, 4, 2, 3]);
    }

    #[test]
    fn test_monte_carlo_runs_default() {
        let json = r#"{
            "starting_age": 30, "target_age": 90, "retirement_age": 65,
            "initial_savings": 10000.0,
            "pension_growth": {"mean": 0.05},
            "funds_growth": {"mean": 0.04},
            "shares_growth": {"mean": 0.04},
            "inflation": 0.02,
            "priorities": {"cash": 1, "pension": 4, "funds": 2, "shares": 3},
            "personal_tax_credit": 1875.0,
            "start_year": 2025
        }"#;
        let params: ScenarioParameters = serde_json::from_str(json).unwrap();
        assert_eq!(params.monte_carlo_runs, 1000);
        assert_eq!(params.pension_growth.std_dev, 0.0);
        assert_eq!(params.marriage_year, None);
    }
}
