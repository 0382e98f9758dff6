//! Per-year output rows and run-level results.

use serde::{Deserialize, Serialize};

/// One simulated year, as reported. Monetary fields are in that year's
/// (inflated) money.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct YearRow {
    pub age: u32,
    pub year: i32,

    pub income_salaries: f64,
    pub income_rsus: f64,
    pub income_rentals: f64,
    pub income_private_pension: f64,
    pub income_state_pension: f64,
    /// Fund withdrawals net of their attributed exit tax
    pub income_fund_rent: f64,
    /// Share sales net of their attributed CGT
    pub income_share_rent: f64,
    pub income_cash: f64,
    pub net_income: f64,
    pub expenses: f64,
    /// Surplus income banked this year
    pub savings: f64,

    pub pension_contribution: f64,
    pub withdrawal_rate: f64,

    pub it: f64,
    pub prsi: f64,
    pub usc: f64,
    pub cgt: f64,

    pub cash: f64,
    pub pension_capital: f64,
    pub funds_capital: f64,
    pub shares_capital: f64,
    pub real_estate_capital: f64,
    /// Everything owned, across all asset classes
    pub worth: f64,
}

impl YearRow {
    fn add(&mut self, other: &YearRow) {
        self.age = other.age;
        self.year = other.year;
        self.income_salaries += other.income_salaries;
        self.income_rsus += other.income_rsus;
        self.income_rentals += other.income_rentals;
        self.income_private_pension += other.income_private_pension;
        self.income_state_pension += other.income_state_pension;
        self.income_fund_rent += other.income_fund_rent;
        self.income_share_rent += other.income_share_rent;
        self.income_cash += other.income_cash;
        self.net_income += other.net_income;
        self.expenses += other.expenses;
        self.savings += other.savings;
        self.pension_contribution += other.pension_contribution;
        self.withdrawal_rate += other.withdrawal_rate;
        self.it += other.it;
        self.prsi += other.prsi;
        self.usc += other.usc;
        self.cgt += other.cgt;
        self.cash += other.cash;
        self.pension_capital += other.pension_capital;
        self.funds_capital += other.funds_capital;
        self.shares_capital += other.shares_capital;
        self.real_estate_capital += other.real_estate_capital;
        self.worth += other.worth;
    }

    fn scale(&mut self, factor: f64) {
        self.income_salaries *= factor;
        self.income_rsus *= factor;
        self.income_rentals *= factor;
        self.income_private_pension *= factor;
        self.income_state_pension *= factor;
        self.income_fund_rent *= factor;
        self.income_share_rent *= factor;
        self.income_cash *= factor;
        self.net_income *= factor;
        self.expenses *= factor;
        self.savings *= factor;
        self.pension_contribution *= factor;
        self.withdrawal_rate *= factor;
        self.it *= factor;
        self.prsi *= factor;
        self.usc *= factor;
        self.cgt *= factor;
        self.cash *= factor;
        self.pension_capital *= factor;
        self.funds_capital *= factor;
        self.shares_capital *= factor;
        self.real_estate_capital *= factor;
        self.worth *= factor;
    }
}

/// Outcome of a single trial.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationResult {
    /// The plan covered expenses through the target age
    pub success: bool,
    /// Age of the first shortfall, 0 if none
    pub failed_at: u32,
    pub rows: Vec<YearRow>,
}

/// Aggregate over a batch of trials: per-year rows averaged across runs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MonteCarloResult {
    pub runs: u32,
    pub successes: u32,
    pub rows: Vec<YearRow>,
}

impl MonteCarloResult {
    /// Fold one trial into the aggregate.
    pub fn accumulate(&mut self, trial: &SimulationResult) {
        self.runs += 1;
        if trial.success {
            self.successes += 1;
        }
        if self.rows.len() < trial.rows.len() {
            self.rows.resize(trial.rows.len(), YearRow::default());
        }
        for (sum, row) in self.rows.iter_mut().zip(&trial.rows) {
            sum.add(row);
        }
    }

    /// Merge another partial aggregate (used when trials run in parallel).
    pub fn merge(&mut self, other: &MonteCarloResult) {
        self.runs += other.runs;
        self.successes += other.successes;
        if self.rows.len() < other.rows.len() {
            self.rows.resize(other.rows.len(), YearRow::default());
        }
        for (sum, row) in self.rows.iter_mut().zip(&other.rows) {
            sum.add(row);
        }
    }

    /// Divide the summed rows by the run count to get per-year means.
    pub fn finish(&mut self) {
        if self.runs > 1 {
            let factor = 1.0 / f64::from(self.runs);
            for row in &mut self.rows {
                row.scale(factor);
            }
        }
    }

    /// Fraction of trials that survived to the target age.
    pub fn success_rate(&self) -> f64 {
        if self.runs == 0 {
            0.0
        } else {
            f64::from(self.successes) / f64::from(self.runs)
        }
    }
}
