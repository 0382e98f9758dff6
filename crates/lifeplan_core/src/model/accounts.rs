//! Asset accounts: private pension, exit-tax funds, and shares.
//!
//! Each account is an aggregate position: total capital plus the cost basis
//! of whatever is still held. Sales realize gains in proportion to the
//! unrealized gain of the whole position. Growth is applied once per year,
//! before any trading, from the account's growth profile (or an active
//! market override).

use rand::rngs::SmallRng;
use rand_distr::{Distribution, StandardNormal};

use super::params::GrowthProfile;
use super::tax_config::TaxConfig;
use crate::taxes::Taxes;

/// How an account's sale proceeds and gains are declared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountKind {
    /// Tax-advantaged: proceeds are pension income, no gains tax
    Pension,
    /// Exit-tax wrapper with periodic deemed disposal; losses cannot offset
    ExitTaxFund,
    /// Plain shares taxed under CGT; losses offset
    Shares,
}

#[derive(Debug, Clone)]
pub struct AssetAccount {
    kind: AccountKind,
    capital: f64,
    cost_basis: f64,
    growth: GrowthProfile,
    /// Tax rate applied to realized gains (0 for pensions)
    gain_tax_rate: f64,
    can_offset_losses: bool,
    /// Deemed disposal interval in held years; 0 disables
    deemed_disposal_years: u32,
    years_held: u32,
    lump_sum_taken: bool,
}

impl AssetAccount {
    pub fn pension(growth: GrowthProfile) -> Self {
        AssetAccount {
            kind: AccountKind::Pension,
            capital: 0.0,
            cost_basis: 0.0,
            growth,
            gain_tax_rate: 0.0,
            can_offset_losses: false,
            deemed_disposal_years: 0,
            years_held: 0,
            lump_sum_taken: false,
        }
    }

    pub fn exit_tax_fund(growth: GrowthProfile, config: &TaxConfig) -> Self {
        AssetAccount {
            kind: AccountKind::ExitTaxFund,
            capital: 0.0,
            cost_basis: 0.0,
            growth,
            gain_tax_rate: config.fund_exit_tax_rate,
            can_offset_losses: false,
            deemed_disposal_years: config.fund_deemed_disposal_years,
            years_held: 0,
            lump_sum_taken: false,
        }
    }

    pub fn shares(growth: GrowthProfile, config: &TaxConfig) -> Self {
        AssetAccount {
            kind: AccountKind::Shares,
            capital: 0.0,
            cost_basis: 0.0,
            growth,
            gain_tax_rate: config.cgt_rate,
            can_offset_losses: true,
            deemed_disposal_years: 0,
            years_held: 0,
            lump_sum_taken: false,
        }
    }

    pub fn kind(&self) -> AccountKind {
        self.kind
    }

    pub fn capital(&self) -> f64 {
        self.capital
    }

    pub fn cost_basis(&self) -> f64 {
        self.cost_basis
    }

    pub fn has_volatility(&self) -> bool {
        self.growth.std_dev > 0.0
    }

    /// Add fresh money to the position.
    pub fn buy(&mut self, amount: f64) {
        if amount > 0.0 {
            self.capital += amount;
            self.cost_basis += amount;
        }
    }

    /// Apply this year's growth, then any deemed disposal that falls due.
    ///
    /// The sampled rate is `mean + std_dev * N(0,1)`; an active market
    /// override replaces the mean. A year that would push the position
    /// negative floors it at zero instead.
    pub fn add_year(&mut self, rng: &mut SmallRng, market_override: Option<f64>, taxes: &mut Taxes) {
        if self.capital > 0.0 {
            let mean = market_override.unwrap_or(self.growth.mean);
            let rate = if self.growth.std_dev > 0.0 {
                let z: f64 = StandardNormal.sample(rng);
                mean + self.growth.std_dev * z
            } else {
                mean
            };
            self.capital += self.capital * rate;
            if self.capital < 0.0 {
                self.capital = 0.0;
                self.cost_basis = 0.0;
            }
        }
        self.years_held += 1;

        if self.deemed_disposal_years > 0 && self.years_held % self.deemed_disposal_years == 0 {
            // Mark to market: accrued gain is taxed now and the basis resets
            let gains = self.capital - self.cost_basis;
            self.cost_basis = self.capital;
            self.years_held = 0;
            if gains > 0.0 || self.can_offset_losses {
                taxes.declare_investment_gains(gains, self.gain_tax_rate);
            }
        }
    }

    /// Sell up to `amount`, capped at the available capital. Proceeds and
    /// the proportional realized gain are declared per the account kind.
    /// Returns the gross proceeds.
    pub fn sell(&mut self, amount: f64, taxes: &mut Taxes) -> f64 {
        let sold = amount.min(self.capital).max(0.0);
        if sold <= 0.0 {
            return 0.0;
        }
        let gains = sold * (self.capital - self.cost_basis) / self.capital;
        self.capital -= sold;
        self.cost_basis = (self.cost_basis - (sold - gains)).max(0.0);

        match self.kind {
            AccountKind::Pension => taxes.declare_private_pension_income(sold),
            AccountKind::ExitTaxFund | AccountKind::Shares => {
                taxes.declare_investment_income(sold);
                if gains > 0.0 || self.can_offset_losses {
                    taxes.declare_investment_gains(gains, self.gain_tax_rate);
                }
            }
        }
        sold
    }

    /// One-time tax-advantaged lump sum at retirement: a fixed fraction of
    /// the pension capital, declared through the lump-sum bands.
    pub fn take_lump_sum(&mut self, fraction: f64, taxes: &mut Taxes) -> f64 {
        debug_assert_eq!(self.kind, AccountKind::Pension);
        if self.lump_sum_taken || self.capital <= 0.0 {
            return 0.0;
        }
        let sold = (self.capital * fraction).min(self.capital).max(0.0);
        self.reduce_position(sold);
        self.lump_sum_taken = true;
        taxes.declare_pension_lump_sum(sold);
        sold
    }

    /// Yearly minimum drawdown while retired: a fraction of the remaining
    /// capital (age-banded, resolved by the caller), declared as pension
    /// income.
    pub fn drawdown(&mut self, rate: f64, taxes: &mut Taxes) -> f64 {
        debug_assert_eq!(self.kind, AccountKind::Pension);
        self.sell(self.capital * rate, taxes)
    }

    fn reduce_position(&mut self, sold: f64) {
        if self.capital <= 0.0 {
            return;
        }
        let gains = sold * (self.capital - self.cost_basis) / self.capital;
        self.capital -= sold;
        self.cost_basis = (self.cost_basis - (sold - gains)).max(0.0);
    }
}
