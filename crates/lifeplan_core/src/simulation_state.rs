//! Mutable state threaded through one simulated lifetime.

use rand::SeedableRng;
use rand::rngs::SmallRng;
use rustc_hash::FxHashMap;

use crate::config::Scenario;
use crate::indexation;
use crate::model::{AssetAccount, EventKind, RealEstate, ScenarioParameters};
use crate::taxes::{TaxYear, Taxes};

/// Lifecycle phase. Strictly monotonic: growth until the retirement-age
/// lump sum, then living off the lump sum until the emergency stash runs
/// low, then retired (pension drawdown active).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Growth,
    LumpSum,
    Retired,
}

/// Per-year accumulators, rebuilt at the top of every simulated year.
#[derive(Debug, Clone, Copy, Default)]
pub struct YearState {
    pub income_salaries: f64,
    pub income_rsus: f64,
    pub income_rentals: f64,
    pub income_private_pension: f64,
    pub income_defined_benefit: f64,
    pub income_state_pension: f64,
    pub income_fund_rent: f64,
    pub income_share_rent: f64,
    pub income_tax_free: f64,
    pub pension_contribution: f64,
    pub expenses: f64,
    pub net_income: f64,
    pub savings: f64,
    pub withdrawal_rate: f64,
    pub cash_deficit: f64,
    pub cash_withdraw: f64,
}

#[derive(Debug)]
pub struct SimulationState {
    pub params: ScenarioParameters,
    pub rng: SmallRng,

    pub age: u32,
    pub year: i32,
    pub row: u32,
    /// Inflation-compounding exponent for the current year (row - 1)
    pub periods: u32,
    pub phase: Phase,

    pub cash: f64,
    pub pension: AssetAccount,
    pub funds: AssetAccount,
    pub shares: AssetAccount,
    pub real_estate: RealEstate,
    pub taxes: Taxes,
    /// Active stock-growth override from a market event
    pub market_override: Option<f64>,

    pub success: bool,
    pub failed_at: u32,

    pub yr: YearState,
}

impl SimulationState {
    /// Set up a trial: accounts bought in, properties and mortgages that
    /// predate the starting age opened and aged up to it, clock parked one
    /// year before the first simulated year.
    pub fn new(scenario: &Scenario, seed: u64) -> Self {
        let params = scenario.parameters.clone();

        let mut pension = AssetAccount::pension(params.pension_growth);
        let mut funds = AssetAccount::exit_tax_fund(params.funds_growth, &scenario.tax);
        let mut shares = AssetAccount::shares(params.shares_growth, &scenario.tax);
        if params.initial_pension > 0.0 {
            pension.buy(params.initial_pension);
        }
        if params.initial_funds > 0.0 {
            funds.buy(params.initial_funds);
        }
        if params.initial_shares > 0.0 {
            shares.buy(params.initial_shares);
        }

        let mut real_estate = RealEstate::new();
        let mut pre_start: FxHashMap<&str, u32> = FxHashMap::default();
        for event in &scenario.events {
            if event.from_age >= params.starting_age {
                continue;
            }
            match event.kind {
                EventKind::Property => {
                    real_estate.buy(
                        &event.id,
                        event.amount,
                        event.rate.unwrap_or(params.inflation),
                    );
                    pre_start.insert(&event.id, event.from_age);
                }
                EventKind::Mortgage => {
                    real_estate.mortgage(
                        &event.id,
                        event.to_age - event.from_age,
                        event.rate.unwrap_or(0.0),
                        event.amount,
                    );
                    pre_start.insert(&event.id, event.from_age);
                }
                _ => {}
            }
        }
        // Catch up: years go by, mortgages get repaid, values appreciate
        for (id, from_age) in &pre_start {
            for _ in *from_age..params.starting_age {
                real_estate.add_year_for(id);
            }
        }

        SimulationState {
            age: params.starting_age - 1,
            year: params.start_year - 1,
            row: 0,
            periods: 0,
            phase: Phase::Growth,
            cash: params.initial_savings,
            pension,
            funds,
            shares,
            real_estate,
            taxes: Taxes::new(scenario.tax.clone()),
            market_override: None,
            success: true,
            failed_at: 0,
            yr: YearState::default(),
            rng: SmallRng::seed_from_u64(seed),
            params,
        }
    }

    /// Advance the clock and reset everything yearly: accumulators, the tax
    /// engine (with this year's household status), account growth, and the
    /// property ledger.
    pub fn begin_year(&mut self) {
        self.row += 1;
        self.year += 1;
        self.age += 1;
        self.periods = self.row - 1;
        self.yr = YearState::default();

        self.taxes.reset(TaxYear {
            age: self.age,
            periods: self.periods,
            inflation: self.params.inflation,
            married: self.married(),
            dependent_children: self.dependent_children(),
            personal_tax_credit: self.params.personal_tax_credit,
        });

        self.pension
            .add_year(&mut self.rng, self.market_override, &mut self.taxes);
        self.funds
            .add_year(&mut self.rng, self.market_override, &mut self.taxes);
        self.shares
            .add_year(&mut self.rng, self.market_override, &mut self.taxes);
        self.real_estate.add_year();
    }

    /// Index a year-zero amount forward to the current year at inflation.
    pub fn adjust(&self, value: f64) -> f64 {
        indexation::adjust(value, self.params.inflation, self.periods)
    }

    /// Same, at an explicit rate (an event's own indexation rate).
    pub fn adjust_at(&self, value: f64, rate: f64) -> f64 {
        indexation::adjust(value, rate, self.periods)
    }

    /// Everything owned right now, across all asset classes.
    pub fn worth(&self) -> f64 {
        self.real_estate.total_value()
            + self.pension.capital()
            + self.funds.capital()
            + self.shares.capital()
            + self.cash
    }

    fn married(&self) -> bool {
        self.params
            .marriage_year
            .is_some_and(|m| m > 0 && self.year >= m)
    }

    fn dependent_children(&self) -> bool {
        let oldest = self.params.oldest_child_born;
        let youngest = self.params.youngest_child_born;
        match (oldest.or(youngest), youngest.or(oldest)) {
            (Some(start), Some(end)) => self.year >= start && self.year <= end + 18,
            _ => false,
        }
    }
}
