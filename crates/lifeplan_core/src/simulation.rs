//! The yearly clock: a full lifetime per trial, Monte Carlo on top.

use rand::{RngCore, SeedableRng, rngs::SmallRng};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::apply;
use crate::config::Scenario;
use crate::liquidation;
use crate::model::{
    MonteCarloResult, ScenarioParameters, SimulationResult, WithdrawalPriorities, YearRow,
};
use crate::simulation_state::{Phase, SimulationState};

/// Simulation horizon: the run always projects to this age, whatever the
/// target age is.
const HORIZON_AGE: u32 = 100;

/// A run needs Monte Carlo aggregation when any asset has volatility.
pub fn needs_monte_carlo(params: &ScenarioParameters) -> bool {
    params.pension_growth.std_dev > 0.0
        || params.funds_growth.std_dev > 0.0
        || params.shares_growth.std_dev > 0.0
}

/// One deterministic trial over the whole lifetime.
///
/// The scenario must have passed [`Scenario::validate`]; a valid scenario
/// never fails here. Running out of money is reported on the result, and the
/// projection continues to the horizon regardless.
pub fn simulate(scenario: &Scenario, seed: u64) -> SimulationResult {
    let mut state = SimulationState::new(scenario, seed);
    let mut rows =
        Vec::with_capacity((HORIZON_AGE - scenario.parameters.starting_age + 1) as usize);

    while state.age < HORIZON_AGE {
        state.begin_year();
        pension_income(&mut state);
        apply::process_events(&mut state, &scenario.events);
        handle_investments(&mut state);
        rows.push(record_year(&state));
    }

    SimulationResult {
        // A shortfall after the target age is a near-miss, not a failure
        success: state.success || state.failed_at > scenario.parameters.target_age,
        failed_at: state.failed_at,
        rows,
    }
}

/// Run `runs` independent trials and aggregate. Trials are derived from the
/// master seed in batches so results are reproducible whether or not the
/// `parallel` feature is enabled.
pub fn monte_carlo_simulate(scenario: &Scenario, runs: u32, master_seed: u64) -> MonteCarloResult {
    const MAX_BATCH_SIZE: u32 = 100;
    let num_batches = runs.div_ceil(MAX_BATCH_SIZE);

    let run_batch = |i: u32| {
        let mut rng = SmallRng::seed_from_u64(master_seed.wrapping_add(u64::from(i)));
        let batch_size = if i == num_batches - 1 {
            runs - i * MAX_BATCH_SIZE
        } else {
            MAX_BATCH_SIZE
        };
        let mut partial = MonteCarloResult::default();
        for _ in 0..batch_size {
            let seed = rng.next_u64();
            partial.accumulate(&simulate(scenario, seed));
        }
        partial
    };

    // Partials are merged in batch order so the float sums are identical
    // run to run, parallel or not
    #[cfg(feature = "parallel")]
    let partials: Vec<MonteCarloResult> = (0..num_batches).into_par_iter().map(run_batch).collect();
    #[cfg(not(feature = "parallel"))]
    let partials: Vec<MonteCarloResult> = (0..num_batches).map(run_batch).collect();

    let mut result = MonteCarloResult::default();
    for partial in &partials {
        result.merge(partial);
    }

    result.finish();
    result
}

/// Retirement-age lump sum, drawdown while retired, and the state pension.
fn pension_income(state: &mut SimulationState) {
    if state.age == state.params.retirement_age {
        let fraction = state.taxes.config().pension_lump_sum_fraction;
        state.cash += state.pension.take_lump_sum(fraction, &mut state.taxes);
        state.phase = Phase::LumpSum;
    }
    if state.phase == Phase::Retired {
        let rate = state.taxes.config().drawdown_rate(state.age);
        state.yr.income_private_pension += state.pension.drawdown(rate, &mut state.taxes);
    }

    if state.age >= state.taxes.config().state_pension_qualifying_age {
        let mut pension = 52.0 * state.adjust(state.params.state_pension_weekly);
        if state.age >= state.taxes.config().state_pension_increase_age {
            pension += 52.0 * state.adjust(state.taxes.config().state_pension_increase_weekly);
        }
        state.yr.income_state_pension = pension;
    }
    state
        .taxes
        .declare_state_pension_income(state.yr.income_state_pension);
}

/// Save surplus, cover shortfalls by liquidation, invest spare cash, top up
/// the emergency stash, and flag the first year the plan cannot pay its way.
fn handle_investments(state: &mut SimulationState) {
    state.yr.net_income = state.taxes.net_income() + state.yr.income_tax_free;

    if state.yr.net_income > state.yr.expenses {
        state.yr.savings = state.yr.net_income - state.yr.expenses;
        state.cash += state.yr.savings;
    }

    let target_cash = state.adjust(state.params.emergency_stash);
    if state.phase == Phase::LumpSum
        && state.cash < target_cash
        && state.age >= state.params.retirement_age
    {
        state.phase = Phase::Retired;
    }
    if state.cash < target_cash {
        state.yr.cash_deficit = target_cash - state.cash;
    }

    let capital_pre_withdrawal = state.funds.capital() + state.shares.capital();

    if state.yr.expenses > state.yr.net_income {
        let priorities = match state.phase {
            Phase::Growth => WithdrawalPriorities::GROWTH,
            Phase::LumpSum => WithdrawalPriorities::LUMP_SUM,
            Phase::Retired => state.params.priorities,
        };
        liquidation::withdraw(state, priorities);
    }

    state.yr.withdrawal_rate = if capital_pre_withdrawal > 0.0 {
        (state.yr.income_fund_rent + state.yr.income_share_rent) / capital_pre_withdrawal
    } else {
        0.0
    };

    // Spare cash above the stash target is invested, but only in years with
    // salary income: a retiree drawing down is not also accumulating
    let mut invested = 0.0;
    if state.cash > target_cash + 0.001 && state.yr.income_salaries > 0.0 {
        let surplus = state.cash - target_cash;
        state.funds.buy(surplus * state.params.funds_allocation);
        state.shares.buy(surplus * state.params.shares_allocation);
        invested = surplus * (state.params.funds_allocation + state.params.shares_allocation);
        state.cash -= invested;
    }

    // Whatever income remains tops the emergency stash back up
    if state.yr.net_income > state.yr.expenses + invested
        && target_cash - state.cash > 0.001
    {
        let add_to_stash = state.yr.net_income - (state.yr.expenses + invested);
        state.cash += add_to_stash;
        state.yr.expenses += add_to_stash;
    }

    if state.yr.net_income < state.yr.expenses - 100.0 && state.success {
        state.success = false;
        state.failed_at = state.age;
    }
}

/// Freeze the year into a report row.
///
/// The year's CGT (including deemed-disposal exit tax) is attributed to fund
/// and share sales pro rata and netted out of their reported income, so tax
/// payments are not shown as money the household got to spend.
fn record_year(state: &SimulationState) -> YearRow {
    let yr = &state.yr;
    let proceeds = yr.income_fund_rent + yr.income_share_rent + yr.cash_withdraw;
    let (fund_tax, share_tax) = if proceeds > 0.0 {
        (
            state.taxes.cgt * yr.income_fund_rent / proceeds,
            state.taxes.cgt * yr.income_share_rent / proceeds,
        )
    } else {
        (0.0, 0.0)
    };

    YearRow {
        age: state.age,
        year: state.year,
        income_salaries: yr.income_salaries,
        income_rsus: yr.income_rsus,
        income_rentals: yr.income_rentals,
        income_private_pension: yr.income_private_pension + yr.income_defined_benefit,
        income_state_pension: yr.income_state_pension,
        income_fund_rent: (yr.income_fund_rent - fund_tax).max(0.0),
        income_share_rent: (yr.income_share_rent - share_tax).max(0.0),
        income_cash: yr.cash_withdraw.max(0.0) + yr.income_tax_free,
        net_income: yr.net_income,
        expenses: yr.expenses,
        savings: yr.savings,
        pension_contribution: yr.pension_contribution,
        withdrawal_rate: yr.withdrawal_rate,
        it: state.taxes.it,
        prsi: state.taxes.prsi,
        usc: state.taxes.usc,
        cgt: state.taxes.cgt,
        cash: state.cash,
        pension_capital: state.pension.capital(),
        funds_capital: state.funds.capital(),
        shares_capital: state.shares.capital(),
        real_estate_capital: state.real_estate.total_value(),
        worth: state.worth(),
    }
}
