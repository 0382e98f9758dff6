//! The event interpreter: one pass over the timeline per simulated year.

use crate::model::{Event, EventKind};
use crate::simulation_state::SimulationState;

/// Age-banded maximum pension contribution rate (fraction of salary
/// qualifying for tax relief).
pub fn pension_contribution_rate(age: u32) -> f64 {
    match age {
        0..30 => 0.15,
        30..40 => 0.20,
        40..50 => 0.25,
        50..55 => 0.30,
        55..60 => 0.35,
        _ => 0.40,
    }
}

/// Interpret every event against the current year.
///
/// Each event's amount is indexed forward by its own rate (scenario
/// inflation when absent). Income kinds require the age window to cover the
/// current age and a positive adjusted amount; the asset kinds (mortgage,
/// property, market override) fire on their window edges regardless of sign.
pub fn process_events(state: &mut SimulationState, events: &[Event]) {
    state.yr.expenses = 0.0;

    for event in events {
        let amount = match event.rate {
            Some(rate) => state.adjust_at(event.amount, rate),
            None => state.adjust(event.amount),
        };
        let in_scope = event.covers(state.age) && amount > 0.0;

        match event.kind {
            EventKind::NoOp => {}

            EventKind::RentalIncome => {
                if in_scope {
                    state.yr.income_rentals += amount;
                    state.taxes.declare_other_income(amount);
                }
            }

            EventKind::Salary => {
                if in_scope {
                    state.yr.income_salaries += amount;

                    let mut contrib_rate =
                        state.params.pension_percentage * pension_contribution_rate(state.age);
                    let earning_limit =
                        state.adjust(state.taxes.config().pension_contrib_earning_limit);
                    if state.params.pension_capped && amount > earning_limit {
                        contrib_rate = contrib_rate * earning_limit / amount;
                    }
                    let employer = event.employer_match.min(contrib_rate);
                    let total_contrib = (contrib_rate + employer) * amount;

                    state.yr.pension_contribution += total_contrib;
                    state.pension.buy(total_contrib);
                    state.taxes.declare_salary_income(amount, contrib_rate);
                }
            }

            EventKind::SalaryNoPension => {
                if in_scope {
                    state.yr.income_salaries += amount;
                    state.taxes.declare_salary_income(amount, 0.0);
                }
            }

            EventKind::RsuIncome => {
                if in_scope {
                    state.yr.income_rsus += amount;
                    state.taxes.declare_rsu_income(amount);
                }
            }

            EventKind::DefinedBenefitIncome => {
                if in_scope {
                    state.yr.income_defined_benefit += amount;
                    state.taxes.declare_salary_income(amount, 0.0);
                }
            }

            EventKind::TaxFreeIncome => {
                if in_scope {
                    state.yr.income_tax_free += amount;
                }
            }

            EventKind::Expense => {
                if event.covers(state.age) {
                    state.yr.expenses += amount;
                }
            }

            EventKind::Mortgage => {
                if state.age == event.from_age {
                    state.real_estate.mortgage(
                        &event.id,
                        event.to_age - event.from_age,
                        event.rate.unwrap_or(0.0),
                        amount,
                    );
                }
                // Payment fixed once the mortgage starts (fixed rate)
                if state.age >= event.from_age && state.age < event.to_age {
                    state.yr.expenses += state.real_estate.payment(&event.id);
                }
            }

            EventKind::Property => {
                if state.age == event.from_age {
                    let appreciation = event.rate.unwrap_or(state.params.inflation);
                    state.real_estate.buy(&event.id, amount, appreciation);
                    state.yr.expenses += amount;
                }
                if state.age == event.to_age {
                    state.cash += state.real_estate.sell(&event.id);
                }
            }

            EventKind::MarketOverride => {
                if state.age == event.from_age {
                    state.market_override =
                        Some(event.amount / f64::from(event.to_age - event.from_age));
                }
                if state.age == event.to_age {
                    state.market_override = None;
                }
            }
        }
    }
}
