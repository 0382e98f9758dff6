//! Scenario assembly and validation.

use serde::{Deserialize, Serialize};

use crate::error::ScenarioError;
use crate::model::{
    Event, EventKind, GrowthProfile, ScenarioParameters, TaxConfig, WithdrawalPriorities,
};

/// A complete simulation input: the household parameters, the event
/// timeline, and the tax rules to apply.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
    pub parameters: ScenarioParameters,
    pub events: Vec<Event>,
    #[serde(default)]
    pub tax: TaxConfig,
}

impl Scenario {
    /// Check everything the type system cannot. Fails on the first problem
    /// so loader errors stay readable.
    pub fn validate(&self) -> Result<(), ScenarioError> {
        let p = &self.parameters;

        if p.starting_age >= p.target_age || p.target_age > 100 {
            return Err(ScenarioError::InvalidAgeRange {
                starting_age: p.starting_age,
                target_age: p.target_age,
            });
        }
        if p.retirement_age < p.starting_age {
            return Err(ScenarioError::RetirementBeforeStart {
                starting_age: p.starting_age,
                retirement_age: p.retirement_age,
            });
        }

        for (index, event) in self.events.iter().enumerate() {
            if event.from_age > event.to_age {
                return Err(ScenarioError::EventAgeOrder {
                    index,
                    from_age: event.from_age,
                    to_age: event.to_age,
                });
            }
            match event.kind {
                EventKind::Property | EventKind::Mortgage if event.id.is_empty() => {
                    return Err(ScenarioError::MissingEventId { index });
                }
                EventKind::MarketOverride if event.from_age == event.to_age => {
                    return Err(ScenarioError::MarketOverrideZeroSpan { index });
                }
                _ => {}
            }
        }

        for event in &self.events {
            if event.kind != EventKind::Mortgage {
                continue;
            }
            if event.rate.is_none() {
                return Err(ScenarioError::MissingMortgageRate {
                    id: event.id.clone(),
                });
            }
            let property = self
                .events
                .iter()
                .find(|e| e.kind == EventKind::Property && e.id == event.id)
                .ok_or_else(|| ScenarioError::MortgageWithoutProperty {
                    id: event.id.clone(),
                })?;
            if property.from_age != event.from_age {
                return Err(ScenarioError::MortgageStartMismatch {
                    id: event.id.clone(),
                });
            }
            if event.to_age > property.to_age {
                return Err(ScenarioError::MortgageOutlivesProperty {
                    id: event.id.clone(),
                });
            }
        }

        let mut seen = [false; 4];
        for rank in p.priorities.ranks() {
            if rank > 4 {
                return Err(ScenarioError::PriorityOutOfRange { value: rank });
            }
            if rank > 0 {
                if seen[usize::from(rank) - 1] {
                    return Err(ScenarioError::DuplicatePriority { rank });
                }
                seen[usize::from(rank) - 1] = true;
            }
        }

        let funds = p.funds_allocation;
        let shares = p.shares_allocation;
        if !(0.0..=1.0).contains(&funds)
            || !(0.0..=1.0).contains(&shares)
            || funds + shares > 1.0
        {
            return Err(ScenarioError::InvalidAllocation { funds, shares });
        }

        for (account, growth) in [
            ("pension", p.pension_growth),
            ("funds", p.funds_growth),
            ("shares", p.shares_growth),
        ] {
            if !growth.std_dev.is_finite() || growth.std_dev < 0.0 {
                return Err(ScenarioError::InvalidStdDev {
                    account,
                    std_dev: growth.std_dev,
                });
            }
        }

        Ok(())
    }
}

/// Fluent scenario assembly, mostly for tests and embedding.
#[derive(Debug, Clone)]
pub struct ScenarioBuilder {
    parameters: ScenarioParameters,
    events: Vec<Event>,
    tax: TaxConfig,
}

impl ScenarioBuilder {
    pub fn new(starting_age: u32, target_age: u32, retirement_age: u32) -> Self {
        ScenarioBuilder {
            parameters: ScenarioParameters {
                starting_age,
                target_age,
                retirement_age,
                initial_savings: 0.0,
                initial_pension: 0.0,
                initial_funds: 0.0,
                initial_shares: 0.0,
                pension_growth: GrowthProfile::fixed(0.0),
                funds_growth: GrowthProfile::fixed(0.0),
                shares_growth: GrowthProfile::fixed(0.0),
                inflation: 0.0,
                pension_percentage: 0.0,
                pension_capped: false,
                state_pension_weekly: 0.0,
                funds_allocation: 0.0,
                shares_allocation: 0.0,
                emergency_stash: 0.0,
                priorities: WithdrawalPriorities::LUMP_SUM,
                personal_tax_credit: 0.0,
                marriage_year: None,
                oldest_child_born: None,
                youngest_child_born: None,
                start_year: 2025,
                monte_carlo_runs: 1000,
            },
            events: Vec::new(),
            tax: TaxConfig::default(),
        }
    }

    pub fn with_parameters(
        mut self,
        update: impl FnOnce(&mut ScenarioParameters),
    ) -> Self {
        update(&mut self.parameters);
        self
    }

    pub fn tax(mut self, tax: TaxConfig) -> Self {
        self.tax = tax;
        self
    }

    pub fn event(mut self, event: Event) -> Self {
        self.events.push(event);
        self
    }

    pub fn salary(self, amount: f64, from_age: u32, to_age: u32) -> Self {
        self.event(Event {
            kind: EventKind::Salary,
            id: String::new(),
            amount,
            from_age,
            to_age,
            rate: None,
            employer_match: 0.0,
        })
    }

    pub fn expense(self, amount: f64, from_age: u32, to_age: u32) -> Self {
        self.event(Event {
            kind: EventKind::Expense,
            id: String::new(),
            amount,
            from_age,
            to_age,
            rate: None,
            employer_match: 0.0,
        })
    }

    pub fn property(self, id: &str, amount: f64, from_age: u32, to_age: u32, rate: f64) -> Self {
        self.event(Event {
            kind: EventKind::Property,
            id: id.to_owned(),
            amount,
            from_age,
            to_age,
            rate: Some(rate),
            employer_match: 0.0,
        })
    }

    pub fn mortgage(self, id: &str, payment: f64, from_age: u32, to_age: u32, rate: f64) -> Self {
        self.event(Event {
            kind: EventKind::Mortgage,
            id: id.to_owned(),
            amount: payment,
            from_age,
            to_age,
            rate: Some(rate),
            employer_match: 0.0,
        })
    }

    pub fn build(self) -> Result<Scenario, ScenarioError> {
        let scenario = Scenario {
            parameters: self.parameters,
            events: self.events,
            tax: self.tax,
        };
        scenario.validate()?;
        Ok(scenario)
    }
}
