//! Full working-life-to-retirement projections
//!
//! These tests run whole scenarios through `simulate` and check the arc:
//! earning years accumulate, the lump sum lands at retirement, drawdown
//! follows, and the success flag reflects whether the plan held up.

use crate::config::ScenarioBuilder;
use crate::simulation::simulate;

/// A comfortable earner saving more than they spend never fails.
#[test]
fn test_steady_earner_succeeds() {
    let scenario = ScenarioBuilder::new(30, 90, 65)
        .with_parameters(|p| {
            p.initial_savings = 20_000.0;
            p.pension_percentage = 1.0;
            p.personal_tax_credit = 2_000.0;
            p.funds_allocation = 0.5;
            p.emergency_stash = 20_000.0;
        })
        .salary(60_000.0, 30, 64)
        .expense(25_000.0, 30, 100)
        .build()
        .unwrap();

    let result = simulate(&scenario, 42);
    assert!(result.success, "failed at age {}", result.failed_at);
    assert_eq!(result.failed_at, 0);

    // Pension contributions flow every working year
    let at_40 = result.rows.iter().find(|r| r.age == 40).unwrap();
    assert!(at_40.pension_contribution > 0.0);
    assert!(at_40.pension_capital > at_40.pension_contribution);

    // No salary after 64
    let at_70 = result.rows.iter().find(|r| r.age == 70).unwrap();
    assert_eq!(at_70.income_salaries, 0.0);
    assert_eq!(at_70.pension_contribution, 0.0);
}

/// The first year of a single-salary run reproduces the hand-computed
/// net income: 50k gross, no pension contribution, standard credits.
#[test]
fn test_first_year_net_income_arithmetic() {
    let scenario = ScenarioBuilder::new(45, 90, 65)
        .with_parameters(|p| p.personal_tax_credit = 2_000.0)
        .salary(50_000.0, 45, 64)
        .build()
        .unwrap();

    let result = simulate(&scenario, 1);
    let first = &result.rows[0];

    // IT: 35,000 * 20% + 15,000 * 40% = 13,000, minus 3,000 in credits
    assert!((first.it - 10_000.0).abs() < 0.01, "it = {}", first.it);
    // PRSI: flat 4%
    assert!((first.prsi - 2_000.0).abs() < 0.01);
    // USC: 12,012 * 0.5% + 15,370 * 2% + 22,618 * 4.5%
    assert!((first.usc - 1_385.27).abs() < 0.01, "usc = {}", first.usc);
    assert_eq!(first.cgt, 0.0);
    assert!((first.net_income - (50_000.0 - 13_385.27)).abs() < 0.01);
    // Nothing to spend it on, so it all lands in savings
    assert!((first.savings - first.net_income).abs() < 0.01);
}

/// The retirement lump sum moves a quarter of the pension into cash the
/// year retirement starts, and drawdown income follows once the stash
/// runs low.
#[test]
fn test_retirement_arc() {
    let scenario = ScenarioBuilder::new(60, 95, 65)
        .with_parameters(|p| {
            p.initial_pension = 400_000.0;
            p.initial_savings = 10_000.0;
            p.emergency_stash = 100_000.0;
            p.personal_tax_credit = 2_000.0;
        })
        .expense(30_000.0, 60, 100)
        .build()
        .unwrap();

    let result = simulate(&scenario, 7);

    let at_64 = result.rows.iter().find(|r| r.age == 64).unwrap();
    let at_65 = result.rows.iter().find(|r| r.age == 65).unwrap();
    assert!((at_64.pension_capital - 400_000.0).abs() < 1e-6);
    assert!((at_65.pension_capital - 300_000.0).abs() < 1e-6);

    // Cash falls below the stash target at 66, flipping the phase to
    // retired; drawdown income shows up from 67 on
    let at_66 = result.rows.iter().find(|r| r.age == 66).unwrap();
    let at_67 = result.rows.iter().find(|r| r.age == 67).unwrap();
    assert_eq!(at_66.income_private_pension, 0.0);
    assert!(at_67.income_private_pension > 0.0);
    assert!(at_67.pension_capital < 300_000.0);
}

/// Defined-benefit income is reported as private pension income.
#[test]
fn test_defined_benefit_reported_as_pension() {
    let mut scenario = ScenarioBuilder::new(65, 90, 65)
        .with_parameters(|p| p.personal_tax_credit = 2_000.0)
        .build()
        .unwrap();
    scenario.events.push(crate::model::Event {
        kind: crate::model::EventKind::DefinedBenefitIncome,
        id: String::new(),
        amount: 20_000.0,
        from_age: 66,
        to_age: 100,
        rate: None,
        employer_match: 0.0,
    });
    scenario.validate().unwrap();

    let result = simulate(&scenario, 1);
    let at_66 = result.rows.iter().find(|r| r.age == 66).unwrap();
    assert!((at_66.income_private_pension - 20_000.0).abs() < 1e-9);
}

/// Inflation indexes both sides: an expense matching a salary stays
/// matched when both ride the same inflation rate.
#[test]
fn test_inflation_indexes_incomes_and_expenses_together() {
    let scenario = ScenarioBuilder::new(30, 90, 65)
        .with_parameters(|p| {
            p.inflation = 0.03;
            p.personal_tax_credit = 2_000.0;
        })
        .salary(50_000.0, 30, 64)
        .expense(10_000.0, 30, 100)
        .build()
        .unwrap();

    let result = simulate(&scenario, 1);
    let first = &result.rows[0];
    let tenth = &result.rows[10];
    let factor = 1.03_f64.powi(10);
    assert!((tenth.income_salaries - first.income_salaries * factor).abs() < 0.01);
    assert!((tenth.expenses - first.expenses * factor).abs() < 0.01);
    // Bands and credits index too, so the tax burden scales with it
    assert!((tenth.it - first.it * factor).abs() < 0.01);
}
