use std::io::Write;

use clap::ValueEnum;
use lifeplan_core::YearRow;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Csv,
    Json,
}

const CSV_HEADER: &str = "age,year,income_salaries,income_rsus,income_rentals,\
income_private_pension,income_state_pension,income_fund_rent,income_share_rent,\
income_cash,net_income,expenses,savings,pension_contribution,withdrawal_rate,\
it,prsi,usc,cgt,cash,pension_capital,funds_capital,shares_capital,\
real_estate_capital,worth";

/// Render the per-year rows as CSV. Monetary values are rounded to the
/// cent; the withdrawal rate keeps four decimals.
pub fn write_csv<W: Write>(writer: &mut W, rows: &[YearRow]) -> std::io::Result<()> {
    writeln!(writer, "{CSV_HEADER}")?;
    for r in rows {
        writeln!(
            writer,
            "{},{},{:.2},{:.2},{:.2},{:.2},{:.2},{:.2},{:.2},{:.2},{:.2},{:.2},{:.2},{:.2},{:.4},{:.2},{:.2},{:.2},{:.2},{:.2},{:.2},{:.2},{:.2},{:.2},{:.2}",
            r.age,
            r.year,
            r.income_salaries,
            r.income_rsus,
            r.income_rentals,
            r.income_private_pension,
            r.income_state_pension,
            r.income_fund_rent,
            r.income_share_rent,
            r.income_cash,
            r.net_income,
            r.expenses,
            r.savings,
            r.pension_contribution,
            r.withdrawal_rate,
            r.it,
            r.prsi,
            r.usc,
            r.cgt,
            r.cash,
            r.pension_capital,
            r.funds_capital,
            r.shares_capital,
            r.real_estate_capital,
            r.worth,
        )?;
    }
    Ok(())
}

/// Render the rows as a JSON array.
pub fn write_json<W: Write>(writer: &mut W, rows: &[YearRow]) -> color_eyre::Result<()> {
    serde_json::to_writer_pretty(&mut *writer, rows)?;
    writeln!(writer)?;
    Ok(())
}
