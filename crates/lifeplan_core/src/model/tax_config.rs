//! Country tax configuration.
//!
//! The tax engine treats all of this as data so that a scenario can swap in
//! another jurisdiction's bands without touching engine code. Band floors
//! are in year-zero money; the engine indexes them by inflation at
//! computation time.

use serde::{Deserialize, Serialize};

/// One progressive band: everything from `floor` up to the next band's
/// floor is taxed at `rate`. Tables must be sorted ascending by floor and
/// start at 0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TaxBand {
    pub floor: f64,
    pub rate: f64,
}

impl TaxBand {
    pub fn new(floor: f64, rate: f64) -> Self {
        TaxBand { floor, rate }
    }
}

/// Minimum pension drawdown rate from `min_age` upward.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DrawdownBand {
    pub min_age: u32,
    pub rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxConfig {
    // Income tax
    pub it_single_bands: Vec<TaxBand>,
    pub it_single_dependent_bands: Vec<TaxBand>,
    pub it_married_bands: Vec<TaxBand>,
    /// Band widening for two-earner married households, capped by the lower salary
    pub it_max_married_band_increase: f64,
    pub it_employee_tax_credit: f64,
    /// Past `it_exemption_age`, taxable income up to this limit (doubled if
    /// married) is fully exempt
    pub it_exemption_limit: f64,
    pub it_exemption_age: u32,
    pub age_tax_credit: f64,

    // Social insurance
    pub prsi_rate: f64,
    /// Last age at which PRSI applies
    pub prsi_exempt_age: u32,

    // Universal social charge
    pub usc_exempt_amount: f64,
    pub usc_reduced_rate_age: u32,
    pub usc_reduced_rate_max_income: f64,
    pub usc_bands: Vec<TaxBand>,
    pub usc_reduced_bands: Vec<TaxBand>,

    // Capital gains
    pub cgt_rate: f64,
    pub cgt_annual_relief: f64,

    // Exit-tax funds
    pub fund_exit_tax_rate: f64,
    /// Deemed disposal interval in years; 0 disables
    pub fund_deemed_disposal_years: u32,

    // Private pensions
    pub pension_contrib_earning_limit: f64,
    pub pension_lump_sum_fraction: f64,
    pub pension_lump_sum_bands: Vec<TaxBand>,
    pub pension_drawdown_bands: Vec<DrawdownBand>,

    // State pension
    pub state_pension_qualifying_age: u32,
    pub state_pension_increase_age: u32,
    pub state_pension_increase_weekly: f64,
}

impl TaxConfig {
    /// Irish rules, as configured in the reference rule set.
    pub fn ireland() -> Self {
        TaxConfig {
            it_single_bands: vec![TaxBand::new(0.0, 0.20), TaxBand::new(35_000.0, 0.40)],
            it_single_dependent_bands: vec![
                TaxBand::new(0.0, 0.20),
                TaxBand::new(39_000.0, 0.40),
            ],
            it_married_bands: vec![TaxBand::new(0.0, 0.20), TaxBand::new(44_000.0, 0.40)],
            it_max_married_band_increase: 25_000.0,
            it_employee_tax_credit: 1_000.0,
            it_exemption_limit: 18_000.0,
            it_exemption_age: 65,
            age_tax_credit: 245.0,

            prsi_rate: 0.04,
            prsi_exempt_age: 70,

            usc_exempt_amount: 13_000.0,
            usc_reduced_rate_age: 70,
            usc_reduced_rate_max_income: 60_000.0,
            usc_bands: vec![
                TaxBand::new(0.0, 0.005),
                TaxBand::new(12_012.0, 0.02),
                TaxBand::new(27_382.0, 0.045),
                TaxBand::new(70_044.0, 0.08),
            ],
            usc_reduced_bands: vec![TaxBand::new(0.0, 0.005), TaxBand::new(12_012.0, 0.02)],

            cgt_rate: 0.33,
            cgt_annual_relief: 1_270.0,

            fund_exit_tax_rate: 0.41,
            fund_deemed_disposal_years: 8,

            pension_contrib_earning_limit: 100_000.0,
            pension_lump_sum_fraction: 0.25,
            pension_lump_sum_bands: vec![
                TaxBand::new(0.0, 0.0),
                TaxBand::new(100_000.0, 0.20),
                TaxBand::new(200_000.0, 0.40),
            ],
            pension_drawdown_bands: vec![
                DrawdownBand {
                    min_age: 0,
                    rate: 0.04,
                },
                DrawdownBand {
                    min_age: 71,
                    rate: 0.05,
                },
            ],

            state_pension_qualifying_age: 66,
            state_pension_increase_age: 80,
            state_pension_increase_weekly: 10.0,
        }
    }

    /// Minimum drawdown rate at `age`: the highest band whose `min_age` has
    /// been reached.
    pub fn drawdown_rate(&self, age: u32) -> f64 {
        self.pension_drawdown_bands
            .iter()
            .fold(0.0, |acc, band| if age >= band.min_age { band.rate } else { acc })
    }
}

impl Default for TaxConfig {
    fn default() -> Self {
        TaxConfig::ireland()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drawdown_rate_bands() {
        let config = TaxConfig::ireland();
        assert_eq!(config.drawdown_rate(65), 0.04);
        assert_eq!(config.drawdown_rate(70), 0.04);
        assert_eq!(config.drawdown_rate(71), 0.05);
        assert_eq!(config.drawdown_rate(90), 0.05);
    }

    #[test]
    fn test_ireland_band_tables_ascend() {
        let config = TaxConfig::ireland();
        for bands in [
            &config.it_single_bands,
            &config.it_single_dependent_bands,
            &config.it_married_bands,
            &config.usc_bands,
            &config.usc_reduced_bands,
            &config.pension_lump_sum_bands,
        ] {
            assert_eq!(bands[0].floor, 0.0);
            for pair in bands.windows(2) {
                assert!(pair[0].floor < pair[1].floor);
            }
        }
    }
}
