//! The per-year tax engine.
//!
//! Income, gains and pension flows are declared as the year unfolds; the
//! four liabilities (income tax, PRSI, USC, CGT) are recomputed on demand
//! from whatever has been declared so far. `reset` wipes the declarations
//! and captures the household's status for the new tax year. Everything is
//! driven by [`TaxConfig`] data, so another jurisdiction is a config swap.

use crate::indexation::index_factor;
use crate::model::{TaxBand, TaxConfig};

/// Household context for one tax year.
#[derive(Debug, Clone, Copy, Default)]
pub struct TaxYear {
    pub age: u32,
    /// Years since the start of the run, for indexing band floors
    pub periods: u32,
    pub inflation: f64,
    pub married: bool,
    pub dependent_children: bool,
    pub personal_tax_credit: f64,
}

#[derive(Debug, Clone, Copy)]
struct GainBucket {
    rate: f64,
    amount: f64,
}

/// Progressive band evaluation shared by income tax, pension lump sums and
/// USC.
///
/// Floors above zero are shifted by `shift`, then indexed by `index`, then
/// scaled by `multiplier`, in that order. Bands are inclusive at the lower
/// bound and exclusive at the upper; income above the last floor is taxed
/// at the last rate.
pub fn progressive_tax(
    bands: &[TaxBand],
    income: f64,
    multiplier: f64,
    shift: f64,
    index: f64,
) -> f64 {
    let floor_of = |band: &TaxBand| {
        let floor = if band.floor > 0.0 {
            band.floor + shift
        } else {
            band.floor
        };
        floor * index * multiplier
    };

    let mut tax = 0.0;
    for (i, band) in bands.iter().enumerate() {
        let floor = floor_of(band);
        let ceiling = bands.get(i + 1).map(floor_of).unwrap_or(f64::INFINITY);
        let taxable = income.min(ceiling) - floor;
        tax += taxable.max(0.0) * band.rate;
    }
    tax
}

/// Accumulates one year of declarations and turns them into liabilities.
#[derive(Debug, Clone)]
pub struct Taxes {
    config: TaxConfig,
    year: TaxYear,
    /// Cumulative inflation factor for this year's band indexing
    index: f64,

    /// Individual salaries, kept sorted ascending
    salaries: Vec<f64>,
    /// Salary plus other general income
    income: f64,
    non_eu_shares: f64,
    private_pension: f64,
    lump_sum: f64,
    lump_sum_count: u32,
    state_pension: f64,
    investment_income: f64,
    pension_contrib: f64,
    pension_relief: f64,
    gains: Vec<GainBucket>,
    people: u32,

    pub it: f64,
    pub prsi: f64,
    pub usc: f64,
    pub cgt: f64,
}

impl Taxes {
    pub fn new(config: TaxConfig) -> Self {
        Taxes {
            config,
            year: TaxYear::default(),
            index: 1.0,
            salaries: Vec::new(),
            income: 0.0,
            non_eu_shares: 0.0,
            private_pension: 0.0,
            lump_sum: 0.0,
            lump_sum_count: 0,
            state_pension: 0.0,
            investment_income: 0.0,
            pension_contrib: 0.0,
            pension_relief: 0.0,
            gains: Vec::new(),
            people: 1,
            it: 0.0,
            prsi: 0.0,
            usc: 0.0,
            cgt: 0.0,
        }
    }

    /// Clear all declarations and start a new tax year.
    pub fn reset(&mut self, year: TaxYear) {
        self.index = index_factor(year.inflation, year.periods);
        self.year = year;
        self.salaries.clear();
        self.income = 0.0;
        self.non_eu_shares = 0.0;
        self.private_pension = 0.0;
        self.lump_sum = 0.0;
        self.lump_sum_count = 0;
        self.state_pension = 0.0;
        self.investment_income = 0.0;
        self.pension_contrib = 0.0;
        self.pension_relief = 0.0;
        self.gains.clear();
        self.people = 1;
        self.it = 0.0;
        self.prsi = 0.0;
        self.usc = 0.0;
        self.cgt = 0.0;
    }

    pub fn config(&self) -> &TaxConfig {
        &self.config
    }

    fn adjust(&self, value: f64) -> f64 {
        value * self.index
    }

    /// Salary plus its pension contribution rate. Relief on the
    /// contribution is capped at the indexed earnings limit per salary.
    pub fn declare_salary_income(&mut self, amount: f64, contrib_rate: f64) {
        self.income += amount;
        self.pension_contrib += contrib_rate * amount;
        self.pension_relief +=
            contrib_rate * amount.min(self.adjust(self.config.pension_contrib_earning_limit));
        self.salaries.push(amount);
        self.salaries.sort_by(f64::total_cmp);
        if self.salaries.len() > 1 {
            self.people = 2;
        }
    }

    /// Rental and similar general income.
    pub fn declare_other_income(&mut self, amount: f64) {
        self.income += amount;
    }

    /// RSU/share income from outside the domestic tax net.
    pub fn declare_rsu_income(&mut self, amount: f64) {
        self.non_eu_shares += amount;
    }

    pub fn declare_private_pension_income(&mut self, amount: f64) {
        self.private_pension += amount;
    }

    pub fn declare_pension_lump_sum(&mut self, amount: f64) {
        self.lump_sum += amount;
        self.lump_sum_count += 1;
    }

    pub fn declare_state_pension_income(&mut self, amount: f64) {
        self.state_pension += amount;
    }

    /// Gross proceeds of an investment sale.
    pub fn declare_investment_income(&mut self, amount: f64) {
        self.investment_income += amount;
    }

    /// Realized gain (or loss) bucketed by its applicable tax rate.
    pub fn declare_investment_gains(&mut self, amount: f64, rate: f64) {
        if let Some(bucket) = self
            .gains
            .iter_mut()
            .find(|b| b.rate.total_cmp(&rate).is_eq())
        {
            bucket.amount += amount;
        } else {
            self.gains.push(GainBucket { rate, amount });
        }
    }

    pub fn compute_taxes(&mut self) {
        self.compute_it();
        self.compute_prsi();
        self.compute_usc();
        self.compute_cgt();
    }

    /// Net household income after all four liabilities and the age credit.
    pub fn net_income(&mut self) -> f64 {
        self.compute_taxes();
        let gross = self.income - self.pension_contrib
            + self.private_pension
            + self.state_pension
            + self.investment_income
            + self.non_eu_shares;
        let age_credit = if self.year.age >= self.config.it_exemption_age {
            self.adjust(self.people as f64 * self.config.age_tax_credit)
        } else {
            0.0
        };
        let tax = (self.it + self.prsi + self.usc + self.cgt - age_credit).max(0.0);
        gross - tax
    }

    fn compute_it(&mut self) {
        let config = &self.config;
        let taxable =
            self.income + self.private_pension + self.non_eu_shares - self.pension_relief;

        // Band table and widening depend on household status
        let mut bands = &config.it_single_bands;
        let mut band_shift = 0.0;
        if self.year.married {
            bands = &config.it_married_bands;
            if self.salaries.len() > 1 {
                // Widening is capped by the lower earner's salary
                band_shift = self
                    .adjust(config.it_max_married_band_increase)
                    .min(self.salaries[0]);
            }
        } else if self.year.dependent_children {
            bands = &config.it_single_dependent_bands;
        }
        let mut tax = progressive_tax(bands, taxable, 1.0, band_shift, self.index);

        // Lump sums run through their own band table, limits scaled by the
        // number of recipients
        if self.lump_sum_count > 0 {
            tax += progressive_tax(
                &config.pension_lump_sum_bands,
                self.lump_sum,
                self.lump_sum_count as f64,
                0.0,
                self.index,
            );
        }

        let earners = self.salaries.len().min(2) as f64;
        let mut credit =
            self.adjust(self.year.personal_tax_credit + earners * config.it_employee_tax_credit);
        if self.year.age >= config.it_exemption_age {
            credit += self.adjust(config.age_tax_credit);
        }

        let exemption = config.it_exemption_limit * if self.year.married { 2.0 } else { 1.0 };
        let exempt = self.year.age >= config.it_exemption_age
            && taxable <= self.adjust(exemption)
            && self.lump_sum_count == 0;
        self.it = if exempt { 0.0 } else { (tax - credit).max(0.0) };
    }

    fn compute_prsi(&mut self) {
        let taxable = self.income + self.non_eu_shares;
        self.prsi = if self.year.age <= self.config.prsi_exempt_age {
            taxable * self.config.prsi_rate
        } else {
            0.0
        };
    }

    fn compute_usc(&mut self) {
        // USC is charged per salary, not on the pooled household income.
        // Non-salary taxable extras ride on the lowest salary, which is
        // first in the ascending list; with no salaries they stand alone.
        self.usc = 0.0;
        let mut extra = self.private_pension + self.non_eu_shares;
        if self.salaries.is_empty() {
            self.usc = self.usc_for(extra);
            return;
        }
        for &salary in &self.salaries {
            let taxable = salary + extra;
            extra = 0.0;
            self.usc += self.usc_for(taxable);
        }
    }

    fn usc_for(&self, taxable: f64) -> f64 {
        let config = &self.config;
        if taxable <= self.adjust(config.usc_exempt_amount) {
            return 0.0;
        }
        let reduced = self.year.age >= config.usc_reduced_rate_age
            && taxable <= self.adjust(config.usc_reduced_rate_max_income);
        let bands = if reduced {
            &config.usc_reduced_bands
        } else {
            &config.usc_bands
        };
        progressive_tax(bands, taxable, 1.0, 0.0, self.index)
    }

    fn compute_cgt(&mut self) {
        // Losses are pooled across all buckets, then gains are consumed
        // from the highest-taxed bucket down so losses and the annual
        // relief offset the most expensive gains first.
        let mut losses: f64 = self
            .gains
            .iter()
            .filter(|b| b.amount < 0.0)
            .map(|b| -b.amount)
            .sum();
        let mut relief = self.adjust(self.config.cgt_annual_relief);

        let mut buckets = self.gains.clone();
        buckets.sort_by(|a, b| b.rate.total_cmp(&a.rate));

        let mut tax = 0.0;
        for bucket in &buckets {
            if bucket.amount > 0.0 {
                let after_losses = (bucket.amount - losses).max(0.0);
                losses = (losses - bucket.amount).max(0.0);
                let taxable = (after_losses - relief).max(0.0);
                relief = (relief - after_losses).max(0.0);
                tax += taxable * bucket.rate;
            }
        }
        self.cgt = tax;
    }
}
