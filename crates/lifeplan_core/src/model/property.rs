//! Real estate positions and their mortgages.
//!
//! A property's value is the appreciated sum of what has gone into it: the
//! down payment plus the borrowed principal scaled by the fraction of the
//! mortgage term already repaid.

use rustc_hash::FxHashMap;

use crate::indexation;

#[derive(Debug, Clone)]
pub struct Property {
    /// Down payment / outright purchase money
    paid: f64,
    /// Principal borrowed against the property
    borrowed: f64,
    /// Fixed annual mortgage payment
    payment: f64,
    /// Mortgage term in years
    term_years: u32,
    /// Years of the term already paid
    payments_made: u32,
    /// Annual appreciation rate
    appreciation: f64,
    /// Years since purchase
    periods: u32,
}

impl Property {
    fn new() -> Self {
        Property {
            paid: 0.0,
            borrowed: 0.0,
            payment: 0.0,
            term_years: 0,
            payments_made: 0,
            appreciation: 0.0,
            periods: 0,
        }
    }

    fn buy(&mut self, down_payment: f64, appreciation: f64) {
        self.paid = down_payment;
        self.appreciation = appreciation;
    }

    /// Take out a mortgage repaid by `annual_payment` over `term_years` at
    /// `rate`. The borrowed principal is the annuity present value of the
    /// monthly payments; a zero rate degenerates to the plain sum.
    fn mortgage(&mut self, term_years: u32, rate: f64, annual_payment: f64) {
        let monthly = annual_payment / 12.0;
        let n = term_years * 12;
        self.borrowed = if rate > 0.0 {
            let compound = (1.0 + rate / 12.0).powi(n as i32);
            monthly * (compound - 1.0) / (rate / 12.0 * compound)
        } else {
            monthly * f64::from(n)
        };
        self.payment = annual_payment;
        self.term_years = term_years;
        self.payments_made = 0;
    }

    /// Advance one year: the property appreciates and, while the term runs,
    /// one more year of the mortgage is repaid.
    pub fn add_year(&mut self) {
        self.periods += 1;
        if self.payments_made < self.term_years {
            self.payments_made += 1;
        }
    }

    pub fn payment(&self) -> f64 {
        self.payment
    }

    /// Current market value: equity built so far, appreciated since purchase.
    pub fn value(&self) -> f64 {
        let fraction_repaid = if self.term_years > 0 {
            f64::from(self.payments_made) / f64::from(self.term_years)
        } else {
            0.0
        };
        indexation::adjust(
            self.paid + self.borrowed * fraction_repaid,
            self.appreciation,
            self.periods,
        )
    }
}

/// All properties held, keyed by the scenario's event id.
#[derive(Debug, Clone, Default)]
pub struct RealEstate {
    holdings: FxHashMap<String, Property>,
}

impl RealEstate {
    pub fn new() -> Self {
        RealEstate::default()
    }

    /// Buy the property with the given id (down payment + appreciation rate).
    pub fn buy(&mut self, id: &str, down_payment: f64, appreciation: f64) {
        self.holdings
            .entry(id.to_owned())
            .or_insert_with(Property::new)
            .buy(down_payment, appreciation);
    }

    /// Attach a mortgage to the property, creating the position if the
    /// purchase has not been seen yet.
    pub fn mortgage(&mut self, id: &str, term_years: u32, rate: f64, annual_payment: f64) {
        self.holdings
            .entry(id.to_owned())
            .or_insert_with(Property::new)
            .mortgage(term_years, rate, annual_payment);
    }

    pub fn contains(&self, id: &str) -> bool {
        self.holdings.contains_key(id)
    }

    /// Annual mortgage payment for the property; 0 for unknown ids.
    pub fn payment(&self, id: &str) -> f64 {
        self.holdings.get(id).map_or(0.0, Property::payment)
    }

    /// Sell the property, returning its current value. Unknown ids return 0.
    pub fn sell(&mut self, id: &str) -> f64 {
        self.holdings.remove(id).map_or(0.0, |p| p.value())
    }

    pub fn add_year(&mut self) {
        for property in self.holdings.values_mut() {
            property.add_year();
        }
    }

    /// Age a single property, used to catch up positions opened before the
    /// simulation starts.
    pub fn add_year_for(&mut self, id: &str) {
        if let Some(property) = self.holdings.get_mut(id) {
            property.add_year();
        }
    }

    /// Combined market value of all holdings.
    pub fn total_value(&self) -> f64 {
        self.holdings.values().map(Property::value).sum()
    }
}
