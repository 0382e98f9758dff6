use std::fmt;

/// Errors raised when a scenario fails validation at the loader boundary.
///
/// The engine itself never raises these: a scenario that validates cleanly
/// can always be simulated, and domain failure (running out of money) is
/// reported as data on the result, not as an error.
#[derive(Debug, Clone, PartialEq)]
pub enum ScenarioError {
    /// Starting/target ages do not form a simulatable range
    InvalidAgeRange { starting_age: u32, target_age: u32 },
    /// Retirement age precedes the starting age
    RetirementBeforeStart { starting_age: u32, retirement_age: u32 },
    /// An event's age window is inverted
    EventAgeOrder {
        index: usize,
        from_age: u32,
        to_age: u32,
    },
    /// Property or mortgage events need an id to link them together
    MissingEventId { index: usize },
    /// Mortgage events must carry an interest rate
    MissingMortgageRate { id: String },
    /// A mortgage references a property that is never bought
    MortgageWithoutProperty { id: String },
    /// A mortgage does not start the year its property is bought
    MortgageStartMismatch { id: String },
    /// A mortgage runs past the sale of its property
    MortgageOutlivesProperty { id: String },
    /// A market override with an empty age span cannot spread its growth
    MarketOverrideZeroSpan { index: usize },
    /// A withdrawal priority rank is used by more than one account
    DuplicatePriority { rank: u8 },
    /// Withdrawal priorities must be 0 (unused) or 1..=4
    PriorityOutOfRange { value: u8 },
    /// Surplus allocation fractions must each be within [0, 1] and sum to at most 1
    InvalidAllocation { funds: f64, shares: f64 },
    /// A growth standard deviation is negative or not finite
    InvalidStdDev { account: &'static str, std_dev: f64 },
}

impl fmt::Display for ScenarioError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScenarioError::InvalidAgeRange {
                starting_age,
                target_age,
            } => write!(
                f,
                "invalid age range: starting age {starting_age} must be below target age {target_age}, and the target must not exceed 100"
            ),
            ScenarioError::RetirementBeforeStart {
                starting_age,
                retirement_age,
            } => write!(
                f,
                "retirement age {retirement_age} precedes starting age {starting_age}"
            ),
            ScenarioError::EventAgeOrder {
                index,
                from_age,
                to_age,
            } => write!(
                f,
                "event #{index}: fromAge {from_age} is after toAge {to_age}"
            ),
            ScenarioError::MissingEventId { index } => {
                write!(f, "event #{index}: property and mortgage events need an id")
            }
            ScenarioError::MissingMortgageRate { id } => {
                write!(f, "mortgage [{id}] has no interest rate")
            }
            ScenarioError::MortgageWithoutProperty { id } => {
                write!(f, "mortgage [{id}] has no matching property purchase")
            }
            ScenarioError::MortgageStartMismatch { id } => write!(
                f,
                "mortgage [{id}] must start the same age its property is bought"
            ),
            ScenarioError::MortgageOutlivesProperty { id } => {
                write!(f, "mortgage [{id}] runs past the sale of its property")
            }
            ScenarioError::MarketOverrideZeroSpan { index } => {
                write!(f, "event #{index}: market override needs toAge > fromAge")
            }
            ScenarioError::DuplicatePriority { rank } => {
                write!(f, "withdrawal priority {rank} is assigned twice")
            }
            ScenarioError::PriorityOutOfRange { value } => {
                write!(f, "withdrawal priority {value} is outside 0..=4")
            }
            ScenarioError::InvalidAllocation { funds, shares } => write!(
                f,
                "surplus allocations (funds={funds}, shares={shares}) must be within [0, 1] and sum to at most 1"
            ),
            ScenarioError::InvalidStdDev { account, std_dev } => {
                write!(f, "{account} growth std dev {std_dev} is invalid")
            }
        }
    }
}

impl std::error::Error for ScenarioError {}
