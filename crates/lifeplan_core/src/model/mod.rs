mod accounts;
mod events;
mod params;
mod property;
mod results;
mod tax_config;

pub use accounts::{AccountKind, AssetAccount};
pub use events::{Event, EventKind};
pub use params::{GrowthProfile, ScenarioParameters, WithdrawalPriorities};
pub use property::{Property, RealEstate};
pub use results::{MonteCarloResult, SimulationResult, YearRow};
pub use tax_config::{DrawdownBand, TaxBand, TaxConfig};
