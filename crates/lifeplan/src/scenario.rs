use std::fs;
use std::path::Path;

use color_eyre::eyre::WrapErr;
use lifeplan_core::Scenario;

/// Read, parse, and validate a scenario file.
pub fn load_scenario(path: &Path) -> color_eyre::Result<Scenario> {
    let contents = fs::read_to_string(path)
        .wrap_err_with(|| format!("failed to read scenario file {}", path.display()))?;

    let scenario: Scenario = serde_json::from_str(&contents)
        .wrap_err_with(|| format!("failed to parse scenario file {}", path.display()))?;

    scenario
        .validate()
        .wrap_err_with(|| format!("invalid scenario in {}", path.display()))?;

    Ok(scenario)
}
