use std::collections::BTreeSet;
use validator::Validate;

use crate::error::EngineError;
use crate::models::{MainPurpose, NormalizedProfile, Priorities, UsageFrequency, UserProfile};

/// Validate a raw questionnaire profile and resolve it into engine form
///
/// Rejects inverted or non-finite budgets, empty families, unknown priority
/// keys and weights outside 1–5. Absent priorities become neutral (3).
pub fn normalize(raw: &UserProfile) -> Result<NormalizedProfile, EngineError> {
    raw.validate()?;

    let purpose: MainPurpose = raw
        .usage
        .main_purpose
        .parse()
        .map_err(|message: String| EngineError::validation("usage.mainPurpose", message))?;

    let frequency: UsageFrequency = raw
        .usage
        .frequency
        .parse()
        .map_err(|message: String| EngineError::validation("usage.frequency", message))?;

    let mut priorities = Priorities::default();
    for (key, &weight) in &raw.priorities {
        // Range and key set were checked by `validate`
        let weight = weight as u8;
        match key.as_str() {
            "fuelEconomy" => priorities.fuel_economy = weight,
            "safety" => priorities.safety = weight,
            "reliability" => priorities.reliability = weight,
            "comfort" => priorities.comfort = weight,
            "space" => priorities.space = weight,
            "performance" => priorities.performance = weight,
            other => {
                return Err(EngineError::validation(
                    "priorities",
                    format!("unknown priority `{}`", other),
                ))
            }
        }
    }

    Ok(NormalizedProfile {
        budget: raw.budget,
        location: raw.location.clone(),
        purpose,
        frequency,
        family: raw.family,
        priorities,
        brands: lowercase_set(&raw.preferences.brands),
        vehicle_types: lowercase_set(&raw.preferences.vehicle_types),
    })
}

fn lowercase_set(values: &[String]) -> BTreeSet<String> {
    values
        .iter()
        .map(|v| v.trim().to_lowercase())
        .filter(|v| !v.is_empty())
        .collect()
}
