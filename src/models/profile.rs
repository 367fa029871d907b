use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;
use validator::{Validate, ValidationError};

/// Priority keys a questionnaire may declare
pub const PRIORITY_KEYS: [&str; 6] = [
    "fuelEconomy",
    "safety",
    "reliability",
    "comfort",
    "space",
    "performance",
];

/// Weight assigned to any priority the profile leaves out
pub const NEUTRAL_PRIORITY: u8 = 3;

pub const MIN_PRIORITY: i32 = 1;
pub const MAX_PRIORITY: i32 = 5;

/// Buyer profile as submitted by the questionnaire
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UserProfile {
    #[validate(custom(function = "validate_budget"))]
    pub budget: Budget,
    #[serde(default)]
    pub location: Location,
    pub usage: Usage,
    #[validate(nested)]
    pub family: FamilyProfile,
    #[serde(default)]
    #[validate(custom(function = "validate_priorities"))]
    pub priorities: BTreeMap<String, i32>,
    #[serde(default)]
    pub preferences: Preferences,
}

/// Budget range in currency units
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    pub min: f64,
    pub max: f64,
}

impl Budget {
    #[inline]
    pub fn contains(&self, price: f64) -> bool {
        price >= self.min && price <= self.max
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Usage {
    #[serde(rename = "mainPurpose")]
    pub main_purpose: String,
    pub frequency: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct FamilyProfile {
    #[validate(range(min = 1, message = "family size must be at least 1"))]
    pub size: u32,
    #[serde(rename = "hasChildren", default)]
    pub has_children: bool,
    #[serde(rename = "hasElderly", default)]
    pub has_elderly: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    #[serde(default)]
    pub brands: Vec<String>,
    #[serde(rename = "vehicleTypes", default)]
    pub vehicle_types: Vec<String>,
}

fn rule(code: &'static str, message: Cow<'static, str>) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(message);
    error
}

fn validate_budget(budget: &Budget) -> Result<(), ValidationError> {
    if !budget.min.is_finite() || !budget.max.is_finite() || budget.min < 0.0 {
        return Err(rule(
            "budget_bounds",
            Cow::Borrowed("budget bounds must be finite and non-negative"),
        ));
    }
    if budget.min > budget.max {
        return Err(rule(
            "budget_order",
            Cow::Owned(format!("budget min {} exceeds max {}", budget.min, budget.max)),
        ));
    }
    Ok(())
}

fn validate_priorities(priorities: &BTreeMap<String, i32>) -> Result<(), ValidationError> {
    for (key, &weight) in priorities {
        if !PRIORITY_KEYS.contains(&key.as_str()) {
            return Err(rule(
                "unknown_priority",
                Cow::Owned(format!("unknown priority `{}`", key)),
            ));
        }
        if !(MIN_PRIORITY..=MAX_PRIORITY).contains(&weight) {
            return Err(rule(
                "priority_range",
                Cow::Owned(format!(
                    "priority `{}` is {}, expected {}..={}",
                    key, weight, MIN_PRIORITY, MAX_PRIORITY
                )),
            ));
        }
    }
    Ok(())
}

/// Closed set of usage purposes the engine understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MainPurpose {
    Family,
    Work,
    Urban,
    Leisure,
    Travel,
    Adventure,
}

impl MainPurpose {
    pub fn as_str(&self) -> &'static str {
        match self {
            MainPurpose::Family => "family",
            MainPurpose::Work => "work",
            MainPurpose::Urban => "urban",
            MainPurpose::Leisure => "leisure",
            MainPurpose::Travel => "travel",
            MainPurpose::Adventure => "adventure",
        }
    }
}

impl fmt::Display for MainPurpose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MainPurpose {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match canonical_token(s).as_str() {
            "family" | "familia" => Ok(MainPurpose::Family),
            "work" | "trabalho" | "business" => Ok(MainPurpose::Work),
            "urban" | "urbano" | "city" | "cidade" | "commute" | "dia_a_dia" => {
                Ok(MainPurpose::Urban)
            }
            "leisure" | "lazer" => Ok(MainPurpose::Leisure),
            "travel" | "viagem" | "viagens" | "estrada" | "road_trip" => Ok(MainPurpose::Travel),
            "adventure" | "aventura" | "offroad" | "off_road" | "trilha" => {
                Ok(MainPurpose::Adventure)
            }
            _ => Err(format!("unrecognized main purpose `{}`", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UsageFrequency {
    Daily,
    Weekly,
    Weekends,
    Occasional,
}

impl FromStr for UsageFrequency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match canonical_token(s).as_str() {
            "daily" | "diario" | "diariamente" | "todo_dia" => Ok(UsageFrequency::Daily),
            "weekly" | "semanal" | "semanalmente" => Ok(UsageFrequency::Weekly),
            "weekends" | "weekend" | "fins_de_semana" | "fim_de_semana" => {
                Ok(UsageFrequency::Weekends)
            }
            "occasional" | "ocasional" | "raramente" | "rarely" => Ok(UsageFrequency::Occasional),
            _ => Err(format!("unrecognized usage frequency `{}`", s)),
        }
    }
}

/// Lowercase, strip Portuguese diacritics and join words with `_`
pub(crate) fn canonical_token(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.trim().chars().flat_map(char::to_lowercase) {
        let folded = match c {
            'á' | 'à' | 'â' | 'ã' | 'ä' => 'a',
            'é' | 'ê' | 'è' => 'e',
            'í' | 'î' => 'i',
            'ó' | 'ô' | 'õ' | 'ö' => 'o',
            'ú' | 'ü' => 'u',
            'ç' => 'c',
            ' ' | '-' => '_',
            other => other,
        };
        out.push(folded);
    }
    out
}

/// Priority weights on the canonical 1–5 scale
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Priorities {
    pub fuel_economy: u8,
    pub safety: u8,
    pub reliability: u8,
    pub comfort: u8,
    pub space: u8,
    pub performance: u8,
}

impl Default for Priorities {
    fn default() -> Self {
        Self {
            fuel_economy: NEUTRAL_PRIORITY,
            safety: NEUTRAL_PRIORITY,
            reliability: NEUTRAL_PRIORITY,
            comfort: NEUTRAL_PRIORITY,
            space: NEUTRAL_PRIORITY,
            performance: NEUTRAL_PRIORITY,
        }
    }
}

/// Profile after validation, with enums resolved and defaults filled in
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedProfile {
    pub budget: Budget,
    pub location: Location,
    pub purpose: MainPurpose,
    pub frequency: UsageFrequency,
    pub family: FamilyProfile,
    pub priorities: Priorities,
    pub brands: BTreeSet<String>,
    pub vehicle_types: BTreeSet<String>,
}

impl NormalizedProfile {
    /// Seats needed to carry the family comfortably
    #[inline]
    pub fn required_seats(&self) -> u32 {
        self.family.size.saturating_add(u32::from(self.family.has_children))
    }
}
