use serde::{Deserialize, Serialize};

/// Vehicle listing from the catalog
///
/// Listings are owned by the caller; the engine only ever borrows them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleListing {
    pub id: String,
    pub brand: String,
    pub model: String,
    #[serde(default)]
    pub year: Option<u16>,
    pub price: Price,
    pub category: String,
    #[serde(rename = "fuelType", default)]
    pub fuel_type: Option<String>,
    #[serde(default)]
    pub transmission: Option<String>,
    #[serde(rename = "seatingCapacity", default)]
    pub seating_capacity: Option<u8>,
    #[serde(rename = "cargoVolumeLiters", default)]
    pub cargo_volume_liters: Option<u32>,
    /// Low step-in height or otherwise easy entry and exit
    #[serde(rename = "easyAccess", default)]
    pub easy_access: Option<bool>,
    #[serde(default)]
    pub reliability: ReliabilityIndicators,
    #[serde(default)]
    pub market: MarketIndicators,
    #[serde(rename = "available", alias = "availability", default)]
    pub available: bool,
    #[serde(default)]
    pub regions: Vec<String>,
}

impl VehicleListing {
    /// Single price used for filtering, scoring and tie-breaks
    #[inline]
    pub fn effective_price(&self) -> f64 {
        self.price.effective()
    }

    /// Identity and a usable price are required before a listing can be scored
    pub fn is_structurally_valid(&self) -> bool {
        let price = self.effective_price();
        !self.id.trim().is_empty() && price.is_finite() && price > 0.0
    }
}

/// Market price, either a single figure or a range with a typical value
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Price {
    Fixed(f64),
    Range { min: f64, max: f64, typical: f64 },
}

impl Price {
    #[inline]
    pub fn effective(&self) -> f64 {
        match *self {
            Price::Fixed(value) => value,
            Price::Range { typical, .. } => typical,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReliabilityIndicators {
    #[serde(rename = "maintenanceCost", default)]
    pub maintenance_cost: Option<CostTier>,
    #[serde(rename = "recallCount", default)]
    pub recall_count: Option<u32>,
    #[serde(rename = "partsAvailability", default)]
    pub parts_availability: Option<AvailabilityTier>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketIndicators {
    #[serde(rename = "resaleTier", default)]
    pub resale_tier: Option<AvailabilityTier>,
    #[serde(rename = "salesRank", default)]
    pub sales_rank: Option<u32>,
}

/// Running-cost tier, cheapest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CostTier {
    #[serde(alias = "baixo")]
    Low,
    #[serde(alias = "medio", alias = "médio")]
    Medium,
    #[serde(alias = "alto")]
    High,
}

/// Supply tier for parts and resale demand, best first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AvailabilityTier {
    #[serde(alias = "alta", alias = "high")]
    Wide,
    #[serde(alias = "media", alias = "média", alias = "medium")]
    Moderate,
    #[serde(alias = "baixa", alias = "low")]
    Scarce,
}

/// Listing attributes a scorer may need to default
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ListingAttribute {
    SeatingCapacity,
    MaintenanceCost,
    RecallCount,
    PartsAvailability,
}
