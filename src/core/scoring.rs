use crate::core::tables::EngineTables;
use crate::models::{Criterion, ListingAttribute, NormalizedProfile, ScoreBreakdown, VehicleListing};

/// Output of a single criterion scorer
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CriterionScore {
    /// Fit in [0, 1]
    pub value: f64,
    /// Attributes that were missing and replaced by their worst tier
    pub defaulted: Vec<ListingAttribute>,
}

impl CriterionScore {
    #[inline]
    fn exact(value: f64) -> Self {
        Self { value: clamp_unit(value), defaulted: Vec::new() }
    }
}

#[inline]
pub(crate) fn clamp_unit(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

impl Criterion {
    /// Score one listing against one profile
    ///
    /// Every scorer is pure and total: missing listing attributes fall back to
    /// their worst tier instead of failing.
    pub fn score(
        self,
        listing: &VehicleListing,
        profile: &NormalizedProfile,
        tables: &EngineTables,
    ) -> CriterionScore {
        match self {
            Criterion::Budget => CriterionScore::exact(budget_fit(listing, profile, tables)),
            Criterion::Usage => CriterionScore::exact(usage_fit(listing, profile, tables)),
            Criterion::Family => family_fit(listing, profile, tables),
            Criterion::Preference => CriterionScore::exact(preference_fit(listing, profile, tables)),
            Criterion::Reliability => reliability_fit(listing, tables),
        }
    }
}

/// Run every criterion and collect the breakdown plus defaulted attributes
pub fn score_listing(
    listing: &VehicleListing,
    profile: &NormalizedProfile,
    tables: &EngineTables,
) -> (ScoreBreakdown, Vec<ListingAttribute>) {
    let mut breakdown = ScoreBreakdown::default();
    let mut defaulted = Vec::new();

    for criterion in Criterion::ALL {
        let result = criterion.score(listing, profile, tables);
        breakdown.set(criterion, result.value);
        defaulted.extend(result.defaulted);
    }

    (breakdown, defaulted)
}

/// Full marks inside the budget, linear decay to zero at the tolerance band edges
#[inline]
fn budget_fit(listing: &VehicleListing, profile: &NormalizedProfile, tables: &EngineTables) -> f64 {
    let price = listing.effective_price();
    let budget = profile.budget;
    if budget.contains(price) {
        return 1.0;
    }

    let (lower, upper) = tables.budget.band(budget.min, budget.max);
    if price > budget.max {
        let span = upper - budget.max;
        if span <= 0.0 || price >= upper {
            return 0.0;
        }
        1.0 - (price - budget.max) / span
    } else {
        let span = budget.min - lower;
        if span <= 0.0 || price <= lower {
            return 0.0;
        }
        1.0 - (budget.min - price) / span
    }
}

#[inline]
fn usage_fit(listing: &VehicleListing, profile: &NormalizedProfile, tables: &EngineTables) -> f64 {
    let category = listing.category.trim().to_lowercase();
    tables
        .usage
        .lookup(profile.purpose, &category)
        .unwrap_or(tables.usage.neutral)
}

/// Seats versus family size, with a small bonus for easy access when carrying elderly passengers
fn family_fit(
    listing: &VehicleListing,
    profile: &NormalizedProfile,
    tables: &EngineTables,
) -> CriterionScore {
    let policy = &tables.family;

    let seats = match listing.seating_capacity {
        Some(seats) if seats > 0 => u32::from(seats),
        _ => {
            return CriterionScore {
                value: 0.0,
                defaulted: vec![ListingAttribute::SeatingCapacity],
            }
        }
    };

    let required = profile.required_seats();
    let shortfall = required.saturating_sub(seats);
    let mut value = 1.0 - policy.penalty_per_seat * f64::from(shortfall);

    if profile.family.has_elderly && listing.easy_access == Some(true) {
        value += policy.elderly_access_bonus;
    }

    CriterionScore::exact(value)
}

/// Brand and body-type preferences, advisory only
fn preference_fit(listing: &VehicleListing, profile: &NormalizedProfile, tables: &EngineTables) -> f64 {
    let policy = &tables.preference;
    let brand = listing.brand.trim().to_lowercase();
    let category = listing.category.trim().to_lowercase();

    let brand_match = (!profile.brands.is_empty()).then(|| profile.brands.contains(&brand));
    let type_match =
        (!profile.vehicle_types.is_empty()).then(|| profile.vehicle_types.contains(&category));

    match (brand_match, type_match) {
        (None, None) => policy.no_signal,
        (Some(true), Some(true)) => policy.full_match,
        (Some(true), None) | (None, Some(true)) => policy.partial_match,
        _ => policy.mismatch,
    }
}

/// Equal-weight mean of maintenance cost, recall history and parts availability
fn reliability_fit(listing: &VehicleListing, tables: &EngineTables) -> CriterionScore {
    let tiers = &tables.reliability;
    let indicators = &listing.reliability;
    let mut defaulted = Vec::new();

    let maintenance = match indicators.maintenance_cost {
        Some(tier) => tiers.maintenance.score(tier),
        None => {
            defaulted.push(ListingAttribute::MaintenanceCost);
            tiers.maintenance.worst()
        }
    };

    let recalls = match indicators.recall_count {
        Some(count) => tiers.recalls.score(count),
        None => {
            defaulted.push(ListingAttribute::RecallCount);
            tiers.recalls.worst()
        }
    };

    let parts = match indicators.parts_availability {
        Some(tier) => tiers.parts.score(tier),
        None => {
            defaulted.push(ListingAttribute::PartsAvailability);
            tiers.parts.worst()
        }
    };

    CriterionScore {
        value: clamp_unit((maintenance + recalls + parts) / 3.0),
        defaulted,
    }
}
