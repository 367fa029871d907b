use crate::core::tables::EngineTables;
use crate::models::{NormalizedProfile, VehicleListing};

/// A listing that passed every hard constraint
#[derive(Debug, Clone, Copy)]
pub struct Candidate<'a> {
    pub listing: &'a VehicleListing,
    /// Position in the caller's catalog, kept for deterministic tie-breaks
    pub catalog_index: usize,
}

/// Why a listing was dropped before scoring
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exclusion {
    Malformed,
    Unavailable,
    OutsideBudgetBand,
    NotEnoughSeats,
    OutsideRegion,
}

/// Check a single listing against the hard constraints
///
/// Constraints form a conjunction, so the order only decides which reason is
/// reported for a listing that fails several of them.
pub fn check_constraints(
    listing: &VehicleListing,
    profile: &NormalizedProfile,
    tables: &EngineTables,
) -> Result<(), Exclusion> {
    if !listing.is_structurally_valid() {
        return Err(Exclusion::Malformed);
    }

    if !listing.available {
        return Err(Exclusion::Unavailable);
    }

    let (lower, upper) = tables.budget.band(profile.budget.min, profile.budget.max);
    let price = listing.effective_price();
    if price < lower || price > upper {
        return Err(Exclusion::OutsideBudgetBand);
    }

    // Large families need every seat; smaller shortfalls are left to scoring
    if profile.family.size > tables.family.hard_seating_threshold {
        let seats = listing.seating_capacity.map(u32::from).unwrap_or(0);
        if seats < profile.family.size {
            return Err(Exclusion::NotEnoughSeats);
        }
    }

    if tables.filter.enforce_regions && !serves_region(listing, profile) {
        return Err(Exclusion::OutsideRegion);
    }

    Ok(())
}

#[inline]
fn serves_region(listing: &VehicleListing, profile: &NormalizedProfile) -> bool {
    match profile.location.state.as_deref().map(str::trim) {
        Some(state) if !state.is_empty() && !listing.regions.is_empty() => listing
            .regions
            .iter()
            .any(|region| region.trim().eq_ignore_ascii_case(state)),
        _ => true,
    }
}

/// Reduce the catalog to the listings eligible for scoring
pub fn filter_candidates<'a>(
    catalog: &'a [VehicleListing],
    profile: &NormalizedProfile,
    tables: &EngineTables,
) -> Vec<Candidate<'a>> {
    catalog
        .iter()
        .enumerate()
        .filter(|(index, listing)| match check_constraints(listing, profile, tables) {
            Ok(()) => true,
            Err(reason) => {
                tracing::debug!(
                    listing_id = %listing.id,
                    catalog_index = index,
                    ?reason,
                    "Listing excluded"
                );
                false
            }
        })
        .map(|(catalog_index, listing)| Candidate { listing, catalog_index })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        Budget, FamilyProfile, Location, MainPurpose, MarketIndicators, Price, Priorities,
        ReliabilityIndicators, UsageFrequency,
    };
    use std::collections::BTreeSet;

    fn create_test_listing(id: &str, price: f64, seats: Option<u8>) -> VehicleListing {
        VehicleListing {
            id: id.to_string(),
            brand: "Fiat".to_string(),
            model: "Toro".to_string(),
            year: Some(2023),
            price: Price::Fixed(price),
            category: "pickup".to_string(),
            fuel_type: Some("flex".to_string()),
            transmission: Some("automatic".to_string()),
            seating_capacity: seats,
            cargo_volume_liters: Some(820),
            easy_access: None,
            reliability: ReliabilityIndicators::default(),
            market: MarketIndicators::default(),
            available: true,
            regions: vec!["SP".to_string(), "RJ".to_string()],
        }
    }

    fn create_test_profile(family_size: u32) -> NormalizedProfile {
        NormalizedProfile {
            budget: Budget { min: 100_000.0, max: 150_000.0 },
            location: Location { city: None, state: Some("mg".to_string()) },
            purpose: MainPurpose::Work,
            frequency: UsageFrequency::Daily,
            family: FamilyProfile { size: family_size, has_children: false, has_elderly: false },
            priorities: Priorities::default(),
            brands: BTreeSet::new(),
            vehicle_types: BTreeSet::new(),
        }
    }

    #[test]
    fn test_budget_band_is_inclusive_with_tolerance() {
        let tables = EngineTables::default();
        let profile = create_test_profile(2);

        assert!(check_constraints(&create_test_listing("a", 86_000.0, Some(5)), &profile, &tables).is_ok());
        assert!(check_constraints(&create_test_listing("b", 172_000.0, Some(5)), &profile, &tables).is_ok());
        assert_eq!(
            check_constraints(&create_test_listing("c", 84_000.0, Some(5)), &profile, &tables),
            Err(Exclusion::OutsideBudgetBand)
        );
        assert_eq!(
            check_constraints(&create_test_listing("d", 173_000.0, Some(5)), &profile, &tables),
            Err(Exclusion::OutsideBudgetBand)
        );
    }

    #[test]
    fn test_unavailable_listing_excluded() {
        let tables = EngineTables::default();
        let profile = create_test_profile(2);
        let mut listing = create_test_listing("a", 120_000.0, Some(5));
        listing.available = false;

        assert_eq!(check_constraints(&listing, &profile, &tables), Err(Exclusion::Unavailable));
    }

    #[test]
    fn test_seating_only_enforced_for_large_families() {
        let tables = EngineTables::default();
        let two_seater = create_test_listing("a", 120_000.0, Some(2));

        assert!(check_constraints(&two_seater, &create_test_profile(4), &tables).is_ok());
        assert_eq!(
            check_constraints(&two_seater, &create_test_profile(5), &tables),
            Err(Exclusion::NotEnoughSeats)
        );

        let unknown_seats = create_test_listing("b", 120_000.0, None);
        assert_eq!(
            check_constraints(&unknown_seats, &create_test_profile(6), &tables),
            Err(Exclusion::NotEnoughSeats)
        );
    }

    #[test]
    fn test_malformed_listing_excluded() {
        let tables = EngineTables::default();
        let profile = create_test_profile(2);

        assert_eq!(
            check_constraints(&create_test_listing("", 120_000.0, Some(5)), &profile, &tables),
            Err(Exclusion::Malformed)
        );
    }

    #[test]
    fn test_region_enforcement_is_opt_in() {
        let mut tables = EngineTables::default();
        let profile = create_test_profile(2);
        let listing = create_test_listing("a", 120_000.0, Some(5));

        assert!(check_constraints(&listing, &profile, &tables).is_ok());

        tables.filter.enforce_regions = true;
        assert_eq!(check_constraints(&listing, &profile, &tables), Err(Exclusion::OutsideRegion));

        let mut in_region = profile.clone();
        in_region.location.state = Some("SP".to_string());
        assert!(check_constraints(&listing, &in_region, &tables).is_ok());
    }

    #[test]
    fn test_filter_keeps_catalog_order() {
        let tables = EngineTables::default();
        let profile = create_test_profile(2);
        let catalog = vec![
            create_test_listing("a", 120_000.0, Some(5)),
            create_test_listing("b", 10_000.0, Some(5)),
            create_test_listing("c", 130_000.0, Some(5)),
        ];

        let candidates = filter_candidates(&catalog, &profile, &tables);

        let ids: Vec<(&str, usize)> = candidates
            .iter()
            .map(|c| (c.listing.id.as_str(), c.catalog_index))
            .collect();
        assert_eq!(ids, vec![("a", 0), ("c", 2)]);
    }
}
