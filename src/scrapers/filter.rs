use crate::models::RawAdvert;
use serde::{Deserialize, Serialize};

/// Offer type marking a rental
pub const RENTAL_MARKER: &str = "Miete";

/// Property types treated as commercial
pub const COMMERCIAL_PROPERTY_TYPES: [&str; 5] = [
    "Geschäfts-/Ladenlokal",
    "Büro/Ordination",
    "Gastronomie",
    "Lagerhalle",
    "Werkstatt",
];

/// Property types treated as land
pub const LAND_PROPERTY_TYPES: [&str; 4] = [
    "Grundstück",
    "Baugrundstück",
    "Gewerbegrundstück",
    "Land-/Forstwirtschaft",
];

/// Inclusion rules applied to every advert before it is parsed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterRules {
    /// Keep private sellers only
    pub only_private: bool,
    /// Drop rentals
    pub exclude_rentals: bool,
    /// Drop offices, shops, restaurants, warehouses and workshops
    pub exclude_commercial: bool,
    /// Drop plots and agricultural land
    pub exclude_land: bool,
}

impl Default for FilterRules {
    fn default() -> Self {
        Self {
            only_private: true,
            exclude_rentals: false,
            exclude_commercial: true,
            exclude_land: true,
        }
    }
}

impl FilterRules {
    /// Rules that let every advert through
    #[cfg(test)]
    pub fn permissive() -> Self {
        Self {
            only_private: false,
            exclude_rentals: false,
            exclude_commercial: false,
            exclude_land: false,
        }
    }

    pub fn should_include(&self, ad: &RawAdvert) -> bool {
        if self.only_private && !is_private(ad) {
            return false;
        }
        if self.exclude_rentals && is_rental(ad) {
            return false;
        }
        if self.exclude_commercial && is_commercial(ad) {
            return false;
        }
        if self.exclude_land && is_land(ad) {
            return false;
        }
        true
    }
}

fn is_private(ad: &RawAdvert) -> bool {
    ad.attribute("ISPRIVATE") == Some("1")
}

fn is_rental(ad: &RawAdvert) -> bool {
    ad.attribute("OWNAGETYPE") == Some(RENTAL_MARKER)
}

// An advert without a property type is never excluded by type.
fn property_type_in(ad: &RawAdvert, vocabulary: &[&str]) -> bool {
    ad.attribute("PROPERTY_TYPE")
        .is_some_and(|kind| vocabulary.contains(&kind))
}

fn is_commercial(ad: &RawAdvert) -> bool {
    property_type_in(ad, &COMMERCIAL_PROPERTY_TYPES)
}

fn is_land(ad: &RawAdvert) -> bool {
    property_type_in(ad, &LAND_PROPERTY_TYPES)
}
