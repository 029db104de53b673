//! Domain vocabulary for cleaning quotes.
//!
//! The closed enumerations here are the keys of the pricing tables. Their serde
//! names are the labels used by the quote form and the JSON pricing config, so a
//! config written by the admin tooling deserializes straight into typed keys.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Service tier requested by the customer
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ServiceType {
    #[serde(rename = "Regular Clean")]
    Regular,
    #[serde(rename = "One-Off Clean")]
    OneOff,
    #[serde(rename = "Deep Clean")]
    Deep,
}

impl ServiceType {
    pub const ALL: [ServiceType; 3] = [
        ServiceType::Regular,
        ServiceType::OneOff,
        ServiceType::Deep,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ServiceType::Regular => "Regular Clean",
            ServiceType::OneOff => "One-Off Clean",
            ServiceType::Deep => "Deep Clean",
        }
    }
}

/// Property size by bedroom count
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PropertySize {
    #[serde(rename = "1 Bedroom")]
    OneBedroom,
    #[serde(rename = "2 Bedroom")]
    TwoBedroom,
    #[serde(rename = "3 Bedroom")]
    ThreeBedroom,
    #[serde(rename = "4 Bedroom")]
    FourBedroom,
    #[serde(rename = "5+ Bedroom")]
    FivePlusBedroom,
}

impl PropertySize {
    pub const ALL: [PropertySize; 5] = [
        PropertySize::OneBedroom,
        PropertySize::TwoBedroom,
        PropertySize::ThreeBedroom,
        PropertySize::FourBedroom,
        PropertySize::FivePlusBedroom,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            PropertySize::OneBedroom => "1 Bedroom",
            PropertySize::TwoBedroom => "2 Bedroom",
            PropertySize::ThreeBedroom => "3 Bedroom",
            PropertySize::FourBedroom => "4 Bedroom",
            PropertySize::FivePlusBedroom => "5+ Bedroom",
        }
    }

    /// Staffing category used by the cleaner allocation rules
    pub fn category(&self) -> PropertyCategory {
        match self {
            PropertySize::OneBedroom | PropertySize::TwoBedroom => PropertyCategory::Small,
            PropertySize::ThreeBedroom => PropertyCategory::Medium,
            PropertySize::FourBedroom | PropertySize::FivePlusBedroom => PropertyCategory::Large,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyCategory {
    Small,
    Medium,
    Large,
}

/// Service region. Each region carries its own price multiplier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Region {
    Bedfordshire,
    Buckinghamshire,
    Hertfordshire,
    #[serde(rename = "North London")]
    NorthLondon,
}

impl Region {
    pub const ALL: [Region; 4] = [
        Region::Bedfordshire,
        Region::Buckinghamshire,
        Region::Hertfordshire,
        Region::NorthLondon,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Region::Bedfordshire => "Bedfordshire",
            Region::Buckinghamshire => "Buckinghamshire",
            Region::Hertfordshire => "Hertfordshire",
            Region::NorthLondon => "North London",
        }
    }
}

/// How dirty the property is, as reported by the customer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CleanlinessLevel {
    #[serde(rename = "Very Clean")]
    VeryClean,
    #[default]
    Normal,
    #[serde(rename = "Somewhat Dirty")]
    SomewhatDirty,
    #[serde(rename = "Very Dirty")]
    VeryDirty,
}

impl CleanlinessLevel {
    pub fn label(&self) -> &'static str {
        match self {
            CleanlinessLevel::VeryClean => "Very Clean",
            CleanlinessLevel::Normal => "Normal",
            CleanlinessLevel::SomewhatDirty => "Somewhat Dirty",
            CleanlinessLevel::VeryDirty => "Very Dirty",
        }
    }
}

/// Pets living in the property
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PetStatus {
    #[default]
    #[serde(rename = "No Pets")]
    NoPets,
    #[serde(rename = "Small Pet (e.g., cat, small dog)")]
    SmallPet,
    #[serde(rename = "Large Pet (e.g., large dog)")]
    LargePet,
    #[serde(rename = "Multiple Pets")]
    MultiplePets,
}

impl PetStatus {
    pub fn label(&self) -> &'static str {
        match self {
            PetStatus::NoPets => "No Pets",
            PetStatus::SmallPet => "Small Pet (e.g., cat, small dog)",
            PetStatus::LargePet => "Large Pet (e.g., large dog)",
            PetStatus::MultiplePets => "Multiple Pets",
        }
    }
}

/// Optional add-on services priced on top of the base clean
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AddOn {
    OvenClean,
    CarpetCleaning,
    InternalWindows,
    ExternalWindows,
    BalconyPatio,
}

macro_rules! impl_display_via_label {
    ($($ty:ty),*) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(self.label())
                }
            }
        )*
    };
}

impl_display_via_label!(ServiceType, PropertySize, Region, CleanlinessLevel, PetStatus);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_property_categories() {
        assert_eq!(PropertySize::OneBedroom.category(), PropertyCategory::Small);
        assert_eq!(PropertySize::TwoBedroom.category(), PropertyCategory::Small);
        assert_eq!(PropertySize::ThreeBedroom.category(), PropertyCategory::Medium);
        assert_eq!(PropertySize::FourBedroom.category(), PropertyCategory::Large);
        assert_eq!(PropertySize::FivePlusBedroom.category(), PropertyCategory::Large);
    }

    #[test]
    fn test_serde_names_match_labels() {
        for service in ServiceType::ALL {
            let json = serde_json::to_string(&service).unwrap();
            assert_eq!(json, format!("\"{}\"", service.label()));
        }
        for size in PropertySize::ALL {
            let json = serde_json::to_string(&size).unwrap();
            assert_eq!(json, format!("\"{}\"", size.label()));
        }
        for region in Region::ALL {
            let json = serde_json::to_string(&region).unwrap();
            assert_eq!(json, format!("\"{}\"", region.label()));
        }

        let pet: PetStatus = serde_json::from_str("\"Small Pet (e.g., cat, small dog)\"").unwrap();
        assert_eq!(pet, PetStatus::SmallPet);
        let level: CleanlinessLevel = serde_json::from_str("\"Somewhat Dirty\"").unwrap();
        assert_eq!(level, CleanlinessLevel::SomewhatDirty);
    }

    #[test]
    fn test_defaults() {
        assert_eq!(CleanlinessLevel::default(), CleanlinessLevel::Normal);
        assert_eq!(PetStatus::default(), PetStatus::NoPets);
    }

    #[test]
    fn test_unknown_region_rejected() {
        assert!(serde_json::from_str::<Region>("\"Essex\"").is_err());
    }
}
