//! Pricing configuration: the tunable rate tables behind every quote.
//!
//! A `PricingConfig` is an immutable snapshot. The engine only reads it; edits
//! happen out of band by rewriting the JSON file the store loads from.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;

use super::errors::PricingError;
use super::models::{CleanlinessLevel, PetStatus, PropertySize, Region, ServiceType};

/// Lookup table keyed by (service type, property size).
///
/// Serialized as the nested `{service: {size: value}}` object the admin
/// tooling edits.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceSizeTable<T> {
    entries: BTreeMap<(ServiceType, PropertySize), T>,
}

impl<T> ServiceSizeTable<T> {
    pub fn get(&self, service_type: ServiceType, property_size: PropertySize) -> Option<&T> {
        self.entries.get(&(service_type, property_size))
    }

    pub fn insert(&mut self, service_type: ServiceType, property_size: PropertySize, value: T) {
        self.entries.insert((service_type, property_size), value);
    }

    pub fn iter(&self) -> impl Iterator<Item = (ServiceType, PropertySize, &T)> {
        self.entries.iter().map(|((svc, size), v)| (*svc, *size, v))
    }

    /// Combinations with no entry in this table
    pub fn missing(&self) -> Vec<(ServiceType, PropertySize)> {
        ServiceType::ALL
            .iter()
            .flat_map(|svc| PropertySize::ALL.iter().map(move |size| (*svc, *size)))
            .filter(|key| !self.entries.contains_key(key))
            .collect()
    }
}

impl<T> Default for ServiceSizeTable<T> {
    fn default() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }
}

impl<T> FromIterator<((ServiceType, PropertySize), T)> for ServiceSizeTable<T> {
    fn from_iter<I: IntoIterator<Item = ((ServiceType, PropertySize), T)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl<T: Serialize> Serialize for ServiceSizeTable<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut nested: BTreeMap<ServiceType, BTreeMap<PropertySize, &T>> = BTreeMap::new();
        for ((svc, size), value) in &self.entries {
            nested.entry(*svc).or_default().insert(*size, value);
        }
        nested.serialize(serializer)
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for ServiceSizeTable<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let nested = BTreeMap::<ServiceType, BTreeMap<PropertySize, T>>::deserialize(deserializer)?;
        Ok(nested
            .into_iter()
            .flat_map(|(svc, sizes)| sizes.into_iter().map(move |(size, v)| ((svc, size), v)))
            .collect())
    }
}

/// Flat and per-unit costs for extras
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtraCosts {
    pub extra_bathroom: Decimal,
    pub extra_reception_room: Decimal,
    pub oven_clean: Decimal,
    pub carpet_cleaning_per_room: Decimal,
    pub internal_windows: Decimal,
    pub external_windows: Decimal,
    pub balcony_patio: Decimal,
    pub cleaning_materials: Decimal,
}

impl ExtraCosts {
    fn named(&self) -> [(&'static str, Decimal); 8] {
        [
            ("extra_bathroom", self.extra_bathroom),
            ("extra_reception_room", self.extra_reception_room),
            ("oven_clean", self.oven_clean),
            ("carpet_cleaning_per_room", self.carpet_cleaning_per_room),
            ("internal_windows", self.internal_windows),
            ("external_windows", self.external_windows),
            ("balcony_patio", self.balcony_patio),
            ("cleaning_materials", self.cleaning_materials),
        ]
    }
}

/// Complete pricing configuration snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingConfig {
    pub hourly_rate: Decimal,
    pub markup_percentage: Decimal,
    /// Base hours for one cleaner
    pub property_hours: ServiceSizeTable<Decimal>,
    /// Default crew size before the staffing rules run
    pub cleaners_required: ServiceSizeTable<u32>,
    pub region_multiplier: BTreeMap<Region, Decimal>,
    pub extra_costs: ExtraCosts,
    /// Keyed by label so the config may carry levels the form no longer offers
    pub cleanliness_multiplier: BTreeMap<String, Decimal>,
    pub pet_multiplier: BTreeMap<String, Decimal>,
}

impl PricingConfig {
    pub fn base_hours(
        &self,
        service_type: ServiceType,
        property_size: PropertySize,
    ) -> Result<Decimal, PricingError> {
        self.property_hours
            .get(service_type, property_size)
            .copied()
            .ok_or(PricingError::MissingRate {
                table: "property_hours",
                service_type,
                property_size,
            })
    }

    pub fn default_cleaners(
        &self,
        service_type: ServiceType,
        property_size: PropertySize,
    ) -> Result<u32, PricingError> {
        self.cleaners_required
            .get(service_type, property_size)
            .copied()
            .ok_or(PricingError::MissingRate {
                table: "cleaners_required",
                service_type,
                property_size,
            })
    }

    pub fn region_multiplier(&self, region: Region) -> Result<Decimal, PricingError> {
        self.region_multiplier
            .get(&region)
            .copied()
            .ok_or(PricingError::MissingRegion { region })
    }

    /// Cleanliness multiplier, or `None` when the level is not configured
    pub fn cleanliness_multiplier(&self, level: CleanlinessLevel) -> Option<Decimal> {
        self.cleanliness_multiplier.get(level.label()).copied()
    }

    pub fn pet_multiplier(&self, status: PetStatus) -> Option<Decimal> {
        self.pet_multiplier.get(status.label()).copied()
    }

    /// Check every value in the configuration, collecting all failures.
    pub fn validate(&self) -> Result<(), PricingError> {
        let mut errors = Vec::new();

        if self.hourly_rate <= Decimal::ZERO {
            errors.push(format!("hourly_rate must be positive (got {})", self.hourly_rate));
        }
        if self.markup_percentage < Decimal::ZERO || self.markup_percentage > Decimal::ONE_HUNDRED {
            errors.push(format!(
                "markup_percentage must be between 0 and 100 (got {})",
                self.markup_percentage
            ));
        }
        for (svc, size, hours) in self.property_hours.iter() {
            if *hours <= Decimal::ZERO {
                errors.push(format!(
                    "property_hours.{}.{} must be positive (got {})",
                    svc, size, hours
                ));
            }
        }
        for (svc, size, cleaners) in self.cleaners_required.iter() {
            if *cleaners < 1 {
                errors.push(format!("cleaners_required.{}.{} must be at least 1", svc, size));
            }
        }
        for (region, multiplier) in &self.region_multiplier {
            if *multiplier <= Decimal::ZERO {
                errors.push(format!(
                    "region_multiplier.{} must be positive (got {})",
                    region, multiplier
                ));
            }
        }
        for (name, multiplier) in self
            .cleanliness_multiplier
            .iter()
            .map(|(k, v)| (format!("cleanliness_multiplier.{}", k), v))
            .chain(self.pet_multiplier.iter().map(|(k, v)| (format!("pet_multiplier.{}", k), v)))
        {
            if *multiplier <= Decimal::ZERO {
                errors.push(format!("{} must be positive (got {})", name, multiplier));
            }
        }
        for (name, cost) in self.extra_costs.named() {
            if cost < Decimal::ZERO {
                errors.push(format!("extra_costs.{} must not be negative (got {})", name, cost));
            }
        }

        for (svc, size) in self.property_hours.missing() {
            tracing::warn!("property_hours has no entry for {} / {}", svc, size);
        }
        for (svc, size) in self.cleaners_required.missing() {
            tracing::warn!("cleaners_required has no entry for {} / {}", svc, size);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(PricingError::configuration(
                format!("{} invalid pricing value(s)", errors.len()),
                errors,
            ))
        }
    }
}

/// Build a table from one row of values per service type, in `sizes` order
fn table<T: Copy>(sizes: &[PropertySize], rows: &[(ServiceType, [T; 5])]) -> ServiceSizeTable<T> {
    rows.iter()
        .flat_map(|(svc, row)| sizes.iter().zip(row).map(move |(size, v)| ((*svc, *size), *v)))
        .collect()
}

impl Default for PricingConfig {
    fn default() -> Self {
        use PropertySize::*;
        use ServiceType::*;

        let hours = [
            (Regular, [dec!(2.5), dec!(3.5), dec!(4.0), dec!(5.0), dec!(6.0)]),
            (OneOff, [dec!(3.0), dec!(4.2), dec!(4.8), dec!(6.0), dec!(7.2)]),
            (Deep, [dec!(3.75), dec!(5.25), dec!(6.0), dec!(7.5), dec!(9.0)]),
        ];
        let cleaners = [
            (Regular, [1, 1, 1, 1, 1]),
            (OneOff, [1, 1, 1, 1, 1]),
            (Deep, [1, 1, 1, 2, 2]),
        ];
        let sizes = [OneBedroom, TwoBedroom, ThreeBedroom, FourBedroom, FivePlusBedroom];

        Self {
            hourly_rate: dec!(20.0),
            markup_percentage: dec!(30),
            property_hours: table(&sizes, &hours),
            cleaners_required: table(&sizes, &cleaners),
            region_multiplier: BTreeMap::from([
                (Region::Bedfordshire, dec!(1.0)),
                (Region::Buckinghamshire, dec!(1.1)),
                (Region::Hertfordshire, dec!(1.15)),
                (Region::NorthLondon, dec!(1.25)),
            ]),
            extra_costs: ExtraCosts {
                extra_bathroom: dec!(15.0),
                extra_reception_room: dec!(10.0),
                oven_clean: dec!(30.0),
                carpet_cleaning_per_room: dec!(25.0),
                internal_windows: dec!(20.0),
                external_windows: dec!(30.0),
                balcony_patio: dec!(20.0),
                cleaning_materials: dec!(15.0),
            },
            cleanliness_multiplier: [
                (CleanlinessLevel::VeryClean, dec!(0.9)),
                (CleanlinessLevel::Normal, dec!(1.0)),
                (CleanlinessLevel::SomewhatDirty, dec!(1.2)),
                (CleanlinessLevel::VeryDirty, dec!(1.5)),
            ]
            .into_iter()
            .map(|(level, m)| (level.label().to_string(), m))
            .collect(),
            pet_multiplier: [
                (PetStatus::NoPets, dec!(1.0)),
                (PetStatus::SmallPet, dec!(1.1)),
                (PetStatus::LargePet, dec!(1.2)),
                (PetStatus::MultiplePets, dec!(1.3)),
            ]
            .into_iter()
            .map(|(status, m)| (status.label().to_string(), m))
            .collect(),
        }
    }
}
