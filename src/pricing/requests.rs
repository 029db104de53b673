//! Request DTOs for the pricing engine and its API endpoints.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::errors::PricingError;
use super::models::{AddOn, CleanlinessLevel, PetStatus, PropertySize, Region, ServiceType};

/// A customer's request for a cleaning quote
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteRequest {
    pub property: PropertyDetails,
    pub service: ServiceDetails,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyDetails {
    pub region: Region,
    pub property_size: PropertySize,
    #[serde(default = "default_room_count")]
    pub num_bathrooms: u32,
    #[serde(default = "default_room_count")]
    pub num_reception_rooms: u32,
}

fn default_room_count() -> u32 {
    1
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceDetails {
    pub service_type: ServiceType,
    #[serde(default)]
    pub cleanliness_level: CleanlinessLevel,
    #[serde(default)]
    pub pet_status: PetStatus,
    #[serde(default)]
    pub cleaning_materials: bool,
    #[serde(default)]
    pub additional_services: AdditionalServices,
}

/// Add-on services selected on the quote form
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdditionalServices {
    pub oven_clean: bool,
    pub carpet_cleaning: bool,
    /// Only meaningful when `carpet_cleaning` is selected
    pub carpet_rooms: u32,
    pub internal_windows: bool,
    pub external_windows: bool,
    pub balcony_patio: bool,
}

impl AdditionalServices {
    pub fn is_selected(&self, add_on: AddOn) -> bool {
        match add_on {
            AddOn::OvenClean => self.oven_clean,
            AddOn::CarpetCleaning => self.carpet_cleaning,
            AddOn::InternalWindows => self.internal_windows,
            AddOn::ExternalWindows => self.external_windows,
            AddOn::BalconyPatio => self.balcony_patio,
        }
    }

    /// Selected add-ons in form order
    pub fn selected(&self) -> Vec<AddOn> {
        [
            AddOn::OvenClean,
            AddOn::CarpetCleaning,
            AddOn::InternalWindows,
            AddOn::ExternalWindows,
            AddOn::BalconyPatio,
        ]
        .into_iter()
        .filter(|add_on| self.is_selected(*add_on))
        .collect()
    }
}

impl QuoteRequest {
    /// Reject requests the engine cannot price meaningfully
    pub fn validate(&self) -> Result<(), PricingError> {
        if self.property.num_bathrooms < 1 {
            return Err(PricingError::invalid_input(
                "num_bathrooms",
                "a property has at least 1 bathroom",
            ));
        }
        if self.property.num_reception_rooms < 1 {
            return Err(PricingError::invalid_input(
                "num_reception_rooms",
                "a property has at least 1 reception room",
            ));
        }
        let extras = &self.service.additional_services;
        if extras.carpet_cleaning && extras.carpet_rooms < 1 {
            return Err(PricingError::invalid_input(
                "carpet_rooms",
                "carpet cleaning needs at least 1 room",
            ));
        }
        Ok(())
    }
}

/// Administrative adjustments applied to a computed quote
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuoteAdjustment {
    /// Crew size override; labour hours are redistributed
    pub cleaners_required: Option<u32>,
    pub markup_percentage: Option<Decimal>,
    /// Discount for regular clients, applied after markup
    pub regular_client_discount_percentage: Option<Decimal>,
    pub admin_notes: Option<String>,
}

/// Request to adjust a quote: the quote is recomputed, then adjusted
#[derive(Debug, Deserialize)]
pub struct AdjustQuoteRequest {
    pub request: QuoteRequest,
    #[serde(default)]
    pub adjustment: QuoteAdjustment,
}
