//! Core pricing calculation functions.
//!
//! Pure functions for quote math - no I/O. A calculation runs the hours
//! estimate, then cleaner allocation, then cost aggregation, all against the
//! same configuration snapshot.

use rust_decimal::Decimal;
use rust_decimal::prelude::*;

use super::config::PricingConfig;
use super::errors::PricingError;
use super::models::{AddOn, CleanlinessLevel, PetStatus, PropertySize, ServiceType};
use super::requests::{AdditionalServices, QuoteRequest};
use super::responses::{PriceBreakdown, ServiceLine};
use super::staffing::{self, Allocation};

/// Round to specified decimal places using banker's rounding (ROUND_HALF_EVEN).
///
/// Banker's rounding rounds to the nearest even number when the value is exactly
/// halfway between two possibilities. This reduces cumulative rounding bias.
///
/// # Examples
/// ```
/// use rust_decimal_macros::dec;
/// use cleaning_quotes::pricing::round_money;
///
/// assert_eq!(round_money(dec!(2.5), 0), dec!(2));   // rounds to even
/// assert_eq!(round_money(dec!(3.5), 0), dec!(4));   // rounds to even
/// assert_eq!(round_money(dec!(1.234), 2), dec!(1.23));
/// ```
pub fn round_money(amount: Decimal, places: u32) -> Decimal {
    amount.round_dp_with_strategy(places, RoundingStrategy::MidpointNearestEven)
}

/// Hours for one cleaner, scaled by how dirty the property is and by pets.
///
/// Unknown cleanliness levels and pet statuses count as neutral (1.0); only a
/// missing base-hours entry is an error.
pub fn estimate_hours(
    config: &PricingConfig,
    service_type: ServiceType,
    property_size: PropertySize,
    cleanliness_level: CleanlinessLevel,
    pet_status: PetStatus,
) -> Result<Decimal, PricingError> {
    let base_hours = config.base_hours(service_type, property_size)?;

    let cleanliness_multiplier = config
        .cleanliness_multiplier(cleanliness_level)
        .unwrap_or_else(|| {
            tracing::warn!("No cleanliness multiplier for '{}', using 1.0", cleanliness_level);
            Decimal::ONE
        });
    let pet_multiplier = config.pet_multiplier(pet_status).unwrap_or_else(|| {
        tracing::warn!("No pet multiplier for '{}', using 1.0", pet_status);
        Decimal::ONE
    });

    base_hours
        .checked_mul(cleanliness_multiplier)
        .and_then(|hours| hours.checked_mul(pet_multiplier))
        .ok_or_else(|| PricingError::overflow("hours estimate"))
}

/// Price each selected add-on service
pub fn price_additional_services(
    config: &PricingConfig,
    additional_services: &AdditionalServices,
) -> Result<Vec<ServiceLine>, PricingError> {
    let costs = &config.extra_costs;

    additional_services
        .selected()
        .into_iter()
        .map(|service| {
            let (quantity, unit_cost) = match service {
                AddOn::OvenClean => (1, costs.oven_clean),
                AddOn::CarpetCleaning => (
                    additional_services.carpet_rooms,
                    costs.carpet_cleaning_per_room,
                ),
                AddOn::InternalWindows => (1, costs.internal_windows),
                AddOn::ExternalWindows => (1, costs.external_windows),
                AddOn::BalconyPatio => (1, costs.balcony_patio),
            };
            let cost = unit_cost
                .checked_mul(Decimal::from(quantity))
                .ok_or_else(|| PricingError::overflow("additional service cost"))?;
            Ok(ServiceLine {
                service,
                quantity,
                unit_cost,
                cost,
            })
        })
        .collect()
}

/// Cost of rooms beyond the first one included in the base clean
fn extra_rooms_cost(rooms: u32, unit_cost: Decimal) -> Result<Decimal, PricingError> {
    Decimal::from(rooms.saturating_sub(1))
        .checked_mul(unit_cost)
        .ok_or_else(|| PricingError::overflow("extra rooms cost"))
}

/// Price an allocated job and apply markup.
pub fn aggregate(
    config: &PricingConfig,
    request: &QuoteRequest,
    allocation: &Allocation,
) -> Result<PriceBreakdown, PricingError> {
    let property = &request.property;
    let service = &request.service;
    let costs = &config.extra_costs;
    let region_multiplier = config.region_multiplier(property.region)?;

    let base_price = config
        .hourly_rate
        .checked_mul(allocation.hours_per_cleaner)
        .and_then(|price| price.checked_mul(Decimal::from(allocation.cleaners_required)))
        .and_then(|price| price.checked_mul(region_multiplier))
        .ok_or_else(|| PricingError::overflow("base price"))?;
    let extra_bathrooms_cost = extra_rooms_cost(property.num_bathrooms, costs.extra_bathroom)?;
    let extra_reception_cost =
        extra_rooms_cost(property.num_reception_rooms, costs.extra_reception_room)?;

    let lines = price_additional_services(config, &service.additional_services)?;
    let additional_services_cost = lines
        .iter()
        .try_fold(Decimal::ZERO, |sum, line| sum.checked_add(line.cost))
        .ok_or_else(|| PricingError::overflow("additional services cost"))?;

    let materials_cost = if service.cleaning_materials {
        costs.cleaning_materials
    } else {
        Decimal::ZERO
    };

    let subtotal = [
        extra_bathrooms_cost,
        extra_reception_cost,
        additional_services_cost,
        materials_cost,
    ]
    .into_iter()
    .try_fold(base_price, |sum, cost| sum.checked_add(cost))
    .ok_or_else(|| PricingError::overflow("subtotal"))?;
    let markup = markup_amount(subtotal, config.markup_percentage);
    let total_price = subtotal
        .checked_add(markup)
        .ok_or_else(|| PricingError::overflow("total price"))?;

    Ok(PriceBreakdown {
        hourly_rate: config.hourly_rate,
        hours_required: allocation.hours_per_cleaner,
        cleaners_required: allocation.cleaners_required,
        total_labour_hours: allocation.total_labour_hours,
        region_multiplier,
        base_price,
        extra_bathrooms_cost,
        extra_reception_cost,
        additional_services: lines,
        additional_services_cost,
        materials_cost,
        subtotal,
        markup_percentage: config.markup_percentage,
        markup,
        total_price,
        staffing_rules_applied: allocation
            .rules_applied
            .iter()
            .map(|rule| rule.to_string())
            .collect(),
    })
}

/// Markup on a subtotal at the given percentage.
///
/// Never larger than the subtotal for percentages up to 100.
pub fn markup_amount(subtotal: Decimal, markup_percentage: Decimal) -> Decimal {
    subtotal * (markup_percentage / Decimal::ONE_HUNDRED)
}

/// Price a quote request against a configuration snapshot.
pub fn calculate_price(
    config: &PricingConfig,
    request: &QuoteRequest,
) -> Result<PriceBreakdown, PricingError> {
    request.validate()?;

    let property = &request.property;
    let service = &request.service;

    let hours = estimate_hours(
        config,
        service.service_type,
        property.property_size,
        service.cleanliness_level,
        service.pet_status,
    )?;

    let allocation = staffing::allocate(
        config,
        service.service_type,
        property.property_size,
        hours,
        &service.additional_services,
    )?;

    let breakdown = aggregate(config, request, &allocation)?;

    tracing::debug!(
        service_type = %service.service_type,
        property_size = %property.property_size,
        region = %property.region,
        cleaners = breakdown.cleaners_required,
        total = %round_money(breakdown.total_price, 2),
        "calculated quote"
    );

    Ok(breakdown)
}
