//! Pricing service functions.
//!
//! These take a configuration snapshot from the cache and run the pure
//! calculators against it.

use crate::cache::AppCache;

use super::adjustments::{apply_adjustment, staffing_options};
use super::calculators::calculate_price;
use super::errors::PricingError;
use super::requests::{QuoteAdjustment, QuoteRequest};
use super::responses::{AdjustedQuote, PriceBreakdown, StaffingOption};

/// Result of pricing a quote request
#[derive(Debug, Clone)]
pub struct QuoteResult {
    pub breakdown: PriceBreakdown,
    pub staffing_options: Vec<StaffingOption>,
}

/// Price a quote request against the current configuration snapshot.
pub async fn quote(cache: &AppCache, request: &QuoteRequest) -> Result<QuoteResult, PricingError> {
    let config = cache.pricing_config().await?;

    let breakdown = calculate_price(&config, request).map_err(|e| {
        if e.is_configuration_fault() {
            tracing::error!(
                "Pricing config cannot price {}: {}",
                request.service.service_type,
                e
            );
        }
        e
    })?;
    let staffing_options = staffing_options(&breakdown);

    Ok(QuoteResult {
        breakdown,
        staffing_options,
    })
}

/// Price a quote request, then apply an admin adjustment to the result.
pub async fn adjusted_quote(
    cache: &AppCache,
    request: &QuoteRequest,
    adjustment: &QuoteAdjustment,
) -> Result<AdjustedQuote, PricingError> {
    let config = cache.pricing_config().await?;
    let breakdown = calculate_price(&config, request)?;
    apply_adjustment(breakdown, adjustment)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::models::{PropertySize, Region, ServiceType};
    use crate::pricing::requests::{AdditionalServices, PropertyDetails, ServiceDetails};
    use crate::pricing::ConfigStore;
    use rust_decimal_macros::dec;
    use std::time::Duration;

    fn cache(dir: &tempfile::TempDir) -> AppCache {
        let store = ConfigStore::new(dir.path().join("pricing_config.json"));
        AppCache::new(store, Duration::from_secs(60))
    }

    fn request() -> QuoteRequest {
        QuoteRequest {
            property: PropertyDetails {
                region: Region::Bedfordshire,
                property_size: PropertySize::TwoBedroom,
                num_bathrooms: 1,
                num_reception_rooms: 1,
            },
            service: ServiceDetails {
                service_type: ServiceType::Regular,
                cleanliness_level: Default::default(),
                pet_status: Default::default(),
                cleaning_materials: false,
                additional_services: AdditionalServices::default(),
            },
        }
    }

    #[tokio::test]
    async fn test_quote_uses_cached_config() {
        let dir = tempfile::tempdir().unwrap();
        let cache = cache(&dir);
        let result = quote(&cache, &request()).await.unwrap();

        assert_eq!(result.breakdown.total_price, dec!(91));
        assert_eq!(result.staffing_options.len(), 3);
        assert!(result.staffing_options[0].is_default);
    }

    #[tokio::test]
    async fn test_adjusted_quote() {
        let dir = tempfile::tempdir().unwrap();
        let cache = cache(&dir);
        let adjustment = QuoteAdjustment {
            cleaners_required: Some(2),
            markup_percentage: Some(dec!(0)),
            ..Default::default()
        };
        let adjusted = adjusted_quote(&cache, &request(), &adjustment).await.unwrap();

        assert_eq!(adjusted.breakdown.cleaners_required, 2);
        assert_eq!(adjusted.breakdown.hours_required, dec!(1.75));
        assert_eq!(adjusted.breakdown.total_price, dec!(70));
        assert_eq!(adjusted.original_markup, Some(dec!(21)));
    }

    #[tokio::test]
    async fn test_out_of_range_config_is_an_error_not_a_panic() {
        let dir = tempfile::tempdir().unwrap();
        let store = ConfigStore::new(dir.path().join("pricing_config.json"));
        let mut config = crate::pricing::PricingConfig::default();
        config.hourly_rate = rust_decimal::Decimal::MAX;
        store.save(&config).unwrap();

        let err = quote(&cache(&dir), &request()).await.unwrap_err();
        assert!(err.is_configuration_fault());
        assert_eq!(err.error_type(), "configuration_error");
    }
}
