//! Result types produced by the pricing engine, and the API response DTOs.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::models::AddOn;

/// One priced add-on service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceLine {
    pub service: AddOn,
    pub quantity: u32,
    #[serde(with = "rust_decimal::serde::str")]
    pub unit_cost: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub cost: Decimal,
}

/// Itemised price for a quote.
///
/// Every intermediate value is exposed so the quote can be audited and
/// displayed line by line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceBreakdown {
    #[serde(with = "rust_decimal::serde::str")]
    pub hourly_rate: Decimal,
    /// Hours per cleaner
    #[serde(with = "rust_decimal::serde::str")]
    pub hours_required: Decimal,
    pub cleaners_required: u32,
    #[serde(with = "rust_decimal::serde::str")]
    pub total_labour_hours: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub region_multiplier: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub base_price: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub extra_bathrooms_cost: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub extra_reception_cost: Decimal,
    pub additional_services: Vec<ServiceLine>,
    #[serde(with = "rust_decimal::serde::str")]
    pub additional_services_cost: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub materials_cost: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub subtotal: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub markup_percentage: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub markup: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub total_price: Decimal,
    /// Staffing rules that raised the crew above the hours-based count
    #[serde(default)]
    pub staffing_rules_applied: Vec<String>,
}

/// A crew size the job could be staffed with
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StaffingOption {
    pub cleaners: u32,
    #[serde(with = "rust_decimal::serde::str")]
    pub hours: Decimal,
    pub is_default: bool,
}

/// A breakdown after administrative adjustments, with the values it replaced
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AdjustedQuote {
    pub breakdown: PriceBreakdown,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_cleaners: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none", with = "rust_decimal::serde::str_option")]
    pub original_hours: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none", with = "rust_decimal::serde::str_option")]
    pub original_markup_percentage: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none", with = "rust_decimal::serde::str_option")]
    pub original_markup: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none", with = "rust_decimal::serde::str_option")]
    pub regular_client_discount_percentage: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none", with = "rust_decimal::serde::str_option")]
    pub regular_client_discount_amount: Option<Decimal>,
    /// Total before the regular-client discount
    #[serde(skip_serializing_if = "Option::is_none", with = "rust_decimal::serde::str_option")]
    pub original_price: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin_notes: Option<String>,
}

impl AdjustedQuote {
    pub fn unadjusted(breakdown: PriceBreakdown) -> Self {
        Self {
            breakdown,
            original_cleaners: None,
            original_hours: None,
            original_markup_percentage: None,
            original_markup: None,
            regular_client_discount_percentage: None,
            regular_client_discount_amount: None,
            original_price: None,
            admin_notes: None,
        }
    }

    pub fn has_adjustments(&self) -> bool {
        self.original_cleaners.is_some()
            || self.original_markup_percentage.is_some()
            || self.regular_client_discount_percentage.is_some()
            || self.admin_notes.is_some()
    }
}

/// Response for a quote calculation
#[derive(Debug, Serialize)]
pub struct QuoteResponse {
    pub breakdown: PriceBreakdown,
    pub staffing_options: Vec<StaffingOption>,
    pub quoted_at: DateTime<Utc>,
}

/// Response for an adjusted quote
#[derive(Debug, Serialize)]
pub struct AdjustedQuoteResponse {
    #[serde(flatten)]
    pub quote: AdjustedQuote,
    pub quoted_at: DateTime<Utc>,
}

/// Generic pricing error response
#[derive(Debug, Serialize)]
pub struct PricingErrorResponse {
    pub error_type: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}
