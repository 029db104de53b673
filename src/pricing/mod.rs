//! Pricing engine module for cleaning quotes.
//!
//! Estimates labour hours, allocates cleaners within a working day, and
//! builds an itemised price breakdown. The calculators are pure functions of
//! a request and a configuration snapshot; the service and route layers only
//! fetch the snapshot and expose the results over HTTP/JSON.

pub mod adjustments;
pub mod calculators;
pub mod config;
pub mod errors;
pub mod models;
pub mod requests;
pub mod responses;
pub mod routes;
pub mod services;
pub mod staffing;
pub mod store;

// Re-export commonly used items
pub use calculators::{calculate_price, round_money};
pub use config::PricingConfig;
pub use errors::PricingError;
pub use requests::{QuoteAdjustment, QuoteRequest};
pub use responses::{AdjustedQuote, PriceBreakdown};
pub use routes::router;
pub use store::ConfigStore;
