//! Pricing error types.

use thiserror::Error;

use super::models::{PropertySize, Region, ServiceType};

/// Pricing calculation error types
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PricingError {
    /// A service×size table has no entry for the requested combination
    #[error("No {table} entry configured for {service_type} / {property_size}")]
    MissingRate {
        table: &'static str,
        service_type: ServiceType,
        property_size: PropertySize,
    },

    #[error("No region multiplier configured for {region}")]
    MissingRegion { region: Region },

    /// The pricing configuration is unreadable or fails validation
    #[error("Configuration error: {message}")]
    ConfigurationError {
        message: String,
        errors: Vec<String>,
    },

    /// The caller passed a value the engine cannot price
    #[error("Invalid input for '{field}': {reason}")]
    InvalidInput { field: String, reason: String },
}

impl PricingError {
    pub fn configuration(message: impl Into<String>, errors: Vec<String>) -> Self {
        PricingError::ConfigurationError {
            message: message.into(),
            errors,
        }
    }

    /// Arithmetic on configured values left the representable range
    pub fn overflow(quantity: &str) -> Self {
        Self::configuration(
            format!("{} overflowed; pricing values are out of range", quantity),
            vec![],
        )
    }

    pub fn invalid_input(field: impl Into<String>, reason: impl Into<String>) -> Self {
        PricingError::InvalidInput {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Short error code for programmatic handling
    pub fn error_type(&self) -> &'static str {
        match self {
            PricingError::MissingRate { .. } => "missing_rate",
            PricingError::MissingRegion { .. } => "missing_region",
            PricingError::ConfigurationError { .. } => "configuration_error",
            PricingError::InvalidInput { .. } => "invalid_input",
        }
    }

    /// Whether the failure is the operator's to fix rather than the caller's
    pub fn is_configuration_fault(&self) -> bool {
        !matches!(self, PricingError::InvalidInput { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pricing_error_display() {
        let err = PricingError::MissingRate {
            table: "property_hours",
            service_type: ServiceType::Deep,
            property_size: PropertySize::FourBedroom,
        };
        assert_eq!(
            err.to_string(),
            "No property_hours entry configured for Deep Clean / 4 Bedroom"
        );

        let err = PricingError::MissingRegion {
            region: Region::NorthLondon,
        };
        assert!(err.to_string().contains("North London"));

        let err = PricingError::configuration("test error", vec![]);
        assert!(err.to_string().contains("test error"));

        let err = PricingError::invalid_input("num_bathrooms", "must be at least 1");
        assert_eq!(
            err.to_string(),
            "Invalid input for 'num_bathrooms': must be at least 1"
        );
    }

    #[test]
    fn test_error_classification() {
        assert!(PricingError::MissingRegion {
            region: Region::Bedfordshire
        }
        .is_configuration_fault());
        assert!(!PricingError::invalid_input("x", "y").is_configuration_fault());
        assert_eq!(
            PricingError::configuration("bad", vec![]).error_type(),
            "configuration_error"
        );
        assert_eq!(PricingError::overflow("subtotal").error_type(), "configuration_error");
        assert!(PricingError::overflow("subtotal").is_configuration_fault());
    }
}
