//! Cleaner allocation.
//!
//! Converts total labour into a crew size that keeps every cleaner within a
//! working day. The hours-based count is then raised by an ordered ladder of
//! staffing rules. Rules only ever raise the count, so the final crew is never
//! smaller than the naive hours-based figure.

use rust_decimal::prelude::*;

use super::config::PricingConfig;
use super::errors::PricingError;
use super::models::{PropertyCategory, PropertySize, ServiceType};
use super::requests::AdditionalServices;

/// Longest shift a single cleaner may work, in hours
pub const MAX_WORK_DAY_HOURS: Decimal = Decimal::from_parts(75, 0, 0, false, 1);

/// Labour above this needs a crew of three
pub const TWO_DAY_LABOUR_HOURS: Decimal = Decimal::from_parts(15, 0, 0, false, 0);

/// Everything a staffing rule may look at
#[derive(Debug, Clone)]
pub struct StaffingContext<'a> {
    pub service_type: ServiceType,
    pub property_size: PropertySize,
    pub category: PropertyCategory,
    pub additional_services: &'a AdditionalServices,
    pub total_labour_hours: Decimal,
}

impl StaffingContext<'_> {
    /// Number of crew-intensive add-ons selected (balcony sweeps do not count)
    fn heavy_add_on_count(&self) -> usize {
        let extras = self.additional_services;
        [
            extras.oven_clean,
            extras.carpet_cleaning,
            extras.external_windows,
            extras.internal_windows,
        ]
        .iter()
        .filter(|selected| **selected)
        .count()
    }
}

/// How a matching rule changes the recommended crew
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrewAdjustment {
    /// Add cleaners on top of the current recommendation
    Add(u32),
    /// Raise the recommendation to at least this many cleaners
    AtLeast(u32),
}

impl CrewAdjustment {
    pub fn apply(&self, recommended: u32) -> u32 {
        match self {
            CrewAdjustment::Add(extra) => recommended + extra,
            CrewAdjustment::AtLeast(floor) => recommended.max(*floor),
        }
    }
}

/// A guarded staffing policy
pub struct StaffingRule {
    pub name: &'static str,
    pub applies: fn(&StaffingContext<'_>) -> bool,
    pub adjustment: CrewAdjustment,
}

/// Staffing policy, applied top to bottom.
pub const STAFFING_RULES: &[StaffingRule] = &[
    StaffingRule {
        name: "external_windows_extra_cleaner",
        applies: |ctx| ctx.additional_services.external_windows,
        adjustment: CrewAdjustment::Add(1),
    },
    StaffingRule {
        name: "oven_with_carpet_or_external_windows",
        applies: |ctx| {
            let extras = ctx.additional_services;
            extras.oven_clean && (extras.carpet_cleaning || extras.external_windows)
        },
        adjustment: CrewAdjustment::AtLeast(2),
    },
    StaffingRule {
        name: "deep_clean_large_property",
        applies: |ctx| {
            ctx.service_type == ServiceType::Deep && ctx.category == PropertyCategory::Large
        },
        adjustment: CrewAdjustment::AtLeast(2),
    },
    StaffingRule {
        name: "large_property_multiple_add_ons",
        applies: |ctx| ctx.category == PropertyCategory::Large && ctx.heavy_add_on_count() >= 2,
        adjustment: CrewAdjustment::AtLeast(2),
    },
    StaffingRule {
        name: "labour_over_two_days",
        applies: |ctx| ctx.total_labour_hours > TWO_DAY_LABOUR_HOURS,
        adjustment: CrewAdjustment::AtLeast(3),
    },
    StaffingRule {
        name: "labour_over_one_day",
        applies: |ctx| ctx.total_labour_hours > MAX_WORK_DAY_HOURS,
        adjustment: CrewAdjustment::AtLeast(2),
    },
];

/// Outcome of cleaner allocation
#[derive(Debug, Clone, PartialEq)]
pub struct Allocation {
    pub cleaners_required: u32,
    /// Hours per cleaner
    pub hours_per_cleaner: Decimal,
    pub total_labour_hours: Decimal,
    /// Rules that changed the crew size, in application order
    pub rules_applied: Vec<&'static str>,
}

/// Cleaners needed to fit `total_labour_hours` into working days.
///
/// Labour comes from the configured tables, so a figure no crew size can
/// cover is a configuration fault.
pub fn hours_based_cleaners(total_labour_hours: Decimal) -> Result<u32, PricingError> {
    (total_labour_hours / MAX_WORK_DAY_HOURS)
        .ceil()
        .to_u32()
        .ok_or_else(|| {
            PricingError::configuration(
                format!("{} labour hours cannot be staffed", total_labour_hours),
                vec![],
            )
        })
}

/// Run the staffing ladder over an hours-based recommendation.
pub fn apply_staffing_rules(
    ctx: &StaffingContext<'_>,
    base_recommended: u32,
) -> (u32, Vec<&'static str>) {
    let mut recommended = base_recommended;
    let mut applied = Vec::new();

    for rule in STAFFING_RULES {
        if !(rule.applies)(ctx) {
            continue;
        }
        let raised = rule.adjustment.apply(recommended);
        if raised != recommended {
            applied.push(rule.name);
            recommended = raised;
        }
    }

    (recommended, applied)
}

/// Allocate cleaners for a job.
///
/// `hours_per_cleaner_base` is the adjusted hours estimate for one member of
/// the configured default crew.
pub fn allocate(
    config: &PricingConfig,
    service_type: ServiceType,
    property_size: PropertySize,
    hours_per_cleaner_base: Decimal,
    additional_services: &AdditionalServices,
) -> Result<Allocation, PricingError> {
    let default_cleaners = config.default_cleaners(service_type, property_size)?;
    let total_labour_hours = hours_per_cleaner_base
        .checked_mul(Decimal::from(default_cleaners))
        .ok_or_else(|| PricingError::overflow("total labour hours"))?;

    if total_labour_hours <= Decimal::ZERO {
        return Err(PricingError::invalid_input(
            "total_labour_hours",
            format!("labour must be positive (got {})", total_labour_hours),
        ));
    }

    let base_recommended = hours_based_cleaners(total_labour_hours)?;
    let ctx = StaffingContext {
        service_type,
        property_size,
        category: property_size.category(),
        additional_services,
        total_labour_hours,
    };
    let (mut cleaners_required, rules_applied) = apply_staffing_rules(&ctx, base_recommended);

    let mut hours_per_cleaner = total_labour_hours / Decimal::from(cleaners_required);
    while hours_per_cleaner > MAX_WORK_DAY_HOURS {
        cleaners_required += 1;
        hours_per_cleaner = total_labour_hours / Decimal::from(cleaners_required);
    }

    tracing::debug!(
        service_type = %service_type,
        property_size = %property_size,
        default_cleaners,
        base_recommended,
        cleaners_required,
        rules = ?rules_applied,
        "allocated cleaners"
    );

    Ok(Allocation {
        cleaners_required,
        hours_per_cleaner,
        total_labour_hours,
        rules_applied,
    })
}
