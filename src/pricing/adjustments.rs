//! Post-processing of computed quotes.
//!
//! Admin overrides rewrite a breakdown after the engine has priced it. Every
//! value an override replaces is kept under an `original_*` field. A crew-size
//! override redistributes hours so the job's total labour never changes.

use rust_decimal::Decimal;

use super::calculators::markup_amount;
use super::errors::PricingError;
use super::requests::QuoteAdjustment;
use super::responses::{AdjustedQuote, PriceBreakdown, StaffingOption};
use super::staffing::MAX_WORK_DAY_HOURS;

/// Jobs longer than this per cleaner are not offered alternative crews
const MAX_OPTION_HOURS: Decimal = Decimal::from_parts(6, 0, 0, false, 0);
/// Shortest visit worth offering
const MIN_OPTION_HOURS: Decimal = Decimal::ONE;
const MAX_OPTION_CLEANERS: u32 = 3;

/// Reassign the job to `new_cleaners`, keeping total labour hours constant.
pub fn override_cleaners(
    quote: &mut AdjustedQuote,
    new_cleaners: u32,
) -> Result<(), PricingError> {
    if new_cleaners < 1 {
        return Err(PricingError::invalid_input(
            "cleaners_required",
            "at least 1 cleaner is required",
        ));
    }

    let breakdown = &mut quote.breakdown;
    let old_cleaners = breakdown.cleaners_required;
    if new_cleaners == old_cleaners {
        return Ok(());
    }

    let old_hours = breakdown.hours_required;
    let new_hours = old_hours
        .checked_mul(Decimal::from(old_cleaners))
        .ok_or_else(|| PricingError::overflow("total labour hours"))?
        / Decimal::from(new_cleaners);
    if new_hours > MAX_WORK_DAY_HOURS {
        tracing::warn!(
            "Override to {} cleaner(s) gives {} hours each, over the {} hour working day",
            new_cleaners,
            new_hours.round_dp(2),
            MAX_WORK_DAY_HOURS
        );
    }

    breakdown.cleaners_required = new_cleaners;
    breakdown.hours_required = new_hours;

    // Keep the first values if the crew is overridden more than once
    quote.original_cleaners.get_or_insert(old_cleaners);
    quote.original_hours.get_or_insert(old_hours);
    Ok(())
}

/// Replace the markup percentage and re-derive markup and total from the subtotal.
pub fn override_markup(
    quote: &mut AdjustedQuote,
    markup_percentage: Decimal,
) -> Result<(), PricingError> {
    if markup_percentage < Decimal::ZERO || markup_percentage > Decimal::ONE_HUNDRED {
        return Err(PricingError::invalid_input(
            "markup_percentage",
            format!("must be between 0 and 100 (got {})", markup_percentage),
        ));
    }

    let breakdown = &mut quote.breakdown;
    if markup_percentage == breakdown.markup_percentage {
        return Ok(());
    }

    let markup = markup_amount(breakdown.subtotal, markup_percentage);
    let total_price = breakdown
        .subtotal
        .checked_add(markup)
        .ok_or_else(|| PricingError::overflow("total price"))?;

    quote.original_markup_percentage.get_or_insert(breakdown.markup_percentage);
    quote.original_markup.get_or_insert(breakdown.markup);

    breakdown.markup_percentage = markup_percentage;
    breakdown.markup = markup;
    breakdown.total_price = total_price;
    Ok(())
}

/// Discount the marked-up total for a regular client.
pub fn apply_regular_client_discount(
    quote: &mut AdjustedQuote,
    discount_percentage: Decimal,
) -> Result<(), PricingError> {
    if discount_percentage < Decimal::ZERO || discount_percentage > Decimal::ONE_HUNDRED {
        return Err(PricingError::invalid_input(
            "regular_client_discount_percentage",
            format!("must be between 0 and 100 (got {})", discount_percentage),
        ));
    }

    let breakdown = &mut quote.breakdown;
    let full_price = breakdown
        .subtotal
        .checked_add(breakdown.markup)
        .ok_or_else(|| PricingError::overflow("total price"))?;
    let discount = full_price * (discount_percentage / Decimal::ONE_HUNDRED);

    quote.original_price = Some(full_price);
    quote.regular_client_discount_percentage = Some(discount_percentage);
    quote.regular_client_discount_amount = Some(discount);
    breakdown.total_price = full_price - discount;
    Ok(())
}

/// Apply an admin adjustment to a freshly computed breakdown.
///
/// Crew first, then markup, then the discount on the re-marked-up total.
pub fn apply_adjustment(
    breakdown: PriceBreakdown,
    adjustment: &QuoteAdjustment,
) -> Result<AdjustedQuote, PricingError> {
    let mut quote = AdjustedQuote::unadjusted(breakdown);

    if let Some(cleaners) = adjustment.cleaners_required {
        override_cleaners(&mut quote, cleaners)?;
    }
    if let Some(markup) = adjustment.markup_percentage {
        override_markup(&mut quote, markup)?;
    }
    if let Some(discount) = adjustment.regular_client_discount_percentage {
        apply_regular_client_discount(&mut quote, discount)?;
    }
    quote.admin_notes = adjustment
        .admin_notes
        .as_ref()
        .map(|notes| notes.trim().to_string())
        .filter(|notes| !notes.is_empty());

    if quote.has_adjustments() {
        tracing::info!(
            cleaners = quote.breakdown.cleaners_required,
            markup_percentage = %quote.breakdown.markup_percentage,
            total = %quote.breakdown.total_price.round_dp(2),
            "quote adjusted"
        );
    }

    Ok(quote)
}

/// Alternative crew sizes for a computed job.
///
/// Jobs of up to six hours per cleaner may be split across one to three
/// cleaners, skipping splits that leave visits under an hour or shifts over
/// the working day. The computed crew is always offered and marked as the
/// default.
pub fn staffing_options(breakdown: &PriceBreakdown) -> Vec<StaffingOption> {
    let current = breakdown.cleaners_required;
    let hours = breakdown.hours_required;
    let total_labour = hours * Decimal::from(current);

    let mut options: Vec<StaffingOption> = Vec::new();
    if hours <= MAX_OPTION_HOURS {
        options = (1..=MAX_OPTION_CLEANERS)
            .map(|cleaners| StaffingOption {
                cleaners,
                hours: if cleaners == current {
                    hours
                } else {
                    total_labour / Decimal::from(cleaners)
                },
                is_default: cleaners == current,
            })
            .filter(|option| option.hours >= MIN_OPTION_HOURS && option.hours <= MAX_WORK_DAY_HOURS)
            .collect();
    }

    if !options.iter().any(|option| option.is_default) {
        options.push(StaffingOption {
            cleaners: current,
            hours,
            is_default: true,
        });
        options.sort_by_key(|option| option.cleaners);
    }

    options
}
