//! Input validation helpers
//!
//! Centralized text length constants and validation functions.
//! Handlers call these before anything reaches the repository layer.

use crate::utils::AppError;

// ── Text length limits ──────────────────────────────────────────────

/// Entity names: menu item name, customer name
pub const MAX_NAME_LEN: usize = 200;

/// Descriptions
pub const MAX_NOTE_LEN: usize = 500;

/// Short identifiers: phone, category, item reference
pub const MAX_SHORT_TEXT_LEN: usize = 100;

/// Delivery addresses
pub const MAX_ADDRESS_LEN: usize = 500;

// ── Numeric limits ──────────────────────────────────────────────────

/// Menu item price upper bound
pub const MAX_PRICE: f64 = 1_000_000.0;

/// Line item quantity upper bound
pub const MAX_QUANTITY: i32 = 9999;

// ── Text ────────────────────────────────────────────────────────────

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::validation(format!("{field} must not be empty"))
            .with_detail("field", field));
    }
    let len = value.chars().count();
    if len > max_len {
        return Err(AppError::validation(format!(
            "{field} is too long ({len} chars, max {max_len})"
        ))
        .with_detail("field", field));
    }
    Ok(())
}

/// Validate that an optional string, if present, is within the length limit.
pub fn validate_optional_text(
    value: &Option<String>,
    field: &str,
    max_len: usize,
) -> Result<(), AppError> {
    match value {
        Some(v) => {
            let len = v.chars().count();
            if len > max_len {
                return Err(AppError::validation(format!(
                    "{field} is too long ({len} chars, max {max_len})"
                ))
                .with_detail("field", field));
            }
            Ok(())
        }
        None => Ok(()),
    }
}

// ── Numbers ─────────────────────────────────────────────────────────

/// Price must be finite, non-negative and at most [`MAX_PRICE`]
pub fn validate_price(value: f64, field: &str) -> Result<(), AppError> {
    if !value.is_finite() {
        return Err(AppError::validation(format!("{field} must be a finite number"))
            .with_detail("field", field));
    }
    if value < 0.0 {
        return Err(
            AppError::validation(format!("{field} must be non-negative, got {value}"))
                .with_detail("field", field),
        );
    }
    if value > MAX_PRICE {
        return Err(AppError::validation(format!(
            "{field} exceeds maximum allowed ({MAX_PRICE}), got {value}"
        ))
        .with_detail("field", field));
    }
    Ok(())
}

/// Line item quantity must be in 1..=[`MAX_QUANTITY`]
pub fn validate_quantity(value: i32, field: &str) -> Result<(), AppError> {
    if value < 1 {
        return Err(
            AppError::validation(format!("{field} must be at least 1, got {value}"))
                .with_detail("field", field),
        );
    }
    if value > MAX_QUANTITY {
        return Err(AppError::validation(format!(
            "{field} exceeds maximum allowed ({MAX_QUANTITY}), got {value}"
        ))
        .with_detail("field", field));
    }
    Ok(())
}
