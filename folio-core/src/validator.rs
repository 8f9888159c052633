//! Page-jump input validation
//!
//! The page count is only known once the document has loaded, so the bound
//! is passed into every call instead of being captured up front. Input that
//! was rejected with [`ValidationError::BoundUnknown`] becomes valid as soon
//! as the caller starts passing the loaded page count.

use crate::error::ValidationError;
use std::num::{IntErrorKind, NonZeroU32};

/// Validate raw page-jump text against the live page count.
///
/// Checks run in a fixed order: the text must be a base-10 integer, the
/// bound must be known, and the integer must lie in `1..=page_count`.
/// Surrounding whitespace is ignored. Integers too large for the machine
/// type are reported as out of range.
pub fn validate(raw: &str, page_count: Option<NonZeroU32>) -> Result<NonZeroU32, ValidationError> {
    let parsed = match raw.trim().parse::<i64>() {
        Ok(value) => Some(value),
        Err(e) if matches!(e.kind(), IntErrorKind::PosOverflow | IntErrorKind::NegOverflow) => None,
        Err(_) => return Err(ValidationError::NotANumber),
    };

    let page_count = page_count.ok_or(ValidationError::BoundUnknown)?;
    let out_of_range = ValidationError::OutOfRange {
        page_count: page_count.get(),
    };

    let value = parsed.ok_or(out_of_range)?;
    if value < 1 || value > i64::from(page_count.get()) {
        return Err(out_of_range);
    }

    u32::try_from(value)
        .ok()
        .and_then(NonZeroU32::new)
        .ok_or(out_of_range)
}
