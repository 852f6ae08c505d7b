//! Decimal <-> BSON `Decimal128` conversion
//!
//! Both directions go through the decimal string form, so the scale is kept
//! (`10.50` stays `10.50`).

use crate::error::{BootstrapError, BootstrapResult};
use mongodb::bson::Decimal128;
use rust_decimal::Decimal;
use std::str::FromStr;

/// Encode a decimal exactly
pub fn to_decimal128(value: Decimal) -> BootstrapResult<Decimal128> {
    value
        .to_string()
        .parse::<Decimal128>()
        .map_err(|_| BootstrapError::other(format!("{} cannot be stored as Decimal128", value)))
}

/// Decode a `Decimal128`.
///
/// Returns `None` for NaN, infinities and values outside the range of
/// [`Decimal`].
pub fn from_decimal128(value: Decimal128) -> Option<Decimal> {
    let text = value.to_string();
    Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .ok()
}
