//! CSS length measurement.
//!
//! The presentation layer styles window chrome with custom properties such
//! as `--title-bar-height: 1.75rem`. The geometry code works in logical
//! pixels, so those values are resolved here against the font size in
//! scope for the element that declares them.

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum CssLengthError {
    #[error("invalid CSS length number: {0:?}")]
    InvalidNumber(String),
    #[error("unsupported CSS length unit: {0:?}")]
    UnsupportedUnit(String),
}

/// Resolve a CSS length to logical pixels.
///
/// Supports `px`, `rem`, `em` and unitless numbers (treated as pixels).
/// `rem` and `em` both resolve against `font_px`; callers pass the root font
/// size for `rem` scoped values and the element font size otherwise.
pub fn measure_css_length(raw: &str, font_px: f64) -> Result<f64, CssLengthError> {
    let raw = raw.trim();
    // the unit is the trailing run, so exponents like `1e3px` stay numeric
    let split = raw
        .trim_end_matches(|c: char| c.is_ascii_alphabetic() || c == '%')
        .len();
    let (number, unit) = raw.split_at(split);
    let number = number.trim();
    let value: f64 = number
        .parse()
        .map_err(|_| CssLengthError::InvalidNumber(number.to_string()))?;
    if !value.is_finite() {
        return Err(CssLengthError::InvalidNumber(number.to_string()));
    }
    match unit.to_ascii_lowercase().as_str() {
        "" | "px" => Ok(value),
        "rem" | "em" => Ok(value * font_px),
        other => Err(CssLengthError::UnsupportedUnit(other.to_string())),
    }
}

/// Read a custom property value as whole pixels.
///
/// An empty or unparseable value reads as `0`, the same result a browser
/// gives for an unset property. So does a length too large for `i32`.
pub fn read_css_px(raw: &str, font_px: f64) -> i32 {
    if raw.trim().is_empty() {
        return 0;
    }
    match measure_css_length(raw, font_px) {
        Ok(px) => {
            let rounded = px.round();
            if rounded < f64::from(i32::MIN) || rounded > f64::from(i32::MAX) {
                tracing::debug!(value = raw, "CSS length out of pixel range");
                return 0;
            }
            rounded as i32
        }
        Err(err) => {
            tracing::debug!(value = raw, error = %err, "ignoring CSS length");
            0
        }
    }
}
