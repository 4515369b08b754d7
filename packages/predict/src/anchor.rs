//! Conversion of the untyped request payload into a validated
//! [`AnchorMonth`].

use power_forecast_features_models::CalendarMonth;
use serde_json::Value;

use crate::InvalidInput;

/// The month a prediction window is centered on.
///
/// The year is never `i32::MIN` or `i32::MAX`, so every month in the window
/// around it is representable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnchorMonth(CalendarMonth);

impl AnchorMonth {
    /// Validates an already-coerced `(year, month)` pair.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidInput::Malformed`] if `year` is outside the supported
    /// range, or [`InvalidInput::MonthOutOfRange`] if `month` is not 1-12.
    pub fn new(year: i64, month: i64) -> Result<Self, InvalidInput> {
        let year = i32::try_from(year)
            .ok()
            .filter(|y| *y != i32::MIN && *y != i32::MAX)
            .ok_or(InvalidInput::Malformed)?;

        CalendarMonth::new(year, month)
            .map(Self)
            .map_err(|e| InvalidInput::MonthOutOfRange { month: e.month })
    }

    /// Validates a raw request payload of the form
    /// `{"year": ..., "month": ...}`.
    ///
    /// Each field may be a JSON integer, a float (truncated towards zero), a
    /// string holding a base-10 integer, or a boolean. The year is coerced
    /// before the month, and the month range is only checked once both
    /// fields coerce.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidInput::Malformed`] if the payload is not an object or
    /// either field is missing or not integer-coercible, and
    /// [`InvalidInput::MonthOutOfRange`] if the month is not 1-12.
    pub fn from_payload(payload: &Value) -> Result<Self, InvalidInput> {
        let fields = payload.as_object().ok_or(InvalidInput::Malformed)?;
        let year = fields
            .get("year")
            .and_then(coerce_integer)
            .ok_or(InvalidInput::Malformed)?;
        let month = fields
            .get("month")
            .and_then(coerce_integer)
            .ok_or(InvalidInput::Malformed)?;

        Self::new(year, month)
    }

    /// The validated month.
    #[must_use]
    pub const fn month(self) -> CalendarMonth {
        self.0
    }
}

/// Coerces a JSON value to an integer the way a lenient form field would be
/// read.
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
fn coerce_integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite())
                .map(f64::trunc)
                .filter(|f| *f >= i64::MIN as f64 && *f < i64::MAX as f64)
                .map(|f| f as i64)
        }),
        Value::String(s) => s.trim().parse().ok(),
        Value::Bool(b) => Some(i64::from(*b)),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}
