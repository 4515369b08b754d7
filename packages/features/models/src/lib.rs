#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Calendar month arithmetic and model feature vector types.
//!
//! [`CalendarMonth`] is the `(year, month)` pair every prediction is keyed
//! on, and [`FeatureVector`] is the exact ordered input row the consumption
//! model was trained on.

use serde::{Deserialize, Serialize};

/// Number of months in a year.
pub const MONTHS_PER_YEAR: i64 = 12;

/// A `(year, month)` pair with `month` guaranteed to be in `1..=12`.
///
/// Ordering is chronological: by year, then by month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct CalendarMonth {
    year: i32,
    month: u8,
}

impl CalendarMonth {
    /// Creates a calendar month.
    ///
    /// # Errors
    ///
    /// Returns an error if `month` is not in the range 1-12.
    pub fn new(year: i32, month: i64) -> Result<Self, InvalidMonthError> {
        match u8::try_from(month) {
            Ok(m @ 1..=12) => Ok(Self { year, month: m }),
            _ => Err(InvalidMonthError { month }),
        }
    }

    /// The calendar year.
    #[must_use]
    pub const fn year(self) -> i32 {
        self.year
    }

    /// The month of the year, 1-12.
    #[must_use]
    pub const fn month(self) -> u8 {
        self.month
    }

    /// Returns the month `months` months after this one (or before, when
    /// negative), rolling over year boundaries.
    ///
    /// The year saturates at the bounds of `i32`.
    #[must_use]
    pub fn offset(self, months: i32) -> Self {
        let index = i64::from(self.year) * MONTHS_PER_YEAR + i64::from(self.month) - 1
            + i64::from(months);
        let year = index.div_euclid(MONTHS_PER_YEAR);
        let month = index.rem_euclid(MONTHS_PER_YEAR) + 1;

        Self {
            year: i32::try_from(year).unwrap_or(if year < 0 { i32::MIN } else { i32::MAX }),
            month: u8::try_from(month).unwrap_or(12),
        }
    }

    /// Formats this month as `YYYY-MM` with a zero-padded month.
    #[must_use]
    pub fn label(self) -> String {
        self.to_string()
    }
}

impl std::fmt::Display for CalendarMonth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{:02}", self.year, self.month)
    }
}

/// Error returned when attempting to create a [`CalendarMonth`] from a month
/// outside 1-12.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidMonthError {
    /// The invalid month value that was provided.
    pub month: i64,
}

impl std::fmt::Display for InvalidMonthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid month {}: expected 1-12", self.month)
    }
}

impl std::error::Error for InvalidMonthError {}

/// One input row for the consumption model.
///
/// Field order and names are the model's training contract; see
/// [`FeatureVector::COLUMNS`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct FeatureVector {
    /// Calendar year.
    pub year: i32,
    /// Month of the year (1-12).
    pub month: u8,
    /// Mean temperature in degrees Celsius.
    pub temperature: f64,
    /// Mean relative humidity in percent.
    pub humidity: f64,
    /// Estimated population.
    pub population: u32,
}

impl FeatureVector {
    /// Column names, in the order the model consumes them.
    pub const COLUMNS: [&'static str; 5] = ["Year", "Month", "Temperature", "Humidity", "Population"];

    /// Returns the features as a numeric row ordered like [`Self::COLUMNS`].
    #[must_use]
    pub fn to_row(&self) -> [f64; 5] {
        [
            f64::from(self.year),
            f64::from(self.month),
            self.temperature,
            self.humidity,
            f64::from(self.population),
        ]
    }
}
