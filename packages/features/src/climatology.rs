//! Long-run monthly climate normals for Bhopal.

/// Temperature used when a month has no recorded normal.
pub const DEFAULT_TEMPERATURE: f64 = 25.0;

/// Humidity used when a month has no recorded normal.
pub const DEFAULT_HUMIDITY: f64 = 58.0;

/// Seasonal normals for one calendar month.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonthlyNormal {
    /// Month of the year (1-12).
    pub month: u8,
    /// Mean temperature in degrees Celsius.
    pub temperature: f64,
    /// Mean relative humidity in percent.
    pub humidity: f64,
}

const fn normal(month: u8, temperature: f64, humidity: f64) -> MonthlyNormal {
    MonthlyNormal {
        month,
        temperature,
        humidity,
    }
}

/// Monthly normals, January through December.
pub const MONTHLY_NORMALS: [MonthlyNormal; 12] = [
    normal(1, 24.9, 50.0),
    normal(2, 26.5, 52.0),
    normal(3, 28.0, 55.0),
    normal(4, 30.0, 58.0),
    normal(5, 30.5, 26.0),
    normal(6, 32.0, 40.0),
    normal(7, 30.9, 60.0),
    normal(8, 29.5, 87.0),
    normal(9, 29.0, 75.0),
    normal(10, 27.5, 65.0),
    normal(11, 26.0, 55.0),
    normal(12, 24.95, 60.0),
];

/// Looks up the normals recorded for `month`.
#[must_use]
pub fn lookup(month: u8) -> Option<&'static MonthlyNormal> {
    MONTHLY_NORMALS.iter().find(|n| n.month == month)
}

/// Mean temperature for `month`, or [`DEFAULT_TEMPERATURE`] if the month has
/// no entry.
#[must_use]
pub fn temperature(month: u8) -> f64 {
    lookup(month).map_or(DEFAULT_TEMPERATURE, |n| n.temperature)
}

/// Mean humidity for `month`, or [`DEFAULT_HUMIDITY`] if the month has no
/// entry.
#[must_use]
pub fn humidity(month: u8) -> f64 {
    lookup(month).map_or(DEFAULT_HUMIDITY, |n| n.humidity)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_month_has_a_normal() {
        for month in 1..=12u8 {
            assert!(lookup(month).is_some(), "missing normal for month {month}");
        }
    }

    #[test]
    fn normals_are_in_calendar_order() {
        for (i, n) in MONTHLY_NORMALS.iter().enumerate() {
            assert_eq!(usize::from(n.month), i + 1);
        }
    }

    #[test]
    fn known_values() {
        assert!((temperature(6) - 32.0).abs() < f64::EPSILON);
        assert!((temperature(12) - 24.95).abs() < f64::EPSILON);
        assert!((humidity(8) - 87.0).abs() < f64::EPSILON);
        assert!((humidity(5) - 26.0).abs() < f64::EPSILON);
    }

    #[test]
    fn unknown_month_falls_back_to_defaults() {
        assert!((temperature(0) - DEFAULT_TEMPERATURE).abs() < f64::EPSILON);
        assert!((humidity(13) - DEFAULT_HUMIDITY).abs() < f64::EPSILON);
    }
}
