//! Piecewise-linear population estimate for Bhopal.
//!
//! Anchored on the 2001 and 2011 census counts and a 2025 projection. Years
//! before 2001 use the 2001 count and years after 2025 use the projection;
//! there is no extrapolation beyond the known points.

/// Population at the 2001 census.
pub const CENSUS_2001: u32 = 3_326_228;

/// Population at the 2011 census.
pub const CENSUS_2011: u32 = 2_371_061;

/// Projected population for 2025.
pub const PROJECTION_2025: u32 = 2_300_000;

/// Estimates the population for `year`, truncated to a whole number.
#[must_use]
pub fn population(year: i32) -> u32 {
    match year {
        ..=2001 => CENSUS_2001,
        2002..=2011 => interpolate(year, (2001, CENSUS_2001), (2011, CENSUS_2011)),
        2012..=2025 => interpolate(year, (2011, CENSUS_2011), (2025, PROJECTION_2025)),
        _ => PROJECTION_2025,
    }
}

/// Linear interpolation between two `(year, population)` points.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn interpolate(year: i32, (y0, p0): (i32, u32), (y1, p1): (i32, u32)) -> u32 {
    let slope_numerator = f64::from(year - y0) * (f64::from(p1) - f64::from(p0));
    let value = f64::from(p0) + slope_numerator / f64::from(y1 - y0);
    // Always within [min(p0, p1), max(p0, p1)], so the cast cannot wrap.
    value.trunc() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flat_before_first_census() {
        assert_eq!(population(1950), CENSUS_2001);
        assert_eq!(population(2000), CENSUS_2001);
        assert_eq!(population(i32::MIN), CENSUS_2001);
    }

    #[test]
    fn continuous_at_regime_boundaries() {
        assert_eq!(population(2001), 3_326_228);
        assert_eq!(population(2011), 2_371_061);
        assert_eq!(population(2025), 2_300_000);
    }

    #[test]
    fn flat_after_projection() {
        assert_eq!(population(2030), population(2025));
        assert_eq!(population(i32::MAX), PROJECTION_2025);
    }

    #[test]
    fn interpolates_between_censuses() {
        // 3326228 + 5 * -955167 / 10 = 2848644.5
        assert_eq!(population(2006), 2_848_644);
        // 3326228 + 1 * -955167 / 10 = 3230711.3
        assert_eq!(population(2002), 3_230_711);
    }

    #[test]
    fn interpolates_towards_projection() {
        // 2371061 + 13 * -71061 / 14 = 2305075.78...
        assert_eq!(population(2024), 2_305_075);
        // 2371061 + 7 * -71061 / 14 = 2335530.5
        assert_eq!(population(2018), 2_335_530);
    }

    #[test]
    fn never_increases() {
        let mut previous = population(1990);
        for year in 1991..=2040 {
            let current = population(year);
            assert!(current <= previous, "population rose at {year}");
            previous = current;
        }
    }
}
