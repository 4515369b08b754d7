#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Feature synthesis for the consumption model.
//!
//! The model is trained on observed climate and population data, but
//! predictions are requested for arbitrary months. This crate fills in the
//! features for any [`CalendarMonth`] from the climatology table
//! ([`climatology`]) and the population curve ([`population`]).

pub mod climatology;
pub mod population;

use power_forecast_features_models::{CalendarMonth, FeatureVector};

/// Builds the model input row for `month`.
#[must_use]
pub fn synthesize(month: CalendarMonth) -> FeatureVector {
    let features = FeatureVector {
        year: month.year(),
        month: month.month(),
        temperature: climatology::temperature(month.month()),
        humidity: climatology::humidity(month.month()),
        population: population::population(month.year()),
    };
    log::trace!("synthesize: {month} -> {features:?}");
    features
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn synthesizes_all_fields() {
        let month = CalendarMonth::new(2024, 6).unwrap();
        assert_eq!(
            synthesize(month),
            FeatureVector {
                year: 2024,
                month: 6,
                temperature: 32.0,
                humidity: 40.0,
                population: 2_305_075,
            }
        );
    }

    #[test]
    fn population_follows_year_not_month() {
        let jan = synthesize(CalendarMonth::new(2011, 1).unwrap());
        let dec = synthesize(CalendarMonth::new(2011, 12).unwrap());
        assert_eq!(jan.population, dec.population);
        assert_eq!(jan.population, population::CENSUS_2011);
    }

    #[test]
    fn is_deterministic() {
        let month = CalendarMonth::new(1999, 3).unwrap();
        assert_eq!(synthesize(month), synthesize(month));
    }
}
