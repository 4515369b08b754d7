#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Prediction window orchestration.
//!
//! Turns a raw `{"year", "month"}` payload into twelve monthly consumption
//! predictions: five months before the requested month, the month itself,
//! and six months after. Each month's features are synthesized from the
//! climatology and population tables and passed to the model one row at a
//! time.

pub mod anchor;
pub mod window;

pub use anchor::AnchorMonth;

use power_forecast_features::synthesize;
use power_forecast_features_models::CalendarMonth;
use power_forecast_model::{ModelError, Regressor};
use serde_json::Value;

/// Why a request payload was rejected.
///
/// The display strings are returned to API clients verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum InvalidInput {
    /// A field is missing or not integer-coercible, or the payload is not an
    /// object.
    #[error("Invalid input data")]
    Malformed,

    /// The month coerced but is outside 1-12.
    #[error("Month must be between 1 and 12")]
    MonthOutOfRange {
        /// The rejected month.
        month: i64,
    },
}

/// Errors that abort a prediction request.
#[derive(Debug, thiserror::Error)]
pub enum PredictError {
    /// The request payload failed validation; nothing was predicted.
    #[error(transparent)]
    InvalidInput(#[from] InvalidInput),

    /// The model failed on a well-formed feature row.
    #[error("Model error: {0}")]
    Model(#[from] ModelError),
}

/// Predicted consumption for one month.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Prediction {
    /// The predicted month.
    pub month: CalendarMonth,
    /// Predicted consumption in MWh, rounded to 2 decimal places.
    pub value: f64,
}

/// Validates `payload` and predicts the window around the requested month.
///
/// # Errors
///
/// Returns [`PredictError::InvalidInput`] if the payload fails validation,
/// or [`PredictError::Model`] if the model fails. No partial window is ever
/// returned.
pub fn predict(model: &dyn Regressor, payload: &Value) -> Result<Vec<Prediction>, PredictError> {
    let anchor = AnchorMonth::from_payload(payload)?;
    Ok(predict_window(model, anchor)?)
}

/// Predicts the window around an already-validated anchor.
///
/// # Errors
///
/// Returns [`ModelError`] if the model fails for any month.
pub fn predict_window(
    model: &dyn Regressor,
    anchor: AnchorMonth,
) -> Result<Vec<Prediction>, ModelError> {
    log::debug!("Predicting window around {}", anchor.month());

    window::window_months(anchor.month())
        .into_iter()
        .map(|month| -> Result<Prediction, ModelError> {
            let raw = model.predict(&synthesize(month))?;
            Ok(Prediction {
                month,
                value: round_to_cents(raw),
            })
        })
        .collect()
}

/// Rounds to 2 decimal places, halves away from zero.
fn round_to_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use power_forecast_features_models::FeatureVector;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Deterministic stand-in for the forest: warmer months and larger
    /// populations consume more.
    struct StubModel {
        calls: AtomicUsize,
    }

    impl StubModel {
        const fn new() -> Self {
            Self {
                calls: AtomicUsize::new(0),
            }
        }
    }

    impl Regressor for StubModel {
        fn predict(&self, features: &FeatureVector) -> Result<f64, ModelError> {
            self.calls.fetch_add(1, Ordering::Relaxed);
            Ok(features.temperature.mul_add(12.345_6, f64::from(features.population) / 10_000.0))
        }
    }

    struct FailingModel;

    impl Regressor for FailingModel {
        fn predict(&self, _features: &FeatureVector) -> Result<f64, ModelError> {
            Err(ModelError::Predict("boom".to_string()))
        }
    }

    fn labels(predictions: &[Prediction]) -> Vec<String> {
        predictions.iter().map(|p| p.month.label()).collect()
    }

    #[test]
    fn predicts_twelve_months_around_anchor() {
        let model = StubModel::new();
        let predictions = predict(&model, &json!({"year": 2024, "month": 6})).unwrap();

        assert_eq!(
            labels(&predictions),
            [
                "2024-01", "2024-02", "2024-03", "2024-04", "2024-05", "2024-06", "2024-07",
                "2024-08", "2024-09", "2024-10", "2024-11", "2024-12",
            ]
        );
        assert_eq!(predictions[5].month.label(), "2024-06");
        assert_eq!(model.calls.load(Ordering::Relaxed), window::WINDOW_LEN);
    }

    #[test]
    fn window_crosses_into_previous_year() {
        let predictions = predict(&StubModel::new(), &json!({"year": 2024, "month": 2})).unwrap();
        assert_eq!(predictions[0].month.label(), "2023-09");
        assert_eq!(predictions[11].month.label(), "2024-08");
    }

    #[test]
    fn window_is_strictly_increasing_without_gaps() {
        for month in 1..=12 {
            let predictions =
                predict(&StubModel::new(), &json!({"year": 2011, "month": month})).unwrap();
            assert_eq!(predictions.len(), window::WINDOW_LEN);
            for pair in predictions.windows(2) {
                assert_eq!(pair[0].month.offset(1), pair[1].month);
            }
        }
    }

    #[test]
    fn values_are_rounded_to_two_decimals() {
        let predictions = predict(&StubModel::new(), &json!({"year": 2024, "month": 6})).unwrap();
        for p in &predictions {
            let cents = p.value * 100.0;
            assert!((cents - cents.round()).abs() < 1e-6, "{} not rounded", p.value);
            assert!(p.value >= 0.0);
        }
    }

    #[test]
    fn model_sees_synthesized_features() {
        struct Recording(std::sync::Mutex<Vec<FeatureVector>>);

        impl Regressor for Recording {
            fn predict(&self, features: &FeatureVector) -> Result<f64, ModelError> {
                self.0.lock().unwrap().push(*features);
                Ok(0.0)
            }
        }

        let model = Recording(std::sync::Mutex::new(Vec::new()));
        predict(&model, &json!({"year": 2026, "month": 1})).unwrap();

        let seen = model.0.into_inner().unwrap();
        assert_eq!(seen[0].year, 2025);
        assert_eq!(seen[0].month, 8);
        assert!((seen[0].humidity - 87.0).abs() < f64::EPSILON);
        assert!(seen.iter().all(|f| f.population == 2_300_000));
    }

    #[test]
    fn invalid_month_never_reaches_the_model() {
        let model = StubModel::new();
        let err = predict(&model, &json!({"year": 2024, "month": 13})).unwrap_err();

        assert!(matches!(
            err,
            PredictError::InvalidInput(InvalidInput::MonthOutOfRange { month: 13 })
        ));
        assert_eq!(err.to_string(), "Month must be between 1 and 12");
        assert_eq!(model.calls.load(Ordering::Relaxed), 0);
    }

    #[test]
    fn malformed_payload_message() {
        let err = predict(&StubModel::new(), &json!({"year": "abc", "month": 6})).unwrap_err();
        assert_eq!(err.to_string(), "Invalid input data");
    }

    #[test]
    fn model_failure_aborts_the_whole_window() {
        let err = predict(&FailingModel, &json!({"year": 2024, "month": 6})).unwrap_err();
        assert!(matches!(err, PredictError::Model(_)));
    }

    #[test]
    fn identical_requests_are_identical() {
        let model = StubModel::new();
        let payload = json!({"year": 2019, "month": 10});
        assert_eq!(
            predict(&model, &payload).unwrap(),
            predict(&model, &payload).unwrap()
        );
    }

    #[test]
    fn rounding_goes_half_away_from_zero() {
        assert!((round_to_cents(1.234_9) - 1.23).abs() < f64::EPSILON);
        assert!((round_to_cents(1.235_1) - 1.24).abs() < f64::EPSILON);
        assert!((round_to_cents(-1.235_1) + 1.24).abs() < f64::EPSILON);
        assert!((round_to_cents(1_234.0) - 1_234.0).abs() < f64::EPSILON);
    }
}
