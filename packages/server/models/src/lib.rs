#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! API response types for the power forecast server.
//!
//! The prediction request is deliberately not typed here: it is accepted as
//! raw JSON and validated by `power_forecast_predict`, so that lenient field
//! coercion and its error messages live in one place.

use power_forecast_features_models::CalendarMonth;
use serde::{Deserialize, Serialize};

/// Predicted consumption for one month as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiPrediction {
    /// Month label, `YYYY-MM`.
    pub month: String,
    /// Predicted consumption in MWh, rounded to 2 decimal places.
    pub value: f64,
}

impl ApiPrediction {
    /// Builds the API form of a monthly prediction.
    #[must_use]
    pub fn new(month: CalendarMonth, value: f64) -> Self {
        Self {
            month: month.label(),
            value,
        }
    }
}

/// Successful prediction response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiPredictResponse {
    /// Always `true`; failures use [`ApiError`] instead.
    pub success: bool,
    /// The twelve monthly predictions, oldest first.
    pub data: Vec<ApiPrediction>,
}

impl ApiPredictResponse {
    /// Wraps a prediction window.
    #[must_use]
    pub const fn ok(data: Vec<ApiPrediction>) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Error response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    /// Human-readable error message.
    pub error: String,
}

impl ApiError {
    /// Creates an error body with the given message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}

/// Health check response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiHealth {
    /// Whether the service is healthy.
    pub healthy: bool,
    /// Service version.
    pub version: String,
    /// Rows the loaded model was trained on.
    pub model_training_rows: usize,
}
