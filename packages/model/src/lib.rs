#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Electricity consumption regression model.
//!
//! The serving path only sees the [`Regressor`] trait: a pure function from a
//! [`FeatureVector`] to predicted consumption in MWh. [`ConsumptionModel`] is
//! the production implementation, a random forest persisted together with
//! the feature schema it was trained on so that a serving/training mismatch
//! is caught when the artifact is loaded instead of silently skewing
//! predictions.

pub mod artifact;
pub mod dataset;
pub mod training;

pub use artifact::ConsumptionModel;
pub use dataset::TrainingRow;
pub use training::{Evaluation, TrainingParams};

use power_forecast_features_models::FeatureVector;

/// Default location of the trained model artifact.
pub const DEFAULT_ARTIFACT_PATH: &str = "data/model.msgpack";

/// Errors that can occur while training, loading, or invoking the model.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    /// Reading or writing a file failed.
    #[error("I/O error at {path}: {source}")]
    Io {
        /// Path that caused the error.
        path: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The training CSV could not be read.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Serializing the model artifact failed.
    #[error("Failed to encode model: {0}")]
    Encode(#[from] rmp_serde::encode::Error),

    /// The model artifact is not a valid serialized model.
    #[error("Failed to decode model: {0}")]
    Decode(#[from] rmp_serde::decode::Error),

    /// The artifact was trained on different feature columns than the
    /// serving path produces.
    #[error("Feature schema mismatch: expected {expected:?}, found {found:?}")]
    SchemaMismatch {
        /// Columns the serving path produces.
        expected: Vec<String>,
        /// Columns stored in the artifact.
        found: Vec<String>,
    },

    /// Not enough rows to train (and evaluate) the model.
    #[error("Not enough training rows: {rows} (need at least {required})")]
    NotEnoughRows {
        /// Rows available.
        rows: usize,
        /// Rows required.
        required: usize,
    },

    /// Fitting the forest failed.
    #[error("Failed to fit model: {0}")]
    Fit(String),

    /// Running inference failed.
    #[error("Prediction failed: {0}")]
    Predict(String),
}

/// A fitted regressor mapping features to predicted consumption.
///
/// Implementations must be immutable once constructed; the server shares a
/// single instance across all workers.
pub trait Regressor: Send + Sync {
    /// Predicts consumption for a single feature row.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::Predict`] if inference fails.
    fn predict(&self, features: &FeatureVector) -> Result<f64, ModelError>;

    /// Predicts consumption for several rows, preserving order.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::Predict`] if inference fails for any row.
    fn predict_batch(&self, rows: &[FeatureVector]) -> Result<Vec<f64>, ModelError> {
        rows.iter().map(|row| self.predict(row)).collect()
    }
}

/// The feature schema the serving path produces, as owned strings.
#[must_use]
pub fn expected_schema() -> Vec<String> {
    FeatureVector::COLUMNS.iter().map(ToString::to_string).collect()
}
