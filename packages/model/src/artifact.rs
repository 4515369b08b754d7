//! The persisted random forest and its feature schema.

use std::path::Path;

use power_forecast_features_models::FeatureVector;
use serde::{Deserialize, Serialize};
use smartcore::ensemble::random_forest_regressor::RandomForestRegressor;
use smartcore::linalg::basic::matrix::DenseMatrix;

use crate::{Evaluation, ModelError, Regressor, expected_schema};

/// The concrete forest type: `f64` features and targets.
pub type Forest = RandomForestRegressor<f64, f64, DenseMatrix<f64>, Vec<f64>>;

/// A fitted consumption model, ready to serve predictions.
///
/// Serialized as `MessagePack` with named fields so the schema and metadata
/// stay readable by other tooling.
#[derive(Serialize, Deserialize)]
pub struct ConsumptionModel {
    schema: Vec<String>,
    training_rows: usize,
    evaluation: Option<Evaluation>,
    forest: Forest,
}

impl ConsumptionModel {
    pub(crate) fn new(forest: Forest, training_rows: usize) -> Self {
        Self {
            schema: expected_schema(),
            training_rows,
            evaluation: None,
            forest,
        }
    }

    /// Feature columns the forest was trained on, in order.
    #[must_use]
    pub fn schema(&self) -> &[String] {
        &self.schema
    }

    /// Number of rows the forest was fitted on.
    #[must_use]
    pub const fn training_rows(&self) -> usize {
        self.training_rows
    }

    /// Holdout metrics recorded at training time, if any.
    #[must_use]
    pub const fn evaluation(&self) -> Option<&Evaluation> {
        self.evaluation.as_ref()
    }

    /// Attaches holdout metrics to the artifact.
    #[must_use]
    pub const fn with_evaluation(mut self, evaluation: Evaluation) -> Self {
        self.evaluation = Some(evaluation);
        self
    }

    /// Writes the model to `path`, creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// Returns an error if encoding fails or the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), ModelError> {
        let io_err = |source| ModelError::Io {
            path: path.display().to_string(),
            source,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }

        let bytes = rmp_serde::to_vec_named(self)?;
        std::fs::write(path, &bytes).map_err(io_err)?;

        log::info!("Saved model to {} ({} bytes)", path.display(), bytes.len());
        Ok(())
    }

    /// Loads a model from `path` and checks its feature schema.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or decoded, or
    /// [`ModelError::SchemaMismatch`] if the artifact was trained on
    /// different columns than [`FeatureVector::COLUMNS`].
    pub fn load(path: &Path) -> Result<Self, ModelError> {
        let bytes = std::fs::read(path).map_err(|e| ModelError::Io {
            path: path.display().to_string(),
            source: e,
        })?;
        Self::from_slice(&bytes)
    }

    /// Decodes a model from serialized bytes and checks its feature schema.
    ///
    /// # Errors
    ///
    /// See [`ConsumptionModel::load`].
    pub fn from_slice(bytes: &[u8]) -> Result<Self, ModelError> {
        let model: Self = rmp_serde::from_slice(bytes)?;
        model.check_schema()?;
        Ok(model)
    }

    fn check_schema(&self) -> Result<(), ModelError> {
        let expected = expected_schema();
        if self.schema != expected {
            return Err(ModelError::SchemaMismatch {
                expected,
                found: self.schema.clone(),
            });
        }
        Ok(())
    }

    pub(crate) fn predict_matrix(&self, x: &DenseMatrix<f64>) -> Result<Vec<f64>, ModelError> {
        self.forest
            .predict(x)
            .map_err(|e| ModelError::Predict(e.to_string()))
    }
}

impl Regressor for ConsumptionModel {
    fn predict(&self, features: &FeatureVector) -> Result<f64, ModelError> {
        let x = DenseMatrix::from_2d_vec(&vec![features.to_row().to_vec()]);
        self.predict_matrix(&x)?
            .first()
            .copied()
            .ok_or_else(|| ModelError::Predict("model returned no prediction".to_string()))
    }

    fn predict_batch(&self, rows: &[FeatureVector]) -> Result<Vec<f64>, ModelError> {
        if rows.is_empty() {
            return Ok(Vec::new());
        }
        let matrix: Vec<Vec<f64>> = rows.iter().map(|r| r.to_row().to_vec()).collect();
        self.predict_matrix(&DenseMatrix::from_2d_vec(&matrix))
    }
}

impl std::fmt::Debug for ConsumptionModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConsumptionModel")
            .field("schema", &self.schema)
            .field("training_rows", &self.training_rows)
            .field("evaluation", &self.evaluation)
            .finish_non_exhaustive()
    }
}
