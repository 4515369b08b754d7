//! Fitting the forest and measuring holdout error.

use serde::{Deserialize, Serialize};
use smartcore::ensemble::random_forest_regressor::{
    RandomForestRegressor, RandomForestRegressorParameters,
};
use smartcore::linalg::basic::matrix::DenseMatrix;
use smartcore::model_selection::train_test_split;

use crate::artifact::Forest;
use crate::{ConsumptionModel, ModelError, TrainingRow};

/// Hyperparameters for fitting and evaluating the forest.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrainingParams {
    /// Number of trees in the forest.
    pub n_trees: usize,
    /// Seed for bootstrap sampling and the train/test shuffle.
    pub seed: u64,
    /// Fraction of rows held out for evaluation, in `(0, 1)`.
    pub test_size: f32,
}

impl Default for TrainingParams {
    fn default() -> Self {
        Self {
            n_trees: 100,
            seed: 42,
            test_size: 0.2,
        }
    }
}

/// Holdout error of a fitted model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Evaluation {
    /// Mean absolute error, in MWh.
    pub mae: f64,
    /// Root mean squared error, in MWh.
    pub rmse: f64,
    /// Number of held-out rows the metrics were computed on.
    pub test_rows: usize,
}

/// Fits a model on every row in `rows`.
///
/// # Errors
///
/// Returns [`ModelError::NotEnoughRows`] if `rows` is empty, or
/// [`ModelError::Fit`] if the forest cannot be fitted.
pub fn fit(rows: &[TrainingRow], params: &TrainingParams) -> Result<ConsumptionModel, ModelError> {
    if rows.is_empty() {
        return Err(ModelError::NotEnoughRows {
            rows: 0,
            required: 1,
        });
    }

    let (x, y) = to_matrix(rows);
    let forest = fit_forest(&x, &y, params)?;
    log::info!("Fitted {} trees on {} rows", params.n_trees, rows.len());

    Ok(ConsumptionModel::new(forest, rows.len()))
}

/// Splits `rows` into train and test sets, fits on the training portion and
/// reports error on the held-out portion.
///
/// The returned model also carries the evaluation in its artifact.
///
/// # Errors
///
/// Returns [`ModelError::NotEnoughRows`] if either split would be empty, or
/// [`ModelError::Fit`] / [`ModelError::Predict`] if smartcore fails.
pub fn train_and_evaluate(
    rows: &[TrainingRow],
    params: &TrainingParams,
) -> Result<(ConsumptionModel, Evaluation), ModelError> {
    let test_rows = holdout_size(rows.len(), params.test_size);
    if test_rows == 0 || test_rows >= rows.len() {
        return Err(ModelError::NotEnoughRows {
            rows: rows.len(),
            required: min_rows(params.test_size),
        });
    }

    let (x, y) = to_matrix(rows);
    let (x_train, x_test, y_train, y_test) =
        train_test_split(&x, &y, params.test_size, true, Some(params.seed));

    let forest = fit_forest(&x_train, &y_train, params)?;
    let model = ConsumptionModel::new(forest, y_train.len());

    let predicted = model.predict_matrix(&x_test)?;
    let evaluation = metrics(&y_test, &predicted);
    log::info!(
        "Evaluated on {} held-out rows: MAE {:.2}, RMSE {:.2}",
        evaluation.test_rows,
        evaluation.mae,
        evaluation.rmse
    );

    Ok((model.with_evaluation(evaluation), evaluation))
}

#[allow(clippy::ptr_arg)]
fn fit_forest(
    x: &DenseMatrix<f64>,
    y: &Vec<f64>,
    params: &TrainingParams,
) -> Result<Forest, ModelError> {
    let parameters = RandomForestRegressorParameters::default()
        .with_n_trees(params.n_trees)
        .with_seed(params.seed);

    RandomForestRegressor::fit(x, y, parameters).map_err(|e| ModelError::Fit(e.to_string()))
}

fn to_matrix(rows: &[TrainingRow]) -> (DenseMatrix<f64>, Vec<f64>) {
    let features: Vec<Vec<f64>> = rows.iter().map(|r| r.features().to_row().to_vec()).collect();
    let targets = rows.iter().map(|r| r.consumption_mwh).collect();
    (DenseMatrix::from_2d_vec(&features), targets)
}

#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
fn holdout_size(rows: usize, test_size: f32) -> usize {
    if !(test_size > 0.0 && test_size < 1.0) {
        return 0;
    }
    (rows as f32 * test_size) as usize
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn min_rows(test_size: f32) -> usize {
    if test_size > 0.0 && test_size < 1.0 {
        (1.0 / test_size).ceil() as usize + 1
    } else {
        usize::MAX
    }
}

#[allow(clippy::cast_precision_loss)]
fn metrics(actual: &[f64], predicted: &[f64]) -> Evaluation {
    let n = actual.len().min(predicted.len());
    if n == 0 {
        return Evaluation {
            mae: 0.0,
            rmse: 0.0,
            test_rows: 0,
        };
    }

    let (abs_sum, sq_sum) = actual
        .iter()
        .zip(predicted)
        .fold((0.0, 0.0), |(abs_sum, sq_sum), (a, p)| {
            let err = a - p;
            (abs_sum + err.abs(), err.mul_add(err, sq_sum))
        });

    Evaluation {
        mae: abs_sum / n as f64,
        rmse: (sq_sum / n as f64).sqrt(),
        test_rows: n,
    }
}
