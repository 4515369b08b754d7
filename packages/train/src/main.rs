#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! CLI for fitting the consumption model on historical data.
//!
//! Reads the historical CSV, fits a random forest on a training split,
//! reports holdout error, and writes the model artifact the server loads.

use std::path::PathBuf;

use clap::Parser;
use power_forecast_model::{
    DEFAULT_ARTIFACT_PATH, Evaluation, ModelError, TrainingParams, dataset, training,
};

#[derive(Parser)]
#[command(name = "power_forecast_train", about = "Consumption model training tool")]
struct Cli {
    /// Historical climate, population and consumption CSV
    #[arg(long, default_value = "bhopal_climate_population_electricity.csv")]
    data: PathBuf,
    /// Where to write the trained model
    #[arg(long, default_value = DEFAULT_ARTIFACT_PATH)]
    output: PathBuf,
    /// Number of trees in the forest
    #[arg(long, default_value_t = 100)]
    trees: usize,
    /// Random seed for the train/test split and bootstrap sampling
    #[arg(long, default_value_t = 42)]
    seed: u64,
    /// Fraction of rows held out for evaluation
    #[arg(long, default_value_t = 0.2)]
    test_size: f32,
    /// Refit on every row after evaluation instead of saving the
    /// training-split model
    #[arg(long)]
    full: bool,
}

impl Cli {
    const fn params(&self) -> TrainingParams {
        TrainingParams {
            n_trees: self.trees,
            seed: self.seed,
            test_size: self.test_size,
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();
    let cli = Cli::parse();

    let evaluation = run(&cli)?;
    println!("Model MAE: {:.2}", evaluation.mae);
    println!("Model RMSE: {:.2}", evaluation.rmse);

    Ok(())
}

/// Trains, evaluates and saves the model described by `cli`.
fn run(cli: &Cli) -> Result<Evaluation, ModelError> {
    let params = cli.params();

    log::info!("Reading training data from {}...", cli.data.display());
    let rows = dataset::read_csv(&cli.data)?;

    let (model, evaluation) = training::train_and_evaluate(&rows, &params)?;

    let model = if cli.full {
        log::info!("Refitting on all {} rows...", rows.len());
        training::fit(&rows, &params)?.with_evaluation(evaluation)
    } else {
        model
    };

    model.save(&cli.output)?;
    Ok(evaluation)
}
