//! Historical training data loading.

use std::io::Read;
use std::path::Path;

use power_forecast_features_models::FeatureVector;
use serde::Deserialize;

use crate::ModelError;

/// One row of the historical climate/population/consumption dataset.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TrainingRow {
    /// Calendar year.
    pub year: i32,
    /// Month of the year (1-12).
    pub month: u8,
    /// Observed mean temperature.
    pub temperature: f64,
    /// Observed mean relative humidity.
    pub humidity: f64,
    /// Population estimate.
    pub population: u32,
    /// Observed electricity consumption in MWh.
    #[serde(rename = "Electricity_Consumption_MWh")]
    pub consumption_mwh: f64,
}

impl TrainingRow {
    /// The model inputs of this row.
    #[must_use]
    pub const fn features(&self) -> FeatureVector {
        FeatureVector {
            year: self.year,
            month: self.month,
            temperature: self.temperature,
            humidity: self.humidity,
            population: self.population,
        }
    }
}

/// Reads training rows from the CSV file at `path`.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or its header cannot be
/// read.
pub fn read_csv(path: &Path) -> Result<Vec<TrainingRow>, ModelError> {
    let file = std::fs::File::open(path).map_err(|e| ModelError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    read_csv_from(file)
}

/// Reads training rows from any CSV source with a header row.
///
/// Columns other than the ones in [`TrainingRow`] are ignored. Malformed rows
/// are skipped and logged.
///
/// # Errors
///
/// Returns an error if the header row cannot be read.
pub fn read_csv_from(reader: impl Read) -> Result<Vec<TrainingRow>, ModelError> {
    let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    csv_reader.headers()?;

    let mut rows = Vec::new();
    let mut skipped = 0u64;
    for result in csv_reader.deserialize::<TrainingRow>() {
        match result {
            Ok(row) => rows.push(row),
            Err(e) => {
                log::warn!("Skipping malformed training row: {e}");
                skipped += 1;
            }
        }
    }

    log::info!("Read {} training rows ({skipped} skipped)", rows.len());
    Ok(rows)
}
