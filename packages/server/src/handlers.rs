//! HTTP handler functions for the forecast API.

use actix_files::NamedFile;
use actix_web::{HttpResponse, web};
use power_forecast_predict::{InvalidInput, PredictError};
use power_forecast_server_models::{ApiError, ApiHealth, ApiPredictResponse, ApiPrediction};

use crate::AppState;

/// `GET /api/health`
pub async fn health(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(ApiHealth {
        healthy: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
        model_training_rows: state.model_training_rows,
    })
}

/// `POST /predict`
///
/// Accepts `{"year": ..., "month": ...}` and returns predicted consumption
/// for the twelve months from five months before to six months after the
/// requested month.
pub async fn predict(state: web::Data<AppState>, body: web::Bytes) -> HttpResponse {
    let payload: serde_json::Value = match serde_json::from_slice(&body) {
        Ok(payload) => payload,
        Err(e) => {
            log::debug!("Rejecting unparsable prediction body: {e}");
            return HttpResponse::BadRequest()
                .json(ApiError::new(InvalidInput::Malformed.to_string()));
        }
    };

    match power_forecast_predict::predict(state.model.as_ref(), &payload) {
        Ok(predictions) => {
            let data = predictions
                .into_iter()
                .map(|p| ApiPrediction::new(p.month, p.value))
                .collect();
            HttpResponse::Ok().json(ApiPredictResponse::ok(data))
        }
        Err(PredictError::InvalidInput(e)) => {
            log::debug!("Rejecting prediction request {payload}: {e}");
            HttpResponse::BadRequest().json(ApiError::new(e.to_string()))
        }
        Err(PredictError::Model(e)) => {
            log::error!("Prediction failed: {e}");
            HttpResponse::InternalServerError().json(ApiError::new("Prediction failed"))
        }
    }
}

/// `GET /about`
pub async fn about(state: web::Data<AppState>) -> actix_web::Result<NamedFile> {
    Ok(NamedFile::open_async(state.static_dir.join("about.html")).await?)
}
