use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use optifolio_core::AnalyticsError;
use optifolio_market_data::MarketDataError;
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    Analytics(#[from] AnalyticsError),
    #[error("{0}")]
    MarketData(#[from] MarketDataError),
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    Internal(#[from] anyhow::Error),
}

#[derive(Serialize)]
struct ErrorBody {
    code: u16,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::MarketData(e) = &self {
            if e.is_external() {
                tracing::warn!("Upstream market data failure: {}", e);
            }
        }
        let (status, msg) = match &self {
            ApiError::Analytics(e) => match e {
                AnalyticsError::InsufficientAssets { .. } | AnalyticsError::InvalidWeights(_) => {
                    (StatusCode::BAD_REQUEST, e.to_string())
                }
                AnalyticsError::InsufficientHistory { .. }
                | AnalyticsError::OptimizationFailed(_)
                | AnalyticsError::DegenerateSharpe => {
                    (StatusCode::UNPROCESSABLE_ENTITY, e.to_string())
                }
            },
            ApiError::MarketData(e) => match e {
                MarketDataError::SymbolNotFound(_) => (StatusCode::NOT_FOUND, e.to_string()),
                MarketDataError::NoDataForRange => {
                    (StatusCode::UNPROCESSABLE_ENTITY, e.to_string())
                }
                MarketDataError::Timeout { .. } => (StatusCode::GATEWAY_TIMEOUT, e.to_string()),
                MarketDataError::Authentication { .. }
                | MarketDataError::Unavailable { .. }
                | MarketDataError::ValidationFailed { .. }
                | MarketDataError::Network(_) => (StatusCode::BAD_GATEWAY, e.to_string()),
            },
            ApiError::BadRequest(reason) => (StatusCode::BAD_REQUEST, reason.clone()),
            ApiError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()),
        };
        let body = Json(ErrorBody {
            code: status.as_u16(),
            message: msg,
        });
        (status, body).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
