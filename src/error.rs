use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

// ---------------------------------------------------------------------------
// Startup: loading the player table
// ---------------------------------------------------------------------------

/// Failure to turn the data file into a [`Dataset`](crate::data::model::Dataset).
/// Always fatal: without a dataset there is no page to serve.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("parquet error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),
    #[error("arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),
    #[error("missing column '{0}'")]
    MissingColumn(String),
    #[error("row {row}, column '{column}': {reason}")]
    InvalidValue {
        row: usize,
        column: String,
        reason: String,
    },
    #[error("unsupported file extension: .{0}")]
    UnsupportedFormat(String),
}

impl LoadError {
    pub(crate) fn invalid(row: usize, column: &str, reason: impl Into<String>) -> Self {
        LoadError::InvalidValue {
            row,
            column: column.to_string(),
            reason: reason.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Request time
// ---------------------------------------------------------------------------

/// A statistic name outside the six the variable selector offers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown statistic field '{0}'")]
pub struct InvalidFieldError(pub String);

/// plotters failed to draw the chart SVG.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("chart drawing failed: {0}")]
pub struct PlotError(pub String);

#[derive(Debug, Error)]
pub enum DashboardError {
    #[error(transparent)]
    InvalidField(#[from] InvalidFieldError),
    #[error(transparent)]
    Plot(#[from] PlotError),
}

impl IntoResponse for DashboardError {
    fn into_response(self) -> Response {
        let status = match self {
            DashboardError::InvalidField(_) => StatusCode::BAD_REQUEST,
            DashboardError::Plot(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let message = self.to_string();
        log::error!("request error: {message}");
        (
            status,
            Json(serde_json::json!({ "error": message })),
        )
            .into_response()
    }
}
