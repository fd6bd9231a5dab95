use std::collections::BTreeMap;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tracer_core::errors::{DatabaseError, Error as CoreError, ValidationError};

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    Core(#[from] CoreError),
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    Anyhow(#[from] anyhow::Error),
}

#[derive(Serialize)]
struct ErrorBody {
    code: u16,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    errors: Option<BTreeMap<String, Vec<String>>>,
}

const INTERNAL_MESSAGE: &str = "Internal server error";

fn core_response(err: &CoreError) -> (StatusCode, String, Option<BTreeMap<String, Vec<String>>>) {
    match err {
        CoreError::Validation(ValidationError::Fields(fields)) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            "The given data was invalid.".to_string(),
            Some(fields.as_map().clone()),
        ),
        CoreError::Validation(_) => (StatusCode::UNPROCESSABLE_ENTITY, err.to_string(), None),
        CoreError::NotFound(_) | CoreError::Database(DatabaseError::NotFound(_)) => {
            (StatusCode::NOT_FOUND, err.to_string(), None)
        }
        CoreError::ConstraintViolation(_)
        | CoreError::Database(DatabaseError::ForeignKeyViolation(_))
        | CoreError::Database(DatabaseError::UniqueViolation(_)) => {
            (StatusCode::CONFLICT, err.to_string(), None)
        }
        CoreError::FileStore(_) => {
            tracing::error!("File storage failure: {}", err);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "The uploaded file could not be stored".to_string(),
                None,
            )
        }
        CoreError::Database(_) | CoreError::Unexpected(_) => {
            tracing::error!("Request failed: {}", err);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                INTERNAL_MESSAGE.to_string(),
                None,
            )
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message, errors) = match &self {
            ApiError::Core(e) => core_response(e),
            ApiError::BadRequest(reason) => (StatusCode::BAD_REQUEST, reason.clone(), None),
            ApiError::Anyhow(e) => {
                tracing::error!("Request failed: {:#}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    INTERNAL_MESSAGE.to_string(),
                    None,
                )
            }
        };
        let body = Json(ErrorBody {
            code: status.as_u16(),
            message,
            errors,
        });
        (status, body).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
