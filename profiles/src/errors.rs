use crate::validation::ValidationErrors;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use colored::Colorize;
use log::error;
use serde_json::json;
use std::error::Error;
use std::fmt;

#[derive(Debug)]
pub enum ProfilesError {
    // 400s
    ValidationError(ValidationErrors),
    InvalidPath,
    // 502
    BlobStoreError(String),
    RecordStoreError(String),
    // 500
    InternalServerError(String),
}

impl fmt::Display for ProfilesError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProfilesError::ValidationError(e) => write!(f, "Validation Error: {}", e),
            ProfilesError::InvalidPath => write!(f, "invalid path"),
            ProfilesError::BlobStoreError(e) => write!(f, "Blob Store Error: {}", e),
            ProfilesError::RecordStoreError(e) => write!(f, "Record Store Error: {}", e),
            ProfilesError::InternalServerError(e) => write!(f, "InternalServerError: \n{}", e),
        }
    }
}

impl Error for ProfilesError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ProfilesError::ValidationError(_) => None,
            ProfilesError::InvalidPath => None,
            ProfilesError::BlobStoreError(_) => None,
            ProfilesError::RecordStoreError(_) => None,
            ProfilesError::InternalServerError(_) => None,
        }
    }
}

impl ResponseError for ProfilesError {
    fn status_code(&self) -> StatusCode {
        match self {
            ProfilesError::ValidationError(_) => StatusCode::BAD_REQUEST,
            ProfilesError::InvalidPath => StatusCode::NOT_FOUND,
            ProfilesError::BlobStoreError(_) | ProfilesError::RecordStoreError(_) => StatusCode::BAD_GATEWAY,
            ProfilesError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            ProfilesError::ValidationError(e) => HttpResponse::BadRequest().json(json!({
                "status": 400,
                "message": e
            })),
            ProfilesError::InvalidPath => HttpResponse::NotFound().json(json!({
                "status": 404,
                "message": self.to_string()
            })),
            ProfilesError::BlobStoreError(e) | ProfilesError::RecordStoreError(e) => {
                error!("{}", self.to_string().red());

                HttpResponse::BadGateway().json(json!({
                    "status": 502,
                    "message": e
                }))
            }
            ProfilesError::InternalServerError(_) => {
                error!("Internal Server Error: {}", self.to_string().red());

                HttpResponse::InternalServerError().json(json!({
                    "status": 500,
                    "message": "internal server error"
                }))
            }
        }
    }
}

impl From<ValidationErrors> for ProfilesError {
    fn from(e: ValidationErrors) -> Self {
        ProfilesError::ValidationError(e)
    }
}

impl<T> From<std::sync::PoisonError<T>> for ProfilesError {
    fn from(e: std::sync::PoisonError<T>) -> Self {
        ProfilesError::InternalServerError(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::{Issue, IssueCode};
    use actix_web::body::to_bytes;

    async fn body_json(err: ProfilesError) -> (StatusCode, serde_json::Value) {
        let res = err.error_response();
        let status = res.status();
        let bytes = to_bytes(res.into_body()).await.expect("body");

        (status, serde_json::from_slice(&bytes).expect("json body"))
    }

    #[actix_web::test]
    async fn validation_error_carries_report() {
        let report = ValidationErrors::from(vec![Issue::field("username", IssueCode::TooSmall, "Username is too short")]);
        let (status, body) = body_json(ProfilesError::from(report)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"]["issues"][0]["path"][0], "username");
        assert_eq!(body["message"]["issues"][0]["code"], "too_small");
    }

    #[actix_web::test]
    async fn store_error_exposes_message() {
        let (status, body) = body_json(ProfilesError::BlobStoreError("bucket unreachable".to_string())).await;

        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["message"], "bucket unreachable");
    }

    #[actix_web::test]
    async fn internal_error_hides_detail() {
        let (status, body) = body_json(ProfilesError::InternalServerError("secret detail".to_string())).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["message"], "internal server error");
    }
}
