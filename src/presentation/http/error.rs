use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::application::use_cases::products::create_product::CreateProductError;
use crate::application::use_cases::products::delete_product::DeleteProductError;
use crate::application::use_cases::products::list_products::ListProductsError;

/// Body of every failed request.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ErrorBody {
            error: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!(error = %rejection, "request_body_rejected");
        ApiError::new(StatusCode::BAD_REQUEST, rejection.body_text())
    }
}

impl From<ListProductsError> for ApiError {
    fn from(err: ListProductsError) -> Self {
        tracing::error!(error = ?err, "list_products_failed");
        ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
    }
}

impl From<CreateProductError> for ApiError {
    fn from(err: CreateProductError) -> Self {
        let status = match &err {
            CreateProductError::MissingField(field) => {
                tracing::debug!(%field, "create_product_missing_field");
                StatusCode::BAD_REQUEST
            }
            CreateProductError::InvalidFormat(..)
            | CreateProductError::UploadFailed(..)
            | CreateProductError::StorageUnavailable(_) => {
                tracing::error!(error = ?err, "create_product_failed");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        ApiError::new(status, err.to_string())
    }
}

impl From<DeleteProductError> for ApiError {
    fn from(err: DeleteProductError) -> Self {
        let status = match &err {
            DeleteProductError::NotFound => StatusCode::NOT_FOUND,
            DeleteProductError::StorageUnavailable(_) => {
                tracing::error!(error = ?err, "delete_product_failed");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        ApiError::new(status, err.to_string())
    }
}
