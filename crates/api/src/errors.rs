use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use g53_domain::DomainError;
use serde::Serialize;

#[derive(Serialize, Debug)]
pub struct ErrorBody {
    pub error: String,
}

/// Domain error carried out of a handler.
#[derive(Debug)]
pub struct ApiError(pub DomainError);

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self.0 {
            DomainError::NotFound(_) | DomainError::Expired(_) => StatusCode::NOT_FOUND,
            DomainError::InvalidArgument(_)
            | DomainError::InvalidRecordType(_)
            | DomainError::InvalidDomainName(_)
            | DomainError::PositiveSizeRequired => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<DomainError> for ApiError {
    fn from(e: DomainError) -> Self {
        Self(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        (
            status,
            Json(ErrorBody {
                error: self.0.to_string(),
            }),
        )
            .into_response()
    }
}
