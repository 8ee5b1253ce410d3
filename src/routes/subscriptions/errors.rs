use actix_web::ResponseError;
use actix_web::http::StatusCode;

use crate::routes::helpers::error_chain_fmt;

#[derive(thiserror::Error)]
pub enum SubscribeError {
    #[error("{0}")]
    ValidationError(String),
    #[error("There is no newsletter with the requested id.")]
    UnknownNewsletter,
    #[error("{0} is already subscribed to this list.")]
    AlreadySubscribed(String),
    #[error(transparent)]
    UnexpectedError(#[from] anyhow::Error),
}

impl std::fmt::Debug for SubscribeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl ResponseError for SubscribeError {
    fn status_code(&self) -> StatusCode {
        match self {
            SubscribeError::ValidationError(_) => StatusCode::BAD_REQUEST,
            SubscribeError::UnknownNewsletter => StatusCode::NOT_FOUND,
            SubscribeError::AlreadySubscribed(_) => StatusCode::CONFLICT,
            SubscribeError::UnexpectedError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
