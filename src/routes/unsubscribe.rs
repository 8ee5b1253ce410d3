use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError, web};
use anyhow::Context;
use sqlx::PgPool;

use crate::domain::SubscriberEmail;
use crate::repository::lists::find_list_by_slug;
use crate::repository::subscribers::{
    find_by_list_and_email, store_subscription_flag, unsubscribe_everywhere,
};

use super::helpers::error_chain_fmt;

#[derive(serde::Deserialize)]
pub struct FormData {
    pub email: String,
}

#[derive(thiserror::Error)]
pub enum UnsubscribeError {
    #[error("{0}")]
    ValidationError(String),
    #[error("There is no newsletter list with the requested slug.")]
    UnknownList,
    #[error("{0} has no subscription to unsubscribe.")]
    UnknownSubscriber(String),
    #[error(transparent)]
    UnexpectedError(#[from] anyhow::Error),
}

impl std::fmt::Debug for UnsubscribeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl ResponseError for UnsubscribeError {
    fn status_code(&self) -> StatusCode {
        match self {
            UnsubscribeError::ValidationError(_) => StatusCode::BAD_REQUEST,
            UnsubscribeError::UnknownList => StatusCode::NOT_FOUND,
            UnsubscribeError::UnknownSubscriber(_) => StatusCode::NOT_FOUND,
            UnsubscribeError::UnexpectedError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Unsubscribes the email from one list. Idempotent: unsubscribing an already
/// unsubscribed email succeeds again.
#[tracing::instrument(
    name = "Unsubscribing from a newsletter list",
    skip(form, db_pool),
    fields(subscriber_email = %form.email)
)]
pub async fn unsubscribe(
    path: web::Path<String>,
    form: web::Form<FormData>,
    db_pool: web::Data<PgPool>,
) -> Result<HttpResponse, UnsubscribeError> {
    let email =
        SubscriberEmail::parse(form.0.email).map_err(UnsubscribeError::ValidationError)?;

    let list = find_list_by_slug(&db_pool, &path.into_inner())
        .await
        .context("Failed to look up the newsletter list.")?
        .ok_or(UnsubscribeError::UnknownList)?;

    let mut subscriber = find_by_list_and_email(&db_pool, list.id, &email)
        .await
        .context("Failed to look up the subscriber.")?
        .ok_or_else(|| UnsubscribeError::UnknownSubscriber(email.as_ref().to_owned()))?;

    subscriber.unsubscribe();
    store_subscription_flag(&db_pool, &subscriber)
        .await
        .context("Failed to persist the unsubscription.")?;

    Ok(HttpResponse::Ok().finish())
}

/// Unsubscribes the email from every list it appears in.
#[tracing::instrument(
    name = "Unsubscribing from all newsletter lists",
    skip(form, db_pool),
    fields(subscriber_email = %form.email)
)]
pub async fn unsubscribe_all(
    form: web::Form<FormData>,
    db_pool: web::Data<PgPool>,
) -> Result<HttpResponse, UnsubscribeError> {
    let email =
        SubscriberEmail::parse(form.0.email).map_err(UnsubscribeError::ValidationError)?;

    let affected = unsubscribe_everywhere(&db_pool, &email)
        .await
        .context("Failed to persist the unsubscriptions.")?;

    if affected == 0 {
        return Err(UnsubscribeError::UnknownSubscriber(
            email.as_ref().to_owned(),
        ));
    }

    Ok(HttpResponse::Ok().finish())
}
