mod errors;

use actix_web::{HttpResponse, web};
use anyhow::Context;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::NewSubscriber;
use crate::repository::newsletters::find_newsletter;
use crate::repository::subscribers::{
    find_by_list_and_email, insert_subscriber, store_subscription_flag,
};

pub use errors::SubscribeError;

#[derive(serde::Deserialize)]
pub struct FormData {
    pub email: String,
    pub lang: Option<String>,
    pub user_id: Option<Uuid>,
}

impl TryFrom<FormData> for NewSubscriber {
    type Error = String;

    fn try_from(form: FormData) -> Result<Self, Self::Error> {
        NewSubscriber::parse(form.email, form.lang, form.user_id)
    }
}

/// Subscribes the email to the list owning this newsletter. One row per
/// (list, email): a previously unsubscribed row is revived, an active one is
/// a conflict.
#[tracing::instrument(
    name = "Adding a new subscriber.",
    skip(form, db_pool),
    fields(subscriber_email = %form.email)
)]
pub async fn subscribe(
    path: web::Path<Uuid>,
    form: web::Form<FormData>,
    db_pool: web::Data<PgPool>,
) -> Result<HttpResponse, SubscribeError> {
    let new_subscriber: NewSubscriber =
        form.0.try_into().map_err(SubscribeError::ValidationError)?;

    let newsletter = find_newsletter(&db_pool, path.into_inner())
        .await
        .context("Failed to look up the newsletter.")?
        .ok_or(SubscribeError::UnknownNewsletter)?;

    let existing = find_by_list_and_email(&db_pool, newsletter.newsletter_list_id, &new_subscriber.email)
        .await
        .context("Failed to look up existing subscriptions.")?;

    match existing {
        Some(subscriber) if subscriber.is_subscribed() => Err(SubscribeError::AlreadySubscribed(
            new_subscriber.email.as_ref().to_owned(),
        )),
        Some(mut subscriber) => {
            subscriber.subscribe();
            store_subscription_flag(&db_pool, &subscriber)
                .await
                .context("Failed to re-activate the subscription.")?;
            Ok(HttpResponse::Ok().finish())
        }
        None => {
            insert_subscriber(&db_pool, newsletter.newsletter_list_id, &new_subscriber)
                .await
                .context("Failed to insert a new subscriber in the database.")?;
            Ok(HttpResponse::Created().finish())
        }
    }
}
