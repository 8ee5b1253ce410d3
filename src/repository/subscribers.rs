use chrono::Utc;
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::domain::{Language, NewSubscriber, NewsletterSubscriber, SubscriberEmail};

use super::Direction;

const SELECT_SUBSCRIBERS: &str = "SELECT id, newsletter_list_id, user_id, email, lang, \
     is_unsubscribed, subscribed_at FROM newsletter_subscribers";

/// Lazy subscriber query, executed on a terminal call. Language filters are
/// cumulative and combine as a logical OR.
#[derive(Debug, Clone, Default)]
pub struct SubscriberQuery {
    list_id: Option<Uuid>,
    subscribed_only: bool,
    langs: Vec<Language>,
}

impl SubscriberQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn in_list(mut self, list_id: Uuid) -> Self {
        self.list_id = Some(list_id);
        self
    }

    pub fn subscribed(mut self) -> Self {
        self.subscribed_only = true;
        self
    }

    pub fn has_lang(mut self, lang: Language) -> Self {
        self.langs.push(lang);
        self
    }

    pub fn has_langs(mut self, langs: impl IntoIterator<Item = Language>) -> Self {
        self.langs.extend(langs);
        self
    }

    pub async fn fetch_all(self, pool: &PgPool) -> Result<Vec<NewsletterSubscriber>, sqlx::Error> {
        let mut builder = self.build(Direction::Asc);
        builder
            .build_query_as::<NewsletterSubscriber>()
            .fetch_all(pool)
            .await
    }

    pub async fn first(self, pool: &PgPool) -> Result<Option<NewsletterSubscriber>, sqlx::Error> {
        let mut builder = self.build(Direction::Asc);
        builder.push(" LIMIT 1");
        builder
            .build_query_as::<NewsletterSubscriber>()
            .fetch_optional(pool)
            .await
    }

    pub async fn last(self, pool: &PgPool) -> Result<Option<NewsletterSubscriber>, sqlx::Error> {
        let mut builder = self.build(Direction::Desc);
        builder.push(" LIMIT 1");
        builder
            .build_query_as::<NewsletterSubscriber>()
            .fetch_optional(pool)
            .await
    }

    // Subscribers carry no natural sort key, so the primary key orders them.
    fn build(self, direction: Direction) -> QueryBuilder<'static, Postgres> {
        let mut builder = QueryBuilder::new(SELECT_SUBSCRIBERS);
        let mut has_where = false;
        let mut clause = |builder: &mut QueryBuilder<'static, Postgres>| {
            builder.push(if has_where { " AND " } else { " WHERE " });
            has_where = true;
        };

        if let Some(list_id) = self.list_id {
            clause(&mut builder);
            builder.push("newsletter_list_id = ");
            builder.push_bind(list_id);
        }
        if self.subscribed_only {
            clause(&mut builder);
            builder.push("is_unsubscribed = FALSE");
        }
        if !self.langs.is_empty() {
            let langs: Vec<String> = self
                .langs
                .iter()
                .map(|lang| lang.as_ref().to_owned())
                .collect();
            clause(&mut builder);
            builder.push("lang = ANY(");
            builder.push_bind(langs);
            builder.push(")");
        }

        builder.push(format!(" ORDER BY id {}", direction.sql()));
        builder
    }
}

#[tracing::instrument(
    name = "Saving a new subscriber in the database",
    skip(pool, new_subscriber),
    fields(subscriber_email = %new_subscriber.email)
)]
pub async fn insert_subscriber(
    pool: &PgPool,
    list_id: Uuid,
    new_subscriber: &NewSubscriber,
) -> Result<Uuid, sqlx::Error> {
    let id = Uuid::new_v4();
    sqlx::query(
        "INSERT INTO newsletter_subscribers \
         (id, newsletter_list_id, user_id, email, lang, is_unsubscribed, subscribed_at) \
         VALUES ($1, $2, $3, $4, $5, FALSE, $6)",
    )
    .bind(id)
    .bind(list_id)
    .bind(new_subscriber.user_id)
    .bind(new_subscriber.email.as_ref())
    .bind(new_subscriber.lang.as_ref().map(|lang| lang.as_ref()))
    .bind(Utc::now())
    .execute(pool)
    .await?;

    Ok(id)
}

#[tracing::instrument(
    name = "Looking up a subscriber by list and email",
    skip(pool, email),
    fields(subscriber_email = %email)
)]
pub async fn find_by_list_and_email(
    pool: &PgPool,
    list_id: Uuid,
    email: &SubscriberEmail,
) -> Result<Option<NewsletterSubscriber>, sqlx::Error> {
    sqlx::query_as::<_, NewsletterSubscriber>(&format!(
        "{SELECT_SUBSCRIBERS} WHERE newsletter_list_id = $1 AND email = $2"
    ))
    .bind(list_id)
    .bind(email.as_ref())
    .fetch_optional(pool)
    .await
}

/// Partial-field write: persists only `is_unsubscribed`, so a concurrent
/// update to any other column of the same row is not clobbered.
#[tracing::instrument(name = "Storing the subscription flag", skip(pool, subscriber))]
pub async fn store_subscription_flag(
    pool: &PgPool,
    subscriber: &NewsletterSubscriber,
) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE newsletter_subscribers SET is_unsubscribed = $1 WHERE id = $2")
        .bind(subscriber.is_unsubscribed)
        .bind(subscriber.id)
        .execute(pool)
        .await?;

    Ok(())
}

/// Unsubscribes the email from every list it is subscribed to. Returns the
/// number of affected rows.
#[tracing::instrument(
    name = "Unsubscribing an email from all lists",
    skip(pool, email),
    fields(subscriber_email = %email)
)]
pub async fn unsubscribe_everywhere(
    pool: &PgPool,
    email: &SubscriberEmail,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("UPDATE newsletter_subscribers SET is_unsubscribed = TRUE WHERE email = $1")
        .bind(email.as_ref())
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}
