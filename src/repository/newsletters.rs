use anyhow::Context;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::domain::{ContentRef, Language, Newsletter, NewsletterItem, NewsletterStatus};

use super::Direction;

const SELECT_NEWSLETTERS: &str = "SELECT id, newsletter_list_id, name, published_at, status, \
     headline, cover, languages FROM newsletters";

/// Lazy newsletter query: chained calls only accumulate predicates, SQL is
/// built and executed by the terminal calls (`fetch_all`, `first`, `last`).
#[derive(Debug, Clone, Default)]
pub struct NewsletterQuery {
    list_id: Option<Uuid>,
    status: Option<NewsletterStatus>,
    published_before: Option<DateTime<Utc>>,
    published_after: Option<DateTime<Utc>>,
    lang: Option<Language>,
    order: Option<Direction>,
}

impl NewsletterQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn in_list(mut self, list_id: Uuid) -> Self {
        self.list_id = Some(list_id);
        self
    }

    /// Online newsletters: status `online`, published strictly before `now`,
    /// ordered ascending by publish timestamp.
    pub fn status_online(self, now: DateTime<Utc>) -> Self {
        let mut query = self.published_before(now);
        query.status = Some(NewsletterStatus::Online);
        query.order.get_or_insert(Direction::Asc);
        query
    }

    /// Strict upper bound; repeated calls keep the tighter one.
    pub fn published_before(mut self, bound: DateTime<Utc>) -> Self {
        self.published_before = Some(match self.published_before {
            Some(current) => current.min(bound),
            None => bound,
        });
        self
    }

    /// Strict lower bound; repeated calls keep the tighter one.
    pub fn published_after(mut self, bound: DateTime<Utc>) -> Self {
        self.published_after = Some(match self.published_after {
            Some(current) => current.max(bound),
            None => bound,
        });
        self
    }

    pub fn with_lang(mut self, lang: Language) -> Self {
        self.lang = Some(lang);
        self
    }

    pub fn order_by_published(mut self, direction: Direction) -> Self {
        self.order = Some(direction);
        self
    }

    pub async fn fetch_all(self, pool: &PgPool) -> Result<Vec<Newsletter>, sqlx::Error> {
        let mut builder = self.build(Direction::Asc);
        builder.build_query_as::<Newsletter>().fetch_all(pool).await
    }

    pub async fn first(self, pool: &PgPool) -> Result<Option<Newsletter>, sqlx::Error> {
        let mut builder = self.build(Direction::Asc);
        builder.push(" LIMIT 1");
        builder
            .build_query_as::<Newsletter>()
            .fetch_optional(pool)
            .await
    }

    /// Last element of the ordered collection; without an explicit order this
    /// falls back to the greatest primary key.
    pub async fn last(mut self, pool: &PgPool) -> Result<Option<Newsletter>, sqlx::Error> {
        self.order = self.order.map(Direction::reversed);
        let mut builder = self.build(Direction::Desc);
        builder.push(" LIMIT 1");
        builder
            .build_query_as::<Newsletter>()
            .fetch_optional(pool)
            .await
    }

    /// Publish-timestamp ties and unordered queries are broken by primary key
    /// so that `first`/`last` are deterministic.
    fn build(self, fallback: Direction) -> QueryBuilder<'static, Postgres> {
        let mut builder = QueryBuilder::new(SELECT_NEWSLETTERS);
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
        if let Some(status) = self.status {
            clause(&mut builder);
            builder.push("status = ");
            builder.push_bind(status);
        }
        if let Some(bound) = self.published_before {
            clause(&mut builder);
            builder.push("published_at < ");
            builder.push_bind(bound);
        }
        if let Some(bound) = self.published_after {
            clause(&mut builder);
            builder.push("published_at > ");
            builder.push_bind(bound);
        }
        if let Some(lang) = self.lang {
            clause(&mut builder);
            builder.push_bind(lang.as_ref().to_owned());
            builder.push(" = ANY(languages)");
        }

        match self.order {
            Some(direction) => {
                builder.push(format!(
                    " ORDER BY published_at {}, id {}",
                    direction.sql(),
                    direction.sql()
                ));
            }
            None => {
                builder.push(format!(" ORDER BY id {}", fallback.sql()));
            }
        }

        builder
    }
}

#[tracing::instrument(name = "Fetching the online newsletters of a list", skip(pool))]
pub async fn status_online(pool: &PgPool, list_id: Uuid) -> Result<Vec<Newsletter>, sqlx::Error> {
    NewsletterQuery::new()
        .in_list(list_id)
        .status_online(Utc::now())
        .fetch_all(pool)
        .await
}

/// The online newsletter with the greatest publish timestamp strictly before
/// `current_date`, scoped to one list.
#[tracing::instrument(name = "Fetching the previous newsletter", skip(pool))]
pub async fn get_previous(
    pool: &PgPool,
    list_id: Uuid,
    current_date: DateTime<Utc>,
) -> Result<Option<Newsletter>, sqlx::Error> {
    NewsletterQuery::new()
        .in_list(list_id)
        .status_online(Utc::now())
        .published_before(current_date)
        .order_by_published(Direction::Desc)
        .first(pool)
        .await
}

/// The online newsletter with the least publish timestamp strictly after
/// `current_date`, scoped to one list.
#[tracing::instrument(name = "Fetching the next newsletter", skip(pool))]
pub async fn get_next(
    pool: &PgPool,
    list_id: Uuid,
    current_date: DateTime<Utc>,
) -> Result<Option<Newsletter>, sqlx::Error> {
    NewsletterQuery::new()
        .in_list(list_id)
        .status_online(Utc::now())
        .published_after(current_date)
        .order_by_published(Direction::Asc)
        .first(pool)
        .await
}

#[tracing::instrument(name = "Looking up a newsletter by id", skip(pool))]
pub async fn find_newsletter(
    pool: &PgPool,
    id: Uuid,
) -> Result<Option<Newsletter>, sqlx::Error> {
    sqlx::query_as::<_, Newsletter>(&format!("{SELECT_NEWSLETTERS} WHERE id = $1"))
        .bind(id)
        .fetch_optional(pool)
        .await
}

#[derive(sqlx::FromRow)]
struct NewsletterItemRow {
    id: Uuid,
    newsletter_id: Uuid,
    description: String,
    image: Option<String>,
    url: Option<String>,
    content_kind: Option<String>,
    content_id: Option<Uuid>,
}

impl TryFrom<NewsletterItemRow> for NewsletterItem {
    type Error = anyhow::Error;

    fn try_from(row: NewsletterItemRow) -> Result<Self, Self::Error> {
        let content = match (row.content_kind, row.content_id) {
            (Some(kind), Some(object_id)) => {
                Some(ContentRef::from_parts(&kind, object_id).map_err(|e| anyhow::anyhow!(e))?)
            }
            (None, None) => None,
            _ => anyhow::bail!("newsletter item {} has a dangling content reference", row.id),
        };

        Ok(NewsletterItem {
            id: row.id,
            newsletter_id: row.newsletter_id,
            description: row.description,
            image: row.image,
            url: row.url,
            content,
        })
    }
}

#[tracing::instrument(name = "Fetching the items of a newsletter", skip(pool))]
pub async fn fetch_items(
    pool: &PgPool,
    newsletter_id: Uuid,
) -> Result<Vec<NewsletterItem>, anyhow::Error> {
    let rows = sqlx::query_as::<_, NewsletterItemRow>(
        "SELECT id, newsletter_id, description, image, url, content_kind, content_id \
         FROM newsletter_items WHERE newsletter_id = $1 ORDER BY id ASC",
    )
    .bind(newsletter_id)
    .fetch_all(pool)
    .await
    .context("Failed to fetch newsletter items from the database.")?;

    rows.into_iter().map(NewsletterItem::try_from).collect()
}
