use sqlx::PgPool;

use crate::domain::NewsletterList;

#[tracing::instrument(name = "Looking up a newsletter list by slug", skip(pool))]
pub async fn find_list_by_slug(
    pool: &PgPool,
    slug: &str,
) -> Result<Option<NewsletterList>, sqlx::Error> {
    sqlx::query_as::<_, NewsletterList>(
        "SELECT id, name, slug, description, created_at, languages \
         FROM newsletter_lists WHERE slug = $1",
    )
    .bind(slug)
    .fetch_optional(pool)
    .await
}
