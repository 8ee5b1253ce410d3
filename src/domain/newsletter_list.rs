use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::ListSlug;

#[derive(Debug, Clone, sqlx::FromRow, serde::Serialize)]
pub struct NewsletterList {
    pub id: Uuid,
    pub name: String,
    #[sqlx(try_from = "String")]
    pub slug: ListSlug,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub languages: Vec<String>,
}
