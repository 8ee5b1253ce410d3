use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::{Newsletter, NewsletterItem};

#[derive(serde::Serialize)]
pub struct NewsletterDetail {
    #[serde(flatten)]
    pub newsletter: Newsletter,
    pub previous: Option<NewsletterNav>,
    pub next: Option<NewsletterNav>,
}

#[derive(serde::Serialize)]
pub struct NewsletterNav {
    pub id: Uuid,
    pub name: String,
    pub published_at: Option<DateTime<Utc>>,
}

impl From<Newsletter> for NewsletterNav {
    fn from(newsletter: Newsletter) -> Self {
        Self {
            id: newsletter.id,
            name: newsletter.name,
            published_at: newsletter.published_at,
        }
    }
}

#[derive(serde::Serialize)]
pub struct NewsletterRawDetail {
    #[serde(flatten)]
    pub newsletter: Newsletter,
    pub items: Vec<NewsletterItem>,
}
