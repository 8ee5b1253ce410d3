mod types;

use actix_web::{HttpResponse, web};
use sqlx::PgPool;
use uuid::Uuid;

use crate::repository::newsletters::{fetch_items, find_newsletter, get_next, get_previous};

use self::types::{NewsletterDetail, NewsletterNav, NewsletterRawDetail};
use super::helpers::{e404, e500};

/// Newsletter detail with previous/next navigation across the online issues
/// of its list. Drafts are served too (administrative preview) but have no
/// navigation until they carry a publish timestamp.
#[tracing::instrument(name = "Displaying a newsletter", skip(db_pool))]
pub async fn newsletter_detail(
    path: web::Path<Uuid>,
    db_pool: web::Data<PgPool>,
) -> Result<HttpResponse, actix_web::Error> {
    let id = path.into_inner();
    let newsletter = find_newsletter(&db_pool, id)
        .await
        .map_err(e500)?
        .ok_or_else(|| e404(format!("There is no newsletter with id {id}.")))?;

    let (previous, next) = match newsletter.published_at {
        Some(current_date) => {
            let list_id = newsletter.newsletter_list_id;
            let previous = get_previous(&db_pool, list_id, current_date)
                .await
                .map_err(e500)?;
            let next = get_next(&db_pool, list_id, current_date)
                .await
                .map_err(e500)?;
            (previous, next)
        }
        None => (None, None),
    };

    Ok(HttpResponse::Ok().json(NewsletterDetail {
        newsletter,
        previous: previous.map(NewsletterNav::from),
        next: next.map(NewsletterNav::from),
    }))
}

#[tracing::instrument(name = "Displaying a raw newsletter", skip(db_pool))]
pub async fn newsletter_raw_detail(
    path: web::Path<Uuid>,
    db_pool: web::Data<PgPool>,
) -> Result<HttpResponse, actix_web::Error> {
    let id = path.into_inner();
    let newsletter = find_newsletter(&db_pool, id)
        .await
        .map_err(e500)?
        .ok_or_else(|| e404(format!("There is no newsletter with id {id}.")))?;

    let items = fetch_items(&db_pool, newsletter.id).await.map_err(e500)?;

    Ok(HttpResponse::Ok().json(NewsletterRawDetail { newsletter, items }))
}
