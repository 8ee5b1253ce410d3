use actix_web::{HttpResponse, web};
use chrono::Utc;
use sqlx::PgPool;

use crate::domain::{Language, Newsletter, NewsletterList};
use crate::repository::lists::find_list_by_slug;
use crate::repository::newsletters::NewsletterQuery;

use super::helpers::{e404, e500};

#[derive(serde::Deserialize)]
pub struct DisplayParameters {
    pub lang: Option<String>,
}

#[derive(serde::Serialize)]
pub struct ListDisplay {
    pub list: NewsletterList,
    pub newsletters: Vec<Newsletter>,
}

/// The list page: the list itself plus its online newsletters, oldest first,
/// optionally narrowed to one language.
#[tracing::instrument(name = "Displaying a newsletter list", skip(parameters, db_pool))]
pub async fn newsletter_list_display(
    path: web::Path<String>,
    parameters: web::Query<DisplayParameters>,
    db_pool: web::Data<PgPool>,
) -> Result<HttpResponse, actix_web::Error> {
    let slug = path.into_inner();
    let lang = parameters
        .0
        .lang
        .map(Language::parse)
        .transpose()
        .map_err(actix_web::error::ErrorBadRequest)?;

    let list = find_list_by_slug(&db_pool, &slug)
        .await
        .map_err(e500)?
        .ok_or_else(|| e404(format!("There is no newsletter list with slug {slug}.")))?;

    let mut query = NewsletterQuery::new()
        .in_list(list.id)
        .status_online(Utc::now());
    if let Some(lang) = lang {
        query = query.with_lang(lang);
    }
    let newsletters = query.fetch_all(db_pool.get_ref()).await.map_err(e500)?;

    Ok(HttpResponse::Ok().json(ListDisplay { list, newsletters }))
}
