use bulletin::domain::NewsletterStatus;
use uuid::Uuid;

use crate::helpers::{hours_ago, spawn_app};

#[tokio::test]
async fn list_display_returns_only_online_newsletters_oldest_first() {
    let app = spawn_app().await;
    let list_id = app.create_list("weekly", &[]).await;

    app.create_newsletter(list_id, "#2", Some(hours_ago(2)), NewsletterStatus::Online, &[])
        .await;
    app.create_newsletter(list_id, "#3", Some(hours_ago(1)), NewsletterStatus::Online, &[])
        .await;
    app.create_newsletter(list_id, "#1", Some(hours_ago(3)), NewsletterStatus::Online, &[])
        .await;
    // Neither a draft nor a future-dated issue is online.
    app.create_newsletter(list_id, "draft", Some(hours_ago(5)), NewsletterStatus::Draft, &[])
        .await;
    app.create_newsletter(list_id, "scheduled", Some(hours_ago(-1)), NewsletterStatus::Online, &[])
        .await;

    let response = app.get_list("weekly", None).await;
    assert_eq!(200, response.status().as_u16());

    let body: serde_json::Value = response.json().await.unwrap();
    let names: Vec<&str> = body["newsletters"]
        .as_array()
        .unwrap()
        .iter()
        .map(|n| n["name"].as_str().unwrap())
        .collect();

    assert_eq!(names, vec!["#1", "#2", "#3"]);
}

#[tokio::test]
async fn list_display_can_filter_by_language() {
    let app = spawn_app().await;
    let list_id = app.create_list("weekly", &["en", "fr"]).await;

    app.create_newsletter(list_id, "english", Some(hours_ago(2)), NewsletterStatus::Online, &["en"])
        .await;
    app.create_newsletter(list_id, "french", Some(hours_ago(1)), NewsletterStatus::Online, &["fr"])
        .await;

    let response = app.get_list("weekly", Some("fr")).await;
    assert_eq!(200, response.status().as_u16());

    let body: serde_json::Value = response.json().await.unwrap();
    let newsletters = body["newsletters"].as_array().unwrap();

    assert_eq!(newsletters.len(), 1);
    assert_eq!(newsletters[0]["name"], "french");
}

#[tokio::test]
async fn list_display_rejects_an_unknown_language_with_400() {
    let app = spawn_app().await;
    app.create_list("weekly", &[]).await;

    let response = app.get_list("weekly", Some("tlh")).await;

    assert_eq!(400, response.status().as_u16());
}

#[tokio::test]
async fn an_unknown_list_slug_returns_404() {
    let app = spawn_app().await;

    let response = app.get_list("no-such-list", None).await;

    assert_eq!(404, response.status().as_u16());
}

#[tokio::test]
async fn newsletter_detail_navigates_to_adjacent_issues() {
    let app = spawn_app().await;
    let list_id = app.create_list("weekly", &[]).await;

    let a = app
        .create_newsletter(list_id, "A", Some(hours_ago(3)), NewsletterStatus::Online, &[])
        .await;
    let b = app
        .create_newsletter(list_id, "B", Some(hours_ago(2)), NewsletterStatus::Online, &[])
        .await;
    let c = app
        .create_newsletter(list_id, "C", Some(hours_ago(1)), NewsletterStatus::Online, &[])
        .await;

    let body: serde_json::Value = app.get_newsletter(b).await.json().await.unwrap();
    assert_eq!(body["previous"]["id"], serde_json::json!(a));
    assert_eq!(body["next"]["id"], serde_json::json!(c));

    let body: serde_json::Value = app.get_newsletter(a).await.json().await.unwrap();
    assert!(body["previous"].is_null());

    let body: serde_json::Value = app.get_newsletter(c).await.json().await.unwrap();
    assert!(body["next"].is_null());
}

#[tokio::test]
async fn next_is_the_nearest_following_issue_not_the_latest() {
    let app = spawn_app().await;
    let list_id = app.create_list("weekly", &[]).await;

    let a = app
        .create_newsletter(list_id, "A", Some(hours_ago(3)), NewsletterStatus::Online, &[])
        .await;
    let b = app
        .create_newsletter(list_id, "B", Some(hours_ago(2)), NewsletterStatus::Online, &[])
        .await;
    app.create_newsletter(list_id, "C", Some(hours_ago(1)), NewsletterStatus::Online, &[])
        .await;

    let body: serde_json::Value = app.get_newsletter(a).await.json().await.unwrap();

    assert_eq!(body["next"]["id"], serde_json::json!(b));
}

#[tokio::test]
async fn navigation_ignores_drafts_and_other_lists() {
    let app = spawn_app().await;
    let list_id = app.create_list("weekly", &[]).await;
    let other_list = app.create_list("monthly", &[]).await;

    let b = app
        .create_newsletter(list_id, "B", Some(hours_ago(2)), NewsletterStatus::Online, &[])
        .await;
    app.create_newsletter(list_id, "draft", Some(hours_ago(1)), NewsletterStatus::Draft, &[])
        .await;
    app.create_newsletter(other_list, "other", Some(hours_ago(1)), NewsletterStatus::Online, &[])
        .await;

    let body: serde_json::Value = app.get_newsletter(b).await.json().await.unwrap();

    assert!(body["next"].is_null());
}

#[tokio::test]
async fn a_draft_without_publish_timestamp_has_no_navigation() {
    let app = spawn_app().await;
    let list_id = app.create_list("weekly", &[]).await;

    app.create_newsletter(list_id, "A", Some(hours_ago(3)), NewsletterStatus::Online, &[])
        .await;
    let draft = app
        .create_newsletter(list_id, "draft", None, NewsletterStatus::Draft, &[])
        .await;

    let response = app.get_newsletter(draft).await;
    assert_eq!(200, response.status().as_u16());

    let body: serde_json::Value = response.json().await.unwrap();
    assert!(body["previous"].is_null());
    assert!(body["next"].is_null());
}

#[tokio::test]
async fn raw_detail_returns_the_newsletter_items() {
    let app = spawn_app().await;
    let list_id = app.create_list("weekly", &[]).await;
    let newsletter_id = app
        .create_newsletter(list_id, "A", Some(hours_ago(1)), NewsletterStatus::Online, &[])
        .await;

    let article_id = Uuid::new_v4();
    app.create_item(newsletter_id, "An article", Some(("article", article_id)))
        .await;
    app.create_item(newsletter_id, "Plain text", None).await;

    let response = app.get_newsletter_raw(newsletter_id).await;
    assert_eq!(200, response.status().as_u16());

    let body: serde_json::Value = response.json().await.unwrap();
    let items = body["items"].as_array().unwrap();
    assert_eq!(items.len(), 2);

    let with_content = items
        .iter()
        .find(|i| i["description"] == "An article")
        .unwrap();
    assert_eq!(with_content["content"]["kind"], "article");
    assert_eq!(with_content["content"]["id"], serde_json::json!(article_id));

    let plain = items.iter().find(|i| i["description"] == "Plain text").unwrap();
    assert!(plain["content"].is_null());
}

#[tokio::test]
async fn an_unknown_newsletter_id_returns_404() {
    let app = spawn_app().await;

    let response = app.get_newsletter(Uuid::new_v4()).await;
    assert_eq!(404, response.status().as_u16());

    let response = app.get_newsletter_raw(Uuid::new_v4()).await;
    assert_eq!(404, response.status().as_u16());
}
