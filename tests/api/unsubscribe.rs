use bulletin::repository::subscribers::SubscriberQuery;
use sqlx::Row;

use crate::helpers::spawn_app;

#[tokio::test]
async fn unsubscribe_flags_the_subscriber_without_deleting_the_row() {
    let app = spawn_app().await;
    let list_id = app.create_list("weekly", &[]).await;
    app.create_subscriber(list_id, "ursula_le_guin@gmail.com", None, false)
        .await;

    let response = app
        .post_unsubscribe("weekly", "email=ursula_le_guin%40gmail.com".into())
        .await;
    assert_eq!(200, response.status().as_u16());

    let saved = sqlx::query("SELECT is_unsubscribed FROM newsletter_subscribers")
        .fetch_one(&app.db_pool)
        .await
        .expect("Failed to fetch the subscriber row");
    assert!(saved.get::<bool, _>("is_unsubscribed"));

    let subscribed = SubscriberQuery::new()
        .in_list(list_id)
        .subscribed()
        .fetch_all(&app.db_pool)
        .await
        .unwrap();
    assert!(subscribed.is_empty());
}

#[tokio::test]
async fn unsubscribing_twice_succeeds_both_times() {
    let app = spawn_app().await;
    let list_id = app.create_list("weekly", &[]).await;
    app.create_subscriber(list_id, "ursula_le_guin@gmail.com", None, false)
        .await;

    for _ in 0..2 {
        let response = app
            .post_unsubscribe("weekly", "email=ursula_le_guin%40gmail.com".into())
            .await;
        assert_eq!(200, response.status().as_u16());
    }
}

#[tokio::test]
async fn unsubscribe_returns_404_for_an_unknown_list_or_email() {
    let app = spawn_app().await;
    app.create_list("weekly", &[]).await;

    let response = app
        .post_unsubscribe("no-such-list", "email=ursula_le_guin%40gmail.com".into())
        .await;
    assert_eq!(404, response.status().as_u16());

    let response = app
        .post_unsubscribe("weekly", "email=ursula_le_guin%40gmail.com".into())
        .await;
    assert_eq!(404, response.status().as_u16());
}

#[tokio::test]
async fn unsubscribe_rejects_a_malformed_email_with_400() {
    let app = spawn_app().await;
    app.create_list("weekly", &[]).await;

    let response = app
        .post_unsubscribe("weekly", "email=not-an-email".into())
        .await;

    assert_eq!(400, response.status().as_u16());
}

#[tokio::test]
async fn unsubscribe_all_covers_every_list_of_the_email() {
    let app = spawn_app().await;
    let weekly = app.create_list("weekly", &[]).await;
    let monthly = app.create_list("monthly", &[]).await;
    app.create_subscriber(weekly, "ursula_le_guin@gmail.com", None, false)
        .await;
    app.create_subscriber(monthly, "ursula_le_guin@gmail.com", None, false)
        .await;
    app.create_subscriber(monthly, "someone_else@gmail.com", None, false)
        .await;

    let response = app
        .post_unsubscribe_all("email=ursula_le_guin%40gmail.com".into())
        .await;
    assert_eq!(200, response.status().as_u16());

    let remaining = SubscriberQuery::new()
        .subscribed()
        .fetch_all(&app.db_pool)
        .await
        .unwrap();

    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].email.as_ref(), "someone_else@gmail.com");
}

#[tokio::test]
async fn unsubscribe_all_returns_404_when_the_email_has_no_subscriptions() {
    let app = spawn_app().await;

    let response = app
        .post_unsubscribe_all("email=ursula_le_guin%40gmail.com".into())
        .await;

    assert_eq!(404, response.status().as_u16());
}
