mod common;

use chrono::{Duration, Utc};
use common::{redirect_server, seed_link, test_context};

const IPHONE_UA: &str = "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X) \
     AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.0 Mobile/15E148 Safari/604.1";

#[tokio::test]
async fn test_redirect_answers_302_with_verbatim_target() {
    let ctx = test_context();
    seed_link(
        &ctx,
        common::USER_ID,
        "go",
        "https://example.com/path?q=rust&lang=en",
        true,
        None,
    );
    let server = redirect_server(ctx.state.clone());

    let response = server.get("/go").await;

    assert_eq!(response.status_code(), 302);
    assert_eq!(
        response.header("location"),
        "https://example.com/path?q=rust&lang=en"
    );
}

#[tokio::test]
async fn test_redirect_unknown_code_is_404() {
    let ctx = test_context();
    let server = redirect_server(ctx.state.clone());

    let response = server.get("/missing").await;

    assert_eq!(response.status_code(), 404);
}

#[tokio::test]
async fn test_redirect_disabled_link_is_410_without_click() {
    let ctx = test_context();
    let link = seed_link(&ctx, common::USER_ID, "off", "https://example.com/", false, None);
    let server = redirect_server(ctx.state.clone());

    let response = server.get("/off").await;

    assert_eq!(response.status_code(), 410);
    assert_eq!(ctx.links.clicks_count(link.id), 0);
    assert!(ctx.clicks.events_for(link.id).is_empty());
}

#[tokio::test]
async fn test_redirect_expired_link_is_410_without_click() {
    let ctx = test_context();
    let link = seed_link(
        &ctx,
        common::USER_ID,
        "old",
        "https://example.com/",
        true,
        Some(Utc::now() - Duration::hours(1)),
    );
    let server = redirect_server(ctx.state.clone());

    let response = server.get("/old").await;

    assert_eq!(response.status_code(), 410);
    assert!(ctx.clicks.events_for(link.id).is_empty());
}

#[tokio::test]
async fn test_future_expiry_still_redirects() {
    let ctx = test_context();
    seed_link(
        &ctx,
        common::USER_ID,
        "soon",
        "https://example.com/",
        true,
        Some(Utc::now() + Duration::hours(1)),
    );
    let server = redirect_server(ctx.state.clone());

    let response = server.get("/soon").await;

    assert_eq!(response.status_code(), 302);
}

#[tokio::test]
async fn test_each_visit_records_one_event_and_increment() {
    let ctx = test_context();
    let link = seed_link(&ctx, common::USER_ID, "hot", "https://example.com/", true, None);
    let server = redirect_server(ctx.state.clone());

    for _ in 0..3 {
        let response = server.get("/hot").await;
        assert_eq!(response.status_code(), 302);
    }

    assert_eq!(ctx.links.clicks_count(link.id), 3);
    assert_eq!(ctx.clicks.events_for(link.id).len(), 3);
}

#[tokio::test]
async fn test_click_event_carries_classified_signals() {
    let ctx = test_context();
    let link = seed_link(&ctx, common::USER_ID, "sig", "https://example.com/", true, None);
    let server = redirect_server(ctx.state.clone());

    let response = server
        .get("/sig")
        .add_header("user-agent", IPHONE_UA)
        .add_header("referer", "https://news.ycombinator.com/item?id=1")
        .add_header("x-forwarded-for", "203.0.113.7, 10.0.0.1")
        .await;
    assert_eq!(response.status_code(), 302);

    let events = ctx.clicks.events_for(link.id);
    assert_eq!(events.len(), 1);
    let click = &events[0];
    assert_eq!(click.device_type, "mobile");
    assert_eq!(click.browser, "Safari");
    assert_eq!(click.os, "iOS");
    assert_eq!(click.ip.as_deref(), Some("203.0.113.7"));
    assert_eq!(
        click.referrer.as_deref(),
        Some("https://news.ycombinator.com/item?id=1")
    );
}

#[tokio::test]
async fn test_peer_address_is_recorded_without_forwarded_header() {
    let ctx = test_context();
    let link = seed_link(&ctx, common::USER_ID, "raw", "https://example.com/", true, None);
    let server = redirect_server(ctx.state.clone());

    let response = server.get("/raw").await;
    assert_eq!(response.status_code(), 302);

    let events = ctx.clicks.events_for(link.id);
    assert_eq!(events.len(), 1);
    // No x-forwarded-for, so the connection's peer address is stored.
    assert_eq!(events[0].ip.as_deref(), Some("192.0.2.99"));
}

#[tokio::test]
async fn test_long_user_agent_is_truncated_to_500() {
    let ctx = test_context();
    let link = seed_link(&ctx, common::USER_ID, "ua", "https://example.com/", true, None);
    let server = redirect_server(ctx.state.clone());

    let response = server
        .get("/ua")
        .add_header("user-agent", "x".repeat(900))
        .await;
    assert_eq!(response.status_code(), 302);

    let events = ctx.clicks.events_for(link.id);
    assert_eq!(events[0].user_agent.as_ref().unwrap().len(), 500);
}
