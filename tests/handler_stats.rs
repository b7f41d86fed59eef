mod common;

use common::{USER_TOKEN, api_server, redirect_server, seed_link, test_context};
use serde_json::Value;

const DESKTOP_UA: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";
const PHONE_UA: &str = "Mozilla/5.0 (Linux; Android 14; Pixel 8) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Mobile Safari/537.36";

fn bucket_count(buckets: &Value, value: &str) -> i64 {
    buckets
        .as_array()
        .unwrap()
        .iter()
        .find(|b| b["value"] == value)
        .map(|b| b["count"].as_i64().unwrap())
        .unwrap_or(0)
}

#[tokio::test]
async fn test_link_stats_aggregates_device_and_browser_buckets() {
    let ctx = test_context();
    let link = seed_link(&ctx, common::USER_ID, "st", "https://example.com/", true, None);
    let public = redirect_server(ctx.state.clone());

    for _ in 0..2 {
        public.get("/st").add_header("user-agent", DESKTOP_UA).await;
    }
    public
        .get("/st")
        .add_header("user-agent", PHONE_UA)
        .add_header("referer", "https://blog.example.org/post")
        .await;

    let server = api_server(ctx.state.clone());
    let response = server
        .get(&format!("/links/{}/stats", link.id))
        .authorization_bearer(USER_TOKEN)
        .await;

    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body["total_clicks"], 3);
    assert_eq!(bucket_count(&body["by_device"], "desktop"), 2);
    assert_eq!(bucket_count(&body["by_device"], "mobile"), 1);
    assert_eq!(bucket_count(&body["by_browser"], "Chrome"), 3);
    assert_eq!(bucket_count(&body["by_referrer"], "direct"), 2);
    assert_eq!(
        bucket_count(&body["by_referrer"], "https://blog.example.org/post"),
        1
    );
    assert_eq!(body["recent"].as_array().unwrap().len(), 3);
    assert_eq!(body["link"]["short_code"], "st");
}

#[tokio::test]
async fn test_recent_clicks_respect_limit() {
    let ctx = test_context();
    let link = seed_link(&ctx, common::USER_ID, "rl", "https://example.com/", true, None);
    let public = redirect_server(ctx.state.clone());
    for _ in 0..5 {
        public.get("/rl").await;
    }

    let server = api_server(ctx.state.clone());
    let response = server
        .get(&format!("/links/{}/stats", link.id))
        .add_query_param("recent_limit", "2")
        .authorization_bearer(USER_TOKEN)
        .await;

    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body["total_clicks"], 5);
    assert_eq!(body["recent"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_stats_for_unowned_link_is_404() {
    let ctx = test_context();
    let link = seed_link(&ctx, common::ADMIN_ID, "priv", "https://example.com/", true, None);
    let server = api_server(ctx.state.clone());

    let response = server
        .get(&format!("/links/{}/stats", link.id))
        .authorization_bearer(USER_TOKEN)
        .await;

    assert_eq!(response.status_code(), 404);
}

#[tokio::test]
async fn test_overview_counts_links_and_names_top_link() {
    let ctx = test_context();
    seed_link(&ctx, common::USER_ID, "quiet", "https://example.com/a", true, None);
    seed_link(&ctx, common::USER_ID, "busy", "https://example.com/b", true, None);
    seed_link(&ctx, common::USER_ID, "paused", "https://example.com/c", false, None);
    seed_link(&ctx, common::ADMIN_ID, "other", "https://example.com/d", true, None);

    let public = redirect_server(ctx.state.clone());
    for _ in 0..4 {
        public.get("/busy").await;
    }
    public.get("/quiet").await;

    let server = api_server(ctx.state.clone());
    let response = server
        .get("/stats/overview")
        .authorization_bearer(USER_TOKEN)
        .await;

    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body["total_links"], 3);
    assert_eq!(body["active_links"], 2);
    assert_eq!(body["total_clicks"], 5);
    assert_eq!(body["top_link"]["short_code"], "busy");
}
