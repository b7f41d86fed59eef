mod common;

use common::{USER_TOKEN, api_server, test_context, test_context_with_reachability};
use serde_json::{Value, json};

#[tokio::test]
async fn test_create_link_returns_201_with_generated_code() {
    let ctx = test_context();
    let server = api_server(ctx.state.clone());

    let response = server
        .post("/links")
        .authorization_bearer(USER_TOKEN)
        .json(&json!({ "target_url": "https://example.com/page" }))
        .await;

    assert_eq!(response.status_code(), 201);
    let body: Value = response.json();
    assert_eq!(body["target_url"], "https://example.com/page");
    assert_eq!(body["short_code"].as_str().unwrap().len(), 6);
    assert_eq!(
        body["short_url"],
        format!("https://sho.rt/{}", body["short_code"].as_str().unwrap())
    );
    assert_eq!(body["clicks_count"], 0);
    assert_eq!(body["is_active"], true);
}

#[tokio::test]
async fn test_create_link_prepends_https_to_bare_domain() {
    let ctx = test_context();
    let server = api_server(ctx.state.clone());

    let response = server
        .post("/links")
        .authorization_bearer(USER_TOKEN)
        .json(&json!({ "target_url": "example.com/docs?ref=1" }))
        .await;

    assert_eq!(response.status_code(), 201);
    let body: Value = response.json();
    assert_eq!(body["target_url"], "https://example.com/docs?ref=1");
}

#[tokio::test]
async fn test_create_link_twice_returns_existing() {
    let ctx = test_context();
    let server = api_server(ctx.state.clone());

    let first = server
        .post("/links")
        .authorization_bearer(USER_TOKEN)
        .json(&json!({ "target_url": "https://example.com/repeat" }))
        .await;
    assert_eq!(first.status_code(), 201);
    let first_body: Value = first.json();

    let second = server
        .post("/links")
        .authorization_bearer(USER_TOKEN)
        .json(&json!({ "target_url": "https://example.com/repeat" }))
        .await;

    assert_eq!(second.status_code(), 200);
    let second_body: Value = second.json();
    assert_eq!(second_body["id"], first_body["id"]);
    assert_eq!(second_body["short_code"], first_body["short_code"]);
}

#[tokio::test]
async fn test_create_link_with_custom_code() {
    let ctx = test_context();
    let server = api_server(ctx.state.clone());

    let response = server
        .post("/links")
        .authorization_bearer(USER_TOKEN)
        .json(&json!({
            "target_url": "https://example.com/promo",
            "custom_code": "summer-sale"
        }))
        .await;

    assert_eq!(response.status_code(), 201);
    let body: Value = response.json();
    assert_eq!(body["short_code"], "summer-sale");
}

#[tokio::test]
async fn test_custom_code_conflict_is_409() {
    let ctx = test_context();
    common::seed_link(&ctx, common::ADMIN_ID, "taken", "https://other.example/", true, None);
    let server = api_server(ctx.state.clone());

    let response = server
        .post("/links")
        .authorization_bearer(USER_TOKEN)
        .json(&json!({
            "target_url": "https://example.com/",
            "custom_code": "taken"
        }))
        .await;

    assert_eq!(response.status_code(), 409);
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "conflict");
}

#[tokio::test]
async fn test_malformed_custom_code_is_400() {
    let ctx = test_context();
    let server = api_server(ctx.state.clone());

    let response = server
        .post("/links")
        .authorization_bearer(USER_TOKEN)
        .json(&json!({
            "target_url": "https://example.com/",
            "custom_code": "has spaces!"
        }))
        .await;

    assert_eq!(response.status_code(), 400);
}

#[tokio::test]
async fn test_unreachable_target_is_400() {
    let ctx = test_context_with_reachability(false);
    let server = api_server(ctx.state.clone());

    let response = server
        .post("/links")
        .authorization_bearer(USER_TOKEN)
        .json(&json!({ "target_url": "https://dead.example.com/" }))
        .await;

    assert_eq!(response.status_code(), 400);
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "validation_error");
}

#[tokio::test]
async fn test_unsupported_scheme_is_400() {
    let ctx = test_context();
    let server = api_server(ctx.state.clone());

    let response = server
        .post("/links")
        .authorization_bearer(USER_TOKEN)
        .json(&json!({ "target_url": "ftp://example.com/file" }))
        .await;

    assert_eq!(response.status_code(), 400);
}

#[tokio::test]
async fn test_requests_without_token_are_401() {
    let ctx = test_context();
    let server = api_server(ctx.state.clone());

    let response = server.get("/links").await;

    assert_eq!(response.status_code(), 401);
}

#[tokio::test]
async fn test_list_links_scopes_to_owner_and_search() {
    let ctx = test_context();
    common::seed_link(&ctx, common::USER_ID, "mine-1", "https://example.com/a", true, None);
    common::seed_link(&ctx, common::USER_ID, "mine-2", "https://docs.example.com/b", true, None);
    common::seed_link(&ctx, common::ADMIN_ID, "theirs", "https://example.com/c", true, None);
    let server = api_server(ctx.state.clone());

    let all = server.get("/links").authorization_bearer(USER_TOKEN).await;
    assert_eq!(all.status_code(), 200);
    let body: Value = all.json();
    assert_eq!(body["items"].as_array().unwrap().len(), 2);

    let filtered = server
        .get("/links")
        .add_query_param("search", "docs")
        .authorization_bearer(USER_TOKEN)
        .await;
    let body: Value = filtered.json();
    let items = body["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["short_code"], "mine-2");
}

#[tokio::test]
async fn test_update_link_toggles_active_and_sets_title() {
    let ctx = test_context();
    let link = common::seed_link(&ctx, common::USER_ID, "upd", "https://example.com/", true, None);
    let server = api_server(ctx.state.clone());

    let response = server
        .patch(&format!("/links/{}", link.id))
        .authorization_bearer(USER_TOKEN)
        .json(&json!({ "title": "Docs", "is_active": false }))
        .await;

    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body["title"], "Docs");
    assert_eq!(body["is_active"], false);
}

#[tokio::test]
async fn test_update_unowned_link_is_404() {
    let ctx = test_context();
    let link = common::seed_link(&ctx, common::ADMIN_ID, "nope", "https://example.com/", true, None);
    let server = api_server(ctx.state.clone());

    let response = server
        .patch(&format!("/links/{}", link.id))
        .authorization_bearer(USER_TOKEN)
        .json(&json!({ "title": "hijack" }))
        .await;

    assert_eq!(response.status_code(), 404);
}

#[tokio::test]
async fn test_delete_link_then_get_is_404() {
    let ctx = test_context();
    let link = common::seed_link(&ctx, common::USER_ID, "gone", "https://example.com/", true, None);
    let server = api_server(ctx.state.clone());

    let delete = server
        .delete(&format!("/links/{}", link.id))
        .authorization_bearer(USER_TOKEN)
        .await;
    assert_eq!(delete.status_code(), 204);

    let get = server
        .get(&format!("/links/{}", link.id))
        .authorization_bearer(USER_TOKEN)
        .await;
    assert_eq!(get.status_code(), 404);
}
