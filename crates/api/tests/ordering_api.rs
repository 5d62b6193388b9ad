//! Integration tests for the custom display order overlay: admin and public
//! listings, pruning on delete, and fallback when the order store fails.

mod common;

use std::sync::Arc;

use async_trait::async_trait;
use axum::http::StatusCode;
use common::{
    body_json, create_via_api, data_ids, delete_auth, get, get_auth, login, post_json_auth,
    put_json_auth,
};
use serde_json::json;
use sqlx::PgPool;
use vitrine_api::config::OrderingConfig;
use vitrine_core::content::ContentKind;
use vitrine_core::error::CoreError;
use vitrine_core::ordering::{InMemoryOrderStore, OrderStore};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Order store whose backend is always unreachable.
struct UnreachableOrderStore;

fn unreachable() -> CoreError {
    CoreError::StoreUnavailable {
        store: "order",
        message: "connection refused".into(),
    }
}

#[async_trait]
impl OrderStore for UnreachableOrderStore {
    async fn get_order(&self, _namespace: &str) -> Result<Vec<String>, CoreError> {
        Err(unreachable())
    }

    async fn remove_from_order(&self, _namespace: &str, _id: &str) -> Result<(), CoreError> {
        Err(unreachable())
    }

    async fn append_to_order(&self, _namespace: &str, _id: &str) -> Result<(), CoreError> {
        Err(unreachable())
    }

    async fn replace_order(&self, _namespace: &str, _ids: &[String]) -> Result<(), CoreError> {
        Err(unreachable())
    }
}

/// Create three team members and return their ids in creation order.
async fn create_team(app: &common::TestApp, cookie: &str) -> (i64, i64, i64) {
    let mut ids = Vec::new();
    for (name, role) in [("Ada", "CTO"), ("Grace", "Engineer"), ("Linus", "Designer")] {
        let id = create_via_api(
            app.app(),
            "/api/v1/admin/team",
            cookie,
            json!({ "name": name, "role_title": role }),
        )
        .await;
        ids.push(id);
    }
    (ids[0], ids[1], ids[2])
}

async fn set_order(app: &common::TestApp, cookie: &str, kind: &str, ids: &[String]) {
    let response = put_json_auth(
        app.app(),
        &format!("/api/v1/admin/order/{kind}"),
        cookie,
        json!({ "item_ids": ids }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
}

// ---------------------------------------------------------------------------
// Overlay
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_team_lists_newest_first_without_order(pool: PgPool) {
    let app = common::build_test_app(pool);
    let cookie = login(app.app()).await;
    let (a, b, c) = create_team(&app, &cookie).await;

    let json = body_json(get_auth(app.app(), "/api/v1/admin/team", &cookie).await).await;
    assert_eq!(data_ids(&json), vec![c, b, a]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_custom_order_places_listed_ids_first(pool: PgPool) {
    let app = common::build_test_app(pool);
    let cookie = login(app.app()).await;
    let (a, b, c) = create_team(&app, &cookie).await;

    set_order(&app, &cookie, "team-members", &[a.to_string(), c.to_string()]).await;

    let admin = body_json(get_auth(app.app(), "/api/v1/admin/team", &cookie).await).await;
    assert_eq!(data_ids(&admin), vec![a, c, b]);

    let site = body_json(get(app.app(), "/api/v1/site/team").await).await;
    assert_eq!(data_ids(&site), vec![a, c, b]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_stale_ids_in_order_are_skipped(pool: PgPool) {
    let app = common::build_test_app(pool);
    let cookie = login(app.app()).await;
    let (a, b, c) = create_team(&app, &cookie).await;

    set_order(
        &app,
        &cookie,
        "team-members",
        &["999999".to_string(), b.to_string()],
    )
    .await;

    let json = body_json(get(app.app(), "/api/v1/site/team").await).await;
    assert_eq!(data_ids(&json), vec![b, c, a]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_site_cache_refreshes_after_order_change(pool: PgPool) {
    let app = common::build_test_app(pool);
    let cookie = login(app.app()).await;
    let (a, b, c) = create_team(&app, &cookie).await;

    let before = body_json(get(app.app(), "/api/v1/site/team").await).await;
    assert_eq!(data_ids(&before), vec![c, b, a]);

    set_order(&app, &cookie, "team-members", &[a.to_string()]).await;

    let after = body_json(get(app.app(), "/api/v1/site/team").await).await;
    assert_eq!(data_ids(&after), vec![a, c, b]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_prunes_order_record(pool: PgPool) {
    let app = common::build_test_app(pool);
    let cookie = login(app.app()).await;
    let (a, b, c) = create_team(&app, &cookie).await;

    set_order(
        &app,
        &cookie,
        "team-members",
        &[b.to_string(), a.to_string(), c.to_string()],
    )
    .await;

    let response = delete_auth(app.app(), &format!("/api/v1/admin/team/{a}"), &cookie).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let record =
        body_json(get_auth(app.app(), "/api/v1/admin/order/team-members", &cookie).await).await;
    assert_eq!(
        record["data"]["item_ids"],
        json!([b.to_string(), c.to_string()])
    );

    let site = body_json(get(app.app(), "/api/v1/site/team").await).await;
    assert_eq!(data_ids(&site), vec![b, c]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_new_members_list_after_ordered_ones(pool: PgPool) {
    let app = common::build_test_app(pool);
    let cookie = login(app.app()).await;
    let (a, _b, _c) = create_team(&app, &cookie).await;

    set_order(&app, &cookie, "team-members", &[a.to_string()]).await;

    let newcomer = create_via_api(
        app.app(),
        "/api/v1/admin/team",
        &cookie,
        json!({ "name": "Margaret", "role_title": "Advisor" }),
    )
    .await;

    let json = body_json(get(app.app(), "/api/v1/site/team").await).await;
    let ids = data_ids(&json);
    assert_eq!(ids[0], a);
    assert_eq!(ids[1], newcomer);
}

// ---------------------------------------------------------------------------
// Overlay flags and store failures
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_testimonials_ignore_order_by_default(pool: PgPool) {
    let app = common::build_test_app(pool);
    let cookie = login(app.app()).await;

    let first = create_via_api(
        app.app(),
        "/api/v1/admin/testimonials",
        &cookie,
        json!({ "quote": "Great work.", "author_name": "Sam" }),
    )
    .await;
    let second = create_via_api(
        app.app(),
        "/api/v1/admin/testimonials",
        &cookie,
        json!({ "quote": "Would hire again.", "author_name": "Kim", "company": "Acme" }),
    )
    .await;

    set_order(&app, &cookie, "testimonials", &[first.to_string()]).await;

    let record =
        body_json(get_auth(app.app(), "/api/v1/admin/order/testimonials", &cookie).await).await;
    assert_eq!(record["data"]["overlay_enabled"], false);

    let json = body_json(get(app.app(), "/api/v1/site/testimonials").await).await;
    assert_eq!(data_ids(&json), vec![second, first]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_testimonial_overlay_can_be_enabled(pool: PgPool) {
    let mut config = common::test_config();
    config.ordering = OrderingConfig {
        overlay_kinds: ContentKind::ALL.to_vec(),
        ..config.ordering
    };
    let app = common::build_test_app_with(pool, config, Some(Arc::new(InMemoryOrderStore::new())));
    let cookie = login(app.app()).await;

    let first = create_via_api(
        app.app(),
        "/api/v1/admin/testimonials",
        &cookie,
        json!({ "quote": "Great work.", "author_name": "Sam" }),
    )
    .await;
    let second = create_via_api(
        app.app(),
        "/api/v1/admin/testimonials",
        &cookie,
        json!({ "quote": "Would hire again.", "author_name": "Kim" }),
    )
    .await;

    set_order(&app, &cookie, "testimonials", &[first.to_string()]).await;

    let json = body_json(get(app.app(), "/api/v1/site/testimonials").await).await;
    assert_eq!(data_ids(&json), vec![first, second]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_listing_falls_back_when_order_store_fails(pool: PgPool) {
    let app = common::build_test_app_with(
        pool,
        common::test_config(),
        Some(Arc::new(UnreachableOrderStore)),
    );
    let cookie = login(app.app()).await;
    let (a, b, c) = create_team(&app, &cookie).await;

    let response = get(app.app(), "/api/v1/site/team").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(data_ids(&body_json(response).await), vec![c, b, a]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_succeeds_when_prune_fails(pool: PgPool) {
    let app = common::build_test_app_with(
        pool,
        common::test_config(),
        Some(Arc::new(UnreachableOrderStore)),
    );
    let cookie = login(app.app()).await;
    let (a, b, c) = create_team(&app, &cookie).await;

    let response = delete_auth(app.app(), &format!("/api/v1/admin/team/{b}"), &cookie).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let json = body_json(get_auth(app.app(), "/api/v1/admin/team", &cookie).await).await;
    assert_eq!(data_ids(&json), vec![c, a]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_order_edits_report_unavailable_store(pool: PgPool) {
    let app = common::build_test_app_with(
        pool,
        common::test_config(),
        Some(Arc::new(UnreachableOrderStore)),
    );
    let cookie = login(app.app()).await;

    let response = put_json_auth(
        app.app(),
        "/api/v1/admin/order/team-members",
        &cookie,
        json!({ "item_ids": ["1"] }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body_json(response).await["code"], "STORE_UNAVAILABLE");
}

// ---------------------------------------------------------------------------
// Order record endpoints
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_replace_order_trims_and_dedups(pool: PgPool) {
    let app = common::build_test_app(pool);
    let cookie = login(app.app()).await;

    let response = put_json_auth(
        app.app(),
        "/api/v1/admin/order/gallery-images",
        &cookie,
        json!({ "item_ids": ["3", " 1 ", "3", "2"] }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"]["kind"], "gallery-images");
    assert_eq!(json["data"]["namespace"], "gallery:images");
    assert_eq!(json["data"]["overlay_enabled"], true);
    assert_eq!(json["data"]["item_ids"], json!(["3", "1", "2"]));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_replace_order_rejects_blank_id(pool: PgPool) {
    let app = common::build_test_app(pool);
    let cookie = login(app.app()).await;

    let response = put_json_auth(
        app.app(),
        "/api/v1/admin/order/team-members",
        &cookie,
        json!({ "item_ids": ["1", "  "] }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_append_and_remove_items(pool: PgPool) {
    let app = common::build_test_app(pool);
    let cookie = login(app.app()).await;
    let uri = "/api/v1/admin/order/gallery-videos";

    for id in ["10", "20", "10"] {
        let response =
            post_json_auth(app.app(), &format!("{uri}/items"), &cookie, json!({ "id": id })).await;
        assert_eq!(response.status(), StatusCode::OK);
    }
    let json = body_json(get_auth(app.app(), uri, &cookie).await).await;
    assert_eq!(json["data"]["item_ids"], json!(["10", "20"]));

    let response = delete_auth(app.app(), &format!("{uri}/items/10"), &cookie).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    // Removing an absent id is a no-op.
    let response = delete_auth(app.app(), &format!("{uri}/items/77"), &cookie).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let json = body_json(get_auth(app.app(), uri, &cookie).await).await;
    assert_eq!(json["data"]["item_ids"], json!(["20"]));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_unknown_kind_is_rejected(pool: PgPool) {
    let app = common::build_test_app(pool);
    let cookie = login(app.app()).await;

    let response = get_auth(app.app(), "/api/v1/admin/order/blog-posts", &cookie).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_order_endpoints_without_store(pool: PgPool) {
    let app = common::build_test_app_with(pool, common::test_config(), None);
    let cookie = login(app.app()).await;

    let response = get_auth(app.app(), "/api/v1/admin/order/team-members", &cookie).await;
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

    // Listings still work in canonical order.
    let response = get_auth(app.app(), "/api/v1/admin/team", &cookie).await;
    assert_eq!(response.status(), StatusCode::OK);
}
