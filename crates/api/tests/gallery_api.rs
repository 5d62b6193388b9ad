//! Integration tests for gallery uploads, caption edits and deletion.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, data_ids, delete_auth, get, get_auth, login, post_json_auth, post_multipart_auth,
    put_json_auth, MEDIA_BASE_URL, PNG_1X1,
};
use serde_json::json;
use sqlx::PgPool;

/// Upload `data` as an image and return the response JSON `data` object.
async fn upload_image(app: &common::TestApp, cookie: &str, data: &[u8]) -> serde_json::Value {
    let response = post_multipart_auth(
        app.app(),
        "/api/v1/admin/gallery/images",
        cookie,
        "office.png",
        data,
        &[("title", "Office"), ("alt_text", "Our office at dusk")],
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"].clone()
}

/// A PNG with trailing bytes: same header, different content hash.
fn png_variant(tag: u8) -> Vec<u8> {
    let mut data = PNG_1X1.to_vec();
    data.push(tag);
    data
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_upload_stores_object_and_row(pool: PgPool) {
    let app = common::build_test_app(pool);
    let cookie = login(app.app()).await;

    let item = upload_image(&app, &cookie, PNG_1X1).await;

    let key = item["media_key"].as_str().unwrap();
    assert!(key.starts_with("gallery/images/"));
    assert!(key.ends_with(".png"));
    assert_eq!(item["content_type"], "image/png");
    assert_eq!(item["title"], "Office");
    assert_eq!(item["width"], 1);
    assert_eq!(item["height"], 1);
    assert!(app.media.contains(key).await);

    let site = body_json(get(app.app(), "/api/v1/site/gallery/images").await).await;
    assert_eq!(
        site["data"][0]["url"],
        format!("{MEDIA_BASE_URL}/{key}")
    );
    assert_eq!(site["data"][0]["alt_text"], "Our office at dusk");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_duplicate_upload_conflicts(pool: PgPool) {
    let app = common::build_test_app(pool);
    let cookie = login(app.app()).await;
    upload_image(&app, &cookie, PNG_1X1).await;

    let response = post_multipart_auth(
        app.app(),
        "/api/v1/admin/gallery/images",
        &cookie,
        "copy.png",
        PNG_1X1,
        &[],
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(app.media.len().await, 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_upload_rejects_wrong_format(pool: PgPool) {
    let app = common::build_test_app(pool);
    let cookie = login(app.app()).await;

    let response = post_multipart_auth(
        app.app(),
        "/api/v1/admin/gallery/images",
        &cookie,
        "clip.mp4",
        b"not really a video",
        &[],
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(app.media.is_empty().await);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_video_upload_has_no_dimensions(pool: PgPool) {
    let app = common::build_test_app(pool);
    let cookie = login(app.app()).await;

    let response = post_multipart_auth(
        app.app(),
        "/api/v1/admin/gallery/videos",
        &cookie,
        "reel.mp4",
        b"\x00\x00\x00\x18ftypmp42",
        &[],
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    assert_eq!(json["data"]["media_kind"], "video");
    assert_eq!(json["data"]["content_type"], "video/mp4");
    assert!(json["data"]["width"].is_null());

    // Videos do not show up in the image gallery.
    let images = body_json(get(app.app(), "/api/v1/site/gallery/images").await).await;
    assert_eq!(images["data"], json!([]));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_captions(pool: PgPool) {
    let app = common::build_test_app(pool);
    let cookie = login(app.app()).await;
    let item = upload_image(&app, &cookie, PNG_1X1).await;
    let id = item["id"].as_i64().unwrap();

    let response = put_json_auth(
        app.app(),
        &format!("/api/v1/admin/gallery/images/{id}"),
        &cookie,
        json!({ "title": "Lobby" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"]["title"], "Lobby");
    assert_eq!(json["data"]["alt_text"], "Our office at dusk");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_item_is_scoped_to_its_kind(pool: PgPool) {
    let app = common::build_test_app(pool);
    let cookie = login(app.app()).await;
    let item = upload_image(&app, &cookie, PNG_1X1).await;
    let id = item["id"].as_i64().unwrap();

    let response = get_auth(
        app.app(),
        &format!("/api/v1/admin/gallery/videos/{id}"),
        &cookie,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_removes_object_and_prunes_order(pool: PgPool) {
    let app = common::build_test_app(pool);
    let cookie = login(app.app()).await;
    let first = upload_image(&app, &cookie, &png_variant(1)).await;
    let second = upload_image(&app, &cookie, &png_variant(2)).await;
    let first_id = first["id"].as_i64().unwrap();
    let second_id = second["id"].as_i64().unwrap();

    put_json_auth(
        app.app(),
        "/api/v1/admin/order/gallery-images",
        &cookie,
        json!({ "item_ids": [first_id.to_string(), second_id.to_string()] }),
    )
    .await;

    let response = delete_auth(
        app.app(),
        &format!("/api/v1/admin/gallery/images/{first_id}"),
        &cookie,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert!(!app.media.contains(first["media_key"].as_str().unwrap()).await);
    assert!(app.media.contains(second["media_key"].as_str().unwrap()).await);

    let record = body_json(
        get_auth(app.app(), "/api/v1/admin/order/gallery-images", &cookie).await,
    )
    .await;
    assert_eq!(record["data"]["item_ids"], json!([second_id.to_string()]));

    let response = delete_auth(
        app.app(),
        &format!("/api/v1/admin/gallery/images/{first_id}"),
        &cookie,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_bulk_delete_reports_deleted_ids(pool: PgPool) {
    let app = common::build_test_app(pool);
    let cookie = login(app.app()).await;
    let a = upload_image(&app, &cookie, &png_variant(1)).await["id"]
        .as_i64()
        .unwrap();
    let b = upload_image(&app, &cookie, &png_variant(2)).await["id"]
        .as_i64()
        .unwrap();
    let c = upload_image(&app, &cookie, &png_variant(3)).await["id"]
        .as_i64()
        .unwrap();

    let response = post_json_auth(
        app.app(),
        "/api/v1/admin/gallery/images/bulk-delete",
        &cookie,
        json!({ "ids": [c, 999_999, a, c] }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"]["deleted_ids"], json!([c, a]));
    assert_eq!(app.media.len().await, 1);

    let remaining = body_json(get_auth(app.app(), "/api/v1/admin/gallery/images", &cookie).await).await;
    assert_eq!(data_ids(&remaining), vec![b]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_bulk_delete_rejects_empty_request(pool: PgPool) {
    let app = common::build_test_app(pool);
    let cookie = login(app.app()).await;

    let response = post_json_auth(
        app.app(),
        "/api/v1/admin/gallery/images/bulk-delete",
        &cookie,
        json!({ "ids": [] }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_unknown_gallery_kind(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = get(app.app(), "/api/v1/site/gallery/audio").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
