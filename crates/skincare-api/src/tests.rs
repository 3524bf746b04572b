use std::sync::Arc;

use axum::{
  Router,
  body::{Body, to_bytes},
  http::{Request, StatusCode, header},
};
use serde_json::{Value, json};
use skincare_core::note::UploadDir;
use skincare_store_sqlite::SqliteStore;
use tempfile::TempDir;
use tower::ServiceExt;

use crate::api_router;

struct Harness {
  router:  Router,
  uploads: TempDir,
}

async fn harness() -> Harness {
  let store = SqliteStore::open_in_memory().await.unwrap();
  let uploads = tempfile::tempdir().unwrap();
  let router = api_router(Arc::new(store), UploadDir::new(uploads.path()));
  Harness { router, uploads }
}

async fn call(
  router: &Router,
  method: &str,
  uri: &str,
  body: Option<Value>,
) -> (StatusCode, Value) {
  let mut builder = Request::builder().method(method).uri(uri);
  let body = match body {
    Some(v) => {
      builder = builder.header(header::CONTENT_TYPE, "application/json");
      Body::from(v.to_string())
    }
    None => Body::empty(),
  };
  let resp = router.clone().oneshot(builder.body(body).unwrap()).await.unwrap();
  let status = resp.status();
  let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
  let value = if bytes.is_empty() {
    Value::Null
  } else {
    serde_json::from_slice(&bytes).unwrap()
  };
  (status, value)
}

fn foo_cleanser() -> Value {
  json!({
    "product": "Foo Cleanser",
    "ingredients": "water",
    "date": "2023",
    "skinType": "oily",
  })
}

fn oily() -> Value {
  json!({
    "skin_type": "oily",
    "moisturizer": "Gel Moisturizer",
    "face_cleanser": "Foam Cleanser",
    "serum": "Niacinamide",
    "sunscreen": "SPF 50",
  })
}

// ── Clients ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn create_client_returns_record_with_empty_notes() {
  let h = harness().await;
  let (status, body) = call(&h.router, "POST", "/clients/create", Some(foo_cleanser())).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body["product"], "Foo Cleanser");
  assert_eq!(body["skinType"], "oily");
  assert_eq!(body["notes"], json!([]));
  assert!(body["id"].as_i64().is_some());
}

#[tokio::test]
async fn short_product_is_rejected() {
  let h = harness().await;
  let (status, body) =
    call(&h.router, "POST", "/clients/create", Some(json!({ "product": "A" }))).await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
  assert_eq!(body["message"], "Product is missing, or is less than 2 characters");

  let (_, list) = call(&h.router, "GET", "/clients/", None).await;
  assert_eq!(list, json!([]));
}

#[tokio::test]
async fn duplicate_product_is_a_conflict() {
  let h = harness().await;
  call(&h.router, "POST", "/clients/create", Some(foo_cleanser())).await;
  let (status, body) = call(&h.router, "POST", "/clients/create", Some(foo_cleanser())).await;
  assert_eq!(status, StatusCode::CONFLICT);
  let message = body["message"].as_str().unwrap();
  assert!(message.contains("Foo Cleanser"), "message: {message}");

  let (_, list) = call(&h.router, "GET", "/clients", None).await;
  assert_eq!(list.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn client_missing_optional_columns_is_a_conflict() {
  let h = harness().await;
  let (status, _) =
    call(&h.router, "POST", "/clients/create", Some(json!({ "product": "Bare" }))).await;
  assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn get_update_and_delete_client() {
  let h = harness().await;
  let (_, created) = call(&h.router, "POST", "/clients/create", Some(foo_cleanser())).await;
  let id = created["id"].as_i64().unwrap();
  let uri = format!("/clients/{id}");

  let (status, got) = call(&h.router, "GET", &uri, None).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(got["product"], "Foo Cleanser");

  let (status, updated) =
    call(&h.router, "PUT", &uri, Some(json!({ "product": "Bar Cleanser" }))).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(updated["product"], "Bar Cleanser");
  assert_eq!(updated["ingredients"], "water");

  let (status, unchanged) = call(&h.router, "PUT", &uri, Some(json!({ "product": "" }))).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(unchanged["product"], "Bar Cleanser");

  let (status, _) = call(&h.router, "DELETE", &uri, None).await;
  assert_eq!(status, StatusCode::NO_CONTENT);
  let (status, _) = call(&h.router, "GET", &uri, None).await;
  assert_eq!(status, StatusCode::NOT_FOUND);
  let (status, _) = call(&h.router, "DELETE", &uri, None).await;
  assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn renaming_onto_existing_product_conflicts() {
  let h = harness().await;
  call(&h.router, "POST", "/clients/create", Some(foo_cleanser())).await;
  let mut other = foo_cleanser();
  other["product"] = json!("Other Cleanser");
  let (_, created) = call(&h.router, "POST", "/clients/create", Some(other)).await;
  let id = created["id"].as_i64().unwrap();

  let (status, body) = call(
    &h.router,
    "PUT",
    &format!("/clients/{id}"),
    Some(json!({ "product": "Foo Cleanser" })),
  )
  .await;
  assert_eq!(status, StatusCode::CONFLICT);
  assert_eq!(body["message"], "product already exists");
}

#[tokio::test]
async fn one_character_update_is_rejected() {
  let h = harness().await;
  let (_, created) = call(&h.router, "POST", "/clients/create", Some(foo_cleanser())).await;
  let uri = format!("/clients/{}", created["id"]);

  let (status, body) = call(&h.router, "PUT", &uri, Some(json!({ "product": "Z" }))).await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
  assert_eq!(body["message"], "Product is less than 2 characters");

  let (_, got) = call(&h.router, "GET", &uri, None).await;
  assert_eq!(got["product"], "Foo Cleanser");
}

#[tokio::test]
async fn malformed_requests_get_a_message_body() {
  let h = harness().await;
  let (status, body) =
    call(&h.router, "POST", "/clients/create", Some(json!({ "product": 42 }))).await;
  assert!(status.is_client_error(), "status: {status}");
  assert!(body["message"].is_string(), "body: {body}");

  let (status, body) = call(&h.router, "GET", "/clients/abc", None).await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
  assert!(body["message"].is_string(), "body: {body}");
}

#[tokio::test]
async fn update_unknown_client_is_not_found() {
  let h = harness().await;
  let (status, body) =
    call(&h.router, "PUT", "/clients/99", Some(json!({ "product": "Anything" }))).await;
  assert_eq!(status, StatusCode::NOT_FOUND);
  assert!(body["message"].is_string());
}

// ── Skin types ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn create_and_filter_skin_types() {
  let h = harness().await;
  let (status, created) = call(&h.router, "POST", "/skintype/create", Some(oily())).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(created["face_cleanser"], "Foam Cleanser");

  let mut dry = oily();
  dry["skin_type"] = json!("dry");
  call(&h.router, "POST", "/skintype/create", Some(dry)).await;

  let (_, all) = call(&h.router, "GET", "/skintype/", None).await;
  assert_eq!(all.as_array().unwrap().len(), 2);

  let (_, filtered) = call(&h.router, "GET", "/skintype/?skin_type=dry", None).await;
  let filtered = filtered.as_array().unwrap();
  assert_eq!(filtered.len(), 1);
  assert_eq!(filtered[0]["skin_type"], "dry");
}

#[tokio::test]
async fn skin_type_with_blank_moisturizer_is_rejected() {
  let h = harness().await;
  let mut body = oily();
  body["moisturizer"] = json!("");
  let (status, resp) = call(&h.router, "POST", "/skintype/create", Some(body)).await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
  let message = resp["message"].as_str().unwrap();
  assert!(message.starts_with("Moisturizer"), "message: {message}");
}

#[tokio::test]
async fn duplicate_skin_type_is_a_conflict() {
  let h = harness().await;
  call(&h.router, "POST", "/skintype/create", Some(oily())).await;
  let (status, _) = call(&h.router, "POST", "/skintype/create", Some(oily())).await;
  assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn update_skin_type_overwrites_only_given_fields() {
  let h = harness().await;
  let (_, created) = call(&h.router, "POST", "/skintype/create", Some(oily())).await;
  let id = created["id"].as_i64().unwrap();

  let (status, updated) = call(
    &h.router,
    "PUT",
    &format!("/skintype/{id}"),
    Some(json!({ "serum": "Retinol", "sunscreen": "" })),
  )
  .await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(updated["serum"], "Retinol");
  assert_eq!(updated["sunscreen"], "SPF 50");
  assert_eq!(updated["skin_type"], "oily");

  let (status, body) = call(
    &h.router,
    "PUT",
    &format!("/skintype/{id}"),
    Some(json!({ "moisturizer": "m" })),
  )
  .await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
  assert!(body["message"].as_str().unwrap().starts_with("Moisturizer"));

  let (status, _) = call(&h.router, "DELETE", &format!("/skintype/{id}"), None).await;
  assert_eq!(status, StatusCode::NO_CONTENT);
  let (status, _) = call(&h.router, "GET", &format!("/skintype/{id}"), None).await;
  assert_eq!(status, StatusCode::NOT_FOUND);
}

// ── Notes ────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn client_notes_inline_their_images() {
  let h = harness().await;
  std::fs::write(h.uploads.path().join("logo.png"), b"png-bytes").unwrap();

  let (_, created) = call(&h.router, "POST", "/clients/create", Some(foo_cleanser())).await;
  let id = created["id"].as_i64().unwrap();
  let notes_uri = format!("/clients/{id}/notes");

  let (status, note) = call(
    &h.router,
    "POST",
    &notes_uri,
    Some(json!({ "text": "Applied twice daily", "image": "logo.png" })),
  )
  .await;
  assert_eq!(status, StatusCode::CREATED);
  assert_eq!(note["parentKind"], "client");
  assert_eq!(note["parentId"], id);
  assert_eq!(note["base64"], "cG5nLWJ5dGVz");
  assert_eq!(note["imageMissing"], false);

  let (status, notes) = call(&h.router, "GET", &notes_uri, None).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(notes.as_array().unwrap().len(), 1);

  let (_, client) = call(&h.router, "GET", &format!("/clients/{id}"), None).await;
  assert_eq!(client["notes"][0]["text"], "Applied twice daily");
}

#[tokio::test]
async fn note_image_accepts_the_response_field_name() {
  let h = harness().await;
  std::fs::write(h.uploads.path().join("logo.png"), b"png-bytes").unwrap();
  let (_, created) = call(&h.router, "POST", "/clients/create", Some(foo_cleanser())).await;
  let id = created["id"].as_i64().unwrap();

  let (status, note) = call(
    &h.router,
    "POST",
    &format!("/clients/{id}/notes"),
    Some(json!({ "text": "Echoed back", "imagePath": "logo.png" })),
  )
  .await;
  assert_eq!(status, StatusCode::CREATED);
  assert_eq!(note["imagePath"], "logo.png");
  assert_eq!(note["base64"], "cG5nLWJ5dGVz");
  assert_eq!(note["imageMissing"], false);
}

#[tokio::test]
async fn missing_image_is_flagged_not_fatal() {
  let h = harness().await;
  let (_, created) = call(&h.router, "POST", "/clients/create", Some(foo_cleanser())).await;
  let id = created["id"].as_i64().unwrap();

  let (status, note) = call(
    &h.router,
    "POST",
    &format!("/clients/{id}/notes"),
    Some(json!({ "text": "No picture", "image": "gone.png" })),
  )
  .await;
  assert_eq!(status, StatusCode::CREATED);
  assert_eq!(note["imageMissing"], true);
  assert_eq!(note["base64"], Value::Null);

  let (status, list) = call(&h.router, "GET", "/clients/", None).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(list[0]["notes"][0]["imageMissing"], true);
}

#[tokio::test]
async fn skin_type_notes_are_listed_separately() {
  let h = harness().await;
  let (_, created) = call(&h.router, "POST", "/skintype/create", Some(oily())).await;
  let id = created["id"].as_i64().unwrap();
  let notes_uri = format!("/skintype/{id}/notes");

  let (status, note) =
    call(&h.router, "POST", &notes_uri, Some(json!({ "text": "Patch test first" }))).await;
  assert_eq!(status, StatusCode::CREATED);
  assert_eq!(note["parentKind"], "skin_type");

  let (_, notes) = call(&h.router, "GET", &notes_uri, None).await;
  assert_eq!(notes.as_array().unwrap().len(), 1);

  let note_id = note["id"].as_i64().unwrap();
  let (status, _) = call(&h.router, "DELETE", &format!("/notes/{note_id}"), None).await;
  assert_eq!(status, StatusCode::NO_CONTENT);
  let (_, notes) = call(&h.router, "GET", &notes_uri, None).await;
  assert_eq!(notes, json!([]));
}

#[tokio::test]
async fn notes_for_unknown_parent_are_not_found() {
  let h = harness().await;
  let (status, _) = call(&h.router, "GET", "/clients/42/notes", None).await;
  assert_eq!(status, StatusCode::NOT_FOUND);
  let (status, _) =
    call(&h.router, "POST", "/skintype/42/notes", Some(json!({ "text": "Orphan" }))).await;
  assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn blank_note_text_is_rejected() {
  let h = harness().await;
  let (_, created) = call(&h.router, "POST", "/clients/create", Some(foo_cleanser())).await;
  let id = created["id"].as_i64().unwrap();
  let (status, body) =
    call(&h.router, "POST", &format!("/clients/{id}/notes"), Some(json!({ "text": "  " }))).await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
  assert_eq!(body["message"], "Note text is missing");
}
