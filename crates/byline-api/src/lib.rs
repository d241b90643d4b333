//! HTTP layer for Byline.
//!
//! Exposes an axum [`Router`] implementing the articles CRUD API backed by
//! any [`ArticleStore`], plus static file service for the bundled client
//! pages.

pub mod articles;
pub mod error;

pub use error::ApiError;

use std::{path::PathBuf, sync::Arc};

use axum::{
  Router,
  routing::{get, put},
};
use byline_core::store::ArticleStore;
use serde::Deserialize;
use tower_http::{
  services::{ServeDir, ServeFile},
  trace::TraceLayer,
};

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` merged with
/// `BYLINE_*` environment variables. Every field has a default, so the
/// server runs with no config file at all.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
  #[serde(default = "default_host")]
  pub host:       String,
  #[serde(default = "default_port")]
  pub port:       u16,
  /// SQLite database file.
  #[serde(default = "default_db_path")]
  pub db_path:    PathBuf,
  /// Directory holding the static client pages.
  #[serde(default = "default_public_dir")]
  pub public_dir: PathBuf,
  /// Bundled JSON dataset used to populate an empty table at first run.
  #[serde(default = "default_seed_path")]
  pub seed_path:  PathBuf,
}

fn default_host() -> String {
  "0.0.0.0".to_string()
}

fn default_port() -> u16 {
  3000
}

fn default_db_path() -> PathBuf {
  PathBuf::from("byline.db")
}

fn default_public_dir() -> PathBuf {
  PathBuf::from("public")
}

fn default_seed_path() -> PathBuf {
  PathBuf::from("data/seed_articles.json")
}

impl Default for ServerConfig {
  fn default() -> Self {
    Self {
      host:       default_host(),
      port:       default_port(),
      db_path:    default_db_path(),
      public_dir: default_public_dir(),
      seed_path:  default_seed_path(),
    }
  }
}

// ─── Application state ────────────────────────────────────────────────────────

/// Shared state threaded through all axum handlers.
///
/// The store handle is opened once before the listener starts and injected
/// here; there is no per-request connection lifecycle.
#[derive(Clone)]
pub struct AppState<S: ArticleStore> {
  pub store:  Arc<S>,
  pub config: Arc<ServerConfig>,
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the axum [`Router`] for the article server.
pub fn router<S>(state: AppState<S>) -> Router
where
  S: ArticleStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let public_dir = state.config.public_dir.clone();

  Router::new()
    .route(
      "/articles",
      get(articles::list::<S>)
        .post(articles::create::<S>)
        .delete(articles::delete_all::<S>),
    )
    .route(
      "/articles/{id}",
      put(articles::update::<S>).delete(articles::delete_one::<S>),
    )
    .route_service("/new", ServeFile::new(public_dir.join("new.html")))
    .fallback_service(ServeDir::new(public_dir))
    .layer(TraceLayer::new_for_http())
    .with_state(state)
}

// ─── Integration tests ────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;

  use axum::{
    body::Body,
    http::{Request, StatusCode, header},
  };
  use byline_store_sqlite::SqliteStore;
  use chrono::NaiveDate;
  use tower::ServiceExt as _;

  async fn make_state() -> AppState<SqliteStore> {
    let store = SqliteStore::open_in_memory().await.unwrap();
    AppState {
      store:  Arc::new(store),
      config: Arc::new(ServerConfig::default()),
    }
  }

  async fn oneshot_raw(
    state:  AppState<SqliteStore>,
    method: &str,
    uri:    &str,
    body:   &str,
  ) -> axum::response::Response {
    let mut builder = Request::builder().method(method).uri(uri);
    if !body.is_empty() {
      builder = builder.header(header::CONTENT_TYPE, "application/json");
    }
    let req = builder.body(Body::from(body.to_string())).unwrap();
    router(state).oneshot(req).await.unwrap()
  }

  async fn body_string(resp: axum::response::Response) -> String {
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
      .await
      .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
  }

  const SAMPLE: &str = r#"{
    "title": "T",
    "author": "A",
    "authorUrl": "",
    "category": "tech",
    "publishedOn": "2020-01-01",
    "body": "B"
  }"#;

  // ── List ────────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn list_empty_table_returns_empty_array() {
    let state = make_state().await;
    let resp  = oneshot_raw(state, "GET", "/articles", "").await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_string(resp).await, "[]");
  }

  // ── Create ──────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn post_then_get_round_trips_the_article() {
    let state = make_state().await;

    let resp = oneshot_raw(state.clone(), "POST", "/articles", SAMPLE).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_string(resp).await, "insert complete");

    let resp = oneshot_raw(state, "GET", "/articles", "").await;
    assert_eq!(resp.status(), StatusCode::OK);

    let listed: Vec<serde_json::Value> =
      serde_json::from_str(&body_string(resp).await).unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0]["title"], "T");
    assert_eq!(listed[0]["author"], "A");
    assert_eq!(listed[0]["authorUrl"], "");
    assert_eq!(listed[0]["category"], "tech");
    assert_eq!(listed[0]["publishedOn"], "2020-01-01");
    assert_eq!(listed[0]["body"], "B");
    assert!(listed[0]["id"].is_i64());
  }

  #[tokio::test]
  async fn post_violating_schema_constraint_returns_500_with_error_body() {
    let state = make_state().await;

    // Empty title trips the CHECK constraint; the handler must answer with
    // an explicit error response, never leave the request hanging.
    let body = r#"{"title":"","author":"A","body":"B",
                   "authorUrl":null,"category":null,"publishedOn":null}"#;
    let resp = oneshot_raw(state, "POST", "/articles", body).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let err: serde_json::Value =
      serde_json::from_str(&body_string(resp).await).unwrap();
    assert!(err["error"].is_string());
  }

  // ── Update ──────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn put_rewrites_every_field() {
    let state = make_state().await;
    oneshot_raw(state.clone(), "POST", "/articles", SAMPLE).await;

    let id = {
      let listed: Vec<serde_json::Value> = serde_json::from_str(
        &body_string(oneshot_raw(state.clone(), "GET", "/articles", "").await)
          .await,
      )
      .unwrap();
      listed[0]["id"].as_i64().unwrap()
    };

    let replacement = r#"{
      "title": "T2", "author": "A", "authorUrl": null,
      "category": "tech", "publishedOn": "2020-01-01", "body": "B"
    }"#;
    let resp = oneshot_raw(
      state.clone(),
      "PUT",
      &format!("/articles/{id}"),
      replacement,
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_string(resp).await, "update complete");

    let listed: Vec<serde_json::Value> = serde_json::from_str(
      &body_string(oneshot_raw(state, "GET", "/articles", "").await).await,
    )
    .unwrap();
    assert_eq!(listed[0]["title"], "T2");
    // Replaced wholesale: authorUrl went from "" to null.
    assert!(listed[0]["authorUrl"].is_null());
  }

  #[tokio::test]
  async fn put_unknown_id_still_reports_success() {
    let state = make_state().await;
    let resp  = oneshot_raw(state, "PUT", "/articles/9999", SAMPLE).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_string(resp).await, "update complete");
  }

  // ── Delete ──────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn delete_one_removes_the_row() {
    let state = make_state().await;
    oneshot_raw(state.clone(), "POST", "/articles", SAMPLE).await;

    let id = {
      let listed: Vec<serde_json::Value> = serde_json::from_str(
        &body_string(oneshot_raw(state.clone(), "GET", "/articles", "").await)
          .await,
      )
      .unwrap();
      listed[0]["id"].as_i64().unwrap()
    };

    let resp =
      oneshot_raw(state.clone(), "DELETE", &format!("/articles/{id}"), "").await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_string(resp).await, "Delete complete");

    let resp = oneshot_raw(state, "GET", "/articles", "").await;
    assert_eq!(body_string(resp).await, "[]");
  }

  #[tokio::test]
  async fn delete_unknown_id_still_reports_success() {
    let state = make_state().await;
    oneshot_raw(state.clone(), "POST", "/articles", SAMPLE).await;

    let resp = oneshot_raw(state.clone(), "DELETE", "/articles/424242", "").await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_string(resp).await, "Delete complete");

    let listed: Vec<serde_json::Value> = serde_json::from_str(
      &body_string(oneshot_raw(state, "GET", "/articles", "").await).await,
    )
    .unwrap();
    assert_eq!(listed.len(), 1);
  }

  #[tokio::test]
  async fn delete_all_empties_the_table() {
    let state = make_state().await;
    oneshot_raw(state.clone(), "POST", "/articles", SAMPLE).await;
    oneshot_raw(state.clone(), "POST", "/articles", SAMPLE).await;

    let resp = oneshot_raw(state.clone(), "DELETE", "/articles", "").await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_string(resp).await, "Delete complete");

    let resp = oneshot_raw(state, "GET", "/articles", "").await;
    assert_eq!(body_string(resp).await, "[]");
  }

  // ── Date handling ───────────────────────────────────────────────────────────

  #[tokio::test]
  async fn published_on_round_trips_as_iso_date() {
    let state = make_state().await;
    oneshot_raw(state.clone(), "POST", "/articles", SAMPLE).await;

    let listed: Vec<serde_json::Value> = serde_json::from_str(
      &body_string(oneshot_raw(state, "GET", "/articles", "").await).await,
    )
    .unwrap();

    let date: NaiveDate = serde_json::from_value(
      listed[0]["publishedOn"].clone(),
    )
    .unwrap();
    assert_eq!(date, NaiveDate::from_ymd_opt(2020, 1, 1).unwrap());
  }
}
