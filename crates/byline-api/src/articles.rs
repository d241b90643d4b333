//! Handlers for `/articles` endpoints.
//!
//! | Method   | Path | Response body on success |
//! |----------|------|--------------------------|
//! | `GET`    | `/articles` | JSON array of [`Article`] |
//! | `POST`   | `/articles` | `insert complete` |
//! | `PUT`    | `/articles/:id` | `update complete` |
//! | `DELETE` | `/articles/:id` | `Delete complete` |
//! | `DELETE` | `/articles` | `Delete complete` |
//!
//! The confirmation strings (including the capitalised `Delete`) are a wire
//! contract with the client pages; don't normalise them.
//!
//! Mutations by id succeed even when the id matches nothing — the client
//! cannot tell a zero-row update or delete apart from a real one.

use axum::{
  Json,
  extract::{Path, State},
};
use byline_core::{
  article::{Article, NewArticle},
  store::ArticleStore,
};

use crate::{AppState, error::ApiError};

/// `GET /articles`
pub async fn list<S>(
  State(state): State<AppState<S>>,
) -> Result<Json<Vec<Article>>, ApiError>
where
  S: ArticleStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let articles = state
    .store
    .list()
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(articles))
}

/// `POST /articles` — body: a [`NewArticle`].
pub async fn create<S>(
  State(state): State<AppState<S>>,
  Json(body): Json<NewArticle>,
) -> Result<&'static str, ApiError>
where
  S: ArticleStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  state
    .store
    .create(body)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok("insert complete")
}

/// `PUT /articles/:id` — rewrites every column of the row.
pub async fn update<S>(
  State(state): State<AppState<S>>,
  Path(id): Path<i64>,
  Json(body): Json<NewArticle>,
) -> Result<&'static str, ApiError>
where
  S: ArticleStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  state
    .store
    .update(id, body)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok("update complete")
}

/// `DELETE /articles/:id`
pub async fn delete_one<S>(
  State(state): State<AppState<S>>,
  Path(id): Path<i64>,
) -> Result<&'static str, ApiError>
where
  S: ArticleStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  state
    .store
    .delete(id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok("Delete complete")
}

/// `DELETE /articles`
pub async fn delete_all<S>(
  State(state): State<AppState<S>>,
) -> Result<&'static str, ApiError>
where
  S: ArticleStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  state
    .store
    .delete_all()
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok("Delete complete")
}
