//! Article — the single domain entity, a blog/news-style post record.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A persisted article row. `id` is database-assigned, immutable, and never
/// reused within a live table.
///
/// The two multi-word fields keep their historical camelCase wire names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
  pub id:           i64,
  pub title:        String,
  pub author:       String,
  #[serde(rename = "authorUrl")]
  pub author_url:   Option<String>,
  pub category:     Option<String>,
  #[serde(rename = "publishedOn")]
  pub published_on: Option<NaiveDate>,
  pub body:         String,
}

/// An article as submitted by a client (or read from the seed dataset) —
/// everything except the id.
///
/// `title`, `author`, and `body` must be non-empty; that constraint is
/// enforced by the database schema, not here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewArticle {
  pub title:        String,
  pub author:       String,
  #[serde(rename = "authorUrl")]
  pub author_url:   Option<String>,
  pub category:     Option<String>,
  #[serde(rename = "publishedOn")]
  pub published_on: Option<NaiveDate>,
  pub body:         String,
}
