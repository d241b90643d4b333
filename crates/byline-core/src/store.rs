//! The `ArticleStore` trait.
//!
//! The trait is implemented by storage backends (e.g. `byline-store-sqlite`).
//! The HTTP layer (`byline-api`) depends on this abstraction, not on any
//! concrete backend.

use std::future::Future;

use crate::article::{Article, NewArticle};

/// Abstraction over an article store backend.
///
/// Every operation maps to exactly one parameterized statement against the
/// backing table. Mutations report rows affected rather than erroring on
/// unknown ids — a zero-row update or delete is indistinguishable from
/// success at this layer, by contract.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait ArticleStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Return every article, ordered by ascending id.
  fn list(
    &self,
  ) -> impl Future<Output = Result<Vec<Article>, Self::Error>> + Send + '_;

  /// Insert one article and return it with its database-assigned id.
  fn create(
    &self,
    input: NewArticle,
  ) -> impl Future<Output = Result<Article, Self::Error>> + Send + '_;

  /// Rewrite every column of the row matching `id` (full replacement, never
  /// a merge). Returns rows affected; zero means the id did not exist.
  fn update(
    &self,
    id: i64,
    input: NewArticle,
  ) -> impl Future<Output = Result<usize, Self::Error>> + Send + '_;

  /// Delete the row matching `id`. Returns rows affected.
  fn delete(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<usize, Self::Error>> + Send + '_;

  /// Delete every row. Returns rows affected.
  fn delete_all(
    &self,
  ) -> impl Future<Output = Result<usize, Self::Error>> + Send + '_;

  /// Populate an empty table from `records`, one insert per record.
  ///
  /// If the table already holds any rows, does nothing. Individual insert
  /// failures are logged and do not abort the remaining inserts. Returns the
  /// number of rows actually inserted. Intended to run exactly once, after
  /// schema creation and before the listener accepts traffic.
  fn seed_if_empty(
    &self,
    records: Vec<NewArticle>,
  ) -> impl Future<Output = Result<usize, Self::Error>> + Send + '_;
}
