//! Core types and trait definitions for the Byline article service.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! All other crates depend on it; it depends on nothing proprietary.

pub mod article;
pub mod store;

pub use article::{Article, NewArticle};
pub use store::ArticleStore;
