//! [`SqliteStore`] — the SQLite implementation of [`ArticleStore`].

use std::path::Path;

use chrono::NaiveDate;

use byline_core::{
  article::{Article, NewArticle},
  store::ArticleStore,
};

use crate::{Error, Result, schema::SCHEMA};

const INSERT_SQL: &str = "INSERT INTO articles
   (title, author, author_url, category, published_on, body)
 VALUES (?1, ?2, ?3, ?4, ?5, ?6)";

const LIST_SQL: &str =
  "SELECT id, title, author, author_url, category, published_on, body
   FROM articles ORDER BY id";

// ─── Store ───────────────────────────────────────────────────────────────────

/// A Byline article store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted. Every clone
/// talks to the same connection, so statement execution is serialized by the
/// connection's thread.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

// ─── Row encoding ────────────────────────────────────────────────────────────

fn encode_date(date: &Option<NaiveDate>) -> Option<String> {
  date.as_ref().map(|d| d.format("%Y-%m-%d").to_string())
}

fn decode_date(text: Option<String>) -> Result<Option<NaiveDate>> {
  text
    .map(|s| {
      NaiveDate::parse_from_str(&s, "%Y-%m-%d")
        .map_err(|e| Error::DateParse(format!("{s:?}: {e}")))
    })
    .transpose()
}

/// An article row as it comes off the wire from SQLite, date still encoded.
struct RawArticle {
  id:           i64,
  title:        String,
  author:       String,
  author_url:   Option<String>,
  category:     Option<String>,
  published_on: Option<String>,
  body:         String,
}

impl RawArticle {
  fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:           row.get(0)?,
      title:        row.get(1)?,
      author:       row.get(2)?,
      author_url:   row.get(3)?,
      category:     row.get(4)?,
      published_on: row.get(5)?,
      body:         row.get(6)?,
    })
  }

  fn into_article(self) -> Result<Article> {
    Ok(Article {
      id:           self.id,
      title:        self.title,
      author:       self.author,
      author_url:   self.author_url,
      category:     self.category,
      published_on: decode_date(self.published_on)?,
      body:         self.body,
    })
  }
}

// ─── ArticleStore impl ───────────────────────────────────────────────────────

impl ArticleStore for SqliteStore {
  type Error = Error;

  async fn list(&self) -> Result<Vec<Article>> {
    let raws: Vec<RawArticle> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(LIST_SQL)?;
        let rows = stmt
          .query_map([], RawArticle::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawArticle::into_article).collect()
  }

  async fn create(&self, input: NewArticle) -> Result<Article> {
    let published_on_str = encode_date(&input.published_on);
    let row = input.clone();

    let id: i64 = self
      .conn
      .call(move |conn| {
        conn.execute(
          INSERT_SQL,
          rusqlite::params![
            row.title,
            row.author,
            row.author_url,
            row.category,
            published_on_str,
            row.body,
          ],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await?;

    Ok(Article {
      id,
      title:        input.title,
      author:       input.author,
      author_url:   input.author_url,
      category:     input.category,
      published_on: input.published_on,
      body:         input.body,
    })
  }

  async fn update(&self, id: i64, input: NewArticle) -> Result<usize> {
    let published_on_str = encode_date(&input.published_on);

    let affected = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "UPDATE articles
           SET title = ?1, author = ?2, author_url = ?3,
               category = ?4, published_on = ?5, body = ?6
           WHERE id = ?7",
          rusqlite::params![
            input.title,
            input.author,
            input.author_url,
            input.category,
            published_on_str,
            input.body,
            id,
          ],
        )?)
      })
      .await?;

    Ok(affected)
  }

  async fn delete(&self, id: i64) -> Result<usize> {
    let affected = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "DELETE FROM articles WHERE id = ?1",
          rusqlite::params![id],
        )?)
      })
      .await?;

    Ok(affected)
  }

  async fn delete_all(&self) -> Result<usize> {
    let affected = self
      .conn
      .call(|conn| Ok(conn.execute("DELETE FROM articles", [])?))
      .await?;

    Ok(affected)
  }

  async fn seed_if_empty(&self, records: Vec<NewArticle>) -> Result<usize> {
    let inserted = self
      .conn
      .call(move |conn| {
        let count: i64 =
          conn.query_row("SELECT COUNT(*) FROM articles", [], |r| r.get(0))?;
        if count > 0 {
          return Ok(0);
        }

        // Each insert is independent: a bad record is logged and skipped,
        // the rest still go in.
        let mut inserted = 0usize;
        for rec in records {
          let published_on_str = encode_date(&rec.published_on);
          match conn.execute(
            INSERT_SQL,
            rusqlite::params![
              rec.title,
              rec.author,
              rec.author_url,
              rec.category,
              published_on_str,
              rec.body,
            ],
          ) {
            Ok(_) => inserted += 1,
            Err(e) => {
              tracing::warn!(title = %rec.title, error = %e, "seed insert failed");
            }
          }
        }
        Ok(inserted)
      })
      .await?;

    Ok(inserted)
  }
}
