//! [`SqliteStore`] — the SQLite implementation of [`CatalogStore`].

use std::path::Path;

use rusqlite::OptionalExtension as _;

use marquee_core::{
  category::Category,
  content::{Content, NewContent},
  license::LicensePeriod,
  person::Person,
  store::CatalogStore,
};

use crate::{
  encode::{RawCategory, RawContent, RawLicensePeriod, RawPerson},
  schema::SCHEMA,
  Error, Result,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A Marquee catalog store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted. All
/// statements run on the connection's dedicated thread; each upsert wraps its
/// writes and the following re-read in one transaction, committed before the
/// call returns.
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

// ─── Shared SQL ──────────────────────────────────────────────────────────────

/// Column list matching `RawContent::from_row`'s indices.
const CONTENT_COLUMNS: &str = "id, ext_content_id, media_item_id, film_id, \
  permalink_token, watchlink_token, content_ordinal, program_type, title, \
  description, release_year, runtime_s, runtime_h, language, mpaa_rating, \
  ustv_rating, encode_type, license_start, license_end, first_seen";

/// Wildcard window match: a stored NULL bound matches any queried value, and
/// a queried NULL bound matches only stored NULLs (`datetime(NULL)` is NULL,
/// which `=` never satisfies).
const LICENSE_WINDOW_WHERE: &str = "content_id = ?1 \
  AND (license_start = datetime(?2) OR license_start IS NULL) \
  AND (license_end = datetime(?3) OR license_end IS NULL)";

fn license_row_id(
  conn: &rusqlite::Connection,
  content_id: i64,
  start: Option<&str>,
  end: Option<&str>,
) -> rusqlite::Result<Option<i64>> {
  conn
    .query_row(
      &format!("SELECT id FROM license WHERE {LICENSE_WINDOW_WHERE}"),
      rusqlite::params![content_id, start, end],
      |row| row.get(0),
    )
    .optional()
}

/// Record a license window, inserting only when the wildcard lookup finds no
/// matching row. A stored unbounded window therefore absorbs later concrete
/// observations of the same window instead of duplicating them, and all-NULL
/// triples dedupe even though UNIQUE treats NULLs as distinct.
///
/// Shared by `upsert_content` and `record_license_period`; the caller owns
/// the transaction.
fn insert_license_period(
  conn: &rusqlite::Connection,
  content_id: i64,
  start: Option<&str>,
  end: Option<&str>,
) -> rusqlite::Result<Option<i64>> {
  if let Some(id) = license_row_id(conn, content_id, start, end)? {
    return Ok(Some(id));
  }

  conn.execute(
    "INSERT OR IGNORE INTO license (content_id, license_start, license_end)
     VALUES (?1, datetime(?2), datetime(?3))",
    rusqlite::params![content_id, start, end],
  )?;

  license_row_id(conn, content_id, start, end)
}

// ─── CatalogStore impl ───────────────────────────────────────────────────────

impl CatalogStore for SqliteStore {
  type Error = Error;

  // ── Upserts ───────────────────────────────────────────────────────────────

  async fn upsert_category(
    &self,
    name: String,
    ext_category_id: Option<i64>,
  ) -> Result<i64> {
    let id: Option<i64> = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        tx.execute(
          "INSERT OR IGNORE INTO category (ext_category_id, name) VALUES (?1, ?2)",
          rusqlite::params![ext_category_id, name],
        )?;

        // Attach an external id to a row created before the feed supplied
        // one; an already-present external id is left alone.
        if ext_category_id.is_some() {
          tx.execute(
            "UPDATE category SET ext_category_id = ?1
             WHERE name = ?2 AND ext_category_id IS NULL",
            rusqlite::params![ext_category_id, name],
          )?;
        }

        let id = tx
          .query_row(
            "SELECT id FROM category WHERE name = ?1",
            rusqlite::params![name],
            |row| row.get(0),
          )
          .optional()?;
        tx.commit()?;
        Ok(id)
      })
      .await?;

    id.ok_or(Error::MissingAfterInsert("category"))
  }

  async fn upsert_person(&self, name: String) -> Result<i64> {
    let id: Option<i64> = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        tx.execute(
          "INSERT OR IGNORE INTO person (name) VALUES (?1)",
          rusqlite::params![name],
        )?;

        let id = tx
          .query_row(
            "SELECT id FROM person WHERE name = ?1",
            rusqlite::params![name],
            |row| row.get(0),
          )
          .optional()?;
        tx.commit()?;
        Ok(id)
      })
      .await?;

    id.ok_or(Error::MissingAfterInsert("person"))
  }

  async fn upsert_content(&self, input: NewContent) -> Result<i64> {
    let runtime_s = input.runtime_seconds();
    let runtime_h = runtime_s.map(|s| s as f64 / 3600.0);
    let mpaa_rating = input.rating("MPAA").map(str::to_owned);
    let ustv_rating = input.rating("US TV").map(str::to_owned);

    let (content_id, license_id): (Option<i64>, Option<i64>) = self
      .conn
      .call(move |conn| {
        // The subselects carry the matching row's id and first_seen into the
        // replacement row; for a fresh row they are NULL, so the id is
        // backend-assigned and first_seen falls back to now.
        let tx = conn.transaction()?;
        tx.execute(
          "INSERT OR REPLACE INTO content (
             id, ext_content_id, media_item_id, film_id, permalink_token,
             watchlink_token, content_ordinal, program_type, title,
             description, release_year, runtime_s, runtime_h, language,
             mpaa_rating, ustv_rating, encode_type, license_start,
             license_end, first_seen
           ) VALUES (
             (SELECT id FROM content WHERE ext_content_id = ?1 AND title = ?2),
             ?1, ?3, ?4, ?5, ?6, ?7, ?8, ?2, ?9, ?10, ?11, ?12, ?13, ?14,
             ?15, ?16, datetime(?17), datetime(?18),
             COALESCE(
               (SELECT first_seen FROM content
                WHERE ext_content_id = ?1 AND title = ?2),
               datetime('now')
             )
           )",
          rusqlite::params![
            input.ext_content_id,
            input.title,
            input.media_item_id,
            input.film_id,
            input.permalink_token,
            input.watchlink_token,
            input.content_ordinal,
            input.program_type,
            input.description,
            input.release_year,
            runtime_s,
            runtime_h,
            input.language,
            mpaa_rating,
            ustv_rating,
            input.encode_type,
            input.license_start,
            input.license_end,
          ],
        )?;

        let content_id: Option<i64> = tx
          .query_row(
            "SELECT id FROM content WHERE ext_content_id = ?1",
            rusqlite::params![input.ext_content_id],
            |row| row.get(0),
          )
          .optional()?;
        tx.commit()?;

        let Some(content_id) = content_id else {
          return Ok((None, None));
        };

        // License history rides along with every content upsert.
        let tx = conn.transaction()?;
        let license_id = insert_license_period(
          &tx,
          content_id,
          input.license_start.as_deref(),
          input.license_end.as_deref(),
        )?;
        tx.commit()?;

        Ok((Some(content_id), license_id))
      })
      .await?;

    let Some(id) = content_id else {
      return Err(Error::MissingAfterInsert("content"));
    };
    if license_id.is_none() {
      return Err(Error::MissingAfterInsert("license period"));
    }
    Ok(id)
  }

  // ── Associations ──────────────────────────────────────────────────────────

  async fn associate_category(
    &self,
    content_id: i64,
    category_id: i64,
  ) -> Result<()> {
    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT OR IGNORE INTO category_content (content_id, category_id)
           VALUES (?1, ?2)",
          rusqlite::params![content_id, category_id],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn associate_category_ext(
    &self,
    content_id: i64,
    ext_category_id: i64,
  ) -> Result<()> {
    let category = self
      .category_by_ext_id(ext_category_id)
      .await?
      .ok_or(Error::UnknownExtCategory(ext_category_id))?;

    self.associate_category(content_id, category.id).await
  }

  async fn associate_star(&self, content_id: i64, person_id: i64) -> Result<()> {
    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT OR IGNORE INTO starring (content_id, person_id) VALUES (?1, ?2)",
          rusqlite::params![content_id, person_id],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn associate_director(
    &self,
    content_id: i64,
    person_id: i64,
  ) -> Result<()> {
    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT OR IGNORE INTO directed_by (content_id, person_id) VALUES (?1, ?2)",
          rusqlite::params![content_id, person_id],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  // ── License history ───────────────────────────────────────────────────────

  async fn record_license_period(
    &self,
    content_id: i64,
    start: Option<String>,
    end: Option<String>,
  ) -> Result<i64> {
    let id: Option<i64> = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let id =
          insert_license_period(&tx, content_id, start.as_deref(), end.as_deref())?;
        tx.commit()?;
        Ok(id)
      })
      .await?;

    id.ok_or(Error::MissingAfterInsert("license period"))
  }

  // ── Reads ─────────────────────────────────────────────────────────────────

  async fn category_by_id(&self, id: i64) -> Result<Option<Category>> {
    let raw: Option<RawCategory> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT id, ext_category_id, name, first_seen
               FROM category WHERE id = ?1",
              rusqlite::params![id],
              RawCategory::from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawCategory::into_category).transpose()
  }

  async fn category_by_ext_id(
    &self,
    ext_category_id: i64,
  ) -> Result<Option<Category>> {
    let raw: Option<RawCategory> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT id, ext_category_id, name, first_seen
               FROM category WHERE ext_category_id = ?1
               ORDER BY first_seen DESC",
              rusqlite::params![ext_category_id],
              RawCategory::from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawCategory::into_category).transpose()
  }

  async fn category_by_name(&self, name: &str) -> Result<Option<Category>> {
    let name = name.to_owned();
    let raw: Option<RawCategory> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT id, ext_category_id, name, first_seen
               FROM category WHERE name = ?1",
              rusqlite::params![name],
              RawCategory::from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawCategory::into_category).transpose()
  }

  async fn person_by_id(&self, id: i64) -> Result<Option<Person>> {
    let raw: Option<RawPerson> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT id, name, first_seen FROM person WHERE id = ?1",
              rusqlite::params![id],
              RawPerson::from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawPerson::into_person).transpose()
  }

  async fn person_by_name(&self, name: &str) -> Result<Option<Person>> {
    let name = name.to_owned();
    let raw: Option<RawPerson> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT id, name, first_seen FROM person WHERE name = ?1",
              rusqlite::params![name],
              RawPerson::from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawPerson::into_person).transpose()
  }

  async fn content_by_id(&self, id: i64) -> Result<Option<Content>> {
    let raw: Option<RawContent> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!("SELECT {CONTENT_COLUMNS} FROM content WHERE id = ?1"),
              rusqlite::params![id],
              RawContent::from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawContent::into_content).transpose()
  }

  async fn content_by_ext_id(
    &self,
    ext_content_id: i64,
  ) -> Result<Option<Content>> {
    let raw: Option<RawContent> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!(
                "SELECT {CONTENT_COLUMNS} FROM content WHERE ext_content_id = ?1"
              ),
              rusqlite::params![ext_content_id],
              RawContent::from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawContent::into_content).transpose()
  }

  async fn content_by_title(&self, title: &str) -> Result<Vec<Content>> {
    let title = title.to_owned();
    let raws: Vec<RawContent> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn
          .prepare(&format!("SELECT {CONTENT_COLUMNS} FROM content WHERE title = ?1"))?;
        let rows = stmt
          .query_map(rusqlite::params![title], RawContent::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawContent::into_content).collect()
  }

  async fn content_by_category(&self, category_id: i64) -> Result<Vec<Content>> {
    let raws: Vec<RawContent> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {CONTENT_COLUMNS} FROM content
           JOIN category_content ON category_content.content_id = content.id
           WHERE category_content.category_id = ?1"
        ))?;
        let rows = stmt
          .query_map(rusqlite::params![category_id], RawContent::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawContent::into_content).collect()
  }

  async fn content_by_star(&self, person_id: i64) -> Result<Vec<Content>> {
    let raws: Vec<RawContent> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {CONTENT_COLUMNS} FROM content
           JOIN starring ON starring.content_id = content.id
           WHERE starring.person_id = ?1"
        ))?;
        let rows = stmt
          .query_map(rusqlite::params![person_id], RawContent::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawContent::into_content).collect()
  }

  async fn content_by_director(&self, person_id: i64) -> Result<Vec<Content>> {
    let raws: Vec<RawContent> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {CONTENT_COLUMNS} FROM content
           JOIN directed_by ON directed_by.content_id = content.id
           WHERE directed_by.person_id = ?1"
        ))?;
        let rows = stmt
          .query_map(rusqlite::params![person_id], RawContent::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawContent::into_content).collect()
  }

  async fn license_period(
    &self,
    content_id: i64,
    start: Option<String>,
    end: Option<String>,
  ) -> Result<Option<LicensePeriod>> {
    let raw: Option<RawLicensePeriod> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!(
                "SELECT id, content_id, license_start, license_end
                 FROM license WHERE {LICENSE_WINDOW_WHERE}"
              ),
              rusqlite::params![content_id, start, end],
              RawLicensePeriod::from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawLicensePeriod::into_license_period).transpose()
  }

  async fn license_periods(&self, content_id: i64) -> Result<Vec<LicensePeriod>> {
    let raws: Vec<RawLicensePeriod> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT id, content_id, license_start, license_end
           FROM license WHERE content_id = ?1 ORDER BY id",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![content_id], RawLicensePeriod::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws
      .into_iter()
      .map(RawLicensePeriod::into_license_period)
      .collect()
  }
}
