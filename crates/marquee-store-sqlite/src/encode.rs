//! Decoding helpers between raw SQLite columns and the typed domain structs.
//!
//! All timestamps are stored in SQLite's own `datetime()` text form
//! (`YYYY-MM-DD HH:MM:SS`, UTC): the `first_seen` defaults and the
//! `datetime(?)` coercion applied to license bounds both produce it.

use chrono::{DateTime, NaiveDateTime, Utc};
use marquee_core::{
  category::Category, content::Content, license::LicensePeriod, person::Person,
};

use crate::{Error, Result};

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

const SQLITE_DATETIME: &str = "%Y-%m-%d %H:%M:%S";

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  NaiveDateTime::parse_from_str(s, SQLITE_DATETIME)
    .map(|dt| dt.and_utc())
    .map_err(|e| Error::DateParse(format!("{s:?}: {e}")))
}

pub fn decode_dt_opt(s: Option<&str>) -> Result<Option<DateTime<Utc>>> {
  s.map(decode_dt).transpose()
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw column values read directly from a `category` row.
pub struct RawCategory {
  pub id:              i64,
  pub ext_category_id: Option<i64>,
  pub name:            String,
  pub first_seen:      String,
}

impl RawCategory {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:              row.get(0)?,
      ext_category_id: row.get(1)?,
      name:            row.get(2)?,
      first_seen:      row.get(3)?,
    })
  }

  pub fn into_category(self) -> Result<Category> {
    Ok(Category {
      id:              self.id,
      ext_category_id: self.ext_category_id,
      name:            self.name,
      first_seen:      decode_dt(&self.first_seen)?,
    })
  }
}

/// Raw column values read directly from a `person` row.
pub struct RawPerson {
  pub id:         i64,
  pub name:       String,
  pub first_seen: String,
}

impl RawPerson {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:         row.get(0)?,
      name:       row.get(1)?,
      first_seen: row.get(2)?,
    })
  }

  pub fn into_person(self) -> Result<Person> {
    Ok(Person {
      id:         self.id,
      name:       self.name,
      first_seen: decode_dt(&self.first_seen)?,
    })
  }
}

/// Raw column values read directly from a `content` row, in the column order
/// of the store's `CONTENT_COLUMNS` list.
pub struct RawContent {
  pub id:              i64,
  pub ext_content_id:  i64,
  pub media_item_id:   i64,
  pub film_id:         i64,
  pub permalink_token: Option<String>,
  pub watchlink_token: Option<String>,
  pub content_ordinal: Option<i64>,
  pub program_type:    Option<String>,
  pub title:           Option<String>,
  pub description:     Option<String>,
  pub release_year:    Option<i64>,
  pub runtime_s:       Option<i64>,
  pub runtime_h:       Option<f64>,
  pub language:        Option<String>,
  pub mpaa_rating:     Option<String>,
  pub ustv_rating:     Option<String>,
  pub encode_type:     Option<String>,
  pub license_start:   Option<String>,
  pub license_end:     Option<String>,
  pub first_seen:      String,
}

impl RawContent {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:              row.get(0)?,
      ext_content_id:  row.get(1)?,
      media_item_id:   row.get(2)?,
      film_id:         row.get(3)?,
      permalink_token: row.get(4)?,
      watchlink_token: row.get(5)?,
      content_ordinal: row.get(6)?,
      program_type:    row.get(7)?,
      title:           row.get(8)?,
      description:     row.get(9)?,
      release_year:    row.get(10)?,
      runtime_s:       row.get(11)?,
      runtime_h:       row.get(12)?,
      language:        row.get(13)?,
      mpaa_rating:     row.get(14)?,
      ustv_rating:     row.get(15)?,
      encode_type:     row.get(16)?,
      license_start:   row.get(17)?,
      license_end:     row.get(18)?,
      first_seen:      row.get(19)?,
    })
  }

  pub fn into_content(self) -> Result<Content> {
    Ok(Content {
      id:              self.id,
      ext_content_id:  self.ext_content_id,
      media_item_id:   self.media_item_id,
      film_id:         self.film_id,
      permalink_token: self.permalink_token,
      watchlink_token: self.watchlink_token,
      content_ordinal: self.content_ordinal,
      program_type:    self.program_type,
      title:           self.title,
      description:     self.description,
      release_year:    self.release_year,
      runtime_s:       self.runtime_s,
      runtime_h:       self.runtime_h,
      language:        self.language,
      mpaa_rating:     self.mpaa_rating,
      ustv_rating:     self.ustv_rating,
      encode_type:     self.encode_type,
      license_start:   decode_dt_opt(self.license_start.as_deref())?,
      license_end:     decode_dt_opt(self.license_end.as_deref())?,
      first_seen:      decode_dt(&self.first_seen)?,
    })
  }
}

/// Raw column values read directly from a `license` row.
pub struct RawLicensePeriod {
  pub id:            i64,
  pub content_id:    i64,
  pub license_start: Option<String>,
  pub license_end:   Option<String>,
}

impl RawLicensePeriod {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:            row.get(0)?,
      content_id:    row.get(1)?,
      license_start: row.get(2)?,
      license_end:   row.get(3)?,
    })
  }

  pub fn into_license_period(self) -> Result<LicensePeriod> {
    Ok(LicensePeriod {
      id:            self.id,
      content_id:    self.content_id,
      license_start: decode_dt_opt(self.license_start.as_deref())?,
      license_end:   decode_dt_opt(self.license_end.as_deref())?,
    })
  }
}
