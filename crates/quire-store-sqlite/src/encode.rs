//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are stored as fixed-width RFC 3339 strings with microsecond
//! precision: every field is zero-padded, so lexicographic order over the
//! stored text equals chronological order and `ORDER BY updated_at` needs no
//! parsing.

use chrono::{DateTime, SecondsFormat, Utc};
use quire_core::paper::Paper;

use crate::{Error, Result};

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String {
  dt.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── Row type ────────────────────────────────────────────────────────────────

/// Raw values read directly from a `papers` row, in column order.
pub struct RawPaper {
  pub id:         i64,
  pub title:      String,
  pub author:     String,
  pub year:       Option<i32>,
  pub pdf_path:   String,
  pub image_path: String,
  pub memo:       String,
  pub created_at: String,
  pub updated_at: String,
}

impl RawPaper {
  /// Read one row of the canonical column list
  /// (`id, title, author, year, pdf_path, image_path, memo, created_at,
  /// updated_at`).
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:         row.get(0)?,
      title:      row.get(1)?,
      author:     row.get(2)?,
      year:       row.get(3)?,
      pdf_path:   row.get(4)?,
      image_path: row.get(5)?,
      memo:       row.get(6)?,
      created_at: row.get(7)?,
      updated_at: row.get(8)?,
    })
  }

  pub fn into_paper(self) -> Result<Paper> {
    Ok(Paper {
      id:         self.id,
      title:      self.title,
      author:     self.author,
      year:       self.year,
      pdf_path:   self.pdf_path,
      image_path: self.image_path,
      memo:       self.memo,
      created_at: decode_dt(&self.created_at)?,
      updated_at: decode_dt(&self.updated_at)?,
    })
  }
}
