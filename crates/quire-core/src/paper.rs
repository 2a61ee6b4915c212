//! Paper — the single entity of the catalogue.
//!
//! A paper is a mutable record: `update` replaces every mutable field
//! wholesale. The id and `created_at` are assigned once by the store and
//! never change; `updated_at` is refreshed by the store on every successful
//! update.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A catalogued paper, as persisted.
///
/// Field order matters: it is the CSV export column order
/// (`id,title,author,year,pdf_path,image_path,memo,created_at,updated_at`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paper {
  pub id:         i64,
  pub title:      String,
  pub author:     String,
  pub year:       Option<i32>,
  /// Opaque filesystem reference; the store never opens or validates it.
  pub pdf_path:   String,
  pub image_path: String,
  pub memo:       String,
  /// Server-assigned; never changes after creation.
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

/// Input to [`crate::store::PaperStore::add`] and
/// [`crate::store::PaperStore::update`].
/// Timestamps are always set by the store; they are not accepted from
/// callers.
#[derive(Debug, Clone, Default)]
pub struct NewPaper {
  /// Required non-empty at the application boundary. The store itself
  /// accepts what it is given.
  pub title:      String,
  pub author:     String,
  pub year:       Option<i32>,
  pub pdf_path:   String,
  pub image_path: String,
  pub memo:       String,
}

impl NewPaper {
  /// Convenience constructor with all optional fields empty.
  pub fn new(title: impl Into<String>) -> Self {
    Self {
      title: title.into(),
      ..Self::default()
    }
  }
}
