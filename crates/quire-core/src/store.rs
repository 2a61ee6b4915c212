//! The `PaperStore` trait and supporting types.
//!
//! The trait is implemented by storage backends (e.g. `quire-store-sqlite`).
//! Higher layers (`quire-cli`) depend on this abstraction, not on any
//! concrete backend.

use std::{
  future::Future,
  path::{Path, PathBuf},
};

use crate::{
  paper::{NewPaper, Paper},
  query::{AdvancedQuery, SearchField, SortColumn},
};

// ─── Import summary ──────────────────────────────────────────────────────────

/// Outcome of [`PaperStore::import_csv`]. Rows are independent: a malformed
/// row is counted and skipped without aborting the remainder.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportSummary {
  /// Rows successfully added to the store.
  pub imported: usize,
  /// Rows rejected (malformed CSV, failed insert).
  pub failed:   usize,
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over a paper catalogue backend.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes. Timestamps are server-assigned: `add` sets
/// `created_at == updated_at` from a single clock reading, and `update`
/// refreshes `updated_at` alone.
pub trait PaperStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── CRUD ──────────────────────────────────────────────────────────────

  /// Insert a new record and return it with its assigned id and timestamps.
  fn add(
    &self,
    input: NewPaper,
  ) -> impl Future<Output = Result<Paper, Self::Error>> + Send + '_;

  /// Replace all mutable fields of the record with the given id and refresh
  /// `updated_at`. Returns `Ok(false)` if no record has that id.
  fn update(
    &self,
    id: i64,
    input: NewPaper,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  /// Remove the record with the given id. Returns `Ok(false)` if it was not
  /// present.
  fn delete(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  /// Point lookup. Returns `None` if not found.
  fn get(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Option<Paper>, Self::Error>> + Send + '_;

  // ── Queries ───────────────────────────────────────────────────────────

  /// Full scan ordered by the given column and direction.
  fn list(
    &self,
    sort: SortColumn,
    descending: bool,
  ) -> impl Future<Output = Result<Vec<Paper>, Self::Error>> + Send + '_;

  /// Substring search over one field (or all text fields), most recently
  /// updated first. The empty keyword matches every record.
  fn search<'a>(
    &'a self,
    keyword: &'a str,
    field: SearchField,
  ) -> impl Future<Output = Result<Vec<Paper>, Self::Error>> + Send + 'a;

  /// Conjunctive multi-predicate search, most recently updated first. With
  /// no active predicate, equivalent to `list(SortColumn::Id, false)`.
  fn advanced_search<'a>(
    &'a self,
    query: &'a AdvancedQuery,
  ) -> impl Future<Output = Result<Vec<Paper>, Self::Error>> + Send + 'a;

  /// Total record count.
  fn count(
    &self,
  ) -> impl Future<Output = Result<u64, Self::Error>> + Send + '_;

  // ── Backup and exchange ───────────────────────────────────────────────

  /// Copy the entire catalogue to `dest`, creating parent directories as
  /// needed.
  fn backup<'a>(
    &'a self,
    dest: &'a Path,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;

  /// Write a timestamped backup under the configured backup directory, then
  /// delete the oldest generations beyond `max_generations`. Returns the
  /// path of the backup just written.
  fn auto_backup(
    &self,
    max_generations: usize,
  ) -> impl Future<Output = Result<PathBuf, Self::Error>> + Send + '_;

  /// Write every record as one CSV row (UTF-8 with byte-order mark).
  /// Returns the number of rows written; zero records is a no-op success
  /// that does not touch `dest`.
  fn export_csv<'a>(
    &'a self,
    dest: &'a Path,
  ) -> impl Future<Output = Result<u64, Self::Error>> + Send + 'a;

  /// Add one record per CSV row of `src`. Per-row failures are counted, not
  /// fatal; failure to open or read the file at all is an error.
  fn import_csv<'a>(
    &'a self,
    src: &'a Path,
  ) -> impl Future<Output = Result<ImportSummary, Self::Error>> + Send + 'a;
}
