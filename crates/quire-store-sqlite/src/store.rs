//! [`SqliteStore`] — the SQLite implementation of [`PaperStore`].

use std::{
  io::Write as _,
  path::{Path, PathBuf},
};

use chrono::Utc;
use rusqlite::OptionalExtension as _;
use tracing::{info, warn};

use quire_core::{
  paper::{NewPaper, Paper},
  query::{AdvancedQuery, SearchField, SortColumn},
  store::{ImportSummary, PaperStore},
};

use crate::{
  Error, Result,
  backup::{generation_file_name, prune_generations},
  csv_io::{ImportRow, UTF8_BOM, strip_bom},
  encode::{RawPaper, encode_dt},
  schema::SCHEMA,
};

/// The canonical column list; every SELECT uses it so [`RawPaper::from_row`]
/// reads by fixed position.
const COLUMNS: &str =
  "id, title, author, year, pdf_path, image_path, memo, created_at, updated_at";

// ─── Configuration ───────────────────────────────────────────────────────────

/// Storage locations, passed explicitly into [`SqliteStore::open`]. The
/// defaults mirror the conventional layout of a local installation.
#[derive(Debug, Clone)]
pub struct StoreConfig {
  /// The SQLite database file.
  pub db_path:    PathBuf,
  /// Where [`PaperStore::auto_backup`] writes its rotated generations.
  pub backup_dir: PathBuf,
}

impl Default for StoreConfig {
  fn default() -> Self {
    Self {
      db_path:    PathBuf::from("data/papers.db"),
      backup_dir: PathBuf::from("data/backups"),
    }
  }
}

// ─── Store ───────────────────────────────────────────────────────────────────

/// A paper catalogue backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted. All
/// operations run serially on the connection's dedicated thread; concurrent
/// callers rely on SQLite's own locking, which is the whole contract for a
/// single-user local tool.
#[derive(Clone)]
pub struct SqliteStore {
  conn:       tokio_rusqlite::Connection,
  backup_dir: PathBuf,
}

impl SqliteStore {
  /// Open (or create) a store per `config`, ensuring the directory
  /// containing the database file exists and the schema is applied.
  pub async fn open(config: StoreConfig) -> Result<Self> {
    if let Some(parent) = config.db_path.parent()
      && !parent.as_os_str().is_empty()
    {
      std::fs::create_dir_all(parent)?;
    }

    let conn = tokio_rusqlite::Connection::open(config.db_path.clone()).await?;
    let store = Self { conn, backup_dir: config.backup_dir };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self {
      conn,
      backup_dir: StoreConfig::default().backup_dir,
    };
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

  async fn select_many(
    &self,
    sql: String,
    params: Vec<rusqlite::types::Value>,
  ) -> Result<Vec<Paper>> {
    let raws: Vec<RawPaper> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map(rusqlite::params_from_iter(params), RawPaper::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawPaper::into_paper).collect()
  }
}

// ─── PaperStore impl ─────────────────────────────────────────────────────────

impl PaperStore for SqliteStore {
  type Error = Error;

  // ── CRUD ──────────────────────────────────────────────────────────────────

  async fn add(&self, input: NewPaper) -> Result<Paper> {
    // One clock reading so created_at == updated_at exactly.
    let now = Utc::now();
    let at_str = encode_dt(now);

    let row = input.clone();
    let id = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO papers
             (title, author, year, pdf_path, image_path, memo, created_at, updated_at)
           VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
          rusqlite::params![
            row.title,
            row.author,
            row.year,
            row.pdf_path,
            row.image_path,
            row.memo,
            at_str,
            at_str,
          ],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await?;

    Ok(Paper {
      id,
      title: input.title,
      author: input.author,
      year: input.year,
      pdf_path: input.pdf_path,
      image_path: input.image_path,
      memo: input.memo,
      created_at: now,
      updated_at: now,
    })
  }

  async fn update(&self, id: i64, input: NewPaper) -> Result<bool> {
    let at_str = encode_dt(Utc::now());

    let affected = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "UPDATE papers
           SET title = ?1, author = ?2, year = ?3, pdf_path = ?4,
               image_path = ?5, memo = ?6, updated_at = ?7
           WHERE id = ?8",
          rusqlite::params![
            input.title,
            input.author,
            input.year,
            input.pdf_path,
            input.image_path,
            input.memo,
            at_str,
            id,
          ],
        )?)
      })
      .await?;

    Ok(affected > 0)
  }

  async fn delete(&self, id: i64) -> Result<bool> {
    let affected = self
      .conn
      .call(move |conn| {
        Ok(conn.execute("DELETE FROM papers WHERE id = ?1", rusqlite::params![id])?)
      })
      .await?;

    Ok(affected > 0)
  }

  async fn get(&self, id: i64) -> Result<Option<Paper>> {
    let raw: Option<RawPaper> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!("SELECT {COLUMNS} FROM papers WHERE id = ?1"),
              rusqlite::params![id],
              RawPaper::from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawPaper::into_paper).transpose()
  }

  // ── Queries ───────────────────────────────────────────────────────────────

  /// Full scan. SQLite sorts NULL below every integer, so records with an
  /// absent year come first ascending and last descending.
  async fn list(&self, sort: SortColumn, descending: bool) -> Result<Vec<Paper>> {
    // `as_sql` is a closed mapping; no caller text reaches the identifier
    // position.
    let column = sort.as_sql();
    let direction = if descending { "DESC" } else { "ASC" };
    let sql = format!("SELECT {COLUMNS} FROM papers ORDER BY {column} {direction}");

    self.select_many(sql, Vec::new()).await
  }

  async fn search(&self, keyword: &str, field: SearchField) -> Result<Vec<Paper>> {
    // One prebuilt WHERE fragment per field variant; the keyword is always a
    // bound parameter. The empty keyword becomes the pattern "%%", which
    // matches every record.
    let where_clause = match field {
      SearchField::Title => "title LIKE ?1",
      SearchField::Author => "author LIKE ?1",
      SearchField::Memo => "memo LIKE ?1",
      SearchField::All => "title LIKE ?1 OR author LIKE ?1 OR memo LIKE ?1",
    };
    let sql = format!(
      "SELECT {COLUMNS} FROM papers
       WHERE {where_clause}
       ORDER BY updated_at DESC, id DESC"
    );
    let pattern = format!("%{keyword}%");

    self
      .select_many(sql, vec![rusqlite::types::Value::Text(pattern)])
      .await
  }

  async fn advanced_search(&self, query: &AdvancedQuery) -> Result<Vec<Paper>> {
    if query.is_unconstrained() {
      return self.list(SortColumn::Id, false).await;
    }

    // Build the WHERE clause from fixed fragments; values are bound in the
    // same order the fragments are pushed.
    let mut conds: Vec<&'static str> = Vec::new();
    let mut params: Vec<rusqlite::types::Value> = Vec::new();

    if let Some(term) = query.title_term() {
      conds.push("title LIKE ?");
      params.push(rusqlite::types::Value::Text(format!("%{term}%")));
    }
    if let Some(term) = query.author_term() {
      conds.push("author LIKE ?");
      params.push(rusqlite::types::Value::Text(format!("%{term}%")));
    }
    if let Some(from) = query.year_from {
      conds.push("year >= ?");
      params.push(rusqlite::types::Value::Integer(i64::from(from)));
    }
    if let Some(to) = query.year_to {
      conds.push("year <= ?");
      params.push(rusqlite::types::Value::Integer(i64::from(to)));
    }
    if let Some(term) = query.memo_term() {
      conds.push("memo LIKE ?");
      params.push(rusqlite::types::Value::Text(format!("%{term}%")));
    }

    let sql = format!(
      "SELECT {COLUMNS} FROM papers
       WHERE {}
       ORDER BY updated_at DESC, id DESC",
      conds.join(" AND ")
    );

    self.select_many(sql, params).await
  }

  async fn count(&self) -> Result<u64> {
    let n: i64 = self
      .conn
      .call(|conn| {
        Ok(conn.query_row("SELECT COUNT(*) FROM papers", [], |row| row.get(0))?)
      })
      .await?;
    Ok(n as u64)
  }

  // ── Backup ────────────────────────────────────────────────────────────────

  async fn backup(&self, dest: &Path) -> Result<()> {
    if let Some(parent) = dest.parent()
      && !parent.as_os_str().is_empty()
    {
      std::fs::create_dir_all(parent)?;
    }

    // The sqlite backup API copies a consistent snapshot regardless of the
    // WAL state; a plain file copy would miss uncheckpointed frames.
    let dest = dest.to_path_buf();
    self
      .conn
      .call(move |conn| {
        let mut dst = rusqlite::Connection::open(&dest)?;
        let backup = rusqlite::backup::Backup::new(conn, &mut dst)?;
        backup.run_to_completion(100, std::time::Duration::from_millis(10), None)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn auto_backup(&self, max_generations: usize) -> Result<PathBuf> {
    let dest = self.backup_dir.join(generation_file_name(Utc::now()));
    self.backup(&dest).await?;

    let removed = prune_generations(&self.backup_dir, max_generations)?;
    info!(
      backup = %dest.display(),
      pruned = removed.len(),
      "wrote auto-backup generation"
    );
    Ok(dest)
  }

  // ── CSV exchange ──────────────────────────────────────────────────────────

  async fn export_csv(&self, dest: &Path) -> Result<u64> {
    let papers = self.list(SortColumn::Id, false).await?;
    if papers.is_empty() {
      return Ok(0);
    }

    if let Some(parent) = dest.parent()
      && !parent.as_os_str().is_empty()
    {
      std::fs::create_dir_all(parent)?;
    }

    let mut file = std::fs::File::create(dest)?;
    file.write_all(UTF8_BOM)?;

    let mut writer = csv::Writer::from_writer(file);
    for paper in &papers {
      writer.serialize(paper)?;
    }
    writer.flush()?;

    Ok(papers.len() as u64)
  }

  async fn import_csv(&self, src: &Path) -> Result<ImportSummary> {
    // Inability to read the file at all aborts the whole operation; row
    // failures below are counted and skipped.
    let bytes = std::fs::read(src)?;

    let mut summary = ImportSummary::default();
    let mut rows: Vec<ImportRow> = Vec::new();
    let mut reader = csv::Reader::from_reader(strip_bom(&bytes));
    for (index, row) in reader.deserialize::<ImportRow>().enumerate() {
      match row {
        Ok(row) => rows.push(row),
        Err(e) => {
          // +2: one for the header line, one for one-based numbering.
          warn!(line = index + 2, error = %e, "skipping malformed csv row");
          summary.failed += 1;
        }
      }
    }

    for row in rows {
      match self.add(row.into_new_paper()).await {
        Ok(_) => summary.imported += 1,
        Err(e) => {
          warn!(error = %e, "failed to insert imported row");
          summary.failed += 1;
        }
      }
    }

    Ok(summary)
  }
}
