//! Subcommand definitions and execution.
//!
//! The shell owns the validation the store deliberately leaves to callers
//! (an empty title is rejected here) and turns store/inspector errors into
//! messages; nothing in this module panics on a failed operation.

use std::path::PathBuf;

use anyhow::bail;
use clap::{Args, Subcommand};
use quire_core::{
  inspect::DocumentInspector as _,
  paper::{NewPaper, Paper},
  query::{AdvancedQuery, SearchField, SortColumn},
  store::PaperStore,
};
use quire_inspect::FileInspector;
use quire_store_sqlite::SqliteStore;

// ─── Commands ────────────────────────────────────────────────────────────────

#[derive(Subcommand)]
pub enum Command {
  /// Add a paper to the catalogue.
  Add(PaperFields),

  /// Replace every field of an existing record.
  Update {
    id: i64,
    #[command(flatten)]
    fields: PaperFields,
  },

  /// Delete a record by id.
  Delete { id: i64 },

  /// Show a single record.
  Show {
    id: i64,
    /// Emit JSON instead of the human-readable form.
    #[arg(long)]
    json: bool,
  },

  /// List every record.
  List {
    /// Sort column: id, title, author, year, created_at or updated_at.
    /// Anything else falls back to id.
    #[arg(long, default_value = "id")]
    sort: String,
    /// Sort descending.
    #[arg(long)]
    desc: bool,
    #[arg(long)]
    json: bool,
  },

  /// Substring search over one field, most recently updated first.
  Search {
    keyword: String,
    /// Field to match: title, author, memo or all. Anything else falls
    /// back to title.
    #[arg(long, default_value = "title")]
    field: String,
    #[arg(long)]
    json: bool,
  },

  /// Multi-predicate search; active predicates are combined with AND.
  Find {
    #[arg(long)]
    title: Option<String>,
    #[arg(long)]
    author: Option<String>,
    #[arg(long)]
    memo: Option<String>,
    #[arg(long)]
    year_from: Option<i32>,
    #[arg(long)]
    year_to: Option<i32>,
    #[arg(long)]
    json: bool,
  },

  /// Print the total record count.
  Count,

  /// Copy the catalogue database to an explicit destination.
  Backup { dest: PathBuf },

  /// Write a timestamped backup and rotate old generations.
  AutoBackup {
    /// How many generations to retain.
    #[arg(long, default_value_t = 5)]
    keep: usize,
  },

  /// Export every record as CSV (UTF-8 with byte-order mark).
  Export { dest: PathBuf },

  /// Import records from a CSV file, one `add` per row.
  Import { src: PathBuf },

  /// Inspect an attached PDF or image file.
  #[command(subcommand)]
  Inspect(InspectCommand),
}

#[derive(Subcommand)]
pub enum InspectCommand {
  /// Validity, page count, and embedded metadata.
  Info { path: PathBuf },

  /// Plain text of one page.
  Text {
    path: PathBuf,
    /// Zero-based page index; out of range falls back to the first page.
    #[arg(long, default_value_t = 0)]
    page: usize,
  },

  /// Write a bounded PNG thumbnail of an image attachment.
  Thumbnail {
    path: PathBuf,
    dest: PathBuf,
    #[arg(long, default_value_t = 200)]
    max_width:  u32,
    #[arg(long, default_value_t = 200)]
    max_height: u32,
  },
}

// ─── Record fields ───────────────────────────────────────────────────────────

#[derive(Args)]
pub struct PaperFields {
  /// Title; must not be empty.
  title: String,

  #[arg(long, default_value = "")]
  author: String,

  #[arg(long)]
  year: Option<i32>,

  /// Path of an attached PDF; stored as-is, never opened by the store.
  #[arg(long, default_value = "")]
  pdf: String,

  /// Path of an attached image; stored as-is.
  #[arg(long, default_value = "")]
  image: String,

  #[arg(long, default_value = "")]
  memo: String,
}

impl PaperFields {
  fn into_new_paper(self) -> anyhow::Result<NewPaper> {
    if self.title.trim().is_empty() {
      bail!("title must not be empty");
    }
    Ok(NewPaper {
      title:      self.title,
      author:     self.author,
      year:       self.year,
      pdf_path:   self.pdf,
      image_path: self.image,
      memo:       self.memo,
    })
  }
}

// ─── Execution ───────────────────────────────────────────────────────────────

pub async fn run(store: &SqliteStore, command: Command) -> anyhow::Result<()> {
  match command {
    Command::Add(fields) => {
      let paper = store.add(fields.into_new_paper()?).await?;
      println!("added paper {}", paper.id);
    }

    Command::Update { id, fields } => {
      if store.update(id, fields.into_new_paper()?).await? {
        println!("updated paper {id}");
      } else {
        bail!("no paper with id {id}");
      }
    }

    Command::Delete { id } => {
      if store.delete(id).await? {
        println!("deleted paper {id}");
      } else {
        bail!("no paper with id {id}");
      }
    }

    Command::Show { id, json } => match store.get(id).await? {
      Some(paper) => print_papers(&[paper], json)?,
      None => bail!("no paper with id {id}"),
    },

    Command::List { sort, desc, json } => {
      let papers = store.list(SortColumn::from_name(&sort), desc).await?;
      print_papers(&papers, json)?;
    }

    Command::Search { keyword, field, json } => {
      let papers = store.search(&keyword, SearchField::from_name(&field)).await?;
      print_papers(&papers, json)?;
    }

    Command::Find { title, author, memo, year_from, year_to, json } => {
      let query = AdvancedQuery { title, author, memo, year_from, year_to };
      let papers = store.advanced_search(&query).await?;
      print_papers(&papers, json)?;
    }

    Command::Count => {
      println!("{}", store.count().await?);
    }

    Command::Backup { dest } => {
      store.backup(&dest).await?;
      println!("backup written to {}", dest.display());
    }

    Command::AutoBackup { keep } => {
      let written = store.auto_backup(keep).await?;
      println!("backup written to {}", written.display());
    }

    Command::Export { dest } => {
      let rows = store.export_csv(&dest).await?;
      println!("exported {rows} records to {}", dest.display());
    }

    Command::Import { src } => {
      let summary = store.import_csv(&src).await?;
      println!(
        "imported {} records, {} failed",
        summary.imported, summary.failed
      );
    }

    Command::Inspect(command) => inspect(command)?,
  }

  Ok(())
}

fn inspect(command: InspectCommand) -> anyhow::Result<()> {
  let inspector = FileInspector::new();

  match command {
    InspectCommand::Info { path } => {
      if !inspector.is_valid(&path) {
        bail!("{}: not a readable document", path.display());
      }
      println!("pages: {}", inspector.page_count(&path)?);
      for (key, value) in inspector.metadata(&path)? {
        println!("{key}: {value}");
      }
    }

    InspectCommand::Text { path, page } => {
      println!("{}", inspector.extract_text(&path, page)?);
    }

    InspectCommand::Thumbnail { path, dest, max_width, max_height } => {
      inspector.write_thumbnail(&path, &dest, max_width, max_height)?;
      println!("thumbnail written to {}", dest.display());
    }
  }

  Ok(())
}

// ─── Output ──────────────────────────────────────────────────────────────────

fn print_papers(papers: &[Paper], json: bool) -> anyhow::Result<()> {
  if json {
    for paper in papers {
      println!("{}", serde_json::to_string(paper)?);
    }
    return Ok(());
  }

  for paper in papers {
    let year = paper
      .year
      .map(|y| y.to_string())
      .unwrap_or_else(|| "----".to_owned());
    let author = if paper.author.is_empty() {
      String::new()
    } else {
      format!("  {}", paper.author)
    };
    println!("[{:>4}] ({year}) {}{author}", paper.id, paper.title);

    if !paper.pdf_path.is_empty() {
      println!("       pdf:   {}", paper.pdf_path);
    }
    if !paper.image_path.is_empty() {
      println!("       image: {}", paper.image_path);
    }
    if !paper.memo.is_empty() {
      println!("       memo:  {}", paper.memo);
    }
  }
  Ok(())
}
