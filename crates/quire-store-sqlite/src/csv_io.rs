//! CSV exchange helpers.
//!
//! Export serialises [`Paper`] directly, so the header row is the struct's
//! field order: `id,title,author,year,pdf_path,image_path,memo,created_at,
//! updated_at`. Import reads by header name, ignores the id and timestamp
//! columns (the store reassigns them), and treats `year` as free text to be
//! coerced.

use quire_core::paper::NewPaper;
use serde::Deserialize;

/// Byte-order mark written before the header so common spreadsheet tools
/// detect UTF-8.
pub const UTF8_BOM: &[u8] = b"\xef\xbb\xbf";

pub fn strip_bom(bytes: &[u8]) -> &[u8] {
  bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes)
}

/// One incoming CSV row. Every column is optional; absent columns default to
/// empty. Unknown columns (id, created_at, updated_at, ...) are ignored.
#[derive(Debug, Deserialize)]
pub struct ImportRow {
  #[serde(default)]
  pub title:      String,
  #[serde(default)]
  pub author:     String,
  #[serde(default)]
  pub year:       String,
  #[serde(default)]
  pub pdf_path:   String,
  #[serde(default)]
  pub image_path: String,
  #[serde(default)]
  pub memo:       String,
}

impl ImportRow {
  /// An unparseable or absent year is stored as absent — not a row failure.
  pub fn into_new_paper(self) -> NewPaper {
    NewPaper {
      title:      self.title,
      author:     self.author,
      year:       self.year.trim().parse().ok(),
      pdf_path:   self.pdf_path,
      image_path: self.image_path,
      memo:       self.memo,
    }
  }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn year_coercion() {
    let row = |year: &str| ImportRow {
      title:      "t".into(),
      author:     String::new(),
      year:       year.into(),
      pdf_path:   String::new(),
      image_path: String::new(),
      memo:       String::new(),
    };

    assert_eq!(row("2015").into_new_paper().year, Some(2015));
    assert_eq!(row(" 2015 ").into_new_paper().year, Some(2015));
    assert_eq!(row("").into_new_paper().year, None);
    assert_eq!(row("around 2015").into_new_paper().year, None);
  }

  #[test]
  fn strip_bom_only_strips_leading_marker() {
    assert_eq!(strip_bom(b"\xef\xbb\xbftitle"), b"title");
    assert_eq!(strip_bom(b"title"), b"title");
  }
}
