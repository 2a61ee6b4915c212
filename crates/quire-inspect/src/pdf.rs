//! PDF inspection via `lopdf`: validity, page count, Info-dictionary
//! metadata, and per-page text extraction.

use std::{collections::BTreeMap, path::Path};

use lopdf::{Document, Object};
use tracing::debug;

use crate::Result;

pub fn load(path: &Path) -> Result<Document> {
  Ok(Document::load(path)?)
}

/// A PDF is valid when it loads and has at least one page.
pub fn is_valid(path: &Path) -> bool {
  match Document::load(path) {
    Ok(doc) => !doc.get_pages().is_empty(),
    Err(e) => {
      debug!(path = %path.display(), error = %e, "pdf failed validation");
      false
    }
  }
}

pub fn page_count(doc: &Document) -> usize {
  doc.get_pages().len()
}

/// The Info dictionary as string pairs (Title, Author, Subject, Keywords,
/// Creator, Producer, CreationDate, ModDate, ...). Non-string entries are
/// skipped.
pub fn metadata(doc: &Document) -> BTreeMap<String, String> {
  let mut out = BTreeMap::new();

  let Ok(info_obj) = doc.trailer.get(b"Info") else {
    return out;
  };
  let info = match info_obj {
    Object::Reference(id) => doc.get_object(*id).and_then(Object::as_dict),
    direct => direct.as_dict(),
  };
  let Ok(info) = info else {
    return out;
  };

  for (key, value) in info.iter() {
    let value = match value {
      Object::Reference(id) => match doc.get_object(*id) {
        Ok(v) => v,
        Err(_) => continue,
      },
      direct => direct,
    };
    if let Object::String(bytes, _) = value {
      out.insert(
        String::from_utf8_lossy(key).into_owned(),
        decode_text_string(bytes),
      );
    }
  }
  out
}

/// Plain text of the page at zero-based `index`; an out-of-range index is
/// clamped to the first page. Output is whitespace-normalised.
pub fn extract_text(doc: &Document, index: usize) -> Result<String> {
  let pages: Vec<u32> = doc.get_pages().keys().copied().collect();
  if pages.is_empty() {
    return Ok(String::new());
  }
  let page_number = pages.get(index).copied().unwrap_or(pages[0]);

  let text = doc.extract_text(&[page_number])?;
  Ok(clean_text(&text))
}

/// Decode a PDF text string: UTF-16BE when it carries the BOM, otherwise
/// treated as Latin-1 (a superset of PDFDocEncoding for the common range).
fn decode_text_string(bytes: &[u8]) -> String {
  if let Some(utf16) = bytes.strip_prefix(&[0xFE, 0xFF]) {
    let units: Vec<u16> = utf16
      .chunks_exact(2)
      .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
      .collect();
    String::from_utf16_lossy(&units)
  } else {
    bytes.iter().map(|&b| b as char).collect()
  }
}

/// Collapse runs of whitespace; extraction output is full of layout-driven
/// line breaks that mean nothing to a reader.
fn clean_text(text: &str) -> String {
  text.split_whitespace().collect::<Vec<_>>().join(" ")
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn decode_plain_and_utf16_strings() {
    assert_eq!(decode_text_string(b"Plain Title"), "Plain Title");

    // "Hi" in UTF-16BE with BOM.
    assert_eq!(decode_text_string(&[0xFE, 0xFF, 0x00, 0x48, 0x00, 0x69]), "Hi");
  }

  #[test]
  fn clean_text_collapses_whitespace() {
    assert_eq!(clean_text("  a\n\nb\t c "), "a b c");
  }
}
