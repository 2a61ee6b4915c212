//! File inspection for the Quire paper catalogue.
//!
//! [`FileInspector`] implements [`DocumentInspector`] by dispatching on the
//! file extension: `lopdf` for PDFs, the `image` crate for raster images.
//! PDF *rasterization* is the one operation left to an external renderer —
//! [`DocumentInspector::render`] on a PDF returns
//! [`Error::PdfRenderUnsupported`]; a GUI deployment injects its own
//! implementation of the trait for that.

mod pdf;
mod raster;

pub mod error;

pub use error::{Error, Result};

use std::{collections::BTreeMap, path::Path};

use quire_core::inspect::{Bitmap, DocumentInspector};

// ─── Dispatch ────────────────────────────────────────────────────────────────

enum FileKind {
  Pdf,
  Image,
}

fn kind_of(path: &Path) -> Result<FileKind> {
  let ext = path
    .extension()
    .and_then(|e| e.to_str())
    .map(str::to_ascii_lowercase)
    .unwrap_or_default();

  if ext == "pdf" {
    Ok(FileKind::Pdf)
  } else if raster::is_supported_extension(&ext) {
    Ok(FileKind::Image)
  } else {
    Err(Error::UnsupportedFormat(ext))
  }
}

// ─── Inspector ───────────────────────────────────────────────────────────────

/// Stateless inspector over PDF and image files. Every call opens the file
/// fresh; nothing is cached.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileInspector;

impl FileInspector {
  pub fn new() -> Self {
    Self
  }

  /// Write a bounded PNG thumbnail for an image attachment, preserving
  /// aspect ratio. Not part of the [`DocumentInspector`] trait — thumbnails
  /// are a convenience for list views, not an inspection primitive.
  pub fn write_thumbnail(
    &self,
    path: &Path,
    dest: &Path,
    max_width: u32,
    max_height: u32,
  ) -> Result<()> {
    match kind_of(path)? {
      FileKind::Image => raster::write_thumbnail(path, dest, max_width, max_height),
      FileKind::Pdf => Err(Error::PdfRenderUnsupported),
    }
  }
}

impl DocumentInspector for FileInspector {
  type Error = Error;

  fn is_valid(&self, path: &Path) -> bool {
    if !path.exists() {
      return false;
    }
    match kind_of(path) {
      Ok(FileKind::Pdf) => pdf::is_valid(path),
      Ok(FileKind::Image) => raster::is_valid(path),
      Err(_) => false,
    }
  }

  fn page_count(&self, path: &Path) -> Result<usize> {
    match kind_of(path)? {
      FileKind::Pdf => Ok(pdf::page_count(&pdf::load(path)?)),
      FileKind::Image => raster::frame_count(path),
    }
  }

  fn render(&self, path: &Path, index: usize, zoom: f32) -> Result<Bitmap> {
    match kind_of(path)? {
      FileKind::Pdf => Err(Error::PdfRenderUnsupported),
      FileKind::Image => raster::render(path, index, zoom),
    }
  }

  fn metadata(&self, path: &Path) -> Result<BTreeMap<String, String>> {
    match kind_of(path)? {
      FileKind::Pdf => Ok(pdf::metadata(&pdf::load(path)?)),
      FileKind::Image => raster::metadata(path),
    }
  }

  fn extract_text(&self, path: &Path, index: usize) -> Result<String> {
    match kind_of(path)? {
      FileKind::Pdf => pdf::extract_text(&pdf::load(path)?, index),
      // Images have no text layer.
      FileKind::Image => Ok(String::new()),
    }
  }
}

#[cfg(test)]
mod tests;
