//! The `DocumentInspector` trait — read-only inspection of attached files.
//!
//! The store treats `pdf_path` / `image_path` as opaque references; anything
//! that actually opens those files goes through this trait. It is an
//! injected capability so presentation layers and tests can substitute a
//! fake without a real PDF or image backend.

use std::{collections::BTreeMap, path::Path};

/// An RGBA8 bitmap returned by [`DocumentInspector::render`].
/// `pixels` is row-major, `4 * width * height` bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bitmap {
  pub width:  u32,
  pub height: u32,
  pub pixels: Vec<u8>,
}

/// Validation and extraction over PDF and image files addressed by path.
///
/// Stateless: every call opens the file fresh; nothing is cached between
/// calls. `index` is zero-based and refers to pages for PDFs and frames for
/// animated images; implementations clamp an out-of-range index to the
/// first page rather than failing.
pub trait DocumentInspector {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Whether the file exists and parses as a supported document.
  fn is_valid(&self, path: &Path) -> bool;

  /// Pages for a PDF, frames for an animated image, 1 for a still image.
  fn page_count(&self, path: &Path) -> Result<usize, Self::Error>;

  /// Render page/frame `index` at `zoom` (1.0 = natural size) to RGBA8.
  fn render(
    &self,
    path: &Path,
    index: usize,
    zoom: f32,
  ) -> Result<Bitmap, Self::Error>;

  /// Embedded metadata as string key/value pairs (PDF Info dictionary;
  /// dimensions and format for images).
  fn metadata(
    &self,
    path: &Path,
  ) -> Result<BTreeMap<String, String>, Self::Error>;

  /// Plain text of page `index`. Empty for formats without a text layer.
  fn extract_text(
    &self,
    path: &Path,
    index: usize,
  ) -> Result<String, Self::Error>;
}
