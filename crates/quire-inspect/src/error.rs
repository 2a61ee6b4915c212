//! Error type for `quire-inspect`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("i/o error: {0}")]
  Io(#[from] std::io::Error),

  #[error("pdf error: {0}")]
  Pdf(#[from] lopdf::Error),

  #[error("image error: {0}")]
  Image(#[from] image::ImageError),

  /// The file extension is neither `pdf` nor a supported image format.
  #[error("unsupported file format: {0:?}")]
  UnsupportedFormat(String),

  /// PDF rasterization is delegated to an external renderer; this inspector
  /// renders images only.
  #[error("pdf rasterization is not available in this inspector")]
  PdfRenderUnsupported,
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
