//! Raster-image inspection via the `image` crate: validity, frame count,
//! dimension metadata, zoomed RGBA rendering, and thumbnail writing.

use std::{
  collections::BTreeMap,
  fs::File,
  io::BufReader,
  path::Path,
};

use image::{AnimationDecoder as _, DynamicImage, ImageFormat, imageops::FilterType};
use tracing::debug;

use quire_core::inspect::Bitmap;

use crate::Result;

/// Extensions this inspector accepts as raster images.
pub const SUPPORTED_EXTENSIONS: &[&str] =
  &["png", "jpg", "jpeg", "bmp", "gif", "tiff"];

pub fn is_supported_extension(ext: &str) -> bool {
  SUPPORTED_EXTENSIONS.contains(&ext)
}

/// An image is valid when its extension is supported and it decodes.
pub fn is_valid(path: &Path) -> bool {
  match image::open(path) {
    Ok(_) => true,
    Err(e) => {
      debug!(path = %path.display(), error = %e, "image failed validation");
      false
    }
  }
}

/// Frames for an animated GIF, 1 for everything else.
pub fn frame_count(path: &Path) -> Result<usize> {
  if ImageFormat::from_path(path).ok() == Some(ImageFormat::Gif) {
    let decoder =
      image::codecs::gif::GifDecoder::new(BufReader::new(File::open(path)?))?;
    let frames = decoder.into_frames().filter_map(|f| f.ok()).count();
    // A decodable gif has at least the frame `image::open` would return.
    return Ok(frames.max(1));
  }
  image::open(path)?;
  Ok(1)
}

/// Width, height, and MIME type.
pub fn metadata(path: &Path) -> Result<BTreeMap<String, String>> {
  let (width, height) = image::image_dimensions(path)?;

  let mut out = BTreeMap::new();
  out.insert("width".to_owned(), width.to_string());
  out.insert("height".to_owned(), height.to_string());
  if let Ok(format) = ImageFormat::from_path(path) {
    out.insert("format".to_owned(), format.to_mime_type().to_owned());
  }
  Ok(out)
}

/// Decode frame `index` (clamped to the first frame when out of range) and
/// scale both axes by `zoom` with Lanczos resampling.
pub fn render(path: &Path, index: usize, zoom: f32) -> Result<Bitmap> {
  let img = load_frame(path, index)?;

  let width = scaled(img.width(), zoom);
  let height = scaled(img.height(), zoom);
  let resized = if (width, height) == (img.width(), img.height()) {
    img
  } else {
    img.resize_exact(width, height, FilterType::Lanczos3)
  };

  let rgba = resized.to_rgba8();
  Ok(Bitmap {
    width:  rgba.width(),
    height: rgba.height(),
    pixels: rgba.into_raw(),
  })
}

/// Write a bounded thumbnail of the image as PNG, preserving aspect ratio
/// and creating parent directories as needed.
pub fn write_thumbnail(
  path: &Path,
  dest: &Path,
  max_width: u32,
  max_height: u32,
) -> Result<()> {
  let img = image::open(path)?;
  let thumb = img.thumbnail(max_width, max_height);

  if let Some(parent) = dest.parent()
    && !parent.as_os_str().is_empty()
  {
    std::fs::create_dir_all(parent)?;
  }
  thumb.save_with_format(dest, ImageFormat::Png)?;
  Ok(())
}

fn load_frame(path: &Path, index: usize) -> Result<DynamicImage> {
  if index > 0 && ImageFormat::from_path(path).ok() == Some(ImageFormat::Gif) {
    let decoder =
      image::codecs::gif::GifDecoder::new(BufReader::new(File::open(path)?))?;
    // Out-of-range index falls through to the first frame below.
    if let Some(frame) = decoder.into_frames().filter_map(|f| f.ok()).nth(index) {
      return Ok(DynamicImage::ImageRgba8(frame.into_buffer()));
    }
  }
  Ok(image::open(path)?)
}

fn scaled(dim: u32, zoom: f32) -> u32 {
  ((dim as f32 * zoom).round() as u32).max(1)
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn scaled_never_collapses_to_zero() {
    assert_eq!(scaled(200, 0.5), 100);
    assert_eq!(scaled(3, 0.1), 1);
    assert_eq!(scaled(200, 1.5), 300);
  }

  #[test]
  fn supported_extension_set() {
    assert!(is_supported_extension("png"));
    assert!(is_supported_extension("tiff"));
    assert!(!is_supported_extension("pdf"));
    assert!(!is_supported_extension("txt"));
  }
}
