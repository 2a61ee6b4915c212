//! Tests for `FileInspector`. Fixtures are generated in-test — a one-page
//! PDF built with `lopdf` and a PNG built with `image` — so no binary files
//! live in the repository.

use std::path::{Path, PathBuf};

use lopdf::{
  Document, Object, Stream,
  content::{Content, Operation},
  dictionary,
};
use quire_core::inspect::DocumentInspector as _;

use crate::{Error, FileInspector};

// ─── Fixtures ────────────────────────────────────────────────────────────────

/// Build a one-page PDF with an Info dictionary and a single line of text.
fn write_test_pdf(dir: &Path) -> PathBuf {
  let mut doc = Document::with_version("1.5");

  let pages_id = doc.new_object_id();
  let font_id = doc.add_object(dictionary! {
    "Type" => "Font",
    "Subtype" => "Type1",
    "BaseFont" => "Courier",
  });
  let resources_id = doc.add_object(dictionary! {
    "Font" => dictionary! { "F1" => font_id },
  });

  let content = Content {
    operations: vec![
      Operation::new("BT", vec![]),
      Operation::new("Tf", vec!["F1".into(), 24.into()]),
      Operation::new("Td", vec![100.into(), 600.into()]),
      Operation::new("Tj", vec![Object::string_literal("Hello from the catalogue")]),
      Operation::new("ET", vec![]),
    ],
  };
  let content_id = doc.add_object(Stream::new(
    dictionary! {},
    content.encode().expect("encode content"),
  ));

  let page_id = doc.add_object(dictionary! {
    "Type" => "Page",
    "Parent" => pages_id,
    "Contents" => content_id,
  });
  doc.objects.insert(
    pages_id,
    Object::Dictionary(dictionary! {
      "Type" => "Pages",
      "Kids" => vec![page_id.into()],
      "Count" => 1,
      "Resources" => resources_id,
      "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
    }),
  );

  let catalog_id = doc.add_object(dictionary! {
    "Type" => "Catalog",
    "Pages" => pages_id,
  });
  doc.trailer.set("Root", catalog_id);

  let info_id = doc.add_object(dictionary! {
    "Title" => Object::string_literal("Inspection Fixture"),
    "Author" => Object::string_literal("Test Rig"),
  });
  doc.trailer.set("Info", info_id);

  let path = dir.join("fixture.pdf");
  doc.save(&path).expect("save pdf");
  path
}

/// Write a 64x32 solid-colour PNG.
fn write_test_png(dir: &Path) -> PathBuf {
  let img = image::RgbaImage::from_pixel(64, 32, image::Rgba([200, 40, 40, 255]));
  let path = dir.join("fixture.png");
  img.save(&path).expect("save png");
  path
}

// ─── PDF ─────────────────────────────────────────────────────────────────────

#[test]
fn pdf_is_valid_with_one_page() {
  let dir = tempfile::tempdir().unwrap();
  let pdf = write_test_pdf(dir.path());
  let inspector = FileInspector::new();

  assert!(inspector.is_valid(&pdf));
  assert_eq!(inspector.page_count(&pdf).unwrap(), 1);
}

#[test]
fn pdf_metadata_reads_the_info_dictionary() {
  let dir = tempfile::tempdir().unwrap();
  let pdf = write_test_pdf(dir.path());

  let meta = FileInspector::new().metadata(&pdf).unwrap();
  assert_eq!(meta.get("Title").map(String::as_str), Some("Inspection Fixture"));
  assert_eq!(meta.get("Author").map(String::as_str), Some("Test Rig"));
}

#[test]
fn pdf_text_extraction_finds_page_text() {
  let dir = tempfile::tempdir().unwrap();
  let pdf = write_test_pdf(dir.path());
  let inspector = FileInspector::new();

  let text = inspector.extract_text(&pdf, 0).unwrap();
  assert!(text.contains("Hello from the catalogue"), "text: {text:?}");

  // Out-of-range page index clamps to the first page.
  let clamped = inspector.extract_text(&pdf, 99).unwrap();
  assert_eq!(clamped, text);
}

#[test]
fn pdf_render_reports_unsupported() {
  let dir = tempfile::tempdir().unwrap();
  let pdf = write_test_pdf(dir.path());

  let err = FileInspector::new().render(&pdf, 0, 1.0).unwrap_err();
  assert!(matches!(err, Error::PdfRenderUnsupported));
}

// ─── Images ──────────────────────────────────────────────────────────────────

#[test]
fn image_is_valid_with_one_frame() {
  let dir = tempfile::tempdir().unwrap();
  let png = write_test_png(dir.path());
  let inspector = FileInspector::new();

  assert!(inspector.is_valid(&png));
  assert_eq!(inspector.page_count(&png).unwrap(), 1);
}

#[test]
fn image_metadata_reports_dimensions() {
  let dir = tempfile::tempdir().unwrap();
  let png = write_test_png(dir.path());

  let meta = FileInspector::new().metadata(&png).unwrap();
  assert_eq!(meta.get("width").map(String::as_str), Some("64"));
  assert_eq!(meta.get("height").map(String::as_str), Some("32"));
  assert_eq!(meta.get("format").map(String::as_str), Some("image/png"));
}

#[test]
fn image_render_scales_by_zoom() {
  let dir = tempfile::tempdir().unwrap();
  let png = write_test_png(dir.path());

  let bitmap = FileInspector::new().render(&png, 0, 0.5).unwrap();
  assert_eq!((bitmap.width, bitmap.height), (32, 16));
  assert_eq!(bitmap.pixels.len(), 32 * 16 * 4);
}

#[test]
fn image_text_extraction_is_empty() {
  let dir = tempfile::tempdir().unwrap();
  let png = write_test_png(dir.path());

  assert_eq!(FileInspector::new().extract_text(&png, 0).unwrap(), "");
}

#[test]
fn thumbnail_is_bounded_and_keeps_aspect_ratio() {
  let dir = tempfile::tempdir().unwrap();
  let png = write_test_png(dir.path());
  let dest = dir.path().join("thumbs").join("out.png");

  FileInspector::new()
    .write_thumbnail(&png, &dest, 16, 16)
    .unwrap();

  let (w, h) = image::image_dimensions(&dest).unwrap();
  assert_eq!((w, h), (16, 8));
}

// ─── Rejections ──────────────────────────────────────────────────────────────

#[test]
fn missing_or_junk_files_are_invalid() {
  let dir = tempfile::tempdir().unwrap();
  let inspector = FileInspector::new();

  assert!(!inspector.is_valid(&dir.path().join("nope.pdf")));

  let junk = dir.path().join("junk.pdf");
  std::fs::write(&junk, b"this is not a pdf").unwrap();
  assert!(!inspector.is_valid(&junk));
}

#[test]
fn unsupported_extension_is_rejected() {
  let dir = tempfile::tempdir().unwrap();
  let txt = dir.path().join("notes.txt");
  std::fs::write(&txt, b"plain text").unwrap();
  let inspector = FileInspector::new();

  assert!(!inspector.is_valid(&txt));
  let err = inspector.page_count(&txt).unwrap_err();
  assert!(matches!(err, Error::UnsupportedFormat(ext) if ext == "txt"));
}
