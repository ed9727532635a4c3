//! Shared helpers for the integration tests.
//!
//! Test PDFs are generated in-process so every page carries a `label-n`
//! marker that can be read back after assembly.

#![allow(dead_code)]

use lopdf::{Document, Object, Stream, dictionary};
use pdfassemble::document::SourceDocument;
use std::path::{Path, PathBuf};

/// Build a PDF whose page `n` draws the text `label-n`.
///
/// MediaBox and Resources are inherited from the page tree root.
pub fn sample_pdf(label: &str, pages: u32) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });

    let kids: Vec<Object> = (1..=pages)
        .map(|n| {
            let text = format!("BT /F1 12 Tf 72 720 Td ({label}-{n}) Tj ET");
            let content_id = doc.add_object(Stream::new(dictionary! {}, text.into_bytes()));
            Object::Reference(doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
            }))
        })
        .collect();

    doc.objects.insert(
        pages_id,
        dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => pages as i64,
            "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
            "Resources" => dictionary! {
                "Font" => dictionary! { "F1" => font_id },
            },
        }
        .into(),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut buffer = Vec::new();
    doc.save_to(&mut buffer).expect("Failed to serialize sample PDF");
    buffer
}

/// A named in-memory source document.
pub fn source(label: &str, pages: u32) -> SourceDocument {
    SourceDocument::new(format!("{label}.pdf"), sample_pdf(label, pages))
}

/// Write a sample PDF into `dir` and return its path.
pub fn write_sample(dir: &Path, label: &str, pages: u32) -> PathBuf {
    let path = dir.join(format!("{label}.pdf"));
    std::fs::write(&path, sample_pdf(label, pages)).expect("Failed to write sample PDF");
    path
}

/// The `label-n` marker of every page, in page order.
pub fn page_labels(bytes: &[u8]) -> Vec<String> {
    let doc = Document::load_mem(bytes).expect("Output is not a readable PDF");
    doc.get_pages()
        .values()
        .map(|&page_id| {
            let content = doc.get_page_content(page_id).expect("Page has no content");
            let text = String::from_utf8_lossy(&content);
            let start = text.find('(').expect("No marker on page") + 1;
            let end = text[start..].find(')').expect("Unterminated marker") + start;
            text[start..end].to_string()
        })
        .collect()
}

/// Collects every progress value reported.
#[derive(Debug, Default)]
pub struct RecordingProgress {
    pub values: Vec<f64>,
}

impl pdfassemble::output::ProgressReporter for RecordingProgress {
    fn report(&mut self, percent: f64) {
        self.values.push(percent);
    }
}

impl RecordingProgress {
    /// Values never decrease and the last one is 100.
    pub fn assert_complete(&self) {
        assert!(
            self.values.windows(2).all(|w| w[0] <= w[1]),
            "Progress went backwards: {:?}",
            self.values
        );
        assert_eq!(self.values.last().copied(), Some(100.0));
    }
}
