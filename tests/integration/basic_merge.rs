//! Integration tests for merging whole documents.

use lopdf::Document;
use pdfassemble::config::CompressionLevel;
use pdfassemble::io::{collect_input_paths, read_sources};
use pdfassemble::merge::MergeJob;
use pdfassemble::output::NoProgress;
use rstest::rstest;
use tempfile::tempdir;

use crate::common::{RecordingProgress, page_labels, source, write_sample};

#[tokio::test]
async fn test_merge_keeps_list_and_page_order() {
    let documents = vec![source("a", 2), source("b", 1), source("c", 3)];
    let mut progress = RecordingProgress::default();

    let output = MergeJob::new().run(&documents, &mut progress).await.unwrap();

    assert_eq!(
        page_labels(&output.bytes),
        vec!["a-1", "a-2", "b-1", "c-1", "c-2", "c-3"]
    );
    assert_eq!(output.statistics.documents, 3);
    assert_eq!(output.statistics.total_pages, 6);
    progress.assert_complete();
}

#[rstest]
#[case::uncompressed(CompressionLevel::None)]
#[case::compressed(CompressionLevel::Standard)]
#[tokio::test]
async fn test_merge_output_is_loadable(#[case] compression: CompressionLevel) {
    let documents = vec![source("x", 2), source("y", 2)];

    let output = MergeJob::new()
        .with_compression(compression)
        .run(&documents, &mut NoProgress)
        .await
        .unwrap();

    let doc = Document::load_mem(&output.bytes).unwrap();
    assert_eq!(doc.get_pages().len(), 4);
    assert_eq!(output.statistics.output_size, output.bytes.len() as u64);
}

#[tokio::test]
async fn test_merged_pages_keep_inherited_attributes() {
    let output = MergeJob::new()
        .run(&[source("a", 1), source("b", 1)], &mut NoProgress)
        .await
        .unwrap();

    let doc = Document::load_mem(&output.bytes).unwrap();
    for page_id in doc.get_pages().into_values() {
        let page = doc.get_dictionary(page_id).unwrap();
        let media_box = page.get(b"MediaBox").unwrap().as_array().unwrap();
        assert_eq!(media_box[2].as_float().unwrap(), 595.0);
        assert!(page.has(b"Resources"));
    }
}

#[tokio::test]
async fn test_merge_files_from_directory() {
    let dir = tempdir().unwrap();
    write_sample(dir.path(), "02-body", 2);
    write_sample(dir.path(), "01-intro", 1);
    std::fs::write(dir.path().join("notes.txt"), b"not a pdf").unwrap();

    let paths = collect_input_paths([dir.path()]).unwrap();
    let documents = read_sources(&paths).await.unwrap();
    let output = MergeJob::new().run(&documents, &mut NoProgress).await.unwrap();

    assert_eq!(
        page_labels(&output.bytes),
        vec!["01-intro-1", "02-body-1", "02-body-2"]
    );
}
