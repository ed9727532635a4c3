//! Integration tests for error handling and edge cases.

use pdfassemble::document::SourceDocument;
use pdfassemble::error::AssembleError;
use pdfassemble::io::collect_input_paths;
use pdfassemble::merge::MergeJob;
use pdfassemble::range::PageRange;
use pdfassemble::selection::SelectionList;
use rstest::rstest;

use crate::common::{RecordingProgress, page_labels, source};

#[rstest]
#[case("")]
#[case("5-2")]
#[case("0")]
#[case("1,,3")]
#[case("a-b")]
#[case("1-2-3")]
fn test_invalid_range_expressions(#[case] expression: &str) {
    let err = PageRange::parse(expression, 10).unwrap_err();
    assert!(matches!(err, AssembleError::InvalidRange { .. }));
    assert!(err.is_user_correctable());
    assert_eq!(err.exit_code(), 1);
}

#[tokio::test]
async fn test_merge_nothing() {
    let result = MergeJob::new()
        .run(&[], &mut RecordingProgress::default())
        .await;
    assert!(matches!(result, Err(AssembleError::NoFilesToMerge)));
}

#[tokio::test]
async fn test_broken_document_aborts_merge_without_output() {
    let documents = vec![
        source("a", 2),
        SourceDocument::new("broken.pdf", b"garbage".to_vec()),
        source("c", 1),
    ];
    let mut progress = RecordingProgress::default();

    let result = MergeJob::new().run(&documents, &mut progress).await;

    match result {
        Err(AssembleError::MergeFailed { document, .. }) => assert_eq!(document, "broken.pdf"),
        other => panic!("Expected MergeFailed, got {other:?}"),
    }
    assert!(progress.values.iter().all(|&p| p < 100.0));
}

#[tokio::test]
async fn test_snapshot_is_isolated_from_later_edits() {
    let mut list = SelectionList::new();
    list.add([source("a", 1), source("b", 1)]);

    let snapshot = list.snapshot();
    list.remove(0).unwrap();
    list.add([source("c", 1)]);

    let output = MergeJob::new()
        .run(&snapshot, &mut RecordingProgress::default())
        .await
        .unwrap();
    assert_eq!(page_labels(&output.bytes), vec!["a-1", "b-1"]);
}

#[test]
fn test_list_index_out_of_range() {
    let mut list = SelectionList::new();
    list.add([source("a", 1)]);

    assert!(matches!(
        list.move_down(3),
        Err(AssembleError::IndexOutOfRange { index: 3, len: 1 })
    ));
    assert_eq!(list.len(), 1);
}

#[test]
fn test_missing_input_path() {
    let err = collect_input_paths(["/nonexistent/file.pdf"]).unwrap_err();
    assert!(matches!(err, AssembleError::FileNotFound { .. }));
    assert_eq!(err.exit_code(), 2);
}
