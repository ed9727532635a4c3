//! Integration tests for extracting page ranges.

use pdfassemble::error::AssembleError;
use pdfassemble::merge::SplitJob;
use pdfassemble::output::NoProgress;
use pdfassemble::range::PageRange;
use rstest::rstest;

use crate::common::{RecordingProgress, page_labels, source};

#[tokio::test]
async fn test_split_selected_pages_ascending() {
    let document = source("doc", 10);
    let pages = PageRange::parse("5,1-3", 10).unwrap();
    let mut progress = RecordingProgress::default();

    let output = SplitJob::new()
        .run(&document, &pages, &mut progress)
        .await
        .unwrap();

    assert_eq!(
        page_labels(&output.bytes),
        vec!["doc-1", "doc-2", "doc-3", "doc-5"]
    );
    assert_eq!(output.pages.to_string(), "1-3,5");
    assert_eq!(progress.values, vec![25.0, 50.0, 75.0, 100.0]);
}

#[rstest]
#[case("1,3,5", vec!["doc-1", "doc-3", "doc-5"])]
#[case("8-12", vec!["doc-8", "doc-9", "doc-10"])]
#[case(" 2 - 3 , 3 ", vec!["doc-2", "doc-3"])]
#[tokio::test]
async fn test_split_range_expressions(#[case] expression: &str, #[case] expected: Vec<&str>) {
    let document = source("doc", 10);
    let pages = PageRange::parse(expression, 10).unwrap();

    let output = SplitJob::new()
        .run(&document, &pages, &mut NoProgress)
        .await
        .unwrap();

    assert_eq!(page_labels(&output.bytes), expected);
}

#[tokio::test]
async fn test_split_same_source_twice() {
    let document = source("doc", 4);
    let job = SplitJob::new();

    let first = job
        .run(&document, &PageRange::parse("1-2", 4).unwrap(), &mut NoProgress)
        .await
        .unwrap();
    let second = job
        .run(&document, &PageRange::parse("3-4", 4).unwrap(), &mut NoProgress)
        .await
        .unwrap();

    assert_eq!(page_labels(&first.bytes), vec!["doc-1", "doc-2"]);
    assert_eq!(page_labels(&second.bytes), vec!["doc-3", "doc-4"]);
}

#[tokio::test]
async fn test_split_unreadable_source() {
    let document = pdfassemble::SourceDocument::new("broken.pdf", b"%PDF-1.4 junk".to_vec());
    let pages = PageRange::parse("1", 1).unwrap();

    let result = SplitJob::new().run(&document, &pages, &mut NoProgress).await;

    match result {
        Err(err @ AssembleError::SplitFailed { .. }) => {
            assert!(err.is_job_failure());
            assert!(err.to_string().contains("broken.pdf"));
        }
        other => panic!("Expected SplitFailed, got {other:?}"),
    }
}
