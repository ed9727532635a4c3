//! End-to-end flows through the session and the file dispatcher.

use pdfassemble::config::OverwriteMode;
use pdfassemble::io::{FileDispatcher, read_source};
use pdfassemble::output::NoProgress;
use pdfassemble::session::{Reorder, Session, StatusMessage, UiEvent};
use tempfile::tempdir;

use crate::common::{RecordingProgress, page_labels, source, write_sample};

#[tokio::test]
async fn test_select_reorder_merge_and_save() {
    let dir = tempdir().unwrap();
    let mut session = Session::new(FileDispatcher::new(dir.path(), OverwriteMode::NoClobber));

    session
        .handle(
            UiEvent::FilesSelected(vec![source("a", 1), source("b", 1), source("c", 1)]),
            &mut NoProgress,
        )
        .await;
    session
        .handle(UiEvent::ListReordered(Reorder::MoveDown(0)), &mut NoProgress)
        .await;
    let status = session
        .handle(UiEvent::ListReordered(Reorder::Remove(2)), &mut NoProgress)
        .await;
    assert_eq!(
        status,
        StatusMessage::SelectionUpdated {
            documents: vec!["b.pdf".to_string(), "a.pdf".to_string()],
            skipped: 0,
        }
    );

    let mut progress = RecordingProgress::default();
    let status = session.handle(UiEvent::MergeRequested, &mut progress).await;

    let path = dir.path().join("merged.pdf");
    assert_eq!(
        status,
        StatusMessage::Merged {
            path: path.clone(),
            documents: 2,
            pages: 2,
        }
    );
    progress.assert_complete();
    assert_eq!(page_labels(&std::fs::read(path).unwrap()), vec!["b-1", "a-1"]);
}

#[tokio::test]
async fn test_split_from_disk_uses_stem_name() {
    let dir = tempdir().unwrap();
    let input = write_sample(dir.path(), "report", 6);
    let out = dir.path().join("out");
    let mut session = Session::new(FileDispatcher::new(&out, OverwriteMode::NoClobber));

    let document = read_source(&input).await.unwrap();
    let status = session
        .handle(
            UiEvent::SplitRequested {
                document,
                expression: "6,2-3".to_string(),
            },
            &mut NoProgress,
        )
        .await;

    let expected = out.join("report_pages.pdf");
    assert!(!status.is_error(), "{status}");
    assert_eq!(
        page_labels(&std::fs::read(&expected).unwrap()),
        vec!["report-2", "report-3", "report-6"]
    );
}

#[tokio::test]
async fn test_existing_output_is_save_failure_not_job_failure() {
    let dir = tempdir().unwrap();
    std::fs::write(dir.path().join("merged.pdf"), b"keep me").unwrap();
    let mut session = Session::new(FileDispatcher::new(dir.path(), OverwriteMode::NoClobber));

    session
        .handle(UiEvent::FilesSelected(vec![source("a", 1)]), &mut NoProgress)
        .await;
    let status = session.handle(UiEvent::MergeRequested, &mut NoProgress).await;

    assert!(matches!(status, StatusMessage::SaveFailed { .. }));
    assert_eq!(
        std::fs::read(dir.path().join("merged.pdf")).unwrap(),
        b"keep me"
    );
}

#[tokio::test]
async fn test_forced_output_replaces_file() {
    let dir = tempdir().unwrap();
    std::fs::write(dir.path().join("book.pdf"), b"old").unwrap();
    let mut session = Session::new(FileDispatcher::new(dir.path(), OverwriteMode::Force))
        .with_merged_filename("book.pdf");

    session
        .handle(UiEvent::FilesSelected(vec![source("a", 2)]), &mut NoProgress)
        .await;
    let status = session.handle(UiEvent::MergeRequested, &mut NoProgress).await;

    assert!(matches!(status, StatusMessage::Merged { pages: 2, .. }));
    assert_eq!(
        page_labels(&std::fs::read(dir.path().join("book.pdf")).unwrap()),
        vec!["a-1", "a-2"]
    );
}
