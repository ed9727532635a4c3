//! pdfassemble - Merge PDF files or extract page ranges.

mod cli;

use anyhow::Context;
use clap::Parser;
use std::process;

use crate::cli::Cli;
use pdfassemble::config::{Config, Operation, OverwriteMode};
use pdfassemble::document::SourceDocument;
use pdfassemble::error::AssembleError;
use pdfassemble::io::{FileDispatcher, collect_input_paths, read_source, read_sources};
use pdfassemble::merge::DocumentSummary;
use pdfassemble::output::{OutputFormatter, ProgressBar};
use pdfassemble::range::PageRange;
use pdfassemble::session::{Session, StatusMessage, UiEvent};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(code) => process::exit(code),
        Err(err) => {
            eprintln!("Error: {err:#}");
            let code = err
                .downcast_ref::<AssembleError>()
                .map_or(1, AssembleError::exit_code);
            process::exit(code);
        }
    }
}

/// Main application logic. Returns the process exit code.
async fn run(cli: Cli) -> anyhow::Result<i32> {
    let config = cli.to_config()?;

    env_logger::Builder::new()
        .filter_level(config.log_level())
        .parse_default_env()
        .init();

    let formatter = OutputFormatter::from_config(&config);
    formatter.debug(&format!("{} v{}", pdfassemble::NAME, pdfassemble::VERSION));

    if !config.dry_run {
        check_output_overwrite(&config)?;
    }

    let (status, statistics) = match &config.operation {
        Operation::Merge { inputs } => {
            let paths = collect_input_paths(inputs)?;
            formatter.info(&format!("Reading {} file(s)...", paths.len()));
            let documents = read_sources(&paths)
                .await
                .context("failed to read input files")?;

            if config.dry_run {
                return dry_run_merge(&config, &formatter, &documents).await;
            }
            if formatter.is_verbose() {
                formatter.document_list(&documents, &summarize_all(&documents).await);
            }

            let mut session = new_session(&config);
            let selected = session
                .handle(UiEvent::FilesSelected(documents), &mut ProgressBar::disabled())
                .await;
            if let StatusMessage::SelectionUpdated { skipped, .. } = &selected
                && *skipped > 0
            {
                formatter.warning(&format!("Ignoring {skipped} non-PDF file(s)"));
            }

            if selected.is_error() {
                (selected, None)
            } else {
                let mut progress = progress_bar(&formatter, "Merging");
                let status = session.handle(UiEvent::MergeRequested, &mut progress).await;
                progress.finish();
                (status, session.last_statistics().cloned())
            }
        }
        Operation::Split { input, pages } => {
            let document = read_source(input).await?;

            if config.dry_run {
                return dry_run_split(&config, &formatter, &document, pages).await;
            }
            if formatter.is_verbose() {
                let documents = std::slice::from_ref(&document);
                formatter.document_list(documents, &summarize_all(documents).await);
            }

            let mut session = new_session(&config);
            let mut progress = progress_bar(&formatter, "Extracting");
            let status = session
                .handle(
                    UiEvent::SplitRequested {
                        document,
                        expression: pages.clone(),
                    },
                    &mut progress,
                )
                .await;
            progress.finish();
            (status, session.last_statistics().cloned())
        }
    };

    if let Some(statistics) = statistics.filter(|_| !status.is_error()) {
        formatter.section("Statistics");
        formatter.statistics(&statistics);
    }
    report(&config, &formatter, &status);
    Ok(status.exit_code())
}

fn new_session(config: &Config) -> Session<FileDispatcher> {
    let dispatcher = FileDispatcher::new(config.output_dir(), config.overwrite_mode);
    let filename = config.output_filename();

    Session::new(dispatcher)
        .with_compression(config.compression)
        .with_merged_filename(filename.clone())
        .with_split_filename(filename)
}

fn progress_bar(formatter: &OutputFormatter, label: &str) -> ProgressBar {
    if formatter.is_quiet() {
        return ProgressBar::disabled();
    }
    let mut bar = ProgressBar::new();
    bar.set_message(label);
    bar
}

fn report(config: &Config, formatter: &OutputFormatter, status: &StatusMessage) {
    if config.json {
        println!("{}", status.to_json());
    } else {
        formatter.status(status);
    }
}

/// Refuse early, before any work, when the output would be clobbered.
fn check_output_overwrite(config: &Config) -> Result<(), AssembleError> {
    if config.overwrite_mode == OverwriteMode::NoClobber && config.output.exists() {
        return Err(AssembleError::OutputExists {
            path: config.output.clone(),
        });
    }
    Ok(())
}

/// Summaries for listing, parsed on the blocking pool.
async fn summarize_all(
    documents: &[SourceDocument],
) -> Vec<pdfassemble::Result<DocumentSummary>> {
    let mut summaries = Vec::with_capacity(documents.len());
    for document in documents {
        summaries.push(document.summary_blocking().await);
    }
    summaries
}

async fn dry_run_merge(
    config: &Config,
    formatter: &OutputFormatter,
    documents: &[SourceDocument],
) -> anyhow::Result<i32> {
    if documents.is_empty() {
        report(config, formatter, &StatusMessage::NoPdfFiles);
        return Ok(StatusMessage::NoPdfFiles.exit_code());
    }

    formatter.section("Merge plan (dry run, nothing is written)");
    formatter.document_list(documents, &summarize_all(documents).await);

    let mut total_pages = 0;
    for document in documents {
        total_pages += document.page_count_blocking().await?;
    }

    formatter.info(&format!(
        "Output would be {} with {total_pages} page(s)",
        config.output.display()
    ));
    if config.json {
        println!(
            "{}",
            serde_json::json!({
                "status": "dry_run",
                "documents": documents.iter().map(SourceDocument::name).collect::<Vec<_>>(),
                "pages": total_pages,
                "path": config.output,
            })
        );
    }
    Ok(0)
}

async fn dry_run_split(
    config: &Config,
    formatter: &OutputFormatter,
    document: &SourceDocument,
    expression: &str,
) -> anyhow::Result<i32> {
    let page_count = document.page_count_blocking().await?;
    let pages = PageRange::parse(expression, u32::try_from(page_count).unwrap_or(u32::MAX))?;
    if pages.is_empty() {
        return Err(AssembleError::invalid_range(
            expression,
            format!("no page in range; document has {page_count} page(s)"),
        )
        .into());
    }

    formatter.section("Split plan (dry run, nothing is written)");
    let documents = std::slice::from_ref(document);
    formatter.document_list(documents, &summarize_all(documents).await);
    formatter.info(&format!(
        "Output would be {} with page(s) {pages} ({} page(s))",
        config.output.display(),
        pages.len()
    ));
    if config.json {
        println!(
            "{}",
            serde_json::json!({
                "status": "dry_run",
                "document": document.name(),
                "pages": pages.pages(),
                "path": config.output,
            })
        );
    }
    Ok(0)
}
