//! End-to-end producer/consumer scenarios over an in-memory input stream.

use anyhow::Result;
use logscribe::domain::Severity;
use logscribe::ingest::{EXIT_TOKEN, read_loop, write_loop};
use logscribe::queue::MessageQueue;
use logscribe::sink::FileSink;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;
use tokio::io::BufReader;
use tokio_util::sync::CancellationToken;

/// Run the full pipeline over `input` and return the persisted lines and
/// the sink's accepted-record count.
async fn run_pipeline(input: &str, min_severity: Severity) -> Result<(Vec<String>, u64)> {
    let dir = TempDir::new()?;
    let path = dir.path().join("app.log");
    let sink = Arc::new(FileSink::open(&path, min_severity));

    let (producer, consumer) = MessageQueue::unbounded();
    let writer = tokio::spawn(write_loop(consumer, sink.clone()));

    let reader = BufReader::new(input.as_bytes());
    read_loop(reader, producer, false, CancellationToken::new()).await?;
    writer.await?;

    let lines = std::fs::read_to_string(&path)?
        .lines()
        .map(str::to_string)
        .collect();
    Ok((lines, sink.records_written()))
}

#[tokio::test]
async fn warning_prefix_is_classified_and_persisted() -> Result<()> {
    let (lines, written) = run_pipeline("[WARNING] disk low\nexit\n", Severity::Info).await?;
    assert_eq!(written, 1);
    assert_eq!(lines.len(), 1);
    assert!(lines[0].ends_with("[WARNING] disk low"), "line: {}", lines[0]);
    Ok(())
}

#[tokio::test]
async fn plain_text_is_persisted_as_info() -> Result<()> {
    let (lines, written) = run_pipeline("plain text\nexit\n", Severity::Info).await?;
    assert_eq!(written, 1);
    assert_eq!(lines.len(), 1);
    assert!(lines[0].ends_with("[INFO] plain text"), "line: {}", lines[0]);
    Ok(())
}

#[tokio::test]
async fn error_passes_a_warning_threshold() -> Result<()> {
    let (lines, written) = run_pipeline("[ERROR] crash\nexit\n", Severity::Warning).await?;
    assert_eq!(written, 1);
    assert_eq!(lines.len(), 1);
    assert!(lines[0].ends_with("[ERROR] crash"), "line: {}", lines[0]);
    Ok(())
}

#[tokio::test]
async fn warning_is_suppressed_by_an_error_threshold() -> Result<()> {
    let (lines, written) = run_pipeline("[WARNING] low prio\nexit\n", Severity::Error).await?;
    assert_eq!(written, 0);
    assert!(lines.is_empty());
    Ok(())
}

#[tokio::test]
async fn exit_token_flushes_queued_messages_without_loss_or_duplication() -> Result<()> {
    let total = 200;
    let mut input = String::new();
    for i in 0..total {
        input.push_str(&format!("message number {i}\n"));
    }
    input.push_str(EXIT_TOKEN);
    input.push('\n');
    // Anything typed after the exit token is never read.
    input.push_str("[ERROR] must not appear\n");

    let (lines, written) = run_pipeline(&input, Severity::Info).await?;
    assert_eq!(written, total as u64);
    assert_eq!(lines.len(), total);
    for (i, line) in lines.iter().enumerate() {
        assert!(
            line.ends_with(&format!("[INFO] message number {i}")),
            "order violated at line {i}: {line}"
        );
    }
    Ok(())
}

#[tokio::test]
async fn end_of_input_behaves_like_the_exit_token() -> Result<()> {
    let (lines, written) =
        run_pipeline("[ERROR] shutting down\nlast words\n", Severity::Info).await?;
    assert_eq!(written, 2);
    assert_eq!(lines.len(), 2);
    assert!(lines[0].ends_with("[ERROR] shutting down"));
    assert!(lines[1].ends_with("[INFO] last words"));
    Ok(())
}

#[tokio::test]
async fn mixed_severities_preserve_enqueue_order() -> Result<()> {
    let input = "[ERROR] first\nsecond\n[WARNING] third\n[warning] fourth\nexit\n";
    let (lines, written) = run_pipeline(input, Severity::Info).await?;
    assert_eq!(written, 4);
    assert!(lines[0].ends_with("[ERROR] first"));
    assert!(lines[1].ends_with("[INFO] second"));
    assert!(lines[2].ends_with("[WARNING] third"));
    assert!(lines[3].ends_with("[WARNING] fourth"));
    Ok(())
}

#[tokio::test]
async fn cancellation_finishes_the_queue_and_stops_both_loops() -> Result<()> {
    let dir = TempDir::new()?;
    let path = dir.path().join("app.log");
    let sink = Arc::new(FileSink::open(&path, Severity::Info));

    let (producer, consumer) = MessageQueue::unbounded();
    let writer = tokio::spawn(write_loop(consumer, sink.clone()));

    // A duplex stream whose write half stays open: the reader pends
    // forever, so only cancellation can end the producer loop.
    let (read_half, _write_half) = tokio::io::duplex(64);
    let cancel = CancellationToken::new();

    let loop_cancel = cancel.clone();
    let reader_task = tokio::spawn(async move {
        read_loop(BufReader::new(read_half), producer, false, loop_cancel).await
    });

    tokio::time::sleep(Duration::from_millis(20)).await;
    cancel.cancel();

    tokio::time::timeout(Duration::from_secs(1), reader_task)
        .await
        .expect("producer should stop on cancellation")??;
    tokio::time::timeout(Duration::from_secs(1), writer)
        .await
        .expect("consumer should stop once the queue is finished")?;

    assert_eq!(sink.records_written(), 0);
    Ok(())
}
