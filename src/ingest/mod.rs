//! Producer/consumer ingest loops and their coordination.
//!
//! The producer reads lines from standard input and enqueues them; the
//! consumer drains the queue, classifies each message, and writes it to
//! the sink. Shutdown is cooperative: the exit sentinel, end of input,
//! and cancellation all finish the queue, after which the consumer
//! drains whatever is left and terminates.

use crate::app::Config;
use crate::classifier;
use crate::domain::ScribeError;
use crate::queue::{MessageQueue, QueueConsumer, QueueProducer};
use crate::sink::FileSink;
use std::io::Write as _;
use std::sync::Arc;
use tokio::io::{self, AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Input line that terminates the producer loop.
pub const EXIT_TOKEN: &str = "exit";

/// Producer loop: read lines from `reader` and enqueue them until the
/// exit sentinel, end of input, or cancellation.
///
/// The queue is finished on every exit path, including read errors
/// (the producer drop closes it), so the consumer always terminates.
pub async fn read_loop<R>(
    reader: R,
    producer: QueueProducer,
    prompt: bool,
    cancel: CancellationToken,
) -> io::Result<()>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = reader.lines();
    loop {
        if prompt {
            print!("message ([LEVEL] text), '{EXIT_TOKEN}' to quit: ");
            let _ = std::io::stdout().flush();
        }

        tokio::select! {
            line = lines.next_line() => {
                match line? {
                    Some(line) if line == EXIT_TOKEN => break,
                    Some(line) => producer.enqueue(line),
                    // End of input behaves like the exit sentinel.
                    None => break,
                }
            }
            () = cancel.cancelled() => {
                info!("cancellation requested, finishing input");
                break;
            }
        }
    }

    producer.finish();
    Ok(())
}

/// Consumer loop: drain the queue in FIFO order, classify each message,
/// and write it to the sink. Terminates once the queue is empty and
/// finished.
pub async fn write_loop(mut consumer: QueueConsumer, sink: Arc<FileSink>) {
    while let Some(message) = consumer.dequeue().await {
        let classified = classifier::classify(&message);
        sink.write(classified.severity, classified.body);
    }
    debug!("queue drained and finished, consumer terminating");
}

/// Wire producer and consumer together over standard input and run the
/// pipeline to completion. Returns the number of records written.
pub async fn run(config: &Config, cancel: CancellationToken) -> Result<u64, ScribeError> {
    let sink = Arc::new(FileSink::open(&config.log_file, config.min_severity()));
    if sink.is_available() {
        info!(
            "appending to {} (minimum severity {})",
            sink.path().display(),
            sink.min_severity()
        );
    }

    let (producer, consumer) = MessageQueue::unbounded();
    let writer = tokio::spawn(write_loop(consumer, sink.clone()));

    let stdin = BufReader::new(io::stdin());
    let read_result = read_loop(stdin, producer, true, cancel).await;

    // Join the consumer before touching the sink again: the drain is then
    // complete, and no write can race sink teardown.
    writer
        .await
        .map_err(|e| ScribeError::Ingest(format!("consumer task failed: {e}")))?;
    read_result.map_err(|e| ScribeError::Ingest(format!("input read failed: {e}")))?;

    Ok(sink.records_written())
}
