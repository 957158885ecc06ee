//! Background worker batching aggregation records into protobuf files.

use std::{
    path::{Path, PathBuf},
    sync::Arc,
    time::{Instant, SystemTime, UNIX_EPOCH},
};

use base_multigas::MultiGasRecord;
use prost::Message;
use tokio::{
    sync::{Mutex, mpsc},
    task::JoinHandle,
};
use tracing::{debug, error, info};

use crate::{
    CollectorConfig, CollectorError,
    metrics::Metrics,
    proto::{BlockMultiGasBatch, BlockMultiGasData},
};

/// File name prefix of batch files.
pub const BATCH_FILE_PREFIX: &str = "multigas_batch_";

/// File extension of batch files.
pub const BATCH_FILE_EXTENSION: &str = "pb";

/// Returns the file name of batch `sequence` written at unix time `timestamp`.
pub fn batch_file_name(sequence: u64, timestamp: u64) -> String {
    format!("{BATCH_FILE_PREFIX}{sequence:010}_{timestamp}.{BATCH_FILE_EXTENSION}")
}

#[derive(Debug, Default)]
struct BatchState {
    buffer: Vec<BlockMultiGasData>,
    sequence: u64,
    dropped: u64,
}

/// Handle to a running multi-gas collector.
///
/// The worker stops once every sender of its channel is dropped, after flushing what is left in
/// the buffer.
#[derive(Debug)]
pub struct Collector {
    output_dir: PathBuf,
    state: Arc<Mutex<BatchState>>,
    worker: Mutex<Option<JoinHandle<()>>>,
}

impl Collector {
    /// Validates `config`, creates the output directory and spawns the worker consuming `rx`.
    ///
    /// Must be called within a tokio runtime.
    pub async fn new(
        config: CollectorConfig,
        rx: mpsc::Receiver<MultiGasRecord>,
    ) -> Result<Self, CollectorError> {
        if config.output_dir.as_os_str().is_empty() {
            return Err(CollectorError::OutputDirRequired);
        }
        if config.batch_size == 0 {
            return Err(CollectorError::BatchSizeRequired);
        }
        tokio::fs::create_dir_all(&config.output_dir).await.map_err(|source| {
            CollectorError::CreateOutputDir { path: config.output_dir.clone(), source }
        })?;

        let state = Arc::new(Mutex::new(BatchState::default()));
        let worker = BatchWorker {
            output_dir: config.output_dir.clone(),
            batch_size: config.batch_size,
            state: Arc::clone(&state),
            metrics: Metrics::default(),
        };

        debug!(
            output_dir = %config.output_dir.display(),
            batch_size = config.batch_size,
            "Starting multi-gas collector"
        );
        let handle = tokio::spawn(worker.run(rx));

        Ok(Self { output_dir: config.output_dir, state, worker: Mutex::new(Some(handle)) })
    }

    /// Creates a channel of `capacity` records and a collector consuming it.
    ///
    /// Synchronous producers should use [`mpsc::Sender::blocking_send`].
    pub async fn with_channel(
        config: CollectorConfig,
        capacity: usize,
    ) -> Result<(Self, mpsc::Sender<MultiGasRecord>), CollectorError> {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        let collector = Self::new(config, rx).await?;
        Ok((collector, tx))
    }

    /// Waits until the worker has flushed its last batch and exited.
    ///
    /// Returns immediately if the worker already stopped.
    pub async fn wait(&self) {
        let mut worker = self.worker.lock().await;
        if let Some(handle) = worker.as_mut() {
            if let Err(e) = handle.await {
                error!(error = %e, "Multi-gas collector worker failed");
            }
            *worker = None;
        }
    }

    /// Returns the number of batch files written so far.
    pub async fn batches_written(&self) -> u64 {
        self.state.lock().await.sequence
    }

    /// Returns the number of batches dropped because they could not be written.
    pub async fn batches_dropped(&self) -> u64 {
        self.state.lock().await.dropped
    }

    /// Returns the directory batch files are written into.
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }
}

struct BatchWorker {
    output_dir: PathBuf,
    batch_size: u64,
    state: Arc<Mutex<BatchState>>,
    metrics: Metrics,
}

impl BatchWorker {
    async fn run(self, mut rx: mpsc::Receiver<MultiGasRecord>) {
        while let Some(record) = rx.recv().await {
            self.metrics.records_received.increment(1);

            let mut state = self.state.lock().await;
            state.buffer.push(BlockMultiGasData::from(&record));
            if state.buffer.len() as u64 >= self.batch_size {
                self.flush(&mut state).await;
            }
        }

        let mut state = self.state.lock().await;
        self.flush(&mut state).await;
        info!(
            batches = state.sequence,
            dropped = state.dropped,
            "Multi-gas collector stopped"
        );
    }

    /// Writes the buffered records as the next batch file. The buffer is emptied even if the
    /// write fails; the sequence only advances on success.
    async fn flush(&self, state: &mut BatchState) {
        if state.buffer.is_empty() {
            return;
        }

        let start = Instant::now();
        let records = state.buffer.len();
        let batch = BlockMultiGasBatch {
            batch_timestamp: unix_timestamp(),
            data: std::mem::take(&mut state.buffer),
        };
        let path = self.output_dir.join(batch_file_name(state.sequence, batch.batch_timestamp));

        match write_batch(&path, &batch).await {
            Ok(size_bytes) => {
                info!(file = %path.display(), records, size_bytes, "Wrote multi-gas batch");
                state.sequence += 1;
                self.metrics.batches_written.increment(1);
            }
            Err(e) => {
                error!(error = %e, records, "Failed to write multi-gas batch, dropping it");
                state.dropped += 1;
                self.metrics.flush_errors.increment(1);
            }
        }
        self.metrics.flush_duration.record(start.elapsed());
    }
}

async fn write_batch(path: &Path, batch: &BlockMultiGasBatch) -> Result<usize, CollectorError> {
    let bytes = batch.encode_to_vec();
    tokio::fs::write(path, &bytes)
        .await
        .map_err(|source| CollectorError::Write { path: path.to_path_buf(), source })?;
    Ok(bytes.len())
}

fn unix_timestamp() -> u64 {
    SystemTime::now().duration_since(UNIX_EPOCH).map(|d| d.as_secs()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case::first(0, 1_700_000_000, "multigas_batch_0000000000_1700000000.pb")]
    #[case::padded(42, 5, "multigas_batch_0000000042_5.pb")]
    #[case::wide(12_345_678_901, 0, "multigas_batch_12345678901_0.pb")]
    fn test_batch_file_name(#[case] sequence: u64, #[case] timestamp: u64, #[case] expected: &str) {
        assert_eq!(batch_file_name(sequence, timestamp), expected);
    }

    #[tokio::test]
    async fn test_flush_empty_buffer_is_noop() {
        let dir = tempfile::tempdir().unwrap();
        let worker = BatchWorker {
            output_dir: dir.path().to_path_buf(),
            batch_size: 1,
            state: Arc::default(),
            metrics: Metrics::default(),
        };

        let mut state = BatchState::default();
        worker.flush(&mut state).await;
        assert_eq!(state.sequence, 0);
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }
}
