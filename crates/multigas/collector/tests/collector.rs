//! End-to-end tests of the batching collector.

use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use alloy_primitives::B256;
use base_multigas::{BlockMultiGas, BlockMultiGasAccumulator, MultiGas, MultiGasRecord};
use base_multigas_collector::{
    BATCH_FILE_PREFIX, Collector, CollectorConfig, CollectorError, proto::BlockMultiGasBatch,
};
use prost::Message;
use rstest::rstest;

fn config(dir: &Path, batch_size: u64) -> CollectorConfig {
    CollectorConfig { output_dir: dir.to_path_buf(), batch_size }
}

fn block(number: u64) -> MultiGasRecord {
    BlockMultiGas {
        block_number: number,
        block_hash: B256::with_last_byte(number as u8),
        block_timestamp: 1_700_000_000 + number * 2,
        multi_gas: MultiGas::computation_gas(21_000 * number),
    }
    .into()
}

fn batch_files(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<_> = std::fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().path())
        .filter(|path| {
            path.file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| name.starts_with(BATCH_FILE_PREFIX))
        })
        .collect();
    files.sort();
    files
}

fn read_batch(path: &Path) -> BlockMultiGasBatch {
    BlockMultiGasBatch::decode(std::fs::read(path).unwrap().as_slice()).unwrap()
}

#[tokio::test]
async fn test_partial_batch_flushed_on_close() {
    let dir = tempfile::tempdir().unwrap();
    let (collector, tx) = Collector::with_channel(config(dir.path(), 2), 16).await.unwrap();

    for number in 1..=3 {
        tx.send(block(number)).await.unwrap();
    }
    drop(tx);
    collector.wait().await;

    let files = batch_files(dir.path());
    assert_eq!(files.len(), 2);
    assert_eq!(collector.batches_written().await, 2);

    let first = read_batch(&files[0]);
    let second = read_batch(&files[1]);
    assert_eq!(first.data.iter().map(|d| d.block_number).collect::<Vec<_>>(), [1, 2]);
    assert_eq!(second.data.iter().map(|d| d.block_number).collect::<Vec<_>>(), [3]);
    assert_eq!(second.data[0].gas_data.as_ref().and_then(|g| g.total_gas), Some(63_000));
}

#[tokio::test]
async fn test_no_records_writes_no_files() {
    let dir = tempfile::tempdir().unwrap();
    let (collector, tx) = Collector::with_channel(config(dir.path(), 2), 16).await.unwrap();

    drop(tx);
    collector.wait().await;

    assert!(batch_files(dir.path()).is_empty());
    assert_eq!(collector.batches_written().await, 0);
}

#[tokio::test]
async fn test_full_batches_written_in_order() {
    let dir = tempfile::tempdir().unwrap();
    let (collector, tx) = Collector::with_channel(config(dir.path(), 3), 1).await.unwrap();

    for number in 0..9 {
        tx.send(block(number)).await.unwrap();
    }
    drop(tx);
    collector.wait().await;

    let files = batch_files(dir.path());
    assert_eq!(files.len(), 3);
    let numbers: Vec<u64> = files
        .iter()
        .flat_map(|path| read_batch(path).data)
        .map(|data| data.block_number)
        .collect();
    assert_eq!(numbers, (0..9).collect::<Vec<_>>());

    for (sequence, path) in files.iter().enumerate() {
        let name = path.file_name().unwrap().to_str().unwrap();
        assert!(name.starts_with(&format!("{BATCH_FILE_PREFIX}{sequence:010}_")));
        assert!(name.ends_with(".pb"));
    }
}

#[tokio::test]
async fn test_transaction_records() {
    let dir = tempfile::tempdir().unwrap();
    let (collector, tx) = Collector::with_channel(config(dir.path(), 10), 4).await.unwrap();

    let mut acc = BlockMultiGasAccumulator::new(7, B256::repeat_byte(7), 1_700_000_014);
    acc.add_transaction(B256::repeat_byte(1), MultiGas::computation_gas(21_000));
    acc.add_transaction(B256::repeat_byte(2), MultiGas::storage_growth_gas(20_000));
    tx.send(acc.finish_transactions().into()).await.unwrap();
    drop(tx);
    collector.wait().await;

    let files = batch_files(dir.path());
    assert_eq!(files.len(), 1);
    let batch = read_batch(&files[0]);
    let block = &batch.data[0];
    assert_eq!(block.block_number, 7);
    assert_eq!(block.gas_data, None);
    assert_eq!(block.transactions.len(), 2);
    assert_eq!(block.transactions[0].tx_hash, B256::repeat_byte(1).to_vec());

    let gas = block.transactions[1].gas_data.as_ref().unwrap();
    assert_eq!(gas.storage_growth, 20_000);
    assert_eq!(gas.total_gas, None);
    assert_eq!(gas.refund, None);
}

#[tokio::test]
async fn test_wait_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let (collector, tx) = Collector::with_channel(config(dir.path(), 1), 1).await.unwrap();

    tx.send(block(1)).await.unwrap();
    drop(tx);
    collector.wait().await;
    collector.wait().await;

    assert_eq!(collector.batches_written().await, 1);
}

#[tokio::test]
async fn test_creates_nested_output_dir() {
    let dir = tempfile::tempdir().unwrap();
    let nested = dir.path().join("a").join("b");
    let (collector, tx) = Collector::with_channel(config(&nested, 1), 1).await.unwrap();

    assert!(nested.is_dir());
    assert_eq!(collector.output_dir(), nested);
    drop(tx);
    collector.wait().await;
}

#[tokio::test]
async fn test_write_failure_drops_batch_and_keeps_sequence() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("out");
    let (collector, tx) = Collector::with_channel(config(&output, 1), 1).await.unwrap();

    std::fs::remove_dir_all(&output).unwrap();
    tx.send(block(1)).await.unwrap();
    tokio::time::timeout(Duration::from_secs(10), async {
        while collector.batches_dropped().await == 0 {
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    })
    .await
    .unwrap();
    assert_eq!(collector.batches_written().await, 0);

    std::fs::create_dir_all(&output).unwrap();
    tx.send(block(2)).await.unwrap();
    drop(tx);
    collector.wait().await;

    assert_eq!(collector.batches_written().await, 1);
    assert_eq!(collector.batches_dropped().await, 1);

    let files = batch_files(&output);
    assert_eq!(files.len(), 1);
    let name = files[0].file_name().unwrap().to_str().unwrap();
    assert!(name.starts_with(&format!("{BATCH_FILE_PREFIX}0000000000_")));
    let numbers: Vec<u64> = read_batch(&files[0]).data.iter().map(|d| d.block_number).collect();
    assert_eq!(numbers, [2]);
}

#[rstest]
#[case::empty_output_dir(PathBuf::new(), 10, CollectorError::OutputDirRequired)]
#[case::empty_output_dir_and_zero_batch_size(PathBuf::new(), 0, CollectorError::OutputDirRequired)]
#[case::zero_batch_size(PathBuf::from("unused"), 0, CollectorError::BatchSizeRequired)]
#[tokio::test]
async fn test_invalid_config(
    #[case] output_dir: PathBuf,
    #[case] batch_size: u64,
    #[case] expected: CollectorError,
) {
    let (_tx, rx) = tokio::sync::mpsc::channel(1);
    let err = Collector::new(CollectorConfig { output_dir, batch_size }, rx).await.unwrap_err();
    assert_eq!(std::mem::discriminant(&err), std::mem::discriminant(&expected));
    assert!(!Path::new("unused").exists());
}

#[tokio::test]
async fn test_uncreatable_output_dir() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("file");
    std::fs::write(&file, b"").unwrap();

    let (_tx, rx) = tokio::sync::mpsc::channel(1);
    let result = Collector::new(config(&file.join("sub"), 1), rx).await;
    assert!(matches!(result, Err(CollectorError::CreateOutputDir { .. })));
}
