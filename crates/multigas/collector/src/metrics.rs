use metrics::{Counter, Histogram};
use metrics_derive::Metrics;

#[derive(Metrics, Clone)]
#[metrics(scope = "multigas_collector")]
pub(crate) struct Metrics {
    #[metric(describe = "Count of aggregation records received from the execution engine")]
    pub records_received: Counter,

    #[metric(describe = "Count of batch files written")]
    pub batches_written: Counter,

    #[metric(describe = "Count of batches dropped because they could not be written")]
    pub flush_errors: Counter,

    #[metric(describe = "Time taken to encode and write a batch file")]
    pub flush_duration: Histogram,
}
