use once_cell::sync::Lazy;
use prometheus::{
    register_histogram_vec, register_int_counter_vec, Encoder, HistogramVec, IntCounterVec, TextEncoder,
};

use crate::errors::ServiceError;

// Prometheus metrics (default registry)
pub static STORE_CALLS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "customer_portal_store_calls_total",
        "Store calls by operation and outcome",
        &["operation", "outcome"]
    )
    .expect("register store_calls_total")
});

pub static STORE_CALL_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    register_histogram_vec!(
        "customer_portal_store_call_duration_seconds",
        "Store call duration in seconds",
        &["operation"],
        vec![0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0]
    )
    .expect("register store_call_duration")
});

/// Count one finished store call under `ok` or the error's kind.
pub fn record_outcome<T>(operation: &str, result: &Result<T, ServiceError>) {
    let outcome = match result {
        Ok(_) => "ok",
        Err(e) => e.kind(),
    };
    STORE_CALLS_TOTAL.with_label_values(&[operation, outcome]).inc();
}

/// Render the default registry in the Prometheus text format.
pub fn gather_text() -> Result<String, prometheus::Error> {
    let encoder = TextEncoder::new();
    let mut buf = Vec::new();
    encoder.encode(&prometheus::gather(), &mut buf)?;
    String::from_utf8(buf).map_err(|e| prometheus::Error::Msg(e.to_string()))
}
