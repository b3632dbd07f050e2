use axum::http::StatusCode;
use once_cell::sync::Lazy;
use prometheus::{register_int_counter_vec, Encoder, IntCounterVec, TextEncoder};

// Prometheus metrics (default registry)
pub static REQUESTS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "commons_api_requests_total",
        "Commons API operations handled",
        &["operation"]
    )
    .expect("register requests_total")
});

pub static JOINS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "commons_api_joins_total",
        "Join requests by outcome (created or existing membership)",
        &["outcome"]
    )
    .expect("register joins_total")
});

pub fn record_operation(operation: &str) {
    REQUESTS_TOTAL.with_label_values(&[operation]).inc();
}

pub fn record_join(created: bool) {
    let outcome = if created { "created" } else { "existing" };
    JOINS_TOTAL.with_label_values(&[outcome]).inc();
}

pub fn encode_metrics() -> (StatusCode, String) {
    // Touch the statics so both families show up before the first request.
    Lazy::force(&REQUESTS_TOTAL);
    Lazy::force(&JOINS_TOTAL);

    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("metrics encode error: {e}"),
        );
    }
    (StatusCode::OK, String::from_utf8(buffer).unwrap_or_default())
}
