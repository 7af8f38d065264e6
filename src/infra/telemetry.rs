use std::sync::Once;

use metrics::{Unit, describe_counter, describe_gauge};
use tracing_error::ErrorLayer;
use tracing_subscriber::{
    EnvFilter, fmt,
    layer::{Layer, SubscriberExt},
    util::SubscriberInitExt,
};

use crate::config::{LogFormat, LoggingSettings};

use super::error::InfraError;

static METRIC_DESCRIPTIONS: Once = Once::new();

/// Install a global tracing subscriber using the provided logging settings.
///
/// Logs go to stderr so command output on stdout stays machine-readable.
pub fn init(logging: &LoggingSettings) -> Result<(), InfraError> {
    describe_metrics();

    let env_filter = EnvFilter::builder()
        .with_default_directive(logging.level.into())
        .from_env_lossy();

    let fmt_layer = match logging.format {
        LogFormat::Json => fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_current_span(true)
            .with_span_list(true)
            .with_target(true)
            .boxed(),
        LogFormat::Compact => fmt::layer()
            .compact()
            .with_writer(std::io::stderr)
            .with_target(true)
            .boxed(),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(ErrorLayer::default())
        .with(fmt_layer)
        .try_init()
        .map_err(|err| {
            InfraError::telemetry(format!("failed to install tracing subscriber: {err}"))
        })
}

fn describe_metrics() {
    METRIC_DESCRIPTIONS.call_once(|| {
        describe_counter!(
            "rentbook_query_hit_total",
            Unit::Count,
            "Total number of query reads served from fresh cached data."
        );
        describe_counter!(
            "rentbook_query_miss_total",
            Unit::Count,
            "Total number of query reads that issued a request."
        );
        describe_counter!(
            "rentbook_query_dedup_total",
            Unit::Count,
            "Total number of query reads that joined a request already in flight."
        );
        describe_counter!(
            "rentbook_query_discard_total",
            Unit::Count,
            "Total number of responses discarded because a newer request superseded them."
        );
        describe_counter!(
            "rentbook_query_evict_total",
            Unit::Count,
            "Total number of idle query entries evicted due to capacity."
        );
        describe_counter!(
            "rentbook_query_invalidated_total",
            Unit::Count,
            "Total number of query entries marked stale by invalidation."
        );
        describe_gauge!(
            "rentbook_query_entries",
            Unit::Count,
            "Current number of entries held by the query cache."
        );
        describe_counter!(
            "rentbook_mutation_total",
            Unit::Count,
            "Total number of mutations, labelled by outcome."
        );
    });
}
