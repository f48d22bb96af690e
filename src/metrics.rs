use metrics::{counter, describe_counter, describe_gauge, gauge};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

/// Install the Prometheus recorder. Fails if a recorder is already installed.
pub fn init_metrics() -> anyhow::Result<PrometheusHandle> {
    let handle = PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| anyhow::anyhow!("Failed to install Prometheus recorder: {}", e))?;

    init_metric_descriptions();

    Ok(handle)
}

/// Can be called multiple times safely
fn init_metric_descriptions() {
    describe_counter!(
        "starterkart_quotes_total",
        "Quotes computed, by outcome"
    );
    describe_counter!(
        "starterkart_catalog_fetch_total",
        "Remote catalog collection fetches, by collection and outcome"
    );
    describe_counter!(
        "starterkart_plan_updates_total",
        "Plan edits, by outcome"
    );
    describe_gauge!(
        "starterkart_info",
        "Build information"
    );

    gauge!("starterkart_info", "version" => env!("CARGO_PKG_VERSION")).set(1.0);
}

/// `outcome`: "ok" or "invalid_selection"
pub fn record_quote(outcome: &'static str) {
    counter!("starterkart_quotes_total", "outcome" => outcome).increment(1);
}

/// `outcome`: "loaded", "empty" or "error"
pub fn record_catalog_fetch(collection: &str, outcome: &'static str) {
    counter!(
        "starterkart_catalog_fetch_total",
        "collection" => collection.to_string(),
        "outcome" => outcome,
    )
    .increment(1);
}

pub fn record_plan_update(outcome: &'static str) {
    counter!("starterkart_plan_updates_total", "outcome" => outcome).increment(1);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_metrics() {
        init_metric_descriptions();

        // Without an installed recorder these are no-ops; they must not panic.
        record_quote("ok");
        record_quote("invalid_selection");
        record_catalog_fetch("plans", "loaded");
        record_plan_update("failure");
    }

    #[test]
    fn test_local_recorder_renders() {
        let recorder = PrometheusBuilder::new().build_recorder();
        let handle = recorder.handle();

        metrics::with_local_recorder(&recorder, || record_quote("ok"));
        assert!(handle.render().contains("starterkart_quotes_total"));
    }
}
