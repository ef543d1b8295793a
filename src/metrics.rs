use metrics::{counter, describe_counter, describe_gauge, describe_histogram, gauge, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};

use crate::pricing::PricingModel;

/// Install the Prometheus recorder and describe all metrics
pub fn init_metrics() -> Result<PrometheusHandle, BuildError> {
    let handle = PrometheusBuilder::new().install_recorder()?;

    init_metric_descriptions();

    Ok(handle)
}

/// Initialize metric descriptions (can be called multiple times safely)
fn init_metric_descriptions() {
    describe_counter!(
        "pricing_calculations_total",
        "Total number of tier price calculations"
    );
    describe_counter!("pricing_quotes_total", "Total number of generated quotes");
    describe_histogram!("pricing_quote_lines", "Number of lines per generated quote");
    describe_counter!("pricing_errors_total", "Total number of rejected or failed requests");
    describe_gauge!(
        "pricing_service_info",
        "Pricing service version and build information"
    );

    gauge!("pricing_service_info", "version" => env!("CARGO_PKG_VERSION")).set(1.0);
}

/// Record a tier calculation
pub fn record_calculation(model: PricingModel) {
    counter!("pricing_calculations_total", "model" => model.as_str()).increment(1);
}

/// Record a generated quote
pub fn record_quote(lines: usize) {
    counter!("pricing_quotes_total").increment(1);
    histogram!("pricing_quote_lines").record(lines as f64);
}

/// Record an error
pub fn record_error(error_type: &'static str) {
    counter!("pricing_errors_total", "error_type" => error_type).increment(1);
}
