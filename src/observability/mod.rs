//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → logging.rs (structured log events via tracing)
//!     → metrics.rs (counters, histograms via the metrics facade)
//!
//! Consumers:
//!     → Any tracing subscriber (stdout by default)
//!     → Any metrics recorder the host installs
//! ```
//!
//! # Design Decisions
//! - Structured fields (generation, url, component) on every transition event
//! - Metrics are cheap (atomic increments) and optional

pub mod logging;
pub mod metrics;

use crate::config::ObservabilityConfig;

/// Apply observability settings: logging subscriber and metrics switch.
pub fn init(config: &ObservabilityConfig) {
    metrics::set_enabled(config.metrics_enabled);
    if !logging::init(config) {
        tracing::debug!("Tracing subscriber already installed");
    }
}
