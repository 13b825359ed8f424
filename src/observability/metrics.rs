//! Metrics collection.
//!
//! # Responsibilities
//! - Define router metrics (navigations, route changes, suspensions)
//! - Track how long suspended route loads take
//!
//! # Metrics
//! - `router_navigations_total` (counter): navigations by kind
//! - `router_route_changes_total` (counter): committed route changes
//! - `router_suspensions_total` (counter): route loads that had to wait
//! - `router_stale_completions_total` (counter): superseded loads discarded
//! - `router_render_failures_total` (counter): failures caught by a boundary
//! - `router_load_duration_seconds` (histogram): onLoadStart → onLoadEnd
//!
//! # Design Decisions
//! - Facade only: no exporter is installed here, hosts pick one
//! - Recording without a recorder is a no-op

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use metrics::{counter, histogram};

use crate::location::NavigationKind;

static ENABLED: AtomicBool = AtomicBool::new(true);

/// Turn recording on or off (from `ObservabilityConfig::metrics_enabled`).
pub fn set_enabled(enabled: bool) {
    ENABLED.store(enabled, Ordering::Relaxed);
}

fn enabled() -> bool {
    ENABLED.load(Ordering::Relaxed)
}

pub fn record_navigation(kind: NavigationKind) {
    if enabled() {
        counter!("router_navigations_total", "kind" => kind.as_str()).increment(1);
    }
}

pub fn record_route_change() {
    if enabled() {
        counter!("router_route_changes_total").increment(1);
    }
}

pub fn record_suspension() {
    if enabled() {
        counter!("router_suspensions_total").increment(1);
    }
}

pub fn record_stale_completion() {
    if enabled() {
        counter!("router_stale_completions_total").increment(1);
    }
}

pub fn record_render_failure() {
    if enabled() {
        counter!("router_render_failures_total").increment(1);
    }
}

pub fn record_load_duration(elapsed: Duration) {
    if enabled() {
        histogram!("router_load_duration_seconds").record(elapsed.as_secs_f64());
    }
}
