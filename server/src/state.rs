use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use rally_shared::RenderOptions;
use tracing::warn;

use crate::config::{
    feed_base_url, render_options, upstream_connect_timeout, upstream_http_timeout,
};

#[derive(Clone)]
pub struct AppState {
    pub http_client: reqwest::Client,
    /// Base URL of the live-tracking feed, without a trailing slash.
    pub feed_base_url: Arc<str>,
    /// Defaults for the overview endpoint; a request may override the rebus row.
    pub render_options: RenderOptions,
    pub observability: Arc<ObservabilityCounters>,
}

#[derive(Debug, Default)]
pub struct ObservabilityCounters {
    overview_requests_total: AtomicU64,
    snapshot_requests_total: AtomicU64,
    upstream_errors_total: AtomicU64,
    not_modified_total: AtomicU64,
}

#[derive(Debug, Clone, Copy)]
pub struct ObservabilitySnapshot {
    pub overview_requests_total: u64,
    pub snapshot_requests_total: u64,
    pub upstream_errors_total: u64,
    pub not_modified_total: u64,
}

impl ObservabilityCounters {
    pub fn snapshot(&self) -> ObservabilitySnapshot {
        ObservabilitySnapshot {
            overview_requests_total: self.overview_requests_total.load(Ordering::Relaxed),
            snapshot_requests_total: self.snapshot_requests_total.load(Ordering::Relaxed),
            upstream_errors_total: self.upstream_errors_total.load(Ordering::Relaxed),
            not_modified_total: self.not_modified_total.load(Ordering::Relaxed),
        }
    }

    pub fn record_overview_request(&self) {
        self.overview_requests_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_snapshot_request(&self) {
        self.snapshot_requests_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_upstream_error(&self) {
        self.upstream_errors_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_not_modified(&self) {
        self.not_modified_total.fetch_add(1, Ordering::Relaxed);
    }
}

impl AppState {
    pub fn from_env() -> Self {
        Self::new(&feed_base_url(), render_options())
    }

    pub fn new(feed_base_url: &str, render_options: RenderOptions) -> Self {
        let request_timeout = upstream_http_timeout();
        let connect_timeout = upstream_connect_timeout();
        let http_client = reqwest::Client::builder()
            .user_agent("rally-overview/0.1")
            .timeout(request_timeout)
            .connect_timeout(connect_timeout)
            .build()
            .or_else(|e| {
                warn!(
                    error = %e,
                    "failed to build configured HTTP client, retrying without custom user-agent"
                );
                reqwest::Client::builder()
                    .timeout(request_timeout)
                    .connect_timeout(connect_timeout)
                    .build()
            })
            .unwrap_or_else(|e| {
                panic!("failed to build timeout-configured HTTP client: {e}");
            });
        Self {
            http_client,
            feed_base_url: Arc::from(feed_base_url.trim_end_matches('/')),
            render_options,
            observability: Arc::new(ObservabilityCounters::default()),
        }
    }
}
