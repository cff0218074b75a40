use std::fmt::Write as _;

use axum::Json;
use axum::body::Body;
use axum::extract::State;
use axum::http::{HeaderMap, HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use bytes::Bytes;

use crate::state::{AppState, ObservabilitySnapshot};

const PROMETHEUS_CONTENT_TYPE: &str = "text/plain; version=0.0.4; charset=utf-8";

pub async fn health(State(state): State<AppState>) -> Json<serde_json::Value> {
    let observability = state.observability.snapshot();
    Json(serde_json::json!({
        "status": "ok",
        "feed_base_url": &*state.feed_base_url,
        "rebus_matrix": state.render_options.rebus_matrix,
        "team_header": state.render_options.team_header,
        "observability": {
            "overview_requests_total": observability.overview_requests_total,
            "snapshot_requests_total": observability.snapshot_requests_total,
            "upstream_errors_total": observability.upstream_errors_total,
            "not_modified_total": observability.not_modified_total,
        }
    }))
}

pub async fn metrics(State(state): State<AppState>) -> impl IntoResponse {
    let body = render_prometheus_metrics(state.observability.snapshot());

    (
        [
            (header::CONTENT_TYPE, PROMETHEUS_CONTENT_TYPE),
            (header::CACHE_CONTROL, "no-store"),
        ],
        body,
    )
}

fn render_prometheus_metrics(observability: ObservabilitySnapshot) -> String {
    let counters = [
        (
            "rally_overview_requests_total",
            "Total team overview fragment requests.",
            observability.overview_requests_total,
        ),
        (
            "rally_snapshot_requests_total",
            "Total raw team snapshot requests.",
            observability.snapshot_requests_total,
        ),
        (
            "rally_upstream_errors_total",
            "Total failed requests to the live-tracking feed.",
            observability.upstream_errors_total,
        ),
        (
            "rally_not_modified_total",
            "Total overview requests answered with 304 Not Modified.",
            observability.not_modified_total,
        ),
    ];

    let mut body = String::new();
    for (name, help, value) in counters {
        let _ = writeln!(body, "# HELP {name} {help}");
        let _ = writeln!(body, "# TYPE {name} counter");
        let _ = writeln!(body, "{name} {value}");
    }
    body
}

pub(crate) fn json_bytes_response(body: Bytes) -> Response {
    body_response(Body::from(body), "application/json", None)
}

pub(crate) fn html_response(body: String, etag: &str) -> Response {
    body_response(Body::from(body), "text/html; charset=utf-8", Some(etag))
}

fn body_response(body: Body, content_type: &'static str, etag: Option<&str>) -> Response {
    let mut response = Response::new(body);
    let headers = response.headers_mut();
    headers.insert(header::CONTENT_TYPE, HeaderValue::from_static(content_type));
    headers.insert(header::CACHE_CONTROL, HeaderValue::from_static("no-store"));
    if let Some(etag) = etag
        && let Ok(etag_header) = HeaderValue::from_str(etag)
    {
        headers.insert(header::ETAG, etag_header);
    }
    response
}

pub(crate) fn not_modified_response(etag: &str) -> Response {
    let mut response = StatusCode::NOT_MODIFIED.into_response();
    let headers = response.headers_mut();
    headers.insert(header::CACHE_CONTROL, HeaderValue::from_static("no-store"));
    if let Ok(etag_header) = HeaderValue::from_str(etag) {
        headers.insert(header::ETAG, etag_header);
    }
    response
}

pub(crate) fn error_response(status: StatusCode, message: &str) -> Response {
    (status, Json(serde_json::json!({ "error": message }))).into_response()
}

fn normalize_etag(candidate: &str) -> &str {
    candidate.strip_prefix("W/").unwrap_or(candidate).trim()
}

pub(crate) fn if_none_match_matches(headers: &HeaderMap, etag: &str) -> bool {
    let Some(value) = headers.get(header::IF_NONE_MATCH) else {
        return false;
    };
    let Ok(raw) = value.to_str() else {
        return false;
    };

    raw.split(',').any(|candidate| {
        let candidate = candidate.trim();
        candidate == "*" || normalize_etag(candidate) == normalize_etag(etag)
    })
}
