use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::Response;
use rally_shared::{RenderOptions, render_with};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::config::parse_flag;
use crate::routes::api::{
    error_response, html_response, if_none_match_matches, json_bytes_response,
    not_modified_response,
};
use crate::services::team_feed::{FeedError, FetchedSnapshot, fetch_team_snapshot};
use crate::state::AppState;

const INVALID_TEAM_ID: &str = "Invalid team id, must be integer";

#[derive(Debug, Default, Deserialize)]
pub struct OverviewQuery {
    /// Overrides the configured rebus row for this request (`1`/`0`, `true`/`false`, ...).
    #[serde(default)]
    pub rebus: Option<String>,
}

/// Raw team snapshot, forwarded from the feed byte for byte.
pub async fn get_team_snapshot(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    let team = match parse_team_id(&id) {
        Ok(team) => team,
        Err(response) => return response,
    };
    state.observability.record_snapshot_request();

    match fetch_snapshot(&state, team).await {
        Ok(snapshot) => json_bytes_response(snapshot.raw),
        Err(response) => response,
    }
}

/// Team status fragment for the operator dashboard.
pub async fn get_team_overview(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<OverviewQuery>,
    headers: HeaderMap,
) -> Response {
    let team = match parse_team_id(&id) {
        Ok(team) => team,
        Err(response) => return response,
    };
    state.observability.record_overview_request();

    let snapshot = match fetch_snapshot(&state, team).await {
        Ok(snapshot) => snapshot,
        Err(response) => return response,
    };

    let options = overview_options(state.render_options, &query);
    let html = render_with(&snapshot.json, &options);
    let etag = fragment_etag(&html);

    if if_none_match_matches(&headers, &etag) {
        state.observability.record_not_modified();
        return not_modified_response(&etag);
    }

    debug!(team, bytes = html.len(), "rendered team overview");
    html_response(html, &etag)
}

fn parse_team_id(raw: &str) -> Result<u32, Response> {
    raw.trim()
        .parse::<u32>()
        .map_err(|_| error_response(StatusCode::BAD_REQUEST, INVALID_TEAM_ID))
}

async fn fetch_snapshot(state: &AppState, team: u32) -> Result<FetchedSnapshot, Response> {
    fetch_team_snapshot(&state.http_client, &state.feed_base_url, team)
        .await
        .map_err(|e| {
            state.observability.record_upstream_error();
            warn!(team, error = %e, "failed to fetch team snapshot");
            let message = match e {
                FeedError::Upstream(_) => "live-tracking feed unavailable",
                FeedError::InvalidJson(_) => "live-tracking feed returned invalid JSON",
            };
            error_response(StatusCode::BAD_GATEWAY, message)
        })
}

fn overview_options(defaults: RenderOptions, query: &OverviewQuery) -> RenderOptions {
    let rebus_matrix = query
        .rebus
        .as_deref()
        .and_then(parse_flag)
        .unwrap_or(defaults.rebus_matrix);
    RenderOptions {
        rebus_matrix,
        ..defaults
    }
}

/// Strong validator for a rendered fragment. Rendering is deterministic, so
/// an unchanged snapshot always yields the same tag.
fn fragment_etag(html: &str) -> String {
    format!("\"{:08x}\"", crc32fast::hash(html.as_bytes()))
}
