use std::fmt;

use bytes::Bytes;
use serde_json::Value;
use tracing::debug;

/// One team snapshot as served by the live-tracking feed.
#[derive(Debug, Clone)]
pub struct FetchedSnapshot {
    /// Body exactly as received, forwarded untouched by the snapshot endpoint.
    pub raw: Bytes,
    pub json: Value,
}

#[derive(Debug)]
pub enum FeedError {
    /// Connection failure, timeout or non-success status from the feed.
    Upstream(reqwest::Error),
    InvalidJson(serde_json::Error),
}

impl fmt::Display for FeedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Upstream(e) => write!(f, "feed request failed: {e}"),
            Self::InvalidJson(e) => write!(f, "feed returned invalid JSON: {e}"),
        }
    }
}

impl std::error::Error for FeedError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Upstream(e) => Some(e),
            Self::InvalidJson(e) => Some(e),
        }
    }
}

impl From<reqwest::Error> for FeedError {
    fn from(e: reqwest::Error) -> Self {
        Self::Upstream(e)
    }
}

pub fn team_snapshot_url(base_url: &str, team: u32) -> String {
    format!("{}/teams/{team}", base_url.trim_end_matches('/'))
}

pub async fn fetch_team_snapshot(
    client: &reqwest::Client,
    base_url: &str,
    team: u32,
) -> Result<FetchedSnapshot, FeedError> {
    let url = team_snapshot_url(base_url, team);
    let resp = client.get(&url).send().await?.error_for_status()?;
    let raw = resp.bytes().await?;
    let json = serde_json::from_slice(&raw).map_err(FeedError::InvalidJson)?;
    debug!(team, bytes = raw.len(), "fetched team snapshot");
    Ok(FetchedSnapshot { raw, json })
}

#[cfg(test)]
mod tests {
    use super::team_snapshot_url;

    #[test]
    fn snapshot_url_joins_base_and_team() {
        assert_eq!(
            team_snapshot_url("http://tracker:63352", 7),
            "http://tracker:63352/teams/7"
        );
        assert_eq!(
            team_snapshot_url("http://tracker:63352/", 12),
            "http://tracker:63352/teams/12"
        );
    }
}
