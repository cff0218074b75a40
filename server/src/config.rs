use std::time::Duration;

use rally_shared::RenderOptions;

/// Live-tracking service that publishes one JSON snapshot per team under `/teams/{id}`.
pub const DEFAULT_FEED_BASE_URL: &str = "http://127.0.0.1:63352";
pub const DEFAULT_SERVER_PORT: u16 = 3000;
pub const DEFAULT_UPSTREAM_HTTP_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_UPSTREAM_CONNECT_TIMEOUT_SECS: u64 = 3;

pub fn feed_base_url() -> String {
    std::env::var("FEED_BASE_URL")
        .ok()
        .map(|value| value.trim().trim_end_matches('/').to_owned())
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| DEFAULT_FEED_BASE_URL.to_owned())
}

pub fn server_port() -> u16 {
    std::env::var("SERVER_PORT")
        .ok()
        .and_then(|value| value.parse::<u16>().ok())
        .filter(|value| *value > 0)
        .unwrap_or(DEFAULT_SERVER_PORT)
}

pub fn upstream_http_timeout() -> Duration {
    std::env::var("UPSTREAM_HTTP_TIMEOUT_SECS")
        .ok()
        .and_then(|value| value.parse::<u64>().ok())
        .filter(|value| *value > 0)
        .map(Duration::from_secs)
        .unwrap_or_else(|| Duration::from_secs(DEFAULT_UPSTREAM_HTTP_TIMEOUT_SECS))
}

pub fn upstream_connect_timeout() -> Duration {
    std::env::var("UPSTREAM_CONNECT_TIMEOUT_SECS")
        .ok()
        .and_then(|value| value.parse::<u64>().ok())
        .filter(|value| *value > 0)
        .map(Duration::from_secs)
        .unwrap_or_else(|| Duration::from_secs(DEFAULT_UPSTREAM_CONNECT_TIMEOUT_SECS))
}

pub fn render_options() -> RenderOptions {
    let defaults = RenderOptions::default();
    RenderOptions {
        rebus_matrix: env_flag("OVERVIEW_REBUS_MATRIX").unwrap_or(defaults.rebus_matrix),
        team_header: env_flag("OVERVIEW_TEAM_HEADER").unwrap_or(defaults.team_header),
    }
}

fn env_flag(name: &str) -> Option<bool> {
    std::env::var(name).ok().and_then(|value| parse_flag(&value))
}

pub fn parse_flag(value: &str) -> Option<bool> {
    let normalized = value.trim().to_ascii_lowercase();
    match normalized.as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::{
        DEFAULT_FEED_BASE_URL, feed_base_url, parse_flag, render_options, server_port,
        upstream_http_timeout,
    };

    #[test]
    fn parse_flag_accepts_common_spellings() {
        for on in ["1", "true", "YES", " on "] {
            assert_eq!(parse_flag(on), Some(true), "{on}");
        }
        for off in ["0", "false", "No", "OFF"] {
            assert_eq!(parse_flag(off), Some(false), "{off}");
        }
        assert_eq!(parse_flag("maybe"), None);
        assert_eq!(parse_flag(""), None);
    }

    #[test]
    fn feed_base_url_strips_trailing_slash_and_falls_back() {
        temp_env::with_var("FEED_BASE_URL", Some("http://tracker:8080/"), || {
            assert_eq!(feed_base_url(), "http://tracker:8080");
        });
        temp_env::with_var("FEED_BASE_URL", Some("   "), || {
            assert_eq!(feed_base_url(), DEFAULT_FEED_BASE_URL);
        });
        temp_env::with_var_unset("FEED_BASE_URL", || {
            assert_eq!(feed_base_url(), DEFAULT_FEED_BASE_URL);
        });
    }

    #[test]
    fn invalid_numbers_fall_back_to_defaults() {
        temp_env::with_vars(
            [
                ("SERVER_PORT", Some("0")),
                ("UPSTREAM_HTTP_TIMEOUT_SECS", Some("soon")),
            ],
            || {
                assert_eq!(server_port(), 3000);
                assert_eq!(upstream_http_timeout(), Duration::from_secs(10));
            },
        );
        temp_env::with_var("SERVER_PORT", Some("8081"), || {
            assert_eq!(server_port(), 8081);
        });
    }

    #[test]
    fn render_options_follow_env_flags() {
        temp_env::with_vars(
            [
                ("OVERVIEW_REBUS_MATRIX", Some("off")),
                ("OVERVIEW_TEAM_HEADER", Some("yes")),
            ],
            || {
                let options = render_options();
                assert!(!options.rebus_matrix);
                assert!(options.team_header);
            },
        );
        temp_env::with_vars_unset(["OVERVIEW_REBUS_MATRIX", "OVERVIEW_TEAM_HEADER"], || {
            let options = render_options();
            assert!(options.rebus_matrix);
            assert!(!options.team_header);
        });
    }
}
