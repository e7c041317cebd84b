use reqwest::StatusCode;
use thiserror::Error;

use crate::query::PageDirection;

pub type Result<T> = std::result::Result<T, FreesoundClientError>;

/// The single error type surfaced by this crate.
///
/// HTTP error statuses returned by freesound.org are *not* reported through this
/// type: they are recorded on the query's [`Response`](crate::Response) instead.
#[derive(Error, Debug)]
pub enum FreesoundClientError {
    #[error("HTTP transport error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("failed to parse API JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("route parameter `{name}` has no value for path {path}")]
    UnresolvedRouteParameter { name: String, path: String },

    #[error("expected a {expected} response body but received {received}")]
    UnexpectedPayload {
        expected: &'static str,
        received: &'static str,
    },

    #[error("no {0} page available")]
    NoSuchPage(PageDirection),

    #[error("freesound.org returned HTTP {status}: {}", .details.as_deref().unwrap_or("(no details)"))]
    Api {
        status: StatusCode,
        details: Option<String>,
    },
}

/// Error body returned by freesound.org, e.g. `{"detail": "Not found."}`.
#[derive(Debug, serde::Deserialize)]
pub(crate) struct ApiErrorResponse {
    #[serde(default)]
    pub(crate) detail: Option<String>,
    // OAuth2 endpoints answer with {"error": ..., "error_description": ...}
    #[serde(default)]
    pub(crate) error: Option<String>,
    #[serde(default)]
    pub(crate) error_description: Option<String>,
}

impl ApiErrorResponse {
    pub(crate) fn into_details(self) -> Option<String> {
        if self.detail.is_some() {
            return self.detail;
        }
        match (self.error, self.error_description) {
            (Some(e), Some(d)) => Some(format!("{}: {}", e, d)),
            (e, d) => e.or(d),
        }
    }
}

pub(crate) fn error_details(body: &[u8]) -> Option<String> {
    if body.is_empty() {
        return None;
    }
    match serde_json::from_slice::<ApiErrorResponse>(body) {
        Ok(e) => e.into_details(),
        Err(_) => {
            let text = String::from_utf8_lossy(body).trim().to_string();
            if text.is_empty() { None } else { Some(text) }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detail_field_is_preferred() {
        let body = br#"{"detail": "Not found."}"#;
        assert_eq!(error_details(body).as_deref(), Some("Not found."));
    }

    #[test]
    fn oauth_error_fields_are_combined() {
        let body = br#"{"error": "invalid_grant", "error_description": "Code expired"}"#;
        assert_eq!(
            error_details(body).as_deref(),
            Some("invalid_grant: Code expired")
        );
    }

    #[test]
    fn non_json_body_is_kept_as_text() {
        assert_eq!(
            error_details(b"  Bad Gateway \n").as_deref(),
            Some("Bad Gateway")
        );
        assert_eq!(error_details(b""), None);
    }

    #[test]
    fn api_error_display_includes_details() {
        let err = FreesoundClientError::Api {
            status: StatusCode::NOT_FOUND,
            details: Some("Not found.".into()),
        };
        assert_eq!(
            err.to_string(),
            "freesound.org returned HTTP 404 Not Found: Not found."
        );
    }
}
