use reqwest::StatusCode;

/// Outcome of a dispatched query.
///
/// A response always carries the HTTP status. Successful calls carry typed
/// results; error statuses carry whatever message freesound.org supplied.
#[derive(Debug, Clone)]
pub struct Response<T> {
    status: StatusCode,
    results: Option<T>,
    error_details: Option<String>,
}

impl<T> Response<T> {
    pub(crate) fn success(status: StatusCode, results: T) -> Self {
        Self {
            status,
            results: Some(results),
            error_details: None,
        }
    }

    pub(crate) fn error(status: StatusCode, error_details: Option<String>) -> Self {
        Self {
            status,
            results: None,
            error_details,
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Numeric status, e.g. `200`.
    pub fn status_code(&self) -> u16 {
        self.status.as_u16()
    }

    /// Canonical reason phrase, e.g. `"Not Found"`.
    pub fn status_text(&self) -> &'static str {
        self.status.canonical_reason().unwrap_or("")
    }

    pub fn results(&self) -> Option<&T> {
        self.results.as_ref()
    }

    pub fn into_results(self) -> Option<T> {
        self.results
    }

    pub fn error_details(&self) -> Option<&str> {
        self.error_details.as_deref()
    }

    pub fn is_error_response(&self) -> bool {
        self.status.as_u16() >= 400
    }
}

/// One page of a paged listing.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct PagingResponse<T> {
    /// Total number of results across all pages.
    #[serde(default)]
    pub count: u64,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub previous: Option<String>,
    #[serde(default = "Vec::new")]
    pub results: Vec<T>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_response_has_no_results() {
        let response: Response<u32> =
            Response::error(StatusCode::UNAUTHORIZED, Some("Invalid token".into()));
        assert!(response.is_error_response());
        assert_eq!(response.status_code(), 401);
        assert_eq!(response.status_text(), "Unauthorized");
        assert_eq!(response.results(), None);
        assert_eq!(response.error_details(), Some("Invalid token"));
    }

    #[test]
    fn paging_response_tolerates_missing_links() {
        let page: PagingResponse<u64> =
            serde_json::from_str(r#"{"count": 2, "results": [1, 2]}"#).unwrap();
        assert_eq!(page.count, 2);
        assert!(page.next.is_none());
        assert!(page.previous.is_none());
        assert_eq!(page.results, vec![1, 2]);
    }
}
