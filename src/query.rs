//! The query abstraction: one value per API call.
//!
//! Every query type declares, at the type level, the three capabilities the
//! [`Client`](crate::Client) needs to dispatch it: the HTTP method, how the
//! response body is read ([`ResponseFormat`]) and which credentials are sent
//! ([`Authorization`]). All three are closed enums, so the dispatcher matches
//! on them exhaustively instead of inspecting types at runtime.

use bytes::Bytes;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

use crate::error::{FreesoundClientError, Result};
use crate::response::{PagingResponse, Response};

/// Route or query parameters, ordered by name.
pub type Parameters = BTreeMap<String, String>;

/// Largest page size accepted by freesound.org.
pub const MAXIMUM_PAGE_SIZE: u32 = 150;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

/// How the body of a successful response is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseFormat {
    Json,
    Binary,
}

/// Which credentials accompany a query.
///
/// Exactly one variant applies to any query; the client maps it to a single
/// `Authorization` header (or none).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Authorization<'a> {
    /// `Authorization: Token <client secret>`.
    Token,
    /// `Authorization: Bearer <access token>` for OAuth2-protected endpoints.
    OAuth(&'a str),
    /// No header. Used by the access token endpoint, which takes the client
    /// credentials as form fields.
    AccessToken,
}

/// Response body handed to [`Query::process_results`].
#[derive(Debug, Clone)]
pub enum Payload {
    Json(Value),
    Binary(Bytes),
}

impl Payload {
    fn kind(&self) -> &'static str {
        match self {
            Payload::Json(_) => "JSON",
            Payload::Binary(_) => "binary",
        }
    }
}

/// Deserializes a JSON payload into `T`.
pub fn json_results<T: DeserializeOwned>(payload: Payload) -> Result<T> {
    match payload {
        Payload::Json(value) => Ok(serde_json::from_value(value)?),
        other => Err(FreesoundClientError::UnexpectedPayload {
            expected: "JSON",
            received: other.kind(),
        }),
    }
}

/// Extracts the raw bytes of a binary payload.
pub fn binary_results(payload: Payload) -> Result<Bytes> {
    match payload {
        Payload::Binary(bytes) => Ok(bytes),
        other => Err(FreesoundClientError::UnexpectedPayload {
            expected: "binary",
            received: other.kind(),
        }),
    }
}

/// A single call against the freesound.org API.
///
/// The client reads the route/query parameters and capabilities, sends the
/// request and stores the outcome in the query's response holder, where it
/// stays until the query is dispatched again.
pub trait Query {
    /// Typed results of a successful call.
    type Results;

    /// Path template relative to the API base, with `{name}` placeholders for
    /// route parameters.
    const PATH: &'static str;

    const METHOD: HttpMethod = HttpMethod::Get;

    const FORMAT: ResponseFormat = ResponseFormat::Json;

    fn route_parameters(&self) -> Parameters {
        Parameters::new()
    }

    fn query_parameters(&self) -> Parameters {
        Parameters::new()
    }

    fn authorization(&self) -> Authorization<'_> {
        Authorization::Token
    }

    /// Converts the body of a successful response into typed results.
    fn process_results(&self, payload: Payload) -> Result<Self::Results>;

    /// Response recorded by the last dispatch, if any.
    fn response(&self) -> Option<&Response<Self::Results>>;

    fn response_slot(&mut self) -> &mut Option<Response<Self::Results>>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageDirection {
    Next,
    Previous,
}

impl fmt::Display for PageDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageDirection::Next => f.write_str("next"),
            PageDirection::Previous => f.write_str("previous"),
        }
    }
}

/// Page number and size of a paged query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paging {
    page: u32,
    page_size: Option<u32>,
}

impl Default for Paging {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: None,
        }
    }
}

impl Paging {
    pub fn page(&self) -> u32 {
        self.page
    }

    /// Pages are numbered from 1; `0` is treated as `1`.
    pub fn set_page(&mut self, page: u32) {
        self.page = page.max(1);
    }

    pub fn page_size(&self) -> Option<u32> {
        self.page_size
    }

    /// Clamped to `1..=MAXIMUM_PAGE_SIZE`.
    pub fn set_page_size(&mut self, page_size: u32) {
        self.page_size = Some(page_size.clamp(1, MAXIMUM_PAGE_SIZE));
    }

    pub(crate) fn write_parameters(&self, params: &mut Parameters) {
        params.insert("page".into(), self.page.to_string());
        if let Some(size) = self.page_size {
            params.insert("page_size".into(), size.to_string());
        }
    }
}

/// A query whose results come back one page at a time.
pub trait PagingQuery<I>: Query<Results = PagingResponse<I>> {
    fn paging(&self) -> &Paging;

    fn paging_mut(&mut self) -> &mut Paging;

    fn page(&self) -> u32 {
        self.paging().page()
    }

    fn set_page(&mut self, page: u32) {
        self.paging_mut().set_page(page);
    }

    /// True when the last dispatch returned a page that links to a next one.
    fn has_next_page(&self) -> bool {
        self.response()
            .and_then(Response::results)
            .is_some_and(|r| r.next.is_some())
    }

    fn has_previous_page(&self) -> bool {
        self.page() > 1
    }
}

/// Result ordering for searches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    /// Relevance to the search terms.
    #[default]
    Score,
    DurationDescending,
    DurationAscending,
    CreatedDescending,
    CreatedAscending,
    DownloadsDescending,
    DownloadsAscending,
    RatingDescending,
    RatingAscending,
}

impl SortOrder {
    /// Value sent in the `sort` parameter.
    pub fn parameter_value(self) -> &'static str {
        match self {
            SortOrder::Score => "score",
            SortOrder::DurationDescending => "duration_desc",
            SortOrder::DurationAscending => "duration_asc",
            SortOrder::CreatedDescending => "created_desc",
            SortOrder::CreatedAscending => "created_asc",
            SortOrder::DownloadsDescending => "downloads_desc",
            SortOrder::DownloadsAscending => "downloads_asc",
            SortOrder::RatingDescending => "rating_desc",
            SortOrder::RatingAscending => "rating_asc",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn paging_defaults_to_first_page() {
        let paging = Paging::default();
        assert_eq!(paging.page(), 1);
        assert_eq!(paging.page_size(), None);

        let mut params = Parameters::new();
        paging.write_parameters(&mut params);
        assert_eq!(params.get("page").map(String::as_str), Some("1"));
        assert!(!params.contains_key("page_size"));
    }

    #[test]
    fn page_size_is_clamped() {
        let mut paging = Paging::default();
        paging.set_page_size(500);
        assert_eq!(paging.page_size(), Some(MAXIMUM_PAGE_SIZE));
        paging.set_page_size(0);
        assert_eq!(paging.page_size(), Some(1));
    }

    #[test]
    fn page_zero_becomes_one() {
        let mut paging = Paging::default();
        paging.set_page(0);
        assert_eq!(paging.page(), 1);
    }

    #[test]
    fn mismatched_payload_is_rejected() {
        let err = binary_results(Payload::Json(json!({}))).unwrap_err();
        assert!(matches!(
            err,
            FreesoundClientError::UnexpectedPayload {
                expected: "binary",
                received: "JSON"
            }
        ));

        let err = json_results::<Value>(Payload::Binary(Bytes::from_static(b"RIFF"))).unwrap_err();
        assert!(matches!(
            err,
            FreesoundClientError::UnexpectedPayload {
                expected: "JSON",
                ..
            }
        ));
    }

    #[test]
    fn sort_order_values() {
        assert_eq!(SortOrder::default().parameter_value(), "score");
        assert_eq!(SortOrder::CreatedAscending.parameter_value(), "created_asc");
        assert_eq!(SortOrder::RatingDescending.parameter_value(), "rating_desc");
    }
}
