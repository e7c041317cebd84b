use bytes::Bytes;
use indicatif::{ProgressBar, ProgressStyle};
use reqwest::Url;
use reqwest::blocking::{Client as HttpClient, RequestBuilder, Response as HttpResponse};
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue, USER_AGENT};
use serde_json::Value;
use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use crate::config::{ClientConfig, load_config};
use crate::error::{FreesoundClientError, Result, error_details};
use crate::model::AccessTokenDetails;
use crate::oauth::{AUTHORIZE_PATH, AuthorizationCodeQuery, RefreshOAuthTokenQuery};
use crate::query::{
    Authorization, HttpMethod, PageDirection, PagingQuery, Payload, Query, ResponseFormat,
};
use crate::response::{PagingResponse, Response};
use crate::util::{api_url, parse_base_url, substitute_route_parameters};

/// Client used to make calls to the freesound.org API (v2).
///
/// Applications must first be registered with freesound.org
/// (<https://freesound.org/apiv2/apply>); the client ID and client secret
/// generated there are used to construct a client.
///
/// Every call is synchronous: [`Client::execute_query`] blocks until the
/// response has been read and recorded on the query.
#[derive(Debug, Clone)]
pub struct Client {
    base: Url,
    client_id: String,
    client_secret: String,

    progress: bool,

    http: HttpClient,
}

impl Client {
    /// Creates a client for the public API endpoint.
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Result<Self> {
        Self::from_config(ClientConfig::new(client_id, client_secret))
    }

    /// Creates a client using environment variables and/or `.freesoundrc`.
    ///
    /// Looked up in order: `FREESOUND_CLIENT_ID` / `FREESOUND_CLIENT_SECRET` /
    /// `FREESOUND_API_URL`, then the file named by `FREESOUND_RC`, then
    /// `.freesoundrc` in the current directory and in the home directory.
    pub fn from_env() -> Result<Self> {
        Self::from_config(load_config(None, None, None)?)
    }

    pub fn from_config(cfg: ClientConfig) -> Result<Self> {
        let base = parse_base_url(&cfg.url)?;

        let user_agent = match cfg.user_agent {
            Some(ua) => HeaderValue::from_str(&ua).map_err(|_| {
                FreesoundClientError::Configuration(format!("invalid user agent {:?}", ua))
            })?,
            None => HeaderValue::from_static(concat!("freesound-rs/", env!("CARGO_PKG_VERSION"))),
        };

        let mut default_headers = HeaderMap::new();
        default_headers.insert(USER_AGENT, user_agent);

        let http = HttpClient::builder()
            .default_headers(default_headers)
            .timeout(cfg.timeout)
            .build()?;

        Ok(Self {
            base,
            client_id: cfg.client_id,
            client_secret: cfg.client_secret,
            progress: false,
            http,
        })
    }

    /// Show a progress bar on stderr while binary responses are read.
    pub fn with_progress(mut self, progress: bool) -> Self {
        self.progress = progress;
        self
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    /// Executes a query and records the response on it.
    ///
    /// HTTP error statuses are not errors: they produce a response whose
    /// [`Response::is_error_response`] is true. Only transport failures and
    /// bodies that cannot be read as the query's declared format are returned
    /// as `Err`.
    pub fn execute_query<'q, Q: Query>(
        &self,
        query: &'q mut Q,
    ) -> Result<&'q Response<Q::Results>> {
        let response = self.dispatch(query)?;
        Ok(query.response_slot().insert(response))
    }

    /// Steps a paged query forward by one page and executes it again.
    ///
    /// If the dispatch fails the query keeps its previous page and response.
    pub fn next_page<'q, I, Q: PagingQuery<I>>(
        &self,
        query: &'q mut Q,
    ) -> Result<&'q Response<PagingResponse<I>>> {
        if !query.has_next_page() {
            return Err(FreesoundClientError::NoSuchPage(PageDirection::Next));
        }
        let page = query.page() + 1;
        self.execute_page(query, page)
    }

    /// Steps a paged query back by one page and executes it again.
    ///
    /// If the dispatch fails the query keeps its previous page and response.
    pub fn previous_page<'q, I, Q: PagingQuery<I>>(
        &self,
        query: &'q mut Q,
    ) -> Result<&'q Response<PagingResponse<I>>> {
        if !query.has_previous_page() {
            return Err(FreesoundClientError::NoSuchPage(PageDirection::Previous));
        }
        let page = query.page() - 1;
        self.execute_page(query, page)
    }

    /// URL of the page where a user grants this application access.
    ///
    /// After approval, freesound.org redirects to the application's registered
    /// callback with a `code` to pass to [`Client::redeem_authorization_code`].
    pub fn authorization_url(&self, state: Option<&str>) -> String {
        let mut url = api_url(&self.base, AUTHORIZE_PATH);
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("client_id", &self.client_id);
            pairs.append_pair("response_type", "code");
            if let Some(state) = state {
                pairs.append_pair("state", state);
            }
        }
        url.into()
    }

    /// Exchanges an authorization code for an access token.
    pub fn redeem_authorization_code(&self, code: &str) -> Result<Response<AccessTokenDetails>> {
        let query = AuthorizationCodeQuery::new(&self.client_id, &self.client_secret, code);
        self.dispatch(&query)
    }

    /// Obtains a new access token from a refresh token.
    pub fn refresh_access_token(
        &self,
        refresh_token: &str,
    ) -> Result<Response<AccessTokenDetails>> {
        let query =
            RefreshOAuthTokenQuery::new(&self.client_id, &self.client_secret, refresh_token);
        self.dispatch(&query)
    }

    /// Executes a binary query, streaming the body into `target`.
    ///
    /// Parent directories are created as needed. The body is written as it
    /// arrives and is not kept on the query, whose response slot is left
    /// empty on success. An HTTP error status is recorded on the query and
    /// also returned as [`FreesoundClientError::Api`] since there is nothing
    /// to write. A partially written file is removed when the transfer fails.
    pub fn download<Q>(&self, query: &mut Q, target: &Path) -> Result<PathBuf>
    where
        Q: Query<Results = Bytes>,
    {
        *query.response_slot() = None;

        let mut resp = self.send(query)?;
        let status = resp.status();
        if !status.is_success() {
            let response = error_response::<Q>(status, resp)?;
            let err = FreesoundClientError::Api {
                status,
                details: response.error_details().map(str::to_string),
            };
            *query.response_slot() = Some(response);
            return Err(err);
        }

        if let Some(parent) = target.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let written = File::create(target).map_err(FreesoundClientError::from).and_then(|file| {
            let mut out = BufWriter::new(file);
            let n = self.copy_body(&mut resp, &mut out)?;
            out.flush()?;
            Ok(n)
        });
        let written = match written {
            Ok(n) => n,
            Err(e) => {
                let _ = std::fs::remove_file(target);
                return Err(e);
            }
        };
        tracing::debug!(path = %target.display(), bytes = written, "download written");

        Ok(target.to_path_buf())
    }

    /// Releases the underlying HTTP client.
    pub fn shutdown(self) {
        tracing::debug!(client_id = %self.client_id, "shutting down freesound client");
        drop(self.http);
    }

    fn execute_page<'q, I, Q: PagingQuery<I>>(
        &self,
        query: &'q mut Q,
        page: u32,
    ) -> Result<&'q Response<PagingResponse<I>>> {
        let current = query.page();
        query.set_page(page);
        match self.dispatch(query) {
            Ok(response) => Ok(query.response_slot().insert(response)),
            Err(e) => {
                query.set_page(current);
                Err(e)
            }
        }
    }

    fn dispatch<Q: Query>(&self, query: &Q) -> Result<Response<Q::Results>> {
        let mut resp = self.send(query)?;
        let status = resp.status();

        if !status.is_success() {
            return error_response::<Q>(status, resp);
        }

        let payload = match Q::FORMAT {
            ResponseFormat::Json => Payload::Json(read_json(resp)?),
            ResponseFormat::Binary => {
                let mut body = Vec::new();
                self.copy_body(&mut resp, &mut body)?;
                Payload::Binary(Bytes::from(body))
            }
        };

        Ok(Response::success(status, query.process_results(payload)?))
    }

    fn send<Q: Query>(&self, query: &Q) -> Result<HttpResponse> {
        let request = self.build_request(query)?;
        tracing::debug!(method = ?Q::METHOD, path = Q::PATH, "dispatching freesound query");
        Ok(request.send()?)
    }

    fn build_request<Q: Query>(&self, query: &Q) -> Result<RequestBuilder> {
        let path = substitute_route_parameters(Q::PATH, &query.route_parameters())?;
        let url = api_url(&self.base, &path);
        let params = query.query_parameters();
        tracing::trace!(%url, ?params, "building request");

        let req = match Q::METHOD {
            HttpMethod::Get => {
                let req = self.http.get(url);
                if params.is_empty() { req } else { req.query(&params) }
            }
            HttpMethod::Post => {
                let req = self.http.post(url);
                if params.is_empty() { req } else { req.form(&params) }
            }
        };

        let req = match query.authorization() {
            Authorization::Token => {
                req.header(AUTHORIZATION, format!("Token {}", self.client_secret))
            }
            Authorization::OAuth(token) => req.header(AUTHORIZATION, format!("Bearer {}", token)),
            Authorization::AccessToken => req,
        };

        Ok(req)
    }

    /// Copies the response body into `out` in fixed-size chunks.
    ///
    /// `Content-Length` only sizes the progress bar; nothing is allocated
    /// from it.
    fn copy_body<W: Write>(&self, resp: &mut HttpResponse, out: &mut W) -> Result<u64> {
        let pb = self.progress.then(|| {
            let pb = match resp.content_length() {
                Some(len) => ProgressBar::new(len),
                None => ProgressBar::new_spinner(),
            };
            pb.set_style(
                ProgressStyle::with_template(
                    "{spinner:.green} {bytes}/{total_bytes} ({bytes_per_sec}) {wide_bar} {eta}",
                )
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("=>-"),
            );
            pb
        });

        let mut copied: u64 = 0;
        let mut buf = [0u8; 64 * 1024];
        loop {
            let n = resp.read(&mut buf)?;
            if n == 0 {
                break;
            }
            out.write_all(&buf[..n])?;
            copied += n as u64;
            if let Some(pb) = &pb {
                pb.inc(n as u64);
            }
        }

        if let Some(pb) = &pb {
            pb.finish_and_clear();
        }
        Ok(copied)
    }
}

fn error_response<Q: Query>(
    status: reqwest::StatusCode,
    resp: HttpResponse,
) -> Result<Response<Q::Results>> {
    let body = resp.bytes()?;
    let details = error_details(&body);
    tracing::warn!(
        %status,
        path = Q::PATH,
        details = details.as_deref().unwrap_or(""),
        "freesound.org returned an error status"
    );
    Ok(Response::error(status, details))
}

fn read_json(resp: HttpResponse) -> Result<Value> {
    let body = resp.bytes()?;
    if body.is_empty() {
        return Ok(Value::Null);
    }
    Ok(serde_json::from_slice(&body)?)
}
