//! OAuth2 token endpoint queries.
//!
//! Implements:
//! - Token exchange (authorization code -> tokens)
//! - Token refresh
//!
//! Both are sent to `/oauth2/access_token/` without an `Authorization`
//! header; the client credentials travel as form fields.

use crate::error::Result;
use crate::model::AccessTokenDetails;
use crate::query::{Authorization, HttpMethod, Parameters, Payload, Query, json_results};
use crate::response::Response;

/// Path of the browser-facing authorization page.
pub(crate) const AUTHORIZE_PATH: &str = "/oauth2/authorize/";

const ACCESS_TOKEN_PATH: &str = "/oauth2/access_token/";

fn client_fields(client_id: &str, client_secret: &str, grant_type: &str) -> Parameters {
    Parameters::from([
        ("client_id".to_string(), client_id.to_string()),
        ("client_secret".to_string(), client_secret.to_string()),
        ("grant_type".to_string(), grant_type.to_string()),
    ])
}

/// Exchanges the code handed back by the authorization page for tokens.
#[derive(Debug, Clone)]
pub struct AuthorizationCodeQuery {
    client_id: String,
    client_secret: String,
    code: String,
    response: Option<Response<AccessTokenDetails>>,
}

impl AuthorizationCodeQuery {
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        code: impl Into<String>,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            code: code.into(),
            response: None,
        }
    }
}

impl Query for AuthorizationCodeQuery {
    type Results = AccessTokenDetails;

    const PATH: &'static str = ACCESS_TOKEN_PATH;

    const METHOD: HttpMethod = HttpMethod::Post;

    fn query_parameters(&self) -> Parameters {
        let mut params = client_fields(&self.client_id, &self.client_secret, "authorization_code");
        params.insert("code".into(), self.code.clone());
        params
    }

    fn authorization(&self) -> Authorization<'_> {
        Authorization::AccessToken
    }

    fn process_results(&self, payload: Payload) -> Result<AccessTokenDetails> {
        json_results(payload)
    }

    fn response(&self) -> Option<&Response<AccessTokenDetails>> {
        self.response.as_ref()
    }

    fn response_slot(&mut self) -> &mut Option<Response<AccessTokenDetails>> {
        &mut self.response
    }
}

/// Obtains a fresh access token using a refresh token.
#[derive(Debug, Clone)]
pub struct RefreshOAuthTokenQuery {
    client_id: String,
    client_secret: String,
    refresh_token: String,
    response: Option<Response<AccessTokenDetails>>,
}

impl RefreshOAuthTokenQuery {
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        refresh_token: impl Into<String>,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            refresh_token: refresh_token.into(),
            response: None,
        }
    }
}

impl Query for RefreshOAuthTokenQuery {
    type Results = AccessTokenDetails;

    const PATH: &'static str = ACCESS_TOKEN_PATH;

    const METHOD: HttpMethod = HttpMethod::Post;

    fn query_parameters(&self) -> Parameters {
        let mut params = client_fields(&self.client_id, &self.client_secret, "refresh_token");
        params.insert("refresh_token".into(), self.refresh_token.clone());
        params
    }

    fn authorization(&self) -> Authorization<'_> {
        Authorization::AccessToken
    }

    fn process_results(&self, payload: Payload) -> Result<AccessTokenDetails> {
        json_results(payload)
    }

    fn response(&self) -> Option<&Response<AccessTokenDetails>> {
        self.response.as_ref()
    }

    fn response_slot(&mut self) -> &mut Option<Response<AccessTokenDetails>> {
        &mut self.response
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn authorization_code_fields() {
        let query = AuthorizationCodeQuery::new("id", "secret", "the-code");
        let params = query.query_parameters();

        assert_eq!(params["client_id"], "id");
        assert_eq!(params["client_secret"], "secret");
        assert_eq!(params["grant_type"], "authorization_code");
        assert_eq!(params["code"], "the-code");
        assert_eq!(query.authorization(), Authorization::AccessToken);
        assert_eq!(AuthorizationCodeQuery::METHOD, HttpMethod::Post);
    }

    #[test]
    fn refresh_fields() {
        let query = RefreshOAuthTokenQuery::new("id", "secret", "refresh-me");
        let params = query.query_parameters();

        assert_eq!(params["grant_type"], "refresh_token");
        assert_eq!(params["refresh_token"], "refresh-me");
        assert!(!params.contains_key("code"));
        assert_eq!(query.authorization(), Authorization::AccessToken);
    }
}
