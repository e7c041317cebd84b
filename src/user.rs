use crate::error::Result;
use crate::model::{Pack, Sound, User};
use crate::query::{Authorization, Paging, PagingQuery, Parameters, Payload, Query, json_results};
use crate::response::{PagingResponse, Response};

pub const USERNAME_ROUTE_PARAMETER: &str = "username";

fn user_route(username: &str) -> Parameters {
    Parameters::from([(USERNAME_ROUTE_PARAMETER.to_string(), username.to_string())])
}

/// Public profile of a user (`/users/{username}/`).
#[derive(Debug, Clone)]
pub struct UserInstanceQuery {
    username: String,
    response: Option<Response<User>>,
}

impl UserInstanceQuery {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            response: None,
        }
    }
}

impl Query for UserInstanceQuery {
    type Results = User;

    const PATH: &'static str = "/users/{username}/";

    fn route_parameters(&self) -> Parameters {
        user_route(&self.username)
    }

    fn process_results(&self, payload: Payload) -> Result<User> {
        json_results(payload)
    }

    fn response(&self) -> Option<&Response<User>> {
        self.response.as_ref()
    }

    fn response_slot(&mut self) -> &mut Option<Response<User>> {
        &mut self.response
    }
}

/// Sounds uploaded by a user (`/users/{username}/sounds/`).
#[derive(Debug, Clone)]
pub struct UserSoundsQuery {
    username: String,
    paging: Paging,
    response: Option<Response<PagingResponse<Sound>>>,
}

impl UserSoundsQuery {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            paging: Paging::default(),
            response: None,
        }
    }

    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.paging.set_page_size(page_size);
        self
    }
}

impl Query for UserSoundsQuery {
    type Results = PagingResponse<Sound>;

    const PATH: &'static str = "/users/{username}/sounds/";

    fn route_parameters(&self) -> Parameters {
        user_route(&self.username)
    }

    fn query_parameters(&self) -> Parameters {
        let mut params = Parameters::new();
        self.paging.write_parameters(&mut params);
        params
    }

    fn process_results(&self, payload: Payload) -> Result<Self::Results> {
        json_results(payload)
    }

    fn response(&self) -> Option<&Response<Self::Results>> {
        self.response.as_ref()
    }

    fn response_slot(&mut self) -> &mut Option<Response<Self::Results>> {
        &mut self.response
    }
}

impl PagingQuery<Sound> for UserSoundsQuery {
    fn paging(&self) -> &Paging {
        &self.paging
    }

    fn paging_mut(&mut self) -> &mut Paging {
        &mut self.paging
    }
}

/// Packs created by a user (`/users/{username}/packs/`).
#[derive(Debug, Clone)]
pub struct UserPacksQuery {
    username: String,
    paging: Paging,
    response: Option<Response<PagingResponse<Pack>>>,
}

impl UserPacksQuery {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            paging: Paging::default(),
            response: None,
        }
    }

    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.paging.set_page_size(page_size);
        self
    }
}

impl Query for UserPacksQuery {
    type Results = PagingResponse<Pack>;

    const PATH: &'static str = "/users/{username}/packs/";

    fn route_parameters(&self) -> Parameters {
        user_route(&self.username)
    }

    fn query_parameters(&self) -> Parameters {
        let mut params = Parameters::new();
        self.paging.write_parameters(&mut params);
        params
    }

    fn process_results(&self, payload: Payload) -> Result<Self::Results> {
        json_results(payload)
    }

    fn response(&self) -> Option<&Response<Self::Results>> {
        self.response.as_ref()
    }

    fn response_slot(&mut self) -> &mut Option<Response<Self::Results>> {
        &mut self.response
    }
}

impl PagingQuery<Pack> for UserPacksQuery {
    fn paging(&self) -> &Paging {
        &self.paging
    }

    fn paging_mut(&mut self) -> &mut Paging {
        &mut self.paging
    }
}

/// Profile of the user who authorized the OAuth2 token (`/me/`).
#[derive(Debug, Clone)]
pub struct MeQuery {
    oauth_token: String,
    response: Option<Response<User>>,
}

impl MeQuery {
    pub fn new(oauth_token: impl Into<String>) -> Self {
        Self {
            oauth_token: oauth_token.into(),
            response: None,
        }
    }
}

impl Query for MeQuery {
    type Results = User;

    const PATH: &'static str = "/me/";

    fn authorization(&self) -> Authorization<'_> {
        Authorization::OAuth(&self.oauth_token)
    }

    fn process_results(&self, payload: Payload) -> Result<User> {
        json_results(payload)
    }

    fn response(&self) -> Option<&Response<User>> {
        self.response.as_ref()
    }

    fn response_slot(&mut self) -> &mut Option<Response<User>> {
        &mut self.response
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn username_is_a_route_parameter() {
        let query = UserInstanceQuery::new("Jovica");
        assert_eq!(query.route_parameters()[USERNAME_ROUTE_PARAMETER], "Jovica");
        assert!(query.query_parameters().is_empty());
    }

    #[test]
    fn listings_page() {
        let sounds = UserSoundsQuery::new("Jovica").with_page_size(30);
        assert_eq!(sounds.query_parameters()["page_size"], "30");

        let packs = UserPacksQuery::new("Jovica");
        assert_eq!(packs.query_parameters()["page"], "1");
        assert!(!packs.has_next_page());
    }

    #[test]
    fn me_requires_oauth() {
        let query = MeQuery::new("token");
        assert_eq!(query.authorization(), Authorization::OAuth("token"));
        assert!(query.route_parameters().is_empty());
    }
}
