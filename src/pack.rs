use bytes::Bytes;

use crate::error::Result;
use crate::model::{Pack, Sound};
use crate::query::{
    Authorization, Paging, PagingQuery, Parameters, Payload, Query, ResponseFormat,
    binary_results, json_results,
};
use crate::response::{PagingResponse, Response};

pub const PACK_ID_ROUTE_PARAMETER: &str = "pack_id";

fn pack_route(pack_id: u64) -> Parameters {
    Parameters::from([(PACK_ID_ROUTE_PARAMETER.to_string(), pack_id.to_string())])
}

/// Details of a pack (`/packs/{pack_id}/`).
#[derive(Debug, Clone)]
pub struct PackInstanceQuery {
    pack_id: u64,
    response: Option<Response<Pack>>,
}

impl PackInstanceQuery {
    pub fn new(pack_id: u64) -> Self {
        Self {
            pack_id,
            response: None,
        }
    }

    pub fn pack_id(&self) -> u64 {
        self.pack_id
    }
}

impl Query for PackInstanceQuery {
    type Results = Pack;

    const PATH: &'static str = "/packs/{pack_id}/";

    fn route_parameters(&self) -> Parameters {
        pack_route(self.pack_id)
    }

    fn process_results(&self, payload: Payload) -> Result<Pack> {
        json_results(payload)
    }

    fn response(&self) -> Option<&Response<Pack>> {
        self.response.as_ref()
    }

    fn response_slot(&mut self) -> &mut Option<Response<Pack>> {
        &mut self.response
    }
}

/// Sounds contained in a pack (`/packs/{pack_id}/sounds/`).
#[derive(Debug, Clone)]
pub struct PackSoundsQuery {
    pack_id: u64,
    fields: Vec<String>,
    paging: Paging,
    response: Option<Response<PagingResponse<Sound>>>,
}

impl PackSoundsQuery {
    pub fn new(pack_id: u64) -> Self {
        Self {
            pack_id,
            fields: Vec::new(),
            paging: Paging::default(),
            response: None,
        }
    }

    pub fn with_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields = fields.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.paging.set_page_size(page_size);
        self
    }
}

impl Query for PackSoundsQuery {
    type Results = PagingResponse<Sound>;

    const PATH: &'static str = "/packs/{pack_id}/sounds/";

    fn route_parameters(&self) -> Parameters {
        pack_route(self.pack_id)
    }

    fn query_parameters(&self) -> Parameters {
        let mut params = Parameters::new();
        if !self.fields.is_empty() {
            params.insert("fields".into(), self.fields.join(","));
        }
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

impl PagingQuery<Sound> for PackSoundsQuery {
    fn paging(&self) -> &Paging {
        &self.paging
    }

    fn paging_mut(&mut self) -> &mut Paging {
        &mut self.paging
    }
}

/// All sounds of a pack as a zip archive (`/packs/{pack_id}/download/`).
///
/// Requires an OAuth2 access token.
#[derive(Debug, Clone)]
pub struct DownloadPack {
    pack_id: u64,
    oauth_token: String,
    response: Option<Response<Bytes>>,
}

impl DownloadPack {
    pub fn new(pack_id: u64, oauth_token: impl Into<String>) -> Self {
        Self {
            pack_id,
            oauth_token: oauth_token.into(),
            response: None,
        }
    }

    pub fn oauth_token(&self) -> &str {
        &self.oauth_token
    }
}

impl Query for DownloadPack {
    type Results = Bytes;

    const PATH: &'static str = "/packs/{pack_id}/download/";

    const FORMAT: ResponseFormat = ResponseFormat::Binary;

    fn route_parameters(&self) -> Parameters {
        pack_route(self.pack_id)
    }

    fn authorization(&self) -> Authorization<'_> {
        Authorization::OAuth(&self.oauth_token)
    }

    fn process_results(&self, payload: Payload) -> Result<Bytes> {
        binary_results(payload)
    }

    fn response(&self) -> Option<&Response<Bytes>> {
        self.response.as_ref()
    }

    fn response_slot(&mut self) -> &mut Option<Response<Bytes>> {
        &mut self.response
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PACK_ID: u64 = 1234;
    const OAUTH_TOKEN: &str = "abc123def";

    #[test]
    fn pack_instance_query_created_correctly() {
        let query = PackInstanceQuery::new(PACK_ID);

        let route = query.route_parameters();
        assert_eq!(route.len(), 1);
        assert_eq!(route[PACK_ID_ROUTE_PARAMETER], PACK_ID.to_string());
        assert!(query.query_parameters().is_empty());
    }

    #[test]
    fn download_pack_created_correctly() {
        let query = DownloadPack::new(PACK_ID, OAUTH_TOKEN);

        let route = query.route_parameters();
        assert_eq!(route.len(), 1);
        assert_eq!(route[PACK_ID_ROUTE_PARAMETER], PACK_ID.to_string());
        assert_eq!(query.oauth_token(), OAUTH_TOKEN);
        assert_eq!(query.authorization(), Authorization::OAuth(OAUTH_TOKEN));
        assert_eq!(DownloadPack::FORMAT, ResponseFormat::Binary);
    }

    #[test]
    fn pack_sounds_parameters() {
        let params = PackSoundsQuery::new(PACK_ID)
            .with_fields(["id", "name"])
            .with_page_size(150)
            .query_parameters();
        assert_eq!(params["fields"], "id,name");
        assert_eq!(params["page_size"], "150");
    }
}
