use bytes::Bytes;

use crate::error::Result;
use crate::model::Sound;
use crate::query::{
    Authorization, Paging, PagingQuery, Parameters, Payload, Query, ResponseFormat,
    binary_results, json_results,
};
use crate::response::{PagingResponse, Response};

pub const SOUND_ID_ROUTE_PARAMETER: &str = "sound_id";

fn sound_route(sound_id: u64) -> Parameters {
    Parameters::from([(SOUND_ID_ROUTE_PARAMETER.to_string(), sound_id.to_string())])
}

/// Details of a single sound (`/sounds/{sound_id}/`).
#[derive(Debug, Clone)]
pub struct SoundInstanceQuery {
    sound_id: u64,
    fields: Vec<String>,
    response: Option<Response<Sound>>,
}

impl SoundInstanceQuery {
    pub fn new(sound_id: u64) -> Self {
        Self {
            sound_id,
            fields: Vec::new(),
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

    pub fn sound_id(&self) -> u64 {
        self.sound_id
    }
}

impl Query for SoundInstanceQuery {
    type Results = Sound;

    const PATH: &'static str = "/sounds/{sound_id}/";

    fn route_parameters(&self) -> Parameters {
        sound_route(self.sound_id)
    }

    fn query_parameters(&self) -> Parameters {
        let mut params = Parameters::new();
        if !self.fields.is_empty() {
            params.insert("fields".into(), self.fields.join(","));
        }
        params
    }

    fn process_results(&self, payload: Payload) -> Result<Sound> {
        json_results(payload)
    }

    fn response(&self) -> Option<&Response<Sound>> {
        self.response.as_ref()
    }

    fn response_slot(&mut self) -> &mut Option<Response<Sound>> {
        &mut self.response
    }
}

/// Sounds acoustically similar to a given one (`/sounds/{sound_id}/similar/`).
#[derive(Debug, Clone)]
pub struct SimilarSoundsQuery {
    sound_id: u64,
    paging: Paging,
    response: Option<Response<PagingResponse<Sound>>>,
}

impl SimilarSoundsQuery {
    pub fn new(sound_id: u64) -> Self {
        Self {
            sound_id,
            paging: Paging::default(),
            response: None,
        }
    }

    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.paging.set_page_size(page_size);
        self
    }
}

impl Query for SimilarSoundsQuery {
    type Results = PagingResponse<Sound>;

    const PATH: &'static str = "/sounds/{sound_id}/similar/";

    fn route_parameters(&self) -> Parameters {
        sound_route(self.sound_id)
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

impl PagingQuery<Sound> for SimilarSoundsQuery {
    fn paging(&self) -> &Paging {
        &self.paging
    }

    fn paging_mut(&mut self) -> &mut Paging {
        &mut self.paging
    }
}

/// Original audio file of a sound (`/sounds/{sound_id}/download/`).
///
/// Requires an OAuth2 access token.
#[derive(Debug, Clone)]
pub struct DownloadSound {
    sound_id: u64,
    oauth_token: String,
    response: Option<Response<Bytes>>,
}

impl DownloadSound {
    pub fn new(sound_id: u64, oauth_token: impl Into<String>) -> Self {
        Self {
            sound_id,
            oauth_token: oauth_token.into(),
            response: None,
        }
    }

    pub fn oauth_token(&self) -> &str {
        &self.oauth_token
    }
}

impl Query for DownloadSound {
    type Results = Bytes;

    const PATH: &'static str = "/sounds/{sound_id}/download/";

    const FORMAT: ResponseFormat = ResponseFormat::Binary;

    fn route_parameters(&self) -> Parameters {
        sound_route(self.sound_id)
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
