//! A small, synchronous Rust client for the freesound.org API (v2).
//!
//! Each API call is a query value: build it, hand it to [`Client::execute_query`],
//! then read the [`Response`] recorded on it. Queries declare how they are
//! authorized (client token, OAuth2 bearer token, or nothing for the token
//! endpoint) and whether their body is JSON or binary.
//!
//! ## Quick start
//! - Register an application at <https://freesound.org/apiv2/apply> to obtain a
//!   client ID and client secret (API key).
//! - Either pass them to [`Client::new`] or configure them via environment
//!   variables (`FREESOUND_CLIENT_ID`, `FREESOUND_CLIENT_SECRET`) or a
//!   `.freesoundrc` file and call [`Client::from_env`].
//!
//! ```no_run
//! use freesound::{Client, PagingQuery, SortOrder, TextSearch};
//!
//! fn main() -> freesound::Result<()> {
//!     let client = Client::from_env()?;
//!     let mut search = TextSearch::new("cars").with_sort_order(SortOrder::DownloadsDescending);
//!
//!     let response = client.execute_query(&mut search)?;
//!     if let Some(page) = response.results() {
//!         for sound in &page.results {
//!             println!("{} {}", sound.id, sound.name.as_deref().unwrap_or(""));
//!         }
//!     }
//!
//!     if search.has_next_page() {
//!         client.next_page(&mut search)?;
//!     }
//!     Ok(())
//! }
//! ```

#![forbid(unsafe_code)]

mod client;
mod config;
mod error;
mod model;
mod oauth;
mod pack;
mod query;
mod response;
mod search;
mod sound;
mod user;
mod util;

pub use client::Client;
pub use config::{API_ENDPOINT, ClientConfig};
pub use error::{FreesoundClientError, Result};
pub use model::{AccessTokenDetails, Pack, Previews, Sound, User};
pub use oauth::{AuthorizationCodeQuery, RefreshOAuthTokenQuery};
pub use pack::{DownloadPack, PACK_ID_ROUTE_PARAMETER, PackInstanceQuery, PackSoundsQuery};
pub use query::{
    Authorization, HttpMethod, MAXIMUM_PAGE_SIZE, PageDirection, Paging, PagingQuery, Parameters,
    Payload, Query, ResponseFormat, SortOrder, binary_results, json_results,
};
pub use response::{PagingResponse, Response};
pub use search::TextSearch;
pub use sound::{DownloadSound, SOUND_ID_ROUTE_PARAMETER, SimilarSoundsQuery, SoundInstanceQuery};
pub use user::{MeQuery, USERNAME_ROUTE_PARAMETER, UserInstanceQuery, UserPacksQuery, UserSoundsQuery};
