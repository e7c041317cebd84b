use serde::Deserialize;
use std::collections::BTreeMap;

/// A sound as described by `/sounds/{sound_id}/` and the listing endpoints.
///
/// Listing endpoints only return the fields requested through `fields`, so
/// everything except the id is optional.
#[derive(Debug, Clone, Deserialize)]
pub struct Sound {
    pub id: u64,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub geotag: Option<String>,
    #[serde(default)]
    pub created: Option<String>,
    #[serde(default)]
    pub license: Option<String>,
    /// File type, e.g. `wav`.
    #[serde(default, rename = "type")]
    pub file_type: Option<String>,
    #[serde(default)]
    pub channels: Option<u32>,
    #[serde(default)]
    pub filesize: Option<u64>,
    #[serde(default)]
    pub bitrate: Option<u32>,
    #[serde(default)]
    pub bitdepth: Option<u32>,
    /// Seconds.
    #[serde(default)]
    pub duration: Option<f64>,
    #[serde(default)]
    pub samplerate: Option<f64>,
    #[serde(default)]
    pub username: Option<String>,
    /// URI of the pack the sound belongs to.
    #[serde(default)]
    pub pack: Option<String>,
    #[serde(default)]
    pub download: Option<String>,
    #[serde(default)]
    pub previews: Option<Previews>,
    #[serde(default)]
    pub images: BTreeMap<String, String>,
    #[serde(default)]
    pub num_downloads: Option<u64>,
    #[serde(default)]
    pub avg_rating: Option<f64>,
    #[serde(default)]
    pub num_ratings: Option<u64>,
    #[serde(default)]
    pub num_comments: Option<u64>,
}

/// Lossy preview renditions of a sound. These are public and need no OAuth2
/// token to fetch.
#[derive(Debug, Clone, Deserialize)]
pub struct Previews {
    #[serde(default, rename = "preview-hq-mp3")]
    pub hq_mp3: Option<String>,
    #[serde(default, rename = "preview-lq-mp3")]
    pub lq_mp3: Option<String>,
    #[serde(default, rename = "preview-hq-ogg")]
    pub hq_ogg: Option<String>,
    #[serde(default, rename = "preview-lq-ogg")]
    pub lq_ogg: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Pack {
    pub id: u64,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub created: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub num_sounds: Option<u64>,
    #[serde(default)]
    pub sounds: Option<String>,
    #[serde(default)]
    pub num_downloads: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct User {
    pub username: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub about: Option<String>,
    #[serde(default)]
    pub home_page: Option<String>,
    #[serde(default)]
    pub avatar: BTreeMap<String, String>,
    #[serde(default)]
    pub date_joined: Option<String>,
    #[serde(default)]
    pub num_sounds: Option<u64>,
    #[serde(default)]
    pub sounds: Option<String>,
    #[serde(default)]
    pub num_packs: Option<u64>,
    #[serde(default)]
    pub packs: Option<String>,
    #[serde(default)]
    pub num_posts: Option<u64>,
    #[serde(default)]
    pub num_comments: Option<u64>,
    /// Only present on `/me/`.
    #[serde(default)]
    pub email: Option<String>,
}

/// Tokens issued by `/oauth2/access_token/`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AccessTokenDetails {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    /// Lifetime of the access token in seconds.
    #[serde(default)]
    pub expires_in: Option<u64>,
    #[serde(default)]
    pub scope: Option<String>,
    #[serde(default)]
    pub token_type: Option<String>,
}

impl AccessTokenDetails {
    pub fn has_refresh_token(&self) -> bool {
        self.refresh_token.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sound_with_sparse_fields() {
        let sound: Sound = serde_json::from_str(
            r#"{
                "id": 1234,
                "name": "engine idle.wav",
                "tags": ["car", "engine"],
                "type": "wav",
                "duration": 12.5,
                "previews": {"preview-hq-mp3": "https://cdn.example/1234-hq.mp3"}
            }"#,
        )
        .unwrap();

        assert_eq!(sound.id, 1234);
        assert_eq!(sound.file_type.as_deref(), Some("wav"));
        assert_eq!(sound.tags, vec!["car", "engine"]);
        assert_eq!(
            sound.previews.and_then(|p| p.hq_mp3).as_deref(),
            Some("https://cdn.example/1234-hq.mp3")
        );
        assert!(sound.username.is_none());
    }

    #[test]
    fn access_token_details() {
        let details: AccessTokenDetails = serde_json::from_str(
            r#"{"access_token": "abc", "refresh_token": "def", "expires_in": 86399, "scope": "read write"}"#,
        )
        .unwrap();

        assert_eq!(details.access_token, "abc");
        assert!(details.has_refresh_token());
        assert_eq!(details.expires_in, Some(86399));
        assert_eq!(details.scope.as_deref(), Some("read write"));
    }
}
