use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{FreesoundClientError, Result};

/// Base address for all calls to the freesound.org APIv2.
pub const API_ENDPOINT: &str = "https://freesound.org/apiv2";

#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base API URL, typically `https://freesound.org/apiv2`.
    pub url: String,
    /// Client ID issued when the application was registered.
    pub client_id: String,
    /// Client secret, also called the API key.
    pub client_secret: String,
    /// Sent as `User-Agent`; defaults to `freesound-rs/<version>`.
    pub user_agent: Option<String>,
    pub timeout: Duration,
}

impl ClientConfig {
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            url: API_ENDPOINT.to_string(),
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            user_agent: None,
            timeout: Duration::from_secs(60),
        }
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[derive(Debug, Default, PartialEq)]
struct RcConfig {
    url: Option<String>,
    client_id: Option<String>,
    client_secret: Option<String>,
    user_agent: Option<String>,
}

pub(crate) fn load_config(
    client_id: Option<String>,
    client_secret: Option<String>,
    url: Option<String>,
) -> Result<ClientConfig> {
    let mut client_id = client_id.or_else(|| std::env::var("FREESOUND_CLIENT_ID").ok());
    let mut client_secret =
        client_secret.or_else(|| std::env::var("FREESOUND_CLIENT_SECRET").ok());
    let mut url = url.or_else(|| std::env::var("FREESOUND_API_URL").ok());
    let mut user_agent = std::env::var("FREESOUND_USER_AGENT").ok();

    let rc_candidates = rc_candidates();

    if client_id.is_none() || client_secret.is_none() {
        for rc_path in &rc_candidates {
            if rc_path.exists() {
                tracing::debug!(path = %rc_path.display(), "reading freesound configuration");
                let cfg = read_rc(rc_path)?;

                client_id = client_id.or(cfg.client_id);
                client_secret = client_secret.or(cfg.client_secret);
                url = url.or(cfg.url);
                user_agent = user_agent.or(cfg.user_agent);
                break;
            }
        }
    }

    let searched = || {
        if rc_candidates.is_empty() {
            "create .freesoundrc".to_string()
        } else {
            format!(
                "or put it in one of: {}",
                rc_candidates
                    .iter()
                    .map(|p| p.display().to_string())
                    .collect::<Vec<_>>()
                    .join(", ")
            )
        }
    };

    let client_id = client_id.ok_or_else(|| {
        FreesoundClientError::Configuration(format!(
            "missing client_id (set FREESOUND_CLIENT_ID {})",
            searched()
        ))
    })?;
    let client_secret = client_secret.ok_or_else(|| {
        FreesoundClientError::Configuration(format!(
            "missing client_secret (set FREESOUND_CLIENT_SECRET {})",
            searched()
        ))
    })?;

    let mut cfg = ClientConfig::new(client_id, client_secret);
    if let Some(url) = url {
        cfg = cfg.with_url(url);
    }
    cfg.user_agent = user_agent;
    Ok(cfg)
}

fn read_rc(path: &Path) -> Result<RcConfig> {
    let text = std::fs::read_to_string(path).map_err(|e| {
        FreesoundClientError::Configuration(format!(
            "failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;
    Ok(parse_rc(&text))
}

fn parse_rc(text: &str) -> RcConfig {
    let mut cfg = RcConfig::default();

    for raw in text.lines() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if let Some((k, v)) = line.split_once(':') {
            let v = unquote(v.trim());
            if v.is_empty() {
                continue;
            }
            let v = Some(v.to_string());
            match k.trim() {
                "url" => cfg.url = v,
                "client_id" => cfg.client_id = v,
                "client_secret" | "api_key" => cfg.client_secret = v,
                "user_agent" => cfg.user_agent = v,
                _ => {}
            }
        }
    }

    cfg
}

/// Removes one pair of matching single or double quotes around a value.
fn unquote(value: &str) -> &str {
    ['"', '\'']
        .into_iter()
        .find_map(|q| value.strip_prefix(q)?.strip_suffix(q))
        .unwrap_or(value)
}

/// Where `.freesoundrc` is looked for, most specific first.
///
/// `FREESOUND_RC` replaces the default locations instead of adding to them.
fn rc_candidates() -> Vec<PathBuf> {
    const RC_FILE: &str = ".freesoundrc";

    match std::env::var_os("FREESOUND_RC") {
        Some(explicit) => vec![PathBuf::from(explicit)],
        None => std::env::current_dir()
            .ok()
            .into_iter()
            .chain(dirs::home_dir())
            .map(|dir| dir.join(RC_FILE))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_rc_file() {
        let cfg = parse_rc(
            "# freesound credentials\n\
             client_id: abc\n\
             api_key: \"s3cret\"\n\
             url: https://freesound.org/apiv2\n\
             user_agent: 'sampler/1.0'\n\
             unknown: ignored\n",
        );

        assert_eq!(
            cfg,
            RcConfig {
                url: Some("https://freesound.org/apiv2".into()),
                client_id: Some("abc".into()),
                client_secret: Some("s3cret".into()),
                user_agent: Some("sampler/1.0".into()),
            }
        );
    }

    #[test]
    fn empty_values_are_skipped() {
        let cfg = parse_rc("client_id:\nclient_secret: xyz\n");
        assert_eq!(cfg.client_id, None);
        assert_eq!(cfg.client_secret.as_deref(), Some("xyz"));
    }

    #[test]
    fn only_matching_quotes_are_removed() {
        assert_eq!(unquote("\"abc\""), "abc");
        assert_eq!(unquote("'abc'"), "abc");
        assert_eq!(unquote("\"abc'"), "\"abc'");
        assert_eq!(unquote("\""), "\"");
        assert_eq!(unquote("\"\""), "");
    }

    #[test]
    fn explicit_arguments_win() {
        let cfg = load_config(
            Some("id".into()),
            Some("secret".into()),
            Some("http://localhost:8000/apiv2".into()),
        )
        .unwrap();

        assert_eq!(cfg.client_id, "id");
        assert_eq!(cfg.client_secret, "secret");
        assert_eq!(cfg.url, "http://localhost:8000/apiv2");
    }

    #[test]
    fn config_defaults() {
        let cfg = ClientConfig::new("id", "secret");
        assert_eq!(cfg.url, API_ENDPOINT);
        assert_eq!(cfg.user_agent, None);
        assert_eq!(cfg.timeout, Duration::from_secs(60));
    }
}
