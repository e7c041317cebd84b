use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};
use reqwest::Url;

use crate::error::{FreesoundClientError, Result};
use crate::query::Parameters;

/// Characters escaped in a route value so it stays a single path segment.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'<')
    .add(b'>')
    .add(b'`')
    .add(b'?')
    .add(b'{')
    .add(b'}')
    .add(b'/')
    .add(b'\\')
    .add(b'%');

/// Parses the configured API base, e.g. `https://freesound.org/apiv2`.
pub(crate) fn parse_base_url(base: &str) -> Result<Url> {
    Url::parse(base).map_err(|e| {
        FreesoundClientError::Configuration(format!("invalid API url {}: {}", base, e))
    })
}

/// Appends an already-encoded `path` to the path of `base`.
///
/// Unlike [`Url::join`], the last segment of the base (`apiv2`) is kept.
pub(crate) fn api_url(base: &Url, path: &str) -> Url {
    let mut url = base.clone();
    let joined = format!(
        "{}/{}",
        base.path().trim_end_matches('/'),
        path.trim_start_matches('/')
    );
    url.set_path(&joined);
    url
}

/// Replaces every `{name}` in `template` with the matching route parameter.
///
/// A placeholder with no value is an error rather than being sent to the
/// server verbatim.
pub(crate) fn substitute_route_parameters(template: &str, params: &Parameters) -> Result<String> {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        let Some(len) = rest[start..].find('}') else {
            break;
        };
        let name = &rest[start + 1..start + len];
        let value = params
            .get(name)
            .ok_or_else(|| FreesoundClientError::UnresolvedRouteParameter {
                name: name.to_string(),
                path: template.to_string(),
            })?;

        out.push_str(&rest[..start]);
        out.extend(utf8_percent_encode(value, PATH_SEGMENT));
        rest = &rest[start + len + 1..];
    }
    out.push_str(rest);

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> Parameters {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn substitutes_each_placeholder() {
        let path =
            substitute_route_parameters("/packs/{pack_id}/sounds/", &params(&[("pack_id", "1234")]))
                .unwrap();
        assert_eq!(path, "/packs/1234/sounds/");
    }

    #[test]
    fn template_without_placeholders_is_unchanged() {
        let path = substitute_route_parameters("/search/text/", &Parameters::new()).unwrap();
        assert_eq!(path, "/search/text/");
    }

    #[test]
    fn values_are_encoded_as_one_segment() {
        let path = substitute_route_parameters(
            "/users/{username}/",
            &params(&[("username", "field rec/ordings?100%")]),
        )
        .unwrap();
        assert_eq!(path, "/users/field%20rec%2Fordings%3F100%25/");
    }

    #[test]
    fn non_ascii_values_are_utf8_encoded() {
        let path =
            substitute_route_parameters("/users/{username}/", &params(&[("username", "jöns")]))
                .unwrap();
        assert_eq!(path, "/users/j%C3%B6ns/");
    }

    #[test]
    fn missing_value_is_an_error() {
        let err = substitute_route_parameters("/sounds/{sound_id}/", &Parameters::new()).unwrap_err();
        assert!(matches!(
            err,
            FreesoundClientError::UnresolvedRouteParameter { ref name, .. } if name == "sound_id"
        ));
    }

    #[test]
    fn api_url_keeps_the_base_path() {
        let base = parse_base_url("https://freesound.org/apiv2/").unwrap();
        assert_eq!(
            api_url(&base, "/me/").as_str(),
            "https://freesound.org/apiv2/me/"
        );

        let base = parse_base_url("http://127.0.0.1:8080").unwrap();
        assert_eq!(
            api_url(&base, "/sounds/1/").as_str(),
            "http://127.0.0.1:8080/sounds/1/"
        );
    }

    #[test]
    fn api_url_preserves_encoded_segments() {
        let base = parse_base_url("https://freesound.org/apiv2").unwrap();
        assert_eq!(
            api_url(&base, "/users/field%20rec%2Fordings/").path(),
            "/apiv2/users/field%20rec%2Fordings/"
        );
    }

    #[test]
    fn bad_base_is_a_configuration_error() {
        assert!(matches!(
            parse_base_url("not a url"),
            Err(FreesoundClientError::Configuration(_))
        ));
    }
}
