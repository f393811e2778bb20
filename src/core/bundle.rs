//! Self-contained puzzle bundles for sharing
//!
//! A bundle is the JSON form of a [`Puzzle`] encoded with URL-safe base64, so
//! it can sit in a `?custom=` query parameter without further escaping.
//! Older links percent-encoded the JSON before base64; those still decode.

use super::Puzzle;
use base64::Engine;
use base64::engine::general_purpose::{STANDARD, URL_SAFE_NO_PAD};
use percent_encoding::percent_decode;
use thiserror::Error;

/// Query parameter carrying a bundle in share links
pub const BUNDLE_PARAM: &str = "custom";

/// Error type for bundles that cannot be turned back into a puzzle
#[derive(Debug, Error)]
pub enum BundleError {
    #[error("bundle is not valid base64: {0}")]
    Encoding(#[from] base64::DecodeError),
    #[error("bundle does not contain a valid puzzle: {0}")]
    Puzzle(#[from] serde_json::Error),
}

/// Encode a puzzle as a bundle string
///
/// # Errors
/// Returns an error only if JSON serialization fails.
pub fn encode(puzzle: &Puzzle) -> Result<String, BundleError> {
    let json = serde_json::to_vec(puzzle)?;
    Ok(URL_SAFE_NO_PAD.encode(json))
}

/// Decode a bundle back into a validated puzzle
///
/// Accepts URL-safe or standard base64, padded or not, and surrounding
/// whitespace. A payload that is percent-encoded JSON is unescaped first.
///
/// # Errors
/// Returns `BundleError` if the text is not base64 or does not hold a valid
/// puzzle.
///
/// # Examples
/// ```
/// use connections_puzzle::core::bundle;
///
/// assert!(bundle::decode("not a bundle!").is_err());
/// ```
pub fn decode(text: &str) -> Result<Puzzle, BundleError> {
    let trimmed = text.trim().trim_end_matches('=');
    let bytes = if trimmed.contains(['+', '/']) {
        STANDARD.decode(pad(trimmed))?
    } else {
        URL_SAFE_NO_PAD.decode(trimmed)?
    };
    // JSON never starts with '%'
    if bytes.starts_with(b"%") {
        let unescaped: Vec<u8> = percent_decode(&bytes).collect();
        return Ok(serde_json::from_slice(&unescaped)?);
    }
    Ok(serde_json::from_slice(&bytes)?)
}

/// Build a share link by appending the bundle to `base_url`
///
/// # Errors
/// Returns an error if the puzzle cannot be encoded.
pub fn share_link(base_url: &str, puzzle: &Puzzle) -> Result<String, BundleError> {
    let separator = if base_url.contains('?') { '&' } else { '?' };
    Ok(format!("{base_url}{separator}{BUNDLE_PARAM}={}", encode(puzzle)?))
}

/// Pull the bundle out of a share link, or accept a bare bundle
#[must_use]
pub fn extract(link_or_bundle: &str) -> &str {
    let Some((_, query)) = link_or_bundle.split_once('?') else {
        return link_or_bundle.trim();
    };
    query
        .split('&')
        .find_map(|pair| pair.strip_prefix(BUNDLE_PARAM)?.strip_prefix('='))
        .unwrap_or("")
        .trim()
}

/// Decode an optional bundle, treating any failure as "no bundle"
///
/// A malformed bundle falls through to normal pool-based play.
#[must_use]
pub fn decode_lenient(link_or_bundle: Option<&str>) -> Option<Puzzle> {
    let text = extract(link_or_bundle?);
    match decode(text) {
        Ok(puzzle) => {
            tracing::debug!(id = puzzle.id(), "Loaded custom puzzle bundle");
            Some(puzzle)
        }
        Err(err) => {
            tracing::warn!("Ignoring custom puzzle bundle: {err}");
            None
        }
    }
}

fn pad(text: &str) -> String {
    let mut padded = text.to_string();
    while padded.len() % 4 != 0 {
        padded.push('=');
    }
    padded
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::puzzle::fixtures::sample_puzzle;

    #[test]
    fn bundle_is_url_safe() {
        let encoded = encode(&sample_puzzle()).unwrap();
        assert!(
            encoded
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        );
    }

    #[test]
    fn bundle_decodes_to_same_puzzle() {
        let puzzle = sample_puzzle();
        let decoded = decode(&encode(&puzzle).unwrap()).unwrap();
        assert_eq!(decoded, puzzle);
    }

    #[test]
    fn bundle_accepts_standard_alphabet_with_padding() {
        let puzzle = sample_puzzle();
        let json = serde_json::to_vec(&puzzle).unwrap();
        let standard = STANDARD.encode(json);
        assert_eq!(decode(&standard).unwrap(), puzzle);
    }

    #[test]
    fn bundle_accepts_percent_encoded_json() {
        use percent_encoding::{NON_ALPHANUMERIC, utf8_percent_encode};

        let puzzle = sample_puzzle();
        let json = serde_json::to_string(&puzzle).unwrap();
        let escaped = utf8_percent_encode(&json, NON_ALPHANUMERIC).to_string();
        assert!(escaped.starts_with("%7B"));

        let legacy = STANDARD.encode(&escaped);
        assert_eq!(decode(&legacy).unwrap(), puzzle);
        let link = format!("http://localhost:8000/index.html?custom={legacy}");
        assert_eq!(decode_lenient(Some(&link)), Some(puzzle));
    }

    #[test]
    fn bundle_rejects_invalid_base64() {
        assert!(matches!(decode("%%%"), Err(BundleError::Encoding(_))));
    }

    #[test]
    fn bundle_rejects_json_that_breaks_invariants() {
        let json = r#"{"id":"x","groups":[]}"#;
        let encoded = URL_SAFE_NO_PAD.encode(json);
        assert!(matches!(decode(&encoded), Err(BundleError::Puzzle(_))));
    }

    #[test]
    fn share_link_round_trips_through_extract() {
        let puzzle = sample_puzzle();
        let link = share_link("https://example.org/index.html", &puzzle).unwrap();
        assert!(link.starts_with("https://example.org/index.html?custom="));
        assert_eq!(decode(extract(&link)).unwrap(), puzzle);
    }

    #[test]
    fn share_link_appends_to_existing_query() {
        let link = share_link("https://example.org/?lang=en", &sample_puzzle()).unwrap();
        assert!(link.contains("?lang=en&custom="));
        assert!(decode(extract(&link)).is_ok());
    }

    #[test]
    fn extract_accepts_bare_bundle() {
        assert_eq!(extract("  abc  "), "abc");
    }

    #[test]
    fn decode_lenient_treats_garbage_as_absent() {
        assert!(decode_lenient(Some("garbage!!")).is_none());
        assert!(decode_lenient(None).is_none());
        let encoded = encode(&sample_puzzle()).unwrap();
        assert!(decode_lenient(Some(&encoded)).is_some());
    }
}
