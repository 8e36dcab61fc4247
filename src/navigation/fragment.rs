//! Address-bar fragment encoding.
//!
//! A deep link is the percent-encoded path and query of the displayed
//! sub-document, stored after the `#`.

use url::Url;

use crate::error::NavigationError;

/// Strip the leading `#` and percent-decode the fragment.
pub fn decode(fragment: &str) -> Result<String, NavigationError> {
    let raw = fragment.strip_prefix('#').unwrap_or(fragment);
    urlencoding::decode(raw)
        .map(|decoded| decoded.into_owned())
        .map_err(|e| NavigationError::InvalidPath {
            fragment: fragment.to_string(),
            message: e.to_string(),
        })
}

/// Fragment for a loaded sub-document: its path and query, percent-encoded.
pub fn encode(location: &Url) -> String {
    let mut target = location.path().to_string();
    if let Some(query) = location.query() {
        target.push('?');
        target.push_str(query);
    }
    urlencoding::encode(&target).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_strips_hash() {
        assert_eq!(decode("#%2Fdebug%2Fpprof").unwrap(), "/debug/pprof");
        assert_eq!(decode("#/debug/pprof").unwrap(), "/debug/pprof");
        assert_eq!(decode("%2Finfo").unwrap(), "/info");
        assert_eq!(decode("").unwrap(), "");
        assert_eq!(decode("#").unwrap(), "");
    }

    #[test]
    fn test_decode_rejects_invalid_utf8() {
        let err = decode("#%FF%FE").unwrap_err();
        assert!(matches!(err, NavigationError::InvalidPath { .. }));
    }

    #[test]
    fn test_encode_path_and_query() {
        let url = Url::parse("http://localhost:8080/heap/top?si=alloc_space").unwrap();
        assert_eq!(encode(&url), "%2Fheap%2Ftop%3Fsi%3Dalloc_space");

        let url = Url::parse("http://localhost:8080/stack#frame-3").unwrap();
        assert_eq!(encode(&url), "%2Fstack");
    }

    #[test]
    fn test_encoded_fragment_decodes_to_path() {
        let url = Url::parse("http://localhost:8080/debug/pprof?debug=1").unwrap();
        assert_eq!(decode(&format!("#{}", encode(&url))).unwrap(), "/debug/pprof?debug=1");
    }
}
