//! Lookup key extraction from request paths.

use crate::base::neterror::NetError;
use percent_encoding::percent_decode_str;
use std::borrow::Cow;

/// Percent-decodes a request path.
///
/// Every `%` must start a two-digit hex escape and the decoded bytes must be
/// UTF-8; otherwise the path is [`NetError::MalformedPath`].
pub fn decode_path(raw: &str) -> Result<Cow<'_, str>, NetError> {
    let bytes = raw.as_bytes();
    let mut i = 0;
    while let Some(offset) = bytes[i..].iter().position(|&b| b == b'%') {
        let at = i + offset;
        let escape = bytes.get(at + 1..at + 3).ok_or(NetError::MalformedPath)?;
        if !escape.iter().all(u8::is_ascii_hexdigit) {
            return Err(NetError::MalformedPath);
        }
        i = at + 3;
    }

    percent_decode_str(raw)
        .decode_utf8()
        .map_err(|_| NetError::MalformedPath)
}

/// Returns the final element of a slash-separated path.
///
/// Trailing slashes are ignored. An empty path yields `"."` and a path made
/// only of slashes yields `"/"`; both are rejected by [`is_valid_key`].
pub fn lookup_key(path: &str) -> &str {
    if path.is_empty() {
        return ".";
    }
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        return "/";
    }
    match trimmed.rfind('/') {
        Some(i) => &trimmed[i + 1..],
        None => trimmed,
    }
}

/// Whether `key` can be handed to the resolver.
pub fn is_valid_key(key: &str) -> bool {
    !matches!(key, "" | "." | "/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_path_plain() {
        assert!(matches!(decode_path("/example.com"), Ok(Cow::Borrowed("/example.com"))));
    }

    #[test]
    fn test_decode_path_escapes() {
        assert_eq!(decode_path("/exa%6Dple.com").unwrap(), "/example.com");
        assert_eq!(decode_path("/%2E").unwrap(), "/.");
        assert_eq!(decode_path("/a%2Fexample.com").unwrap(), "/a/example.com");
        assert_eq!(decode_path("/b%C3%BCcher.de").unwrap(), "/bücher.de");
    }

    #[test]
    fn test_decode_path_rejects_bad_escapes() {
        for raw in ["/%", "/%2", "/%zz", "/ok%2G", "/%FF"] {
            assert!(
                matches!(decode_path(raw), Err(NetError::MalformedPath)),
                "path {}",
                raw
            );
        }
    }

    #[test]
    fn test_decoded_root_markers() {
        assert_eq!(lookup_key(&decode_path("/%2E").unwrap()), ".");
        assert_eq!(lookup_key(&decode_path("/%2F").unwrap()), "/");
        assert_eq!(lookup_key(&decode_path("/a%2Fexample.com").unwrap()), "example.com");
    }

    #[test]
    fn test_lookup_key_last_segment() {
        assert_eq!(lookup_key("/example.com"), "example.com");
        assert_eq!(lookup_key("/v1/lookup/example.com"), "example.com");
        assert_eq!(lookup_key("example.com"), "example.com");
    }

    #[test]
    fn test_lookup_key_trailing_slashes() {
        assert_eq!(lookup_key("/example.com/"), "example.com");
        assert_eq!(lookup_key("/a/example.com///"), "example.com");
    }

    #[test]
    fn test_lookup_key_root() {
        assert_eq!(lookup_key("/"), "/");
        assert_eq!(lookup_key("///"), "/");
        assert_eq!(lookup_key(""), ".");
        assert_eq!(lookup_key("/."), ".");
    }

    #[test]
    fn test_invalid_keys() {
        assert!(!is_valid_key("."));
        assert!(!is_valid_key("/"));
        assert!(!is_valid_key(""));
        assert!(is_valid_key("example.com"));
        // Only the root markers are rejected; the rest is the capability's call.
        assert!(is_valid_key(".."));
    }
}
