//! Target URL preparation at link-creation time.
//!
//! Normalization happens only here; the redirect path emits the stored
//! target verbatim.

use url::Url;

/// Errors that can occur while preparing a target URL.
#[derive(Debug, thiserror::Error)]
pub enum TargetUrlError {
    #[error("Invalid URL format: {0}")]
    InvalidFormat(String),

    #[error("Only HTTP and HTTPS protocols are allowed")]
    UnsupportedProtocol,
}

/// Prepares a user-submitted target URL for storage.
///
/// A missing scheme gets `https://` prepended before parsing, so bare
/// domains like `example.com/page` are accepted. Explicit non-HTTP(S)
/// schemes (`ftp:`, `javascript:`, `data:`, ...) are rejected.
///
/// # Errors
///
/// Returns [`TargetUrlError::InvalidFormat`] for unparseable input and
/// [`TargetUrlError::UnsupportedProtocol`] for non-HTTP(S) schemes.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(
///     prepare_target_url("example.com/docs").unwrap(),
///     "https://example.com/docs"
/// );
/// ```
pub fn prepare_target_url(input: &str) -> Result<String, TargetUrlError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(TargetUrlError::InvalidFormat("empty input".to_string()));
    }

    let url = match Url::parse(trimmed) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => url,
        Ok(_) if !trimmed.contains("://") => {
            // "localhost:3000/x" parses with scheme "localhost"; a schemeless
            // host:port is far more likely than an exotic URI scheme, so try
            // the https-prefixed reading before rejecting.
            Url::parse(&format!("https://{trimmed}"))
                .map_err(|_| TargetUrlError::UnsupportedProtocol)?
        }
        Ok(_) => return Err(TargetUrlError::UnsupportedProtocol),
        Err(url::ParseError::RelativeUrlWithoutBase) => {
            Url::parse(&format!("https://{trimmed}"))
                .map_err(|e| TargetUrlError::InvalidFormat(e.to_string()))?
        }
        Err(e) => return Err(TargetUrlError::InvalidFormat(e.to_string())),
    };

    match url.scheme() {
        "http" | "https" => {}
        _ => return Err(TargetUrlError::UnsupportedProtocol),
    }

    if url.host_str().is_none() {
        return Err(TargetUrlError::InvalidFormat("missing host".to_string()));
    }

    Ok(url.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_passes_through_http_and_https() {
        assert_eq!(
            prepare_target_url("https://example.com/path").unwrap(),
            "https://example.com/path"
        );
        assert_eq!(
            prepare_target_url("http://example.com").unwrap(),
            "http://example.com/"
        );
    }

    #[test]
    fn test_prepends_https_when_scheme_missing() {
        assert_eq!(
            prepare_target_url("example.com/docs").unwrap(),
            "https://example.com/docs"
        );
        assert_eq!(
            prepare_target_url("example.com").unwrap(),
            "https://example.com/"
        );
    }

    #[test]
    fn test_preserves_query_parameters() {
        assert_eq!(
            prepare_target_url("https://example.com/search?q=rust&lang=en").unwrap(),
            "https://example.com/search?q=rust&lang=en"
        );
    }

    #[test]
    fn test_rejects_unsupported_schemes() {
        assert!(matches!(
            prepare_target_url("ftp://example.com/file.txt"),
            Err(TargetUrlError::UnsupportedProtocol)
        ));
        assert!(matches!(
            prepare_target_url("javascript:alert('xss')"),
            Err(TargetUrlError::UnsupportedProtocol)
        ));
        assert!(matches!(
            prepare_target_url("data:text/plain,hello"),
            Err(TargetUrlError::UnsupportedProtocol)
        ));
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(prepare_target_url("").is_err());
        assert!(prepare_target_url("   ").is_err());
        assert!(prepare_target_url("http://").is_err());
    }

    #[test]
    fn test_trims_surrounding_whitespace() {
        assert_eq!(
            prepare_target_url("  example.com  ").unwrap(),
            "https://example.com/"
        );
    }
}
