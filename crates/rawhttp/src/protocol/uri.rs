//! Turns a request-line target into an absolute URI.
//!
//! Targets come in three shapes:
//!
//! - absolute form, `http://example.com:8080/path?q`, used unchanged
//! - origin form, `/path?q` (or `*`), whose authority comes from `Host`
//! - a bare authority, `example.com:8080[/path]`, which only lacks a scheme

use std::str::FromStr;

use http::uri::{Authority, Parts, PathAndQuery, Scheme};
use http::Uri;

use crate::ensure;
use crate::protocol::{HeaderContainer, ParseError};

/// Resolves request targets against a default scheme and the `Host` header.
#[derive(Debug, Clone)]
pub struct UriResolver {
    default_scheme: Scheme,
}

impl Default for UriResolver {
    fn default() -> Self {
        Self::new(Scheme::HTTP)
    }
}

impl UriResolver {
    pub fn new(default_scheme: Scheme) -> Self {
        Self { default_scheme }
    }

    pub fn default_scheme(&self) -> &Scheme {
        &self.default_scheme
    }

    /// Builds the absolute URI of a request.
    ///
    /// # Errors
    ///
    /// - [`ParseError::MissingTargetHost`] if the target has no host and no
    ///   `Host` header was sent
    /// - [`ParseError::MalformedStartLine`] if the target is not a valid URI
    /// - [`ParseError::MalformedHeaderLine`] if the `Host` header is not a
    ///   valid `host[:port]`
    pub fn resolve(&self, target: &str, headers: &HeaderContainer) -> Result<Uri, ParseError> {
        ensure!(!target.is_empty(), ParseError::malformed_start_line("empty request target"));

        if target.starts_with('/') || target == "*" {
            return self.resolve_origin_form(target, headers);
        }

        let uri = if target.contains("://") {
            parse_uri(target)?
        } else {
            parse_uri(&format!("{}://{target}", self.default_scheme))?
        };

        ensure!(uri.host().is_some_and(|host| !host.is_empty()), ParseError::MissingTargetHost);
        Ok(uri)
    }

    fn resolve_origin_form(&self, target: &str, headers: &HeaderContainer) -> Result<Uri, ParseError> {
        let host = headers.first("Host").map(str::trim).filter(|host| !host.is_empty()).ok_or(ParseError::MissingTargetHost)?;

        let authority = Authority::from_str(host)
            .map_err(|e| ParseError::malformed_header_line(format!("invalid Host header {host:?}: {e}")))?;

        // `*` addresses the server itself, which for a URI is its root
        let path = if target == "*" { "/" } else { target };
        let path_and_query = PathAndQuery::from_str(path)
            .map_err(|e| ParseError::malformed_start_line(format!("invalid request target {target:?}: {e}")))?;

        Uri::builder()
            .scheme(self.default_scheme.clone())
            .authority(authority)
            .path_and_query(path_and_query)
            .build()
            .map_err(|e| ParseError::malformed_start_line(format!("invalid request target {target:?}: {e}")))
    }
}

/// Copy of `uri` whose authority is replaced by `host`, given as
/// `host[:port]`. The old port is never carried over.
pub fn with_host(uri: &Uri, host: &str) -> Result<Uri, ParseError> {
    let authority = Authority::from_str(host)
        .map_err(|e| ParseError::malformed_header_line(format!("invalid host {host:?}: {e}")))?;

    let mut parts = Parts::from(uri.clone());
    parts.authority = Some(authority);
    if parts.path_and_query.is_none() {
        parts.path_and_query = Some(PathAndQuery::from_static("/"));
    }

    Uri::from_parts(parts).map_err(|e| ParseError::malformed_start_line(format!("can't replace host of {uri}: {e}")))
}

fn parse_uri(target: &str) -> Result<Uri, ParseError> {
    Uri::from_str(target).map_err(|e| ParseError::malformed_start_line(format!("invalid request target {target:?}: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn host(value: &str) -> HeaderContainer {
        HeaderContainer::from_iter([("Host", value)])
    }

    #[test]
    fn absolute_target_is_kept() {
        let uri = UriResolver::default().resolve("https://localhost:8080/my/resource/234", &HeaderContainer::new()).unwrap();

        assert_eq!(uri.scheme_str(), Some("https"));
        assert_eq!(uri.host(), Some("localhost"));
        assert_eq!(uri.port_u16(), Some(8080));
        assert_eq!(uri.path(), "/my/resource/234");
    }

    #[test]
    fn absolute_target_wins_over_host_header() {
        let uri = UriResolver::default().resolve("http://a.com/x", &host("b.com")).unwrap();

        assert_eq!(uri.host(), Some("a.com"));
    }

    #[test]
    fn bare_authority_gets_default_scheme() {
        let uri = UriResolver::default().resolve("localhost:8080", &HeaderContainer::new()).unwrap();

        assert_eq!(uri.scheme_str(), Some("http"));
        assert_eq!(uri.host(), Some("localhost"));
        assert_eq!(uri.port_u16(), Some(8080));
        assert_eq!(uri.path(), "/");
        assert_eq!(uri.query(), None);
    }

    #[test]
    fn origin_form_uses_host_header() {
        let uri = UriResolver::default().resolve("/hello?a=1", &host("www.example.com")).unwrap();

        assert_eq!(uri.scheme_str(), Some("http"));
        assert_eq!(uri.host(), Some("www.example.com"));
        assert_eq!(uri.port_u16(), None);
        assert_eq!(uri.path(), "/hello");
        assert_eq!(uri.query(), Some("a=1"));
    }

    #[test]
    fn origin_form_with_host_port_and_custom_scheme() {
        let uri = UriResolver::new(Scheme::HTTPS).resolve("/", &host("example.com:8443")).unwrap();

        assert_eq!(uri.scheme_str(), Some("https"));
        assert_eq!(uri.port_u16(), Some(8443));
    }

    #[test]
    fn origin_form_without_host_fails() {
        let result = UriResolver::default().resolve("/hello", &HeaderContainer::new());
        assert!(matches!(result, Err(ParseError::MissingTargetHost)));

        let result = UriResolver::default().resolve("/hello", &host("  "));
        assert!(matches!(result, Err(ParseError::MissingTargetHost)));
    }

    #[test]
    fn invalid_targets() {
        let result = UriResolver::default().resolve("http://exa mple.com/", &HeaderContainer::new());
        assert!(matches!(result, Err(ParseError::MalformedStartLine { .. })));

        let result = UriResolver::default().resolve("/x", &host("bad host"));
        assert!(matches!(result, Err(ParseError::MalformedHeaderLine { .. })));
    }

    #[test]
    fn replace_host() {
        let uri = Uri::from_static("http://old.com:8080/path?q=1");

        let replaced = with_host(&uri, "new.com").unwrap();
        assert_eq!(replaced.host(), Some("new.com"));
        assert_eq!(replaced.port_u16(), None);
        assert_eq!(replaced.path(), "/path");
        assert_eq!(replaced.query(), Some("q=1"));

        let replaced = with_host(&uri, "new.com:9090").unwrap();
        assert_eq!(replaced.port_u16(), Some(9090));
    }
}
