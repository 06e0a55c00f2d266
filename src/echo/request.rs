//! Transport-neutral description of an inbound request.

use url::form_urlencoded;

use super::decoder::is_well_formed_form;

/// Everything the echoer needs to know about one request.
///
/// Adapters build this from whatever their transport hands them; the echo
/// logic never reaches back into the transport.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EchoRequest {
    /// Request method exactly as received (e.g. `POST`).
    pub method: String,
    /// Path and query string exactly as received.
    pub uri: String,
    /// Headers in arrival order. Names may repeat.
    pub headers: Vec<(String, String)>,
    /// Decoded query parameters in arrival order. Keys may repeat.
    pub query: Vec<(String, String)>,
    /// Raw body bytes (empty when the request had no body).
    pub body: Vec<u8>,
    /// Declared `Content-Type`, if any.
    pub content_type: Option<String>,
}

impl EchoRequest {
    /// Start a descriptor from a method and a request URI.
    ///
    /// The query string of `uri` is parsed into [`EchoRequest::query`].
    pub fn new(method: impl Into<String>, uri: impl Into<String>) -> Self {
        let uri = uri.into();
        let query = parse_query(&uri);
        Self {
            method: method.into(),
            uri,
            query,
            ..Self::default()
        }
    }

    /// Append a header. The first `Content-Type` header seen becomes the
    /// declared content type.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        let value = value.into();
        if self.content_type.is_none() && name.eq_ignore_ascii_case("content-type") {
            self.content_type = Some(value.clone());
        }
        self.headers.push((name, value));
        self
    }

    /// Append every header from an ordered list.
    pub fn with_headers<I, K, V>(self, headers: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        headers
            .into_iter()
            .fold(self, |request, (name, value)| request.with_header(name, value))
    }

    /// Attach a raw body.
    pub fn with_body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = body.into();
        self
    }
}

/// Split the query string off a request URI and decode its pairs.
///
/// Pairs holding a `;` or a malformed `%` escape are dropped; the rest are
/// kept.
fn parse_query(uri: &str) -> Vec<(String, String)> {
    let Some((_, query)) = uri.split_once('?') else {
        return Vec::new();
    };
    query
        .split('&')
        .filter(|pair| is_well_formed_form(pair.as_bytes()))
        .flat_map(|pair| form_urlencoded::parse(pair.as_bytes()).into_owned())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_is_parsed_in_order() {
        let req = EchoRequest::new("GET", "/get?foo=bar&baz=qux&foo=again");
        assert_eq!(
            req.query,
            vec![
                ("foo".to_string(), "bar".to_string()),
                ("baz".to_string(), "qux".to_string()),
                ("foo".to_string(), "again".to_string()),
            ]
        );
    }

    #[test]
    fn query_values_are_percent_decoded() {
        let req = EchoRequest::new("GET", "/get?q=hello+world&x=%2Fpath");
        assert_eq!(req.query[0].1, "hello world");
        assert_eq!(req.query[1].1, "/path");
    }

    #[test]
    fn malformed_query_pairs_are_dropped() {
        let req = EchoRequest::new("GET", "/get?a=%zz&b=1;c=2&d=ok&e=%41");
        assert_eq!(
            req.query,
            vec![
                ("d".to_string(), "ok".to_string()),
                ("e".to_string(), "A".to_string()),
            ]
        );
        assert_eq!(req.uri, "/get?a=%zz&b=1;c=2&d=ok&e=%41");
    }

    #[test]
    fn empty_query_segments_are_skipped() {
        let req = EchoRequest::new("GET", "/get?&a=1&&");
        assert_eq!(req.query, vec![("a".to_string(), "1".to_string())]);
    }

    #[test]
    fn no_query_string() {
        let req = EchoRequest::new("GET", "/get");
        assert!(req.query.is_empty());
        assert_eq!(req.uri, "/get");
    }

    #[test]
    fn first_content_type_header_wins() {
        let req = EchoRequest::new("POST", "/post")
            .with_header("Content-Type", "application/json")
            .with_header("content-type", "text/plain");
        assert_eq!(req.content_type.as_deref(), Some("application/json"));
        assert_eq!(req.headers.len(), 2);
    }
}
