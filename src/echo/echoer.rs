//! Builds [`EchoResponse`] values from request descriptors.

use std::collections::BTreeMap;

use super::decoder::{decode, method_carries_body, Decoded};
use super::request::EchoRequest;
use super::response::{EchoResponse, HeadersResponse};

/// Reflect a request back as a structured response.
///
/// Every input produces a response; malformed bodies only lose their
/// structured `json`/`form` interpretation.
pub fn echo_request(request: &EchoRequest) -> EchoResponse {
    let mut response = EchoResponse {
        method: request.method.clone(),
        url: request.uri.clone(),
        args: first_values(request.query.iter().map(|(k, v)| (k.as_str(), v.as_str()))),
        headers: flatten_headers(&request.headers),
        data: None,
        json: None,
        form: None,
    };

    if method_carries_body(&request.method) && !request.body.is_empty() {
        response.data = Some(String::from_utf8_lossy(&request.body).into_owned());
        match decode(&request.body, request.content_type.as_deref()) {
            Decoded::Json(value) => response.json = Some(value),
            Decoded::Form(form) => response.form = Some(form),
            Decoded::Raw => {}
        }
    }

    response
}

/// Reflect only the request headers.
pub fn echo_headers(headers: &[(String, String)]) -> HeadersResponse {
    HeadersResponse {
        headers: flatten_headers(headers),
    }
}

fn flatten_headers(headers: &[(String, String)]) -> BTreeMap<String, String> {
    first_values(headers.iter().map(|(k, v)| (k.as_str(), v.as_str())))
}

/// Collapse an ordered pair list into a map, keeping the first value per key.
pub(crate) fn first_values<I, K, V>(pairs: I) -> BTreeMap<String, String>
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    let mut map = BTreeMap::new();
    for (key, value) in pairs {
        map.entry(key.into()).or_insert_with(|| value.into());
    }
    map
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn get_reflects_method_url_and_args() {
        let req = EchoRequest::new("GET", "/get?foo=bar&baz=qux")
            .with_header("X-Custom-Header", "test-value");
        let resp = echo_request(&req);

        assert_eq!(resp.method, "GET");
        assert_eq!(resp.url, "/get?foo=bar&baz=qux");
        assert_eq!(resp.args["foo"], "bar");
        assert_eq!(resp.args["baz"], "qux");
        assert_eq!(resp.headers["X-Custom-Header"], "test-value");
    }

    #[test]
    fn repeated_query_keys_keep_first_value() {
        let resp = echo_request(&EchoRequest::new("GET", "/get?a=1&a=2&B=3&b=4"));
        assert_eq!(resp.args.len(), 3);
        assert_eq!(resp.args["a"], "1");
        assert_eq!(resp.args["B"], "3");
        assert_eq!(resp.args["b"], "4");
    }

    #[test]
    fn repeated_headers_keep_first_value() {
        let req = EchoRequest::new("GET", "/get")
            .with_header("accept", "text/html")
            .with_header("accept", "application/json")
            .with_header("x-one", "1");
        let resp = echo_request(&req);
        assert_eq!(resp.headers.len(), 2);
        assert_eq!(resp.headers["accept"], "text/html");
    }

    #[test]
    fn post_json_populates_data_and_json() {
        let body = r#"{"message":"hello","count":42}"#;
        let req = EchoRequest::new("POST", "/post")
            .with_header("Content-Type", "application/json")
            .with_body(body);
        let resp = echo_request(&req);

        assert_eq!(resp.data.as_deref(), Some(body));
        let json = resp.json.expect("json should be decoded");
        assert_eq!(json["message"], json!("hello"));
        assert_eq!(json["count"], json!(42));
        assert!(resp.form.is_none());
    }

    #[test]
    fn post_invalid_json_keeps_raw_data_only() {
        let req = EchoRequest::new("POST", "/post")
            .with_header("Content-Type", "application/json")
            .with_body("{broken");
        let resp = echo_request(&req);
        assert_eq!(resp.data.as_deref(), Some("{broken"));
        assert!(resp.json.is_none());
        assert!(resp.form.is_none());
    }

    #[test]
    fn post_form_populates_form() {
        let req = EchoRequest::new("POST", "/post")
            .with_header("Content-Type", "application/x-www-form-urlencoded")
            .with_body("name=john&age=30");
        let resp = echo_request(&req);

        let form = resp.form.expect("form should be decoded");
        assert_eq!(form.len(), 2);
        assert_eq!(form["name"], "john");
        assert_eq!(form["age"], "30");
        assert!(resp.json.is_none());
        assert_eq!(resp.data.as_deref(), Some("name=john&age=30"));
    }

    #[test]
    fn plain_text_body_is_data_only() {
        let req = EchoRequest::new("PUT", "/put")
            .with_header("Content-Type", "text/plain")
            .with_body("hi");
        let resp = echo_request(&req);
        assert_eq!(resp.data.as_deref(), Some("hi"));
        assert!(resp.json.is_none() && resp.form.is_none());
    }

    #[test]
    fn get_and_delete_ignore_bodies() {
        for method in ["GET", "DELETE"] {
            let req = EchoRequest::new(method, "/x")
                .with_header("Content-Type", "application/json")
                .with_body(r#"{"a":1}"#);
            let resp = echo_request(&req);
            assert!(resp.data.is_none(), "{method} should not echo data");
            assert!(resp.json.is_none());
            assert!(resp.form.is_none());
        }
    }

    #[test]
    fn empty_body_has_no_data() {
        let req = EchoRequest::new("POST", "/post").with_header("Content-Type", "application/json");
        let resp = echo_request(&req);
        assert!(resp.data.is_none());
        assert!(resp.json.is_none());
    }

    #[test]
    fn absent_fields_are_not_serialized() {
        let resp = echo_request(&EchoRequest::new("GET", "/get"));
        let value = serde_json::to_value(&resp).unwrap();
        let object = value.as_object().unwrap();
        assert!(object.contains_key("args"));
        assert!(object.contains_key("headers"));
        assert!(!object.contains_key("data"));
        assert!(!object.contains_key("json"));
        assert!(!object.contains_key("form"));
    }

    #[test]
    fn headers_only_echo() {
        let headers = vec![
            ("Accept".to_string(), "application/json".to_string()),
            ("Accept-Language".to_string(), "en-US".to_string()),
        ];
        let resp = echo_headers(&headers);
        assert_eq!(resp.headers["Accept"], "application/json");
        assert_eq!(resp.headers["Accept-Language"], "en-US");
    }
}
