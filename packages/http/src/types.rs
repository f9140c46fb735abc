use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// HTTP method for requests
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    #[default]
    GET,
    POST,
    PUT,
    DELETE,
    PATCH,
    HEAD,
}

impl From<Method> for http::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::GET => http::Method::GET,
            Method::POST => http::Method::POST,
            Method::PUT => http::Method::PUT,
            Method::DELETE => http::Method::DELETE,
            Method::PATCH => http::Method::PATCH,
            Method::HEAD => http::Method::HEAD,
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Method::GET => "GET",
            Method::POST => "POST",
            Method::PUT => "PUT",
            Method::DELETE => "DELETE",
            Method::PATCH => "PATCH",
            Method::HEAD => "HEAD",
        };
        f.write_str(name)
    }
}

/// Payload attached to a request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum RequestBody {
    /// Serialized as JSON with `Content-Type: application/json`.
    Json(serde_json::Value),
    /// Sent verbatim with the given content type.
    Bytes {
        content: Vec<u8>,
        content_type: String,
    },
}

/// A complete HTTP request, built up from one of the method constructors
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct HttpRequest {
    /// HTTP method (GET, POST, PUT, DELETE, etc.)
    #[serde(default)]
    pub method: Method,

    /// URL path, joined onto the executor's base URL.
    /// Absolute `http://` / `https://` URLs are used as-is.
    #[serde(default)]
    pub path: String,

    /// Query parameters
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub query: HashMap<String, String>,

    /// Request headers
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub headers: HashMap<String, String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<RequestBody>,
}

impl HttpRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            ..Default::default()
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(Method::PATCH, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    pub fn with_body(mut self, body: impl Serialize) -> Result<Self, serde_json::Error> {
        self.body = Some(RequestBody::Json(serde_json::to_value(body)?));
        Ok(self)
    }

    pub fn with_json_body(mut self, body: serde_json::Value) -> Self {
        self.body = Some(RequestBody::Json(body));
        self
    }

    pub fn with_bytes(mut self, content: Vec<u8>, content_type: impl Into<String>) -> Self {
        self.body = Some(RequestBody::Bytes {
            content,
            content_type: content_type.into(),
        });
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub fn with_query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.insert(name.into(), value.into());
        self
    }

    /// Whether `path` is a full URL rather than a base-relative one.
    pub fn is_absolute(&self) -> bool {
        self.path.starts_with("http://") || self.path.starts_with("https://")
    }

    /// The JSON body, if one was attached.
    pub fn json_body(&self) -> Option<&serde_json::Value> {
        match &self.body {
            Some(RequestBody::Json(value)) => Some(value),
            _ => None,
        }
    }
}

/// HTTP response from a request
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HttpResponse {
    /// HTTP status code
    pub status: u16,

    /// Status text (e.g., "OK", "Not Found")
    pub status_text: String,

    /// Response headers, names lowercased
    pub headers: HashMap<String, String>,

    /// Response body as JSON value
    /// Will be null if body was empty or not valid JSON
    pub body: serde_json::Value,

    /// Raw body bytes
    #[serde(default)]
    pub bytes: Vec<u8>,
}

impl HttpResponse {
    /// Build a response from a status and raw body, parsing JSON when possible.
    pub fn from_parts(
        status: u16,
        status_text: impl Into<String>,
        headers: HashMap<String, String>,
        bytes: Vec<u8>,
    ) -> Self {
        let body = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
        Self {
            status,
            status_text: status_text.into(),
            headers,
            body,
            bytes,
        }
    }

    /// Check if the response status indicates success (2xx)
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Check if the response status indicates a client error (4xx)
    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.status)
    }

    /// Check if the response status indicates a server error (5xx)
    pub fn is_server_error(&self) -> bool {
        (500..600).contains(&self.status)
    }

    /// Body as lossy UTF-8 text.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.bytes).into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_builders_set_method_and_path() {
        let request = HttpRequest::patch("items/abc")
            .with_header("If-Match", "*")
            .with_query("select", "id");

        assert_eq!(request.method, Method::PATCH);
        assert_eq!(request.path, "items/abc");
        assert_eq!(request.headers.get("If-Match"), Some(&"*".to_string()));
        assert_eq!(request.query.get("select"), Some(&"id".to_string()));
        assert!(!request.is_absolute());
    }

    #[test]
    fn json_body_accessor_ignores_raw_bytes() {
        let json = HttpRequest::post("x").with_json_body(serde_json::json!({"a": 1}));
        assert_eq!(json.json_body(), Some(&serde_json::json!({"a": 1})));

        let raw = HttpRequest::put("x").with_bytes(b"hi".to_vec(), "text/plain");
        assert!(raw.json_body().is_none());
    }

    #[test]
    fn absolute_paths_are_detected() {
        assert!(HttpRequest::get("https://example.com/next").is_absolute());
        assert!(HttpRequest::get("http://localhost:8080/").is_absolute());
    }

    #[test]
    fn response_from_parts_parses_json_when_possible() {
        let response =
            HttpResponse::from_parts(200, "OK", HashMap::new(), br#"{"id":"1"}"#.to_vec());
        assert_eq!(response.body["id"], "1");
        assert!(response.is_success());

        let response = HttpResponse::from_parts(200, "OK", HashMap::new(), b"plain".to_vec());
        assert_eq!(response.body, serde_json::Value::Null);
        assert_eq!(response.text(), "plain");
    }

    #[test]
    fn response_status_classes() {
        let response = HttpResponse::from_parts(404, "Not Found", HashMap::new(), Vec::new());
        assert!(response.is_client_error());
        assert!(!response.is_server_error());
        assert!(!response.is_success());
    }
}
