//! HTTP execution abstraction.
//!
//! Everything above the transport talks to an [`HttpExecutor`], so the
//! drive services can run against a real backend or a scripted mock.

use std::collections::HashMap;
use std::fmt;
use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use url::Url;

use crate::error::Error;
use crate::types::{HttpRequest, HttpResponse, RequestBody};

/// Default API root requests are joined onto.
pub const DEFAULT_BASE_URL: &str = "https://graph.microsoft.com/v1.0/";

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Trait for executing HTTP requests.
///
/// Implementations return `Ok` for any response the server produced,
/// including 4xx/5xx. `Err` is reserved for failures to get a response at all.
pub trait HttpExecutor: Send + Sync {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, Error>;
}

/// Connection settings for [`ReqwestExecutor`].
#[derive(Clone)]
pub struct TransportConfig {
    pub base_url: String,
    /// Opaque bearer token, sent as `Authorization: Bearer <token>`.
    pub access_token: String,
    pub timeout: Duration,
    pub verify_tls: bool,
}

impl TransportConfig {
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            access_token: access_token.into(),
            timeout: DEFAULT_TIMEOUT,
            verify_tls: true,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_verify_tls(mut self, verify_tls: bool) -> Self {
        self.verify_tls = verify_tls;
        self
    }

    /// Parse the base URL, forcing a trailing slash so relative joins
    /// append instead of replacing the last segment.
    pub fn parsed_base_url(&self) -> Result<Url, Error> {
        let mut base = self.base_url.clone();
        if !base.ends_with('/') {
            base.push('/');
        }
        let url = Url::parse(&base)?;
        if url.cannot_be_a_base() {
            return Err(Error::InvalidUrl {
                message: format!("'{}' cannot be used as a base URL", self.base_url),
            });
        }
        Ok(url)
    }
}

impl fmt::Debug for TransportConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransportConfig")
            .field("base_url", &self.base_url)
            .field("access_token", &"<redacted>")
            .field("timeout", &self.timeout)
            .field("verify_tls", &self.verify_tls)
            .finish()
    }
}

/// Production HTTP executor using reqwest.
pub struct ReqwestExecutor {
    client: Client,
    base_url: Url,
}

impl ReqwestExecutor {
    pub fn new(config: &TransportConfig) -> Result<Self, Error> {
        let base_url = config.parsed_base_url()?;

        let mut auth = HeaderValue::try_from(format!("Bearer {}", config.access_token))?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .danger_accept_invalid_certs(!config.verify_tls)
            .build()?;

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn build_url(&self, request: &HttpRequest) -> Result<Url, Error> {
        if request.is_absolute() {
            Ok(Url::parse(&request.path)?)
        } else {
            Ok(self.base_url.join(request.path.trim_start_matches('/'))?)
        }
    }
}

impl HttpExecutor for ReqwestExecutor {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, Error> {
        let url = self.build_url(request)?;
        tracing::debug!(method = %request.method, %url, "sending request");

        let method: http::Method = request.method.into();
        let mut req_builder = self.client.request(method, url);

        let mut headers = HeaderMap::new();
        for (name, value) in &request.headers {
            let header_name = HeaderName::try_from(name.as_str())?;
            let header_value = HeaderValue::try_from(value.as_str())?;
            headers.insert(header_name, header_value);
        }

        match &request.body {
            Some(RequestBody::Json(body)) => {
                req_builder = req_builder.json(body);
            }
            Some(RequestBody::Bytes {
                content,
                content_type,
            }) => {
                headers.insert(CONTENT_TYPE, HeaderValue::try_from(content_type.as_str())?);
                req_builder = req_builder.body(content.clone());
            }
            None => {}
        }
        req_builder = req_builder.headers(headers);

        if !request.query.is_empty() {
            req_builder = req_builder.query(&request.query);
        }

        let response = req_builder.send()?;

        let status = response.status();
        let status_text = status.canonical_reason().unwrap_or("Unknown").to_string();

        let mut resp_headers = HashMap::new();
        for (name, value) in response.headers() {
            if let Ok(v) = value.to_str() {
                resp_headers.insert(name.to_string(), v.to_string());
            }
        }

        let bytes = response.bytes()?.to_vec();
        tracing::debug!(status = status.as_u16(), len = bytes.len(), "received response");

        Ok(HttpResponse::from_parts(
            status.as_u16(),
            status_text,
            resp_headers,
            bytes,
        ))
    }
}
