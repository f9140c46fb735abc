//! Drive-scoped request execution and backend error classification.

use std::sync::Arc;

use drivefs_http::{HttpExecutor, HttpRequest, HttpResponse};

use crate::address::ItemAddress;
use crate::error::DriveError;

/// Executes requests against one drive and turns non-2xx responses into
/// [`DriveError::Backend`].
#[derive(Clone)]
pub struct DriveClient {
    executor: Arc<dyn HttpExecutor>,
    drive_id: String,
}

impl DriveClient {
    pub fn new(executor: Arc<dyn HttpExecutor>, drive_id: impl Into<String>) -> Self {
        Self {
            executor,
            drive_id: drive_id.into(),
        }
    }

    pub fn drive_id(&self) -> &str {
        &self.drive_id
    }

    pub fn url(&self, address: &ItemAddress, suffix: Option<&str>) -> String {
        address.url(&self.drive_id, suffix)
    }

    /// Send a request; any non-2xx status becomes an error.
    pub fn send(&self, request: &HttpRequest) -> Result<HttpResponse, DriveError> {
        let response = self.executor.execute(request)?;
        if response.is_success() {
            return Ok(response);
        }

        let err = classify(&response);
        tracing::debug!(
            method = %request.method,
            path = %request.path,
            status = response.status,
            error = %err,
            "backend rejected request"
        );
        Err(err)
    }

    /// GET `path` and return the JSON body.
    pub fn get_json(&self, path: &str) -> Result<serde_json::Value, DriveError> {
        Ok(self.send(&HttpRequest::get(path))?.body)
    }
}

/// Read the backend's `{"error": {"code", "message"}}` envelope.
fn classify(response: &HttpResponse) -> DriveError {
    let envelope = response.body.get("error");

    let code = envelope
        .and_then(|e| e.get("code"))
        .and_then(|c| c.as_str())
        .map(str::to_string)
        .unwrap_or_else(|| {
            if response.status_text.is_empty() {
                format!("http{}", response.status)
            } else {
                response.status_text.clone()
            }
        });

    let message = envelope
        .and_then(|e| e.get("message"))
        .and_then(|m| m.as_str())
        .map(str::to_string)
        .unwrap_or_else(|| response.text());

    DriveError::Backend {
        status: response.status,
        code,
        message,
    }
}
