//! Scripted HTTP executor for tests.
//!
//! Enabled inside this crate's tests and, for downstream crates, through the
//! `test-utils` feature.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use crate::error::Error;
use crate::executor::HttpExecutor;
use crate::types::{HttpRequest, HttpResponse, Method};

type Scripted = Result<HttpResponse, String>;

/// A mock HTTP executor that returns predefined responses.
///
/// Responses are keyed by method and request path. Several responses queued
/// for the same key are returned in order; the last one is repeated once the
/// queue is down to it. Unmatched requests get a 404 `itemNotFound` envelope.
#[derive(Clone, Default)]
pub struct MockExecutor {
    responses: Arc<Mutex<HashMap<(Method, String), VecDeque<Scripted>>>>,
    recorded_requests: Arc<Mutex<Vec<HttpRequest>>>,
}

impl MockExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response for `method` + `path`.
    pub fn with_response(
        self,
        method: Method,
        path: impl Into<String>,
        response: HttpResponse,
    ) -> Self {
        self.push(method, path.into(), Ok(response));
        self
    }

    /// Queue a transport-level failure for `method` + `path`.
    pub fn with_failure(
        self,
        method: Method,
        path: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        self.push(method, path.into(), Err(message.into()));
        self
    }

    fn push(&self, method: Method, path: String, scripted: Scripted) {
        self.responses
            .lock()
            .unwrap()
            .entry((method, path))
            .or_default()
            .push_back(scripted);
    }

    /// Get all recorded requests.
    pub fn recorded_requests(&self) -> Vec<HttpRequest> {
        self.recorded_requests.lock().unwrap().clone()
    }

    /// Recorded requests with the given method.
    pub fn requests_with_method(&self, method: Method) -> Vec<HttpRequest> {
        self.recorded_requests()
            .into_iter()
            .filter(|r| r.method == method)
            .collect()
    }

    pub fn clear_recorded(&self) {
        self.recorded_requests.lock().unwrap().clear();
    }

    /// A 200 response carrying `body`.
    pub fn success_response(body: serde_json::Value) -> HttpResponse {
        Self::json_response(200, "OK", body)
    }

    /// A 201 response carrying `body`.
    pub fn created_response(body: serde_json::Value) -> HttpResponse {
        Self::json_response(201, "Created", body)
    }

    /// A bodiless response, e.g. 204 for deletes or 202 for copies.
    pub fn empty_response(status: u16) -> HttpResponse {
        HttpResponse::from_parts(status, "", HashMap::new(), Vec::new())
    }

    /// A 200 response with a raw, non-JSON body.
    pub fn bytes_response(content: &[u8]) -> HttpResponse {
        HttpResponse::from_parts(200, "OK", HashMap::new(), content.to_vec())
    }

    /// An error response using the backend's `{"error": {code, message}}` envelope.
    pub fn error_response(status: u16, code: &str, message: &str) -> HttpResponse {
        Self::json_response(
            status,
            "",
            serde_json::json!({"error": {"code": code, "message": message}}),
        )
    }

    pub fn not_found() -> HttpResponse {
        Self::error_response(404, "itemNotFound", "The resource could not be found.")
    }

    fn json_response(status: u16, status_text: &str, body: serde_json::Value) -> HttpResponse {
        HttpResponse::from_parts(
            status,
            status_text,
            HashMap::new(),
            body.to_string().into_bytes(),
        )
    }
}

impl HttpExecutor for MockExecutor {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, Error> {
        self.recorded_requests.lock().unwrap().push(request.clone());

        let mut responses = self.responses.lock().unwrap();
        let scripted = match responses.get_mut(&(request.method, request.path.clone())) {
            Some(queue) if queue.len() > 1 => queue.pop_front(),
            Some(queue) => queue.front().cloned(),
            None => None,
        };

        match scripted {
            Some(Ok(response)) => Ok(response),
            Some(Err(message)) => Err(Error::Transport { message }),
            None => Ok(Self::not_found()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mock_executor_returns_configured_response() {
        let executor = MockExecutor::new().with_response(
            Method::GET,
            "/test",
            MockExecutor::success_response(serde_json::json!({"result": "success"})),
        );

        let result = executor.execute(&HttpRequest::get("/test")).unwrap();

        assert_eq!(result.status, 200);
        assert_eq!(result.body, serde_json::json!({"result": "success"}));
    }

    #[test]
    fn mock_executor_distinguishes_methods() {
        let executor = MockExecutor::new()
            .with_response(
                Method::GET,
                "/x",
                MockExecutor::success_response(serde_json::json!(1)),
            )
            .with_response(Method::DELETE, "/x", MockExecutor::empty_response(204));

        assert_eq!(executor.execute(&HttpRequest::get("/x")).unwrap().status, 200);
        assert_eq!(executor.execute(&HttpRequest::delete("/x")).unwrap().status, 204);
    }

    #[test]
    fn mock_executor_replays_queue_then_repeats_last() {
        let executor = MockExecutor::new()
            .with_response(Method::GET, "/a", MockExecutor::not_found())
            .with_response(
                Method::GET,
                "/a",
                MockExecutor::success_response(serde_json::json!({})),
            );

        assert_eq!(executor.execute(&HttpRequest::get("/a")).unwrap().status, 404);
        assert_eq!(executor.execute(&HttpRequest::get("/a")).unwrap().status, 200);
        assert_eq!(executor.execute(&HttpRequest::get("/a")).unwrap().status, 200);
    }

    #[test]
    fn mock_executor_returns_item_not_found_when_no_match() {
        let executor = MockExecutor::new();
        let result = executor.execute(&HttpRequest::get("/unknown")).unwrap();

        assert_eq!(result.status, 404);
        assert_eq!(result.body["error"]["code"], "itemNotFound");
    }

    #[test]
    fn mock_executor_scripted_failure() {
        let executor = MockExecutor::new().with_failure(Method::GET, "/down", "connection reset");
        let result = executor.execute(&HttpRequest::get("/down"));

        assert!(
            matches!(result, Err(Error::Transport { message }) if message == "connection reset")
        );
    }

    #[test]
    fn mock_executor_records_requests() {
        let executor = MockExecutor::new();

        executor.execute(&HttpRequest::get("/first")).unwrap();
        executor.execute(&HttpRequest::post("/second")).unwrap();
        executor.execute(&HttpRequest::delete("/third")).unwrap();

        let recorded = executor.recorded_requests();
        assert_eq!(recorded.len(), 3);
        assert_eq!(recorded[0].path, "/first");
        assert_eq!(recorded[1].method, Method::POST);
        assert_eq!(executor.requests_with_method(Method::DELETE).len(), 1);

        executor.clear_recorded();
        assert!(executor.recorded_requests().is_empty());
    }
}
