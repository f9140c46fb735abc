//! # drivefs-http
//!
//! Blocking HTTP transport for drivefs.
//!
//! Requests are described as plain values ([`HttpRequest`]) and handed to an
//! [`HttpExecutor`]. The production executor, [`ReqwestExecutor`], joins the
//! request path onto a base URL, attaches the bearer token, and applies the
//! configured timeout and TLS verification:
//!
//! ```ignore
//! use drivefs_http::{HttpExecutor, HttpRequest, ReqwestExecutor, TransportConfig};
//!
//! let executor = ReqwestExecutor::new(&TransportConfig::new(token))?;
//! let response = executor.execute(&HttpRequest::get("drives/abc/items/root"))?;
//! assert!(response.is_success());
//! ```
//!
//! With the `test-utils` feature, [`testing::MockExecutor`] replays scripted
//! responses and records every request it sees.

pub mod error;
pub mod executor;
pub mod types;

#[cfg(any(test, feature = "test-utils"))]
pub mod testing;

pub use error::Error;
pub use executor::{
    HttpExecutor, ReqwestExecutor, TransportConfig, DEFAULT_BASE_URL, DEFAULT_TIMEOUT,
};
pub use types::{HttpRequest, HttpResponse, Method, RequestBody};
