//! Error types for drive operations.

use crate::item::ItemKind;

/// Backend error code meaning the addressed item does not exist.
pub const ITEM_NOT_FOUND: &str = "itemNotFound";

/// Which backend payload failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Payload {
    /// Single item metadata (lookup, create, move, upload).
    Metadata,
    /// A `children` collection page.
    Listing,
}

impl std::fmt::Display for Payload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Payload::Metadata => f.write_str("item metadata"),
            Payload::Listing => f.write_str("children listing"),
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum DriveError {
    #[error("item not found: {path}")]
    NotFound { path: String },

    #[error("expected a {expected} at '{path}' but the item is a {actual}")]
    KindMismatch {
        path: String,
        expected: ItemKind,
        actual: ItemKind,
    },

    #[error("cannot parse the {payload} response: missing field '{field}'")]
    MalformedResponse {
        payload: Payload,
        field: &'static str,
    },

    #[error("neither a path nor an item id was given")]
    MissingAddress,

    #[error("cannot create the root directory, it already exists")]
    CreateRoot,

    #[error("configuration error: {message}")]
    Configuration { message: String },

    #[error("parent directory does not exist: {path}")]
    ParentNotFound { path: String },

    #[error("cannot create recursive directory at {path}: {source}")]
    CreateRecursive {
        path: String,
        #[source]
        source: Box<DriveError>,
    },

    #[error("backend error {status} ({code}): {message}")]
    Backend {
        status: u16,
        code: String,
        message: String,
    },

    #[error("transport error: {0}")]
    Transport(#[from] drivefs_http::Error),
}

impl DriveError {
    /// Numeric diagnostic code attached to every hard error.
    pub fn code(&self) -> u32 {
        match self {
            DriveError::NotFound { .. } => 404,
            DriveError::KindMismatch { .. } => 2231,
            DriveError::MalformedResponse {
                payload: Payload::Listing,
                ..
            } => 2321,
            DriveError::MalformedResponse {
                payload: Payload::Metadata,
                ..
            } => 2331,
            DriveError::MissingAddress => 2311,
            DriveError::Configuration { .. } => 2300,
            DriveError::CreateRoot => 2351,
            DriveError::ParentNotFound { .. } => 2352,
            DriveError::CreateRecursive { .. } => 2361,
            DriveError::Backend { status, .. } => u32::from(*status),
            DriveError::Transport(_) => 503,
        }
    }

    /// True when the backend answered with the "item not found" sentinel.
    pub fn is_item_not_found(&self) -> bool {
        matches!(self, DriveError::Backend { code, .. } if code == ITEM_NOT_FOUND)
    }

    /// Programmer or setup mistakes that fail before any request is sent.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            DriveError::MissingAddress | DriveError::CreateRoot | DriveError::Configuration { .. }
        )
    }

    pub(crate) fn config(message: impl Into<String>) -> Self {
        DriveError::Configuration {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as StdError;

    fn backend(code: &str) -> DriveError {
        DriveError::Backend {
            status: 404,
            code: code.to_string(),
            message: "gone".to_string(),
        }
    }

    #[test]
    fn item_not_found_is_detected_by_code_only() {
        assert!(backend(ITEM_NOT_FOUND).is_item_not_found());
        assert!(!backend("accessDenied").is_item_not_found());
        assert!(!DriveError::NotFound {
            path: "/a".to_string()
        }
        .is_item_not_found());
    }

    #[test]
    fn codes_distinguish_payloads() {
        let listing = DriveError::MalformedResponse {
            payload: Payload::Listing,
            field: "value",
        };
        let metadata = DriveError::MalformedResponse {
            payload: Payload::Metadata,
            field: "id",
        };
        assert_eq!(listing.code(), 2321);
        assert_eq!(metadata.code(), 2331);
    }

    #[test]
    fn backend_code_is_http_status() {
        let e = DriveError::Backend {
            status: 409,
            code: "nameAlreadyExists".to_string(),
            message: "conflict".to_string(),
        };
        assert_eq!(e.code(), 409);
        assert!(e.to_string().contains("nameAlreadyExists"));
    }

    #[test]
    fn create_recursive_names_prefix_and_keeps_source() {
        let e = DriveError::CreateRecursive {
            path: "/a/b".to_string(),
            source: Box::new(backend("nameAlreadyExists")),
        };
        assert_eq!(e.code(), 2361);
        assert!(e.to_string().contains("cannot create recursive directory at /a/b"));
        assert!(StdError::source(&e).is_some());
    }

    #[test]
    fn kind_mismatch_display() {
        let e = DriveError::KindMismatch {
            path: "/report.pdf".to_string(),
            expected: ItemKind::Directory,
            actual: ItemKind::File,
        };
        assert_eq!(e.code(), 2231);
        assert_eq!(
            e.to_string(),
            "expected a directory at '/report.pdf' but the item is a file"
        );
    }

    #[test]
    fn configuration_errors() {
        assert!(DriveError::MissingAddress.is_configuration());
        assert!(DriveError::CreateRoot.is_configuration());
        assert!(DriveError::config("no token").is_configuration());
        assert!(!backend(ITEM_NOT_FOUND).is_configuration());
        assert_eq!(DriveError::MissingAddress.code(), 2311);
        assert_eq!(DriveError::CreateRoot.code(), 2351);
    }
}
