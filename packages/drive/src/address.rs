//! Addressing remote items by path or by id.
//!
//! The backend accepts three URL shapes under `drives/{drive-id}/`:
//!
//! - `items/{id}{suffix}` when the id is known
//! - `items/root{suffix}` for the drive root
//! - `items/root:/{path}:{suffix}` for any other path
//!
//! An id always wins over a path.

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};

use crate::error::DriveError;

/// Sentinel segment naming the drive root.
pub const ROOT: &str = "root";

/// Bytes escaped inside one path segment or id. `:` is escaped as well, so
/// the only literal delimiters are the ones [`ItemAddress::url`] inserts.
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b':')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'[')
    .add(b'\\')
    .add(b']')
    .add(b'^')
    .add(b'`')
    .add(b'{')
    .add(b'|')
    .add(b'}');

/// How a request names its target item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemAddress {
    ByPath(String),
    ById(String),
}

impl ItemAddress {
    pub fn path(path: impl Into<String>) -> Self {
        ItemAddress::ByPath(path.into())
    }

    pub fn id(id: impl Into<String>) -> Self {
        ItemAddress::ById(id.into())
    }

    pub fn root() -> Self {
        ItemAddress::ByPath("/".to_string())
    }

    /// Pick an addressing mode from optional inputs.
    ///
    /// Fails with [`DriveError::MissingAddress`] when both are absent.
    pub fn resolve(path: Option<&str>, id: Option<&str>) -> Result<Self, DriveError> {
        match (id, path) {
            (Some(id), _) => Ok(ItemAddress::id(id)),
            (None, Some(path)) => Ok(ItemAddress::path(path)),
            (None, None) => Err(DriveError::MissingAddress),
        }
    }

    pub fn is_root(&self) -> bool {
        matches!(self, ItemAddress::ByPath(path) if is_root(path))
    }

    /// Drive-relative URL for this item, with an optional suffix such as
    /// `/children` or `/content`.
    pub fn url(&self, drive_id: &str, suffix: Option<&str>) -> String {
        let suffix_str = suffix.unwrap_or("");
        match self {
            ItemAddress::ById(id) => format!(
                "drives/{}/items/{}{}",
                drive_id,
                utf8_percent_encode(id, SEGMENT),
                suffix_str
            ),
            ItemAddress::ByPath(path) if is_root(path) => {
                format!("drives/{}/items/{}{}", drive_id, ROOT, suffix_str)
            }
            ItemAddress::ByPath(path) => {
                let path_suffix = suffix.map(|s| format!(":{}", s)).unwrap_or_default();
                format!(
                    "drives/{}/items/{}:/{}{}",
                    drive_id,
                    ROOT,
                    encode_path(path),
                    path_suffix
                )
            }
        }
    }
}

impl std::fmt::Display for ItemAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ItemAddress::ByPath(path) => write!(f, "/{}", normalize(path)),
            ItemAddress::ById(id) => write!(f, "id:{}", id),
        }
    }
}

/// Strip leading and trailing slashes. Interior empty segments are kept.
pub fn normalize(path: &str) -> &str {
    path.trim_matches('/')
}

/// Percent-encode each segment of the normalized path, keeping the `/`
/// between them. Empty interior segments stay empty.
pub fn encode_path(path: &str) -> String {
    normalize(path)
        .split('/')
        .map(|segment| utf8_percent_encode(segment, SEGMENT).to_string())
        .collect::<Vec<_>>()
        .join("/")
}

/// `""`, `"/"` and other all-slash strings name the root.
pub fn is_root(path: &str) -> bool {
    normalize(path).is_empty()
}

/// Segments of a normalized path; empty for the root.
pub fn segments(path: &str) -> Vec<&str> {
    let normalized = normalize(path);
    if normalized.is_empty() {
        Vec::new()
    } else {
        normalized.split('/').collect()
    }
}

/// Split `path` into its parent (with a single leading `/`) and leaf name.
///
/// `"/dir/x.txt"` gives `("/dir", "x.txt")`; `"x.txt"` gives `("/", "x.txt")`.
pub fn split_parent(path: &str) -> (String, String) {
    let normalized = normalize(path);
    match normalized.rsplit_once('/') {
        Some((parent, leaf)) => (format!("/{}", parent.trim_start_matches('/')), leaf.to_string()),
        None => ("/".to_string(), normalized.to_string()),
    }
}
