//! Remote item model.

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};

use crate::error::{DriveError, Payload};

/// File/Directory discriminant of a remote item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemKind {
    File,
    Directory,
}

impl std::fmt::Display for ItemKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ItemKind::File => f.write_str("file"),
            ItemKind::Directory => f.write_str("directory"),
        }
    }
}

/// One node of the drive's item graph.
///
/// Never cached: every operation re-resolves from the backend.
#[derive(Debug, Clone, PartialEq)]
pub struct RemoteItem {
    pub id: String,
    pub name: String,
    pub kind: ItemKind,
    /// Absent for the drive root.
    pub parent_id: Option<String>,
    pub web_url: Option<String>,
    pub size: Option<u64>,
    pub mime_type: Option<String>,
    pub last_modified: Option<DateTime<Utc>>,
    pub child_count: Option<u64>,
}

impl RemoteItem {
    pub fn is_file(&self) -> bool {
        self.kind == ItemKind::File
    }

    pub fn is_directory(&self) -> bool {
        self.kind == ItemKind::Directory
    }

    /// Parse a single-item metadata payload.
    ///
    /// `id`, `name` and `webUrl` are required.
    pub fn from_metadata(value: &serde_json::Value) -> Result<Self, DriveError> {
        let item = Self::parse(value, Payload::Metadata)?;
        if item.web_url.is_none() {
            return Err(DriveError::MalformedResponse {
                payload: Payload::Metadata,
                field: "webUrl",
            });
        }
        Ok(item)
    }

    /// Parse one entry of a `children` page. Only `id` and `name` are required.
    pub fn from_listing_entry(value: &serde_json::Value) -> Result<Self, DriveError> {
        Self::parse(value, Payload::Listing)
    }

    fn parse(value: &serde_json::Value, payload: Payload) -> Result<Self, DriveError> {
        // Fields are lenient, so this only fails when the payload is not an object.
        let raw: ItemPayload =
            serde_json::from_value(value.clone()).map_err(|_| DriveError::MalformedResponse {
                payload,
                field: "id",
            })?;

        let id = raw
            .id
            .ok_or(DriveError::MalformedResponse { payload, field: "id" })?;
        let name = raw.name.ok_or(DriveError::MalformedResponse {
            payload,
            field: "name",
        })?;

        let (kind, mime_type) = match raw.file {
            Some(file) => {
                let facet = serde_json::from_value::<FileFacet>(file).ok();
                (ItemKind::File, facet.and_then(|f| f.mime_type))
            }
            None => (ItemKind::Directory, None),
        };

        Ok(RemoteItem {
            id,
            name,
            kind,
            parent_id: raw.parent_reference.and_then(|p| p.id),
            web_url: raw.web_url,
            size: raw.size,
            mime_type,
            last_modified: raw.last_modified_date_time,
            child_count: raw.folder.and_then(|f| f.child_count),
        })
    }
}

/// Outcome of a metadata lookup.
///
/// Malformed payloads and other backend failures are errors, never `NotFound`.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    Found(RemoteItem),
    NotFound,
}

impl Resolution {
    pub fn is_found(&self) -> bool {
        matches!(self, Resolution::Found(_))
    }

    pub fn into_item(self) -> Option<RemoteItem> {
        match self {
            Resolution::Found(item) => Some(item),
            Resolution::NotFound => None,
        }
    }
}

/// Wire shape of an item. Every field is optional and a field of the wrong
/// type reads as absent, so only the checks in [`RemoteItem::parse`] can
/// reject a payload.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ItemPayload {
    #[serde(default, deserialize_with = "lenient")]
    id: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    web_url: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    size: Option<u64>,
    /// Any non-null value marks a file.
    #[serde(default)]
    file: Option<serde_json::Value>,
    #[serde(default, deserialize_with = "lenient")]
    folder: Option<FolderFacet>,
    #[serde(default, deserialize_with = "lenient")]
    parent_reference: Option<ParentReference>,
    #[serde(default, deserialize_with = "lenient")]
    last_modified_date_time: Option<DateTime<Utc>>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct FileFacet {
    #[serde(default, deserialize_with = "lenient")]
    mime_type: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct FolderFacet {
    #[serde(default, deserialize_with = "lenient")]
    child_count: Option<u64>,
}

#[derive(Deserialize)]
struct ParentReference {
    #[serde(default, deserialize_with = "lenient")]
    id: Option<String>,
}

fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}
