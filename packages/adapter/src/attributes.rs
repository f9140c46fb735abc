//! Values returned by the filesystem contract.

use chrono::{DateTime, Utc};
use serde::Serialize;

use drivefs_drive::{RemoteItem, DEFAULT_MIME_TYPE};

/// Per-write settings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WriteOptions {
    mime_type: Option<String>,
}

impl WriteOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = Some(mime_type.into());
        self
    }

    /// The content type to upload with; `text/plain` unless set.
    pub fn mime_type(&self) -> &str {
        self.mime_type.as_deref().unwrap_or(DEFAULT_MIME_TYPE)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileAttributes {
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DirectoryAttributes {
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<DateTime<Utc>>,
}

/// One entry of a listing, tagged by kind.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum StorageEntry {
    File(FileAttributes),
    Directory(DirectoryAttributes),
}

impl StorageEntry {
    /// Build the entry for `item`, located at `path`.
    pub fn from_item(path: String, item: &RemoteItem) -> Self {
        if item.is_file() {
            StorageEntry::File(FileAttributes::from_item(path, item))
        } else {
            StorageEntry::Directory(DirectoryAttributes {
                path,
                last_modified: item.last_modified,
            })
        }
    }

    pub fn path(&self) -> &str {
        match self {
            StorageEntry::File(f) => &f.path,
            StorageEntry::Directory(d) => &d.path,
        }
    }

    pub fn is_file(&self) -> bool {
        matches!(self, StorageEntry::File(_))
    }

    pub fn is_directory(&self) -> bool {
        matches!(self, StorageEntry::Directory(_))
    }
}

impl FileAttributes {
    pub fn from_item(path: String, item: &RemoteItem) -> Self {
        Self {
            path,
            size: item.size,
            mime_type: item.mime_type.clone(),
            last_modified: item.last_modified,
        }
    }
}

/// Join a listed child's name onto its directory path.
pub(crate) fn child_path(parent: &str, name: &str) -> String {
    let parent = drivefs_drive::address::normalize(parent);
    if parent.is_empty() {
        format!("/{}", name)
    } else {
        format!("/{}/{}", parent, name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use drivefs_drive::ItemKind;

    fn item(kind: ItemKind) -> RemoteItem {
        RemoteItem {
            id: "1".to_string(),
            name: "n".to_string(),
            kind,
            parent_id: None,
            web_url: None,
            size: Some(12),
            mime_type: Some("text/csv".to_string()),
            last_modified: None,
            child_count: None,
        }
    }

    #[test]
    fn write_options_default_to_plain_text() {
        assert_eq!(WriteOptions::new().mime_type(), "text/plain");
        assert_eq!(
            WriteOptions::new().with_mime_type("image/png").mime_type(),
            "image/png"
        );
    }

    #[test]
    fn child_paths_are_rooted() {
        assert_eq!(child_path("/", "a"), "/a");
        assert_eq!(child_path("", "a"), "/a");
        assert_eq!(child_path("docs/", "a.txt"), "/docs/a.txt");
        assert_eq!(child_path("/x/y", "z"), "/x/y/z");
    }

    #[test]
    fn entries_serialize_with_a_type_tag() {
        let entry = StorageEntry::from_item("/n".to_string(), &item(ItemKind::File));
        assert_eq!(
            serde_json::to_value(&entry).unwrap(),
            serde_json::json!({
                "type": "file",
                "path": "/n",
                "size": 12,
                "mime_type": "text/csv"
            })
        );

        let entry = StorageEntry::from_item("/n".to_string(), &item(ItemKind::Directory));
        assert!(entry.is_directory());
        assert_eq!(
            serde_json::to_value(&entry).unwrap(),
            serde_json::json!({"type": "directory", "path": "/n"})
        );
    }
}
