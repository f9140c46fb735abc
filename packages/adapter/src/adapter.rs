//! The filesystem contract and its drive-backed implementation.

use drivefs_drive::{address, DriveConnector, ItemAddress, ItemKind, RemoteItem};

use crate::attributes::{child_path, FileAttributes, StorageEntry, WriteOptions};
use crate::error::{Error, Result};

/// Path-oriented filesystem operations.
///
/// Paths use `/` as separator; `""` and `"/"` both name the root.
pub trait FilesystemAdapter {
    /// Whether a file exists at `path`. A directory there is an error.
    fn file_exists(&self, path: &str) -> Result<bool>;

    /// Whether a directory exists at `path`. A file there is an error.
    fn directory_exists(&self, path: &str) -> Result<bool>;

    fn write(&self, path: &str, contents: Vec<u8>, options: &WriteOptions) -> Result<()>;

    fn read(&self, path: &str) -> Result<Vec<u8>>;

    fn delete(&self, path: &str) -> Result<()>;

    /// Best-effort: `Ok(false)` when the backend refused the delete or
    /// `path` is the root.
    fn delete_directory(&self, path: &str) -> Result<bool>;

    /// Create `path` and any missing ancestors.
    fn create_directory(&self, path: &str) -> Result<RemoteItem>;

    /// Entries directly under `path`, or the whole subtree when `deep`.
    fn list_contents(&self, path: &str, deep: bool) -> Result<Vec<StorageEntry>>;

    /// Move `source` to `destination`. The destination's parent must exist.
    fn move_item(&self, source: &str, destination: &str) -> Result<()>;

    /// Copy `source` to `destination`. The destination's parent must exist.
    fn copy(&self, source: &str, destination: &str) -> Result<()>;

    fn mime_type(&self, path: &str) -> Result<FileAttributes>;

    fn last_modified(&self, path: &str) -> Result<FileAttributes>;

    fn file_size(&self, path: &str) -> Result<FileAttributes>;
}

/// [`FilesystemAdapter`] over one drive.
#[derive(Clone)]
pub struct DriveAdapter {
    connector: DriveConnector,
}

impl DriveAdapter {
    pub fn new(connector: DriveConnector) -> Self {
        Self { connector }
    }

    fn file_attributes(&self, path: &str) -> Result<FileAttributes> {
        let item = self
            .connector
            .file()
            .file_metadata(&ItemAddress::path(path))?;
        Ok(FileAttributes::from_item(with_leading_slash(path), &item))
    }

    fn collect(
        &self,
        address: &ItemAddress,
        path: &str,
        deep: bool,
        entries: &mut Vec<StorageEntry>,
    ) -> Result<()> {
        for item in self.connector.directory().list_items(address)? {
            let item_path = child_path(path, &item.name);
            entries.push(StorageEntry::from_item(item_path.clone(), &item));

            if deep && item.kind == ItemKind::Directory {
                self.collect(&ItemAddress::id(&item.id), &item_path, deep, entries)?;
            }
        }
        Ok(())
    }
}

impl FilesystemAdapter for DriveAdapter {
    fn file_exists(&self, path: &str) -> Result<bool> {
        Ok(self
            .connector
            .file()
            .check_file_exists(&ItemAddress::path(path))?)
    }

    fn directory_exists(&self, path: &str) -> Result<bool> {
        Ok(self
            .connector
            .directory()
            .check_directory_exists(&ItemAddress::path(path))?)
    }

    fn write(&self, path: &str, contents: Vec<u8>, options: &WriteOptions) -> Result<()> {
        self.connector
            .file()
            .write_file(path, contents, options.mime_type())?;
        Ok(())
    }

    fn read(&self, path: &str) -> Result<Vec<u8>> {
        Ok(self.connector.file().read_file(&ItemAddress::path(path))?)
    }

    fn delete(&self, path: &str) -> Result<()> {
        Ok(self
            .connector
            .file()
            .delete_file(&ItemAddress::path(path))?)
    }

    fn delete_directory(&self, path: &str) -> Result<bool> {
        Ok(self
            .connector
            .directory()
            .delete_directory(&ItemAddress::path(path)))
    }

    fn create_directory(&self, path: &str) -> Result<RemoteItem> {
        Ok(self.connector.directory().create_directory(path)?)
    }

    fn list_contents(&self, path: &str, deep: bool) -> Result<Vec<StorageEntry>> {
        let mut entries = Vec::new();
        self.collect(&ItemAddress::path(path), path, deep, &mut entries)?;
        tracing::debug!(path = %path, deep, count = entries.len(), "listed contents");
        Ok(entries)
    }

    fn move_item(&self, source: &str, destination: &str) -> Result<()> {
        check_destination(destination)?;
        self.connector
            .file()
            .move_to(&ItemAddress::path(source), destination)?;
        Ok(())
    }

    fn copy(&self, source: &str, destination: &str) -> Result<()> {
        check_destination(destination)?;
        self.connector
            .file()
            .copy_to(&ItemAddress::path(source), destination)?;
        Ok(())
    }

    fn mime_type(&self, path: &str) -> Result<FileAttributes> {
        self.file_attributes(path)
    }

    fn last_modified(&self, path: &str) -> Result<FileAttributes> {
        self.file_attributes(path)
    }

    fn file_size(&self, path: &str) -> Result<FileAttributes> {
        self.file_attributes(path)
    }
}

/// The root has no parent to move into.
fn check_destination(destination: &str) -> Result<()> {
    if address::is_root(destination) {
        return Err(Error::InvalidDestination {
            path: destination.to_string(),
        });
    }
    Ok(())
}

fn with_leading_slash(path: &str) -> String {
    format!("/{}", address::normalize(path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use drivefs_drive::DriveError;
    use drivefs_http::testing::MockExecutor;
    use drivefs_http::{Method, RequestBody};
    use serde_json::json;
    use std::sync::Arc;

    fn adapter(mock: &MockExecutor) -> DriveAdapter {
        DriveAdapter::new(DriveConnector::with_executor(Arc::new(mock.clone()), "d1"))
    }

    fn dir(id: &str, name: &str) -> serde_json::Value {
        json!({"id": id, "name": name, "webUrl": "https://drive.example", "folder": {}})
    }

    #[test]
    fn write_defaults_to_plain_text() {
        let mock = MockExecutor::new().with_response(
            Method::PUT,
            "drives/d1/items/root:/a.txt:/content",
            MockExecutor::created_response(json!({
                "id": "F", "name": "a.txt", "webUrl": "https://drive.example/a.txt", "file": {}
            })),
        );

        adapter(&mock)
            .write("/a.txt", b"hi".to_vec(), &WriteOptions::default())
            .unwrap();

        let puts = mock.requests_with_method(Method::PUT);
        assert_eq!(
            puts[0].body,
            Some(RequestBody::Bytes {
                content: b"hi".to_vec(),
                content_type: "text/plain".to_string(),
            })
        );
    }

    #[test]
    fn deep_listing_walks_subdirectories_by_id() {
        let mock = MockExecutor::new()
            .with_response(
                Method::GET,
                "drives/d1/items/root/children",
                MockExecutor::success_response(json!({"value": [
                    {"id": "A", "name": "a", "folder": {"childCount": 1}},
                    {"id": "R", "name": "readme.md", "file": {"mimeType": "text/markdown"}, "size": 3}
                ]})),
            )
            .with_response(
                Method::GET,
                "drives/d1/items/A/children",
                MockExecutor::success_response(json!({"value": [
                    {"id": "B", "name": "b.txt", "file": {}}
                ]})),
            );

        let entries = adapter(&mock).list_contents("/", true).unwrap();
        let paths: Vec<&str> = entries.iter().map(StorageEntry::path).collect();
        assert_eq!(paths, vec!["/a", "/a/b.txt", "/readme.md"]);
        assert!(entries[0].is_directory());
        assert!(entries[1].is_file());
    }

    #[test]
    fn shallow_listing_does_not_descend() {
        let mock = MockExecutor::new().with_response(
            Method::GET,
            "drives/d1/items/root/children",
            MockExecutor::success_response(json!({"value": [
                {"id": "A", "name": "a", "folder": {}}
            ]})),
        );

        let entries = adapter(&mock).list_contents("", false).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(mock.recorded_requests().len(), 1);
    }

    #[test]
    fn move_to_root_is_rejected_before_any_request() {
        let mock = MockExecutor::new();
        let err = adapter(&mock).move_item("/a.txt", "/").unwrap_err();
        assert!(matches!(err, Error::InvalidDestination { .. }));
        assert!(mock.recorded_requests().is_empty());
    }

    #[test]
    fn copy_targets_resolved_parent() {
        let mock = MockExecutor::new()
            .with_response(
                Method::GET,
                "drives/d1/items/root:/a.txt",
                MockExecutor::success_response(json!({
                    "id": "SRC", "name": "a.txt", "webUrl": "https://drive.example/a.txt", "file": {}
                })),
            )
            .with_response(
                Method::GET,
                "drives/d1/items/root:/backup",
                MockExecutor::success_response(dir("BK", "backup")),
            )
            .with_response(
                Method::POST,
                "drives/d1/items/SRC/copy",
                MockExecutor::empty_response(202),
            );

        adapter(&mock).copy("/a.txt", "/backup/a.txt").unwrap();

        let posts = mock.requests_with_method(Method::POST);
        assert_eq!(posts.len(), 1);
        assert_eq!(
            posts[0].json_body(),
            Some(&json!({"parentReference": {"driveId": "d1", "id": "BK"}, "name": "a.txt"}))
        );
    }

    #[test]
    fn attributes_come_from_file_metadata() {
        let mock = MockExecutor::new().with_response(
            Method::GET,
            "drives/d1/items/root:/r.csv",
            MockExecutor::success_response(json!({
                "id": "F",
                "name": "r.csv",
                "webUrl": "https://drive.example/r.csv",
                "size": 2048,
                "lastModifiedDateTime": "2024-03-01T08:30:00Z",
                "file": {"mimeType": "text/csv"}
            })),
        );
        let adapter = adapter(&mock);

        let attrs = adapter.file_size("r.csv").unwrap();
        assert_eq!(attrs.path, "/r.csv");
        assert_eq!(attrs.size, Some(2048));
        assert_eq!(
            adapter.mime_type("/r.csv").unwrap().mime_type.as_deref(),
            Some("text/csv")
        );
        assert_eq!(
            adapter
                .last_modified("/r.csv")
                .unwrap()
                .last_modified
                .map(|t| t.to_rfc3339()),
            Some("2024-03-01T08:30:00+00:00".to_string())
        );
    }

    #[test]
    fn attributes_of_missing_file_are_not_found() {
        let mock = MockExecutor::new();
        let err = adapter(&mock).file_size("/ghost").unwrap_err();
        assert!(matches!(err, Error::Drive(DriveError::NotFound { .. })));
        assert_eq!(err.code(), 404);
    }

    #[test]
    fn directory_delete_failure_is_false_not_error() {
        let mock = MockExecutor::new();
        assert!(!adapter(&mock).delete_directory("/ghost").unwrap());
    }

    #[test]
    fn root_directory_is_never_deleted() {
        let mock = MockExecutor::new().with_response(
            Method::DELETE,
            "drives/d1/items/root",
            MockExecutor::empty_response(204),
        );
        assert!(!adapter(&mock).delete_directory("/").unwrap());
        assert!(mock.recorded_requests().is_empty());
    }

    #[test]
    fn create_directory_returns_deepest_item() {
        let mock = MockExecutor::new()
            .with_response(
                Method::GET,
                "drives/d1/items/root:/a",
                MockExecutor::success_response(dir("A", "a")),
            )
            .with_response(
                Method::POST,
                "drives/d1/items/A/children",
                MockExecutor::created_response(dir("B", "b")),
            );

        let item = adapter(&mock).create_directory("/a/b").unwrap();
        assert_eq!(item.id, "B");
    }
}
