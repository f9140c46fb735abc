//! Creating missing directory chains one level at a time.
//!
//! The walk resolves path prefixes left to right. Once a prefix is missing,
//! every deeper prefix must be missing too, so the remaining segments are
//! created directly, each parented to the id the previous create returned.
//! A failure part-way leaves already-created directories in place.

use drivefs_http::HttpRequest;

use crate::address::{self, ItemAddress};
use crate::client::DriveClient;
use crate::error::DriveError;
use crate::item::{ItemKind, RemoteItem, Resolution};
use crate::resolver::{expect_kind, PathResolver};

#[derive(Clone)]
pub struct DirectoryMaterializer {
    resolver: PathResolver,
}

impl DirectoryMaterializer {
    pub fn new(resolver: PathResolver) -> Self {
        Self { resolver }
    }

    fn client(&self) -> &DriveClient {
        self.resolver.client()
    }

    /// Create the single directory named by the last segment of `path`.
    ///
    /// When `parent_id` is `None` the parent is resolved by path first; a
    /// missing parent is [`DriveError::ParentNotFound`]. Never creates more
    /// than one level.
    pub fn create_directory(
        &self,
        path: &str,
        parent_id: Option<&str>,
    ) -> Result<RemoteItem, DriveError> {
        if address::is_root(path) {
            return Err(DriveError::CreateRoot);
        }

        let (parent_path, name) = address::split_parent(path);

        let parent_id = match parent_id {
            Some(id) => id.to_string(),
            None => match self.resolver.fetch_metadata(&ItemAddress::path(&parent_path))? {
                Resolution::Found(parent) => parent.id,
                Resolution::NotFound => {
                    return Err(DriveError::ParentNotFound { path: parent_path })
                }
            },
        };

        self.create_child(&parent_id, &name)
    }

    /// POST one directory named `name` under `parent_id`.
    fn create_child(&self, parent_id: &str, name: &str) -> Result<RemoteItem, DriveError> {
        let url = self
            .client()
            .url(&ItemAddress::id(parent_id), Some("/children"));
        let request = HttpRequest::post(url).with_json_body(serde_json::json!({
            "name": name,
            "directory": {},
        }));

        let response = self.client().send(&request)?;
        let item = RemoteItem::from_metadata(&response.body)?;
        tracing::info!(name = %name, id = %item.id, parent = %parent_id, "created directory");
        Ok(item)
    }

    /// Ensure every segment of `path` exists as a directory and return the
    /// deepest one.
    ///
    /// Segments that already exist cost one lookup each and are never
    /// re-created, so running this twice on the same path creates nothing
    /// the second time.
    pub fn create_recursive(&self, path: &str) -> Result<RemoteItem, DriveError> {
        if address::is_root(path) {
            return Err(DriveError::CreateRoot);
        }

        let mut build_path = String::new();
        let mut parent_id: Option<String> = None;
        let mut creating = false;
        let mut deepest: Option<RemoteItem> = None;

        for segment in address::segments(path) {
            build_path.push('/');
            build_path.push_str(segment);

            // An empty interior segment is never looked up; the create call
            // below hands it to the backend as-is.
            if !creating && segment.is_empty() {
                creating = true;
            }

            if !creating {
                let prefix = ItemAddress::path(&build_path);
                match self.resolver.fetch_metadata(&prefix)? {
                    Resolution::Found(item) => {
                        expect_kind(&prefix, &item, ItemKind::Directory)?;
                        tracing::debug!(prefix = %build_path, id = %item.id, "segment exists");
                        parent_id = Some(item.id.clone());
                        deepest = Some(item);
                        continue;
                    }
                    Resolution::NotFound => {
                        tracing::debug!(prefix = %build_path, "first missing segment");
                        creating = true;
                    }
                }
            }

            let created = match parent_id.as_deref() {
                Some(parent) => self.create_child(parent, segment),
                None => self.create_directory(&build_path, None),
            }
            .map_err(|source| DriveError::CreateRecursive {
                path: build_path.clone(),
                source: Box::new(source),
            })?;

            parent_id = Some(created.id.clone());
            deepest = Some(created);
        }

        deepest.ok_or(DriveError::CreateRoot)
    }
}
