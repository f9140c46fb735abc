//! File operations, plus move and copy for any item kind.

use drivefs_http::HttpRequest;

use crate::address::{self, ItemAddress};
use crate::client::DriveClient;
use crate::error::DriveError;
use crate::item::{ItemKind, RemoteItem, Resolution};
use crate::resolver::{expect_kind, PathResolver};

/// Content type used when a write does not name one.
pub const DEFAULT_MIME_TYPE: &str = "text/plain";

#[derive(Clone)]
pub struct FileService {
    client: DriveClient,
    resolver: PathResolver,
}

impl FileService {
    pub fn new(client: DriveClient) -> Self {
        let resolver = PathResolver::new(client.clone());
        Self { client, resolver }
    }

    pub fn resolver(&self) -> &PathResolver {
        &self.resolver
    }

    pub fn check_file_exists(&self, address: &ItemAddress) -> Result<bool, DriveError> {
        self.resolver.check_file_exists(address)
    }

    /// Metadata of an existing file.
    pub fn file_metadata(&self, address: &ItemAddress) -> Result<RemoteItem, DriveError> {
        self.resolver.require_kind(address, ItemKind::File)
    }

    pub fn read_file(&self, address: &ItemAddress) -> Result<Vec<u8>, DriveError> {
        let url = self.client.url(address, Some("/content"));
        let response = self.client.send(&HttpRequest::get(url))?;
        Ok(response.bytes)
    }

    /// Upload `content` to `path`, replacing any existing file.
    pub fn write_file(
        &self,
        path: &str,
        content: Vec<u8>,
        mime_type: &str,
    ) -> Result<RemoteItem, DriveError> {
        if address::is_root(path) {
            return Err(DriveError::config("cannot write file content to the root"));
        }

        let url = self.client.url(&ItemAddress::path(path), Some("/content"));
        let size = content.len();
        let request = HttpRequest::put(url).with_bytes(content, mime_type);

        let response = self.client.send(&request)?;
        let item = RemoteItem::from_metadata(&response.body)?;
        tracing::debug!(path = %path, id = %item.id, size, "wrote file");
        Ok(item)
    }

    /// Delete an item. Unlike directory deletion, failures propagate.
    pub fn delete_file(&self, address: &ItemAddress) -> Result<(), DriveError> {
        if address.is_root() {
            return Err(DriveError::config("cannot delete the root"));
        }
        let url = self.client.url(address, None);
        self.client.send(&HttpRequest::delete(url))?;
        Ok(())
    }

    /// Move `source` into `parent_path` under the name `name`.
    ///
    /// A path-addressed source is resolved once to its id; an id address is
    /// used directly. The destination parent must already exist.
    pub fn move_item(
        &self,
        source: &ItemAddress,
        parent_path: &str,
        name: &str,
    ) -> Result<RemoteItem, DriveError> {
        let source_id = self.resolver.resolve_id(source)?;
        let parent = self.destination_parent(parent_path)?;

        let url = self.client.url(&ItemAddress::id(&source_id), None);
        let request = HttpRequest::patch(url).with_json_body(serde_json::json!({
            "parentReference": {"id": parent.id},
            "name": name,
        }));

        let response = self.client.send(&request)?;
        let item = RemoteItem::from_metadata(&response.body)?;
        tracing::debug!(%source, parent = %parent_path, name = %name, "moved item");
        Ok(item)
    }

    /// Copy `source` into `parent_path` under the name `name`.
    ///
    /// The backend copies asynchronously; the returned value is its
    /// monitor URL when one was provided.
    pub fn copy_item(
        &self,
        source: &ItemAddress,
        parent_path: &str,
        name: &str,
    ) -> Result<Option<String>, DriveError> {
        let source_id = self.resolver.resolve_id(source)?;
        let parent = self.destination_parent(parent_path)?;

        let url = self.client.url(&ItemAddress::id(&source_id), Some("/copy"));
        let request = HttpRequest::post(url).with_json_body(serde_json::json!({
            "parentReference": {"driveId": self.client.drive_id(), "id": parent.id},
            "name": name,
        }));

        let response = self.client.send(&request)?;
        tracing::debug!(%source, parent = %parent_path, name = %name, "copy accepted");
        Ok(response.headers.get("location").cloned())
    }

    /// Move `source` to the full `destination` path.
    pub fn move_to(
        &self,
        source: &ItemAddress,
        destination: &str,
    ) -> Result<RemoteItem, DriveError> {
        let (parent_path, name) = address::split_parent(destination);
        self.move_item(source, &parent_path, &name)
    }

    /// Copy `source` to the full `destination` path.
    pub fn copy_to(
        &self,
        source: &ItemAddress,
        destination: &str,
    ) -> Result<Option<String>, DriveError> {
        let (parent_path, name) = address::split_parent(destination);
        self.copy_item(source, &parent_path, &name)
    }

    fn destination_parent(&self, parent_path: &str) -> Result<RemoteItem, DriveError> {
        let address = ItemAddress::path(parent_path);
        match self.resolver.fetch_metadata(&address)? {
            Resolution::Found(parent) => {
                expect_kind(&address, &parent, ItemKind::Directory)?;
                Ok(parent)
            }
            Resolution::NotFound => Err(DriveError::ParentNotFound {
                path: address.to_string(),
            }),
        }
    }
}
