//! Directory operations.

use drivefs_http::HttpRequest;

use crate::address::ItemAddress;
use crate::client::DriveClient;
use crate::error::{DriveError, Payload};
use crate::item::{ItemKind, RemoteItem};
use crate::materializer::DirectoryMaterializer;
use crate::resolver::PathResolver;

/// Directory-side operation surface: existence, listing, creation, deletion.
#[derive(Clone)]
pub struct DirectoryService {
    client: DriveClient,
    resolver: PathResolver,
    materializer: DirectoryMaterializer,
}

impl DirectoryService {
    pub fn new(client: DriveClient) -> Self {
        let resolver = PathResolver::new(client.clone());
        let materializer = DirectoryMaterializer::new(resolver.clone());
        Self {
            client,
            resolver,
            materializer,
        }
    }

    pub fn resolver(&self) -> &PathResolver {
        &self.resolver
    }

    pub fn check_directory_exists(&self, address: &ItemAddress) -> Result<bool, DriveError> {
        self.resolver.check_directory_exists(address)
    }

    pub fn directory_metadata(&self, address: &ItemAddress) -> Result<RemoteItem, DriveError> {
        self.resolver.require_kind(address, ItemKind::Directory)
    }

    /// List the direct children of a directory, following pagination links.
    ///
    /// The root is listed through its well-known address. Any other path is
    /// resolved to an id first, so listing a missing path is
    /// [`DriveError::NotFound`] and listing a file is a kind mismatch.
    pub fn list_items(&self, address: &ItemAddress) -> Result<Vec<RemoteItem>, DriveError> {
        let target = match address {
            ItemAddress::ByPath(_) if !address.is_root() => {
                ItemAddress::id(self.directory_metadata(address)?.id)
            }
            _ => address.clone(),
        };

        let mut next = Some(self.client.url(&target, Some("/children")));
        let mut items = Vec::new();

        while let Some(url) = next.take() {
            let page = self.client.get_json(&url)?;

            let entries = page
                .get("value")
                .and_then(|v| v.as_array())
                .ok_or(DriveError::MalformedResponse {
                    payload: Payload::Listing,
                    field: "value",
                })?;

            for entry in entries {
                items.push(RemoteItem::from_listing_entry(entry)?);
            }

            next = page
                .get("@odata.nextLink")
                .and_then(|v| v.as_str())
                .map(str::to_string);
        }

        tracing::debug!(%address, count = items.len(), "listed directory");
        Ok(items)
    }

    /// Create `path` and any missing ancestors.
    pub fn create_directory(&self, path: &str) -> Result<RemoteItem, DriveError> {
        self.materializer.create_recursive(path)
    }

    /// Best-effort delete: a failed DELETE returns `false`. The root is
    /// never deleted.
    pub fn delete_directory(&self, address: &ItemAddress) -> bool {
        if address.is_root() {
            tracing::warn!("refusing to delete the drive root");
            return false;
        }

        let url = self.client.url(address, None);
        match self.client.send(&HttpRequest::delete(url)) {
            Ok(_) => true,
            Err(e) => {
                tracing::warn!(%address, error = %e, "directory delete failed");
                false
            }
        }
    }

    /// [`delete_directory`](Self::delete_directory) from optional path/id
    /// inputs. Giving neither is still a hard error.
    pub fn delete_directory_at(
        &self,
        path: Option<&str>,
        id: Option<&str>,
    ) -> Result<bool, DriveError> {
        let address = ItemAddress::resolve(path, id)?;
        Ok(self.delete_directory(&address))
    }
}
