//! Resolving paths and ids to item metadata.

use crate::address::ItemAddress;
use crate::client::DriveClient;
use crate::error::DriveError;
use crate::item::{ItemKind, RemoteItem, Resolution};

/// Turns an [`ItemAddress`] into remote metadata or a definitive absence.
#[derive(Clone)]
pub struct PathResolver {
    client: DriveClient,
}

impl PathResolver {
    pub fn new(client: DriveClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &DriveClient {
        &self.client
    }

    /// GET the item's metadata.
    ///
    /// The backend's `itemNotFound` code maps to [`Resolution::NotFound`];
    /// every other failure propagates. A successful response missing `id`,
    /// `name` or `webUrl` is [`DriveError::MalformedResponse`].
    pub fn fetch_metadata(&self, address: &ItemAddress) -> Result<Resolution, DriveError> {
        let url = self.client.url(address, None);
        tracing::debug!(%address, "resolving item");

        match self.client.get_json(&url) {
            Ok(body) => Ok(Resolution::Found(RemoteItem::from_metadata(&body)?)),
            Err(e) if e.is_item_not_found() => Ok(Resolution::NotFound),
            Err(e) => Err(e),
        }
    }

    /// [`fetch_metadata`](Self::fetch_metadata) from optional path/id inputs.
    pub fn fetch_metadata_at(
        &self,
        path: Option<&str>,
        id: Option<&str>,
    ) -> Result<Resolution, DriveError> {
        let address = ItemAddress::resolve(path, id)?;
        self.fetch_metadata(&address)
    }

    pub fn check_exists(&self, address: &ItemAddress) -> Result<bool, DriveError> {
        Ok(self.fetch_metadata(address)?.is_found())
    }

    /// Whether a directory exists at `address`.
    ///
    /// A file at that address is a [`DriveError::KindMismatch`], not `false`.
    pub fn check_directory_exists(&self, address: &ItemAddress) -> Result<bool, DriveError> {
        self.check_kind_exists(address, ItemKind::Directory)
    }

    /// Whether a file exists at `address`; a directory there is a kind mismatch.
    pub fn check_file_exists(&self, address: &ItemAddress) -> Result<bool, DriveError> {
        self.check_kind_exists(address, ItemKind::File)
    }

    fn check_kind_exists(
        &self,
        address: &ItemAddress,
        expected: ItemKind,
    ) -> Result<bool, DriveError> {
        match self.fetch_metadata(address)? {
            Resolution::Found(item) => {
                expect_kind(address, &item, expected)?;
                Ok(true)
            }
            Resolution::NotFound => Ok(false),
        }
    }

    /// Metadata for an item that must exist.
    pub fn require(&self, address: &ItemAddress) -> Result<RemoteItem, DriveError> {
        self.fetch_metadata(address)?
            .into_item()
            .ok_or_else(|| DriveError::NotFound {
                path: address.to_string(),
            })
    }

    /// Metadata for an item that must exist and be of `kind`.
    pub fn require_kind(
        &self,
        address: &ItemAddress,
        kind: ItemKind,
    ) -> Result<RemoteItem, DriveError> {
        let item = self.require(address)?;
        expect_kind(address, &item, kind)?;
        Ok(item)
    }

    /// The item's id. Id addresses are returned without a round trip.
    pub fn resolve_id(&self, address: &ItemAddress) -> Result<String, DriveError> {
        match address {
            ItemAddress::ById(id) => Ok(id.clone()),
            ItemAddress::ByPath(_) => Ok(self.require(address)?.id),
        }
    }
}

pub(crate) fn expect_kind(
    address: &ItemAddress,
    item: &RemoteItem,
    expected: ItemKind,
) -> Result<(), DriveError> {
    if item.kind == expected {
        Ok(())
    } else {
        Err(DriveError::KindMismatch {
            path: address.to_string(),
            expected,
            actual: item.kind,
        })
    }
}
