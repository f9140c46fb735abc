//! # drivefs-drive
//!
//! Path-oriented filesystem operations over an id-addressed drive.
//!
//! The backend only creates children under a known parent id, so
//! hierarchical paths have to be resolved one level at a time.
//! [`PathResolver`] turns paths or ids into item metadata,
//! [`DirectoryMaterializer`] creates missing directory chains, and
//! [`DirectoryService`] / [`FileService`] expose the full operation surface.
//!
//! ```ignore
//! use drivefs_drive::{DriveConfig, DriveConnector, ItemAddress};
//!
//! let connector = DriveConnector::new(&DriveConfig::from_env()?)?;
//! let leaf = connector.directory().create_directory("/reports/2024/q1")?;
//! let items = connector.directory().list_items(&ItemAddress::path("/reports"))?;
//! ```
//!
//! No item metadata is cached. Every call re-resolves from the backend.

pub mod address;
pub mod client;
pub mod config;
pub mod connector;
pub mod directory;
pub mod error;
pub mod file;
pub mod item;
pub mod materializer;
pub mod resolver;

#[cfg(test)]
mod test_support;

pub use address::{ItemAddress, ROOT};
pub use client::DriveClient;
pub use config::DriveConfig;
pub use connector::DriveConnector;
pub use directory::DirectoryService;
pub use error::{DriveError, Payload, ITEM_NOT_FOUND};
pub use file::{FileService, DEFAULT_MIME_TYPE};
pub use item::{ItemKind, RemoteItem, Resolution};
pub use materializer::DirectoryMaterializer;
pub use resolver::PathResolver;
