//! # drivefs-adapter
//!
//! A generic path-based filesystem contract, [`FilesystemAdapter`], and
//! [`DriveAdapter`], which implements it over a drive's directory and file
//! services.
//!
//! ```ignore
//! use drivefs_adapter::{DriveAdapter, FilesystemAdapter, WriteOptions};
//! use drivefs_drive::{DriveConfig, DriveConnector};
//!
//! let adapter = DriveAdapter::new(DriveConnector::new(&DriveConfig::from_env()?)?);
//! adapter.create_directory("/reports/2024")?;
//! adapter.write("/reports/2024/q1.csv", csv, &WriteOptions::new().with_mime_type("text/csv"))?;
//! ```
//!
//! Streaming reads and writes and visibility are not part of the contract.

mod adapter;
mod attributes;
mod error;

pub use adapter::{DriveAdapter, FilesystemAdapter};
pub use attributes::{DirectoryAttributes, FileAttributes, StorageEntry, WriteOptions};
pub use error::{Error, Result};
