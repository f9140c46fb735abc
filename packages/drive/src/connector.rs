//! Wiring the services to one drive.

use std::sync::Arc;

use drivefs_http::{HttpExecutor, ReqwestExecutor};

use crate::client::DriveClient;
use crate::config::DriveConfig;
use crate::directory::DirectoryService;
use crate::error::DriveError;
use crate::file::FileService;

/// Directory and file services sharing one client.
///
/// The drive id and token come in through [`DriveConfig`]; nothing is held
/// globally, and no state is kept between calls.
#[derive(Clone)]
pub struct DriveConnector {
    client: DriveClient,
    directory: DirectoryService,
    file: FileService,
}

impl DriveConnector {
    /// Connect with the production reqwest transport.
    pub fn new(config: &DriveConfig) -> Result<Self, DriveError> {
        config.validate()?;
        let executor = ReqwestExecutor::new(&config.transport)?;
        tracing::debug!(drive = %config.drive_id, base_url = %executor.base_url(), "connector ready");
        Ok(Self::with_executor(Arc::new(executor), config.drive_id.clone()))
    }

    /// Connect through any executor, e.g. a mock in tests.
    pub fn with_executor(executor: Arc<dyn HttpExecutor>, drive_id: impl Into<String>) -> Self {
        let client = DriveClient::new(executor, drive_id);
        Self {
            directory: DirectoryService::new(client.clone()),
            file: FileService::new(client.clone()),
            client,
        }
    }

    pub fn drive_id(&self) -> &str {
        self.client.drive_id()
    }

    pub fn directory(&self) -> &DirectoryService {
        &self.directory
    }

    pub fn file(&self) -> &FileService {
        &self.file
    }
}
