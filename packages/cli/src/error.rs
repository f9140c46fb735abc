use std::path::PathBuf;

use drivefs_drive::DriveError;

#[derive(thiserror::Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Adapter(#[from] drivefs_adapter::Error),

    #[error(transparent)]
    Drive(#[from] DriveError),

    #[error("cannot read {}: {source}", path.display())]
    LocalRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot write output: {0}")]
    Output(#[from] std::io::Error),

    #[error("cannot render output: {0}")]
    Render(#[from] serde_json::Error),
}

impl CliError {
    /// The numeric code printed as `Error [<code>]`.
    pub fn code(&self) -> u32 {
        match self {
            CliError::Adapter(e) => e.code(),
            CliError::Drive(e) => e.code(),
            CliError::LocalRead { .. } | CliError::Output(_) | CliError::Render(_) => 1,
        }
    }
}
