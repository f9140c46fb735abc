use drivefs_drive::DriveError;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Drive(#[from] DriveError),

    #[error("destination '{path}' does not name an item below the root")]
    InvalidDestination { path: String },
}

impl Error {
    /// Numeric diagnostic code, shared with [`DriveError::code`].
    pub fn code(&self) -> u32 {
        match self {
            Error::Drive(e) => e.code(),
            Error::InvalidDestination { .. } => 2300,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
