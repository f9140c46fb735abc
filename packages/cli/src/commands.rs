//! Subcommands and their execution.

use std::io::Write;
use std::path::PathBuf;

use clap::Subcommand;

use drivefs_adapter::{FilesystemAdapter, StorageEntry, WriteOptions};

use crate::error::CliError;

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// List a directory
    Ls {
        #[arg(default_value = "/")]
        path: String,
        /// Recurse into subdirectories
        #[arg(long)]
        deep: bool,
    },
    /// Show a file's attributes as JSON
    Stat { path: String },
    /// Check whether a file (or, with --dir, a directory) exists
    Exists {
        path: String,
        #[arg(long)]
        dir: bool,
    },
    /// Create a directory and any missing parents
    Mkdir { path: String },
    /// Delete a directory
    Rmdir { path: String },
    /// Delete a file
    Rm { path: String },
    /// Print a file's content
    Cat { path: String },
    /// Upload a local file
    Put {
        local: PathBuf,
        remote: String,
        /// Content type of the upload
        #[arg(long)]
        mime: Option<String>,
    },
    /// Move an item; the destination's parent must exist
    Mv { source: String, destination: String },
    /// Copy an item; the destination's parent must exist
    Cp { source: String, destination: String },
}

/// Run `command` against `adapter`, writing human-readable output to `out`.
pub fn execute<A, W>(adapter: &A, command: &Command, out: &mut W) -> Result<(), CliError>
where
    A: FilesystemAdapter,
    W: Write,
{
    match command {
        Command::Ls { path, deep } => {
            for entry in adapter.list_contents(path, *deep)? {
                writeln!(out, "{}", format_entry(&entry))?;
            }
        }
        Command::Stat { path } => {
            let attributes = adapter.file_size(path)?;
            writeln!(out, "{}", serde_json::to_string_pretty(&attributes)?)?;
        }
        Command::Exists { path, dir } => {
            let exists = if *dir {
                adapter.directory_exists(path)?
            } else {
                adapter.file_exists(path)?
            };
            writeln!(out, "{}", exists)?;
        }
        Command::Mkdir { path } => {
            let item = adapter.create_directory(path)?;
            writeln!(out, "{}", item.id)?;
        }
        Command::Rmdir { path } => {
            if adapter.delete_directory(path)? {
                writeln!(out, "removed {}", path)?;
            } else {
                writeln!(out, "not removed {}", path)?;
            }
        }
        Command::Rm { path } => adapter.delete(path)?,
        Command::Cat { path } => {
            out.write_all(&adapter.read(path)?)?;
            out.flush()?;
        }
        Command::Put {
            local,
            remote,
            mime,
        } => {
            let contents = std::fs::read(local).map_err(|source| CliError::LocalRead {
                path: local.clone(),
                source,
            })?;
            let mut options = WriteOptions::new();
            if let Some(mime) = mime {
                options = options.with_mime_type(mime);
            }
            adapter.write(remote, contents, &options)?;
        }
        Command::Mv {
            source,
            destination,
        } => adapter.move_item(source, destination)?,
        Command::Cp {
            source,
            destination,
        } => adapter.copy(source, destination)?,
    }
    Ok(())
}

fn format_entry(entry: &StorageEntry) -> String {
    match entry {
        StorageEntry::Directory(d) => format!("dir   {}", d.path),
        StorageEntry::File(f) => match f.size {
            Some(size) => format!("file  {}  {} bytes", f.path, size),
            None => format!("file  {}", f.path),
        },
    }
}
