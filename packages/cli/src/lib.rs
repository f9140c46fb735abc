//! `drivefs`: a command-line front end over [`DriveAdapter`].
//!
//! Connection settings come from flags, falling back to the `DRIVEFS_*`
//! environment variables.

mod commands;
mod error;

use std::time::Duration;

use clap::builder::BoolishValueParser;
use clap::Parser;

use drivefs_adapter::DriveAdapter;
use drivefs_drive::config::{
    ENV_ACCESS_TOKEN, ENV_BASE_URL, ENV_DRIVE_ID, ENV_TIMEOUT_SECS, ENV_VERIFY_TLS,
};
use drivefs_drive::{DriveConfig, DriveConnector};

pub use commands::{execute, Command};
pub use error::CliError;

/// drivefs - path-based access to a remote drive
#[derive(Parser, Debug)]
#[command(name = "drivefs")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Bearer token sent with every request
    #[arg(long, env = ENV_ACCESS_TOKEN, hide_env_values = true)]
    pub token: Option<String>,

    /// Id of the drive to operate on
    #[arg(long, env = ENV_DRIVE_ID)]
    pub drive: Option<String>,

    /// API base URL
    #[arg(long, env = ENV_BASE_URL)]
    pub base_url: Option<String>,

    /// Request timeout in seconds
    #[arg(long, env = ENV_TIMEOUT_SECS)]
    pub timeout_secs: Option<u64>,

    /// Verify TLS certificates (true/false, yes/no, on/off, 1/0)
    #[arg(long, env = ENV_VERIFY_TLS, value_parser = BoolishValueParser::new())]
    pub verify_tls: Option<bool>,

    #[command(subcommand)]
    pub command: Command,
}

impl Args {
    /// Connection settings from the parsed flags.
    pub fn drive_config(&self) -> Result<DriveConfig, CliError> {
        let mut config = DriveConfig::from_lookup(|key| match key {
            ENV_ACCESS_TOKEN => self.token.clone(),
            ENV_DRIVE_ID => self.drive.clone(),
            ENV_BASE_URL => self.base_url.clone(),
            _ => None,
        })?;

        if let Some(secs) = self.timeout_secs {
            config = config.with_timeout(Duration::from_secs(secs));
        }
        if let Some(verify_tls) = self.verify_tls {
            config = config.with_verify_tls(verify_tls);
        }
        Ok(config)
    }
}

/// Connect and run one command, writing its output to stdout.
pub fn run(args: Args) -> Result<(), CliError> {
    let config = args.drive_config()?;
    let adapter = DriveAdapter::new(DriveConnector::new(&config)?);
    tracing::debug!(drive = %config.drive_id, command = ?args.command, "running command");

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    execute(&adapter, &args.command, &mut out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_build_the_drive_config() {
        let args = Args::try_parse_from([
            "drivefs",
            "--token",
            "tok",
            "--drive",
            "d1",
            "--base-url",
            "http://localhost:8080/v1.0",
            "--timeout-secs",
            "7",
            "--verify-tls",
            "no",
            "ls",
            "/",
        ])
        .unwrap();

        let config = args.drive_config().unwrap();
        assert_eq!(config.drive_id, "d1");
        assert_eq!(config.transport.base_url, "http://localhost:8080/v1.0");
        assert_eq!(config.transport.timeout.as_secs(), 7);
        assert!(!config.transport.verify_tls);
    }

    #[test]
    fn typed_flags_reject_bad_values() {
        let base = ["drivefs", "--token", "tok", "--drive", "d1"];

        let mut argv = base.to_vec();
        argv.extend(["--timeout-secs", "soon", "ls"]);
        assert!(Args::try_parse_from(argv).is_err());

        let mut argv = base.to_vec();
        argv.extend(["--verify-tls", "maybe", "ls"]);
        assert!(Args::try_parse_from(argv).is_err());
    }

    #[test]
    fn unset_flags_keep_transport_defaults() {
        let args = Args::try_parse_from(["drivefs", "--token", "t", "--drive", "d", "ls"]).unwrap();
        let config = args.drive_config().unwrap();
        let defaults = DriveConfig::new("t", "d");
        assert_eq!(config.transport.timeout, defaults.transport.timeout);
        assert!(config.transport.verify_tls);
    }

    #[test]
    fn missing_drive_is_a_configuration_error() {
        let args = Args {
            token: Some("tok".to_string()),
            drive: None,
            base_url: None,
            timeout_secs: None,
            verify_tls: None,
            command: Command::Cat {
                path: "/a".to_string(),
            },
        };

        let err = args.drive_config().unwrap_err();
        assert_eq!(err.code(), 2300);
        assert!(err.to_string().contains(ENV_DRIVE_ID));
    }
}
