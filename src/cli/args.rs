//! Command-line argument definitions using clap.

use clap::Parser;
use std::path::PathBuf;

use crate::auth::Credentials;

/// Saved-collection downloader CLI.
#[derive(Parser, Debug)]
#[command(
    name = "ig-saved-downloader",
    version,
    about = "Download and clear your Instagram saved collection",
    long_about = "Authenticates against the Instagram private API, walks your saved \
                  collection, downloads the images to a directory and unsaves each item."
)]
pub struct Args {
    /// Directory the downloaded images are written to.
    #[arg(long = "target-dir")]
    pub target_dir: PathBuf,

    /// Path of the session settings cache file.
    #[arg(long)]
    pub settings: PathBuf,

    /// Instagram username.
    #[arg(short, long, env = "IG_USERNAME")]
    pub username: String,

    /// Instagram password.
    #[arg(short, long, env = "IG_PASSWORD")]
    pub password: String,

    /// Enable debug logging.
    #[arg(long)]
    pub debug: bool,
}

impl Args {
    /// Credentials from the parsed arguments.
    pub fn credentials(&self) -> Credentials {
        Credentials {
            username: self.username.clone(),
            password: self.password.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_flags_parse() {
        let args = Args::try_parse_from([
            "ig-saved-downloader",
            "--target-dir",
            "/tmp/out",
            "--settings",
            "/tmp/settings.json",
            "--username",
            "someuser",
            "--password",
            "hunter2",
        ])
        .unwrap();

        assert_eq!(args.target_dir, PathBuf::from("/tmp/out"));
        assert_eq!(args.settings, PathBuf::from("/tmp/settings.json"));
        assert_eq!(args.username, "someuser");
        assert!(!args.debug);
    }

    #[test]
    fn test_target_dir_is_required() {
        let result = Args::try_parse_from([
            "ig-saved-downloader",
            "--settings",
            "/tmp/settings.json",
            "--username",
            "someuser",
            "--password",
            "hunter2",
        ]);
        assert!(result.is_err());
    }
}
