//! Error types for the ig-saved-downloader application.

use thiserror::Error;

/// Main error type for the application.
#[derive(Error, Debug)]
pub enum Error {
    // Authentication errors
    #[error("Login failed: {0}")]
    Login(String),

    #[error("Session expired: {0}")]
    SessionExpired(String),

    // API errors
    #[error("API error (code {code}): {body}")]
    Api { code: u16, body: String },

    // Session settings errors
    #[error("Invalid session settings: {0}")]
    Session(String),

    // Download errors
    #[error("Download failed: {0}")]
    Download(String),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // HTTP errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    // Serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Map an error to its process exit code.
    ///
    /// Credential and client-protocol failures exit 9, everything else 99.
    pub fn exit_code(&self) -> u8 {
        match self {
            Error::Login(_) | Error::Api { .. } => exit_codes::CLIENT_ERROR,
            _ => exit_codes::UNEXPECTED_ERROR,
        }
    }
}

/// Process exit codes.
pub mod exit_codes {
    pub const SUCCESS: u8 = 0;
    pub const CLIENT_ERROR: u8 = 9;
    pub const UNEXPECTED_ERROR: u8 = 99;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_code_login_failure() {
        let err = Error::Login("bad_password".to_string());
        assert_eq!(err.exit_code(), 9);
    }

    #[test]
    fn test_exit_code_api_failure() {
        let err = Error::Api {
            code: 400,
            body: "{\"status\":\"fail\"}".to_string(),
        };
        assert_eq!(err.exit_code(), 9);
    }

    #[test]
    fn test_exit_code_unexpected() {
        let err = Error::Download("connection reset".to_string());
        assert_eq!(err.exit_code(), 99);

        let err = Error::Session("not a JSON object".to_string());
        assert_eq!(err.exit_code(), 99);
    }
}
