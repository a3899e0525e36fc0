//! Settings-file persistence for session state.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde_json::Value;

use crate::error::{Error, Result};
use crate::session::codec::SessionValue;

/// Well-known session field names.
pub mod keys {
    pub const DEVICE_ID: &str = "device_id";
    pub const GUID: &str = "guid";
    pub const USER_ID: &str = "user_id";
    pub const CSRF_TOKEN: &str = "csrftoken";
    pub const COOKIE: &str = "cookie";
    pub const AUTH_EXPIRES: &str = "auth_expires";
}

/// Opaque session state: cookies, device identifiers and related fields,
/// persisted verbatim between runs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionState {
    fields: BTreeMap<String, SessionValue>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: SessionValue) {
        self.fields.insert(key.into(), value);
    }

    pub fn get(&self, key: &str) -> Option<&SessionValue> {
        self.fields.get(key)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Device identifier carried across re-logins.
    pub fn device_id(&self) -> Option<&str> {
        self.get(keys::DEVICE_ID).and_then(SessionValue::as_str)
    }

    /// Raw cookie blob, if present.
    pub fn cookie(&self) -> Option<&[u8]> {
        self.get(keys::COOKIE).and_then(SessionValue::as_bytes)
    }

    pub fn csrf_token(&self) -> Option<&str> {
        self.get(keys::CSRF_TOKEN).and_then(SessionValue::as_str)
    }

    /// Unix timestamp at which the auth cookie expires.
    pub fn auth_expires(&self) -> Option<i64> {
        self.get(keys::AUTH_EXPIRES).and_then(SessionValue::as_i64)
    }

    /// Encode the whole state as a JSON object.
    pub fn to_json(&self) -> Value {
        SessionValue::Map(self.fields.clone()).to_json()
    }

    /// Decode state from a JSON object.
    pub fn from_json(value: &Value) -> Result<Self> {
        match SessionValue::from_json(value)? {
            SessionValue::Map(fields) => Ok(Self { fields }),
            _ => Err(Error::Session(
                "settings file must contain a JSON object".to_string(),
            )),
        }
    }
}

/// Load cached session state, or `None` if the file does not exist.
///
/// A file that exists but fails to parse is a fatal error.
pub fn load(path: &Path) -> Result<Option<SessionState>> {
    if !path.is_file() {
        return Ok(None);
    }

    let content = fs::read_to_string(path)?;
    let value: Value = serde_json::from_str(&content)?;
    let state = SessionState::from_json(&value)?;

    tracing::debug!("loaded session settings from {}", path.display());
    Ok(Some(state))
}

/// Persist session state, overwriting any existing file.
pub fn save(path: &Path, state: &SessionState) -> Result<()> {
    let content = serde_json::to_string(&state.to_json())?;
    fs::write(path, content)?;

    tracing::debug!("saved session settings to {}", path.display());
    Ok(())
}
