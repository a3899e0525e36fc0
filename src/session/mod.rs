//! Session settings persistence.
//!
//! This module handles:
//! - The typed JSON codec with tagged binary values
//! - Loading and saving the settings cache file

pub mod codec;
pub mod store;

pub use codec::SessionValue;
pub use store::{load, save, SessionState};
