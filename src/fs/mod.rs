//! Filesystem helpers.

pub mod naming;

pub use naming::hashed_filename;
