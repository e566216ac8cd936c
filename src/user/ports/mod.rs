//! Port contracts for user reference data.

pub mod directory;

pub use directory::{UserDirectory, UserDirectoryError, UserDirectoryResult};
