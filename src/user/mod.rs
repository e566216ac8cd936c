//! User reference data for the task board.
//!
//! Users are immutable reference records resolved by identifier. A single
//! [`ports::UserDirectory`] owns the collection and is the only place where
//! users are registered or profiles are edited; consumers receive a handle to
//! the directory rather than a shared mutable list.
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]

pub mod adapters;
pub mod domain;
pub mod ports;

#[cfg(test)]
mod tests;
