//! Task board state management.
//!
//! This module owns the canonical client-side task collection: loading it
//! from the remote collaborator, applying create, update, delete, status and
//! assignment changes optimistically, rolling them back when the remote call
//! fails, and recording an append-only audit trail. It follows hexagonal
//! architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
