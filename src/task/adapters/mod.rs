//! Adapter implementations for task board ports.

pub mod logging;
pub mod memory;
