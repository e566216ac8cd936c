//! Unit tests for user reference data.
