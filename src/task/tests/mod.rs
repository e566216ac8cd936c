//! Unit tests for the task board state.
