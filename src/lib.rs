//! Taskboard: client-side state for a kanban task board.
//!
//! This crate provides the task store that mediates every task mutation
//! through optimistic local updates with rollback against an asynchronous
//! remote collaborator, and the pure projection that turns the task
//! collection into filtered, sorted board columns.
//!
//! # Architecture
//!
//! Taskboard follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (the mocked backend,
//!   notification sinks)
//!
//! # Modules
//!
//! - [`task`]: Task records, audit events and the optimistic task store
//! - [`user`]: User reference data owned by a single directory
//! - [`board`]: Filter, sort and group projection into board columns
//! - [`config`]: Layered store configuration
//! - [`fixtures`]: Seed data for the mocked backend

pub mod board;
pub mod config;
pub mod fixtures;
pub mod task;
pub mod user;
