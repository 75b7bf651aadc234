//! Taskboard: client-side state synchronizer for a kanban task board.
//!
//! A board is a sequence of lanes, each holding an ordered sequence of tasks.
//! The board is persisted by a REST service; this crate keeps an in-memory
//! mirror of it and routes every mutation through the service, patching the
//! mirror only with what the service confirms.
//!
//! # Architecture
//!
//! Taskboard follows hexagonal architecture principles:
//!
//! - **Domain**: Board, lane and task types with their invariants
//! - **Ports**: The remote board service contract
//! - **Adapters**: HTTP and in-memory implementations of that contract
//!
//! # Modules
//!
//! - [`board`]: Entity model, service port, adapters and the synchronizer
//! - [`config`]: Layered configuration
//! - [`telemetry`]: Tracing subscriber setup for host applications

pub mod board;
pub mod config;
pub mod telemetry;
