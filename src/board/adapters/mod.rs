//! Adapter implementations for board service ports.

pub mod http;
pub mod memory;
