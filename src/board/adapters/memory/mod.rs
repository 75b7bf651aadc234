//! In-memory adapter for the board service port.

mod service;

pub use service::InMemoryBoardService;
