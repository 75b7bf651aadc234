//! HTTP adapter for the board service port.
//!
//! Routes follow the board backend's REST layout: `/board`, `/tasks`,
//! `/tasks/{id}`, `/tasks/{id}/move`, `/lanes` and `/lanes/{id}`.

mod client;

pub use client::HttpBoardService;
