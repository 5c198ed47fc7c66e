//! Storage layer
//!
//! One in-memory map store per process, constructed at startup and handed
//! to the router through `AppState`.

pub mod memory;

pub use memory::MemStore;
