//! Adapters between files on disk and the in-memory model.

pub mod report;
pub mod xlsx;
