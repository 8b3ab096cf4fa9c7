//! Core library for the cve-register-sync command line application.
//!
//! The library keeps an Excel vulnerability register in step with a JSON scan
//! report. Identities are extracted in [`identity`], the delete/insert plan is
//! derived in [`reconcile`] and applied to the in-memory [`model`] by
//! [`mutate`]. File adapters live under [`io`] and the end-to-end run is
//! orchestrated by [`sync`].

pub mod error;
pub mod identity;
pub mod io;
pub mod model;
pub mod mutate;
pub mod reconcile;
pub mod sync;

pub use error::{Result, ToolError};
