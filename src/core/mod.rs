//! Core components of the `finviz-sync` crate.
//!
//! This module contains the foundational building blocks of the library, including:
//! - The Finviz [`FinvizClient`] and its builder.
//! - The primary [`SyncError`] type.
//! - Internal networking and fixture-recording hooks.

/// The Finviz client (`FinvizClient`), builder, and default constants.
pub mod client;
/// The primary error type (`SyncError`) for the crate.
pub mod error;

#[cfg(feature = "dataframe")]
pub mod dataframe;

#[cfg(feature = "test-mode")]
pub(crate) mod fixtures;

pub(crate) mod net;

// convenient re-exports so most code can just `use crate::core::FinvizClient`
pub use client::constants::{
    DEFAULT_REQUEST_DELAY, FUNDAMENTALS_WORKSHEET, SNAPSHOT_TABLE_CLASS, TICKER_WORKSHEET,
};
pub use client::{FinvizClient, FinvizClientBuilder};
pub use error::SyncError;
