// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # neuroweave-observability
//!
//! Logging infrastructure shared by the Neuroweave crates and binaries, with
//! per-crate debug flag support.
//!
//! ## Features
//! - `file-logging`: rolling per-crate log files in timestamped run folders

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod cli;
pub mod config;
pub mod init;

// Re-export commonly used items
pub use cli::*;
pub use config::*;
pub use init::*;

/// Known Neuroweave crate names for debug flags
///
/// These double as the `target:` of the crates' log statements.
pub const KNOWN_CRATES: &[&str] = &[
    "neuroweave",
    "neuroweave-config",
    "neuroweave-neural",
    "neuroweave-plasticity",
    "neuroweave-engine",
];
