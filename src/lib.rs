//! This file is the root of the `fissures_core` Rust crate.
//!
//! Its responsibilities are strictly limited to:
//! 1.  Declaring all the top-level modules of our library (`pipeline`, `kernels`, etc.)
//!     so the Rust compiler knows they exist.
//! 2.  Re-exporting the handful of names most callers need, so that
//!     `use fissures_core::{Client, Assembler, Trace}` just works.

//==================================================================================
// 0. Constants
//==================================================================================
/// The crate version, automatically set from Cargo.toml at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
//==================================================================================
// 1. Module Declarations
//==================================================================================
#[macro_use]
mod observability; // Make macros available throughout the crate

pub mod bridge;
pub mod client;
pub mod config;
pub mod directory;
pub mod error;
pub mod kernels;
pub mod metadata;
pub mod pipeline;
pub mod time;
pub mod types;

//==================================================================================
// 2. Public Surface
//==================================================================================
pub use client::Client;
pub use config::{AssemblyConfig, ErrorPolicy, ExecutionMode, FissuresConfig, LoggingConfig};
pub use directory::{DirectoryService, StaticDirectory};
pub use error::{DirectoryError, FissuresError};
pub use kernels::{NativeSteimCodec, SteimCodec};
pub use metadata::{
    extract_coordinates, extract_pole_zero, Extraction, MetadataWarning, PoleZeroConverter,
    StandardPoleZeroConverter,
};
pub use observability::init_logging;
pub use pipeline::{assemble, Assembler, AssemblyReport, RecordFailure};
pub use types::Trace;
