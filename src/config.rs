// In: src/config.rs

//! The single source of truth for fissures core configuration.
//!
//! `FissuresConfig` is created once at the application boundary (e.g. from a
//! JSON file) and handed to the `Client`/`Assembler`, which keep the assembly
//! part behind a shared, read-only `Arc<AssemblyConfig>`.

use serde::{Deserialize, Serialize};

use crate::error::FissuresError;
use crate::types::ByteOrder;

//==================================================================================
// I. Assembly Configuration
//==================================================================================

/// How a batch of records reacts to a failing record.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ErrorPolicy {
    /// **Default:** stop at the first failing record and return its error.
    #[default]
    FailFast,

    /// Assemble every record; failures are reported next to the successful traces.
    CollectErrors,
}

/// Where per-record decoding runs.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum ExecutionMode {
    /// **Default:** records are decoded one after another on the calling thread.
    #[default]
    Sequential,

    /// Records are spread across scoped worker threads. Output order still
    /// follows input record order.
    Parallel {
        #[serde(default = "default_workers")]
        workers: usize,
    },
}

fn default_workers() -> usize {
    4
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AssemblyConfig {
    /// Byte order the decode calls treat as "native". Defaults to the build target's.
    #[serde(default)]
    pub host_byte_order: ByteOrder,

    #[serde(default)]
    pub error_policy: ErrorPolicy,

    #[serde(default)]
    pub execution: ExecutionMode,
}

//==================================================================================
// II. Logging Configuration
//==================================================================================

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    /// A `log::LevelFilter` name: off, error, warn, info, debug, trace.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Appends log lines to this file instead of stderr.
    #[serde(default)]
    pub log_file: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            log_file: None,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

//==================================================================================
// III. The Unified FissuresConfig
//==================================================================================

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct FissuresConfig {
    #[serde(default)]
    pub assembly: AssemblyConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl FissuresConfig {
    pub fn from_json_str(json: &str) -> Result<Self, FissuresError> {
        Ok(serde_json::from_str(json)?)
    }
}
