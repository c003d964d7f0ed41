//! Logging hooks for the assembly pipeline.
//!
//! The `log_metric!` macro emits one structured key/value line per event at
//! debug level, so decoding and assembly decisions can be traced without a
//! debugger. `init_logging` installs an `env_logger` backend once per process.

use log::LevelFilter;
use std::fs::OpenOptions;
use std::str::FromStr;
use std::sync::Once;

use crate::config::LoggingConfig;
use crate::error::FissuresError;

/// Logs a structured key-value metric line at debug level.
///
/// # Example
/// ```ignore
/// log_metric!("event" = "decode_chunk", "encoding" = "STEIM2", "samples" = &412);
/// ```
macro_rules! log_metric {
    ($($key:literal = $value:expr),+ $(,)?) => {
        if log::log_enabled!(log::Level::Debug) {
            let mut parts = Vec::new();
            $(
                parts.push(format!("\"{}\": \"{}\"", $key, $value));
            )+
            log::debug!("FISSURES_METRIC: {{ {} }}", parts.join(", "));
        }
    };
}

static INIT_LOGGER: Once = Once::new();

/// Installs the process-wide logger described by `config`.
///
/// Only the first call has an effect. An unknown level name or an unopenable
/// log file is reported as an error and nothing is installed.
pub fn init_logging(config: &LoggingConfig) -> Result<(), FissuresError> {
    let level = LevelFilter::from_str(&config.level).map_err(|_| {
        FissuresError::InternalError(format!("Unknown log level '{}'", config.level))
    })?;

    let target = match &config.log_file {
        Some(path) => Some(OpenOptions::new().append(true).create(true).open(path)?),
        None => None,
    };

    INIT_LOGGER.call_once(|| {
        let mut builder = env_logger::Builder::new();
        builder.filter_level(level);

        // Custom formatter: just print the level and message
        builder.format(|buf, record| {
            use std::io::Write;
            writeln!(buf, "[{}] {}", record.level(), record.args())
        });

        if let Some(file) = target {
            builder.target(env_logger::Target::Pipe(Box::new(file)));
        }

        let _ = builder.try_init();
    });
    Ok(())
}
