//! `axiomkit_log`:
//! process-wide `tracing` subscriber setup for axiomkit binaries and tests.
//!
//! Libraries only emit events; call [`init_logging`] once near program start
//! to print them.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::ParseError;

/// Environment variable whose directives override [`SpecLogOptions::level`].
pub const C_ENV_LOG_FILTER: &str = "RUST_LOG";

/// Errors raised while installing the global subscriber.
#[derive(Debug, thiserror::Error)]
pub enum LogInitError {
    #[error("invalid log filter: {0}")]
    InvalidFilter(#[from] ParseError),
    #[error("global subscriber already installed: {0}")]
    AlreadyInitialized(String),
}

/// Subscriber options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecLogOptions {
    /// Filter directives used when `RUST_LOG` is unset, e.g. `debug` or
    /// `axiomkit_xlsx_style=trace,info`.
    pub level: String,
    /// Print the emitting thread id.
    pub with_thread_ids: bool,
    /// Print the event target (module path).
    pub with_target: bool,
    /// Colourize output.
    pub with_ansi: bool,
}

impl Default for SpecLogOptions {
    fn default() -> Self {
        Self {
            level: "debug".to_string(),
            with_thread_ids: true,
            with_target: true,
            with_ansi: true,
        }
    }
}

/// Build the event filter: `RUST_LOG` wins when set, else `options.level`.
pub fn derive_env_filter(options: &SpecLogOptions) -> Result<EnvFilter, LogInitError> {
    derive_env_filter_from(std::env::var(C_ENV_LOG_FILTER).ok(), options)
}

fn derive_env_filter_from(
    directives_env: Option<String>,
    options: &SpecLogOptions,
) -> Result<EnvFilter, LogInitError> {
    let c_directives = match directives_env {
        Some(val) if !val.trim().is_empty() => val,
        _ => options.level.clone(),
    };
    Ok(EnvFilter::try_new(c_directives)?)
}

/// Install a formatted subscriber as the global default.
pub fn init_logging(options: &SpecLogOptions) -> Result<(), LogInitError> {
    let filter = derive_env_filter(options)?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_thread_ids(options.with_thread_ids)
        .with_target(options.with_target)
        .with_ansi(options.with_ansi)
        .try_init()
        .map_err(|err| LogInitError::AlreadyInitialized(err.to_string()))?;

    tracing::debug!(level = %options.level, "logging initialized");
    Ok(())
}
