//! Braess Logging
//!
//! Installs the global `tracing` subscriber for Braess binaries: an
//! `EnvFilter` taken from `RUST_LOG` when set, otherwise from
//! [`LogConfig::default_directive`], feeding a formatted stderr layer.

use thiserror::Error;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter used when `RUST_LOG` is unset.
pub const DEFAULT_DIRECTIVE: &str = "braess=info,braess_network=info";

/// Errors that can occur while installing the subscriber.
#[derive(Debug, Error)]
pub enum Error {
    /// The fallback directive could not be parsed.
    #[error("invalid log directive: {0}")]
    Directive(#[from] tracing_subscriber::filter::ParseError),

    /// A global subscriber is already installed.
    #[error("logging already initialised: {0}")]
    AlreadyInitialised(#[from] tracing_subscriber::util::TryInitError),
}

/// Logging configuration.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Filter directive applied when `RUST_LOG` is unset or invalid.
    pub default_directive: String,
    /// Colour output.
    pub ansi: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            default_directive: DEFAULT_DIRECTIVE.to_string(),
            ansi: true,
        }
    }
}

impl LogConfig {
    /// Raise the fallback level, as a `-v` flag would.
    pub fn verbose(mut self, verbose: bool) -> Self {
        if verbose {
            self.default_directive = "braess=debug,braess_network=trace".to_string();
        }
        self
    }

    /// Build the filter this configuration resolves to.
    pub fn filter(&self) -> Result<EnvFilter, Error> {
        match EnvFilter::try_from_default_env() {
            Ok(filter) => Ok(filter),
            Err(_) => Ok(EnvFilter::try_new(&self.default_directive)?),
        }
    }
}

/// Install the global subscriber.
pub fn init(config: &LogConfig) -> Result<(), Error> {
    tracing_subscriber::registry()
        .with(config.filter()?)
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(config.ansi)
                .with_writer(std::io::stderr),
        )
        .try_init()?;

    tracing::debug!(directive = %config.default_directive, "logging initialised");
    Ok(())
}
