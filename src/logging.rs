use std::backtrace::Backtrace;

use tracing_subscriber::{EnvFilter, fmt};

use crate::config::LoggingConfig;

/// Installs the global subscriber; logs go to stderr so stdout stays machine readable.
pub fn init_tracing(cfg: &LoggingConfig) -> anyhow::Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cfg.rust_log));
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| anyhow::anyhow!(err))?;
    set_panic_hook();
    Ok(())
}

fn set_panic_hook() {
    std::panic::set_hook(Box::new(|info| {
        let message = if let Some(message) = info.payload().downcast_ref::<&str>() {
            *message
        } else if let Some(message) = info.payload().downcast_ref::<String>() {
            message.as_str()
        } else {
            "unknown panic"
        };

        let backtrace = Backtrace::capture();

        if let Some(location) = info.location() {
            tracing::error!(
                panic = %message,
                location = %location,
                backtrace = %backtrace,
                "panic"
            );
        } else {
            tracing::error!(panic = %message, backtrace = %backtrace, "panic");
        }
    }));
}
