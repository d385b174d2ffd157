use crate::config::{LogFormat, PlannerConfig};
use crate::error::PlannerError;

/// Initialize structured logging with tracing.
/// Call once at process startup; a second call returns an error.
pub fn init_logging(config: &PlannerConfig) -> Result<(), PlannerError> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_filter));

    let result = match config.log_format {
        LogFormat::Json => tracing::subscriber::set_global_default(
            tracing_subscriber::registry().with(filter).with(
                fmt::layer()
                    .with_target(true)
                    .with_file(true)
                    .with_line_number(true)
                    .with_writer(std::io::stderr)
                    .json(),
            ),
        ),
        LogFormat::Pretty => tracing::subscriber::set_global_default(
            tracing_subscriber::registry().with(filter).with(
                fmt::layer()
                    .with_target(true)
                    .with_writer(std::io::stderr),
            ),
        ),
    };

    result.map_err(|e| {
        PlannerError::new(format!("Failed to set global tracing subscriber: {}", e), "startup")
    })?;

    tracing::info!(format = ?config.log_format, "Structured logging initialized");
    Ok(())
}
