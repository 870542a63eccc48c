//! Tracing setup. Logs go to stderr so stdout stays clean for the report.

use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "ATLAS_LOG";

/// Filter precedence: `ATLAS_LOG`, then `-v` count, then the config level.
pub fn filter_directive(env: Option<&str>, verbosity: u8, config_level: &str) -> String {
    if let Some(directive) = env.filter(|s| !s.trim().is_empty()) {
        return directive.to_string();
    }
    let level = match verbosity {
        0 => config_level,
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    format!("atlas_forecast={level},atlas={level}")
}

pub fn init(verbosity: u8, config_level: &str) {
    let env = std::env::var(LOG_ENV).ok();
    let directive = filter_directive(env.as_deref(), verbosity, config_level);
    let filter = EnvFilter::try_new(&directive).unwrap_or_else(|_| EnvFilter::new("warn"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
