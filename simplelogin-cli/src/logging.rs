// simplelogin-cli/src/logging.rs
use tracing_subscriber::EnvFilter;

/// Variable holding a tracing filter, e.g. `simplelogin_api=debug`
pub const LOG_ENV: &str = "SIMPLELOGIN_LOG";

/// Install the stderr subscriber; `SIMPLELOGIN_LOG` beats `-v`
pub fn init(verbosity: u8) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(default_level(verbosity)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn default_level(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}
