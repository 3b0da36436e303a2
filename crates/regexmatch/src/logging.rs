//! Diagnostic logging to stderr.
//!
//! - `REGEXMATCH_LOG` sets the filter (e.g. "debug" or
//!   "warn,regexmatch_spec=debug"). Without it the level follows `-v`.
//! - `REGEXMATCH_LOG_FORMAT=json` switches to JSON lines.

use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "REGEXMATCH_LOG";
pub const LOG_FORMAT_ENV: &str = "REGEXMATCH_LOG_FORMAT";

pub fn default_directive(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

pub fn init_logging(verbose: u8) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true);

    match std::env::var(LOG_FORMAT_ENV).as_deref() {
        Ok("json") => builder.json().init(),
        _ => builder.init(),
    }
}
