//! Tracing setup for the `metadoc` binary.
//!
//! The subscriber is only installed when `METADOC_LOG` (or `RUST_LOG`) is
//! set. `METADOC_LOG_FORMAT=json` switches to one JSON object per event.
//!
//! ```bash
//! METADOC_LOG=debug metadoc resolve --metadata lib.json --docs lib.xml
//! METADOC_LOG="metadoc_core::resolve=trace" metadoc resolve ...
//! ```

use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "METADOC_LOG";
const FORMAT_ENV: &str = "METADOC_LOG_FORMAT";

/// Build an `EnvFilter` from `METADOC_LOG`, falling back to `RUST_LOG`.
fn build_filter() -> EnvFilter {
    if let Ok(val) = std::env::var(LOG_ENV) {
        EnvFilter::builder().parse_lossy(val)
    } else {
        EnvFilter::from_default_env()
    }
}

/// Initialise the global tracing subscriber.
///
/// All output goes to stderr so reports on stdout stay clean.
pub fn init_tracing() {
    if std::env::var(LOG_ENV).is_err() && std::env::var("RUST_LOG").is_err() {
        return;
    }

    let builder = tracing_subscriber::fmt()
        .with_env_filter(build_filter())
        .with_writer(std::io::stderr);

    let json = std::env::var(FORMAT_ENV).is_ok_and(|f| f.eq_ignore_ascii_case("json"));
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}
