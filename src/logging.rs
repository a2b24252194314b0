//! Tracing subscriber setup.
//!
//! The reconciler reports through the `tracing` facade: a `debug` summary per pass,
//! `trace` events for every structural host mutation and a one-time `warn` per
//! unstable callback site. Nothing is printed until a subscriber is installed, either
//! by the application or with the helpers below.

use std::sync::{Once, OnceLock};

use tracing_subscriber::{EnvFilter, Registry, fmt, prelude::*, reload};

const DEFAULT_DIRECTIVES: &str = "info";

// ============================================================================
// Global State
// ============================================================================

static TRACING_INSTALLED: Once = Once::new();
static FILTER: OnceLock<reload::Handle<EnvFilter, Registry>> = OnceLock::new();

fn default_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVES))
}

fn parse_filter(directives: &str) -> EnvFilter {
    EnvFilter::try_new(directives).unwrap_or_else(|error| {
        eprintln!("scenegraft: ignoring invalid log filter {directives:?}: {error}");
        EnvFilter::new(DEFAULT_DIRECTIVES)
    })
}

// ============================================================================
// Installation
// ============================================================================

/// Installs a global subscriber printing to stderr, filtered by `RUST_LOG`
/// (default `info`).
///
/// Idempotent: only the first installation in a process takes effect.
pub fn install_tracing() {
    install(default_filter(), false);
}

/// Installs a global subscriber with explicit filter directives, such as
/// `"scenegraft_core=trace"`.
pub fn install_tracing_with(directives: &str) {
    install(parse_filter(directives), false);
}

/// Installs a global subscriber that writes through the test harness, so output is
/// only shown for failing tests.
pub fn install_test_tracing() {
    install(default_filter(), true);
}

/// Replaces the filter of the installed subscriber.
///
/// Returns `false` if no subscriber was installed by this module.
pub fn set_log_level(directives: &str) -> bool {
    let Some(handle) = FILTER.get() else {
        return false;
    };
    handle.reload(parse_filter(directives)).is_ok()
}

fn install(filter: EnvFilter, test_writer: bool) {
    TRACING_INSTALLED.call_once(|| {
        let (filter, handle) = reload::Layer::new(filter);
        let result = if test_writer {
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().with_test_writer())
                .try_init()
        } else {
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().with_writer(std::io::stderr))
                .try_init()
        };

        if result.is_err() {
            eprintln!("scenegraft tracing subscriber failed to initialize");
            return;
        }
        let _ = FILTER.set(handle);
    });
}
