//! Logger initialization for frontend programs.

use std::sync::Once;

static INIT: Once = Once::new();

/// Initializes the global logger once, honoring `RUST_LOG`.
///
/// Without `RUST_LOG`, messages at level `info` and above are shown.
/// Subsequent calls are ignored. Call early in `main`.
pub fn init() {
    init_with(None);
}

/// Initializes the global logger once with the given filter, falling back
/// to `RUST_LOG` and then to `info` if `filter` is `None`.
///
/// `filter` uses the `env_logger` syntax, e.g. `"softras_core=debug"`.
pub fn init_with(filter: Option<&str>) {
    INIT.call_once(|| {
        let mut builder = env_logger::Builder::new();

        if let Some(filter) = filter {
            builder.parse_filters(filter);
        } else if let Ok(filter) = std::env::var("RUST_LOG") {
            builder.parse_filters(&filter);
        } else {
            builder.filter_level(log::LevelFilter::Info);
        }
        // Another logger may already be installed, eg. by a test harness
        if builder.try_init().is_err() {
            log::debug!("logger already initialized");
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_is_idempotent() {
        init_with(Some("warn"));
        init();
        assert!(INIT.is_completed());
    }
}
