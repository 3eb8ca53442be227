//! Telemetry helpers for applications embedding `scrollchart-rs`.
//!
//! Tracing setup stays explicit and opt-in: hosts either call
//! [`init_default_tracing`] or install their own subscriber and filters.

/// Initializes a default `tracing` subscriber when the `telemetry` feature is
/// enabled.
///
/// Returns `true` when initialization succeeds, `false` when the feature is
/// disabled or a global subscriber was already installed by the host.
#[must_use]
pub fn init_default_tracing() -> bool {
    init_tracing_with_fallback_filter("info")
}

/// Same as [`init_default_tracing`] but with an explicit fallback filter used
/// when `RUST_LOG` is not set.
#[must_use]
pub fn init_tracing_with_fallback_filter(fallback: &str) -> bool {
    #[cfg(feature = "telemetry")]
    {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(fallback));

        return tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .compact()
            .try_init()
            .is_ok();
    }

    #[cfg(not(feature = "telemetry"))]
    {
        let _ = fallback;
        false
    }
}
