//! Opt-in `tracing` subscriber setup.
//!
//! Library code only emits events: fallback warnings when a user-editable
//! value is malformed, rejected task records, committed drags. Hosts that
//! already run a subscriber receive them as-is.

/// Filter used when `RUST_LOG` is unset: crate diagnostics at `info`,
/// everything else at `warn`.
pub const DEFAULT_DIRECTIVES: &str = "warn,gantt_rs=info";

/// Installs a compact `fmt` subscriber filtered by `RUST_LOG`, or by
/// [`DEFAULT_DIRECTIVES`] when the variable is missing.
///
/// Returns `false` when the `telemetry` feature is off or a global subscriber
/// is already installed.
#[must_use]
pub fn init_default_tracing() -> bool {
    init_tracing(DEFAULT_DIRECTIVES)
}

/// Like [`init_default_tracing`] with caller-chosen fallback directives.
#[must_use]
pub fn init_tracing(fallback_directives: &str) -> bool {
    #[cfg(feature = "telemetry")]
    {
        use tracing_subscriber::EnvFilter;

        let filter = EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(fallback_directives))
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVES));

        return tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .compact()
            .try_init()
            .is_ok();
    }

    #[cfg(not(feature = "telemetry"))]
    {
        let _ = fallback_directives;
        false
    }
}
