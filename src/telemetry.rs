//! Opt-in tracing bootstrap.
//!
//! The engine emits `tracing` events for zoom/pan mutations, animation
//! lifecycle and rejected gestures. Hosts that already run a subscriber need
//! nothing from here; standalone tools can call [`init_default_tracing`] to
//! get a compact stderr subscriber honoring `RUST_LOG`.

/// Default filter applied when `RUST_LOG` is unset.
#[cfg(feature = "telemetry")]
const DEFAULT_FILTER: &str = "wavescope=info";

/// Installs a compact `tracing` subscriber filtered by `RUST_LOG` (falling
/// back to `wavescope=info`).
///
/// Returns `true` when the subscriber was installed. Returns `false` when the
/// `telemetry` feature is off or another global subscriber is already set.
#[must_use]
pub fn init_default_tracing() -> bool {
    #[cfg(feature = "telemetry")]
    {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(DEFAULT_FILTER));

        return tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .compact()
            .try_init()
            .is_ok();
    }

    #[cfg(not(feature = "telemetry"))]
    {
        false
    }
}
