//! GfxTablet - input capture for a remote graphics tablet
//!
//! Turns pointer samples from a touch/stylus surface into an ordered queue
//! of protocol events that a transport forwards to the host-side driver.

pub mod core;
pub mod input;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize logging. Safe to call more than once.
pub fn init() {
    let installed = tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gfxtablet_lib=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .try_init();

    if installed.is_ok() {
        tracing::info!("GfxTablet initializing...");
    }
}
