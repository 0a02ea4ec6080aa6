//! crates/severity/src/tracing_bridge.rs
//! Bridge between severity descriptors and the tracing crate.
//!
//! Two directions are covered:
//!
//! - [`tracing_level_for`] picks the tracing level a descriptor is emitted at,
//!   banding custom codes between the built-in ones. The [`log_at!`] macro
//!   uses it.
//! - [`descriptor_for`] maps a tracing level back onto a built-in severity.
//!   With the `layer` feature, [`RegistryFilter`] uses it to gate ordinary
//!   `tracing` events through any [`LevelGate`].
//!
//! # Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use severity::{LevelRegistry, RegistryFilter, WARNING};
//! use tracing_subscriber::prelude::*;
//!
//! let registry = Arc::new(LevelRegistry::new());
//! tracing_subscriber::registry()
//!     .with(tracing_subscriber::fmt::layer().with_filter(RegistryFilter::new(registry.clone())))
//!     .init();
//!
//! registry.set_highest(&WARNING);
//! tracing::info!("suppressed");
//! tracing::warn!("emitted");
//! ```
//!
//! [`log_at!`]: crate::log_at
//! [`LevelGate`]: crate::LevelGate

use tracing::Level;

use crate::levels::{
    DEBUG, DEBUG_CODE, FATAL, FATAL_CODE, INFO, INFO_CODE, LevelDescriptor, WARNING, WARNING_CODE,
};

/// Tracing level a descriptor is emitted at.
///
/// Codes below DEBUG map to `TRACE`; codes from one built-in severity up to
/// the next share the lower one's level, and FATAL or above maps to `ERROR`.
#[must_use]
pub const fn tracing_level_for(level: &LevelDescriptor) -> Level {
    let code = level.code();
    if code < DEBUG_CODE {
        Level::TRACE
    } else if code < INFO_CODE {
        Level::DEBUG
    } else if code < WARNING_CODE {
        Level::INFO
    } else if code < FATAL_CODE {
        Level::WARN
    } else {
        Level::ERROR
    }
}

/// Built-in severity a tracing level is gated as.
#[must_use]
pub fn descriptor_for(level: &Level) -> LevelDescriptor {
    if *level == Level::ERROR {
        FATAL
    } else if *level == Level::WARN {
        WARNING
    } else if *level == Level::INFO {
        INFO
    } else {
        DEBUG
    }
}

#[cfg(feature = "layer")]
pub use self::filter::RegistryFilter;

#[cfg(feature = "layer")]
mod filter {
    use tracing::Metadata;
    use tracing::subscriber::Interest;
    use tracing_subscriber::layer::{Context, Filter};

    use super::descriptor_for;
    use crate::gate::LevelGate;

    /// Per-layer filter that admits an event only when its severity is
    /// enabled in the wrapped gate.
    ///
    /// Callsite interest is always `sometimes`, so every event re-checks the
    /// gate and registry changes take effect immediately.
    #[derive(Clone, Debug)]
    pub struct RegistryFilter<G> {
        gate: G,
    }

    impl<G: LevelGate> RegistryFilter<G> {
        /// Wraps `gate`, typically an `Arc<LevelRegistry>`.
        #[must_use]
        pub const fn new(gate: G) -> Self {
            Self { gate }
        }

        /// Borrows the wrapped gate.
        #[must_use]
        pub const fn gate(&self) -> &G {
            &self.gate
        }
    }

    impl<G: LevelGate, S> Filter<S> for RegistryFilter<G> {
        fn enabled(&self, meta: &Metadata<'_>, _cx: &Context<'_, S>) -> bool {
            self.gate.is_enabled(&descriptor_for(meta.level()))
        }

        fn callsite_enabled(&self, _meta: &'static Metadata<'static>) -> Interest {
            Interest::sometimes()
        }
    }
}
