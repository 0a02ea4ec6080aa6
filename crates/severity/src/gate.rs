//! crates/severity/src/gate.rs
//! The emit-or-suppress hook consulted by log call sites.

use std::sync::Arc;

use crate::levels::LevelDescriptor;

/// Decides whether a message at a given severity is emitted.
///
/// Implementations must be cheap enough to call once per log statement and
/// must never panic.
pub trait LevelGate {
    /// Returns `true` when messages at `level` should be emitted.
    fn is_enabled(&self, level: &LevelDescriptor) -> bool;
}

/// Gate used when runtime level control is compiled out: every severity is
/// enabled and filtering, if any, happens downstream.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StaticGate;

impl LevelGate for StaticGate {
    #[inline(always)]
    fn is_enabled(&self, _level: &LevelDescriptor) -> bool {
        true
    }
}

#[cfg(feature = "dynamic")]
impl LevelGate for crate::registry::LevelRegistry {
    #[inline]
    fn is_enabled(&self, level: &LevelDescriptor) -> bool {
        Self::is_enabled(self, level)
    }
}

impl<G: LevelGate + ?Sized> LevelGate for &G {
    #[inline]
    fn is_enabled(&self, level: &LevelDescriptor) -> bool {
        (**self).is_enabled(level)
    }
}

impl<G: LevelGate + ?Sized> LevelGate for Arc<G> {
    #[inline]
    fn is_enabled(&self, level: &LevelDescriptor) -> bool {
        (**self).is_enabled(level)
    }
}

/// Gate selected by the build: the runtime registry when the `dynamic`
/// feature is on.
#[cfg(feature = "dynamic")]
pub type ActiveGate = crate::registry::LevelRegistry;

/// Gate selected by the build: [`StaticGate`] when the `dynamic` feature is
/// off.
#[cfg(not(feature = "dynamic"))]
pub type ActiveGate = StaticGate;
