//! crates/severity/src/registry.rs
//! Runtime-mutable table of severity slots.
//!
//! The registry is a fixed-size array indexed by code. Each slot is an
//! [`ArcSwapOption`] holding either nothing (the code is unknown) or an entry
//! pairing a descriptor with an [`AtomicBool`]. Queries touch only the slot and
//! the flag, so they never block on writers:
//!
//! - flag updates (`set`, `enable`, `disable`, the bulk operations and
//!   `set_highest`) are plain atomic stores;
//! - replacing a descriptor swaps the whole entry so readers never see a
//!   descriptor from one registration paired with a flag from another;
//! - structural changes (`add_log_level`, `reset`) are additionally serialised
//!   against each other by a writer lock that queries never take.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use arc_swap::ArcSwapOption;

use crate::config::{ClampWarning, Clamped, RegistryConfig, clamp_code};
use crate::levels::{DEFAULT_LEVELS, LevelDescriptor};
use crate::snapshot::LevelSnapshot;
use crate::status::LevelStatus;

const LOG_TARGET: &str = "severity::registry";

/// A registered level: descriptor plus its enabled flag.
#[derive(Debug)]
pub(crate) struct LevelEntry {
    descriptor: LevelDescriptor,
    enabled: AtomicBool,
}

impl LevelEntry {
    fn new(descriptor: LevelDescriptor, enabled: bool) -> Self {
        Self {
            descriptor,
            enabled: AtomicBool::new(enabled),
        }
    }

    #[inline]
    fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Acquire)
    }

    fn set_enabled(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::Release);
    }
}

/// Outcome of [`LevelRegistry::add_log_level`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Registration {
    descriptor: LevelDescriptor,
    warning: Option<ClampWarning>,
}

impl Registration {
    /// Descriptor as stored, carrying the clamped code when clamping applied.
    #[must_use]
    pub fn descriptor(&self) -> &LevelDescriptor {
        &self.descriptor
    }

    /// Slot the level was registered under.
    #[must_use]
    pub fn code(&self) -> u32 {
        self.descriptor.code()
    }

    /// Clamp diagnostic, if the requested code exceeded the bound.
    #[must_use]
    pub fn warning(&self) -> Option<&ClampWarning> {
        self.warning.as_ref()
    }

    /// Returns `true` when the requested code was clamped.
    #[must_use]
    pub fn was_clamped(&self) -> bool {
        self.warning.is_some()
    }
}

/// Process-scoped severity table consulted on every log call.
///
/// Build one at start-up, share it with the logging subsystem (usually behind
/// an [`Arc`]), and query it through [`is_enabled`](Self::is_enabled) or the
/// [`LevelGate`](crate::LevelGate) trait.
///
/// # Examples
///
/// ```
/// use severity::{DEBUG, INFO, LevelDescriptor, LevelRegistry, LevelStatus, WARNING};
///
/// let registry = LevelRegistry::new();
/// assert!(registry.is_enabled(&DEBUG));
///
/// registry.set_highest(&WARNING);
/// assert!(!registry.is_enabled(&INFO));
/// assert!(registry.is_enabled(&WARNING));
///
/// let notice = LevelDescriptor::new(400, "NOTICE");
/// assert_eq!(registry.get_status(&notice), LevelStatus::Absent);
/// registry.add_log_level(notice.clone(), false);
/// assert_eq!(registry.get_status(&notice), LevelStatus::Disabled);
/// ```
pub struct LevelRegistry {
    slots: Box<[ArcSwapOption<LevelEntry>]>,
    config: RegistryConfig,
    writer: Mutex<()>,
}

impl LevelRegistry {
    /// Creates a registry with [`RegistryConfig::default`], holding the
    /// default levels, all enabled.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(RegistryConfig::default())
    }

    /// Creates a registry sized by `config`, holding the default levels.
    ///
    /// The bound is capped at [`MAX_CODE_CEILING`](crate::MAX_CODE_CEILING).
    /// A bound below a default level's code clamps that level like any other
    /// registration.
    #[must_use]
    pub fn with_config(config: RegistryConfig) -> Self {
        let config = config.normalized();
        let slots = (0..config.slot_count())
            .map(|_| ArcSwapOption::empty())
            .collect();
        let registry = Self {
            slots,
            config,
            writer: Mutex::new(()),
        };
        registry.install_defaults();
        tracing::debug!(
            target: LOG_TARGET,
            max_code = config.max_code,
            "level registry initialised"
        );
        registry
    }

    /// Configuration the registry was built with.
    #[must_use]
    pub const fn config(&self) -> RegistryConfig {
        self.config
    }

    /// Largest addressable code.
    #[must_use]
    pub const fn max_code(&self) -> u32 {
        self.config.max_code
    }

    /// Returns `true` when `level` should be emitted.
    ///
    /// Unknown and out-of-range codes fail closed. Lock-free and
    /// allocation-free.
    #[inline]
    pub fn is_enabled(&self, level: &LevelDescriptor) -> bool {
        self.slot(level.code())
            .is_some_and(|slot| (*slot.load()).as_ref().is_some_and(|entry| entry.is_enabled()))
    }

    /// Reports whether `level`'s code is absent, enabled or disabled.
    pub fn get_status(&self, level: &LevelDescriptor) -> LevelStatus {
        self.slot(level.code())
            .and_then(|slot| {
                (*slot.load())
                    .as_ref()
                    .map(|entry| LevelStatus::from_flag(entry.is_enabled()))
            })
            .unwrap_or(LevelStatus::Absent)
    }

    /// Registers `level` with the given initial flag.
    ///
    /// Codes above [`max_code`](Self::max_code) are clamped to it; the
    /// diagnostic is logged at `warn` and returned in the [`Registration`].
    /// An existing entry under the same code is replaced as a whole.
    pub fn add_log_level(&self, level: LevelDescriptor, enabled: bool) -> Registration {
        let _writer = self.lock_writer();
        let Clamped { code, warning } = clamp_code(level.code(), self.max_code());
        let descriptor = match &warning {
            Some(warning) => {
                tracing::warn!(
                    target: LOG_TARGET,
                    requested = warning.requested(),
                    max = warning.max(),
                    "{warning}"
                );
                level.with_code(code)
            }
            None => level,
        };

        if let Some(slot) = self.slot(code) {
            slot.store(Some(Arc::new(LevelEntry::new(descriptor.clone(), enabled))));
        }
        tracing::debug!(
            target: LOG_TARGET,
            code,
            name = descriptor.name(),
            enabled,
            "level registered"
        );

        Registration {
            descriptor,
            warning,
        }
    }

    /// Registers `level` enabled.
    pub fn add_log_level_enabled(&self, level: LevelDescriptor) -> Registration {
        self.add_log_level(level, true)
    }

    /// Discards every entry and reinstalls the default levels, all enabled.
    ///
    /// Concurrent queries may see a custom code turn absent mid-reset.
    pub fn reset(&self) {
        let _writer = self.lock_writer();
        self.install_defaults();
        tracing::debug!(target: LOG_TARGET, "level registry reset to defaults");
    }

    /// Overwrites the descriptor and flag of an already registered code.
    ///
    /// Unregistered codes are ignored.
    pub fn set(&self, level: &LevelDescriptor, enabled: bool) {
        let Some(slot) = self.slot(level.code()) else {
            return;
        };
        let replace = match &*slot.load() {
            None => false,
            Some(entry) if entry.descriptor == *level => {
                entry.set_enabled(enabled);
                false
            }
            Some(_) => true,
        };
        if !replace {
            return;
        }

        slot.rcu(|existing| {
            existing
                .as_ref()
                .map(|_| Arc::new(LevelEntry::new(level.clone(), enabled)))
        });
    }

    /// Enables a registered level; no-op when absent.
    pub fn enable(&self, level: &LevelDescriptor) {
        self.set(level, true);
    }

    /// Disables a registered level; no-op when absent.
    pub fn disable(&self, level: &LevelDescriptor) {
        self.set(level, false);
    }

    /// Enables every registered level.
    pub fn enable_all(&self) {
        self.store_all(true);
    }

    /// Disables every registered level.
    pub fn disable_all(&self) {
        self.store_all(false);
    }

    /// Enables `threshold` and every registered level above it, and disables
    /// everything below it.
    ///
    /// Does nothing unless `threshold` is itself registered.
    pub fn set_highest(&self, threshold: &LevelDescriptor) {
        if !self.get_status(threshold).is_registered() {
            return;
        }
        let from = threshold.code() as usize;
        for (code, slot) in self.slots.iter().enumerate() {
            if let Some(entry) = &*slot.load() {
                entry.set_enabled(code >= from);
            }
        }
    }

    /// Copies every registered level into an owned snapshot.
    pub fn get_all(&self) -> LevelSnapshot {
        let mut snapshot = LevelSnapshot::new();
        for (code, slot) in self.slots.iter().enumerate() {
            if let Some(entry) = &*slot.load() {
                snapshot.insert(code as u32, entry.descriptor.clone(), entry.is_enabled());
            }
        }
        snapshot
    }

    /// Returns the lowest-coded registered descriptor named exactly `name`.
    pub fn find(&self, name: &str) -> Option<LevelDescriptor> {
        self.slots.iter().find_map(|slot| {
            (*slot.load())
                .as_ref()
                .filter(|entry| entry.descriptor.name() == name)
                .map(|entry| entry.descriptor.clone())
        })
    }

    #[inline]
    fn slot(&self, code: u32) -> Option<&ArcSwapOption<LevelEntry>> {
        self.slots.get(code as usize)
    }

    fn store_all(&self, enabled: bool) {
        for slot in self.slots.iter() {
            if let Some(entry) = &*slot.load() {
                entry.set_enabled(enabled);
            }
        }
    }

    fn lock_writer(&self) -> MutexGuard<'_, ()> {
        self.writer
            .lock()
            .unwrap_or_else(|poison| poison.into_inner())
    }

    /// Replaces every slot with its default-derived state. Callers hold the
    /// writer lock or have exclusive access.
    fn install_defaults(&self) {
        let mut fresh: Vec<Option<Arc<LevelEntry>>> = vec![None; self.slots.len()];
        for level in DEFAULT_LEVELS {
            let Clamped { code, warning } = clamp_code(level.code(), self.max_code());
            if let Some(warning) = warning {
                tracing::warn!(
                    target: LOG_TARGET,
                    requested = warning.requested(),
                    max = warning.max(),
                    "{warning}"
                );
            }
            if let Some(cell) = fresh.get_mut(code as usize) {
                *cell = Some(Arc::new(LevelEntry::new(level.with_code(code), true)));
            }
        }
        for (slot, entry) in self.slots.iter().zip(fresh) {
            slot.store(entry);
        }
    }
}

impl Default for LevelRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for LevelRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LevelRegistry")
            .field("max_code", &self.max_code())
            .field("levels", &self.get_all())
            .finish()
    }
}

impl fmt::Display for LevelRegistry {
    /// Renders the current level report.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.get_all(), f)
    }
}
