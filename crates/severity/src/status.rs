//! crates/severity/src/status.rs
//! Tri-state answer to "what does the registry know about this code?".

/// Registration state of a severity code.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LevelStatus {
    /// No level is registered under the code.
    Absent,
    /// Registered and currently emitted.
    Enabled,
    /// Registered but currently suppressed.
    Disabled,
}

impl LevelStatus {
    /// Maps a registered slot's flag onto [`Enabled`](Self::Enabled) or
    /// [`Disabled`](Self::Disabled).
    #[must_use]
    pub const fn from_flag(enabled: bool) -> Self {
        if enabled { Self::Enabled } else { Self::Disabled }
    }

    /// Returns `true` only for [`Enabled`](Self::Enabled).
    #[must_use]
    pub const fn is_enabled(self) -> bool {
        matches!(self, Self::Enabled)
    }

    /// Returns `true` for both registered states.
    #[must_use]
    pub const fn is_registered(self) -> bool {
        !matches!(self, Self::Absent)
    }
}
