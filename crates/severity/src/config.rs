//! crates/severity/src/config.rs
//! Registry sizing and the out-of-range clamp policy.

use thiserror::Error;

/// Highest code a registry accepts when no explicit bound is configured.
///
/// Sits above [`FATAL_CODE`](crate::FATAL_CODE) so a clamped registration
/// never lands on the built-in FATAL slot.
pub const DEFAULT_MAX_CODE: u32 = 2000;

/// Largest bound a configuration may carry. Larger requests are lowered to it,
/// which keeps the slot table at most `MAX_CODE_CEILING + 1` entries.
pub const MAX_CODE_CEILING: u32 = 65_535;

/// Construction-time settings for a level registry.
///
/// The registry allocates one slot per code in `0..=max_code`, so the bound
/// also fixes the table size. Bounds above [`MAX_CODE_CEILING`] are lowered to
/// it by [`new`](Self::new), by deserialization and by the registry itself.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RegistryConfig {
    /// Largest addressable code. Registrations above it are clamped.
    #[cfg_attr(feature = "serde", serde(deserialize_with = "deserialize_max_code"))]
    pub max_code: u32,
}

impl RegistryConfig {
    /// Creates a configuration with the given upper bound, capped at
    /// [`MAX_CODE_CEILING`].
    #[must_use]
    pub const fn new(max_code: u32) -> Self {
        Self {
            max_code: if max_code > MAX_CODE_CEILING {
                MAX_CODE_CEILING
            } else {
                max_code
            },
        }
    }

    /// Copy of this configuration with the bound capped, for values built
    /// through the public field.
    #[must_use]
    pub const fn normalized(self) -> Self {
        Self::new(self.max_code)
    }

    /// Number of slots a registry built from this configuration holds.
    #[must_use]
    pub const fn slot_count(&self) -> usize {
        self.normalized().max_code as usize + 1
    }
}

#[cfg(feature = "serde")]
fn deserialize_max_code<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let requested = <u32 as serde::Deserialize>::deserialize(deserializer)?;
    Ok(RegistryConfig::new(requested).max_code)
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_CODE)
    }
}

/// Diagnostic produced when a code above the configured bound is clamped.
///
/// The `Display` output is the two-line operator message.
///
/// ```
/// use severity::clamp_code;
///
/// let clamped = clamp_code(1005, 1000);
/// let warning = clamped.warning.expect("clamped");
/// assert_eq!(
///     warning.to_string(),
///     "The specified log level 1005 is larger than the max allowed 1000.\n\
///      The max value 1000 will be used."
/// );
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
#[error(
    "The specified log level {requested} is larger than the max allowed {max}.\nThe max value {max} will be used."
)]
pub struct ClampWarning {
    requested: u32,
    max: u32,
}

impl ClampWarning {
    /// The code the caller asked for.
    #[must_use]
    pub const fn requested(&self) -> u32 {
        self.requested
    }

    /// The bound the code was clamped to.
    #[must_use]
    pub const fn max(&self) -> u32 {
        self.max
    }
}

/// Result of [`clamp_code`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Clamped {
    /// Code to use, never above the bound.
    pub code: u32,
    /// Present when `code` differs from the requested value.
    pub warning: Option<ClampWarning>,
}

/// Clamps `code` to `max_code`.
///
/// Surfacing the warning is left to the caller; the registry logs it through
/// `tracing` and also hands it back from registration.
#[must_use]
pub const fn clamp_code(code: u32, max_code: u32) -> Clamped {
    if code > max_code {
        Clamped {
            code: max_code,
            warning: Some(ClampWarning {
                requested: code,
                max: max_code,
            }),
        }
    } else {
        Clamped {
            code,
            warning: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_bound() {
        let config = RegistryConfig::default();
        assert_eq!(config.max_code, DEFAULT_MAX_CODE);
        assert_eq!(config.slot_count(), DEFAULT_MAX_CODE as usize + 1);
        assert!(DEFAULT_MAX_CODE > crate::levels::FATAL_CODE);
    }

    #[test]
    fn oversized_bounds_are_capped() {
        assert_eq!(RegistryConfig::new(u32::MAX).max_code, MAX_CODE_CEILING);
        assert_eq!(RegistryConfig::new(MAX_CODE_CEILING).max_code, MAX_CODE_CEILING);

        let raw = RegistryConfig { max_code: u32::MAX };
        assert_eq!(raw.normalized(), RegistryConfig::new(MAX_CODE_CEILING));
        assert_eq!(raw.slot_count(), MAX_CODE_CEILING as usize + 1);
    }

    #[test]
    fn codes_within_bound_pass_through() {
        assert_eq!(
            clamp_code(0, 10),
            Clamped {
                code: 0,
                warning: None
            }
        );
        assert_eq!(clamp_code(10, 10).code, 10);
        assert!(clamp_code(10, 10).warning.is_none());
    }

    #[test]
    fn codes_above_bound_are_clamped_with_warning() {
        let clamped = clamp_code(15, 10);
        assert_eq!(clamped.code, 10);
        let warning = clamped.warning.expect("warning for clamped code");
        assert_eq!(warning.requested(), 15);
        assert_eq!(warning.max(), 10);
    }

    #[test]
    fn warning_message_has_two_lines() {
        let warning = clamp_code(u32::MAX, 7).warning.unwrap();
        let text = warning.to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines,
            vec![
                "The specified log level 4294967295 is larger than the max allowed 7.",
                "The max value 7 will be used.",
            ]
        );
    }

    #[cfg(feature = "serde")]
    mod serde_tests {
        use super::*;

        #[test]
        fn config_serde_roundtrip() {
            let config = RegistryConfig::new(2048);
            let json = serde_json::to_string(&config).unwrap();
            assert_eq!(json, r#"{"max_code":2048}"#);
            let decoded: RegistryConfig = serde_json::from_str(&json).unwrap();
            assert_eq!(decoded, config);
        }

        #[test]
        fn missing_fields_fall_back_to_default() {
            let decoded: RegistryConfig = serde_json::from_str("{}").unwrap();
            assert_eq!(decoded, RegistryConfig::default());
        }

        #[test]
        fn oversized_bound_is_capped_on_load() {
            let decoded: RegistryConfig =
                serde_json::from_str(r#"{"max_code":4294967295}"#).unwrap();
            assert_eq!(decoded.max_code, MAX_CODE_CEILING);
        }
    }
}
