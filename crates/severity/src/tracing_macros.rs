//! crates/severity/src/tracing_macros.rs
//! Call-site macro that consults a gate before emitting a tracing event.

/// Emit a tracing event at a registry severity.
///
/// The gate is checked first; when it reports the level disabled nothing is
/// formatted. Enabled events are emitted at [`tracing_level_for`] of the
/// descriptor, under target `severity`, with the level name in a `severity`
/// field.
///
/// # Example
#[cfg_attr(feature = "dynamic", doc = "```")]
#[cfg_attr(not(feature = "dynamic"), doc = "```ignore")]
/// use severity::{LevelRegistry, WARNING, log_at};
///
/// let registry = LevelRegistry::new();
/// log_at!(registry, WARNING, "disk {} is {}% full", "/var", 91);
/// ```
///
/// Any [`LevelGate`](crate::LevelGate) works, including the static one:
///
/// ```
/// use severity::{DEBUG, StaticGate, log_at};
///
/// log_at!(StaticGate, DEBUG, "always emitted");
/// ```
///
/// [`tracing_level_for`]: crate::tracing_level_for
#[macro_export]
macro_rules! log_at {
    ($gate:expr, $level:expr, $($arg:tt)+) => {{
        let level: &$crate::LevelDescriptor = &$level;
        if $crate::LevelGate::is_enabled(&$gate, level) {
            let band = $crate::tracing_level_for(level);
            if band == $crate::__tracing::Level::ERROR {
                $crate::__tracing::error!(target: "severity", severity = level.name(), $($arg)+);
            } else if band == $crate::__tracing::Level::WARN {
                $crate::__tracing::warn!(target: "severity", severity = level.name(), $($arg)+);
            } else if band == $crate::__tracing::Level::INFO {
                $crate::__tracing::info!(target: "severity", severity = level.name(), $($arg)+);
            } else if band == $crate::__tracing::Level::DEBUG {
                $crate::__tracing::debug!(target: "severity", severity = level.name(), $($arg)+);
            } else {
                $crate::__tracing::trace!(target: "severity", severity = level.name(), $($arg)+);
            }
        }
    }};
}
