#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `severity` is the runtime level registry a logging facility consults on
//! every log call to decide whether a message is emitted. Start-up code shapes
//! the registry (register custom severities, enable or disable levels, set a
//! minimum severity) and call sites ask it a single question through
//! [`LevelGate::is_enabled`].
//!
//! # Design
//!
//! - [`LevelDescriptor`] pairs a code with a name. [`DEBUG`], [`INFO`],
//!   [`WARNING`] and [`FATAL`] are the built-in set.
//! - [`LevelRegistry`] is a fixed table over `0..=max_code`, one slot per code,
//!   each slot absent or holding a descriptor and an atomic flag. It is an
//!   ordinary owned value; share it with the logging subsystem through an
//!   `Arc`. There is no hidden global.
//! - [`LevelStatus`] reports absent, enabled or disabled.
//! - [`LevelSnapshot`] is an owned copy of the registered levels whose
//!   `Display` output is the level report.
//!
//! # Invariants
//!
//! - Queries never block, never allocate and never panic. Unknown or
//!   out-of-range codes are reported disabled.
//! - Registrations above the configured bound are clamped to it with a
//!   [`ClampWarning`]; nothing is dropped.
//! - Status changes on unregistered codes are ignored.
//! - [`LevelRegistry::reset`] restores exactly the default set, all enabled.
//!
//! # Features
//!
//! - `dynamic` (default): runtime level control. Without it the registry does
//!   not exist and [`ActiveGate`] is [`StaticGate`], which enables everything.
//! - `serde`: (de)serialisation for descriptors, status, configuration and
//!   snapshots.
//! - `layer`: a `tracing-subscriber` per-layer filter gated by a registry.
//!
//! # Examples
//!
#![cfg_attr(feature = "dynamic", doc = "```")]
#![cfg_attr(not(feature = "dynamic"), doc = "```ignore")]
//! use severity::{DEBUG, FATAL, INFO, LevelDescriptor, LevelRegistry, WARNING};
//!
//! let registry = LevelRegistry::new();
//! registry.add_log_level(LevelDescriptor::new(400, "NOTICE"), true);
//! registry.set_highest(&WARNING);
//!
//! assert!(!registry.is_enabled(&DEBUG));
//! assert!(!registry.is_enabled(&INFO));
//! assert!(registry.is_enabled(&FATAL));
//!
//! let report = registry.to_string();
//! assert!(report.starts_with("name: DEBUG level: 100 status: 0\n"));
//! assert_eq!(report.lines().count(), 5);
//! ```

mod config;
mod gate;
mod levels;
#[cfg(feature = "dynamic")]
mod registry;
mod snapshot;
mod status;
mod tracing_bridge;
mod tracing_macros;

pub use crate::config::{
    ClampWarning, Clamped, DEFAULT_MAX_CODE, MAX_CODE_CEILING, RegistryConfig, clamp_code,
};
pub use crate::gate::{ActiveGate, LevelGate, StaticGate};
pub use crate::levels::{
    DEBUG, DEBUG_CODE, DEFAULT_LEVELS, FATAL, FATAL_CODE, INFO, INFO_CODE, LevelDescriptor,
    ParseLevelError, WARNING, WARNING_CODE,
};
#[cfg(feature = "dynamic")]
#[cfg_attr(docsrs, doc(cfg(feature = "dynamic")))]
pub use crate::registry::{LevelRegistry, Registration};
pub use crate::snapshot::{LevelSnapshot, SnapshotEntry, render};
pub use crate::status::LevelStatus;
#[cfg(feature = "layer")]
#[cfg_attr(docsrs, doc(cfg(feature = "layer")))]
pub use crate::tracing_bridge::RegistryFilter;
pub use crate::tracing_bridge::{descriptor_for, tracing_level_for};

#[doc(hidden)]
pub use tracing as __tracing;
