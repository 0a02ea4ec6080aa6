//! Integration tests for the tracing bridge.
//!
//! These tests install a capturing layer and verify that `RegistryFilter`
//! gates ordinary tracing events through a live registry, that `log_at!`
//! consults its gate before emitting, and that clamped registrations surface
//! their diagnostic as a `warn` event.

use std::fmt;
use std::sync::{Arc, Mutex};

use severity::{
    DEBUG, FATAL, LevelDescriptor, LevelRegistry, RegistryConfig, RegistryFilter, WARNING, log_at,
};
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer};
use tracing_subscriber::prelude::*;

#[derive(Clone, Debug)]
struct Captured {
    level: Level,
    target: String,
    message: String,
    severity: Option<String>,
}

#[derive(Default)]
struct FieldVisitor {
    message: Option<String>,
    severity: Option<String>,
}

impl Visit for FieldVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "severity" {
            self.severity = Some(value.to_owned());
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            self.message = Some(format!("{value:?}"));
        }
    }
}

#[derive(Clone, Default)]
struct CaptureLayer {
    events: Arc<Mutex<Vec<Captured>>>,
}

impl CaptureLayer {
    fn events(&self) -> Vec<Captured> {
        self.events.lock().unwrap().clone()
    }

    fn messages(&self) -> Vec<String> {
        self.events().into_iter().map(|event| event.message).collect()
    }
}

impl<S: Subscriber> Layer<S> for CaptureLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut visitor = FieldVisitor::default();
        event.record(&mut visitor);
        let metadata = event.metadata();
        self.events.lock().unwrap().push(Captured {
            level: *metadata.level(),
            target: metadata.target().to_owned(),
            message: visitor.message.unwrap_or_default(),
            severity: visitor.severity,
        });
    }
}

// ============================================================================
// Subscriber Filter Tests
// ============================================================================

/// Verifies registry changes take effect on already-used callsites.
#[test]
fn filter_follows_registry_changes() {
    let registry = Arc::new(LevelRegistry::new());
    let capture = CaptureLayer::default();
    let subscriber = tracing_subscriber::registry()
        .with(capture.clone().with_filter(RegistryFilter::new(Arc::clone(&registry))));

    tracing::subscriber::with_default(subscriber, || {
        for round in 0..2 {
            tracing::info!("info {round}");
            tracing::warn!("warn {round}");
            registry.set_highest(&WARNING);
        }
    });

    assert_eq!(capture.messages(), vec!["info 0", "warn 0", "warn 1"]);
}

/// Verifies each tracing level is gated by its mapped severity.
#[test]
fn filter_maps_tracing_levels_to_severities() {
    let registry = Arc::new(LevelRegistry::new());
    registry.disable(&DEBUG);
    registry.disable(&FATAL);
    let capture = CaptureLayer::default();
    let subscriber = tracing_subscriber::registry()
        .with(capture.clone().with_filter(RegistryFilter::new(Arc::clone(&registry))));

    tracing::subscriber::with_default(subscriber, || {
        tracing::trace!("trace");
        tracing::debug!("debug");
        tracing::info!("info");
        tracing::warn!("warn");
        tracing::error!("error");
    });

    assert_eq!(capture.messages(), vec!["info", "warn"]);
}

/// Verifies an emptied registry suppresses everything.
#[test]
fn disable_all_silences_filtered_layer() {
    let registry = Arc::new(LevelRegistry::new());
    registry.disable_all();
    let capture = CaptureLayer::default();
    let filter = RegistryFilter::new(Arc::clone(&registry));
    assert!(!filter.gate().is_enabled(&WARNING));
    let subscriber = tracing_subscriber::registry().with(capture.clone().with_filter(filter));

    tracing::subscriber::with_default(subscriber, || {
        tracing::error!("nothing");
    });

    assert!(capture.events().is_empty());
}

// ============================================================================
// Call-site Macro Tests
// ============================================================================

/// Verifies log_at! emits custom severities at their tracing band only when
/// the registry enables them.
#[test]
fn log_at_respects_registry_and_banding() {
    let registry = LevelRegistry::new();
    let notice = LevelDescriptor::new(400, "NOTICE");
    registry.add_log_level(notice.clone(), false);
    let capture = CaptureLayer::default();
    let subscriber = tracing_subscriber::registry().with(capture.clone());

    tracing::subscriber::with_default(subscriber, || {
        log_at!(registry, notice, "hidden");
        registry.enable(&notice);
        log_at!(registry, notice, "shown {}", 1);
        log_at!(&registry, LevelDescriptor::new(42, "UNKNOWN"), "unknown");
        log_at!(registry, FATAL, "fatal");
    });

    let events = capture.events();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].message, "shown 1");
    assert_eq!(events[0].level, Level::INFO);
    assert_eq!(events[0].severity.as_deref(), Some("NOTICE"));
    assert_eq!(events[0].target, "severity");
    assert_eq!(events[1].level, Level::ERROR);
    assert_eq!(events[1].severity.as_deref(), Some("FATAL"));
}

// ============================================================================
// Diagnostic Tests
// ============================================================================

/// Verifies a clamped registration logs the two-line diagnostic at warn.
#[test]
fn clamp_diagnostic_is_logged() {
    let capture = CaptureLayer::default();
    let subscriber = tracing_subscriber::registry().with(capture.clone());

    tracing::subscriber::with_default(subscriber, || {
        let registry = LevelRegistry::with_config(RegistryConfig::new(2000));
        registry.add_log_level(LevelDescriptor::new(2005, "HUGE"), true);
    });

    let warnings: Vec<Captured> = capture
        .events()
        .into_iter()
        .filter(|event| event.level == Level::WARN)
        .collect();
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].target, "severity::registry");
    assert_eq!(
        warnings[0].message,
        "The specified log level 2005 is larger than the max allowed 2000.\nThe max value 2000 will be used."
    );
}
