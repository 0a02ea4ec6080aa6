//! crates/severity/src/snapshot.rs
//! Point-in-time copies of registry state and their text report.

use std::collections::BTreeMap;
use std::fmt;

use crate::levels::LevelDescriptor;

/// One registered level as captured by a snapshot.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SnapshotEntry {
    /// Descriptor stored in the slot.
    pub descriptor: LevelDescriptor,
    /// Flag value at capture time.
    pub enabled: bool,
}

/// Owned map of code to level state, ordered by ascending code.
///
/// A snapshot holds no reference into the registry it came from; later
/// registry changes are not reflected.
///
/// Its `Display` output is the level report, one
/// `name: <name> level: <code> status: <0|1>` line per entry:
///
/// ```
/// use severity::{INFO, LevelSnapshot, WARNING};
///
/// let snapshot: LevelSnapshot = [(WARNING, false), (INFO, true)].into_iter().collect();
/// assert_eq!(
///     snapshot.to_string(),
///     "name: INFO level: 300 status: 1\nname: WARNING level: 500 status: 0\n"
/// );
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LevelSnapshot {
    levels: BTreeMap<u32, SnapshotEntry>,
}

impl LevelSnapshot {
    /// Creates an empty snapshot.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `descriptor` under `code`, replacing any previous entry.
    pub fn insert(&mut self, code: u32, descriptor: LevelDescriptor, enabled: bool) {
        self.levels.insert(
            code,
            SnapshotEntry {
                descriptor,
                enabled,
            },
        );
    }

    /// Returns the entry captured for `code`.
    #[must_use]
    pub fn get(&self, code: u32) -> Option<&SnapshotEntry> {
        self.levels.get(&code)
    }

    /// Number of registered levels captured.
    #[must_use]
    pub fn len(&self) -> usize {
        self.levels.len()
    }

    /// Returns `true` when no level was registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Iterates entries in ascending code order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, &SnapshotEntry)> + '_ {
        self.levels.iter().map(|(code, entry)| (*code, entry))
    }

    /// Codes whose flag was set at capture time, ascending.
    pub fn enabled_codes(&self) -> impl Iterator<Item = u32> + '_ {
        self.iter()
            .filter(|(_, entry)| entry.enabled)
            .map(|(code, _)| code)
    }
}

impl FromIterator<(LevelDescriptor, bool)> for LevelSnapshot {
    /// Keys each pair by its descriptor's code. Later pairs win.
    fn from_iter<I: IntoIterator<Item = (LevelDescriptor, bool)>>(iter: I) -> Self {
        let mut snapshot = Self::new();
        for (descriptor, enabled) in iter {
            snapshot.insert(descriptor.code(), descriptor, enabled);
        }
        snapshot
    }
}

impl<'a> IntoIterator for &'a LevelSnapshot {
    type Item = (&'a u32, &'a SnapshotEntry);
    type IntoIter = std::collections::btree_map::Iter<'a, u32, SnapshotEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.levels.iter()
    }
}

impl fmt::Display for LevelSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (code, entry) in self.iter() {
            writeln!(
                f,
                "name: {} level: {} status: {}",
                entry.descriptor.name(),
                code,
                u8::from(entry.enabled)
            )?;
        }
        Ok(())
    }
}

/// Renders `snapshot` as the level report.
///
/// Equivalent to `snapshot.to_string()`.
#[must_use]
pub fn render(snapshot: &LevelSnapshot) -> String {
    snapshot.to_string()
}
