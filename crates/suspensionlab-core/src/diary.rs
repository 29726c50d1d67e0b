//! Setup diary
//!
//! An append-only record of setups that passed validation. Each entry keeps
//! the accepted [`CaptureSetup`], when it was recorded, an optional rider
//! note and the warnings that were present at the time. Two entries can be
//! compared field by field to see what was changed between rides.
//!
//! The diary is stored as pretty-printed JSON. Unknown wire fields carried by
//! a decoded setup are not part of the JSON form and are not kept.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info, warn};
use uuid::Uuid;

pub use crate::error::DiaryError;

use crate::error::Result;
use crate::schema::CaptureSetup;
use crate::validation::{ValidationFinding, Validator, WarningPolicy};

/// One accepted setup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetupEntry {
    pub id: Uuid,
    pub recorded_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    pub setup: CaptureSetup,
    /// Warnings reported when the setup was accepted
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<ValidationFinding>,
}

/// A single field that differs between two setups
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldChange {
    /// Dotted path, e.g. "bike.rear_tire.pressure"
    pub path: String,
    /// Value before; `None` when the field did not exist
    pub before: Option<Value>,
    /// Value after; `None` when the field no longer exists
    pub after: Option<Value>,
}

/// Ordered history of accepted setups
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SetupDiary {
    entries: Vec<SetupEntry>,
}

impl SetupDiary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a diary file. A missing file yields an empty diary.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            debug!(path = %path.display(), "diary file not found, starting empty");
            return Ok(Self::new());
        }
        let content = fs::read_to_string(path)?;
        let diary: Self = serde_json::from_str(&content)?;
        debug!(path = %path.display(), entries = diary.len(), "diary loaded");
        Ok(diary)
    }

    /// Write the diary as pretty JSON, creating parent directories
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        debug!(path = %path.display(), entries = self.len(), "diary saved");
        Ok(())
    }

    /// Validate `setup` with the built-in rules and append it if it passes
    pub fn record(
        &mut self,
        setup: CaptureSetup,
        note: Option<String>,
        policy: WarningPolicy,
    ) -> Result<&SetupEntry> {
        self.record_with(&Validator::new(), setup, note, policy)
    }

    /// Like [`record`](Self::record) with a caller-supplied validator
    pub fn record_with(
        &mut self,
        validator: &Validator,
        setup: CaptureSetup,
        note: Option<String>,
        policy: WarningPolicy,
    ) -> Result<&SetupEntry> {
        let report = validator.validate_setup(&setup);
        let warnings = match report.into_result(policy) {
            Ok(warnings) => warnings,
            Err(rejected) => {
                warn!(
                    errors = rejected.errors.len(),
                    warnings = rejected.warnings.len(),
                    ?policy,
                    "setup rejected, diary unchanged"
                );
                return Err(DiaryError::Rejected(rejected));
            }
        };

        let entry = SetupEntry {
            id: Uuid::new_v4(),
            recorded_at: Utc::now(),
            note,
            setup,
            warnings,
        };
        info!(id = %entry.id, warnings = entry.warnings.len(), "setup recorded");
        self.entries.push(entry);

        let index = self.entries.len() - 1;
        Ok(&self.entries[index])
    }

    /// Entries in recording order
    pub fn entries(&self) -> &[SetupEntry] {
        &self.entries
    }

    pub fn latest(&self) -> Option<&SetupEntry> {
        self.entries.last()
    }

    pub fn get(&self, id: Uuid) -> Option<&SetupEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Field-level changes from entry `from` to entry `to`
    pub fn changes(&self, from: Uuid, to: Uuid) -> Result<Vec<FieldChange>> {
        let before = self.get(from).ok_or(DiaryError::EntryNotFound(from))?;
        let after = self.get(to).ok_or(DiaryError::EntryNotFound(to))?;
        changes_between(&before.setup, &after.setup)
    }

    /// Each entry paired with its changes from the preceding entry.
    /// The first entry has no changes.
    pub fn timeline(&self) -> Result<Vec<(&SetupEntry, Vec<FieldChange>)>> {
        let mut out = Vec::with_capacity(self.entries.len());
        let mut previous: Option<&SetupEntry> = None;
        for entry in &self.entries {
            let changes = match previous {
                Some(prev) => changes_between(&prev.setup, &entry.setup)?,
                None => Vec::new(),
            };
            out.push((entry, changes));
            previous = Some(entry);
        }
        Ok(out)
    }
}

/// Field-level changes between two setups, sorted by path
pub fn changes_between(before: &CaptureSetup, after: &CaptureSetup) -> Result<Vec<FieldChange>> {
    let mut old = BTreeMap::new();
    let mut new = BTreeMap::new();
    collect_leaves(&serde_json::to_value(before)?, "", &mut old);
    collect_leaves(&serde_json::to_value(after)?, "", &mut new);

    let mut changes = Vec::new();
    for (path, value) in &old {
        match new.get(path) {
            Some(other) if other == value => {}
            other => changes.push(FieldChange {
                path: path.clone(),
                before: Some(value.clone()),
                after: other.cloned(),
            }),
        }
    }
    for (path, value) in new {
        if !old.contains_key(&path) {
            changes.push(FieldChange {
                path,
                before: None,
                after: Some(value),
            });
        }
    }
    changes.sort_by(|a, b| a.path.cmp(&b.path));
    Ok(changes)
}

fn collect_leaves(value: &Value, path: &str, leaves: &mut BTreeMap<String, Value>) {
    match value {
        Value::Object(obj) => {
            for (key, val) in obj {
                let next = if path.is_empty() {
                    key.clone()
                } else {
                    format!("{}.{}", path, key)
                };
                collect_leaves(val, &next, leaves);
            }
        }
        Value::Array(arr) => {
            for (i, val) in arr.iter().enumerate() {
                collect_leaves(val, &format!("{}[{}]", path, i), leaves);
            }
        }
        _ => {
            leaves.insert(path.to_string(), value.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{
        BikeConfiguration, Config, FrameGeometry, HardwareConfig, PressureUnit, SuspensionSetup,
        TireSetup, WheelsConfig,
    };
    use serde_json::json;

    fn setup(rear_bar: f32) -> CaptureSetup {
        let bike = BikeConfiguration::new(
            FrameGeometry::hardtail(
                SuspensionSetup::air("Fox 34", 120, 70)
                    .with_sag(17)
                    .with_damping(5, 7, 9),
            ),
            WheelsConfig::new("Stan's Flow", "aluminium"),
            TireSetup::new("Dissector", "tubeless", 1.7, PressureUnit::Bar),
            TireSetup::new("Rekon", "tubeless", rear_bar, PressureUnit::Bar),
            HardwareConfig::new(2, 1000),
        );
        CaptureSetup::new(Config::new(2, 1000), bike)
    }

    #[test]
    fn test_record_appends_valid_setup() {
        let mut diary = SetupDiary::new();
        let id = diary
            .record(setup(1.8), Some("first ride".into()), WarningPolicy::Allow)
            .unwrap()
            .id;
        assert_eq!(diary.len(), 1);
        assert_eq!(diary.latest().map(|e| e.id), Some(id));
        assert_eq!(diary.get(id).and_then(|e| e.note.as_deref()), Some("first ride"));
    }

    #[test]
    fn test_warning_policy_controls_acceptance() {
        let mut diary = SetupDiary::new();
        // rear below front raises a balance warning
        let entry = diary.record(setup(1.5), None, WarningPolicy::Allow).unwrap();
        assert_eq!(entry.warnings.len(), 1);

        let err = diary.record(setup(1.5), None, WarningPolicy::Block).unwrap_err();
        let rejected = err.rejection().unwrap();
        assert!(rejected.errors.is_empty());
        assert_eq!(rejected.warnings.len(), 1);
        assert_eq!(diary.len(), 1);
    }

    #[test]
    fn test_invalid_setup_rejected() {
        let mut diary = SetupDiary::new();
        let mut bad = setup(1.8);
        bad.bike.hardware.recording_freq = 500;
        assert!(matches!(
            diary.record(bad, None, WarningPolicy::Allow),
            Err(DiaryError::Rejected(_))
        ));
        assert!(diary.is_empty());
    }

    #[test]
    fn test_changes_between_entries() {
        let mut diary = SetupDiary::new();
        let a = diary.record(setup(1.8), None, WarningPolicy::Allow).unwrap().id;
        let b = diary.record(setup(1.9), None, WarningPolicy::Allow).unwrap().id;

        let changes = diary.changes(a, b).unwrap();
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].path, "bike.rear_tire.pressure");
        assert!(diary.changes(a, a).unwrap().is_empty());
        assert!(matches!(
            diary.changes(a, Uuid::nil()),
            Err(DiaryError::EntryNotFound(_))
        ));
    }

    #[test]
    fn test_geometry_switch_lists_added_and_removed_fields() {
        let before = setup(1.8);
        let mut after = before.clone();
        after.bike.geometry = FrameGeometry::rigid();

        let changes = changes_between(&before, &after).unwrap();
        let kind = changes
            .iter()
            .find(|c| c.path == "bike.geometry.kind")
            .unwrap();
        assert_eq!(kind.before, Some(json!("hardtail")));
        assert_eq!(kind.after, Some(json!("rigid")));
        assert!(changes
            .iter()
            .any(|c| c.path == "bike.geometry.fork.model" && c.after.is_none()));
    }

    #[test]
    fn test_timeline_pairs_with_previous() {
        let mut diary = SetupDiary::new();
        diary.record(setup(1.8), None, WarningPolicy::Allow).unwrap();
        diary.record(setup(2.0), None, WarningPolicy::Allow).unwrap();
        let timeline = diary.timeline().unwrap();
        assert!(timeline[0].1.is_empty());
        assert_eq!(timeline[1].1.len(), 1);
    }
}
