//! Operator-facing migration log.
//!
//! Every migrated (or attempted) object gets exactly one [`ObjectLog`]
//! entry, created the moment the target object is allocated so that
//! partially migrated objects remain traceable. Messages accumulate on
//! that entry; deduplication is by source object identity, not call site.
//!
//! This log is the product's failure surface: per-object problems are
//! recorded here and migration continues, rather than aborting the run.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::core::schema::ObjectId;

/// Severity of a log message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    Info,
    Warning,
    Error,
}

/// One message attached to an object's log entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogMessage {
    pub text: String,
    pub severity: Severity,
}

/// Log entry for one source object.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObjectLog {
    pub source_id: ObjectId,
    /// Qualified source name, for presentation.
    pub source_name: String,
    pub target_id: Option<ObjectId>,
    pub target_name: Option<String>,
    pub messages: Vec<LogMessage>,
}

/// Ordered migration log with per-source-object deduplication.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MigrationLog {
    entries: Vec<ObjectLog>,
    #[serde(skip)]
    index: HashMap<ObjectId, usize>,
}

impl MigrationLog {
    pub fn new() -> Self {
        MigrationLog::default()
    }

    /// Entry for `source_id`, creating it if this object has not been
    /// logged yet. The id→index map is a cache; it is not serialized, so
    /// a deserialized log falls back to scanning before appending.
    fn entry_mut(&mut self, source_id: ObjectId, source_name: &str) -> &mut ObjectLog {
        let idx = match self.index.get(&source_id) {
            Some(&i) => i,
            None => {
                let i = self
                    .entries
                    .iter()
                    .position(|e| e.source_id == source_id)
                    .unwrap_or_else(|| {
                        self.entries.push(ObjectLog {
                            source_id,
                            source_name: source_name.to_string(),
                            target_id: None,
                            target_name: None,
                            messages: Vec::new(),
                        });
                        self.entries.len() - 1
                    });
                self.index.insert(source_id, i);
                i
            }
        };
        &mut self.entries[idx]
    }

    /// Record that `source` produced `target`, without any message.
    pub fn register(
        &mut self,
        source_id: ObjectId,
        source_name: &str,
        target_id: ObjectId,
        target_name: &str,
    ) {
        let entry = self.entry_mut(source_id, source_name);
        entry.target_id = Some(target_id);
        entry.target_name = Some(target_name.to_string());
    }

    /// Append a message to the object's entry, creating the entry on
    /// first use. A target reference supplied here also updates the entry.
    pub fn add_message(
        &mut self,
        source_id: ObjectId,
        source_name: &str,
        target: Option<(ObjectId, &str)>,
        text: impl Into<String>,
        severity: Severity,
    ) {
        let entry = self.entry_mut(source_id, source_name);
        if let Some((tid, tname)) = target {
            entry.target_id = Some(tid);
            entry.target_name = Some(tname.to_string());
        }
        entry.messages.push(LogMessage {
            text: text.into(),
            severity,
        });
    }

    pub fn entries(&self) -> &[ObjectLog] {
        &self.entries
    }

    /// Entry for one source object, if it was logged.
    pub fn entry_for(&self, source_id: ObjectId) -> Option<&ObjectLog> {
        match self.index.get(&source_id) {
            Some(&i) => self.entries.get(i),
            None => self.entries.iter().find(|e| e.source_id == source_id),
        }
    }

    pub fn error_count(&self) -> usize {
        self.count(Severity::Error)
    }

    pub fn warning_count(&self) -> usize {
        self.count(Severity::Warning)
    }

    fn count(&self, severity: Severity) -> usize {
        self.entries
            .iter()
            .flat_map(|e| e.messages.iter())
            .filter(|m| m.severity == severity)
            .count()
    }
}
