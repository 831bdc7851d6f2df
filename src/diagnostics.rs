//! Collect diagnostics across a whole run, to be reported once processing is over.
//!
//! A batch must not stop at its first bad record: every stage appends what went wrong to a
//! [Collector], and the operator gets the full list in a single report at the end.

use std::collections::BTreeMap;

use serde::Serialize;
use uuid::Uuid;

use crate::CustomerId;

/// Severity of a [DiagnosticRecord].
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Debug,
    Info,
    Warning,
    Error,
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Debug => "DEBUG",
            Self::Info => "INFO",
            Self::Warning => "WARNING",
            Self::Error => "ERROR",
        })
    }
}

/// The kinds of values which can be attached to a diagnostic.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(untagged)]
pub enum ContextValue {
    Text(String),
    Integer(i64),
    Identifier(CustomerId),
}

impl From<&str> for ContextValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for ContextValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for ContextValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<CustomerId> for ContextValue {
    fn from(value: CustomerId) -> Self {
        Self::Identifier(value)
    }
}

/// Additional key/value details attached to a diagnostic, kept sorted by key.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Context(BTreeMap<String, ContextValue>);

impl Context {
    pub fn new() -> Self {
        Default::default()
    }

    /// Builder-style insertion of a new detail.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<ContextValue>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&ContextValue> {
        self.0.get(key)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// A single entry of the [Collector]. Never modified once created.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DiagnosticRecord {
    pub id: Uuid,
    pub message: String,
    pub level: Level,
    pub additional: Context,
}

impl std::fmt::Display for DiagnosticRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let additional = serde_json::to_string(&self.additional).map_err(|_| std::fmt::Error)?;
        write!(
            f,
            "ID: {} | level: {} | message: {} | {}",
            self.id, self.level, self.message, additional
        )
    }
}

/// Append-only log of the diagnostics raised during a run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Collector {
    records: Vec<DiagnosticRecord>,
}

impl Collector {
    pub fn new() -> Self {
        Default::default()
    }

    /// Record a new diagnostic, identified by a freshly generated id.
    pub fn add(&mut self, message: impl Into<String>, level: Level, additional: Context) {
        let record = DiagnosticRecord {
            id: Uuid::new_v4(),
            message: message.into(),
            level,
            additional,
        };
        // Records are reported at the end of the run, only trace them as they come
        tracing::debug!(id = %record.id, level = %record.level, "{}", record.message);
        self.records.push(record);
    }

    pub fn debug(&mut self, message: impl Into<String>, additional: Context) {
        self.add(message, Level::Debug, additional)
    }

    pub fn error(&mut self, message: impl Into<String>, additional: Context) {
        self.add(message, Level::Error, additional)
    }

    /// All records, in insertion order.
    pub fn records(&self) -> &[DiagnosticRecord] {
        &self.records
    }

    /// How many records were raised at the given level.
    pub fn count(&self, level: Level) -> usize {
        self.records.iter().filter(|r| r.level == level).count()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Write every record, one per line. Reporting does not consume the records.
    pub fn report<W: std::io::Write>(&self, writer: &mut W) -> std::io::Result<()> {
        for record in &self.records {
            writeln!(writer, "{}", record)?;
        }
        Ok(())
    }
}
