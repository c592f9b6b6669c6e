//! Per-run generation context.

use chrono::{DateTime, Local, TimeZone};
use std::fmt::Display;

/// Timestamp format used in class and file names, e.g. `20240131235959`.
pub const TIMESTAMP_FORMAT: &str = "%Y%m%d%H%M%S";

/// State computed once at the start of a run and threaded through the
/// assembler and the file writer so both agree on the same timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationContext {
    timestamp: String,
}

impl GenerationContext {
    pub fn now() -> Self {
        Self::at(&Local::now())
    }

    pub fn at<Tz>(datetime: &DateTime<Tz>) -> Self
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        Self {
            timestamp: datetime.format(TIMESTAMP_FORMAT).to_string(),
        }
    }

    /// Context with a preformatted timestamp.
    pub fn with_timestamp(timestamp: impl Into<String>) -> Self {
        Self {
            timestamp: timestamp.into(),
        }
    }

    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    /// `<prefix><timestamp>`
    pub fn class_name(&self, prefix: &str) -> String {
        format!("{}{}", prefix, self.timestamp)
    }

    /// `<prefix><timestamp>.<extension>`
    pub fn file_name(&self, prefix: &str, extension: &str) -> String {
        format!("{}.{}", self.class_name(prefix), extension)
    }
}
