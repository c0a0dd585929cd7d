//! Append-only audit log
//!
//! Every invocation leaves a trail of records like
//!
//! ```text
//! 2026-10-18 09:14:03,512 | user=root | action=enable | device=camera | result=success
//! ```
//!
//! Logging is best effort. A record that can't be written is dropped, and the
//! caller never finds out.
use std::{
    borrow::Cow,
    fmt,
    fs::OpenOptions,
    io::Write,
    path::{Path, PathBuf},
};

use chrono::Local;

use crate::{error::AuditError, extensions::FileExt};

/// Timestamp format for records, local time with milliseconds
const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S,%3f";

/// A single audit message
///
/// Rendered as an optional summary followed by `key=value` fields, all joined
/// by ` | `.
#[derive(Debug, Clone, Default)]
pub struct AuditEvent {
    summary: Option<&'static str>,
    fields: Vec<(Cow<'static, str>, String)>,
}

impl AuditEvent {
    /// Event with only fields
    pub fn new() -> Self {
        Self::default()
    }

    /// Event starting with free-form text, such as `execution failed`
    pub fn summary(summary: &'static str) -> Self {
        Self {
            summary: Some(summary),
            fields: Vec::new(),
        }
    }

    /// Append a `key=value` field
    ///
    /// Line breaks in `value` are escaped as `\n` and `\r`, so an event is
    /// always exactly one line.
    pub fn field(mut self, key: impl Into<Cow<'static, str>>, value: impl fmt::Display) -> Self {
        self.fields.push((key.into(), escape_line_breaks(&value.to_string())));
        self
    }
}

/// Escape `\n` and `\r` in `s`
fn escape_line_breaks(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            c => out.push(c),
        }
    }
    out
}

impl fmt::Display for AuditEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut sep = "";
        if let Some(s) = self.summary {
            f.write_str(s)?;
            sep = " | ";
        }
        for (k, v) in &self.fields {
            write!(f, "{sep}{k}={v}")?;
            sep = " | ";
        }
        Ok(())
    }
}

/// Audit log sink
///
/// Built once at startup and borrowed by everything that records events.
#[derive(Debug)]
pub struct AuditLog {
    /// Log file
    path: PathBuf,

    /// Name of the effective user, if it could be resolved.
    ///
    /// Without it, nothing is logged.
    user: Option<String>,
}

impl AuditLog {
    /// Log to `path` on behalf of `user`
    pub fn new(path: impl Into<PathBuf>, user: Option<String>) -> Self {
        Self {
            path: path.into(),
            user,
        }
    }

    /// Log file location
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Record `event`.
    ///
    /// Logging never fails the caller, errors are discarded.
    pub fn log(&self, event: &AuditEvent) {
        if let Err(e) = self.try_log(event) {
            tracing::trace!(path = %self.path.display(), error = %e, "audit record dropped");
        }
    }

    /// Record `event`, reporting failure
    ///
    /// The file is created if missing and always appended to. An exclusive
    /// advisory lock is held while the line is written.
    ///
    /// # Errors
    ///
    /// - [`AuditError::UnknownUser`] if the effective user has no name
    /// - [`AuditError::Io`] if the log couldn't be opened, locked, or written
    pub fn try_log(&self, event: &AuditEvent) -> Result<(), AuditError> {
        let user = self.user.as_deref().ok_or(AuditError::UnknownUser)?;
        let line = format!(
            "{} | user={} | {}\n",
            Local::now().format(TIME_FORMAT),
            user,
            event
        );
        let mut file = OpenOptions::new()
            .append(true)
            .create(true)
            .open(&self.path)?;
        file.lock_exclusive()?;
        let res = file.write_all(line.as_bytes());
        file.release_lock()?;
        res?;
        //
        Ok(())
    }
}
