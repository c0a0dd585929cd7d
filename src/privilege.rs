//! Superuser check
use nix::unistd::{geteuid, Uid, User};

use crate::{
    audit::{AuditEvent, AuditLog},
    error::{Error, Result},
};

/// Effective identity of the running process
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    uid: u32,
    name: Option<String>,
}

impl Identity {
    /// Identity with an explicit uid and user name
    pub fn new(uid: u32, name: Option<String>) -> Self {
        Self { uid, name }
    }

    /// Effective identity of this process
    ///
    /// The name comes from the passwd database, and is [`None`] if the
    /// lookup fails or the uid has no entry.
    pub fn effective() -> Self {
        let uid = geteuid().as_raw();
        let name = match User::from_uid(Uid::from_raw(uid)) {
            Ok(u) => u.map(|u| u.name),
            Err(e) => {
                tracing::debug!(uid, error = %e, "couldn't look up effective user");
                None
            }
        };
        Self { uid, name }
    }

    /// Effective uid
    pub fn uid(&self) -> u32 {
        self.uid
    }

    /// User name, if known
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Whether this is the superuser
    pub fn is_root(&self) -> bool {
        self.uid == 0
    }
}

/// Refuse to go any further unless running as root
///
/// Prints a diagnostic and audits the refusal.
///
/// # Errors
///
/// - [`Error::NotRoot`] if `identity` isn't the superuser
pub fn require_root(identity: &Identity, audit: &AuditLog) -> Result<()> {
    if identity.is_root() {
        return Ok(());
    }
    eprintln!("[!] {}", Error::NotRoot);
    audit.log(&AuditEvent::summary("execution failed").field("reason", "not root"));
    Err(Error::NotRoot)
}
