//! Error handling stuff
use displaydoc::Display;
use std::io;
use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Errors that end an invocation with a non-zero exit status
#[derive(Debug, Display, Error)]
pub enum Error {
    /// {0}
    Usage(#[from] UsageError),

    /// This tool must be run as root.
    NotRoot,
}

/// The command line didn't describe a valid request
#[derive(Debug, Display, Error)]
pub enum UsageError {
    /// Expected exactly two arguments: an action and a device
    Arguments,

    /// Device not supported: {0}
    UnsupportedDevice(String),

    /// Invalid action.
    InvalidAction(String),
}

/// Error type for [`crate::module`]
///
/// These are reported and audited, but never change the exit status.
#[derive(Debug, Display, Error)]
pub enum ModuleError {
    /// Couldn't run `{0}`: {1}
    Spawn(String, #[source] io::Error),

    /// Couldn't load module {0}: {1}
    LoadError(String, String),

    /// Couldn't unload module {0}: {1}
    UnloadError(String, String),

    /// Couldn't list loaded modules: {0}
    ListError(String),
}

/// Error type for [`crate::audit`]
///
/// Never shown to the user, see [`crate::audit::AuditLog::log`].
#[derive(Debug, Display, Error)]
pub enum AuditError {
    /// Effective user has no name
    UnknownUser,

    /// IO Failed
    Io(#[from] io::Error),
}
