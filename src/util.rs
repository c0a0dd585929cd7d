//! Utility constants

/// Audit log location.
///
/// Every invocation appends to this file, nothing ever reads it back.
pub const LOG_PATH: &str = "/var/log/devmgr.log";

/// Program used to load, and with `-r`, unload modules.
pub const MODPROBE: &str = "modprobe";

/// Program listing currently loaded modules.
pub const LSMOD: &str = "lsmod";
