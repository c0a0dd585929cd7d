//! Loading, unloading and querying the modules behind a [`Device`]
//!
//! # Implementation
//!
//! This shells out to `modprobe` and `lsmod` through a [`CommandRunner`].
//!
//! Every operation reports to the terminal and records an audit event, for
//! success and failure alike. Failures are also returned, so callers can
//! decide what they mean. `devmgr` itself ignores them.
use std::fmt;

use crate::{
    audit::{AuditEvent, AuditLog},
    command::CommandRunner,
    config::Config,
    device::Device,
    error::ModuleError,
};

pub type Result<T, E = ModuleError> = std::result::Result<T, E>;

/// Whether a module is currently loaded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    /// Listed by the module lister
    Enabled,

    /// Not listed
    Disabled,
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Enabled => "enabled",
            Self::Disabled => "disabled",
        })
    }
}

/// Whether `module` appears in `lsmod` style `listing`.
///
/// Only the first column of each line is compared, and must match exactly.
/// `-` and `_` are interchangeable in module names, the kernel always
/// reports `_`.
///
/// A plain substring search would also accept `uvcvideo_ext`, or a
/// `Used by` column mentioning the module, when asked for `uvcvideo`.
pub fn is_listed(listing: &str, module: &str) -> bool {
    let want = module.replace('-', "_");
    listing
        .lines()
        .filter_map(|l| l.split_whitespace().next())
        .any(|name| name.replace('-', "_") == want)
}

/// Performs module actions and audits their outcome
#[derive(Debug)]
pub struct ModuleManager<'a, R> {
    runner: &'a R,
    config: &'a Config,
    audit: &'a AuditLog,
}

impl<'a, R: CommandRunner> ModuleManager<'a, R> {
    pub fn new(runner: &'a R, config: &'a Config, audit: &'a AuditLog) -> Self {
        Self {
            runner,
            config,
            audit,
        }
    }

    /// Load the module for `device`
    ///
    /// # Errors
    ///
    /// - [`ModuleError::LoadError`] if the loader exits non-zero
    /// - [`ModuleError::Spawn`] if the loader couldn't be run
    pub fn enable(&self, device: &Device) -> Result<()> {
        let module = device.module();
        println!("[*] Enabling module: {module}");
        let res = self.modprobe(&[module]).and_then(|out| match out {
            Ok(()) => Ok(()),
            Err(stderr) => Err(ModuleError::LoadError(module.into(), stderr)),
        });
        self.finish("enable", "enabled", device, res)
    }

    /// Unload the module for `device`
    ///
    /// # Errors
    ///
    /// - [`ModuleError::UnloadError`] if the unloader exits non-zero
    /// - [`ModuleError::Spawn`] if the unloader couldn't be run
    pub fn disable(&self, device: &Device) -> Result<()> {
        let module = device.module();
        println!("[*] Disabling module: {module}");
        let res = self.modprobe(&["-r", module]).and_then(|out| match out {
            Ok(()) => Ok(()),
            Err(stderr) => Err(ModuleError::UnloadError(module.into(), stderr)),
        });
        self.finish("disable", "disabled", device, res)
    }

    /// Check whether the module for `device` is loaded
    ///
    /// Either [`State`] is a successful query.
    ///
    /// # Errors
    ///
    /// - [`ModuleError::ListError`] if the lister exits non-zero
    /// - [`ModuleError::Spawn`] if the lister couldn't be run
    pub fn status(&self, device: &Device) -> Result<State> {
        let module = device.module();
        let event = AuditEvent::new()
            .field("action", "status")
            .field("device", device.name());

        let res = self
            .runner
            .run(&self.config.lsmod, &[])
            .map_err(|e| ModuleError::Spawn(self.config.lsmod.clone(), e))
            .and_then(|out| {
                if out.success() {
                    Ok(out.stdout)
                } else {
                    Err(ModuleError::ListError(out.stderr.trim().into()))
                }
            });

        match res {
            Ok(listing) => {
                let state = if is_listed(&listing, module) {
                    println!("[+] {module} status: ENABLED");
                    State::Enabled
                } else {
                    println!("[-] {module} status: DISABLED");
                    State::Disabled
                };
                self.audit.log(&event.field("state", state));
                Ok(state)
            }
            Err(e) => {
                eprintln!("[!] Failed to determine module status.");
                self.audit.log(&event.field("result", "failure"));
                Err(e)
            }
        }
    }
}

// Private
impl<'a, R: CommandRunner> ModuleManager<'a, R> {
    /// Run the loader.
    ///
    /// The inner result is the trimmed stderr of a non-zero exit.
    fn modprobe(&self, args: &[&str]) -> Result<Result<(), String>> {
        let prog = &self.config.modprobe;
        let out = self
            .runner
            .run(prog, args)
            .map_err(|e| ModuleError::Spawn(prog.clone(), e))?;
        if out.success() {
            Ok(Ok(()))
        } else {
            Ok(Err(out.stderr.trim().to_owned()))
        }
    }

    /// Report and audit the outcome of enable/disable
    fn finish(&self, action: &str, done: &str, device: &Device, res: Result<()>) -> Result<()> {
        let module = device.module();
        let event = AuditEvent::new()
            .field("action", action.to_owned())
            .field("device", device.name());
        match &res {
            Ok(()) => {
                println!("[+] {module} {done} successfully.");
                self.audit.log(&event.field("result", "success"));
            }
            Err(e) => {
                eprintln!("[!] Failed to {action} {module}.");
                let error = match e {
                    ModuleError::LoadError(_, s) | ModuleError::UnloadError(_, s) => s.clone(),
                    e => e.to_string(),
                };
                self.audit
                    .log(&event.field("result", "failure").field("error", error));
            }
        }
        res
    }
}
