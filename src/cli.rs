//! Command line parsing and dispatch
use std::fmt;

use clap::{error::ErrorKind, Parser, ValueEnum};

use crate::{
    audit::{AuditEvent, AuditLog},
    command::CommandRunner,
    config::Config,
    device::{self, Device},
    error::{Error, Result, UsageError},
    module::ModuleManager,
    privilege::{require_root, Identity},
};

/// Command line arguments
#[derive(Debug, Parser)]
#[command(
    name = "devmgr",
    version,
    about = "Enable, disable or query the kernel module behind a device"
)]
pub struct Cli {
    /// Verbose diagnostics on stderr (can be repeated: -v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// enable, disable or status
    pub action: String,

    /// Device to act on
    pub device: String,
}

/// What to do with a device
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Action {
    /// Load the module
    Enable,

    /// Unload the module
    Disable,

    /// Report whether the module is loaded
    Status,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_possible_value() {
            Some(v) => f.write_str(v.get_name()),
            None => Ok(()),
        }
    }
}

/// A validated request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Request {
    pub action: Action,
    pub device: &'static Device,
}

impl Request {
    /// Validate raw arguments, ignoring case.
    ///
    /// The device is checked first.
    ///
    /// # Errors
    ///
    /// - [`UsageError::UnsupportedDevice`] if `device` isn't in the registry
    /// - [`UsageError::InvalidAction`] if `action` isn't known
    pub fn parse(action: &str, device: &str) -> Result<Self, UsageError> {
        let device = device::resolve(device)
            .ok_or_else(|| UsageError::UnsupportedDevice(device.to_lowercase()))?;
        let action = Action::from_str(action, true)
            .map_err(|_| UsageError::InvalidAction(action.to_lowercase()))?;
        Ok(Self { action, device })
    }
}

/// Usage text, listing every action and device
pub fn usage() -> String {
    let actions: Vec<_> = Action::value_variants().iter().map(Action::to_string).collect();
    let devices: Vec<_> = device::names().collect();
    format!(
        "Usage: devmgr <{}> <device>\nSupported devices: {}",
        actions.join("|"),
        devices.join(", ")
    )
}

/// Whether a parse failure is really a request for help or version output
pub fn is_informational(err: &clap::Error) -> bool {
    matches!(
        err.kind(),
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion
    )
}

/// One invocation of `devmgr`
#[derive(Debug)]
pub struct App<'a, R> {
    config: &'a Config,
    identity: &'a Identity,
    audit: &'a AuditLog,
    runner: &'a R,
}

impl<'a, R: CommandRunner> App<'a, R> {
    pub fn new(config: &'a Config, identity: &'a Identity, audit: &'a AuditLog, runner: &'a R) -> Self {
        Self {
            config,
            identity,
            audit,
            runner,
        }
    }

    /// Check privileges, validate `args`, and carry out the request.
    ///
    /// Failure of the module operation itself is reported and audited, but
    /// still returns [`Ok`].
    ///
    /// # Errors
    ///
    /// - [`Error::NotRoot`] if not running as root. Checked before anything
    ///   else, including `args`
    /// - [`Error::Usage`] if `args` don't describe a valid request
    pub fn run(&self, args: Result<Cli, clap::Error>) -> Result<()> {
        self.audit.log(&AuditEvent::summary("tool started"));
        require_root(self.identity, self.audit)?;

        let args = args.map_err(|e| {
            tracing::debug!(error = %e, "bad arguments");
            self.reject(UsageError::Arguments)
        })?;
        let req = Request::parse(&args.action, &args.device).map_err(|e| self.reject(e))?;

        println!("[*] Requested action: {}", req.action);
        println!(
            "[*] Target device: {} ({})\n",
            req.device.name(),
            req.device.module()
        );

        let modules = ModuleManager::new(self.runner, self.config, self.audit);
        let res = match req.action {
            Action::Enable => modules.enable(req.device),
            Action::Disable => modules.disable(req.device),
            Action::Status => modules.status(req.device).map(|_| ()),
        };
        if let Err(e) = res {
            tracing::debug!(action = %req.action, device = req.device.name(), error = %e, "module action failed");
        }
        //
        Ok(())
    }

    /// Report and audit a usage error
    fn reject(&self, err: UsageError) -> Error {
        eprintln!("[!] {err}");
        if let UsageError::UnsupportedDevice(d) = &err {
            self.audit.log(
                &AuditEvent::summary("execution failed").field("unsupported device", d),
            );
        }
        eprintln!("{}", usage());
        self.audit.log(
            &AuditEvent::summary("execution failed").field("reason", "invalid usage"),
        );
        Error::Usage(err)
    }
}
