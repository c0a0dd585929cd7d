//! Toggle and query the kernel modules behind common devices
//!
//! `devmgr` maps friendly device names, like `camera`, to the kernel module
//! providing them, and loads or unloads that module on request. Only root may
//! use it, and every attempt is recorded in an append-only audit log.
//!
//! # Implementation details
//!
//! Module management is delegated to `modprobe` and `lsmod`, run through a
//! [`command::CommandRunner`] so tests never touch the real kernel.
//!
//! Failing to load or unload a module is reported and audited, but isn't an
//! error as far as the exit status is concerned. Only bad usage and missing
//! privileges are.

pub mod audit;
pub mod cli;
pub mod command;
pub mod config;
pub mod device;
pub mod error;
pub mod extensions;
pub mod module;
pub mod privilege;
mod util;
