//! Running external programs
//!
//! Module management goes through [`CommandRunner`] so it can be swapped for
//! a stub that never touches the kernel.
use std::{io, process::Command};

/// Captured result of a finished program
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Output {
    /// Exit code, [`None`] if killed by a signal
    pub status: Option<i32>,

    /// Standard output, lossily decoded
    pub stdout: String,

    /// Standard error, lossily decoded
    pub stderr: String,
}

impl Output {
    /// Whether the program exited with status 0
    pub fn success(&self) -> bool {
        self.status == Some(0)
    }
}

/// Something that can run a program to completion
pub trait CommandRunner {
    /// Run `program` with `args`, wait for it, and capture its output.
    ///
    /// A non-zero exit is not an error.
    ///
    /// # Errors
    ///
    /// - If the program couldn't be started
    fn run(&self, program: &str, args: &[&str]) -> io::Result<Output>;
}

/// Runs programs on the host, found through `PATH`
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, program: &str, args: &[&str]) -> io::Result<Output> {
        tracing::debug!(program, ?args, "running");
        let out = Command::new(program).args(args).output()?;
        let out = Output {
            status: out.status.code(),
            stdout: String::from_utf8_lossy(&out.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&out.stderr).into_owned(),
        };
        tracing::debug!(program, status = ?out.status, "finished");
        Ok(out)
    }
}


#[cfg(test)]
mod tests {
    use anyhow::Result;

    use super::*;

    #[test]
    fn captures_status_and_streams() -> Result<()> {
        let out = SystemRunner.run("sh", &["-c", "echo out; echo err >&2; exit 3"])?;
        assert_eq!(out.status, Some(3));
        assert!(!out.success());
        assert_eq!(out.stdout, "out\n");
        assert_eq!(out.stderr, "err\n");
        Ok(())
    }

    #[test]
    fn zero_is_success() -> Result<()> {
        assert!(SystemRunner.run("true", &[])?.success());
        Ok(())
    }

    #[test]
    fn missing_program() {
        let e = SystemRunner
            .run("devmgr-test-no-such-program", &[])
            .unwrap_err();
        assert_eq!(e.kind(), io::ErrorKind::NotFound);
    }
}
