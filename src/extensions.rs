//! Linux-specific extensions to std types
use std::{fs::File, io};

use rustix::{
    fd::{AsFd, BorrowedFd},
    fs::{flock, FlockOperation},
    io::Errno,
};

/// Internal implementation details
mod imp {
    use super::*;

    pub trait FileExtSeal: AsFd {}

    impl FileExtSeal for File {}
}

/// Run `flock(2)`, retrying on `EINTR`
fn flock_retry(fd: BorrowedFd<'_>, op: FlockOperation) -> io::Result<()> {
    loop {
        match flock(fd, op) {
            Ok(()) => return Ok(()),
            Err(Errno::INTR) => continue,
            Err(e) => return Err(e.into()),
        }
    }
}

/// Extends [`File`] with linux-specific methods
///
/// This trait is sealed
pub trait FileExt: imp::FileExtSeal {
    /// Apply an exclusive advisory lock
    ///
    /// Locks are associated with a file descriptor, and any duplicates
    /// refer to the same lock. Closing the file releases it.
    ///
    /// This may block until the lock can be acquired.
    ///
    /// # Implementation
    ///
    /// This uses `flock(2)`.
    ///
    /// This will retry as necessary on `EINTR`
    ///
    /// # Errors
    ///
    /// - Kernel runs out of memory for lock records
    fn lock_exclusive(&self) -> io::Result<()> {
        flock_retry(self.as_fd(), FlockOperation::LockExclusive)
    }

    /// Remove an advisory lock
    ///
    /// # Implementation
    ///
    /// This uses `flock(2)`.
    ///
    /// This will retry as necessary on `EINTR`
    fn release_lock(&self) -> io::Result<()> {
        flock_retry(self.as_fd(), FlockOperation::Unlock)
    }
}

impl FileExt for File {}

#[cfg(test)]
mod tests {
    use anyhow::Result;

    use super::*;

    #[test]
    fn lock_unlock() -> Result<()> {
        let file = tempfile::tempfile()?;
        file.lock_exclusive()?;
        // Re-locking through the same descriptor is a no-op
        file.lock_exclusive()?;
        file.release_lock()?;
        Ok(())
    }
}
