//! Duplicate file descriptors.

use tracing::trace;

use crate::errno::{Errno, Result};
use crate::fd_table::{Fd, FdTable};
use crate::proc::Proc;

impl Proc {
    /// Allocates the lowest free descriptor and points it at the same
    /// open file, acquiring one more reference to it.
    pub async fn dup(&self, fd: Fd) -> Result<Fd> {
        trace!(fd, "dup");
        let file = self.fget(fd).await?;
        self.with_files(|files| {
            let newfd = files.get_empty_fd()?;
            files.install(newfd, file)?;
            Ok(newfd)
        })
        .await
    }

    /// Installs a new reference to `ofd`'s open file at `nfd`, closing
    /// whatever previously occupied `nfd`. `dup2(fd, fd)` is a no-op.
    pub async fn dup2(&self, ofd: Fd, nfd: Fd) -> Result<Fd> {
        trace!(ofd, nfd, "dup2");
        let file = self.fget(ofd).await?;
        if !FdTable::in_range(nfd) {
            return Err(Errno::BadFd);
        }
        if nfd == ofd {
            return Ok(nfd);
        }
        self.with_files(|files| {
            let previous = files.install(nfd, file)?;
            drop(previous);
            Ok(nfd)
        })
        .await
    }
}
