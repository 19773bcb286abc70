//! Close a file descriptor.

use tracing::trace;

use crate::errno::{Errno, Result};
use crate::fd_table::Fd;
use crate::proc::Proc;

impl Proc {
    /// Empties the descriptor slot and releases the slot's reference to
    /// the open file.
    ///
    /// That is the only reference this syscall touches; references held
    /// by in-flight syscalls keep the object alive until their own exit
    /// paths drop them.
    pub async fn close(&self, fd: Fd) -> Result<()> {
        trace!(fd, "close");
        let file = self.with_files(|files| files.take(fd)).await.ok_or(Errno::BadFd)?;
        drop(file);
        Ok(())
    }
}
