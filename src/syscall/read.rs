//! Read from an open file.

use tracing::trace;

use crate::errno::{Errno, Result};
use crate::fd_table::Fd;
use crate::file::FMode;
use crate::proc::Proc;

impl Proc {
    /// Reads up to `buf.len()` bytes from the descriptor's current
    /// offset, advancing it by the count the driver returned.
    ///
    /// Fails with `EBADF` when `fd` is invalid or not open for reading,
    /// and with `EISDIR` when it refers to a directory.
    pub async fn read(&self, fd: Fd, buf: &mut [u8]) -> Result<usize> {
        trace!(fd, "read");
        let file = self.fget(fd).await?;
        if !file.mode().contains(FMode::READ) {
            return Err(Errno::BadFd);
        }
        let vnode = file.vnode();
        if vnode.is_dir() {
            return Err(Errno::IsDir);
        }
        let pos = file.pos();
        let bytes = vnode.ops().read(vnode, pos, buf).await?;
        file.set_pos(pos + bytes as u64);
        Ok(bytes)
    }
}
