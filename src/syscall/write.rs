//! Write to an open file.

use tracing::trace;

use crate::errno::{Errno, Result};
use crate::fd_table::Fd;
use crate::file::FMode;
use crate::proc::Proc;

impl Proc {
    /// Writes `buf` at the descriptor's current offset, advancing it by
    /// the count the driver returned.
    ///
    /// In append mode the offset is first moved to the end of the file,
    /// then the write proceeds from there. The two steps are not atomic
    /// across processes, so concurrent appends may interleave.
    pub async fn write(&self, fd: Fd, buf: &[u8]) -> Result<usize> {
        trace!(fd, len = buf.len(), "write");
        let file = self.fget(fd).await?;
        if !file.mode().contains(FMode::WRITE) {
            return Err(Errno::BadFd);
        }
        let vnode = file.vnode();
        if file.mode().contains(FMode::APPEND) {
            file.set_pos(vnode.len());
        }
        let pos = file.pos();
        let bytes = vnode.ops().write(vnode, pos, buf).await?;
        file.set_pos(pos + bytes as u64);
        Ok(bytes)
    }
}
