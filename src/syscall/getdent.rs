//! Read one directory entry.

use tracing::trace;

use crate::dirent::{Dirent, DIRENT_SIZE};
use crate::errno::{Errno, Result};
use crate::fd_table::Fd;
use crate::proc::Proc;

impl Proc {
    /// Reads the directory entry at the current offset into `dirent` and
    /// advances the offset by the bytes the driver consumed.
    ///
    /// Returns the encoded record size on progress and zero at end of
    /// directory. Fails with `ENOTDIR` when the descriptor does not
    /// refer to a directory.
    pub async fn getdent(&self, fd: Fd, dirent: &mut Dirent) -> Result<usize> {
        trace!(fd, "getdent");
        let file = self.fget(fd).await?;
        let vnode = file.vnode();
        if !vnode.is_dir() {
            return Err(Errno::NotDir);
        }
        let pos = file.pos();
        match vnode.ops().readdir(vnode, pos).await? {
            Some((entry, consumed)) => {
                file.set_pos(pos + consumed as u64);
                *dirent = entry;
                Ok(DIRENT_SIZE)
            }
            None => Ok(0),
        }
    }
}
