//! Reposition a file offset.

use num_derive::FromPrimitive;
use num_traits::FromPrimitive as _;
use tracing::trace;

use crate::errno::{Errno, Result};
use crate::fd_table::Fd;
use crate::proc::Proc;

/// Interpretation of an [`Proc::lseek`] offset.
#[derive(Debug, Copy, Clone, PartialEq, Eq, FromPrimitive)]
pub enum Whence {
    /// Offset is absolute.
    Set = 0,
    /// Offset is relative to the current position.
    Cur = 1,
    /// Offset is relative to the end of the file.
    End = 2,
}

impl Whence {
    /// Decodes the raw ABI value, rejecting anything but the three known
    /// interpretations.
    pub fn from_raw(raw: i32) -> Result<Whence> {
        Whence::from_i32(raw).ok_or(Errno::Invalid)
    }
}

impl Proc {
    /// Computes the new offset from `whence` and `offset`, rejects a
    /// negative result without touching the stored position, then stores
    /// and returns it.
    pub async fn lseek(&self, fd: Fd, offset: i64, whence: Whence) -> Result<u64> {
        trace!(fd, offset, ?whence, "lseek");
        let file = self.fget(fd).await?;
        let base = match whence {
            Whence::Set => 0,
            Whence::Cur => file.pos() as i64,
            Whence::End => file.vnode().len() as i64,
        };
        let pos = base.checked_add(offset).filter(|pos| *pos >= 0).ok_or(Errno::Invalid)?;
        file.set_pos(pos as u64);
        Ok(pos as u64)
    }
}
