//! Open file objects and their access modes.

use std::ops::BitOr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::errno::{Errno, Result};
use crate::vnode::VnodeRef;

/// Refcounted handle to an open file. Several descriptors may share one.
pub type FileRef = Arc<OpenFile>;

/// Access mode bits of an open file.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct FMode(u32);

impl FMode {
    pub const READ: FMode = FMode(0x1);
    pub const WRITE: FMode = FMode(0x2);
    pub const APPEND: FMode = FMode(0x4);

    pub const fn empty() -> FMode {
        FMode(0)
    }

    pub fn contains(self, other: FMode) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn insert(&mut self, other: FMode) {
        self.0 |= other.0;
    }
}

impl BitOr for FMode {
    type Output = FMode;

    fn bitor(self, rhs: FMode) -> FMode {
        FMode(self.0 | rhs.0)
    }
}

/// The open(2) flag bits this layer understands. The low two bits select
/// the access mode; `O_CREAT` is the only flag the name resolver
/// interprets.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct OpenFlags(pub u32);

impl OpenFlags {
    pub const RDONLY: OpenFlags = OpenFlags(0x0);
    pub const WRONLY: OpenFlags = OpenFlags(0x1);
    pub const RDWR: OpenFlags = OpenFlags(0x2);
    pub const CREAT: OpenFlags = OpenFlags(0x100);
    pub const APPEND: OpenFlags = OpenFlags(0x400);

    const ACCESS_MASK: u32 = 0x3;
    const KNOWN: u32 = Self::ACCESS_MASK | Self::CREAT.0 | Self::APPEND.0;

    pub fn creat(self) -> bool {
        self.0 & Self::CREAT.0 != 0
    }

    /// Translates the flag bits into an [`FMode`], rejecting unknown bits
    /// and the invalid access mode 3.
    pub fn fmode(self) -> Result<FMode> {
        if self.0 & !Self::KNOWN != 0 {
            return Err(Errno::Invalid);
        }
        let mut mode = match self.0 & Self::ACCESS_MASK {
            0x0 => FMode::READ,
            0x1 => FMode::WRITE,
            0x2 => FMode::READ | FMode::WRITE,
            _ => return Err(Errno::Invalid),
        };
        if self.0 & Self::APPEND.0 != 0 {
            mode.insert(FMode::APPEND);
        }
        Ok(mode)
    }
}

impl BitOr for OpenFlags {
    type Output = OpenFlags;

    fn bitor(self, rhs: OpenFlags) -> OpenFlags {
        OpenFlags(self.0 | rhs.0)
    }
}

/// An open file: a vnode, an access mode, and a byte cursor.
///
/// The cursor is stored unsigned, so it never goes negative; `lseek`
/// rejects any offset arithmetic that would. Two threads sharing a
/// descriptor may interleave inside a blocking read or write and observe
/// either order of cursor updates, which matches POSIX practice.
#[derive(Debug)]
pub struct OpenFile {
    vnode: VnodeRef,
    mode: FMode,
    pos: AtomicU64,
}

impl OpenFile {
    /// Opens `vnode` with `mode` and the cursor at zero.
    pub fn new(vnode: VnodeRef, mode: FMode) -> FileRef {
        Arc::new(OpenFile { vnode, mode, pos: AtomicU64::new(0) })
    }

    pub fn vnode(&self) -> &VnodeRef {
        &self.vnode
    }

    pub fn mode(&self) -> FMode {
        self.mode
    }

    /// Current byte offset.
    pub fn pos(&self) -> u64 {
        self.pos.load(Ordering::Acquire)
    }

    pub(crate) fn set_pos(&self, pos: u64) {
        self.pos.store(pos, Ordering::Release);
    }
}
