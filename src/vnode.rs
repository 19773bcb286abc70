//! Refcounted vnode handles and their attribute records.

pub mod ops;

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

pub use ops::{ReadDir, VnodeOps};

/// Refcounted handle to a filesystem object.
///
/// Cloning acquires a reference, dropping releases one, so every
/// acquisition is paired with exactly one release on every control path.
/// Functions that return a `VnodeRef` transfer that reference to the
/// caller.
pub type VnodeRef = Arc<Vnode>;

/// The type of a filesystem object.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum FileType {
    Regular,
    Directory,
    CharDevice,
    BlockDevice,
}

/// Major and minor device pair of a special file.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Device {
    pub major: u32,
    pub minor: u32,
}

/// Attributes reported by [`VnodeOps::stat`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stat {
    pub ino: u64,
    pub file_type: FileType,
    pub len: u64,
    pub nlink: u32,
    pub device: Option<Device>,
}

/// In-memory descriptor of a filesystem object.
///
/// Carries the identity and type of the object plus the operations table
/// its driver supplies. The cached length is maintained by the driver and
/// read by `lseek` and append-mode writes.
pub struct Vnode {
    ino: u64,
    file_type: FileType,
    device: Option<Device>,
    len: AtomicU64,
    ops: Arc<dyn VnodeOps>,
}

impl PartialEq for Vnode {
    fn eq(&self, other: &Self) -> bool {
        self.ino == other.ino
    }
}

impl Vnode {
    /// Builds a handle for a freshly materialised inode. Drivers call this
    /// from their `lookup` and creation operations, usually through the
    /// vnode cache so an inode has at most one live descriptor.
    pub fn new(
        ino: u64,
        file_type: FileType,
        device: Option<Device>,
        len: u64,
        ops: Arc<dyn VnodeOps>,
    ) -> VnodeRef {
        Arc::new(Vnode { ino, file_type, device, len: AtomicU64::new(len), ops })
    }

    pub fn ino(&self) -> u64 {
        self.ino
    }

    pub fn file_type(&self) -> FileType {
        self.file_type
    }

    pub fn is_dir(&self) -> bool {
        self.file_type == FileType::Directory
    }

    pub fn is_device(&self) -> bool {
        matches!(self.file_type, FileType::CharDevice | FileType::BlockDevice)
    }

    /// Device id of a special file.
    pub fn device(&self) -> Option<Device> {
        self.device
    }

    /// Current size in bytes.
    pub fn len(&self) -> u64 {
        self.len.load(Ordering::Acquire)
    }

    /// Updates the cached size. Drivers call this after writes.
    pub fn set_len(&self, len: u64) {
        self.len.store(len, Ordering::Release);
    }

    /// The operations table.
    pub fn ops(&self) -> &dyn VnodeOps {
        &*self.ops
    }

    /// Shared handle to the operations table, for building child vnodes.
    pub fn ops_handle(&self) -> Arc<dyn VnodeOps> {
        Arc::clone(&self.ops)
    }
}

impl fmt::Debug for Vnode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Vnode")
            .field("ino", &self.ino)
            .field("file_type", &self.file_type)
            .field("len", &self.len())
            .finish()
    }
}
