//! The operations table a filesystem driver supplies for its vnodes.

use async_trait::async_trait;

use crate::dirent::Dirent;
use crate::errno::{Errno, Result};
use crate::vnode::{Device, FileType, Stat, Vnode, VnodeRef};

/// One step of directory iteration: the entry plus the number of bytes of
/// directory offset it consumed, or `None` at end of directory.
pub type ReadDir = Option<(Dirent, usize)>;

/// Per-vnode driver callbacks.
///
/// Any operation may be left to its default body, which stands in for an
/// absent table entry: directory operations report `NotDir`, the rest
/// `NotSupported`. Operations that produce a vnode return a fresh
/// reference owned by the caller. Any operation may block on I/O.
#[async_trait]
pub trait VnodeOps: Send + Sync {
    /// Finds `name` in the directory `dir`. The layer has already handled
    /// the empty and `"."` aliases and checked the name length.
    async fn lookup(&self, _dir: &Vnode, _name: &str) -> Result<VnodeRef> {
        Err(Errno::NotDir)
    }

    /// Creates a regular file `name` in `dir`.
    async fn create(&self, _dir: &Vnode, _name: &str) -> Result<VnodeRef> {
        Err(Errno::NotSupported)
    }

    /// Creates a directory `name` in `dir`.
    async fn mkdir(&self, _dir: &Vnode, _name: &str) -> Result<VnodeRef> {
        Err(Errno::NotSupported)
    }

    /// Creates a device special file `name` in `dir`.
    async fn mknod(
        &self,
        _dir: &Vnode,
        _name: &str,
        _file_type: FileType,
        _device: Device,
    ) -> Result<VnodeRef> {
        Err(Errno::NotSupported)
    }

    /// Links `source` under `dir` as `name`.
    async fn link(&self, _source: &Vnode, _dir: &Vnode, _name: &str) -> Result<()> {
        Err(Errno::NotDir)
    }

    /// Removes the non-directory entry `name` from `dir`.
    async fn unlink(&self, _dir: &Vnode, _name: &str) -> Result<()> {
        Err(Errno::NotSupported)
    }

    /// Removes the directory entry `name` from `dir`. The driver enforces
    /// existence and emptiness.
    async fn rmdir(&self, _dir: &Vnode, _name: &str) -> Result<()> {
        Err(Errno::NotDir)
    }

    /// Reads from byte offset `off` into `buf`, returning the byte count.
    async fn read(&self, _vnode: &Vnode, _off: u64, _buf: &mut [u8]) -> Result<usize> {
        Err(Errno::NotSupported)
    }

    /// Writes `buf` at byte offset `off`, returning the byte count. The
    /// driver updates [`Vnode::set_len`] when the file grows.
    async fn write(&self, _vnode: &Vnode, _off: u64, _buf: &[u8]) -> Result<usize> {
        Err(Errno::NotSupported)
    }

    /// Produces the entry at directory offset `off`.
    async fn readdir(&self, _dir: &Vnode, _off: u64) -> Result<ReadDir> {
        Err(Errno::NotDir)
    }

    /// Fills an attribute record for the object.
    async fn stat(&self, _vnode: &Vnode) -> Result<Stat> {
        Err(Errno::NotSupported)
    }
}
