//! The mounted namespace: root vnode and the namespace lock.

use std::sync::Arc;

use tokio::sync::{Mutex, MutexGuard};

use crate::errno::{Errno, Result};
use crate::vnode::VnodeRef;

/// A mounted virtual file system.
///
/// Holds the root vnode for the lifetime of the mount, and the single
/// namespace lock serialising directory mutations. The lock is coarse on
/// purpose; it makes the lookup-then-create window of `O_CREAT` atomic
/// with respect to every other creator and remover.
pub struct Vfs {
    root: VnodeRef,
    namespace: Mutex<()>,
}

impl Vfs {
    /// Mounts `root`, which must be a directory, as the filesystem root.
    pub fn mount_root(root: VnodeRef) -> Result<Arc<Vfs>> {
        if !root.is_dir() {
            return Err(Errno::NotDir);
        }
        Ok(Arc::new(Vfs { root, namespace: Mutex::new(()) }))
    }

    /// A fresh reference to the root vnode.
    pub fn root(&self) -> VnodeRef {
        Arc::clone(&self.root)
    }

    /// Takes the namespace lock. Every namespace mutation holds the guard
    /// across its probing lookup and the driver call.
    pub async fn lock_namespace(&self) -> MutexGuard<'_, ()> {
        self.namespace.lock().await
    }
}
