//! Per-process state: descriptor table and working directory.

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::errno::{Errno, Result};
use crate::fd_table::{Fd, FdTable};
use crate::file::FileRef;
use crate::vfs::Vfs;
use crate::vnode::VnodeRef;

/// The process-side view of the VFS.
///
/// Owns the descriptor table and one reference to the working directory.
/// The working directory reference is taken at creation, swapped by
/// `chdir`, and released when the process drops.
pub struct Proc {
    vfs: Arc<Vfs>,
    files: Mutex<FdTable>,
    cwd: Mutex<VnodeRef>,
}

impl Proc {
    /// A process whose working directory is the VFS root.
    pub fn new(vfs: Arc<Vfs>) -> Proc {
        let cwd = vfs.root();
        Proc { vfs, files: Mutex::new(FdTable::new()), cwd: Mutex::new(cwd) }
    }

    /// A child process: inherits the working directory and duplicates the
    /// descriptor table, acquiring one more reference per occupied slot.
    pub async fn fork(&self) -> Proc {
        Proc {
            vfs: Arc::clone(&self.vfs),
            files: Mutex::new(self.files.lock().await.clone()),
            cwd: Mutex::new(self.cwd().await),
        }
    }

    pub fn vfs(&self) -> &Arc<Vfs> {
        &self.vfs
    }

    /// A fresh reference to the current working directory.
    pub async fn cwd(&self) -> VnodeRef {
        Arc::clone(&*self.cwd.lock().await)
    }

    /// Adopts `dir` as the working directory; the reference to the
    /// previous one drops here.
    pub(crate) async fn set_cwd(&self, dir: VnodeRef) {
        *self.cwd.lock().await = dir;
    }

    /// Acquires a reference to the open file at `fd`. The caller owns the
    /// returned reference; it releases when the handle drops.
    pub async fn fget(&self, fd: Fd) -> Result<FileRef> {
        self.files.lock().await.get(fd).cloned().ok_or(Errno::BadFd)
    }

    /// Runs `action` with the descriptor table locked.
    pub(crate) async fn with_files<T>(&self, action: impl FnOnce(&mut FdTable) -> T) -> T {
        let mut files = self.files.lock().await;
        action(&mut files)
    }
}
