use std::sync::Arc;

use kvfs::proc::Proc;
use kvfs::ramfs::Ramfs;
use kvfs::vfs::Vfs;

/// Mounts a fresh ramfs root and returns a process rooted in it.
pub fn boot() -> Proc {
    let vfs = Vfs::mount_root(Ramfs::mount(1)).expect("mount ramfs root");
    Proc::new(vfs)
}

/// Same, but shared so several tasks can issue syscalls concurrently.
pub fn boot_shared() -> Arc<Proc> {
    Arc::new(boot())
}
