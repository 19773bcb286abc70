//! kvfs - the virtual file system syscall layer of a teaching kernel.
//!
//! Processes issue syscalls against a [`proc::Proc`]; the layer resolves
//! paths, enforces VFS-level preconditions, and delegates storage to a
//! driver behind the [`vnode::VnodeOps`] trait.

pub mod cache;
pub mod dirent;
pub mod errno;
pub mod fd_table;
pub mod file;
pub mod namev;
pub mod proc;
pub mod ramfs;
pub mod syscall;
pub mod vfs;
pub mod vnode;

pub use errno::{Errno, Result};

/// Maximum length of a single path component.
pub const NAME_LEN: usize = 28;

/// Maximum length of a full path.
pub const MAXPATHLEN: usize = 1024;

/// Number of slots in a process's file descriptor table.
pub const NFILES: usize = 32;
