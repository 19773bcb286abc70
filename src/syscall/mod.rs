//! The syscall surface: argument validation, vnode-op dispatch, and the
//! kernel ABI return convention.
//!
//! Every operation is a method on [`crate::proc::Proc`], one source file
//! per syscall. Each validates its arguments in the documented order,
//! translates descriptors and paths into vnode operations, and keeps
//! refcounts balanced on every exit path.

mod chdir;
mod close;
mod dup;
mod getdent;
mod link;
mod lseek;
mod mkdir;
mod mknod;
mod open;
mod read;
mod rename;
mod rmdir;
mod stat;
mod unlink;
mod write;

#[cfg(test)]
mod tests;

pub use lseek::Whence;

use crate::errno::Result;

/// Value a syscall hands back through the ABI boundary.
pub trait SysRet {
    fn into_ret(self) -> i64;
}

impl SysRet for () {
    fn into_ret(self) -> i64 {
        0
    }
}

impl SysRet for usize {
    fn into_ret(self) -> i64 {
        self as i64
    }
}

impl SysRet for u64 {
    fn into_ret(self) -> i64 {
        self as i64
    }
}

impl SysRet for i32 {
    fn into_ret(self) -> i64 {
        i64::from(self)
    }
}

/// Collapses a syscall result into the ABI convention: nonnegative on
/// success, negated error number on failure.
pub fn retval<T: SysRet>(res: Result<T>) -> i64 {
    match res {
        Ok(value) => value.into_ret(),
        Err(err) => -i64::from(err.raw()),
    }
}
