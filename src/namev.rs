//! Path resolution: single-component lookup and full-path walks.

use std::sync::Arc;

use tracing::trace;

use crate::errno::{Errno, Result};
use crate::file::OpenFlags;
use crate::proc::Proc;
use crate::vnode::VnodeRef;
use crate::{MAXPATHLEN, NAME_LEN};

/// Resolves a single `name` inside the directory `dir`.
///
/// An empty name or `"."` aliases `dir` itself. On success the returned
/// handle carries its own reference, whether it came from the alias or
/// from the driver's lookup.
pub async fn lookup(dir: &VnodeRef, name: &str) -> Result<VnodeRef> {
    if !dir.is_dir() {
        return Err(Errno::NotDir);
    }
    if name.len() > NAME_LEN {
        return Err(Errno::NameTooLong);
    }
    if name.is_empty() || name == "." {
        return Ok(Arc::clone(dir));
    }
    dir.ops().lookup(dir, name).await
}

/// Resolves `path` to its parent directory plus the unresolved basename.
///
/// `"/a/b/c"` yields the vnode of `/a/b` and `"c"`; a trailing slash
/// yields an empty basename. The final component is never looked up. A
/// leading slash starts the walk at the VFS root, otherwise at `base`
/// when given, and at the process working directory by default. The
/// basename borrows from `path`, so its length is exactly what the walk
/// saw.
pub async fn dir_namev<'p>(
    proc: &Proc,
    path: &'p str,
    base: Option<&VnodeRef>,
) -> Result<(VnodeRef, &'p str)> {
    if path.len() > MAXPATHLEN {
        return Err(Errno::NameTooLong);
    }
    if path.is_empty() {
        return Err(Errno::Invalid);
    }
    trace!(path, "dir_namev");
    let (mut dir, mut rest) = match path.strip_prefix('/') {
        Some(rest) => (proc.vfs().root(), rest),
        None => match base {
            Some(base) => (Arc::clone(base), path),
            None => (proc.cwd().await, path),
        },
    };
    while let Some(slash) = rest.find('/') {
        if !dir.is_dir() {
            return Err(Errno::NotDir);
        }
        let component = &rest[..slash];
        if component.len() > NAME_LEN {
            return Err(Errno::NameTooLong);
        }
        dir = lookup(&dir, component).await?;
        rest = &rest[slash + 1..];
    }
    Ok((dir, rest))
}

/// Resolves `path` to an existing vnode, creating a regular file when
/// `O_CREAT` is set and the final component is missing.
///
/// The lookup-then-create window runs under the namespace lock, so a
/// concurrent creator cannot slip between the two steps. The parent
/// reference and the lock release on every exit path.
pub async fn open_namev(
    proc: &Proc,
    path: &str,
    flags: OpenFlags,
    base: Option<&VnodeRef>,
) -> Result<VnodeRef> {
    let (parent, name) = dir_namev(proc, path, base).await?;
    if !parent.is_dir() {
        return Err(Errno::NotDir);
    }
    let _namespace = proc.vfs().lock_namespace().await;
    match lookup(&parent, name).await {
        Err(Errno::NoEntry) if flags.creat() => {
            trace!(path, "open_namev: creating");
            parent.ops().create(&parent, name).await
        }
        other => other,
    }
}
