//! Remove a non-directory name.

use tracing::trace;

use crate::errno::{Errno, Result};
use crate::namev;
use crate::proc::Proc;
use crate::NAME_LEN;

impl Proc {
    /// Removes the name at `path`. A directory target fails with
    /// `EPERM`; directories are removed with `rmdir`.
    pub async fn unlink(&self, path: &str) -> Result<()> {
        trace!(path, "unlink");
        let (parent, name) = namev::dir_namev(self, path, None).await?;
        if name.len() > NAME_LEN {
            return Err(Errno::NameTooLong);
        }
        if !parent.is_dir() {
            return Err(Errno::NotDir);
        }
        let _namespace = self.vfs().lock_namespace().await;
        let target = namev::lookup(&parent, name).await?;
        if target.is_dir() {
            return Err(Errno::Perm);
        }
        parent.ops().unlink(&parent, name).await
    }
}
