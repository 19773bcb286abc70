//! Remove a directory.

use tracing::trace;

use crate::errno::{Errno, Result};
use crate::namev;
use crate::proc::Proc;
use crate::NAME_LEN;

impl Proc {
    /// Removes the directory named by `path`. A final component of `"."`
    /// is invalid and `".."` reports a non-empty directory; existence
    /// and emptiness of the target are the driver's checks.
    pub async fn rmdir(&self, path: &str) -> Result<()> {
        trace!(path, "rmdir");
        let (parent, name) = namev::dir_namev(self, path, None).await?;
        if name.len() > NAME_LEN {
            return Err(Errno::NameTooLong);
        }
        if !parent.is_dir() {
            return Err(Errno::NotDir);
        }
        if name == "." {
            return Err(Errno::Invalid);
        }
        if name == ".." {
            return Err(Errno::NotEmpty);
        }
        let _namespace = self.vfs().lock_namespace().await;
        parent.ops().rmdir(&parent, name).await
    }
}
