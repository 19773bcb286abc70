//! Create a directory.

use tracing::trace;

use crate::errno::{Errno, Result};
use crate::namev;
use crate::proc::Proc;
use crate::NAME_LEN;

impl Proc {
    /// Creates a directory at `path`. The basename must not already
    /// exist; the probing lookup and the driver call run under the
    /// namespace lock.
    pub async fn mkdir(&self, path: &str) -> Result<()> {
        trace!(path, "mkdir");
        let (parent, name) = namev::dir_namev(self, path, None).await?;
        if name.len() > NAME_LEN {
            return Err(Errno::NameTooLong);
        }
        if !parent.is_dir() {
            return Err(Errno::NotDir);
        }
        let _namespace = self.vfs().lock_namespace().await;
        match namev::lookup(&parent, name).await {
            Ok(_existing) => return Err(Errno::Exists),
            Err(Errno::NoEntry) => {}
            Err(err) => return Err(err),
        }
        parent.ops().mkdir(&parent, name).await?;
        Ok(())
    }
}
