//! Create a hard link.

use tracing::trace;

use crate::errno::{Errno, Result};
use crate::file::OpenFlags;
use crate::namev;
use crate::proc::Proc;
use crate::NAME_LEN;

impl Proc {
    /// Links the object at `from` under the new name `to`.
    ///
    /// `from` must exist; `to` must not. A driver without a `link`
    /// operation reports `ENOTDIR` through the default table entry.
    pub async fn link(&self, from: &str, to: &str) -> Result<()> {
        trace!(from, to, "link");
        let source = namev::open_namev(self, from, OpenFlags::RDONLY, None).await?;
        let (parent, name) = namev::dir_namev(self, to, None).await?;
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
        parent.ops().link(&source, &parent, name).await
    }
}
