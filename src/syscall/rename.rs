//! Rename by link and remove.

use tracing::trace;

use crate::errno::Result;
use crate::file::OpenFlags;
use crate::namev;
use crate::proc::Proc;

impl Proc {
    /// Renames `old` to `new` by linking the new name and then removing
    /// the old one.
    ///
    /// The two steps are not atomic: a failure between them leaves both
    /// names in place.
    pub async fn rename(&self, old: &str, new: &str) -> Result<()> {
        trace!(old, new, "rename");
        self.link(old, new).await?;
        let target = namev::open_namev(self, old, OpenFlags::RDONLY, None).await?;
        if target.is_dir() {
            drop(target);
            self.rmdir(old).await
        } else {
            drop(target);
            self.unlink(old).await
        }
    }
}
