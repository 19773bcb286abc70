//! Query object attributes by path.

use tracing::trace;

use crate::errno::{Errno, Result};
use crate::namev;
use crate::proc::Proc;
use crate::vnode::Stat;
use crate::NAME_LEN;

impl Proc {
    /// Resolves `path` and returns the driver's attribute record for the
    /// target. The basename length used here is the one the resolver
    /// produced.
    pub async fn stat(&self, path: &str) -> Result<Stat> {
        trace!(path, "stat");
        let (parent, name) = namev::dir_namev(self, path, None).await?;
        if name.len() > NAME_LEN {
            return Err(Errno::NameTooLong);
        }
        if !parent.is_dir() {
            return Err(Errno::NotDir);
        }
        let target = namev::lookup(&parent, name).await?;
        target.ops().stat(&target).await
    }
}
