//! Create a device special file.

use tracing::trace;

use crate::errno::{Errno, Result};
use crate::namev;
use crate::proc::Proc;
use crate::vnode::{Device, FileType};
use crate::NAME_LEN;

impl Proc {
    /// Creates a special file of the given type at `path`.
    ///
    /// Only character and block devices may be created this way; the
    /// basename must not already exist. The probing lookup and the
    /// driver call run under the namespace lock, and the parent
    /// reference is held across the driver call.
    pub async fn mknod(&self, path: &str, file_type: FileType, device: Device) -> Result<()> {
        trace!(path, ?file_type, "mknod");
        if !matches!(file_type, FileType::CharDevice | FileType::BlockDevice) {
            return Err(Errno::Invalid);
        }
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
        parent.ops().mknod(&parent, name, file_type, device).await?;
        Ok(())
    }
}
