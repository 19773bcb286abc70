//! Change the working directory.

use tracing::trace;

use crate::errno::{Errno, Result};
use crate::file::OpenFlags;
use crate::namev;
use crate::proc::Proc;

impl Proc {
    /// Makes the directory at `path` the working directory, releasing
    /// the reference to the previous one and adopting the new.
    pub async fn chdir(&self, path: &str) -> Result<()> {
        trace!(path, "chdir");
        let dir = namev::open_namev(self, path, OpenFlags::RDONLY, None).await?;
        if !dir.is_dir() {
            return Err(Errno::NotDir);
        }
        self.set_cwd(dir).await;
        Ok(())
    }
}
