//! Open (and possibly create) a file.

use tracing::trace;

use crate::errno::{Errno, Result};
use crate::fd_table::Fd;
use crate::file::{FMode, OpenFile, OpenFlags};
use crate::namev;
use crate::proc::Proc;

impl Proc {
    /// Translates `flags` into an access mode, resolves `path` (creating
    /// the final component when `O_CREAT` is set), and installs a fresh
    /// open file at the lowest free descriptor with the cursor at zero.
    ///
    /// Opening a directory for writing fails with `EISDIR`.
    pub async fn open(&self, path: &str, flags: OpenFlags) -> Result<Fd> {
        trace!(path, ?flags, "open");
        let mode = flags.fmode()?;
        let vnode = namev::open_namev(self, path, flags, None).await?;
        if vnode.is_dir() && mode.contains(FMode::WRITE) {
            return Err(Errno::IsDir);
        }
        let file = OpenFile::new(vnode, mode);
        self.with_files(|files| {
            let fd = files.get_empty_fd()?;
            files.install(fd, file)?;
            Ok(fd)
        })
        .await
    }
}
