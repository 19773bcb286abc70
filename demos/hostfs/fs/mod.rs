//! Host-directory driver: mirrors a directory of the host filesystem
//! through the vnode operations table. Exercised by the integration
//! tests to show the syscall layer is driver-agnostic.

mod hostfs;
mod utils;

use std::path::PathBuf;

use kvfs::dirent::{Dirent, DIRENT_SIZE};
use kvfs::errno::{Errno, Result};
use kvfs::vnode::{ReadDir, Stat, Vnode, VnodeOps, VnodeRef};

use tokio::fs::{self, File, OpenOptions};
use tokio::io::{AsyncReadExt, AsyncSeekExt, AsyncWriteExt};

pub use hostfs::Hostfs;

use utils::{file_type_of, map_io_error, nlink_of};

#[async_trait::async_trait]
impl VnodeOps for Hostfs {
    async fn lookup(&self, dir: &Vnode, name: &str) -> Result<VnodeRef> {
        let child_rel = match name {
            "." => self.rel_of(dir.ino()).await?,
            ".." => {
                let rel = self.rel_of(dir.ino()).await?;
                rel.parent().map(|parent| parent.to_path_buf()).unwrap_or_default()
            }
            _ => self.child_rel(dir.ino(), name).await?,
        };
        let meta = fs::symlink_metadata(self.full_path(&child_rel))
            .await
            .map_err(map_io_error)?;
        let ino = self.ensure_entry(child_rel).await;
        Ok(self.vnode_for(ino, file_type_of(&meta)?, meta.len(), dir.ops_handle()))
    }

    async fn create(&self, dir: &Vnode, name: &str) -> Result<VnodeRef> {
        let child_rel = self.child_rel(dir.ino(), name).await?;
        let child_abs = self.full_path(&child_rel);
        OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&child_abs)
            .await
            .map_err(map_io_error)?;
        let meta = fs::symlink_metadata(&child_abs).await.map_err(map_io_error)?;
        let ino = self.ensure_entry(child_rel).await;
        Ok(self.vnode_for(ino, file_type_of(&meta)?, meta.len(), dir.ops_handle()))
    }

    async fn mkdir(&self, dir: &Vnode, name: &str) -> Result<VnodeRef> {
        let child_rel = self.child_rel(dir.ino(), name).await?;
        let child_abs = self.full_path(&child_rel);
        fs::create_dir(&child_abs).await.map_err(map_io_error)?;
        let meta = fs::symlink_metadata(&child_abs).await.map_err(map_io_error)?;
        let ino = self.ensure_entry(child_rel).await;
        Ok(self.vnode_for(ino, file_type_of(&meta)?, meta.len(), dir.ops_handle()))
    }

    async fn link(&self, source: &Vnode, dir: &Vnode, name: &str) -> Result<()> {
        if source.is_dir() {
            return Err(Errno::Perm);
        }
        let source_rel = self.rel_of(source.ino()).await?;
        let child_rel = self.child_rel(dir.ino(), name).await?;
        fs::hard_link(self.full_path(&source_rel), self.full_path(&child_rel))
            .await
            .map_err(map_io_error)
    }

    async fn unlink(&self, dir: &Vnode, name: &str) -> Result<()> {
        let child_rel = self.child_rel(dir.ino(), name).await?;
        let meta = fs::symlink_metadata(self.full_path(&child_rel))
            .await
            .map_err(map_io_error)?;
        if meta.is_dir() {
            return Err(Errno::Perm);
        }
        fs::remove_file(self.full_path(&child_rel)).await.map_err(map_io_error)?;
        self.remove_entry(&child_rel).await;
        Ok(())
    }

    async fn rmdir(&self, dir: &Vnode, name: &str) -> Result<()> {
        let child_rel = self.child_rel(dir.ino(), name).await?;
        fs::remove_dir(self.full_path(&child_rel)).await.map_err(map_io_error)?;
        self.remove_entry(&child_rel).await;
        Ok(())
    }

    async fn read(&self, vnode: &Vnode, off: u64, buf: &mut [u8]) -> Result<usize> {
        let abs = self.full_path(&self.rel_of(vnode.ino()).await?);
        let meta = fs::metadata(&abs).await.map_err(map_io_error)?;
        if off >= meta.len() {
            return Ok(0);
        }
        let count = buf.len().min((meta.len() - off) as usize);
        let mut file = File::open(&abs).await.map_err(map_io_error)?;
        file.seek(std::io::SeekFrom::Start(off)).await.map_err(map_io_error)?;
        file.read_exact(&mut buf[..count]).await.map_err(map_io_error)?;
        Ok(count)
    }

    async fn write(&self, vnode: &Vnode, off: u64, buf: &[u8]) -> Result<usize> {
        let abs = self.full_path(&self.rel_of(vnode.ino()).await?);
        let mut file = OpenOptions::new().write(true).open(&abs).await.map_err(map_io_error)?;
        file.seek(std::io::SeekFrom::Start(off)).await.map_err(map_io_error)?;
        file.write_all(buf).await.map_err(map_io_error)?;
        file.flush().await.map_err(map_io_error)?;
        let meta = fs::metadata(&abs).await.map_err(map_io_error)?;
        vnode.set_len(meta.len());
        Ok(buf.len())
    }

    async fn readdir(&self, dir: &Vnode, off: u64) -> Result<ReadDir> {
        let rel = self.rel_of(dir.ino()).await?;
        let index = usize::try_from(off).map_err(|_| Errno::Invalid)? / DIRENT_SIZE;
        let entry = match index {
            0 => Some(Dirent::new(dir.ino(), ".")?),
            1 => {
                let parent_rel: PathBuf =
                    rel.parent().map(|parent| parent.to_path_buf()).unwrap_or_default();
                let parent_ino = self.ensure_entry(parent_rel).await;
                Some(Dirent::new(parent_ino, "..")?)
            }
            _ => {
                let mut names = Vec::new();
                let mut entries =
                    fs::read_dir(self.full_path(&rel)).await.map_err(map_io_error)?;
                while let Some(entry) = entries.next_entry().await.map_err(map_io_error)? {
                    names.push(entry.file_name().to_string_lossy().into_owned());
                }
                names.sort();
                match names.into_iter().nth(index - 2) {
                    Some(name) => {
                        let child_rel = rel.join(&name);
                        let ino = self.ensure_entry(child_rel).await;
                        Some(Dirent::new(ino, &name)?)
                    }
                    None => None,
                }
            }
        };
        Ok(entry.map(|entry| (entry, DIRENT_SIZE)))
    }

    async fn stat(&self, vnode: &Vnode) -> Result<Stat> {
        let abs = self.full_path(&self.rel_of(vnode.ino()).await?);
        let meta = fs::symlink_metadata(&abs).await.map_err(map_io_error)?;
        Ok(Stat {
            ino: vnode.ino(),
            file_type: file_type_of(&meta)?,
            len: meta.len(),
            nlink: nlink_of(&meta),
            device: None,
        })
    }
}
