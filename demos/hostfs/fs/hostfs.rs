use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::sync::Mutex;

use kvfs::cache::VnodeCache;
use kvfs::errno::{Errno, Result};
use kvfs::vnode::{FileType, Vnode, VnodeOps, VnodeRef};

const ROOT_INO: u64 = 1;

/// Driver state: the host root plus the inode-number table mapping
/// handed-out inode numbers to host-relative paths.
pub struct Hostfs {
    root: PathBuf,
    fsid: u64,
    state: Mutex<State>,
    vnodes: VnodeCache,
}

struct State {
    paths: HashMap<u64, PathBuf>,
    ids: HashMap<PathBuf, u64>,
    next_ino: u64,
}

impl State {
    fn new() -> State {
        let mut state = State { paths: HashMap::new(), ids: HashMap::new(), next_ino: ROOT_INO };
        state.ensure_entry(PathBuf::new());
        state
    }

    fn ensure_entry(&mut self, rel: PathBuf) -> u64 {
        if let Some(ino) = self.ids.get(&rel) {
            return *ino;
        }
        let ino = self.next_ino;
        self.next_ino += 1;
        self.paths.insert(ino, rel.clone());
        self.ids.insert(rel, ino);
        ino
    }

    fn remove(&mut self, rel: &Path) {
        if let Some(ino) = self.ids.remove(rel) {
            self.paths.remove(&ino);
        }
    }
}

impl Hostfs {
    /// Mirrors the directory at `root` and returns the root vnode.
    pub fn mount(root: PathBuf, fsid: u64) -> VnodeRef {
        let fs = Arc::new(Hostfs {
            root,
            fsid,
            state: Mutex::new(State::new()),
            vnodes: VnodeCache::new(),
        });
        let ops: Arc<dyn VnodeOps> = fs.clone();
        fs.vnodes
            .vget((fsid, ROOT_INO), || Vnode::new(ROOT_INO, FileType::Directory, None, 0, ops))
    }

    pub(super) fn full_path(&self, rel: &Path) -> PathBuf {
        if rel.as_os_str().is_empty() {
            self.root.clone()
        } else {
            self.root.join(rel)
        }
    }

    pub(super) async fn rel_of(&self, ino: u64) -> Result<PathBuf> {
        let state = self.state.lock().await;
        state.paths.get(&ino).cloned().ok_or(Errno::NoEntry)
    }

    /// Relative path of `name` inside the directory identified by `ino`.
    pub(super) async fn child_rel(&self, ino: u64, name: &str) -> Result<PathBuf> {
        if name.contains('/') || name == "." || name == ".." {
            return Err(Errno::Invalid);
        }
        Ok(self.rel_of(ino).await?.join(name))
    }

    pub(super) async fn ensure_entry(&self, rel: PathBuf) -> u64 {
        let mut state = self.state.lock().await;
        state.ensure_entry(rel)
    }

    pub(super) async fn remove_entry(&self, rel: &Path) {
        let mut state = self.state.lock().await;
        if let Some(ino) = state.ids.get(rel).copied() {
            self.vnodes.forget((self.fsid, ino));
        }
        state.remove(rel);
    }

    pub(super) fn vnode_for(
        &self,
        ino: u64,
        file_type: FileType,
        len: u64,
        ops: Arc<dyn VnodeOps>,
    ) -> VnodeRef {
        self.vnodes.vget((self.fsid, ino), || Vnode::new(ino, file_type, None, len, ops))
    }
}
