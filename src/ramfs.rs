//! In-memory filesystem driver, used as the boot root filesystem.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::debug;

use crate::cache::VnodeCache;
use crate::dirent::{Dirent, DIRENT_SIZE};
use crate::errno::{Errno, Result};
use crate::vnode::{Device, FileType, ReadDir, Stat, Vnode, VnodeOps, VnodeRef};

const ROOT_INO: u64 = 1;

/// In-memory filesystem. One instance backs one mount.
///
/// Directories do not store `.` and `..`; the resolver handles `.`, the
/// driver resolves `..` through the parent pointer, and `readdir`
/// synthesizes both at offsets zero and one.
pub struct Ramfs {
    fsid: u64,
    state: Mutex<State>,
    vnodes: VnodeCache,
}

struct State {
    nodes: HashMap<u64, Node>,
    next_ino: u64,
}

struct Node {
    nlink: u32,
    kind: NodeKind,
}

enum NodeKind {
    Directory { entries: BTreeMap<String, u64>, parent: u64 },
    File { data: Vec<u8> },
    Device { file_type: FileType, device: Device },
}

impl Node {
    fn file_type(&self) -> FileType {
        match &self.kind {
            NodeKind::Directory { .. } => FileType::Directory,
            NodeKind::File { .. } => FileType::Regular,
            NodeKind::Device { file_type, .. } => *file_type,
        }
    }

    fn len(&self) -> u64 {
        match &self.kind {
            NodeKind::File { data } => data.len() as u64,
            _ => 0,
        }
    }

    fn device(&self) -> Option<Device> {
        match &self.kind {
            NodeKind::Device { device, .. } => Some(*device),
            _ => None,
        }
    }
}

impl State {
    fn new() -> State {
        let mut nodes = HashMap::new();
        let root = Node {
            nlink: 1,
            kind: NodeKind::Directory { entries: BTreeMap::new(), parent: ROOT_INO },
        };
        nodes.insert(ROOT_INO, root);
        State { nodes, next_ino: ROOT_INO + 1 }
    }

    fn alloc(&mut self, node: Node) -> u64 {
        let ino = self.next_ino;
        self.next_ino += 1;
        self.nodes.insert(ino, node);
        ino
    }

    fn node(&self, ino: u64) -> Result<&Node> {
        self.nodes.get(&ino).ok_or(Errno::NoEntry)
    }

    fn node_mut(&mut self, ino: u64) -> Result<&mut Node> {
        self.nodes.get_mut(&ino).ok_or(Errno::NoEntry)
    }

    fn dir(&self, ino: u64) -> Result<&BTreeMap<String, u64>> {
        match &self.node(ino)?.kind {
            NodeKind::Directory { entries, .. } => Ok(entries),
            _ => Err(Errno::NotDir),
        }
    }

    fn dir_mut(&mut self, ino: u64) -> Result<&mut BTreeMap<String, u64>> {
        match &mut self.node_mut(ino)?.kind {
            NodeKind::Directory { entries, .. } => Ok(entries),
            _ => Err(Errno::NotDir),
        }
    }

    fn parent_of(&self, ino: u64) -> Result<u64> {
        match &self.node(ino)?.kind {
            NodeKind::Directory { parent, .. } => Ok(*parent),
            _ => Err(Errno::NotDir),
        }
    }
}

impl Ramfs {
    /// Creates a filesystem holding an empty root directory and returns
    /// the root vnode.
    pub fn mount(fsid: u64) -> VnodeRef {
        let fs = Arc::new(Ramfs { fsid, state: Mutex::new(State::new()), vnodes: VnodeCache::new() });
        debug!(fsid, "ramfs: mounted");
        let ops: Arc<dyn VnodeOps> = fs.clone();
        fs.vnodes
            .vget((fsid, ROOT_INO), || Vnode::new(ROOT_INO, FileType::Directory, None, 0, ops))
    }

    fn vnode_for(&self, ino: u64, node: &Node, ops: Arc<dyn VnodeOps>) -> VnodeRef {
        let file_type = node.file_type();
        let device = node.device();
        let len = node.len();
        self.vnodes.vget((self.fsid, ino), || Vnode::new(ino, file_type, device, len, ops))
    }
}

#[async_trait]
impl VnodeOps for Ramfs {
    async fn lookup(&self, dir: &Vnode, name: &str) -> Result<VnodeRef> {
        let state = self.state.lock().await;
        let ino = match name {
            "." => dir.ino(),
            ".." => state.parent_of(dir.ino())?,
            _ => *state.dir(dir.ino())?.get(name).ok_or(Errno::NoEntry)?,
        };
        let node = state.node(ino)?;
        Ok(self.vnode_for(ino, node, dir.ops_handle()))
    }

    async fn create(&self, dir: &Vnode, name: &str) -> Result<VnodeRef> {
        let mut state = self.state.lock().await;
        if state.dir(dir.ino())?.contains_key(name) {
            return Err(Errno::Exists);
        }
        let ino = state.alloc(Node { nlink: 1, kind: NodeKind::File { data: Vec::new() } });
        state.dir_mut(dir.ino())?.insert(name.to_owned(), ino);
        let node = state.node(ino)?;
        Ok(self.vnode_for(ino, node, dir.ops_handle()))
    }

    async fn mkdir(&self, dir: &Vnode, name: &str) -> Result<VnodeRef> {
        let mut state = self.state.lock().await;
        if state.dir(dir.ino())?.contains_key(name) {
            return Err(Errno::Exists);
        }
        let node = Node {
            nlink: 1,
            kind: NodeKind::Directory { entries: BTreeMap::new(), parent: dir.ino() },
        };
        let ino = state.alloc(node);
        state.dir_mut(dir.ino())?.insert(name.to_owned(), ino);
        let node = state.node(ino)?;
        Ok(self.vnode_for(ino, node, dir.ops_handle()))
    }

    async fn mknod(
        &self,
        dir: &Vnode,
        name: &str,
        file_type: FileType,
        device: Device,
    ) -> Result<VnodeRef> {
        if !matches!(file_type, FileType::CharDevice | FileType::BlockDevice) {
            return Err(Errno::Invalid);
        }
        let mut state = self.state.lock().await;
        if state.dir(dir.ino())?.contains_key(name) {
            return Err(Errno::Exists);
        }
        let ino = state.alloc(Node { nlink: 1, kind: NodeKind::Device { file_type, device } });
        state.dir_mut(dir.ino())?.insert(name.to_owned(), ino);
        let node = state.node(ino)?;
        Ok(self.vnode_for(ino, node, dir.ops_handle()))
    }

    async fn link(&self, source: &Vnode, dir: &Vnode, name: &str) -> Result<()> {
        if source.is_dir() {
            return Err(Errno::Perm);
        }
        let mut state = self.state.lock().await;
        if state.dir(dir.ino())?.contains_key(name) {
            return Err(Errno::Exists);
        }
        state.node_mut(source.ino())?.nlink += 1;
        state.dir_mut(dir.ino())?.insert(name.to_owned(), source.ino());
        Ok(())
    }

    async fn unlink(&self, dir: &Vnode, name: &str) -> Result<()> {
        let mut state = self.state.lock().await;
        let ino = *state.dir(dir.ino())?.get(name).ok_or(Errno::NoEntry)?;
        if matches!(state.node(ino)?.kind, NodeKind::Directory { .. }) {
            return Err(Errno::Perm);
        }
        state.dir_mut(dir.ino())?.remove(name);
        let remaining = {
            let node = state.node_mut(ino)?;
            node.nlink -= 1;
            node.nlink
        };
        if remaining == 0 {
            state.nodes.remove(&ino);
            self.vnodes.forget((self.fsid, ino));
        }
        Ok(())
    }

    async fn rmdir(&self, dir: &Vnode, name: &str) -> Result<()> {
        let mut state = self.state.lock().await;
        let ino = *state.dir(dir.ino())?.get(name).ok_or(Errno::NoEntry)?;
        match &state.node(ino)?.kind {
            NodeKind::Directory { entries, .. } if entries.is_empty() => {}
            NodeKind::Directory { .. } => return Err(Errno::NotEmpty),
            _ => return Err(Errno::NotDir),
        }
        state.dir_mut(dir.ino())?.remove(name);
        state.nodes.remove(&ino);
        self.vnodes.forget((self.fsid, ino));
        Ok(())
    }

    async fn read(&self, vnode: &Vnode, off: u64, buf: &mut [u8]) -> Result<usize> {
        let state = self.state.lock().await;
        let data = match &state.node(vnode.ino())?.kind {
            NodeKind::File { data } => data,
            NodeKind::Directory { .. } => return Err(Errno::IsDir),
            NodeKind::Device { .. } => return Err(Errno::NotSupported),
        };
        let off = usize::try_from(off).map_err(|_| Errno::Invalid)?;
        if off >= data.len() {
            return Ok(0);
        }
        let count = buf.len().min(data.len() - off);
        buf[..count].copy_from_slice(&data[off..off + count]);
        Ok(count)
    }

    async fn write(&self, vnode: &Vnode, off: u64, buf: &[u8]) -> Result<usize> {
        let mut state = self.state.lock().await;
        let data = match &mut state.node_mut(vnode.ino())?.kind {
            NodeKind::File { data } => data,
            NodeKind::Directory { .. } => return Err(Errno::IsDir),
            NodeKind::Device { .. } => return Err(Errno::NotSupported),
        };
        let off = usize::try_from(off).map_err(|_| Errno::Invalid)?;
        let end = off.checked_add(buf.len()).ok_or(Errno::Invalid)?;
        if data.len() < end {
            data.resize(end, 0);
        }
        data[off..end].copy_from_slice(buf);
        vnode.set_len(data.len() as u64);
        Ok(buf.len())
    }

    async fn readdir(&self, dir: &Vnode, off: u64) -> Result<ReadDir> {
        let state = self.state.lock().await;
        let entries = state.dir(dir.ino())?;
        let index = usize::try_from(off).map_err(|_| Errno::Invalid)? / DIRENT_SIZE;
        let entry = match index {
            0 => Some(Dirent::new(dir.ino(), ".")?),
            1 => Some(Dirent::new(state.parent_of(dir.ino())?, "..")?),
            _ => entries
                .iter()
                .nth(index - 2)
                .map(|(name, ino)| Dirent::new(*ino, name))
                .transpose()?,
        };
        Ok(entry.map(|entry| (entry, DIRENT_SIZE)))
    }

    async fn stat(&self, vnode: &Vnode) -> Result<Stat> {
        let state = self.state.lock().await;
        let node = state.node(vnode.ino())?;
        Ok(Stat {
            ino: vnode.ino(),
            file_type: node.file_type(),
            len: node.len(),
            nlink: node.nlink,
            device: node.device(),
        })
    }
}
