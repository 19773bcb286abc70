//! Vnode cache: at most one live handle per inode.

use moka::sync::Cache;

use crate::vnode::VnodeRef;

/// Identifies an inode across mounted filesystems: `(fsid, ino)`.
pub type VnodeKey = (u64, u64);

/// Fetch-or-build cache of vnode handles.
///
/// Repeated resolution of the same inode yields the same handle, which is
/// what makes refcounts meaningful across independent lookups. The cache
/// itself holds one reference per resident inode until the driver calls
/// [`VnodeCache::forget`].
pub struct VnodeCache {
    inner: Cache<VnodeKey, VnodeRef>,
}

impl VnodeCache {
    pub fn new() -> VnodeCache {
        VnodeCache { inner: Cache::builder().build() }
    }

    /// The cached handle for `key`, built with `init` on first use.
    pub fn vget(&self, key: VnodeKey, init: impl FnOnce() -> VnodeRef) -> VnodeRef {
        self.inner.get_with(key, init)
    }

    /// Drops the cache's reference. Drivers call this when the inode is
    /// freed. Runs the cache's pending maintenance so the release is
    /// immediate rather than deferred.
    pub fn forget(&self, key: VnodeKey) {
        self.inner.invalidate(&key);
        self.inner.run_pending_tasks();
    }
}

impl Default for VnodeCache {
    fn default() -> VnodeCache {
        VnodeCache::new()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::VnodeCache;
    use crate::ramfs::Ramfs;

    #[test]
    fn vget_memoizes_the_handle() {
        let cache = VnodeCache::new();
        let root = Ramfs::mount(1);
        let first = cache.vget((9, 9), || Arc::clone(&root));
        let again = cache.vget((9, 9), || panic!("init must not rerun"));
        assert!(Arc::ptr_eq(&first, &again));
    }

    #[test]
    fn forget_releases_the_reference() {
        let cache = VnodeCache::new();
        let root = Ramfs::mount(1);
        let baseline = Arc::strong_count(&root);
        let held = cache.vget((1, 1), || Arc::clone(&root));
        assert_eq!(Arc::strong_count(&root), baseline + 2);
        cache.forget((1, 1));
        drop(held);
        assert_eq!(Arc::strong_count(&root), baseline);
    }
}
