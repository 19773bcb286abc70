//! Drives the syscall layer over the host-directory demo driver.

#[path = "../demos/hostfs/fs/mod.rs"]
mod hostfs;

use hostfs::Hostfs;
use kvfs::dirent::Dirent;
use kvfs::errno::Errno;
use kvfs::file::OpenFlags;
use kvfs::proc::Proc;
use kvfs::vfs::Vfs;
use kvfs::vnode::FileType;
use tempfile::TempDir;

struct Fixture {
    tempdir: TempDir,
    proc: Proc,
}

impl Fixture {
    fn new() -> Fixture {
        let tempdir = TempDir::new().expect("create temp dir");
        let root = Hostfs::mount(tempdir.path().to_path_buf(), 7);
        let vfs = Vfs::mount_root(root).expect("mount hostfs root");
        let proc = Proc::new(vfs);
        Fixture { tempdir, proc }
    }

    fn host_path(&self, name: &str) -> std::path::PathBuf {
        self.tempdir.path().join(name)
    }
}

#[tokio::test]
async fn writes_land_in_the_host_directory() {
    let fixture = Fixture::new();
    let proc = &fixture.proc;

    let fd = proc.open("/note", OpenFlags::CREAT | OpenFlags::WRONLY).await.expect("open");
    proc.write(fd, b"written through the vfs").await.expect("write");
    proc.close(fd).await.expect("close");

    let on_disk = std::fs::read(fixture.host_path("note")).expect("read host file");
    assert_eq!(on_disk, b"written through the vfs");
}

#[tokio::test]
async fn host_files_are_readable_through_the_vfs() {
    let fixture = Fixture::new();
    std::fs::write(fixture.host_path("seed"), b"preexisting").expect("seed host file");

    let proc = &fixture.proc;
    let stat = proc.stat("/seed").await.expect("stat");
    assert_eq!(stat.file_type, FileType::Regular);
    assert_eq!(stat.len, 11);

    let fd = proc.open("/seed", OpenFlags::RDONLY).await.expect("open");
    let mut buf = [0u8; 16];
    let read = proc.read(fd, &mut buf).await.expect("read");
    assert_eq!(&buf[..read], b"preexisting");
}

#[tokio::test]
async fn mkdir_and_getdent_mirror_the_host() {
    let fixture = Fixture::new();
    let proc = &fixture.proc;

    proc.mkdir("/sub").await.expect("mkdir");
    assert!(fixture.host_path("sub").is_dir());
    std::fs::write(fixture.host_path("sub/inner"), b"x").expect("seed inner file");

    let dirfd = proc.open("/sub", OpenFlags::RDONLY).await.expect("open dir");
    let mut entry = Dirent::default();
    let mut names = Vec::new();
    while proc.getdent(dirfd, &mut entry).await.expect("getdent") != 0 {
        names.push(entry.name.clone());
    }
    assert_eq!(names, [".", "..", "inner"]);
}

#[tokio::test]
async fn unlink_and_rmdir_remove_host_objects() {
    let fixture = Fixture::new();
    let proc = &fixture.proc;

    std::fs::write(fixture.host_path("victim"), b"x").expect("seed file");
    proc.unlink("/victim").await.expect("unlink");
    assert!(!fixture.host_path("victim").exists());

    proc.mkdir("/dir").await.expect("mkdir");
    std::fs::write(fixture.host_path("dir/f"), b"x").expect("seed file");
    assert_eq!(proc.rmdir("/dir").await, Err(Errno::NotEmpty));
    proc.unlink("/dir/f").await.expect("unlink inner");
    proc.rmdir("/dir").await.expect("rmdir");
    assert!(!fixture.host_path("dir").exists());
}

#[tokio::test]
async fn link_shows_up_in_host_link_counts() {
    let fixture = Fixture::new();
    let proc = &fixture.proc;

    std::fs::write(fixture.host_path("a"), b"shared").expect("seed file");
    proc.link("/a", "/b").await.expect("link");

    let stat = proc.stat("/b").await.expect("stat");
    assert_eq!(stat.nlink, 2);
    assert_eq!(std::fs::read(fixture.host_path("b")).expect("read"), b"shared");
}
