//! Idempotence and round-trip laws of the syscall surface.

use super::common::boot;

use kvfs::errno::Errno;
use kvfs::file::OpenFlags;
use kvfs::syscall::Whence;

#[tokio::test]
async fn dup2_onto_itself_returns_the_descriptor() {
    let proc = boot();
    let fd = proc.open("/f", OpenFlags::CREAT | OpenFlags::RDONLY).await.expect("open");
    let before = proc.fget(fd).await.expect("fget");
    assert_eq!(proc.dup2(fd, fd).await.expect("dup2"), fd);
    let after = proc.fget(fd).await.expect("fget");
    assert!(std::sync::Arc::ptr_eq(&before, &after));
}

#[tokio::test]
async fn lseek_zero_cur_is_the_identity() {
    let proc = boot();
    let fd = proc.open("/f", OpenFlags::CREAT | OpenFlags::RDWR).await.expect("open");
    proc.write(fd, b"abcd").await.expect("write");
    let pos = proc.lseek(fd, 0, Whence::Cur).await.expect("query");
    assert_eq!(pos, 4);
    assert_eq!(proc.lseek(fd, 0, Whence::Cur).await.expect("query again"), pos);
}

#[tokio::test]
async fn mkdir_rmdir_restores_the_namespace() {
    let proc = boot();
    proc.mkdir("/d").await.expect("mkdir");
    proc.rmdir("/d").await.expect("rmdir");
    assert_eq!(proc.stat("/d").await.err(), Some(Errno::NoEntry));
    proc.mkdir("/d").await.expect("name is reusable");
}

#[tokio::test]
async fn link_unlink_restores_the_namespace() {
    let proc = boot();
    let fd = proc.open("/a", OpenFlags::CREAT | OpenFlags::WRONLY).await.expect("create");
    proc.close(fd).await.expect("close");

    proc.link("/a", "/b").await.expect("link");
    proc.unlink("/b").await.expect("unlink");
    assert_eq!(proc.stat("/b").await.err(), Some(Errno::NoEntry));
    let stat = proc.stat("/a").await.expect("source survives");
    assert_eq!(stat.nlink, 1);
}
