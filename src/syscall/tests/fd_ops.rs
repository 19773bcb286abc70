use super::fixture::boot;
use crate::errno::Errno;
use crate::file::OpenFlags;
use crate::NFILES;

#[tokio::test]
async fn read_returns_what_write_stored() {
    let proc = boot();
    let fd = proc.open("/f", OpenFlags::CREAT | OpenFlags::RDWR).await.expect("open");
    assert_eq!(proc.write(fd, b"hello").await.expect("write"), 5);
    proc.lseek(fd, 0, crate::syscall::Whence::Set).await.expect("rewind");

    let mut buf = [0u8; 16];
    let read = proc.read(fd, &mut buf).await.expect("read");
    assert_eq!(&buf[..read], b"hello");
}

#[tokio::test]
async fn read_requires_read_mode() {
    let proc = boot();
    let fd = proc.open("/f", OpenFlags::CREAT | OpenFlags::WRONLY).await.expect("open");
    let mut buf = [0u8; 4];
    assert_eq!(proc.read(fd, &mut buf).await, Err(Errno::BadFd));
}

#[tokio::test]
async fn write_requires_write_mode() {
    let proc = boot();
    let fd = proc.open("/f", OpenFlags::CREAT | OpenFlags::WRONLY).await.expect("create");
    proc.close(fd).await.expect("close");
    let fd = proc.open("/f", OpenFlags::RDONLY).await.expect("reopen");
    assert_eq!(proc.write(fd, b"x").await, Err(Errno::BadFd));
}

#[tokio::test]
async fn reading_a_directory_is_isdir() {
    let proc = boot();
    let fd = proc.open("/", OpenFlags::RDONLY).await.expect("open root");
    let mut buf = [0u8; 4];
    assert_eq!(proc.read(fd, &mut buf).await, Err(Errno::IsDir));
}

#[tokio::test]
async fn bad_descriptors_are_ebadf() {
    let proc = boot();
    let mut buf = [0u8; 1];
    assert_eq!(proc.read(-1, &mut buf).await, Err(Errno::BadFd));
    assert_eq!(proc.read(NFILES as i32, &mut buf).await, Err(Errno::BadFd));
    assert_eq!(proc.write(3, b"x").await, Err(Errno::BadFd));
    assert_eq!(proc.close(3).await, Err(Errno::BadFd));
}

#[tokio::test]
async fn append_mode_seeks_to_the_end_first() {
    let proc = boot();
    let fd = proc.open("/log", OpenFlags::CREAT | OpenFlags::WRONLY).await.expect("create");
    proc.write(fd, b"one").await.expect("write");
    proc.close(fd).await.expect("close");

    let fd = proc.open("/log", OpenFlags::WRONLY | OpenFlags::APPEND).await.expect("append open");
    proc.lseek(fd, 0, crate::syscall::Whence::Set).await.expect("rewind cursor");
    proc.write(fd, b"two").await.expect("append");
    assert_eq!(proc.stat("/log").await.expect("stat").len, 6);

    let fd = proc.open("/log", OpenFlags::RDONLY).await.expect("read open");
    let mut buf = [0u8; 8];
    let read = proc.read(fd, &mut buf).await.expect("read");
    assert_eq!(&buf[..read], b"onetwo");
}

#[tokio::test]
async fn close_frees_the_slot_and_double_close_fails() {
    let proc = boot();
    let fd = proc.open("/f", OpenFlags::CREAT | OpenFlags::RDONLY).await.expect("open");
    assert_eq!(fd, 0);
    proc.close(fd).await.expect("close");
    assert_eq!(proc.close(fd).await, Err(Errno::BadFd));
    let again = proc.open("/f", OpenFlags::RDONLY).await.expect("reopen");
    assert_eq!(again, 0);
}

#[tokio::test]
async fn dup_shares_the_cursor() {
    let proc = boot();
    let fd = proc.open("/f", OpenFlags::CREAT | OpenFlags::RDWR).await.expect("open");
    proc.write(fd, b"abcdef").await.expect("write");
    proc.lseek(fd, 0, crate::syscall::Whence::Set).await.expect("rewind");

    let dup = proc.dup(fd).await.expect("dup");
    assert_ne!(dup, fd);

    let mut buf = [0u8; 3];
    proc.read(fd, &mut buf).await.expect("read via original");
    assert_eq!(&buf, b"abc");
    proc.read(dup, &mut buf).await.expect("read via duplicate");
    assert_eq!(&buf, b"def");
}

#[tokio::test]
async fn dup_exhausts_the_table_with_emfile() {
    let proc = boot();
    let fd = proc.open("/f", OpenFlags::CREAT | OpenFlags::RDONLY).await.expect("open");
    for _ in 1..NFILES {
        proc.dup(fd).await.expect("table has room");
    }
    assert_eq!(proc.dup(fd).await, Err(Errno::TooManyFiles));
}

#[tokio::test]
async fn dup2_to_self_is_a_no_op() {
    let proc = boot();
    let fd = proc.open("/f", OpenFlags::CREAT | OpenFlags::RDONLY).await.expect("open");
    assert_eq!(proc.dup2(fd, fd).await.expect("dup2 self"), fd);
    let mut buf = [0u8; 1];
    assert_eq!(proc.read(fd, &mut buf).await.expect("descriptor still open"), 0);
}

#[tokio::test]
async fn dup2_closes_the_previous_occupant() {
    let proc = boot();
    let first = proc.open("/a", OpenFlags::CREAT | OpenFlags::RDONLY).await.expect("open /a");
    let second = proc.open("/b", OpenFlags::CREAT | OpenFlags::RDONLY).await.expect("open /b");

    let held = proc.fget(second).await.expect("peek at /b's file");
    assert_eq!(proc.dup2(first, second).await.expect("dup2"), second);
    assert_eq!(std::sync::Arc::strong_count(&held), 1);

    let aliased = proc.fget(second).await.expect("slot occupied");
    let original = proc.fget(first).await.expect("slot occupied");
    assert!(std::sync::Arc::ptr_eq(&aliased, &original));
}

#[tokio::test]
async fn dup2_rejects_out_of_range_targets() {
    let proc = boot();
    let fd = proc.open("/f", OpenFlags::CREAT | OpenFlags::RDONLY).await.expect("open");
    assert_eq!(proc.dup2(fd, -1).await, Err(Errno::BadFd));
    assert_eq!(proc.dup2(fd, NFILES as i32).await, Err(Errno::BadFd));
    assert_eq!(proc.dup2(31, 1).await, Err(Errno::BadFd));
}
