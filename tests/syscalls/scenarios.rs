//! End-to-end walks over a freshly mounted root.

use super::common::boot;

use kvfs::dirent::Dirent;
use kvfs::errno::Errno;
use kvfs::file::OpenFlags;
use kvfs::syscall::{retval, Whence};
use kvfs::vnode::FileType;

#[tokio::test]
async fn created_file_is_visible_to_stat() {
    let proc = boot();
    let fd = proc.open("/x", OpenFlags::CREAT | OpenFlags::WRONLY).await.expect("open");
    proc.close(fd).await.expect("close");

    let stat = proc.stat("/x").await.expect("stat");
    assert_eq!(stat.file_type, FileType::Regular);
    assert_eq!(stat.len, 0);
}

#[tokio::test]
async fn directory_listing_ends_with_zero() {
    let proc = boot();
    proc.mkdir("/d").await.expect("mkdir");
    let fd = proc.open("/d/f", OpenFlags::CREAT | OpenFlags::WRONLY).await.expect("create");
    proc.close(fd).await.expect("close");

    let dirfd = proc.open("/d", OpenFlags::RDONLY).await.expect("open dir");
    let mut entry = Dirent::default();
    let mut names = Vec::new();
    loop {
        let ret = proc.getdent(dirfd, &mut entry).await.expect("getdent");
        if ret == 0 {
            break;
        }
        names.push(entry.name.clone());
    }
    names.sort();
    assert_eq!(names, [".", "..", "f"]);
}

#[tokio::test]
async fn dup2_aliases_and_drops_the_old_occupant() {
    let proc = boot();
    for path in ["/a", "/b", "/c", "/d", "/e", "/f"] {
        proc.open(path, OpenFlags::CREAT | OpenFlags::RDONLY).await.expect("open");
    }
    let five = proc.fget(5).await.expect("slot 5 occupied");

    assert_eq!(proc.dup2(3, 5).await.expect("dup2"), 5);
    assert_eq!(std::sync::Arc::strong_count(&five), 1);

    let three = proc.fget(3).await.expect("slot 3");
    let aliased = proc.fget(5).await.expect("slot 5");
    assert!(std::sync::Arc::ptr_eq(&three, &aliased));
}

#[tokio::test]
async fn unlinking_a_directory_is_refused() {
    let proc = boot();
    proc.mkdir("/d").await.expect("mkdir");
    assert_eq!(retval(proc.unlink("/d").await), -i64::from(Errno::Perm.raw()));
    proc.stat("/d").await.expect("directory survived");
}

#[tokio::test]
async fn rmdir_of_dot_and_dotdot_names() {
    let proc = boot();
    proc.mkdir("/d").await.expect("mkdir");
    assert_eq!(retval(proc.rmdir("/d/.").await), -i64::from(Errno::Invalid.raw()));
    assert_eq!(retval(proc.rmdir("/d/..").await), -i64::from(Errno::NotEmpty.raw()));
}

#[tokio::test]
async fn bad_seek_reports_einval_through_the_abi() {
    let proc = boot();
    let fd = proc.open("/f", OpenFlags::CREAT | OpenFlags::RDWR).await.expect("open");
    proc.write(fd, b"abc").await.expect("write");

    assert_eq!(retval(proc.lseek(fd, -1, Whence::Set).await), -i64::from(Errno::Invalid.raw()));
    assert_eq!(proc.lseek(fd, 0, Whence::Cur).await.expect("cursor unchanged"), 3);
}

#[tokio::test]
async fn overlong_path_is_rejected_before_the_filesystem() {
    let proc = boot();
    let path = format!("/{}", "p".repeat(kvfs::MAXPATHLEN));
    assert_eq!(proc.stat(&path).await.err(), Some(Errno::NameTooLong));
    assert_eq!(retval(proc.mkdir(&path).await), -i64::from(Errno::NameTooLong.raw()));
}
