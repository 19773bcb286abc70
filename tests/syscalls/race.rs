//! Concurrency: the namespace lock makes `O_CREAT` atomic with respect
//! to other creators.

use std::sync::Arc;

use super::common::boot_shared;

use kvfs::file::OpenFlags;

#[tokio::test]
async fn concurrent_o_creat_yields_one_file() {
    for _ in 0..32 {
        let proc = boot_shared();

        let first = {
            let proc = Arc::clone(&proc);
            tokio::spawn(async move {
                proc.open("/x", OpenFlags::CREAT | OpenFlags::RDONLY).await
            })
        };
        let second = {
            let proc = Arc::clone(&proc);
            tokio::spawn(async move {
                proc.open("/x", OpenFlags::CREAT | OpenFlags::RDONLY).await
            })
        };

        let first = first.await.expect("task").expect("open");
        let second = second.await.expect("task").expect("open");

        let a = proc.fget(first).await.expect("fget");
        let b = proc.fget(second).await.expect("fget");
        assert!(Arc::ptr_eq(a.vnode(), b.vnode()));

        let stat = proc.stat("/x").await.expect("stat");
        assert_eq!(stat.nlink, 1);
    }
}

#[tokio::test]
async fn concurrent_mkdir_admits_exactly_one() {
    let proc = boot_shared();

    let tasks: Vec<_> = (0..8)
        .map(|_| {
            let proc = Arc::clone(&proc);
            tokio::spawn(async move { proc.mkdir("/spot").await })
        })
        .collect();

    let mut created = 0;
    for task in tasks {
        if task.await.expect("task").is_ok() {
            created += 1;
        }
    }
    assert_eq!(created, 1);
    proc.stat("/spot").await.expect("directory exists");
}
