use std::fs::Metadata;
use std::io;
use std::os::unix::fs::MetadataExt;

use kvfs::errno::Errno;
use kvfs::vnode::FileType;

/// Maps a host I/O error onto the VFS error space.
pub fn map_io_error(err: io::Error) -> Errno {
    match err.kind() {
        io::ErrorKind::NotFound => Errno::NoEntry,
        io::ErrorKind::AlreadyExists => Errno::Exists,
        io::ErrorKind::PermissionDenied => Errno::Perm,
        io::ErrorKind::InvalidInput => Errno::Invalid,
        _ => match err.raw_os_error() {
            Some(code) if code == Errno::NotEmpty.raw() => Errno::NotEmpty,
            Some(code) if code == Errno::NotDir.raw() => Errno::NotDir,
            Some(code) if code == Errno::IsDir.raw() => Errno::IsDir,
            _ => Errno::NotSupported,
        },
    }
}

/// File type of host metadata; anything but a file or directory is not
/// mirrored.
pub fn file_type_of(meta: &Metadata) -> Result<FileType, Errno> {
    if meta.is_dir() {
        Ok(FileType::Directory)
    } else if meta.is_file() {
        Ok(FileType::Regular)
    } else {
        Err(Errno::NotSupported)
    }
}

pub fn nlink_of(meta: &Metadata) -> u32 {
    meta.nlink() as u32
}
