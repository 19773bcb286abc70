//! Kernel error numbers shared by every layer of the VFS.

use num_derive::{FromPrimitive, ToPrimitive};

/// Result of VFS operations.
pub type Result<T> = std::result::Result<T, Errno>;

/// Error numbers returned by VFS operations.
///
/// Values match the classic kernel errno table; the syscall ABI boundary
/// negates them (see [`crate::syscall::retval`]).
#[derive(Debug, Copy, Clone, PartialEq, Eq, FromPrimitive, ToPrimitive)]
pub enum Errno {
    /// Operation not permitted. Removing a directory through `unlink`
    /// reports this.
    Perm = 1,
    /// No such file or directory. A path component or the final name
    /// does not exist.
    NoEntry = 2,
    /// Bad file descriptor. The descriptor is out of range, unoccupied,
    /// or not open for the requested access.
    BadFd = 9,
    /// File exists. The final path component already names an object.
    Exists = 17,
    /// Not a directory. A non-directory was used where a directory
    /// operation was required.
    NotDir = 20,
    /// Is a directory. A directory was used in a non-directory operation.
    IsDir = 21,
    /// Invalid argument.
    Invalid = 22,
    /// The process already has the maximum number of descriptors open.
    TooManyFiles = 24,
    /// Result does not fit the supplied buffer.
    Range = 34,
    /// A path or path component exceeded its length limit.
    NameTooLong = 36,
    /// An attempt was made to remove a directory that was not empty.
    NotEmpty = 39,
    /// The vnode's operations table has no entry for this operation.
    NotSupported = 95,
}

impl Errno {
    /// The raw errno value.
    pub fn raw(self) -> i32 {
        self as i32
    }
}

#[cfg(test)]
mod tests {
    use num_traits::FromPrimitive;

    use super::Errno;

    #[test]
    fn raw_values_match_the_errno_table() {
        assert_eq!(Errno::Perm.raw(), 1);
        assert_eq!(Errno::NoEntry.raw(), 2);
        assert_eq!(Errno::BadFd.raw(), 9);
        assert_eq!(Errno::NameTooLong.raw(), 36);
    }

    #[test]
    fn decodes_from_raw() {
        assert_eq!(Errno::from_i32(20), Some(Errno::NotDir));
        assert_eq!(Errno::from_i32(21), Some(Errno::IsDir));
        assert_eq!(Errno::from_i32(-1), None);
        assert_eq!(Errno::from_i32(3), None);
    }
}
