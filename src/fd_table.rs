//! Per-process file descriptor table.

use crate::errno::{Errno, Result};
use crate::file::FileRef;
use crate::NFILES;

/// Index into a process's descriptor table.
pub type Fd = i32;

/// Fixed-size table mapping descriptors to open files.
///
/// Each occupied slot owns one reference to its open file; taking the
/// slot's contents out transfers that reference to the caller.
#[derive(Clone)]
pub struct FdTable {
    slots: [Option<FileRef>; NFILES],
}

impl FdTable {
    pub fn new() -> FdTable {
        FdTable { slots: std::array::from_fn(|_| None) }
    }

    /// True when `fd` lies inside the table bounds.
    pub fn in_range(fd: Fd) -> bool {
        fd >= 0 && (fd as usize) < NFILES
    }

    /// The open file at `fd`, if the descriptor is valid and occupied.
    pub fn get(&self, fd: Fd) -> Option<&FileRef> {
        if !Self::in_range(fd) {
            return None;
        }
        self.slots[fd as usize].as_ref()
    }

    /// Empties the slot at `fd`, handing its reference to the caller.
    pub fn take(&mut self, fd: Fd) -> Option<FileRef> {
        if !Self::in_range(fd) {
            return None;
        }
        self.slots[fd as usize].take()
    }

    /// Installs `file` at `fd`, returning whatever reference previously
    /// occupied the slot.
    pub fn install(&mut self, fd: Fd, file: FileRef) -> Result<Option<FileRef>> {
        if !Self::in_range(fd) {
            return Err(Errno::BadFd);
        }
        Ok(self.slots[fd as usize].replace(file))
    }

    /// The lowest unoccupied descriptor.
    pub fn get_empty_fd(&self) -> Result<Fd> {
        self.slots
            .iter()
            .position(|slot| slot.is_none())
            .map(|index| index as Fd)
            .ok_or(Errno::TooManyFiles)
    }
}

impl Default for FdTable {
    fn default() -> FdTable {
        FdTable::new()
    }
}
