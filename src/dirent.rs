//! Directory entry records handed to userspace by `getdent`.

use std::io::{Cursor, Read, Write};

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};

use crate::errno::{Errno, Result};
use crate::NAME_LEN;

/// Size in bytes of one encoded [`Dirent`] record: inode number, name
/// length, and the name field padded to [`NAME_LEN`].
pub const DIRENT_SIZE: usize = 8 + 4 + NAME_LEN;

/// A single directory entry.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Dirent {
    pub ino: u64,
    pub name: String,
}

impl Dirent {
    /// Builds an entry, rejecting names longer than [`NAME_LEN`].
    pub fn new(ino: u64, name: &str) -> Result<Dirent> {
        if name.len() > NAME_LEN {
            return Err(Errno::NameTooLong);
        }
        Ok(Dirent { ino, name: name.to_owned() })
    }

    /// Encodes the record into its fixed-size layout. `buf` must hold at
    /// least [`DIRENT_SIZE`] bytes.
    pub fn encode(&self, buf: &mut [u8]) -> Result<()> {
        if buf.len() < DIRENT_SIZE || self.name.len() > NAME_LEN {
            return Err(Errno::Range);
        }
        let mut dst = Cursor::new(buf);
        dst.write_u64::<LittleEndian>(self.ino).map_err(|_| Errno::Range)?;
        dst.write_u32::<LittleEndian>(self.name.len() as u32).map_err(|_| Errno::Range)?;
        dst.write_all(self.name.as_bytes()).map_err(|_| Errno::Range)?;
        let padding = [0u8; NAME_LEN];
        dst.write_all(&padding[self.name.len()..]).map_err(|_| Errno::Range)?;
        Ok(())
    }

    /// Decodes a record previously produced by [`Dirent::encode`].
    pub fn decode(buf: &[u8]) -> Result<Dirent> {
        let mut src = Cursor::new(buf);
        let ino = src.read_u64::<LittleEndian>().map_err(|_| Errno::Invalid)?;
        let len = src.read_u32::<LittleEndian>().map_err(|_| Errno::Invalid)? as usize;
        if len > NAME_LEN {
            return Err(Errno::NameTooLong);
        }
        let mut name = vec![0u8; len];
        src.read_exact(&mut name).map_err(|_| Errno::Invalid)?;
        let name = String::from_utf8(name).map_err(|_| Errno::Invalid)?;
        Ok(Dirent { ino, name })
    }
}
