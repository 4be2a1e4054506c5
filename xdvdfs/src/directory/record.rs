//! Directory entry structure
//!
//! Entries are variable length and 4-byte aligned:
//!
//! | offset | size | field                         |
//! |-------:|-----:|-------------------------------|
//! | 0      | 2    | left child, in 4-byte units   |
//! | 2      | 2    | right child, in 4-byte units  |
//! | 4      | 4    | start sector                  |
//! | 8      | 4    | size in bytes                 |
//! | 12     | 1    | attributes                    |
//! | 13     | 1    | name length                   |
//! | 14     | n    | name                          |

use crate::error::{Result, XdvdfsError};
use crate::types::Attributes;

/// Fixed part of an entry
pub const ENTRY_HEADER_SIZE: usize = 14;

/// Entries start on multiples of this
pub const ENTRY_ALIGNMENT: usize = 4;

/// Child offset meaning "no subtree"
pub const NO_CHILD: u16 = 0;

/// Fill value for unused table space
pub const PADDING: u16 = 0xFFFF;

/// A directory entry as stored in the table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DirectoryRecord<'a> {
    /// Left child offset (4-byte units)
    pub left: u16,

    /// Right child offset (4-byte units)
    pub right: u16,

    /// Start sector of the file data or subdirectory table
    pub start_sector: u32,

    /// Size in bytes
    pub size: u32,

    /// Raw attribute byte
    pub attributes: u8,

    /// Name bytes
    pub name: &'a [u8],
}

impl<'a> DirectoryRecord<'a> {
    /// Parse the entry at `offset` of a directory table
    ///
    /// Fails with `DiskError` if the header or the name runs past the end
    /// of the table, or if the slot holds padding.
    pub fn parse(table: &'a [u8], offset: usize) -> Result<Self> {
        let header_end = offset
            .checked_add(ENTRY_HEADER_SIZE)
            .ok_or(XdvdfsError::DiskError)?;
        if offset % ENTRY_ALIGNMENT != 0 || header_end > table.len() {
            return Err(XdvdfsError::DiskError);
        }

        let header = &table[offset..header_end];
        let left = u16::from_le_bytes([header[0], header[1]]);
        if left == PADDING {
            return Err(XdvdfsError::DiskError);
        }

        let name_len = header[13] as usize;
        let name_end = header_end + name_len;
        if name_len == 0 || name_end > table.len() {
            return Err(XdvdfsError::DiskError);
        }

        Ok(Self {
            left,
            right: u16::from_le_bytes([header[2], header[3]]),
            start_sector: u32::from_le_bytes([header[4], header[5], header[6], header[7]]),
            size: u32::from_le_bytes([header[8], header[9], header[10], header[11]]),
            attributes: header[12],
            name: &table[header_end..name_end],
        })
    }

    /// Parsed attribute flags (unknown bits are dropped)
    pub fn flags(&self) -> Attributes {
        Attributes::from_bits_truncate(self.attributes)
    }
}

/// On-disk length of an entry with a name of `name_len` bytes
pub fn entry_length(name_len: usize) -> usize {
    (ENTRY_HEADER_SIZE + name_len).next_multiple_of(ENTRY_ALIGNMENT)
}

/// Byte offset of a child link, `None` for an absent child
pub fn child_offset(link: u16) -> Option<usize> {
    if link == NO_CHILD {
        None
    } else {
        Some(link as usize * ENTRY_ALIGNMENT)
    }
}
