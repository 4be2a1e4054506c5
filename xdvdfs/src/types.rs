//! Common types and constants for XDVDFS

use alloc::string::String;
use alloc::vec::Vec;

/// XDVDFS sector size (always 2048 bytes)
pub const SECTOR_SIZE: usize = 2048;

/// Volume descriptor sector, relative to the image start
pub const VOLUME_DESCRIPTOR_SECTOR: u64 = 32;

/// Signature stored at both ends of the volume descriptor
pub const VOLUME_SIGNATURE: &[u8; 20] = b"MICROSOFT*XBOX*MEDIA";

/// Maximum filename length (stored in a single byte)
pub const MAX_NAME_LENGTH: usize = 255;

/// Maximum number of path components
pub const MAX_PATH_DEPTH: usize = 64;

/// Largest directory table we are willing to load
pub const MAX_DIRECTORY_SIZE: u32 = 16 * 1024 * 1024;

bitflags::bitflags! {
    /// Directory entry attribute byte
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Attributes: u8 {
        /// Read-only
        const READONLY = 0x01;
        /// Hidden
        const HIDDEN = 0x02;
        /// System
        const SYSTEM = 0x04;
        /// Directory (not a file)
        const DIRECTORY = 0x10;
        /// Archive
        const ARCHIVE = 0x20;
        /// Normal file, no other attributes
        const NORMAL = 0x80;
    }
}

/// Seek origin for [`Session::file_seek`](crate::Session::file_seek)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum SeekMode {
    /// Relative to the start of the file
    Begin = 0,
    /// Relative to the current position
    Current = 1,
    /// Relative to the end of the file
    End = 2,
}

impl SeekMode {
    /// Map a classic `SM_*` constant
    pub const fn from_raw(raw: u32) -> Option<Self> {
        match raw {
            0 => Some(Self::Begin),
            1 => Some(Self::Current),
            2 => Some(Self::End),
            _ => None,
        }
    }
}

/// Directory entry metadata
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    /// Entry name for display (non-UTF-8 bytes replaced)
    pub name: String,

    /// Entry name exactly as stored on disc
    pub name_bytes: Vec<u8>,

    /// Size in bytes
    pub size: u32,

    /// First sector of the file data or directory table
    pub start_sector: u32,

    /// Attribute flags
    pub attributes: Attributes,
}
