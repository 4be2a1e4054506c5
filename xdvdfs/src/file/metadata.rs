//! Directory entry metadata helpers

use crate::file::extent::Extent;
use crate::types::{Attributes, DirEntry};
use alloc::string::String;
use alloc::vec::Vec;

impl DirEntry {
    /// Entry standing for a directory that has no name of its own
    pub(crate) fn directory(start_sector: u32, size: u32) -> Self {
        Self {
            name: String::new(),
            name_bytes: Vec::new(),
            size,
            start_sector,
            attributes: Attributes::DIRECTORY,
        }
    }

    /// Get entry name as string
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Raw on-disc name, usable as a path component
    pub fn name_bytes(&self) -> &[u8] {
        &self.name_bytes
    }

    /// Get file extension
    pub fn extension(&self) -> Option<&str> {
        self.name.rsplit_once('.').map(|(_, ext)| ext)
    }

    /// Is this a regular file?
    pub fn is_file(&self) -> bool {
        !self.is_directory()
    }

    /// Is this a directory?
    pub fn is_directory(&self) -> bool {
        self.attributes.contains(Attributes::DIRECTORY)
    }

    /// Is this hidden?
    pub fn is_hidden(&self) -> bool {
        self.attributes.contains(Attributes::HIDDEN)
    }

    /// Data extent of the entry
    pub fn extent(&self) -> Extent {
        Extent::new(self.start_sector, self.size)
    }
}
