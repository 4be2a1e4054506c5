//! Search records
//!
//! A search record is either a cursor over one directory's entries in name
//! order, or the result of resolving a single path. Either way it remembers
//! the directory it belongs to and the last entry it produced.

use crate::directory::table::DirectoryTable;
use crate::types::{Attributes, DirEntry};

/// Directory cursor / resolved entry
#[derive(Debug, Clone)]
pub struct SearchRecord {
    pub(crate) epoch: u32,
    pub(crate) dir_sector: u32,
    pub(crate) dir_size: u32,
    pub(crate) position: usize,
    pub(crate) entry: Option<DirEntry>,
    pub(crate) table: Option<DirectoryTable>,
}

impl SearchRecord {
    pub(crate) fn new(epoch: u32, dir_sector: u32, dir_size: u32, entry: Option<DirEntry>) -> Self {
        Self {
            epoch,
            dir_sector,
            dir_size,
            position: 0,
            entry,
            table: None,
        }
    }

    /// Entry standing for the directory being searched
    pub(crate) fn directory(&self) -> DirEntry {
        DirEntry::directory(self.dir_sector, self.dir_size)
    }

    /// Epoch this record was issued in
    pub fn epoch(&self) -> u32 {
        self.epoch
    }

    /// Start sector of the directory being searched
    pub fn directory_sector(&self) -> u32 {
        self.dir_sector
    }

    /// Size in bytes of the directory being searched
    pub fn directory_size(&self) -> u32 {
        self.dir_size
    }

    /// Number of entries already produced by enumeration
    pub fn position(&self) -> usize {
        self.position
    }

    /// Last entry produced, or the resolved entry
    pub fn entry(&self) -> Option<&DirEntry> {
        self.entry.as_ref()
    }

    /// Name of the current entry (empty when there is none)
    pub fn file_name(&self) -> &str {
        self.entry.as_ref().map_or("", |e| e.name.as_str())
    }

    /// Attributes of the current entry
    pub fn attributes(&self) -> Attributes {
        self.entry.as_ref().map_or(Attributes::empty(), |e| e.attributes)
    }

    /// Size of the current entry
    pub fn file_size(&self) -> u32 {
        self.entry.as_ref().map_or(0, |e| e.size)
    }

    /// First sector of the current entry
    pub fn file_start_sector(&self) -> u32 {
        self.entry.as_ref().map_or(0, |e| e.start_sector)
    }

    /// Last sector occupied by the current entry
    pub fn file_end_sector(&self) -> u32 {
        self.entry.as_ref().map_or(0, |e| e.extent().last_sector())
    }

    /// Restart enumeration from the first entry
    ///
    /// A directory table already loaded by this record is kept.
    pub fn rewind(&mut self) {
        self.position = 0;
    }

    /// Drop the cached directory table
    pub fn release(&mut self) {
        self.table = None;
    }
}
