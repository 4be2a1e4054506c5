//! File extent management
//!
//! XDVDFS files are stored contiguously: one start sector and a byte length.

use crate::utils::sector::sectors_for_bytes;

/// File extent (contiguous data region)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Extent {
    /// Starting sector, relative to the image
    pub start_sector: u32,

    /// Length in bytes
    pub length: u32,
}

impl Extent {
    /// Create new extent
    pub fn new(start_sector: u32, length: u32) -> Self {
        Self { start_sector, length }
    }

    /// Number of sectors (2048 bytes each)
    pub fn sector_count(&self) -> u32 {
        sectors_for_bytes(self.length)
    }

    /// Last occupied sector (the start sector for an empty extent)
    pub fn last_sector(&self) -> u32 {
        self.start_sector
            .saturating_add(self.sector_count().saturating_sub(1))
    }

    /// Absolute sector holding file sector `index`
    pub fn sector(&self, index: u32) -> u64 {
        self.start_sector as u64 + index as u64
    }
}
