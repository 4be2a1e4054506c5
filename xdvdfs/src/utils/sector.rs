//! Sector alignment and calculation utilities

use crate::types::SECTOR_SIZE;

/// Align value to sector boundary (round up)
pub fn align_to_sector(value: usize) -> usize {
    (value + SECTOR_SIZE - 1) & !(SECTOR_SIZE - 1)
}

/// Sector index containing a byte offset
pub fn byte_to_sector(byte_offset: u32) -> u32 {
    byte_offset / SECTOR_SIZE as u32
}

/// Offset of a byte within its sector
pub fn offset_in_sector(byte_offset: u32) -> usize {
    byte_offset as usize % SECTOR_SIZE
}

/// Calculate number of sectors needed for byte count
pub fn sectors_for_bytes(byte_count: u32) -> u32 {
    byte_count.div_ceil(SECTOR_SIZE as u32)
}
