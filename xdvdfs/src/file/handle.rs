//! Open file handles
//!
//! A handle carries its own position and one cached sector. It holds no
//! reference to the session; the session epoch stamped at open time is
//! checked on every read and seek instead.

use crate::error::{Result, XdvdfsError};
use crate::file::extent::Extent;
use crate::types::{SeekMode, SECTOR_SIZE};
use crate::utils::sector::byte_to_sector;
use alloc::boxed::Box;

/// An open file
#[derive(Debug)]
pub struct FileHandle {
    pub(crate) epoch: u32,
    pub(crate) extent: Extent,
    pub(crate) position: u32,
    pub(crate) cache: Option<Box<[u8; SECTOR_SIZE]>>,
    pub(crate) cached_sector: Option<u32>,
    pub(crate) closed: bool,
}

impl FileHandle {
    pub(crate) fn new(epoch: u32, extent: Extent) -> Self {
        Self {
            epoch,
            extent,
            position: 0,
            cache: None,
            cached_sector: None,
            closed: false,
        }
    }

    /// Epoch this handle was opened in
    pub fn epoch(&self) -> u32 {
        self.epoch
    }

    /// Current read position
    pub fn position(&self) -> u32 {
        self.position
    }

    /// File size in bytes
    pub fn size(&self) -> u32 {
        self.extent.length
    }

    /// First sector of the file
    pub fn start_sector(&self) -> u32 {
        self.extent.start_sector
    }

    /// Bytes between the position and the end of the file
    pub fn remaining(&self) -> u32 {
        self.extent.length - self.position
    }

    /// File sector currently held in the cache
    pub fn cached_sector(&self) -> Option<u32> {
        self.cached_sector
    }

    /// Whether `close` has been called
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Release the sector cache
    ///
    /// Idempotent, and valid on handles from an unmounted session.
    pub fn close(&mut self) {
        self.cache = None;
        self.cached_sector = None;
        self.closed = true;
    }

    pub(crate) fn ensure_open(&self) -> Result<()> {
        if self.closed {
            return Err(XdvdfsError::InvalidParameter);
        }
        Ok(())
    }

    /// Move the position; out-of-range targets leave it untouched
    pub(crate) fn seek(&mut self, delta: i64, mode: SeekMode) -> Result<u32> {
        let base = match mode {
            SeekMode::Begin => 0,
            SeekMode::Current => self.position as i64,
            SeekMode::End => self.extent.length as i64,
        };

        let target = base
            .checked_add(delta)
            .filter(|t| (0..=self.extent.length as i64).contains(t))
            .ok_or(XdvdfsError::InvalidParameter)? as u32;

        if self.cached_sector != Some(byte_to_sector(target)) {
            self.cached_sector = None;
        }

        self.position = target;
        Ok(target)
    }
}
