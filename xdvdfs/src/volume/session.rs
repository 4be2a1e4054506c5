//! Mounted volume session
//!
//! A session owns the block device and the validated descriptor. Handles and
//! search records do not borrow it; instead each one is stamped with the
//! session epoch at creation. Unmounting bumps the epoch, so every handle
//! issued before that point fails its next check with `ExpiredSession`.

use crate::error::{Result, XdvdfsError};
use crate::types::DirEntry;
use crate::volume::{read_descriptor, VolumeDescriptor};
use gpt_disk_io::BlockIo;
use gpt_disk_types::Lba;

/// A mounted XDVDFS volume
pub struct Session<B: BlockIo> {
    block_io: B,
    start_sector: u64,
    descriptor: VolumeDescriptor,
    epoch: u32,
    mounted: bool,
}

impl<B: BlockIo> Session<B> {
    pub(crate) fn new(block_io: B, start_sector: u64, descriptor: VolumeDescriptor) -> Self {
        Self {
            block_io,
            start_sector,
            descriptor,
            epoch: 0,
            mounted: true,
        }
    }

    /// Invalidate every handle and search record issued so far
    ///
    /// Always succeeds. Each call advances the epoch again.
    pub fn unmount(&mut self) {
        self.epoch = self.epoch.wrapping_add(1);
        self.mounted = false;
        log::debug!("xdvdfs: unmounted, epoch now {}", self.epoch);
    }

    /// Mount the device again, keeping this session's epoch lineage
    ///
    /// Unmounts first if still mounted, so nothing issued before the call
    /// survives it, even when a different disc is now in the device. On
    /// failure the session stays unmounted.
    pub fn remount(&mut self, start_sector: u64) -> Result<()> {
        if self.mounted {
            self.unmount();
        }

        self.descriptor = read_descriptor(&mut self.block_io, start_sector)?;
        self.start_sector = start_sector;
        self.mounted = true;
        Ok(())
    }

    /// Validated volume descriptor
    pub fn descriptor(&self) -> &VolumeDescriptor {
        &self.descriptor
    }

    /// Current epoch
    pub fn epoch(&self) -> u32 {
        self.epoch
    }

    /// Whether `unmount` has not been called yet
    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Image start sector on the underlying device
    pub fn start_sector(&self) -> u64 {
        self.start_sector
    }

    /// Underlying block device
    pub fn block_io(&self) -> &B {
        &self.block_io
    }

    /// Underlying block device (mutable)
    pub fn block_io_mut(&mut self) -> &mut B {
        &mut self.block_io
    }

    /// Give the block device back
    pub fn into_inner(self) -> B {
        self.block_io
    }

    /// Entry describing the root directory
    pub fn root_entry(&self) -> DirEntry {
        DirEntry::directory(self.descriptor.root_sector, self.descriptor.root_size)
    }

    /// Fail unless a handle stamped with `epoch` is still current
    pub(crate) fn check_epoch(&self, epoch: u32) -> Result<()> {
        if epoch != self.epoch {
            return Err(XdvdfsError::ExpiredSession);
        }
        Ok(())
    }

    /// Fail if the session has been unmounted
    pub(crate) fn ensure_mounted(&self) -> Result<()> {
        if !self.mounted {
            return Err(XdvdfsError::ExpiredSession);
        }
        Ok(())
    }

    /// Read whole sectors, `sector` relative to the image start
    ///
    /// `buffer.len()` must be a multiple of the sector size.
    pub(crate) fn read_sectors(&mut self, sector: u64, buffer: &mut [u8]) -> Result<()> {
        let lba = self
            .start_sector
            .checked_add(sector)
            .ok_or(XdvdfsError::DiskError)?;
        log::trace!("xdvdfs: read {} bytes at sector {}", buffer.len(), lba);
        self.block_io
            .read_blocks(Lba(lba), buffer)
            .map_err(|_| XdvdfsError::DiskError)
    }
}
