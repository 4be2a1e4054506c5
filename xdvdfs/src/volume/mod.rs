//! Volume mounting
//!
//! XDVDFS has a single volume descriptor at sector 32 of the image. An image
//! may start at a non-zero sector of the device (for example the game
//! partition of a full disc dump), so every sector number is taken relative
//! to the `start_sector` given at mount time.

pub mod descriptor;
pub mod session;

pub use descriptor::VolumeDescriptor;
pub use session::Session;

use crate::error::{Result, XdvdfsError};
use crate::types::{SECTOR_SIZE, VOLUME_DESCRIPTOR_SECTOR};
use gpt_disk_io::BlockIo;
use gpt_disk_types::Lba;

/// Mount an XDVDFS volume from a block device
///
/// Reads and validates the volume descriptor at `start_sector + 32`.
///
/// Every session starts a new epoch lineage at 0. To mount again on the
/// same device and keep earlier handles stale, use
/// [`Session::remount`] instead of `into_inner` + `mount`.
///
/// # Arguments
/// * `block_io` - Block device containing the image (2048-byte sectors)
/// * `start_sector` - Starting sector of the image (0 for a plain XISO)
///
/// # Returns
/// A session with epoch 0, or `InvalidVolume` / `DiskError`
pub fn mount<B: BlockIo>(mut block_io: B, start_sector: u64) -> Result<Session<B>> {
    let descriptor = read_descriptor(&mut block_io, start_sector)?;
    Ok(Session::new(block_io, start_sector, descriptor))
}

/// Read and validate the descriptor of the image at `start_sector`
pub(crate) fn read_descriptor<B: BlockIo>(
    block_io: &mut B,
    start_sector: u64,
) -> Result<VolumeDescriptor> {
    let lba = start_sector
        .checked_add(VOLUME_DESCRIPTOR_SECTOR)
        .ok_or(XdvdfsError::DiskError)?;

    let mut buffer = [0u8; SECTOR_SIZE];
    block_io
        .read_blocks(Lba(lba), &mut buffer)
        .map_err(|_| XdvdfsError::DiskError)?;

    let descriptor = VolumeDescriptor::parse(&buffer)?;

    log::debug!(
        "xdvdfs: mounted at sector {}, root dir sector {} ({} bytes)",
        start_sector,
        descriptor.root_sector,
        descriptor.root_size
    );

    Ok(descriptor)
}
