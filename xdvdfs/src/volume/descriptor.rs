//! Volume descriptor parsing
//!
//! The descriptor occupies one full sector at sector 32 of the image and is
//! bracketed by two copies of the `MICROSOFT*XBOX*MEDIA` signature.

use crate::error::{Result, XdvdfsError};
use crate::types::{SECTOR_SIZE, VOLUME_SIGNATURE};
use crate::utils::datetime::FileTime;

/// Offset of the leading signature
const SIGNATURE1_OFFSET: usize = 0;
/// Offset of the root directory start sector
const ROOT_SECTOR_OFFSET: usize = 20;
/// Offset of the root directory size
const ROOT_SIZE_OFFSET: usize = 24;
/// Offset of the creation FILETIME
const CREATION_TIME_OFFSET: usize = 28;
/// Offset of the trailing signature (after 1992 unused bytes)
const SIGNATURE2_OFFSET: usize = 2028;

/// Parsed volume descriptor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VolumeDescriptor {
    /// Root directory table start sector
    pub root_sector: u32,

    /// Root directory table size in bytes
    pub root_size: u32,

    /// Image creation time
    pub creation_time: FileTime,
}

impl VolumeDescriptor {
    /// Parse and validate a descriptor sector
    pub fn parse(data: &[u8]) -> Result<Self> {
        if data.len() < SECTOR_SIZE {
            return Err(XdvdfsError::InvalidVolume);
        }

        let signature1 = &data[SIGNATURE1_OFFSET..SIGNATURE1_OFFSET + VOLUME_SIGNATURE.len()];
        let signature2 = &data[SIGNATURE2_OFFSET..SIGNATURE2_OFFSET + VOLUME_SIGNATURE.len()];
        if signature1 != VOLUME_SIGNATURE || signature2 != VOLUME_SIGNATURE {
            log::warn!("xdvdfs: volume descriptor signature mismatch");
            return Err(XdvdfsError::InvalidVolume);
        }

        let creation_time = <&[u8; 8]>::try_from(
            &data[CREATION_TIME_OFFSET..CREATION_TIME_OFFSET + 8],
        )
        .map_err(|_| XdvdfsError::InvalidVolume)?;

        Ok(Self {
            root_sector: read_u32(data, ROOT_SECTOR_OFFSET),
            root_size: read_u32(data, ROOT_SIZE_OFFSET),
            creation_time: FileTime::from_bytes(creation_time),
        })
    }

    /// Serialize into a full descriptor sector
    pub fn to_bytes(&self) -> [u8; SECTOR_SIZE] {
        let mut sector = [0u8; SECTOR_SIZE];
        sector[SIGNATURE1_OFFSET..SIGNATURE1_OFFSET + 20].copy_from_slice(VOLUME_SIGNATURE);
        sector[ROOT_SECTOR_OFFSET..ROOT_SECTOR_OFFSET + 4]
            .copy_from_slice(&self.root_sector.to_le_bytes());
        sector[ROOT_SIZE_OFFSET..ROOT_SIZE_OFFSET + 4]
            .copy_from_slice(&self.root_size.to_le_bytes());
        sector[CREATION_TIME_OFFSET..CREATION_TIME_OFFSET + 8]
            .copy_from_slice(&self.creation_time.0.to_le_bytes());
        sector[SIGNATURE2_OFFSET..SIGNATURE2_OFFSET + 20].copy_from_slice(VOLUME_SIGNATURE);
        sector
    }
}

fn read_u32(data: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes([data[offset], data[offset + 1], data[offset + 2], data[offset + 3]])
}
