//! File reader implementation
//!
//! Whole sectors that line up with the read position are transferred
//! straight into the caller's buffer. Anything shorter goes through the
//! handle's one-sector cache, so a run of small sequential reads touches
//! each sector once.

use crate::error::Result;
use crate::file::handle::FileHandle;
use crate::types::SECTOR_SIZE;
use crate::utils::sector::{byte_to_sector, offset_in_sector};
use crate::volume::Session;
use alloc::boxed::Box;
use gpt_disk_io::BlockIo;

/// Read from the handle position into `buffer`
///
/// Returns the number of bytes delivered (0 at end of file). On failure the
/// position is left where it was.
pub(crate) fn read<B: BlockIo>(
    session: &mut Session<B>,
    handle: &mut FileHandle,
    buffer: &mut [u8],
) -> Result<usize> {
    let wanted = buffer.len().min(handle.remaining() as usize);
    let mut position = handle.position;
    let mut done = 0;

    while done < wanted {
        let sector = byte_to_sector(position);
        let offset = offset_in_sector(position);
        let left = wanted - done;

        let count = if offset == 0 && left >= SECTOR_SIZE {
            let bytes = left - left % SECTOR_SIZE;
            session.read_sectors(handle.extent.sector(sector), &mut buffer[done..done + bytes])?;
            bytes
        } else {
            let cached = load_sector(session, handle, sector)?;
            let bytes = left.min(SECTOR_SIZE - offset);
            buffer[done..done + bytes].copy_from_slice(&cached[offset..offset + bytes]);
            bytes
        };

        done += count;
        position += count as u32;
    }

    handle.position = position;
    Ok(done)
}

/// Make the cache hold file sector `sector`
fn load_sector<'h, B: BlockIo>(
    session: &mut Session<B>,
    handle: &'h mut FileHandle,
    sector: u32,
) -> Result<&'h [u8; SECTOR_SIZE]> {
    let cache = handle
        .cache
        .get_or_insert_with(|| Box::new([0u8; SECTOR_SIZE]));

    if handle.cached_sector != Some(sector) {
        handle.cached_sector = None;
        session.read_sectors(handle.extent.sector(sector), &mut cache[..])?;
        handle.cached_sector = Some(sector);
    }

    Ok(&**cache)
}
