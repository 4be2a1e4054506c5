//! File opening, reading and seeking

pub mod extent;
pub mod handle;
pub mod metadata;
pub mod reader;

pub use extent::Extent;
pub use handle::FileHandle;

use crate::directory::SearchRecord;
use crate::error::{Result, XdvdfsError};
use crate::types::{DirEntry, SeekMode};
use crate::volume::Session;
use gpt_disk_io::BlockIo;

impl<B: BlockIo> Session<B> {
    /// Open the file at `path`
    ///
    /// Returns `FileNotFound` if the path is missing or names a directory.
    pub fn open_file(&mut self, path: impl AsRef<[u8]>) -> Result<FileHandle> {
        let resolved = self.resolve(path.as_ref())?;
        self.open_entry(&resolved.entry)
    }

    /// Open the entry a search record currently points at
    pub fn open_file_ex(&mut self, record: &SearchRecord) -> Result<FileHandle> {
        self.check_epoch(record.epoch)?;
        let entry = record.entry().ok_or(XdvdfsError::InvalidParameter)?;
        self.open_entry(entry)
    }

    /// Read from the current position
    ///
    /// Returns the number of bytes read, 0 at end of file.
    pub fn file_read(&mut self, handle: &mut FileHandle, buffer: &mut [u8]) -> Result<usize> {
        self.check_epoch(handle.epoch)?;
        handle.ensure_open()?;
        reader::read(self, handle, buffer)
    }

    /// Move the position of an open file
    ///
    /// Returns the new position. Targets outside `[0, size]` fail with
    /// `InvalidParameter` and leave the position unchanged.
    pub fn file_seek(&mut self, handle: &mut FileHandle, delta: i64, mode: SeekMode) -> Result<u32> {
        self.check_epoch(handle.epoch)?;
        handle.ensure_open()?;
        handle.seek(delta, mode)
    }

    /// Close a file handle
    ///
    /// Always succeeds, including for handles from before an unmount.
    pub fn file_close(&self, handle: &mut FileHandle) -> Result<()> {
        handle.close();
        Ok(())
    }

    fn open_entry(&self, entry: &DirEntry) -> Result<FileHandle> {
        self.ensure_mounted()?;
        if entry.is_directory() {
            return Err(XdvdfsError::FileNotFound);
        }

        log::trace!(
            "xdvdfs: open {:?} at sector {} ({} bytes)",
            entry.name,
            entry.start_sector,
            entry.size
        );
        Ok(FileHandle::new(self.epoch(), entry.extent()))
    }
}
