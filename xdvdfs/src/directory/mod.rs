//! Directory lookup and enumeration

pub mod record;
pub mod search;
pub mod table;

pub use search::SearchRecord;
pub use table::DirectoryTable;

use crate::error::{Result, XdvdfsError};
use crate::types::{DirEntry, MAX_DIRECTORY_SIZE};
use crate::utils::{sector, string};
use crate::volume::Session;
use alloc::vec;
use gpt_disk_io::BlockIo;

/// Outcome of resolving a path
#[derive(Debug, Clone)]
pub(crate) struct Resolved {
    /// Directory the entry was found in
    pub parent: DirEntry,
    /// The entry itself
    pub entry: DirEntry,
    /// Parsed parent table and the entry's position in it; `None` for the root
    pub location: Option<(DirectoryTable, usize)>,
}

impl<B: BlockIo> Session<B> {
    /// Start enumerating the root directory
    ///
    /// Returns `NoMoreFiles` if the root directory is empty.
    pub fn get_root_dir(&mut self) -> Result<SearchRecord> {
        self.ensure_mounted()?;

        let root = self.root_entry();
        let table = self.load_table(&root)?;
        if table.is_empty() {
            return Err(XdvdfsError::NoMoreFiles);
        }

        let mut record = SearchRecord::new(self.epoch(), root.start_sector, root.size, Some(root));
        record.table = Some(table);
        Ok(record)
    }

    /// Produce the next entry of a directory, in name order
    ///
    /// Returns `NoMoreFiles` once every entry has been produced. The parsed
    /// directory is kept in the record, so later calls do not re-read it.
    pub fn enum_files<'r>(&mut self, record: &'r mut SearchRecord) -> Result<&'r DirEntry> {
        self.check_epoch(record.epoch)?;

        if record.table.is_none() {
            record.table = Some(self.load_table(&record.directory())?);
        }

        let next = record
            .table
            .as_ref()
            .and_then(|table| table.get(record.position))
            .cloned()
            .ok_or(XdvdfsError::NoMoreFiles)?;

        record.position += 1;
        let entry: &'r DirEntry = record.entry.insert(next);
        Ok(entry)
    }

    /// Look up a file or directory by path
    ///
    /// The record describes the entry and belongs to its parent directory.
    /// Passing it to [`enum_files`](Self::enum_files) continues with the
    /// entry that sorts after the resolved one. For the root itself the
    /// record enumerates the root from its first entry.
    pub fn get_file_info(&mut self, path: impl AsRef<[u8]>) -> Result<SearchRecord> {
        let resolved = self.resolve(path.as_ref())?;
        let mut record = SearchRecord::new(
            self.epoch(),
            resolved.parent.start_sector,
            resolved.parent.size,
            Some(resolved.entry),
        );
        if let Some((table, position)) = resolved.location {
            record.table = Some(table);
            record.position = position + 1;
        }
        Ok(record)
    }

    /// Start enumerating the directory at `path`
    ///
    /// Returns `FileNotFound` if the path names a file.
    pub fn open_folder(&mut self, path: impl AsRef<[u8]>) -> Result<SearchRecord> {
        let resolved = self.resolve(path.as_ref())?;
        let folder = resolved.entry;
        if !folder.is_directory() {
            return Err(XdvdfsError::FileNotFound);
        }

        Ok(SearchRecord::new(
            self.epoch(),
            folder.start_sector,
            folder.size,
            Some(folder),
        ))
    }

    /// Walk `path` from the root directory
    pub(crate) fn resolve(&mut self, path: &[u8]) -> Result<Resolved> {
        self.ensure_mounted()?;
        log::trace!("xdvdfs: resolve \"{}\"", path.escape_ascii());

        let components = string::split_path(path)?;
        let mut parent = self.root_entry();
        let mut entry = parent.clone();
        let mut location = None;

        for component in components {
            if !entry.is_directory() {
                return Err(XdvdfsError::FileNotFound);
            }

            let table = self.load_table(&entry)?;
            let position = table.locate(component).ok_or(XdvdfsError::FileNotFound)?;
            let found = table
                .get(position)
                .cloned()
                .ok_or(XdvdfsError::FileNotFound)?;

            parent = core::mem::replace(&mut entry, found);
            location = Some((table, position));
        }

        Ok(Resolved {
            parent,
            entry,
            location,
        })
    }

    /// Read and parse the table of a directory entry
    pub(crate) fn load_table(&mut self, directory: &DirEntry) -> Result<DirectoryTable> {
        if directory.size > MAX_DIRECTORY_SIZE {
            log::warn!(
                "xdvdfs: directory at sector {} claims {} bytes",
                directory.start_sector,
                directory.size
            );
            return Err(XdvdfsError::DiskError);
        }

        let size = directory.size as usize;
        let mut buffer = vec![0u8; sector::align_to_sector(size)];
        if !buffer.is_empty() {
            self.read_sectors(directory.start_sector as u64, &mut buffer)?;
        }

        DirectoryTable::parse(&buffer[..size])
    }
}
