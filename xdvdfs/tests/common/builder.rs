//! XISO image builder
//!
//! Lays out a valid XDVDFS image: volume descriptor at sector 32, file data
//! and directory tables after it. Directory tables are balanced binary
//! search trees written root-first, with no entry crossing a sector
//! boundary and unused space filled with 0xFF.

use crate::common::{MemoryBlockDevice, SECTOR};
use std::cmp::Ordering;
use std::collections::BTreeMap;

pub const SIGNATURE: &[u8; 20] = b"MICROSOFT*XBOX*MEDIA";

pub const ATTR_DIRECTORY: u8 = 0x10;
pub const ATTR_ARCHIVE: u8 = 0x20;

#[derive(Debug, Clone)]
enum Node {
    File(Vec<u8>),
    Dir(BTreeMap<String, Node>),
}

pub struct XisoBuilder {
    root: BTreeMap<String, Node>,
    base_sector: u32,
    creation_time: u64,
}

struct Entry {
    name: String,
    sector: u32,
    size: u32,
    attributes: u8,
}

struct Layout {
    data: Vec<u8>,
    base: usize,
    next_sector: u32,
}

#[allow(dead_code)]
impl XisoBuilder {
    pub fn new() -> Self {
        Self {
            root: BTreeMap::new(),
            base_sector: 0,
            creation_time: 0,
        }
    }

    /// Place the image at a non-zero sector of the device
    pub fn base_sector(mut self, sector: u32) -> Self {
        self.base_sector = sector;
        self
    }

    /// FILETIME stored in the descriptor
    pub fn creation_time(mut self, filetime: u64) -> Self {
        self.creation_time = filetime;
        self
    }

    /// Add a file, creating parent directories as needed
    pub fn add_file(&mut self, path: &str, content: &[u8]) {
        let (dir, name) = self.parent_of(path);
        dir.insert(name, Node::File(content.to_vec()));
    }

    /// Add an (empty) directory, creating parents as needed
    pub fn add_dir(&mut self, path: &str) {
        let (dir, name) = self.parent_of(path);
        dir.entry(name).or_insert_with(|| Node::Dir(BTreeMap::new()));
    }

    pub fn build(self) -> MemoryBlockDevice {
        let base = self.base_sector as usize * SECTOR;
        let mut layout = Layout {
            data: vec![0u8; base + 33 * SECTOR],
            base,
            next_sector: 33,
        };

        let (root_sector, root_size) = layout.write_dir(&self.root);

        let vd = base + 32 * SECTOR;
        layout.data[vd..vd + 20].copy_from_slice(SIGNATURE);
        layout.data[vd + 20..vd + 24].copy_from_slice(&root_sector.to_le_bytes());
        layout.data[vd + 24..vd + 28].copy_from_slice(&root_size.to_le_bytes());
        layout.data[vd + 28..vd + 36].copy_from_slice(&self.creation_time.to_le_bytes());
        layout.data[vd + 2028..vd + 2048].copy_from_slice(SIGNATURE);

        MemoryBlockDevice::new(layout.data)
    }

    fn parent_of(&mut self, path: &str) -> (&mut BTreeMap<String, Node>, String) {
        let mut parts: Vec<&str> = path.split(['\\', '/']).filter(|p| !p.is_empty()).collect();
        let name = parts.pop().expect("path has a name").to_string();

        let mut dir = &mut self.root;
        for part in parts {
            let node = dir
                .entry(part.to_string())
                .or_insert_with(|| Node::Dir(BTreeMap::new()));
            dir = match node {
                Node::Dir(children) => children,
                Node::File(_) => panic!("{} is a file", part),
            };
        }
        (dir, name)
    }
}

/// Case-insensitive ordinal order used by directory tables
pub fn compare_names(a: &str, b: &str) -> Ordering {
    a.bytes()
        .map(|c| c.to_ascii_uppercase())
        .cmp(b.bytes().map(|c| c.to_ascii_uppercase()))
}

/// On-disk entry length
pub fn entry_length(name_len: usize) -> usize {
    (14 + name_len + 3) & !3
}

impl Layout {
    /// Write bytes at the next free sector, returning its relative index
    fn alloc(&mut self, bytes: &[u8]) -> u32 {
        let sector = self.next_sector;
        if bytes.is_empty() {
            return sector;
        }
        let sectors = bytes.len().div_ceil(SECTOR);
        let start = self.base + sector as usize * SECTOR;
        self.data.resize(start + sectors * SECTOR, 0);
        self.data[start..start + bytes.len()].copy_from_slice(bytes);
        self.next_sector += sectors as u32;
        sector
    }

    fn write_dir(&mut self, dir: &BTreeMap<String, Node>) -> (u32, u32) {
        let mut entries: Vec<Entry> = dir
            .iter()
            .map(|(name, node)| match node {
                Node::File(content) => Entry {
                    name: name.clone(),
                    sector: self.alloc(content),
                    size: content.len() as u32,
                    attributes: ATTR_ARCHIVE,
                },
                Node::Dir(children) => {
                    let (sector, size) = self.write_dir(children);
                    Entry {
                        name: name.clone(),
                        sector,
                        size,
                        attributes: ATTR_DIRECTORY,
                    }
                }
            })
            .collect();
        entries.sort_by(|a, b| compare_names(&a.name, &b.name));

        let mut table = Vec::new();
        emit(&mut table, &entries);
        let padded = table.len().div_ceil(SECTOR).max(1) * SECTOR;
        table.resize(padded, 0xFF);

        let sector = self.alloc(&table);
        (sector, table.len() as u32)
    }
}

/// Write the subtree over `entries` root-first, returning its link value
fn emit(table: &mut Vec<u8>, entries: &[Entry]) -> u16 {
    if entries.is_empty() {
        return 0;
    }

    let mid = entries.len() / 2;
    let entry = &entries[mid];
    let len = entry_length(entry.name.len());

    let pos = table.len();
    if pos / SECTOR != (pos + len - 1) / SECTOR {
        table.resize((pos / SECTOR + 1) * SECTOR, 0xFF);
    }

    let offset = table.len();
    table.extend_from_slice(&[0u8; 4]);
    table.extend_from_slice(&entry.sector.to_le_bytes());
    table.extend_from_slice(&entry.size.to_le_bytes());
    table.push(entry.attributes);
    table.push(entry.name.len() as u8);
    table.extend_from_slice(entry.name.as_bytes());
    table.resize(offset + len, 0xFF);

    let left = emit(table, &entries[..mid]);
    let right = emit(table, &entries[mid + 1..]);
    table[offset..offset + 2].copy_from_slice(&left.to_le_bytes());
    table[offset + 2..offset + 4].copy_from_slice(&right.to_le_bytes());

    (offset / 4) as u16
}
