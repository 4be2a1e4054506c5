//! Directory table parsing
//!
//! A directory table is a binary search tree laid out in a flat byte range.
//! The root entry sits at offset 0 and every entry links to its children by
//! offset. The table is parsed once into an arena of entries with index
//! links so that lookup and in-order enumeration never touch raw offsets.
//!
//! Corrupt tables are rejected with `DiskError`: child offsets past the end
//! of the table, truncated entries, links into padding, and links that
//! reach an entry a second time (cycles or shared subtrees).

use crate::directory::record::{child_offset, DirectoryRecord, ENTRY_ALIGNMENT, PADDING};
use crate::error::{Result, XdvdfsError};
use crate::types::DirEntry;
use crate::utils::string::{compare_names, name_to_string};
use alloc::vec;
use alloc::vec::Vec;
use core::cmp::Ordering;

/// Offset of the root entry within a table
pub const ROOT_OFFSET: usize = 0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Left,
    Right,
}

#[derive(Debug, Clone)]
struct Node {
    entry: DirEntry,
    rank: usize,
    left: Option<usize>,
    right: Option<usize>,
}

/// Parsed directory table
#[derive(Debug, Clone)]
pub struct DirectoryTable {
    nodes: Vec<Node>,
    root: Option<usize>,
    order: Vec<usize>,
}

impl DirectoryTable {
    /// Parse a directory table
    ///
    /// `data` is exactly the directory's byte range. An empty range, or a
    /// root slot filled with padding, is an empty directory.
    pub fn parse(data: &[u8]) -> Result<Self> {
        if is_empty_table(data)? {
            return Ok(Self {
                nodes: Vec::new(),
                root: None,
                order: Vec::new(),
            });
        }

        let mut nodes: Vec<Node> = Vec::new();
        let mut visited = vec![false; data.len() / ENTRY_ALIGNMENT + 1];
        let mut pending: Vec<(usize, Option<(usize, Side)>)> = vec![(ROOT_OFFSET, None)];

        while let Some((offset, parent)) = pending.pop() {
            if offset >= data.len() {
                log::warn!("xdvdfs: directory link {:#x} past end of table", offset);
                return Err(XdvdfsError::DiskError);
            }

            let slot = offset / ENTRY_ALIGNMENT;
            if visited[slot] {
                log::warn!("xdvdfs: directory entry {:#x} linked twice", offset);
                return Err(XdvdfsError::DiskError);
            }
            visited[slot] = true;

            let record = DirectoryRecord::parse(data, offset)?;
            let index = nodes.len();
            nodes.push(Node {
                entry: DirEntry {
                    name: name_to_string(record.name),
                    name_bytes: record.name.to_vec(),
                    size: record.size,
                    start_sector: record.start_sector,
                    attributes: record.flags(),
                },
                rank: 0,
                left: None,
                right: None,
            });

            match parent {
                Some((p, Side::Left)) => nodes[p].left = Some(index),
                Some((p, Side::Right)) => nodes[p].right = Some(index),
                None => {}
            }

            if let Some(right) = child_offset(record.right) {
                pending.push((right, Some((index, Side::Right))));
            }
            if let Some(left) = child_offset(record.left) {
                pending.push((left, Some((index, Side::Left))));
            }
        }

        let order = in_order(&nodes, 0);
        for (rank, &index) in order.iter().enumerate() {
            nodes[index].rank = rank;
        }
        for pair in order.windows(2) {
            let (a, b) = (&nodes[pair[0]], &nodes[pair[1]]);
            if compare_names(&a.entry.name_bytes, &b.entry.name_bytes) != Ordering::Less {
                log::warn!(
                    "xdvdfs: directory entries out of order: {:?} before {:?}",
                    a.entry.name,
                    b.entry.name
                );
            }
        }

        Ok(Self {
            nodes,
            root: Some(0),
            order,
        })
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the directory has no entries
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Entry at `position` of the name-sorted sequence
    pub fn get(&self, position: usize) -> Option<&DirEntry> {
        self.order.get(position).map(|&i| &self.nodes[i].entry)
    }

    /// Entries in name order
    pub fn iter(&self) -> impl Iterator<Item = &DirEntry> + '_ {
        self.order.iter().map(move |&i| &self.nodes[i].entry)
    }

    /// Look up a name by descending the tree from the root
    pub fn find(&self, name: &[u8]) -> Option<&DirEntry> {
        self.locate(name).and_then(|position| self.get(position))
    }

    /// Position of `name` in the name-sorted sequence
    pub fn locate(&self, name: &[u8]) -> Option<usize> {
        let mut current = self.root;
        while let Some(index) = current {
            let node = &self.nodes[index];
            current = match compare_names(name, &node.entry.name_bytes) {
                Ordering::Equal => return Some(node.rank),
                Ordering::Less => node.left,
                Ordering::Greater => node.right,
            };
        }
        None
    }
}

fn is_empty_table(data: &[u8]) -> Result<bool> {
    match data {
        [] => Ok(true),
        [_] => Err(XdvdfsError::DiskError),
        [a, b, ..] => Ok(u16::from_le_bytes([*a, *b]) == PADDING),
    }
}

/// In-order index sequence of the subtree rooted at `root`
fn in_order(nodes: &[Node], root: usize) -> Vec<usize> {
    let mut order = Vec::with_capacity(nodes.len());
    let mut stack = Vec::new();
    let mut current = Some(root);

    loop {
        while let Some(index) = current {
            stack.push(index);
            current = nodes[index].left;
        }
        match stack.pop() {
            Some(index) => {
                order.push(index);
                current = nodes[index].right;
            }
            None => break,
        }
    }

    order
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directory::record::entry_length;
    use alloc::string::String;

    /// Append an entry, returning its offset
    fn push(table: &mut Vec<u8>, left: u16, right: u16, name: &[u8]) -> usize {
        let offset = table.len();
        table.extend_from_slice(&left.to_le_bytes());
        table.extend_from_slice(&right.to_le_bytes());
        table.extend_from_slice(&100u32.to_le_bytes());
        table.extend_from_slice(&(name.len() as u32).to_le_bytes());
        table.push(0x20);
        table.push(name.len() as u8);
        table.extend_from_slice(name);
        table.resize(offset + entry_length(name.len()), 0xFF);
        offset
    }

    fn names(table: &DirectoryTable) -> Vec<String> {
        table.iter().map(|e| e.name.clone()).collect()
    }

    /// Root "M" (0), left "C" (16), right "X" (32)
    fn three_entries() -> Vec<u8> {
        let mut t = Vec::new();
        push(&mut t, 4, 8, b"M");
        push(&mut t, 0, 0, b"C");
        push(&mut t, 0, 0, b"X");
        t
    }

    #[test]
    fn test_in_order() {
        let table = DirectoryTable::parse(&three_entries()).unwrap();
        assert_eq!(table.len(), 3);
        assert_eq!(names(&table), ["C", "M", "X"]);
        assert_eq!(table.get(1).map(|e| e.name.as_str()), Some("M"));
        assert_eq!(table.get(3), None);
    }

    #[test]
    fn test_find() {
        let table = DirectoryTable::parse(&three_entries()).unwrap();
        assert_eq!(table.find(b"x").map(|e| e.name.as_str()), Some("X"));
        assert_eq!(table.find(b"M").map(|e| e.name.as_str()), Some("M"));
        assert!(table.find(b"D").is_none());
    }

    #[test]
    fn test_locate_gives_sorted_position() {
        let table = DirectoryTable::parse(&three_entries()).unwrap();
        assert_eq!(table.locate(b"c"), Some(0));
        assert_eq!(table.locate(b"M"), Some(1));
        assert_eq!(table.locate(b"X"), Some(2));
        assert_eq!(table.locate(b"Q"), None);
    }

    #[test]
    fn test_non_ascii_name_kept_verbatim() {
        let mut t = Vec::new();
        push(&mut t, 0, 0, b"CAF\xC9");
        let table = DirectoryTable::parse(&t).unwrap();
        let entry = table.get(0).unwrap();
        assert_eq!(entry.name_bytes, b"CAF\xC9");
        assert_eq!(entry.name, "CAF\u{FFFD}");
        assert_eq!(table.find(b"caf\xC9").map(|e| e.start_sector), Some(100));
        assert!(table.find(entry.name.as_bytes()).is_none());
    }

    #[test]
    fn test_empty_tables() {
        assert!(DirectoryTable::parse(&[]).unwrap().is_empty());
        assert!(DirectoryTable::parse(&[0xFF; 2048]).unwrap().is_empty());
        assert_eq!(DirectoryTable::parse(&[0x00]).unwrap_err(), XdvdfsError::DiskError);
    }

    #[test]
    fn test_child_out_of_bounds() {
        let mut t = Vec::new();
        push(&mut t, 200, 0, b"A");
        assert_eq!(DirectoryTable::parse(&t).unwrap_err(), XdvdfsError::DiskError);
    }

    #[test]
    fn test_cycle_detected() {
        // "M" -> left "C" -> right back to "C"
        let mut t = Vec::new();
        push(&mut t, 4, 0, b"M");
        push(&mut t, 0, 4, b"C");
        assert_eq!(DirectoryTable::parse(&t).unwrap_err(), XdvdfsError::DiskError);
    }

    #[test]
    fn test_shared_subtree_detected() {
        let mut t = Vec::new();
        push(&mut t, 4, 4, b"M");
        push(&mut t, 0, 0, b"C");
        assert_eq!(DirectoryTable::parse(&t).unwrap_err(), XdvdfsError::DiskError);
    }

    #[test]
    fn test_link_into_padding() {
        let mut t = Vec::new();
        push(&mut t, 0, 8, b"A");
        t.resize(64, 0xFF);
        assert_eq!(DirectoryTable::parse(&t).unwrap_err(), XdvdfsError::DiskError);
    }

    #[test]
    fn test_unsorted_table_still_served() {
        // "A" at the root with "Z" on its left: parsed, but lookups follow the links
        let mut t = Vec::new();
        push(&mut t, 4, 0, b"A");
        push(&mut t, 0, 0, b"Z");
        let table = DirectoryTable::parse(&t).unwrap();
        assert_eq!(names(&table), ["Z", "A"]);
        assert!(table.find(b"Z").is_none());
    }
}
