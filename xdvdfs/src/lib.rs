//! XDVDFS Filesystem Implementation
//!
//! A `no_std`, read-only implementation of XDVDFS, the filesystem found on
//! Xbox game discs and XISO images.
//!
//! # Overview
//!
//! This crate provides:
//! - Volume descriptor validation (sector 32 of the image)
//! - Directory tables parsed as binary search trees
//! - Path resolution and sorted directory enumeration
//! - File handles with read/seek and a one-sector read cache
//! - Session invalidation: handles opened before `unmount` become stale
//!
//! # Architecture
//!
//! The implementation is layered:
//! 1. **Volume layer** - Validates the volume descriptor and owns the session
//! 2. **Directory layer** - Parses directory tables and resolves paths
//! 3. **File layer** - Sector-level reads through open file handles
//!
//! # Usage
//!
//! ```ignore
//! use xdvdfs::{mount, SeekMode};
//!
//! // Mount an XISO from a block device at the given start sector
//! let mut session = mount(block_io, 0)?;
//!
//! // Open a file by path
//! let mut file = session.open_file("\\media\\intro.xmv")?;
//!
//! // Read the first chunk
//! let mut header = [0u8; 64];
//! let n = session.file_read(&mut file, &mut header)?;
//!
//! // Rewind
//! session.file_seek(&mut file, 0, SeekMode::Begin)?;
//! ```
//!
//! # Enumeration
//!
//! ```ignore
//! let mut search = session.open_folder("\\media")?;
//! while let Ok(entry) = session.enum_files(&mut search) {
//!     println!("{} ({} bytes)", entry.name, entry.size);
//! }
//!
//! // Paths are raw bytes; a `name_bytes()` from enumeration can be passed back
//! let info = session.get_file_info(b"\\media\\intro.xmv")?;
//! ```

#![no_std]
#![warn(missing_docs)]

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

pub mod error;
pub mod types;
pub mod volume;
pub mod directory;
pub mod file;
pub mod utils;

pub use error::{XdvdfsError, Result};
pub use types::{Attributes, DirEntry, SeekMode};

// High-level API exports
pub use volume::{mount, Session, VolumeDescriptor};
pub use directory::SearchRecord;
pub use file::FileHandle;
