//! Name handling utilities
//!
//! XDVDFS names are single-byte encoded and compared without regard to
//! ASCII case. Directory tables are sorted by the same rule.

use crate::error::{Result, XdvdfsError};
use crate::types::{MAX_NAME_LENGTH, MAX_PATH_DEPTH};
use alloc::string::String;
use alloc::vec::Vec;
use core::cmp::Ordering;

/// Path component separators
pub const SEPARATORS: [u8; 2] = [b'\\', b'/'];

/// Case-insensitive ordinal comparison used by directory tables
///
/// A name that is a prefix of another sorts first.
pub fn compare_names(a: &[u8], b: &[u8]) -> Ordering {
    a.iter()
        .map(u8::to_ascii_uppercase)
        .cmp(b.iter().map(u8::to_ascii_uppercase))
}

/// Convert raw name bytes to a string, replacing invalid sequences
pub fn name_to_string(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

/// Split a path into its components
///
/// Both `\` and `/` separate components. Empty components are dropped, so
/// `""`, `"\\"` and `"/"` all name the root. Components are raw bytes and
/// are never required to be UTF-8.
pub fn split_path(path: &[u8]) -> Result<Vec<&[u8]>> {
    let mut components = Vec::new();
    for component in path
        .split(|b| SEPARATORS.contains(b))
        .filter(|c| !c.is_empty())
    {
        if component.len() > MAX_NAME_LENGTH {
            return Err(XdvdfsError::InvalidParameter);
        }
        components.push(component);
    }

    if components.len() > MAX_PATH_DEPTH {
        return Err(XdvdfsError::InvalidParameter);
    }

    Ok(components)
}
