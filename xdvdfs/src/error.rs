//! Error types for XDVDFS operations

use core::fmt;

/// Result type for XDVDFS operations
pub type Result<T> = core::result::Result<T, XdvdfsError>;

/// Numeric code reported for a successful operation
pub const NO_ERROR: u32 = 0;

/// Errors that can occur during XDVDFS operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum XdvdfsError {
    /// Handle or search record was issued before the session was unmounted
    ExpiredSession,

    /// Directory enumeration is exhausted
    NoMoreFiles,

    /// Transport read failed, or on-disk structures are corrupt
    DiskError,

    /// Path component missing, or the entry has the wrong type
    FileNotFound,

    /// Argument out of range (seek target, oversized name, closed handle)
    InvalidParameter,

    /// Volume descriptor signatures do not match
    InvalidVolume,
}

impl XdvdfsError {
    /// Numeric error code as used by the classic XDVDFS interface
    ///
    /// `InvalidVolume` has no classic code (mount used to return a bare
    /// boolean) and is reported as 6.
    pub const fn code(self) -> u32 {
        match self {
            Self::ExpiredSession => 1,
            Self::NoMoreFiles => 2,
            Self::DiskError => 3,
            Self::FileNotFound => 4,
            Self::InvalidParameter => 5,
            Self::InvalidVolume => 6,
        }
    }

    /// Inverse of [`code`](Self::code); `None` for `NO_ERROR` and unknown codes
    pub const fn from_code(code: u32) -> Option<Self> {
        match code {
            1 => Some(Self::ExpiredSession),
            2 => Some(Self::NoMoreFiles),
            3 => Some(Self::DiskError),
            4 => Some(Self::FileNotFound),
            5 => Some(Self::InvalidParameter),
            6 => Some(Self::InvalidVolume),
            _ => None,
        }
    }
}

impl fmt::Display for XdvdfsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ExpiredSession => write!(f, "Session expired (volume was unmounted)"),
            Self::NoMoreFiles => write!(f, "No more files in directory"),
            Self::DiskError => write!(f, "Disk read error or corrupt filesystem"),
            Self::FileNotFound => write!(f, "File or directory not found"),
            Self::InvalidParameter => write!(f, "Invalid parameter"),
            Self::InvalidVolume => write!(f, "Invalid XDVDFS volume descriptor"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for XdvdfsError {}
