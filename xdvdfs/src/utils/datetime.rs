//! Date/time parsing
//!
//! The volume descriptor stores the image creation time as a Windows
//! FILETIME: 100-nanosecond intervals since 1601-01-01 UTC.

/// FILETIME ticks between 1601-01-01 and 1970-01-01
const UNIX_EPOCH_TICKS: i128 = 116_444_736_000_000_000;

/// FILETIME ticks per second
const TICKS_PER_SECOND: i128 = 10_000_000;

/// Windows FILETIME value
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct FileTime(pub u64);

/// Broken-down UTC date and time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateTime {
    /// Full year
    pub year: i64,
    /// Month (1-12)
    pub month: u8,
    /// Day (1-31)
    pub day: u8,
    /// Hour (0-23)
    pub hour: u8,
    /// Minute (0-59)
    pub minute: u8,
    /// Second (0-59)
    pub second: u8,
}

impl FileTime {
    /// Parse from the 8 on-disk bytes (little-endian)
    pub fn from_bytes(bytes: &[u8; 8]) -> Self {
        Self(u64::from_le_bytes(*bytes))
    }

    /// Seconds since the Unix epoch (negative before 1970)
    pub fn to_unix_seconds(self) -> i64 {
        let ticks = self.0 as i128 - UNIX_EPOCH_TICKS;
        ticks.div_euclid(TICKS_PER_SECOND) as i64
    }

    /// Convert to a UTC calendar date
    pub fn to_datetime(self) -> DateTime {
        let seconds = self.to_unix_seconds();
        let days = seconds.div_euclid(86_400);
        let secs_of_day = seconds.rem_euclid(86_400);

        // Civil-from-days over 400-year eras
        let z = days + 719_468;
        let era = z.div_euclid(146_097);
        let doe = z.rem_euclid(146_097);
        let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
        let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
        let mp = (5 * doy + 2) / 153;
        let day = (doy - (153 * mp + 2) / 5 + 1) as u8;
        let month = (if mp < 10 { mp + 3 } else { mp - 9 }) as u8;
        let year = yoe + era * 400 + if month <= 2 { 1 } else { 0 };

        DateTime {
            year,
            month,
            day,
            hour: (secs_of_day / 3600) as u8,
            minute: (secs_of_day % 3600 / 60) as u8,
            second: (secs_of_day % 60) as u8,
        }
    }
}
