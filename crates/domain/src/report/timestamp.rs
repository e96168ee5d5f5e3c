//! Board timestamps are rendered in Manila civil time (UTC+8, no DST) using
//! the en-US layout viewers expect, e.g. `10/14/2026, 3:04:05 PM`.
//! They are display strings and do not sort chronologically.

use chrono::{DateTime, FixedOffset, Utc};

pub const MANILA_UTC_OFFSET_HOURS: i32 = 8;

pub fn manila_offset() -> FixedOffset {
    FixedOffset::east_opt(MANILA_UTC_OFFSET_HOURS * 3600).expect("UTC+8 is a valid offset")
}

pub fn format_manila(instant: DateTime<Utc>) -> String {
    instant
        .with_timezone(&manila_offset())
        .format("%-m/%-d/%Y, %-I:%M:%S %p")
        .to_string()
}

pub fn manila_now() -> String {
    format_manila(Utc::now())
}
