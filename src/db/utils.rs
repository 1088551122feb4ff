//! Database utility functions.

use std::sync::LazyLock;
use std::sync::atomic::{AtomicU32, Ordering};

use chrono::{SecondsFormat, Utc};

// Seeded from the clock so restarts within the same second start elsewhere.
static ID_SEQUENCE: LazyLock<AtomicU32> =
    LazyLock::new(|| AtomicU32::new(Utc::now().timestamp_subsec_nanos()));

/// Generate a 16-character hex ID for database entities.
///
/// The upper half is the unix timestamp, the lower half a process-wide
/// sequence, so IDs generated within the same second still differ.
pub fn generate_entity_id() -> String {
    let secs = Utc::now().timestamp() as u32;
    let seq = ID_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    format!("{:08x}{:08x}", secs, seq)
}

/// Get current datetime as an RFC 3339 UTC string with millisecond precision.
pub fn current_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}
