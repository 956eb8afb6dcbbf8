//! ISO-8601 timestamp conversion.
//!
//! Window boundaries are computed from the market's `endDate` string, so
//! this conversion has to be exact. The Gamma API emits RFC 3339 with a
//! trailing `Z`; chrono accepts both `Z` and explicit offsets.

use anyhow::{Context, Result};
use chrono::DateTime;

/// Converts an ISO-8601 / RFC 3339 timestamp string to unix epoch seconds.
///
/// # Errors
///
/// Returns an error if the string is not a valid RFC 3339 timestamp. The
/// caller is expected to treat this as fatal for the single market being
/// processed, not for the run.
pub fn iso_to_unix(iso: &str) -> Result<i64> {
    let dt = DateTime::parse_from_rfc3339(iso)
        .with_context(|| format!("invalid ISO-8601 timestamp: {iso:?}"))?;
    Ok(dt.timestamp())
}
