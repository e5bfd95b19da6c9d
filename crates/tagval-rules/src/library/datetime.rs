//! Date and time rules.
//!
//! `time(layout)` takes a chrono `strftime` layout such as
//! `%Y-%m-%d %H:%M`. Without a layout the value must be RFC 3339.

use chrono::format::{parse, ParseErrorKind, Parsed, StrftimeItems};
use chrono::DateTime;

use super::{plain, with_params};
use crate::registry::Registry;

pub(crate) fn install(registry: &Registry) {
    with_params(registry, "time", "{field} must be a time in the {0} layout", matches_layout);
    plain(registry, "rfc3339", "{field} must be an RFC 3339 timestamp", is_rfc3339);
    plain(registry, "unixtime", "{field} must be a Unix timestamp", is_unix_time);
}

/// The value parses completely under `params[0]` and the fields it sets
/// form a real calendar date and time of day.
pub fn matches_layout(value: &str, params: &[&str]) -> bool {
    let Some(layout) = params.first().filter(|layout| !layout.is_empty()) else {
        return is_rfc3339(value);
    };

    let mut parsed = Parsed::new();
    if parse(&mut parsed, value, StrftimeItems::new(layout)).is_err() {
        return false;
    }
    // Layouts may set only part of a timestamp; missing components are fine,
    // inconsistent ones (31 February, weekday mismatch) are not.
    let date_ok = match parsed.to_naive_date() {
        Ok(_) => true,
        Err(err) => err.kind() == ParseErrorKind::NotEnough,
    };
    let time_ok = match parsed.to_naive_time() {
        Ok(_) => true,
        Err(err) => err.kind() == ParseErrorKind::NotEnough,
    };
    date_ok && time_ok
}

pub fn is_rfc3339(value: &str) -> bool {
    DateTime::parse_from_rfc3339(value).is_ok()
}

/// Integer seconds since the epoch, optionally signed.
pub fn is_unix_time(value: &str) -> bool {
    value.parse::<i64>().is_ok()
}
