//! # Standard Rule Library
//!
//! Pure predicates installed into every [`Registry::with_standard_rules`]
//! registry (and so into [`Registry::global`]).
//!
//! | Module | Rules |
//! |--------|-------|
//! | [`text`] | character classes, encodings, `length`, `bytelength`, `matches`, `in` |
//! | [`numeric`] | `min`, `max`, `range`, sign, coordinates |
//! | [`network`] | IP, CIDR, MAC, host names, dial strings, ports |
//! | [`ident`] | UUIDs, object ids, checksummed numbers, phone/IMEI/IMSI, hex digests |
//! | [`datetime`] | `time(layout)`, `rfc3339`, `unixtime` |
//! | [`locale`] | ISO 3166 countries, ISO 4217 currencies, ISO 639 languages |
//!
//! Each module exposes its predicates as plain functions so callers can
//! use them without a registry.

pub mod datetime;
pub mod ident;
pub mod locale;
pub mod network;
pub mod numeric;
pub mod text;

use crate::registry::Registry;
use crate::rule::Rule;

/// Install every standard rule into `registry`.
pub(crate) fn install(registry: &Registry) {
    text::install(registry);
    numeric::install(registry);
    network::install(registry);
    ident::install(registry);
    datetime::install(registry);
    locale::install(registry);
}

/// Install a parameterless predicate.
fn plain(registry: &Registry, name: &str, message: &str, predicate: fn(&str) -> bool) {
    registry.install(Rule::new(name, message, move |value: &str, _: &[&str]| {
        predicate(value)
    }));
}

/// Install a predicate that takes the tag's parameters.
fn with_params(
    registry: &Registry,
    name: &str,
    message: &str,
    predicate: fn(&str, &[&str]) -> bool,
) {
    registry.install(Rule::new(name, message, predicate));
}

/// Parse the parameter at `index` as a float; `None` when missing or malformed.
fn float_param(params: &[&str], index: usize) -> Option<f64> {
    params.get(index)?.trim().parse().ok()
}

/// Parse the parameter at `index` as a count; `None` when missing or malformed.
fn count_param(params: &[&str], index: usize) -> Option<usize> {
    params.get(index)?.trim().parse().ok()
}
