//! Identifier rules: UUIDs, object ids, checksummed numbers, telephony
//! identifiers and fixed-length hex digests.

use once_cell::sync::Lazy;
use regex::Regex;
use uuid::Uuid;

use super::plain;
use crate::registry::Registry;
use crate::rule::Rule;

static HYPHENATED_UUID: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}$")
        .unwrap()
});
static E164: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\+?[1-9][0-9]{1,14}$").unwrap());

/// Hex digest lengths per algorithm.
const DIGESTS: &[(&str, usize)] = &[
    ("md4", 32),
    ("md5", 32),
    ("sha1", 40),
    ("sha256", 64),
    ("sha384", 96),
    ("sha512", 128),
    ("ripemd128", 32),
    ("ripemd160", 40),
    ("tiger128", 32),
    ("tiger160", 40),
    ("tiger192", 48),
    ("crc32", 8),
    ("crc32b", 8),
];

pub(crate) fn install(registry: &Registry) {
    plain(registry, "uuid", "{field} must be a UUID", is_uuid);
    plain(registry, "uuidv3", "{field} must be a version 3 UUID", is_uuid_v3);
    plain(registry, "uuidv4", "{field} must be a version 4 UUID", is_uuid_v4);
    plain(registry, "uuidv5", "{field} must be a version 5 UUID", is_uuid_v5);
    plain(registry, "mongoid", "{field} must be an object id", is_object_id);
    plain(registry, "creditcard", "{field} must be a credit card number", is_credit_card);
    plain(registry, "isbn10", "{field} must be an ISBN-10", is_isbn10);
    plain(registry, "isbn13", "{field} must be an ISBN-13", is_isbn13);
    plain(registry, "e164", "{field} must be an E.164 phone number", is_e164);
    plain(registry, "imei", "{field} must be an IMEI number", is_imei);
    plain(registry, "imsi", "{field} must be an IMSI number", is_imsi);

    for (algorithm, len) in DIGESTS {
        let len = *len;
        let message = format!("{{field}} must be a {algorithm} hash");
        registry.install(Rule::new(
            *algorithm,
            message,
            move |value: &str, _: &[&str]| is_hex_digest(value, len),
        ));
    }
}

/// Hyphenated UUID of any version.
pub fn is_uuid(value: &str) -> bool {
    HYPHENATED_UUID.is_match(value)
}

fn uuid_version(value: &str) -> Option<usize> {
    if !is_uuid(value) {
        return None;
    }
    Uuid::parse_str(value).ok().map(|id| id.get_version_num())
}

pub fn is_uuid_v3(value: &str) -> bool {
    uuid_version(value) == Some(3)
}

pub fn is_uuid_v4(value: &str) -> bool {
    uuid_version(value) == Some(4) && has_rfc4122_variant(value)
}

pub fn is_uuid_v5(value: &str) -> bool {
    uuid_version(value) == Some(5) && has_rfc4122_variant(value)
}

fn has_rfc4122_variant(value: &str) -> bool {
    Uuid::parse_str(value).is_ok_and(|id| id.get_variant() == uuid::Variant::RFC4122)
}

/// 12-byte object id as 24 hex characters.
pub fn is_object_id(value: &str) -> bool {
    is_hex_digest(value, 24)
}

pub fn is_hex_digest(value: &str, len: usize) -> bool {
    value.len() == len && value.chars().all(|c| c.is_ascii_hexdigit())
}

/// Luhn checksum over decimal digits.
fn luhn(digits: &[u32]) -> bool {
    let sum: u32 = digits
        .iter()
        .rev()
        .enumerate()
        .map(|(i, &d)| {
            if i % 2 == 1 {
                let doubled = d * 2;
                if doubled > 9 {
                    doubled - 9
                } else {
                    doubled
                }
            } else {
                d
            }
        })
        .sum();
    sum % 10 == 0
}

fn decimal_digits(value: &str) -> Option<Vec<u32>> {
    value.chars().map(|c| c.to_digit(10)).collect()
}

/// 13 to 19 digits (spaces and dashes ignored) passing the Luhn check.
pub fn is_credit_card(value: &str) -> bool {
    let cleaned: String = value.chars().filter(|c| *c != ' ' && *c != '-').collect();
    match decimal_digits(&cleaned) {
        Some(digits) if (13..=19).contains(&digits.len()) => luhn(&digits),
        _ => false,
    }
}

fn isbn_digits(value: &str) -> Vec<char> {
    value.chars().filter(|c| *c != ' ' && *c != '-').collect()
}

pub fn is_isbn10(value: &str) -> bool {
    let chars = isbn_digits(value);
    if chars.len() != 10 {
        return false;
    }
    let mut sum = 0;
    for (i, c) in chars.iter().enumerate() {
        let digit = match (i, c) {
            (9, 'X') | (9, 'x') => 10,
            (_, c) => match c.to_digit(10) {
                Some(d) => d,
                None => return false,
            },
        };
        sum += digit * (10 - i as u32);
    }
    sum % 11 == 0
}

pub fn is_isbn13(value: &str) -> bool {
    let chars: String = isbn_digits(value).into_iter().collect();
    let Some(digits) = decimal_digits(&chars) else {
        return false;
    };
    if digits.len() != 13 {
        return false;
    }
    let sum: u32 = digits
        .iter()
        .enumerate()
        .map(|(i, d)| if i % 2 == 0 { *d } else { d * 3 })
        .sum();
    sum % 10 == 0
}

pub fn is_e164(value: &str) -> bool {
    E164.is_match(value)
}

/// 15 digits with a valid Luhn check digit, or the 14-digit form without it.
pub fn is_imei(value: &str) -> bool {
    let cleaned: String = value.chars().filter(|c| *c != ' ' && *c != '-').collect();
    match decimal_digits(&cleaned) {
        Some(digits) if digits.len() == 15 => luhn(&digits),
        Some(digits) => digits.len() == 14,
        None => false,
    }
}

/// 14 or 15 digits whose mobile country code is in the assigned 2xx-7xx range.
pub fn is_imsi(value: &str) -> bool {
    let Some(digits) = decimal_digits(value) else {
        return false;
    };
    if !(14..=15).contains(&digits.len()) {
        return false;
    }
    let mcc = digits[0] * 100 + digits[1] * 10 + digits[2];
    (200..800).contains(&mcc)
}
