//! Text rules: character classes, encodings, formats, length and membership.

use once_cell::sync::Lazy;
use regex::Regex;

use super::{count_param, plain, with_params};
use crate::registry::Registry;

static INT: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[-+]?(?:0|[1-9][0-9]*)$").unwrap());
static FLOAT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[-+]?(?:[0-9]+\.?[0-9]*|\.[0-9]+)(?:[eE][-+]?[0-9]+)?$").unwrap()
});
static HEX_COLOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^#?(?:[0-9a-fA-F]{3}|[0-9a-fA-F]{6})$").unwrap());
static RGB_COLOR: Lazy<Regex> = Lazy::new(|| {
    let channel = r"\s*(?:[01]?[0-9]?[0-9]|2[0-4][0-9]|25[0-5])\s*";
    Regex::new(&format!(r"^rgb\({channel},{channel},{channel}\)$")).unwrap()
});
static BASE64: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:[A-Za-z0-9+/]{4})*(?:[A-Za-z0-9+/]{2}==|[A-Za-z0-9+/]{3}=|[A-Za-z0-9+/]{4})$")
        .unwrap()
});
static DATA_URI: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^data:[a-zA-Z0-9!#$&^_.+-]+/[a-zA-Z0-9!#$&^_.+-]+(?:;[a-zA-Z0-9-]+=[a-zA-Z0-9-]+)*;base64,(.*)$").unwrap());
static EMAIL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)+$",
    )
    .unwrap()
});
static SEMVER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^v?(?:0|[1-9][0-9]*)\.(?:0|[1-9][0-9]*)\.(?:0|[1-9][0-9]*)(?:-(?:0|[1-9][0-9]*|[0-9]*[a-zA-Z-][0-9a-zA-Z-]*)(?:\.(?:0|[1-9][0-9]*|[0-9]*[a-zA-Z-][0-9a-zA-Z-]*))*)?(?:\+[0-9a-zA-Z-]+(?:\.[0-9a-zA-Z-]+)*)?$",
    )
    .unwrap()
});

/// Longest URL most clients accept.
const MAX_URL_LENGTH: usize = 2083;

pub(crate) fn install(registry: &Registry) {
    plain(registry, "alpha", "{field} must contain only letters (a-zA-Z)", is_alpha);
    plain(registry, "alphanum", "{field} must contain only letters and numbers", is_alphanumeric);
    plain(registry, "numeric", "{field} must contain only numbers", is_numeric);
    plain(registry, "int", "{field} must be an integer", is_int);
    plain(registry, "float", "{field} must be a floating point number", is_float);
    plain(registry, "hexadecimal", "{field} must be a hexadecimal number", is_hexadecimal);
    plain(registry, "hexcolor", "{field} must be a hexadecimal color", is_hex_color);
    plain(registry, "rgbcolor", "{field} must be an RGB color", is_rgb_color);
    plain(registry, "lowercase", "{field} must be lowercase", is_lowercase);
    plain(registry, "uppercase", "{field} must be uppercase", is_uppercase);
    plain(registry, "ascii", "{field} must contain only ASCII characters", is_ascii);
    plain(registry, "printableascii", "{field} must contain only printable ASCII characters", is_printable_ascii);
    plain(registry, "multibyte", "{field} must contain multibyte characters", is_multibyte);
    plain(registry, "fullwidth", "{field} must contain full-width characters", is_full_width);
    plain(registry, "halfwidth", "{field} must contain half-width characters", is_half_width);
    plain(registry, "variablewidth", "{field} must contain both full-width and half-width characters", is_variable_width);
    plain(registry, "base64", "{field} must be base64 encoded", is_base64);
    plain(registry, "datauri", "{field} must be a base64 data URI", is_data_uri);
    plain(registry, "json", "{field} must be valid JSON", is_json);
    plain(registry, "email", "{field} must be a valid email address", is_email);
    plain(registry, "url", "{field} must be a valid URL", is_url);
    plain(registry, "semver", "{field} must be a semantic version", is_semver);
    plain(registry, "notnull", "{field} must have a value", is_not_null);
    plain(registry, "null", "{field} must be empty", is_null);
    with_params(registry, "length", "{field} must be between {0} and {1}", has_length);
    with_params(registry, "bytelength", "{field} must be between {0} and {1} bytes long", has_byte_length);
    with_params(registry, "matches", "{field} must match the pattern {0}", matches_pattern);
    with_params(registry, "in", "{field} must be one of allowed values", is_in);
}

pub fn is_alpha(value: &str) -> bool {
    !value.is_empty() && value.chars().all(|c| c.is_ascii_alphabetic())
}

pub fn is_alphanumeric(value: &str) -> bool {
    !value.is_empty() && value.chars().all(|c| c.is_ascii_alphanumeric())
}

pub fn is_numeric(value: &str) -> bool {
    !value.is_empty() && value.chars().all(|c| c.is_ascii_digit())
}

pub fn is_int(value: &str) -> bool {
    INT.is_match(value)
}

pub fn is_float(value: &str) -> bool {
    FLOAT.is_match(value)
}

pub fn is_hexadecimal(value: &str) -> bool {
    !value.is_empty() && value.chars().all(|c| c.is_ascii_hexdigit())
}

pub fn is_hex_color(value: &str) -> bool {
    HEX_COLOR.is_match(value)
}

pub fn is_rgb_color(value: &str) -> bool {
    RGB_COLOR.is_match(value)
}

pub fn is_lowercase(value: &str) -> bool {
    value == value.to_lowercase()
}

pub fn is_uppercase(value: &str) -> bool {
    value == value.to_uppercase()
}

pub fn is_ascii(value: &str) -> bool {
    !value.is_empty() && value.is_ascii()
}

pub fn is_printable_ascii(value: &str) -> bool {
    !value.is_empty() && value.chars().all(|c| (' '..='~').contains(&c))
}

pub fn is_multibyte(value: &str) -> bool {
    value.chars().any(|c| !c.is_ascii())
}

/// Characters that occupy a single cell: ASCII printable and the
/// half-width katakana / hangul / symbol blocks.
fn is_half_width_char(c: char) -> bool {
    matches!(c,
        '\u{0020}'..='\u{007E}'
        | '\u{FF61}'..='\u{FF9F}'
        | '\u{FFA0}'..='\u{FFDC}'
        | '\u{FFE8}'..='\u{FFEE}')
}

pub fn is_full_width(value: &str) -> bool {
    value.chars().any(|c| !is_half_width_char(c))
}

pub fn is_half_width(value: &str) -> bool {
    value.chars().any(is_half_width_char)
}

pub fn is_variable_width(value: &str) -> bool {
    is_full_width(value) && is_half_width(value)
}

pub fn is_base64(value: &str) -> bool {
    BASE64.is_match(value)
}

pub fn is_data_uri(value: &str) -> bool {
    DATA_URI
        .captures(value)
        .and_then(|caps| caps.get(1))
        .is_some_and(|payload| is_base64(payload.as_str()))
}

pub fn is_json(value: &str) -> bool {
    serde_json::from_str::<serde_json::Value>(value).is_ok()
}

pub fn is_email(value: &str) -> bool {
    value.len() <= 254 && EMAIL.is_match(value)
}

/// Absolute URL with a host. A missing scheme is read as `http://`.
pub fn is_url(value: &str) -> bool {
    if value.is_empty() || value.len() > MAX_URL_LENGTH || value.contains(char::is_whitespace) {
        return false;
    }
    let parsed = if value.contains("://") {
        url::Url::parse(value)
    } else {
        url::Url::parse(&format!("http://{value}"))
    };
    match parsed {
        Ok(url) => url.host_str().is_some_and(|host| !host.is_empty()),
        Err(_) => false,
    }
}

pub fn is_semver(value: &str) -> bool {
    SEMVER.is_match(value)
}

pub fn is_not_null(value: &str) -> bool {
    !value.is_empty()
}

pub fn is_null(value: &str) -> bool {
    value.is_empty()
}

/// Character (not byte) count within `[params[0], params[1]]`.
pub fn has_length(value: &str, params: &[&str]) -> bool {
    within(value.chars().count(), params)
}

/// Byte count within `[params[0], params[1]]`.
pub fn has_byte_length(value: &str, params: &[&str]) -> bool {
    within(value.len(), params)
}

fn within(len: usize, params: &[&str]) -> bool {
    match (count_param(params, 0), count_param(params, 1)) {
        (Some(min), Some(max)) => min <= len && len <= max,
        _ => false,
    }
}

/// Full-string regex match. Parameters are re-joined with `|` so that
/// alternations inside the pattern survive tag splitting.
pub fn matches_pattern(value: &str, params: &[&str]) -> bool {
    if params.is_empty() {
        return false;
    }
    let pattern = format!("^(?:{})$", params.join("|"));
    match Regex::new(&pattern) {
        Ok(re) => re.is_match(value),
        Err(e) => {
            tracing::warn!(pattern = %pattern, error = %e, "invalid pattern in matches rule");
            false
        }
    }
}

/// Membership in the parameter list.
pub fn is_in(value: &str, params: &[&str]) -> bool {
    params.iter().any(|allowed| *allowed == value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn character_classes() {
        assert!(is_alpha("abcXYZ"));
        assert!(!is_alpha("ab1"));
        assert!(!is_alpha(""));
        assert!(is_alphanumeric("ab12"));
        assert!(!is_alphanumeric("ab-12"));
        assert!(is_numeric("0123"));
        assert!(!is_numeric("-1"));
        assert!(is_hexadecimal("deadBEEF"));
        assert!(!is_hexadecimal("xyz"));
    }

    #[test]
    fn numbers() {
        assert!(is_int("-42"));
        assert!(is_int("0"));
        assert!(!is_int("042"));
        assert!(!is_int("4.2"));
        assert!(is_float("4.2"));
        assert!(is_float("-.5"));
        assert!(is_float("1e10"));
        assert!(!is_float("1.2.3"));
        assert!(!is_float("abc"));
    }

    #[test]
    fn colors() {
        assert!(is_hex_color("#fff"));
        assert!(is_hex_color("A0B1C2"));
        assert!(!is_hex_color("#ffff"));
        assert!(is_rgb_color("rgb(0, 128,255)"));
        assert!(!is_rgb_color("rgb(0,0,256)"));
    }

    #[test]
    fn case_and_ascii() {
        assert!(is_lowercase("abc 1"));
        assert!(!is_lowercase("aBc"));
        assert!(is_uppercase("ABC"));
        assert!(is_ascii("hello!"));
        assert!(!is_ascii("héllo"));
        assert!(is_printable_ascii("a b~"));
        assert!(!is_printable_ascii("a\tb"));
        assert!(is_multibyte("日本"));
        assert!(!is_multibyte("abc"));
    }

    #[test]
    fn widths() {
        assert!(is_full_width("ｆｕｌｌ"));
        assert!(!is_full_width("abc"));
        assert!(is_half_width("abc"));
        assert!(!is_half_width("ｆｕｌｌ"));
        assert!(is_variable_width("ｆｕｌｌabc"));
        assert!(!is_variable_width("abc"));
    }

    #[test]
    fn encodings() {
        assert!(is_base64("aGVsbG8="));
        assert!(!is_base64("aGVsbG8"));
        assert!(is_data_uri("data:text/plain;base64,aGVsbG8="));
        assert!(!is_data_uri("data:text/plain;base64,***"));
        assert!(is_json(r#"{"a": [1, 2]}"#));
        assert!(!is_json("{a:1}"));
    }

    #[test]
    fn email_and_url() {
        assert!(is_email("ada@example.com"));
        assert!(!is_email("ada@localhost"));
        assert!(!is_email("not-an-email"));
        assert!(is_url("https://example.com/path?q=1"));
        assert!(is_url("example.com"));
        assert!(!is_url("http://"));
        assert!(!is_url("has space.com"));
    }

    #[test]
    fn semantic_versions() {
        assert!(is_semver("1.2.3"));
        assert!(is_semver("v1.0.0-alpha.1+build.5"));
        assert!(!is_semver("1.2"));
        assert!(!is_semver("01.2.3"));
    }

    #[test]
    fn lengths_count_runes_or_bytes() {
        assert!(has_length("12345", &["3", "5"]));
        assert!(!has_length("123456", &["3", "5"]));
        assert!(has_length("日本語", &["3", "3"]));
        assert!(!has_byte_length("日本語", &["3", "3"]));
        assert!(has_byte_length("日本語", &["9", "9"]));
        assert!(!has_length("abc", &["3"]));
        assert!(!has_length("abc", &["x", "5"]));
    }

    #[test]
    fn pattern_and_membership() {
        assert!(matches_pattern("V8", &["V[0-9]+"]));
        assert!(matches_pattern("cat", &["cat", "dog"]));
        assert!(!matches_pattern("cats", &["cat", "dog"]));
        assert!(!matches_pattern("x", &["("]));
        assert!(is_in("V8", &["V8", "V6"]));
        assert!(!is_in("V2", &["V8", "V6"]));
        assert!(!is_in("V2", &[]));
    }

    #[test]
    fn null_rules() {
        assert!(is_null(""));
        assert!(is_not_null("x"));
    }

    #[test]
    fn messages_read_cleanly_when_negated() {
        let registry = crate::registry::Registry::with_standard_rules();
        let notnull = registry.get("notnull").unwrap();
        assert_eq!(notnull.format_message("Name", &[]), "Name must have a value");
        let negated = registry.get("!notnull").unwrap();
        assert_eq!(negated.format_message("Name", &[]), "Name must not have a value");

        let length = registry.get("length").unwrap();
        assert_eq!(length.format_message("Code", &["3", "5"]), "Code must be between 3 and 5");
    }
}
