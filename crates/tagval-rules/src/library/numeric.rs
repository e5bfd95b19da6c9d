//! Numeric rules. Values and parameters are parsed as `f64`; anything that
//! does not parse fails the rule.

use super::{float_param, plain, with_params};
use crate::registry::Registry;

pub(crate) fn install(registry: &Registry) {
    with_params(registry, "min", "{field} must be at least {0}", is_at_least);
    with_params(registry, "max", "{field} must be at most {0}", is_at_most);
    with_params(registry, "range", "{field} must be between {0} and {1}", is_in_range);
    plain(registry, "positive", "{field} must be a positive number", is_positive);
    plain(registry, "negative", "{field} must be a negative number", is_negative);
    plain(registry, "latitude", "{field} must be a valid latitude", is_latitude);
    plain(registry, "longitude", "{field} must be a valid longitude", is_longitude);
}

fn number(value: &str) -> Option<f64> {
    let n: f64 = value.trim().parse().ok()?;
    n.is_finite().then_some(n)
}

pub fn is_at_least(value: &str, params: &[&str]) -> bool {
    match (number(value), float_param(params, 0)) {
        (Some(n), Some(min)) => n >= min,
        _ => false,
    }
}

pub fn is_at_most(value: &str, params: &[&str]) -> bool {
    match (number(value), float_param(params, 0)) {
        (Some(n), Some(max)) => n <= max,
        _ => false,
    }
}

/// Inclusive range `[params[0], params[1]]`.
pub fn is_in_range(value: &str, params: &[&str]) -> bool {
    match (number(value), float_param(params, 0), float_param(params, 1)) {
        (Some(n), Some(min), Some(max)) => min <= n && n <= max,
        _ => false,
    }
}

pub fn is_positive(value: &str) -> bool {
    number(value).is_some_and(|n| n > 0.0)
}

pub fn is_negative(value: &str) -> bool {
    number(value).is_some_and(|n| n < 0.0)
}

pub fn is_latitude(value: &str) -> bool {
    number(value).is_some_and(|n| (-90.0..=90.0).contains(&n))
}

pub fn is_longitude(value: &str) -> bool {
    number(value).is_some_and(|n| (-180.0..=180.0).contains(&n))
}
