//! Network rules: addresses, prefixes, hardware addresses, host names and
//! `host:port` dial strings.

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

use once_cell::sync::Lazy;
use regex::Regex;

use super::plain;
use crate::registry::Registry;

static DNS_NAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:[a-zA-Z0-9_](?:[a-zA-Z0-9_-]{0,61}[a-zA-Z0-9])?\.)*[a-zA-Z0-9_](?:[a-zA-Z0-9_-]{0,61}[a-zA-Z0-9])?\.?$")
        .unwrap()
});
static MAC: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(?:[0-9A-Fa-f]{2}(?:[:-][0-9A-Fa-f]{2}){5}|[0-9A-Fa-f]{2}(?:[:-][0-9A-Fa-f]{2}){7}|[0-9A-Fa-f]{2}(?:[:-][0-9A-Fa-f]{2}){19}|[0-9A-Fa-f]{4}(?:\.[0-9A-Fa-f]{4}){2}|[0-9A-Fa-f]{4}(?:\.[0-9A-Fa-f]{4}){3}|[0-9A-Fa-f]{4}(?:\.[0-9A-Fa-f]{4}){9})$",
    )
    .unwrap()
});

/// Longest DNS name in presentation format.
const MAX_DNS_LENGTH: usize = 253;

pub(crate) fn install(registry: &Registry) {
    plain(registry, "ip", "{field} must be an IP address", is_ip);
    plain(registry, "ipv4", "{field} must be an IPv4 address", is_ipv4);
    plain(registry, "ipv6", "{field} must be an IPv6 address", is_ipv6);
    plain(registry, "cidr", "{field} must be a CIDR network", is_cidr);
    plain(registry, "mac", "{field} must be a MAC address", is_mac);
    plain(registry, "host", "{field} must be an IP address or host name", is_host);
    plain(registry, "dns", "{field} must be a DNS name", is_dns_name);
    plain(registry, "dialstring", "{field} must be a host:port dial string", is_dial_string);
    plain(registry, "port", "{field} must be a port number", is_port);
}

pub fn is_ip(value: &str) -> bool {
    value.parse::<IpAddr>().is_ok()
}

pub fn is_ipv4(value: &str) -> bool {
    value.parse::<Ipv4Addr>().is_ok()
}

pub fn is_ipv6(value: &str) -> bool {
    value.parse::<Ipv6Addr>().is_ok()
}

/// `address/prefix` with a prefix length valid for the address family.
pub fn is_cidr(value: &str) -> bool {
    let Some((addr, prefix)) = value.split_once('/') else {
        return false;
    };
    if prefix.is_empty() || !prefix.chars().all(|c| c.is_ascii_digit()) {
        return false;
    }
    let Ok(prefix) = prefix.parse::<u8>() else {
        return false;
    };
    match addr.parse::<IpAddr>() {
        Ok(IpAddr::V4(_)) => prefix <= 32,
        Ok(IpAddr::V6(_)) => prefix <= 128,
        Err(_) => false,
    }
}

/// EUI-48, EUI-64 or 20-octet IP-over-InfiniBand addresses, colon/dash
/// or dot separated.
pub fn is_mac(value: &str) -> bool {
    MAC.is_match(value)
}

pub fn is_dns_name(value: &str) -> bool {
    if value.is_empty() || value.len() > MAX_DNS_LENGTH + 1 {
        return false;
    }
    // A purely numeric dotted name is an IPv4 literal, not a host name.
    if value.parse::<Ipv4Addr>().is_ok() {
        return false;
    }
    DNS_NAME.is_match(value)
}

pub fn is_host(value: &str) -> bool {
    is_ip(value) || is_dns_name(value)
}

/// Port number in `1..=65535`.
pub fn is_port(value: &str) -> bool {
    value.parse::<u16>().is_ok_and(|port| port > 0)
}

/// `host:port`, with IPv6 hosts in brackets.
pub fn is_dial_string(value: &str) -> bool {
    let Some((host, port)) = value.rsplit_once(':') else {
        return false;
    };
    let host_ok = match host.strip_prefix('[').and_then(|h| h.strip_suffix(']')) {
        Some(inner) => is_ipv6(inner),
        None => !host.contains(':') && is_host(host),
    };
    host_ok && is_port(port)
}
