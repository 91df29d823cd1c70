use base64::{engine::general_purpose::STANDARD, Engine};
use lazy_static::lazy_static;
use regex::Regex;
use std::net::Ipv6Addr;
use uuid::Uuid;

lazy_static! {
    static ref NODE_ID: Regex = Regex::new(r"^ns=([0-9]+);([isgb])=(.*)$").unwrap();
    static ref IPV4: Regex = Regex::new(r"^[0-9]{1,3}(\.[0-9]{1,3}){3}$").unwrap();
    static ref HOST_LABEL: Regex = Regex::new(r"^[A-Za-z0-9]([A-Za-z0-9-]*[A-Za-z0-9])?$").unwrap();
}

const URL_SCHEMES: [&str; 2] = ["opc.tcp://", "opc.http://"];

/// Checks an OPC UA node id like `ns=2;i=1001` or `ns=2;s=Temperature`
pub fn validate_opcua_node_id(node_id: &str) -> bool {
    let caps = match NODE_ID.captures(node_id) {
        Some(c) => c,
        None => return false,
    };

    /* namespace is any unsigned integer, the regex already holds it to digits */
    let identifier = &caps[3];
    match &caps[2] {
        "i" => !identifier.is_empty() && identifier.bytes().all(|b| b.is_ascii_digit()),
        "s" => !identifier.is_empty() && !identifier.contains(';'),
        "g" => identifier.len() == 36 && Uuid::parse_str(identifier).is_ok(),
        "b" => !identifier.is_empty() && STANDARD.decode(identifier).is_ok(),
        _ => false,
    }
}

/// Checks an endpoint like `opc.tcp://plc.local:4840/server`
pub fn validate_opcua_url(url: &str) -> bool {
    let url = url.trim();
    if url.chars().any(|c| c.is_whitespace()) {
        return false;
    }

    let lower = url.to_ascii_lowercase();
    let rest = match URL_SCHEMES.iter().find(|scheme| lower.starts_with(*scheme)) {
        Some(scheme) => &url[scheme.len()..],
        None => return false,
    };

    let authority = match rest.find('/') {
        Some(pos) => &rest[..pos],
        None => rest,
    };

    let (host, port) = match split_host_port(authority) {
        Some(parts) => parts,
        None => return false,
    };

    if let Some(port) = port {
        if !validate_port(port) {
            return false;
        }
    }

    return validate_host(host);
}

fn split_host_port(authority: &str) -> Option<(&str, Option<&str>)> {
    if authority.is_empty() {
        return None;
    }

    if authority.starts_with('[') {
        let end = authority.find(']')?;
        let host = &authority[..=end];
        let after = &authority[end + 1..];
        if after.is_empty() {
            return Some((host, None));
        }
        return after.strip_prefix(':').map(|port| (host, Some(port)));
    }

    match authority.split_once(':') {
        Some((_, port)) if port.contains(':') => None,
        Some((host, port)) => Some((host, Some(port))),
        None => Some((authority, None)),
    }
}

fn validate_port(port: &str) -> bool {
    if port.is_empty() || !port.bytes().all(|b| b.is_ascii_digit()) {
        return false;
    }
    match port.parse::<u16>() {
        Ok(p) => p >= 1,
        Err(_) => false,
    }
}

fn validate_host(host: &str) -> bool {
    if host.is_empty() {
        return false;
    }

    if let Some(inner) = host.strip_prefix('[').and_then(|h| h.strip_suffix(']')) {
        return inner.parse::<Ipv6Addr>().is_ok();
    }

    if IPV4.is_match(host) {
        return host.split('.').all(|octet| matches!(octet.parse::<u16>(), Ok(v) if v <= 255));
    }

    /* bare numbers like 999.1.1.1 or 12345 are neither an address nor a name */
    if !host.chars().any(|c| c.is_ascii_alphabetic()) {
        return false;
    }

    host.split('.').all(|label| HOST_LABEL.is_match(label))
}
