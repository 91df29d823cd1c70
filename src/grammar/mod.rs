//! Field grammars shared by the protocol plugins and the validation engine.
//!
//! Every check is a plain predicate over the text a user typed, so the
//! callers decide how to surface a failure.

use lazy_static::lazy_static;
use regex::Regex;

pub mod modbus;
pub mod opcua;

pub use modbus::{format_modbus_register, parse_modbus_register, validate_modbus_port, validate_modbus_register};
pub use opcua::{validate_opcua_node_id, validate_opcua_url};

lazy_static! {
    static ref DEVICE_NAME: Regex = Regex::new(r"^[a-zA-Z0-9 _-]{3,64}$").unwrap();
    static ref VARIABLE_NAME: Regex = Regex::new(r"^[A-Za-z_][A-Za-z0-9_]{0,63}$").unwrap();
}

/// 3 to 64 characters out of letters, digits, space, `_` and `-`,
/// without surrounding whitespace
pub fn validate_device_name(name: &str) -> bool {
    name.trim() == name && DEVICE_NAME.is_match(name)
}

/// Identifier rule for user defined variables
pub fn validate_variable_name(name: &str) -> bool {
    VARIABLE_NAME.is_match(name)
}
