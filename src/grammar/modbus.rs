use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref MODBUS_REGISTER: Regex = Regex::new(r"^0x[0-9A-Fa-f]{1,4}$").unwrap();
    static ref WINDOWS_PORT: Regex = Regex::new(r"^(?i)COM([1-9][0-9]{0,2})$").unwrap();
    static ref UNIX_PORT: Regex = Regex::new(r"^/dev/tty(S|USB|ACM|AMA|XRUSB)[0-9]+$").unwrap();
}

/// Highest COMx number Windows hands out
const MAX_COM_PORT: u16 = 256;

/// Checks a register written as `0x` followed by up to four hex digits
pub fn validate_modbus_register(register: &str) -> bool {
    if !MODBUS_REGISTER.is_match(register) {
        return false;
    }

    match u32::from_str_radix(&register[2..], 16) {
        Ok(value) => value <= 0xFFFF,
        Err(_) => false,
    }
}

/// Parses a register accepted by [`validate_modbus_register`]
pub fn parse_modbus_register(register: &str) -> Option<u16> {
    if !validate_modbus_register(register) {
        return None;
    }
    u16::from_str_radix(&register[2..], 16).ok()
}

pub fn format_modbus_register(register: u16) -> String {
    format!("0x{:04X}", register)
}

/// Serial port name of a RTU line, either COM1 to COM256 or a unix tty device
pub fn validate_modbus_port(port: &str) -> bool {
    let port = port.trim();
    if port.is_empty() || !port.is_ascii() || port.chars().any(|c| c.is_whitespace()) {
        return false;
    }

    if let Some(caps) = WINDOWS_PORT.captures(port) {
        return match caps[1].parse::<u16>() {
            Ok(n) => n >= 1 && n <= MAX_COM_PORT,
            Err(_) => false,
        };
    }

    return UNIX_PORT.is_match(port);
}
