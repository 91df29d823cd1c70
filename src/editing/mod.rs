//! Reactions to selection changes in the Modbus node form.
//!
//! The form binds `function` and `type` directly, so the handlers run after
//! the new value is stored and compare it with the value remembered in
//! [`EditingState`]. Invariants kept on the options:
//! `bit` is set only for a BOOL read out of a register, `endian_mode` only
//! for types spanning more than one register.

use log::debug;

use crate::protocols::modbus_rtu::requires_bit;
use crate::protocols::{EditableModbusNodeOptions, EndianMode, ModbusDataType, ModbusFunction};

/// Previous selections of one form, lives as long as the form is open
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EditingState {
    pub previous_type: Option<ModbusDataType>,
    pub previous_function: Option<ModbusFunction>,
}

impl EditingState {
    pub fn new() -> Self {
        EditingState::default()
    }

    /// State of a form opened on existing options
    pub fn for_options(options: &EditableModbusNodeOptions) -> Self {
        EditingState {
            previous_type: Some(options.data_type),
            previous_function: Some(options.function),
        }
    }
}

fn update_bit(options: &mut EditableModbusNodeOptions, required_before: bool) {
    if !requires_bit(options.data_type, options.function) {
        options.bit = None;
        return;
    }

    /* keep a bit the user already entered for the previous selection */
    if !required_before || options.bit.is_none() {
        options.bit = Some(String::new());
    }
}

pub fn handle_function_change(options: &mut EditableModbusNodeOptions, state: &mut EditingState) {
    let previous = state.previous_function.unwrap_or(options.function);
    debug!("Modbus function changed from {:?} to {:?}", previous, options.function);

    update_bit(options, requires_bit(options.data_type, previous));
    state.previous_function = Some(options.function);
}

pub fn handle_type_change(options: &mut EditableModbusNodeOptions, state: &mut EditingState) {
    let previous = state.previous_type.unwrap_or(options.data_type);
    debug!("Modbus type changed from {} to {}", previous.as_str(), options.data_type.as_str());

    if options.data_type.is_multi_register() {
        if !previous.is_multi_register() || options.endian_mode.is_none() {
            options.endian_mode = Some(EndianMode::BigEndian);
        }
    } else {
        options.endian_mode = None;
    }

    update_bit(options, requires_bit(previous, options.function));
    state.previous_type = Some(options.data_type);
}

/// Select a function and run the dependent resets
pub fn set_function(options: &mut EditableModbusNodeOptions, function: ModbusFunction, state: &mut EditingState) {
    options.function = function;
    handle_function_change(options, state);
}

/// Select a type and run the dependent resets
pub fn set_type(options: &mut EditableModbusNodeOptions, data_type: ModbusDataType, state: &mut EditingState) {
    options.data_type = data_type;
    handle_type_change(options, state);
}
