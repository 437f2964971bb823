/// Common utility functions.
use crate::field::FieldValue;

/// Converts string into unsigned number with bounds validation.
pub(crate) fn parse_digital_value(input: &str, min: FieldValue, max: FieldValue) -> Option<FieldValue> {
    let value = input.parse::<FieldValue>();
    if let Ok(value) = value {
        if value < min || value > max {
            None
        } else {
            Some(value)
        }
    } else {
        None
    }
}

/// Converts string with mnemonic value representation into unsigned number.
pub(crate) fn parse_string_value(input: &str, values: &[&str]) -> Option<FieldValue> {
    if input.is_empty() {
        None
    } else {
        values
            .iter()
            .position(|&x| x.to_uppercase() == input.to_uppercase())
            .map(|i| i as FieldValue)
    }
}
