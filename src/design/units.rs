//! Length values with units, and design-variable resolution
//!
//! Lengths are stored in millimetres. A bare number is already in mm.

use std::collections::BTreeMap;

use super::error::DesignError;

/// Parse a length such as `"22um"`, `"10 um"`, `"0.5"` or `"1e-3 mm"` into mm
pub fn parse_length(text: &str) -> Result<f64, DesignError> {
    let trimmed = text.trim();
    let number = trimmed.trim_end_matches(|c: char| c.is_ascii_alphabetic());
    let unit = &trimmed[number.len()..];
    let number = number.trim();

    if number.is_empty() {
        return Err(DesignError::invalid_value(text, "missing number"));
    }
    let value: f64 = number
        .parse()
        .map_err(|_| DesignError::invalid_value(text, format!("'{}' is not a number", number)))?;

    let mm = match unit {
        "" | "mm" => value,
        "nm" => value / 1.0e6,
        "um" => value / 1.0e3,
        "cm" => value * 10.0,
        "m" => value * 1.0e3,
        other => {
            return Err(DesignError::invalid_value(
                text,
                format!("unknown unit '{}'", other),
            ))
        }
    };
    Ok(mm)
}

/// True for names that can only be a variable reference
fn is_identifier(text: &str) -> bool {
    let mut chars = text.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Resolve a value through the variable table, then parse it as a length
pub fn resolve_length(
    variables: &BTreeMap<String, String>,
    text: &str,
) -> Result<f64, DesignError> {
    let mut chain = Vec::new();
    let mut current = text.trim();

    while let Some(next) = variables.get(current) {
        if chain.iter().any(|seen| seen == current) {
            chain.push(current.to_string());
            return Err(DesignError::VariableCycle { cycle: chain });
        }
        chain.push(current.to_string());
        current = next.trim();
    }

    match parse_length(current) {
        Ok(value) => Ok(value),
        Err(_) if is_identifier(current) && !is_unit(current) => {
            Err(DesignError::UnknownVariable(current.to_string()))
        }
        Err(e) => Err(e),
    }
}

fn is_unit(text: &str) -> bool {
    matches!(text, "nm" | "um" | "mm" | "cm" | "m")
}

/// Parse a layer number, e.g. `"1"`
pub fn parse_layer(text: &str) -> Result<u32, DesignError> {
    text.trim()
        .parse()
        .map_err(|_| DesignError::invalid_value(text, "layer must be a non-negative integer"))
}
