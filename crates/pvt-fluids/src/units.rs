//! Unit-aware text input for command-line and config overrides.
//!
//! Values like `300 C` or `22.064 MPa` are converted to canonical SI numbers.

use pvt_core::constants::ZERO_CELSIUS_K;
use thiserror::Error;

/// Quantity family of a text input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quantity {
    /// Canonical unit: K
    Temperature,
    /// Absolute pressure, canonical unit: Pa
    Pressure,
}

impl Quantity {
    fn name(self) -> &'static str {
        match self {
            Quantity::Temperature => "temperature",
            Quantity::Pressure => "absolute pressure",
        }
    }

    /// Unit spellings (lower-case) with their conversion to the canonical unit.
    fn units(self) -> UnitTable {
        match self {
            Quantity::Temperature => TEMPERATURE_UNITS,
            Quantity::Pressure => PRESSURE_UNITS,
        }
    }
}

type UnitTable = &'static [(&'static [&'static str], fn(f64) -> f64)];

const TEMPERATURE_UNITS: UnitTable = &[
    (&["", "k", "kelvin"], |v| v),
    (&["c", "°c", "degc", "celsius"], |v| v + ZERO_CELSIUS_K),
    (&["f", "°f", "degf", "fahrenheit"], |v| (v + 459.67) * 5.0 / 9.0),
    (&["r", "°r", "rankine"], |v| v * 5.0 / 9.0),
];

const PRESSURE_UNITS: UnitTable = &[
    (&["", "pa"], |v| v),
    (&["kpa"], |v| v * 1e3),
    (&["mpa"], |v| v * 1e6),
    (&["bar"], |v| v * 1e5),
    (&["atm"], |v| v * 101_325.0),
    (&["psia", "psi"], |v| v * 6_894.757),
];

#[derive(Debug, Clone, PartialEq, Error)]
pub enum UnitError {
    #[error("could not parse a number from '{0}'")]
    Parse(String),

    #[error("unknown unit '{unit}' for {quantity}")]
    UnknownUnit { unit: String, quantity: &'static str },

    #[error("{quantity} must be positive, got {value}")]
    NotPositive { value: f64, quantity: &'static str },
}

/// Parse `raw_text` as `quantity`, returning the canonical SI value.
///
/// Both accepted quantities are absolute, so the converted value must be positive.
pub fn parse_quantity(raw_text: &str, quantity: Quantity) -> Result<f64, UnitError> {
    let (value, unit) = split_value_and_unit(raw_text)?;
    let unit_lc = unit.to_lowercase();

    let convert = quantity
        .units()
        .iter()
        .find(|(names, _)| names.contains(&unit_lc.as_str()))
        .map(|(_, convert)| convert)
        .ok_or_else(|| UnitError::UnknownUnit {
            unit: unit.to_string(),
            quantity: quantity.name(),
        })?;

    let canonical = convert(value);
    if canonical <= 0.0 || !canonical.is_finite() {
        return Err(UnitError::NotPositive {
            value: canonical,
            quantity: quantity.name(),
        });
    }
    Ok(canonical)
}

/// Split `"22.064 MPa"` into `(22.064, "MPa")`. The unit may be glued on (`"300C"`).
fn split_value_and_unit(input: &str) -> Result<(f64, &str), UnitError> {
    let trimmed = input.trim();
    let bytes = trimmed.as_bytes();

    // An exponent marker only counts as numeric when a digit or sign follows it.
    let split_idx = bytes
        .iter()
        .enumerate()
        .position(|(i, &b)| match b {
            b'0'..=b'9' | b'.' | b'-' | b'+' => false,
            b'e' | b'E' => !bytes
                .get(i + 1)
                .is_some_and(|next| next.is_ascii_digit() || matches!(next, b'-' | b'+')),
            _ => true,
        })
        .unwrap_or(bytes.len());

    let (number, unit) = trimmed.split_at(split_idx);
    let value = number
        .trim()
        .parse::<f64>()
        .map_err(|_| UnitError::Parse(input.to_string()))?;
    Ok((value, unit.trim()))
}
