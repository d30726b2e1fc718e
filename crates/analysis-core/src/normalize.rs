//! Value normalization for raw payload leaves.
//!
//! The backend marks missing data in several ways (field absent, `null`, the string
//! "N/A", or a bare zero). All of them mean "no data" here; a zero is never shown
//! as a legitimate value.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Magnitudes below this are indistinguishable from the backend's zero sentinel
pub const ABSENT_MAGNITUDE: f64 = 1e-3;

const ABSENT_MARKER: &str = "N/A";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValueKind {
    Numeric,
    Percentage,
    Currency,
}

/// Result of normalizing one raw field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedValue {
    pub present: bool,
    /// Parsed number, `None` when absent
    pub numeric: Option<f64>,
    /// Formatted display value, `None` when absent
    pub value: Option<String>,
    pub kind: ValueKind,
}

impl NormalizedValue {
    pub fn absent(kind: ValueKind) -> Self {
        Self {
            present: false,
            numeric: None,
            value: None,
            kind,
        }
    }

    /// Display text, "N/A" when absent
    pub fn display(&self) -> &str {
        self.value.as_deref().unwrap_or(ABSENT_MARKER)
    }
}

/// Parse a JSON leaf into a number without applying the absence rules.
/// Strings are trimmed and may carry thousands separators.
pub fn parse_numeric(raw: &Value) -> Option<f64> {
    let parsed = match raw {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.eq_ignore_ascii_case(ABSENT_MARKER) {
                return None;
            }
            trimmed.replace(',', "").parse::<f64>().ok()
        }
        _ => None,
    };
    parsed.filter(|v| v.is_finite())
}

/// Number carried by a field, or `None` when the field means "no data"
/// (missing, "N/A", unparseable, zero, or below [`ABSENT_MAGNITUDE`]).
pub fn present_number(raw: Option<&Value>) -> Option<f64> {
    raw.and_then(parse_numeric)
        .filter(|v| v.abs() >= ABSENT_MAGNITUDE)
}

pub fn normalize(raw: &Value, kind: ValueKind) -> NormalizedValue {
    normalize_field(Some(raw), kind)
}

pub fn normalize_field(raw: Option<&Value>, kind: ValueKind) -> NormalizedValue {
    match present_number(raw) {
        Some(number) => NormalizedValue {
            present: true,
            numeric: Some(number),
            value: Some(match kind {
                ValueKind::Percentage => format_percentage(number),
                ValueKind::Numeric | ValueKind::Currency => format_magnitude(number),
            }),
            kind,
        },
        None => NormalizedValue::absent(kind),
    }
}

/// Abbreviate with T/B/M/K using the first threshold the absolute value clears.
pub fn format_magnitude(value: f64) -> String {
    let abs = value.abs();
    if abs >= 1e12 {
        format!("{:.2}T", value / 1e12)
    } else if abs >= 1e9 {
        format!("{:.2}B", value / 1e9)
    } else if abs >= 1e6 {
        format!("{:.2}M", value / 1e6)
    } else if abs >= 1e3 {
        format!("{:.2}K", value / 1e3)
    } else {
        format!("{:.2}", value)
    }
}

/// Bring a ratio onto the whole-number percentage scale.
///
/// Fields mix conventions (0.15 and 15 both mean 15%); anything with magnitude
/// above 1 is taken as already being a percentage.
pub fn as_percent(value: f64) -> f64 {
    if value.abs() > 1.0 {
        value
    } else {
        value * 100.0
    }
}

pub fn format_percentage(value: f64) -> String {
    format!("{:.2}%", as_percent(value))
}
