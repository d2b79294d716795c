//! DXF stream reader trait and common types

use crate::error::{DxfError, Result};
use crate::io::dxf::GroupCodeValueType;
use crate::types::{Handle, Vector3};
use serde::Serialize;
use std::fmt;

/// Typed value of a group record
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum GroupValue {
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl fmt::Display for GroupValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GroupValue::Str(s) => f.write_str(s),
            GroupValue::Int(v) => write!(f, "{}", v),
            GroupValue::Float(v) => write!(f, "{}", v),
            GroupValue::Bool(v) => write!(f, "{}", *v as i32),
        }
    }
}

/// A DXF code/value pair
#[derive(Debug, Clone, PartialEq)]
pub struct DxfCodePair {
    /// The DXF group code
    pub code: i32,

    /// Value, already coerced to the kind the code dictates
    pub value: GroupValue,

    /// Line number of the code line (1-based)
    pub line: usize,
}

impl DxfCodePair {
    /// Tokenize a value line for `code`
    ///
    /// Fails with `MalformedRecord` when the text cannot be coerced to the
    /// kind the code requires.
    pub fn parse(code: i32, raw: &str, line: usize) -> Result<Self> {
        let value_type = GroupCodeValueType::from_code(code);
        let trimmed = raw.trim();

        let value = match value_type {
            GroupCodeValueType::String | GroupCodeValueType::Reserved => {
                GroupValue::Str(decode_control_chars(raw))
            }
            GroupCodeValueType::Handle => GroupValue::Str(trimmed.to_string()),
            GroupCodeValueType::Double => trimmed
                .parse::<f64>()
                .map(GroupValue::Float)
                .map_err(|_| malformed(line + 1, code, raw, "a floating-point number"))?,
            GroupCodeValueType::Int16 | GroupCodeValueType::Int32 | GroupCodeValueType::Int64 => {
                let (min, max) = value_type.integer_range().unwrap_or((i64::MIN, i64::MAX));
                parse_integer(trimmed)
                    .filter(|v| (min..=max).contains(v))
                    .map(GroupValue::Int)
                    .ok_or_else(|| {
                        let expected = format!("an integer in {}..={}", min, max);
                        malformed(line + 1, code, raw, &expected)
                    })?
            }
            GroupCodeValueType::Bool => parse_integer(trimmed)
                .map(|v| GroupValue::Bool(v != 0))
                .ok_or_else(|| malformed(line + 1, code, raw, "a boolean (0 or 1)"))?,
        };

        Ok(Self { code, value, line })
    }

    /// Build a string-valued pair without coercion
    pub fn text(code: i32, value: impl Into<String>, line: usize) -> Self {
        Self {
            code,
            value: GroupValue::Str(value.into()),
            line,
        }
    }

    /// Whether this is the `(0, marker)` record
    pub fn is_marker(&self, marker: &str) -> bool {
        self.code == 0 && self.as_str().map(str::trim) == Some(marker)
    }

    /// Get value as string slice (string kinds only)
    pub fn as_str(&self) -> Option<&str> {
        match &self.value {
            GroupValue::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Value as owned text, whatever its kind
    pub fn value_string(&self) -> String {
        match &self.value {
            GroupValue::Str(s) => s.clone(),
            other => other.to_string(),
        }
    }

    /// Get value as integer
    pub fn as_int(&self) -> Option<i64> {
        match self.value {
            GroupValue::Int(v) => Some(v),
            GroupValue::Bool(v) => Some(v as i64),
            _ => None,
        }
    }

    /// Get value as i16
    pub fn as_i16(&self) -> Option<i16> {
        self.as_int().and_then(|v| i16::try_from(v).ok())
    }

    /// Get value as i32
    pub fn as_i32(&self) -> Option<i32> {
        self.as_int().and_then(|v| i32::try_from(v).ok())
    }

    /// Get value as double
    pub fn as_double(&self) -> Option<f64> {
        match self.value {
            GroupValue::Float(v) => Some(v),
            GroupValue::Int(v) => Some(v as f64),
            _ => None,
        }
    }

    /// Get value as boolean
    pub fn as_bool(&self) -> Option<bool> {
        match self.value {
            GroupValue::Bool(v) => Some(v),
            GroupValue::Int(v) => Some(v != 0),
            _ => None,
        }
    }

    /// Get value as handle
    pub fn as_handle(&self) -> Option<Handle> {
        self.as_str()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(Handle::new)
    }
}

fn malformed(line: usize, code: i32, raw: &str, expected: &str) -> DxfError {
    DxfError::MalformedRecord {
        line,
        message: format!("value '{}' for group code {} is not {}", raw.trim(), code, expected),
    }
}

/// Integers are sometimes written with a trailing ".0"; anything with a
/// fractional part is rejected.
fn parse_integer(text: &str) -> Option<i64> {
    if let Ok(v) = text.parse::<i64>() {
        return Some(v);
    }
    let v = text.parse::<f64>().ok()?;
    if v.is_finite() && v.fract() == 0.0 && v.abs() < i64::MAX as f64 {
        Some(v as i64)
    } else {
        None
    }
}

/// Process caret-escaped control characters in DXF strings
fn decode_control_chars(value: &str) -> String {
    let value = value.trim_end_matches('\r');
    if !value.contains('^') {
        return value.to_string();
    }
    value
        .replace("^J", "\n")
        .replace("^M", "\r")
        .replace("^I", "\t")
        .replace("^ ", "^")
}

/// Trait for reading DXF code/value pairs from a stream
pub trait DxfStreamReader {
    /// Read the next code/value pair
    fn read_pair(&mut self) -> Result<Option<DxfCodePair>>;

    /// Peek at the next code without consuming it
    fn peek_code(&mut self) -> Result<Option<i32>>;

    /// Push a pair back to be read again on next read_pair call
    fn push_back(&mut self, pair: DxfCodePair);

    /// Reset the reader to the beginning
    fn reset(&mut self);

    /// Skip forward to the next code-0 record after a malformed one
    ///
    /// The code-0 record is pushed back. Returns `false` when the input
    /// ends before one is found.
    fn resync(&mut self) -> bool;

    /// Number of lines consumed so far
    fn line_number(&self) -> usize;
}

/// Helper for reading 3D points from consecutive code pairs
#[derive(Debug, Clone, Default)]
pub struct PointReader {
    x: Option<f64>,
    y: Option<f64>,
    z: Option<f64>,
    group: Option<i32>,
}

impl PointReader {
    /// Create a new point reader
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a coordinate value
    ///
    /// Returns `false` if the pair is not a coordinate of this reader's
    /// point group.
    pub fn add_coordinate(&mut self, pair: &DxfCodePair) -> bool {
        let (Some(axis), Some(group)) = (
            GroupCodeValueType::coordinate_axis(pair.code),
            GroupCodeValueType::coordinate_group(pair.code),
        ) else {
            return false;
        };

        if self.group.is_some_and(|g| g != group) {
            return false;
        }
        self.group = Some(group);

        let Some(value) = pair.as_double() else {
            return false;
        };
        match axis {
            0 => self.x = Some(value),
            1 => self.y = Some(value),
            _ => self.z = Some(value),
        }
        true
    }

    /// Check if we have a complete point
    pub fn is_complete(&self) -> bool {
        self.x.is_some() && self.y.is_some()
    }

    /// Get the point (returns Vector3 with z=0 if z not provided)
    pub fn get_point(&self) -> Option<Vector3> {
        match (self.x, self.y) {
            (Some(x), Some(y)) => Some(Vector3::new(x, y, self.z.unwrap_or(0.0))),
            _ => None,
        }
    }
}
