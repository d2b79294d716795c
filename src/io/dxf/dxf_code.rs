//! DXF group codes
//!
//! Group codes define the type of data that follows in a DXF file. The kind
//! of a value depends only on the numeric range of its code, never on the
//! section or entity it appears in.

use once_cell::sync::Lazy;

/// Highest group code with a defined value kind
pub const MAX_GROUP_CODE: i32 = 1071;

/// Kind of value carried by a group code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GroupCodeValueType {
    /// Plain string (names, text, subclass markers)
    String,
    /// Hexadecimal object handle, kept as a string
    Handle,
    /// Floating-point value (coordinates, distances, angles)
    Double,
    /// 16-bit integer
    Int16,
    /// 32-bit integer
    Int32,
    /// 64-bit integer
    Int64,
    /// Boolean flag written as 0/1
    Bool,
    /// Undefined range; the value is kept as a raw string
    Reserved,
}

impl GroupCodeValueType {
    /// Look up the value kind for a group code
    pub fn from_code(code: i32) -> Self {
        usize::try_from(code)
            .ok()
            .and_then(|c| CODE_TABLE.get(c).copied())
            .unwrap_or(GroupCodeValueType::Reserved)
    }

    /// Inclusive value range of an integer kind; `None` for other kinds
    pub fn integer_range(self) -> Option<(i64, i64)> {
        match self {
            GroupCodeValueType::Int16 => Some((i16::MIN.into(), i16::MAX.into())),
            GroupCodeValueType::Int32 => Some((i32::MIN.into(), i32::MAX.into())),
            GroupCodeValueType::Int64 => Some((i64::MIN, i64::MAX)),
            _ => None,
        }
    }

    /// Coordinate axis (0 = X, 1 = Y, 2 = Z) of a point-valued code
    ///
    /// Codes 10..=18 are X, 20..=28 Y and 30..=37 Z of the nine primary
    /// point groups; 210/220/230 is the extrusion direction and 1010..1039
    /// the XDATA points.
    pub fn coordinate_axis(code: i32) -> Option<usize> {
        match code {
            10..=18 | 110..=112 | 210 | 1010..=1013 => Some(0),
            20..=28 | 120..=122 | 220 | 1020..=1023 => Some(1),
            30..=37 | 130..=132 | 230 | 1030..=1033 => Some(2),
            _ => None,
        }
    }

    /// Point group a coordinate code belongs to (10, 20 and 30 share group 10)
    pub fn coordinate_group(code: i32) -> Option<i32> {
        let axis = Self::coordinate_axis(code)?;
        Some(code - 10 * axis as i32)
    }
}

fn classify(code: i32) -> GroupCodeValueType {
    use GroupCodeValueType::*;
    match code {
        5 | 105 => Handle,
        0..=9 => String,
        10..=59 => Double,
        60..=79 => Int16,
        // 80..=89 are not defined by the format; read them as integers
        80..=89 => Int16,
        90..=99 => Int32,
        100..=109 => String,
        110..=149 => Double,
        160..=169 => Int64,
        170..=179 => Int16,
        210..=239 => Double,
        270..=289 => Int16,
        290..=299 => Bool,
        300..=319 => String,
        320..=369 => Handle,
        370..=389 => Int16,
        390..=399 => Handle,
        400..=409 => Int16,
        410..=419 => String,
        420..=429 => Int32,
        430..=439 => String,
        440..=449 => Int32,
        450..=459 => Int32,
        460..=469 => Double,
        470..=479 => String,
        480..=481 => Handle,
        999 => String,
        1000..=1003 => String,
        1004 => String,
        1005 => Handle,
        1006..=1009 => String,
        1010..=1059 => Double,
        1060..=1070 => Int16,
        1071 => Int32,
        _ => Reserved,
    }
}

/// Process-wide code → kind dictionary, built once and read-only afterwards.
static CODE_TABLE: Lazy<Vec<GroupCodeValueType>> =
    Lazy::new(|| (0..=MAX_GROUP_CODE).map(classify).collect());

/// Value kind for a group code
pub fn value_type_for_code(code: i32) -> GroupCodeValueType {
    GroupCodeValueType::from_code(code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_codes() {
        for code in 0..=4 {
            assert_eq!(value_type_for_code(code), GroupCodeValueType::String);
        }
        assert_eq!(value_type_for_code(8), GroupCodeValueType::String);
        assert_eq!(value_type_for_code(100), GroupCodeValueType::String);
        assert_eq!(value_type_for_code(999), GroupCodeValueType::String);
    }

    #[test]
    fn test_handle_codes() {
        assert_eq!(value_type_for_code(5), GroupCodeValueType::Handle);
        assert_eq!(value_type_for_code(105), GroupCodeValueType::Handle);
        assert_eq!(value_type_for_code(330), GroupCodeValueType::Handle);
        assert_eq!(value_type_for_code(347), GroupCodeValueType::Handle);
        assert_eq!(value_type_for_code(390), GroupCodeValueType::Handle);
    }

    #[test]
    fn test_numeric_ranges() {
        assert_eq!(value_type_for_code(10), GroupCodeValueType::Double);
        assert_eq!(value_type_for_code(59), GroupCodeValueType::Double);
        assert_eq!(value_type_for_code(230), GroupCodeValueType::Double);
        assert_eq!(value_type_for_code(62), GroupCodeValueType::Int16);
        assert_eq!(value_type_for_code(90), GroupCodeValueType::Int32);
        assert_eq!(value_type_for_code(160), GroupCodeValueType::Int64);
        assert_eq!(value_type_for_code(370), GroupCodeValueType::Int16);
        assert_eq!(value_type_for_code(420), GroupCodeValueType::Int32);
        assert_eq!(value_type_for_code(290), GroupCodeValueType::Bool);
    }

    #[test]
    fn test_integer_range() {
        assert_eq!(GroupCodeValueType::Int16.integer_range(), Some((-32768, 32767)));
        assert_eq!(
            GroupCodeValueType::Int32.integer_range(),
            Some((i32::MIN as i64, i32::MAX as i64))
        );
        assert_eq!(GroupCodeValueType::Double.integer_range(), None);
        assert_eq!(GroupCodeValueType::Bool.integer_range(), None);
    }

    #[test]
    fn test_undefined_codes_are_reserved() {
        assert_eq!(value_type_for_code(150), GroupCodeValueType::Reserved);
        assert_eq!(value_type_for_code(2000), GroupCodeValueType::Reserved);
        assert_eq!(value_type_for_code(-1), GroupCodeValueType::Reserved);
    }

    #[test]
    fn test_coordinate_axis() {
        assert_eq!(GroupCodeValueType::coordinate_axis(10), Some(0));
        assert_eq!(GroupCodeValueType::coordinate_axis(21), Some(1));
        assert_eq!(GroupCodeValueType::coordinate_axis(33), Some(2));
        assert_eq!(GroupCodeValueType::coordinate_axis(220), Some(1));
        assert_eq!(GroupCodeValueType::coordinate_axis(40), None);
        assert_eq!(GroupCodeValueType::coordinate_axis(38), None);
    }

    #[test]
    fn test_coordinate_group() {
        assert_eq!(GroupCodeValueType::coordinate_group(10), Some(10));
        assert_eq!(GroupCodeValueType::coordinate_group(20), Some(10));
        assert_eq!(GroupCodeValueType::coordinate_group(31), Some(11));
        assert_eq!(GroupCodeValueType::coordinate_group(230), Some(210));
    }
}
