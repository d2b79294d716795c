//! DXF (Drawing Exchange Format) reading

pub mod code_page;
mod dxf_code;
mod reader;

pub use dxf_code::{value_type_for_code, GroupCodeValueType, MAX_GROUP_CODE};
pub use reader::{
    parse, parse_bytes, parse_many, DxfCodePair, DxfParser, DxfParserConfiguration,
    DxfStreamReader, DxfTextReader, GroupValue, PointReader, SectionReader,
};
