//! DXF code page ($DWGCODEPAGE) handling.
//!
//! Files written before AutoCAD 2007 store text in the code page named by
//! the `$DWGCODEPAGE` header variable. Byte input that is not valid UTF-8 is
//! decoded with that code page, falling back to Windows-1252.

use crate::error::{DxfError, Result};
use encoding_rs::Encoding;
use std::borrow::Cow;

/// Get the `encoding_rs` encoding for a DXF code page string.
///
/// Returns `None` if the code page is UTF-8 or ASCII (no transcoding
/// needed). Unrecognized names map to Windows-1252.
pub fn encoding_from_code_page(code_page: &str) -> Option<&'static Encoding> {
    match code_page.trim().to_ascii_lowercase().as_str() {
        // Asian encodings
        "gb2312" | "ansi_936" => Some(encoding_rs::GBK),
        "big5" | "ansi_950" => Some(encoding_rs::BIG5),
        "korean" | "ansi_949" | "johab" => Some(encoding_rs::EUC_KR),
        "ansi_932" => Some(encoding_rs::SHIFT_JIS),

        // DOS/OEM code pages
        "dos437" | "dos855" | "dos866" => Some(encoding_rs::IBM866),
        "dos850" | "dos860" | "dos861" | "dos863" | "dos865" => Some(encoding_rs::WINDOWS_1252),
        "dos852" => Some(encoding_rs::WINDOWS_1250),
        "dos857" => Some(encoding_rs::WINDOWS_1254),
        "dos869" => Some(encoding_rs::WINDOWS_1253),

        // Windows/ANSI code pages
        "ansi_874" => Some(encoding_rs::WINDOWS_874),
        "ansi_1250" => Some(encoding_rs::WINDOWS_1250),
        "ansi_1251" => Some(encoding_rs::WINDOWS_1251),
        "ansi_1252" => Some(encoding_rs::WINDOWS_1252),
        "ansi_1253" => Some(encoding_rs::WINDOWS_1253),
        "ansi_1254" => Some(encoding_rs::WINDOWS_1254),
        "ansi_1255" => Some(encoding_rs::WINDOWS_1255),
        "ansi_1256" => Some(encoding_rs::WINDOWS_1256),
        "ansi_1257" => Some(encoding_rs::WINDOWS_1257),
        "ansi_1258" => Some(encoding_rs::WINDOWS_1258),

        // ISO encodings
        "iso8859-1" | "iso_8859-1" => Some(encoding_rs::WINDOWS_1252),
        "iso8859-2" | "iso_8859-2" => Some(encoding_rs::ISO_8859_2),
        "iso8859-5" | "iso_8859-5" => Some(encoding_rs::ISO_8859_5),
        "iso8859-7" | "iso_8859-7" => Some(encoding_rs::ISO_8859_7),
        "iso8859-9" | "iso_8859-9" => Some(encoding_rs::WINDOWS_1254),
        "iso8859-15" | "iso_8859-15" => Some(encoding_rs::ISO_8859_15),

        "koi8-r" => Some(encoding_rs::KOI8_R),
        "koi8-u" => Some(encoding_rs::KOI8_U),

        "ascii" | "utf-8" | "utf8" | "unicode" => None,

        _ => Some(encoding_rs::WINDOWS_1252),
    }
}

/// Find the `$DWGCODEPAGE` value in undecoded DXF bytes
///
/// Only the ASCII structure of the HEADER section is inspected, so this
/// works before the body is decoded.
pub fn sniff_code_page(bytes: &[u8]) -> Option<String> {
    let mut lines = bytes
        .split(|&b| b == b'\n')
        .map(|line| line.strip_suffix(b"\r").unwrap_or(line));

    while let Some(line) = lines.next() {
        if trim_bytes(line) == b"$DWGCODEPAGE" {
            let _code = lines.next()?;
            let value = lines.next()?;
            return std::str::from_utf8(trim_bytes(value)).ok().map(str::to_string);
        }
        if trim_bytes(line) == b"ENDSEC" {
            // The header is always the first section
            return None;
        }
    }
    None
}

fn trim_bytes(bytes: &[u8]) -> &[u8] {
    let start = bytes.iter().position(|b| !b.is_ascii_whitespace()).unwrap_or(bytes.len());
    let end = bytes.iter().rposition(|b| !b.is_ascii_whitespace()).map_or(start, |i| i + 1);
    &bytes[start..end]
}

/// Decode DXF bytes to text
///
/// UTF-8 input (with or without BOM) is borrowed as is.
pub fn decode_dxf_bytes(bytes: &[u8]) -> Result<Cow<'_, str>> {
    if let Ok(text) = std::str::from_utf8(bytes) {
        return Ok(Cow::Borrowed(text));
    }

    let code_page = sniff_code_page(bytes);
    let encoding = code_page
        .as_deref()
        .and_then(encoding_from_code_page)
        .unwrap_or(encoding_rs::WINDOWS_1252);

    let (text, had_errors) = encoding.decode_without_bom_handling(bytes);
    if had_errors {
        return Err(DxfError::Encoding(format!(
            "input is not valid {} text",
            encoding.name()
        )));
    }
    tracing::debug!(encoding = encoding.name(), "decoded non-UTF-8 DXF input");
    Ok(text)
}
