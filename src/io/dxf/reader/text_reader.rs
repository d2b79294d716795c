//! DXF ASCII text reader

use super::stream_reader::{DxfCodePair, DxfStreamReader};
use crate::error::{DxfError, Result};

/// DXF ASCII reader over an in-memory text body
///
/// Records are tokenized lazily, one code line and one value line at a time.
/// The reader can be rewound with [`DxfStreamReader::reset`].
pub struct DxfTextReader<'a> {
    source: &'a str,
    offset: usize,
    line_number: usize,
    peeked_pair: Option<DxfCodePair>,
}

impl<'a> DxfTextReader<'a> {
    /// Create a new DXF text reader
    pub fn new(source: &'a str) -> Self {
        let source = source.strip_prefix('\u{feff}').unwrap_or(source);
        Self {
            source,
            offset: 0,
            line_number: 0,
            peeked_pair: None,
        }
    }

    /// Read a single line, without its terminator
    fn read_line(&mut self) -> Option<&'a str> {
        if self.offset >= self.source.len() {
            return None;
        }

        let rest = &self.source[self.offset..];
        let (line, consumed) = match rest.find('\n') {
            Some(pos) => (&rest[..pos], pos + 1),
            None => (rest, rest.len()),
        };

        self.offset += consumed;
        self.line_number += 1;
        Some(line.strip_suffix('\r').unwrap_or(line))
    }

    /// Read a code/value pair from the stream
    fn read_pair_internal(&mut self) -> Result<Option<DxfCodePair>> {
        // Trailing blank lines at the end of a file are not records
        let code_line = loop {
            match self.read_line() {
                Some(line) if line.trim().is_empty() && self.at_end() => return Ok(None),
                Some(line) => break line,
                None => return Ok(None),
            }
        };
        let code_line_number = self.line_number;

        let code = code_line.trim().parse::<i32>().map_err(|_| DxfError::MalformedRecord {
            line: code_line_number,
            message: format!("invalid group code '{}'", code_line.trim()),
        })?;

        let value_line = self.read_line().ok_or_else(|| DxfError::MalformedRecord {
            line: code_line_number,
            message: format!("unexpected end of input after group code {}", code),
        })?;

        DxfCodePair::parse(code, value_line, code_line_number).map(Some)
    }

    fn at_end(&self) -> bool {
        self.source[self.offset..].trim().is_empty()
    }
}

impl DxfStreamReader for DxfTextReader<'_> {
    fn read_pair(&mut self) -> Result<Option<DxfCodePair>> {
        // If we have a peeked pair, return it
        if let Some(pair) = self.peeked_pair.take() {
            return Ok(Some(pair));
        }

        self.read_pair_internal()
    }

    fn peek_code(&mut self) -> Result<Option<i32>> {
        if let Some(ref pair) = self.peeked_pair {
            return Ok(Some(pair.code));
        }

        match self.read_pair_internal()? {
            Some(pair) => {
                let code = pair.code;
                self.peeked_pair = Some(pair);
                Ok(Some(code))
            }
            None => Ok(None),
        }
    }

    fn push_back(&mut self, pair: DxfCodePair) {
        self.peeked_pair = Some(pair);
    }

    fn reset(&mut self) {
        self.offset = 0;
        self.line_number = 0;
        self.peeked_pair = None;
    }

    fn resync(&mut self) -> bool {
        self.peeked_pair = None;

        while let Some(code_line) = self.read_line() {
            let code_line_number = self.line_number;
            match code_line.trim().parse::<i32>() {
                Ok(0) => {
                    let Some(value_line) = self.read_line() else {
                        return false;
                    };
                    self.peeked_pair = Some(DxfCodePair::text(
                        0,
                        value_line.trim(),
                        code_line_number,
                    ));
                    return true;
                }
                // Skip the value of a well-formed code line
                Ok(_) => {
                    if self.read_line().is_none() {
                        return false;
                    }
                }
                // Not a code line: the stream is misaligned, shift by one line
                Err(_) => {}
            }
        }

        false
    }

    fn line_number(&self) -> usize {
        self.line_number
    }
}

impl Iterator for DxfTextReader<'_> {
    type Item = Result<DxfCodePair>;

    fn next(&mut self) -> Option<Self::Item> {
        self.read_pair().transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::dxf::GroupValue;

    #[test]
    fn test_read_simple_pair() {
        let mut reader = DxfTextReader::new("0\nSECTION\n");

        let pair = reader.read_pair().unwrap().unwrap();
        assert_eq!(pair.code, 0);
        assert_eq!(pair.as_str(), Some("SECTION"));
        assert_eq!(pair.line, 1);
    }

    #[test]
    fn test_read_integer_pair() {
        let mut reader = DxfTextReader::new(" 70\n    42\n");

        let pair = reader.read_pair().unwrap().unwrap();
        assert_eq!(pair.code, 70);
        assert_eq!(pair.as_int(), Some(42));
    }

    #[test]
    fn test_read_double_pair() {
        let mut reader = DxfTextReader::new("10\r\n123.456\r\n");

        let pair = reader.read_pair().unwrap().unwrap();
        assert_eq!(pair.code, 10);
        assert_eq!(pair.as_double(), Some(123.456));
    }

    #[test]
    fn test_peek_code() {
        let mut reader = DxfTextReader::new("0\nSECTION\n2\nHEADER\n");

        assert_eq!(reader.peek_code().unwrap(), Some(0));

        let pair = reader.read_pair().unwrap().unwrap();
        assert_eq!(pair.code, 0);

        assert_eq!(reader.peek_code().unwrap(), Some(2));
    }

    #[test]
    fn test_reset_rewinds() {
        let mut reader = DxfTextReader::new("0\nSECTION\n2\nENTITIES\n");
        let first: Vec<_> = reader.by_ref().map(|p| p.unwrap()).collect();
        reader.reset();
        let second: Vec<_> = reader.by_ref().map(|p| p.unwrap()).collect();
        assert_eq!(first, second);
        assert_eq!(first.len(), 2);
    }

    #[test]
    fn test_invalid_code_line() {
        let mut reader = DxfTextReader::new("0\nLINE\nabc\n1.0\n");
        reader.read_pair().unwrap();
        let err = reader.read_pair().unwrap_err();
        assert_eq!(err.line(), Some(3));
    }

    #[test]
    fn test_missing_value_line() {
        let mut reader = DxfTextReader::new("0\n");
        assert!(matches!(
            reader.read_pair(),
            Err(DxfError::MalformedRecord { line: 1, .. })
        ));
    }

    #[test]
    fn test_resync_finds_next_code_zero() {
        let mut reader = DxfTextReader::new("10\nnope\n20\n1.0\n0\nLINE\n8\nA\n");
        assert!(reader.read_pair().is_err());
        assert!(reader.resync());

        let pair = reader.read_pair().unwrap().unwrap();
        assert!(pair.is_marker("LINE"));
        assert_eq!(pair.line, 5);
        let pair = reader.read_pair().unwrap().unwrap();
        assert_eq!(pair.value, GroupValue::Str("A".into()));
    }

    #[test]
    fn test_resync_realigns_after_bad_code_line() {
        let mut reader = DxfTextReader::new("bad\n0\nLINE\n");
        assert!(reader.read_pair().is_err());
        assert!(reader.resync());
        assert!(reader.read_pair().unwrap().unwrap().is_marker("LINE"));
    }

    #[test]
    fn test_resync_fails_at_end() {
        let mut reader = DxfTextReader::new("10\nx\n20\n1.0\n");
        assert!(reader.read_pair().is_err());
        assert!(!reader.resync());
    }

    #[test]
    fn test_trailing_blank_lines() {
        let mut reader = DxfTextReader::new("0\nEOF\n\n\n");
        assert!(reader.read_pair().unwrap().unwrap().is_marker("EOF"));
        assert!(reader.read_pair().unwrap().is_none());
    }
}
