//! DXF document reader

mod entity_reader;
mod section_reader;
mod stream_reader;
mod text_reader;

pub use section_reader::SectionReader;
pub use stream_reader::{DxfCodePair, DxfStreamReader, GroupValue, PointReader};
pub use text_reader::DxfTextReader;

use crate::document::{DocumentBuilder, DxfDoc};
use crate::error::{DxfError, Result};
use crate::notification::NotificationType;
use rayon::prelude::*;

/// Configuration for the DXF parser.
#[derive(Debug, Clone)]
pub struct DxfParserConfiguration {
    /// When `true`, a malformed record drops only the entity, table entry or
    /// block header it belongs to and is reported as a notification; reading
    /// resumes at the next code-0 record.
    ///
    /// Default: `true`.
    pub failsafe: bool,

    /// Number of malformed records tolerated in failsafe mode before the
    /// parse fails with [`DxfError::TooManyMalformedRecords`].
    pub max_malformed_records: usize,
}

impl Default for DxfParserConfiguration {
    fn default() -> Self {
        Self {
            failsafe: true,
            max_malformed_records: 64,
        }
    }
}

/// Dispatcher position in the record stream
#[derive(Debug, Clone, PartialEq, Eq)]
enum SectionState {
    Outside,
    InSection { name: String, line: usize },
}

/// DXF text parser
#[derive(Debug, Clone, Default)]
pub struct DxfParser {
    config: DxfParserConfiguration,
}

impl DxfParser {
    /// Create a parser with the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the parser configuration.
    pub fn with_configuration(mut self, config: DxfParserConfiguration) -> Self {
        self.config = config;
        self
    }

    /// Parse a complete ASCII DXF document
    pub fn parse(&self, source: &str) -> Result<DxfDoc> {
        let mut reader = DxfTextReader::new(source);
        Self::check_dxf(&mut reader)?;
        reader.reset();

        let mut builder = DocumentBuilder::new();
        {
            let mut sections = SectionReader::new(&mut reader, &mut builder, &self.config);
            Self::read_sections(&mut sections)?;
        }
        Ok(builder.build())
    }

    /// Parse raw bytes, decoding them as UTF-8 or, failing that, with the
    /// code page named by `$DWGCODEPAGE`
    pub fn parse_bytes(&self, bytes: &[u8]) -> Result<DxfDoc> {
        let text = super::code_page::decode_dxf_bytes(bytes)?;
        self.parse(&text)
    }

    /// Parse independent documents in parallel
    ///
    /// Results come back in input order.
    pub fn parse_many(&self, sources: &[&str]) -> Vec<Result<DxfDoc>> {
        sources.par_iter().map(|source| self.parse(source)).collect()
    }

    /// Reject input that is not a DXF record stream
    ///
    /// The first record must tokenize and a SECTION marker must appear
    /// somewhere in the stream.
    fn check_dxf(reader: &mut DxfTextReader<'_>) -> Result<()> {
        match reader.next() {
            None => {
                return Err(DxfError::NotDxf {
                    line: 0,
                    message: "empty input".to_string(),
                })
            }
            Some(Err(err)) => {
                return Err(DxfError::NotDxf {
                    line: err.line().unwrap_or_default(),
                    message: err.to_string(),
                })
            }
            Some(Ok(pair)) if pair.is_marker("SECTION") => return Ok(()),
            Some(Ok(_)) => {}
        }

        loop {
            match reader.next() {
                Some(Ok(pair)) if pair.is_marker("SECTION") => return Ok(()),
                Some(Ok(_)) => {}
                Some(Err(_)) => {
                    if !reader.resync() {
                        break;
                    }
                }
                None => break,
            }
        }

        Err(DxfError::NotDxf {
            line: reader.line_number(),
            message: "no SECTION marker found".to_string(),
        })
    }

    /// Route each SECTION ... ENDSEC range to its reader
    fn read_sections<R: DxfStreamReader>(sections: &mut SectionReader<'_, R>) -> Result<()> {
        let mut state = SectionState::Outside;

        loop {
            state = match state {
                SectionState::Outside => {
                    let Some(pair) = sections.next_pair()? else {
                        break;
                    };
                    if pair.is_marker("EOF") {
                        break;
                    }
                    if !pair.is_marker("SECTION") {
                        if pair.code == 0 {
                            sections.document.notifications_mut().notify_at(
                                NotificationType::Warning,
                                pair.line,
                                format!("{} outside of a section skipped", pair.value_string()),
                            );
                        }
                        state = SectionState::Outside;
                        continue;
                    }

                    let name = match sections.next_pair()? {
                        Some(name_pair) if name_pair.code == 2 => {
                            name_pair.value_string().trim().to_string()
                        }
                        Some(other) => {
                            sections.reader.push_back(other);
                            String::new()
                        }
                        None => {
                            return Err(DxfError::UnterminatedSection {
                                name: String::new(),
                                line: pair.line,
                            })
                        }
                    };
                    tracing::debug!(section = %name, line = pair.line, "reading section");
                    SectionState::InSection {
                        name,
                        line: pair.line,
                    }
                }
                SectionState::InSection { name, line } => {
                    let terminated = match name.as_str() {
                        "HEADER" => sections.read_header()?,
                        "TABLES" => sections.read_tables()?,
                        "BLOCKS" => sections.read_blocks()?,
                        "ENTITIES" => sections.read_entities()?,
                        _ => {
                            sections.document.notifications_mut().notify_at(
                                NotificationType::NotImplemented,
                                line,
                                format!("{} section skipped", name),
                            );
                            sections.skip_section()?
                        }
                    };
                    if !terminated {
                        return Err(DxfError::UnterminatedSection { name, line });
                    }
                    SectionState::Outside
                }
            };
        }

        Ok(())
    }
}

/// Parse an ASCII DXF document with the default configuration
pub fn parse(source: &str) -> Result<DxfDoc> {
    DxfParser::new().parse(source)
}

/// Parse DXF bytes with the default configuration
pub fn parse_bytes(bytes: &[u8]) -> Result<DxfDoc> {
    DxfParser::new().parse_bytes(bytes)
}

/// Parse several documents in parallel with the default configuration
pub fn parse_many(sources: &[&str]) -> Vec<Result<DxfDoc>> {
    DxfParser::new().parse_many(sources)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input_is_not_dxf() {
        assert!(matches!(parse(""), Err(DxfError::NotDxf { line: 0, .. })));
    }

    #[test]
    fn test_garbage_is_not_dxf() {
        let err = parse("hello world\nthis is not dxf\n").unwrap_err();
        assert!(matches!(err, DxfError::NotDxf { line: 1, .. }));
    }

    #[test]
    fn test_no_section_marker() {
        let err = parse("0\nLINE\n8\n0\n").unwrap_err();
        assert!(matches!(err, DxfError::NotDxf { .. }));
    }

    #[test]
    fn test_minimal_document() {
        let doc = parse("0\nSECTION\n2\nENTITIES\n0\nENDSEC\n0\nEOF\n").unwrap();
        assert!(doc.entities().is_empty());
        assert!(doc.notifications().is_empty());
    }

    #[test]
    fn test_unknown_section_skipped() {
        let doc = parse(
            "0\nSECTION\n2\nOBJECTS\n0\nDICTIONARY\n5\nC\n0\nENDSEC\n\
             0\nSECTION\n2\nENTITIES\n0\nPOINT\n10\n1\n20\n1\n0\nENDSEC\n0\nEOF\n",
        )
        .unwrap();
        assert_eq!(doc.entities().len(), 1);
        let skipped = doc.notifications().of_type(NotificationType::NotImplemented);
        assert_eq!(skipped.len(), 1);
        assert_eq!(skipped[0].line, Some(1));
    }

    #[test]
    fn test_unterminated_section() {
        let err = parse("0\nSECTION\n2\nENTITIES\n0\nPOINT\n10\n1\n20\n1\n").unwrap_err();
        assert_eq!(
            err,
            DxfError::UnterminatedSection {
                name: "ENTITIES".into(),
                line: 1
            }
        );
    }

    #[test]
    fn test_eof_inside_section() {
        let err = parse("0\nSECTION\n2\nHEADER\n9\n$ACADVER\n1\nAC1015\n0\nEOF\n").unwrap_err();
        assert!(matches!(err, DxfError::UnterminatedSection { ref name, .. } if name == "HEADER"));
    }

    #[test]
    fn test_parse_many_keeps_order() {
        let ok = "0\nSECTION\n2\nENTITIES\n0\nLINE\n0\nENDSEC\n";
        let results = parse_many(&[ok, "", ok]);
        assert_eq!(results.len(), 3);
        assert!(results[0].is_ok());
        assert!(results[1].is_err());
        assert_eq!(results[2].as_ref().map(|d| d.entities().len()).ok(), Some(1));
    }
}
