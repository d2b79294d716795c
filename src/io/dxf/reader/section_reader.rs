//! DXF section readers

use super::stream_reader::{DxfCodePair, DxfStreamReader, PointReader};
use super::DxfParserConfiguration;
use crate::document::{DocumentBuilder, HeaderValue};
use crate::entities::Block;
use crate::error::{DxfError, Result};
use crate::notification::NotificationType;
use crate::tables::{Layer, LineType};

/// Reads the ranges of one document
///
/// All record access goes through [`SectionReader::next_pair`], which turns
/// a malformed record into a dropped range when the configuration allows it.
pub struct SectionReader<'a, R: DxfStreamReader> {
    pub(super) reader: &'a mut R,
    pub(super) document: &'a mut DocumentBuilder,
    config: &'a DxfParserConfiguration,
    malformed_count: usize,
    range_dropped: bool,
}

impl<'a, R: DxfStreamReader> SectionReader<'a, R> {
    /// Create a new section reader
    pub fn new(
        reader: &'a mut R,
        document: &'a mut DocumentBuilder,
        config: &'a DxfParserConfiguration,
    ) -> Self {
        Self {
            reader,
            document,
            config,
            malformed_count: 0,
            range_dropped: false,
        }
    }

    /// Read the next pair, resynchronizing after a malformed record
    ///
    /// In failsafe mode a malformed record marks the current range as
    /// dropped and reading resumes at the next code-0 record.
    pub fn next_pair(&mut self) -> Result<Option<DxfCodePair>> {
        loop {
            match self.reader.read_pair() {
                Ok(pair) => return Ok(pair),
                Err(err @ DxfError::MalformedRecord { .. }) if self.config.failsafe => {
                    let line = err.line().unwrap_or_else(|| self.reader.line_number());
                    self.malformed_count += 1;
                    if self.malformed_count > self.config.max_malformed_records {
                        return Err(DxfError::TooManyMalformedRecords {
                            count: self.malformed_count,
                            line,
                        });
                    }
                    self.notify(NotificationType::Error, line, err.to_string());
                    self.range_dropped = true;
                    if !self.reader.resync() {
                        return Ok(None);
                    }
                }
                Err(err) => return Err(err),
            }
        }
    }

    /// Next pair of the current record; the closing code-0 pair is pushed back
    pub(super) fn next_field(&mut self) -> Result<Option<DxfCodePair>> {
        match self.next_pair()? {
            Some(pair) if pair.code == 0 => {
                self.reader.push_back(pair);
                Ok(None)
            }
            other => Ok(other),
        }
    }

    /// Consume the remaining fields of the current record
    pub(super) fn skip_record(&mut self) -> Result<()> {
        while self.next_field()?.is_some() {}
        Ok(())
    }

    /// Start a new record range
    pub(super) fn begin_range(&mut self) {
        self.range_dropped = false;
    }

    /// Whether the current range lost a record; clears the mark
    pub(super) fn take_dropped(&mut self) -> bool {
        std::mem::take(&mut self.range_dropped)
    }

    pub(super) fn notify(
        &mut self,
        notification_type: NotificationType,
        line: usize,
        message: impl Into<String>,
    ) {
        self.document
            .notifications_mut()
            .notify_at(notification_type, line, message);
    }

    /// SECTION or EOF met before ENDSEC; the open section is unterminated
    fn breaks_section(pair: &DxfCodePair) -> bool {
        pair.is_marker("SECTION") || pair.is_marker("EOF")
    }

    /// Skip a section the reader does not model
    ///
    /// Returns `false` when SECTION or EOF comes before ENDSEC.
    pub fn skip_section(&mut self) -> Result<bool> {
        while let Some(pair) = self.next_pair()? {
            if pair.is_marker("ENDSEC") {
                return Ok(true);
            }
            if Self::breaks_section(&pair) {
                self.reader.push_back(pair);
                return Ok(false);
            }
        }
        Ok(false)
    }

    /// Read the HEADER section
    ///
    /// Each `$VARIABLE` (code 9) takes the value records that follow it.
    /// Variables written as codes 10/20/30 become points.
    pub fn read_header(&mut self) -> Result<bool> {
        let mut current: Option<(String, usize)> = None;
        let mut value: Option<HeaderValue> = None;
        let mut point = PointReader::new();

        let terminated = loop {
            let Some(pair) = self.next_pair()? else {
                break false;
            };

            if pair.code == 0 || pair.code == 9 {
                if let Some((name, line)) = current.take() {
                    let dropped = self.take_dropped();
                    let value = point.get_point().map(HeaderValue::Point).or(value.take());
                    match value {
                        Some(value) if !dropped => self.document.set_header(name, value),
                        _ if dropped => self.notify(
                            NotificationType::Error,
                            line,
                            format!("header variable {} dropped", name),
                        ),
                        _ => {}
                    }
                }
                value = None;
                point = PointReader::new();
            }

            match pair.code {
                0 if pair.is_marker("ENDSEC") => break true,
                0 if Self::breaks_section(&pair) => {
                    self.reader.push_back(pair);
                    break false;
                }
                0 => {}
                9 => {
                    self.begin_range();
                    current = Some((pair.value_string().trim().to_string(), pair.line));
                }
                _ if current.is_none() => {}
                10 | 20 | 30 => {
                    point.add_coordinate(&pair);
                }
                _ => value = Some(HeaderValue::Value(pair.value)),
            }
        };

        Ok(terminated)
    }

    /// Read the TABLES section
    pub fn read_tables(&mut self) -> Result<bool> {
        while let Some(pair) = self.next_pair()? {
            if pair.is_marker("ENDSEC") {
                return Ok(true);
            }
            if Self::breaks_section(&pair) {
                self.reader.push_back(pair);
                return Ok(false);
            }
            if pair.is_marker("TABLE") {
                self.read_table(pair.line)?;
            }
        }
        Ok(false)
    }

    /// Read one TABLE ... ENDTAB range
    fn read_table(&mut self, line: usize) -> Result<()> {
        let mut name = String::new();
        while let Some(pair) = self.next_field()? {
            if pair.code == 2 && name.is_empty() {
                name = pair.value_string().trim().to_string();
            }
        }

        loop {
            let Some(pair) = self.next_pair()? else {
                return Err(DxfError::UnterminatedTable { name, line });
            };
            if pair.is_marker("ENDTAB") {
                self.skip_record()?;
                return Ok(());
            }
            if pair.is_marker("ENDSEC")
                || pair.is_marker("TABLE")
                || Self::breaks_section(&pair)
            {
                return Err(DxfError::UnterminatedTable { name, line });
            }

            self.begin_range();
            match (name.as_str(), pair.as_str().map(str::trim)) {
                ("LAYER", Some("LAYER")) => {
                    let layer = self.read_layer_entry()?;
                    if self.take_dropped() {
                        self.notify(NotificationType::Error, pair.line, "layer entry dropped");
                    } else if self.document.add_layer(layer).is_some() {
                        tracing::debug!(line = pair.line, "duplicate layer replaced");
                    }
                }
                ("LTYPE", Some("LTYPE")) => {
                    let line_type = self.read_linetype_entry()?;
                    if self.take_dropped() {
                        self.notify(NotificationType::Error, pair.line, "line type entry dropped");
                    } else {
                        self.document.add_line_type(line_type);
                    }
                }
                _ => {
                    tracing::trace!(table = %name, line = pair.line, "table entry skipped");
                    self.skip_record()?;
                }
            }
        }
    }

    /// Read a single LAYER entry
    fn read_layer_entry(&mut self) -> Result<Layer> {
        let mut layer = Layer::new("");

        while let Some(pair) = self.next_field()? {
            match pair.code {
                2 => layer.name = pair.value_string(),
                5 => layer.handle = pair.as_handle(),
                62 => {
                    if let Some(color) = pair.as_i16() {
                        layer.set_color(color);
                    }
                }
                70 => {
                    if let Some(flags) = pair.as_i16() {
                        layer.flags = flags;
                    }
                }
                _ => {}
            }
        }

        Ok(layer)
    }

    /// Read a single LTYPE entry
    fn read_linetype_entry(&mut self) -> Result<LineType> {
        let mut line_type = LineType::new("");

        while let Some(pair) = self.next_field()? {
            match pair.code {
                2 => line_type.name = pair.value_string(),
                3 => line_type.description = pair.value_string(),
                5 => line_type.handle = pair.as_handle(),
                40 => line_type.pattern_length = pair.as_double(),
                49 => {
                    if let Some(length) = pair.as_double() {
                        line_type.pattern.push(length);
                    }
                }
                73 => {
                    if let Some(count) = pair.as_i16() {
                        line_type.element_count = Some(count);
                        line_type.pattern.reserve(count.max(0) as usize);
                    }
                }
                _ => {}
            }
        }

        Ok(line_type)
    }

    /// Read the BLOCKS section
    pub fn read_blocks(&mut self) -> Result<bool> {
        while let Some(pair) = self.next_pair()? {
            if pair.is_marker("ENDSEC") {
                return Ok(true);
            }
            if Self::breaks_section(&pair) {
                self.reader.push_back(pair);
                return Ok(false);
            }
            if pair.is_marker("BLOCK") {
                if let Some(block) = self.read_block(pair.line)? {
                    if self.document.add_block(block).is_some() {
                        tracing::debug!(line = pair.line, "duplicate block replaced");
                    }
                }
            } else if pair.code == 0 {
                self.notify(
                    NotificationType::Warning,
                    pair.line,
                    format!("{} outside of a block skipped", pair.value_string().trim()),
                );
                self.skip_record()?;
            }
        }
        Ok(false)
    }

    /// Read a single BLOCK...ENDBLK definition
    ///
    /// Returns `None` when the block header lost a record.
    fn read_block(&mut self, line: usize) -> Result<Option<Block>> {
        let mut block = Block::new("");
        let mut base_point = PointReader::new();

        self.begin_range();
        while let Some(pair) = self.next_field()? {
            match pair.code {
                1 => block.xref_path = pair.value_string(),
                2 => block.name = pair.value_string(),
                3 => block.name2 = pair.value_string(),
                5 => block.handle = pair.as_handle(),
                8 => block.layer = pair.value_string(),
                10 | 20 | 30 => {
                    base_point.add_coordinate(&pair);
                }
                67 => block.paper_space = pair.as_int().is_some_and(|v| v != 0),
                70 => {
                    if let Some(flags) = pair.as_i16() {
                        block.block_type = flags;
                    }
                }
                330 => block.owner_handle = pair.as_handle(),
                _ => {}
            }
        }
        if let Some(position) = base_point.get_point() {
            block.position = position;
        }
        let header_dropped = self.take_dropped();

        loop {
            let Some(pair) = self.next_pair()? else {
                return Err(DxfError::UnterminatedBlock {
                    name: block.name,
                    line,
                });
            };
            if pair.is_marker("ENDBLK") {
                self.skip_record()?;
                self.take_dropped();
                break;
            }
            if pair.is_marker("ENDSEC")
                || pair.is_marker("BLOCK")
                || Self::breaks_section(&pair)
            {
                return Err(DxfError::UnterminatedBlock {
                    name: block.name,
                    line,
                });
            }
            if pair.code != 0 {
                continue;
            }
            if let Some(entity) = self.read_entity(&pair)? {
                block.entities.push(entity);
            }
        }

        if header_dropped {
            self.notify(
                NotificationType::Error,
                line,
                format!("block '{}' dropped", block.name),
            );
            return Ok(None);
        }
        Ok(Some(block))
    }

    /// Read the ENTITIES section
    pub fn read_entities(&mut self) -> Result<bool> {
        while let Some(pair) = self.next_pair()? {
            if pair.is_marker("ENDSEC") {
                return Ok(true);
            }
            if Self::breaks_section(&pair) {
                self.reader.push_back(pair);
                return Ok(false);
            }
            if pair.code != 0 {
                continue;
            }
            if let Some(entity) = self.read_entity(&pair)? {
                self.document.add_entity(entity);
            }
        }
        Ok(false)
    }
}
