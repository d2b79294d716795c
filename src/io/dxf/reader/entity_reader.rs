//! Entity record readers
//!
//! Each reader folds the fields of one `(0, TYPE)` record range into its
//! entity. Scalar fields keep the last value written. Point groups are
//! collected per group code and picked up once the range ends.

use super::section_reader::SectionReader;
use super::stream_reader::{DxfCodePair, DxfStreamReader, PointReader};
use crate::entities::*;
use crate::error::Result;
use crate::io::dxf::GroupCodeValueType;
use crate::notification::NotificationType;
use crate::types::{aci_to_rgb, LineWeight, Vector3};

/// Points of one record, keyed by their X group code
#[derive(Debug, Default)]
struct PointSet {
    groups: Vec<(i32, PointReader)>,
}

impl PointSet {
    /// Record a coordinate; returns `false` for non-coordinate codes
    fn add(&mut self, pair: &DxfCodePair) -> bool {
        let Some(group) = GroupCodeValueType::coordinate_group(pair.code) else {
            return false;
        };
        match self.groups.iter_mut().find(|(g, _)| *g == group) {
            Some((_, reader)) => reader.add_coordinate(pair),
            None => {
                let mut reader = PointReader::new();
                let added = reader.add_coordinate(pair);
                self.groups.push((group, reader));
                added
            }
        }
    }

    fn get(&self, group: i32) -> Option<Vector3> {
        self.groups
            .iter()
            .find(|(g, _)| *g == group)
            .and_then(|(_, reader)| reader.get_point())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum VertexState {
    /// No code 10 seen since the last flush
    Idle,
    /// Collecting the fields of the vertex opened by the last code 10
    Open(LwVertex),
}

/// Groups LWPOLYLINE vertex fields by code repetition
///
/// Code 10 closes the open vertex and opens a new one; codes 20, 30, 40,
/// 41 and 42 belong to the open vertex and are ignored while idle.
#[derive(Debug)]
pub(crate) struct VertexAccumulator {
    state: VertexState,
    vertices: Vec<LwVertex>,
}

impl VertexAccumulator {
    pub(crate) fn new() -> Self {
        Self {
            state: VertexState::Idle,
            vertices: Vec::new(),
        }
    }

    /// Feed one vertex field; returns whether the code is a vertex code
    pub(crate) fn feed(&mut self, code: i32, value: f64) -> bool {
        if code == 10 {
            self.flush();
            self.state = VertexState::Open(LwVertex::new(value, 0.0));
            return true;
        }
        if !matches!(code, 20 | 30 | 40 | 41 | 42) {
            return false;
        }
        if let VertexState::Open(vertex) = &mut self.state {
            match code {
                20 => vertex.location.y = value,
                30 => vertex.location.z = value,
                40 => vertex.start_width = Some(value),
                41 => vertex.end_width = Some(value),
                _ => vertex.bulge = Some(value),
            }
        }
        true
    }

    fn flush(&mut self) {
        if let VertexState::Open(vertex) = std::mem::replace(&mut self.state, VertexState::Idle) {
            self.vertices.push(vertex);
        }
    }

    /// Close the open vertex and return all vertices in order
    pub(crate) fn finish(mut self) -> Vec<LwVertex> {
        self.flush();
        self.vertices
    }
}

/// Apply a field shared by all entities; returns `false` if the code is not one
fn apply_common(common: &mut EntityCommon, pair: &DxfCodePair) -> bool {
    match pair.code {
        5 => common.handle = pair.as_handle(),
        6 => common.line_type = Some(pair.value_string()),
        8 => common.layer = pair.value_string(),
        48 => common.line_type_scale = pair.as_double(),
        60 => common.visible = pair.as_int().map(|v| v == 0),
        62 => {
            if let Some(index) = pair.as_i16() {
                common.color_index = Some(index);
                common.color = aci_to_rgb(index.saturating_abs());
            }
        }
        67 => common.in_paper_space = pair.as_int().map(|v| v != 0),
        330 => common.owner_handle = pair.as_handle(),
        347 => common.material_object_handle = pair.as_handle(),
        370 => {
            if let Some(value) = pair.as_i16() {
                common.lineweight = LineWeight::from_value(value);
            }
        }
        420 => {
            if let Some(value) = pair.as_int() {
                common.color = Some((value & 0xFF_FFFF) as u32);
            }
        }
        _ => return false,
    }
    true
}

impl<R: DxfStreamReader> SectionReader<'_, R> {
    /// Read one entity range starting at its `(0, TYPE)` marker
    ///
    /// Returns `None` when the type is not modelled or the range lost a
    /// malformed record; both leave a notification.
    pub fn read_entity(&mut self, marker: &DxfCodePair) -> Result<Option<EntityType>> {
        self.begin_range();
        let type_name = marker.as_str().map(str::trim).unwrap_or_default();

        let entity = match type_name {
            "LINE" => Some(EntityType::Line(self.read_line()?)),
            "LWPOLYLINE" => Some(EntityType::LwPolyline(self.read_lwpolyline()?)),
            "POLYLINE" => Some(EntityType::Polyline(self.read_polyline()?)),
            "CIRCLE" | "ARC" => {
                let circle = self.read_circle()?;
                if type_name == "ARC" || circle.is_arc() {
                    Some(EntityType::Arc(circle))
                } else {
                    Some(EntityType::Circle(circle))
                }
            }
            "TEXT" => Some(EntityType::Text(self.read_text()?)),
            "MTEXT" => Some(EntityType::MText(self.read_mtext()?)),
            "ATTDEF" => Some(EntityType::AttributeDefinition(self.read_attdef()?)),
            "DIMENSION" => Some(EntityType::Dimension(self.read_dimension()?)),
            "SOLID" => Some(EntityType::Solid(self.read_solid()?)),
            "INSERT" => Some(EntityType::Insert(self.read_insert()?)),
            "POINT" => Some(EntityType::Point(self.read_point()?)),
            "SEQEND" | "VERTEX" | "ATTRIB" => {
                self.skip_record()?;
                self.notify(
                    NotificationType::Warning,
                    marker.line,
                    format!("stray {} record skipped", type_name),
                );
                None
            }
            other => {
                self.skip_record()?;
                self.notify(
                    NotificationType::NotImplemented,
                    marker.line,
                    format!("entity type {} not supported", other),
                );
                None
            }
        };

        if self.take_dropped() {
            self.notify(
                NotificationType::Error,
                marker.line,
                format!("{} entity dropped after a malformed record", type_name),
            );
            return Ok(None);
        }
        Ok(entity)
    }

    /// Read a POINT entity
    fn read_point(&mut self) -> Result<Point> {
        let mut point = Point::new();
        let mut points = PointSet::default();

        while let Some(pair) = self.next_field()? {
            if apply_common(&mut point.common, &pair) {
                continue;
            }
            match pair.code {
                39 => point.thickness = pair.as_double(),
                _ => {
                    points.add(&pair);
                }
            }
        }

        if let Some(position) = points.get(10) {
            point.position = position;
        }
        point.extrusion_direction = points.get(210);
        Ok(point)
    }

    /// Read a LINE entity
    fn read_line(&mut self) -> Result<Line> {
        let mut line = Line::new();
        let mut points = PointSet::default();

        while let Some(pair) = self.next_field()? {
            if !apply_common(&mut line.common, &pair) {
                points.add(&pair);
            }
        }

        line.vertices = [10, 11].iter().filter_map(|&g| points.get(g)).collect();
        line.extrusion_direction = points.get(210);
        Ok(line)
    }

    /// Read a CIRCLE or ARC entity
    fn read_circle(&mut self) -> Result<Circle> {
        let mut circle = Circle::new();
        let mut points = PointSet::default();

        while let Some(pair) = self.next_field()? {
            if apply_common(&mut circle.common, &pair) {
                continue;
            }
            match pair.code {
                39 => circle.thickness = pair.as_double(),
                40 => {
                    if let Some(radius) = pair.as_double() {
                        circle.radius = radius;
                    }
                }
                50 => circle.start_angle = pair.as_double().map(f64::to_radians),
                51 => circle.end_angle = pair.as_double().map(f64::to_radians),
                _ => {
                    points.add(&pair);
                }
            }
        }

        if let Some(center) = points.get(10) {
            circle.center = center;
        }
        circle.extrusion_direction = points.get(210);
        circle.update_angle_length();
        Ok(circle)
    }

    /// Read an LWPOLYLINE entity
    fn read_lwpolyline(&mut self) -> Result<LwPolyline> {
        let mut lwpolyline = LwPolyline::new();
        let mut vertices = VertexAccumulator::new();
        let mut points = PointSet::default();

        while let Some(pair) = self.next_field()? {
            if apply_common(&mut lwpolyline.common, &pair) {
                continue;
            }
            match pair.code {
                10 | 20 | 30 | 40 | 41 | 42 => {
                    if let Some(value) = pair.as_double() {
                        vertices.feed(pair.code, value);
                    }
                }
                38 => lwpolyline.elevation = pair.as_double(),
                39 => lwpolyline.depth = pair.as_double(),
                43 => lwpolyline.width = pair.as_double(),
                70 => {
                    if let Some(flags) = pair.as_i16() {
                        lwpolyline.flags = LwPolylineFlags::from_bits(flags);
                    }
                }
                90 => lwpolyline.number_of_vertices = pair.as_i32(),
                _ => {
                    points.add(&pair);
                }
            }
        }

        lwpolyline.vertices = vertices.finish();
        lwpolyline.extrusion_direction = points.get(210);
        Ok(lwpolyline)
    }

    /// Read a POLYLINE entity with its VERTEX records and SEQEND
    fn read_polyline(&mut self) -> Result<Polyline> {
        let mut polyline = Polyline::new();
        let mut points = PointSet::default();

        while let Some(pair) = self.next_field()? {
            if apply_common(&mut polyline.common, &pair) {
                continue;
            }
            match pair.code {
                39 => polyline.thickness = pair.as_double(),
                70 => {
                    if let Some(flags) = pair.as_i16() {
                        polyline.flags = PolylineFlags::from_bits(flags);
                    }
                }
                // The 10/20/30 "dummy point" only carries the elevation
                _ => {
                    points.add(&pair);
                }
            }
        }
        polyline.extrusion_direction = points.get(210);

        while let Some(pair) = self.next_pair()? {
            if pair.is_marker("VERTEX") {
                polyline.vertices.push(self.read_vertex()?);
            } else if pair.is_marker("SEQEND") {
                self.skip_record()?;
                break;
            } else {
                // Missing SEQEND: the next record belongs to someone else
                self.reader.push_back(pair);
                break;
            }
        }

        Ok(polyline)
    }

    /// Read a VERTEX record of a POLYLINE
    fn read_vertex(&mut self) -> Result<Vertex> {
        let mut vertex = Vertex::new(Vector3::ZERO);
        let mut location = PointReader::new();

        while let Some(pair) = self.next_field()? {
            if apply_common(&mut vertex.common, &pair) {
                continue;
            }
            match pair.code {
                10 | 20 | 30 => {
                    location.add_coordinate(&pair);
                }
                40 => vertex.start_width = pair.as_double(),
                41 => vertex.end_width = pair.as_double(),
                42 => vertex.bulge = pair.as_double(),
                70 => {
                    if let Some(flags) = pair.as_i16() {
                        vertex.flags = VertexFlags::from_bits(flags);
                    }
                }
                _ => {}
            }
        }

        if let Some(point) = location.get_point() {
            vertex.location = point;
        }
        Ok(vertex)
    }

    /// Read a TEXT entity
    fn read_text(&mut self) -> Result<Text> {
        let mut text = Text::new();
        let mut points = PointSet::default();

        while let Some(pair) = self.next_field()? {
            if apply_common(&mut text.common, &pair) {
                continue;
            }
            match pair.code {
                1 => text.text = pair.value_string(),
                40 => text.text_height = pair.as_double(),
                41 => text.x_scale = pair.as_double(),
                50 => text.rotation = pair.as_double(),
                72 => {
                    if let Some(align) = pair.as_i16() {
                        text.halign = align;
                    }
                }
                73 => {
                    if let Some(align) = pair.as_i16() {
                        text.valign = align;
                    }
                }
                _ => {
                    points.add(&pair);
                }
            }
        }

        if let Some(start) = points.get(10) {
            text.start_point = start;
        }
        text.end_point = points.get(11);
        Ok(text)
    }

    /// Read an MTEXT entity
    fn read_mtext(&mut self) -> Result<MText> {
        let mut mtext = MText::new();
        let mut points = PointSet::default();

        while let Some(pair) = self.next_field()? {
            if apply_common(&mut mtext.common, &pair) {
                continue;
            }
            match pair.code {
                1 | 3 => mtext.text.push_str(&pair.value_string()),
                7 => mtext.text_style = pair.value_string(),
                40 => {
                    if let Some(height) = pair.as_double() {
                        mtext.height = height;
                    }
                }
                41 => {
                    if let Some(width) = pair.as_double() {
                        mtext.width = width;
                    }
                }
                50 => {
                    if let Some(rotation) = pair.as_double() {
                        mtext.rotation = rotation;
                    }
                }
                71 => {
                    if let Some(attachment) = pair.as_i16() {
                        mtext.attachment_point = attachment;
                    }
                }
                72 => {
                    if let Some(direction) = pair.as_i16() {
                        mtext.drawing_direction = direction;
                    }
                }
                _ => {
                    points.add(&pair);
                }
            }
        }

        if let Some(position) = points.get(10) {
            mtext.position = position;
        }
        if let Some(direction) = points.get(11) {
            mtext.x_axis_direction = direction;
        }
        Ok(mtext)
    }

    /// Read an ATTDEF entity
    fn read_attdef(&mut self) -> Result<AttributeDefinition> {
        let mut attdef = AttributeDefinition::new();
        let mut location = PointReader::new();

        while let Some(pair) = self.next_field()? {
            if apply_common(&mut attdef.common, &pair) {
                continue;
            }
            match pair.code {
                1 => attdef.text = pair.value_string(),
                2 => attdef.tag = pair.value_string(),
                3 => attdef.prompt = pair.value_string(),
                7 => attdef.text_style = pair.value_string(),
                10 | 20 | 30 => {
                    location.add_coordinate(&pair);
                }
                39 => attdef.thickness = pair.as_double(),
                40 => attdef.text_height = pair.as_double(),
                41 => {
                    if let Some(scale) = pair.as_double() {
                        attdef.scale = scale;
                    }
                }
                50 => attdef.rotation = pair.as_double(),
                51 => attdef.oblique_angle = pair.as_double(),
                70 => {
                    if let Some(flags) = pair.as_i16() {
                        attdef.flags = AttributeFlags::from_bits(flags);
                    }
                }
                71 => {
                    if let Some(flags) = pair.as_i16() {
                        attdef.generation = TextGenerationFlags::from_bits(flags);
                    }
                }
                72 => attdef.horizontal_justification = pair.as_i16(),
                73 => attdef.field_length = pair.as_i16(),
                74 => attdef.vertical_justification = pair.as_i16(),
                210 => attdef.extrusion_direction_x = pair.as_double(),
                220 => attdef.extrusion_direction_y = pair.as_double(),
                230 => attdef.extrusion_direction_z = pair.as_double(),
                _ => {}
            }
        }

        if let Some(point) = location.get_point() {
            attdef.location = point;
        }
        Ok(attdef)
    }

    /// Read a DIMENSION entity
    fn read_dimension(&mut self) -> Result<Dimension> {
        let mut dimension = Dimension::new();
        let mut points = PointSet::default();

        while let Some(pair) = self.next_field()? {
            if apply_common(&mut dimension.common, &pair) {
                continue;
            }
            match pair.code {
                1 => dimension.text = Some(pair.value_string()),
                2 => dimension.block = pair.value_string(),
                42 => {
                    if let Some(measurement) = pair.as_double() {
                        dimension.actual_measurement = measurement;
                    }
                }
                50 => dimension.angle = pair.as_double(),
                70 => dimension.dimension_type = pair.as_i16(),
                71 => {
                    if let Some(attachment) = pair.as_i16() {
                        dimension.attachment_point = attachment;
                    }
                }
                _ => {
                    points.add(&pair);
                }
            }
        }

        if let Some(anchor) = points.get(10) {
            dimension.anchor_point = anchor;
        }
        if let Some(middle) = points.get(11) {
            dimension.middle_of_text = middle;
        }
        dimension.insertion_point = points.get(12);
        dimension.linear_or_angular_point1 = points.get(13);
        dimension.linear_or_angular_point2 = points.get(14);
        dimension.diameter_or_radius_point = points.get(15);
        dimension.arc_point = points.get(16);
        Ok(dimension)
    }

    /// Read a SOLID entity
    fn read_solid(&mut self) -> Result<Solid> {
        let mut solid = Solid::new();
        let mut points = PointSet::default();

        while let Some(pair) = self.next_field()? {
            if !apply_common(&mut solid.common, &pair) {
                points.add(&pair);
            }
        }

        solid.points = (10..=13).filter_map(|g| points.get(g)).collect();
        solid.extrusion_direction = points.get(210);
        Ok(solid)
    }

    /// Read an INSERT entity, absorbing any ATTRIB records that follow it
    fn read_insert(&mut self) -> Result<Insert> {
        let mut insert = Insert::new("");
        let mut points = PointSet::default();
        let mut attributes_follow = false;

        while let Some(pair) = self.next_field()? {
            if apply_common(&mut insert.common, &pair) {
                continue;
            }
            match pair.code {
                2 => insert.name = pair.value_string(),
                41 => insert.x_scale = pair.as_double(),
                42 => insert.y_scale = pair.as_double(),
                43 => insert.z_scale = pair.as_double(),
                44 => insert.column_spacing = pair.as_double(),
                45 => insert.row_spacing = pair.as_double(),
                50 => insert.rotation = pair.as_double(),
                66 => attributes_follow = pair.as_int().is_some_and(|v| v != 0),
                70 => insert.column_count = pair.as_i16(),
                71 => insert.row_count = pair.as_i16(),
                _ => {
                    points.add(&pair);
                }
            }
        }

        if let Some(position) = points.get(10) {
            insert.position = position;
        }
        insert.extrusion_direction = points.get(210);

        if attributes_follow {
            while let Some(pair) = self.next_pair()? {
                if pair.is_marker("ATTRIB") {
                    self.skip_record()?;
                } else if pair.is_marker("SEQEND") {
                    self.skip_record()?;
                    break;
                } else {
                    self.reader.push_back(pair);
                    break;
                }
            }
        }

        Ok(insert)
    }
}
