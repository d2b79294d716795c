//! Integration tests for reading DXF documents
//!
//! Each test builds a small DXF text in memory and checks the resulting
//! document, its notifications, or the fatal error.

mod common;

use common::{entities_document, entity_type_histogram, parse_ok, parse_strict, to_json, DxfText};
use dxfdoc::entities::EntityType;
use dxfdoc::{DxfError, Handle, HeaderValue, NotificationType, ObjectRef, Vector3};

/// A complete drawing with header, tables, one block and model space entities
fn sample_drawing() -> String {
    DxfText::new()
        .section("HEADER")
        .pair(9, "$ACADVER")
        .pair(1, "AC1015")
        .pair(9, "$INSBASE")
        .point(10, 0.0, 0.0, 0.0)
        .pair(9, "$LTSCALE")
        .pair(40, 2.5)
        .end_section()
        .section("TABLES")
        .table("LTYPE")
        .marker("LTYPE")
        .pair(5, "14")
        .pair(2, "DASHED")
        .pair(3, "Dashed __ __ __")
        .pair(73, 2)
        .pair(40, 0.75)
        .pair(49, 0.5)
        .pair(49, -0.25)
        .end_table()
        .table("LAYER")
        .marker("LAYER")
        .pair(2, "0")
        .pair(70, 0)
        .pair(62, 7)
        .marker("LAYER")
        .pair(2, "Doors")
        .pair(70, 4)
        .pair(62, 3)
        .pair(6, "DASHED")
        .end_table()
        .end_section()
        .section("BLOCKS")
        .marker("BLOCK")
        .pair(5, "20")
        .pair(8, "0")
        .pair(2, "Door")
        .pair(70, 0)
        .point(10, 0.0, 0.0, 0.0)
        .pair(3, "Door")
        .marker("LINE")
        .pair(5, "21")
        .pair(330, "20")
        .pair(8, "Doors")
        .point(10, 0.0, 0.0, 0.0)
        .point(11, 0.0, 1.0, 0.0)
        .marker("ARC")
        .pair(5, "22")
        .pair(330, "20")
        .pair(8, "Doors")
        .point(10, 0.0, 0.0, 0.0)
        .pair(40, 1.0)
        .pair(50, 0.0)
        .pair(51, 90.0)
        .marker("ENDBLK")
        .pair(5, "23")
        .end_section()
        .section("ENTITIES")
        .marker("INSERT")
        .pair(5, "30")
        .pair(8, "Doors")
        .pair(2, "Door")
        .point(10, 5.0, 5.0, 0.0)
        .marker("INSERT")
        .pair(5, "31")
        .pair(2, "Window")
        .point(10, 1.0, 1.0, 0.0)
        .marker("TEXT")
        .pair(5, "32")
        .point(10, 1.0, 2.0, 0.0)
        .pair(40, 0.5)
        .pair(50, 90.0)
        .pair(1, "Entrance")
        .marker("MTEXT")
        .pair(5, "33")
        .point(10, 3.0, 3.0, 0.0)
        .pair(40, 0.25)
        .pair(50, 1.5707963267948966)
        .pair(3, "First part, ")
        .pair(1, "second part")
        .end_section()
        .eof()
        .build()
}

// ===========================================================================
// Examples from the format description
// ===========================================================================

/// Single LINE in ENTITIES serializes to type, layer and both vertices
#[test]
fn test_line_example() {
    let source = DxfText::new()
        .section("ENTITIES")
        .marker("LINE")
        .pair(8, "0")
        .point(10, 0.0, 0.0, 0.0)
        .point(11, 5.0, 0.0, 0.0)
        .end_section()
        .build();
    let doc = parse_ok(&source);

    assert_eq!(doc.entities().len(), 1);
    let json = to_json(&doc);
    let line = &json["entities"][0];
    assert_eq!(line["type"], "LINE");
    assert_eq!(line["layer"], "0");
    assert_eq!(
        line["vertices"],
        serde_json::json!([{"x": 0.0, "y": 0.0, "z": 0.0}, {"x": 5.0, "y": 0.0, "z": 0.0}])
    );
}

/// Negative layer color means the layer is switched off
#[test]
fn test_layer_example() {
    let source = DxfText::new()
        .section("TABLES")
        .table("LAYER")
        .marker("LAYER")
        .pair(2, "Walls")
        .pair(70, 0)
        .pair(62, -7)
        .end_table()
        .end_section()
        .eof()
        .build();
    let doc = parse_ok(&source);

    let walls = doc.layers().get("Walls").expect("Walls layer");
    assert_eq!(walls.color, -7);
    assert!(!walls.visible);
    assert_eq!(
        to_json(&doc)["tables"]["layer"]["layers"]["Walls"],
        serde_json::json!({"name": "Walls", "flags": 0, "color": -7, "visible": false})
    );
}

/// An unsupported entity type is dropped without disturbing its neighbours
#[test]
fn test_unsupported_entity_isolation() {
    let source = entities_document(
        DxfText::new()
            .marker("LINE")
            .point(10, 0.0, 0.0, 0.0)
            .point(11, 1.0, 0.0, 0.0)
            .marker("UNSUPPORTED_X")
            .pair(8, "0")
            .point(10, 9.0, 9.0, 9.0)
            .pair(1, "ignored")
            .marker("CIRCLE")
            .point(10, 2.0, 2.0, 0.0)
            .pair(40, 3.0),
    );
    let doc = parse_ok(&source);

    let names: Vec<_> = doc.entities().iter().map(|e| e.type_name()).collect();
    assert_eq!(names, ["LINE", "CIRCLE"]);
    let EntityType::Circle(circle) = &doc.entities()[1] else {
        panic!("expected circle");
    };
    assert_eq!(circle.center, Vector3::new(2.0, 2.0, 0.0));
    assert_eq!(circle.radius, 3.0);

    let skipped = doc.notifications().of_type(NotificationType::NotImplemented);
    assert_eq!(skipped.len(), 1);
    assert!(skipped[0].message.contains("UNSUPPORTED_X"));
}

/// A BLOCK without ENDBLK is an error, not a silently closed block
#[test]
fn test_missing_endblk() {
    let source = DxfText::new()
        .section("BLOCKS")
        .marker("BLOCK")
        .pair(2, "Open")
        .point(10, 0.0, 0.0, 0.0)
        .marker("LINE")
        .point(10, 0.0, 0.0, 0.0)
        .point(11, 1.0, 1.0, 0.0)
        .build();

    let err = dxfdoc::parse(&source).unwrap_err();
    assert_eq!(
        err,
        DxfError::UnterminatedBlock {
            name: "Open".to_string(),
            line: 5
        }
    );
}

// ===========================================================================
// Whole documents
// ===========================================================================

/// All sections of a small drawing end up in the document
#[test]
fn test_sample_drawing() {
    let doc = parse_ok(&sample_drawing());

    assert_eq!(doc.header_value("ACADVER").and_then(HeaderValue::as_str), Some("AC1015"));
    assert_eq!(
        doc.header_value("$INSBASE").and_then(HeaderValue::as_point),
        Some(Vector3::ZERO)
    );
    assert_eq!(doc.header_value("$LTSCALE").and_then(HeaderValue::as_double), Some(2.5));

    assert_eq!(doc.layers().names().collect::<Vec<_>>(), ["0", "Doors"]);
    let doors = doc.layers().get("Doors").expect("Doors layer");
    assert!(doors.is_locked());
    assert!(doors.visible);

    let dashed = doc.tables().line_type.line_types.get("DASHED").expect("DASHED");
    assert_eq!(dashed.pattern, vec![0.5, -0.25]);
    assert_eq!(dashed.pattern_length, Some(0.75));
    assert!(!dashed.is_continuous());

    assert_eq!(doc.blocks().len(), 1);
    let door = &doc.blocks()["Door"];
    assert_eq!(door.entities.len(), 2);
    assert_eq!(door.entities[1].type_name(), "ARC");

    let histogram = entity_type_histogram(doc.entities());
    assert_eq!(histogram.get("INSERT"), Some(&2));
    assert_eq!(histogram.get("TEXT"), Some(&1));
    assert_eq!(histogram.get("MTEXT"), Some(&1));
    assert!(doc.notifications().is_empty());
}

/// Inserts resolve to block definitions on request only
#[test]
fn test_insert_resolves_block() {
    let doc = parse_ok(&sample_drawing());

    let door = &doc.entities()[0];
    let block = doc.block_for(door).expect("Door block is defined");
    assert_eq!(block.name, "Door");

    // Undefined blocks are not a parse error
    let window = &doc.entities()[1];
    assert!(doc.block_for(window).is_none());
    assert!(doc.block_for(&doc.entities()[2]).is_none());
}

/// Handles index top level entities, block entities and block definitions
#[test]
fn test_handle_lookup() {
    let doc = parse_ok(&sample_drawing());

    let text = doc.entity_by_handle(&Handle::new("32")).expect("text by handle");
    assert_eq!(text.type_name(), "TEXT");

    let arc = doc.entity_by_handle(&Handle::new("22")).expect("arc by handle");
    assert_eq!(arc.type_name(), "ARC");
    assert_eq!(doc.owner_of(arc), Some(&ObjectRef::Block("Door".to_string())));

    assert_eq!(
        doc.handles().get(&Handle::new("21")),
        Some(&ObjectRef::Entity {
            block: Some("Door".to_string()),
            index: 0
        })
    );
    assert!(doc.entity_by_handle(&Handle::new("FFFF")).is_none());
}

/// TEXT keeps its rotation in degrees while MTEXT stores radians
#[test]
fn test_text_and_mtext_rotation_units() {
    let doc = parse_ok(&sample_drawing());

    let EntityType::Text(text) = &doc.entities()[2] else {
        panic!("expected text");
    };
    assert_eq!(text.rotation, Some(90.0));
    assert_eq!(text.text, "Entrance");

    let EntityType::MText(mtext) = &doc.entities()[3] else {
        panic!("expected mtext");
    };
    assert!((mtext.rotation - std::f64::consts::FRAC_PI_2).abs() < 1e-12);
    assert_eq!(mtext.text, "First part, second part");
}

/// Serialized documents carry the type tag and camelCase field names
#[test]
fn test_json_shape() {
    let json = to_json(&parse_ok(&sample_drawing()));

    assert_eq!(json["header"]["$ACADVER"], "AC1015");
    assert_eq!(json["blocks"]["Door"]["name"], "Door");
    assert_eq!(json["blocks"]["Door"]["entities"][1]["type"], "ARC");
    assert_eq!(json["entities"][0]["type"], "INSERT");
    assert_eq!(json["entities"][0]["handle"], "30");
    assert_eq!(json["entities"][3]["type"], "MTEXT");
    assert!(json["entities"][3].get("textStyle").is_some());
    assert_eq!(json["tables"]["lineType"]["lineTypes"]["DASHED"]["name"], "DASHED");
}

// ===========================================================================
// Recovery and errors
// ===========================================================================

/// A value that does not fit its group code drops only its own entity
#[test]
fn test_failsafe_drops_malformed_entity() {
    let source = entities_document(
        DxfText::new()
            .marker("POINT")
            .point(10, 1.0, 1.0, 0.0)
            .marker("LINE")
            .pair(10, "abc")
            .pair(20, 0.0)
            .marker("POINT")
            .point(10, 2.0, 2.0, 0.0),
    );
    let doc = parse_ok(&source);

    let names: Vec<_> = doc.entities().iter().map(|e| e.type_name()).collect();
    assert_eq!(names, ["POINT", "POINT"]);
    assert!(doc.notifications().has_type(NotificationType::Error));
    assert!(doc
        .notifications()
        .iter()
        .all(|n| n.notification_type == NotificationType::Error && n.line.is_some()));
}

/// Strict mode turns the first malformed record into the parse result
#[test]
fn test_strict_mode_fails() {
    let source = entities_document(
        DxfText::new()
            .marker("LINE")
            .pair(10, "abc")
            .pair(20, 0.0),
    );
    let err = parse_strict(&source).unwrap_err();
    assert!(matches!(err, DxfError::MalformedRecord { .. }));
    assert!(err.is_recoverable());
}

/// Input that never opens a section is rejected outright
#[test]
fn test_not_dxf() {
    assert!(matches!(
        dxfdoc::parse("just some text\n"),
        Err(DxfError::NotDxf { .. })
    ));
    assert!(matches!(dxfdoc::parse(""), Err(DxfError::NotDxf { line: 0, .. })));
}

/// A TABLE without ENDTAB is an error
#[test]
fn test_missing_endtab() {
    let source = DxfText::new()
        .section("TABLES")
        .table("LAYER")
        .marker("LAYER")
        .pair(2, "Walls")
        .end_section()
        .eof()
        .build();
    let err = dxfdoc::parse(&source).unwrap_err();
    assert!(matches!(err, DxfError::UnterminatedTable { ref name, .. } if name == "LAYER"));
}

/// A SECTION marker before ENDSEC reports the open section as truncated
#[test]
fn test_section_opened_inside_section() {
    let source = DxfText::new()
        .section("ENTITIES")
        .marker("POINT")
        .point(10, 1.0, 1.0, 0.0)
        .section("TABLES")
        .table("LAYER")
        .marker("LAYER")
        .pair(2, "Walls")
        .end_table()
        .end_section()
        .eof()
        .build();

    let err = dxfdoc::parse(&source).unwrap_err();
    assert_eq!(
        err,
        DxfError::UnterminatedSection {
            name: "ENTITIES".to_string(),
            line: 1
        }
    );
}

/// A second BLOCK before ENDBLK is not folded into the open block
#[test]
fn test_block_opened_inside_block() {
    let source = DxfText::new()
        .section("BLOCKS")
        .marker("BLOCK")
        .pair(2, "A")
        .marker("LINE")
        .point(10, 0.0, 0.0, 0.0)
        .point(11, 1.0, 0.0, 0.0)
        .marker("BLOCK")
        .pair(2, "B")
        .marker("CIRCLE")
        .point(10, 0.0, 0.0, 0.0)
        .pair(40, 1.0)
        .marker("ENDBLK")
        .end_section()
        .eof()
        .build();

    let err = dxfdoc::parse(&source).unwrap_err();
    assert_eq!(
        err,
        DxfError::UnterminatedBlock {
            name: "A".to_string(),
            line: 5
        }
    );
}

/// A second TABLE before ENDTAB reports the open table as truncated
#[test]
fn test_table_opened_inside_table() {
    let source = DxfText::new()
        .section("TABLES")
        .table("LTYPE")
        .marker("LTYPE")
        .pair(2, "DASHED")
        .table("LAYER")
        .marker("LAYER")
        .pair(2, "Walls")
        .end_table()
        .end_section()
        .eof()
        .build();

    let err = dxfdoc::parse(&source).unwrap_err();
    assert_eq!(
        err,
        DxfError::UnterminatedTable {
            name: "LTYPE".to_string(),
            line: 5
        }
    );
}

fn layers_with_color(color: &str) -> String {
    DxfText::new()
        .section("TABLES")
        .table("LAYER")
        .marker("LAYER")
        .pair(2, "Walls")
        .pair(62, color)
        .marker("LAYER")
        .pair(2, "Roof")
        .pair(62, 3)
        .end_table()
        .end_section()
        .eof()
        .build()
}

/// A 16-bit value out of range drops its layer instead of using defaults
#[test]
fn test_out_of_range_color_drops_layer() {
    let doc = parse_ok(&layers_with_color("-40000"));

    assert!(!doc.layers().contains("Walls"));
    assert_eq!(doc.layers().get("Roof").map(|l| l.color), Some(3));
    let errors = doc.notifications().of_type(NotificationType::Error);
    assert_eq!(errors.len(), 2);
    assert_eq!(errors[0].line, Some(14));
}

/// In strict mode the out-of-range value is the parse error
#[test]
fn test_out_of_range_color_strict() {
    let err = parse_strict(&layers_with_color("-40000")).unwrap_err();
    assert!(matches!(err, DxfError::MalformedRecord { line: 14, .. }));
    assert!(parse_strict(&layers_with_color("-7")).is_ok());
}

/// Stray records between sections only produce warnings
#[test]
fn test_records_outside_sections() {
    let source = DxfText::new()
        .marker("LINE")
        .section("ENTITIES")
        .marker("POINT")
        .point(10, 0.0, 0.0, 0.0)
        .end_section()
        .eof()
        .build();
    let doc = parse_ok(&source);
    assert_eq!(doc.entities().len(), 1);
    assert_eq!(doc.notifications().of_type(NotificationType::Warning).len(), 1);
}

/// Repeated ENTITIES sections append in order
#[test]
fn test_repeated_sections_append() {
    let source = DxfText::new()
        .section("ENTITIES")
        .marker("POINT")
        .point(10, 1.0, 0.0, 0.0)
        .end_section()
        .section("CLASSES")
        .marker("CLASS")
        .pair(1, "ACDBDICTIONARYWDFLT")
        .end_section()
        .section("ENTITIES")
        .marker("LINE")
        .end_section()
        .eof()
        .build();
    let doc = parse_ok(&source);

    let names: Vec<_> = doc.entities().iter().map(|e| e.type_name()).collect();
    assert_eq!(names, ["POINT", "LINE"]);
    assert_eq!(doc.notifications().of_type(NotificationType::NotImplemented).len(), 1);
}

// ===========================================================================
// Byte input and batches
// ===========================================================================

/// Non-UTF-8 bytes without a code page fall back to Windows-1252
#[test]
fn test_parse_bytes_windows_1252() {
    let mut bytes = b"0\nSECTION\n2\nTABLES\n0\nTABLE\n2\nLAYER\n0\nLAYER\n2\nCaf".to_vec();
    bytes.push(0xE9);
    bytes.extend_from_slice(b"\n62\n1\n0\nENDTAB\n0\nENDSEC\n0\nEOF\n");

    let doc = dxfdoc::parse_bytes(&bytes).expect("parses");
    assert!(doc.layers().contains("Café"));
}

/// CRLF line endings and padded codes are accepted
#[test]
fn test_crlf_input() {
    let source = "  0\r\nSECTION\r\n  2\r\nENTITIES\r\n  0\r\nPOINT\r\n 10\r\n1.5\r\n 20\r\n2.5\r\n  0\r\nENDSEC\r\n  0\r\nEOF\r\n";
    let doc = parse_ok(source);
    let EntityType::Point(point) = &doc.entities()[0] else {
        panic!("expected point");
    };
    assert_eq!(point.position.x, 1.5);
    assert_eq!(point.position.y, 2.5);
}

/// Batch parsing keeps input order and isolates failures
#[test]
fn test_parse_many() {
    let good = sample_drawing();
    let results = dxfdoc::parse_many(&[good.as_str(), "nonsense", good.as_str()]);

    assert_eq!(results.len(), 3);
    assert_eq!(results[0].as_ref().map(|d| d.entities().len()).ok(), Some(4));
    assert!(results[1].is_err());
    assert!(results[2].is_ok());
}
