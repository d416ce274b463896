//! Integration tests for DXF reading

mod common;

use common::builders::{entities_only, DxfBuilder};
use dxf_flatten::entities::{EntityKind, EntityType};
use dxf_flatten::io::dxf::DxfReaderConfiguration;
use dxf_flatten::notification::NotificationType;
use dxf_flatten::statistics::{ParseContext, ParseOutcome};
use dxf_flatten::{DistanceUnit, DocumentPhase, DxfError, DxfReader, Vector2};
use std::io::Cursor;

fn polyline(handle: Option<&str>) -> Vec<(i32, String)> {
    let mut pairs = vec![(0, "POLYLINE".to_string())];
    if let Some(handle) = handle {
        pairs.push((5, handle.to_string()));
    }
    pairs.extend([(8, "0".to_string()), (66, "1".to_string()), (70, "0".to_string())]);
    pairs
}

fn vertex(owner: Option<&str>, x: f64, y: f64) -> Vec<(i32, String)> {
    let mut pairs = vec![(0, "VERTEX".to_string()), (8, "0".to_string())];
    if let Some(owner) = owner {
        pairs.push((330, owner.to_string()));
    }
    pairs.extend([(10, x.to_string()), (20, y.to_string())]);
    pairs
}

fn seqend() -> Vec<(i32, String)> {
    vec![(0, "SEQEND".to_string()), (8, "0".to_string())]
}

fn with_records(b: DxfBuilder, records: Vec<Vec<(i32, String)>>) -> DxfBuilder {
    records
        .into_iter()
        .flatten()
        .fold(b, |b, (code, value)| b.pair(code, value))
}

fn poly_vertex_count(entity: &EntityType) -> usize {
    match entity {
        EntityType::Polyline(p) => p.poly_vertices.len(),
        other => panic!("expected a polyline, got {:?}", other.kind()),
    }
}

/// Test that DxfReader can be created from a non-existent file (should error)
#[test]
fn test_dxf_reader_from_nonexistent_file() {
    let result = DxfReader::from_file("nonexistent.dxf");
    assert!(result.is_err(), "Should fail to open non-existent file");
}

#[test]
fn test_read_complete_drawing() -> anyhow::Result<()> {
    let text = DxfBuilder::new()
        .section("HEADER")
        .pair(9, "$ACADVER")
        .pair(1, "AC1015")
        .header_f64("$LTSCALE", 40, 0.5)
        .pair(9, "$INSUNITS")
        .pair(70, 6)
        .header_str("$DIMBLK", "_Oblique")
        .end_section()
        .section("CLASSES")
        .pair(0, "CLASS")
        .pair(1, "ACDBDICTIONARYWDFLT")
        .end_section()
        .section("TABLES")
        .table("LTYPE")
        .line_type("DASHED", "- - -", &[0.5, -0.25])
        .end_table()
        .table("LAYER")
        .layer("0", 7, "CONTINUOUS")
        .layer("Walls", 3, "DASHED")
        .end_table()
        .end_section()
        .section("BLOCKS")
        .block("Door")
        .line("0", None, (0.0, 0.0), (1.0, 0.0))
        .end_block()
        .block("_Oblique")
        .line("0", Some(1), (-0.5, -0.5), (0.5, 0.5))
        .end_block()
        .end_section()
        .section("ENTITIES")
        .line("Walls", None, (0.0, 0.0), (10.0, 0.0))
        .insert("Door", None, (5.0, 0.0), 1.0)
        .circle("0", (2.0, 2.0), 1.0)
        .end_section()
        .section("OBJECTS")
        .pair(0, "DICTIONARY")
        .pair(5, "C")
        .end_section()
        .build();

    let doc = common::read(&text)?;

    assert_eq!(doc.phase(), DocumentPhase::Flattening);
    assert_eq!(doc.line_type_scale(), 0.5);
    assert_eq!(doc.distance_unit(), DistanceUnit::Meters);
    assert_eq!(doc.arrow_blocks(), &["_Oblique"]);

    assert_eq!(doc.layer_names().collect::<Vec<_>>(), vec!["0", "Walls"]);
    assert_eq!(doc.layer("WALLS").line_type, "DASHED");
    assert_eq!(doc.line_type("dashed").elements, vec![0.5, -0.25]);

    let names: Vec<&str> = doc.block_names().collect();
    assert_eq!(names, vec!["*MODEL_SPACE", "*PAPER_SPACE", "Door", "_Oblique"]);
    assert_eq!(doc.model_space().unwrap().entities().len(), 3);
    assert_eq!(doc.block("door").unwrap().entities().len(), 1);
    assert!(doc.block("_OBLIQUE").unwrap().property_override.is_some());
    assert!(doc.block("Door").unwrap().property_override.is_none());

    assert_eq!(doc.entity_count(), 5);
    assert_eq!(doc.statistics.total(ParseContext::ModelSpace, ParseOutcome::Read), 3);
    assert_eq!(doc.statistics.total(ParseContext::Block, ParseOutcome::Read), 2);
    assert!(doc.notifications.is_empty());
    Ok(())
}

#[test]
fn test_legacy_vertices_attach_to_last_added_container() -> anyhow::Result<()> {
    let b = DxfBuilder::new().section("ENTITIES");
    let b = with_records(
        b,
        vec![
            polyline(None),
            vertex(None, 0.0, 0.0),
            vertex(None, 1.0, 0.0),
            vertex(None, 1.0, 1.0),
            seqend(),
            polyline(None),
            vertex(None, 5.0, 5.0),
            vertex(None, 6.0, 5.0),
            seqend(),
        ],
    );
    let doc = common::read(&b.end_section().build())?;

    let counts: Vec<usize> = doc
        .block_entities(doc.model_space().unwrap())
        .map(|(_, e)| poly_vertex_count(e))
        .collect();
    assert_eq!(counts, vec![3, 2]);
    assert_eq!(doc.statistics.count_for_kind(EntityKind::Vertex, ParseContext::ModelSpace, ParseOutcome::Read), 5);
    Ok(())
}

#[test]
fn test_owner_handle_wins_over_last_added() -> anyhow::Result<()> {
    let b = DxfBuilder::new().section("ENTITIES");
    let b = with_records(
        b,
        vec![
            polyline(Some("1A")),
            vertex(Some("1A"), 0.0, 0.0),
            polyline(Some("1B")),
            vertex(Some("1A"), 1.0, 0.0),
            vertex(Some("FF"), 2.0, 0.0),
            vertex(None, 3.0, 0.0),
        ],
    );
    let doc = common::read(&b.end_section().build())?;

    assert_eq!(poly_vertex_count(doc.entity_by_handle("1A").unwrap()), 2);
    assert_eq!(poly_vertex_count(doc.entity_by_handle("1B").unwrap()), 1);
    assert_eq!(doc.handle_count(), 2);
    assert!(doc.notifications.has_type(NotificationType::Warning));
    Ok(())
}

#[test]
fn test_malformed_stream_reports_line() {
    let text = "  0\nSECTION\n  2\nENTITIES\n  0\nLINE\n  8\n0\nten\n1.0\n";
    let err = common::read(text).unwrap_err();
    match err.downcast_ref::<DxfError>() {
        Some(DxfError::MalformedStream { line }) => assert_eq!(*line, 9),
        other => panic!("unexpected error {other:?}"),
    }
}

#[test]
fn test_unsupported_kinds_are_counted_not_built() -> anyhow::Result<()> {
    let text = entities_only(|b| {
        b.pairs(&[(0, "MTEXT"), (5, "2F"), (8, "0"), (1, "hello")])
            .pairs(&[(0, "HATCH"), (5, "30"), (8, "0"), (67, "1")])
            .line("0", None, (0.0, 0.0), (1.0, 1.0))
    });
    let doc = common::read(&text)?;

    assert_eq!(doc.entity_count(), 1);
    assert!(doc.entity_by_handle("2F").is_none());
    assert_eq!(doc.handle_count(), 0);
    assert_eq!(doc.statistics.total(ParseContext::ModelSpace, ParseOutcome::Unsupported), 1);
    assert_eq!(doc.statistics.total(ParseContext::PaperSpace, ParseOutcome::Unsupported), 1);
    Ok(())
}

#[test]
fn test_paper_space_configuration() -> anyhow::Result<()> {
    let text = entities_only(|b| {
        b.line("0", None, (0.0, 0.0), (1.0, 0.0))
            .pairs(&[(0, "CIRCLE"), (67, "1"), (8, "0"), (40, "2")])
    });

    let doc = common::read(&text)?;
    assert!(doc.paper_space().unwrap().is_empty());
    assert_eq!(doc.statistics.total(ParseContext::PaperSpace, ParseOutcome::Ignored), 1);

    let config = DxfReaderConfiguration {
        ignore_paper_space: false,
        ..Default::default()
    };
    let doc = common::read_with(&text, config)?;
    assert_eq!(doc.paper_space().unwrap().entities().len(), 1);
    assert_eq!(doc.model_space().unwrap().entities().len(), 1);
    Ok(())
}

#[test]
fn test_truncated_file_keeps_what_was_read() -> anyhow::Result<()> {
    let text = DxfBuilder::new()
        .section("ENTITIES")
        .line("0", None, (0.0, 0.0), (1.0, 0.0))
        .partial();
    let doc = common::read(&text)?;

    assert_eq!(doc.entity_count(), 1);
    assert!(doc.notifications.has_type(NotificationType::Warning));
    Ok(())
}

#[test]
fn test_header_limits() -> anyhow::Result<()> {
    let text = DxfBuilder::new()
        .section("HEADER")
        .pair(9, "$LIMMIN")
        .pair(10, 0.0)
        .pair(20, 0.0)
        .pair(9, "$LIMMAX")
        .pair(10, 420.0)
        .pair(20, 297.0)
        .pair(9, "$LTSCALE")
        .pair(40, "wide")
        .end_section()
        .build();
    let doc = common::read(&text)?;

    assert_eq!(doc.limits(), (Vector2::ZERO, Vector2::new(420.0, 297.0)));
    assert_eq!(doc.line_type_scale(), 1.0);
    assert!(doc.notifications.has_type(NotificationType::Warning));
    Ok(())
}

#[test]
fn test_read_document_convenience() -> anyhow::Result<()> {
    let text = entities_only(|b| b.circle("0", (0.0, 0.0), 1.0));
    let doc = dxf_flatten::read_document(Cursor::new(text.into_bytes()))?;
    assert_eq!(doc.entity_count(), 1);
    Ok(())
}
