use std::io::Cursor;

use cardmat_aruco::{extract, BuiltinDictionary};
use cardmat_print::{scad, write_bundle, MatConfig, MatDocument, PrintError};

#[test]
fn default_config_writes_svg_png_json() {
    let dir = tempfile::tempdir().expect("tempdir");
    let cfg = MatConfig::default();
    let page = cfg.build_page().expect("page");

    let paths = write_bundle(&page, dir.path().join("nested").join("mat"), 150.0).expect("bundle");

    let svg = std::fs::read_to_string(&paths.svg).expect("svg");
    assert!(svg.starts_with("<?xml"));
    assert_eq!(svg.matches("<g id=\"marker-").count(), 4);

    let png_bytes = std::fs::read(&paths.png).expect("png");
    let reader = png::Decoder::new(Cursor::new(png_bytes))
        .read_info()
        .expect("decode png");
    // US Letter at 150 dpi
    assert_eq!((reader.info().width, reader.info().height), (1275, 1650));

    let doc = MatDocument::load_json(&paths.json).expect("json");
    assert_eq!(doc.dictionary, "DICT_ARUCO_MIP_36h12");
    let dict = BuiltinDictionary::aruco_mip_36h12().expect("dict");
    for m in &doc.markers {
        assert_eq!(m.bits, extract(&dict, m.id).expect("bits"));
    }
}

#[test]
fn a4_page_fits_standard_card() {
    let cfg: MatConfig = serde_json::from_str(r#"{"page":{"width_mm":210,"height_mm":297}}"#)
        .expect("json");
    assert!(cfg.build_page().is_ok());
}

#[test]
fn oversized_card_is_rejected() {
    let cfg: MatConfig = serde_json::from_str(
        r#"{"layout":{"card_width_mm":63.5,"card_height_mm":250,"marker_size_mm":20,"gap_mm":10}}"#,
    )
    .expect("json");
    assert!(matches!(cfg.build_page(), Err(PrintError::PageOverflow { .. })));
}

#[test]
fn scad_table_for_mat_markers() {
    let dict = BuiltinDictionary::aruco_mip_36h12().expect("dict");
    let text = scad::generate_mat(&dict).expect("scad");
    assert!(text.contains(scad::LEGEND));
    assert!(text.contains("function get_marker_bits(id) ="));
    for id in 0..4 {
        assert!(text.contains(&format!("(id == {id}) ? [")));
    }
    // 4 markers x 6 rows
    let rows = text
        .lines()
        .filter(|l| l.trim_start().starts_with('[') && l.contains(','))
        .count();
    assert_eq!(rows, 24);
    assert!(text.trim_end().ends_with("undef;"));
}
