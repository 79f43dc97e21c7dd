//! End-to-end placement over a synthetic two-display board.

use segplace::{PcbError, PlacementConfig, RESISTOR_OFFSETS, place};

fn display_block(reference: &str, at: &str) -> String {
    format!(
        r#"  (footprint "External_Parts:ACPSC04-41SEKWA"
    (layer "F.Cu")
    {at}
    (property "Reference" "{reference}"
      (at 0 -2 0)
    )
  )
"#
    )
}

fn resistor_block(reference: &str, at: &str) -> String {
    format!(
        r#"  (footprint "Resistor_SMD:R_0603_1608Metric"
    (layer "F.Cu")
    {at}
    (property "Reference" "{reference}"
      (at 0 -1.4 0)
    )
  )
"#
    )
}

/// Two displays (listed out of order) and thirty resistors (listed in
/// reverse), every block at a unique original position.
fn two_display_board() -> String {
    let mut doc = String::from("(kicad_pcb\n  (version 20240108)\n  (generator \"pcbnew\")\n");
    doc.push_str(&display_block("SEGD2", "(at 120 50 90)"));
    doc.push_str(&display_block("SEGD1", "(at 100 50)"));
    for i in (1..=30).rev() {
        doc.push_str(&resistor_block(&format!("R{i}"), &format!("(at {} 80)", 10 + i)));
    }
    doc.push_str(")\n");
    doc
}

#[test]
fn places_displays_on_the_grid_row() {
    let doc = two_display_board();
    let (out, report) = place(&doc, &PlacementConfig::default()).unwrap();

    assert_eq!(report.displays_found, 2);
    assert_eq!(report.resistors_found, 30);
    assert_eq!(report.displays_placed, 2);
    assert_eq!(report.resistors_placed, 30);
    assert_eq!(report.slots_skipped, 0);

    // SEGD1 sorts first despite appearing second in the file; SEGD2 keeps
    // its original rotation.
    assert!(out.contains("(at 5.7000 199.1000)"));
    assert!(out.contains("(at 17.1000 199.1000 90)"));
}

#[test]
fn fans_resistors_out_per_the_offset_table() {
    let doc = two_display_board();
    let (out, _) = place(&doc, &PlacementConfig::default()).unwrap();

    // R1 is slot 0 of the first display: (5.7 - 5.7, 199.1 - 4.0, 90).
    assert!(out.contains("(at 0.0000 195.1000 90)"));
    // R8 is slot 7: (5.7 - 2.5, 199.1 - 11.0, 0).
    assert!(out.contains("(at 3.2000 188.1000 0)"));
    // R14 is slot 13, the one odd rotation in the table.
    assert!(out.contains("(at 0.0000 208.3000 -190)"));
    // R16 is slot 0 of the second display: (17.1 - 5.7, 195.1, 90).
    assert!(out.contains("(at 11.4000 195.1000 90)"));
}

#[test]
fn only_position_clauses_change() {
    let doc = two_display_board();
    let (out, _) = place(&doc, &PlacementConfig::default()).unwrap();

    // Rebuild the expected output by hand: every original (at ...) clause of
    // a placed component is unique in the input, so plain text replacement
    // reconstructs what span editing must produce. Everything else is
    // required to survive byte for byte.
    let mut expected = doc.clone();
    expected = expected.replacen("(at 100 50)", "(at 5.7000 199.1000)", 1);
    expected = expected.replacen("(at 120 50 90)", "(at 17.1000 199.1000 90)", 1);
    for i in 1..=30usize {
        let display = (i - 1) / 15;
        let (dx, dy, rot) = RESISTOR_OFFSETS[(i - 1) % 15];
        let x = 5.7 + display as f64 * 11.4 + dx;
        let y = 199.1 + dy;
        expected = expected.replacen(
            &format!("(at {} 80)", 10 + i),
            &format!("(at {x:.4} {y:.4} {rot})"),
            1,
        );
    }
    assert_eq!(out, expected);
}

#[test]
fn short_resistor_slice_still_places_what_exists() {
    let mut doc = String::from("(kicad_pcb\n");
    doc.push_str(&display_block("SEGD1", "(at 100 50)"));
    doc.push_str(&display_block("SEGD2", "(at 120 50)"));
    for i in 1..=20 {
        doc.push_str(&resistor_block(&format!("R{i}"), &format!("(at {} 80)", 10 + i)));
    }
    doc.push_str(")\n");

    let (_, report) = place(&doc, &PlacementConfig::default()).unwrap();
    assert_eq!(report.displays_placed, 2);
    // The second display's slice holds only five resistors; the missing
    // slots are skipped without error.
    assert_eq!(report.resistors_placed, 20);
}

#[test]
fn missing_displays_fail_before_any_output() {
    let mut doc = String::from("(kicad_pcb\n");
    for i in 1..=3 {
        doc.push_str(&resistor_block(&format!("R{i}"), "(at 10 80)"));
    }
    doc.push_str(")\n");

    let err = place(&doc, &PlacementConfig::default()).unwrap_err();
    assert!(matches!(err, segplace::AppError::Pcb(PcbError::NoDisplays(_))));
}

#[test]
fn rerun_on_own_output_reproduces_the_grid() {
    // The tool is not idempotence-preserving by contract: a rerun recomputes
    // placements from whatever the previous run left. With an absolute grid
    // that happens to converge, which is all this asserts.
    let doc = two_display_board();
    let (first, _) = place(&doc, &PlacementConfig::default()).unwrap();
    let (second, report) = place(&first, &PlacementConfig::default()).unwrap();
    assert_eq!(report.displays_placed, 2);
    assert!(second.contains("(at 5.7000 199.1000)"));
}

#[test]
fn file_round_trip_overwrites_existing_output() {
    let dir = tempfile::tempdir().unwrap();
    let input_path = dir.path().join("Display.kicad_pcb");
    let output_path = dir.path().join("Display_modified.kicad_pcb");

    std::fs::write(&input_path, two_display_board()).unwrap();
    std::fs::write(&output_path, "stale previous run").unwrap();

    let content = std::fs::read_to_string(&input_path).unwrap();
    let (modified, _) = place(&content, &PlacementConfig::default()).unwrap();
    std::fs::write(&output_path, &modified).unwrap();

    assert_eq!(std::fs::read_to_string(&output_path).unwrap(), modified);
    assert!(modified.contains("(at 5.7000 199.1000)"));
}
