//! Component grouping and the placement pass itself.

use std::ops::Range;

use regex::Regex;

use crate::error::{PcbError, Result};
use crate::kicad::{FieldExtractor, Footprint, extract_blocks};
use crate::layout::{LayoutPolicy, RESISTORS_PER_DISPLAY};

/// How a group definition matches the footprint type string.
#[derive(Debug, Clone)]
pub enum TypeMatch {
    /// The type string must equal this exactly.
    Exact(String),
    /// The type string must contain this substring.
    Contains(String),
}

impl TypeMatch {
    fn matches(&self, footprint_type: Option<&str>) -> bool {
        match (self, footprint_type) {
            (TypeMatch::Exact(want), Some(t)) => t == want,
            (TypeMatch::Contains(want), Some(t)) => t.contains(want.as_str()),
            (_, None) => false,
        }
    }
}

/// One component group: a type rule plus the reference prefix whose numeric
/// suffix orders the group.
#[derive(Debug, Clone)]
pub struct GroupFilter {
    pub type_match: TypeMatch,
    pub ref_prefix: String,
}

impl GroupFilter {
    /// Selects matching records and sorts them by the first run of decimal
    /// digits in the reference, so `R2` comes before `R10`. The sort is
    /// stable; ties keep extraction order. Records with no reference, the
    /// wrong prefix, or a reference without any digits are excluded, the
    /// digitless case with a warning.
    pub fn select<'a>(&self, records: &'a [Footprint]) -> Vec<&'a Footprint> {
        let digits = Regex::new(r"\d+").unwrap();
        let mut selected: Vec<(u64, &Footprint)> = Vec::new();

        for record in records {
            if !self.type_match.matches(record.footprint_type.as_deref()) {
                continue;
            }
            let Some(reference) = record.reference.as_deref() else {
                continue;
            };
            if !reference.starts_with(&self.ref_prefix) {
                continue;
            }
            match digits
                .find(reference)
                .and_then(|m| m.as_str().parse::<u64>().ok())
            {
                Some(n) => selected.push((n, record)),
                None => log::warn!("reference '{reference}' has no numeric suffix, skipping"),
            }
        }

        selected.sort_by_key(|(n, _)| *n);
        selected.into_iter().map(|(_, record)| record).collect()
    }
}

/// Everything one placement pass needs: the two group definitions plus the
/// grid the displays go on.
#[derive(Debug, Clone)]
pub struct PlacementConfig {
    /// Exact footprint type of the displays.
    pub display_type: String,
    /// Reference prefix of display designators.
    pub display_prefix: String,
    /// Substring matched against resistor footprint types.
    pub resistor_match: String,
    /// Reference prefix of resistor designators.
    pub resistor_prefix: String,
    pub layout: LayoutPolicy,
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            display_type: "External_Parts:ACPSC04-41SEKWA".to_string(),
            display_prefix: "SEGD".to_string(),
            resistor_match: "Resistor_SMD".to_string(),
            resistor_prefix: "R".to_string(),
            layout: LayoutPolicy::default(),
        }
    }
}

/// Counts gathered over one placement pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlacementReport {
    pub displays_found: usize,
    pub resistors_found: usize,
    pub displays_placed: usize,
    pub resistors_placed: usize,
    pub slots_skipped: usize,
}

/// One pending rewrite: the new text for a byte range of the document.
struct Edit {
    span: Range<usize>,
    text: String,
}

/// Runs the placement pass over one document and returns the rewritten
/// document together with the counts.
///
/// Displays are placed left to right along the grid row; each consumes the
/// next 15 resistors from the sorted resistor list and fans them out per the
/// offset table. Components whose `(at ...)` clause was never matched are
/// left untouched. All rewrites are collected as span edits and applied in a
/// single pass at the end, so every byte outside a replaced position clause
/// survives unchanged.
pub fn place(content: &str, config: &PlacementConfig) -> Result<(String, PlacementReport)> {
    let blocks = extract_blocks(content, "footprint");
    if blocks.is_empty() {
        return Err(PcbError::NoFootprints.into());
    }
    log::debug!("extracted {} footprint blocks", blocks.len());

    let extractor = FieldExtractor::new();
    let records: Vec<Footprint> = blocks.iter().map(|b| extractor.extract(b)).collect();

    let displays = GroupFilter {
        type_match: TypeMatch::Exact(config.display_type.clone()),
        ref_prefix: config.display_prefix.clone(),
    }
    .select(&records);
    let resistors = GroupFilter {
        type_match: TypeMatch::Contains(config.resistor_match.clone()),
        ref_prefix: config.resistor_prefix.clone(),
    }
    .select(&records);

    println!("Found {} displays to process.", displays.len());
    println!("Found {} resistors to process.", resistors.len());

    if displays.is_empty() {
        return Err(PcbError::NoDisplays(config.display_type.clone()).into());
    }
    if resistors.len() < displays.len() * RESISTORS_PER_DISPLAY {
        log::warn!(
            "found {} resistors, but expected at least {}",
            resistors.len(),
            displays.len() * RESISTORS_PER_DISPLAY
        );
    }

    let mut report = PlacementReport {
        displays_found: displays.len(),
        resistors_found: resistors.len(),
        ..Default::default()
    };
    let mut edits = Vec::new();

    for (i, display) in displays.iter().enumerate() {
        let (new_x, new_y) = config.layout.display_position(i);

        if let Some(at_span) = display.at_span.clone() {
            let rotation = display
                .rotation
                .map(|r| format!(" {r}"))
                .unwrap_or_default();
            edits.push(Edit {
                span: at_span,
                text: format!("(at {new_x:.4} {new_y:.4}{rotation})"),
            });
            report.displays_placed += 1;
            println!(
                "✓ Placed {:<8} at X={:.2}",
                display.reference.as_deref().unwrap_or("?"),
                new_x
            );
        }

        // The next 15 resistors in sorted order belong to this display. A
        // short or empty tail slice is fine; those displays just keep fewer
        // resistors.
        let slice_start = (i * RESISTORS_PER_DISPLAY).min(resistors.len());
        let slice_end = ((i + 1) * RESISTORS_PER_DISPLAY).min(resistors.len());

        for (j, resistor) in resistors[slice_start..slice_end].iter().enumerate() {
            let Some((rx, ry, rot)) = config.layout.resistor_position(new_x, j) else {
                log::warn!(
                    "not enough relative coordinates for {}",
                    resistor.reference.as_deref().unwrap_or("?")
                );
                report.slots_skipped += 1;
                continue;
            };
            if let Some(at_span) = resistor.at_span.clone() {
                edits.push(Edit {
                    span: at_span,
                    text: format!("(at {rx:.4} {ry:.4} {rot})"),
                });
                report.resistors_placed += 1;
            }
        }
    }

    Ok((apply_edits(content, edits), report))
}

/// Applies span edits to the document in one pass.
///
/// Edits are sorted by start offset; an edit that overlaps an already
/// consumed region is dropped. Distinct footprint blocks can never produce
/// overlapping anchors, so the guard only matters for malformed input.
fn apply_edits(content: &str, mut edits: Vec<Edit>) -> String {
    edits.sort_by_key(|e| e.span.start);

    let mut out = String::with_capacity(content.len());
    let mut cursor = 0;

    for edit in edits {
        if edit.span.start < cursor {
            log::warn!("overlapping edit at byte {} dropped", edit.span.start);
            continue;
        }
        out.push_str(&content[cursor..edit.span.start]);
        out.push_str(&edit.text);
        cursor = edit.span.end;
    }
    out.push_str(&content[cursor..]);
    out
}
