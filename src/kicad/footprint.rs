//! Field extraction from footprint blocks.

use std::ops::Range;

use regex::Regex;

use crate::kicad::sexpr::Block;

/// Fields pulled out of one footprint block.
///
/// Every field that failed to match (or parse) is `None`; that is a valid
/// record state, and downstream filtering decides what to do with it. The
/// record never owns or mutates the block text it was derived from.
#[derive(Debug, Clone)]
pub struct Footprint {
    pub footprint_type: Option<String>,
    pub reference: Option<String>,
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub rotation: Option<f64>,
    /// Byte range of the `(at ...)` clause in the source document, the
    /// anchor replaced when the component is moved.
    pub at_span: Option<Range<usize>>,
    /// Byte range of the whole block in the source document.
    pub block_span: Range<usize>,
}

/// Extracts footprint fields with first-match pattern searches.
///
/// The patterns are compiled once; extraction itself never fails, it just
/// leaves unmatched fields as `None`.
pub struct FieldExtractor {
    re_type: Regex,
    re_reference: Regex,
    re_at: Regex,
}

impl FieldExtractor {
    pub fn new() -> Self {
        Self {
            re_type: Regex::new(r#"\(\s*footprint\s+"([^"]+)""#)
                .expect("footprint type pattern is valid"),
            re_reference: Regex::new(r#"\(\s*property\s+"Reference"\s+"([^"]+)""#)
                .expect("reference pattern is valid"),
            re_at: Regex::new(r"\(at\s+([-\d.]+)\s+([-\d.]+)(?:\s+([-\d.]+))?\)")
                .expect("position pattern is valid"),
        }
    }

    /// Derives a [`Footprint`] record from one extracted block.
    pub fn extract(&self, block: &Block<'_>) -> Footprint {
        let footprint_type = self
            .re_type
            .captures(block.text)
            .map(|caps| caps[1].to_string());
        let reference = self
            .re_reference
            .captures(block.text)
            .map(|caps| caps[1].to_string());

        let mut x = None;
        let mut y = None;
        let mut rotation = None;
        let mut at_span = None;

        if let Some(caps) = self.re_at.captures(block.text) {
            if let Some(whole) = caps.get(0) {
                at_span = Some(block.span.start + whole.start()..block.span.start + whole.end());
            }
            x = caps.get(1).and_then(|m| m.as_str().parse().ok());
            y = caps.get(2).and_then(|m| m.as_str().parse().ok());
            rotation = caps.get(3).and_then(|m| m.as_str().parse().ok());
        }

        Footprint {
            footprint_type,
            reference,
            x,
            y,
            rotation,
            at_span,
            block_span: block.span.clone(),
        }
    }
}

impl Default for FieldExtractor {
    fn default() -> Self {
        Self::new()
    }
}
