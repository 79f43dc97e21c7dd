//! Top-level block extraction for KiCad s-expression documents.

use std::ops::Range;

/// One top-level `(tag ...)` block located in a document.
///
/// `span` is the block's byte range in the source document and serves as its
/// identity: two blocks with byte-identical text still have distinct spans.
#[derive(Debug, Clone, PartialEq)]
pub struct Block<'a> {
    pub text: &'a str,
    pub span: Range<usize>,
}

/// Extracts every top-level `(tag ...)` block from `content`, in document order.
///
/// Scans for the literal opening token `(tag`, then walks forward from it
/// keeping a parenthesis depth counter; the block ends where the counter
/// returns to zero. The search cursor then advances past the block, so nested
/// blocks of the same tag are not returned separately and blocks never
/// overlap.
///
/// A block whose closing paren never appears is dropped and the cursor moves
/// past the opening token, so truncated input terminates instead of looping.
/// Parentheses inside quoted strings are counted like any other; footprint
/// blocks are assumed not to contain them.
pub fn extract_blocks<'a>(content: &'a str, tag: &str) -> Vec<Block<'a>> {
    let mut blocks = Vec::new();
    let prefix = format!("({tag}");
    let bytes = content.as_bytes();
    let mut cursor = 0;

    while let Some(found) = content[cursor..].find(&prefix) {
        let start = cursor + found;
        let mut depth = 0i32;
        let mut end = None;

        for (offset, byte) in bytes[start..].iter().enumerate() {
            match *byte {
                b'(' => depth += 1,
                b')' => depth -= 1,
                _ => {}
            }
            if depth == 0 {
                end = Some(start + offset + 1);
                break;
            }
        }

        match end {
            Some(end) => {
                blocks.push(Block {
                    text: &content[start..end],
                    span: start..end,
                });
                cursor = end;
            }
            None => {
                log::debug!("unterminated '{prefix}' block at byte {start}, skipping");
                cursor = start + prefix.len();
            }
        }
    }

    blocks
}
