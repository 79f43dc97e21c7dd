pub mod footprint;
pub mod sexpr;

pub use footprint::{FieldExtractor, Footprint};
pub use sexpr::{Block, extract_blocks};
