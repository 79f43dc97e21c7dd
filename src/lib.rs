pub mod cli;
pub mod error;
pub mod kicad;
pub mod layout;
pub mod placer;

pub use cli::Cli;
pub use error::{AppError, PcbError, Result};
pub use kicad::{Block, FieldExtractor, Footprint, extract_blocks};
pub use layout::{LayoutPolicy, RESISTOR_OFFSETS, RESISTORS_PER_DISPLAY};
pub use placer::{GroupFilter, PlacementConfig, PlacementReport, TypeMatch, place};
