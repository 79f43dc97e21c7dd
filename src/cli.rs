use clap::Parser;
use std::path::PathBuf;

use crate::error::{AppError, Result};
use crate::layout::LayoutPolicy;
use crate::placer::PlacementConfig;

#[derive(Parser, Debug)]
#[command(name = "segplace")]
#[command(version = "0.3.1")]
#[command(about = "Grid placement of segment displays and their resistors in KiCad PCB files", long_about = None)]
pub struct Cli {
    /// Input KiCad PCB file
    #[arg(short, long, value_name = "FILE", default_value = "Display.kicad_pcb")]
    pub input: PathBuf,

    /// Output file (overwritten if it already exists)
    #[arg(short, long, value_name = "FILE", default_value = "Display_modified.kicad_pcb")]
    pub output: PathBuf,

    /// Display footprint type (exact match)
    #[arg(long, value_name = "TYPE", default_value = "External_Parts:ACPSC04-41SEKWA")]
    pub display_footprint: String,

    /// Reference prefix of display designators
    #[arg(long, default_value = "SEGD")]
    pub display_prefix: String,

    /// Substring matched against resistor footprint types
    #[arg(long, value_name = "SUBSTR", default_value = "Resistor_SMD")]
    pub resistor_match: String,

    /// Reference prefix of resistor designators
    #[arg(long, default_value = "R")]
    pub resistor_prefix: String,

    /// X coordinate of the first display, in mm
    #[arg(long, default_value = "5.7")]
    pub start_x: f64,

    /// Y coordinate of the display row, in mm
    #[arg(long, default_value = "199.1")]
    pub start_y: f64,

    /// Horizontal spacing between displays, in mm
    #[arg(long, default_value = "11.4")]
    pub spacing: f64,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}

impl Cli {
    pub fn validate(&self) -> Result<()> {
        if self.display_prefix.is_empty() || self.resistor_prefix.is_empty() {
            return Err(AppError::Other(
                "Reference prefixes must not be empty".to_string(),
            ));
        }
        if !self.spacing.is_finite() || self.spacing <= 0.0 {
            return Err(AppError::Other(
                "--spacing must be a positive number".to_string(),
            ));
        }
        Ok(())
    }

    pub fn placement_config(&self) -> PlacementConfig {
        PlacementConfig {
            display_type: self.display_footprint.clone(),
            display_prefix: self.display_prefix.clone(),
            resistor_match: self.resistor_match.clone(),
            resistor_prefix: self.resistor_prefix.clone(),
            layout: LayoutPolicy {
                start_x: self.start_x,
                start_y: self.start_y,
                spacing: self.spacing,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_reproduce_the_reference_layout() {
        let cli = Cli::parse_from(["segplace"]);
        assert!(cli.validate().is_ok());

        let config = cli.placement_config();
        assert_eq!(config.display_type, "External_Parts:ACPSC04-41SEKWA");
        assert_eq!(config.display_prefix, "SEGD");
        assert_eq!(config.resistor_match, "Resistor_SMD");
        assert_eq!(config.resistor_prefix, "R");
        assert_eq!(config.layout, LayoutPolicy::default());
    }

    #[test]
    fn rejects_empty_prefix_and_bad_spacing() {
        let cli = Cli::parse_from(["segplace", "--display-prefix", ""]);
        assert!(cli.validate().is_err());

        let cli = Cli::parse_from(["segplace", "--spacing", "0"]);
        assert!(cli.validate().is_err());
    }
}
