use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Pcb(#[from] PcbError),

    #[error("{0}")]
    Other(String),
}

/// Errors raised while reading or interpreting a KiCad PCB document.
#[derive(Error, Debug)]
pub enum PcbError {
    #[error("the file '{}' was not found", .0.display())]
    InputNotFound(PathBuf),

    #[error("could not parse any footprints from the file; check the file format")]
    NoFootprints,

    #[error("no displays with the footprint '{0}' were found")]
    NoDisplays(String),
}
