use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum MspReadError {
    #[error("{}: unrecognised MSP file extension '{ext}'; expected .nc or .pf", file.display())]
    UnrecognisedFormat { file: PathBuf, ext: String },

    #[error("Couldn't get a {convention} date from filename '{stem}': {reason}")]
    BadFilenameDate {
        stem: String,
        convention: &'static str,
        reason: String,
    },

    #[error("Couldn't parse '{input}' as a timestamp: {reason}")]
    BadTimestamp { input: String, reason: String },

    #[error("{}: no '{name}' variable", file.display())]
    MissingVariable { file: PathBuf, name: &'static str },

    #[error("{}: '{name}' has shape {got:?}, expected {expected}", file.display())]
    BadShape {
        file: PathBuf,
        name: &'static str,
        got: Vec<usize>,
        expected: String,
    },

    #[error(transparent)]
    Netcdf(#[from] netcdf::Error),
}
