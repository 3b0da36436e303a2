use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to read specification '{path}'")]
    ReadSpec {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read submission '{path}'")]
    ReadSubmission {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid answer specification: {0}")]
    InvalidSpec(#[from] regexmatch_spec::SpecError),

    #[error("Group {index} does not exist (specification has {count} groups)")]
    GroupOutOfRange { index: usize, count: usize },

    #[error("stdin can only be read once (given as '-' more than once)")]
    StdinTwice,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Walkdir error: {0}")]
    WalkDir(#[from] walkdir::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
