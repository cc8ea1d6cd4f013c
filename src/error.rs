// src/error.rs
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// Location code absent from the lookup table for its chamber.
    #[error("no entry for {key:?} in the {table} table")]
    KeyNotFound { table: &'static str, key: String },

    #[error("could not parse {what} from {input:?}")]
    Parse { what: &'static str, input: String },

    /// Day block without a usable date or election marker.
    #[error("day block has no usable {marker} marker")]
    MissingMarker { marker: &'static str },

    #[error("unknown election type: {0:?}")]
    UnknownElection(String),

    #[error("colour reference table: {0}")]
    Reference(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    pub(crate) fn parse(what: &'static str, input: impl Into<String>) -> Self {
        Error::Parse { what, input: input.into() }
    }

    /// Failures that cost one day block, not the whole location.
    pub fn is_day_block_failure(&self) -> bool {
        matches!(self, Error::MissingMarker { .. } | Error::UnknownElection(_))
    }
}
