// src/election.rs
use std::fmt;

use crate::error::{Error, Result};

/// Race type, resolved once from page markup or user input and threaded through.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ElectionType {
    /// Upper chamber: one statewide contest, no district.
    Senate,
    /// Lower chamber: `XX-N` location codes.
    House,
}

impl ElectionType {
    pub const ALL: [ElectionType; 2] = [ElectionType::Senate, ElectionType::House];

    /// Canonical short token used in output and file names.
    pub fn as_token(self) -> &'static str {
        match self {
            ElectionType::Senate => "senate",
            ElectionType::House => "house",
        }
    }

    /// Marker text the polling pages print in the race-type cell.
    pub fn marker(self) -> &'static str {
        match self {
            ElectionType::Senate => "U.S. Senate",
            ElectionType::House => "U.S. House",
        }
    }

    pub fn from_marker(text: &str) -> Result<Self> {
        let t = text.trim();
        Self::ALL
            .into_iter()
            .find(|e| e.marker().eq_ignore_ascii_case(t))
            .ok_or_else(|| Error::UnknownElection(t.to_string()))
    }

    pub fn from_token(text: &str) -> Result<Self> {
        let t = text.trim();
        Self::ALL
            .into_iter()
            .find(|e| e.as_token().eq_ignore_ascii_case(t))
            .ok_or_else(|| Error::UnknownElection(t.to_string()))
    }
}

impl fmt::Display for ElectionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_token())
    }
}
