// src/party/mod.rs
//! Party labels and the heat-map colours they are read from.

pub mod classifier;

pub use classifier::PartyClassifier;

use std::fmt;

use crate::error::{Error, Result};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Party {
    Dem,
    Rep,
    Ind,
}

impl Party {
    /// Label order; also the tie-break order when scores are equal.
    pub const ALL: [Party; 3] = [Party::Dem, Party::Rep, Party::Ind];

    pub fn as_str(self) -> &'static str {
        match self {
            Party::Dem => "dem",
            Party::Rep => "rep",
            Party::Ind => "ind",
        }
    }

    pub fn from_token(s: &str) -> Option<Party> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dem" => Some(Party::Dem),
            "rep" => Some(Party::Rep),
            "ind" => Some(Party::Ind),
            _ => None,
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Party {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One colour sample taken from a heat-map cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl Rgb {
    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// `#rrggbb` or `#rgb`, leading `#` optional.
    pub fn from_hex(s: &str) -> Result<Rgb> {
        let hex = s.trim().trim_start_matches('#');
        let bad = || Error::parse("hex colour", s);
        if !hex.is_ascii() {
            return Err(bad());
        }
        let channel = |h: &str| u8::from_str_radix(h, 16).map_err(|_| bad());
        match hex.len() {
            6 => Ok(Rgb::new(channel(&hex[0..2])?, channel(&hex[2..4])?, channel(&hex[4..6])?)),
            3 => {
                // #abc == #aabbcc
                let short = |i: usize| channel(&hex[i..i + 1]).map(|v| v * 17);
                Ok(Rgb::new(short(0)?, short(1)?, short(2)?))
            }
            _ => Err(bad()),
        }
    }

    /// Colour out of an inline style such as `background-color:#1a6aff;`.
    pub fn from_style(style: &str) -> Result<Rgb> {
        let value = style
            .split(';')
            .filter_map(|decl| decl.split_once(':'))
            .find(|(prop, _)| prop.trim().ends_with("color"))
            .map(|(_, v)| v)
            .or_else(|| style.split_once(':').map(|(_, v)| v))
            .ok_or_else(|| Error::parse("heat-map style", style))?;
        Rgb::from_hex(value.trim().trim_end_matches(';'))
    }
}

/// One labelled row of the reference table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReferenceSample {
    pub rgb: Rgb,
    pub party: Party,
}
