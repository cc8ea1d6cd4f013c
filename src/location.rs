// src/location.rs
//! Location codes → canonical names.
//!
//! The polling pages abbreviate differently per chamber: House races use two-letter
//! postal codes plus a district (`ME-2`), Senate races mix AP-style abbreviations
//! (`N.H.`, `Calif.`), spelled-out short names (`Ohio`) and a few postal codes.
//! The tables mirror what the pages print; there is no fuzzy matching, an unseen code
//! is an error so a changed abbreviation shows up instead of silently mis-filing rows.

use crate::election::ElectionType;
use crate::error::{Error, Result};

const HOUSE: &[(&str, &str)] = &[
    ("AL", "alabama"),
    ("AK", "alaska"),
    ("AZ", "arizona"),
    ("AR", "arkansas"),
    ("CA", "california"),
    ("CO", "colorado"),
    ("CT", "connecticut"),
    ("DE", "delaware"),
    ("FL", "florida"),
    ("GA", "georgia"),
    ("HI", "hawaii"),
    ("ID", "idaho"),
    ("IL", "illinois"),
    ("IN", "indiana"),
    ("IA", "iowa"),
    ("KS", "kansas"),
    ("KY", "kentucky"),
    ("LA", "louisiana"),
    ("ME", "maine"),
    ("MD", "maryland"),
    ("MA", "massachusetts"),
    ("MI", "michigan"),
    ("MN", "minnesota"),
    ("MS", "mississippi"),
    ("MO", "missouri"),
    ("MT", "montana"),
    ("NE", "nebraska"),
    ("NV", "nevada"),
    ("NH", "new hampshire"),
    ("NJ", "new jersey"),
    ("NM", "new mexico"),
    ("NY", "new york"),
    ("NC", "north carolina"),
    ("ND", "north dakota"),
    ("OH", "ohio"),
    ("OK", "oklahoma"),
    ("OR", "oregon"),
    ("PA", "pennsylvania"),
    ("PR", "puerto rico"),
    ("RI", "rhode island"),
    ("SC", "south carolina"),
    ("SD", "south dakota"),
    ("TN", "tennessee"),
    ("TX", "texas"),
    ("UT", "utah"),
    ("VT", "vermont"),
    ("VA", "virginia"),
    ("WA", "washington"),
    ("WV", "west virginia"),
    ("WI", "wisconsin"),
    ("WY", "wyoming"),
];

const SENATE: &[(&str, &str)] = &[
    ("Ala.", "alabama"),
    ("Alaska", "alaska"),
    ("Ariz.", "arizona"),
    ("AR", "arkansas"),
    ("Calif.", "california"),
    ("Colo.", "colorado"),
    ("Conn.", "connecticut"),
    ("Del.", "delaware"),
    ("Fla.", "florida"),
    ("Ga.", "georgia"),
    ("HI", "hawaii"),
    ("ID", "idaho"),
    ("Ill.", "illinois"),
    ("Ind.", "indiana"),
    ("Iowa", "iowa"),
    ("Kan.", "kansas"),
    ("Ky.", "kentucky"),
    ("LA", "louisiana"),
    ("Maine", "maine"),
    ("Md.", "maryland"),
    ("Mass.", "massachusetts"),
    ("Mich.", "michigan"),
    ("Minn.", "minnesota"),
    ("Miss.", "mississippi"),
    ("Mo.", "missouri"),
    ("Mont.", "montana"),
    ("Neb.", "nebraska"),
    ("Nev.", "nevada"),
    ("N.H.", "new hampshire"),
    ("N.J.", "new jersey"),
    ("N.M.", "new mexico"),
    ("N.Y.", "new york"),
    ("N.C.", "north carolina"),
    ("N.D.", "north dakota"),
    ("Ohio", "ohio"),
    ("Okla.", "oklahoma"),
    ("OR", "oregon"),
    ("Pa.", "pennsylvania"),
    ("R.I.", "rhode island"),
    ("S.C.", "south carolina"),
    ("S.D.", "south dakota"),
    ("Tenn.", "tennessee"),
    ("Texas", "texas"),
    ("Utah", "utah"),
    ("Vt.", "vermont"),
    ("Va.", "virginia"),
    ("Wash.", "washington"),
    ("W.Va.", "west virginia"),
    ("Wis.", "wisconsin"),
    ("Wyo.", "wyoming"),
];

pub fn house_codes() -> &'static [(&'static str, &'static str)] {
    HOUSE
}

pub fn senate_codes() -> &'static [(&'static str, &'static str)] {
    SENATE
}

fn lookup(table: &'static [(&'static str, &'static str)], name: &'static str, key: &str) -> Result<&'static str> {
    table
        .iter()
        .find(|(code, _)| *code == key)
        .map(|(_, full)| *full)
        .ok_or_else(|| Error::KeyNotFound { table: name, key: key.to_string() })
}

/// Raw page location → `(canonical name, district)`.
/// House: `"ME-2"` → `("maine", 2)`. Senate: `"N.H."` → `("new hampshire", 0)`.
pub fn normalize_location(raw: &str, election: ElectionType) -> Result<(String, u32)> {
    let raw = raw.trim();
    match election {
        ElectionType::House => {
            let (code, district) = raw
                .split_once('-')
                .ok_or_else(|| Error::parse("house district code", raw))?;
            let name = lookup(HOUSE, "house", code.trim())?;
            let district: u32 = district
                .trim()
                .parse()
                .map_err(|_| Error::parse("district number", raw))?;
            Ok((name.to_string(), district))
        }
        ElectionType::Senate => Ok((lookup(SENATE, "senate", raw)?.to_string(), 0)),
    }
}

/// Canonical names known for a chamber, table order, no repeats.
pub fn canonical_names(election: ElectionType) -> Vec<&'static str> {
    let table = match election {
        ElectionType::House => HOUSE,
        ElectionType::Senate => SENATE,
    };
    let mut out: Vec<&'static str> = Vec::with_capacity(table.len());
    for &(_, name) in table {
        if !out.contains(&name) {
            out.push(name);
        }
    }
    out
}

/// Page slug for a canonical name: `"new hampshire"` → `"new-hampshire"`.
pub fn slug(name: &str) -> String {
    name.trim().to_ascii_lowercase().replace(' ', "-")
}
