// src/specs/margins.rs
//! Statewide presidential forecast pages → projected vote shares and margins.
//!
//! Each state page draws the two projected shares as SVG labels (`g.g-text`), in no
//! fixed order. The Democratic label is the one filled with [`DEM_FILL`]. Pages are read
//! from snapshots laid out as `<root>/president/<state-slug>/page_001.html`.

use std::{fs, io, path::Path};

use log::{debug, warn};
use scraper::{ElementRef, Html};

use crate::error::{Error, Result};
use crate::location::{house_codes, slug};

pub const DEM_FILL: &str = "#2e3c85";
pub const SNAPSHOT_ELECTION: &str = "president";
const SNAPSHOT_PAGE: &str = "page_001.html";

/// House-table codes with no state forecast page.
const NOT_STATES: [&str; 1] = ["PR"];

#[derive(Clone, Debug, PartialEq)]
pub struct MarginRecord {
    /// Two-letter postal code.
    pub state: String,
    /// Page slug, e.g. `new-hampshire`.
    pub state_full: String,
    pub biden: f64,
    pub trump: f64,
}

impl MarginRecord {
    pub const HEADERS: [&'static str; 5] = ["state", "biden", "trump", "state_full", "margin"];

    pub fn headers() -> Vec<String> {
        Self::HEADERS.iter().map(|h| s!(*h)).collect()
    }

    /// Democratic minus Republican share, in points.
    pub fn margin(&self) -> f64 {
        self.biden - self.trump
    }

    pub fn to_row(&self) -> Vec<String> {
        vec![
            self.state.clone(),
            self.biden.to_string(),
            self.trump.to_string(),
            self.state_full.clone(),
            self.margin().to_string(),
        ]
    }
}

/// `(code, slug)` for the fifty states, postal-code table order.
pub fn states() -> Vec<(&'static str, String)> {
    house_codes()
        .iter()
        .filter(|(code, _)| !NOT_STATES.contains(code))
        .map(|&(code, name)| (code, slug(name)))
        .collect()
}

/// `"51.3% Biden"` → 51.3
fn share(label: ElementRef<'_>) -> Result<f64> {
    let text: String = label.text().collect();
    let (num, _) = text
        .split_once('%')
        .ok_or_else(|| Error::parse("projected share", text.trim()))?;
    num.trim().parse().map_err(|_| Error::parse("projected share", text.trim()))
}

fn is_dem(label: ElementRef<'_>) -> bool {
    label
        .html()
        .to_ascii_lowercase()
        .contains(&format!("fill=\"{DEM_FILL}\""))
}

/// `(biden, trump)` from the first two share labels on a state page.
pub fn parse_shares(page_html: &str) -> Result<(f64, f64)> {
    let doc = Html::parse_document(page_html);
    let mut labels = doc.select(sel!("g.g-text"));
    let (Some(first), Some(second)) = (labels.next(), labels.next()) else {
        return Err(Error::MissingMarker { marker: "projected share" });
    };
    let (a, b) = (share(first)?, share(second)?);
    Ok(if is_dem(first) { (a, b) } else { (b, a) })
}

/// Read every state's snapshot under `root`. States never captured are skipped
/// with a warning; a captured page that cannot be read is an error.
pub fn collect(root: &Path) -> Result<Vec<MarginRecord>> {
    let mut out = Vec::new();
    for (code, state_full) in states() {
        let path = root.join(SNAPSHOT_ELECTION).join(&state_full).join(SNAPSHOT_PAGE);
        let html = match fs::read_to_string(&path) {
            Ok(h) => h,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                warn!("no forecast snapshot for {state_full}");
                continue;
            }
            Err(e) => return Err(e.into()),
        };
        let (biden, trump) = parse_shares(&html)?;
        debug!("{code}: {biden} / {trump}");
        out.push(MarginRecord { state: s!(code), state_full, biden, trump });
    }
    Ok(out)
}
