// src/config/options.rs
use std::path::PathBuf;

use chrono::NaiveDate;

use super::consts::*;
use crate::core::sanitize::sanitize_filename;
use crate::election::ElectionType;
use crate::location::{canonical_names, slug};

#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct AppOptions {
    pub scrape: ScrapeOptions,
    pub export: ExportOptions,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LocationSelector {
    /// The chamber-wide listing page.
    National,
    /// Every state page the chamber's location table knows.
    All,
    Only(Vec<String>),
}

impl LocationSelector {
    /// Locations to open, `""` standing for the national listing.
    pub fn resolve(&self, election: ElectionType) -> Vec<String> {
        match self {
            LocationSelector::National => vec![s!()],
            LocationSelector::All => canonical_names(election).into_iter().map(String::from).collect(),
            LocationSelector::Only(v) => v.clone(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScrapeOptions {
    pub election: ElectionType,
    pub locations: LocationSelector,
    pub cutoff: NaiveDate,
    pub target_year: i32,
    pub max_pages: usize,
    /// Colour reference table; the built-in one when `None`.
    pub reference: Option<PathBuf>,
    pub snapshots: PathBuf,
}

impl Default for ScrapeOptions {
    fn default() -> Self {
        Self {
            election: ElectionType::Senate,
            locations: LocationSelector::National,
            cutoff: default_cutoff(),
            target_year: TARGET_YEAR,
            max_pages: MAX_PAGES,
            reference: None,
            snapshots: PathBuf::from(SNAPSHOT_DIR),
        }
    }
}

fn default_cutoff() -> NaiveDate {
    NaiveDate::parse_from_str(CUTOFF_DATE, "%Y-%m-%d").unwrap_or(NaiveDate::MIN)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Tsv,
}

impl ExportFormat {
    pub fn ext(&self) -> &'static str {
        match self { ExportFormat::Csv => "csv", ExportFormat::Tsv => "tsv" }
    }
    pub fn delim(&self) -> char {
        match self { ExportFormat::Csv => ',', ExportFormat::Tsv => '\t' }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportOptions {
    pub format: ExportFormat,
    pub out_dir: PathBuf,
    pub include_headers: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            format: ExportFormat::Csv,
            out_dir: PathBuf::from(DEFAULT_OUT_DIR),
            include_headers: true,
        }
    }
}

impl ExportOptions {
    /// `<out_dir>/<location>_<election>_polling.<ext>`; `national` for the empty location.
    pub fn out_path_for(&self, location: &str, election: ElectionType) -> PathBuf {
        let stem = sanitize_filename(&slug(location), NATIONAL);
        self.out_dir.join(format!(
            "{stem}_{}_{OUTPUT_SUFFIX}.{}",
            election.as_token(),
            self.format.ext()
        ))
    }
}
