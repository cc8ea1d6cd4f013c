// src/scrape.rs
use std::{collections::{HashMap, HashSet}, path::PathBuf};

use chrono::{Datelike, NaiveDate};
use log::{debug, error, info, warn};

use crate::{
    config::options::{AppOptions, ScrapeOptions},
    election::ElectionType,
    error::Result,
    file,
    location::normalize_location,
    party::PartyClassifier,
    progress::Progress,
    record::PollRecord,
    source::{fetch_day_blocks, PageSource, Retrieval},
    specs::polls::{extract_day, DayBlock},
};

/// Result of one location: a table, or a reason there is nothing to export.
#[derive(Clone, Debug, PartialEq)]
pub enum PollFeed {
    NoCoverage(String),
    Table(Vec<PollRecord>),
}

/// Fetch, extract, dedup and normalize one location (no IO besides the source).
pub fn run(
    source: &mut dyn PageSource,
    classifier: &PartyClassifier,
    election: ElectionType,
    location: &str,
    scrape: &ScrapeOptions,
) -> Result<PollFeed> {
    let blocks = match fetch_day_blocks(source, election, location, scrape.cutoff, scrape.max_pages)? {
        Retrieval::NotFound => return Ok(PollFeed::NoCoverage(s!("page not found"))),
        Retrieval::Blocks(b) => b,
    };
    if !blocks.iter().filter_map(DayBlock::date).any(|d| d.year() == scrape.target_year) {
        return Ok(PollFeed::NoCoverage(format!("no polls dated {}", scrape.target_year)));
    }

    let records = process_day_blocks(&blocks, classifier)?;
    let records = normalize_records(dedup_records(records))?;
    Ok(PollFeed::Table(records))
}

/// Extract every block in arrival order.
///
/// Blocks with no usable date, no race-type marker or a marker for another race are
/// skipped; any other failure aborts.
/// Poll sequence numbers continue across blocks that share a date and marker, so
/// `poll_id` stays unique over the whole table.
pub fn process_day_blocks(blocks: &[DayBlock], classifier: &PartyClassifier) -> Result<Vec<PollRecord>> {
    let mut offsets: HashMap<(NaiveDate, String), usize> = HashMap::new();
    let mut out = Vec::new();

    for (i, block) in blocks.iter().enumerate() {
        let mut records = match extract_day(block, classifier) {
            Ok(r) => r,
            Err(e) if e.is_day_block_failure() => {
                warn!("skipping day block {i}: {e}");
                continue;
            }
            Err(e) => return Err(e),
        };
        let Some(first) = records.first() else { continue };

        let key = (first.poll_id.date, first.poll_id.marker.clone());
        let offset = offsets.entry(key).or_insert(0);
        let polls = records.iter().map(|r| r.poll_id.seq + 1).max().unwrap_or(0);
        for r in &mut records {
            r.poll_id.seq += *offset;
        }
        *offset += polls;
        out.append(&mut records);
    }
    Ok(out)
}

/// Drop rows equal to an earlier row on every column but `poll_id`. First wins.
pub fn dedup_records(records: Vec<PollRecord>) -> Vec<PollRecord> {
    let before = records.len();
    let mut seen = HashSet::with_capacity(before);
    let mut keep = Vec::with_capacity(before);
    for r in &records {
        keep.push(seen.insert(r.content_key()));
    }
    drop(seen);

    let out: Vec<PollRecord> = records
        .into_iter()
        .zip(keep)
        .filter_map(|(r, k)| k.then_some(r))
        .collect();
    if out.len() < before {
        debug!("dropped {} duplicate row(s)", before - out.len());
    }
    out
}

/// Raw page codes → canonical location names and district numbers.
pub fn normalize_records(records: Vec<PollRecord>) -> Result<Vec<PollRecord>> {
    records
        .into_iter()
        .map(|mut r| {
            let (location, district) = normalize_location(&r.location, r.election)?;
            r.location = location;
            r.district = district;
            Ok(r)
        })
        .collect()
}

/// What a multi-location run produced.
#[derive(Debug, Default)]
pub struct RunSummary {
    pub written: Vec<PathBuf>,
    pub no_coverage: Vec<String>,
    /// (location, error message)
    pub failed: Vec<(String, String)>,
}

impl RunSummary {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Every selected location in turn, one output file each. A failing location is
/// recorded and the loop moves on.
pub fn run_locations(
    source: &mut dyn PageSource,
    classifier: &PartyClassifier,
    opts: &AppOptions,
    mut progress: Option<&mut dyn Progress>,
) -> RunSummary {
    let scrape = &opts.scrape;
    let election = scrape.election;
    let locations = scrape.locations.resolve(election);
    let mut summary = RunSummary::default();

    if let Some(p) = progress.as_deref_mut() {
        p.begin(locations.len());
        p.log(&format!("Scraping {} {election} listing(s)…", locations.len()));
    }

    for location in &locations {
        let label = if location.is_empty() { "national" } else { location.as_str() };

        let outcome = run(source, classifier, election, location, scrape).and_then(|feed| match feed {
            PollFeed::NoCoverage(reason) => Ok(Err(reason)),
            PollFeed::Table(records) => {
                let path = file::write_table(&opts.export, location, election, &records)?;
                Ok(Ok((path, records.len())))
            }
        });

        match outcome {
            Ok(Ok((path, rows))) => {
                info!("{label}: {rows} row(s) → {}", path.display());
                summary.written.push(path);
                if let Some(p) = progress.as_deref_mut() { p.item_done(label); }
            }
            Ok(Err(reason)) => {
                info!("{label}: no coverage ({reason})");
                summary.no_coverage.push(label.to_string());
                if let Some(p) = progress.as_deref_mut() { p.item_done(label); }
            }
            Err(e) => {
                error!("{label}: {e}");
                if let Some(p) = progress.as_deref_mut() { p.item_failed(label, &e.to_string()); }
                summary.failed.push((label.to_string(), e.to_string()));
            }
        }
    }

    if let Some(p) = progress.as_deref_mut() {
        p.finish();
    }
    summary
}
