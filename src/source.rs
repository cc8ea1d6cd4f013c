// src/source.rs
//! Page retrieval seam.
//!
//! Live browsing (opening the listing, clicking "show more") happens outside this crate;
//! whatever drives the browser implements [`PageSource`]. [`SnapshotSource`] replays
//! page states captured to disk, which is also what the tests use.

use std::{fs, path::PathBuf};

use chrono::NaiveDate;
use log::debug;
use scraper::Html;

use crate::core::sanitize::normalize_ws;
use crate::election::ElectionType;
use crate::error::Result;
use crate::location::slug;
use crate::specs::polls::{split_day_blocks, DayBlock};

/// One rendered state of a listing page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Page {
    NotFound,
    Html(String),
}

pub trait PageSource {
    /// Load the listing for `location` (empty = national).
    fn open(&mut self, election: ElectionType, location: &str) -> Result<Page>;

    /// Reveal older entries. `None` when there is nothing more to show.
    fn show_more(&mut self) -> Result<Option<Page>>;
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Retrieval {
    NotFound,
    Blocks(Vec<DayBlock>),
}

/// Open the listing and keep expanding it until it reaches back past `cutoff`.
///
/// Stops when the oldest dated block is before `cutoff`, when the source has nothing
/// more to show, when expanding adds no blocks, or after `max_pages` page states.
pub fn fetch_day_blocks(
    source: &mut dyn PageSource,
    election: ElectionType,
    location: &str,
    cutoff: NaiveDate,
    max_pages: usize,
) -> Result<Retrieval> {
    let Page::Html(mut html) = source.open(election, location)? else {
        return Ok(Retrieval::NotFound);
    };
    let mut blocks = split_day_blocks(&html);
    let mut pages = 1;

    while pages < max_pages && !reaches_cutoff(&blocks, cutoff) {
        match source.show_more()? {
            Some(Page::Html(next)) => {
                let next_blocks = split_day_blocks(&next);
                if next_blocks.len() <= blocks.len() {
                    debug!("{location:?}: show-more added nothing after {pages} page(s)");
                    break;
                }
                html = next;
                blocks = next_blocks;
                pages += 1;
            }
            Some(Page::NotFound) | None => break,
        }
    }
    debug!("{location:?}: {} day block(s) over {pages} page(s), {} bytes", blocks.len(), html.len());
    Ok(Retrieval::Blocks(blocks))
}

fn reaches_cutoff(blocks: &[DayBlock], cutoff: NaiveDate) -> bool {
    blocks
        .iter()
        .filter_map(DayBlock::date)
        .min()
        .is_some_and(|oldest| oldest < cutoff)
}

/// A page whose whole visible text is the 404 banner.
pub fn is_not_found(page_html: &str) -> bool {
    let doc = Html::parse_document(page_html);
    let text: String = doc.root_element().text().collect();
    normalize_ws(&text).eq_ignore_ascii_case("404 Not Found")
}

/// Replays `<root>/<election>/<slug>/page_NNN.html`, one file per page state.
pub struct SnapshotSource {
    root: PathBuf,
    pages: Vec<PathBuf>,
    next: usize,
}

impl SnapshotSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into(), pages: Vec::new(), next: 0 }
    }

    pub fn dir_for(&self, election: ElectionType, location: &str) -> PathBuf {
        let slug = slug(location);
        let slug = if slug.is_empty() { s!("national") } else { slug };
        self.root.join(election.as_token()).join(slug)
    }

    fn read(&mut self) -> Result<Option<Page>> {
        let Some(path) = self.pages.get(self.next) else {
            return Ok(None);
        };
        self.next += 1;
        let text = fs::read_to_string(path)?;
        Ok(Some(if is_not_found(&text) { Page::NotFound } else { Page::Html(text) }))
    }
}

impl PageSource for SnapshotSource {
    fn open(&mut self, election: ElectionType, location: &str) -> Result<Page> {
        let dir = self.dir_for(election, location);
        self.pages.clear();
        self.next = 0;
        if !dir.is_dir() {
            debug!("no snapshots at {}", dir.display());
            return Ok(Page::NotFound);
        }
        let mut pages: Vec<PathBuf> = fs::read_dir(&dir)?
            .filter_map(|e| e.ok().map(|e| e.path()))
            .filter(|p| {
                p.file_name()
                    .and_then(|n| n.to_str())
                    .is_some_and(|n| n.starts_with("page_") && n.ends_with(".html"))
            })
            .collect();
        pages.sort();
        self.pages = pages;
        Ok(self.read()?.unwrap_or(Page::NotFound))
    }

    fn show_more(&mut self) -> Result<Option<Page>> {
        self.read()
    }
}
