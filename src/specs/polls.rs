// src/specs/polls.rs
//! Per-day polling blocks → [`PollRecord`]s.
//!
//! A listing page groups polls by publish date. Each group ("day block") looks like:
//!
//! ```text
//! <div class="day-container">
//!   <h2 class="day" data-date="2020-10-01">…</h2>
//!   <tr class="visible-row">
//!     <td class="type hide-mobile single first">U.S. Senate</td>   (or "… first last")
//!     <a target="_blank">Acme Polls*</a> <div class="gradeText">B+</div>
//!     <td class="dates hide-desktop">Sep 28-30<br><span>Maine</span><br>1,200 LV</td>
//!     <td class="answers hide-desktop">Smith 45% <div class="heat-map" style="…"> …</td>
//!     <td class="net hide-mobile dem">+5</td>
//!   </tr>
//!   …
//! </div>
//! ```
//!
//! Missing grade, sponsor mark or net cell are normal and default to `None`/`false`/0.
//! A missing or unreadable date, a missing race-type marker ([`Error::MissingMarker`]) or
//! a race other than senate/house ([`Error::UnknownElection`]) fails the whole block.

use std::sync::LazyLock;

use chrono::NaiveDate;
use log::debug;
use regex::Regex;
use scraper::{ElementRef, Html};

use crate::core::html::{clean_text, find_exact_class, raw_text, text_with_breaks};
use crate::core::sanitize::{normalize_ws, split_sponsor_mark, strip_non_alnum, to_ascii};
use crate::election::ElectionType;
use crate::error::{Error, Result};
use crate::party::{Party, PartyClassifier, Rgb};
use crate::record::{PollId, PollRecord};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Race-type cell; the second form shows up when the cell also closes the row.
const ELECTION_CELL: &str = "type hide-mobile single first";
const ELECTION_CELL_LAST: &str = "type hide-mobile single first last";
const INFO_CELL: &str = "dates hide-desktop";
const ANSWERS_CELL: &str = "answers hide-desktop";
const NET_CELLS: [(Party, &str); 3] = [
    (Party::Dem, "net hide-mobile dem"),
    (Party::Rep, "net hide-mobile rep"),
    (Party::Ind, "net hide-mobile ind"),
];

/// Letters immediately followed by digits: `"Smith45"` → (`Smith`, `45`).
static PACKED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([A-Za-z]+)([0-9]+)").expect("static regex"));

/// Markup of every poll published on one date. The date is read once, on construction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DayBlock {
    html: String,
    date: Option<NaiveDate>,
}

impl DayBlock {
    pub fn new(html: impl Into<String>) -> Self {
        let html = html.into();
        let date = day_date(Html::parse_fragment(&html).root_element());
        Self { html, date }
    }

    pub fn html(&self) -> &str {
        &self.html
    }

    /// Publish date; `None` when the date marker is missing or unreadable.
    pub fn date(&self) -> Option<NaiveDate> {
        self.date
    }
}

/// Every `div.day-container` on a listing page, in page order.
pub fn split_day_blocks(page_html: &str) -> Vec<DayBlock> {
    let doc = Html::parse_document(page_html);
    doc.select(sel!("div.day-container"))
        .map(|el| DayBlock { html: el.html(), date: day_date(el) })
        .collect()
}

fn day_date(root: ElementRef<'_>) -> Option<NaiveDate> {
    let raw = root
        .select(sel!("h2.day"))
        .next()
        .and_then(|h2| h2.value().attr("data-date"))?;
    match NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT) {
        Ok(d) => Some(d),
        Err(_) => {
            debug!("unreadable day date {raw:?}");
            None
        }
    }
}

fn election_marker(root: ElementRef<'_>) -> Option<String> {
    find_exact_class(root, "td", ELECTION_CELL)
        .or_else(|| find_exact_class(root, "td", ELECTION_CELL_LAST))
        .map(clean_text)
        .filter(|t| !t.is_empty())
}

/// All poll rows of one day block, one record per candidate.
pub fn extract_day(block: &DayBlock, classifier: &PartyClassifier) -> Result<Vec<PollRecord>> {
    let frag = Html::parse_fragment(&block.html);
    let root = frag.root_element();

    let poll_date = block.date.ok_or(Error::MissingMarker { marker: "date" })?;
    let marker = election_marker(root).ok_or(Error::MissingMarker { marker: "election" })?;
    // A race other than senate/house (governor, president) costs this block only;
    // `UnknownElection` counts as a day-block failure.
    let election = ElectionType::from_marker(&marker)?;

    let mut out = Vec::new();
    for (seq, row) in root.select(sel!("tr.visible-row")).enumerate() {
        let poll_id = PollId { date: poll_date, marker: marker.clone(), seq };
        out.extend(extract_poll(row, poll_id, election, classifier)?);
    }
    Ok(out)
}

fn extract_poll(
    row: ElementRef<'_>,
    poll_id: PollId,
    election: ElectionType,
    classifier: &PartyClassifier,
) -> Result<Vec<PollRecord>> {
    let pollster_raw = row
        .select(sel!(r#"a[target="_blank"]"#))
        .next()
        .map(clean_text)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| Error::parse("pollster", clean_text(row)))?;
    let (pollster, sponsored) = split_sponsor_mark(&pollster_raw);

    let pollster_grade = row
        .select(sel!("div.gradeText"))
        .next()
        .map(clean_text)
        .filter(|t| !t.is_empty());

    let info = find_exact_class(row, "td", INFO_CELL)
        .ok_or_else(|| Error::parse("poll info cell", clean_text(row)))?;
    let (sample_size, voter_type) = parse_sample(&text_with_breaks(info, ", "))?;
    let location = info
        .select(sel!("span"))
        .next()
        .map(clean_text)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| Error::parse("poll location", clean_text(info)))?;

    let answers = find_exact_class(row, "td", ANSWERS_CELL)
        .ok_or_else(|| Error::parse("results cell", clean_text(row)))?;
    let results = parse_results(&raw_text(answers))?;

    let colours = answers
        .select(sel!("div.heat-map"))
        .map(|cell| Rgb::from_style(cell.value().attr("style").unwrap_or("")))
        .collect::<Result<Vec<_>>>()?;
    if colours.len() != results.len() {
        return Err(Error::parse(
            "heat-map cells",
            format!("{} candidates, {} coloured cells", results.len(), colours.len()),
        ));
    }
    let parties = classifier.classify(&colours);

    let net = parse_net(row)?;
    let leader = net.map(|(party, _)| leader_index(&results, &parties, party));

    let records = results
        .into_iter()
        .zip(parties)
        .enumerate()
        .map(|(i, ((candidate, polling_pct), party))| PollRecord {
            poll_id: poll_id.clone(),
            election,
            location: location.clone(),
            district: 0,
            poll_date: poll_id.date,
            pollster: pollster.clone(),
            sponsored,
            pollster_grade: pollster_grade.clone(),
            sample_size,
            voter_type: voter_type.clone(),
            candidate,
            party,
            polling_pct,
            net_polling: match (net, leader) {
                (Some((_, margin)), Some(l)) if l == i => margin,
                _ => 0,
            },
        })
        .collect();
    Ok(records)
}

/// Last `", "` segment of the info cell: `"1,200 LV"` → (1200, "LV").
pub fn parse_sample(info_text: &str) -> Result<(u32, String)> {
    let last = info_text
        .rsplit(", ")
        .map(normalize_ws)
        .find(|s| !s.is_empty())
        .ok_or_else(|| Error::parse("sample", info_text))?;

    let mut parts = last.split(' ');
    let sample_raw = parts.next().unwrap_or("");
    let voter = parts.next().ok_or_else(|| Error::parse("voter type", &last))?;

    let sample: u32 = sample_raw
        .replace(',', "")
        .parse()
        .map_err(|_| Error::parse("sample size", sample_raw))?;
    if sample == 0 {
        return Err(Error::parse("sample size", sample_raw));
    }
    Ok((sample, voter.to_string()))
}

/// Packed results text → (candidate, pct) pairs: `"Smith45%Jones40%"`.
/// Splits on `%` and drops the trailing piece after the last one.
pub fn parse_results(text: &str) -> Result<Vec<(String, u32)>> {
    let mut segments: Vec<&str> = text.split('%').collect();
    segments.pop();
    segments.into_iter().map(split_packed).collect()
}

/// One packed segment → (name, pct). The text is transliterated to ASCII and stripped
/// of non-alphanumerics first, so `"Peña 48"` reads as (`Pena`, 48).
pub fn split_packed(segment: &str) -> Result<(String, u32)> {
    let cleaned = strip_non_alnum(&to_ascii(segment));
    let caps = PACKED
        .captures(&cleaned)
        .ok_or_else(|| Error::parse("candidate + percentage", segment))?;
    let pct: u32 = caps[2]
        .parse()
        .map_err(|_| Error::parse("percentage", segment))?;
    Ok((caps[1].to_string(), pct))
}

/// Net margin and the party it is tagged with; `None` when no tagged cell exists.
fn parse_net(row: ElementRef<'_>) -> Result<Option<(Party, i32)>> {
    let Some((party, cell)) = NET_CELLS
        .iter()
        .find_map(|&(party, class)| find_exact_class(row, "td", class).map(|td| (party, td)))
    else {
        return Ok(None);
    };
    let text = clean_text(cell);
    let digits = text.strip_prefix('+').unwrap_or(&text).trim();
    let margin: i32 = digits.parse().map_err(|_| Error::parse("net margin", &text))?;
    Ok(Some((party, margin)))
}

/// Row that carries the net margin: best-polling candidate of the tagged party,
/// or the best-polling candidate overall when no row has that party. First wins ties.
fn leader_index(results: &[(String, u32)], parties: &[Party], tagged: Party) -> usize {
    let best_of = |keep: &dyn Fn(usize) -> bool| {
        let mut top: Option<usize> = None;
        for (i, (_, pct)) in results.iter().enumerate() {
            if !keep(i) {
                continue;
            }
            match top {
                Some(t) if *pct <= results[t].1 => {}
                _ => top = Some(i),
            }
        }
        top
    };
    best_of(&|i| parties[i] == tagged)
        .or_else(|| best_of(&|_| true))
        .unwrap_or(0)
}
