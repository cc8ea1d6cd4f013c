// src/record.rs
use std::fmt;

use chrono::NaiveDate;

use crate::election::ElectionType;
use crate::party::Party;

/// `date-marker-seq`, e.g. `2020-10-01-U.S. Senate-0`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PollId {
    pub date: NaiveDate,
    pub marker: String,
    pub seq: usize,
}

impl fmt::Display for PollId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}-{}", self.date.format("%Y-%m-%d"), self.marker, self.seq)
    }
}

/// One candidate's result within one poll.
///
/// Straight out of the extractor `location` holds the page's raw code (`"ME-2"`,
/// `"N.H."`) and `district` is 0; `scrape::normalize_records` rewrites both.
#[derive(Clone, Debug, PartialEq)]
pub struct PollRecord {
    pub poll_id: PollId,
    pub election: ElectionType,
    pub location: String,
    pub district: u32,
    pub poll_date: NaiveDate,
    pub pollster: String,
    pub sponsored: bool,
    pub pollster_grade: Option<String>,
    pub sample_size: u32,
    pub voter_type: String,
    pub candidate: String,
    pub party: Party,
    pub polling_pct: u32,
    pub net_polling: i32,
}

impl PollRecord {
    /// Output schema agreed with the pricing model.
    pub const HEADERS: [&'static str; 14] = [
        "poll_id",
        "election",
        "state",
        "district",
        "poll_date",
        "pollster",
        "sponsored",
        "pollster_grade",
        "poll_sample",
        "voter_type",
        "candidate",
        "party",
        "polling",
        "net_polling",
    ];

    pub fn headers() -> Vec<String> {
        Self::HEADERS.iter().map(|h| s!(*h)).collect()
    }

    pub fn to_row(&self) -> Vec<String> {
        vec![
            self.poll_id.to_string(),
            s!(self.election.as_token()),
            self.location.clone(),
            self.district.to_string(),
            self.poll_date.format("%Y-%m-%d").to_string(),
            self.pollster.clone(),
            s!(if self.sponsored { "1" } else { "0" }),
            self.pollster_grade.clone().unwrap_or_default(),
            self.sample_size.to_string(),
            self.voter_type.clone(),
            self.candidate.clone(),
            s!(self.party.as_str()),
            self.polling_pct.to_string(),
            self.net_polling.to_string(),
        ]
    }

    pub(crate) fn content_key(&self) -> ContentKey<'_> {
        ContentKey {
            election: self.election,
            location: &self.location,
            district: self.district,
            poll_date: self.poll_date,
            pollster: &self.pollster,
            sponsored: self.sponsored,
            pollster_grade: self.pollster_grade.as_deref(),
            sample_size: self.sample_size,
            voter_type: &self.voter_type,
            candidate: &self.candidate,
            party: self.party,
            polling_pct: self.polling_pct,
            net_polling: self.net_polling,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) struct ContentKey<'a> {
    election: ElectionType,
    location: &'a str,
    district: u32,
    poll_date: NaiveDate,
    pollster: &'a str,
    sponsored: bool,
    pollster_grade: Option<&'a str>,
    sample_size: u32,
    voter_type: &'a str,
    candidate: &'a str,
    party: Party,
    polling_pct: u32,
    net_polling: i32,
}
