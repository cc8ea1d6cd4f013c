// src/specs/markets.rs
//! Prediction-market price exports → normalized market rows.
//!
//! An export is the daily price history of one market as downloaded from the market
//! site: `ContractName, Date, OpenSharePrice, HighSharePrice, LowSharePrice,
//! CloseSharePrice, TradeVolume`. Only contract, date, closing price and volume survive.
//! A listing file names which export belongs to which race.

use std::{fs, io, path::{Path, PathBuf}};

use chrono::NaiveDate;
use log::{debug, warn};

use crate::csv::Table;
use crate::election::ElectionType;
use crate::error::{Error, Result};

const EXPORT_COLUMNS: [&str; 4] = ["ContractName", "Date", "CloseSharePrice", "TradeVolume"];
const LISTING_COLUMNS: [&str; 4] = ["election", "location", "district", "export"];

#[derive(Clone, Debug, PartialEq)]
pub struct MarketRecord {
    pub contract: String,
    pub volume: u64,
    pub market_date: NaiveDate,
    pub price: f64,
}

/// Which export file covers which race.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MarketListing {
    pub election: ElectionType,
    pub location: String,
    pub district: u32,
    pub export: PathBuf,
}

#[derive(Clone, Debug, PartialEq)]
pub struct MarketRow {
    pub election: ElectionType,
    pub location: String,
    pub district: u32,
    pub record: MarketRecord,
}

impl MarketRow {
    pub const HEADERS: [&'static str; 7] =
        ["election", "state", "district", "contract", "volume", "market_date", "price"];

    pub fn headers() -> Vec<String> {
        Self::HEADERS.iter().map(|h| s!(*h)).collect()
    }

    pub fn to_row(&self) -> Vec<String> {
        vec![
            s!(self.election.as_token()),
            self.location.clone(),
            self.district.to_string(),
            self.record.contract.clone(),
            self.record.volume.to_string(),
            self.record.market_date.format("%Y-%m-%d").to_string(),
            self.record.price.to_string(),
        ]
    }
}

fn header_and_body(text: &str, what: &'static str, wanted: &[&str]) -> Result<(Vec<usize>, Vec<Vec<String>>)> {
    let table = Table::parse(text, ',').ok_or_else(|| Error::parse(what, "<empty>"))?;
    let idx = table.columns(wanted).map_err(|missing| Error::parse(what, missing))?;
    let body = table
        .rows
        .into_iter()
        .filter(|r| r.iter().any(|c| !c.trim().is_empty()))
        .collect();
    Ok((idx, body))
}

fn cell<'a>(row: &'a [String], i: usize) -> &'a str {
    row.get(i).map(|c| c.trim()).unwrap_or("")
}

/// Clean one raw export.
pub fn clean_export(text: &str) -> Result<Vec<MarketRecord>> {
    let (idx, body) = header_and_body(text, "market export header", &EXPORT_COLUMNS)?;
    body.iter()
        .map(|row| {
            Ok(MarketRecord {
                contract: s!(cell(row, idx[0])),
                market_date: parse_market_date(cell(row, idx[1]))?,
                price: parse_price(cell(row, idx[2]))?,
                volume: parse_volume(cell(row, idx[3]))?,
            })
        })
        .collect()
}

/// `"10/23/2020 12:00:00 AM"` → 2020-10-23. Only the date part is read.
pub fn parse_market_date(raw: &str) -> Result<NaiveDate> {
    let day = raw.split_whitespace().next().unwrap_or("");
    NaiveDate::parse_from_str(day, "%m/%d/%Y").map_err(|_| Error::parse("market date", raw))
}

/// `"$0.45"` → 0.45
pub fn parse_price(raw: &str) -> Result<f64> {
    let t = raw.trim();
    t.strip_prefix('$')
        .unwrap_or(t)
        .trim()
        .parse()
        .map_err(|_| Error::parse("share price", raw))
}

fn parse_volume(raw: &str) -> Result<u64> {
    raw.replace(',', "").parse().map_err(|_| Error::parse("trade volume", raw))
}

/// Listing rows; relative export paths resolve against `base_dir`.
pub fn parse_listing(text: &str, base_dir: &Path) -> Result<Vec<MarketListing>> {
    let (idx, body) = header_and_body(text, "market listing header", &LISTING_COLUMNS)?;
    body.iter()
        .map(|row| {
            let district_raw = cell(row, idx[2]);
            let district = if district_raw.is_empty() {
                0
            } else {
                district_raw.parse().map_err(|_| Error::parse("district number", district_raw))?
            };
            Ok(MarketListing {
                election: ElectionType::from_token(cell(row, idx[0]))?,
                location: s!(cell(row, idx[1])),
                district,
                export: base_dir.join(cell(row, idx[3])),
            })
        })
        .collect()
}

pub fn read_listing(path: &Path) -> Result<Vec<MarketListing>> {
    let text = fs::read_to_string(path)?;
    let base = path.parent().unwrap_or(Path::new(""));
    parse_listing(&text, base)
}

/// Load and clean every listed export, tagging rows with their race.
/// Exports that were never downloaded are skipped.
pub fn combine(listings: &[MarketListing]) -> Result<Vec<MarketRow>> {
    let mut out = Vec::new();
    for l in listings {
        let text = match fs::read_to_string(&l.export) {
            Ok(t) => t,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                warn!("market export missing: {}", l.export.display());
                continue;
            }
            Err(e) => return Err(e.into()),
        };
        let records = clean_export(&text)?;
        debug!("{}: {} market row(s)", l.export.display(), records.len());
        out.extend(records.into_iter().map(|record| MarketRow {
            election: l.election,
            location: l.location.clone(),
            district: l.district,
            record,
        }));
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXPORT: &str = "\
ContractName,Date,OpenSharePrice,HighSharePrice,LowSharePrice,CloseSharePrice,TradeVolume
Democratic,10/23/2020 12:00:00 AM,$0.50,$0.55,$0.49,$0.53,1204
Republican,10/23/2020 12:00:00 AM,$0.50,$0.51,$0.44,$0.47,\"2,310\"
";

    #[test]
    fn cleans_prices_dates_and_volume() {
        let got = clean_export(EXPORT).unwrap();
        assert_eq!(got.len(), 2);
        assert_eq!(got[0].contract, "Democratic");
        assert_eq!(got[0].market_date, NaiveDate::from_ymd_opt(2020, 10, 23).unwrap());
        assert!((got[0].price - 0.53).abs() < 1e-9);
        assert_eq!(got[1].volume, 2310);
    }

    #[test]
    fn export_errors() {
        assert!(matches!(clean_export(""), Err(Error::Parse { .. })));
        assert!(matches!(clean_export("Date,CloseSharePrice\n"), Err(Error::Parse { .. })));
        assert!(parse_price("n/a").is_err());
        assert!(parse_market_date("2020-10-23").is_err());
    }

    #[test]
    fn listing_rows() {
        let text = "election,location,district,export\nhouse,maine,2,me2.csv\nsenate,iowa,,ia.csv\n";
        let got = parse_listing(text, Path::new("dl")).unwrap();
        assert_eq!(got[0].election, ElectionType::House);
        assert_eq!(got[0].district, 2);
        assert_eq!(got[0].export, Path::new("dl").join("me2.csv"));
        assert_eq!(got[1].district, 0);
        assert!(parse_listing("election,location,district,export\nmayor,x,0,a.csv\n", Path::new("")).is_err());
    }
}
