// src/cli.rs
use std::{env, fs, path::PathBuf};

use chrono::NaiveDate;

use crate::config::consts::{DEFAULT_MARGINS_FILE, DEFAULT_MARKETS_FILE, DEFAULT_OUT_DIR};
use crate::config::options::{AppOptions, ExportFormat, LocationSelector};
use crate::election::ElectionType;
use crate::party::PartyClassifier;
use crate::progress::Progress;
use crate::scrape::{self, RunSummary};
use crate::source::SnapshotSource;
use crate::specs::{margins, markets};
use crate::{file, logging};

type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    Polls(AppOptions),
    Markets { listing: PathBuf, out: PathBuf, format: ExportFormat },
    Margins { snapshots: PathBuf, out: PathBuf, format: ExportFormat },
    Help,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Params {
    pub command: Command,
    pub verbosity: u8,
}

/// Parse, run and report. `Ok(false)` when some locations failed.
pub fn run() -> CliResult<bool> {
    let params = parse_args(env::args().skip(1))?;
    logging::init(params.verbosity);
    match params.command {
        Command::Help => {
            eprintln!("{}", include_str!("cli_help.txt"));
            Ok(true)
        }
        Command::Polls(opts) => {
            let summary = run_polls(&opts)?;
            report(&summary);
            Ok(summary.is_success())
        }
        Command::Markets { listing, out, format } => {
            let listings = markets::read_listing(&listing)?;
            let rows = markets::combine(&listings)?;
            let table: Vec<Vec<String>> = rows.iter().map(markets::MarketRow::to_row).collect();
            let headers = markets::MarketRow::headers();
            file::write_rows(&out, Some(&headers), &table, format.delim())?;
            println!("{} market row(s) → {}", rows.len(), out.display());
            Ok(true)
        }
        Command::Margins { snapshots, out, format } => {
            let records = margins::collect(&snapshots)?;
            let table: Vec<Vec<String>> = records.iter().map(margins::MarginRecord::to_row).collect();
            let headers = margins::MarginRecord::headers();
            file::write_rows(&out, Some(&headers), &table, format.delim())?;
            println!("{} state(s) → {}", records.len(), out.display());
            Ok(true)
        }
    }
}

fn run_polls(opts: &AppOptions) -> CliResult<RunSummary> {
    let classifier = match &opts.scrape.reference {
        Some(path) => PartyClassifier::from_reference_csv(&fs::read_to_string(path)?)?,
        None => PartyClassifier::embedded()?,
    };
    let mut source = SnapshotSource::new(&opts.scrape.snapshots);
    let mut progress = StderrProgress::default();
    Ok(scrape::run_locations(&mut source, &classifier, opts, Some(&mut progress)))
}

fn report(summary: &RunSummary) {
    for path in &summary.written {
        println!("{}", path.display());
    }
    if !summary.no_coverage.is_empty() {
        eprintln!("No coverage: {}", summary.no_coverage.join(", "));
    }
    for (loc, err) in &summary.failed {
        eprintln!("Failed {loc}: {err}");
    }
}

#[derive(Default)]
struct StderrProgress {
    total: usize,
    done: usize,
}

impl Progress for StderrProgress {
    fn begin(&mut self, total: usize) {
        self.total = total;
    }
    fn log(&mut self, msg: &str) {
        eprintln!("{msg}");
    }
    fn item_done(&mut self, location: &str) {
        self.done += 1;
        eprintln!("[{}/{}] {location}", self.done, self.total);
    }
    fn item_failed(&mut self, location: &str, error: &str) {
        self.done += 1;
        eprintln!("[{}/{}] {location} failed: {error}", self.done, self.total);
    }
}

pub fn parse_args<I: IntoIterator<Item = String>>(args: I) -> CliResult<Params> {
    let mut args = args.into_iter();
    let mut verbosity = 0u8;

    let command = match args.next().as_deref() {
        None | Some("-h") | Some("--help") => return Ok(Params { command: Command::Help, verbosity }),
        Some("polls") => "polls",
        Some("markets") => "markets",
        Some("margins") => "margins",
        Some(other) => return Err(format!("Unknown command: {other}").into()),
    };

    let mut opts = AppOptions::default();
    let mut election: Option<ElectionType> = None;
    let mut locations: Vec<String> = Vec::new();
    let mut all = false;
    let mut listing: Option<PathBuf> = None;
    let mut out: Option<PathBuf> = None;

    while let Some(a) = args.next() {
        let flag = a.as_str();
        let mut value = || args.next().ok_or_else(|| format!("Missing value for {flag}"));
        match flag {
            "-e" | "--election" => election = Some(ElectionType::from_token(&value()?)?),
            "-l" | "--location" => locations.push(value()?),
            "--all" => all = true,
            "--snapshots" => opts.scrape.snapshots = PathBuf::from(value()?),
            "--cutoff" => {
                let v = value()?;
                opts.scrape.cutoff = NaiveDate::parse_from_str(&v, "%Y-%m-%d")
                    .map_err(|_| format!("Bad date for --cutoff: {v}"))?;
            }
            "--year" => opts.scrape.target_year = value()?.parse()?,
            "--max-pages" => {
                let v: usize = value()?.parse()?;
                if v == 0 {
                    return Err("--max-pages must be at least 1".into());
                }
                opts.scrape.max_pages = v;
            }
            "--reference" => opts.scrape.reference = Some(PathBuf::from(value()?)),
            "--listing" => listing = Some(PathBuf::from(value()?)),
            "-o" | "--out" => out = Some(PathBuf::from(value()?)),
            "--format" => {
                opts.export.format = match value()?.to_ascii_lowercase().as_str() {
                    "csv" => ExportFormat::Csv,
                    "tsv" => ExportFormat::Tsv,
                    other => return Err(format!("Unknown format: {other}").into()),
                };
            }
            "--no-headers" => opts.export.include_headers = false,
            "-v" | "--verbose" => verbosity = verbosity.saturating_add(1),
            "-vv" => verbosity = verbosity.saturating_add(2),
            "-h" | "--help" => return Ok(Params { command: Command::Help, verbosity }),
            _ => return Err(format!("Unknown arg: {a}").into()),
        }
    }

    let default_out = |name: &str, format: ExportFormat| {
        PathBuf::from(DEFAULT_OUT_DIR).join(format!("{name}.{}", format.ext()))
    };
    let command = if command == "polls" {
        opts.scrape.election = election.ok_or("Missing --election")?;
        opts.scrape.locations = match (all, locations.is_empty()) {
            (true, true) => LocationSelector::All,
            (true, false) => return Err("--all and --location are exclusive".into()),
            (false, false) => LocationSelector::Only(locations),
            (false, true) => LocationSelector::National,
        };
        if let Some(dir) = out {
            opts.export.out_dir = dir;
        }
        Command::Polls(opts)
    } else if command == "markets" {
        let listing = listing.ok_or("Missing --listing")?;
        let format = opts.export.format;
        let out = out.unwrap_or_else(|| default_out(DEFAULT_MARKETS_FILE, format));
        Command::Markets { listing, out, format }
    } else {
        let format = opts.export.format;
        let out = out.unwrap_or_else(|| default_out(DEFAULT_MARGINS_FILE, format));
        Command::Margins { snapshots: opts.scrape.snapshots, out, format }
    };
    Ok(Params { command, verbosity })
}
