// src/file.rs

use std::{
    fs::{self, File},
    io::{self, BufWriter, Write},
    path::{Path, PathBuf},
};

use crate::config::options::ExportOptions;
use crate::csv::write_row;
use crate::election::ElectionType;
use crate::record::PollRecord;

/// Write one location's table to `export.out_path_for(location, election)`.
/// Returns the final path written to.
pub fn write_table(
    export: &ExportOptions,
    location: &str,
    election: ElectionType,
    records: &[PollRecord],
) -> io::Result<PathBuf> {
    let path = export.out_path_for(location, election);
    let headers = export.include_headers.then(PollRecord::headers);
    let rows: Vec<Vec<String>> = records.iter().map(PollRecord::to_row).collect();
    write_rows(&path, headers.as_deref(), &rows, export.format.delim())?;
    Ok(path)
}

/// Create/truncate `path` (parent dirs included) and write the optional header plus rows.
pub fn write_rows(
    path: &Path,
    headers: Option<&[String]>,
    rows: &[Vec<String>],
    sep: char,
) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            ensure_directory(parent)?;
        }
    }
    let mut out = BufWriter::new(File::create(path)?);
    if let Some(h) = headers {
        write_row(&mut out, h, sep)?;
    }
    for row in rows {
        write_row(&mut out, row, sep)?;
    }
    out.flush()
}

pub fn ensure_directory(dir: &Path) -> io::Result<()> {
    if dir.exists() && !dir.is_dir() {
        return Err(io::Error::new(
            io::ErrorKind::AlreadyExists,
            format!("Path exists but is not a directory: {}", dir.display()),
        ));
    }
    if !dir.exists() { fs::create_dir_all(dir)?; }
    Ok(())
}
