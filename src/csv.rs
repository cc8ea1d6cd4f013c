// src/csv.rs
//! Delimited text in and out: the colour reference table and market exports come in,
//! poll and market tables go out.

use std::borrow::Cow;
use std::io::{self, Write};
use std::iter::Peekable;
use std::str::Chars;

/* ---------------- Reading ---------------- */

#[derive(Clone, Copy, PartialEq, Eq)]
enum Ending {
    Field,
    Record,
    Eof,
}

/// Pulls records out of quoted, CRLF-tolerant text one at a time.
struct Reader<'a> {
    chars: Peekable<Chars<'a>>,
    sep: char,
}

impl Reader<'_> {
    fn field(&mut self) -> (String, Ending) {
        let mut out = s!();
        let mut quoted = false;
        while let Some(ch) = self.chars.next() {
            match ch {
                '"' if quoted && self.chars.peek() == Some(&'"') => {
                    self.chars.next();
                    out.push('"');
                }
                '"' => quoted = !quoted,
                c if quoted => out.push(c),
                c if c == self.sep => return (out, Ending::Field),
                '\r' => {
                    if self.chars.peek() == Some(&'\n') {
                        self.chars.next();
                    }
                    return (out, Ending::Record);
                }
                '\n' => return (out, Ending::Record),
                c => out.push(c),
            }
        }
        (out, Ending::Eof)
    }
}

impl Iterator for Reader<'_> {
    type Item = Vec<String>;

    /// Next non-blank record.
    fn next(&mut self) -> Option<Vec<String>> {
        loop {
            self.chars.peek()?;
            let mut cells = Vec::new();
            loop {
                let (cell, end) = self.field();
                cells.push(cell);
                if end != Ending::Field {
                    break;
                }
            }
            if !(cells.len() == 1 && cells[0].is_empty()) {
                return Some(cells);
            }
        }
    }
}

/// Header row plus body.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Table {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    /// First record is the header; `None` when the text has no records at all.
    pub fn parse(text: &str, sep: char) -> Option<Table> {
        let mut records = Reader { chars: text.chars().peekable(), sep };
        let header = records.next()?;
        Some(Table { header, rows: records.collect() })
    }

    /// Position of each wanted column, compared case-insensitively after trimming.
    /// `Err` names the first missing column.
    pub fn columns(&self, wanted: &[&str]) -> Result<Vec<usize>, String> {
        wanted
            .iter()
            .map(|name| {
                self.header
                    .iter()
                    .position(|h| h.trim().eq_ignore_ascii_case(name))
                    .ok_or_else(|| format!("missing column {name:?}"))
            })
            .collect()
    }
}

/* ---------------- Writing ---------------- */

fn quoted(cell: &str, sep: char) -> Cow<'_, str> {
    if cell.contains([sep, '"', '\n', '\r']) {
        Cow::Owned(format!("\"{}\"", cell.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(cell)
    }
}

/// One record, newline-terminated; cells are quoted only when they must be.
pub fn write_row<W: Write>(mut w: W, row: &[String], sep: char) -> io::Result<()> {
    let cells: Vec<Cow<'_, str>> = row.iter().map(|c| quoted(c, sep)).collect();
    writeln!(w, "{}", cells.join(sep.to_string().as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_quotes_and_crlf() {
        let t = Table::parse("a,\"b,c\"\r\n\"say \"\"hi\"\"\",2\n", ',').unwrap();
        assert_eq!(t.header, vec![s!("a"), s!("b,c")]);
        assert_eq!(t.rows, vec![vec![s!("say \"hi\""), s!("2")]]);
    }

    #[test]
    fn skips_blank_lines_and_flushes_tail() {
        let t = Table::parse("\nx,y\n\n\r\n1,2", ',').unwrap();
        assert_eq!(t.header, vec![s!("x"), s!("y")]);
        assert_eq!(t.rows, vec![vec![s!("1"), s!("2")]]);
        let tsv = Table::parse("a\tb\n1\t\n", '\t').unwrap();
        assert_eq!(tsv.rows, vec![vec![s!("1"), s!()]]);
    }

    #[test]
    fn write_row_quotes_when_needed() {
        let mut buf = Vec::new();
        write_row(&mut buf, &[s!("Acme, Inc."), s!("B+"), s!("say \"hi\"")], ',').unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "\"Acme, Inc.\",B+,\"say \"\"hi\"\"\"\n");

        let mut buf = Vec::new();
        write_row(&mut buf, &[s!("Acme, Inc."), s!("B+")], '\t').unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "Acme, Inc.\tB+\n");
    }

    #[test]
    fn table_columns_case_insensitive() {
        let t = Table::parse("Date, ContractName ,TradeVolume\n1,2,3\n", ',').unwrap();
        assert_eq!(t.columns(&["contractname", "Date"]).unwrap(), vec![1, 0]);
        assert!(t.columns(&["Price"]).is_err());
        assert_eq!(t.rows, vec![vec![s!("1"), s!("2"), s!("3")]]);
        assert!(Table::parse("\n\n", ',').is_none());
    }
}
