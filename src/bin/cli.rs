// src/bin/cli.rs
use color_eyre::eyre::{eyre, Result};
use poll_scrape::cli;

fn main() -> Result<()> {
    color_eyre::install()?;
    match cli::run() {
        Ok(true) => Ok(()),
        Ok(false) => std::process::exit(1),
        Err(e) => Err(eyre!("{e}")),
    }
}
