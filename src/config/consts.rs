// src/config/consts.rs

// Scrape
pub const CUTOFF_DATE: &str = "2020-06-01"; // stop paging once polls reach back past this
pub const TARGET_YEAR: i32 = 2020;
pub const MAX_PAGES: usize = 200;
pub const SNAPSHOT_DIR: &str = "snapshots";

// Export
pub const DEFAULT_OUT_DIR: &str = "out";
pub const OUTPUT_SUFFIX: &str = "polling";
pub const NATIONAL: &str = "national";
pub const DEFAULT_MARKETS_FILE: &str = "markets_combined";
pub const DEFAULT_MARGINS_FILE: &str = "projected_margins";
