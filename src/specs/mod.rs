// src/specs/mod.rs
//! # Page specs
//!
//! Each spec knows how one kind of downloaded document is laid out and turns it
//! into typed records. Nothing here fetches, caches or writes.
//!
//! - `polls`: day blocks of a polling listing page → `PollRecord`s (raw locations).
//! - `margins`: statewide presidential forecast pages → projected shares and margins.
//! - `markets`: prediction-market price exports → `MarketRecord`s, plus the listing
//!   file that ties each export to a race.
//!
//! Specs are tested offline against inline fixtures. Keep selectors tolerant of
//! whitespace and attribute order, but exact where the page relies on exact classes.
pub mod margins;
pub mod markets;
pub mod polls;
