// src/party/classifier.rs
//! Linear party classifier over heat-map colours.
//!
//! Features are `(green, blue)` scaled to `0..=1` plus a bias term. Red is left out:
//! Republican cells and most Independent cells share `red == 255`, while green and
//! blue split all three parties.
//!
//! Training is a multi-class perceptron (one weight vector per party, predict by
//! argmax). Samples are visited in table order and ties resolve to the earlier
//! party in [`Party::ALL`], so the same table always yields the same weights.

use log::{debug, warn};

use super::{Party, ReferenceSample, Rgb};
use crate::csv::Table;
use crate::error::{Error, Result};

const N_FEATURES: usize = 3;
const MAX_EPOCHS: usize = 1_000;

/// Reference table shipped with the crate (`red,green,blue,party`).
pub const EMBEDDED_REFERENCE: &str = include_str!("../../data/rgb_party.csv");

type Weights = [[f64; N_FEATURES]; 3];

/// Trained once, then shared read-only across every extraction call.
#[derive(Clone, Debug, PartialEq)]
pub struct PartyClassifier {
    weights: Weights,
    epochs: usize,
    converged: bool,
}

fn features(rgb: Rgb) -> [f64; N_FEATURES] {
    [f64::from(rgb.green) / 255.0, f64::from(rgb.blue) / 255.0, 1.0]
}

fn scores(weights: &Weights, x: &[f64; N_FEATURES]) -> [f64; 3] {
    let mut out = [0.0; 3];
    for (score, w) in out.iter_mut().zip(weights) {
        *score = w.iter().zip(x).map(|(a, b)| a * b).sum();
    }
    out
}

/// Highest score among `candidates`, earliest label on ties.
fn best(scores: &[f64; 3], candidates: impl Iterator<Item = Party>) -> Option<Party> {
    let mut top: Option<Party> = None;
    for p in candidates {
        match top {
            Some(t) if scores[p.index()] <= scores[t.index()] => {}
            _ => top = Some(p),
        }
    }
    top
}

impl PartyClassifier {
    pub fn train(samples: &[ReferenceSample]) -> Result<Self> {
        if samples.is_empty() {
            return Err(Error::Reference(s!("no samples")));
        }
        let mut seen = [false; 3];
        for s in samples {
            seen[s.party.index()] = true;
        }
        if seen.iter().filter(|&&b| b).count() < 2 {
            return Err(Error::Reference(s!("need samples for at least two parties")));
        }

        let mut weights: Weights = [[0.0; N_FEATURES]; 3];
        let mut epochs = 0;
        let mut converged = false;

        while epochs < MAX_EPOCHS {
            epochs += 1;
            let mut mistakes = 0usize;

            for sample in samples {
                let x = features(sample.rgb);
                let sc = scores(&weights, &x);
                let truth = sample.party;
                let rival = best(&sc, Party::ALL.into_iter().filter(|&p| p != truth));

                // A tie with the true label counts as a mistake.
                let Some(rival) = rival else { continue };
                if sc[rival.index()] >= sc[truth.index()] {
                    for i in 0..N_FEATURES {
                        weights[truth.index()][i] += x[i];
                        weights[rival.index()][i] -= x[i];
                    }
                    mistakes += 1;
                }
            }

            if mistakes == 0 {
                converged = true;
                break;
            }
        }

        if converged {
            debug!("party classifier converged after {epochs} epochs on {} samples", samples.len());
        } else {
            warn!("party classifier hit {MAX_EPOCHS} epochs without separating the reference table");
        }

        Ok(Self { weights, epochs, converged })
    }

    /// Train from `red,green,blue,party` text (header row required).
    pub fn from_reference_csv(text: &str) -> Result<Self> {
        Self::train(&parse_reference(text)?)
    }

    /// Train on the built-in reference table.
    pub fn embedded() -> Result<Self> {
        Self::from_reference_csv(EMBEDDED_REFERENCE)
    }

    pub fn classify_one(&self, rgb: Rgb) -> Party {
        let sc = scores(&self.weights, &features(rgb));
        // ALL is non-empty, so there is always a winner.
        best(&sc, Party::ALL.into_iter()).unwrap_or(Party::Dem)
    }

    /// One label per sample, same order.
    pub fn classify(&self, samples: &[Rgb]) -> Vec<Party> {
        samples.iter().map(|&rgb| self.classify_one(rgb)).collect()
    }

    pub fn converged(&self) -> bool {
        self.converged
    }

    pub fn epochs(&self) -> usize {
        self.epochs
    }

    /// Raw scores in [`Party::ALL`] order.
    fn decision(&self, rgb: Rgb) -> [f64; 3] {
        scores(&self.weights, &features(rgb))
    }
}

pub fn parse_reference(text: &str) -> Result<Vec<ReferenceSample>> {
    let table = Table::parse(text, ',').ok_or_else(|| Error::Reference(s!("empty table")))?;
    let ix = table.columns(&["red", "green", "blue", "party"]).map_err(Error::Reference)?;

    let mut out = Vec::new();
    for (line, row) in table.rows.iter().enumerate() {
        let cell = |i: usize| row.get(ix[i]).map(|c| c.trim()).unwrap_or("");
        let channel = |i: usize| {
            cell(i).parse::<u8>().map_err(|_| {
                Error::Reference(format!("row {}: bad channel {:?}", line + 2, cell(i)))
            })
        };
        let rgb = Rgb::new(channel(0)?, channel(1)?, channel(2)?);
        let party = Party::from_token(cell(3))
            .ok_or_else(|| Error::Reference(format!("row {}: bad party {:?}", line + 2, cell(3))))?;
        out.push(ReferenceSample { rgb, party });
    }
    Ok(out)
}
