// dna-music -- render DNA sequences as sound
// Copyright (C) 2020  Fabian Thorand
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

//! Assigning a pitch to every base of a sequence.

use std::collections::BTreeMap;
use std::str::FromStr;

use snafu::{OptionExt, ResultExt, Snafu};

/// Pitch of `A` (C4).
pub const FREQ_A: f64 = 261.63;
/// Pitch of `T` (D4).
pub const FREQ_T: f64 = 293.66;
/// Pitch of `G` (E4).
pub const FREQ_G: f64 = 329.63;
/// Pitch of `C` (F4).
pub const FREQ_C: f64 = 349.23;

/// Maps sequence symbols to frequencies in Hz.
/// Symbols without an entry are silent.
///
/// # Examples
///
/// ```
/// use dna_music::tuning::*;
///
/// let table = FrequencyTable::default();
/// assert_eq!(table.frequency('A'), 261.63);
/// assert_eq!(table.frequency('C'), 349.23);
/// assert_eq!(table.frequency('N'), 0.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct FrequencyTable {
    entries: BTreeMap<char, f64>,
}

impl FrequencyTable {
    /// A table without any entries, every symbol is silent.
    pub fn empty() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Return the frequency of a symbol, or 0 Hz if the symbol is not mapped.
    pub fn frequency(&self, symbol: char) -> f64 {
        self.entries.get(&symbol).copied().unwrap_or(0.0)
    }

    /// Whether the symbol has an explicit entry, even one of 0 Hz.
    pub fn is_mapped(&self, symbol: char) -> bool {
        self.entries.contains_key(&symbol)
    }

    /// Assign a frequency to a symbol, replacing any previous entry.
    pub fn set(&mut self, symbol: char, frequency: f64) -> Result<(), TableError> {
        if !frequency.is_finite() || frequency < 0.0 {
            return Err(TableError::InvalidFrequency { symbol, frequency });
        }
        self.entries.insert(symbol, frequency);
        Ok(())
    }

    /// Same as [`set`](Self::set) for a parsed `SYMBOL=HZ` assignment.
    pub fn apply(&mut self, over: &FrequencyOverride) -> Result<(), TableError> {
        self.set(over.symbol, over.frequency)
    }

    /// Entries ordered by symbol.
    pub fn iter(&self) -> impl Iterator<Item = (char, f64)> + '_ {
        self.entries.iter().map(|(s, f)| (*s, *f))
    }
}

/// The four canonical bases tuned to C, D, E and F of the fourth octave.
impl Default for FrequencyTable {
    fn default() -> Self {
        let entries = [('A', FREQ_A), ('T', FREQ_T), ('G', FREQ_G), ('C', FREQ_C)]
            .iter()
            .copied()
            .collect();
        Self { entries }
    }
}

#[derive(Debug, PartialEq, Snafu)]
pub enum TableError {
    #[snafu(display(
        "Frequency {} Hz for symbol {:?} must be finite and not negative",
        frequency,
        symbol
    ))]
    InvalidFrequency { symbol: char, frequency: f64 },
}

/// A single `SYMBOL=HZ` assignment given on the command line.
///
/// ```
/// use dna_music::tuning::FrequencyOverride;
///
/// let over: FrequencyOverride = "A=440".parse().unwrap();
/// assert_eq!(over.symbol, 'A');
/// assert_eq!(over.frequency, 440.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrequencyOverride {
    pub symbol: char,
    pub frequency: f64,
}

#[derive(Debug, PartialEq, Snafu)]
pub enum OverrideParseError {
    #[snafu(display("Expected SYMBOL=HZ, got {:?}", input))]
    MissingSeparator { input: String },
    #[snafu(display("Expected exactly one symbol before '=', got {:?}", symbol))]
    BadSymbol { symbol: String },
    #[snafu(display("Invalid frequency {:?}: {}", text, source))]
    BadFrequency {
        text: String,
        source: std::num::ParseFloatError,
    },
}

impl FromStr for FrequencyOverride {
    type Err = OverrideParseError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let eq = input.find('=').context(MissingSeparator { input })?;
        let (symbol_text, rest) = (input[..eq].trim(), &input[eq + 1..]);

        let mut chars = symbol_text.chars();
        let symbol = match (chars.next(), chars.next()) {
            (Some(c), None) => c,
            _ => return BadSymbol { symbol: symbol_text }.fail(),
        };
        let text = rest.trim();
        let frequency = text.parse().context(BadFrequency { text })?;
        Ok(Self { symbol, frequency })
    }
}
