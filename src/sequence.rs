// dna-music -- render DNA sequences as sound
// Copyright (C) 2020  Fabian Thorand
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

//! Reading the base sequences that are turned into music.

use std::path::Path;

use log::debug;
use needletail::errors::ParseError;
use needletail::parse_fastx_reader;
use snafu::{ResultExt, Snafu};

/// The sequence that is played when no other input is given.
pub const DEFAULT_SEQUENCE: &str = "ATGCGTACGTTAGCGATCGATGCGTATATAGCG";

/// An ordered list of single-character symbols, nominally the bases `A`, `T`, `G` and `C`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Sequence {
    symbols: Vec<char>,
}

#[derive(Debug, Snafu)]
pub enum ReadError {
    #[snafu(display("{}", source))]
    Io { source: std::io::Error },
    #[snafu(display("Malformed FASTA/FASTQ input: {}", source))]
    Fastx { source: ParseError },
    #[snafu(display("Plain text input is not valid UTF-8: {}", source))]
    Encoding { source: std::string::FromUtf8Error },
}

impl Sequence {
    /// Every character of the input becomes a symbol, including whitespace.
    ///
    /// ```
    /// # use dna_music::sequence::Sequence;
    /// assert_eq!(Sequence::from_literal("AT G").len(), 4);
    /// ```
    pub fn from_literal(input: &str) -> Self {
        Self {
            symbols: input.chars().collect(),
        }
    }

    /// Header-less text where line breaks and other whitespace are not part of the sequence.
    pub fn from_plain_text(input: &str) -> Self {
        Self {
            symbols: input.chars().filter(|c| !c.is_whitespace()).collect(),
        }
    }

    /// Concatenate the records of FASTA or FASTQ data in order.
    ///
    /// ```
    /// # use dna_music::sequence::Sequence;
    /// let seq = Sequence::from_fastx(b">chr1 test\nATG\nCG\n").unwrap();
    /// assert_eq!(seq, Sequence::from_literal("ATGCG"));
    /// ```
    pub fn from_fastx(input: &[u8]) -> Result<Self, ReadError> {
        let mut reader = parse_fastx_reader(input).context(Fastx)?;
        let mut symbols = Vec::new();
        let mut records = 0;
        while let Some(record) = reader.next() {
            let record = record.context(Fastx)?;
            symbols.extend(
                record
                    .seq()
                    .iter()
                    .map(|b| *b as char)
                    .filter(|c| !c.is_whitespace()),
            );
            records += 1;
        }
        debug!("parsed {} symbols from {} records", symbols.len(), records);
        Ok(Self { symbols })
    }

    /// Parse FASTA/FASTQ if the data starts with a record header, plain text otherwise.
    pub fn parse(input: &[u8]) -> Result<Self, ReadError> {
        let start = input
            .iter()
            .position(|b| !b.is_ascii_whitespace())
            .unwrap_or(input.len());
        match input.get(start) {
            Some(b'>') | Some(b'@') => Self::from_fastx(&input[start..]),
            _ => {
                let text = String::from_utf8(input.to_vec()).context(Encoding)?;
                Ok(Self::from_plain_text(&text))
            }
        }
    }

    pub fn read_file(path: &Path) -> Result<Self, ReadError> {
        let contents = std::fs::read(path).context(Io)?;
        Self::parse(&contents)
    }

    /// Fold lower case bases onto their canonical upper case symbols, one symbol each.
    pub fn to_uppercase(&self) -> Self {
        Self {
            symbols: self.symbols.iter().map(|c| c.to_ascii_uppercase()).collect(),
        }
    }

    /// Read RNA as DNA by replacing uracil with thymine, keeping the case.
    ///
    /// ```
    /// # use dna_music::sequence::Sequence;
    /// let seq = Sequence::from_literal("AUGu").rna_to_dna();
    /// assert_eq!(seq, Sequence::from_literal("ATGt"));
    /// ```
    pub fn rna_to_dna(&self) -> Self {
        Self {
            symbols: self
                .symbols
                .iter()
                .map(|c| match c {
                    'U' => 'T',
                    'u' => 't',
                    other => *other,
                })
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn symbols(&self) -> &[char] {
        &self.symbols
    }

    pub fn iter(&self) -> impl Iterator<Item = char> + '_ {
        self.symbols.iter().copied()
    }
}
