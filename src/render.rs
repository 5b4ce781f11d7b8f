// dna-music -- render DNA sequences as sound
// Copyright (C) 2020  Fabian Thorand
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

//! The glue responsible for turning a sequence into an actual waveform.

use std::collections::HashMap;

use log::{debug, trace};
use snafu::{ensure, OptionExt, Snafu};

use crate::oscillator::Oscillator;
use crate::sequence::Sequence;
use crate::tuning::FrequencyTable;
use crate::wave::Waveform;

pub const DEFAULT_SAMPLE_RATE: u32 = 44100;
pub const DEFAULT_NOTE_DURATION: f64 = 0.2;

/// Largest number of samples a rendered sequence may have.
///
/// A WAV data chunk holds at most `u32::MAX` bytes, which is this many 32 bit samples.
pub const MAX_SAMPLES: usize = (u32::MAX / 4) as usize;

/// Information about how the sequence is sampled.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderParams {
    sample_rate: u32,
    note_duration: f64,
}

impl RenderParams {
    /// Validate the parameters, making sure every base yields at least one sample.
    pub fn new(sample_rate: u32, note_duration: f64) -> Result<Self, ParamError> {
        ensure!(sample_rate > 0, ZeroSampleRate);
        ensure!(
            note_duration.is_finite() && note_duration > 0.0,
            InvalidDuration { note_duration }
        );
        ensure!(
            sample_rate as f64 * note_duration <= MAX_SAMPLES as f64,
            NoteTooLong {
                sample_rate,
                note_duration
            }
        );
        let params = Self {
            sample_rate,
            note_duration,
        };
        ensure!(
            params.samples_per_tone() > 0,
            EmptyTone {
                sample_rate,
                note_duration
            }
        );
        Ok(params)
    }

    /// Number of samples per second.
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Length of a single base in seconds.
    pub fn note_duration(&self) -> f64 {
        self.note_duration
    }

    /// Number of samples generated for each base, the duration truncated to whole samples.
    ///
    /// ```
    /// # use dna_music::render::RenderParams;
    /// assert_eq!(RenderParams::default().samples_per_tone(), 8820);
    /// assert_eq!(RenderParams::new(1000, 0.0125).unwrap().samples_per_tone(), 12);
    /// ```
    pub fn samples_per_tone(&self) -> usize {
        (self.sample_rate as f64 * self.note_duration) as usize
    }
}

/// 44.1 kHz with one base every 200 ms.
impl Default for RenderParams {
    fn default() -> Self {
        Self {
            sample_rate: DEFAULT_SAMPLE_RATE,
            note_duration: DEFAULT_NOTE_DURATION,
        }
    }
}

#[derive(Debug, PartialEq, Snafu)]
pub enum ParamError {
    #[snafu(display("The sample rate must be positive"))]
    ZeroSampleRate,
    #[snafu(display("The note duration must be a positive number of seconds, got {}", note_duration))]
    InvalidDuration { note_duration: f64 },
    #[snafu(display(
        "A note duration of {} s is shorter than one sample at {} Hz",
        note_duration,
        sample_rate
    ))]
    EmptyTone { sample_rate: u32, note_duration: f64 },
    #[snafu(display(
        "A note duration of {} s at {} Hz does not fit into a WAV file",
        note_duration,
        sample_rate
    ))]
    NoteTooLong { sample_rate: u32, note_duration: f64 },
    #[snafu(display(
        "{} symbols of {} samples each do not fit into a WAV file",
        symbols,
        samples_per_tone
    ))]
    TooManySamples {
        symbols: usize,
        samples_per_tone: usize,
    },
}

/// Result of rendering a sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct Rendered {
    /// Concatenated tones, not yet normalized.
    pub waveform: Waveform,
    /// Number of symbols without an entry in the frequency table.
    pub unmapped: usize,
}

/// Concatenate one tone per symbol in sequence order.
///
/// Fails before allocating anything if the result would exceed [`MAX_SAMPLES`].
pub fn render(
    sequence: &Sequence,
    table: &FrequencyTable,
    params: &RenderParams,
) -> Result<Rendered, ParamError> {
    let tone_len = params.samples_per_tone();
    let total = sequence
        .len()
        .checked_mul(tone_len)
        .filter(|total| *total <= MAX_SAMPLES);
    let total = total.context(TooManySamples {
        symbols: sequence.len(),
        samples_per_tone: tone_len,
    })?;
    let mut waveform = Waveform::with_capacity(total);
    let mut tones: HashMap<char, Vec<f64>> = HashMap::new();
    let mut unmapped = 0;

    debug!(
        "rendering {} symbols at {} Hz, {} samples per symbol",
        sequence.len(),
        params.sample_rate(),
        tone_len
    );

    for symbol in sequence.iter() {
        if !table.is_mapped(symbol) {
            unmapped += 1;
        }
        let tone = tones.entry(symbol).or_insert_with(|| {
            let osc = Oscillator::new(params.sample_rate() as f64, table.frequency(symbol));
            trace!("synthesizing {:?} at {} Hz", symbol, osc.frequency());
            osc.tone(tone_len)
        });
        waveform.extend_from_slice(tone);
    }

    Ok(Rendered { waveform, unmapped })
}
