// dna-music -- render DNA sequences as sound
// Copyright (C) 2020  Fabian Thorand
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

//! This is the namespace for all parts dealing with data in sampled waves.

use snafu::Snafu;

/// A buffer holding mono floating point audio data.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Waveform {
    samples: Vec<f64>,
}

impl Waveform {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(sample_count: usize) -> Self {
        Self {
            samples: Vec::with_capacity(sample_count),
        }
    }

    /// Append samples to the end of the waveform.
    pub fn extend_from_slice(&mut self, samples: &[f64]) {
        self.samples.extend_from_slice(samples);
    }

    /// Size of the buffer in samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    pub fn iter(&self) -> impl Iterator<Item = &f64> {
        self.samples.iter()
    }

    /// Largest absolute sample value, zero for an empty waveform.
    ///
    /// ```
    /// # use dna_music::wave::Waveform;
    /// let wave: Waveform = vec![0.25, -0.5, 0.125].into();
    /// assert_eq!(wave.peak(), 0.5);
    /// ```
    pub fn peak(&self) -> f64 {
        self.samples.iter().fold(0.0, |peak, s| peak.max(s.abs()))
    }

    /// Scale the waveform so that its peak absolute amplitude is exactly 1.0.
    ///
    /// Returns the peak before scaling. An empty or completely silent waveform
    /// cannot be scaled and is left unchanged.
    pub fn normalize(&mut self) -> Result<f64, NormalizeError> {
        if self.samples.is_empty() {
            return Err(NormalizeError::Empty);
        }
        let peak = self.peak();
        if peak == 0.0 {
            return Err(NormalizeError::Silent {
                samples: self.samples.len(),
            });
        }
        self.samples.iter_mut().for_each(|s| *s /= peak);
        Ok(peak)
    }

    pub fn into_samples(self) -> Vec<f64> {
        self.samples
    }
}

impl From<Vec<f64>> for Waveform {
    fn from(samples: Vec<f64>) -> Self {
        Self { samples }
    }
}

/// Reasons why a waveform cannot be normalized.
#[derive(Debug, PartialEq, Eq, Snafu)]
pub enum NormalizeError {
    #[snafu(display("The waveform contains no samples"))]
    Empty,
    #[snafu(display("All {} samples of the waveform are silent", samples))]
    Silent { samples: usize },
}
