// dna-music -- render DNA sequences as sound
// Copyright (C) 2020  Fabian Thorand
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

use std::f64::consts::PI;

/// A sine oscillator sampled at a fixed sample rate.
///
/// Samples are computed from the absolute sample index rather than an accumulated phase,
/// so sample `i` is exactly `sin(2π · f · i / r)`.
#[derive(Debug, Clone, Copy)]
pub struct Oscillator {
    sample_rate: f64,
    frequency: f64,
}

impl Oscillator {
    pub fn new(sample_rate: f64, frequency: f64) -> Self {
        Self {
            sample_rate,
            frequency,
        }
    }

    pub fn frequency(&self) -> f64 {
        self.frequency
    }

    /// Sample at index `index`, i.e. at time `index / sample_rate` seconds.
    pub fn sample(&self, index: usize) -> f64 {
        let time = index as f64 / self.sample_rate;
        (2.0 * PI * self.frequency * time).sin()
    }

    /// Generate the first `sample_count` samples, covering `[0, sample_count / sample_rate)`.
    ///
    /// ```
    /// # use dna_music::oscillator::Oscillator;
    /// let tone = Oscillator::new(8.0, 2.0).tone(4);
    /// assert_eq!(tone.len(), 4);
    /// assert_eq!(tone[0], 0.0);
    /// assert!((tone[1] - 1.0).abs() < 1e-12);
    /// ```
    pub fn tone(&self, sample_count: usize) -> Vec<f64> {
        if self.frequency == 0.0 {
            return vec![0.0; sample_count];
        }
        (0..sample_count).map(|i| self.sample(i)).collect()
    }
}
