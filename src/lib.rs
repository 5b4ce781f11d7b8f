// dna-music -- render DNA sequences as sound
// Copyright (C) 2020  Fabian Thorand
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

//! Turn DNA sequences into music by playing one sine tone per base.

// modules for making sounds
pub mod oscillator;
pub mod tuning;
pub mod wave;

// Building songs
pub mod compose;
pub mod render;
pub mod sequence;

pub mod output;
