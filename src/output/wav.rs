// dna-music -- render DNA sequences as sound
// Copyright (C) 2020  Fabian Thorand
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

//! Mono RIFF/WAVE output.

use std::fmt;
use std::io;
use std::path::Path;
use std::str::FromStr;

use log::debug;
use snafu::{ResultExt, Snafu};

use crate::wave::Waveform;

/// How samples are stored in the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleFormat {
    /// 32 bit IEEE float in `[-1, 1]`.
    Float,
    /// 16 bit signed integers.
    Pcm16,
}

impl SampleFormat {
    fn spec(self, sample_rate: u32) -> hound::WavSpec {
        let (bits_per_sample, sample_format) = match self {
            SampleFormat::Float => (32, hound::SampleFormat::Float),
            SampleFormat::Pcm16 => (16, hound::SampleFormat::Int),
        };
        hound::WavSpec {
            channels: 1,
            sample_rate,
            bits_per_sample,
            sample_format,
        }
    }
}

impl Default for SampleFormat {
    fn default() -> Self {
        SampleFormat::Float
    }
}

impl fmt::Display for SampleFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SampleFormat::Float => write!(f, "float"),
            SampleFormat::Pcm16 => write!(f, "pcm16"),
        }
    }
}

impl FromStr for SampleFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "float" | "f32" => Ok(SampleFormat::Float),
            "pcm16" | "i16" => Ok(SampleFormat::Pcm16),
            other => Err(format!(
                "unknown sample format '{}', expected 'float' or 'pcm16'",
                other
            )),
        }
    }
}

#[derive(Debug, Snafu)]
pub enum WriteError {
    #[snafu(display("Could not create temporary file in {}: {}", dir.display(), source))]
    CreateTemp {
        dir: std::path::PathBuf,
        source: io::Error,
    },
    #[snafu(display("Could not encode audio: {}", source))]
    Encode { source: hound::Error },
    #[snafu(display("Could not move finished file into place: {}", source))]
    Persist { source: io::Error },
}

/// Convert a sample in `[-1, 1]` to a 16 bit integer, clamping anything outside.
fn to_pcm16(sample: f64) -> i16 {
    (sample.max(-1.0).min(1.0) * i16::MAX as f64).round() as i16
}

/// Write the waveform to `path` as an uncompressed mono WAV file, replacing any existing file.
///
/// The audio is first written to a temporary file next to the target, which is only
/// renamed to `path` once the file is complete. A failed write leaves no file behind.
pub fn write_wav(
    path: &Path,
    waveform: &Waveform,
    sample_rate: u32,
    format: SampleFormat,
) -> Result<(), WriteError> {
    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    let mut temp = tempfile::Builder::new()
        .prefix(".dna-music")
        .suffix(".wav.tmp")
        .tempfile_in(dir)
        .context(CreateTemp { dir })?;
    debug!(
        "writing {} samples as {} to {}",
        waveform.len(),
        format,
        temp.path().display()
    );

    {
        let file = io::BufWriter::new(temp.as_file_mut());
        let mut writer = hound::WavWriter::new(file, format.spec(sample_rate)).context(Encode)?;
        for sample in waveform.iter() {
            let written = match format {
                SampleFormat::Float => writer.write_sample(*sample as f32),
                SampleFormat::Pcm16 => writer.write_sample(to_pcm16(*sample)),
            };
            written.context(Encode)?;
        }
        writer.finalize().context(Encode)?;
    }

    // dropping the returned file removes it
    temp.persist(path).map_err(|err| err.error).context(Persist)?;
    Ok(())
}
