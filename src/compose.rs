// dna-music -- render DNA sequences as sound
// Copyright (C) 2020  Fabian Thorand
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

//! Translate a base sequence into a finished audio file.

use std::path::PathBuf;

use log::{info, warn};
use snafu::{ResultExt, Snafu};

use crate::output::{self, SampleFormat};
use crate::render::{self, ParamError, RenderParams};
use crate::sequence::{ReadError, Sequence, DEFAULT_SEQUENCE};
use crate::tuning::{FrequencyOverride, FrequencyTable, TableError};
use crate::wave::NormalizeError;

/// The output file used when none is given.
pub const DEFAULT_OUTPUT: &str = "dna_music.wav";

/// Where the sequence comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum Input {
    /// Every character of the string is a symbol.
    Literal(String),
    /// A plain text, FASTA or FASTQ file.
    File(PathBuf),
    /// The built-in demo sequence.
    Default,
}

/// Everything needed for turning a sequence into a file.
#[derive(Debug, Clone)]
pub struct Job {
    pub input: Input,
    /// Read `U` as `T`, so RNA plays with the DNA pitches.
    pub rna: bool,
    /// Match lower case bases as if they were upper case.
    pub ignore_case: bool,
    pub params: RenderParams,
    pub table: FrequencyTable,
    pub format: SampleFormat,
    pub output: PathBuf,
}

impl Default for Job {
    fn default() -> Self {
        Self {
            input: Input::Default,
            rna: false,
            ignore_case: false,
            params: RenderParams::default(),
            table: FrequencyTable::default(),
            format: SampleFormat::default(),
            output: DEFAULT_OUTPUT.into(),
        }
    }
}

/// Facts about a finished run.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub output: PathBuf,
    pub bases: usize,
    /// Symbols that were rendered as silence.
    pub unmapped: usize,
    pub samples: usize,
    pub seconds: f64,
    /// Peak amplitude before normalization, `None` if the whole sequence was silent.
    pub peak: Option<f64>,
}

#[derive(Debug, Snafu)]
pub enum Error {
    #[snafu(display("Could not read sequence from {}: {}", path.display(), source))]
    ReadSequence {
        path: PathBuf,
        source: ReadError,
    },
    #[snafu(display("Invalid render parameters: {}", source))]
    Params { source: ParamError },
    #[snafu(display("Invalid frequency table: {}", source))]
    Table { source: TableError },
    #[snafu(display("The sequence is empty, there is nothing to render"))]
    EmptySequence,
    #[snafu(display("Could not write {}: {}", path.display(), source))]
    Write {
        path: PathBuf,
        source: output::WriteError,
    },
}

impl Job {
    /// Replace the sample rate and note duration, validating them first.
    pub fn with_timing(self, sample_rate: u32, note_duration: f64) -> Result<Self, Error> {
        let params = RenderParams::new(sample_rate, note_duration).context(Params)?;
        Ok(Self { params, ..self })
    }

    /// Apply `SYMBOL=HZ` assignments on top of the current frequency table.
    pub fn with_overrides(mut self, overrides: &[FrequencyOverride]) -> Result<Self, Error> {
        for over in overrides {
            self.table.apply(over).context(Table)?;
        }
        Ok(self)
    }

    fn read_sequence(&self) -> Result<Sequence, Error> {
        let sequence = match &self.input {
            Input::Literal(text) => Sequence::from_literal(text),
            Input::File(path) => Sequence::read_file(path).context(ReadSequence { path })?,
            Input::Default => Sequence::from_literal(DEFAULT_SEQUENCE),
        };
        let sequence = if self.rna {
            sequence.rna_to_dna()
        } else {
            sequence
        };
        Ok(if self.ignore_case {
            sequence.to_uppercase()
        } else {
            sequence
        })
    }
}

/// Read, render, normalize and write, in that order.
///
/// An empty sequence is rejected before anything is written. A sequence consisting only
/// of unmapped symbols is written as silence.
pub fn run(job: &Job) -> Result<Summary, Error> {
    let sequence = job.read_sequence()?;
    let rendered = render::render(&sequence, &job.table, &job.params).context(Params)?;
    let mut waveform = rendered.waveform;

    if rendered.unmapped > 0 {
        warn!(
            "{} of {} symbols have no pitch and are rendered as silence",
            rendered.unmapped,
            sequence.len()
        );
    }

    let peak = match waveform.normalize() {
        Ok(peak) => Some(peak),
        Err(NormalizeError::Empty) => return EmptySequence.fail(),
        Err(err @ NormalizeError::Silent { .. }) => {
            warn!("{}, writing silence", err);
            None
        }
    };

    let sample_rate = job.params.sample_rate();
    let seconds = waveform.len() as f64 / sample_rate as f64;
    info!(
        "{} bases at {} Hz, total length {} samples ({:.2} seconds)",
        sequence.len(),
        sample_rate,
        waveform.len(),
        seconds
    );

    output::write_wav(&job.output, &waveform, sample_rate, job.format).context(Write {
        path: &job.output,
    })?;

    Ok(Summary {
        output: job.output.clone(),
        bases: sequence.len(),
        unmapped: rendered.unmapped,
        samples: waveform.len(),
        seconds,
        peak,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use expect_test::{expect, Expect};

    /// Compare the error message, with the temporary directory replaced by `$DIR`.
    fn check_error(job: &Job, dir: &tempfile::TempDir, expected: Expect) {
        let message = run(job).unwrap_err().to_string();
        let message = message.replace(&dir.path().display().to_string(), "$DIR");
        expected.assert_eq(&message);
    }

    fn job_in(dir: &tempfile::TempDir, input: Input) -> Job {
        Job {
            input,
            output: dir.path().join("out.wav"),
            ..Job::default()
        }
    }

    #[test]
    fn default_sequence() {
        let dir = tempfile::tempdir().unwrap();
        let job = job_in(&dir, Input::Default);
        let summary = run(&job).unwrap();
        assert_eq!(summary.bases, 33);
        assert_eq!(summary.unmapped, 0);
        assert_eq!(summary.samples, 33 * 8820);
        assert!((summary.seconds - 6.6).abs() < 1e-9);

        let mut reader = hound::WavReader::open(&job.output).unwrap();
        assert_eq!(reader.spec().sample_rate, 44100);
        assert_eq!(reader.spec().channels, 1);
        let peak = reader
            .samples::<f32>()
            .map(|s| s.unwrap().abs())
            .fold(0.0f32, f32::max);
        assert_eq!(peak, 1.0);
    }

    #[test]
    fn single_base_is_normalized() {
        let dir = tempfile::tempdir().unwrap();
        let job = job_in(&dir, Input::Literal("A".into()));
        let summary = run(&job).unwrap();
        assert_eq!(summary.samples, 8820);
        let peak = summary.peak.unwrap();
        assert!(peak > 0.99 && peak <= 1.0);

        let mut reader = hound::WavReader::open(&job.output).unwrap();
        let samples: Vec<f32> = reader.samples::<f32>().map(|s| s.unwrap()).collect();
        assert_eq!(samples.len(), 8820);
        assert_eq!(samples[0], 0.0);
        let written_peak = samples.iter().fold(0.0f32, |p, s| p.max(s.abs()));
        assert_eq!(written_peak, 1.0);
    }

    #[test]
    fn unmapped_symbols() {
        let dir = tempfile::tempdir().unwrap();
        let job = job_in(&dir, Input::Literal("AX".into()));
        let summary = run(&job).unwrap();
        assert_eq!(summary.unmapped, 1);
        assert_eq!(summary.samples, 2 * 8820);

        let mut reader = hound::WavReader::open(&job.output).unwrap();
        let samples: Vec<f32> = reader.samples::<f32>().map(|s| s.unwrap()).collect();
        assert!(samples[8820..].iter().all(|s| *s == 0.0));
    }

    #[test]
    fn silent_sequence_is_written_as_silence() {
        let dir = tempfile::tempdir().unwrap();
        let job = job_in(&dir, Input::Literal("atgc".into()));
        let summary = run(&job).unwrap();
        assert_eq!(summary.peak, None);
        assert_eq!(summary.unmapped, 4);

        let mut reader = hound::WavReader::open(&job.output).unwrap();
        assert_eq!(reader.len() as usize, 4 * 8820);
        assert!(reader.samples::<f32>().all(|s| s.unwrap() == 0.0));
    }

    #[test]
    fn ignore_case() {
        let dir = tempfile::tempdir().unwrap();
        let job = Job {
            ignore_case: true,
            ..job_in(&dir, Input::Literal("atgc".into()))
        };
        let summary = run(&job).unwrap();
        assert_eq!(summary.unmapped, 0);
        assert!(summary.peak.is_some());
    }

    #[test]
    fn fasta_input() {
        let dir = tempfile::tempdir().unwrap();
        let fasta = dir.path().join("seq.fa");
        std::fs::write(&fasta, ">test\nGATT\nACA\n").unwrap();
        let job = Job {
            params: RenderParams::new(8000, 0.1).unwrap(),
            format: SampleFormat::Pcm16,
            ..job_in(&dir, Input::File(fasta))
        };
        let summary = run(&job).unwrap();
        assert_eq!(summary.bases, 7);
        assert_eq!(summary.samples, 7 * 800);

        let reader = hound::WavReader::open(&job.output).unwrap();
        assert_eq!(reader.spec().sample_rate, 8000);
        assert_eq!(reader.spec().bits_per_sample, 16);
    }

    #[test]
    fn custom_table() {
        let dir = tempfile::tempdir().unwrap();
        let mut table = FrequencyTable::empty();
        table.set('N', 441.0).unwrap();
        let job = Job {
            table,
            ..job_in(&dir, Input::Literal("NA".into()))
        };
        let summary = run(&job).unwrap();
        assert_eq!(summary.unmapped, 1);
    }

    #[test]
    fn identical_runs() {
        let dir = tempfile::tempdir().unwrap();
        let job = job_in(&dir, Input::Literal("GATTACA".into()));
        run(&job).unwrap();
        let first = std::fs::read(&job.output).unwrap();
        run(&job).unwrap();
        let second = std::fs::read(&job.output).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn empty_sequence() {
        let dir = tempfile::tempdir().unwrap();
        let job = job_in(&dir, Input::Literal(String::new()));
        check_error(
            &job,
            &dir,
            expect![[r#"The sequence is empty, there is nothing to render"#]],
        );
        assert!(!job.output.exists());
    }

    #[test]
    fn missing_input_file() {
        let dir = tempfile::tempdir().unwrap();
        let job = job_in(&dir, Input::File(dir.path().join("missing.fa")));
        let err = run(&job).unwrap_err();
        assert!(matches!(
            err,
            Error::ReadSequence {
                source: ReadError::Io { .. },
                ..
            }
        ));
        assert!(!job.output.exists());
    }

    #[test]
    fn malformed_fastq_file() {
        let dir = tempfile::tempdir().unwrap();
        let fastq = dir.path().join("seq.fq");
        std::fs::write(&fastq, "@read
GATT
").unwrap();
        let job = job_in(&dir, Input::File(fastq));
        let err = run(&job).unwrap_err();
        assert!(matches!(
            err,
            Error::ReadSequence {
                source: ReadError::Fastx { .. },
                ..
            }
        ));
        assert!(!job.output.exists());
    }

    #[test]
    fn rna_input() {
        let dir = tempfile::tempdir().unwrap();
        let job = Job {
            rna: true,
            ignore_case: true,
            ..job_in(&dir, Input::Literal("AUGcu".into()))
        };
        let summary = run(&job).unwrap();
        assert_eq!(summary.unmapped, 0);

        let plain = job_in(&dir, Input::Literal("AUGcu".into()));
        assert_eq!(run(&plain).unwrap().unmapped, 3);
    }

    /// Oversized output is refused before rendering, leaving no file.
    #[test]
    fn output_too_long() {
        let dir = tempfile::tempdir().unwrap();
        let job = Job {
            params: RenderParams::new(44100, 10000.0).unwrap(),
            ..job_in(&dir, Input::Literal("ATG".into()))
        };
        check_error(
            &job,
            &dir,
            expect![[r#"Invalid render parameters: 3 symbols of 441000000 samples each do not fit into a WAV file"#]],
        );
        assert!(!job.output.exists());
    }

    #[test]
    fn unwritable_output() {
        let dir = tempfile::tempdir().unwrap();
        let job = Job {
            output: dir.path().join("no").join("such").join("dir.wav"),
            ..job_in(&dir, Input::Default)
        };
        // the io error itself names a random temporary file
        let message = run(&job).unwrap_err().to_string();
        let message = message.replace(&dir.path().display().to_string(), "$DIR");
        assert!(
            message.starts_with(
                "Could not write $DIR/no/such/dir.wav: Could not create temporary file in $DIR/no/such: "
            ),
            "{}",
            message
        );
        assert!(matches!(
            run(&job),
            Err(Error::Write {
                source: output::WriteError::CreateTemp { .. },
                ..
            })
        ));
    }

    #[test]
    fn timing_and_overrides() {
        let job = Job::default()
            .with_timing(8000, 0.5)
            .unwrap()
            .with_overrides(&["A=440".parse().unwrap(), "U=100".parse().unwrap()])
            .unwrap();
        assert_eq!(job.params.samples_per_tone(), 4000);
        assert_eq!(job.table.frequency('A'), 440.0);
        assert_eq!(job.table.frequency('U'), 100.0);
        assert_eq!(job.table.frequency('T'), 293.66);
    }

    #[test]
    fn invalid_settings() {
        let err = Job::default().with_timing(0, 0.2).unwrap_err();
        assert!(matches!(err, Error::Params { .. }));
        let over = FrequencyOverride {
            symbol: 'A',
            frequency: -5.0,
        };
        let err = Job::default().with_overrides(&[over]).unwrap_err();
        expect![[r#"Invalid frequency table: Frequency -5 Hz for symbol 'A' must be finite and not negative"#]]
            .assert_eq(&err.to_string());
    }
}
