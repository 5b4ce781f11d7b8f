// dna-music -- render DNA sequences as sound
// Copyright (C) 2020  Fabian Thorand
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

//! `dna-music` renders a DNA sequence to a wav file, one tone per base.

use std::path::PathBuf;

use log::{debug, error};
use structopt::StructOpt;

use dna_music::compose::{self, Input, Job};
use dna_music::output::SampleFormat;
use dna_music::tuning::FrequencyOverride;

#[derive(Debug, StructOpt)]
#[structopt(name = "dna-music", about = "Listening to DNA")]
struct Opt {
    #[structopt(short = "v", long = "verbose", parse(from_occurrences))]
    verbose: usize,

    /// The sequence to play, every character is one base. A built-in sequence is used if
    /// neither this nor an input file is given.
    #[structopt(conflicts_with = "input")]
    sequence: Option<String>,

    /// Read the sequence from a plain text, FASTA or FASTQ file.
    #[structopt(short, long, parse(from_os_str))]
    input: Option<PathBuf>,

    /// Output wav file.
    #[structopt(short, long, parse(from_os_str), default_value = "dna_music.wav")]
    output: PathBuf,

    /// Number of samples per second.
    #[structopt(short = "r", long, default_value = "44100")]
    sample_rate: u32,

    /// Length of each base in seconds.
    #[structopt(short = "d", long, default_value = "0.2")]
    note_duration: f64,

    /// Change or add the pitch of a symbol, e.g. `-f A=440`. May be repeated.
    #[structopt(short = "f", long = "freq", number_of_values = 1)]
    freq: Vec<FrequencyOverride>,

    /// Sample format of the output file: float or pcm16.
    #[structopt(long, default_value = "float")]
    format: SampleFormat,

    /// Treat lower case bases like their upper case counterparts.
    #[structopt(long)]
    ignore_case: bool,

    /// The input is RNA: play uracil (U) with the pitch of thymine (T).
    #[structopt(long)]
    rna: bool,
}

fn job_from(opt: Opt) -> Result<Job, compose::Error> {
    let input = match (opt.sequence, opt.input) {
        (Some(sequence), _) => Input::Literal(sequence),
        (None, Some(path)) => Input::File(path),
        (None, None) => Input::Default,
    };
    Job {
        input,
        rna: opt.rna,
        ignore_case: opt.ignore_case,
        format: opt.format,
        output: opt.output,
        ..Job::default()
    }
    .with_timing(opt.sample_rate, opt.note_duration)?
    .with_overrides(&opt.freq)
}

fn main() {
    let opt = Opt::from_args();

    let level = match opt.verbose {
        0 => log::Level::Info,
        1 => log::Level::Debug,
        _ => log::Level::Trace,
    };
    if let Err(err) = simple_logger::init_with_level(level) {
        eprintln!("Could not set up logging: {}", err);
    }

    match job_from(opt).and_then(|job| compose::run(&job)) {
        Ok(summary) => {
            debug!("{:?}", summary);
            println!("Saved as {}", summary.output.display());
        }
        Err(err) => {
            error!("{}", err);
            std::process::exit(1);
        }
    }
}
