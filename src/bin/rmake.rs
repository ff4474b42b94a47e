// rmakers -- rhythm-makers for algorithmic composition
// Copyright (C) 2020  Fabian Thorand
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

//! `rmake` - runs a rhythm-maker over a list of divisions and prints the result.

use std::num::ParseIntError;

use log::info;
use simple_logger;
use structopt::StructOpt;

use rmakers::error::Result;
use rmakers::incise::Incise;
use rmakers::interpolate::{Interpolation, Warp};
use rmakers::maker::RhythmMaker;
use rmakers::makers::{
    AccelerandoRhythmMaker, EvenDivisionRhythmMaker, IncisedRhythmMaker,
    MultipliedDurationRhythmMaker, NoteRhythmMaker, TaleaRhythmMaker, TupletRhythmMaker,
};
use rmakers::music::{Duration, LeafKind};
use rmakers::spelling::Spelling;
use rmakers::state::State;
use rmakers::talea::Talea;

#[derive(Debug, StructOpt)]
#[structopt(name = "rmake", about = "Making rhythms from divisions")]
struct Opt {
    #[structopt(short = "v", long = "verbose", parse(from_occurrences))]
    verbose: usize,

    /// The divisions to fill, e.g. `3/8,4/8,3/8`.
    #[structopt(short, long, use_delimiter = true, required = true)]
    divisions: Vec<Duration>,

    /// Call the maker once per chunk of this many divisions, passing the state along.
    #[structopt(long)]
    split: Option<usize>,

    #[structopt(flatten)]
    spelling: SpellingOpt,

    #[structopt(subcommand)]
    maker: MakerOpt,
}

#[derive(Debug, StructOpt)]
struct SpellingOpt {
    /// Notes of this duration or longer are split into shorter tied notes.
    #[structopt(long)]
    forbid_notes: Option<Duration>,

    /// Rests of this duration or longer are split into shorter rests.
    #[structopt(long)]
    forbid_rests: Option<Duration>,

    /// Tied parts get longer instead of shorter.
    #[structopt(long)]
    increase_monotonic: bool,
}

impl SpellingOpt {
    fn spelling(&self) -> Spelling {
        let mut spelling = Spelling::new().increase_monotonic(self.increase_monotonic);
        if let Some(duration) = self.forbid_notes {
            spelling = spelling.forbid_notes(duration);
        }
        if let Some(duration) = self.forbid_rests {
            spelling = spelling.forbid_rests(duration);
        }
        spelling
    }
}

#[derive(Debug, StructOpt)]
enum MakerOpt {
    /// One note (or tied notes) per division.
    Note,
    /// Cycle through a talea of counts.
    Talea {
        /// Counts of the talea; negative counts are rests.
        #[structopt(required = true, allow_hyphen_values = true)]
        counts: Vec<i64>,
        #[structopt(long, default_value = "16")]
        denominator: i64,
        #[structopt(long, use_delimiter = true, allow_hyphen_values = true)]
        preamble: Vec<i64>,
        #[structopt(long, use_delimiter = true, allow_hyphen_values = true)]
        end_counts: Vec<i64>,
        #[structopt(long, use_delimiter = true, allow_hyphen_values = true)]
        extra_counts: Vec<i64>,
        #[structopt(long)]
        read_talea_once_only: bool,
    },
    /// Cut prefixes and suffixes into each division.
    Incised {
        #[structopt(long, use_delimiter = true, allow_hyphen_values = true)]
        prefix: Vec<i64>,
        #[structopt(long, use_delimiter = true)]
        prefix_counts: Vec<usize>,
        #[structopt(long, use_delimiter = true, allow_hyphen_values = true)]
        suffix: Vec<i64>,
        #[structopt(long, use_delimiter = true)]
        suffix_counts: Vec<usize>,
        #[structopt(long, default_value = "16")]
        denominator: i64,
        #[structopt(long, use_delimiter = true, allow_hyphen_values = true)]
        body_ratio: Vec<i64>,
        #[structopt(long, use_delimiter = true, allow_hyphen_values = true)]
        extra_counts: Vec<i64>,
        #[structopt(long)]
        fill_with_rests: bool,
        #[structopt(long)]
        outer_divisions_only: bool,
    },
    /// Equal notes of a fixed denominator.
    Even {
        #[structopt(required = true)]
        denominators: Vec<i64>,
        #[structopt(long, use_delimiter = true, allow_hyphen_values = true)]
        extra_counts: Vec<i64>,
    },
    /// Durations interpolated from `start` to `stop`.
    Accelerando {
        #[structopt(long, default_value = "1/8")]
        start: Duration,
        #[structopt(long, default_value = "1/16")]
        stop: Duration,
        #[structopt(long, default_value = "1/16")]
        written: Duration,
        /// Power curve exponent; a cosine curve is used if not given.
        #[structopt(long)]
        exponent: Option<f64>,
        /// Slow down instead of speeding up.
        #[structopt(long)]
        ritardando: bool,
    },
    /// One tuplet per division from ratios such as `1,2,-1`.
    Tuplet {
        #[structopt(required = true, allow_hyphen_values = true, parse(try_from_str = parse_ratio))]
        ratios: Vec<Vec<i64>>,
    },
    /// A single leaf per division with a multiplier.
    Multiplied {
        #[structopt(long, default_value = "1")]
        unit: Duration,
        #[structopt(long)]
        rests: bool,
    },
}

fn parse_ratio(text: &str) -> std::result::Result<Vec<i64>, ParseIntError> {
    text.split(',').map(|part| part.trim().parse()).collect()
}

impl MakerOpt {
    fn build(self, spelling: Spelling) -> Result<Box<dyn RhythmMaker>> {
        let maker: Box<dyn RhythmMaker> = match self {
            MakerOpt::Note => Box::new(NoteRhythmMaker::new().spelling(spelling)),
            MakerOpt::Talea {
                counts,
                denominator,
                preamble,
                end_counts,
                extra_counts,
                read_talea_once_only,
            } => {
                let talea = Talea::new(counts, denominator)?
                    .with_preamble(preamble)?
                    .with_end_counts(end_counts)?;
                Box::new(
                    TaleaRhythmMaker::new(talea)?
                        .extra_counts(extra_counts)
                        .read_talea_once_only(read_talea_once_only)
                        .spelling(spelling),
                )
            }
            MakerOpt::Incised {
                prefix,
                prefix_counts,
                suffix,
                suffix_counts,
                denominator,
                body_ratio,
                extra_counts,
                fill_with_rests,
                outer_divisions_only,
            } => {
                let mut incise = Incise::new()
                    .prefix(prefix, prefix_counts)
                    .suffix(suffix, suffix_counts)
                    .talea_denominator(denominator)
                    .fill_with_rests(fill_with_rests)
                    .outer_divisions_only(outer_divisions_only);
                if !body_ratio.is_empty() {
                    incise = incise.body_ratio(body_ratio);
                }
                Box::new(
                    IncisedRhythmMaker::new(incise)?
                        .extra_counts(extra_counts)?
                        .spelling(spelling),
                )
            }
            MakerOpt::Even {
                denominators,
                extra_counts,
            } => Box::new(
                EvenDivisionRhythmMaker::new(denominators)?
                    .extra_counts(extra_counts)
                    .spelling(spelling),
            ),
            MakerOpt::Accelerando {
                start,
                stop,
                written,
                exponent,
                ritardando,
            } => {
                let mut interpolation = Interpolation::new(start, stop, written)?;
                if ritardando {
                    interpolation = interpolation.reverse();
                }
                let warp = exponent.map_or(Warp::Cosine, Warp::Power);
                Box::new(
                    AccelerandoRhythmMaker::new()
                        .interpolations(vec![interpolation])?
                        .warp(warp)?
                        .spelling(spelling),
                )
            }
            MakerOpt::Tuplet { ratios } => {
                Box::new(TupletRhythmMaker::new(ratios)?.spelling(spelling))
            }
            MakerOpt::Multiplied { unit, rests } => {
                let kind = if rests { LeafKind::Rest } else { LeafKind::Note };
                Box::new(MultipliedDurationRhythmMaker::new().unit(unit)?.kind(kind))
            }
        };
        Ok(maker)
    }
}

fn main() -> Result<()> {
    let opt = Opt::from_args();

    let level = match opt.verbose {
        0 => log::Level::Info,
        1 => log::Level::Debug,
        _ => log::Level::Trace,
    };
    simple_logger::init_with_level(level).unwrap();

    let spelling = opt.spelling.spelling();
    let maker = opt.maker.build(spelling)?;
    let chunk = opt.split.unwrap_or(opt.divisions.len()).max(1);

    let mut state: Option<State> = None;
    for divisions in opt.divisions.chunks(chunk) {
        let rhythm = maker.call(divisions, state.as_ref())?;
        info!("{} maker filled {} divisions", maker.name(), divisions.len());
        println!("{}", rhythm);
        println!("{}", rhythm.state);
        state = Some(rhythm.state);
    }
    Ok(())
}
