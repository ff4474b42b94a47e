// rmakers -- rhythm-makers for algorithmic composition
// Copyright (C) 2020  Fabian Thorand
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

//! Tuplets whose contents follow a ratio.

use log::trace;
use rmakers_core::cyclic::Cyclic;
use rmakers_core::rational::{Int, Rational};

use crate::error::{Error, Result};
use crate::maker::{Made, RhythmMaker};
use crate::music::{Component, Duration, Leaf, LeafKind, Tuplet};
use crate::spelling::{make_leaves, Spelling};
use crate::state::State;

/// How the ratio of a tuplet is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TupletDenominator {
    Reduced,
    /// The numerator of the division in lowest terms, so `4/8` asks for a
    /// denominator of 1 (and gets `3:2`, not `6:4`, for three parts).
    FromDivision,
    /// The division counted in units of `1 / n`.
    Unit(Int),
    Fixed(Int),
}

impl Default for TupletDenominator {
    fn default() -> Self {
        TupletDenominator::Reduced
    }
}

/// One tuplet per division, with parts in proportion to a ratio.
///
/// Negative ratio parts are rests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TupletRhythmMaker {
    ratios: Cyclic<Vec<Int>>,
    denominator: TupletDenominator,
    spelling: Spelling,
}

impl TupletRhythmMaker {
    pub fn new(ratios: Vec<Vec<Int>>) -> Result<Self> {
        if ratios.is_empty() {
            return Err(Error::EmptyCycle { what: "ratios" });
        }
        if let Some(ratio) = ratios
            .iter()
            .find(|ratio| ratio.is_empty() || ratio.contains(&0))
        {
            return Err(Error::InvalidRatio {
                parts: ratio.clone(),
            });
        }
        Ok(Self {
            ratios: Cyclic::new(ratios),
            denominator: TupletDenominator::default(),
            spelling: Spelling::default(),
        })
    }

    pub fn denominator(mut self, denominator: TupletDenominator) -> Self {
        self.denominator = denominator;
        self
    }

    pub fn spelling(mut self, spelling: Spelling) -> Self {
        self.spelling = spelling;
        self
    }

    fn make_tuplet(&self, division: Duration, ratio: &[Int]) -> Result<Tuplet> {
        let parts: Int = ratio.iter().map(|part| part.abs()).sum();
        let written_unit = (division / parts).equal_or_greater_power_of_two();
        let written: Vec<Rational> = ratio.iter().map(|&part| written_unit * part).collect();

        let components: Vec<Component> = if written.iter().all(|w| w.abs().is_assignable()) {
            written
                .iter()
                .map(|w| {
                    let kind = if w.is_positive() {
                        LeafKind::Note
                    } else {
                        LeafKind::Rest
                    };
                    Leaf::new(kind, w.abs()).into()
                })
                .collect()
        } else {
            let mut components = Vec::new();
            for w in &written {
                components.extend(make_leaves(*w, &self.spelling)?);
            }
            components
        };

        let mut tuplet = Tuplet::from_duration(division, components);
        tuplet.normalize();
        match self.denominator {
            TupletDenominator::Reduced => {}
            TupletDenominator::FromDivision => {
                tuplet.set_preferred_denominator(division.numerator())
            }
            TupletDenominator::Unit(unit) => {
                if let Some(count) = division.with_denominator(unit) {
                    tuplet.set_preferred_denominator(count)
                }
            }
            TupletDenominator::Fixed(denominator) => tuplet.set_preferred_denominator(denominator),
        }
        Ok(tuplet)
    }
}

impl RhythmMaker for TupletRhythmMaker {
    fn name(&self) -> &'static str {
        "tuplet"
    }

    fn make_music(&self, divisions: &[Duration], _previous: &State) -> Result<Made> {
        let mut made = Vec::with_capacity(divisions.len());
        for (i, &division) in divisions.iter().enumerate() {
            let ratio = self.ratios.get(i).ok_or(Error::EmptyCycle { what: "ratios" })?;
            let tuplet = self.make_tuplet(division, ratio)?;
            trace!("tuplet: {} {:?} -> {}", division, ratio, tuplet);
            made.push(vec![tuplet.into()]);
        }
        Ok(Made::new(made))
    }
}
