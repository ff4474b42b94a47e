// rmakers -- rhythm-makers for algorithmic composition
// Copyright (C) 2020  Fabian Thorand
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

//! One leaf with a multiplier per division.

use crate::error::{Error, Result};
use crate::maker::{Made, RhythmMaker};
use crate::music::{Duration, Leaf, LeafKind};
use crate::state::State;

use rmakers_core::rational::Rational;

/// Writes every division as a single leaf of `unit` scaled by a multiplier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultipliedDurationRhythmMaker {
    unit: Duration,
    kind: LeafKind,
}

impl Default for MultipliedDurationRhythmMaker {
    fn default() -> Self {
        Self {
            unit: Rational::ONE,
            kind: LeafKind::Note,
        }
    }
}

impl MultipliedDurationRhythmMaker {
    pub fn new() -> Self {
        Self::default()
    }

    /// The written duration of every leaf.
    pub fn unit(mut self, unit: Duration) -> Result<Self> {
        if !unit.is_assignable() {
            return Err(Error::Unassignable { duration: unit });
        }
        self.unit = unit;
        Ok(self)
    }

    pub fn kind(mut self, kind: LeafKind) -> Self {
        self.kind = kind;
        self
    }
}

impl RhythmMaker for MultipliedDurationRhythmMaker {
    fn name(&self) -> &'static str {
        "multiplied duration"
    }

    fn make_music(&self, divisions: &[Duration], _previous: &State) -> Result<Made> {
        Ok(Made::new(
            divisions
                .iter()
                .map(|division| {
                    let leaf = Leaf::new(self.kind, self.unit).with_multiplier(*division / self.unit);
                    vec![leaf.into()]
                })
                .collect(),
        ))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::maker::divisions;

    fn render(maker: &MultipliedDurationRhythmMaker) -> Vec<String> {
        maker
            .call(&divisions(&[(1, 4), (3, 16), (5, 8)]), None)
            .unwrap()
            .music
            .iter()
            .map(|c| c.to_string())
            .collect()
    }

    #[test]
    fn whole_note_unit() {
        assert_eq!(
            render(&MultipliedDurationRhythmMaker::new()),
            vec!["n1*1/4", "n1*3/16", "n1*5/8"]
        );
    }

    #[test]
    fn custom_unit_and_rests() {
        let maker = MultipliedDurationRhythmMaker::new()
            .unit(Rational::new(1, 4))
            .unwrap()
            .kind(LeafKind::Rest);
        assert_eq!(render(&maker), vec!["r1/4*1", "r1/4*3/4", "r1/4*5/2"]);
        let rhythm = maker.call(&divisions(&[(1, 4), (1, 4)]), None).unwrap();
        assert_eq!(rhythm.state.logical_ties_produced, 2);
    }

    #[test]
    fn unit_must_be_assignable() {
        assert_eq!(
            MultipliedDurationRhythmMaker::new().unit(Rational::new(5, 16)),
            Err(Error::Unassignable {
                duration: Rational::new(5, 16)
            })
        );
    }
}
