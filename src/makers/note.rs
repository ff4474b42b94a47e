// rmakers -- rhythm-makers for algorithmic composition
// Copyright (C) 2020  Fabian Thorand
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

//! One note (tied if necessary) per division.

use crate::error::Result;
use crate::maker::{Made, RhythmMaker};
use crate::music::Duration;
use crate::spelling::{make_leaves, Spelling};
use crate::state::State;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NoteRhythmMaker {
    spelling: Spelling,
}

impl NoteRhythmMaker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spelling(mut self, spelling: Spelling) -> Self {
        self.spelling = spelling;
        self
    }
}

impl RhythmMaker for NoteRhythmMaker {
    fn name(&self) -> &'static str {
        "note"
    }

    fn make_music(&self, divisions: &[Duration], _previous: &State) -> Result<Made> {
        let made = divisions
            .iter()
            .map(|division| make_leaves(*division, &self.spelling))
            .collect::<Result<Vec<_>>>()?;
        Ok(Made::new(made))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::maker::divisions;
    use rmakers_core::rational::Rational;

    #[test]
    fn notes_per_division() {
        let rhythm = NoteRhythmMaker::new()
            .call(&divisions(&[(5, 8), (3, 8), (1, 6)]), None)
            .unwrap();
        let rendered: Vec<String> = rhythm.music.iter().map(|c| c.to_string()).collect();
        assert_eq!(rendered, vec!["n1/2~", "n1/8", "n3/8", "3:2 { n1/4 }"]);
        assert_eq!(rhythm.state.logical_ties_produced, 3);
        assert_eq!(rhythm.duration(), Rational::new(7, 6));
    }

    #[test]
    fn forbidden_note_duration() {
        let maker = NoteRhythmMaker::new().spelling(Spelling::new().forbid_notes(Rational::new(1, 2)));
        let rhythm = maker.call(&divisions(&[(3, 4)]), None).unwrap();
        let rendered: Vec<String> = rhythm.music.iter().map(|c| c.to_string()).collect();
        assert_eq!(rendered, vec!["n1/4~", "n1/4~", "n1/4"]);
    }
}
