// rmakers -- rhythm-makers for algorithmic composition
// Copyright (C) 2020  Fabian Thorand
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

//! The rhythm-makers.

pub mod accelerando;
pub mod even_division;
pub mod incised;
pub mod multiplied;
pub mod note;
pub mod talea;
pub mod tuplet;

#[cfg(test)]
mod expect_tests;

pub use self::accelerando::AccelerandoRhythmMaker;
pub use self::even_division::EvenDivisionRhythmMaker;
pub use self::incised::IncisedRhythmMaker;
pub use self::multiplied::MultipliedDurationRhythmMaker;
pub use self::note::NoteRhythmMaker;
pub use self::talea::TaleaRhythmMaker;
pub use self::tuplet::TupletRhythmMaker;

use rmakers_core::rational::{lcm, Int};

use crate::music::Duration;

/// Least common multiple of all division denominators and `denominator`.
pub(crate) fn common_denominator(divisions: &[Duration], denominator: Int) -> Int {
    divisions
        .iter()
        .fold(denominator, |acc, division| lcm(acc, division.denominator()))
}

/// Division numerators when written over `denominator`, a multiple of every
/// division denominator.
pub(crate) fn numerators_over(divisions: &[Duration], denominator: Int) -> Vec<Int> {
    divisions
        .iter()
        .map(|division| division.numerator() * (denominator / division.denominator()))
        .collect()
}
