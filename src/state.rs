// rmakers -- rhythm-makers for algorithmic composition
// Copyright (C) 2020  Fabian Thorand
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

//! State carried from one rhythm-maker call to the next.

use std::fmt;

use rmakers_core::rational::Int;

/// Accumulated progress of a rhythm-maker over successive calls.
///
/// Passing the state of one call as the previous state of the next one
/// continues all cyclic patterns where the first call left off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct State {
    pub divisions_consumed: usize,
    pub logical_ties_produced: usize,
    /// The last note of the previous call stopped inside a talea count.
    pub incomplete_last_note: bool,
    /// Talea units consumed so far; only set by the talea maker.
    pub talea_weight_consumed: Option<Int>,
}

impl State {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn talea_weight_consumed(&self) -> Int {
        self.talea_weight_consumed.unwrap_or(0)
    }
}

/// ```
/// # use rmakers::state::State;
/// let state = State {
///     divisions_consumed: 4,
///     logical_ties_produced: 12,
///     incomplete_last_note: true,
///     talea_weight_consumed: Some(28),
/// };
/// assert_eq!(
///     state.to_string(),
///     "{divisions_consumed: 4, incomplete_last_note: true, logical_ties_produced: 12, talea_weight_consumed: 28}"
/// );
/// ```
impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{divisions_consumed: {}, incomplete_last_note: {}, logical_ties_produced: {}",
            self.divisions_consumed, self.incomplete_last_note, self.logical_ties_produced
        )?;
        if let Some(weight) = self.talea_weight_consumed {
            write!(f, ", talea_weight_consumed: {}", weight)?;
        }
        write!(f, "}}")
    }
}
