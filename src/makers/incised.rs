// rmakers -- rhythm-makers for algorithmic composition
// Copyright (C) 2020  Fabian Thorand
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

//! Rhythms with incised beginnings and endings.

use log::{debug, trace};
use rmakers_core::cyclic::Cyclic;
use rmakers_core::rational::{Int, Rational};
use rmakers_core::sequence;

use crate::error::{Error, Result};
use crate::incise::Incise;
use crate::maker::{Made, RhythmMaker};
use crate::music::{Component, Duration, Tuplet};
use crate::spelling::{make_leaves, Spelling};
use crate::state::State;

use super::{common_denominator, numerators_over};

/// Cuts prefix and suffix patterns into divisions and fills the rest.
///
/// Incision keeps no state between calls: every call starts at the
/// beginning of the prefix and suffix taleas.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncisedRhythmMaker {
    incise: Incise,
    extra_counts: Cyclic<Int>,
    spelling: Spelling,
}

impl IncisedRhythmMaker {
    pub fn new(incise: Incise) -> Result<Self> {
        incise.validate()?;
        Ok(Self {
            incise,
            extra_counts: Cyclic::default(),
            spelling: Spelling::default(),
        })
    }

    /// Counts (in talea units) added to successive divisions. They must not
    /// be negative; a count of a division's length or more wraps around.
    pub fn extra_counts(mut self, extra_counts: Vec<Int>) -> Result<Self> {
        if let Some(&count) = extra_counts.iter().find(|count| **count < 0) {
            return Err(Error::NegativeExtraCount { count });
        }
        self.extra_counts = Cyclic::new(extra_counts);
        Ok(self)
    }

    pub fn spelling(mut self, spelling: Spelling) -> Self {
        self.spelling = spelling;
        self
    }

    /// Signed durations (in units of the common denominator) for one division
    /// of `count` units. The prefix wins over the suffix, the suffix over the body.
    fn duration_map(&self, count: Int, prefix: &[Int], suffix: &[Int], outer: bool) -> Vec<Rational> {
        let prefix_weight = sequence::weight(prefix);
        let suffix_weight = sequence::weight(suffix);

        let prefix = if count < prefix_weight {
            sequence::truncate_to_weight(prefix, count)
        } else {
            prefix.to_vec()
        };

        let middle = count - prefix_weight - suffix_weight;
        let body = if middle <= 0 {
            Vec::new()
        } else if self.incise.fill_with_rests {
            vec![Rational::int(-middle)]
        } else if outer {
            vec![Rational::int(middle)]
        } else {
            let parts: Int = self.incise.body_ratio.iter().map(|part| part.abs()).sum();
            self.incise
                .body_ratio
                .iter()
                .map(|&part| Rational::new(middle * part, parts))
                .collect()
        };

        let suffix_space = count - prefix_weight;
        let suffix = if suffix_space <= 0 {
            Vec::new()
        } else if suffix_space < suffix_weight {
            sequence::truncate_to_weight(suffix, suffix_space)
        } else {
            suffix.to_vec()
        };

        prefix
            .into_iter()
            .map(Rational::int)
            .chain(body)
            .chain(suffix.into_iter().map(Rational::int))
            .collect()
    }
}

fn cycle_or_zero(values: &[usize]) -> Cyclic<usize> {
    if values.is_empty() {
        Cyclic::new(vec![0])
    } else {
        Cyclic::new(values.to_vec())
    }
}

impl RhythmMaker for IncisedRhythmMaker {
    fn name(&self) -> &'static str {
        "incised"
    }

    fn make_music(&self, divisions: &[Duration], _previous: &State) -> Result<Made> {
        let incise = &self.incise;
        let talea_denominator = incise.talea_denominator.unwrap_or(1);
        let denominator = common_denominator(divisions, talea_denominator);
        let scale = denominator / talea_denominator;
        debug!(
            "incised: common denominator {}, talea scaled by {}",
            denominator, scale
        );

        let prefix_talea: Cyclic<Int> = incise.prefix_talea.iter().map(|c| c * scale).collect();
        let suffix_talea: Cyclic<Int> = incise.suffix_talea.iter().map(|c| c * scale).collect();
        let prefix_counts = cycle_or_zero(&incise.prefix_counts);
        let suffix_counts = cycle_or_zero(&incise.suffix_counts);
        let extra_counts: Cyclic<Int> = if self.extra_counts.is_empty() {
            Cyclic::new(vec![0])
        } else {
            self.extra_counts.iter().map(|c| c * scale).collect()
        };

        let prolated: Vec<Int> = numerators_over(divisions, denominator)
            .into_iter()
            .enumerate()
            .map(|(i, count)| count + extra_counts.get(i).copied().unwrap_or(0).rem_euclid(count))
            .collect();

        let mut maps = Vec::with_capacity(divisions.len());
        if incise.outer_divisions_only {
            let prefix = prefix_talea.slice(0, prefix_counts.get(0).copied().unwrap_or(0));
            let suffix = suffix_talea.slice(0, suffix_counts.get(0).copied().unwrap_or(0));
            let last = prolated.len().saturating_sub(1);
            for (i, &count) in prolated.iter().enumerate() {
                let prefix: &[Int] = if i == 0 { &prefix } else { &[] };
                let suffix: &[Int] = if i == last { &suffix } else { &[] };
                maps.push(self.duration_map(count, prefix, suffix, true));
            }
        } else {
            let mut prefix_start = 0;
            let mut suffix_start = 0;
            for (i, &count) in prolated.iter().enumerate() {
                let prefix_length = prefix_counts.get(i).copied().unwrap_or(0);
                let suffix_length = suffix_counts.get(i).copied().unwrap_or(0);
                let prefix = prefix_talea.slice(prefix_start, prefix_start + prefix_length);
                let suffix = suffix_talea.slice(suffix_start, suffix_start + suffix_length);
                prefix_start += prefix_length;
                suffix_start += suffix_length;
                maps.push(self.duration_map(count, &prefix, &suffix, false));
            }
        }

        let mut made = Vec::with_capacity(divisions.len());
        for (division, map) in divisions.iter().zip(maps) {
            let mut components: Vec<Component> = Vec::new();
            for duration in map.into_iter().filter(|duration| !duration.is_zero()) {
                components.extend(make_leaves(duration / denominator, &self.spelling)?);
            }
            let tuplet = Tuplet::from_duration(*division, components);
            trace!("incised: {} -> {}", division, tuplet);
            made.push(vec![tuplet.into()]);
        }
        Ok(Made::new(made))
    }
}
