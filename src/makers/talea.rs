// rmakers -- rhythm-makers for algorithmic composition
// Copyright (C) 2020  Fabian Thorand
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

//! Rhythms read from a cyclic talea, with extra counts prolating each division.

use log::{debug, trace, warn};
use rmakers_core::cyclic::Cyclic;
use rmakers_core::rational::{Int, Rational};
use rmakers_core::sequence::{self, Weighted};

use crate::error::{Error, Result};
use crate::maker::{Made, RhythmMaker};
use crate::music::{self, Component, Duration, Tuplet};
use crate::spelling::{make_leaves, Spelling};
use crate::state::State;
use crate::talea::Talea;

use super::{common_denominator, numerators_over};

/// Fills divisions with the counts of a talea, continuing across divisions
/// and, given the previous state, across calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaleaRhythmMaker {
    talea: Talea,
    extra_counts: Cyclic<Int>,
    read_talea_once_only: bool,
    spelling: Spelling,
}

impl TaleaRhythmMaker {
    pub fn new(talea: Talea) -> Result<Self> {
        if talea.counts().is_empty() {
            return Err(Error::EmptyTalea);
        }
        Ok(Self {
            talea,
            extra_counts: Cyclic::default(),
            read_talea_once_only: false,
            spelling: Spelling::default(),
        })
    }

    /// Counts (in talea units) added to successive divisions, turning them into tuplets.
    pub fn extra_counts(mut self, extra_counts: Vec<Int>) -> Self {
        self.extra_counts = Cyclic::new(extra_counts);
        self
    }

    /// Fail instead of cycling when the talea runs out.
    pub fn read_talea_once_only(mut self, once: bool) -> Self {
        self.read_talea_once_only = once;
        self
    }

    pub fn spelling(mut self, spelling: Spelling) -> Self {
        self.spelling = spelling;
        self
    }

    pub fn talea(&self) -> &Talea {
        &self.talea
    }

    /// The signed counts filling `total` units, tagged with the talea count they come from.
    fn stream(&self, talea: &Talea, scale: Int, total: Int) -> Result<Vec<StreamCount>> {
        let mut next_origin = 0;
        let mut tag = |value: Int| {
            let count = StreamCount {
                value: value * scale,
                origin: next_origin,
            };
            next_origin += 1;
            count
        };

        let preamble: Vec<StreamCount> =
            talea.preamble().iter().map(|&value| tag(value)).collect();
        let preamble_weight = sequence::weight(&preamble);
        if self.read_talea_once_only {
            let available = preamble_weight + talea.period() * scale;
            if available < total {
                return Err(Error::TaleaTooShort {
                    available,
                    required: total,
                });
            }
        }

        let mut stream = if total <= preamble_weight {
            sequence::truncate_to_weight(&preamble, total)
        } else {
            let mut stream = preamble;
            let mut weight = preamble_weight;
            for &value in talea.counts().iter().cycle() {
                if weight >= total {
                    break;
                }
                let count = tag(value);
                let count_weight = count.weight().min(total - weight);
                stream.push(count.with_weight(count_weight));
                weight += count_weight;
            }
            stream
        };

        if !talea.end_counts().is_empty() {
            let end: Vec<StreamCount> =
                talea.end_counts().iter().map(|&value| tag(value)).collect();
            let end_weight = sequence::weight(&end);
            if end_weight > total {
                return Err(Error::EndCountsTooLong { end_weight, total });
            }
            stream = sequence::truncate_to_weight(&stream, total - end_weight);
            stream.extend(end);
        }
        Ok(stream)
    }
}

/// Extra counts actually added to a division of `count` units.
///
/// Both signs wrap with period `count`, so a division at most doubles and
/// never vanishes.
pub(crate) fn prolation(extra: Int, count: Int) -> Int {
    if extra >= 0 {
        extra.rem_euclid(count)
    } else {
        -((-extra).rem_euclid(count))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct StreamCount {
    value: Int,
    origin: usize,
}

impl Weighted for StreamCount {
    fn weight(&self) -> Int {
        self.value.abs()
    }

    fn with_weight(&self, weight: Int) -> Self {
        Self {
            value: self.value.with_weight(weight),
            origin: self.origin,
        }
    }
}

impl RhythmMaker for TaleaRhythmMaker {
    fn name(&self) -> &'static str {
        "talea"
    }

    fn make_music(&self, divisions: &[Duration], previous: &State) -> Result<Made> {
        let talea = self.talea.advance(previous.talea_weight_consumed())?;
        let extra_counts = self.extra_counts.rotate_left(previous.divisions_consumed);

        let denominator = common_denominator(divisions, talea.denominator());
        let scale = denominator / talea.denominator();
        let prolated: Vec<Int> = numerators_over(divisions, denominator)
            .into_iter()
            .enumerate()
            .map(|(i, count)| match extra_counts.get(i) {
                Some(&extra) => count + prolation(extra * scale, count),
                None => count,
            })
            .collect();
        let total: Int = prolated.iter().sum();
        debug!(
            "talea: {} at common denominator {}, prolated weights {:?}",
            talea, denominator, prolated
        );

        let stream = self.stream(&talea, scale, total)?;
        let mut pieces = Vec::with_capacity(divisions.len());
        for part in sequence::split(&stream, &prolated, true, false) {
            let mut piece = Vec::with_capacity(part.len());
            for count in part {
                let leaves = make_leaves(Rational::new(count.value, denominator), &self.spelling)?;
                piece.push((count, leaves));
            }
            pieces.push(piece);
        }

        // a count cut by a division boundary is tied over it
        let positions: Vec<(usize, usize)> = pieces
            .iter()
            .enumerate()
            .flat_map(|(d, piece)| (0..piece.len()).map(move |p| (d, p)))
            .collect();
        let mut tied = Vec::new();
        for pair in positions.windows(2) {
            let (first, second) = (pair[0], pair[1]);
            let first_count = pieces[first.0][first.1].0;
            let second_count = pieces[second.0][second.1].0;
            if first_count.origin == second_count.origin && first_count.value > 0 {
                tied.push(first);
            }
        }
        for (d, p) in tied {
            if let Some(leaf) = music::last_leaf_mut(&mut pieces[d][p].1) {
                leaf.tie = true;
            }
        }

        let mut tuplets: Vec<Tuplet> = Vec::with_capacity(divisions.len());
        for (division, piece) in divisions.iter().zip(pieces) {
            let components: Vec<Component> =
                piece.into_iter().flat_map(|(_, leaves)| leaves).collect();
            let mut tuplet = if extra_counts.is_empty() {
                Tuplet::trivial(components)
            } else {
                Tuplet::from_duration(*division, components)
            };
            tuplet.normalize();
            trace!("talea: {} -> {}", division, tuplet);
            tuplets.push(tuplet);
        }

        if previous.incomplete_last_note {
            if let Some(leaf) = tuplets
                .first_mut()
                .and_then(|tuplet| music::first_leaf_mut(&mut tuplet.components))
            {
                if leaf.is_note() {
                    leaf.repeat_tie = true;
                }
            }
        }

        if total % scale != 0 {
            warn!(
                "talea: consumed {}/{} talea units, rounding down",
                total, scale
            );
        }
        let consumed = total.div_euclid(scale);
        let ends_on_note = tuplets
            .last()
            .and_then(|tuplet| tuplet.leaves().last().map(|leaf| leaf.is_note()))
            .unwrap_or(false);
        let incomplete_last_note =
            ends_on_note && talea.end_counts().is_empty() && !talea.is_boundary(consumed);

        Ok(Made {
            divisions: tuplets.into_iter().map(|tuplet| vec![tuplet.into()]).collect(),
            incomplete_last_note,
            talea_weight_consumed: Some(consumed),
        })
    }
}
