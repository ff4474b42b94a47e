// rmakers -- rhythm-makers for algorithmic composition
// Copyright (C) 2020  Fabian Thorand
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

//! Cyclic count patterns.

use std::fmt;

use rmakers_core::rational::Int;
use rmakers_core::sequence;

use crate::error::{Error, Result};

/// Signed counts read cyclically after a one-shot preamble.
///
/// Positive counts are notes, negative counts are rests, each count is
/// measured in units of `1 / denominator`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Talea {
    counts: Vec<Int>,
    denominator: Int,
    preamble: Vec<Int>,
    end_counts: Vec<Int>,
}

fn check_counts(counts: &[Int]) -> Result<()> {
    if counts.contains(&0) {
        Err(Error::ZeroCount)
    } else {
        Ok(())
    }
}

impl Talea {
    pub fn new(counts: Vec<Int>, denominator: Int) -> Result<Self> {
        if denominator <= 0 {
            return Err(Error::InvalidDenominator {
                denominator,
                reason: "talea denominators must be positive",
            });
        }
        check_counts(&counts)?;
        Ok(Self {
            counts,
            denominator,
            preamble: Vec::new(),
            end_counts: Vec::new(),
        })
    }

    pub fn with_preamble(mut self, preamble: Vec<Int>) -> Result<Self> {
        check_counts(&preamble)?;
        self.preamble = preamble;
        Ok(self)
    }

    pub fn with_end_counts(mut self, end_counts: Vec<Int>) -> Result<Self> {
        check_counts(&end_counts)?;
        self.end_counts = end_counts;
        Ok(self)
    }

    pub fn counts(&self) -> &[Int] {
        &self.counts
    }

    pub fn denominator(&self) -> Int {
        self.denominator
    }

    pub fn preamble(&self) -> &[Int] {
        &self.preamble
    }

    pub fn end_counts(&self) -> &[Int] {
        &self.end_counts
    }

    /// Number of counts in the preamble and one cycle.
    pub fn len(&self) -> usize {
        self.preamble.len() + self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Weight of one cycle of counts.
    pub fn period(&self) -> Int {
        sequence::weight(&self.counts)
    }

    pub fn preamble_weight(&self) -> Int {
        sequence::weight(&self.preamble)
    }

    /// The count at a logical index of the stream.
    ///
    /// ```
    /// # use rmakers::talea::Talea;
    /// let talea = Talea::new(vec![2, 1, 3], 16).unwrap().with_preamble(vec![-4]).unwrap();
    /// let counts: Vec<_> = (0..6).map(|i| talea.count_at(i).unwrap()).collect();
    /// assert_eq!(counts, vec![-4, 2, 1, 3, 2, 1]);
    /// ```
    pub fn count_at(&self, index: usize) -> Result<Int> {
        if index < self.preamble.len() {
            return Ok(self.preamble[index]);
        }
        if self.counts.is_empty() {
            return Err(Error::EmptyTalea);
        }
        Ok(self.counts[(index - self.preamble.len()) % self.counts.len()])
    }

    /// The preamble followed by one cycle of counts.
    pub fn iter(&self) -> impl Iterator<Item = Int> + '_ {
        self.preamble.iter().chain(self.counts.iter()).copied()
    }

    /// Skip `weight` units of the stream.
    ///
    /// The part of the current cycle that is left becomes the new preamble,
    /// a count that is cut in two contributes its remainder.
    ///
    /// ```
    /// # use rmakers::talea::Talea;
    /// let talea = Talea::new(vec![2, 1, 3, 2, 4, 1, 1], 16)
    ///     .unwrap()
    ///     .with_preamble(vec![1, 1, 1, 1])
    ///     .unwrap();
    /// assert_eq!(talea.advance(3).unwrap().preamble(), &[1]);
    /// assert_eq!(talea.advance(4).unwrap().preamble(), &[] as &[i64]);
    /// assert_eq!(talea.advance(5).unwrap().preamble(), &[1, 1, 3, 2, 4, 1, 1]);
    /// assert_eq!(talea.advance(8).unwrap().preamble(), &[2, 2, 4, 1, 1]);
    /// ```
    pub fn advance(&self, weight: Int) -> Result<Talea> {
        if weight < 0 {
            return Err(Error::NegativeAdvance { weight });
        }
        let mut advanced = self.clone();
        if weight == 0 {
            return Ok(advanced);
        }
        let preamble_weight = self.preamble_weight();
        advanced.preamble = if weight < preamble_weight {
            remainder_after(&self.preamble, weight)
        } else if weight == preamble_weight {
            Vec::new()
        } else {
            let period = self.period();
            if period == 0 {
                return Err(Error::EmptyTalea);
            }
            let within_cycle = (weight - preamble_weight) % period;
            if within_cycle == 0 {
                Vec::new()
            } else {
                remainder_after(&self.counts, within_cycle)
            }
        };
        Ok(advanced)
    }

    /// Whether a stream prefix of `weight` units ends between two counts.
    ///
    /// ```
    /// # use rmakers::talea::Talea;
    /// let talea = Talea::new(vec![1, 2, 3, 4], 16).unwrap();
    /// assert!(talea.is_boundary(0));
    /// assert!(talea.is_boundary(6));
    /// assert!(!talea.is_boundary(8));
    /// assert!(talea.is_boundary(13));
    /// ```
    pub fn is_boundary(&self, weight: Int) -> bool {
        if weight < 0 {
            return false;
        }
        let preamble_weight = self.preamble_weight();
        if weight <= preamble_weight {
            return lands_on_boundary(&self.preamble, weight);
        }
        let period = self.period();
        if period == 0 {
            return false;
        }
        lands_on_boundary(&self.counts, (weight - preamble_weight) % period)
    }
}

fn remainder_after(counts: &[Int], weight: Int) -> Vec<Int> {
    sequence::split(counts, &[weight], false, true)
        .into_iter()
        .nth(1)
        .unwrap_or_default()
}

fn lands_on_boundary(counts: &[Int], weight: Int) -> bool {
    let mut sum = 0;
    if sum == weight {
        return true;
    }
    for count in counts {
        sum += count.abs();
        if sum == weight {
            return true;
        }
    }
    false
}

impl fmt::Display for Talea {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}/{}", self.counts, self.denominator)?;
        if !self.preamble.is_empty() {
            write!(f, " preamble {:?}", self.preamble)?;
        }
        if !self.end_counts.is_empty() {
            write!(f, " end {:?}", self.end_counts)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn validation() {
        assert_eq!(Talea::new(vec![1, 0], 16), Err(Error::ZeroCount));
        assert!(matches!(
            Talea::new(vec![1], 0),
            Err(Error::InvalidDenominator { denominator: 0, .. })
        ));
        let talea = Talea::new(vec![1], 16).unwrap();
        assert_eq!(talea.clone().with_end_counts(vec![0]), Err(Error::ZeroCount));
        assert_eq!(talea.advance(-1), Err(Error::NegativeAdvance { weight: -1 }));
    }

    #[test]
    fn advance_by_whole_periods() {
        let talea = Talea::new(vec![1, 2, 3, 4], 16).unwrap();
        assert_eq!(talea.advance(10).unwrap(), talea);
        assert_eq!(talea.advance(20).unwrap(), talea);
        assert_eq!(talea.advance(11).unwrap().preamble(), &[2, 3, 4]);
    }

    #[test]
    fn advance_keeps_sign_of_split_rest() {
        let talea = Talea::new(vec![3, -4], 8).unwrap();
        assert_eq!(talea.advance(5).unwrap().preamble(), &[-2]);
    }

    #[test]
    fn empty_counts_past_preamble() {
        let talea = Talea::new(vec![], 8).unwrap().with_preamble(vec![2]).unwrap();
        assert_eq!(talea.count_at(0), Ok(2));
        assert_eq!(talea.count_at(1), Err(Error::EmptyTalea));
        assert_eq!(talea.advance(3), Err(Error::EmptyTalea));
    }

    #[test]
    fn boundaries_in_preamble() {
        let talea = Talea::new(vec![4], 16).unwrap().with_preamble(vec![-2, 5]).unwrap();
        assert!(talea.is_boundary(2));
        assert!(!talea.is_boundary(3));
        assert!(talea.is_boundary(7));
        assert!(talea.is_boundary(11));
        assert!(!talea.is_boundary(12));
        assert_eq!(talea.iter().collect::<Vec<_>>(), vec![-2, 5, 4]);
        assert_eq!(talea.len(), 3);
    }
}
