// rmakers -- rhythm-makers for algorithmic composition
// Copyright (C) 2020  Fabian Thorand
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

//! The incise specifier: fixed patterns cut into the start and end of divisions.

use rmakers_core::rational::{is_power_of_two, Int};

use crate::error::{Error, Result};

/// Prefix and suffix taleas with the number of entries each division takes.
///
/// Taleas are read cyclically. The part of a division between prefix and
/// suffix is the body, filled with notes split by `body_ratio` or with a
/// single rest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Incise {
    pub prefix_talea: Vec<Int>,
    pub prefix_counts: Vec<usize>,
    pub suffix_talea: Vec<Int>,
    pub suffix_counts: Vec<usize>,
    pub talea_denominator: Option<Int>,
    pub body_ratio: Vec<Int>,
    pub fill_with_rests: bool,
    /// Incise only the start of the first and the end of the last division.
    pub outer_divisions_only: bool,
}

impl Default for Incise {
    fn default() -> Self {
        Self {
            prefix_talea: Vec::new(),
            prefix_counts: Vec::new(),
            suffix_talea: Vec::new(),
            suffix_counts: Vec::new(),
            talea_denominator: None,
            body_ratio: vec![1],
            fill_with_rests: false,
            outer_divisions_only: false,
        }
    }
}

impl Incise {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn prefix(mut self, talea: Vec<Int>, counts: Vec<usize>) -> Self {
        self.prefix_talea = talea;
        self.prefix_counts = counts;
        self
    }

    pub fn suffix(mut self, talea: Vec<Int>, counts: Vec<usize>) -> Self {
        self.suffix_talea = talea;
        self.suffix_counts = counts;
        self
    }

    pub fn talea_denominator(mut self, denominator: Int) -> Self {
        self.talea_denominator = Some(denominator);
        self
    }

    pub fn body_ratio(mut self, ratio: Vec<Int>) -> Self {
        self.body_ratio = ratio;
        self
    }

    pub fn fill_with_rests(mut self, fill: bool) -> Self {
        self.fill_with_rests = fill;
        self
    }

    pub fn outer_divisions_only(mut self, outer: bool) -> Self {
        self.outer_divisions_only = outer;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.prefix_talea.contains(&0) || self.suffix_talea.contains(&0) {
            return Err(Error::ZeroCount);
        }
        if !self.prefix_talea.is_empty() && self.prefix_counts.is_empty() {
            return Err(Error::MissingInciseCounts { which: "prefix" });
        }
        if !self.suffix_talea.is_empty() && self.suffix_counts.is_empty() {
            return Err(Error::MissingInciseCounts { which: "suffix" });
        }
        match self.talea_denominator {
            Some(denominator) if !is_power_of_two(denominator) => {
                return Err(Error::InvalidDenominator {
                    denominator,
                    reason: "incise talea denominators must be powers of two",
                })
            }
            None if !self.prefix_talea.is_empty() || !self.suffix_talea.is_empty() => {
                return Err(Error::MissingTaleaDenominator)
            }
            _ => {}
        }
        if self.body_ratio.is_empty() || self.body_ratio.contains(&0) {
            return Err(Error::InvalidRatio {
                parts: self.body_ratio.clone(),
            });
        }
        Ok(())
    }
}
