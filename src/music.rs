// rmakers -- rhythm-makers for algorithmic composition
// Copyright (C) 2020  Fabian Thorand
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

//! The notation values produced by the rhythm-makers: leaves and tuplets.
//!
//! A rhythm is a flat list of [`Component`]s. Durations are exact rationals
//! where `1` is a whole note.

use std::fmt;

use rmakers_core::rational::{Int, Rational};

/// Durations measured in whole notes.
pub type Duration = Rational;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LeafKind {
    Note,
    Rest,
}

/// A note or rest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Leaf {
    pub kind: LeafKind,
    /// The notated duration, always assignable.
    pub written_duration: Duration,
    /// Scales the written duration without changing the notation.
    pub multiplier: Option<Duration>,
    /// Tied to the next leaf in output order.
    pub tie: bool,
    /// Tied from the leaf preceding the whole rhythm.
    pub repeat_tie: bool,
}

impl Leaf {
    pub fn new(kind: LeafKind, written_duration: Duration) -> Self {
        Self {
            kind,
            written_duration,
            multiplier: None,
            tie: false,
            repeat_tie: false,
        }
    }

    pub fn note(written_duration: Duration) -> Self {
        Self::new(LeafKind::Note, written_duration)
    }

    pub fn rest(written_duration: Duration) -> Self {
        Self::new(LeafKind::Rest, written_duration)
    }

    pub fn with_multiplier(mut self, multiplier: Duration) -> Self {
        self.multiplier = Some(multiplier);
        self
    }

    pub fn is_note(&self) -> bool {
        self.kind == LeafKind::Note
    }

    pub fn duration(&self) -> Duration {
        match self.multiplier {
            Some(multiplier) => self.written_duration * multiplier,
            None => self.written_duration,
        }
    }
}

/// A tuplet plays `contents` units in the time of `actual` units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ratio {
    pub contents: Int,
    pub actual: Int,
}

impl Ratio {
    pub const TRIVIAL: Ratio = Ratio {
        contents: 1,
        actual: 1,
    };

    pub fn new(contents: Int, actual: Int) -> Self {
        assert!(contents > 0 && actual > 0, "ratio parts must be positive");
        Self { contents, actual }
    }

    /// The ratio whose multiplier is `multiplier`, in lowest terms.
    pub fn from_multiplier(multiplier: Rational) -> Self {
        Self::new(multiplier.denominator(), multiplier.numerator())
    }

    pub fn multiplier(self) -> Rational {
        Rational::new(self.actual, self.contents)
    }

    pub fn is_trivial(self) -> bool {
        self.contents == self.actual
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tuplet {
    pub ratio: Ratio,
    pub components: Vec<Component>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Component {
    Leaf(Leaf),
    Tuplet(Tuplet),
}

impl Component {
    pub fn duration(&self) -> Duration {
        match self {
            Component::Leaf(leaf) => leaf.duration(),
            Component::Tuplet(tuplet) => tuplet.duration(),
        }
    }
}

impl From<Leaf> for Component {
    fn from(leaf: Leaf) -> Self {
        Component::Leaf(leaf)
    }
}

impl From<Tuplet> for Component {
    fn from(tuplet: Tuplet) -> Self {
        Component::Tuplet(tuplet)
    }
}

impl Tuplet {
    /// A tuplet with a 1:1 ratio.
    pub fn trivial(components: Vec<Component>) -> Self {
        Self {
            ratio: Ratio::TRIVIAL,
            components,
        }
    }

    /// A tuplet squeezing (or stretching) `components` into `duration`.
    pub fn from_duration(duration: Duration, components: Vec<Component>) -> Self {
        let contents = contents_duration(&components);
        assert!(contents.is_positive(), "tuplet contents must have a duration");
        Self {
            ratio: Ratio::from_multiplier(duration / contents),
            components,
        }
    }

    pub fn multiplier(&self) -> Rational {
        self.ratio.multiplier()
    }

    pub fn contents_duration(&self) -> Duration {
        contents_duration(&self.components)
    }

    pub fn duration(&self) -> Duration {
        self.contents_duration() * self.multiplier()
    }

    /// Whether the multiplier lies strictly between 1/2 and 2.
    pub fn is_normalized(&self) -> bool {
        let multiplier = self.multiplier();
        Rational::new(1, 2) < multiplier && multiplier < Rational::int(2)
    }

    /// Rewrite the contents with doubled or halved written durations until the
    /// multiplier is normalized. The duration of the tuplet stays the same.
    /// Returns whether anything changed.
    pub fn normalize(&mut self) -> bool {
        let mut multiplier = self.multiplier();
        let mut scale = Rational::ONE;
        while multiplier >= Rational::int(2) {
            multiplier /= Rational::int(2);
            scale *= Rational::int(2);
        }
        while multiplier <= Rational::new(1, 2) {
            multiplier *= Rational::int(2);
            scale /= Rational::int(2);
        }
        if scale == Rational::ONE {
            return false;
        }
        scale_written_durations(&mut self.components, scale);
        self.ratio = Ratio::from_multiplier(multiplier);
        true
    }

    /// Express the ratio as `x:denominator` if that is possible with integers.
    pub fn set_preferred_denominator(&mut self, denominator: Int) {
        let Ratio { contents, actual } = self.ratio;
        if (contents * denominator) % actual == 0 {
            self.ratio = Ratio::new(contents * denominator / actual, denominator);
        }
    }

    pub fn leaves(&self) -> Vec<&Leaf> {
        let mut leaves = Vec::new();
        collect_leaves(&self.components, &mut leaves);
        leaves
    }
}

fn contents_duration(components: &[Component]) -> Duration {
    components.iter().map(Component::duration).sum()
}

fn scale_written_durations(components: &mut [Component], scale: Rational) {
    for component in components {
        match component {
            Component::Leaf(leaf) => leaf.written_duration *= scale,
            Component::Tuplet(tuplet) => scale_written_durations(&mut tuplet.components, scale),
        }
    }
}

fn collect_leaves<'a>(components: &'a [Component], out: &mut Vec<&'a Leaf>) {
    for component in components {
        match component {
            Component::Leaf(leaf) => out.push(leaf),
            Component::Tuplet(tuplet) => collect_leaves(&tuplet.components, out),
        }
    }
}

/// All leaves in output order.
pub fn leaves(components: &[Component]) -> Vec<&Leaf> {
    let mut leaves = Vec::new();
    collect_leaves(components, &mut leaves);
    leaves
}

pub fn first_leaf_mut(components: &mut [Component]) -> Option<&mut Leaf> {
    match components.first_mut()? {
        Component::Leaf(leaf) => Some(leaf),
        Component::Tuplet(tuplet) => first_leaf_mut(&mut tuplet.components),
    }
}

pub fn last_leaf_mut(components: &mut [Component]) -> Option<&mut Leaf> {
    match components.last_mut()? {
        Component::Leaf(leaf) => Some(leaf),
        Component::Tuplet(tuplet) => last_leaf_mut(&mut tuplet.components),
    }
}

pub fn duration(components: &[Component]) -> Duration {
    contents_duration(components)
}

/// Number of logical ties: runs of tied notes count once, every rest counts.
pub fn logical_tie_count<'a, I>(leaves: I) -> usize
where
    I: IntoIterator<Item = &'a Leaf>,
{
    let mut count = 0;
    let mut previous: Option<&Leaf> = None;
    for leaf in leaves {
        let continues = match previous {
            Some(prev) => prev.is_note() && prev.tie && leaf.is_note(),
            None => false,
        };
        if !continues {
            count += 1;
        }
        previous = Some(leaf);
    }
    count
}

impl fmt::Display for Leaf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.repeat_tie {
            write!(f, "^")?;
        }
        let head = match self.kind {
            LeafKind::Note => 'n',
            LeafKind::Rest => 'r',
        };
        write!(f, "{}{}", head, self.written_duration)?;
        if let Some(multiplier) = self.multiplier {
            write!(f, "*{}", multiplier)?;
        }
        if self.tie {
            write!(f, "~")?;
        }
        Ok(())
    }
}

impl fmt::Display for Ratio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.contents, self.actual)
    }
}

impl fmt::Display for Tuplet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {{", self.ratio)?;
        for component in &self.components {
            write!(f, " {}", component)?;
        }
        write!(f, " }}")
    }
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Component::Leaf(leaf) => fmt::Display::fmt(leaf, f),
            Component::Tuplet(tuplet) => fmt::Display::fmt(tuplet, f),
        }
    }
}
