// rmakers -- rhythm-makers for algorithmic composition
// Copyright (C) 2021  Fabian Thorand
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.


//! Weight operations on sequences of signed counts.
//!
//! The weight of a count is its magnitude, its sign says whether it sounds.

use std::mem;

use crate::rational::Int;

/// Something with a signed weight that can be cut into pieces.
pub trait Weighted: Sized {
    /// Magnitude of the item.
    fn weight(&self) -> Int;
    /// A copy of the item with the given magnitude and the same sign.
    fn with_weight(&self, weight: Int) -> Self;
}

impl Weighted for Int {
    fn weight(&self) -> Int {
        self.abs()
    }

    fn with_weight(&self, weight: Int) -> Self {
        if *self < 0 {
            -weight
        } else {
            weight
        }
    }
}

/// Sum of magnitudes.
///
/// ```
/// # use rmakers_core::sequence::weight;
/// assert_eq!(weight(&[-2, 5, -1]), 8);
/// ```
pub fn weight<T: Weighted>(items: &[T]) -> Int {
    items.iter().map(Weighted::weight).sum()
}

/// Cut `items` into consecutive parts of the given weights.
///
/// Items straddling a cut point are split in two, keeping their sign. With
/// `cyclic` the weights repeat until the items run out; with `overhang`
/// whatever is left after the last complete part forms a final part.
///
/// ```
/// # use rmakers_core::sequence::split;
/// assert_eq!(
///     split(&[10, -10], &[3], true, false),
///     vec![vec![3], vec![3], vec![3], vec![1, -2], vec![-3], vec![-3]]
/// );
/// assert_eq!(
///     split(&[10, -10], &[3, 5], false, true),
///     vec![vec![3], vec![5], vec![2, -10]]
/// );
/// ```
pub fn split<T: Weighted + Clone>(
    items: &[T],
    weights: &[Int],
    cyclic: bool,
    overhang: bool,
) -> Vec<Vec<T>> {
    assert!(
        weights.iter().all(|weight| *weight > 0),
        "split weights must be positive"
    );
    let target_at = |index: usize| -> Option<Int> {
        if cyclic && !weights.is_empty() {
            Some(weights[index % weights.len()])
        } else {
            weights.get(index).copied()
        }
    };

    let mut parts = Vec::new();
    let mut current = Vec::new();
    let mut filled = 0;
    let mut pending: Vec<T> = items.iter().rev().cloned().collect();

    while let Some(item) = pending.pop() {
        let target = match target_at(parts.len()) {
            Some(target) => target,
            None => {
                current.push(item);
                continue;
            }
        };
        let item_weight = item.weight();
        let room = target - filled;
        if item_weight <= room {
            current.push(item);
            filled += item_weight;
            if filled == target {
                parts.push(mem::take(&mut current));
                filled = 0;
            }
        } else {
            pending.push(item.with_weight(item_weight - room));
            current.push(item.with_weight(room));
            parts.push(mem::take(&mut current));
            filled = 0;
        }
    }

    if overhang && !current.is_empty() {
        parts.push(current);
    }
    parts
}

/// The longest prefix of `items` with at most `total` weight, the last item
/// shortened so that the weight is exactly `total` if the items suffice.
///
/// ```
/// # use rmakers_core::sequence::truncate_to_weight;
/// assert_eq!(truncate_to_weight(&[-2, 5, 1], 4), vec![-2, 2]);
/// assert_eq!(truncate_to_weight(&[-2, 5, 1], 20), vec![-2, 5, 1]);
/// ```
pub fn truncate_to_weight<T: Weighted + Clone>(items: &[T], total: Int) -> Vec<T> {
    let mut result = Vec::new();
    let mut remaining = total;
    for item in items {
        if remaining <= 0 {
            break;
        }
        let item_weight = item.weight();
        if item_weight <= remaining {
            result.push(item.clone());
        } else {
            result.push(item.with_weight(remaining));
        }
        remaining -= item_weight;
    }
    result
}
