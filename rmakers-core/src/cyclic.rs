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


//! A sequence that is indexed modulo its length.

use std::iter::FromIterator;

/// Fixed backing vector read cyclically.
///
/// ```
/// # use rmakers_core::cyclic::Cyclic;
/// let counts = Cyclic::new(vec![1, 2, 3]);
/// assert_eq!(counts.get(4), Some(&2));
/// assert_eq!(counts.rotate_left(1).items(), &[2, 3, 1]);
/// assert_eq!(counts.slice(2, 6), vec![3, 1, 2, 3]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Cyclic<T> {
    items: Vec<T>,
}

impl<T> Cyclic<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self { items }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// The item at `index` modulo the length, `None` only when empty.
    pub fn get(&self, index: usize) -> Option<&T> {
        if self.items.is_empty() {
            None
        } else {
            Some(&self.items[index % self.items.len()])
        }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }
}

impl<T: Clone> Cyclic<T> {
    /// Rotate so that the item at `count` comes first.
    pub fn rotate_left(&self, count: usize) -> Self {
        let mut items = self.items.clone();
        if !items.is_empty() {
            let len = items.len();
            items.rotate_left(count % len);
        }
        Self { items }
    }

    /// The items at the indices `start..stop`, wrapping around as often as needed.
    pub fn slice(&self, start: usize, stop: usize) -> Vec<T> {
        (start..stop)
            .filter_map(|index| self.get(index).cloned())
            .collect()
    }
}

impl<T> Default for Cyclic<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T> From<Vec<T>> for Cyclic<T> {
    fn from(items: Vec<T>) -> Self {
        Self { items }
    }
}

impl<T> FromIterator<T> for Cyclic<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn empty_cycle() {
        let empty: Cyclic<i64> = Cyclic::default();
        assert_eq!(empty.get(3), None);
        assert_eq!(empty.rotate_left(2), empty);
        assert!(empty.slice(0, 4).is_empty());
    }

    #[test]
    fn rotation_wraps() {
        let cycle = Cyclic::new(vec!['a', 'b', 'c']);
        assert_eq!(cycle.rotate_left(4).items(), &['b', 'c', 'a']);
        assert_eq!(cycle.rotate_left(3), cycle);
        assert_eq!(cycle.slice(3, 3), Vec::<char>::new());
    }
}
