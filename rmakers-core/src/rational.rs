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

//! Exact rational numbers, used for every duration in a rhythm.

use std::fmt;
use std::{cmp::Ordering, iter, ops};

use snafu::Snafu;

/// Underlying integral type for the rational numbers.
pub type Int = i64;

/// A rational number, always fully normalized.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Rational {
    /// The numerator of the fraction.
    /// If the fraction is negative, the numerator will be made negative.
    num: Int,
    /// The denominator of the fraction, always positive.
    denom: Int,
}

impl Rational {
    pub const ZERO: Rational = Rational { num: 0, denom: 1 };
    pub const ONE: Rational = Rational { num: 1, denom: 1 };

    // ==================== Constructors ====================

    /// Create a new rational from a potentially unnormalized fraction.
    ///
    /// # Panic
    ///
    /// Panics if the denominator is zero.
    ///
    /// # Examples
    ///
    /// ```
    /// # use rmakers_core::rational::*;
    ///
    /// assert_eq!(Rational::new(10, 5), Rational::new(2, 1));
    /// assert_eq!(Rational::new(-10, -5), Rational::new(6, 3));
    /// assert_eq!(Rational::new(-6, 8), Rational::new(3, -4));
    /// assert_eq!(Rational::new(0, -7), Rational::ZERO);
    /// ```
    pub fn new(num: Int, denom: Int) -> Rational {
        assert_ne!(denom, 0, "Denominator must not be zero");

        let sign = num.signum() * denom.signum();
        let div = gcd(num, denom).max(1);
        Rational {
            num: sign * num.abs() / div,
            denom: denom.abs() / div,
        }
    }

    pub const fn int(int: Int) -> Rational {
        Rational { num: int, denom: 1 }
    }

    /// Round a float to the nearest multiple of `1 / denominator`, ties to even.
    ///
    /// ```
    /// # use rmakers_core::rational::*;
    /// assert_eq!(Rational::from_f64(0.3, 1024), Rational::new(307, 1024));
    /// assert_eq!(Rational::from_f64(2.5, 1), Rational::int(2));
    /// assert_eq!(Rational::from_f64(3.5, 1), Rational::int(4));
    /// assert_eq!(Rational::from_f64(-0.75, 4), Rational::new(-3, 4));
    /// ```
    pub fn from_f64(value: f64, denominator: Int) -> Rational {
        let scaled = value * denominator as f64;
        let rounded = if (scaled - scaled.trunc()).abs() == 0.5 {
            2.0 * (scaled / 2.0).round()
        } else {
            scaled.round()
        };
        Rational::new(rounded as Int, denominator)
    }

    // ==================== Transformations ====================

    /// ```
    /// # use rmakers_core::rational::*;
    /// assert_eq!(Rational::new(3, 8).recip(), Rational::new(8, 3));
    /// assert_eq!(Rational::new(-1, 4).recip(), Rational::int(-4));
    /// ```
    pub fn recip(self) -> Rational {
        Rational::new(self.denom, self.num)
    }

    pub fn abs(self) -> Rational {
        Rational {
            num: self.num.abs(),
            denom: self.denom,
        }
    }

    /// The smallest (possibly fractional) power of two not less than `self`.
    ///
    /// ```
    /// # use rmakers_core::rational::*;
    /// assert_eq!(Rational::new(1, 20).equal_or_greater_power_of_two(), Rational::new(1, 16));
    /// assert_eq!(Rational::new(1, 8).equal_or_greater_power_of_two(), Rational::new(1, 8));
    /// assert_eq!(Rational::new(3, 2).equal_or_greater_power_of_two(), Rational::int(2));
    /// ```
    pub fn equal_or_greater_power_of_two(self) -> Rational {
        assert!(self.num > 0, "{} is not positive", self);
        let mut power = Rational::ONE;
        while power < self {
            power *= Rational::int(2);
        }
        while power / 2 >= self {
            power /= Rational::int(2);
        }
        power
    }

    /// Round towards negative infinity.
    ///
    /// ```
    /// # use rmakers_core::rational::*;
    /// assert_eq!(Rational::new(7, 2).floor(), 3);
    /// assert_eq!(Rational::new(-7, 2).floor(), -4);
    /// assert_eq!(Rational::int(5).floor(), 5);
    /// ```
    pub fn floor(self) -> Int {
        self.num.div_euclid(self.denom)
    }

    /// The numerator this value has when written over `denominator`, if that is exact.
    ///
    /// ```
    /// # use rmakers_core::rational::*;
    /// assert_eq!(Rational::new(3, 8).with_denominator(16), Some(6));
    /// assert_eq!(Rational::new(3, 8).with_denominator(4), None);
    /// ```
    pub fn with_denominator(self, denominator: Int) -> Option<Int> {
        if denominator % self.denom == 0 {
            Some(self.num * (denominator / self.denom))
        } else {
            None
        }
    }

    pub fn to_f64(self) -> f64 {
        self.num as f64 / self.denom as f64
    }

    // ==================== Predicates ====================

    pub const fn is_zero(self) -> bool {
        self.num == 0
    }

    pub const fn is_positive(self) -> bool {
        self.num > 0
    }

    /// Whether a single note head (with dots) can be written with this duration.
    ///
    /// ```
    /// # use rmakers_core::rational::*;
    /// assert!(Rational::new(3, 16).is_assignable());
    /// assert!(Rational::new(7, 8).is_assignable());
    /// assert!(Rational::int(8).is_assignable());
    /// assert!(!Rational::new(5, 16).is_assignable());
    /// assert!(!Rational::new(1, 12).is_assignable());
    /// assert!(!Rational::int(16).is_assignable());
    /// assert!(!Rational::new(-1, 4).is_assignable());
    /// ```
    pub fn is_assignable(self) -> bool {
        if self.num <= 0 || self >= Rational::int(16) || !is_power_of_two(self.denom) {
            return false;
        }
        let heads = self.num >> self.num.trailing_zeros();
        heads & (heads + 1) == 0
    }

    // ==================== Destructors ====================

    pub const fn numerator(self) -> Int {
        self.num
    }

    pub const fn denominator(self) -> Int {
        self.denom
    }
}

/// # Examples
///
/// ```
/// use rmakers_core::rational::*;
///
/// assert_eq!(Rational::new(1, 2) + Rational::new(3, 4), Rational::new(5, 4));
/// assert_eq!(Rational::new(3, 4) + Rational::new(3, 4), Rational::new(3, 2));
/// assert_eq!(Rational::new(3, 4) + Rational::new(-5, 8), Rational::new(1, 8));
/// ```
impl ops::Add for Rational {
    type Output = Rational;

    #[allow(clippy::suspicious_arithmetic_impl)]
    fn add(self, rhs: Rational) -> Self::Output {
        let denom = lcm(self.denom, rhs.denom);
        Rational::new(
            self.num * (denom / self.denom) + rhs.num * (denom / rhs.denom),
            denom,
        )
    }
}

impl ops::Sub for Rational {
    type Output = Rational;

    fn sub(self, rhs: Rational) -> Self::Output {
        self + (-rhs)
    }
}

impl ops::Mul for Rational {
    type Output = Rational;

    fn mul(self, rhs: Rational) -> Self::Output {
        // cross-cancel first to keep the intermediate products small
        let a = gcd(self.num, rhs.denom).max(1);
        let b = gcd(rhs.num, self.denom).max(1);
        Rational::new(
            (self.num / a) * (rhs.num / b),
            (self.denom / b) * (rhs.denom / a),
        )
    }
}

impl ops::Div for Rational {
    type Output = Rational;

    #[allow(clippy::suspicious_arithmetic_impl)]
    fn div(self, rhs: Rational) -> Self::Output {
        self * rhs.recip()
    }
}

impl ops::Mul<Int> for Rational {
    type Output = Rational;

    fn mul(self, rhs: Int) -> Self::Output {
        self * Rational::int(rhs)
    }
}

impl ops::Mul<Rational> for Int {
    type Output = Rational;

    fn mul(self, rhs: Rational) -> Self::Output {
        Rational::int(self) * rhs
    }
}

/// ```
/// # use rmakers_core::rational::*;
/// assert_eq!(Rational::new(1, 4) / 2, Rational::new(1, 8));
/// assert_eq!(Rational::new(9, 13) / 3, Rational::new(3, 13));
/// ```
impl ops::Div<Int> for Rational {
    type Output = Rational;

    #[allow(clippy::suspicious_arithmetic_impl)]
    fn div(self, rhs: Int) -> Self::Output {
        self / Rational::int(rhs)
    }
}

impl ops::Neg for Rational {
    type Output = Rational;

    fn neg(self) -> Self::Output {
        Rational {
            num: -self.num,
            denom: self.denom,
        }
    }
}

impl ops::AddAssign for Rational {
    fn add_assign(&mut self, rhs: Rational) {
        *self = *self + rhs;
    }
}

impl ops::SubAssign for Rational {
    fn sub_assign(&mut self, rhs: Rational) {
        *self = *self - rhs;
    }
}

impl ops::MulAssign for Rational {
    fn mul_assign(&mut self, rhs: Rational) {
        *self = *self * rhs;
    }
}

impl ops::DivAssign for Rational {
    fn div_assign(&mut self, rhs: Rational) {
        *self = *self / rhs;
    }
}

/// ```
/// # use rmakers_core::rational::*;
/// let total: Rational = vec![Rational::new(3, 8), Rational::new(1, 16)].into_iter().sum();
/// assert_eq!(total, Rational::new(7, 16));
/// ```
impl iter::Sum for Rational {
    fn sum<I: Iterator<Item = Rational>>(iter: I) -> Rational {
        iter.fold(Rational::ZERO, |acc, x| acc + x)
    }
}

impl<'a> iter::Sum<&'a Rational> for Rational {
    fn sum<I: Iterator<Item = &'a Rational>>(iter: I) -> Rational {
        iter.copied().sum()
    }
}

impl From<Int> for Rational {
    fn from(int: Int) -> Rational {
        Rational::int(int)
    }
}

/// ```
/// # use rmakers_core::rational::*;
/// assert_eq!(Rational::from((6, 16)), Rational::new(3, 8));
/// ```
impl From<(Int, Int)> for Rational {
    fn from((num, denom): (Int, Int)) -> Rational {
        Rational::new(num, denom)
    }
}

impl PartialOrd for Rational {
    fn partial_cmp(&self, other: &Rational) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// ```
/// use rmakers_core::rational::*;
///
/// assert!(Rational::new(3,4) < Rational::new(3,2));
/// assert!(Rational::new(-1,4) < Rational::ZERO);
/// ```
impl Ord for Rational {
    fn cmp(&self, other: &Self) -> Ordering {
        // a / b < c / d  <=>  a * d < c * b, denominators being positive
        let l = self.num as i128 * other.denom as i128;
        let r = other.num as i128 * self.denom as i128;
        l.cmp(&r)
    }
}

/// ```
/// # use rmakers_core::rational::*;
/// assert_eq!(Rational::new(3, 16).to_string(), "3/16");
/// assert_eq!(Rational::int(2).to_string(), "2");
/// ```
impl fmt::Display for Rational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.num)?;
        if self.denom != 1 {
            write!(f, "/{}", self.denom)?;
        }
        Ok(())
    }
}

/// An error which can be returned when parsing a rational.
#[derive(Debug, Clone, PartialEq, Eq, Snafu)]
pub enum ParseRationalError {
    /// The numerator or denominator could not be parsed as integer.
    #[snafu(display("invalid integer literal {:?}", text))]
    InvalidInt { text: String },
    #[snafu(display("denominator is zero"))]
    ZeroDenominator,
    /// The rational was not of the form `<int>` or `<int>/<int>`.
    #[snafu(display("malformed fraction {:?}", text))]
    Malformed { text: String },
}

/// ```
/// # use rmakers_core::rational::*;
/// assert_eq!("3/8".parse::<Rational>(), Ok(Rational::new(3, 8)));
/// assert_eq!("-5".parse::<Rational>(), Ok(Rational::int(-5)));
/// assert_eq!("1/0".parse::<Rational>(), Err(ParseRationalError::ZeroDenominator));
/// assert!("1/2/3".parse::<Rational>().is_err());
/// ```
impl std::str::FromStr for Rational {
    type Err = ParseRationalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parse_int = |text: &str| {
            text.trim()
                .parse::<Int>()
                .map_err(|_| ParseRationalError::InvalidInt {
                    text: text.to_string(),
                })
        };

        let mut parts = s.split('/');
        let numerator = parse_int(parts.next().unwrap_or(""))?;
        match (parts.next(), parts.next()) {
            (None, _) => Ok(Rational::int(numerator)),
            (Some(denominator_str), None) => {
                let denominator = parse_int(denominator_str)?;
                if denominator == 0 {
                    Err(ParseRationalError::ZeroDenominator)
                } else {
                    Ok(Rational::new(numerator, denominator))
                }
            }
            (Some(_), Some(_)) => Err(ParseRationalError::Malformed {
                text: s.to_string(),
            }),
        }
    }
}

/// Computes the greates common divisor of two numbers using euclids algorithm.
///
/// # Example
///
/// ```
/// use rmakers_core::rational::*;
///
/// assert_eq!(gcd(20, 15), 5);
/// assert_eq!(gcd(20, 19), 1);
/// assert_eq!(gcd(10, 0), 10);
/// assert_eq!(gcd(0, 10), 10);
/// assert_eq!(gcd(0, 0), 0);
/// assert_eq!(gcd(10, -10), 10);
/// ```
pub fn gcd(mut a: Int, mut b: Int) -> Int {
    a = a.abs();
    b = b.abs();
    while b != 0 {
        let t = b;
        b = a % b;
        a = t;
    }
    a
}

/// Least common multiple of two positive numbers.
///
/// ```
/// # use rmakers_core::rational::*;
/// assert_eq!(lcm(8, 16), 16);
/// assert_eq!(lcm(8, 12), 24);
/// assert_eq!(lcm(5, 1), 5);
/// ```
pub fn lcm(a: Int, b: Int) -> Int {
    if a == 0 || b == 0 {
        return 0;
    }
    (a / gcd(a, b) * b).abs()
}

/// ```
/// # use rmakers_core::rational::*;
/// assert!(is_power_of_two(1));
/// assert!(is_power_of_two(32));
/// assert!(!is_power_of_two(12));
/// assert!(!is_power_of_two(0));
/// ```
pub fn is_power_of_two(n: Int) -> bool {
    n > 0 && n & (n - 1) == 0
}

/// The largest power of two that is at most `n`.
///
/// ```
/// # use rmakers_core::rational::*;
/// assert_eq!(greatest_power_of_two_at_most(12), 8);
/// assert_eq!(greatest_power_of_two_at_most(16), 16);
/// assert_eq!(greatest_power_of_two_at_most(1), 1);
/// ```
pub fn greatest_power_of_two_at_most(n: Int) -> Int {
    assert!(n > 0, "{} is not positive", n);
    1 << (63 - n.leading_zeros())
}
