use std::{cmp::Ordering, fmt};

use crate::{
    error::RuntimeError,
    interpreter::evaluator::core::EvalResult,
    util::num::{MAX_SAFE_I64_INT, gcd},
};

/// An exact fraction of two 64-bit integers.
///
/// Literals keep the form they were written in (`2/4` stays `2/4`), every
/// arithmetic result is reduced: the denominator is positive and shares no
/// factor with the numerator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rational {
    /// The numerator, carrying the sign once reduced.
    pub numerator:   i64,
    /// The denominator, never zero.
    pub denominator: i64,
}

impl fmt::Display for Rational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.numerator, self.denominator)
    }
}

impl From<i64> for Rational {
    fn from(value: i64) -> Self {
        Self { numerator:   value,
               denominator: 1, }
    }
}

impl Rational {
    /// Creates a fraction exactly as written, without reducing it.
    ///
    /// Returns `None` for a zero denominator.
    ///
    /// # Example
    /// ```
    /// use algom::interpreter::value::rational::Rational;
    ///
    /// let half = Rational::new(2, 4).unwrap();
    /// assert_eq!((half.numerator, half.denominator), (2, 4));
    /// assert!(Rational::new(1, 0).is_none());
    /// ```
    #[must_use]
    pub const fn new(numerator: i64, denominator: i64) -> Option<Self> {
        if denominator == 0 {
            return None;
        }
        Some(Self { numerator,
                    denominator })
    }

    /// Reduces a wide fraction to lowest terms with a positive denominator.
    ///
    /// # Errors
    /// `DivisionByZero` for a zero denominator, `Overflow` if the reduced
    /// parts do not fit in `i64`.
    ///
    /// # Example
    /// ```
    /// use algom::interpreter::value::rational::Rational;
    ///
    /// let r = Rational::reduce(6, -8, 1).unwrap();
    /// assert_eq!((r.numerator, r.denominator), (-3, 4));
    /// ```
    pub fn reduce(numerator: i128, denominator: i128, line: usize) -> EvalResult<Self> {
        if denominator == 0 {
            return Err(RuntimeError::DivisionByZero { line });
        }

        let divisor = gcd(numerator.unsigned_abs(), denominator.unsigned_abs());
        // The divisor divides both magnitudes, so it fits back into i128.
        let divisor = i128::try_from(divisor).map_err(|_| RuntimeError::Overflow { line })?;
        let (mut numerator, mut denominator) = (numerator / divisor, denominator / divisor);
        if denominator < 0 {
            numerator = -numerator;
            denominator = -denominator;
        }

        match (i64::try_from(numerator), i64::try_from(denominator)) {
            (Ok(numerator), Ok(denominator)) => Ok(Self { numerator,
                                                          denominator }),
            _ => Err(RuntimeError::Overflow { line }),
        }
    }

    /// Returns this fraction in lowest terms.
    pub fn normalized(self, line: usize) -> EvalResult<Self> {
        Self::reduce(self.numerator.into(), self.denominator.into(), line)
    }

    /// Adds two fractions: `a/b + c/d = (ad + cb) / bd`.
    pub fn checked_add(self, rhs: Self, line: usize) -> EvalResult<Self> {
        let (a, b, c, d) = self.widen(rhs);
        let numerator = (a * d).checked_add(c * b).ok_or(RuntimeError::Overflow { line })?;
        Self::reduce(numerator, b * d, line)
    }

    /// Subtracts two fractions: `a/b - c/d = (ad - cb) / bd`.
    pub fn checked_sub(self, rhs: Self, line: usize) -> EvalResult<Self> {
        let (a, b, c, d) = self.widen(rhs);
        let numerator = (a * d).checked_sub(c * b).ok_or(RuntimeError::Overflow { line })?;
        Self::reduce(numerator, b * d, line)
    }

    /// Multiplies two fractions.
    pub fn checked_mul(self, rhs: Self, line: usize) -> EvalResult<Self> {
        let (a, b, c, d) = self.widen(rhs);
        Self::reduce(a * c, b * d, line)
    }

    /// Divides two fractions.
    ///
    /// # Errors
    /// `DivisionByZero` when `rhs` is zero.
    pub fn checked_div(self, rhs: Self, line: usize) -> EvalResult<Self> {
        let (a, b, c, d) = self.widen(rhs);
        Self::reduce(a * d, b * c, line)
    }

    /// Raises the fraction to an integer power by raising numerator and
    /// denominator independently.
    ///
    /// # Example
    /// ```
    /// use algom::interpreter::value::rational::Rational;
    ///
    /// let r = Rational::new(2, 3).unwrap().powi(-2, 1).unwrap();
    /// assert_eq!((r.numerator, r.denominator), (9, 4));
    /// ```
    pub fn powi(self, exponent: i64, line: usize) -> EvalResult<Self> {
        let reduced = self.normalized(line)?;
        let power = u32::try_from(exponent.unsigned_abs()).map_err(|_| RuntimeError::Overflow { line })?;

        let numerator = reduced.numerator
                               .checked_pow(power)
                               .ok_or(RuntimeError::Overflow { line })?;
        let denominator = reduced.denominator
                                 .checked_pow(power)
                                 .ok_or(RuntimeError::Overflow { line })?;

        if exponent < 0 {
            Self::reduce(denominator.into(), numerator.into(), line)
        } else {
            Self::reduce(numerator.into(), denominator.into(), line)
        }
    }

    /// Negates the fraction, reducing it.
    pub fn checked_neg(self, line: usize) -> EvalResult<Self> {
        Self::reduce(-i128::from(self.numerator), self.denominator.into(), line)
    }

    /// The largest integer not greater than the fraction.
    pub fn floor(self, line: usize) -> EvalResult<i64> {
        let reduced = self.normalized(line)?;
        Ok(reduced.numerator.div_euclid(reduced.denominator))
    }

    /// The integer part of the fraction, rounded toward zero.
    pub fn trunc(self, line: usize) -> EvalResult<i64> {
        let reduced = self.normalized(line)?;
        Ok(reduced.numerator / reduced.denominator)
    }

    /// Compares the values of two fractions by cross-multiplying their
    /// reduced forms.
    ///
    /// # Example
    /// ```
    /// use std::cmp::Ordering;
    ///
    /// use algom::interpreter::value::rational::Rational;
    ///
    /// let half = Rational::new(1, 2).unwrap();
    /// let one = Rational::from(1);
    /// assert_eq!(half.compare(one, 1).unwrap(), Ordering::Less);
    /// assert_eq!(Rational::new(2, 4).unwrap().compare(half, 1).unwrap(), Ordering::Equal);
    /// ```
    pub fn compare(self, rhs: Self, line: usize) -> EvalResult<Ordering> {
        let lhs = self.normalized(line)?;
        let rhs = rhs.normalized(line)?;
        let left = i128::from(lhs.numerator) * i128::from(rhs.denominator);
        let right = i128::from(rhs.numerator) * i128::from(lhs.denominator);
        Ok(left.cmp(&right))
    }

    /// The closest `f64` to the fraction.
    ///
    /// # Errors
    /// `NumberTooLarge` when either part exceeds the exactly representable
    /// range of `f64`.
    #[allow(clippy::cast_precision_loss)]
    pub fn to_f64(self, line: usize) -> EvalResult<f64> {
        if self.numerator.unsigned_abs() > MAX_SAFE_I64_INT.unsigned_abs()
           || self.denominator.unsigned_abs() > MAX_SAFE_I64_INT.unsigned_abs()
        {
            return Err(RuntimeError::NumberTooLarge { line });
        }
        Ok(self.numerator as f64 / self.denominator as f64)
    }

    /// Widens both fractions to `i128` so cross products cannot overflow.
    fn widen(self, rhs: Self) -> (i128, i128, i128, i128) {
        (self.numerator.into(), self.denominator.into(), rhs.numerator.into(), rhs.denominator.into())
    }
}
