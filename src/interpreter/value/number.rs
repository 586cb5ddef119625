use std::{cmp::Ordering, fmt};

use crate::{
    error::RuntimeError,
    interpreter::{
        evaluator::core::EvalResult,
        value::{complex::ComplexNumber, rational::Rational},
    },
    util::num::{exponent_to_u32, f64_to_i64_exact, i64_to_f64_checked},
};

/// A value of the numeric tower.
///
/// Binary operations promote both operands to a common variant first:
/// complex if either side is complex, else float if either side is a float,
/// else rational if either side is a rational, else integer. The result
/// variant then follows from the operation, never from inspecting the result,
/// with one exception: integer operands whose exact result is integral stay
/// integers (`6 / 3` is `2`, `7 / 2` is `3.5`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    /// A 64-bit integer.
    Integer(i64),
    /// A double precision float.
    Float(f64),
    /// An exact fraction.
    Rational(Rational),
    /// A complex number.
    Complex(ComplexNumber),
}

/// Two operands promoted to a common variant.
enum Promoted {
    Integer(i64, i64),
    Rational(Rational, Rational),
    Float(f64, f64),
    Complex(ComplexNumber, ComplexNumber),
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(n) => write!(f, "{n}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::Rational(r) => write!(f, "{r}"),
            Self::Complex(c) => write!(f, "{c}"),
        }
    }
}

impl From<i64> for Number {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for Number {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<Rational> for Number {
    fn from(value: Rational) -> Self {
        Self::Rational(value)
    }
}

impl From<ComplexNumber> for Number {
    fn from(value: ComplexNumber) -> Self {
        Self::Complex(value)
    }
}

impl Number {
    /// Wraps the result of a native function, tagging exact integers as
    /// [`Number::Integer`].
    ///
    /// # Example
    /// ```
    /// use algom::interpreter::value::number::Number;
    ///
    /// assert_eq!(Number::from_native(3.0), Number::Integer(3));
    /// assert_eq!(Number::from_native(0.5), Number::Float(0.5));
    /// ```
    #[must_use]
    pub fn from_native(value: f64) -> Self {
        f64_to_i64_exact(value).map_or(Self::Float(value), Self::Integer)
    }

    /// Converts a real number to `f64`.
    ///
    /// # Errors
    /// `NumberTooLarge` for integers beyond `2^53`, `TypeError` for complex
    /// numbers.
    pub fn to_f64(self, line: usize) -> EvalResult<f64> {
        match self {
            Self::Integer(n) => i64_to_f64_checked(n, RuntimeError::NumberTooLarge { line }),
            Self::Float(x) => Ok(x),
            Self::Rational(r) => r.to_f64(line),
            Self::Complex(_) => {
                Err(RuntimeError::type_error("Expected a real number, found a complex number.", line))
            },
        }
    }

    /// Converts any number to a complex number.
    pub fn to_complex(self, line: usize) -> EvalResult<ComplexNumber> {
        match self {
            Self::Complex(c) => Ok(c),
            real => Ok(ComplexNumber::from(real.to_f64(line)?)),
        }
    }

    /// Returns the value as an integer if it is one exactly.
    ///
    /// Rationals with denominator one after reduction count as integers.
    #[must_use]
    pub fn as_integer(self) -> Option<i64> {
        match self {
            Self::Integer(n) => Some(n),
            Self::Rational(r) => r.normalized(0)
                                  .ok()
                                  .filter(|r| r.denominator == 1)
                                  .map(|r| r.numerator),
            Self::Float(_) | Self::Complex(_) => None,
        }
    }

    /// Whether this is a complex number.
    #[must_use]
    pub const fn is_complex(self) -> bool {
        matches!(self, Self::Complex(_))
    }

    fn promote(self, rhs: Self, line: usize) -> EvalResult<Promoted> {
        use Number::{Complex, Float, Integer, Rational as Ratio};

        Ok(match (self, rhs) {
            (Complex(_), _) | (_, Complex(_)) => {
                Promoted::Complex(self.to_complex(line)?, rhs.to_complex(line)?)
            },
            (Float(_), _) | (_, Float(_)) => Promoted::Float(self.to_f64(line)?, rhs.to_f64(line)?),
            (Ratio(a), Ratio(b)) => Promoted::Rational(a, b),
            (Ratio(a), Integer(b)) => Promoted::Rational(a, Rational::from(b)),
            (Integer(a), Ratio(b)) => Promoted::Rational(Rational::from(a), b),
            (Integer(a), Integer(b)) => Promoted::Integer(a, b),
        })
    }

    /// Adds two numbers.
    ///
    /// # Example
    /// ```
    /// use algom::interpreter::value::{number::Number, rational::Rational};
    ///
    /// let sum = Number::Rational(Rational::new(1, 2).unwrap())
    ///     .add(Number::Rational(Rational::new(1, 3).unwrap()), 1)
    ///     .unwrap();
    /// assert_eq!(sum, Number::Rational(Rational::new(5, 6).unwrap()));
    /// ```
    pub fn add(self, rhs: Self, line: usize) -> EvalResult<Self> {
        Ok(match self.promote(rhs, line)? {
            Promoted::Integer(a, b) => {
                Self::Integer(a.checked_add(b).ok_or(RuntimeError::Overflow { line })?)
            },
            Promoted::Rational(a, b) => Self::Rational(a.checked_add(b, line)?),
            Promoted::Float(a, b) => Self::Float(a + b),
            Promoted::Complex(a, b) => Self::Complex(a + b),
        })
    }

    /// Subtracts `rhs` from `self`.
    pub fn sub(self, rhs: Self, line: usize) -> EvalResult<Self> {
        Ok(match self.promote(rhs, line)? {
            Promoted::Integer(a, b) => {
                Self::Integer(a.checked_sub(b).ok_or(RuntimeError::Overflow { line })?)
            },
            Promoted::Rational(a, b) => Self::Rational(a.checked_sub(b, line)?),
            Promoted::Float(a, b) => Self::Float(a - b),
            Promoted::Complex(a, b) => Self::Complex(a - b),
        })
    }

    /// Multiplies two numbers.
    pub fn mul(self, rhs: Self, line: usize) -> EvalResult<Self> {
        Ok(match self.promote(rhs, line)? {
            Promoted::Integer(a, b) => {
                Self::Integer(a.checked_mul(b).ok_or(RuntimeError::Overflow { line })?)
            },
            Promoted::Rational(a, b) => Self::Rational(a.checked_mul(b, line)?),
            Promoted::Float(a, b) => Self::Float(a * b),
            Promoted::Complex(a, b) => Self::Complex(a * b),
        })
    }

    /// Divides `self` by `rhs`.
    ///
    /// Integer division stays an integer when it is exact.
    ///
    /// # Errors
    /// `DivisionByZero` for a zero divisor of any variant.
    ///
    /// # Example
    /// ```
    /// use algom::interpreter::value::number::Number;
    ///
    /// assert_eq!(Number::Integer(6).div(Number::Integer(3), 1).unwrap(), Number::Integer(2));
    /// assert_eq!(Number::Integer(7).div(Number::Integer(2), 1).unwrap(), Number::Float(3.5));
    /// assert!(Number::Float(1.0).div(Number::Integer(0), 1).is_err());
    /// ```
    pub fn div(self, rhs: Self, line: usize) -> EvalResult<Self> {
        Ok(match self.promote(rhs, line)? {
            Promoted::Integer(_, 0) => return Err(RuntimeError::DivisionByZero { line }),
            Promoted::Integer(a, b) if a % b == 0 => {
                Self::Integer(a.checked_div(b).ok_or(RuntimeError::Overflow { line })?)
            },
            Promoted::Integer(a, b) => Self::Float(Self::Integer(a).to_f64(line)?
                                                   / Self::Integer(b).to_f64(line)?),
            Promoted::Rational(a, b) => Self::Rational(a.checked_div(b, line)?),
            Promoted::Float(_, b) if b == 0.0 => return Err(RuntimeError::DivisionByZero { line }),
            Promoted::Float(a, b) => Self::Float(a / b),
            Promoted::Complex(a, b) => Self::Complex(a.checked_div(b, line)?),
        })
    }

    /// Raises `self` to the power `rhs`.
    ///
    /// A rational base takes integer exponents only; any other exponent is an
    /// `Unimplemented` error.
    ///
    /// # Example
    /// ```
    /// use algom::interpreter::value::{number::Number, rational::Rational};
    ///
    /// assert_eq!(Number::Integer(2).pow(Number::Integer(10), 1).unwrap(), Number::Integer(1024));
    /// assert_eq!(Number::Integer(2).pow(Number::Integer(-1), 1).unwrap(), Number::Float(0.5));
    ///
    /// let half = Number::Rational(Rational::new(1, 2).unwrap());
    /// assert!(half.pow(half, 1).is_err());
    /// ```
    pub fn pow(self, rhs: Self, line: usize) -> EvalResult<Self> {
        if let Self::Rational(base) = self
           && !rhs.is_complex()
        {
            return match rhs.as_integer() {
                Some(exponent) => Ok(Self::Rational(base.powi(exponent, line)?)),
                None => Err(RuntimeError::Unimplemented { details:
                                                              "A fractional exponent of a rational"
                                                                  .to_string(),
                                                          line }),
            };
        }

        if let (Self::Complex(base), Some(exponent)) = (self, rhs.as_integer()) {
            return Ok(Self::Complex(base.checked_powi(exponent, line)?));
        }

        Ok(match self.promote(rhs, line)? {
            Promoted::Integer(base, exponent) if exponent >= 0 => {
                let power = exponent_to_u32(exponent).ok_or(RuntimeError::Overflow { line })?;
                Self::Integer(base.checked_pow(power).ok_or(RuntimeError::Overflow { line })?)
            },
            Promoted::Integer(0, _) => return Err(RuntimeError::DivisionByZero { line }),
            Promoted::Integer(base, exponent) => {
                let value = Self::Integer(base).to_f64(line)?
                                               .powf(Self::Integer(exponent).to_f64(line)?);
                Self::from_native(value)
            },
            Promoted::Rational(_, exponent) => {
                // Only an integer base with a fractional exponent lands here.
                let base = self.to_f64(line)?;
                Self::Float(base.powf(exponent.to_f64(line)?))
            },
            Promoted::Float(base, exponent) => Self::Float(base.powf(exponent)),
            Promoted::Complex(base, exponent) => Self::Complex(base.checked_pow(exponent, line)?),
        })
    }

    /// Floored division: the largest integer not greater than `self / rhs`.
    ///
    /// # Example
    /// ```
    /// use algom::interpreter::value::number::Number;
    ///
    /// assert_eq!(Number::Integer(-7).floor_div(Number::Integer(2), 1).unwrap(),
    ///            Number::Integer(-4));
    /// ```
    pub fn floor_div(self, rhs: Self, line: usize) -> EvalResult<Self> {
        Ok(match self.promote(rhs, line)? {
            Promoted::Integer(_, 0) => return Err(RuntimeError::DivisionByZero { line }),
            Promoted::Integer(a, b) => {
                let quotient = a.checked_div(b).ok_or(RuntimeError::Overflow { line })?;
                if a % b != 0 && ((a < 0) != (b < 0)) {
                    Self::Integer(quotient - 1)
                } else {
                    Self::Integer(quotient)
                }
            },
            Promoted::Rational(a, b) => Self::Integer(a.checked_div(b, line)?.floor(line)?),
            Promoted::Float(_, b) if b == 0.0 => return Err(RuntimeError::DivisionByZero { line }),
            Promoted::Float(a, b) => Self::Float((a / b).floor()),
            Promoted::Complex(..) => return Err(Self::unordered("//", line)),
        })
    }

    /// Euclidean-style modulo: the result has the sign of the divisor.
    ///
    /// # Example
    /// ```
    /// use algom::interpreter::value::number::Number;
    ///
    /// assert_eq!(Number::Integer(-7).modulo(Number::Integer(3), 1).unwrap(), Number::Integer(2));
    /// assert_eq!(Number::Integer(7).modulo(Number::Integer(-3), 1).unwrap(), Number::Integer(-2));
    /// ```
    pub fn modulo(self, rhs: Self, line: usize) -> EvalResult<Self> {
        Ok(match self.promote(rhs, line)? {
            Promoted::Integer(_, 0) => return Err(RuntimeError::DivisionByZero { line }),
            Promoted::Integer(a, b) => {
                let remainder = a.checked_rem(b).ok_or(RuntimeError::Overflow { line })?;
                if remainder != 0 && ((remainder < 0) != (b < 0)) {
                    Self::Integer(remainder + b)
                } else {
                    Self::Integer(remainder)
                }
            },
            Promoted::Rational(a, b) => {
                let quotient = a.checked_div(b, line)?.floor(line)?;
                Self::Rational(a.checked_sub(b.checked_mul(Rational::from(quotient), line)?, line)?)
            },
            Promoted::Float(_, b) if b == 0.0 => return Err(RuntimeError::DivisionByZero { line }),
            Promoted::Float(a, b) => Self::Float(((a % b) + b) % b),
            Promoted::Complex(..) => return Err(Self::unordered("mod", line)),
        })
    }

    /// Truncated remainder: the result has the sign of the dividend.
    pub fn remainder(self, rhs: Self, line: usize) -> EvalResult<Self> {
        Ok(match self.promote(rhs, line)? {
            Promoted::Integer(_, 0) => return Err(RuntimeError::DivisionByZero { line }),
            Promoted::Integer(a, b) => {
                Self::Integer(a.checked_rem(b).ok_or(RuntimeError::Overflow { line })?)
            },
            Promoted::Rational(a, b) => {
                let quotient = a.checked_div(b, line)?.trunc(line)?;
                Self::Rational(a.checked_sub(b.checked_mul(Rational::from(quotient), line)?, line)?)
            },
            Promoted::Float(_, b) if b == 0.0 => return Err(RuntimeError::DivisionByZero { line }),
            Promoted::Float(a, b) => Self::Float(a % b),
            Promoted::Complex(..) => return Err(Self::unordered("rem", line)),
        })
    }

    /// Negates the number.
    pub fn neg(self, line: usize) -> EvalResult<Self> {
        Ok(match self {
            Self::Integer(n) => Self::Integer(n.checked_neg().ok_or(RuntimeError::Overflow { line })?),
            Self::Float(x) => Self::Float(-x),
            Self::Rational(r) => Self::Rational(r.checked_neg(line)?),
            Self::Complex(c) => Self::Complex(-c),
        })
    }

    /// The factorial of a non-negative integer.
    ///
    /// # Example
    /// ```
    /// use algom::interpreter::value::number::Number;
    ///
    /// assert_eq!(Number::Integer(5).factorial(1).unwrap(), Number::Integer(120));
    /// assert!(Number::Integer(-1).factorial(1).is_err());
    /// assert!(Number::Integer(21).factorial(1).is_err());
    /// ```
    pub fn factorial(self, line: usize) -> EvalResult<Self> {
        match self.as_integer() {
            Some(n) if n >= 0 => {
                let product = (2..=n).try_fold(1_i64, i64::checked_mul)
                                     .ok_or(RuntimeError::Overflow { line })?;
                Ok(Self::Integer(product))
            },
            _ => Err(RuntimeError::type_error(format!("Factorial requires a non-negative integer, found {self}."),
                                              line)),
        }
    }

    /// Orders two real numbers.
    ///
    /// Rationals are compared exactly by cross multiplication, numerator
    /// against numerator. `None` means the operands are unordered (NaN).
    ///
    /// # Errors
    /// A `TypeError` if either operand is complex.
    pub fn compare(self, rhs: Self, line: usize) -> EvalResult<Option<Ordering>> {
        match self.promote(rhs, line)? {
            Promoted::Integer(a, b) => Ok(Some(a.cmp(&b))),
            Promoted::Rational(a, b) => Ok(Some(a.compare(b, line)?)),
            Promoted::Float(a, b) => Ok(a.partial_cmp(&b)),
            Promoted::Complex(..) => Err(Self::unordered("comparison", line)),
        }
    }

    /// Numeric equality across variants: `1/2 == 2/4`, `2 == 2.0`,
    /// `3 == 3 + 0i`.
    pub fn equals(self, rhs: Self, line: usize) -> EvalResult<bool> {
        match self.promote(rhs, line)? {
            Promoted::Complex(a, b) => Ok(a == b),
            _ => Ok(self.compare(rhs, line)? == Some(Ordering::Equal)),
        }
    }

    fn unordered(operation: &str, line: usize) -> RuntimeError {
        RuntimeError::type_error(format!("Complex numbers have no ordering; {operation} is undefined for them."),
                                 line)
    }
}
