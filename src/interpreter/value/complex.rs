use std::{fmt, ops};

use ordered_float::OrderedFloat;

use crate::{error::RuntimeError, interpreter::evaluator::core::EvalResult};

/// `0` as a complex number.
pub const ZERO: ComplexNumber = ComplexNumber::new(0.0, 0.0);
/// `1` as a complex number.
pub const ONE: ComplexNumber = ComplexNumber::new(1.0, 0.0);

/// A complex number in rectangular form.
///
/// Equality compares both parts through [`OrderedFloat`], so a NaN part
/// equals itself and the type can sit inside values that must compare.
#[derive(Debug, Clone, Copy)]
pub struct ComplexNumber {
    /// The real part.
    pub real:      f64,
    /// The imaginary part.
    pub imaginary: f64,
}

impl fmt::Display for ComplexNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self { real, imaginary } = *self;
        if imaginary == 0.0 {
            return write!(f, "{real}");
        }
        if real == 0.0 {
            return write!(f, "{imaginary}i");
        }
        let sign = if imaginary < 0.0 { '-' } else { '+' };
        write!(f, "{real} {sign} {}i", imaginary.abs())
    }
}

impl From<f64> for ComplexNumber {
    fn from(real: f64) -> Self {
        Self::new(real, 0.0)
    }
}

impl PartialEq for ComplexNumber {
    fn eq(&self, other: &Self) -> bool {
        (OrderedFloat(self.real), OrderedFloat(self.imaginary))
        == (OrderedFloat(other.real), OrderedFloat(other.imaginary))
    }
}

impl ComplexNumber {
    /// Creates `real + imaginary·i`.
    ///
    /// # Example
    /// ```
    /// use algom::interpreter::value::complex::ComplexNumber;
    ///
    /// let c = ComplexNumber::new(5.0, -1.0);
    /// assert_eq!((c.real, c.imaginary), (5.0, -1.0));
    /// assert_eq!(c.to_string(), "5 - 1i");
    /// ```
    #[must_use]
    pub const fn new(real: f64, imaginary: f64) -> Self {
        Self { real, imaginary }
    }

    /// Builds a number from its modulus and argument.
    #[must_use]
    pub fn from_polar(modulus: f64, argument: f64) -> Self {
        let (sin, cos) = argument.sin_cos();
        Self::new(modulus * cos, modulus * sin)
    }

    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.real == 0.0 && self.imaginary == 0.0
    }

    #[must_use]
    pub const fn is_finite(&self) -> bool {
        self.real.is_finite() && self.imaginary.is_finite()
    }

    /// The modulus `|z|`.
    ///
    /// # Example
    /// ```
    /// use algom::interpreter::value::complex::ComplexNumber;
    ///
    /// assert_eq!(ComplexNumber::new(3.0, 4.0).abs(), 5.0);
    /// ```
    #[must_use]
    pub fn abs(&self) -> f64 {
        self.real.hypot(self.imaginary)
    }

    /// The principal argument, in `(-π, π]`.
    #[must_use]
    pub fn arg(self) -> f64 {
        self.imaginary.atan2(self.real)
    }

    /// Divides, reporting a zero divisor instead of producing NaN parts.
    ///
    /// # Example
    /// ```
    /// use algom::interpreter::value::complex::{ComplexNumber, ZERO};
    ///
    /// let q = ComplexNumber::new(4.0, 2.0).checked_div(ComplexNumber::new(0.0, 2.0), 1)
    ///                                     .unwrap();
    /// assert_eq!(q, ComplexNumber::new(1.0, -2.0));
    /// assert!(ComplexNumber::new(1.0, 0.0).checked_div(ZERO, 1).is_err());
    /// ```
    pub fn checked_div(self, rhs: Self, line: usize) -> EvalResult<Self> {
        if rhs.is_zero() {
            return Err(RuntimeError::DivisionByZero { line });
        }
        Ok(self / rhs)
    }

    /// Raises to an integer power by binary exponentiation.
    ///
    /// Integer exponents stay exact where floats allow it, so `i^2` is
    /// exactly `-1` rather than going through logarithms.
    ///
    /// # Errors
    /// `DivisionByZero` for a negative power of zero, `Overflow` once a part
    /// stops being finite.
    ///
    /// # Example
    /// ```
    /// use algom::interpreter::value::complex::{ComplexNumber, ONE};
    ///
    /// let i = ComplexNumber::new(0.0, 1.0);
    /// assert_eq!(i.checked_powi(0, 1).unwrap(), ONE);
    /// assert_eq!(i.checked_powi(2, 1).unwrap(), ComplexNumber::new(-1.0, 0.0));
    /// assert_eq!(i.checked_powi(-1, 1).unwrap(), ComplexNumber::new(0.0, -1.0));
    /// ```
    pub fn checked_powi(self, exponent: i64, line: usize) -> EvalResult<Self> {
        if exponent < 0 && self.is_zero() {
            return Err(RuntimeError::DivisionByZero { line });
        }

        let finite = |z: Self| {
            if z.is_finite() {
                Ok(z)
            } else {
                Err(RuntimeError::Overflow { line })
            }
        };

        let mut power = ONE;
        let mut square = self;
        let mut remaining = exponent.unsigned_abs();
        while remaining > 0 {
            if remaining & 1 == 1 {
                power = finite(power * square)?;
            }
            remaining >>= 1;
            if remaining > 0 {
                square = finite(square * square)?;
            }
        }

        if exponent < 0 { ONE.checked_div(power, line) } else { Ok(power) }
    }

    /// Raises to a complex power through `exp(w · ln z)`.
    ///
    /// `0^w` is `0` when the real part of `w` is positive and a division by
    /// zero otherwise.
    pub fn checked_pow(self, exponent: Self, line: usize) -> EvalResult<Self> {
        if !self.is_zero() {
            return Ok((exponent * self.ln()).exp());
        }
        if exponent.real > 0.0 {
            Ok(ZERO)
        } else {
            Err(RuntimeError::DivisionByZero { line })
        }
    }

    /// The principal square root, with the sign of the imaginary part
    /// following the input.
    ///
    /// # Example
    /// ```
    /// use algom::interpreter::value::complex::ComplexNumber;
    ///
    /// let s = ComplexNumber::new(-4.0, 0.0).sqrt();
    /// assert!(s.real.abs() < 1e-10);
    /// assert!((s.imaginary - 2.0).abs() < 1e-10);
    /// ```
    #[must_use]
    pub fn sqrt(self) -> Self {
        let modulus = self.abs();
        Self::new(f64::midpoint(modulus, self.real).sqrt(),
                  ((modulus - self.real) / 2.0).sqrt().copysign(self.imaginary))
    }

    /// `e^z`.
    ///
    /// # Example
    /// ```
    /// use algom::interpreter::value::complex::ComplexNumber;
    ///
    /// let z = ComplexNumber::new(0.0, std::f64::consts::PI).exp();
    /// assert!((z.real + 1.0).abs() < 1e-10);
    /// assert!(z.imaginary.abs() < 1e-10);
    /// ```
    #[must_use]
    pub fn exp(self) -> Self {
        Self::from_polar(self.real.exp(), self.imaginary)
    }

    /// The principal natural logarithm.
    #[must_use]
    pub fn ln(self) -> Self {
        Self::new(self.abs().ln(), self.arg())
    }

    #[must_use]
    pub fn sin(self) -> Self {
        let (sin, cos) = self.real.sin_cos();
        Self::new(sin * self.imaginary.cosh(), cos * self.imaginary.sinh())
    }

    #[must_use]
    pub fn cos(self) -> Self {
        let (sin, cos) = self.real.sin_cos();
        Self::new(cos * self.imaginary.cosh(), -sin * self.imaginary.sinh())
    }

    #[must_use]
    pub fn tan(self) -> Self {
        self.sin() / self.cos()
    }

    #[must_use]
    pub fn sinh(self) -> Self {
        let (sin, cos) = self.imaginary.sin_cos();
        Self::new(self.real.sinh() * cos, self.real.cosh() * sin)
    }

    #[must_use]
    pub fn cosh(self) -> Self {
        let (sin, cos) = self.imaginary.sin_cos();
        Self::new(self.real.cosh() * cos, self.real.sinh() * sin)
    }

    #[must_use]
    pub fn tanh(self) -> Self {
        self.sinh() / self.cosh()
    }
}

impl ops::Neg for ComplexNumber {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.real, -self.imaginary)
    }
}

impl ops::Add for ComplexNumber {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.real + rhs.real, self.imaginary + rhs.imaginary)
    }
}

impl ops::Sub for ComplexNumber {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.real - rhs.real, self.imaginary - rhs.imaginary)
    }
}

/// `(a + bi)(c + di) = (ac - bd) + (ad + bc)i`
impl ops::Mul for ComplexNumber {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        let (a, b, c, d) = (self.real, self.imaginary, rhs.real, rhs.imaginary);
        Self::new(a.mul_add(c, -(b * d)), a.mul_add(d, b * c))
    }
}

/// Multiplies by the conjugate of the divisor and scales by its squared
/// modulus. Division by zero yields NaN parts; see
/// [`ComplexNumber::checked_div`].
impl ops::Div for ComplexNumber {
    type Output = Self;

    fn div(self, rhs: Self) -> Self {
        let (a, b, c, d) = (self.real, self.imaginary, rhs.real, rhs.imaginary);
        let scale = c.mul_add(c, d * d);
        Self::new(a.mul_add(c, b * d) / scale, b.mul_add(c, -(a * d)) / scale)
    }
}
