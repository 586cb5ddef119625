use std::rc::Rc;

use crate::{
    error::RuntimeError,
    interpreter::{
        evaluator::core::EvalResult,
        value::{complex::ComplexNumber, core::Value, number::Number},
    },
    util::num::{f64_to_i64_exact, gcd as gcd_u128},
};

/// Applies a unary builtin function to a numeric value.
///
/// - Integers, floats and rationals are converted to `f64` before applying
///   the real function.
/// - Complex values use the complex variant.
///
/// Non-numeric arguments produce a type error. Arity is checked by the
/// caller.
///
/// # Example
/// ```
/// use algom::interpreter::{library::builtin::sin, value::core::Value};
///
/// let x = Value::from(std::f64::consts::PI / 2.0);
/// assert_eq!(sin(&[x], 1).unwrap(), Value::from(1.0));
/// ```
macro_rules! real_complex_builtin {
    ($fname:ident, $real_fn:ident, $complex_fn:ident) => {
        pub fn $fname(args: &[Value], line: usize) -> EvalResult<Value> {
            match args[0].as_number(line)? {
                Number::Complex(c) => Ok(Value::from(ComplexNumber::$complex_fn(c))),
                real => Ok(Value::from(real.to_f64(line)?.$real_fn())),
            }
        }
    };
}

real_complex_builtin!(ln, ln, ln);
real_complex_builtin!(sin, sin, sin);
real_complex_builtin!(cos, cos, cos);
real_complex_builtin!(tan, tan, tan);
real_complex_builtin!(exp, exp, exp);
real_complex_builtin!(sinh, sinh, sinh);
real_complex_builtin!(cosh, cosh, cosh);
real_complex_builtin!(tanh, tanh, tanh);

/// Returns the absolute value of a number, or the Euclidean norm of a vector.
///
/// Keeps the variant of real numbers; complex numbers yield their modulus.
///
/// # Example
/// ```
/// use algom::interpreter::{
///     library::builtin::abs,
///     value::{complex::ComplexNumber, core::Value},
/// };
///
/// assert_eq!(abs(&[Value::from(-3)], 1).unwrap(), Value::from(3));
/// assert_eq!(abs(&[Value::from(ComplexNumber::new(3.0, 4.0))], 1).unwrap(), Value::from(5.0));
/// ```
pub fn abs(args: &[Value], line: usize) -> EvalResult<Value> {
    if let Value::Vector(items) = &args[0] {
        let norm = items.iter()
                        .map(|item| item.as_f64(line))
                        .try_fold(0.0, |acc: f64, x| x.map(|x| acc.hypot(x)))?;
        return Ok(Value::from(norm));
    }

    let value = match args[0].as_number(line)? {
        Number::Integer(n) => Number::Integer(n.checked_abs().ok_or(RuntimeError::Overflow { line })?),
        Number::Float(x) => Number::Float(x.abs()),
        Number::Rational(r) if r.numerator < 0 => Number::Rational(r.checked_neg(line)?),
        Number::Rational(r) => Number::Rational(r.normalized(line)?),
        Number::Complex(c) => Number::Float(c.abs()),
    };
    Ok(Value::Number(value))
}

/// Returns the principal square root.
///
/// Perfect squares stay integers; negative reals give an imaginary result.
///
/// # Example
/// ```
/// use algom::interpreter::{
///     library::builtin::sqrt,
///     value::{complex::ComplexNumber, core::Value},
/// };
///
/// assert_eq!(sqrt(&[Value::from(16)], 1).unwrap(), Value::from(4));
/// assert_eq!(sqrt(&[Value::from(-4)], 1).unwrap(), Value::from(ComplexNumber::new(0.0, 2.0)));
/// ```
pub fn sqrt(args: &[Value], line: usize) -> EvalResult<Value> {
    match args[0].as_number(line)? {
        Number::Complex(c) => Ok(Value::from(c.sqrt())),
        real => {
            let x = real.to_f64(line)?;
            if x < 0.0 {
                return Ok(Value::from(ComplexNumber::new(0.0, (-x).sqrt())));
            }
            match real {
                Number::Integer(_) => Ok(Value::Number(Number::from_native(x.sqrt()))),
                _ => Ok(Value::from(x.sqrt())),
            }
        },
    }
}

/// The greatest common divisor of two integers, always non-negative.
pub fn gcd(args: &[Value], line: usize) -> EvalResult<Value> {
    let a = integer_argument(&args[0], "gcd", line)?;
    let b = integer_argument(&args[1], "gcd", line)?;
    let divisor = gcd_u128(a.unsigned_abs().into(), b.unsigned_abs().into());
    let divisor = i64::try_from(divisor).map_err(|_| RuntimeError::Overflow { line })?;
    Ok(Value::from(divisor))
}

/// Whether an integer is even.
pub fn even(args: &[Value], line: usize) -> EvalResult<Value> {
    Ok(Value::Bool(integer_argument(&args[0], "even", line)? % 2 == 0))
}

/// Whether an integer is odd.
pub fn odd(args: &[Value], line: usize) -> EvalResult<Value> {
    Ok(Value::Bool(integer_argument(&args[0], "odd", line)? % 2 != 0))
}

/// The vector `[start, start + step, ...]`, stopping before `end`.
///
/// Elements are integers when all three arguments are; a negative step
/// counts down.
///
/// # Errors
/// A zero step, a bound or step that is not finite, or more than
/// [`MAX_RANGE_LENGTH`] elements.
///
/// # Example
/// ```
/// use algom::interpreter::{library::builtin::range, value::core::Value};
///
/// let r = range(&[Value::from(0), Value::from(10), Value::from(3)], 1).unwrap();
/// assert_eq!(r.to_string(), "[0, 3, 6, 9]");
///
/// let r = range(&[Value::from(3), Value::from(0), Value::from(-1)], 1).unwrap();
/// assert_eq!(r.to_string(), "[3, 2, 1]");
/// ```
pub fn range(args: &[Value], line: usize) -> EvalResult<Value> {
    let start = args[0].as_number(line)?;
    let end = args[1].as_number(line)?;
    let step = args[2].as_number(line)?;

    if step.equals(Number::Integer(0), line)? {
        return Err(RuntimeError::type_error("Range step cannot be zero.", line));
    }

    let (from, to, by) = (start.to_f64(line)?, end.to_f64(line)?, step.to_f64(line)?);
    if !(from.is_finite() && to.is_finite() && by.is_finite()) {
        return Err(RuntimeError::type_error("Range bounds and step must be finite.", line));
    }
    #[allow(clippy::cast_precision_loss)]
    let limit = MAX_RANGE_LENGTH as f64;
    if ((to - from) / by).ceil() > limit {
        return Err(RuntimeError::RangeTooLong { limit: MAX_RANGE_LENGTH,
                                                line });
    }

    let ascending = step.compare(Number::Integer(0), line)? == Some(std::cmp::Ordering::Greater);

    let mut items = Vec::new();
    let mut current = start;
    loop {
        let Some(order) = current.compare(end, line)? else {
            break;
        };
        let inside = if ascending {
            order == std::cmp::Ordering::Less
        } else {
            order == std::cmp::Ordering::Greater
        };
        if !inside {
            break;
        }
        items.push(Value::Number(current));
        current = current.add(step, line)?;
    }

    Ok(Value::Vector(Rc::new(items)))
}

/// The most elements a single range may produce.
pub const MAX_RANGE_LENGTH: usize = 1 << 20;

/// Reads an argument that must be an integer.
fn integer_argument(value: &Value, function: &str, line: usize) -> EvalResult<i64> {
    let number = value.as_number(line)?;
    number.as_integer()
          .or_else(|| match number {
              Number::Float(x) => f64_to_i64_exact(x),
              _ => None,
          })
          .ok_or_else(|| {
              RuntimeError::type_error(format!("Function “{function}” requires integer arguments, found {number}."),
                                       line)
          })
}
