//! Properties of the numeric tower's division family and fraction
//! normalisation.

#![allow(clippy::unwrap_used, reason = "Tests can panic")]

use std::cmp::Ordering;

use algom::interpreter::value::{core::Value, number::Number, rational::Rational};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

fn integer(n: Number) -> i64 {
    match n {
        Number::Integer(n) => n,
        other => panic!("expected an integer, found {other:?}"),
    }
}

fn gcd(mut a: i64, mut b: i64) -> i64 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a.abs()
}

/// Operands whose quotient fits in `i64`.
fn operands() -> impl Strategy<Value = (i64, i64)> {
    (-1_000_000_000_i64..1_000_000_000, -10_000_i64..10_000).prop_filter("non-zero divisor",
                                                                        |(_, b)| *b != 0)
}

fn fraction() -> impl Strategy<Value = Rational> {
    (-10_000_i64..10_000, -10_000_i64..10_000).prop_filter_map("non-zero denominator",
                                                              |(n, d)| Rational::new(n, d))
}

proptest! {
    #[test]
    fn floor_div_rounds_toward_negative_infinity((a, b) in operands()) {
        let quotient = integer(Number::Integer(a).floor_div(Number::Integer(b), 1).unwrap());
        prop_assert!(quotient * b <= a || b < 0);
        prop_assert!(quotient * b >= a || b > 0);
        prop_assert!((a - quotient * b).abs() < b.abs());
    }

    #[test]
    fn modulo_takes_the_sign_of_the_divisor((a, b) in operands()) {
        let m = integer(Number::Integer(a).modulo(Number::Integer(b), 1).unwrap());
        prop_assert!(m == 0 || m.signum() == b.signum());
        prop_assert!(m.abs() < b.abs());
        prop_assert_eq!((a - m) % b, 0);
    }

    #[test]
    fn remainder_takes_the_sign_of_the_dividend((a, b) in operands()) {
        let r = integer(Number::Integer(a).remainder(Number::Integer(b), 1).unwrap());
        prop_assert!(r == 0 || r.signum() == a.signum());
        prop_assert_eq!(r, a % b);
    }

    #[test]
    fn floor_div_and_modulo_agree((a, b) in operands()) {
        let q = integer(Number::Integer(a).floor_div(Number::Integer(b), 1).unwrap());
        let m = integer(Number::Integer(a).modulo(Number::Integer(b), 1).unwrap());
        prop_assert_eq!(q * b + m, a);
    }

    #[test]
    fn rational_results_are_reduced(x in fraction(), y in fraction()) {
        for result in [x.checked_add(y, 1), x.checked_sub(y, 1), x.checked_mul(y, 1)] {
            let r = result.unwrap();
            prop_assert!(r.denominator > 0);
            prop_assert_eq!(gcd(r.numerator, r.denominator), 1);
        }
    }

    #[test]
    fn rational_order_matches_float_order(x in fraction(), y in fraction()) {
        let exact = x.compare(y, 1).unwrap();
        let approximate = x.to_f64(1).unwrap().partial_cmp(&y.to_f64(1).unwrap()).unwrap();
        // Distinct fractions this small never collide as floats.
        prop_assert_eq!(exact, approximate);
    }
}

#[test]
fn half_is_less_than_one() {
    let half = Number::Rational(Rational::new(1, 2).unwrap());
    assert_eq!(half.compare(Number::Integer(1), 1).unwrap(), Some(Ordering::Less));
    assert_eq!(Number::Integer(1).compare(half, 1).unwrap(), Some(Ordering::Greater));

    let two_thirds = Number::Rational(Rational::new(2, 3).unwrap());
    let three_quarters = Number::Rational(Rational::new(3, 4).unwrap());
    assert_eq!(two_thirds.compare(three_quarters, 1).unwrap(), Some(Ordering::Less));
}

#[test]
fn division_by_zero_is_reported_for_every_variant() {
    let zero_fraction = Number::Rational(Rational::from(0));
    let cases = [(Number::Integer(1), Number::Integer(0)),
                 (Number::Float(1.0), Number::Float(0.0)),
                 (Number::Rational(Rational::new(1, 2).unwrap()), zero_fraction)];

    for (a, b) in cases {
        assert!(a.floor_div(b, 3).is_err(), "{a} // {b}");
        assert!(a.modulo(b, 3).is_err(), "{a} mod {b}");
        assert!(a.remainder(b, 3).is_err(), "{a} rem {b}");
    }
}

#[test]
fn integer_overflow_is_an_error_not_a_wrap() {
    assert!(Number::Integer(i64::MAX).add(Number::Integer(1), 1).is_err());
    assert!(Number::Integer(i64::MIN).neg(1).is_err());
    assert!(Number::Integer(i64::MIN).floor_div(Number::Integer(-1), 1).is_err());
}

#[test]
fn integer_division_stays_exact_when_it_can() {
    assert_eq!(Number::Integer(6).div(Number::Integer(3), 1).unwrap(), Number::Integer(2));
    assert_eq!(Number::Integer(7).div(Number::Integer(2), 1).unwrap(), Number::Float(3.5));
}

#[test]
fn fractional_modulo_stays_exact() {
    let seven_halves = Number::Rational(Rational::new(7, 2).unwrap());
    let m = seven_halves.modulo(Number::Integer(-2), 1).unwrap();
    assert_eq!(m, Number::Rational(Rational::new(-1, 2).unwrap()));
    assert_eq!(Value::Number(m).to_string(), "-1/2");
}
