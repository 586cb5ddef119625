use std::{collections::HashMap, fmt, rc::Rc};

use crate::{
    error::RuntimeError,
    interpreter::{
        evaluator::core::EvalResult,
        value::{core::Value, number::Number},
    },
};

/// Value-shaped builtins that need more than `f64 -> f64`.
pub mod builtin;

/// Type alias for builtin function handlers that work on runtime values.
///
/// A builtin receives a slice of evaluated argument values and the line number.
pub type BuiltinFn = fn(&[Value], usize) -> EvalResult<Value>;

/// A host function over plain floats.
pub type NumericFn = Rc<dyn Fn(&[f64]) -> f64>;

/// Specifies the allowed number of arguments of a function.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    /// Exactly this many arguments.
    Exact(usize),
    /// This many arguments or more.
    AtLeast(usize),
}

impl Arity {
    /// Tests whether the given argument count satisfies this arity.
    #[must_use]
    pub const fn accepts(self, count: usize) -> bool {
        match self {
            Self::Exact(n) => count == n,
            Self::AtLeast(n) => count >= n,
        }
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exact(0) => write!(f, "no arguments"),
            Self::Exact(1) => write!(f, "1 argument"),
            Self::Exact(n) => write!(f, "{n} arguments"),
            Self::AtLeast(1) => write!(f, "at least 1 argument"),
            Self::AtLeast(n) => write!(f, "at least {n} arguments"),
        }
    }
}

/// How a native function takes its arguments.
#[derive(Clone)]
pub enum NativeBody {
    /// Every argument must be a real number.
    Scalar(NumericFn),
    /// Arguments are numbers or vectors of numbers, flattened into one list.
    Array(NumericFn),
    /// Arguments are passed through as runtime values.
    Value(BuiltinFn),
}

/// A function provided by the host rather than declared in source.
#[derive(Clone)]
pub struct NativeFunction {
    /// The name it is bound to.
    pub name:  String,
    /// The accepted argument counts.
    pub arity: Arity,
    /// The implementation.
    pub body:  NativeBody,
}

impl fmt::Debug for NativeFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NativeFunction")
         .field("name", &self.name)
         .field("arity", &self.arity)
         .finish_non_exhaustive()
    }
}

impl NativeFunction {
    /// A native taking real numbers.
    ///
    /// # Example
    /// ```
    /// use algom::interpreter::{
    ///     library::{Arity, NativeFunction},
    ///     value::core::Value,
    /// };
    ///
    /// let double = NativeFunction::scalar("double", Arity::Exact(1), |x| x[0] * 2.0);
    /// assert_eq!(double.invoke(&[Value::from(1.5)], 1).unwrap(), Value::from(3));
    /// ```
    pub fn scalar(name: impl Into<String>,
                  arity: Arity,
                  body: impl Fn(&[f64]) -> f64 + 'static)
                  -> Self {
        Self { name: name.into(),
               arity,
               body: NativeBody::Scalar(Rc::new(body)) }
    }

    /// A native taking a flattened list of numbers.
    pub fn array(name: impl Into<String>,
                 arity: Arity,
                 body: impl Fn(&[f64]) -> f64 + 'static)
                 -> Self {
        Self { name: name.into(),
               arity,
               body: NativeBody::Array(Rc::new(body)) }
    }

    /// Checks the arity, adapts the arguments to the declared shape and runs
    /// the function.
    ///
    /// Numeric results that are exact integers come back as
    /// [`Number::Integer`].
    ///
    /// # Errors
    /// `ArgumentCount` on an arity mismatch, `TypeError` when an argument does
    /// not fit the shape.
    pub fn invoke(&self, args: &[Value], line: usize) -> EvalResult<Value> {
        if !self.arity.accepts(args.len()) {
            return Err(RuntimeError::ArgumentCount { name: self.name.clone(),
                                                     expected: self.arity,
                                                     actual: args.len(),
                                                     line });
        }

        match &self.body {
            NativeBody::Scalar(body) => {
                let numbers = args.iter()
                                  .map(|arg| arg.as_f64(line))
                                  .collect::<EvalResult<Vec<_>>>()?;
                Ok(Value::Number(Number::from_native(body(&numbers))))
            },
            NativeBody::Array(body) => {
                let numbers = flatten(args, line)?;
                Ok(Value::Number(Number::from_native(body(&numbers))))
            },
            NativeBody::Value(body) => body(args, line),
        }
    }
}

/// Flattens numbers and vectors of numbers into one list.
fn flatten(args: &[Value], line: usize) -> EvalResult<Vec<f64>> {
    let mut numbers = Vec::with_capacity(args.len());
    for arg in args {
        match arg {
            Value::Vector(items) | Value::Tuple(items) => {
                for item in items.iter() {
                    numbers.push(item.as_f64(line)?);
                }
            },
            Value::Matrix(rows) => {
                for item in rows.iter().flatten() {
                    numbers.push(item.as_f64(line)?);
                }
            },
            other => numbers.push(other.as_f64(line)?),
        }
    }
    Ok(numbers)
}

/// Defines builtin functions by generating a lookup table.
///
/// Each entry provides a name, an arity and the function implementing it.
macro_rules! builtin_functions {
    (
        $(
            $name:literal => {
                arity: $arity:expr,
                func: $func:expr $(,)?
            }
        ),* $(,)?
    ) => {
        static BUILTIN_TABLE: &[(&str, Arity, BuiltinFn)] = &[
            $(
                ($name, $arity, $func),
            )*
        ];
    };
}

builtin_functions! {
    "abs"   => { arity: Arity::Exact(1), func: builtin::abs },
    "sqrt"  => { arity: Arity::Exact(1), func: builtin::sqrt },
    "sin"   => { arity: Arity::Exact(1), func: builtin::sin },
    "cos"   => { arity: Arity::Exact(1), func: builtin::cos },
    "tan"   => { arity: Arity::Exact(1), func: builtin::tan },
    "sinh"  => { arity: Arity::Exact(1), func: builtin::sinh },
    "cosh"  => { arity: Arity::Exact(1), func: builtin::cosh },
    "tanh"  => { arity: Arity::Exact(1), func: builtin::tanh },
    "exp"   => { arity: Arity::Exact(1), func: builtin::exp },
    "ln"    => { arity: Arity::Exact(1), func: builtin::ln },
    "gcd"   => { arity: Arity::Exact(2), func: builtin::gcd },
    "even"  => { arity: Arity::Exact(1), func: builtin::even },
    "odd"   => { arity: Arity::Exact(1), func: builtin::odd },
    "range" => { arity: Arity::Exact(3), func: builtin::range },
}

/// Natives over real numbers, one `f64` per argument.
static SCALAR_TABLE: &[(&str, Arity, fn(&[f64]) -> f64)] = &[
    ("acos", Arity::Exact(1), |x| x[0].acos()),
    ("acosh", Arity::Exact(1), |x| x[0].acosh()),
    ("asin", Arity::Exact(1), |x| x[0].asin()),
    ("asinh", Arity::Exact(1), |x| x[0].asinh()),
    ("atan", Arity::Exact(1), |x| x[0].atan()),
    ("atanh", Arity::Exact(1), |x| x[0].atanh()),
    ("atan2", Arity::Exact(2), |x| x[0].atan2(x[1])),
    ("cbrt", Arity::Exact(1), |x| x[0].cbrt()),
    ("ceil", Arity::Exact(1), |x| x[0].ceil()),
    ("expm1", Arity::Exact(1), |x| x[0].exp_m1()),
    ("floor", Arity::Exact(1), |x| x[0].floor()),
    ("hypot", Arity::AtLeast(1), |x| x.iter().fold(0.0, |acc: f64, v| acc.hypot(*v))),
    ("log", Arity::Exact(1), |x| x[0].ln()),
    ("log1p", Arity::Exact(1), |x| x[0].ln_1p()),
    ("log10", Arity::Exact(1), |x| x[0].log10()),
    ("log2", Arity::Exact(1), |x| x[0].log2()),
    ("lg", Arity::Exact(1), |x| x[0].log10()),
    ("max", Arity::AtLeast(1), |x| x.iter().copied().fold(f64::NEG_INFINITY, f64::max)),
    ("min", Arity::AtLeast(1), |x| x.iter().copied().fold(f64::INFINITY, f64::min)),
    ("pow", Arity::Exact(2), |x| x[0].powf(x[1])),
    ("round", Arity::Exact(1), |x| x[0].round()),
    ("sign", Arity::Exact(1), |x| if x[0] == 0.0 || x[0].is_nan() { x[0] } else { x[0].signum() }),
    ("trunc", Arity::Exact(1), |x| x[0].trunc()),
];

/// Natives over a flattened list of numbers.
#[allow(clippy::cast_precision_loss)]
static ARRAY_TABLE: &[(&str, Arity, fn(&[f64]) -> f64)] = &[
    ("sum", Arity::AtLeast(1), |x| x.iter().sum()),
    ("avg", Arity::AtLeast(1), |x| x.iter().sum::<f64>() / x.len() as f64),
];

/// Named mathematical constants, consulted when a name is not bound.
pub const CONSTANTS: &[(&str, f64)] = &[
    ("e", std::f64::consts::E),
    ("pi", std::f64::consts::PI),
    ("LN2", std::f64::consts::LN_2),
    ("LN10", std::f64::consts::LN_10),
    ("LOG2E", std::f64::consts::LOG2_E),
    ("LOG10E", std::f64::consts::LOG10_E),
    ("SQRT1_2", std::f64::consts::FRAC_1_SQRT_2),
    ("SQRT2", std::f64::consts::SQRT_2),
];

/// The constants and native functions of one engine instance.
///
/// Natives are installed into the global scope and can be shadowed there;
/// constants are only looked up once a name is bound nowhere.
#[derive(Debug, Clone, Default)]
pub struct Library {
    constants: HashMap<String, Value>,
    natives:   Vec<Rc<NativeFunction>>,
}

impl Library {
    /// The standard library: every builtin, scalar and array native plus the
    /// named constants.
    ///
    /// # Example
    /// ```
    /// use algom::interpreter::library::Library;
    ///
    /// let library = Library::standard();
    /// assert!(library.function_names().any(|name| name == "sin"));
    /// assert!(library.constant("pi").is_some());
    /// ```
    #[must_use]
    pub fn standard() -> Self {
        let mut library = Self::default();

        for &(name, arity, func) in BUILTIN_TABLE {
            library.register_native(NativeFunction { name: name.to_string(),
                                                     arity,
                                                     body: NativeBody::Value(func) });
        }
        for &(name, arity, func) in SCALAR_TABLE {
            library.register_native(NativeFunction::scalar(name, arity, func));
        }
        for &(name, arity, func) in ARRAY_TABLE {
            library.register_native(NativeFunction::array(name, arity, func));
        }
        for &(name, value) in CONSTANTS {
            library.register_constant(name, Value::from(value));
        }

        library
    }

    /// Adds or replaces a named constant.
    pub fn register_constant(&mut self, name: impl Into<String>, value: Value) {
        self.constants.insert(name.into(), value);
    }

    /// Adds a native, replacing any native of the same name.
    pub fn register_native(&mut self, native: NativeFunction) -> Rc<NativeFunction> {
        let native = Rc::new(native);
        self.natives.retain(|existing| existing.name != native.name);
        self.natives.push(Rc::clone(&native));
        native
    }

    /// Looks a constant up by name.
    #[must_use]
    pub fn constant(&self, name: &str) -> Option<Value> {
        self.constants.get(name).cloned()
    }

    /// Names of every native, for the parser's call detection.
    pub fn function_names(&self) -> impl Iterator<Item = String> + '_ {
        self.natives.iter().map(|native| native.name.clone())
    }

    /// Name and value of every native, for installing into a scope.
    pub fn bindings(&self) -> impl Iterator<Item = (String, Value)> + '_ {
        self.natives
            .iter()
            .map(|native| (native.name.clone(), Value::Native(Rc::clone(native))))
    }
}
