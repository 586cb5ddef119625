use std::rc::Rc;

use tracing::debug;

use crate::{
    ast::{Node, Program},
    error::Error,
    interpreter::{
        environment::Environment,
        evaluator::core::Context,
        lexer::tokenize,
        library::{Library, NativeFunction},
        parser::core::parse_tokens,
        resolver::{resolve, resolve_function},
        value::{core::Value, function::Closure},
    },
};

/// Line reported by errors raised from host calls rather than source.
const HOST_LINE: usize = 1;

/// Limits applied while evaluating.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    /// Deepest nesting of interpreted function calls before evaluation fails
    /// with a recursion error.
    pub max_call_depth: usize,
    /// Number of nodes one evaluation may visit, unbounded when `None`.
    pub max_steps:      Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self { max_call_depth: 512,
               max_steps:      None, }
    }
}

/// One interpreter instance.
///
/// An engine owns its native library, its limits and a global scope holding
/// the natives. Programs evaluate in a fresh child of that scope unless the
/// host supplies an environment of its own, so separate engines never see
/// each other's bindings.
///
/// # Example
/// ```
/// use algom::{Engine, Value};
///
/// let engine = Engine::new();
/// assert_eq!(engine.run("let x = 5; x = x + 2; x;").unwrap(), Value::from(7));
/// ```
#[derive(Debug, Clone)]
pub struct Engine {
    library: Rc<Library>,
    config:  EngineConfig,
    global:  Environment,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine {
    /// Creates an engine with the standard library and default limits.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    /// Creates an engine with the standard library and the given limits.
    #[must_use]
    pub fn with_config(config: EngineConfig) -> Self {
        let library = Library::standard();
        let global = Environment::new();
        global.record(library.bindings());
        Self { library: Rc::new(library),
               config,
               global }
    }

    /// The limits in effect.
    #[must_use]
    pub const fn config(&self) -> EngineConfig {
        self.config
    }

    /// The scope natives live in; parent of every fresh program scope.
    #[must_use]
    pub const fn global(&self) -> &Environment {
        &self.global
    }

    /// Adds or replaces a named constant.
    ///
    /// Constants are consulted only when no scope binds the name, so a
    /// program may shadow them with `let`.
    ///
    /// # Example
    /// ```
    /// use algom::{Engine, Value};
    ///
    /// let mut engine = Engine::new();
    /// engine.register_constant("g", Value::from(9.81));
    /// assert_eq!(engine.run("2g;").unwrap(), Value::from(19.62));
    /// ```
    pub fn register_constant(&mut self, name: impl Into<String>, value: Value) {
        Rc::make_mut(&mut self.library).register_constant(name, value);
    }

    /// Adds a native function, replacing any native of the same name, and
    /// binds it in the global scope.
    ///
    /// # Example
    /// ```
    /// use algom::{
    ///     interpreter::library::{Arity, NativeFunction},
    ///     Engine, Value,
    /// };
    ///
    /// let mut engine = Engine::new();
    /// engine.register_native(NativeFunction::scalar("twice", Arity::Exact(1), |x| 2.0 * x[0]));
    /// assert_eq!(engine.run("twice(21);").unwrap(), Value::from(42));
    /// ```
    pub fn register_native(&mut self, native: NativeFunction) {
        let native = Rc::make_mut(&mut self.library).register_native(native);
        debug!(name = %native.name, arity = %native.arity, "registered native");
        self.global
            .record([(native.name.clone(), Value::Native(native))]);
    }

    /// Parses `source`, treating every native as a known function name.
    ///
    /// Never fails: a syntax error yields a program whose only statement is
    /// the error.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn parse(&self, source: &str) -> Program {
        parse_tokens(tokenize(source), self.library.function_names())
    }

    /// Evaluates a program in a fresh child of the global scope.
    ///
    /// # Errors
    /// The program's parse error, a resolution error, or the first runtime
    /// error raised.
    pub fn evaluate(&self, program: &Program) -> Result<Value, Error> {
        self.evaluate_in(program, &self.global.child())
    }

    /// Evaluates a program in `environment`.
    ///
    /// Bindings the program declares at top level stay in `environment`, so a
    /// host can run several programs against one scope.
    ///
    /// # Errors
    /// The program's parse error, a resolution error, or the first runtime
    /// error raised.
    ///
    /// # Example
    /// ```
    /// use algom::{Engine, Value};
    ///
    /// let engine = Engine::new();
    /// let scope = engine.global().child();
    /// engine.evaluate_in(&engine.parse("let r = 2;"), &scope).unwrap();
    /// let area = engine.evaluate_in(&engine.parse("pi * r^2;"), &scope).unwrap();
    /// assert_eq!(area, Value::from(4.0 * std::f64::consts::PI));
    /// ```
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn evaluate_in(&self, program: &Program, environment: &Environment) -> Result<Value, Error> {
        if let Some(error) = program.error() {
            return Err(error.clone().into());
        }

        let resolution = resolve(program.statements())?;
        let mut context = Context::new(environment.clone(),
                                       Rc::new(resolution),
                                       Rc::clone(&self.library),
                                       self.config);
        let value = context.run(program.statements())?;
        debug!(%value, "evaluated program");
        Ok(value)
    }

    /// Parses and evaluates `source`.
    ///
    /// # Errors
    /// See [`Engine::evaluate`].
    pub fn run(&self, source: &str) -> Result<Value, Error> {
        self.evaluate(&self.parse(source))
    }

    /// Calls a function value with host-supplied arguments.
    ///
    /// # Errors
    /// `NotCallable` when `function` is not a function, and whatever the call
    /// raises.
    ///
    /// # Example
    /// ```
    /// use algom::{Engine, Value};
    ///
    /// let engine = Engine::new();
    /// let add = engine.run("let add(a, b) = a + b;").unwrap();
    /// assert_eq!(engine.call(&add, &[Value::from(1), Value::from(2)]).unwrap(), Value::from(3));
    /// ```
    pub fn call(&self, function: &Value, args: &[Value]) -> Result<Value, Error> {
        let mut context = Context::new(self.global.clone(),
                                       Rc::default(),
                                       Rc::clone(&self.library),
                                       self.config);
        Ok(context.call_value(function, args, HOST_LINE)?)
    }

    /// Compiles `source` into a function of `params`.
    ///
    /// The statements of `source` become the body of an anonymous function
    /// declared in a fresh child of the global scope; the value of the last
    /// statement is the result.
    ///
    /// # Errors
    /// The parse error of `source`, or a resolution error in the body.
    ///
    /// # Example
    /// ```
    /// let f = algom::Engine::new().compile_to_callable("x^2 + 1", &["x"]).unwrap();
    /// assert_eq!(f.arity(), 1);
    /// assert_eq!(f.call_f64(&[3.0]).unwrap(), 10.0);
    /// ```
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn compile_to_callable(&self, source: &str, params: &[&str]) -> Result<Callable, Error> {
        let program = self.parse(source);
        if let Some(error) = program.error() {
            return Err(error.clone().into());
        }

        let params: Vec<String> = params.iter().map(ToString::to_string).collect();
        let body = Node::Block { statements: program.statements().to_vec(),
                                 line:       program.root().line(), };
        let resolution = resolve_function(&params, &body)?;

        let closure = Closure { name: "compiled".to_string(),
                                params,
                                body: Rc::new(body),
                                environment: self.global.child(),
                                resolution: Rc::new(resolution) };
        Ok(Callable { closure: Rc::new(closure),
                      library: Rc::clone(&self.library),
                      config:  self.config, })
    }
}

/// A compiled function the host can call directly.
///
/// Produced by [`Engine::compile_to_callable`]. Each call runs in its own
/// scope over the captured one, so calls do not interfere unless the body
/// assigns to a global.
#[derive(Debug, Clone)]
pub struct Callable {
    closure: Rc<Closure>,
    library: Rc<Library>,
    config:  EngineConfig,
}

impl Callable {
    /// The number of parameters.
    #[must_use]
    pub fn arity(&self) -> usize {
        self.closure.arity()
    }

    /// The compiled function as a runtime value, for passing back into
    /// programs.
    #[must_use]
    pub fn to_value(&self) -> Value {
        Value::Function(Rc::clone(&self.closure))
    }

    /// Calls the function.
    ///
    /// # Errors
    /// `ArgumentCount` when `args` does not match the arity, and whatever the
    /// body raises.
    pub fn call(&self, args: &[Value]) -> Result<Value, Error> {
        let mut context = Context::new(self.closure.environment.clone(),
                                       Rc::clone(&self.closure.resolution),
                                       Rc::clone(&self.library),
                                       self.config);
        Ok(context.call_closure(&self.closure, args, HOST_LINE)?)
    }

    /// Calls the function on floats and reads the result back as a float.
    ///
    /// # Errors
    /// As [`Callable::call`], plus a type error when the result is not a real
    /// number.
    pub fn call_f64(&self, args: &[f64]) -> Result<f64, Error> {
        let args: Vec<Value> = args.iter().map(|&x| Value::from(x)).collect();
        Ok(self.call(&args)?.as_f64(HOST_LINE)?)
    }
}
