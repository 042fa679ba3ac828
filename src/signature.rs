//! Signature descriptors for mocked interfaces.

use core::fmt;
use core::hash::{Hash, Hasher};
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use crate::func::Func;
use crate::value::{Type, Value};

/// Parameter and result shape of one method.
#[derive(Clone, PartialEq, Eq)]
pub struct MethodSig {
    params: Vec<Type>,
    results: Vec<Type>,
    variadic: bool,
}

impl MethodSig {
    pub fn new(
        params: impl IntoIterator<Item = Type>,
        results: impl IntoIterator<Item = Type>,
    ) -> Self {
        Self {
            params: params.into_iter().collect(),
            results: results.into_iter().collect(),
            variadic: false,
        }
    }

    /// A method whose last parameter is variadic. The last entry of `params` is the
    /// element type of the variadic tail.
    pub fn variadic(
        params: impl IntoIterator<Item = Type>,
        results: impl IntoIterator<Item = Type>,
    ) -> Self {
        let mut sig = Self::new(params, results);
        sig.variadic = !sig.params.is_empty();
        sig
    }

    pub fn params(&self) -> &[Type] {
        &self.params
    }

    pub fn results(&self) -> &[Type] {
        &self.results
    }

    pub fn is_variadic(&self) -> bool {
        self.variadic
    }

    /// Number of parameters before the variadic tail.
    pub(crate) fn fixed_params(&self) -> usize {
        if self.variadic {
            self.params.len() - 1
        } else {
            self.params.len()
        }
    }

    /// The declared type of argument `index` as a caller passes it, with every
    /// argument of a variadic tail having the tail's element type.
    pub(crate) fn arg_type(&self, index: usize) -> Option<&Type> {
        match self.params.get(index) {
            Some(ty) => Some(ty),
            None if self.variadic => self.params.last(),
            None => None,
        }
    }

    pub(crate) fn zero_results(&self) -> Vec<Value> {
        self.results.iter().map(Type::zero).collect()
    }

    /// Group call arguments the way an action receives them: the variadic tail
    /// becomes a single list.
    pub(crate) fn pack_args(&self, args: &[Value]) -> Vec<Value> {
        let fixed = self.fixed_params();
        if !self.variadic || args.len() < fixed {
            return args.to_vec();
        }

        let mut packed = args[..fixed].to_vec();
        packed.push(Value::List(crate::value::List::new(
            self.params[fixed].clone(),
            args[fixed..].iter().cloned(),
        )));
        packed
    }
}

impl fmt::Display for MethodSig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "fn(")?;
        for (index, param) in self.params.iter().enumerate() {
            if index > 0 {
                write!(f, ", ")?;
            }
            if self.variadic && index + 1 == self.params.len() {
                write!(f, "...")?;
            }
            write!(f, "{param}")?;
        }
        write!(f, ")")?;
        match self.results.as_slice() {
            [] => Ok(()),
            [single] => write!(f, " -> {single}"),
            results => {
                write!(f, " -> (")?;
                for (index, result) in results.iter().enumerate() {
                    if index > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{result}")?;
                }
                write!(f, ")")
            }
        }
    }
}

impl fmt::Debug for MethodSig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

/// The method set of a mocked interface.
#[derive(Clone, Debug)]
pub struct Interface {
    name: String,
    methods: BTreeMap<String, MethodSig>,
}

impl Interface {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            methods: BTreeMap::new(),
        }
    }

    pub fn method(mut self, name: impl Into<String>, sig: MethodSig) -> Self {
        self.methods.insert(name.into(), sig);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn method_sig(&self, name: &str) -> Option<&MethodSig> {
        self.methods.get(name)
    }

    pub fn methods(&self) -> impl Iterator<Item = (&str, &MethodSig)> {
        self.methods.iter().map(|(name, sig)| (name.as_str(), sig))
    }

    /// Whether every method of `other` is present here with the same signature.
    pub fn provides(&self, other: &Interface) -> bool {
        other
            .methods
            .iter()
            .all(|(name, sig)| self.methods.get(name) == Some(sig))
    }
}

/// The identity of one mock object.
///
/// Every call to [Receiver::new] creates a distinct identity; clones share it.
#[derive(Clone)]
pub struct Receiver {
    inner: Arc<ReceiverInner>,
}

struct ReceiverInner {
    interface: Arc<Interface>,
}

impl Receiver {
    pub fn new(interface: Arc<Interface>) -> Self {
        Self {
            inner: Arc::new(ReceiverInner { interface }),
        }
    }

    pub fn interface(&self) -> &Interface {
        &self.inner.interface
    }
}

impl PartialEq for Receiver {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Eq for Receiver {}

impl Hash for Receiver {
    fn hash<H: Hasher>(&self, state: &mut H) {
        core::ptr::hash(Arc::as_ptr(&self.inner), state)
    }
}

impl fmt::Display for Receiver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.inner.interface.name)
    }
}

impl fmt::Debug for Receiver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Mock{}@{:p}",
            self.inner.interface.name,
            Arc::as_ptr(&self.inner)
        )
    }
}

/// Named interfaces known to the `implements` matcher.
///
/// The registry is owned by the caller and passed explicitly to the matcher constructor.
#[derive(Default)]
pub struct TypeRegistry {
    interfaces: HashMap<String, Arc<Interface>>,
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, interface: Arc<Interface>) -> &mut Self {
        self.interfaces
            .insert(interface.name().to_string(), interface);
        self
    }

    pub fn get(&self, name: &str) -> Option<Arc<Interface>> {
        self.interfaces.get(name).cloned()
    }
}

/// Why an action closure cannot stand in for a method.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SigError {
    Arity { expected: usize, actual: usize },
    Input { index: usize, expected: Type, actual: Type },
    VariadicInput { index: usize, expected: Type, actual: Type },
    ResultArity { expected: usize, actual: usize },
    Output { index: usize, expected: Type, actual: Type },
}

impl fmt::Display for SigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Arity { expected, actual } => write!(
                f,
                "expected function to have {expected} arguments not {actual}"
            ),
            Self::Input {
                index,
                expected,
                actual,
            } => write!(
                f,
                "input argument at {index}: expected {expected}, found {actual}"
            ),
            Self::VariadicInput {
                index,
                expected,
                actual,
            } => write!(
                f,
                "expected function to have arg of type {expected} at position {index} not type {actual}"
            ),
            Self::ResultArity { expected, actual } => write!(
                f,
                "expected function to have {expected} return vals not {actual}"
            ),
            Self::Output {
                index,
                expected,
                actual,
            } => write!(
                f,
                "return argument at {index}: expected {expected}, found {actual}"
            ),
        }
    }
}

/// Check that `func` can receive the arguments of `method`.
///
/// The variadic tail of `method` is passed as one list, so the matching action
/// parameter must accept a list of the element type.
pub(crate) fn check_inputs(func: &Func, method: &MethodSig) -> Result<(), SigError> {
    let expected = method.params();
    let actual = func.params();

    if expected.len() != actual.len() {
        return Err(SigError::Arity {
            expected: expected.len(),
            actual: actual.len(),
        });
    }

    let fixed = method.fixed_params();
    for (index, (expected, actual)) in expected.iter().zip(actual).take(fixed).enumerate() {
        if !actual.accepts(expected) {
            return Err(SigError::Input {
                index,
                expected: expected.clone(),
                actual: actual.clone(),
            });
        }
    }

    if method.is_variadic() {
        let tail = Type::list(expected[fixed].clone());
        if !actual[fixed].accepts(&tail) {
            return Err(SigError::VariadicInput {
                index: fixed,
                expected: tail,
                actual: actual[fixed].clone(),
            });
        }
    }

    Ok(())
}

/// Check that every result of `func` is assignable to the corresponding result of `method`.
pub(crate) fn check_outputs(func: &Func, method: &MethodSig) -> Result<(), SigError> {
    let expected = method.results();
    let actual = func.results();

    if expected.len() != actual.len() {
        return Err(SigError::ResultArity {
            expected: expected.len(),
            actual: actual.len(),
        });
    }

    for (index, (expected, actual)) in expected.iter().zip(actual).enumerate() {
        if !actual.assignable_to(expected) {
            return Err(SigError::Output {
                index,
                expected: expected.clone(),
                actual: actual.clone(),
            });
        }
    }

    Ok(())
}
