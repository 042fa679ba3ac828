use core::fmt;
use std::sync::Arc;

use crate::error::ActionError;
use crate::value::{FromValue, Type, Typed, Value};

type DynFn = dyn Fn(&[Value]) -> Result<Vec<Value>, ActionError> + Send + Sync;

/// A type-erased callable that knows its own parameter and result types.
///
/// Usually created from a closure with [Func::new]:
///
/// ```rust
/// use mockctrl::Func;
///
/// let double = Func::new(|x: i64| (x * 2,));
/// assert_eq!("fn(i64) -> (i64)", format!("{double:?}"));
/// ```
#[derive(Clone)]
pub struct Func {
    params: Arc<[Type]>,
    results: Arc<[Type]>,
    f: Arc<DynFn>,
}

impl Func {
    pub fn new<M>(f: impl IntoFunc<M>) -> Self {
        f.into_func()
    }

    /// A function over raw values, with explicitly declared types.
    pub fn dynamic(
        params: impl IntoIterator<Item = Type>,
        results: impl IntoIterator<Item = Type>,
        f: impl Fn(&[Value]) -> Vec<Value> + Send + Sync + 'static,
    ) -> Self {
        Self {
            params: params.into_iter().collect(),
            results: results.into_iter().collect(),
            f: Arc::new(move |args: &[Value]| Ok(f(args))),
        }
    }

    pub fn params(&self) -> &[Type] {
        &self.params
    }

    pub fn results(&self) -> &[Type] {
        &self.results
    }

    pub(crate) fn invoke(&self, args: &[Value]) -> Result<Vec<Value>, ActionError> {
        (self.f)(args)
    }
}

impl fmt::Debug for Func {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "fn(")?;
        for (index, param) in self.params.iter().enumerate() {
            if index > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{param}")?;
        }
        write!(f, ") -> (")?;
        for (index, result) in self.results.iter().enumerate() {
            if index > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{result}")?;
        }
        write!(f, ")")
    }
}

/// Conversion of closures into [Func].
///
/// `M` is a marker that keeps the closure impls of different arities apart.
pub trait IntoFunc<M> {
    fn into_func(self) -> Func;
}

impl IntoFunc<Func> for Func {
    fn into_func(self) -> Func {
        self
    }
}

/// Result lists produced by action closures: `()` or a tuple.
pub trait Results {
    fn types() -> Vec<Type>;

    fn into_values(self) -> Vec<Value>;
}

impl Results for () {
    fn types() -> Vec<Type> {
        vec![]
    }

    fn into_values(self) -> Vec<Value> {
        vec![]
    }
}

macro_rules! tuple_results {
    ($($name:ident),+) => {
        impl<$($name),+> Results for ($($name,)+)
        where
            $($name: Into<Value> + Typed,)+
        {
            fn types() -> Vec<Type> {
                vec![$(<$name>::ty()),+]
            }

            #[allow(non_snake_case)]
            fn into_values(self) -> Vec<Value> {
                let ($($name,)+) = self;
                vec![$($name.into()),+]
            }
        }
    };
}

tuple_results!(R1);
tuple_results!(R1, R2);
tuple_results!(R1, R2, R3);
tuple_results!(R1, R2, R3, R4);

fn convert<T: FromValue + Typed>(args: &[Value], index: usize) -> Result<T, ActionError> {
    let value = args
        .get(index)
        .ok_or(ActionError::MissingArgument { index })?;

    T::from_value(value).ok_or_else(|| ActionError::Conversion {
        index,
        expected: T::ty(),
        actual: value.clone(),
    })
}

macro_rules! closure_func {
    ($($arg:ident),*) => {
        impl<Fun, Ret, $($arg,)*> IntoFunc<fn($($arg,)*) -> Ret> for Fun
        where
            Fun: Fn($($arg,)*) -> Ret + Send + Sync + 'static,
            Ret: Results + 'static,
            $($arg: FromValue + Typed + 'static,)*
        {
            #[allow(non_snake_case, unused_mut, unused_variables, unused_assignments)]
            fn into_func(self) -> Func {
                let params: Vec<Type> = vec![$(<$arg>::ty(),)*];
                Func {
                    params: params.into(),
                    results: Ret::types().into(),
                    f: Arc::new(move |args: &[Value]| {
                        let mut index = 0;
                        $(
                            let $arg = convert::<$arg>(args, index)?;
                            index += 1;
                        )*
                        Ok((self)($($arg,)*).into_values())
                    }),
                }
            }
        }
    };
}

closure_func!();
closure_func!(A1);
closure_func!(A1, A2);
closure_func!(A1, A2, A3);
closure_func!(A1, A2, A3, A4);
closure_func!(A1, A2, A3, A4, A5);
closure_func!(A1, A2, A3, A4, A5, A6);
