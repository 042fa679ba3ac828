use crate::error::ActionError;
use crate::func::Func;
use crate::signature::MethodSig;
use crate::value::{Type, Value};

/// A side effect registered on an expectation, run each time it is selected.
#[derive(Clone)]
pub(crate) enum Action {
    Run(Func),
    RunAndReturn(Func),
    SetArg { index: usize, value: Value },
    Return(Vec<Value>),
}

impl Action {
    /// Run against the actual arguments. `Some` replaces the results of earlier actions.
    pub fn apply(
        &self,
        sig: &MethodSig,
        args: &[Value],
    ) -> Result<Option<Vec<Value>>, ActionError> {
        match self {
            Self::Run(func) => {
                func.invoke(&sig.pack_args(args))?;
                Ok(None)
            }
            Self::RunAndReturn(func) => {
                let results = func.invoke(&sig.pack_args(args))?;
                if results.len() != sig.results().len() {
                    return Err(ActionError::ResultCount {
                        expected: sig.results().len(),
                        actual: results.len(),
                    });
                }
                Ok(Some(results))
            }
            Self::SetArg { index, value } => {
                set_arg(args, *index, value)?;
                Ok(None)
            }
            Self::Return(values) => Ok(Some(values.clone())),
        }
    }
}

fn set_arg(args: &[Value], index: usize, value: &Value) -> Result<(), ActionError> {
    let arg = args.get(index).ok_or(ActionError::ArgOutOfRange {
        index,
        len: args.len(),
    })?;

    let not_assignable = |expected: Type| ActionError::NotAssignable {
        index,
        expected,
        actual: value.clone(),
    };

    match arg {
        Value::Ptr(ptr) => {
            let pointee = value
                .assign_to(ptr.elem())
                .ok_or_else(|| not_assignable(ptr.elem().clone()))?;
            ptr.set(pointee);
        }
        Value::List(list) => {
            let items = value
                .elements()
                .and_then(|items| {
                    items
                        .iter()
                        .map(|item| item.assign_to(list.elem()))
                        .collect::<Option<Vec<_>>>()
                })
                .ok_or_else(|| not_assignable(Type::list(list.elem().clone())))?;
            list.copy_from(&items);
        }
        other => {
            return Err(ActionError::NotSettable {
                index,
                actual: other.clone(),
            })
        }
    }

    Ok(())
}
