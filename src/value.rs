//! Dynamic values and the type descriptors that describe them.
//!
//! Mocked methods have arbitrary Rust signatures, but the engine only ever sees one
//! shape: a slice of [Value]s going in and a `Vec<Value>` coming out. Generated shims
//! convert between the two, and [Type] descriptors carry the parameter and result
//! shapes that the engine needs for zero values and signature checks.

use core::fmt;
use std::any::Any;
use std::cell::RefCell;
use std::sync::Arc;

use crate::func::Func;
use crate::signature::Receiver;
use crate::util::Guarded;

/// Describes the shape of a [Value].
#[derive(Clone, PartialEq, Eq)]
pub enum Type {
    /// Generic placeholder. Any value is assignable to it.
    Any,
    Bool,
    Int,
    Uint,
    Float,
    Str,
    /// A growable, shared sequence.
    List(Box<Type>),
    /// A fixed-length sequence stored by value.
    Array(usize, Box<Type>),
    Map(Box<Type>, Box<Type>),
    /// A shared, mutable cell.
    Ptr(Box<Type>),
    Fn,
    /// An opaque shared object, named by the shim that produced it.
    Handle(Arc<str>),
    Struct(Arc<StructType>),
    /// A mocked interface, by name.
    Interface(Arc<str>),
}

impl Type {
    pub fn list(elem: Type) -> Self {
        Self::List(Box::new(elem))
    }

    pub fn array(len: usize, elem: Type) -> Self {
        Self::Array(len, Box::new(elem))
    }

    pub fn map(key: Type, value: Type) -> Self {
        Self::Map(Box::new(key), Box::new(value))
    }

    pub fn ptr(elem: Type) -> Self {
        Self::Ptr(Box::new(elem))
    }

    pub fn handle(name: impl Into<Arc<str>>) -> Self {
        Self::Handle(name.into())
    }

    pub fn interface(name: impl Into<Arc<str>>) -> Self {
        Self::Interface(name.into())
    }

    /// Whether the zero value of this type is nil.
    pub fn is_nilable(&self) -> bool {
        matches!(
            self,
            Self::Any
                | Self::Interface(_)
                | Self::List(_)
                | Self::Map(..)
                | Self::Ptr(_)
                | Self::Fn
                | Self::Handle(_)
        )
    }

    /// The value a method of this result type returns when nothing else was declared.
    pub fn zero(&self) -> Value {
        match self {
            Self::Any | Self::Interface(_) => Value::Nil,
            Self::Bool => Value::Bool(false),
            Self::Int => Value::Int(0),
            Self::Uint => Value::Uint(0),
            Self::Float => Value::Float(0.0),
            Self::Str => Value::Str(String::new()),
            Self::Array(len, elem) => Value::Array(Array::new(
                (**elem).clone(),
                (0..*len).map(|_| elem.zero()),
            )),
            Self::Struct(ty) => Value::Struct(Struct::zero(ty)),
            Self::List(_) | Self::Map(..) | Self::Ptr(_) | Self::Fn | Self::Handle(_) => {
                Value::Null(self.clone())
            }
        }
    }

    /// Assignability of a value of type `self` into a slot of type `target`.
    pub fn assignable_to(&self, target: &Type) -> bool {
        *target == Type::Any || self == target
    }

    /// Whether a slot of type `self` accepts values of type `actual`.
    ///
    /// Unlike [Type::assignable_to], `Any` is honoured at every nesting depth on the
    /// accepting side, so `List(Any)` accepts `List(Int)`.
    pub fn accepts(&self, actual: &Type) -> bool {
        match (self, actual) {
            (Self::Any, _) => true,
            (Self::List(a), Self::List(b)) | (Self::Ptr(a), Self::Ptr(b)) => a.accepts(b),
            (Self::Array(n, a), Self::Array(m, b)) => n == m && a.accepts(b),
            (Self::Map(k1, v1), Self::Map(k2, v2)) => k1.accepts(k2) && v1.accepts(v2),
            _ => self == actual,
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Any => write!(f, "any"),
            Self::Bool => write!(f, "bool"),
            Self::Int => write!(f, "i64"),
            Self::Uint => write!(f, "u64"),
            Self::Float => write!(f, "f64"),
            Self::Str => write!(f, "String"),
            Self::List(elem) => write!(f, "Vec<{elem}>"),
            Self::Array(len, elem) => write!(f, "[{elem}; {len}]"),
            Self::Map(key, value) => write!(f, "Map<{key}, {value}>"),
            Self::Ptr(elem) => write!(f, "Ptr<{elem}>"),
            Self::Fn => write!(f, "fn"),
            Self::Handle(name) => write!(f, "{name}"),
            Self::Struct(ty) => write!(f, "{}", ty.name),
            Self::Interface(name) => write!(f, "dyn {name}"),
        }
    }
}

impl fmt::Debug for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

/// Declared layout of a struct value.
#[derive(Debug, PartialEq, Eq)]
pub struct StructType {
    name: String,
    fields: Vec<(String, Type)>,
}

impl StructType {
    pub fn new<N: Into<String>>(
        name: impl Into<String>,
        fields: impl IntoIterator<Item = (N, Type)>,
    ) -> Arc<Self> {
        Arc::new(Self {
            name: name.into(),
            fields: fields
                .into_iter()
                .map(|(name, ty)| (name.into(), ty))
                .collect(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &Type)> {
        self.fields.iter().map(|(name, ty)| (name.as_str(), ty))
    }
}

/// A dynamically typed argument or result.
#[derive(Clone)]
pub enum Value {
    /// The untyped absence of a value.
    Nil,
    /// The nil value of a reference type.
    Null(Type),
    Bool(bool),
    Int(i64),
    Uint(u64),
    Float(f64),
    Str(String),
    List(List),
    Array(Array),
    Map(Map),
    Struct(Struct),
    Ptr(Ptr),
    Fn(Func),
    Handle(Handle),
    /// A mock object passed as an argument.
    Mock(Receiver),
}

impl Value {
    /// The dynamic type of this value.
    pub fn ty(&self) -> Type {
        match self {
            Self::Nil => Type::Any,
            Self::Null(ty) => ty.clone(),
            Self::Bool(_) => Type::Bool,
            Self::Int(_) => Type::Int,
            Self::Uint(_) => Type::Uint,
            Self::Float(_) => Type::Float,
            Self::Str(_) => Type::Str,
            Self::List(list) => Type::list(list.elem.clone()),
            Self::Array(array) => Type::array(array.items.len(), array.elem.clone()),
            Self::Map(map) => Type::map(map.key.clone(), map.value.clone()),
            Self::Struct(value) => Type::Struct(value.ty.clone()),
            Self::Ptr(ptr) => Type::ptr(ptr.elem.clone()),
            Self::Fn(_) => Type::Fn,
            Self::Handle(handle) => Type::Handle(handle.name.clone()),
            Self::Mock(receiver) => Type::interface(receiver.interface().name()),
        }
    }

    /// Whether this is nil, either untyped or the nil of a reference type.
    pub fn is_nil(&self) -> bool {
        matches!(self, Self::Nil | Self::Null(_))
    }

    /// Convert into a Rust value.
    pub fn cast<T: FromValue>(&self) -> Option<T> {
        T::from_value(self)
    }

    /// Length of strings (in bytes), sequences and maps. A nil list or map has length 0.
    pub fn len(&self) -> Option<usize> {
        match self {
            Self::Str(s) => Some(s.len()),
            Self::List(list) => Some(list.len()),
            Self::Array(array) => Some(array.items.len()),
            Self::Map(map) => Some(map.len()),
            Self::Null(Type::List(_) | Type::Map(..)) => Some(0),
            _ => None,
        }
    }

    /// This value as stored into a slot of type `ty`: nil becomes the typed nil of a
    /// nilable `ty`, and anything else must be assignable.
    pub(crate) fn assign_to(&self, ty: &Type) -> Option<Value> {
        if self.is_nil() && ty.is_nilable() {
            Some(ty.zero())
        } else if self.ty().assignable_to(ty) {
            Some(self.clone())
        } else {
            None
        }
    }

    /// A snapshot of the elements of a sequence-like value.
    ///
    /// Strings are not sequences.
    pub fn elements(&self) -> Option<Vec<Value>> {
        match self {
            Self::List(list) => Some(list.to_vec()),
            Self::Array(array) => Some(array.items.clone()),
            Self::Null(Type::List(_)) => Some(vec![]),
            _ => None,
        }
    }

    /// Deep structural equality.
    ///
    /// Both values must have the same dynamic type. Composite values compare their
    /// contents, pointers compare their pointees, functions are only equal when both
    /// are nil, and handles and mocks compare by identity.
    ///
    /// Pointers and lists already under comparison are treated as equal when met again,
    /// so self-referencing values terminate.
    pub fn deep_eq(&self, other: &Value) -> bool {
        self.deep_eq_in(other, &mut Vec::new())
    }

    fn deep_eq_in(&self, other: &Value, visited: &mut Vec<(usize, usize)>) -> bool {
        match (self, other) {
            (Self::Nil, Self::Nil) => true,
            (Self::Null(a), Self::Null(b)) => a == b,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::Uint(a), Self::Uint(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => a == b,
            (Self::Str(a), Self::Str(b)) => a == b,
            (Self::List(a), Self::List(b)) => {
                a.elem == b.elem
                    && (a.ptr_eq(b)
                        || revisit(visited, a.addr(), b.addr())
                        || seq_eq(&a.to_vec(), &b.to_vec(), visited))
            }
            (Self::Array(a), Self::Array(b)) => {
                a.elem == b.elem && seq_eq(&a.items, &b.items, visited)
            }
            (Self::Map(a), Self::Map(b)) => {
                a.key == b.key
                    && a.value == b.value
                    && a.len() == b.len()
                    && a.entries
                        .iter()
                        .all(|(key, value)| {
                            b.get(key)
                                .is_some_and(|other| value.deep_eq_in(other, visited))
                        })
            }
            (Self::Struct(a), Self::Struct(b)) => {
                a.ty == b.ty && seq_eq(&a.fields, &b.fields, visited)
            }
            (Self::Ptr(a), Self::Ptr(b)) => {
                a.elem == b.elem
                    && (a.ptr_eq(b)
                        || revisit(visited, a.addr(), b.addr())
                        || a.get().deep_eq_in(&b.get(), visited))
            }
            (Self::Handle(a), Self::Handle(b)) => a.ptr_eq(b),
            (Self::Mock(a), Self::Mock(b)) => a == b,
            _ => false,
        }
    }
}

fn seq_eq(a: &[Value], b: &[Value], visited: &mut Vec<(usize, usize)>) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(a, b)| a.deep_eq_in(b, visited))
}

/// Records the pair as under comparison. True if it already was.
fn revisit(visited: &mut Vec<(usize, usize)>, a: usize, b: usize) -> bool {
    if visited.contains(&(a, b)) {
        return true;
    }
    visited.push((a, b));
    false
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.deep_eq(other)
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let open = RefCell::new(Vec::new());
        fmt::Debug::fmt(&Nested(self, &open), f)
    }
}

/// Debug rendering that remembers the pointers and lists being printed, and prints a
/// cycle back into one of them as `...`.
struct Nested<'v>(&'v Value, &'v RefCell<Vec<usize>>);

impl<'v> Nested<'v> {
    fn child<'c>(&'c self, value: &'c Value) -> Nested<'c> {
        Nested(value, self.1)
    }

    fn enter(&self, addr: usize) -> bool {
        let mut open = self.1.borrow_mut();
        if open.contains(&addr) {
            return false;
        }
        open.push(addr);
        true
    }

    fn leave(&self) {
        self.1.borrow_mut().pop();
    }
}

impl<'v> fmt::Debug for Nested<'v> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Value::Nil | Value::Null(_) => write!(f, "nil"),
            Value::Bool(v) => write!(f, "{v}"),
            Value::Int(v) => write!(f, "{v}"),
            Value::Uint(v) => write!(f, "{v}"),
            Value::Float(v) => write!(f, "{v:?}"),
            Value::Str(v) => write!(f, "{v:?}"),
            Value::List(list) => {
                if !self.enter(list.addr()) {
                    return write!(f, "[...]");
                }
                let items = list.to_vec();
                let result = f
                    .debug_list()
                    .entries(items.iter().map(|item| self.child(item)))
                    .finish();
                self.leave();
                result
            }
            Value::Array(array) => f
                .debug_list()
                .entries(array.items.iter().map(|item| self.child(item)))
                .finish(),
            Value::Map(map) => f
                .debug_map()
                .entries(map.entries.iter().map(|(k, v)| (self.child(k), self.child(v))))
                .finish(),
            Value::Struct(value) => {
                let mut debug = f.debug_struct(&value.ty.name);
                for ((name, _), field) in value.ty.fields.iter().zip(&value.fields) {
                    debug.field(name, &self.child(field));
                }
                debug.finish()
            }
            Value::Ptr(ptr) => {
                if !self.enter(ptr.addr()) {
                    return write!(f, "&...");
                }
                let pointee = ptr.get();
                let result = write!(f, "&{:?}", self.child(&pointee));
                self.leave();
                result
            }
            Value::Fn(func) => write!(f, "{func:?}"),
            Value::Handle(handle) => write!(f, "<{}>", handle.name),
            Value::Mock(receiver) => write!(f, "{receiver:?}"),
        }
    }
}

/// A shared growable sequence. Clones refer to the same storage.
#[derive(Clone)]
pub struct List {
    elem: Type,
    items: Arc<Guarded<Vec<Value>>>,
}

impl List {
    pub fn new(elem: Type, items: impl IntoIterator<Item = Value>) -> Self {
        Self {
            elem,
            items: Arc::new(Guarded::new(items.into_iter().collect())),
        }
    }

    pub fn elem(&self) -> &Type {
        &self.elem
    }

    pub fn len(&self) -> usize {
        self.items.locked(|items| items.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, index: usize) -> Option<Value> {
        self.items.locked(|items| items.get(index).cloned())
    }

    pub fn push(&self, value: impl Into<Value>) {
        let value = value.into();
        self.items.locked(|items| items.push(value));
    }

    /// A snapshot of the current contents.
    pub fn to_vec(&self) -> Vec<Value> {
        self.items.locked(|items| items.clone())
    }

    /// Overwrite elements in place, up to the shorter of the two lengths.
    /// Returns the number of elements written.
    pub fn copy_from(&self, src: &[Value]) -> usize {
        self.items.locked(|items| {
            let count = items.len().min(src.len());
            items[..count].clone_from_slice(&src[..count]);
            count
        })
    }

    pub fn ptr_eq(&self, other: &List) -> bool {
        Arc::ptr_eq(&self.items, &other.items)
    }

    pub(crate) fn addr(&self) -> usize {
        Arc::as_ptr(&self.items) as *const () as usize
    }
}

/// A fixed-length sequence, stored by value.
#[derive(Clone)]
pub struct Array {
    elem: Type,
    items: Vec<Value>,
}

impl Array {
    pub fn new(elem: Type, items: impl IntoIterator<Item = Value>) -> Self {
        Self {
            elem,
            items: items.into_iter().collect(),
        }
    }

    pub fn items(&self) -> &[Value] {
        &self.items
    }
}

/// An association of keys to values. Keys are compared with [Value::deep_eq].
#[derive(Clone)]
pub struct Map {
    key: Type,
    value: Type,
    entries: Vec<(Value, Value)>,
}

impl Map {
    pub fn new(key: Type, value: Type) -> Self {
        Self {
            key,
            value,
            entries: vec![],
        }
    }

    /// Insert an entry, replacing the value of an existing equal key.
    pub fn insert(mut self, key: impl Into<Value>, value: impl Into<Value>) -> Self {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| k.deep_eq(&key)) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
        self
    }

    pub fn get(&self, key: &Value) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(k, _)| k.deep_eq(key))
            .map(|(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A struct value laid out according to its [StructType].
#[derive(Clone)]
pub struct Struct {
    ty: Arc<StructType>,
    fields: Vec<Value>,
}

impl Struct {
    /// Create a struct value from field values in declaration order.
    /// Missing trailing fields take their zero value.
    pub fn new(ty: &Arc<StructType>, fields: impl IntoIterator<Item = Value>) -> Self {
        let mut fields: Vec<Value> = fields.into_iter().collect();
        for (_, field_ty) in ty.fields.iter().skip(fields.len()) {
            fields.push(field_ty.zero());
        }
        Self {
            ty: ty.clone(),
            fields,
        }
    }

    fn zero(ty: &Arc<StructType>) -> Self {
        Self::new(ty, [])
    }

    pub fn field(&self, name: &str) -> Option<&Value> {
        let index = self.ty.fields.iter().position(|(n, _)| n == name)?;
        self.fields.get(index)
    }
}

/// A shared mutable cell, the target of `set_arg` actions.
#[derive(Clone)]
pub struct Ptr {
    elem: Type,
    cell: Arc<Guarded<Value>>,
}

impl Ptr {
    pub fn new(value: impl Into<Value>) -> Self {
        let value = value.into();
        Self::with_type(value.ty(), value)
    }

    pub fn with_type(elem: Type, value: impl Into<Value>) -> Self {
        Self {
            elem,
            cell: Arc::new(Guarded::new(value.into())),
        }
    }

    pub fn elem(&self) -> &Type {
        &self.elem
    }

    /// A clone of the current pointee.
    pub fn get(&self) -> Value {
        self.cell.locked(|value| value.clone())
    }

    pub fn get_as<T: FromValue>(&self) -> Option<T> {
        self.cell.locked(|value| T::from_value(value))
    }

    pub fn set(&self, value: impl Into<Value>) {
        let value = value.into();
        self.cell.locked(|current| *current = value);
    }

    pub fn ptr_eq(&self, other: &Ptr) -> bool {
        Arc::ptr_eq(&self.cell, &other.cell)
    }

    pub(crate) fn addr(&self) -> usize {
        Arc::as_ptr(&self.cell) as *const () as usize
    }
}

/// An opaque shared Rust object, such as a channel end, compared by identity.
#[derive(Clone)]
pub struct Handle {
    name: Arc<str>,
    object: Arc<dyn Any + Send + Sync>,
}

impl Handle {
    pub fn new<T: Any + Send + Sync>(name: impl Into<Arc<str>>, object: T) -> Self {
        Self {
            name: name.into(),
            object: Arc::new(object),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.object.downcast_ref()
    }

    pub fn ptr_eq(&self, other: &Handle) -> bool {
        Arc::ptr_eq(&self.object, &other.object)
    }
}

/// Rust types with a statically known [Type].
pub trait Typed {
    fn ty() -> Type;
}

/// Rust types that can be recovered from a [Value].
pub trait FromValue: Sized {
    fn from_value(value: &Value) -> Option<Self>;
}

macro_rules! int_value {
    ($($t:ty),*) => {$(
        impl From<$t> for Value {
            fn from(value: $t) -> Self {
                Value::Int(value as i64)
            }
        }

        impl Typed for $t {
            fn ty() -> Type {
                Type::Int
            }
        }

        impl FromValue for $t {
            fn from_value(value: &Value) -> Option<Self> {
                match value {
                    Value::Int(v) => <$t>::try_from(*v).ok(),
                    _ => None,
                }
            }
        }
    )*};
}

macro_rules! uint_value {
    ($($t:ty),*) => {$(
        impl From<$t> for Value {
            fn from(value: $t) -> Self {
                Value::Uint(value as u64)
            }
        }

        impl Typed for $t {
            fn ty() -> Type {
                Type::Uint
            }
        }

        impl FromValue for $t {
            fn from_value(value: &Value) -> Option<Self> {
                match value {
                    Value::Uint(v) => <$t>::try_from(*v).ok(),
                    _ => None,
                }
            }
        }
    )*};
}

int_value!(i8, i16, i32, i64, isize);
uint_value!(u8, u16, u32, u64, usize);

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Value::Float(f64::from(value))
    }
}

impl Typed for f64 {
    fn ty() -> Type {
        Type::Float
    }
}

impl Typed for f32 {
    fn ty() -> Type {
        Type::Float
    }
}

impl FromValue for f64 {
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Float(v) => Some(*v),
            _ => None,
        }
    }
}

impl FromValue for f32 {
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Float(v) => Some(*v as f32),
            _ => None,
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl Typed for bool {
    fn ty() -> Type {
        Type::Bool
    }
}

impl FromValue for bool {
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Bool(v) => Some(*v),
            _ => None,
        }
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Str(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Str(value.to_string())
    }
}

impl Typed for String {
    fn ty() -> Type {
        Type::Str
    }
}

impl Typed for &str {
    fn ty() -> Type {
        Type::Str
    }
}

impl FromValue for String {
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Str(v) => Some(v.clone()),
            _ => None,
        }
    }
}

impl Typed for Value {
    fn ty() -> Type {
        Type::Any
    }
}

impl FromValue for Value {
    fn from_value(value: &Value) -> Option<Self> {
        Some(value.clone())
    }
}

impl<T: Into<Value> + Typed> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::List(List::new(T::ty(), items.into_iter().map(Into::into)))
    }
}

impl<T: Typed> Typed for Vec<T> {
    fn ty() -> Type {
        Type::list(T::ty())
    }
}

impl<T: FromValue> FromValue for Vec<T> {
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::List(_) | Value::Array(_) | Value::Null(Type::List(_)) => value
                .elements()?
                .iter()
                .map(T::from_value)
                .collect(),
            _ => None,
        }
    }
}

macro_rules! handle_value {
    ($($variant:ident($t:ty)),*) => {$(
        impl From<$t> for Value {
            fn from(value: $t) -> Self {
                Value::$variant(value)
            }
        }

        impl FromValue for $t {
            fn from_value(value: &Value) -> Option<Self> {
                match value {
                    Value::$variant(v) => Some(v.clone()),
                    _ => None,
                }
            }
        }
    )*};
}

handle_value!(
    List(List),
    Array(Array),
    Map(Map),
    Struct(Struct),
    Ptr(Ptr),
    Fn(Func),
    Handle(Handle),
    Mock(Receiver)
);

impl Typed for List {
    fn ty() -> Type {
        Type::list(Type::Any)
    }
}

impl Typed for Ptr {
    fn ty() -> Type {
        Type::ptr(Type::Any)
    }
}

impl Typed for Map {
    fn ty() -> Type {
        Type::map(Type::Any, Type::Any)
    }
}

impl Typed for Func {
    fn ty() -> Type {
        Type::Fn
    }
}
