use crate::table::value::Record;
use crate::table::value::ValueRef;
use std::fmt;
use std::rc::Rc;

/// Identifies one logical row, independent of where it is displayed.
///
/// Text and numbers are distinct keys: `Int(2)` and `Text("2")` never match.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum RowKey {
    Int(i64),
    /// Bit pattern of a non-integral float.
    Float(u64),
    Text(String),
    Bool(bool),
}

impl RowKey {
    /// Builds a key from a field value. Integral floats collapse onto [`RowKey::Int`] so `2` and
    /// `2.0` name the same row.
    pub fn from_value(value: ValueRef<'_>) -> Option<RowKey> {
        match value {
            ValueRef::Null => None,
            ValueRef::Bool(b) => Some(RowKey::Bool(b)),
            ValueRef::Int(i) => Some(RowKey::Int(i)),
            ValueRef::Float(f) if f.fract() == 0.0 && f.abs() < i64::MAX as f64 => {
                Some(RowKey::Int(f as i64))
            }
            ValueRef::Float(f) => Some(RowKey::Float(f.to_bits())),
            ValueRef::Text(s) => Some(RowKey::Text(s.to_string())),
        }
    }
}

impl fmt::Display for RowKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowKey::Int(i) => write!(f, "{i}"),
            RowKey::Float(bits) => write!(f, "{}", f64::from_bits(*bits)),
            RowKey::Text(s) => f.write_str(s),
            RowKey::Bool(b) => write!(f, "{b}"),
        }
    }
}

impl From<i64> for RowKey {
    fn from(v: i64) -> Self {
        RowKey::Int(v)
    }
}

impl From<i32> for RowKey {
    fn from(v: i32) -> Self {
        RowKey::Int(v as i64)
    }
}

impl From<usize> for RowKey {
    fn from(v: usize) -> Self {
        RowKey::Int(v as i64)
    }
}

impl From<&str> for RowKey {
    fn from(v: &str) -> Self {
        RowKey::Text(v.to_string())
    }
}

impl From<String> for RowKey {
    fn from(v: String) -> Self {
        RowKey::Text(v)
    }
}

/// Computes a key from `(row, display_index)`.
pub type RowKeyFn<R> = Rc<dyn Fn(&R, usize) -> RowKey>;

/// How a table derives each row's [`RowKey`].
pub enum RowKeySource<R> {
    /// Read the named field.
    ///
    /// A missing or falsy value (null, `false`, `0`, NaN, `""`) falls back to the row's display
    /// index. That fallback is position-based, so two such rows can swap keys after a re-sort;
    /// give every row a truthy identity field, or use [`RowKeySource::Func`], when selection
    /// has to survive sorting.
    Field(String),
    /// Call a function; its result is used verbatim.
    Func(RowKeyFn<R>),
}

impl<R> RowKeySource<R> {
    pub fn field(name: impl Into<String>) -> Self {
        RowKeySource::Field(name.into())
    }

    pub fn func<F>(f: F) -> Self
    where
        F: Fn(&R, usize) -> RowKey + 'static,
    {
        RowKeySource::Func(Rc::new(f))
    }
}

impl<R: Record> RowKeySource<R> {
    pub fn identity_of(&self, row: &R, display_index: usize) -> RowKey {
        match self {
            RowKeySource::Field(name) => row
                .field(name)
                .filter(ValueRef::is_truthy)
                .and_then(RowKey::from_value)
                .unwrap_or_else(|| RowKey::from(display_index)),
            RowKeySource::Func(f) => f(row, display_index),
        }
    }
}

impl<R> Default for RowKeySource<R> {
    fn default() -> Self {
        RowKeySource::Field("id".to_string())
    }
}

impl<R> Clone for RowKeySource<R> {
    fn clone(&self) -> Self {
        match self {
            RowKeySource::Field(name) => RowKeySource::Field(name.clone()),
            RowKeySource::Func(f) => RowKeySource::Func(Rc::clone(f)),
        }
    }
}

impl<R> fmt::Debug for RowKeySource<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowKeySource::Field(name) => f.debug_tuple("Field").field(name).finish(),
            RowKeySource::Func(_) => f.write_str("Func(..)"),
        }
    }
}
