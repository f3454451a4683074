use crate::error::FieldError;
use crate::table::column::Column;
use serde::Deserialize;
use serde::Serialize;
use std::collections::BTreeMap;
use std::collections::HashMap;
use std::fmt;

/// A cell value.
///
/// Deserializes untagged, so a JSON object of scalars maps straight onto a [`Row`]. Integers that
/// fit in `i64` become [`Value::Int`], every other number becomes [`Value::Float`].
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl Value {
    pub fn as_ref(&self) -> ValueRef<'_> {
        match self {
            Value::Null => ValueRef::Null,
            Value::Bool(b) => ValueRef::Bool(*b),
            Value::Int(i) => ValueRef::Int(*i),
            Value::Float(f) => ValueRef::Float(*f),
            Value::Text(s) => ValueRef::Text(s),
        }
    }

    pub fn type_name(&self) -> &'static str {
        self.as_ref().type_name()
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v as i64)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<u32> for Value {
    fn from(v: u32) -> Self {
        Value::Int(v as i64)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(Value::Null)
    }
}

/// Borrowed view of a [`Value`], returned by [`Record::field`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ValueRef<'a> {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(&'a str),
}

impl ValueRef<'_> {
    pub fn is_null(&self) -> bool {
        matches!(self, ValueRef::Null)
    }

    pub fn as_f64(&self) -> Option<f64> {
        match *self {
            ValueRef::Int(i) => Some(i as f64),
            ValueRef::Float(f) => Some(f),
            _ => None,
        }
    }

    /// `false` for null, `false`, zero, NaN, and the empty string.
    pub fn is_truthy(&self) -> bool {
        match *self {
            ValueRef::Null => false,
            ValueRef::Bool(b) => b,
            ValueRef::Int(i) => i != 0,
            ValueRef::Float(f) => f != 0.0 && !f.is_nan(),
            ValueRef::Text(s) => !s.is_empty(),
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            ValueRef::Null => "null",
            ValueRef::Bool(_) => "bool",
            ValueRef::Int(_) => "int",
            ValueRef::Float(_) => "float",
            ValueRef::Text(_) => "text",
        }
    }

    pub fn to_owned_value(&self) -> Value {
        match *self {
            ValueRef::Null => Value::Null,
            ValueRef::Bool(b) => Value::Bool(b),
            ValueRef::Int(i) => Value::Int(i),
            ValueRef::Float(f) => Value::Float(f),
            ValueRef::Text(s) => Value::Text(s.to_string()),
        }
    }
}

/// String coercion used for display.
impl fmt::Display for ValueRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            ValueRef::Null => f.write_str("null"),
            ValueRef::Bool(b) => write!(f, "{b}"),
            ValueRef::Int(i) => write!(f, "{i}"),
            ValueRef::Float(v) if v.is_infinite() => {
                f.write_str(if v > 0.0 { "Infinity" } else { "-Infinity" })
            }
            ValueRef::Float(v) => write!(f, "{v}"),
            ValueRef::Text(s) => f.write_str(s),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.as_ref().fmt(f)
    }
}

/// Field access for anything displayed in a data table.
///
/// `None` means the record has no such field; sorting treats it exactly like
/// [`ValueRef::Null`].
pub trait Record {
    fn field(&self, key: &str) -> Option<ValueRef<'_>>;
}

impl<R: Record + ?Sized> Record for &R {
    fn field(&self, key: &str) -> Option<ValueRef<'_>> {
        (**self).field(key)
    }
}

impl Record for BTreeMap<String, Value> {
    fn field(&self, key: &str) -> Option<ValueRef<'_>> {
        self.get(key).map(Value::as_ref)
    }
}

impl Record for HashMap<String, Value> {
    fn field(&self, key: &str) -> Option<ValueRef<'_>> {
        self.get(key).map(Value::as_ref)
    }
}

/// A general-purpose row: field name to [`Value`].
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Row(BTreeMap<String, Value>);

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(key.into(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn try_get(&self, key: &str) -> Result<&Value, FieldError> {
        self.0.get(key).ok_or_else(|| FieldError::missing(key))
    }

    pub fn text(&self, key: &str) -> Result<&str, FieldError> {
        match self.try_get(key)? {
            Value::Text(s) => Ok(s),
            other => Err(FieldError::type_mismatch(key, "text", other.type_name())),
        }
    }

    pub fn int(&self, key: &str) -> Result<i64, FieldError> {
        match self.try_get(key)? {
            Value::Int(i) => Ok(*i),
            other => Err(FieldError::type_mismatch(key, "int", other.type_name())),
        }
    }

    pub fn float(&self, key: &str) -> Result<f64, FieldError> {
        match self.try_get(key)? {
            Value::Int(i) => Ok(*i as f64),
            Value::Float(f) => Ok(*f),
            other => Err(FieldError::type_mismatch(key, "float", other.type_name())),
        }
    }

    /// Checks that this row exposes every key referenced by `columns`.
    ///
    /// Tables never require this; it is for callers that want to reject incomplete data up front.
    pub fn check_columns<R>(&self, columns: &[Column<R>]) -> Result<(), FieldError> {
        for column in columns {
            self.try_get(column.key())?;
        }
        Ok(())
    }
}

impl Record for Row {
    fn field(&self, key: &str) -> Option<ValueRef<'_>> {
        self.0.get(key).map(Value::as_ref)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Row {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}
