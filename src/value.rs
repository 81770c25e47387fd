use std::fmt::Display;
use std::fmt::Formatter;

use serde::Serialize;

/// A scalar `$_SERVER` value.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ServerValue {
  String(String),
  Int(i64),
  Float(f64),
  Bool(bool),
}

impl ServerValue {
  pub fn as_str(&self) -> Option<&str> {
    match self {
      ServerValue::String(value) => Some(value),
      _ => None,
    }
  }

  pub fn as_int(&self) -> Option<i64> {
    match self {
      ServerValue::Int(value) => Some(*value),
      _ => None,
    }
  }

  pub fn as_float(&self) -> Option<f64> {
    match self {
      ServerValue::Float(value) => Some(*value),
      _ => None,
    }
  }

  pub fn as_bool(&self) -> Option<bool> {
    match self {
      ServerValue::Bool(value) => Some(*value),
      _ => None,
    }
  }
}

/// Formats the value the way PHP casts it to a string, `true` as `1` and `false` as empty.
impl Display for ServerValue {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    match self {
      ServerValue::String(value) => f.write_str(value),
      ServerValue::Int(value) => write!(f, "{value}"),
      ServerValue::Float(value) => write!(f, "{value}"),
      ServerValue::Bool(true) => f.write_str("1"),
      ServerValue::Bool(false) => Ok(()),
    }
  }
}

impl From<String> for ServerValue {
  fn from(value: String) -> Self {
    Self::String(value)
  }
}

impl From<&str> for ServerValue {
  fn from(value: &str) -> Self {
    Self::String(value.to_string())
  }
}

impl From<i64> for ServerValue {
  fn from(value: i64) -> Self {
    Self::Int(value)
  }
}

impl From<i32> for ServerValue {
  fn from(value: i32) -> Self {
    Self::Int(value.into())
  }
}

impl From<u16> for ServerValue {
  fn from(value: u16) -> Self {
    Self::Int(value.into())
  }
}

impl From<f64> for ServerValue {
  fn from(value: f64) -> Self {
    Self::Float(value)
  }
}

impl From<bool> for ServerValue {
  fn from(value: bool) -> Self {
    Self::Bool(value)
  }
}
