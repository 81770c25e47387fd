use std::collections::BTreeMap;
use std::collections::btree_map;

use serde::Serialize;

use crate::value::ServerValue;

/// The `$_SERVER` map produced by a provider.
///
/// Keys are unique and never empty, inserting an empty key is a no-op. Writing an existing key
/// replaces its value, which is what gives [`ServerGlobals::merge`] its "last one wins" semantics.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ServerGlobals(BTreeMap<String, ServerValue>);

impl ServerGlobals {
  pub fn new() -> Self {
    Self::default()
  }

  /// Inserts an entry, returning the replaced value if any.
  pub fn insert<K, V>(&mut self, key: K, value: V) -> Option<ServerValue>
  where
    K: Into<String>,
    V: Into<ServerValue>,
  {
    let key = key.into();
    if key.is_empty() {
      return None;
    }
    self.0.insert(key, value.into())
  }

  pub fn get(&self, key: &str) -> Option<&ServerValue> {
    self.0.get(key)
  }

  pub fn contains_key(&self, key: &str) -> bool {
    self.0.contains_key(key)
  }

  pub fn len(&self) -> usize {
    self.0.len()
  }

  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }

  pub fn iter(&self) -> btree_map::Iter<'_, String, ServerValue> {
    self.0.iter()
  }

  /// Moves every entry of `other` into `self`, overwriting existing keys.
  pub fn merge(&mut self, other: ServerGlobals) {
    self.0.extend(other.0);
  }
}

impl<K, V> Extend<(K, V)> for ServerGlobals
where
  K: Into<String>,
  V: Into<ServerValue>,
{
  fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
    for (key, value) in iter {
      self.insert(key, value);
    }
  }
}

impl<K, V> FromIterator<(K, V)> for ServerGlobals
where
  K: Into<String>,
  V: Into<ServerValue>,
{
  fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
    let mut globals = Self::new();
    globals.extend(iter);
    globals
  }
}

impl IntoIterator for ServerGlobals {
  type Item = (String, ServerValue);
  type IntoIter = btree_map::IntoIter<String, ServerValue>;

  fn into_iter(self) -> Self::IntoIter {
    self.0.into_iter()
  }
}

impl<'a> IntoIterator for &'a ServerGlobals {
  type Item = (&'a String, &'a ServerValue);
  type IntoIter = btree_map::Iter<'a, String, ServerValue>;

  fn into_iter(self) -> Self::IntoIter {
    self.0.iter()
  }
}
