use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;
use serde::de::IgnoredAny;
use tracing::debug;
use tracing::warn;

use crate::error::Error;
use crate::globals::ServerGlobals;
use crate::provider::ServerGlobalsProvider;
use crate::request::RequestHead;
use crate::value::ServerValue;
use crate::variables::DOCUMENT_ROOT;
use crate::variables::SCRIPT_FILENAME;
use crate::variables::SERVER_NAME;
use crate::variables::SERVER_PORT;
use crate::variables::SERVER_SOFTWARE;

const DEFAULT_SERVER_NAME: &str = "0.0.0.0";
const DEFAULT_SERVER_PORT: &str = "0";
const DEFAULT_SERVER_SOFTWARE: &str = "Boson Runtime";

/// A candidate entry read from an untyped source such as a TOML or JSON table.
///
/// Only strings, integers and booleans are kept, everything else lands in
/// [`SourceValue::Unsupported`] and is dropped by [`StaticServerGlobalsProvider::from_source`].
/// Integers above `i64::MAX` land in [`SourceValue::OutOfRange`] and are dropped as well.
#[derive(Clone, Debug, Deserialize)]
#[serde(untagged)]
pub enum SourceValue {
  Bool(bool),
  Int(i64),
  OutOfRange(u64),
  String(String),
  Unsupported(IgnoredAny),
}

impl SourceValue {
  fn into_server_value(self, key: &str) -> Option<ServerValue> {
    match self {
      SourceValue::Bool(value) => Some(value.into()),
      SourceValue::Int(value) => Some(value.into()),
      SourceValue::String(value) => Some(value.into()),
      SourceValue::OutOfRange(value) => {
        debug!(key, value, "dropping server global, integer out of range");
        None
      }
      SourceValue::Unsupported(_) => {
        debug!(key, "dropping non-scalar server global");
        None
      }
    }
  }
}

/// Returns a fixed set of globals that does not depend on the request.
///
/// The source entries are completed with defaults for `DOCUMENT_ROOT`, `SERVER_NAME`,
/// `SERVER_PORT` and `SERVER_SOFTWARE` when they are missing.
#[derive(Clone, Debug, PartialEq)]
pub struct StaticServerGlobalsProvider {
  globals: ServerGlobals,
}

impl StaticServerGlobalsProvider {
  /// Builds the provider from typed entries, dropping empty keys and float values.
  pub fn new<I, K, V>(server: I) -> Self
  where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<ServerValue>,
  {
    let mut globals = ServerGlobals::new();
    for (key, value) in server {
      let key = key.into();
      if key.is_empty() {
        debug!("dropping server global with an empty key");
        continue;
      }
      let value: ServerValue = value.into();
      match value {
        ServerValue::Float(_) => debug!(%key, "dropping non-scalar server global"),
        value => {
          globals.insert(key, value);
        }
      }
    }

    Self::with_defaults(globals)
  }

  /// Uses the environment the process inherited as source.
  pub fn from_env() -> Self {
    Self::new(std::env::vars_os().map(|(key, value)| {
      (key.to_string_lossy().into_owned(), value.to_string_lossy().into_owned())
    }))
  }

  /// Builds the provider from untyped candidates, dropping the ones that are not scalar.
  pub fn from_source<I, K>(server: I) -> Self
  where
    I: IntoIterator<Item = (K, SourceValue)>,
    K: Into<String>,
  {
    Self::new(server.into_iter().filter_map(|(key, value)| {
      let key = key.into();
      value.into_server_value(&key).map(|value| (key, value))
    }))
  }

  pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
    let server: BTreeMap<String, SourceValue> = toml::from_str(content)?;
    Ok(Self::from_source(server))
  }

  pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)
      .map_err(|source| Error::Io { path: path.to_path_buf(), source })?;

    Self::from_toml_str(&content).map_err(|source| Error::Toml { path: path.to_path_buf(), source })
  }

  pub fn globals(&self) -> &ServerGlobals {
    &self.globals
  }

  fn with_defaults(mut globals: ServerGlobals) -> Self {
    if !globals.contains_key(DOCUMENT_ROOT) {
      let document_root = match globals.get(SCRIPT_FILENAME) {
        Some(script_filename) => dirname(&script_filename.to_string()),
        None => current_dir(),
      };
      globals.insert(DOCUMENT_ROOT, document_root);
    }
    if !globals.contains_key(SERVER_NAME) {
      globals.insert(SERVER_NAME, DEFAULT_SERVER_NAME);
    }
    if !globals.contains_key(SERVER_PORT) {
      globals.insert(SERVER_PORT, DEFAULT_SERVER_PORT);
    }
    if !globals.contains_key(SERVER_SOFTWARE) {
      globals.insert(SERVER_SOFTWARE, DEFAULT_SERVER_SOFTWARE);
    }

    Self { globals }
  }
}

impl Default for StaticServerGlobalsProvider {
  fn default() -> Self {
    Self::from_env()
  }
}

impl ServerGlobalsProvider for StaticServerGlobalsProvider {
  fn server_globals(&self, _request: &dyn RequestHead) -> ServerGlobals {
    self.globals.clone()
  }
}

fn dirname(path: &str) -> String {
  match Path::new(path).parent() {
    Some(parent) if parent.as_os_str().is_empty() => ".".to_string(),
    Some(parent) => parent.to_string_lossy().into_owned(),
    None => path.to_string(),
  }
}

fn current_dir() -> String {
  match std::env::current_dir() {
    Ok(dir) => dir.to_string_lossy().into_owned(),
    Err(err) => {
      warn!("Failed to read the current directory: {err}");
      String::new()
    }
  }
}
