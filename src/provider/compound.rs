use std::fmt::Debug;
use std::fmt::Formatter;

use tracing::trace;

use crate::globals::ServerGlobals;
use crate::provider::ServerGlobalsProvider;
use crate::request::RequestHead;

/// Merges the globals of several providers, a later provider overrides the keys of an earlier
/// one.
pub struct CompoundServerGlobalsProvider {
  providers: Box<[Box<dyn ServerGlobalsProvider>]>,
}

impl CompoundServerGlobalsProvider {
  pub fn new<I>(providers: I) -> Self
  where
    I: IntoIterator<Item = Box<dyn ServerGlobalsProvider>>,
  {
    Self { providers: providers.into_iter().collect() }
  }

  pub fn len(&self) -> usize {
    self.providers.len()
  }

  pub fn is_empty(&self) -> bool {
    self.providers.is_empty()
  }
}

impl ServerGlobalsProvider for CompoundServerGlobalsProvider {
  fn server_globals(&self, request: &dyn RequestHead) -> ServerGlobals {
    let mut globals = ServerGlobals::new();

    for provider in self.providers.iter() {
      globals.merge(provider.server_globals(request));
    }

    trace!(providers = self.providers.len(), count = globals.len(), "compound globals merged");
    globals
  }
}

impl Debug for CompoundServerGlobalsProvider {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("CompoundServerGlobalsProvider")
      .field("providers", &self.providers.len())
      .finish()
  }
}
