use crate::globals::ServerGlobals;
use crate::provider::ServerGlobalsProvider;
use crate::request::RequestHead;

/// Returns no globals at all.
#[derive(Clone, Copy, Debug, Default)]
pub struct EmptyServerGlobalsProvider;

impl ServerGlobalsProvider for EmptyServerGlobalsProvider {
  fn server_globals(&self, _request: &dyn RequestHead) -> ServerGlobals {
    ServerGlobals::new()
  }
}
