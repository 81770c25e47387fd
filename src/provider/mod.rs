use std::sync::Arc;

use crate::globals::ServerGlobals;
use crate::request::RequestHead;

mod compound;
mod default;
mod empty;
mod static_globals;

pub use compound::CompoundServerGlobalsProvider;
pub use default::DefaultServerGlobalsProvider;
pub use empty::EmptyServerGlobalsProvider;
pub use static_globals::SourceValue;
pub use static_globals::StaticServerGlobalsProvider;

/// Computes PHP `$_SERVER` globals for a request.
///
/// Implementations must not fail: missing or malformed optional request fields get a default
/// value instead. Providers compose through [`CompoundServerGlobalsProvider`].
pub trait ServerGlobalsProvider: Send + Sync {
  fn server_globals(&self, request: &dyn RequestHead) -> ServerGlobals;
}

impl<P: ServerGlobalsProvider + ?Sized> ServerGlobalsProvider for &P {
  fn server_globals(&self, request: &dyn RequestHead) -> ServerGlobals {
    (**self).server_globals(request)
  }
}

impl<P: ServerGlobalsProvider + ?Sized> ServerGlobalsProvider for Box<P> {
  fn server_globals(&self, request: &dyn RequestHead) -> ServerGlobals {
    (**self).server_globals(request)
  }
}

impl<P: ServerGlobalsProvider + ?Sized> ServerGlobalsProvider for Arc<P> {
  fn server_globals(&self, request: &dyn RequestHead) -> ServerGlobals {
    (**self).server_globals(request)
  }
}
