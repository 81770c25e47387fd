use std::sync::Arc;
use std::task::Context;
use std::task::Poll;

use hyper::Request;
use tower::Layer;
use tower::Service;
use tracing::debug;
use tracing::instrument;

use crate::globals::ServerGlobals;
use crate::provider::ServerGlobalsProvider;

/// Computes the server globals of every request and stores them as an `Arc<ServerGlobals>`
/// request extension before calling the inner service.
#[derive(Clone)]
pub struct ServerGlobalsService<S> {
  inner: S,
  provider: Arc<dyn ServerGlobalsProvider>,
}

impl<S> ServerGlobalsService<S> {
  pub fn new(inner: S, provider: Arc<dyn ServerGlobalsProvider>) -> Self {
    Self { inner, provider }
  }
}

impl<S, B> Service<Request<B>> for ServerGlobalsService<S>
where
  S: Service<Request<B>>,
{
  type Response = S::Response;
  type Error = S::Error;
  type Future = S::Future;

  fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
    self.inner.poll_ready(cx)
  }

  #[instrument(skip_all, fields(method = %request.method(), uri = %request.uri()))]
  fn call(&mut self, mut request: Request<B>) -> Self::Future {
    let globals = self.provider.server_globals(&request);
    debug!(count = globals.len(), "server globals attached");
    request.extensions_mut().insert(Arc::new(globals));
    self.inner.call(request)
  }
}

#[derive(Clone)]
pub struct ServerGlobalsLayer {
  provider: Arc<dyn ServerGlobalsProvider>,
}

impl ServerGlobalsLayer {
  pub fn new<P: ServerGlobalsProvider + 'static>(provider: P) -> Self {
    Self { provider: Arc::new(provider) }
  }

  pub fn from_shared(provider: Arc<dyn ServerGlobalsProvider>) -> Self {
    Self { provider }
  }
}

impl<S> Layer<S> for ServerGlobalsLayer {
  type Service = ServerGlobalsService<S>;

  fn layer(&self, inner: S) -> Self::Service {
    ServerGlobalsService::new(inner, self.provider.clone())
  }
}

/// Reads the globals attached by [`ServerGlobalsService`].
pub trait ServerGlobalsExt {
  fn server_globals(&self) -> Option<&Arc<ServerGlobals>>;
}

impl<B> ServerGlobalsExt for Request<B> {
  fn server_globals(&self) -> Option<&Arc<ServerGlobals>> {
    self.extensions().get::<Arc<ServerGlobals>>()
  }
}
