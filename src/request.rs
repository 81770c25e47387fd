use hyper::HeaderMap;
use hyper::Method;
use hyper::Request;
use hyper::Uri;
use hyper::http::request::Parts;

/// Read-only view over the parts of a request the providers look at.
///
/// Implemented for both a full [`Request`] and its [`Parts`], so a caller that already split the
/// body off can still compute the globals.
pub trait RequestHead {
  fn method(&self) -> &Method;

  fn uri(&self) -> &Uri;

  fn headers(&self) -> &HeaderMap;
}

impl<B> RequestHead for Request<B> {
  fn method(&self) -> &Method {
    Request::method(self)
  }

  fn uri(&self) -> &Uri {
    Request::uri(self)
  }

  fn headers(&self) -> &HeaderMap {
    Request::headers(self)
  }
}

impl RequestHead for Parts {
  fn method(&self) -> &Method {
    &self.method
  }

  fn uri(&self) -> &Uri {
    &self.uri
  }

  fn headers(&self) -> &HeaderMap {
    &self.headers
  }
}
